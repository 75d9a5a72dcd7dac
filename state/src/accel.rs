//! Acceleration group.
//!
//! Four representations (NED/ECEF in both domains). NED <-> ECEF is the
//! tangent-plane rotation from the origin definition, independent of the
//! vehicle attitude. Every getter derives when its bit is unset, like the
//! rest of the system.

use crate::error::StateError::NoValidRepresentation;
use crate::error::StateResult;
use crate::origin::LocalOrigin;
use crate::status::{Repr, ReprSet};
use geomath::algebra_int::{vect3_f_of_i, vect3_i_of_f, Int32Vect3};
use geomath::bfp::ACCEL_FRAC;
use geomath::geodetic::{ecef_of_ned_vect, ned_of_ecef_vect};
use geomath::geodetic_int::{ecef_i_of_ned_vect_i, ned_i_of_ecef_vect_i};
use geomath::Vect3;

const GROUP: &str = "acceleration";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccelRepr {
    EcefI,
    NedI,
    EcefF,
    NedF,
}

impl Repr for AccelRepr {
    fn bit(self) -> u8 {
        match self {
            AccelRepr::EcefI => 0,
            AccelRepr::NedI => 1,
            AccelRepr::EcefF => 2,
            AccelRepr::NedF => 3,
        }
    }
}

/// m/s^2; integer slots are Q21.10.
#[derive(Debug, Clone, Default)]
pub struct AccelState {
    valid: ReprSet<AccelRepr>,
    ecef_i: Int32Vect3,
    ned_i: Int32Vect3,
    ecef_f: Vect3,
    ned_f: Vect3,
    saturations: u32,
}

impl AccelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self, r: AccelRepr) -> bool {
        self.valid.contains(r)
    }

    pub fn saturation_count(&self) -> u32 {
        self.saturations
    }

    pub fn set_ecef_i(&mut self, ecef: Int32Vect3) {
        self.ecef_i = ecef;
        self.valid = ReprSet::only(AccelRepr::EcefI);
    }

    pub fn set_ned_i(&mut self, ned: Int32Vect3) {
        self.ned_i = ned;
        self.valid = ReprSet::only(AccelRepr::NedI);
    }

    pub fn set_ecef_f(&mut self, ecef: Vect3) {
        self.ecef_f = ecef;
        self.valid = ReprSet::only(AccelRepr::EcefF);
    }

    pub fn set_ned_f(&mut self, ned: Vect3) {
        self.ned_f = ned;
        self.valid = ReprSet::only(AccelRepr::NedF);
    }

    pub fn ecef_i(&mut self, origin: &LocalOrigin) -> StateResult<Int32Vect3> {
        self.calc_ecef_i(origin)?;
        Ok(self.ecef_i)
    }

    pub fn ned_i(&mut self, origin: &LocalOrigin) -> StateResult<Int32Vect3> {
        self.calc_ned_i(origin)?;
        Ok(self.ned_i)
    }

    pub fn ecef_f(&mut self, origin: &LocalOrigin) -> StateResult<Vect3> {
        self.calc_ecef_f(origin)?;
        Ok(self.ecef_f)
    }

    pub fn ned_f(&mut self, origin: &LocalOrigin) -> StateResult<Vect3> {
        self.calc_ned_f(origin)?;
        Ok(self.ned_f)
    }

    fn calc_ned_f(&mut self, origin: &LocalOrigin) -> StateResult<()> {
        use AccelRepr::*;
        if self.valid.contains(NedF) {
            return Ok(());
        }
        if self.valid.contains(NedI) {
            self.ned_f = vect3_f_of_i(&self.ned_i, ACCEL_FRAC);
        } else if self.valid.contains(EcefF) {
            self.ned_f = ned_of_ecef_vect(origin.float()?, &self.ecef_f);
        } else if self.valid.contains(EcefI) {
            self.ecef_f = vect3_f_of_i(&self.ecef_i, ACCEL_FRAC);
            self.valid.insert(EcefF);
            self.ned_f = ned_of_ecef_vect(origin.float()?, &self.ecef_f);
        } else {
            return Err(NoValidRepresentation(GROUP));
        }
        self.valid.insert(NedF);
        Ok(())
    }

    fn calc_ecef_f(&mut self, origin: &LocalOrigin) -> StateResult<()> {
        use AccelRepr::*;
        if self.valid.contains(EcefF) {
            return Ok(());
        }
        if self.valid.contains(EcefI) {
            self.ecef_f = vect3_f_of_i(&self.ecef_i, ACCEL_FRAC);
        } else if self.valid.contains(NedF) {
            self.ecef_f = ecef_of_ned_vect(origin.float()?, &self.ned_f);
        } else if self.valid.contains(NedI) {
            self.ned_f = vect3_f_of_i(&self.ned_i, ACCEL_FRAC);
            self.valid.insert(NedF);
            self.ecef_f = ecef_of_ned_vect(origin.float()?, &self.ned_f);
        } else {
            return Err(NoValidRepresentation(GROUP));
        }
        self.valid.insert(EcefF);
        Ok(())
    }

    fn calc_ned_i(&mut self, origin: &LocalOrigin) -> StateResult<()> {
        use AccelRepr::*;
        if self.valid.contains(NedI) {
            return Ok(());
        }
        if self.valid.contains(NedF) {
            self.ned_i = crate::accept(
                vect3_i_of_f(&self.ned_f, ACCEL_FRAC),
                &mut self.saturations,
                GROUP,
            );
        } else if self.valid.contains(EcefI) {
            let def = origin.int()?;
            self.ned_i = crate::accept(
                ned_i_of_ecef_vect_i(def, &self.ecef_i, ACCEL_FRAC),
                &mut self.saturations,
                GROUP,
            );
        } else {
            self.calc_ned_f(origin)?;
            self.ned_i = crate::accept(
                vect3_i_of_f(&self.ned_f, ACCEL_FRAC),
                &mut self.saturations,
                GROUP,
            );
        }
        self.valid.insert(NedI);
        Ok(())
    }

    fn calc_ecef_i(&mut self, origin: &LocalOrigin) -> StateResult<()> {
        use AccelRepr::*;
        if self.valid.contains(EcefI) {
            return Ok(());
        }
        if self.valid.contains(EcefF) {
            self.ecef_i = crate::accept(
                vect3_i_of_f(&self.ecef_f, ACCEL_FRAC),
                &mut self.saturations,
                GROUP,
            );
        } else if self.valid.contains(NedI) {
            let def = origin.int()?;
            self.ecef_i = crate::accept(
                ecef_i_of_ned_vect_i(def, &self.ned_i, ACCEL_FRAC),
                &mut self.saturations,
                GROUP,
            );
        } else {
            self.calc_ecef_f(origin)?;
            self.ecef_i = crate::accept(
                vect3_i_of_f(&self.ecef_f, ACCEL_FRAC),
                &mut self.saturations,
                GROUP,
            );
        }
        self.valid.insert(EcefI);
        Ok(())
    }
}
