//! Ground-speed group.
//!
//! ECEF and NED vectors are settable in both domains; the horizontal norm
//! and direction are derived-only scalars computed from the NED speed of
//! the same numeric domain. Direction is a compass-style bearing: zero is
//! north, clockwise positive, range (-pi, pi]. NED <-> ECEF is the
//! tangent-plane rotation, so it is gated on the origin of the domain the
//! rotation runs in.

use crate::error::StateError::NoValidRepresentation;
use crate::error::StateResult;
use crate::origin::LocalOrigin;
use crate::status::{Repr, ReprSet};
use geomath::algebra_int::{vect3_f_of_i, vect3_i_of_f, Int32Vect3};
use geomath::bfp::{self, ANGLE_FRAC, SPEED_FRAC};
use geomath::geodetic::{ecef_of_ned_vect, ned_of_ecef_vect};
use geomath::geodetic_int::{ecef_i_of_ned_vect_i, ned_i_of_ecef_vect_i};
use geomath::Vect3;

const GROUP: &str = "ground speed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedRepr {
    EcefI,
    NedI,
    HNormI,
    HDirI,
    EcefF,
    NedF,
    HNormF,
    HDirF,
}

impl Repr for SpeedRepr {
    fn bit(self) -> u8 {
        match self {
            SpeedRepr::EcefI => 0,
            SpeedRepr::NedI => 1,
            SpeedRepr::HNormI => 2,
            SpeedRepr::HDirI => 3,
            SpeedRepr::EcefF => 4,
            SpeedRepr::NedF => 5,
            SpeedRepr::HNormF => 6,
            SpeedRepr::HDirF => 7,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SpeedState {
    valid: ReprSet<SpeedRepr>,
    /// m/s, Q12.19.
    ecef_i: Int32Vect3,
    ned_i: Int32Vect3,
    /// Norm of the horizontal NED speed, m/s Q12.19.
    h_norm_i: i32,
    /// Bearing of the horizontal NED speed, rad Q19.12.
    h_dir_i: i32,
    /// m/s.
    ecef_f: Vect3,
    ned_f: Vect3,
    h_norm_f: f64,
    h_dir_f: f64,
    saturations: u32,
}

impl SpeedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self, r: SpeedRepr) -> bool {
        self.valid.contains(r)
    }

    pub fn saturation_count(&self) -> u32 {
        self.saturations
    }

    pub fn set_ecef_i(&mut self, ecef: Int32Vect3) {
        self.ecef_i = ecef;
        self.valid = ReprSet::only(SpeedRepr::EcefI);
    }

    pub fn set_ned_i(&mut self, ned: Int32Vect3) {
        self.ned_i = ned;
        self.valid = ReprSet::only(SpeedRepr::NedI);
    }

    pub fn set_ecef_f(&mut self, ecef: Vect3) {
        self.ecef_f = ecef;
        self.valid = ReprSet::only(SpeedRepr::EcefF);
    }

    pub fn set_ned_f(&mut self, ned: Vect3) {
        self.ned_f = ned;
        self.valid = ReprSet::only(SpeedRepr::NedF);
    }

    pub fn ecef_i(&mut self, origin: &LocalOrigin) -> StateResult<Int32Vect3> {
        self.calc_ecef_i(origin)?;
        Ok(self.ecef_i)
    }

    pub fn ned_i(&mut self, origin: &LocalOrigin) -> StateResult<Int32Vect3> {
        self.calc_ned_i(origin)?;
        Ok(self.ned_i)
    }

    pub fn h_norm_i(&mut self, origin: &LocalOrigin) -> StateResult<i32> {
        self.calc_h_norm_i(origin)?;
        Ok(self.h_norm_i)
    }

    pub fn h_dir_i(&mut self, origin: &LocalOrigin) -> StateResult<i32> {
        self.calc_h_dir_i(origin)?;
        Ok(self.h_dir_i)
    }

    pub fn ecef_f(&mut self, origin: &LocalOrigin) -> StateResult<Vect3> {
        self.calc_ecef_f(origin)?;
        Ok(self.ecef_f)
    }

    pub fn ned_f(&mut self, origin: &LocalOrigin) -> StateResult<Vect3> {
        self.calc_ned_f(origin)?;
        Ok(self.ned_f)
    }

    pub fn h_norm_f(&mut self, origin: &LocalOrigin) -> StateResult<f64> {
        self.calc_h_norm_f(origin)?;
        Ok(self.h_norm_f)
    }

    pub fn h_dir_f(&mut self, origin: &LocalOrigin) -> StateResult<f64> {
        self.calc_h_dir_f(origin)?;
        Ok(self.h_dir_f)
    }

    fn calc_ned_f(&mut self, origin: &LocalOrigin) -> StateResult<()> {
        use SpeedRepr::*;
        if self.valid.contains(NedF) {
            return Ok(());
        }
        if self.valid.contains(NedI) {
            self.ned_f = vect3_f_of_i(&self.ned_i, SPEED_FRAC);
        } else if self.valid.contains(EcefF) {
            self.ned_f = ned_of_ecef_vect(origin.float()?, &self.ecef_f);
        } else if self.valid.contains(EcefI) {
            self.ecef_f = vect3_f_of_i(&self.ecef_i, SPEED_FRAC);
            self.valid.insert(EcefF);
            self.ned_f = ned_of_ecef_vect(origin.float()?, &self.ecef_f);
        } else {
            return Err(NoValidRepresentation(GROUP));
        }
        self.valid.insert(NedF);
        Ok(())
    }

    fn calc_ecef_f(&mut self, origin: &LocalOrigin) -> StateResult<()> {
        use SpeedRepr::*;
        if self.valid.contains(EcefF) {
            return Ok(());
        }
        if self.valid.contains(EcefI) {
            self.ecef_f = vect3_f_of_i(&self.ecef_i, SPEED_FRAC);
        } else if self.valid.contains(NedF) {
            self.ecef_f = ecef_of_ned_vect(origin.float()?, &self.ned_f);
        } else if self.valid.contains(NedI) {
            self.ned_f = vect3_f_of_i(&self.ned_i, SPEED_FRAC);
            self.valid.insert(NedF);
            self.ecef_f = ecef_of_ned_vect(origin.float()?, &self.ned_f);
        } else {
            return Err(NoValidRepresentation(GROUP));
        }
        self.valid.insert(EcefF);
        Ok(())
    }

    fn calc_ned_i(&mut self, origin: &LocalOrigin) -> StateResult<()> {
        use SpeedRepr::*;
        if self.valid.contains(NedI) {
            return Ok(());
        }
        if self.valid.contains(NedF) {
            self.ned_i = crate::accept(
                vect3_i_of_f(&self.ned_f, SPEED_FRAC),
                &mut self.saturations,
                GROUP,
            );
        } else if self.valid.contains(EcefI) {
            let def = origin.int()?;
            self.ned_i = crate::accept(
                ned_i_of_ecef_vect_i(def, &self.ecef_i, SPEED_FRAC),
                &mut self.saturations,
                GROUP,
            );
        } else {
            self.calc_ned_f(origin)?;
            self.ned_i = crate::accept(
                vect3_i_of_f(&self.ned_f, SPEED_FRAC),
                &mut self.saturations,
                GROUP,
            );
        }
        self.valid.insert(NedI);
        Ok(())
    }

    fn calc_ecef_i(&mut self, origin: &LocalOrigin) -> StateResult<()> {
        use SpeedRepr::*;
        if self.valid.contains(EcefI) {
            return Ok(());
        }
        if self.valid.contains(EcefF) {
            self.ecef_i = crate::accept(
                vect3_i_of_f(&self.ecef_f, SPEED_FRAC),
                &mut self.saturations,
                GROUP,
            );
        } else if self.valid.contains(NedI) {
            let def = origin.int()?;
            self.ecef_i = crate::accept(
                ecef_i_of_ned_vect_i(def, &self.ned_i, SPEED_FRAC),
                &mut self.saturations,
                GROUP,
            );
        } else {
            self.calc_ecef_f(origin)?;
            self.ecef_i = crate::accept(
                vect3_i_of_f(&self.ecef_f, SPEED_FRAC),
                &mut self.saturations,
                GROUP,
            );
        }
        self.valid.insert(EcefI);
        Ok(())
    }

    fn calc_h_norm_f(&mut self, origin: &LocalOrigin) -> StateResult<()> {
        if self.valid.contains(SpeedRepr::HNormF) {
            return Ok(());
        }
        self.calc_ned_f(origin)?;
        self.h_norm_f = self.ned_f.x.hypot(self.ned_f.y);
        self.valid.insert(SpeedRepr::HNormF);
        Ok(())
    }

    fn calc_h_dir_f(&mut self, origin: &LocalOrigin) -> StateResult<()> {
        if self.valid.contains(SpeedRepr::HDirF) {
            return Ok(());
        }
        self.calc_ned_f(origin)?;
        // bearing: zero = north, clockwise positive
        self.h_dir_f = self.ned_f.y.atan2(self.ned_f.x);
        self.valid.insert(SpeedRepr::HDirF);
        Ok(())
    }

    fn calc_h_norm_i(&mut self, origin: &LocalOrigin) -> StateResult<()> {
        if self.valid.contains(SpeedRepr::HNormI) {
            return Ok(());
        }
        self.calc_ned_i(origin)?;
        let ned = vect3_f_of_i(&self.ned_i, SPEED_FRAC);
        self.h_norm_i = crate::accept(
            bfp::bfp_of_real(ned.x.hypot(ned.y), SPEED_FRAC),
            &mut self.saturations,
            GROUP,
        );
        self.valid.insert(SpeedRepr::HNormI);
        Ok(())
    }

    fn calc_h_dir_i(&mut self, origin: &LocalOrigin) -> StateResult<()> {
        if self.valid.contains(SpeedRepr::HDirI) {
            return Ok(());
        }
        self.calc_ned_i(origin)?;
        let ned = vect3_f_of_i(&self.ned_i, SPEED_FRAC);
        self.h_dir_i = crate::accept(
            bfp::bfp_of_real(ned.y.atan2(ned.x), ANGLE_FRAC),
            &mut self.saturations,
            GROUP,
        );
        self.valid.insert(SpeedRepr::HDirI);
        Ok(())
    }
}
