//! Attitude group: the NED-to-body rotation in six representations.
//!
//! Float targets convert with direct formulas inside the float domain, or
//! a single expansion cast when only the integer counterpart is valid.
//! Integer targets always materialize their float counterpart first and
//! quantize it, so every numeric formula runs in `f64` and an
//! integer-to-integer derivation is expand, convert, quantize. Any of the
//! six representations may be the authoritative source.
//!
//! Sign and drift policy: setters store the caller's quaternion sign
//! unchanged (q and -q are the same rotation). Derivations that produce a
//! float quaternion renormalize, which bounds drift across repeated
//! derivation chains; the integer quaternion carries the Q16.15
//! quantization error instead and is renormalized on expansion.

use crate::error::StateError::NoValidRepresentation;
use crate::error::StateResult;
use crate::status::{Repr, ReprSet};
use geomath::algebra::{
    eulers_of_quat, eulers_of_rmat, quat_of_eulers, quat_of_rmat, rmat_of_eulers, rmat_of_quat,
    Eulers, Quat, RMat,
};
use geomath::algebra_int::{
    eulers_f_of_i, eulers_i_of_f, quat_f_of_i, quat_i_of_f, rmat_f_of_i, rmat_i_of_f, Int32Eulers,
    Int32Quat, Int32RMat,
};

const GROUP: &str = "attitude";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttRepr {
    QuatI,
    EulersI,
    RMatI,
    QuatF,
    EulersF,
    RMatF,
}

impl Repr for AttRepr {
    fn bit(self) -> u8 {
        match self {
            AttRepr::QuatI => 0,
            AttRepr::EulersI => 1,
            AttRepr::RMatI => 2,
            AttRepr::QuatF => 3,
            AttRepr::EulersF => 4,
            AttRepr::RMatF => 5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AttitudeState {
    valid: ReprSet<AttRepr>,
    quat_i: Int32Quat,
    eulers_i: Int32Eulers,
    rmat_i: Int32RMat,
    quat_f: Quat,
    eulers_f: Eulers,
    rmat_f: RMat,
    saturations: u32,
}

impl Default for AttitudeState {
    fn default() -> Self {
        Self::new()
    }
}

impl AttitudeState {
    pub fn new() -> Self {
        Self {
            valid: ReprSet::empty(),
            quat_i: Int32Quat::default(),
            eulers_i: Int32Eulers::default(),
            rmat_i: Int32RMat::default(),
            quat_f: Quat::identity(),
            eulers_f: Eulers::default(),
            rmat_f: RMat::identity(),
            saturations: 0,
        }
    }

    pub fn is_valid(&self, r: AttRepr) -> bool {
        self.valid.contains(r)
    }

    pub fn saturation_count(&self) -> u32 {
        self.saturations
    }

    pub fn set_quat_i(&mut self, quat: Int32Quat) {
        self.quat_i = quat;
        self.valid = ReprSet::only(AttRepr::QuatI);
    }

    pub fn set_eulers_i(&mut self, eulers: Int32Eulers) {
        self.eulers_i = eulers;
        self.valid = ReprSet::only(AttRepr::EulersI);
    }

    pub fn set_rmat_i(&mut self, rmat: Int32RMat) {
        self.rmat_i = rmat;
        self.valid = ReprSet::only(AttRepr::RMatI);
    }

    pub fn set_quat_f(&mut self, quat: Quat) {
        self.quat_f = quat;
        self.valid = ReprSet::only(AttRepr::QuatF);
    }

    pub fn set_eulers_f(&mut self, eulers: Eulers) {
        self.eulers_f = eulers;
        self.valid = ReprSet::only(AttRepr::EulersF);
    }

    pub fn set_rmat_f(&mut self, rmat: RMat) {
        self.rmat_f = rmat;
        self.valid = ReprSet::only(AttRepr::RMatF);
    }

    pub fn quat_i(&mut self) -> StateResult<Int32Quat> {
        self.calc_quat_i()?;
        Ok(self.quat_i)
    }

    pub fn eulers_i(&mut self) -> StateResult<Int32Eulers> {
        self.calc_eulers_i()?;
        Ok(self.eulers_i)
    }

    pub fn rmat_i(&mut self) -> StateResult<Int32RMat> {
        self.calc_rmat_i()?;
        Ok(self.rmat_i)
    }

    pub fn quat_f(&mut self) -> StateResult<Quat> {
        self.calc_quat_f()?;
        Ok(self.quat_f)
    }

    pub fn eulers_f(&mut self) -> StateResult<Eulers> {
        self.calc_eulers_f()?;
        Ok(self.eulers_f)
    }

    pub fn rmat_f(&mut self) -> StateResult<RMat> {
        self.calc_rmat_f()?;
        Ok(self.rmat_f)
    }

    fn calc_quat_f(&mut self) -> StateResult<()> {
        use AttRepr::*;
        if self.valid.contains(QuatF) {
            return Ok(());
        }
        if self.valid.contains(QuatI) {
            self.quat_f = quat_f_of_i(&self.quat_i);
        } else if self.valid.contains(EulersF) {
            self.quat_f = quat_of_eulers(&self.eulers_f);
        } else if self.valid.contains(RMatF) {
            self.quat_f = quat_of_rmat(&self.rmat_f);
        } else if self.valid.contains(EulersI) {
            self.eulers_f = eulers_f_of_i(&self.eulers_i);
            self.valid.insert(EulersF);
            self.quat_f = quat_of_eulers(&self.eulers_f);
        } else if self.valid.contains(RMatI) {
            self.rmat_f = rmat_f_of_i(&self.rmat_i);
            self.valid.insert(RMatF);
            self.quat_f = quat_of_rmat(&self.rmat_f);
        } else {
            return Err(NoValidRepresentation(GROUP));
        }
        self.valid.insert(QuatF);
        Ok(())
    }

    fn calc_eulers_f(&mut self) -> StateResult<()> {
        use AttRepr::*;
        if self.valid.contains(EulersF) {
            return Ok(());
        }
        if self.valid.contains(EulersI) {
            self.eulers_f = eulers_f_of_i(&self.eulers_i);
        } else if self.valid.contains(QuatF) {
            self.eulers_f = eulers_of_quat(&self.quat_f);
        } else if self.valid.contains(RMatF) {
            self.eulers_f = eulers_of_rmat(&self.rmat_f);
        } else if self.valid.contains(QuatI) {
            self.quat_f = quat_f_of_i(&self.quat_i);
            self.valid.insert(QuatF);
            self.eulers_f = eulers_of_quat(&self.quat_f);
        } else if self.valid.contains(RMatI) {
            self.rmat_f = rmat_f_of_i(&self.rmat_i);
            self.valid.insert(RMatF);
            self.eulers_f = eulers_of_rmat(&self.rmat_f);
        } else {
            return Err(NoValidRepresentation(GROUP));
        }
        self.valid.insert(EulersF);
        Ok(())
    }

    fn calc_rmat_f(&mut self) -> StateResult<()> {
        use AttRepr::*;
        if self.valid.contains(RMatF) {
            return Ok(());
        }
        if self.valid.contains(RMatI) {
            self.rmat_f = rmat_f_of_i(&self.rmat_i);
        } else if self.valid.contains(QuatF) {
            self.rmat_f = rmat_of_quat(&self.quat_f);
        } else if self.valid.contains(EulersF) {
            self.rmat_f = rmat_of_eulers(&self.eulers_f);
        } else if self.valid.contains(QuatI) {
            self.quat_f = quat_f_of_i(&self.quat_i);
            self.valid.insert(QuatF);
            self.rmat_f = rmat_of_quat(&self.quat_f);
        } else if self.valid.contains(EulersI) {
            self.eulers_f = eulers_f_of_i(&self.eulers_i);
            self.valid.insert(EulersF);
            self.rmat_f = rmat_of_eulers(&self.eulers_f);
        } else {
            return Err(NoValidRepresentation(GROUP));
        }
        self.valid.insert(RMatF);
        Ok(())
    }

    fn calc_quat_i(&mut self) -> StateResult<()> {
        if self.valid.contains(AttRepr::QuatI) {
            return Ok(());
        }
        self.calc_quat_f()?;
        self.quat_i = crate::accept(quat_i_of_f(&self.quat_f), &mut self.saturations, GROUP);
        self.valid.insert(AttRepr::QuatI);
        Ok(())
    }

    fn calc_eulers_i(&mut self) -> StateResult<()> {
        if self.valid.contains(AttRepr::EulersI) {
            return Ok(());
        }
        self.calc_eulers_f()?;
        self.eulers_i = crate::accept(
            eulers_i_of_f(&self.eulers_f),
            &mut self.saturations,
            GROUP,
        );
        self.valid.insert(AttRepr::EulersI);
        Ok(())
    }

    fn calc_rmat_i(&mut self) -> StateResult<()> {
        if self.valid.contains(AttRepr::RMatI) {
            return Ok(());
        }
        self.calc_rmat_f()?;
        self.rmat_i = crate::accept(rmat_i_of_f(&self.rmat_f), &mut self.saturations, GROUP);
        self.valid.insert(AttRepr::RMatI);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geomath::bfp::{real_of_bfp, ANGLE_FRAC, TRIG_FRAC};

    #[test]
    fn identity_quat_gives_zero_eulers_and_identity_rmat() {
        let mut att = AttitudeState::new();
        att.set_quat_f(Quat::identity());
        let e = att.eulers_f().unwrap();
        assert!(e.roll.abs() < 1e-12 && e.pitch.abs() < 1e-12 && e.yaw.abs() < 1e-12);
        let m = att.rmat_f().unwrap();
        assert!((m - RMat::identity()).norm() < 1e-12);
        let mi = att.rmat_i().unwrap();
        assert_eq!(mi.m[0], 1 << TRIG_FRAC);
        assert_eq!(mi.m[1], 0);
    }

    #[test]
    fn setter_is_exclusive_and_derivation_additive() {
        let mut att = AttitudeState::new();
        att.set_eulers_f(Eulers::new(0.1, 0.2, 0.3));
        assert!(att.is_valid(AttRepr::EulersF));
        assert!(!att.is_valid(AttRepr::QuatF));
        att.quat_f().unwrap();
        assert!(att.is_valid(AttRepr::EulersF));
        assert!(att.is_valid(AttRepr::QuatF));
        assert!(!att.is_valid(AttRepr::RMatF));
    }

    #[test]
    fn further_derivations_do_not_retouch_cached_values() {
        let mut att = AttitudeState::new();
        att.set_eulers_f(Eulers::new(0.1, 0.2, 0.3));
        let q1 = att.quat_f().unwrap();
        att.rmat_f().unwrap();
        let q2 = att.quat_f().unwrap();
        assert_eq!(q1, q2);
    }

    #[test]
    fn round_trip_eulers_quat_float() {
        let mut att = AttitudeState::new();
        let e = Eulers::new(0.3, -0.4, 1.2);
        att.set_eulers_f(e);
        let q = att.quat_f().unwrap();
        att.set_quat_f(q);
        let back = att.eulers_f().unwrap();
        assert!((back.roll - e.roll).abs() < 1e-12);
        assert!((back.pitch - e.pitch).abs() < 1e-12);
        assert!((back.yaw - e.yaw).abs() < 1e-12);
    }

    #[test]
    fn round_trip_rmat_quat_float() {
        let mut att = AttitudeState::new();
        let m = rmat_of_eulers(&Eulers::new(-0.8, 0.5, 2.0));
        att.set_rmat_f(m);
        let q = att.quat_f().unwrap();
        att.set_quat_f(q);
        let back = att.rmat_f().unwrap();
        assert!((back - m).norm() < 1e-12);
    }

    #[test]
    fn round_trip_holds_for_every_ordered_representation_pair() {
        const ALL: [AttRepr; 6] = [
            AttRepr::QuatI,
            AttRepr::EulersI,
            AttRepr::RMatI,
            AttRepr::QuatF,
            AttRepr::EulersF,
            AttRepr::RMatF,
        ];

        // one reference attitude materialized in every representation
        let e_ref = Eulers::new(0.3, -0.4, 1.2);
        let mut seed = AttitudeState::new();
        seed.set_eulers_f(e_ref);
        let quat_i = seed.quat_i().unwrap();
        let eulers_i = seed.eulers_i().unwrap();
        let rmat_i = seed.rmat_i().unwrap();
        let quat_f = seed.quat_f().unwrap();
        let rmat_f = seed.rmat_f().unwrap();

        let write = |att: &mut AttitudeState, r: AttRepr| match r {
            AttRepr::QuatI => att.set_quat_i(quat_i),
            AttRepr::EulersI => att.set_eulers_i(eulers_i),
            AttRepr::RMatI => att.set_rmat_i(rmat_i),
            AttRepr::QuatF => att.set_quat_f(quat_f),
            AttRepr::EulersF => att.set_eulers_f(e_ref),
            AttRepr::RMatF => att.set_rmat_f(rmat_f),
        };
        let read_then_rewrite = |att: &mut AttitudeState, r: AttRepr| match r {
            AttRepr::QuatI => {
                let v = att.quat_i().unwrap();
                att.set_quat_i(v);
            }
            AttRepr::EulersI => {
                let v = att.eulers_i().unwrap();
                att.set_eulers_i(v);
            }
            AttRepr::RMatI => {
                let v = att.rmat_i().unwrap();
                att.set_rmat_i(v);
            }
            AttRepr::QuatF => {
                let v = att.quat_f().unwrap();
                att.set_quat_f(v);
            }
            AttRepr::EulersF => {
                let v = att.eulers_f().unwrap();
                att.set_eulers_f(v);
            }
            AttRepr::RMatF => {
                let v = att.rmat_f().unwrap();
                att.set_rmat_f(v);
            }
        };

        for a in ALL {
            for b in ALL {
                if a == b {
                    continue;
                }
                let mut att = AttitudeState::new();
                write(&mut att, a);
                read_then_rewrite(&mut att, b);
                let e = att.eulers_f().unwrap();
                // worst case stacks two integer quantizations; the Q19.12
                // angle LSB is ~2.4e-4 rad
                for (got, want) in [
                    (e.roll, e_ref.roll),
                    (e.pitch, e_ref.pitch),
                    (e.yaw, e_ref.yaw),
                ] {
                    assert!(
                        (got - want).abs() < 1e-3,
                        "{:?} -> {:?}: {} vs {}",
                        a,
                        b,
                        got,
                        want
                    );
                }
            }
        }
    }

    #[test]
    fn cross_domain_round_trip_is_within_quantization() {
        let mut att = AttitudeState::new();
        let e = Eulers::new(0.2, 0.1, -0.7);
        att.set_eulers_f(e);
        let ei = att.eulers_i().unwrap();
        att.set_eulers_i(ei);
        let back = att.eulers_f().unwrap();
        let lsb = real_of_bfp(1, ANGLE_FRAC);
        assert!((back.roll - e.roll).abs() <= lsb);
        assert!((back.pitch - e.pitch).abs() <= lsb);
        assert!((back.yaw - e.yaw).abs() <= lsb);
    }

    #[test]
    fn int_sources_reach_every_float_target() {
        let mut att = AttitudeState::new();
        let q = quat_of_eulers(&Eulers::new(0.4, -0.1, 0.9));
        att.set_quat_i(geomath::algebra_int::quat_i_of_f(&q).value);
        let e = att.eulers_f().unwrap();
        let expect = eulers_of_quat(&q);
        assert!((e.roll - expect.roll).abs() < 1e-3);
        assert!((e.pitch - expect.pitch).abs() < 1e-3);
        assert!((e.yaw - expect.yaw).abs() < 1e-3);
    }

    #[test]
    fn quaternion_sign_is_stored_unchanged() {
        let mut att = AttitudeState::new();
        let q = quat_of_eulers(&Eulers::new(0.1, 0.0, 0.0));
        let neg = Quat::new_unchecked(-q.into_inner());
        att.set_quat_f(neg);
        // same rotation, same derived matrix, sign kept on read-back
        assert_eq!(att.quat_f().unwrap(), neg);
        let m = att.rmat_f().unwrap();
        assert!((m - rmat_of_quat(&q)).norm() < 1e-12);
    }

    #[test]
    fn unwritten_group_errors() {
        let mut att = AttitudeState::new();
        assert!(att.quat_f().is_err());
    }
}
