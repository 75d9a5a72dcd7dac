//! Wind and airspeed group.
//!
//! Unlike the frame groups this one carries two independent physical
//! quantities: the horizontal wind vector (NED north/east components) and
//! the scalar true airspeed. A write to one quantity never touches the
//! validity of the other, so the setters here clear only the written
//! quantity's other-domain slot instead of resetting the whole set.
//!
//! Derivation is a domain cast; there is no frame transform in this group.

use crate::error::StateError::NoValidRepresentation;
use crate::error::StateResult;
use crate::status::{Repr, ReprSet};
use geomath::algebra_int::{vect2_f_of_i, vect2_i_of_f, Int32Vect2};
use geomath::bfp::{self, SPEED_FRAC};
use geomath::Vect2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindRepr {
    WindI,
    AirspeedI,
    WindF,
    AirspeedF,
}

impl Repr for WindRepr {
    fn bit(self) -> u8 {
        match self {
            WindRepr::WindI => 0,
            WindRepr::AirspeedI => 1,
            WindRepr::WindF => 2,
            WindRepr::AirspeedF => 3,
        }
    }
}

/// Wind in m/s over the ground frame (x north, y east); airspeed in m/s.
/// Integer slots are Q12.19.
#[derive(Debug, Clone, Default)]
pub struct WindState {
    valid: ReprSet<WindRepr>,
    wind_i: Int32Vect2,
    airspeed_i: i32,
    wind_f: Vect2,
    airspeed_f: f64,
    saturations: u32,
}

impl WindState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self, r: WindRepr) -> bool {
        self.valid.contains(r)
    }

    pub fn saturation_count(&self) -> u32 {
        self.saturations
    }

    pub fn set_wind_i(&mut self, wind: Int32Vect2) {
        self.wind_i = wind;
        self.valid.remove(WindRepr::WindF);
        self.valid.insert(WindRepr::WindI);
    }

    pub fn set_wind_f(&mut self, wind: Vect2) {
        self.wind_f = wind;
        self.valid.remove(WindRepr::WindI);
        self.valid.insert(WindRepr::WindF);
    }

    pub fn set_airspeed_i(&mut self, airspeed: i32) {
        self.airspeed_i = airspeed;
        self.valid.remove(WindRepr::AirspeedF);
        self.valid.insert(WindRepr::AirspeedI);
    }

    pub fn set_airspeed_f(&mut self, airspeed: f64) {
        self.airspeed_f = airspeed;
        self.valid.remove(WindRepr::AirspeedI);
        self.valid.insert(WindRepr::AirspeedF);
    }

    pub fn wind_i(&mut self) -> StateResult<Int32Vect2> {
        if !self.valid.contains(WindRepr::WindI) {
            if !self.valid.contains(WindRepr::WindF) {
                return Err(NoValidRepresentation("wind"));
            }
            self.wind_i = crate::accept(
                vect2_i_of_f(&self.wind_f, SPEED_FRAC),
                &mut self.saturations,
                "wind",
            );
            self.valid.insert(WindRepr::WindI);
        }
        Ok(self.wind_i)
    }

    pub fn wind_f(&mut self) -> StateResult<Vect2> {
        if !self.valid.contains(WindRepr::WindF) {
            if !self.valid.contains(WindRepr::WindI) {
                return Err(NoValidRepresentation("wind"));
            }
            self.wind_f = vect2_f_of_i(&self.wind_i, SPEED_FRAC);
            self.valid.insert(WindRepr::WindF);
        }
        Ok(self.wind_f)
    }

    pub fn airspeed_i(&mut self) -> StateResult<i32> {
        if !self.valid.contains(WindRepr::AirspeedI) {
            if !self.valid.contains(WindRepr::AirspeedF) {
                return Err(NoValidRepresentation("airspeed"));
            }
            self.airspeed_i = crate::accept(
                bfp::bfp_of_real(self.airspeed_f, SPEED_FRAC),
                &mut self.saturations,
                "airspeed",
            );
            self.valid.insert(WindRepr::AirspeedI);
        }
        Ok(self.airspeed_i)
    }

    pub fn airspeed_f(&mut self) -> StateResult<f64> {
        if !self.valid.contains(WindRepr::AirspeedF) {
            if !self.valid.contains(WindRepr::AirspeedI) {
                return Err(NoValidRepresentation("airspeed"));
            }
            self.airspeed_f = bfp::real_of_bfp(self.airspeed_i, SPEED_FRAC);
            self.valid.insert(WindRepr::AirspeedF);
        }
        Ok(self.airspeed_f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wind_write_leaves_airspeed_valid() {
        let mut wind = WindState::new();
        wind.set_airspeed_f(17.0);
        wind.set_wind_f(Vect2::new(2.0, -1.0));
        assert!(wind.is_valid(WindRepr::AirspeedF));
        assert!((wind.airspeed_f().unwrap() - 17.0).abs() < 1e-12);
        assert_eq!(wind.airspeed_i().unwrap(), 17 << SPEED_FRAC);
    }

    #[test]
    fn airspeed_write_leaves_wind_valid() {
        let mut wind = WindState::new();
        wind.set_wind_i(Int32Vect2::new(1 << SPEED_FRAC, 0));
        wind.set_airspeed_i(12 << SPEED_FRAC);
        assert!(wind.is_valid(WindRepr::WindI));
        let w = wind.wind_f().unwrap();
        assert!((w.x - 1.0).abs() < 1e-12 && w.y.abs() < 1e-12);
    }

    #[test]
    fn setter_clears_only_its_own_other_domain_slot() {
        let mut wind = WindState::new();
        wind.set_wind_f(Vect2::new(3.0, 4.0));
        wind.wind_i().unwrap();
        assert!(wind.is_valid(WindRepr::WindI));
        wind.set_wind_f(Vect2::new(0.0, 0.0));
        assert!(!wind.is_valid(WindRepr::WindI));
        assert!(wind.is_valid(WindRepr::WindF));
    }

    #[test]
    fn sub_quantities_error_independently() {
        let mut wind = WindState::new();
        wind.set_wind_f(Vect2::new(1.0, 1.0));
        assert!(wind.airspeed_f().is_err());
        assert!(wind.wind_f().is_ok());
    }
}
