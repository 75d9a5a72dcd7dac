//! Fixed-point geodetic types and conversions.
//!
//! Integer position units: ECEF in centimeters, geodetic latitude/longitude
//! in 1e-7 radians with altitude in centimeters above mean sea level, NED in
//! meters with [`POS_FRAC`] fractional bits.
//!
//! The integer transforms evaluate in `f64` internally and quantize at the
//! ends; the quantization error is bounded by one LSB of the target scaling
//! and saturation is reported through [`Quantized`].

use crate::algebra::{RMat, Vect3};
use crate::algebra_int::{vect3_f_of_i, vect3_i_of_f, Int32Vect3};
use crate::bfp::{self, Quantized, POS_FRAC};
use crate::geodetic::{self, LlaCoor, LtpDef};

/// Scale of integer latitude/longitude: 1e-7 rad per count.
pub const LLA_SCALE: f64 = 1.0e7;
/// Centimeters per meter, the integer linear scale for ECEF and altitude.
pub const CM_SCALE: f64 = 100.0;

/// ECEF position in centimeters.
pub type EcefCoorI = Int32Vect3;
/// NED position in meters, Q23.8.
pub type NedCoorI = Int32Vect3;

/// Geodetic coordinates: lat/lon in 1e-7 rad, alt in cm above MSL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LlaCoorI {
    pub lat: i32,
    pub lon: i32,
    pub alt: i32,
}

impl LlaCoorI {
    pub fn new(lat: i32, lon: i32, alt: i32) -> Self {
        Self { lat, lon, alt }
    }
}

/// Integer-domain tangent-plane definition. The anchor is quantized to the
/// integer units; the rotation is kept in `f64` since its entries are
/// dimensionless and shared by every transform through this origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LtpDefI {
    pub ecef: EcefCoorI,
    pub lla: LlaCoorI,
    pub ltp_of_ecef: RMat,
}

impl LtpDefI {
    pub fn from_ecef(ecef: EcefCoorI) -> Self {
        let def = LtpDef::from_ecef(ecef_f_of_i(&ecef));
        Self {
            ecef,
            lla: lla_i_of_f(&def.lla).value,
            ltp_of_ecef: def.ltp_of_ecef,
        }
    }

    pub fn from_lla(lla: LlaCoorI) -> Self {
        let def = LtpDef::from_lla(lla_f_of_i(&lla));
        Self {
            ecef: ecef_i_of_f(&def.ecef).value,
            lla,
            ltp_of_ecef: def.ltp_of_ecef,
        }
    }

    /// The float-domain view of this definition, used by the transforms.
    fn as_float(&self) -> LtpDef {
        LtpDef {
            ecef: ecef_f_of_i(&self.ecef),
            lla: lla_f_of_i(&self.lla),
            ltp_of_ecef: self.ltp_of_ecef,
        }
    }
}

pub fn ecef_f_of_i(ecef: &EcefCoorI) -> Vect3 {
    Vect3::new(
        f64::from(ecef.x) / CM_SCALE,
        f64::from(ecef.y) / CM_SCALE,
        f64::from(ecef.z) / CM_SCALE,
    )
}

pub fn ecef_i_of_f(ecef: &Vect3) -> Quantized<EcefCoorI> {
    let x = bfp::scaled_i32(ecef.x, CM_SCALE);
    let y = bfp::scaled_i32(ecef.y, CM_SCALE);
    let z = bfp::scaled_i32(ecef.z, CM_SCALE);
    Quantized {
        value: EcefCoorI::new(x.value, y.value, z.value),
        saturated: x.saturated || y.saturated || z.saturated,
    }
}

pub fn lla_f_of_i(lla: &LlaCoorI) -> LlaCoor {
    LlaCoor::new(
        f64::from(lla.lat) / LLA_SCALE,
        f64::from(lla.lon) / LLA_SCALE,
        f64::from(lla.alt) / CM_SCALE,
    )
}

pub fn lla_i_of_f(lla: &LlaCoor) -> Quantized<LlaCoorI> {
    let lat = bfp::scaled_i32(lla.lat, LLA_SCALE);
    let lon = bfp::scaled_i32(lla.lon, LLA_SCALE);
    let alt = bfp::scaled_i32(lla.alt, CM_SCALE);
    Quantized {
        value: LlaCoorI::new(lat.value, lon.value, alt.value),
        saturated: lat.saturated || lon.saturated || alt.saturated,
    }
}

pub fn ned_f_of_i(ned: &NedCoorI) -> Vect3 {
    vect3_f_of_i(ned, POS_FRAC)
}

pub fn ned_i_of_f(ned: &Vect3) -> Quantized<NedCoorI> {
    vect3_i_of_f(ned, POS_FRAC)
}

/// ECEF (cm) of an integer geodetic point.
pub fn ecef_i_of_lla_i(lla: &LlaCoorI) -> Quantized<EcefCoorI> {
    ecef_i_of_f(&geodetic::ecef_of_lla(&lla_f_of_i(lla)))
}

/// Integer geodetic coordinates of an ECEF (cm) point.
pub fn lla_i_of_ecef_i(ecef: &EcefCoorI) -> Quantized<LlaCoorI> {
    lla_i_of_f(&geodetic::lla_of_ecef(&ecef_f_of_i(ecef)))
}

/// NED (Q23.8 m) of an ECEF (cm) point in the integer tangent plane.
pub fn ned_i_of_ecef_i(def: &LtpDefI, ecef: &EcefCoorI) -> Quantized<NedCoorI> {
    let ned = geodetic::ned_of_ecef_point(&def.as_float(), &ecef_f_of_i(ecef));
    ned_i_of_f(&ned)
}

/// ECEF (cm) of a NED (Q23.8 m) point in the integer tangent plane.
pub fn ecef_i_of_ned_i(def: &LtpDefI, ned: &NedCoorI) -> Quantized<EcefCoorI> {
    let ecef = geodetic::ecef_of_ned_point(&def.as_float(), &ned_f_of_i(ned));
    ecef_i_of_f(&ecef)
}

/// Rotate a free integer vector (speed, acceleration, `frac` fractional
/// bits) from ECEF into NED.
pub fn ned_i_of_ecef_vect_i(def: &LtpDefI, v: &Int32Vect3, frac: u8) -> Quantized<Int32Vect3> {
    let rotated = def.ltp_of_ecef * vect3_f_of_i(v, frac);
    vect3_i_of_f(&rotated, frac)
}

/// Rotate a free integer vector from NED into ECEF.
pub fn ecef_i_of_ned_vect_i(def: &LtpDefI, v: &Int32Vect3, frac: u8) -> Quantized<Int32Vect3> {
    let rotated = def.ltp_of_ecef.transpose() * vect3_f_of_i(v, frac);
    vect3_i_of_f(&rotated, frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor_i() -> LlaCoorI {
        // lat 0.9163 rad (~52.5 deg), lon 0.2339 rad (~13.4 deg), alt 80 m
        LlaCoorI::new(9_163_000, 2_339_000, 8_000)
    }

    #[test]
    fn lla_cast_round_trip_is_exact() {
        let lla = anchor_i();
        assert_eq!(lla_i_of_f(&lla_f_of_i(&lla)).value, lla);
    }

    #[test]
    fn ecef_lla_int_round_trip_within_integer_resolution() {
        let lla = anchor_i();
        let ecef = ecef_i_of_lla_i(&lla);
        assert!(!ecef.saturated);
        let back = lla_i_of_ecef_i(&ecef.value).value;
        // 1 cm of ECEF error is ~1.6e-9 rad, i.e. well within a few
        // 1e-7 rad counts
        assert!((back.lat - lla.lat).abs() <= 1);
        assert!((back.lon - lla.lon).abs() <= 1);
        assert!((back.alt - lla.alt).abs() <= 2);
    }

    #[test]
    fn origin_point_maps_to_zero_ned() {
        let def = LtpDefI::from_lla(anchor_i());
        let ned = ned_i_of_ecef_i(&def, &def.ecef);
        assert!(!ned.saturated);
        // quantized anchor leaves at most a cm-level residual, which is a
        // couple of Q23.8 counts
        assert!(ned.value.x.abs() <= 3 && ned.value.y.abs() <= 3 && ned.value.z.abs() <= 3);
    }

    #[test]
    fn ned_ecef_int_round_trip() {
        let def = LtpDefI::from_lla(anchor_i());
        let ned = NedCoorI::new(256 * 100, -256 * 50, -256 * 20); // 100, -50, -20 m
        let ecef = ecef_i_of_ned_i(&def, &ned);
        let back = ned_i_of_ecef_i(&def, &ecef.value).value;
        assert!((back.x - ned.x).abs() <= 3);
        assert!((back.y - ned.y).abs() <= 3);
        assert!((back.z - ned.z).abs() <= 3);
    }

    #[test]
    fn vect_rotation_preserves_norm() {
        use crate::bfp::SPEED_FRAC;
        let def = LtpDefI::from_lla(anchor_i());
        let v = Int32Vect3::new(3 << SPEED_FRAC, 4 << SPEED_FRAC, 0);
        let rotated = ned_i_of_ecef_vect_i(&def, &v, SPEED_FRAC);
        let n_in = vect3_f_of_i(&v, SPEED_FRAC).norm();
        let n_out = vect3_f_of_i(&rotated.value, SPEED_FRAC).norm();
        assert!((n_in - n_out).abs() < 1e-4);
    }
}
