//! Binary fixed point scaling.
//!
//! Integer representations store real quantities as `i32` with a fixed
//! number of fractional bits per physical quantity. The constants below are
//! the frame contract shared by every producer and consumer of the integer
//! domain; changing one silently breaks every stored value of that quantity.

/// Fractional bits of NED position, meters. Q23.8, ~4 mm resolution.
pub const POS_FRAC: u8 = 8;
/// Fractional bits of ground speed, m/s. Q12.19.
pub const SPEED_FRAC: u8 = 19;
/// Fractional bits of acceleration, m/s^2. Q21.10.
pub const ACCEL_FRAC: u8 = 10;
/// Fractional bits of angles, radians. Q19.12.
pub const ANGLE_FRAC: u8 = 12;
/// Fractional bits of quaternion components. Q16.15.
pub const QUAT_FRAC: u8 = 15;
/// Fractional bits of rotation-matrix entries. Q17.14.
pub const TRIG_FRAC: u8 = 14;
/// Fractional bits of body angular rates, rad/s. Q19.12.
pub const RATE_FRAC: u8 = 12;

/// A value quantized into the integer domain, together with a flag telling
/// whether any component had to be clamped to the `i32` range.
///
/// Quantization never wraps; out-of-range reals saturate and report it so
/// the caller can count the event instead of flying on a wrapped number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantized<T> {
    pub value: T,
    pub saturated: bool,
}

impl<T> Quantized<T> {
    pub fn exact(value: T) -> Self {
        Self {
            value,
            saturated: false,
        }
    }
}

/// Quantize `x * scale` to the nearest `i32`, saturating at the type range.
pub fn scaled_i32(x: f64, scale: f64) -> Quantized<i32> {
    let scaled = (x * scale).round();
    if scaled > f64::from(i32::MAX) {
        Quantized {
            value: i32::MAX,
            saturated: true,
        }
    } else if scaled < f64::from(i32::MIN) {
        Quantized {
            value: i32::MIN,
            saturated: true,
        }
    } else {
        Quantized {
            value: scaled as i32,
            saturated: false,
        }
    }
}

/// Real value of a binary-fixed-point integer with `frac` fractional bits.
pub fn real_of_bfp(v: i32, frac: u8) -> f64 {
    f64::from(v) / (1u64 << frac) as f64
}

/// Binary-fixed-point integer of a real value, `frac` fractional bits.
pub fn bfp_of_real(x: f64, frac: u8) -> Quantized<i32> {
    scaled_i32(x, (1u64 << frac) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bfp_round_trips_representable_values() {
        let x = 12.34375; // exactly representable with 8 fractional bits
        let q = bfp_of_real(x, POS_FRAC);
        assert!(!q.saturated);
        assert_eq!(real_of_bfp(q.value, POS_FRAC), x);
    }

    #[test]
    fn bfp_rounds_to_nearest() {
        // 1/512 m is half an LSB at POS_FRAC, rounds away from zero
        let q = bfp_of_real(1.0 / 512.0, POS_FRAC);
        assert_eq!(q.value, 1);
    }

    #[test]
    fn quantization_saturates_instead_of_wrapping() {
        let q = bfp_of_real(1.0e9, SPEED_FRAC);
        assert!(q.saturated);
        assert_eq!(q.value, i32::MAX);
        let q = bfp_of_real(-1.0e9, SPEED_FRAC);
        assert!(q.saturated);
        assert_eq!(q.value, i32::MIN);
    }
}
