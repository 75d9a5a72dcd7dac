//! Fixed-point algebra types and domain casts.
//!
//! Mirrors of the floating-point attitude/rate/vector types with `i32`
//! components in the quantity's binary-fixed-point scaling (see [`crate::bfp`]
//! for the per-quantity fractional-bit contract). Casts into the integer
//! domain report saturation; casts out are exact.

use crate::algebra::{BodyRates, Eulers, Quat, RMat, Vect2, Vect3};
use crate::bfp::{self, Quantized, ANGLE_FRAC, QUAT_FRAC, RATE_FRAC, TRIG_FRAC};
use nalgebra::{Matrix3, UnitQuaternion};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Int32Vect2 {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Int32Vect3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Int32Vect3 {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl Int32Vect2 {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// NED-to-body quaternion, components in Q16.15.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Int32Quat {
    pub w: i32,
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Default for Int32Quat {
    fn default() -> Self {
        // identity rotation
        Self {
            w: 1 << QUAT_FRAC,
            x: 0,
            y: 0,
            z: 0,
        }
    }
}

/// Intrinsic zyx Euler angles, radians in Q19.12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Int32Eulers {
    pub roll: i32,
    pub pitch: i32,
    pub yaw: i32,
}

/// NED-to-body rotation matrix, row-major entries in Q17.14.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Int32RMat {
    pub m: [i32; 9],
}

impl Default for Int32RMat {
    fn default() -> Self {
        let one = 1 << TRIG_FRAC;
        Self {
            m: [one, 0, 0, 0, one, 0, 0, 0, one],
        }
    }
}

/// Body angular rates, rad/s in Q19.12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Int32Rates {
    pub p: i32,
    pub q: i32,
    pub r: i32,
}

pub fn vect2_i_of_f(v: &Vect2, frac: u8) -> Quantized<Int32Vect2> {
    let x = bfp::bfp_of_real(v.x, frac);
    let y = bfp::bfp_of_real(v.y, frac);
    Quantized {
        value: Int32Vect2::new(x.value, y.value),
        saturated: x.saturated || y.saturated,
    }
}

pub fn vect2_f_of_i(v: &Int32Vect2, frac: u8) -> Vect2 {
    Vect2::new(bfp::real_of_bfp(v.x, frac), bfp::real_of_bfp(v.y, frac))
}

pub fn vect3_i_of_f(v: &Vect3, frac: u8) -> Quantized<Int32Vect3> {
    let x = bfp::bfp_of_real(v.x, frac);
    let y = bfp::bfp_of_real(v.y, frac);
    let z = bfp::bfp_of_real(v.z, frac);
    Quantized {
        value: Int32Vect3::new(x.value, y.value, z.value),
        saturated: x.saturated || y.saturated || z.saturated,
    }
}

pub fn vect3_f_of_i(v: &Int32Vect3, frac: u8) -> Vect3 {
    Vect3::new(
        bfp::real_of_bfp(v.x, frac),
        bfp::real_of_bfp(v.y, frac),
        bfp::real_of_bfp(v.z, frac),
    )
}

/// Quantize a unit quaternion. Components are within [-1, 1] so this never
/// saturates; the flag is kept for interface uniformity.
pub fn quat_i_of_f(q: &Quat) -> Quantized<Int32Quat> {
    let w = bfp::bfp_of_real(q.w, QUAT_FRAC);
    let x = bfp::bfp_of_real(q.i, QUAT_FRAC);
    let y = bfp::bfp_of_real(q.j, QUAT_FRAC);
    let z = bfp::bfp_of_real(q.k, QUAT_FRAC);
    Quantized {
        value: Int32Quat {
            w: w.value,
            x: x.value,
            y: y.value,
            z: z.value,
        },
        saturated: w.saturated || x.saturated || y.saturated || z.saturated,
    }
}

/// Expand an integer quaternion, renormalizing the quantization error away.
pub fn quat_f_of_i(q: &Int32Quat) -> Quat {
    UnitQuaternion::new_normalize(nalgebra::Quaternion::new(
        bfp::real_of_bfp(q.w, QUAT_FRAC),
        bfp::real_of_bfp(q.x, QUAT_FRAC),
        bfp::real_of_bfp(q.y, QUAT_FRAC),
        bfp::real_of_bfp(q.z, QUAT_FRAC),
    ))
}

pub fn eulers_i_of_f(e: &Eulers) -> Quantized<Int32Eulers> {
    let roll = bfp::bfp_of_real(e.roll, ANGLE_FRAC);
    let pitch = bfp::bfp_of_real(e.pitch, ANGLE_FRAC);
    let yaw = bfp::bfp_of_real(e.yaw, ANGLE_FRAC);
    Quantized {
        value: Int32Eulers {
            roll: roll.value,
            pitch: pitch.value,
            yaw: yaw.value,
        },
        saturated: roll.saturated || pitch.saturated || yaw.saturated,
    }
}

pub fn eulers_f_of_i(e: &Int32Eulers) -> Eulers {
    Eulers {
        roll: bfp::real_of_bfp(e.roll, ANGLE_FRAC),
        pitch: bfp::real_of_bfp(e.pitch, ANGLE_FRAC),
        yaw: bfp::real_of_bfp(e.yaw, ANGLE_FRAC),
    }
}

/// Entries of a rotation matrix are within [-1, 1]; never saturates.
pub fn rmat_i_of_f(m: &RMat) -> Quantized<Int32RMat> {
    let mut out = [0i32; 9];
    let mut saturated = false;
    for r in 0..3 {
        for c in 0..3 {
            let q = bfp::bfp_of_real(m[(r, c)], TRIG_FRAC);
            out[r * 3 + c] = q.value;
            saturated |= q.saturated;
        }
    }
    Quantized {
        value: Int32RMat { m: out },
        saturated,
    }
}

pub fn rmat_f_of_i(m: &Int32RMat) -> RMat {
    let e = |i: usize| bfp::real_of_bfp(m.m[i], TRIG_FRAC);
    Matrix3::new(e(0), e(1), e(2), e(3), e(4), e(5), e(6), e(7), e(8))
}

pub fn rates_i_of_f(r: &BodyRates) -> Quantized<Int32Rates> {
    let p = bfp::bfp_of_real(r.p, RATE_FRAC);
    let q = bfp::bfp_of_real(r.q, RATE_FRAC);
    let rr = bfp::bfp_of_real(r.r, RATE_FRAC);
    Quantized {
        value: Int32Rates {
            p: p.value,
            q: q.value,
            r: rr.value,
        },
        saturated: p.saturated || q.saturated || rr.saturated,
    }
}

pub fn rates_f_of_i(r: &Int32Rates) -> BodyRates {
    BodyRates {
        p: bfp::real_of_bfp(r.p, RATE_FRAC),
        q: bfp::real_of_bfp(r.q, RATE_FRAC),
        r: bfp::real_of_bfp(r.r, RATE_FRAC),
    }
}
