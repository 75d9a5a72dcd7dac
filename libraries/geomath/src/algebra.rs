//! Floating-point algebra types and the attitude conversion triangle.
//!
//! All attitude quantities express the rotation from the local NED frame to
//! the vehicle body frame: `v_body = R * v_ned`. Euler angles are intrinsic
//! zyx (yaw, then pitch, then roll), so `R = Rx(roll) * Ry(pitch) * Rz(yaw)`.
//!
//! Quaternions are scalar-first `(w, x, y, z)` and unit norm. A quaternion
//! and its negation encode the same rotation; conversions here keep the sign
//! produced by the formula and never flip it behind the caller's back.

pub use nalgebra::{Matrix3, UnitQuaternion, Vector2, Vector3};

pub type Vect2 = Vector2<f64>;
pub type Vect3 = Vector3<f64>;
/// NED-to-body quaternion.
pub type Quat = UnitQuaternion<f64>;
/// NED-to-body rotation matrix, `v_body = R * v_ned`.
pub type RMat = Matrix3<f64>;

/// Attitude as intrinsic zyx Euler angles, radians.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Eulers {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

impl Eulers {
    pub fn new(roll: f64, pitch: f64, yaw: f64) -> Self {
        Self { roll, pitch, yaw }
    }
}

/// Angular rates about the body axes, rad/s.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BodyRates {
    pub p: f64,
    pub q: f64,
    pub r: f64,
}

impl BodyRates {
    pub fn new(p: f64, q: f64, r: f64) -> Self {
        Self { p, q, r }
    }
}

/// NED-to-body rotation matrix from Euler angles.
pub fn rmat_of_eulers(e: &Eulers) -> RMat {
    let (sphi, cphi) = e.roll.sin_cos();
    let (sth, cth) = e.pitch.sin_cos();
    let (spsi, cpsi) = e.yaw.sin_cos();
    Matrix3::new(
        cth * cpsi,
        cth * spsi,
        -sth,
        sphi * sth * cpsi - cphi * spsi,
        sphi * sth * spsi + cphi * cpsi,
        sphi * cth,
        cphi * sth * cpsi + sphi * spsi,
        cphi * sth * spsi - sphi * cpsi,
        cphi * cth,
    )
}

/// Euler angles from a NED-to-body rotation matrix.
///
/// Pitch is clamped to +-pi/2; at the gimbal-lock singularity roll and yaw
/// are not separable and the split returned here is the conventional one
/// with the full rotation assigned to yaw.
pub fn eulers_of_rmat(m: &RMat) -> Eulers {
    let sth = (-m[(0, 2)]).clamp(-1.0, 1.0);
    Eulers {
        roll: m[(1, 2)].atan2(m[(2, 2)]),
        pitch: sth.asin(),
        yaw: m[(0, 1)].atan2(m[(0, 0)]),
    }
}

/// NED-to-body quaternion from Euler angles.
pub fn quat_of_eulers(e: &Eulers) -> Quat {
    let (sphi2, cphi2) = (e.roll * 0.5).sin_cos();
    let (sth2, cth2) = (e.pitch * 0.5).sin_cos();
    let (spsi2, cpsi2) = (e.yaw * 0.5).sin_cos();
    let w = cphi2 * cth2 * cpsi2 + sphi2 * sth2 * spsi2;
    let x = sphi2 * cth2 * cpsi2 - cphi2 * sth2 * spsi2;
    let y = cphi2 * sth2 * cpsi2 + sphi2 * cth2 * spsi2;
    let z = cphi2 * cth2 * spsi2 - sphi2 * sth2 * cpsi2;
    UnitQuaternion::new_normalize(nalgebra::Quaternion::new(w, x, y, z))
}

/// Euler angles from a NED-to-body quaternion.
pub fn eulers_of_quat(q: &Quat) -> Eulers {
    let (w, x, y, z) = (q.w, q.i, q.j, q.k);
    let sth = (2.0 * (w * y - x * z)).clamp(-1.0, 1.0);
    Eulers {
        roll: (2.0 * (y * z + w * x)).atan2(1.0 - 2.0 * (x * x + y * y)),
        pitch: sth.asin(),
        yaw: (2.0 * (x * y + w * z)).atan2(1.0 - 2.0 * (y * y + z * z)),
    }
}

/// NED-to-body rotation matrix from a quaternion.
pub fn rmat_of_quat(q: &Quat) -> RMat {
    let (w, x, y, z) = (q.w, q.i, q.j, q.k);
    Matrix3::new(
        1.0 - 2.0 * (y * y + z * z),
        2.0 * (x * y + w * z),
        2.0 * (x * z - w * y),
        2.0 * (x * y - w * z),
        1.0 - 2.0 * (x * x + z * z),
        2.0 * (y * z + w * x),
        2.0 * (x * z + w * y),
        2.0 * (y * z - w * x),
        1.0 - 2.0 * (x * x + y * y),
    )
}

/// Quaternion from a NED-to-body rotation matrix (Shepperd's method).
///
/// Branches on the largest of the trace and the diagonal entries so the
/// divisor stays well away from zero for every attitude.
pub fn quat_of_rmat(m: &RMat) -> Quat {
    let trace = m[(0, 0)] + m[(1, 1)] + m[(2, 2)];
    let (w, x, y, z);
    if trace > 0.0 {
        let s = 2.0 * (1.0 + trace).sqrt();
        w = 0.25 * s;
        x = (m[(1, 2)] - m[(2, 1)]) / s;
        y = (m[(2, 0)] - m[(0, 2)]) / s;
        z = (m[(0, 1)] - m[(1, 0)]) / s;
    } else if m[(0, 0)] > m[(1, 1)] && m[(0, 0)] > m[(2, 2)] {
        let s = 2.0 * (1.0 + m[(0, 0)] - m[(1, 1)] - m[(2, 2)]).sqrt();
        w = (m[(1, 2)] - m[(2, 1)]) / s;
        x = 0.25 * s;
        y = (m[(0, 1)] + m[(1, 0)]) / s;
        z = (m[(2, 0)] + m[(0, 2)]) / s;
    } else if m[(1, 1)] > m[(2, 2)] {
        let s = 2.0 * (1.0 - m[(0, 0)] + m[(1, 1)] - m[(2, 2)]).sqrt();
        w = (m[(2, 0)] - m[(0, 2)]) / s;
        x = (m[(0, 1)] + m[(1, 0)]) / s;
        y = 0.25 * s;
        z = (m[(1, 2)] + m[(2, 1)]) / s;
    } else {
        let s = 2.0 * (1.0 - m[(0, 0)] - m[(1, 1)] + m[(2, 2)]).sqrt();
        w = (m[(0, 1)] - m[(1, 0)]) / s;
        x = (m[(2, 0)] + m[(0, 2)]) / s;
        y = (m[(1, 2)] + m[(2, 1)]) / s;
        z = 0.25 * s;
    }
    UnitQuaternion::new_normalize(nalgebra::Quaternion::new(w, x, y, z))
}
