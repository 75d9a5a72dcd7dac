//! # geomath - algebra and geodesy for the flight-control stack
//!
//! Concrete value types for every coordinate and attitude representation in
//! two numeric domains (floating point `f64`, binary fixed point `i32`),
//! plus the pure conversion functions between them:
//!
//! - geodetic (LLA) <-> Earth-centered (ECEF)
//! - ECEF <-> local tangent plane (NED), given an origin definition
//! - LLA <-> UTM projection
//! - quaternion <-> Euler angles <-> rotation matrix
//! - fixed-point <-> floating-point domain casts, with saturation reporting
//!
//! All functions here are pure and allocation-free; state caching and
//! validity tracking live in the `state` crate.

pub mod algebra;
pub mod algebra_int;
pub mod bfp;
pub mod geodetic;
pub mod geodetic_int;

pub use algebra::{BodyRates, Eulers, Quat, RMat, Vect2, Vect3};
pub use algebra_int::{Int32Eulers, Int32Quat, Int32RMat, Int32Rates, Int32Vect2, Int32Vect3};
pub use bfp::Quantized;
pub use geodetic::{LlaCoor, LtpDef, UtmCoor};
pub use geodetic_int::{EcefCoorI, LlaCoorI, LtpDefI, NedCoorI};
