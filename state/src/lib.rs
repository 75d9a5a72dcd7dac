//! Central vehicle state interface.
//!
//! One estimator writes, many consumers read. Each physical quantity is a
//! group of interchangeable representations (frames and numeric domains);
//! a write marks its representation the only valid one in the group, and a
//! read of any other representation derives it on demand and caches it.
//! Derived values stay valid until the next authoritative write, so
//! repeated reads are free.
//!
//! Local-frame (NED) conversions need a tangent-plane origin, anchored once
//! per numeric domain through [`VehicleState`]. Reads fail with a
//! [`StateError`] when the group was never written or the required origin
//! is missing; nothing is ever silently defaulted.

pub mod accel;
pub mod attitude;
pub mod error;
pub mod origin;
pub mod position;
pub mod rates;
pub mod speed;
pub mod status;
pub mod wind;

pub use accel::{AccelRepr, AccelState};
pub use attitude::{AttRepr, AttitudeState};
pub use error::{Domain, StateError, StateResult};
pub use origin::LocalOrigin;
pub use position::{PosRepr, PositionState};
pub use rates::{RateRepr, RateState};
pub use speed::{SpeedRepr, SpeedState};
pub use status::{Repr, ReprSet};
pub use wind::{WindRepr, WindState};

use geomath::algebra::{BodyRates, Eulers, Quat, RMat};
use geomath::algebra_int::{
    Int32Eulers, Int32Quat, Int32RMat, Int32Rates, Int32Vect2, Int32Vect3,
};
use geomath::bfp::Quantized;
use geomath::geodetic::{LlaCoor, LtpDef, UtmCoor};
use geomath::geodetic_int::{EcefCoorI, LlaCoorI, LtpDefI, NedCoorI};
use geomath::Vect3;

/// Unwrap a quantized value, counting and logging saturation. Saturated
/// output is still served (clamped at the i32 range) so a single outlier
/// does not take the state interface down mid-flight.
pub(crate) fn accept<T>(q: Quantized<T>, saturations: &mut u32, group: &'static str) -> T {
    if q.saturated {
        *saturations += 1;
        log::warn!("fixed-point saturation while deriving a {group} representation");
    }
    q.value
}

/// The whole vehicle state: six representation groups plus the shared
/// tangent-plane origin.
#[derive(Debug, Clone, Default)]
pub struct VehicleState {
    origin: LocalOrigin,
    position: PositionState,
    speed: SpeedState,
    accel: AccelState,
    attitude: AttitudeState,
    rates: RateState,
    wind: WindState,
}

impl VehicleState {
    pub fn new() -> Self {
        Self::default()
    }

    // origin

    pub fn set_local_origin_i(&mut self, def: LtpDefI) {
        self.origin.set_int(def);
    }

    pub fn set_local_origin_f(&mut self, def: LtpDef) {
        self.origin.set_float(def);
    }

    pub fn init_origin_from_ecef_i(&mut self, ecef: EcefCoorI) {
        self.origin.set_int(LtpDefI::from_ecef(ecef));
    }

    pub fn init_origin_from_lla_i(&mut self, lla: LlaCoorI) {
        self.origin.set_int(LtpDefI::from_lla(lla));
    }

    pub fn init_origin_from_ecef_f(&mut self, ecef: Vect3) {
        self.origin.set_float(LtpDef::from_ecef(ecef));
    }

    pub fn init_origin_from_lla_f(&mut self, lla: LlaCoor) {
        self.origin.set_float(LtpDef::from_lla(lla));
    }

    pub fn origin_initialized(&self, domain: Domain) -> bool {
        self.origin.is_initialized(domain)
    }

    // position

    pub fn set_position_ecef_i(&mut self, ecef: EcefCoorI) {
        self.position.set_ecef_i(ecef);
    }

    pub fn set_position_ned_i(&mut self, ned: NedCoorI) {
        self.position.set_ned_i(ned);
    }

    pub fn set_position_lla_i(&mut self, lla: LlaCoorI) {
        self.position.set_lla_i(lla);
    }

    pub fn set_position_ecef_f(&mut self, ecef: Vect3) {
        self.position.set_ecef_f(ecef);
    }

    pub fn set_position_ned_f(&mut self, ned: Vect3) {
        self.position.set_ned_f(ned);
    }

    pub fn set_position_lla_f(&mut self, lla: LlaCoor) {
        self.position.set_lla_f(lla);
    }

    pub fn set_position_utm_f(&mut self, utm: UtmCoor) {
        self.position.set_utm_f(utm);
    }

    pub fn position_ecef_i(&mut self) -> StateResult<EcefCoorI> {
        self.position.ecef_i(&self.origin)
    }

    pub fn position_ned_i(&mut self) -> StateResult<NedCoorI> {
        self.position.ned_i(&self.origin)
    }

    pub fn position_lla_i(&mut self) -> StateResult<LlaCoorI> {
        self.position.lla_i(&self.origin)
    }

    pub fn position_ecef_f(&mut self) -> StateResult<Vect3> {
        self.position.ecef_f(&self.origin)
    }

    pub fn position_ned_f(&mut self) -> StateResult<Vect3> {
        self.position.ned_f(&self.origin)
    }

    pub fn position_lla_f(&mut self) -> StateResult<LlaCoor> {
        self.position.lla_f(&self.origin)
    }

    pub fn position_utm_f(&mut self) -> StateResult<UtmCoor> {
        self.position.utm_f(&self.origin)
    }

    pub fn position_is_valid(&self, r: PosRepr) -> bool {
        self.position.is_valid(r)
    }

    // ground speed

    pub fn set_speed_ecef_i(&mut self, ecef: Int32Vect3) {
        self.speed.set_ecef_i(ecef);
    }

    pub fn set_speed_ned_i(&mut self, ned: Int32Vect3) {
        self.speed.set_ned_i(ned);
    }

    pub fn set_speed_ecef_f(&mut self, ecef: Vect3) {
        self.speed.set_ecef_f(ecef);
    }

    pub fn set_speed_ned_f(&mut self, ned: Vect3) {
        self.speed.set_ned_f(ned);
    }

    pub fn speed_ecef_i(&mut self) -> StateResult<Int32Vect3> {
        self.speed.ecef_i(&self.origin)
    }

    pub fn speed_ned_i(&mut self) -> StateResult<Int32Vect3> {
        self.speed.ned_i(&self.origin)
    }

    pub fn speed_ecef_f(&mut self) -> StateResult<Vect3> {
        self.speed.ecef_f(&self.origin)
    }

    pub fn speed_ned_f(&mut self) -> StateResult<Vect3> {
        self.speed.ned_f(&self.origin)
    }

    pub fn horizontal_speed_norm_i(&mut self) -> StateResult<i32> {
        self.speed.h_norm_i(&self.origin)
    }

    pub fn horizontal_speed_dir_i(&mut self) -> StateResult<i32> {
        self.speed.h_dir_i(&self.origin)
    }

    pub fn horizontal_speed_norm_f(&mut self) -> StateResult<f64> {
        self.speed.h_norm_f(&self.origin)
    }

    pub fn horizontal_speed_dir_f(&mut self) -> StateResult<f64> {
        self.speed.h_dir_f(&self.origin)
    }

    pub fn speed_is_valid(&self, r: SpeedRepr) -> bool {
        self.speed.is_valid(r)
    }

    // acceleration

    pub fn set_accel_ecef_i(&mut self, ecef: Int32Vect3) {
        self.accel.set_ecef_i(ecef);
    }

    pub fn set_accel_ned_i(&mut self, ned: Int32Vect3) {
        self.accel.set_ned_i(ned);
    }

    pub fn set_accel_ecef_f(&mut self, ecef: Vect3) {
        self.accel.set_ecef_f(ecef);
    }

    pub fn set_accel_ned_f(&mut self, ned: Vect3) {
        self.accel.set_ned_f(ned);
    }

    pub fn accel_ecef_i(&mut self) -> StateResult<Int32Vect3> {
        self.accel.ecef_i(&self.origin)
    }

    pub fn accel_ned_i(&mut self) -> StateResult<Int32Vect3> {
        self.accel.ned_i(&self.origin)
    }

    pub fn accel_ecef_f(&mut self) -> StateResult<Vect3> {
        self.accel.ecef_f(&self.origin)
    }

    pub fn accel_ned_f(&mut self) -> StateResult<Vect3> {
        self.accel.ned_f(&self.origin)
    }

    pub fn accel_is_valid(&self, r: AccelRepr) -> bool {
        self.accel.is_valid(r)
    }

    // attitude

    pub fn set_ned_to_body_quat_i(&mut self, quat: Int32Quat) {
        self.attitude.set_quat_i(quat);
    }

    pub fn set_ned_to_body_eulers_i(&mut self, eulers: Int32Eulers) {
        self.attitude.set_eulers_i(eulers);
    }

    pub fn set_ned_to_body_rmat_i(&mut self, rmat: Int32RMat) {
        self.attitude.set_rmat_i(rmat);
    }

    pub fn set_ned_to_body_quat_f(&mut self, quat: Quat) {
        self.attitude.set_quat_f(quat);
    }

    pub fn set_ned_to_body_eulers_f(&mut self, eulers: Eulers) {
        self.attitude.set_eulers_f(eulers);
    }

    pub fn set_ned_to_body_rmat_f(&mut self, rmat: RMat) {
        self.attitude.set_rmat_f(rmat);
    }

    pub fn ned_to_body_quat_i(&mut self) -> StateResult<Int32Quat> {
        self.attitude.quat_i()
    }

    pub fn ned_to_body_eulers_i(&mut self) -> StateResult<Int32Eulers> {
        self.attitude.eulers_i()
    }

    pub fn ned_to_body_rmat_i(&mut self) -> StateResult<Int32RMat> {
        self.attitude.rmat_i()
    }

    pub fn ned_to_body_quat_f(&mut self) -> StateResult<Quat> {
        self.attitude.quat_f()
    }

    pub fn ned_to_body_eulers_f(&mut self) -> StateResult<Eulers> {
        self.attitude.eulers_f()
    }

    pub fn ned_to_body_rmat_f(&mut self) -> StateResult<RMat> {
        self.attitude.rmat_f()
    }

    pub fn attitude_is_valid(&self, r: AttRepr) -> bool {
        self.attitude.is_valid(r)
    }

    // body rates

    pub fn set_body_rates_i(&mut self, rates: Int32Rates) {
        self.rates.set_rates_i(rates);
    }

    pub fn set_body_rates_f(&mut self, rates: BodyRates) {
        self.rates.set_rates_f(rates);
    }

    pub fn body_rates_i(&mut self) -> StateResult<Int32Rates> {
        self.rates.rates_i()
    }

    pub fn body_rates_f(&mut self) -> StateResult<BodyRates> {
        self.rates.rates_f()
    }

    pub fn rate_is_valid(&self, r: RateRepr) -> bool {
        self.rates.is_valid(r)
    }

    // wind and airspeed

    pub fn set_horizontal_windspeed_i(&mut self, wind: Int32Vect2) {
        self.wind.set_wind_i(wind);
    }

    pub fn set_horizontal_windspeed_f(&mut self, wind: geomath::Vect2) {
        self.wind.set_wind_f(wind);
    }

    pub fn set_airspeed_i(&mut self, airspeed: i32) {
        self.wind.set_airspeed_i(airspeed);
    }

    pub fn set_airspeed_f(&mut self, airspeed: f64) {
        self.wind.set_airspeed_f(airspeed);
    }

    pub fn horizontal_windspeed_i(&mut self) -> StateResult<Int32Vect2> {
        self.wind.wind_i()
    }

    pub fn horizontal_windspeed_f(&mut self) -> StateResult<geomath::Vect2> {
        self.wind.wind_f()
    }

    pub fn airspeed_i(&mut self) -> StateResult<i32> {
        self.wind.airspeed_i()
    }

    pub fn airspeed_f(&mut self) -> StateResult<f64> {
        self.wind.airspeed_f()
    }

    pub fn wind_is_valid(&self, r: WindRepr) -> bool {
        self.wind.is_valid(r)
    }

    /// Total fixed-point saturations observed across every group since
    /// construction.
    pub fn saturation_count(&self) -> u32 {
        self.position.saturation_count()
            + self.speed.saturation_count()
            + self.accel.saturation_count()
            + self.attitude.saturation_count()
            + self.rates.saturation_count()
            + self.wind.saturation_count()
    }
}
