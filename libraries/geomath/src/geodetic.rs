//! Floating-point geodesy on the WGS84 ellipsoid.
//!
//! Position representations:
//! - [`LlaCoor`]: geodetic latitude/longitude in radians, altitude in
//!   meters above mean sea level.
//! - ECEF: plain [`Vect3`], meters from the Earth center.
//! - NED: plain [`Vect3`], meters from a tangent-plane origin ([`LtpDef`]).
//! - [`UtmCoor`]: transverse Mercator projection, meters. Southern
//!   hemisphere northings are negative (no false northing), which keeps the
//!   forward/inverse pair symmetric without a hemisphere flag.

use crate::algebra::{Matrix3, RMat, Vect3};

/// WGS84 semi-major axis, meters.
pub const WGS84_A: f64 = 6_378_137.0;
/// WGS84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// WGS84 first eccentricity squared.
pub const WGS84_E2: f64 = WGS84_F * (2.0 - WGS84_F);
/// UTM central-meridian scale factor.
pub const UTM_K0: f64 = 0.9996;
/// UTM false easting, meters.
pub const UTM_FALSE_EASTING: f64 = 500_000.0;

/// Geodetic coordinates: latitude/longitude in radians, altitude in meters
/// above mean sea level.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LlaCoor {
    pub lat: f64,
    pub lon: f64,
    pub alt: f64,
}

impl LlaCoor {
    pub fn new(lat: f64, lon: f64, alt: f64) -> Self {
        Self { lat, lon, alt }
    }
}

/// UTM coordinates, meters; `alt` is meters above mean sea level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtmCoor {
    pub east: f64,
    pub north: f64,
    pub alt: f64,
    pub zone: u8,
}

/// Definition of a local tangent-plane (NED) frame: the anchor point in
/// both ECEF and geodetic coordinates, plus the ECEF-to-NED rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LtpDef {
    pub ecef: Vect3,
    pub lla: LlaCoor,
    /// Rotation from ECEF to the local frame: `ned = R * (ecef - origin)`.
    pub ltp_of_ecef: RMat,
}

impl LtpDef {
    pub fn from_ecef(ecef: Vect3) -> Self {
        let lla = lla_of_ecef(&ecef);
        Self {
            ecef,
            lla,
            ltp_of_ecef: ltp_rotation(&lla),
        }
    }

    pub fn from_lla(lla: LlaCoor) -> Self {
        Self {
            ecef: ecef_of_lla(&lla),
            lla,
            ltp_of_ecef: ltp_rotation(&lla),
        }
    }
}

fn ltp_rotation(lla: &LlaCoor) -> RMat {
    let (slat, clat) = lla.lat.sin_cos();
    let (slon, clon) = lla.lon.sin_cos();
    Matrix3::new(
        -slat * clon,
        -slat * slon,
        clat,
        -slon,
        clon,
        0.0,
        -clat * clon,
        -clat * slon,
        -slat,
    )
}

/// ECEF coordinates of a geodetic point.
pub fn ecef_of_lla(lla: &LlaCoor) -> Vect3 {
    let (slat, clat) = lla.lat.sin_cos();
    let (slon, clon) = lla.lon.sin_cos();
    let n = WGS84_A / (1.0 - WGS84_E2 * slat * slat).sqrt();
    Vect3::new(
        (n + lla.alt) * clat * clon,
        (n + lla.alt) * clat * slon,
        ((1.0 - WGS84_E2) * n + lla.alt) * slat,
    )
}

/// Geodetic coordinates of an ECEF point, by bounded fixed-point iteration
/// on the latitude. Converges to well below a millimeter in a handful of
/// rounds for any airborne altitude.
pub fn lla_of_ecef(ecef: &Vect3) -> LlaCoor {
    let p = (ecef.x * ecef.x + ecef.y * ecef.y).sqrt();
    let lon = ecef.y.atan2(ecef.x);

    if p < 1.0e-9 {
        // polar axis: latitude is +-90 deg, altitude along z
        let lat = if ecef.z >= 0.0 {
            std::f64::consts::FRAC_PI_2
        } else {
            -std::f64::consts::FRAC_PI_2
        };
        let b = WGS84_A * (1.0 - WGS84_F);
        return LlaCoor::new(lat, lon, ecef.z.abs() - b);
    }

    let mut lat = (ecef.z / (p * (1.0 - WGS84_E2))).atan();
    let mut alt = 0.0;
    for _ in 0..10 {
        let prev = lat;
        let slat = lat.sin();
        let n = WGS84_A / (1.0 - WGS84_E2 * slat * slat).sqrt();
        alt = p / lat.cos() - n;
        lat = (ecef.z / (p * (1.0 - WGS84_E2 * n / (n + alt)))).atan();
        if (lat - prev).abs() < 1.0e-14 {
            break;
        }
    }
    LlaCoor::new(lat, lon, alt)
}

/// NED coordinates of an ECEF point, relative to the tangent-plane origin.
pub fn ned_of_ecef_point(def: &LtpDef, ecef: &Vect3) -> Vect3 {
    def.ltp_of_ecef * (ecef - def.ecef)
}

/// ECEF coordinates of a NED point in the given tangent plane.
pub fn ecef_of_ned_point(def: &LtpDef, ned: &Vect3) -> Vect3 {
    def.ecef + def.ltp_of_ecef.transpose() * ned
}

/// Rotate a free vector (speed, acceleration) from ECEF into NED.
pub fn ned_of_ecef_vect(def: &LtpDef, v: &Vect3) -> Vect3 {
    def.ltp_of_ecef * v
}

/// Rotate a free vector (speed, acceleration) from NED into ECEF.
pub fn ecef_of_ned_vect(def: &LtpDef, v: &Vect3) -> Vect3 {
    def.ltp_of_ecef.transpose() * v
}

/// Natural UTM zone of a longitude (radians).
pub fn utm_zone_of_lon(lon: f64) -> u8 {
    let deg = lon.to_degrees();
    (((deg + 180.0) / 6.0).floor() as i32 + 1).clamp(1, 60) as u8
}

fn utm_central_meridian(zone: u8) -> f64 {
    (f64::from(zone) * 6.0 - 183.0).to_radians()
}

fn meridian_arc(lat: f64) -> f64 {
    let e2 = WGS84_E2;
    let e4 = e2 * e2;
    let e6 = e4 * e2;
    WGS84_A
        * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * lat
            - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * lat).sin()
            + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * lat).sin()
            - (35.0 * e6 / 3072.0) * (6.0 * lat).sin())
}

/// Project a geodetic point to UTM. `forced_zone` keeps an already
/// established zone instead of the natural one, so positions near a zone
/// boundary stay continuous in the local projection.
pub fn utm_of_lla(lla: &LlaCoor, forced_zone: Option<u8>) -> UtmCoor {
    let zone = forced_zone.unwrap_or_else(|| utm_zone_of_lon(lla.lon));
    let lon0 = utm_central_meridian(zone);

    let e2 = WGS84_E2;
    let ep2 = e2 / (1.0 - e2);
    let (slat, clat) = lla.lat.sin_cos();
    let tlat = slat / clat;

    let n = WGS84_A / (1.0 - e2 * slat * slat).sqrt();
    let t = tlat * tlat;
    let c = ep2 * clat * clat;
    let a = clat * (lla.lon - lon0);
    let m = meridian_arc(lla.lat);

    let east = UTM_K0
        * n
        * (a + (1.0 - t + c) * a.powi(3) / 6.0
            + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * a.powi(5) / 120.0)
        + UTM_FALSE_EASTING;
    let north = UTM_K0
        * (m + n
            * tlat
            * (a * a / 2.0
                + (5.0 - t + 9.0 * c + 4.0 * c * c) * a.powi(4) / 24.0
                + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * a.powi(6) / 720.0));

    UtmCoor {
        east,
        north,
        alt: lla.alt,
        zone,
    }
}

/// Invert the UTM projection back to geodetic coordinates.
pub fn lla_of_utm(utm: &UtmCoor) -> LlaCoor {
    let e2 = WGS84_E2;
    let e4 = e2 * e2;
    let e6 = e4 * e2;
    let ep2 = e2 / (1.0 - e2);
    let lon0 = utm_central_meridian(utm.zone);

    let x = utm.east - UTM_FALSE_EASTING;
    let m = utm.north / UTM_K0;
    let mu = m / (WGS84_A * (1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0));

    let sq = (1.0 - e2).sqrt();
    let e1 = (1.0 - sq) / (1.0 + sq);
    let e1_2 = e1 * e1;
    let e1_3 = e1_2 * e1;
    let e1_4 = e1_3 * e1;

    // footpoint latitude
    let phi1 = mu
        + (3.0 * e1 / 2.0 - 27.0 * e1_3 / 32.0) * (2.0 * mu).sin()
        + (21.0 * e1_2 / 16.0 - 55.0 * e1_4 / 32.0) * (4.0 * mu).sin()
        + (151.0 * e1_3 / 96.0) * (6.0 * mu).sin()
        + (1097.0 * e1_4 / 512.0) * (8.0 * mu).sin();

    let (s1, c1) = phi1.sin_cos();
    let t1 = (s1 / c1) * (s1 / c1);
    let c1c = ep2 * c1 * c1;
    let n1 = WGS84_A / (1.0 - e2 * s1 * s1).sqrt();
    let r1 = WGS84_A * (1.0 - e2) / (1.0 - e2 * s1 * s1).powf(1.5);
    let d = x / (n1 * UTM_K0);

    let lat = phi1
        - (n1 * (s1 / c1) / r1)
            * (d * d / 2.0
                - (5.0 + 3.0 * t1 + 10.0 * c1c - 4.0 * c1c * c1c - 9.0 * ep2) * d.powi(4) / 24.0
                + (61.0 + 90.0 * t1 + 298.0 * c1c + 45.0 * t1 * t1
                    - 252.0 * ep2
                    - 3.0 * c1c * c1c)
                    * d.powi(6)
                    / 720.0);
    let lon = lon0
        + (d - (1.0 + 2.0 * t1 + c1c) * d.powi(3) / 6.0
            + (5.0 - 2.0 * c1c + 28.0 * t1 - 3.0 * c1c * c1c + 8.0 * ep2 + 24.0 * t1 * t1)
                * d.powi(5)
                / 120.0)
            / c1;

    LlaCoor::new(lat, lon, utm.alt)
}
