//! Great-circle navigation math.
//!
//! Home distance and bearing are computed with the haversine formula in
//! `f64` (via `libm`, the crate is `no_std`), then narrowed to `f32` for
//! display. The initial bearing is the forward azimuth from the vehicle to
//! the target, normalised into `[0, 360)`.

use libm::{atan2, cos, fmodf, sin, sqrt};

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371e3;

/// Distance and initial bearing between two positions.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct GreatCircle {
    /// Distance in meters, never negative.
    pub distance_m: f32,
    /// Initial bearing in degrees, `[0, 360)`.
    pub bearing_deg: f32,
}

/// Wrap any angle in degrees into `[0, 360)`.
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let r = fmodf(angle, 360.0);
    let wrapped = if r < 0.0 { r + 360.0 } else { r };
    // tiny negative inputs round up to exactly 360.0
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Wrap an integer angle in degrees into `[0, 360)`.
#[inline]
pub const fn wrap_degrees_i32(angle: i32) -> i32 { angle.rem_euclid(360) }

/// Great-circle distance and initial bearing from `(lat1, lon1)` to
/// `(lat2, lon2)`, all in decimal degrees.
pub fn great_circle(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> GreatCircle {
    let f1 = lat1.to_radians();
    let f2 = lat2.to_radians();
    let df = f2 - f1;
    let dl = (lon2 - lon1).to_radians();

    let a = sin(df / 2.0) * sin(df / 2.0) + cos(f1) * cos(f2) * sin(dl / 2.0) * sin(dl / 2.0);
    // rounding can push `a` a hair outside [0, 1] for antipodal points
    let a = a.clamp(0.0, 1.0);
    let distance = 2.0 * EARTH_RADIUS_M * atan2(sqrt(a), sqrt(1.0 - a));

    let y = sin(dl) * cos(f2);
    let x = cos(f1) * sin(f2) - sin(f1) * cos(f2) * cos(dl);
    let bearing = atan2(y, x).to_degrees();

    GreatCircle {
        distance_m: distance as f32,
        bearing_deg: wrap_degrees(bearing as f32),
    }
}
