//! Angle and polar helpers.
//!
//! Points are `kurbo` types: `Point + Vec2` translates and `Vec2::length`
//! gives the Euclidean length.

use floem::kurbo::Vec2;

/// Degrees → radians.
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Radians → degrees.
pub const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

/// Wrap an angle in degrees into `[0, 360)`.
pub fn normalize_angle(angle: f64) -> f64 {
    // Offset first so moderately negative input stays positive under `%`.
    let a = (angle + 3600.0) % 360.0;
    if a < 0.0 { a + 360.0 } else { a }
}

pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    min.max(max.min(value))
}

/// Vector of `length` at `angle` radians.
///
/// `x = length·sin(angle)`, `y = length·cos(angle)`: angle 0 lies on the
/// vertical axis and 180° is 12 o'clock in screen space (y down).
pub fn polar(length: f64, angle: f64) -> Vec2 {
    Vec2::new(length * angle.sin(), length * angle.cos())
}

/// Screen angle of `v` in degrees, as measured by pointer tracking
/// (`atan2(y, x)`, clockwise with y down).
pub fn screen_angle(v: Vec2) -> f64 {
    v.y.atan2(v.x) * RAD_TO_DEG
}
