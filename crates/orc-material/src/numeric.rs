//! Floating-point helpers shared by materials and components.

use std::f64::consts::PI;

/// Relative tolerance used for value equality of physical quantities.
pub const EPSILON: f64 = 1e-8;

/// Compare two values with a relative tolerance of [`EPSILON`].
///
/// The tolerance scales with the larger magnitude, so the comparison is
/// symmetric. Two values both below `EPSILON / 2` in magnitude are equal so
/// that zero equals tiny round-off residue.
pub fn approx_eq(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    let scale = a.abs().max(b.abs());
    if scale.is_nan() {
        return false;
    }
    if scale < EPSILON / 2.0 {
        return true;
    }
    (a - b).abs() < EPSILON * scale
}

/// Reduce an angle in radians into the half-open range (−π, π].
pub fn reduce_180(angle: f64) -> f64 {
    if !angle.is_finite() {
        return angle;
    }
    let mut reduced = angle % (2.0 * PI);
    if reduced > PI {
        reduced -= 2.0 * PI;
    } else if reduced <= -PI {
        reduced += 2.0 * PI;
    }
    reduced
}

/// Round `value` to the given number of significant digits.
pub fn significant(value: f64, digits: u32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let magnitude = value.abs().log10().floor() as i32;
    let exponent = digits as i32 - 1 - magnitude;
    if exponent >= 0 {
        let scale = 10f64.powi(exponent);
        (value * scale).round() / scale
    } else {
        let scale = 10f64.powi(-exponent);
        (value / scale).round() * scale
    }
}
