//! Real spherical harmonics, SN3D normalized, ACN indexed
//!
//! The complex harmonic from [`legendre`] carries the physics normalization
//! `N(l, m)` and the Condon–Shortley phase. Each real coefficient is taken
//! from it and renormalized:
//!
//! ```text
//! Y_sn3d(l, m) = part(Y_l^|m|) / N(l, |m|) · (-1)^|m| · sqrt((2 - δ(0, m)) · (l - |m|)! / (l + |m|)!)
//! ```
//!
//! where `part` is the real part for `m >= 0` and the imaginary part for
//! `m < 0`. Elevation is measured from the horizontal plane, so it is shifted
//! by `-π/2` before evaluation; azimuth is used as is.

pub mod legendre;

use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::SpatialResult;
use crate::order::MAX_STABLE_ORDER;
use crate::validation::{validate_angle, validate_degree};

/// `(l - m)! / (l + m)!` as a running product.
///
/// Returns 0 when `m > l`.
pub fn factorial_ratio(l: u32, m: u32) -> f64 {
    if m > l {
        return 0.0;
    }
    ((l - m + 1)..=(l + m)).fold(1.0, |acc, k| acc / k as f64)
}

/// Standard spherical-harmonic normalization, without the Condon–Shortley phase:
/// `sqrt((2l + 1) / 4π · (l - |m|)! / (l + |m|)!)`.
pub fn normalization(order: u32, degree: i32) -> f64 {
    let l = order as f64;
    let m = degree.unsigned_abs();
    ((2.0 * l + 1.0) / (4.0 * PI) * factorial_ratio(order, m)).sqrt()
}

/// SN3D factor with the Condon–Shortley phase cancelled:
/// `(-1)^|m| · sqrt((2 - δ(0, |m|)) · (l - |m|)! / (l + |m|)!)`.
pub fn sn3d_factor(order: u32, degree: i32) -> f64 {
    let m = degree.unsigned_abs();
    let delta = if m == 0 { 1.0 } else { 0.0 };
    let sign = if m % 2 == 0 { 1.0 } else { -1.0 };
    sign * ((2.0 - delta) * factorial_ratio(order, m)).sqrt()
}

/// `sn3d_factor / normalization` with the factorial ratio cancelled:
/// `(-1)^|m| · sqrt((2 - δ(0, |m|)) · 4π / (2l + 1))`.
fn cancelled_scale(order: u32, degree: i32) -> f64 {
    let m = degree.unsigned_abs();
    let delta = if m == 0 { 1.0 } else { 0.0 };
    let sign = if m % 2 == 0 { 1.0 } else { -1.0 };
    sign * ((2.0 - delta) * 4.0 * PI / (2.0 * order as f64 + 1.0)).sqrt()
}

/// One SN3D coefficient for a direction and an `(order, degree)` pair.
pub fn harmonic(azimuth: f64, elevation: f64, order: u32, degree: i32) -> SpatialResult<f64> {
    validate_degree(i64::from(degree), i64::from(order))?;
    validate_angle(azimuth)?;
    validate_angle(elevation)?;

    Ok(evaluate(azimuth, elevation, order, degree))
}

/// [`harmonic`] without validation. Callers must have checked the inputs.
pub(crate) fn evaluate(azimuth: f64, elevation: f64, order: u32, degree: i32) -> f64 {
    let polar = elevation - FRAC_PI_2;
    let y = legendre::spherical_harmonic(order, degree.unsigned_abs(), azimuth, polar);

    // Degree 0 has no imaginary part, so either branch works there
    let raw = if degree >= 0 { y.re } else { y.im };

    if order <= MAX_STABLE_ORDER {
        raw / normalization(order, degree) * sn3d_factor(order, degree)
    } else {
        // Both factors underflow to zero out here
        raw * cancelled_scale(order, degree)
    }
}
