//! Complex spherical harmonics in the physics convention
//!
//! `Y_l^m(φ, θ) = N(l, m) · P_l^m(cos θ) · e^{imφ}` with `θ` the polar angle
//! and the Condon–Shortley phase folded into `P_l^m`. The product
//! `N · P` is built with the fully normalized recurrence, so no factorial
//! is ever formed and the values stay bounded for high orders.

use std::f64::consts::PI;

use num_complex::Complex64;

/// `N(l, m) · P_l^m(cos θ)` for `0 <= m <= l`, Condon–Shortley phase included.
pub fn normalized_legendre(l: u32, m: u32, polar: f64) -> f64 {
    debug_assert!(m <= l);

    let x = polar.cos();
    // Non-negative for any polar angle, like (1 - x²)^{1/2} in the textbook form
    let somx2 = ((1.0 - x) * (1.0 + x)).max(0.0).sqrt();

    // Sectoral seed P̄_m^m
    let mut p_mm = (1.0 / (4.0 * PI)).sqrt();
    for i in 1..=m {
        let i = i as f64;
        p_mm *= -((2.0 * i + 1.0) / (2.0 * i)).sqrt() * somx2;
    }
    if l == m {
        return p_mm;
    }

    let mf = m as f64;
    let mut p_prev = p_mm;
    let mut p_curr = x * (2.0 * mf + 3.0).sqrt() * p_mm;

    for ll in (m + 2)..=l {
        let lf = ll as f64;
        let a = recurrence_coeff(lf, mf);
        let a_prev = recurrence_coeff(lf - 1.0, mf);
        let next = a * (x * p_curr - p_prev / a_prev);
        p_prev = p_curr;
        p_curr = next;
    }

    p_curr
}

#[inline]
fn recurrence_coeff(l: f64, m: f64) -> f64 {
    ((4.0 * l * l - 1.0) / (l * l - m * m)).sqrt()
}

/// Complex spherical harmonic `Y_l^m(azimuth, polar)` for `m >= 0`.
pub fn spherical_harmonic(l: u32, m: u32, azimuth: f64, polar: f64) -> Complex64 {
    let magnitude = normalized_legendre(l, m, polar);
    Complex64::from_polar(1.0, m as f64 * azimuth) * magnitude
}
