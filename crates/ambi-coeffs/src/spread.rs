//! Ambisonic spatial blur
//!
//! Renders a point source as a soft angular extent by attenuating higher
//! orders (Carpentier, "Ambisonic Spatial Blur", AES 2017):
//!
//! - per-order gain: a logistic cutoff that moves toward lower orders as
//!   `alpha` grows, with `tau` setting its steepness (eq. 14)
//! - energy sum over orders, 3D case, SN3D weighted (eq. 13)
//! - global weight restoring the energy of the unblurred field (eq. 18)
//! - per-channel expansion, one value shared by all `2l + 1` channels of an
//!   order (eq. 16)

use serde::{Deserialize, Serialize};

use crate::error::SpatialResult;
use crate::order::AmbisonicOrder;
use crate::validation::validate_spread;

/// Logistic slope multiplier applied to `tau`
const SLOPE_SCALE: f64 = 100.0;

/// Spread amount and blur-curve sharpness
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpreadParams {
    /// 0 = point source, 1 = fully diffuse
    pub alpha: f64,
    /// Sharpness of the transition between passed and suppressed orders
    pub tau: f64,
}

impl SpreadParams {
    /// Create validated spread parameters
    pub fn new(alpha: f64, tau: f64) -> SpatialResult<Self> {
        Ok(Self {
            alpha: validate_spread(alpha)?,
            tau: validate_spread(tau)?,
        })
    }

    /// No blur at all
    pub fn point() -> Self {
        Self { alpha: 0.0, tau: 1.0 }
    }

    /// Check both parameters are in range
    pub fn validate(&self) -> SpatialResult<()> {
        validate_spread(self.alpha)?;
        validate_spread(self.tau)?;
        Ok(())
    }

    /// Per-channel coefficients for these parameters
    pub fn coefficients(&self, order: AmbisonicOrder) -> SpatialResult<Vec<f64>> {
        spread_coefficients(self.alpha, self.tau, order)
    }
}

impl Default for SpreadParams {
    fn default() -> Self {
        Self::point()
    }
}

/// Attenuation of order `l` out of `max_order`.
///
/// `1 - 1 / (1 + exp(-100·tau·(alpha - (L - l + 1) / (L + 1))))`
pub fn spread_gain(alpha: f64, tau: f64, order: u32, max_order: u32) -> f64 {
    let l = order as f64;
    let big_l = max_order as f64;
    let center = (big_l - l + 1.0) / (big_l + 1.0);

    1.0 - 1.0 / (1.0 + (-tau * SLOPE_SCALE * (alpha - center)).exp())
}

/// `Σ_{n=0..=L} sqrt(2n + 1) · gain(n)²`
pub fn energy_sum(alpha: f64, tau: f64, max_order: u32) -> f64 {
    (0..=max_order)
        .map(|n| {
            let gain = spread_gain(alpha, tau, n, max_order);
            (2.0 * n as f64 + 1.0).sqrt() * gain * gain
        })
        .sum()
}

/// Global weight bringing the blurred energy back to the `alpha = 0` energy.
///
/// The zeroth-order gain never drops below 0.5, so the energy sum is
/// bounded away from zero.
pub fn spread_weight(alpha: f64, tau: f64, max_order: u32) -> f64 {
    (energy_sum(0.0, tau, max_order) / energy_sum(alpha, tau, max_order)).sqrt()
}

/// Spread coefficient of order `l`: gain times the global weight.
pub fn spread(alpha: f64, tau: f64, order: u32, max_order: u32) -> f64 {
    spread_gain(alpha, tau, order, max_order) * spread_weight(alpha, tau, max_order)
}

/// Per-channel spread coefficients, same length and ACN layout as
/// [`encode`](crate::encode) for the same order.
///
/// Multiply elementwise with a direction's coefficient vector.
pub fn spread_coefficients(alpha: f64, tau: f64, order: AmbisonicOrder) -> SpatialResult<Vec<f64>> {
    let alpha = validate_spread(alpha)?;
    let tau = validate_spread(tau)?;

    let max_order = order.as_u32();
    let weight = spread_weight(alpha, tau, max_order);

    let mut coeffs = Vec::with_capacity(order.channel_count());
    for l in 0..=max_order {
        let value = spread_gain(alpha, tau, l, max_order) * weight;
        coeffs.extend(std::iter::repeat_n(value, 2 * l as usize + 1));
    }

    Ok(coeffs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpatialError;
    use crate::order::acn_to_order_degree;

    const L: u32 = 5;

    fn assert_gain(alpha: f64, tau: f64, l: u32, expected: f64) {
        let got = spread_gain(alpha, tau, l, L);
        assert!(
            (got - expected).abs() < 1e-3,
            "gain(alpha={}, tau={}, l={}) = {} expected {}",
            alpha,
            tau,
            l,
            got,
            expected
        );
    }

    #[test]
    fn test_gain_without_spread() {
        for tau in [1.0, 0.5] {
            for l in 0..=L {
                assert_gain(0.0, tau, l, 1.0);
            }
        }
        for l in 0..L {
            assert_gain(0.0, 0.25, l, 1.0);
        }
        assert_gain(0.0, 0.25, 5, 0.9847328461196255);
    }

    #[test]
    fn test_gain_full_spread() {
        for tau in [1.0, 0.5, 0.25] {
            assert_gain(1.0, tau, 0, 0.5);
        }
        for tau in [1.0, 0.5] {
            for l in 1..=L {
                assert_gain(1.0, tau, l, 0.0);
            }
        }
        assert_gain(1.0, 0.25, 1, 0.015267153880374473);
        for l in 2..=L {
            assert_gain(1.0, 0.25, l, 0.0);
        }
    }

    #[test]
    fn test_gain_half_spread() {
        for tau in [1.0, 0.5] {
            let expected = [1.0, 1.0, 1.0, 0.5, 0.0, 0.0];
            for (l, &e) in expected.iter().enumerate() {
                assert_gain(0.5, tau, l as u32, e);
            }
        }
        let expected = [1.0, 1.0, 0.9847328461196255, 0.5, 0.015267153880374473, 0.0];
        for (l, &e) in expected.iter().enumerate() {
            assert_gain(0.5, 0.25, l as u32, e);
        }
    }

    #[test]
    fn test_weight() {
        for tau in [1.0, 0.5, 0.25] {
            assert!((spread_weight(0.0, tau, L) - 1.0).abs() < 1e-12);
            assert!((spread_weight(1.0, tau, L) - 7.4).abs() < 0.1);
            assert!((spread_weight(0.7, tau, L) - 2.2).abs() < 0.1);
        }
    }

    #[test]
    fn test_no_spread_is_all_ones() {
        for tau in [1.0, 0.5, 0.25] {
            let coeffs = spread_coefficients(0.0, tau, AmbisonicOrder::new(L)).unwrap();
            assert_eq!(coeffs.len(), 36);
            assert!(coeffs.iter().all(|&c| (c - 1.0).abs() < 0.1));
        }
        let coeffs = spread_coefficients(0.0, 1.0, AmbisonicOrder::new(L)).unwrap();
        assert!(coeffs.iter().all(|&c| (c - 1.0).abs() < 1e-6));
    }

    #[test]
    fn test_full_spread_keeps_only_omni() {
        let coeffs = spread_coefficients(1.0, 1.0, AmbisonicOrder::new(L)).unwrap();
        let weight = spread_weight(1.0, 1.0, L);

        assert!((coeffs[0] - 0.5 * weight).abs() < 1e-12);
        assert!((coeffs[0] - 3.7).abs() < 0.1);
        assert!(coeffs[1..].iter().all(|&c| c.abs() < 1e-5));
    }

    #[test]
    fn test_omni_dominates_near_full_spread() {
        for alpha in [0.9, 0.95, 1.0] {
            for tau in [0.25, 0.5, 1.0] {
                let coeffs = spread_coefficients(alpha, tau, AmbisonicOrder::new(4)).unwrap();
                assert!(coeffs[1..].iter().all(|&c| c.abs() <= coeffs[0]));
            }
        }
    }

    #[test]
    fn test_channels_of_one_order_share_value() {
        let order = AmbisonicOrder::new(4);
        let coeffs = spread_coefficients(0.6, 0.4, order).unwrap();
        for (acn, &c) in coeffs.iter().enumerate() {
            let (l, _) = acn_to_order_degree(acn).unwrap();
            assert_eq!(c, spread(0.6, 0.4, l, 4));
        }
    }

    #[test]
    fn test_energy_preserved() {
        for &alpha in &[0.0, 0.2, 0.5, 0.8, 1.0] {
            for &tau in &[0.1, 0.5, 1.0] {
                let reference = energy_sum(0.0, tau, L);
                let blurred: f64 = (0..=L)
                    .map(|l| {
                        let s = spread(alpha, tau, l, L);
                        (2.0 * l as f64 + 1.0).sqrt() * s * s
                    })
                    .sum();
                assert!(
                    (blurred - reference).abs() < 1e-9 * reference,
                    "alpha={} tau={}",
                    alpha,
                    tau
                );
            }
        }
    }

    #[test]
    fn test_flat_slope_is_uniform() {
        let coeffs = spread_coefficients(1.0, 0.0, AmbisonicOrder::THIRD).unwrap();
        assert!(coeffs.iter().all(|&c| (c - 0.5).abs() < 1e-12));
    }

    #[test]
    fn test_invalid_params() {
        for bad in [-0.5, 3.0, f64::NAN] {
            assert!(matches!(
                spread_coefficients(bad, 0.5, AmbisonicOrder::FIRST),
                Err(SpatialError::InvalidSpread(_))
            ));
            assert!(matches!(
                spread_coefficients(0.5, bad, AmbisonicOrder::FIRST),
                Err(SpatialError::InvalidSpread(_))
            ));
            assert!(SpreadParams::new(bad, 0.5).is_err());
        }
    }
}
