//! Ambisonic encoder - point source direction to channel gains

use rayon::prelude::*;

use crate::direction::Direction;
use crate::error::SpatialResult;
use crate::harmonics;
use crate::order::{AmbisonicOrder, MAX_STABLE_ORDER};
use crate::validation::validate_angle;

/// Coefficient vector for one direction, ACN ordered, SN3D normalized.
///
/// Length is `(L + 1)²`; index 0 is always the omnidirectional term.
pub fn encode(azimuth: f64, elevation: f64, order: AmbisonicOrder) -> SpatialResult<Vec<f64>> {
    validate_angle(azimuth)?;
    validate_angle(elevation)?;

    if order.exceeds_stable_range() {
        log::debug!(
            "Ambisonic order {} above {}: using cancelled SN3D normalization",
            order,
            MAX_STABLE_ORDER
        );
    }

    let coeffs = order
        .acn_pairs()
        .map(|(l, m)| harmonics::evaluate(azimuth, elevation, l, m))
        .collect();

    Ok(coeffs)
}

/// [`encode`] for a [`Direction`]
pub fn encode_direction(direction: &Direction, order: AmbisonicOrder) -> SpatialResult<Vec<f64>> {
    encode(direction.azimuth, direction.elevation, order)
}

/// Encode many independent directions in parallel.
///
/// Either every vector is returned, in input order, or the first error.
pub fn encode_batch(
    directions: &[Direction],
    order: AmbisonicOrder,
) -> SpatialResult<Vec<Vec<f64>>> {
    log::trace!(
        "Encoding {} directions at order {}",
        directions.len(),
        order
    );

    directions
        .par_iter()
        .map(|direction| encode_direction(direction, order))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpatialError;
    use crate::order::acn_index;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_encode_front() {
        let coeffs = encode(0.0, 0.0, AmbisonicOrder::FIRST).unwrap();

        assert_eq!(coeffs.len(), 4);
        assert!((coeffs[0] - 1.0).abs() < 1e-12); // W
        assert!(coeffs[1].abs() < 1e-12); // Y
        assert!(coeffs[2].abs() < 1e-12); // Z
        assert!((coeffs[3] - 1.0).abs() < 1e-12); // X
    }

    #[test]
    fn test_encode_left() {
        let coeffs = encode(FRAC_PI_2, 0.0, AmbisonicOrder::FIRST).unwrap();

        assert!((coeffs[1] - 1.0).abs() < 1e-12);
        assert!(coeffs[3].abs() < 1e-12);
    }

    #[test]
    fn test_zeroth_order() {
        let coeffs = encode(1.0, 0.5, AmbisonicOrder::ZERO).unwrap();
        assert_eq!(coeffs, vec![1.0]);
    }

    #[test]
    fn test_omni_channel_always_one() {
        for &(a, e) in &[(0.0, 0.0), (3.0, 1.2), (5.5, -1.4), (-7.0, 9.0)] {
            let coeffs = encode(a, e, AmbisonicOrder::new(4)).unwrap();
            assert_eq!(coeffs.len(), 25);
            assert!((coeffs[0] - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_azimuth_shift_flips_odd_degrees() {
        let order = AmbisonicOrder::new(5);
        let (a, e) = (0.7, 0.3);
        let base = encode(a, e, order).unwrap();
        let shifted = encode(a + PI, e, order).unwrap();

        for (l, m) in order.acn_pairs() {
            let acn = acn_index(l, m).unwrap();
            let sign = if m.unsigned_abs() % 2 == 1 { -1.0 } else { 1.0 };
            assert!(
                (shifted[acn] - sign * base[acn]).abs() < 1e-9,
                "channel {} (l={}, m={})",
                acn,
                l,
                m
            );
        }
    }

    #[test]
    fn test_batch_matches_single() {
        let order = AmbisonicOrder::THIRD;
        let directions: Vec<Direction> = (0..32)
            .map(|i| Direction::new(i as f64 * 0.2, (i as f64 * 0.05) - 0.8).unwrap())
            .collect();

        let batch = encode_batch(&directions, order).unwrap();
        assert_eq!(batch.len(), directions.len());
        for (dir, coeffs) in directions.iter().zip(&batch) {
            assert_eq!(coeffs, &encode_direction(dir, order).unwrap());
        }
    }

    #[test]
    fn test_batch_fails_entirely() {
        let directions = [
            Direction::front(),
            Direction {
                azimuth: f64::NAN,
                elevation: 0.0,
            },
        ];
        assert!(matches!(
            encode_batch(&directions, AmbisonicOrder::FIRST),
            Err(SpatialError::InvalidAngle(_))
        ));
    }

    #[test]
    fn test_invalid_angle() {
        assert!(matches!(
            encode(f64::NAN, 0.0, AmbisonicOrder::FIRST),
            Err(SpatialError::InvalidAngle(_))
        ));
        assert!(matches!(
            encode(0.0, f64::INFINITY, AmbisonicOrder::FIRST),
            Err(SpatialError::InvalidAngle(_))
        ));
    }
}
