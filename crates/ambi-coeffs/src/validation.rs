//! Input guards shared by every public entry point
//!
//! All guards are pure: they either hand the value back (narrowed to the
//! type the engine works with) or fail before any computation starts.

use crate::error::{SpatialError, SpatialResult};
use crate::order::MAX_ORDER;

/// Validate an Ambisonic order given as an integer: `0..=MAX_ORDER`.
pub fn validate_order(order: i64) -> SpatialResult<u32> {
    match u32::try_from(order) {
        Ok(valid) if valid <= MAX_ORDER => Ok(valid),
        _ => Err(SpatialError::InvalidOrder {
            value: order as f64,
        }),
    }
}

/// Validate an Ambisonic order that arrived as a float.
///
/// Fractional, negative and non-finite values are rejected, so `1.5` and
/// `-1.0` fail the same way a negative integer does.
pub fn validate_order_value(order: f64) -> SpatialResult<u32> {
    if !order.is_finite()
        || order.fract() != 0.0
        || order < 0.0
        || order > f64::from(MAX_ORDER)
    {
        return Err(SpatialError::InvalidOrder { value: order });
    }
    Ok(order as u32)
}

/// Validate a degree against its order: the order first, then `|degree| <= order`.
pub fn validate_degree(degree: i64, order: i64) -> SpatialResult<()> {
    let order = validate_order(order)?;
    if degree.unsigned_abs() > u64::from(order) {
        return Err(SpatialError::InvalidDegree {
            degree,
            order: i64::from(order),
        });
    }
    Ok(())
}

/// Validate an angle in radians. Any finite value is accepted; no wrapping.
pub fn validate_angle(angle: f64) -> SpatialResult<f64> {
    if angle.is_finite() {
        Ok(angle)
    } else {
        Err(SpatialError::InvalidAngle(angle))
    }
}

/// Validate a spread parameter (`alpha` or `tau`): a real number in `[0, 1]`.
pub fn validate_spread(value: f64) -> SpatialResult<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(SpatialError::InvalidSpread(value))
    }
}
