//! Ambisonic order and ACN channel indexing

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::{SpatialError, SpatialResult};
use crate::validation::{validate_degree, validate_order, validate_order_value};

/// Highest order whose factorial-ratio normalization stays a normal `f64`.
///
/// `(l - m)! / (l + m)!` at `m = l` is `1 / (2l)!`, and `171!` no longer fits.
pub const MAX_STABLE_ORDER: u32 = 85;

/// Highest accepted order. Degrees `-l..=l` must fit an `i32`.
pub const MAX_ORDER: u32 = i32::MAX as u32;

/// Ambisonic order (determines spatial resolution)
///
/// Any integer in `0..=MAX_ORDER` is a valid order. Construction from
/// unsigned, signed or floating-point values goes through the same guards as
/// the free functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "u32")]
pub struct AmbisonicOrder(u32);

impl AmbisonicOrder {
    /// Omnidirectional only (1 channel)
    pub const ZERO: Self = Self(0);
    /// First order (4 channels) - basic 3D
    pub const FIRST: Self = Self(1);
    /// Second order (9 channels)
    pub const SECOND: Self = Self(2);
    /// Third order (16 channels)
    pub const THIRD: Self = Self(3);

    /// Create from an unsigned order number, saturating at [`MAX_ORDER`].
    ///
    /// Use `TryFrom<u32>` to reject larger values instead.
    pub const fn new(order: u32) -> Self {
        if order > MAX_ORDER {
            Self(MAX_ORDER)
        } else {
            Self(order)
        }
    }

    /// Get order number
    pub const fn as_u32(&self) -> u32 {
        self.0
    }

    /// Get channel count for this order: `(L + 1)²`
    pub fn channel_count(&self) -> usize {
        let n = self.0 as usize + 1;
        n.saturating_mul(n)
    }

    /// Iterate `(l, m)` pairs in ACN sequence: `l = 0..=L`, `m = -l..=l`.
    pub fn acn_pairs(&self) -> impl Iterator<Item = (u32, i32)> {
        // self.0 <= MAX_ORDER, so every degree fits an i32
        (0..=self.0).flat_map(|l| {
            let l_signed = l as i32;
            (-l_signed..=l_signed).map(move |m| (l, m))
        })
    }

    /// True when normalization factors at this order may underflow.
    pub fn exceeds_stable_range(&self) -> bool {
        self.0 > MAX_STABLE_ORDER
    }
}

impl TryFrom<u32> for AmbisonicOrder {
    type Error = SpatialError;

    fn try_from(order: u32) -> SpatialResult<Self> {
        Self::try_from(i64::from(order))
    }
}

impl From<AmbisonicOrder> for u32 {
    fn from(order: AmbisonicOrder) -> Self {
        order.0
    }
}

impl TryFrom<i64> for AmbisonicOrder {
    type Error = SpatialError;

    fn try_from(order: i64) -> SpatialResult<Self> {
        validate_order(order).map(Self)
    }
}

impl TryFrom<i32> for AmbisonicOrder {
    type Error = SpatialError;

    fn try_from(order: i32) -> SpatialResult<Self> {
        Self::try_from(i64::from(order))
    }
}

impl TryFrom<f64> for AmbisonicOrder {
    type Error = SpatialError;

    fn try_from(order: f64) -> SpatialResult<Self> {
        validate_order_value(order).map(Self)
    }
}

impl std::fmt::Display for AmbisonicOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of Ambisonic channels for a raw order value.
///
/// Validates the order independently so callers can size buffers before
/// they hold an [`AmbisonicOrder`].
pub fn channel_count(order: i64) -> SpatialResult<usize> {
    AmbisonicOrder::try_from(order).map(|o| o.channel_count())
}

/// Valid degrees of one order: `-l..=l`, `2l + 1` of them.
pub fn degrees(order: u32) -> SpatialResult<RangeInclusive<i32>> {
    let l = validate_order(i64::from(order))? as i32;
    Ok(-l..=l)
}

/// ACN channel index from (order, degree): `l² + l + m`.
pub fn acn_index(order: u32, degree: i32) -> SpatialResult<usize> {
    validate_degree(i64::from(degree), i64::from(order))?;

    // l <= i32::MAX, so l² + l + m fits an i64
    let l = i64::from(order);
    let index = l * l + l + i64::from(degree);
    usize::try_from(index).map_err(|_| {
        SpatialError::InvalidInput(format!(
            "ACN index {} for order {} does not fit this platform",
            index, order
        ))
    })
}

/// Get (order, degree) from ACN index
pub fn acn_to_order_degree(acn: usize) -> SpatialResult<(u32, i32)> {
    let order = acn.isqrt();
    if order > MAX_ORDER as usize {
        return Err(SpatialError::InvalidInput(format!(
            "ACN index {} lies beyond order {}",
            acn, MAX_ORDER
        )));
    }

    // order² <= acn < (order + 1)², so the degree lies in -order..=order
    let degree = (acn - order * order) as i64 - order as i64;
    Ok((order as u32, degree as i32))
}
