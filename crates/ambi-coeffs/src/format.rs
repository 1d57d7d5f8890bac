//! Ambisonic format conversion - normalization and channel ordering
//!
//! First order only. Buffers are `frames x channels` arrays; FuMa buffers
//! hold W, X, Y, Z and AmbiX buffers hold W, Y, Z, X (ACN) with SN3D gains.

use std::f64::consts::SQRT_2;

use ndarray::{Array2, ArrayView2, ArrayViewD, Ix2};
use serde::{Deserialize, Serialize};

use crate::error::{SpatialError, SpatialResult};

/// Channels in a first-order buffer
pub const FIRST_ORDER_CHANNELS: usize = 4;

/// FuMa channel index -> ACN channel index
const FUMA_TO_ACN: [usize; FIRST_ORDER_CHANNELS] = [0, 3, 1, 2];

/// Normalization scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Normalization {
    /// SN3D (Schmidt semi-normalized) - AmbiX standard
    Sn3d,
    /// FuMa (Furse-Malham) - legacy, W attenuated by 3 dB
    FuMa,
}

/// Channel ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrdering {
    /// ACN (Ambisonic Channel Number) - AmbiX standard
    Acn,
    /// FuMa ordering (W, X, Y, Z) - legacy
    FuMa,
}

/// Complete Ambisonic format specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmbisonicFormat {
    /// Normalization scheme
    pub normalization: Normalization,
    /// Channel ordering
    pub ordering: ChannelOrdering,
}

impl AmbisonicFormat {
    /// AmbiX format (ACN + SN3D) - modern standard
    pub fn ambix() -> Self {
        Self {
            normalization: Normalization::Sn3d,
            ordering: ChannelOrdering::Acn,
        }
    }

    /// FuMa format (legacy)
    pub fn fuma() -> Self {
        Self {
            normalization: Normalization::FuMa,
            ordering: ChannelOrdering::FuMa,
        }
    }
}

impl Default for AmbisonicFormat {
    fn default() -> Self {
        Self::ambix()
    }
}

fn check_first_order(buffer: &ArrayView2<'_, f64>) -> SpatialResult<()> {
    let got = buffer.ncols();
    if got != FIRST_ORDER_CHANNELS {
        return Err(SpatialError::UnsupportedChannelLayout {
            expected: FIRST_ORDER_CHANNELS,
            got,
        });
    }
    Ok(())
}

/// Reorder a FuMa buffer (W, X, Y, Z) into ACN (W, Y, Z, X).
pub fn reindex_fuma_to_acn(buffer: ArrayView2<'_, f64>) -> SpatialResult<Array2<f64>> {
    check_first_order(&buffer)?;

    let mut acn = Array2::zeros(buffer.raw_dim());
    for (fuma_ch, &acn_ch) in FUMA_TO_ACN.iter().enumerate() {
        acn.column_mut(acn_ch).assign(&buffer.column(fuma_ch));
    }
    Ok(acn)
}

/// Reorder an ACN buffer (W, Y, Z, X) back into FuMa (W, X, Y, Z).
pub fn reindex_acn_to_fuma(buffer: ArrayView2<'_, f64>) -> SpatialResult<Array2<f64>> {
    check_first_order(&buffer)?;

    let mut fuma = Array2::zeros(buffer.raw_dim());
    for (fuma_ch, &acn_ch) in FUMA_TO_ACN.iter().enumerate() {
        fuma.column_mut(fuma_ch).assign(&buffer.column(acn_ch));
    }
    Ok(fuma)
}

/// Rescale FuMa gains to SN3D: W times √2, X/Y/Z unchanged.
pub fn renormalize_fuma_to_sn3d(buffer: ArrayView2<'_, f64>) -> SpatialResult<Array2<f64>> {
    check_first_order(&buffer)?;

    let mut sn3d = buffer.to_owned();
    sn3d.column_mut(0).mapv_inplace(|w| w * SQRT_2);
    Ok(sn3d)
}

/// Rescale SN3D gains to FuMa: W divided by √2, X/Y/Z unchanged.
pub fn renormalize_sn3d_to_fuma(buffer: ArrayView2<'_, f64>) -> SpatialResult<Array2<f64>> {
    check_first_order(&buffer)?;

    let mut fuma = buffer.to_owned();
    fuma.column_mut(0).mapv_inplace(|w| w / SQRT_2);
    Ok(fuma)
}

/// Convert a first-order buffer between formats.
///
/// W is channel 0 in both orderings, so reordering and renormalization
/// commute.
pub fn convert_first_order(
    buffer: ArrayView2<'_, f64>,
    from: AmbisonicFormat,
    to: AmbisonicFormat,
) -> SpatialResult<Array2<f64>> {
    check_first_order(&buffer)?;

    let reordered = match (from.ordering, to.ordering) {
        (ChannelOrdering::FuMa, ChannelOrdering::Acn) => reindex_fuma_to_acn(buffer)?,
        (ChannelOrdering::Acn, ChannelOrdering::FuMa) => reindex_acn_to_fuma(buffer)?,
        _ => buffer.to_owned(),
    };

    match (from.normalization, to.normalization) {
        (Normalization::FuMa, Normalization::Sn3d) => renormalize_fuma_to_sn3d(reordered.view()),
        (Normalization::Sn3d, Normalization::FuMa) => renormalize_sn3d_to_fuma(reordered.view()),
        _ => Ok(reordered),
    }
}

/// View a dynamic-rank array as `frames x channels`.
pub fn frames_from_dyn(buffer: ArrayViewD<'_, f64>) -> SpatialResult<ArrayView2<'_, f64>> {
    let rank = buffer.ndim();
    buffer.into_dimensionality::<Ix2>().map_err(|_| {
        SpatialError::InvalidInput(format!(
            "expected a 2-D frames x channels array, got rank {}",
            rank
        ))
    })
}

/// Build a `frames x channels` array from per-frame rows.
pub fn frames_from_rows(rows: &[Vec<f64>]) -> SpatialResult<Array2<f64>> {
    let Some(first) = rows.first() else {
        return Err(SpatialError::InvalidInput(
            "buffer has no frames".to_string(),
        ));
    };

    let width = first.len();
    if let Some((frame, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
        return Err(SpatialError::InvalidInput(format!(
            "frame {} has {} channels, frame 0 has {}",
            frame,
            row.len(),
            width
        )));
    }

    let flat: Vec<f64> = rows.iter().flatten().copied().collect();
    Array2::from_shape_vec((rows.len(), width), flat)
        .map_err(|e| SpatialError::InvalidInput(e.to_string()))
}
