//! Ambisonics coefficient engine
//!
//! Gains that place a point source on a spherical-harmonic basis, for any
//! Ambisonic order:
//!
//! ## Encoding
//! - SN3D normalization, ACN channel ordering
//! - Arbitrary order, `(L + 1)²` channels
//! - Parallel batch encoding of independent directions
//!
//! ## Spatial Blur
//! - Per-order logistic attenuation driven by spread and slope
//! - Energy-preserving global weight
//! - Per-channel expansion matching the encoder's layout
//!
//! ## Format Conversion
//! - FuMa <-> ACN channel ordering (first order)
//! - FuMa <-> SN3D normalization (first order)
//!
//! Everything here is a pure function of its inputs. Audio buffers, scene
//! timelines and mixing live with the caller, which multiplies a source
//! signal by the returned vectors.
//!
//! ## Usage
//!
//! ```rust
//! use ambi_coeffs::{encode, spread_coefficients, AmbisonicOrder};
//!
//! let order = AmbisonicOrder::THIRD;
//! let gains = encode(0.0, 0.0, order)?;
//! let blur = spread_coefficients(0.3, 0.5, order)?;
//! assert_eq!(gains.len(), blur.len());
//! # Ok::<(), ambi_coeffs::SpatialError>(())
//! ```

pub mod config;
pub mod direction;
pub mod encoder;
pub mod format;
pub mod harmonics;
pub mod order;
pub mod spread;
pub mod validation;

mod error;

pub use config::EncoderConfig;
pub use direction::Direction;
pub use encoder::{encode, encode_batch, encode_direction};
pub use error::{SpatialError, SpatialResult};
pub use format::{
    convert_first_order, reindex_acn_to_fuma, reindex_fuma_to_acn, renormalize_fuma_to_sn3d,
    renormalize_sn3d_to_fuma, AmbisonicFormat, ChannelOrdering, Normalization,
};
pub use harmonics::{harmonic, normalization};
pub use order::{
    acn_index, acn_to_order_degree, channel_count, degrees, AmbisonicOrder, MAX_ORDER,
    MAX_STABLE_ORDER,
};
pub use spread::{spread_coefficients, SpreadParams};
