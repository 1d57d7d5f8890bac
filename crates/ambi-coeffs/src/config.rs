//! Encoder configuration
//!
//! ```json
//! { "order": 3, "spread": { "alpha": 0.4, "tau": 0.5 } }
//! ```

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::encoder::encode_direction;
use crate::error::{SpatialError, SpatialResult};
use crate::format::{AmbisonicFormat, ChannelOrdering, FIRST_ORDER_CHANNELS, Normalization};
use crate::order::AmbisonicOrder;
use crate::spread::SpreadParams;

/// Per-source encoding settings
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Ambisonic order of the output
    pub order: AmbisonicOrder,
    /// Spatial blur; `None` renders a point source
    pub spread: Option<SpreadParams>,
    /// Layout the caller writes into. Gains are always SN3D/ACN; first-order
    /// FuMa output is produced by converting the mixed buffer.
    pub output_format: AmbisonicFormat,
}

impl EncoderConfig {
    /// Point-source config at the given order
    pub fn new(order: AmbisonicOrder) -> Self {
        Self {
            order,
            ..Self::default()
        }
    }

    /// Builder: set spatial blur
    pub fn with_spread(mut self, spread: SpreadParams) -> Self {
        self.spread = Some(spread);
        self
    }

    /// Parse and validate a JSON config.
    ///
    /// Out-of-range values fail with the same error kinds as direct calls;
    /// only malformed JSON is reported as [`SpatialError::Config`].
    pub fn from_json(json: &str) -> SpatialResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if let Some(order) = value.get("order").and_then(serde_json::Value::as_f64) {
            AmbisonicOrder::try_from(order)?;
        }

        let config: Self = serde_json::from_value(value)?;
        config.validate()?;
        log::debug!(
            "Loaded encoder config: order {}, spread {:?}, format {:?}",
            config.order,
            config.spread,
            config.output_format
        );
        Ok(config)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> SpatialResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check field ranges. FuMa output exists at first order only.
    pub fn validate(&self) -> SpatialResult<()> {
        if let Some(spread) = &self.spread {
            spread.validate()?;
        }

        let fuma = self.output_format.normalization == Normalization::FuMa
            || self.output_format.ordering == ChannelOrdering::FuMa;
        if fuma && self.order != AmbisonicOrder::FIRST {
            return Err(SpatialError::UnsupportedChannelLayout {
                expected: FIRST_ORDER_CHANNELS,
                got: self.channel_count(),
            });
        }

        Ok(())
    }

    /// Number of channels produced
    pub fn channel_count(&self) -> usize {
        self.order.channel_count()
    }

    /// Final per-channel gains for a source at `direction`: the direction
    /// coefficients, times the spread coefficients when blur is set.
    pub fn gains(&self, direction: &Direction) -> SpatialResult<Vec<f64>> {
        let mut gains = encode_direction(direction, self.order)?;

        if let Some(spread) = &self.spread {
            let blur = spread.coefficients(self.order)?;
            for (g, b) in gains.iter_mut().zip(blur) {
                *g *= b;
            }
        }

        Ok(gains)
    }
}
