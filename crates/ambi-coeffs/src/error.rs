//! Error types for Ambisonics coefficient generation

use thiserror::Error;

/// Ambisonics error types
#[derive(Error, Debug)]
pub enum SpatialError {
    /// Order is not an integer in `0..=MAX_ORDER`
    #[error("Invalid Ambisonic order: {value} (expected an integer in 0..=2147483647)")]
    InvalidOrder { value: f64 },

    /// Degree outside `-order..=order`
    #[error("Invalid Ambisonic degree: {degree} (expected |degree| <= {order})")]
    InvalidDegree { degree: i64, order: i64 },

    /// Angle is NaN or infinite
    #[error("Invalid angle: {0} (expected a finite number of radians)")]
    InvalidAngle(f64),

    /// Spread parameter outside the unit interval
    #[error("Invalid spread coefficient: {0} (expected a real number in [0.0, 1.0])")]
    InvalidSpread(f64),

    /// Wrong container shape or rank
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Converter called on a buffer that is not first order
    #[error("Unsupported channel layout: expected {expected} channels, got {got}")]
    UnsupportedChannelLayout { expected: usize, got: usize },

    /// Configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl SpatialError {
    /// True for errors caused by out-of-range caller input.
    pub fn is_validation(&self) -> bool {
        !matches!(self, SpatialError::Config(_))
    }
}

/// Result type for Ambisonics operations
pub type SpatialResult<T> = Result<T, SpatialError>;
