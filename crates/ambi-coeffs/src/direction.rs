//! Source direction on the unit sphere
//!
//! Reference system follows the right-hand rule:
//! - +X points to (azimuth 0, elevation 0)
//! - +Y points to (azimuth π/2, elevation 0)
//! - +Z points to elevation π/2

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::error::{SpatialError, SpatialResult};
use crate::validation::validate_angle;

/// Direction of a point source, in radians
///
/// Azimuth is conventionally in `[0, 2π)` and elevation in `[-π/2, π/2]`,
/// but any finite values are accepted and passed through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Direction {
    /// Horizontal angle, counter-clockwise from +X
    pub azimuth: f64,
    /// Vertical angle above the horizontal plane
    pub elevation: f64,
}

impl Direction {
    /// Create a validated direction
    pub fn new(azimuth: f64, elevation: f64) -> SpatialResult<Self> {
        Ok(Self {
            azimuth: validate_angle(azimuth)?,
            elevation: validate_angle(elevation)?,
        })
    }

    /// Create from angles in degrees
    pub fn from_degrees(azimuth: f64, elevation: f64) -> SpatialResult<Self> {
        Self::new(azimuth.to_radians(), elevation.to_radians())
    }

    /// Front (+X)
    pub fn front() -> Self {
        Self {
            azimuth: 0.0,
            elevation: 0.0,
        }
    }

    /// Direction of a Cartesian vector. Azimuth is wrapped into `[0, 2π)`.
    pub fn from_cartesian(x: f64, y: f64, z: f64) -> SpatialResult<Self> {
        let distance = (x * x + y * y + z * z).sqrt();
        if !distance.is_finite() || distance < 1e-12 {
            return Err(SpatialError::InvalidInput(format!(
                "cannot take the direction of vector ({}, {}, {})",
                x, y, z
            )));
        }

        let mut azimuth = y.atan2(x).rem_euclid(TAU);
        // rem_euclid rounds tiny negative angles up to exactly 2π
        if azimuth >= TAU {
            azimuth = 0.0;
        }
        let elevation = (z / distance).clamp(-1.0, 1.0).asin();

        Ok(Self { azimuth, elevation })
    }

    /// Unit vector `(x, y, z)` for this direction
    pub fn to_cartesian(&self) -> (f64, f64, f64) {
        let cos_el = self.elevation.cos();
        (
            cos_el * self.azimuth.cos(),
            cos_el * self.azimuth.sin(),
            self.elevation.sin(),
        )
    }

    /// Check both angles are finite
    pub fn validate(&self) -> SpatialResult<()> {
        validate_angle(self.azimuth)?;
        validate_angle(self.elevation)?;
        Ok(())
    }
}
