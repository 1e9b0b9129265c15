// src/pipeline/config.rs

use crate::error::{PartitionError, PartitionResult};

/// Scale factor applied to the input extent diagonal when the capping
/// radius is resolved automatically.
pub const CAPPING_SAFETY_FACTOR: f64 = 10.0;

/// How far the unbounded rays of open cells reach before they are capped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CappingRadius {
    /// Diagonal of the combined sites-and-territory extent times
    /// `CAPPING_SAFETY_FACTOR`; deterministic for identical input.
    Auto,
    /// Explicit radius in CRS units. Rejected at run time when it does not
    /// clear the extent diagonal, because a short radius would silently
    /// truncate hull cells.
    Fixed(f64),
}

/// Tuning knobs for one partition run.
#[derive(Debug, Clone)]
pub struct PartitionConfig {
    /// Outward buffer applied to the territory before clipping, in CRS
    /// units. The default of 10 km assumes a metre-based projected CRS;
    /// `0.0` disables buffering.
    pub buffer_distance: f64,
    /// Cap distance for unbounded cells.
    pub capping_radius: CappingRadius,
    /// Merge all cells of an owner into one record.
    pub dissolve: bool,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            buffer_distance: 10_000.0,
            capping_radius: CappingRadius::Auto,
            dissolve: false,
        }
    }
}

impl PartitionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_buffer_distance(mut self, distance: f64) -> Self {
        self.buffer_distance = distance;
        self
    }

    pub fn with_capping_radius(mut self, radius: CappingRadius) -> Self {
        self.capping_radius = radius;
        self
    }

    pub fn with_dissolve(mut self, dissolve: bool) -> Self {
        self.dissolve = dissolve;
        self
    }

    pub fn validate(&self) -> PartitionResult<()> {
        if !self.buffer_distance.is_finite() || self.buffer_distance < 0.0 {
            return Err(PartitionError::InvalidConfiguration {
                message: format!(
                    "buffer distance must be finite and non-negative, got {}",
                    self.buffer_distance
                ),
            });
        }
        if let CappingRadius::Fixed(radius) = self.capping_radius {
            if !radius.is_finite() || radius <= 0.0 {
                return Err(PartitionError::InvalidConfiguration {
                    message: format!("capping radius must be finite and positive, got {}", radius),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PartitionConfig::default();
        assert_eq!(config.buffer_distance, 10_000.0);
        assert_eq!(config.capping_radius, CappingRadius::Auto);
        assert!(!config.dissolve);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_chain() {
        let config = PartitionConfig::new()
            .with_buffer_distance(500.0)
            .with_capping_radius(CappingRadius::Fixed(2e5))
            .with_dissolve(true);
        assert_eq!(config.buffer_distance, 500.0);
        assert_eq!(config.capping_radius, CappingRadius::Fixed(2e5));
        assert!(config.dissolve);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_negative_buffer_rejected() {
        let config = PartitionConfig::new().with_buffer_distance(-1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_finite_buffer_rejected() {
        let config = PartitionConfig::new().with_buffer_distance(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_fixed_radius_rejected() {
        let config = PartitionConfig::new().with_capping_radius(CappingRadius::Fixed(0.0));
        assert!(config.validate().is_err());
    }
}
