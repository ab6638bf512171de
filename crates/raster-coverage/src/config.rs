//! Configuration for the coverage entry point.

use serde::{Deserialize, Serialize};

use crate::types::{CoverageWeight, Strategy};

/// Configuration for a coverage computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageConfig {
    /// Name of the x dimension on the gridded object.
    pub xdim: String,

    /// Name of the y dimension on the gridded object.
    pub ydim: String,

    /// Traversal strategy hint forwarded to the overlay engine.
    pub strategy: Strategy,

    /// Weighting mode applied to each intersected cell.
    pub coverage_weight: CoverageWeight,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            xdim: "x".to_string(),
            ydim: "y".to_string(),
            strategy: Strategy::default(),
            coverage_weight: CoverageWeight::default(),
        }
    }
}

impl CoverageConfig {
    /// Set the weighting mode.
    pub fn with_weight(mut self, weight: CoverageWeight) -> Self {
        self.coverage_weight = weight;
        self
    }

    /// Set the traversal strategy hint.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the x/y dimension names.
    pub fn with_dims(mut self, xdim: impl Into<String>, ydim: impl Into<String>) -> Self {
        self.xdim = xdim.into();
        self.ydim = ydim.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CoverageConfig::default();
        assert_eq!(config.xdim, "x");
        assert_eq!(config.ydim, "y");
        assert_eq!(config.strategy, Strategy::FeatureSequential);
        assert_eq!(config.coverage_weight, CoverageWeight::Fraction);
    }

    #[test]
    fn test_builder_style() {
        let config = CoverageConfig::default()
            .with_weight(CoverageWeight::AreaSphericalKm2)
            .with_dims("lon", "lat");
        assert_eq!(config.coverage_weight, CoverageWeight::AreaSphericalKm2);
        assert_eq!(config.xdim, "lon");
        assert_eq!(config.ydim, "lat");
    }
}
