//! Core configuration enums for coverage computation.

use serde::{Deserialize, Serialize};

/// Weighting mode applied by the overlay engine to each intersected cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageWeight {
    /// Fraction of the cell covered by the geometry, in [0, 1].
    #[default]
    Fraction,
    /// Intersection flag only (1 where the geometry touches the cell).
    None,
    /// Intersected area in the raster's planar units.
    AreaCartesian,
    /// Intersected spherical area in square meters.
    AreaSphericalM2,
    /// Intersected spherical area in square kilometers.
    AreaSphericalKm2,
}

impl CoverageWeight {
    /// The wire string passed through to the overlay engine.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fraction => "fraction",
            Self::None => "none",
            Self::AreaCartesian => "area_cartesian",
            Self::AreaSphericalM2 => "area_spherical_m2",
            Self::AreaSphericalKm2 => "area_spherical_km2",
        }
    }

    /// Parse from string (case-insensitive). Unknown strings fall back
    /// to the default weighting.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "none" => Self::None,
            "area_cartesian" => Self::AreaCartesian,
            "area_spherical_m2" => Self::AreaSphericalM2,
            "area_spherical_km2" => Self::AreaSphericalKm2,
            _ => Self::Fraction,
        }
    }

    /// Value dtype of the resulting sparse array.
    pub fn dtype(&self) -> CoverageDtype {
        match self {
            Self::None => CoverageDtype::U8,
            _ => CoverageDtype::F64,
        }
    }

    /// Name of the output array ("coverage", or "area" for area modes).
    pub fn output_name(&self) -> &'static str {
        match self {
            Self::AreaCartesian | Self::AreaSphericalM2 | Self::AreaSphericalKm2 => "area",
            _ => "coverage",
        }
    }

    /// `long_name` attribute for the output, if the mode defines one.
    pub fn long_name(&self) -> Option<&'static str> {
        match self {
            Self::AreaCartesian => Some("area_cartesian"),
            Self::AreaSphericalM2 | Self::AreaSphericalKm2 => Some("area_spherical"),
            _ => None,
        }
    }

    /// `units` attribute for the output, if the mode defines one.
    pub fn units(&self) -> Option<&'static str> {
        match self {
            Self::AreaCartesian | Self::AreaSphericalM2 => Some("m2"),
            Self::AreaSphericalKm2 => Some("km2"),
            _ => None,
        }
    }
}

impl std::fmt::Display for CoverageWeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Traversal strategy hint forwarded to the overlay engine.
///
/// This layer does not enforce the strategy; engines are free to ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Visit each feature in turn, scanning the raster per feature.
    #[default]
    FeatureSequential,
    /// Visit the raster once, testing all features per cell.
    RasterSequential,
    /// Raster-sequential traversal with engine-internal parallelism.
    RasterParallel,
}

impl Strategy {
    /// The wire string passed through to the overlay engine.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FeatureSequential => "feature-sequential",
            Self::RasterSequential => "raster-sequential",
            Self::RasterParallel => "raster-parallel",
        }
    }

    /// Parse from string (case-insensitive). Unknown strings fall back
    /// to the default strategy.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "raster-sequential" => Self::RasterSequential,
            "raster-parallel" => Self::RasterParallel,
            _ => Self::FeatureSequential,
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Value dtype of a sparse coverage array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoverageDtype {
    /// Unsigned byte, used by [`CoverageWeight::None`].
    U8,
    /// 64-bit float, used by every other weighting mode.
    F64,
}
