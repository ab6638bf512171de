//! The labeled coverage output artifact.

use std::collections::BTreeMap;

use geo::Geometry;

use crate::grid::SpatialRef;
use crate::sparse::CooArray;

/// Coordinates attached to a coverage output.
#[derive(Debug, Clone)]
pub struct CoverageCoords {
    /// x cell-center values, verbatim from the source object.
    pub x: Vec<f64>,
    /// y cell-center values, verbatim from the source object.
    pub y: Vec<f64>,
    /// Whether the source x coordinate carried an index.
    pub x_indexed: bool,
    /// Whether the source y coordinate carried an index.
    pub y_indexed: bool,
    /// The geometry sequence, one entry per feature.
    pub geometry: Vec<Geometry<f64>>,
    /// The spatial-reference marker from the source object.
    pub spatial_ref: SpatialRef,
}

/// A labeled 3-D sparse coverage array.
///
/// Dimensions are (geometry, ydim, xdim); the name and attributes
/// derive from the weighting mode. Constructed once at the end of the
/// pipeline and never mutated.
#[derive(Debug, Clone)]
pub struct CoverageArray {
    /// Output name: "coverage", or "area" for area weightings.
    pub name: String,
    /// Dimension names, in (geometry, y, x) order.
    pub dims: [String; 3],
    /// The sparse data, globally indexed.
    pub data: CooArray,
    /// Attached coordinates.
    pub coords: CoverageCoords,
    /// `long_name` / `units` attributes, when the weighting defines them.
    pub attrs: BTreeMap<String, String>,
}

impl CoverageArray {
    /// Number of stored (non-fill) entries.
    pub fn nnz(&self) -> usize {
        self.data.nnz()
    }

    /// Array shape as (geometries, y cells, x cells).
    pub fn shape(&self) -> (usize, usize, usize) {
        self.data.shape()
    }

    /// Look up an attribute.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }
}
