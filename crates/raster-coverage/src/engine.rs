//! The exact overlay engine collaborator interface.

use crate::error::Result;
use crate::geometry::GeometryTable;
use crate::raster::RasterSource;
use crate::types::{CoverageWeight, Strategy};

/// One request to the overlay engine: a raster block, a geometry set,
/// and the named weighting operation.
#[derive(Debug)]
pub struct CoverageRequest<'a> {
    /// The virtual raster block to overlay.
    pub raster: &'a RasterSource,
    /// The geometries to overlay, one feature per row.
    pub geometries: &'a GeometryTable,
    /// Weighting mode for per-cell coverage values.
    pub coverage_weight: CoverageWeight,
    /// Traversal strategy hint; engines may ignore it.
    pub strategy: Strategy,
}

/// Per-geometry overlay result: intersected cells and their weights.
///
/// `cell_ids` are row-major linear cell identifiers within the request's
/// raster block; `coverage` is the parallel list of weight values. Both
/// lists are empty for geometries that intersect no cell.
#[derive(Debug, Clone, Default)]
pub struct FeatureCoverage {
    pub cell_ids: Vec<u64>,
    pub coverage: Vec<f64>,
}

impl FeatureCoverage {
    /// Number of intersected cells.
    pub fn len(&self) -> usize {
        self.cell_ids.len()
    }

    /// Whether the geometry intersected no cell.
    pub fn is_empty(&self) -> bool {
        self.cell_ids.is_empty()
    }
}

/// Exact vector-on-raster overlay engine.
///
/// Implementations perform the cell-by-cell coverage computation; this
/// crate only orchestrates blocks around them. Calls are CPU-bound and
/// synchronous; block-level parallelism is handled by the dispatcher,
/// so engines must be shareable across threads.
pub trait OverlayEngine: Send + Sync {
    /// Compute per-cell coverage for every geometry in the request.
    ///
    /// Returns exactly one [`FeatureCoverage`] row per input geometry,
    /// in feature order. Engine failures propagate unmodified; this
    /// layer performs no retry or partial-result recovery.
    fn exact_coverage(&self, request: &CoverageRequest<'_>) -> Result<Vec<FeatureCoverage>>;
}
