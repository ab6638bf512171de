//! Sparse per-geometry coverage of vector geometries over raster grids.
//!
//! This crate bridges an exact vector/raster overlay engine to labeled,
//! chunk-partitioned grids. It decides how to decompose a potentially
//! large raster × geometry problem into independent blocks, dispatches
//! each block to the engine, and reassembles the per-block sparse
//! outputs into one sparse 3-D array (geometry × y × x) with consistent
//! global indexing, coordinates, and CRS metadata.
//!
//! # Architecture
//!
//! ```text
//! coverage(obj, geometries, engine, config)
//!      │
//!      ├─► both inputs in memory?
//!      │         │
//!      │         ├─► yes: RasterSource::from_axes ─► block_coverage
//!      │         │
//!      │         └─► no:  normalize to single-chunk form
//!      │                       │
//!      │                       ▼
//!      │              dispatch_coverage (rayon, one task per
//!      │              geometry-chunk × y-chunk × x-chunk block)
//!      │                       │
//!      │                       ▼
//!      │                  merge_blocks
//!      │
//!      └─► assemble_output (coordinates, spatial_ref, name, attrs)
//! ```
//!
//! The geometric overlay itself is an external collaborator behind the
//! [`OverlayEngine`] trait; this crate implements no clipping or
//! coverage-fraction math.
//!
//! # Example
//!
//! ```ignore
//! use raster_coverage::{coverage, CoverageConfig, CoverageWeight};
//!
//! let config = CoverageConfig::default().with_weight(CoverageWeight::Fraction);
//! let result = coverage(&grid, geometries.into(), &engine, &config)?;
//! assert_eq!(result.dims[0], "geometry");
//! ```

pub mod assemble;
pub mod axis;
pub mod block;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod output;
pub mod raster;
pub mod sparse;
pub mod types;

// Re-export commonly used types at crate root
pub use config::CoverageConfig;
pub use engine::{CoverageRequest, FeatureCoverage, OverlayEngine};
pub use error::{CoverageError, Result};
pub use geometry::{ChunkedGeometryTable, GeometrySource, GeometryTable};
pub use grid::{CoordinateArray, GriddedObject, SpatialRef};
pub use output::{CoverageArray, CoverageCoords};
pub use raster::{RasterBounds, RasterSource};
pub use sparse::{CooArray, CooEntry, CoverageData};
pub use types::{CoverageDtype, CoverageWeight, Strategy};

use tracing::debug;

use crate::axis::CoordinateAxis;

/// Compute per-pixel coverage of each geometry over the grid of `obj`.
///
/// Routes to the direct path when both the gridded object and the
/// geometry collection are fully in memory; otherwise normalizes both
/// to chunked form and runs the block-partitioned path. Usage errors
/// (extra geometry columns, missing `spatial_ref`, undersized chunks)
/// are raised before any overlay-engine call.
///
/// Returns a labeled sparse array with dimensions
/// `("geometry", ydim, xdim)` named "coverage" (or "area" for area
/// weightings).
pub fn coverage(
    obj: &GriddedObject,
    geometries: GeometrySource,
    engine: &dyn OverlayEngine,
    config: &CoverageConfig,
) -> Result<CoverageArray> {
    obj.require_spatial_ref()?;
    geometries.ensure_single_geometry_column()?;

    let x_axis = require_axis(obj, &config.xdim)?;
    let y_axis = require_axis(obj, &config.ydim)?;

    let in_memory = obj.is_in_memory(&[config.xdim.as_str(), config.ydim.as_str()])
        && geometries.is_in_memory();
    debug!(
        in_memory,
        geometries = geometries.len(),
        shape_y = y_axis.len(),
        shape_x = x_axis.len(),
        weight = %config.coverage_weight,
        "computing coverage"
    );

    let (data, geometry) = if in_memory {
        let table = match &geometries {
            GeometrySource::InMemory(table) => table,
            GeometrySource::Chunked(_) => unreachable!("in-memory path takes eager tables"),
        };
        let coo = block::block_coverage(
            &x_axis,
            &y_axis,
            table,
            engine,
            config.coverage_weight,
            config.strategy,
        )?;
        (coo, table.geometries().to_vec())
    } else {
        let x_chunks = obj.normalized_chunks(&config.xdim)?;
        let y_chunks = obj.normalized_chunks(&config.ydim)?;
        let chunked = geometries.into_chunked();

        let blocks = dispatch::dispatch_coverage(
            &x_axis,
            &x_chunks,
            &y_axis,
            &y_chunks,
            &chunked,
            engine,
            config.coverage_weight,
            config.strategy,
        )?;
        let merged = assemble::merge_blocks(
            (chunked.len(), y_axis.len(), x_axis.len()),
            config.coverage_weight.dtype(),
            blocks,
        );
        let geometry = chunked.flatten().geometries().to_vec();
        (merged, geometry)
    };

    assemble::assemble_output(obj, config, geometry, data)
}

fn require_axis(obj: &GriddedObject, dim: &str) -> Result<CoordinateAxis> {
    let coord = obj.require_coord(dim)?;
    if coord.len() < 2 {
        return Err(CoverageError::axis_too_short(dim, coord.len()));
    }
    Ok(coord.as_axis())
}
