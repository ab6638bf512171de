//! Block partitioning and dispatch for chunked coverage computation.

use std::ops::Range;

use rayon::prelude::*;
use tracing::debug;

use crate::axis::CoordinateAxis;
use crate::block::block_coverage;
use crate::engine::OverlayEngine;
use crate::error::{CoverageError, Result};
use crate::geometry::ChunkedGeometryTable;
use crate::sparse::CooArray;
use crate::types::{CoverageWeight, Strategy};

/// Smallest spatial chunk the overlay engine can handle: a single-cell
/// raster extent has no interior cell bounds to clip against.
pub const MIN_CHUNK_SIZE: usize = 2;

/// One block's sparse result, addressed by its global offsets along
/// (geometry, y, x).
#[derive(Debug, Clone)]
pub struct BlockResult {
    pub geometry_offset: usize,
    pub y_offset: usize,
    pub x_offset: usize,
    pub coo: CooArray,
}

/// Reject chunk layouts the overlay engine cannot process.
///
/// Runs before any block executes, so a bad layout never triggers a
/// partial computation.
pub fn validate_spatial_chunks(dim: &str, sizes: &[usize]) -> Result<()> {
    for &size in sizes {
        if size < MIN_CHUNK_SIZE {
            return Err(CoverageError::chunk_too_small(dim, size));
        }
    }
    Ok(())
}

/// Zero-size prototype describing the dtype of a chunked result without
/// executing any block.
pub fn empty_meta(coverage_weight: CoverageWeight) -> CooArray {
    CooArray::empty((0, 0, 0), coverage_weight.dtype())
}

fn chunk_ranges(sizes: &[usize]) -> Vec<Range<usize>> {
    let mut ranges = Vec::with_capacity(sizes.len());
    let mut start = 0;
    for &size in sizes {
        ranges.push(start..start + size);
        start += size;
    }
    ranges
}

/// Partition a chunked problem into (geometry chunk × y chunk × x chunk)
/// blocks and compute each block independently.
///
/// Blocks are pure functions of their block-local inputs; scheduling is
/// delegated to the rayon thread pool and carries no ordering
/// dependency. The first block error aborts the computation and
/// propagates to the caller.
pub fn dispatch_coverage(
    x: &CoordinateAxis,
    x_chunks: &[usize],
    y: &CoordinateAxis,
    y_chunks: &[usize],
    geometries: &ChunkedGeometryTable,
    engine: &dyn OverlayEngine,
    coverage_weight: CoverageWeight,
    strategy: Strategy,
) -> Result<Vec<BlockResult>> {
    validate_spatial_chunks("x", x_chunks)?;
    validate_spatial_chunks("y", y_chunks)?;

    let x_ranges = chunk_ranges(x_chunks);
    let y_ranges = chunk_ranges(y_chunks);
    let geometry_ranges = chunk_ranges(&geometries.chunk_sizes());

    let mut tasks = Vec::with_capacity(geometry_ranges.len() * y_ranges.len() * x_ranges.len());
    for (gi, g_range) in geometry_ranges.iter().enumerate() {
        for y_range in &y_ranges {
            for x_range in &x_ranges {
                tasks.push((gi, g_range.start, y_range.clone(), x_range.clone()));
            }
        }
    }

    debug!(
        blocks = tasks.len(),
        geometry_chunks = geometry_ranges.len(),
        y_chunks = y_ranges.len(),
        x_chunks = x_ranges.len(),
        "dispatching coverage blocks"
    );

    tasks
        .into_par_iter()
        .map(|(gi, geometry_offset, y_range, x_range)| {
            let block_x = x.slice(x_range.clone());
            let block_y = y.slice(y_range.clone());
            let partition = &geometries.partitions()[gi];
            let coo = block_coverage(
                &block_x,
                &block_y,
                partition,
                engine,
                coverage_weight,
                strategy,
            )?;
            Ok(BlockResult {
                geometry_offset,
                y_offset: y_range.start,
                x_offset: x_range.start,
                coo,
            })
        })
        .collect()
}
