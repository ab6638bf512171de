//! Single-block coverage computation.

use crate::axis::CoordinateAxis;
use crate::engine::{CoverageRequest, OverlayEngine};
use crate::error::{CoverageError, Result};
use crate::geometry::GeometryTable;
use crate::raster::RasterSource;
use crate::sparse::{CooArray, CoverageData};
use crate::types::{CoverageWeight, Strategy};

/// Compute the sparse coverage of one in-memory raster block against
/// one in-memory geometry set.
///
/// The overlay engine is invoked once for the whole geometry set. Its
/// per-geometry cell lists are unraveled row-major against the block
/// shape and packed into a 3-D COO array of shape
/// `(geometries, y cells, x cells)`. Geometries intersecting no cell
/// contribute no entries.
pub fn block_coverage(
    x: &CoordinateAxis,
    y: &CoordinateAxis,
    geometries: &GeometryTable,
    engine: &dyn OverlayEngine,
    coverage_weight: CoverageWeight,
    strategy: Strategy,
) -> Result<CooArray> {
    geometries.ensure_single_geometry_column()?;

    let raster = RasterSource::from_axes(x, y, geometries.crs_wkt());
    let rows = engine.exact_coverage(&CoverageRequest {
        raster: &raster,
        geometries,
        coverage_weight,
        strategy,
    })?;

    if rows.len() != geometries.len() {
        return Err(CoverageError::engine(format!(
            "engine returned {} rows for {} geometries",
            rows.len(),
            geometries.len()
        )));
    }

    let nnz: usize = rows.iter().map(|row| row.len()).sum();
    let mut geometry_idx = Vec::with_capacity(nnz);
    let mut y_idx = Vec::with_capacity(nnz);
    let mut x_idx = Vec::with_capacity(nnz);
    let mut data = CoverageData::with_capacity(coverage_weight.dtype(), nnz);

    for (i, row) in rows.iter().enumerate() {
        if row.is_empty() {
            continue;
        }
        if row.coverage.len() != row.cell_ids.len() {
            return Err(CoverageError::engine(format!(
                "geometry {} has {} cell ids but {} coverage values",
                i,
                row.cell_ids.len(),
                row.coverage.len()
            )));
        }
        for (&cell_id, &value) in row.cell_ids.iter().zip(&row.coverage) {
            let (cell_y, cell_x) = raster.unravel(cell_id as usize);
            geometry_idx.push(i);
            y_idx.push(cell_y);
            x_idx.push(cell_x);
            data.push(value);
        }
    }

    CooArray::from_sorted_parts(
        (geometries.len(), raster.height(), raster.width()),
        geometry_idx,
        y_idx,
        x_idx,
        data,
    )
}
