//! Mock overlay engines with predictable behavior.

use geo::BoundingRect;
use raster_coverage::{
    CoverageError, CoverageRequest, CoverageWeight, FeatureCoverage, OverlayEngine, Result,
};

/// A deterministic overlay engine for axis-aligned rectangle geometries.
///
/// Coverage is computed as the exact intersection of each geometry's
/// bounding rectangle with every cell of the raster block, so results
/// are exact for rectangles and a rectangular approximation for
/// everything else. Row 0 of the block is the top of the raster
/// (`ymax` side), matching the descending-y raster convention.
///
/// Spherical area weightings are treated as cartesian areas: this is a
/// test double, not a geodesic implementation. Square-kilometer mode
/// divides by 1e6. The traversal strategy hint is ignored.
#[derive(Debug, Default)]
pub struct RectCoverageEngine;

impl OverlayEngine for RectCoverageEngine {
    fn exact_coverage(&self, request: &CoverageRequest<'_>) -> Result<Vec<FeatureCoverage>> {
        let raster = request.raster;
        let (rows, cols) = raster.shape;
        let (cell_w, cell_h) = raster.cell_size();
        let cell_area = cell_w * cell_h;
        let bounds = raster.bounds;

        let mut out = Vec::with_capacity(request.geometries.len());
        for geometry in request.geometries.geometries() {
            let mut row_result = FeatureCoverage::default();
            if let Some(rect) = geometry.bounding_rect() {
                let (gxmin, gymin) = (rect.min().x, rect.min().y);
                let (gxmax, gymax) = (rect.max().x, rect.max().y);

                // Cell ids ascend row-major, so entries stay sorted.
                for row in 0..rows {
                    let cell_ymax = bounds.ymax - row as f64 * cell_h;
                    let cell_ymin = cell_ymax - cell_h;
                    let dy = gymax.min(cell_ymax) - gymin.max(cell_ymin);
                    if dy <= 0.0 {
                        continue;
                    }
                    for col in 0..cols {
                        let cell_xmin = bounds.xmin + col as f64 * cell_w;
                        let cell_xmax = cell_xmin + cell_w;
                        let dx = gxmax.min(cell_xmax) - gxmin.max(cell_xmin);
                        if dx <= 0.0 {
                            continue;
                        }

                        let area = dx * dy;
                        let value = match request.coverage_weight {
                            CoverageWeight::Fraction => area / cell_area,
                            CoverageWeight::None => 1.0,
                            CoverageWeight::AreaCartesian | CoverageWeight::AreaSphericalM2 => {
                                area
                            }
                            CoverageWeight::AreaSphericalKm2 => area / 1e6,
                        };
                        row_result.cell_ids.push((row * cols + col) as u64);
                        row_result.coverage.push(value);
                    }
                }
            }
            out.push(row_result);
        }
        Ok(out)
    }
}

/// An engine that fails every request, for error-propagation tests.
#[derive(Debug)]
pub struct FailingEngine(pub &'static str);

impl OverlayEngine for FailingEngine {
    fn exact_coverage(&self, _request: &CoverageRequest<'_>) -> Result<Vec<FeatureCoverage>> {
        Err(CoverageError::engine(self.0))
    }
}

/// An engine that panics when called, to prove usage errors fire first.
#[derive(Debug)]
pub struct PanickingEngine;

impl OverlayEngine for PanickingEngine {
    fn exact_coverage(&self, _request: &CoverageRequest<'_>) -> Result<Vec<FeatureCoverage>> {
        panic!("overlay engine must not be called for this input");
    }
}
