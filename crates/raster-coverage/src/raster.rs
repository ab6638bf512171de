//! Virtual raster descriptors derived from coordinate axes.

use ndarray::Array2;

use crate::axis::CoordinateAxis;

/// Spatial bounds of a raster, in the units of its CRS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterBounds {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl RasterBounds {
    /// Width of the bounds.
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// Height of the bounds.
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }
}

/// A virtual raster consumable by the overlay engine.
///
/// Only the cell grid matters for coverage computation: the descriptor
/// carries a bounding box, a shape, and an optional CRS. The payload is
/// a constant so the engine sees a fully valid raster.
#[derive(Debug, Clone)]
pub struct RasterSource {
    /// Grid shape as (rows, cols) = (y cells, x cells).
    pub shape: (usize, usize),
    /// Spatial bounds, extrapolated half a cell beyond the boundary centers.
    pub bounds: RasterBounds,
    /// CRS as well-known text, if known.
    pub srs_wkt: Option<String>,
}

impl RasterSource {
    /// Build a virtual raster from an x/y cell-center axis pair.
    ///
    /// The bounding box extends half the boundary cell width beyond the
    /// first/last centers on each side. For y the half-widths are taken
    /// as absolute values and swapped when the axis is descending, so
    /// the extents stay correctly oriented regardless of axis direction.
    ///
    /// Both axes must have at least 2 values; the chunk dispatcher
    /// guarantees this before slicing blocks.
    pub fn from_axes(x: &CoordinateAxis, y: &CoordinateAxis, srs_wkt: Option<&str>) -> Self {
        debug_assert!(x.len() >= 2, "x axis needs >= 2 cell centers");
        debug_assert!(y.len() >= 2, "y axis needs >= 2 cell centers");

        let dx0 = x.half_spacing_start();
        let dx1 = x.half_spacing_end();
        let mut dy0 = y.half_spacing_start().abs();
        let mut dy1 = y.half_spacing_end().abs();
        if y.is_descending() {
            std::mem::swap(&mut dy0, &mut dy1);
        }

        Self {
            shape: (y.len(), x.len()),
            bounds: RasterBounds {
                xmin: x.min() - dx0,
                xmax: x.max() + dx1,
                ymin: y.min() - dy0,
                ymax: y.max() + dy1,
            },
            srs_wkt: srs_wkt.map(str::to_owned),
        }
    }

    /// Number of rows (y cells).
    pub fn height(&self) -> usize {
        self.shape.0
    }

    /// Number of columns (x cells).
    pub fn width(&self) -> usize {
        self.shape.1
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.shape.0 * self.shape.1
    }

    /// Cell size as (width, height) in CRS units.
    pub fn cell_size(&self) -> (f64, f64) {
        (
            self.bounds.width() / self.shape.1 as f64,
            self.bounds.height() / self.shape.0 as f64,
        )
    }

    /// The constant payload backing the virtual raster.
    ///
    /// Cell values are irrelevant to coverage computation; engines that
    /// need a concrete band can materialize this all-ones array.
    pub fn constant_payload(&self) -> Array2<u8> {
        Array2::ones(self.shape)
    }

    /// Convert a row-major linear cell id to a (row, col) pair.
    pub fn unravel(&self, cell_id: usize) -> (usize, usize) {
        (cell_id / self.shape.1, cell_id % self.shape.1)
    }
}
