//! Generators for synthetic grids and geometries with predictable
//! layouts.
//!
//! The canonical test grid is unit-spaced with x ascending from 0.5 and
//! y descending to 0.5, so cell (row, col) covers exactly the unit
//! square with corners (col, n - 1 - row) and (col + 1, n - row).

use geo::{polygon, Geometry};
use raster_coverage::{CoordinateArray, GeometryTable, GriddedObject, SpatialRef};

/// Unit-spaced ascending x cell centers: 0.5, 1.5, ..., n - 0.5.
pub fn unit_x_axis(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64 + 0.5).collect()
}

/// Unit-spaced descending y cell centers: n - 0.5, ..., 1.5, 0.5.
pub fn unit_y_axis(n: usize) -> Vec<f64> {
    (0..n).rev().map(|i| i as f64 + 0.5).collect()
}

/// An n×n unit grid with a spatial reference and eager coordinates.
pub fn unit_grid(n: usize) -> GriddedObject {
    GriddedObject::new()
        .with_coord("x", CoordinateArray::new(unit_x_axis(n)).with_index())
        .with_coord("y", CoordinateArray::new(unit_y_axis(n)).with_index())
        .with_spatial_ref(SpatialRef::from_wkt("EPSG:4326"))
}

/// An n×n unit grid whose x/y coordinates are chunked.
///
/// Chunk sizes are `chunk` repeated, with a remainder chunk if `n` is
/// not a multiple.
pub fn chunked_unit_grid(n: usize, chunk: usize) -> GriddedObject {
    let chunks = chunk_sizes(n, chunk);
    GriddedObject::new()
        .with_coord(
            "x",
            CoordinateArray::new(unit_x_axis(n)).with_chunks(chunks.clone()),
        )
        .with_coord(
            "y",
            CoordinateArray::new(unit_y_axis(n)).with_chunks(chunks),
        )
        .with_spatial_ref(SpatialRef::from_wkt("EPSG:4326"))
}

/// Chunk sizes covering `n` values in chunks of at most `chunk`.
pub fn chunk_sizes(n: usize, chunk: usize) -> Vec<usize> {
    assert!(chunk > 0, "chunk must be positive");
    let mut sizes = Vec::new();
    let mut remaining = n;
    while remaining > 0 {
        let size = chunk.min(remaining);
        sizes.push(size);
        remaining -= size;
    }
    sizes
}

/// An axis-aligned square polygon with lower-left corner (x0, y0).
pub fn square(x0: f64, y0: f64, size: f64) -> Geometry<f64> {
    Geometry::Polygon(polygon![
        (x: x0, y: y0),
        (x: x0 + size, y: y0),
        (x: x0 + size, y: y0 + size),
        (x: x0, y: y0 + size),
        (x: x0, y: y0),
    ])
}

/// The unit square exactly covering cell (row, col) of an n×n unit grid.
pub fn cell_square(row: usize, col: usize, n: usize) -> Geometry<f64> {
    square(col as f64, (n - 1 - row) as f64, 1.0)
}

/// A single-column geometry table over the given geometries.
pub fn geometry_table(geometries: Vec<Geometry<f64>>) -> GeometryTable {
    GeometryTable::new(geometries, Some("EPSG:4326".to_string()))
}
