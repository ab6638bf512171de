//! End-to-end coverage pipeline tests.
//!
//! These exercise the public `coverage` entry point over both the
//! in-memory and chunked paths, using the deterministic rectangle
//! engine from test-utils.

use raster_coverage::{
    coverage, ChunkedGeometryTable, CooArray, CoverageConfig, CoverageDtype, CoverageError,
    CoverageRequest, CoverageWeight, GeometrySource, OverlayEngine, RasterSource,
};
use raster_coverage::axis::CoordinateAxis;
use test_utils::{
    cell_square, chunked_unit_grid, geometry_table, square, unit_grid, unit_x_axis, unit_y_axis,
    FailingEngine, PanickingEngine, RectCoverageEngine,
};

fn dense_close(a: &CooArray, b: &CooArray) {
    assert_eq!(a.shape(), b.shape());
    let da = a.to_dense();
    let db = b.to_dense();
    for (va, vb) in da.iter().zip(db.iter()) {
        assert!(
            (va - vb).abs() < 1e-9,
            "dense results differ: {va} vs {vb}"
        );
    }
}

#[test]
fn test_single_cell_square_fraction() {
    // 4x4 unit grid, one square exactly covering cell (row 1, col 1).
    let grid = unit_grid(4);
    let geometries = geometry_table(vec![cell_square(1, 1, 4)]);

    let result = coverage(
        &grid,
        geometries.into(),
        &RectCoverageEngine,
        &CoverageConfig::default(),
    )
    .unwrap();

    assert_eq!(result.shape(), (1, 4, 4));
    assert_eq!(result.nnz(), 1);
    assert!((result.data.get(0, 1, 1) - 1.0).abs() < 1e-12);

    // All other 15 cells are implicit zeros, not stored entries.
    let dense = result.data.to_dense();
    assert_eq!(dense.iter().filter(|&&v| v != 0.0).count(), 1);
}

#[test]
fn test_count_invariant_matches_engine_output() {
    let grid = unit_grid(6);
    let geometries = vec![
        square(0.6, 0.7, 3.0),
        square(2.0, 2.0, 1.5),
        square(100.0, 100.0, 1.0), // off-grid, zero intersections
    ];

    // Ask the engine directly for the per-geometry counts.
    let x = CoordinateAxis::new(unit_x_axis(6));
    let y = CoordinateAxis::new(unit_y_axis(6));
    let table = geometry_table(geometries.clone());
    let raster = RasterSource::from_axes(&x, &y, table.crs_wkt());
    let rows = RectCoverageEngine
        .exact_coverage(&CoverageRequest {
            raster: &raster,
            geometries: &table,
            coverage_weight: CoverageWeight::Fraction,
            strategy: Default::default(),
        })
        .unwrap();
    let expected_nnz: usize = rows.iter().map(|r| r.len()).sum();
    assert!(expected_nnz > 0);
    assert!(rows[2].is_empty());

    let result = coverage(
        &grid,
        geometry_table(geometries).into(),
        &RectCoverageEngine,
        &CoverageConfig::default(),
    )
    .unwrap();
    assert_eq!(result.nnz(), expected_nnz);

    // Stored entries are exactly the engine-reported intersections.
    assert!(result.data.iter().all(|e| e.value > 0.0));
}

#[test]
fn test_chunk_invariance() {
    let geometries = vec![
        square(0.6, 0.7, 3.0),
        square(2.25, 1.5, 2.5),
        square(4.0, 4.0, 2.0),
    ];

    let baseline = coverage(
        &unit_grid(6),
        geometry_table(geometries.clone()).into(),
        &RectCoverageEngine,
        &CoverageConfig::default(),
    )
    .unwrap();

    for (spatial_chunk, geometry_chunk) in [(3, 1), (2, 2), (4, 3)] {
        let chunked_geoms = ChunkedGeometryTable::from_table_chunked(
            geometry_table(geometries.clone()),
            geometry_chunk,
        );
        let result = coverage(
            &chunked_unit_grid(6, spatial_chunk),
            chunked_geoms.into(),
            &RectCoverageEngine,
            &CoverageConfig::default(),
        )
        .unwrap();
        dense_close(&baseline.data, &result.data);
    }
}

#[test]
fn test_chunked_geometry_with_eager_grid_routes_chunked() {
    // One chunked input is enough to leave the in-memory path.
    let geometries =
        ChunkedGeometryTable::from_table_chunked(geometry_table(vec![cell_square(0, 0, 4)]), 1);
    let result = coverage(
        &unit_grid(4),
        geometries.into(),
        &RectCoverageEngine,
        &CoverageConfig::default(),
    )
    .unwrap();
    assert_eq!(result.nnz(), 1);
    assert!((result.data.get(0, 0, 0) - 1.0).abs() < 1e-12);
}

#[test]
fn test_weighting_dtypes() {
    let grid = unit_grid(4);
    let geometries = vec![square(0.5, 0.5, 2.0)];

    let flags = coverage(
        &grid,
        geometry_table(geometries.clone()).into(),
        &RectCoverageEngine,
        &CoverageConfig::default().with_weight(CoverageWeight::None),
    )
    .unwrap();
    assert_eq!(flags.data.dtype(), CoverageDtype::U8);
    assert!(flags.data.iter().all(|e| (e.value - 1.0).abs() < 1e-12));

    let fractions = coverage(
        &grid,
        geometry_table(geometries).into(),
        &RectCoverageEngine,
        &CoverageConfig::default(),
    )
    .unwrap();
    assert_eq!(fractions.data.dtype(), CoverageDtype::F64);
}

#[test]
fn test_area_naming_and_units() {
    let grid = unit_grid(4);
    let result = coverage(
        &grid,
        geometry_table(vec![cell_square(2, 2, 4)]).into(),
        &RectCoverageEngine,
        &CoverageConfig::default().with_weight(CoverageWeight::AreaSphericalKm2),
    )
    .unwrap();

    assert_eq!(result.name, "area");
    assert_eq!(result.attr("units"), Some("km2"));
    assert_eq!(result.attr("long_name"), Some("area_spherical"));
}

#[test]
fn test_coverage_output_metadata() {
    let grid = unit_grid(4);
    let result = coverage(
        &grid,
        geometry_table(vec![cell_square(0, 0, 4)]).into(),
        &RectCoverageEngine,
        &CoverageConfig::default(),
    )
    .unwrap();

    assert_eq!(result.name, "coverage");
    assert_eq!(
        result.dims,
        ["geometry".to_string(), "y".to_string(), "x".to_string()]
    );
    assert_eq!(result.coords.x, unit_x_axis(4));
    assert_eq!(result.coords.y, unit_y_axis(4));
    assert!(result.coords.x_indexed);
    assert!(result.coords.y_indexed);
    assert_eq!(result.coords.geometry.len(), 1);
    assert_eq!(result.coords.spatial_ref.wkt(), Some("EPSG:4326"));
    assert!(result.attrs.is_empty());
}

#[test]
fn test_custom_dimension_names() {
    let grid = raster_coverage::GriddedObject::new()
        .with_coord(
            "lon",
            raster_coverage::CoordinateArray::new(unit_x_axis(4)),
        )
        .with_coord(
            "lat",
            raster_coverage::CoordinateArray::new(unit_y_axis(4)),
        )
        .with_spatial_ref(raster_coverage::SpatialRef::from_wkt("EPSG:4326"));

    let result = coverage(
        &grid,
        geometry_table(vec![cell_square(1, 2, 4)]).into(),
        &RectCoverageEngine,
        &CoverageConfig::default().with_dims("lon", "lat"),
    )
    .unwrap();
    assert_eq!(
        result.dims,
        ["geometry".to_string(), "lat".to_string(), "lon".to_string()]
    );
    assert_eq!(result.nnz(), 1);
}

#[test]
fn test_rejects_extra_geometry_columns_before_engine_call() {
    let grid = unit_grid(4);
    let geometries = geometry_table(vec![cell_square(0, 0, 4)])
        .with_extra_columns(vec!["geom2".to_string()]);

    let result = coverage(
        &grid,
        geometries.into(),
        &PanickingEngine,
        &CoverageConfig::default(),
    );
    assert!(matches!(
        result,
        Err(CoverageError::MultipleGeometryColumns(_))
    ));
}

#[test]
fn test_rejects_missing_spatial_ref_before_computation() {
    let grid = raster_coverage::GriddedObject::new()
        .with_coord("x", raster_coverage::CoordinateArray::new(unit_x_axis(4)))
        .with_coord("y", raster_coverage::CoordinateArray::new(unit_y_axis(4)));

    let result = coverage(
        &grid,
        geometry_table(vec![cell_square(0, 0, 4)]).into(),
        &PanickingEngine,
        &CoverageConfig::default(),
    );
    assert!(matches!(result, Err(CoverageError::MissingSpatialRef)));
}

#[test]
fn test_rejects_chunk_of_size_one_before_dispatch() {
    let grid = chunked_unit_grid(5, 2); // chunks [2, 2, 1]
    let result = coverage(
        &grid,
        geometry_table(vec![cell_square(0, 0, 5)]).into(),
        &PanickingEngine,
        &CoverageConfig::default(),
    );
    assert!(matches!(
        result,
        Err(CoverageError::ChunkTooSmall { size: 1, .. })
    ));
}

#[test]
fn test_rejects_short_axis() {
    let grid = raster_coverage::GriddedObject::new()
        .with_coord("x", raster_coverage::CoordinateArray::new(vec![0.5]))
        .with_coord("y", raster_coverage::CoordinateArray::new(unit_y_axis(4)))
        .with_spatial_ref(raster_coverage::SpatialRef::from_wkt("EPSG:4326"));

    let result = coverage(
        &grid,
        geometry_table(vec![cell_square(0, 0, 4)]).into(),
        &PanickingEngine,
        &CoverageConfig::default(),
    );
    assert!(matches!(
        result,
        Err(CoverageError::AxisTooShort { len: 1, .. })
    ));
}

#[test]
fn test_engine_errors_propagate_from_chunked_path() {
    let grid = chunked_unit_grid(4, 2);
    let result = coverage(
        &grid,
        geometry_table(vec![cell_square(0, 0, 4)]).into(),
        &FailingEngine("exact overlay failed"),
        &CoverageConfig::default(),
    );
    match result {
        Err(CoverageError::Engine(msg)) => assert!(msg.contains("exact overlay failed")),
        other => panic!("expected engine error, got {other:?}"),
    }
}

#[test]
fn test_zero_intersection_geometry_is_not_an_error() {
    let grid = unit_grid(4);
    let result = coverage(
        &grid,
        geometry_table(vec![square(50.0, 50.0, 1.0)]).into(),
        &RectCoverageEngine,
        &CoverageConfig::default(),
    )
    .unwrap();
    assert_eq!(result.shape(), (1, 4, 4));
    assert_eq!(result.nnz(), 0);
}

#[test]
fn test_geometry_source_is_flattened_in_feature_order() {
    let geometries: Vec<_> = (0..4).map(|i| cell_square(i, i, 4)).collect();
    let chunked =
        ChunkedGeometryTable::from_table_chunked(geometry_table(geometries.clone()), 3);
    let result = coverage(
        &unit_grid(4),
        GeometrySource::Chunked(chunked),
        &RectCoverageEngine,
        &CoverageConfig::default(),
    )
    .unwrap();

    assert_eq!(result.coords.geometry.len(), 4);
    assert_eq!(result.coords.geometry, geometries);
    // Diagonal squares: one full-coverage cell per geometry.
    assert_eq!(result.nnz(), 4);
    for i in 0..4 {
        assert!((result.data.get(i, i, i) - 1.0).abs() < 1e-12);
    }
}
