//! Merging block results and attaching output metadata.

use std::collections::BTreeMap;

use geo::Geometry;
use tracing::debug;

use crate::config::CoverageConfig;
use crate::dispatch::BlockResult;
use crate::error::Result;
use crate::grid::GriddedObject;
use crate::output::{CoverageArray, CoverageCoords};
use crate::sparse::{CooArray, CooEntry};
use crate::types::CoverageDtype;

/// Merge per-block sparse results into one globally indexed array.
///
/// Each block's local indices are re-based by the block's global
/// offsets; the merged entries are re-sorted by (geometry, y, x) so the
/// result is one logically contiguous sparse array regardless of block
/// order.
pub fn merge_blocks(
    shape: (usize, usize, usize),
    dtype: CoverageDtype,
    blocks: Vec<BlockResult>,
) -> CooArray {
    let nnz: usize = blocks.iter().map(|b| b.coo.nnz()).sum();
    debug!(blocks = blocks.len(), nnz, "merging coverage blocks");

    let mut entries = Vec::with_capacity(nnz);
    for block in &blocks {
        for entry in block.coo.iter() {
            entries.push(CooEntry {
                geometry: entry.geometry + block.geometry_offset,
                y: entry.y + block.y_offset,
                x: entry.x + block.x_offset,
                value: entry.value,
            });
        }
    }

    CooArray::from_entries(shape, dtype, entries)
}

/// Attach coordinates, naming, and attributes to a merged sparse result.
///
/// The spatial-reference requirement is validated here as well as at
/// the entry point, so the assembler stands alone.
pub fn assemble_output(
    obj: &GriddedObject,
    config: &CoverageConfig,
    geometry: Vec<Geometry<f64>>,
    data: CooArray,
) -> Result<CoverageArray> {
    let spatial_ref = obj.require_spatial_ref()?.clone();
    let x_coord = obj.require_coord(&config.xdim)?;
    let y_coord = obj.require_coord(&config.ydim)?;

    let weight = config.coverage_weight;
    let mut attrs = BTreeMap::new();
    if let Some(long_name) = weight.long_name() {
        attrs.insert("long_name".to_string(), long_name.to_string());
    }
    if let Some(units) = weight.units() {
        attrs.insert("units".to_string(), units.to_string());
    }

    Ok(CoverageArray {
        name: weight.output_name().to_string(),
        dims: [
            "geometry".to_string(),
            config.ydim.clone(),
            config.xdim.clone(),
        ],
        data,
        coords: CoverageCoords {
            x: x_coord.values().to_vec(),
            y: y_coord.values().to_vec(),
            x_indexed: x_coord.is_indexed(),
            y_indexed: y_coord.is_indexed(),
            geometry,
            spatial_ref,
        },
        attrs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoverageError;
    use crate::grid::{CoordinateArray, SpatialRef};
    use crate::sparse::CoverageData;
    use crate::types::CoverageWeight;

    fn block(
        offsets: (usize, usize, usize),
        shape: (usize, usize, usize),
        entries: &[(usize, usize, usize, f64)],
    ) -> BlockResult {
        let mut geometry_idx = Vec::new();
        let mut y_idx = Vec::new();
        let mut x_idx = Vec::new();
        let mut data = CoverageData::with_capacity(CoverageDtype::F64, entries.len());
        for &(g, y, x, v) in entries {
            geometry_idx.push(g);
            y_idx.push(y);
            x_idx.push(x);
            data.push(v);
        }
        BlockResult {
            geometry_offset: offsets.0,
            y_offset: offsets.1,
            x_offset: offsets.2,
            coo: CooArray::from_sorted_parts(shape, geometry_idx, y_idx, x_idx, data).unwrap(),
        }
    }

    #[test]
    fn test_merge_rebases_offsets() {
        let blocks = vec![
            block((0, 0, 0), (1, 2, 2), &[(0, 1, 1, 0.5)]),
            block((0, 0, 2), (1, 2, 2), &[(0, 0, 0, 0.25)]),
            block((1, 0, 0), (1, 2, 2), &[(0, 0, 1, 1.0)]),
        ];
        let merged = merge_blocks((2, 2, 4), CoverageDtype::F64, blocks);

        assert_eq!(merged.nnz(), 3);
        assert!((merged.get(0, 1, 1) - 0.5).abs() < f64::EPSILON);
        assert!((merged.get(0, 0, 2) - 0.25).abs() < f64::EPSILON);
        assert!((merged.get(1, 0, 1) - 1.0).abs() < f64::EPSILON);

        // Entries come back grouped by ascending global geometry index.
        let order: Vec<usize> = merged.iter().map(|e| e.geometry).collect();
        assert_eq!(order, vec![0, 0, 1]);
    }

    #[test]
    fn test_assemble_requires_spatial_ref() {
        let obj = GriddedObject::new()
            .with_coord("x", CoordinateArray::new(vec![0.5, 1.5]))
            .with_coord("y", CoordinateArray::new(vec![1.5, 0.5]));
        let data = CooArray::empty((0, 2, 2), CoverageDtype::F64);
        let result = assemble_output(&obj, &CoverageConfig::default(), Vec::new(), data);
        assert!(matches!(result, Err(CoverageError::MissingSpatialRef)));
    }

    #[test]
    fn test_assemble_attrs_and_name() {
        let obj = GriddedObject::new()
            .with_coord("x", CoordinateArray::new(vec![0.5, 1.5]).with_index())
            .with_coord("y", CoordinateArray::new(vec![1.5, 0.5]))
            .with_spatial_ref(SpatialRef::from_wkt("EPSG:4326"));
        let config = CoverageConfig::default().with_weight(CoverageWeight::AreaSphericalKm2);
        let data = CooArray::empty((0, 2, 2), CoverageDtype::F64);

        let output = assemble_output(&obj, &config, Vec::new(), data).unwrap();
        assert_eq!(output.name, "area");
        assert_eq!(output.attr("units"), Some("km2"));
        assert_eq!(output.attr("long_name"), Some("area_spherical"));
        assert_eq!(output.dims[0], "geometry");
        assert!(output.coords.x_indexed);
        assert!(!output.coords.y_indexed);
        assert_eq!(output.coords.spatial_ref.wkt(), Some("EPSG:4326"));
    }

    #[test]
    fn test_assemble_fraction_has_no_attrs() {
        let obj = GriddedObject::new()
            .with_coord("x", CoordinateArray::new(vec![0.5, 1.5]))
            .with_coord("y", CoordinateArray::new(vec![1.5, 0.5]))
            .with_spatial_ref(SpatialRef::default());
        let data = CooArray::empty((0, 2, 2), CoverageDtype::F64);
        let output =
            assemble_output(&obj, &CoverageConfig::default(), Vec::new(), data).unwrap();
        assert_eq!(output.name, "coverage");
        assert!(output.attrs.is_empty());
    }
}
