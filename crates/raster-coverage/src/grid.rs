//! The gridded-object collaborator surface.

use std::collections::BTreeMap;

use crate::axis::CoordinateAxis;
use crate::error::{CoverageError, Result};

/// A named 1-D coordinate on a gridded object.
#[derive(Debug, Clone)]
pub struct CoordinateArray {
    values: Vec<f64>,
    chunks: Option<Vec<usize>>,
    indexed: bool,
}

impl CoordinateArray {
    /// Create an eager coordinate array.
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            chunks: None,
            indexed: false,
        }
    }

    /// Declare chunk sizes along this coordinate.
    pub fn with_chunks(mut self, chunks: Vec<usize>) -> Self {
        self.chunks = Some(chunks);
        self
    }

    /// Mark the coordinate as carrying an index.
    ///
    /// Indexed x/y coordinates are preserved verbatim on the output.
    pub fn with_index(mut self) -> Self {
        self.indexed = true;
        self
    }

    /// The coordinate values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the coordinate has no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Declared chunk sizes, if the coordinate is chunked.
    pub fn chunks(&self) -> Option<&[usize]> {
        self.chunks.as_deref()
    }

    /// Whether the coordinate carries an index.
    pub fn is_indexed(&self) -> bool {
        self.indexed
    }

    /// View the coordinate as an axis of cell centers.
    pub fn as_axis(&self) -> CoordinateAxis {
        CoordinateAxis::new(self.values.clone())
    }
}

/// The spatial-reference coordinate of a gridded object.
///
/// Presence of the coordinate is what matters for output assembly; the
/// CRS itself may be null.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpatialRef {
    wkt: Option<String>,
}

impl SpatialRef {
    /// A spatial reference carrying CRS well-known text.
    pub fn from_wkt(wkt: impl Into<String>) -> Self {
        Self {
            wkt: Some(wkt.into()),
        }
    }

    /// The CRS as well-known text, if set.
    pub fn wkt(&self) -> Option<&str> {
        self.wkt.as_deref()
    }
}

/// A minimal gridded object: named coordinates, an optional spatial
/// reference, and per-coordinate chunk metadata.
///
/// This is the surface the coverage pipeline needs from a labeled-array
/// collaborator; anything satisfying it can drive the computation.
#[derive(Debug, Clone, Default)]
pub struct GriddedObject {
    coords: BTreeMap<String, CoordinateArray>,
    spatial_ref: Option<SpatialRef>,
}

impl GriddedObject {
    /// Create an empty gridded object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a coordinate.
    pub fn with_coord(mut self, name: impl Into<String>, coord: CoordinateArray) -> Self {
        self.coords.insert(name.into(), coord);
        self
    }

    /// Attach the spatial-reference coordinate.
    pub fn with_spatial_ref(mut self, spatial_ref: SpatialRef) -> Self {
        self.spatial_ref = Some(spatial_ref);
        self
    }

    /// Look up a coordinate by name.
    pub fn coord(&self, name: &str) -> Option<&CoordinateArray> {
        self.coords.get(name)
    }

    /// Look up a coordinate by name, failing if absent.
    pub fn require_coord(&self, name: &str) -> Result<&CoordinateArray> {
        self.coords
            .get(name)
            .ok_or_else(|| CoverageError::MissingCoordinate(name.to_string()))
    }

    /// The spatial-reference coordinate, if present.
    pub fn spatial_ref(&self) -> Option<&SpatialRef> {
        self.spatial_ref.as_ref()
    }

    /// The spatial-reference coordinate, failing if absent.
    pub fn require_spatial_ref(&self) -> Result<&SpatialRef> {
        self.spatial_ref
            .as_ref()
            .ok_or(CoverageError::MissingSpatialRef)
    }

    /// Whether the named coordinates are all eager (no chunk metadata).
    pub fn is_in_memory(&self, dims: &[&str]) -> bool {
        dims.iter().all(|dim| {
            self.coords
                .get(*dim)
                .map(|c| c.chunks().is_none())
                .unwrap_or(true)
        })
    }

    /// Chunk sizes for a coordinate, normalized to single-chunk form
    /// when the coordinate is eager.
    ///
    /// Fails if declared chunks do not add up to the coordinate length.
    pub fn normalized_chunks(&self, dim: &str) -> Result<Vec<usize>> {
        let coord = self.require_coord(dim)?;
        match coord.chunks() {
            None => Ok(vec![coord.len()]),
            Some(chunks) => {
                let total: usize = chunks.iter().sum();
                if total != coord.len() {
                    return Err(CoverageError::ChunkMismatch {
                        dim: dim.to_string(),
                        chunked: total,
                        len: coord.len(),
                    });
                }
                Ok(chunks.to_vec())
            }
        }
    }
}
