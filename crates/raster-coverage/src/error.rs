//! Error types for coverage computation.

use thiserror::Error;

/// Errors that can occur while orchestrating a coverage computation.
#[derive(Error, Debug)]
pub enum CoverageError {
    /// The geometry table carries more than the single geometry column.
    #[error("require a single geometry column, found extra columns: {0:?}")]
    MultipleGeometryColumns(Vec<String>),

    /// The gridded object does not carry a `spatial_ref` coordinate.
    #[error("gridded object must contain the `spatial_ref` coordinate")]
    MissingSpatialRef,

    /// A named coordinate is missing from the gridded object.
    #[error("gridded object has no coordinate named `{0}`")]
    MissingCoordinate(String),

    /// A coordinate axis is too short to derive cell bounds from.
    #[error("coordinate `{dim}` has length {len}, need at least 2 to derive cell bounds")]
    AxisTooShort { dim: String, len: usize },

    /// A spatial chunk of size 1 cannot be handled by the overlay engine.
    #[error("the overlay engine does not support a chunk of size {size} along `{dim}`; rechunk to at least {min}", min = crate::dispatch::MIN_CHUNK_SIZE)]
    ChunkTooSmall { dim: String, size: usize },

    /// Chunk-size metadata does not add up to the coordinate length.
    #[error("chunks along `{dim}` sum to {chunked} but the coordinate has {len} values")]
    ChunkMismatch {
        dim: String,
        chunked: usize,
        len: usize,
    },

    /// The overlay engine emitted entries out of geometry order.
    #[error("overlay engine output is not grouped by ascending geometry index")]
    UnsortedEngineOutput,

    /// The overlay engine reported a failure for a block.
    #[error("overlay engine error: {0}")]
    Engine(String),
}

impl CoverageError {
    /// Create an AxisTooShort error.
    pub fn axis_too_short(dim: impl Into<String>, len: usize) -> Self {
        Self::AxisTooShort {
            dim: dim.into(),
            len,
        }
    }

    /// Create a ChunkTooSmall error.
    pub fn chunk_too_small(dim: impl Into<String>, size: usize) -> Self {
        Self::ChunkTooSmall {
            dim: dim.into(),
            size,
        }
    }

    /// Create an Engine error.
    pub fn engine(msg: impl Into<String>) -> Self {
        Self::Engine(msg.into())
    }
}

/// Result type for coverage operations.
pub type Result<T> = std::result::Result<T, CoverageError>;
