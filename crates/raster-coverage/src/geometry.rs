//! Geometry tables and their chunked representation.

use geo::Geometry;

use crate::error::{CoverageError, Result};

/// An in-memory table of vector features with a single geometry column.
///
/// One geometry per feature index, all tagged with one CRS. Extra
/// columns are tracked by name only; their presence is a usage error
/// for coverage computation.
#[derive(Debug, Clone)]
pub struct GeometryTable {
    geometries: Vec<Geometry<f64>>,
    extra_columns: Vec<String>,
    crs_wkt: Option<String>,
}

impl GeometryTable {
    /// Create a table with a single geometry column.
    pub fn new(geometries: Vec<Geometry<f64>>, crs_wkt: Option<String>) -> Self {
        Self {
            geometries,
            extra_columns: Vec::new(),
            crs_wkt,
        }
    }

    /// Attach additional column names to the table.
    ///
    /// Coverage computation rejects tables with extra columns; this
    /// exists so that rejection can be tested and reported faithfully.
    pub fn with_extra_columns(mut self, columns: Vec<String>) -> Self {
        self.extra_columns = columns;
        self
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    /// Whether the table has no features.
    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    /// The geometry column.
    pub fn geometries(&self) -> &[Geometry<f64>] {
        &self.geometries
    }

    /// The table's CRS as well-known text, if set.
    pub fn crs_wkt(&self) -> Option<&str> {
        self.crs_wkt.as_deref()
    }

    /// Fail unless the geometry column is the only column.
    pub fn ensure_single_geometry_column(&self) -> Result<()> {
        if self.extra_columns.is_empty() {
            Ok(())
        } else {
            Err(CoverageError::MultipleGeometryColumns(
                self.extra_columns.clone(),
            ))
        }
    }

    /// Extract the features in `range` as a new table.
    pub fn slice(&self, range: std::ops::Range<usize>) -> GeometryTable {
        GeometryTable {
            geometries: self.geometries[range].to_vec(),
            extra_columns: self.extra_columns.clone(),
            crs_wkt: self.crs_wkt.clone(),
        }
    }
}

/// A geometry table partitioned along the feature index.
///
/// Partitions are independently addressable and aligned to the
/// geometry-chunk axis of the chunked coverage computation.
#[derive(Debug, Clone)]
pub struct ChunkedGeometryTable {
    partitions: Vec<GeometryTable>,
}

impl ChunkedGeometryTable {
    /// Create from pre-built partitions.
    pub fn new(partitions: Vec<GeometryTable>) -> Self {
        Self { partitions }
    }

    /// Wrap an in-memory table as a single partition.
    pub fn from_table(table: GeometryTable) -> Self {
        Self {
            partitions: vec![table],
        }
    }

    /// Split an in-memory table into partitions of at most `chunk_size`
    /// features.
    pub fn from_table_chunked(table: GeometryTable, chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "chunk_size must be positive");
        let len = table.len();
        let mut partitions = Vec::new();
        let mut start = 0;
        while start < len {
            let end = (start + chunk_size).min(len);
            partitions.push(table.slice(start..end));
            start = end;
        }
        if partitions.is_empty() {
            partitions.push(table);
        }
        Self { partitions }
    }

    /// The partitions, in feature order.
    pub fn partitions(&self) -> &[GeometryTable] {
        &self.partitions
    }

    /// Features per partition, in order.
    pub fn chunk_sizes(&self) -> Vec<usize> {
        self.partitions.iter().map(GeometryTable::len).collect()
    }

    /// Total number of features across all partitions.
    pub fn len(&self) -> usize {
        self.partitions.iter().map(GeometryTable::len).sum()
    }

    /// Whether the table has no features.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The CRS of the table (taken from the first partition).
    pub fn crs_wkt(&self) -> Option<&str> {
        self.partitions.first().and_then(GeometryTable::crs_wkt)
    }

    /// Fail unless every partition carries only the geometry column.
    pub fn ensure_single_geometry_column(&self) -> Result<()> {
        for partition in &self.partitions {
            partition.ensure_single_geometry_column()?;
        }
        Ok(())
    }

    /// Concatenate all partitions into one in-memory table.
    pub fn flatten(&self) -> GeometryTable {
        let geometries = self
            .partitions
            .iter()
            .flat_map(|p| p.geometries().iter().cloned())
            .collect();
        GeometryTable::new(
            geometries,
            self.crs_wkt().map(str::to_owned),
        )
    }
}

/// A geometry collection in either its in-memory or chunked form.
///
/// The mode selector routes on this: both representations satisfy the
/// same slicing/chunk-boundary capability, so the chunked path treats
/// an in-memory table as a single-partition chunked one.
#[derive(Debug, Clone)]
pub enum GeometrySource {
    /// Fully materialized table.
    InMemory(GeometryTable),
    /// Partitioned table.
    Chunked(ChunkedGeometryTable),
}

impl GeometrySource {
    /// Whether the collection is fully materialized.
    pub fn is_in_memory(&self) -> bool {
        matches!(self, Self::InMemory(_))
    }

    /// Total number of features.
    pub fn len(&self) -> usize {
        match self {
            Self::InMemory(table) => table.len(),
            Self::Chunked(chunked) => chunked.len(),
        }
    }

    /// Whether the collection has no features.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fail unless the geometry column is the only column.
    pub fn ensure_single_geometry_column(&self) -> Result<()> {
        match self {
            Self::InMemory(table) => table.ensure_single_geometry_column(),
            Self::Chunked(chunked) => chunked.ensure_single_geometry_column(),
        }
    }

    /// Normalize to the chunked representation.
    pub fn into_chunked(self) -> ChunkedGeometryTable {
        match self {
            Self::InMemory(table) => ChunkedGeometryTable::from_table(table),
            Self::Chunked(chunked) => chunked,
        }
    }

    /// The flattened geometry sequence, one entry per feature.
    pub fn flat_geometries(&self) -> Vec<Geometry<f64>> {
        match self {
            Self::InMemory(table) => table.geometries().to_vec(),
            Self::Chunked(chunked) => chunked.flatten().geometries().to_vec(),
        }
    }
}

impl From<GeometryTable> for GeometrySource {
    fn from(table: GeometryTable) -> Self {
        Self::InMemory(table)
    }
}

impl From<ChunkedGeometryTable> for GeometrySource {
    fn from(chunked: ChunkedGeometryTable) -> Self {
        Self::Chunked(chunked)
    }
}
