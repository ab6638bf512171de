//! Sparse 3-D coverage arrays in coordinate (COO) form.
//!
//! N geometries against a large grid make a dense result infeasible;
//! only (geometry, y, x) triples where a geometry's footprint touches a
//! cell are stored. Every other entry is an implicit fill value of 0.

use ndarray::Array3;

use crate::error::{CoverageError, Result};
use crate::types::CoverageDtype;

/// Stored values of a coverage array, typed by weighting mode.
#[derive(Debug, Clone, PartialEq)]
pub enum CoverageData {
    /// Intersection flags ("none" weighting).
    U8(Vec<u8>),
    /// Fractions or areas (every other weighting).
    F64(Vec<f64>),
}

impl CoverageData {
    /// An empty value vector of the given dtype with reserved capacity.
    pub fn with_capacity(dtype: CoverageDtype, capacity: usize) -> Self {
        match dtype {
            CoverageDtype::U8 => Self::U8(Vec::with_capacity(capacity)),
            CoverageDtype::F64 => Self::F64(Vec::with_capacity(capacity)),
        }
    }

    /// The dtype of the stored values.
    pub fn dtype(&self) -> CoverageDtype {
        match self {
            Self::U8(_) => CoverageDtype::U8,
            Self::F64(_) => CoverageDtype::F64,
        }
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        match self {
            Self::U8(v) => v.len(),
            Self::F64(v) => v.len(),
        }
    }

    /// Whether no values are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a value, casting to the stored dtype.
    pub fn push(&mut self, value: f64) {
        match self {
            Self::U8(v) => v.push(value as u8),
            Self::F64(v) => v.push(value),
        }
    }

    /// Read a stored value back as f64.
    pub fn get(&self, index: usize) -> f64 {
        match self {
            Self::U8(v) => f64::from(v[index]),
            Self::F64(v) => v[index],
        }
    }
}

/// One stored entry of a coverage array, with global indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CooEntry {
    pub geometry: usize,
    pub y: usize,
    pub x: usize,
    pub value: f64,
}

/// A 3-D sparse array over (geometry, y, x) with fill value 0.
///
/// Index vectors are parallel to the value vector and grouped by
/// ascending geometry index; the constructors enforce this rather than
/// trusting the overlay engine's emission order.
#[derive(Debug, Clone)]
pub struct CooArray {
    shape: (usize, usize, usize),
    geometry_idx: Vec<usize>,
    y_idx: Vec<usize>,
    x_idx: Vec<usize>,
    data: CoverageData,
}

impl CooArray {
    /// Build from parallel index/value vectors already grouped by
    /// ascending geometry index.
    ///
    /// Returns [`CoverageError::UnsortedEngineOutput`] if the grouping
    /// precondition does not hold, and an engine error if the vectors
    /// are not parallel.
    pub fn from_sorted_parts(
        shape: (usize, usize, usize),
        geometry_idx: Vec<usize>,
        y_idx: Vec<usize>,
        x_idx: Vec<usize>,
        data: CoverageData,
    ) -> Result<Self> {
        let nnz = geometry_idx.len();
        if y_idx.len() != nnz || x_idx.len() != nnz || data.len() != nnz {
            return Err(CoverageError::engine(format!(
                "mismatched sparse vectors: {} geometry, {} y, {} x, {} values",
                nnz,
                y_idx.len(),
                x_idx.len(),
                data.len()
            )));
        }
        if geometry_idx.windows(2).any(|w| w[0] > w[1]) {
            return Err(CoverageError::UnsortedEngineOutput);
        }
        debug_assert!(geometry_idx.iter().all(|&g| g < shape.0));
        debug_assert!(y_idx.iter().all(|&y| y < shape.1));
        debug_assert!(x_idx.iter().all(|&x| x < shape.2));

        Ok(Self {
            shape,
            geometry_idx,
            y_idx,
            x_idx,
            data,
        })
    }

    /// Build from unsorted entries, sorting by (geometry, y, x).
    pub fn from_entries(
        shape: (usize, usize, usize),
        dtype: CoverageDtype,
        mut entries: Vec<CooEntry>,
    ) -> Self {
        entries.sort_unstable_by_key(|e| (e.geometry, e.y, e.x));

        let mut geometry_idx = Vec::with_capacity(entries.len());
        let mut y_idx = Vec::with_capacity(entries.len());
        let mut x_idx = Vec::with_capacity(entries.len());
        let mut data = CoverageData::with_capacity(dtype, entries.len());
        for entry in &entries {
            geometry_idx.push(entry.geometry);
            y_idx.push(entry.y);
            x_idx.push(entry.x);
            data.push(entry.value);
        }

        Self {
            shape,
            geometry_idx,
            y_idx,
            x_idx,
            data,
        }
    }

    /// A zero-size array of the given dtype.
    ///
    /// Serves as the "meta" prototype describing the result type of a
    /// chunked computation without executing any block.
    pub fn empty(shape: (usize, usize, usize), dtype: CoverageDtype) -> Self {
        Self {
            shape,
            geometry_idx: Vec::new(),
            y_idx: Vec::new(),
            x_idx: Vec::new(),
            data: CoverageData::with_capacity(dtype, 0),
        }
    }

    /// Array shape as (geometries, y cells, x cells).
    pub fn shape(&self) -> (usize, usize, usize) {
        self.shape
    }

    /// Value dtype.
    pub fn dtype(&self) -> CoverageDtype {
        self.data.dtype()
    }

    /// Number of stored (non-fill) entries.
    pub fn nnz(&self) -> usize {
        self.geometry_idx.len()
    }

    /// Value at a triple, resolving unstored entries to the fill value 0.
    pub fn get(&self, geometry: usize, y: usize, x: usize) -> f64 {
        for i in 0..self.nnz() {
            if self.geometry_idx[i] == geometry && self.y_idx[i] == y && self.x_idx[i] == x {
                return self.data.get(i);
            }
        }
        0.0
    }

    /// Iterate over stored entries in storage order.
    pub fn iter(&self) -> impl Iterator<Item = CooEntry> + '_ {
        (0..self.nnz()).map(move |i| CooEntry {
            geometry: self.geometry_idx[i],
            y: self.y_idx[i],
            x: self.x_idx[i],
            value: self.data.get(i),
        })
    }

    /// Materialize the dense equivalent (for verification and small
    /// results only).
    pub fn to_dense(&self) -> Array3<f64> {
        let mut dense = Array3::zeros([self.shape.0, self.shape.1, self.shape.2]);
        for entry in self.iter() {
            dense[[entry.geometry, entry.y, entry.x]] = entry.value;
        }
        dense
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_sorted_parts() {
        let mut data = CoverageData::with_capacity(CoverageDtype::F64, 3);
        for v in [0.5, 1.0, 0.25] {
            data.push(v);
        }
        let coo =
            CooArray::from_sorted_parts((2, 3, 3), vec![0, 0, 1], vec![0, 1, 2], vec![1, 2, 0], data)
                .unwrap();
        assert_eq!(coo.nnz(), 3);
        assert!((coo.get(0, 0, 1) - 0.5).abs() < f64::EPSILON);
        assert!((coo.get(1, 2, 0) - 0.25).abs() < f64::EPSILON);
        assert!((coo.get(1, 1, 1) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_unsorted_geometry_order() {
        let mut data = CoverageData::with_capacity(CoverageDtype::F64, 2);
        data.push(1.0);
        data.push(1.0);
        let result =
            CooArray::from_sorted_parts((2, 2, 2), vec![1, 0], vec![0, 0], vec![0, 0], data);
        assert!(matches!(result, Err(CoverageError::UnsortedEngineOutput)));
    }

    #[test]
    fn test_rejects_mismatched_vectors() {
        let data = CoverageData::with_capacity(CoverageDtype::F64, 0);
        let result = CooArray::from_sorted_parts((1, 1, 1), vec![0], vec![0], vec![0], data);
        assert!(matches!(result, Err(CoverageError::Engine(_))));
    }

    #[test]
    fn test_from_entries_sorts() {
        let entries = vec![
            CooEntry {
                geometry: 1,
                y: 0,
                x: 0,
                value: 2.0,
            },
            CooEntry {
                geometry: 0,
                y: 1,
                x: 1,
                value: 1.0,
            },
        ];
        let coo = CooArray::from_entries((2, 2, 2), CoverageDtype::F64, entries);
        let collected: Vec<usize> = coo.iter().map(|e| e.geometry).collect();
        assert_eq!(collected, vec![0, 1]);
    }

    #[test]
    fn test_u8_dtype_round_trip() {
        let mut data = CoverageData::with_capacity(CoverageDtype::U8, 1);
        data.push(1.0);
        let coo =
            CooArray::from_sorted_parts((1, 1, 1), vec![0], vec![0], vec![0], data).unwrap();
        assert_eq!(coo.dtype(), CoverageDtype::U8);
        assert!((coo.get(0, 0, 0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_to_dense() {
        let mut data = CoverageData::with_capacity(CoverageDtype::F64, 1);
        data.push(0.75);
        let coo =
            CooArray::from_sorted_parts((1, 2, 2), vec![0], vec![1], vec![0], data).unwrap();
        let dense = coo.to_dense();
        assert!((dense[[0, 1, 0]] - 0.75).abs() < f64::EPSILON);
        assert!((dense[[0, 0, 0]] - 0.0).abs() < f64::EPSILON);
        assert_eq!(dense.iter().filter(|&&v| v != 0.0).count(), 1);
    }

    #[test]
    fn test_empty_meta() {
        let meta = CooArray::empty((0, 0, 0), CoverageDtype::U8);
        assert_eq!(meta.nnz(), 0);
        assert_eq!(meta.dtype(), CoverageDtype::U8);
    }
}
