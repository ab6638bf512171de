//! 1-D coordinate axes of cell-center positions.

use std::ops::Range;

/// An ordered sequence of numeric cell-center positions along one
/// spatial dimension.
///
/// The axis may run ascending or descending. Values are immutable once
/// constructed; chunking produces new axes via [`CoordinateAxis::slice`].
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateAxis {
    values: Vec<f64>,
}

impl CoordinateAxis {
    /// Create an axis from cell-center values.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Number of cell centers along the axis.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the axis has no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The raw cell-center values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Minimum cell-center value.
    pub fn min(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Maximum cell-center value.
    pub fn max(&self) -> f64 {
        self.values
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Whether the first value is greater than the last.
    ///
    /// Descending y axes are the common raster convention (row 0 at the
    /// top of the image).
    pub fn is_descending(&self) -> bool {
        self.values[0] > self.values[self.values.len() - 1]
    }

    /// Half the spacing between the first two cell centers.
    ///
    /// Callers must guarantee `len() >= 2`.
    pub fn half_spacing_start(&self) -> f64 {
        (self.values[1] - self.values[0]) / 2.0
    }

    /// Half the spacing between the last two cell centers.
    ///
    /// Callers must guarantee `len() >= 2`.
    pub fn half_spacing_end(&self) -> f64 {
        let n = self.values.len();
        (self.values[n - 1] - self.values[n - 2]) / 2.0
    }

    /// Extract the sub-axis covering `range` of cell indices.
    pub fn slice(&self, range: Range<usize>) -> CoordinateAxis {
        CoordinateAxis::new(self.values[range].to_vec())
    }
}

impl From<Vec<f64>> for CoordinateAxis {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_direction() {
        let ascending = CoordinateAxis::new(vec![0.5, 1.5, 2.5]);
        let descending = CoordinateAxis::new(vec![2.5, 1.5, 0.5]);
        assert!(!ascending.is_descending());
        assert!(descending.is_descending());
    }

    #[test]
    fn test_axis_min_max() {
        let axis = CoordinateAxis::new(vec![3.5, 2.5, 1.5, 0.5]);
        assert!((axis.min() - 0.5).abs() < f64::EPSILON);
        assert!((axis.max() - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_half_spacing() {
        let axis = CoordinateAxis::new(vec![0.0, 1.0, 3.0]);
        assert!((axis.half_spacing_start() - 0.5).abs() < f64::EPSILON);
        assert!((axis.half_spacing_end() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_slice() {
        let axis = CoordinateAxis::new(vec![0.5, 1.5, 2.5, 3.5]);
        let sub = axis.slice(1..3);
        assert_eq!(sub.values(), &[1.5, 2.5]);
    }
}
