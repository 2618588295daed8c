use crate::error::{CritError, Result};
use crate::point::{Point, MAX_DIMS};
use ndarray::{Array2, ArrayView2};
use std::ops::Index;

/// An ordered, non-empty sequence of points sharing one dimensionality.
///
/// The position of a point in the dataset is its identity for cluster
/// assignments. A dataset is never mutated once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    points: Vec<Point>,
    dims: usize,
}

impl Dataset {
    /// Build a dataset from points.
    ///
    /// # Errors
    ///
    /// - [`CritError::EmptyDataset`] if `points` is empty
    /// - [`CritError::InvalidDimensions`] if any point differs from the first
    pub fn new(points: Vec<Point>) -> Result<Self> {
        let dims = points.first().ok_or(CritError::EmptyDataset)?.dims();

        if let Some(bad) = points.iter().find(|p| p.dims() != dims) {
            return Err(CritError::InvalidDimensions {
                expected: dims,
                found: bad.dims(),
            });
        }

        Ok(Self { points, dims })
    }

    /// Build a dataset from a matrix of shape (n_samples, n_features).
    ///
    /// # Errors
    ///
    /// Returns [`CritError::UnsupportedDimensionality`] unless the matrix has
    /// 1 to 4 columns, and [`CritError::EmptyDataset`] if it has no rows.
    pub fn from_array(data: &ArrayView2<f64>) -> Result<Self> {
        let n_features = data.ncols();
        if n_features == 0 || n_features > MAX_DIMS {
            return Err(CritError::UnsupportedDimensionality(n_features));
        }

        let points = data
            .outer_iter()
            .map(|row| Point::new(&row.to_vec()))
            .collect::<Result<Vec<_>>>()?;

        Self::new(points)
    }

    /// Build a dataset by chunking a flat stream of values into points of
    /// `dims` components. A trailing partial chunk is dropped.
    pub fn from_values(values: &[f64], dims: usize) -> Result<Self> {
        if dims == 0 || dims > MAX_DIMS {
            return Err(CritError::UnsupportedDimensionality(dims));
        }

        let points = values
            .chunks_exact(dims)
            .map(Point::new)
            .collect::<Result<Vec<_>>>()?;

        Self::new(points)
    }

    /// Copy the dataset into a matrix of shape (n_samples, dims).
    pub fn to_array(&self) -> Array2<f64> {
        let mut out = Array2::zeros((self.points.len(), self.dims));
        for (i, p) in self.points.iter().enumerate() {
            for (j, &c) in p.components().iter().enumerate() {
                out[[i, j]] = c;
            }
        }
        out
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a dataset holds at least one point.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Component count shared by every point.
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// The points in dataset order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }
}

impl Index<usize> for Dataset {
    type Output = Point;

    fn index(&self, index: usize) -> &Point {
        &self.points[index]
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
