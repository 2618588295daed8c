//! Low-dimensional points and their aggregates.
//!
//! A [`Point`] stores up to [`MAX_DIMS`] components inline. Unused trailing
//! slots are always zero, so a point is `Copy` and cheap to pass to workers.

use crate::error::{CritError, Result};
use std::fmt;
use tracing::warn;

/// Largest component count a point may carry.
pub const MAX_DIMS: usize = 4;

/// An ordered tuple of 1 to 4 floating-point components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    components: [f64; MAX_DIMS],
    dims: usize,
}

/// Result of averaging a sequence of points.
///
/// `used` can be smaller than `provided` when some points did not share the
/// dimensionality of the first one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    /// The componentwise mean.
    pub point: Point,
    /// Number of points that contributed to the mean.
    pub used: usize,
    /// Number of points handed in.
    pub provided: usize,
}

impl Aggregate {
    /// Number of provided points that were skipped.
    pub fn skipped(&self) -> usize {
        self.provided - self.used
    }
}

impl Point {
    /// Create a point from its components.
    ///
    /// # Errors
    ///
    /// Returns [`CritError::UnsupportedDimensionality`] unless
    /// `1 <= components.len() <= 4`.
    pub fn new(components: &[f64]) -> Result<Self> {
        let dims = components.len();
        if dims == 0 || dims > MAX_DIMS {
            return Err(CritError::UnsupportedDimensionality(dims));
        }

        let mut storage = [0.0; MAX_DIMS];
        storage[..dims].copy_from_slice(components);
        Ok(Self {
            components: storage,
            dims,
        })
    }

    /// A one-dimensional point.
    pub fn scalar(x: f64) -> Self {
        Self {
            components: [x, 0.0, 0.0, 0.0],
            dims: 1,
        }
    }

    /// Number of components.
    #[inline]
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// The components as a slice of length `dims()`.
    #[inline]
    pub fn components(&self) -> &[f64] {
        &self.components[..self.dims]
    }

    fn check_dims(&self, other: &Point) -> Result<()> {
        if self.dims != other.dims {
            return Err(CritError::InvalidDimensions {
                expected: self.dims,
                found: other.dims,
            });
        }
        Ok(())
    }

    fn zip_with(&self, other: &Point, op: impl Fn(f64, f64) -> f64) -> Result<Point> {
        self.check_dims(other)?;
        let mut components = [0.0; MAX_DIMS];
        for (i, c) in components.iter_mut().enumerate().take(self.dims) {
            *c = op(self.components[i], other.components[i]);
        }
        Ok(Point {
            components,
            dims: self.dims,
        })
    }

    /// Elementwise sum.
    pub fn checked_add(&self, other: &Point) -> Result<Point> {
        self.zip_with(other, |a, b| a + b)
    }

    /// Elementwise difference.
    pub fn checked_sub(&self, other: &Point) -> Result<Point> {
        self.zip_with(other, |a, b| a - b)
    }

    /// Elementwise product.
    pub fn checked_mul(&self, other: &Point) -> Result<Point> {
        self.zip_with(other, |a, b| a * b)
    }

    /// Elementwise quotient. Division by a zero component follows IEEE 754.
    pub fn checked_div(&self, other: &Point) -> Result<Point> {
        self.zip_with(other, |a, b| a / b)
    }

    /// Divide every component by a scalar.
    pub fn scale_down(&self, divisor: f64) -> Point {
        let mut out = *self;
        for c in out.components.iter_mut().take(self.dims) {
            *c /= divisor;
        }
        out
    }

    /// Euclidean distance to `other`.
    ///
    /// # Errors
    ///
    /// Returns [`CritError::InvalidDimensions`] when the component counts differ.
    pub fn distance(&self, other: &Point) -> Result<f64> {
        self.check_dims(other)?;
        Ok(self.squared_distance_unchecked(other).sqrt())
    }

    /// Squared Euclidean distance without the dimensionality check.
    ///
    /// Padding slots are zero, so mismatched points silently compare as if
    /// the shorter one were zero-extended. Callers must guarantee uniform
    /// dimensionality, which [`crate::Dataset`] does.
    #[inline]
    pub(crate) fn squared_distance_unchecked(&self, other: &Point) -> f64 {
        debug_assert_eq!(self.dims, other.dims);
        self.components
            .iter()
            .zip(other.components.iter())
            .map(|(a, b)| {
                let d = a - b;
                d * d
            })
            .sum()
    }

    #[inline]
    pub(crate) fn distance_unchecked(&self, other: &Point) -> f64 {
        self.squared_distance_unchecked(other).sqrt()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.components().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, ")")
    }
}

/// Componentwise arithmetic mean of `points`.
///
/// Only points sharing the dimensionality of the first point take part;
/// the others are skipped and counted in [`Aggregate::skipped`].
/// Returns `None` for an empty slice.
pub fn mean(points: &[Point]) -> Option<Aggregate> {
    let first = points.first()?;
    let mut total = [0.0; MAX_DIMS];
    let mut used = 0usize;

    for p in points.iter().filter(|p| p.dims == first.dims) {
        for (t, c) in total.iter_mut().zip(p.components.iter()) {
            *t += c;
        }
        used += 1;
    }

    if used != points.len() {
        warn!(
            used,
            provided = points.len(),
            "mean skipped points with mismatched dimensionality"
        );
    }

    let point = Point {
        components: total,
        dims: first.dims,
    }
    .scale_down(used as f64);

    Some(Aggregate {
        point,
        used,
        provided: points.len(),
    })
}

/// Componentwise sum of `points` with no dimensionality filtering.
///
/// The result carries the largest dimensionality seen; lower-dimensional
/// points contribute zero to the extra components. Returns `None` for an
/// empty slice.
pub fn sum(points: &[Point]) -> Option<Point> {
    let dims = points.iter().map(|p| p.dims).max()?;
    let mut components = [0.0; MAX_DIMS];
    for p in points {
        for (t, c) in components.iter_mut().zip(p.components.iter()) {
            *t += c;
        }
    }
    Some(Point { components, dims })
}
