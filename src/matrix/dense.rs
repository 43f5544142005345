//! Dense-matrix API on top of Faer.
//!
//! This module provides the `DenseMatrix` trait and its implementation for the `faer::Mat<T>` type,
//! enabling construction from raw column-major storage with checked dimensions.

use crate::core::traits::{MatrixLike, Scalar};
use crate::error::LinOpError;
use faer::Mat;

/// Any Faer Mat<T> is a DenseMatrix.
pub trait DenseMatrix<T>: MatrixLike<T> + Sized {
    /// Construct from raw column-major storage.
    fn from_raw(nrows: usize, ncols: usize, data: Vec<T>) -> Result<Self, LinOpError>;
    /// Construct from a slice of equally long rows.
    fn from_rows(rows: &[Vec<T>]) -> Result<Self, LinOpError>;
}

impl<T: Scalar> DenseMatrix<T> for Mat<T> {
    fn from_raw(nrows: usize, ncols: usize, data: Vec<T>) -> Result<Self, LinOpError> {
        let len = nrows.checked_mul(ncols).ok_or(LinOpError::InvalidShape {
            nargout: nrows,
            nargin: ncols,
            reason: "element count overflows usize",
        })?;
        if data.len() != len {
            return Err(LinOpError::ShapeMismatch {
                expected: len,
                actual: data.len(),
            });
        }
        Ok(Mat::from_fn(nrows, ncols, |i, j| data[j * nrows + i]))
    }

    fn from_rows(rows: &[Vec<T>]) -> Result<Self, LinOpError> {
        let ncols = rows.first().map_or(0, |r| r.len());
        if let Some(bad) = rows.iter().find(|r| r.len() != ncols) {
            return Err(LinOpError::ShapeMismatch {
                expected: ncols,
                actual: bad.len(),
            });
        }
        Ok(Mat::from_fn(rows.len(), ncols, |i, j| rows[i][j]))
    }
}
