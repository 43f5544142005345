//! Capability-set implementation for faer dense matrices.
//!
//! `faer::Mat<T>` offers every multiplication route: the direct products
//! (`mul`, `rmul`) and the fill-output products (`matvec`, `matvec_transp`).
//! With the `rayon` feature enabled the direct forward product is computed
//! row-parallel.
//!
//! # References
//! - [faer crate documentation](https://docs.rs/faer)
//! - [num-traits crate documentation](https://docs.rs/num-traits)

use crate::core::traits::{Capabilities, MatShape, MatrixLike, Scalar};
use crate::error::LinOpError;
use crate::utils::shape::check_len;
use faer::Mat;

impl<T> MatShape for Mat<T> {
    fn nrows(&self) -> usize {
        self.nrows()
    }
    fn ncols(&self) -> usize {
        self.ncols()
    }
}

fn row_dot<T: Scalar>(a: &Mat<T>, i: usize, x: &[T]) -> T {
    let mut acc = T::zero();
    for j in 0..a.ncols() {
        acc = acc + a[(i, j)] * x[j];
    }
    acc
}

fn col_dot<T: Scalar>(a: &Mat<T>, j: usize, y: &[T]) -> T {
    let mut acc = T::zero();
    for i in 0..a.nrows() {
        acc = acc + a[(i, j)] * y[i];
    }
    acc
}

impl<T: Scalar> MatrixLike<T> for Mat<T> {
    fn capabilities(&self) -> Capabilities {
        Capabilities::all()
    }

    /// Computes `A * x`, row-parallel if the `rayon` feature is enabled.
    fn mul(&self, x: &[T]) -> Result<Vec<T>, LinOpError> {
        check_len(self.ncols(), x.len())?;
        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            Ok((0..self.nrows())
                .into_par_iter()
                .map(|i| row_dot(self, i, x))
                .collect())
        }
        #[cfg(not(feature = "rayon"))]
        {
            Ok((0..self.nrows()).map(|i| row_dot(self, i, x)).collect())
        }
    }

    /// Computes `A^T * y`.
    fn rmul(&self, y: &[T]) -> Result<Vec<T>, LinOpError> {
        check_len(self.nrows(), y.len())?;
        Ok((0..self.ncols()).map(|j| col_dot(self, j, y)).collect())
    }

    fn matvec(&self, x: &[T], y: &mut [T]) -> Result<(), LinOpError> {
        check_len(self.ncols(), x.len())?;
        check_len(self.nrows(), y.len())?;
        for (i, yi) in y.iter_mut().enumerate() {
            *yi = row_dot(self, i, x);
        }
        Ok(())
    }

    fn matvec_transp(&self, y: &[T], x: &mut [T]) -> Result<(), LinOpError> {
        check_len(self.nrows(), y.len())?;
        check_len(self.ncols(), x.len())?;
        for (j, xj) in x.iter_mut().enumerate() {
            *xj = col_dot(self, j, y);
        }
        Ok(())
    }
}
