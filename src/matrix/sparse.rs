// CsrMatrix: faer CSR storage exposing only the fill-output routes

use faer::sparse::{CreationError, SparseRowMat, SymbolicSparseRowMat, Triplet};
use faer::traits::ComplexField;

use crate::core::traits::{Capabilities, MatShape, MatrixLike, Scalar};
use crate::error::LinOpError;
use crate::utils::shape::check_len;

fn structure_error(err: CreationError) -> LinOpError {
    LinOpError::InvalidStructure(format!("{err:?}"))
}

/// `nrows + 1` row pointers, or an error if that overflows.
fn row_ptr_len(nrows: usize) -> Result<usize, LinOpError> {
    nrows
        .checked_add(1)
        .ok_or_else(|| LinOpError::InvalidStructure(format!("{nrows} rows overflow the row pointer")))
}

/// A read-only CSR matrix supporting y ← A x and x ← Aᵗ y.
///
/// It declares only [`Capabilities::MATVEC`] and [`Capabilities::MATVEC_TRANSP`],
/// so wrapped operators over it always take the fill-output path.
#[derive(Debug, Clone)]
pub struct CsrMatrix<T> {
    inner: SparseRowMat<usize, T>,
}

impl<T: Scalar + ComplexField> CsrMatrix<T> {
    /// Build a CSR from raw row-ptr, col-idx, and values.
    pub fn from_csr(
        nrows: usize,
        ncols: usize,
        row_ptr: Vec<usize>,
        col_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self, LinOpError> {
        let expected = row_ptr_len(nrows)?;
        if row_ptr.len() != expected {
            return Err(LinOpError::InvalidStructure(format!(
                "row_ptr has length {} instead of {expected}",
                row_ptr.len()
            )));
        }
        if values.len() != col_idx.len() {
            return Err(LinOpError::InvalidStructure(format!(
                "{} column indices but {} values",
                col_idx.len(),
                values.len()
            )));
        }
        // second argument `None` means "no separate row_nnz"
        let symbolic = SymbolicSparseRowMat::try_new_checked(nrows, ncols, row_ptr, None, col_idx)
            .map_err(structure_error)?;
        Ok(Self { inner: SparseRowMat::new(symbolic, values) })
    }

    /// Build from (row, col, value) triplets; duplicates are summed.
    pub fn from_triplets(
        nrows: usize,
        ncols: usize,
        triplets: &[(usize, usize, T)],
    ) -> Result<Self, LinOpError> {
        row_ptr_len(nrows)?;
        let entries: Vec<Triplet<usize, usize, T>> = triplets
            .iter()
            .map(|&(i, j, v)| Triplet::new(i, j, v))
            .collect();
        let inner = SparseRowMat::try_new_from_triplets(nrows, ncols, &entries).map_err(structure_error)?;
        Ok(Self { inner })
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.inner.val().len()
    }

    /// Densify into a faer matrix.
    pub fn to_dense(&self) -> faer::Mat<T> {
        self.inner.to_dense()
    }
}

impl<T> MatShape for CsrMatrix<T> {
    fn nrows(&self) -> usize {
        self.inner.nrows()
    }
    fn ncols(&self) -> usize {
        self.inner.ncols()
    }
}

impl<T: Scalar + ComplexField> MatrixLike<T> for CsrMatrix<T> {
    fn capabilities(&self) -> Capabilities {
        Capabilities::MATVEC | Capabilities::MATVEC_TRANSP
    }

    fn matvec(&self, x: &[T], y: &mut [T]) -> Result<(), LinOpError> {
        check_len(self.ncols(), x.len())?;
        check_len(self.nrows(), y.len())?;
        let mat = self.inner.as_ref();
        let (symbolic, values) = (mat.symbolic(), mat.val());
        let col_idx = symbolic.col_idx();
        for (i, yi) in y.iter_mut().enumerate() {
            let mut sum = T::zero();
            for k in symbolic.row_range(i) {
                sum = sum + values[k] * x[col_idx[k]];
            }
            *yi = sum;
        }
        Ok(())
    }

    fn matvec_transp(&self, y: &[T], x: &mut [T]) -> Result<(), LinOpError> {
        check_len(self.nrows(), y.len())?;
        check_len(self.ncols(), x.len())?;
        let mat = self.inner.as_ref();
        let (symbolic, values) = (mat.symbolic(), mat.val());
        let col_idx = symbolic.col_idx();
        x.iter_mut().for_each(|xj| *xj = T::zero());
        for (i, &yi) in y.iter().enumerate() {
            for k in symbolic.row_range(i) {
                let j = col_idx[k];
                x[j] = x[j] + values[k] * yi;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_spmv() {
        // 3×3 identity in CSR: row_ptr=[0,1,2,3], col_idx=[0,1,2], vals=[1,1,1]
        let m = CsrMatrix::from_csr(3, 3, vec![0, 1, 2, 3], vec![0, 1, 2], vec![1.0, 1.0, 1.0]).unwrap();
        let x = vec![2.0, 3.0, 5.0];
        let mut y = vec![0.0; 3];
        m.matvec(&x, &mut y).unwrap();
        assert_eq!(y, x);
    }

    #[test]
    fn simple_pattern() {
        // 2×3 matrix [[1,2,0],[0,3,4]]
        let m = CsrMatrix::from_csr(2, 3, vec![0, 2, 4], vec![0, 1, 1, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let mut y = vec![0.0; 2];
        m.matvec(&[1.0, 1.0, 1.0], &mut y).unwrap();
        assert_eq!(y, vec![3.0, 7.0]);
        let mut x = vec![0.0; 3];
        m.matvec_transp(&[1.0, 1.0], &mut x).unwrap();
        assert_eq!(x, vec![1.0, 5.0, 4.0]);
    }

    #[test]
    fn triplets_sum_duplicates() {
        let m = CsrMatrix::from_triplets(2, 2, &[(1, 1, 2.0), (0, 0, 1.0), (1, 1, 3.0)]).unwrap();
        assert_eq!(m.nnz(), 2);
        let d = m.to_dense();
        assert_eq!(d[(1, 1)], 5.0);
        assert_eq!(d[(0, 1)], 0.0);
    }

    #[test]
    fn malformed_structure_is_rejected() {
        assert!(matches!(
            CsrMatrix::<f64>::from_csr(2, 2, vec![0, 1], vec![0], vec![1.0]),
            Err(LinOpError::InvalidStructure(_))
        ));
        assert!(matches!(
            CsrMatrix::from_csr(1, 2, vec![0, 1], vec![5], vec![1.0]),
            Err(LinOpError::InvalidStructure(_))
        ));
        assert!(matches!(
            CsrMatrix::from_csr(1, 2, vec![0, 1], vec![0], vec![1.0, 2.0]),
            Err(LinOpError::InvalidStructure(_))
        ));
        assert!(matches!(
            CsrMatrix::from_triplets(2, 2, &[(2, 0, 1.0)]),
            Err(LinOpError::InvalidStructure(_))
        ));
    }

    #[test]
    fn overflowing_row_count_is_an_error() {
        assert!(matches!(
            CsrMatrix::<f64>::from_csr(usize::MAX, 1, vec![0], vec![], vec![]),
            Err(LinOpError::InvalidStructure(_))
        ));
        assert!(matches!(
            CsrMatrix::<f64>::from_triplets(usize::MAX, 1, &[]),
            Err(LinOpError::InvalidStructure(_))
        ));
    }

    #[test]
    fn only_fill_routes_are_declared() {
        let m = CsrMatrix::from_csr(1, 1, vec![0, 1], vec![0], vec![1.0]).unwrap();
        assert_eq!(m.capabilities(), Capabilities::MATVEC | Capabilities::MATVEC_TRANSP);
        assert_eq!(m.mul(&[1.0]), Err(LinOpError::NotImplemented("mul")));
    }
}
