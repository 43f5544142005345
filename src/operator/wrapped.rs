//! Operators over externally owned matrices.
//!
//! The matrix is held behind an `Arc` shared by both views of the pair; it is
//! never copied or mutated. Each view resolves its multiplication route from
//! the matrix's [`Capabilities`] once, at construction:
//!
//! | orientation  | preferred          | fallback                        |
//! |--------------|--------------------|---------------------------------|
//! | `Forward`    | `mul` (direct)     | `matvec` into a fresh buffer    |
//! | `Transposed` | `rmul` (direct)    | `matvec_transp` into a buffer   |
//!
//! The fallback routes check the input length before allocating the output.

use std::sync::Arc;

use crate::config::OperatorOptions;
use crate::core::traits::{Capabilities, MatrixLike, Scalar};
use crate::error::LinOpError;
use crate::operator::{LinearOperator, MultiplyStrategy, OperatorKind, Orientation, View};
use crate::utils::shape::check_len;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Direct,
    Fill,
}

struct MatrixStrategy<T> {
    matrix: Arc<dyn MatrixLike<T>>,
    orientation: Orientation,
    route: Route,
    nargin: usize,
    nargout: usize,
}

impl<T: Scalar> MultiplyStrategy<T> for MatrixStrategy<T> {
    fn multiply(&self, x: &[T]) -> Result<Vec<T>, LinOpError> {
        match (self.orientation, self.route) {
            (Orientation::Forward, Route::Direct) => self.matrix.mul(x),
            (Orientation::Transposed, Route::Direct) => self.matrix.rmul(x),
            (orientation, Route::Fill) => {
                check_len(self.nargin, x.len())?;
                let mut y = vec![T::zero(); self.nargout];
                match orientation {
                    Orientation::Forward => self.matrix.matvec(x, &mut y)?,
                    Orientation::Transposed => self.matrix.matvec_transp(x, &mut y)?,
                }
                Ok(y)
            }
        }
    }
}

/// Select the route for `orientation`, or `None` if the matrix offers none.
fn select_route(caps: Capabilities, orientation: Orientation) -> Option<Route> {
    let (direct, fill) = match orientation {
        Orientation::Forward => (Capabilities::MUL, Capabilities::MATVEC),
        Orientation::Transposed => (Capabilities::RMUL, Capabilities::MATVEC_TRANSP),
    };
    if caps.contains(direct) {
        Some(Route::Direct)
    } else if caps.contains(fill) {
        Some(Route::Fill)
    } else {
        None
    }
}

fn matrix_view<T: Scalar>(matrix: &Arc<dyn MatrixLike<T>>, orientation: Orientation, route: Route) -> View<T> {
    let (m, n) = matrix.shape();
    let (nargin, nargout) = match orientation {
        Orientation::Forward => (n, m),
        Orientation::Transposed => (m, n),
    };
    let strategy = MatrixStrategy {
        matrix: Arc::clone(matrix),
        orientation,
        route,
        nargin,
        nargout,
    };
    View::new(nargin, nargout, orientation, Arc::new(strategy))
}

/// Builder for an operator backed by a [`MatrixLike`] value.
///
/// Unless symmetric, the view with the opposite orientation is built at the
/// same time over the same matrix, provided the matrix offers a route for it;
/// otherwise the operator has no transpose.
pub struct WrappedMatrixOperator<T> {
    matrix: Arc<dyn MatrixLike<T>>,
    options: OperatorOptions,
}

impl<T: Scalar> WrappedMatrixOperator<T> {
    /// Take ownership of `matrix`.
    pub fn new<M>(matrix: M) -> Self
    where
        M: MatrixLike<T> + 'static,
    {
        Self::shared(Arc::new(matrix))
    }

    /// Wrap a matrix the caller keeps a handle to.
    pub fn shared<M>(matrix: Arc<M>) -> Self
    where
        M: MatrixLike<T> + 'static,
    {
        let matrix: Arc<dyn MatrixLike<T>> = matrix;
        Self { matrix, options: OperatorOptions::default() }
    }

    pub fn symmetric(mut self) -> Self {
        self.options.symmetric = true;
        self
    }

    /// Apply the matrix transpose; the resulting shape is `(ncols, nrows)`.
    pub fn transposed(mut self) -> Self {
        self.options.orientation = Orientation::Transposed;
        self
    }

    /// Merged with flags set earlier; see [`OperatorOptions::merge`].
    pub fn with_options(mut self, options: OperatorOptions) -> Self {
        self.options = self.options.merge(options);
        self
    }

    pub fn build(self) -> Result<LinearOperator<T>, LinOpError> {
        let caps = self.matrix.capabilities();
        let orientation = self.options.orientation;
        let route = select_route(caps, orientation).ok_or(match orientation {
            Orientation::Forward => LinOpError::MissingCapability("mul or matvec"),
            Orientation::Transposed => LinOpError::MissingCapability("rmul or matvec_transp"),
        })?;
        let primary = matrix_view(&self.matrix, orientation, route);
        let dual = if self.options.symmetric {
            None
        } else {
            select_route(caps, orientation.flip())
                .map(|route| matrix_view(&self.matrix, orientation.flip(), route))
        };
        LinearOperator::assemble(
            OperatorKind::WrappedMatrix,
            self.options.symmetric,
            primary,
            dual,
            &self.options,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::MatShape;
    use crate::matrix::CsrMatrix;
    use faer::Mat;

    fn sample() -> Mat<f64> {
        let rows = [[1.0, 2.0, 0.0], [0.0, 3.0, 4.0]];
        Mat::from_fn(2, 3, |i, j| rows[i][j])
    }

    #[test]
    fn forward_and_transposed_views() {
        let a = WrappedMatrixOperator::new(sample()).build().unwrap();
        assert_eq!(a.shape(), (2, 3));
        assert_eq!(a.apply(&[1.0, 1.0, 1.0]).unwrap(), vec![3.0, 7.0]);
        let at = a.transpose().unwrap();
        assert_eq!(at.shape(), (3, 2));
        assert_eq!(at.apply(&[1.0, 1.0]).unwrap(), vec![1.0, 5.0, 4.0]);
        assert!(at.transpose().unwrap().ptr_eq(&a));
    }

    #[test]
    fn transposed_orientation_swaps_dimensions() {
        let at = WrappedMatrixOperator::new(sample()).transposed().build().unwrap();
        assert_eq!(at.shape(), (3, 2));
        assert_eq!(at.orientation(), Orientation::Transposed);
        assert_eq!(at.transpose().unwrap().shape(), (2, 3));
    }

    #[test]
    fn options_keep_transposed_flag() {
        let at = WrappedMatrixOperator::new(sample())
            .transposed()
            .with_options(OperatorOptions::new().with_logging())
            .build()
            .unwrap();
        assert_eq!(at.shape(), (3, 2));
        assert_eq!(at.orientation(), Orientation::Transposed);
    }

    #[test]
    fn matrix_is_shared_not_copied() {
        let m = Arc::new(sample());
        let a = WrappedMatrixOperator::shared(Arc::clone(&m)).build().unwrap();
        // one handle here, one in each view
        assert_eq!(Arc::strong_count(&m), 3);
        let at = a.transpose().unwrap();
        drop(a);
        assert_eq!(at.apply(&[0.0, 1.0]).unwrap(), vec![0.0, 3.0, 4.0]);
        drop(at);
        assert_eq!(Arc::strong_count(&m), 1);
    }

    #[test]
    fn fill_route_checks_input_length() {
        let csr = CsrMatrix::from_csr(2, 3, vec![0, 2, 4], vec![0, 1, 1, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let a = WrappedMatrixOperator::new(csr).build().unwrap();
        assert_eq!(a.apply(&[1.0, 1.0, 1.0]).unwrap(), vec![3.0, 7.0]);
        assert_eq!(
            a.apply(&[1.0, 1.0]),
            Err(LinOpError::ShapeMismatch { expected: 3, actual: 2 })
        );
        let at = a.transpose().unwrap();
        assert_eq!(at.apply(&[1.0, 1.0]).unwrap(), vec![1.0, 5.0, 4.0]);
        assert_eq!(
            at.apply(&[1.0, 1.0, 1.0]),
            Err(LinOpError::ShapeMismatch { expected: 2, actual: 3 })
        );
    }

    struct ForwardOnly;

    impl MatShape for ForwardOnly {
        fn nrows(&self) -> usize {
            1
        }
        fn ncols(&self) -> usize {
            2
        }
    }

    impl MatrixLike<f64> for ForwardOnly {
        fn capabilities(&self) -> Capabilities {
            Capabilities::MUL
        }
        fn mul(&self, x: &[f64]) -> Result<Vec<f64>, LinOpError> {
            Ok(vec![x[0] + x[1]])
        }
    }

    #[test]
    fn missing_reverse_route_leaves_no_transpose() {
        let a = WrappedMatrixOperator::new(ForwardOnly).build().unwrap();
        assert_eq!(a.apply(&[1.0, 2.0]).unwrap(), vec![3.0]);
        assert!(matches!(a.transpose(), Err(LinOpError::NoTransposeAvailable { nargout: 1, nargin: 2 })));
        assert!(matches!(
            WrappedMatrixOperator::new(ForwardOnly).transposed().build(),
            Err(LinOpError::MissingCapability(_))
        ));
    }

    #[test]
    fn symmetric_matrix_is_self_transpose() {
        let m = Mat::from_fn(2, 2, |i, j| if i == j { 2.0 } else { 1.0 });
        let a = WrappedMatrixOperator::new(m).symmetric().build().unwrap();
        assert!(a.is_symmetric());
        assert!(a.transpose().unwrap().ptr_eq(&a));
        assert!(matches!(
            WrappedMatrixOperator::new(sample()).symmetric().build(),
            Err(LinOpError::InvalidShape { .. })
        ));
    }
}
