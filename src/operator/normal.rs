//! Normal-equations operators.
//!
//! Given `A` of shape `(m, n)`, this module builds `AᵗA` (shape `(n, n)`) or
//! `AAᵗ` (shape `(m, m)`) without forming the product, which recasts
//!
//! ```text
//!     minimize ‖Ax - b‖   as   AᵗA x = Aᵗb
//!     minimize ‖Aᵗy - g‖  as   AAᵗ y = Ag
//! ```
//!
//! as symmetric systems. Each application costs one product with `A` and
//! one with `Aᵗ`.

use std::sync::Arc;

use crate::config::OperatorOptions;
use crate::core::traits::{MatrixLike, Scalar};
use crate::error::LinOpError;
use crate::operator::{LinearOperator, MultiplyStrategy, OperatorKind, Orientation, View, WrappedMatrixOperator};
use crate::utils::shape::check_len;

struct NormalStrategy<T> {
    base: LinearOperator<T>,
    base_t: LinearOperator<T>,
    orientation: Orientation,
    dim: usize,
}

impl<T: Scalar> MultiplyStrategy<T> for NormalStrategy<T> {
    fn multiply(&self, x: &[T]) -> Result<Vec<T>, LinOpError> {
        check_len(self.dim, x.len())?;
        match self.orientation {
            // Aᵗ(Ax)
            Orientation::Forward => self.base_t.apply(&self.base.apply(x)?),
            // A(Aᵗx)
            Orientation::Transposed => self.base.apply(&self.base_t.apply(x)?),
        }
    }
}

/// Builder for `AᵗA` (default) or `AAᵗ` (after [`transposed`](Self::transposed)).
///
/// The result is always symmetric and its own transpose. `A` must have a transpose.
pub struct NormalEquationsOperator<T> {
    base: LinearOperator<T>,
    options: OperatorOptions,
}

impl<T: Scalar> NormalEquationsOperator<T> {
    pub fn new(base: LinearOperator<T>) -> Self {
        Self { base, options: OperatorOptions::default() }
    }

    /// Wrap a raw matrix in the forward orientation first.
    pub fn from_matrix<M>(matrix: M) -> Result<Self, LinOpError>
    where
        M: MatrixLike<T> + 'static,
    {
        let base = WrappedMatrixOperator::shared(Arc::new(matrix)).build()?;
        Ok(Self::new(base))
    }

    /// Build `AAᵗ` instead of `AᵗA`.
    pub fn transposed(mut self) -> Self {
        self.options.orientation = Orientation::Transposed;
        self
    }

    /// Merged with flags set earlier; see [`OperatorOptions::merge`].
    /// `symmetric` is ignored: the result is always symmetric.
    pub fn with_options(mut self, options: OperatorOptions) -> Self {
        self.options = self.options.merge(options);
        self
    }

    pub fn build(self) -> Result<LinearOperator<T>, LinOpError> {
        let base_t = self.base.transpose()?;
        let (m, n) = self.base.shape();
        let orientation = self.options.orientation;
        let dim = match orientation {
            Orientation::Forward => n,
            Orientation::Transposed => m,
        };
        let strategy = NormalStrategy { base: self.base, base_t, orientation, dim };
        let view = View::new(dim, dim, orientation, Arc::new(strategy));
        LinearOperator::assemble(OperatorKind::NormalEquations, true, view, None, &self.options)
    }
}
