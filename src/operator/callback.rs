//! Operators built from user-supplied product closures.
//!
//! The closures are applied as given: no length checks are added on the
//! input or the result, since callers own the closures' contracts.

use std::sync::Arc;

use crate::config::OperatorOptions;
use crate::core::traits::Scalar;
use crate::error::LinOpError;
use crate::operator::{LinearOperator, MultiplyStrategy, OperatorKind, Orientation, View};

/// Shared closure computing one product.
pub type ApplyFn<T> = Arc<dyn Fn(&[T]) -> Vec<T> + Send + Sync>;

struct CallbackStrategy<T> {
    apply: ApplyFn<T>,
}

impl<T: Scalar> MultiplyStrategy<T> for CallbackStrategy<T> {
    fn multiply(&self, x: &[T]) -> Result<Vec<T>, LinOpError> {
        Ok((self.apply)(x))
    }
}

/// Builder for an operator defined by a product closure and, optionally, a
/// transposed-product closure.
///
/// With a transposed product the transpose view is built eagerly, swapping
/// the roles of the two closures. A symmetric operator is its own transpose
/// and ignores any transposed product it was given. The view computing
/// `apply` is always `Forward`; `options.orientation` is not consulted.
///
/// ```
/// use linop::CallbackOperator;
///
/// let a = CallbackOperator::new(3, 2, |x: &[f64]| vec![x[0] + x[1], x[1] + x[2]])
///     .with_transpose(|y: &[f64]| vec![y[0], y[0] + y[1], y[1]])
///     .build()
///     .unwrap();
/// assert_eq!(a.apply(&[1.0, 1.0, 1.0]).unwrap(), vec![2.0, 2.0]);
/// assert!(a.transpose().unwrap().transpose().unwrap().ptr_eq(&a));
/// ```
pub struct CallbackOperator<T> {
    nargin: usize,
    nargout: usize,
    apply: ApplyFn<T>,
    apply_transpose: Option<ApplyFn<T>>,
    options: OperatorOptions,
}

impl<T: Scalar> CallbackOperator<T> {
    /// Operator of shape `(nargout, nargin)` computing `apply(x)`.
    pub fn new<F>(nargin: usize, nargout: usize, apply: F) -> Self
    where
        F: Fn(&[T]) -> Vec<T> + Send + Sync + 'static,
    {
        Self {
            nargin,
            nargout,
            apply: Arc::new(apply),
            apply_transpose: None,
            options: OperatorOptions::default(),
        }
    }

    /// Supply the transposed product, mapping `nargout` to `nargin`.
    pub fn with_transpose<G>(mut self, apply_transpose: G) -> Self
    where
        G: Fn(&[T]) -> Vec<T> + Send + Sync + 'static,
    {
        self.apply_transpose = Some(Arc::new(apply_transpose));
        self
    }

    pub fn symmetric(mut self) -> Self {
        self.options.symmetric = true;
        self
    }

    /// Merged with flags set earlier; see [`OperatorOptions::merge`].
    pub fn with_options(mut self, options: OperatorOptions) -> Self {
        self.options = self.options.merge(options);
        self
    }

    pub fn build(self) -> Result<LinearOperator<T>, LinOpError> {
        let primary = View::new(
            self.nargin,
            self.nargout,
            Orientation::Forward,
            Arc::new(CallbackStrategy { apply: self.apply }),
        );
        let dual = self.apply_transpose.map(|apply| {
            View::new(
                self.nargout,
                self.nargin,
                Orientation::Transposed,
                Arc::new(CallbackStrategy { apply }) as Arc<dyn MultiplyStrategy<T>>,
            )
        });
        LinearOperator::assemble(
            OperatorKind::Callback,
            self.options.symmetric,
            primary,
            dual,
            &self.options,
        )
    }
}
