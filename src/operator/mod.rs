//! Linear operators: matrix-like objects defined by their action.
//!
//! A [`LinearOperator`] maps vectors of length `nargin` to vectors of length
//! `nargout` and is visualized as a matrix of shape `(nargout, nargin)`.
//! Operators come from three builders:
//!
//! - [`CallbackOperator`]: user closures for the product and, optionally, the transposed product.
//! - [`WrappedMatrixOperator`]: any [`MatrixLike`](crate::core::MatrixLike) value, shared and never copied.
//! - [`NormalEquationsOperator`]: `AᵗA` or `AAᵗ` over an existing operator.
//!
//! # Transpose pairs
//!
//! An operator and its transpose are two views of one shared allocation,
//! built together and never recomputed. `a.transpose()?.transpose()?` is the
//! same view as `a` (see [`LinearOperator::ptr_eq`]), a symmetric operator is
//! its own transpose, and either view keeps the shared closures or matrix alive
//! after the other is dropped.

use std::fmt;
use std::ops::Mul;
use std::sync::Arc;

use crate::config::OperatorOptions;
use crate::core::traits::Scalar;
use crate::error::LinOpError;
use crate::utils::observer::OperatorEvent;
use crate::utils::shape::{check_dims, check_len};

pub mod callback;
pub mod normal;
pub mod wrapped;

pub use callback::CallbackOperator;
pub use normal::NormalEquationsOperator;
pub use wrapped::WrappedMatrixOperator;

/// Canonical orientation flag.
///
/// For a wrapped matrix, `Transposed` applies the matrix transpose. For a
/// normal-equations operator, `Forward` builds `AᵗA` and `Transposed` builds `AAᵗ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    Forward,
    Transposed,
}

impl Orientation {
    pub fn flip(self) -> Self {
        match self {
            Orientation::Forward => Orientation::Transposed,
            Orientation::Transposed => Orientation::Forward,
        }
    }

    pub fn is_transposed(self) -> bool {
        self == Orientation::Transposed
    }
}

/// Which builder produced an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    Custom,
    Callback,
    WrappedMatrix,
    NormalEquations,
}

/// How a single operator view computes its product.
///
/// Implementing this trait is how new operator variants are defined. A
/// strategy that keeps the default `multiply` is abstract: applying it fails
/// with [`LinOpError::NotImplemented`].
pub trait MultiplyStrategy<T>: Send + Sync {
    fn multiply(&self, x: &[T]) -> Result<Vec<T>, LinOpError> {
        let _ = x;
        Err(LinOpError::NotImplemented("multiply"))
    }
}

/// One orientation of an operator: dimensions plus the strategy chosen at construction.
#[derive(Clone)]
pub(crate) struct View<T> {
    nargin: usize,
    nargout: usize,
    orientation: Orientation,
    strategy: Arc<dyn MultiplyStrategy<T>>,
}

impl<T> View<T> {
    pub(crate) fn new(
        nargin: usize,
        nargout: usize,
        orientation: Orientation,
        strategy: Arc<dyn MultiplyStrategy<T>>,
    ) -> Self {
        Self { nargin, nargout, orientation, strategy }
    }
}

/// Verify that `view` can serve as the transpose of `transpose_of`.
fn check_transpose_of<T>(view: &View<T>, transpose_of: &View<T>) -> Result<(), LinOpError> {
    if view.nargin != transpose_of.nargout || view.nargout != transpose_of.nargin {
        return Err(LinOpError::InvalidTransposeSource(format!(
            "shape ({}, {}) is not the transpose of ({}, {})",
            view.nargout, view.nargin, transpose_of.nargout, transpose_of.nargin
        )));
    }
    Ok(())
}

/// Shared storage for the one or two views of an operator.
struct Pair<T> {
    kind: OperatorKind,
    symmetric: bool,
    views: Vec<View<T>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Primary,
    Dual,
}

impl Side {
    fn flip(self) -> Self {
        match self {
            Side::Primary => Side::Dual,
            Side::Dual => Side::Primary,
        }
    }

    fn index(self) -> usize {
        match self {
            Side::Primary => 0,
            Side::Dual => 1,
        }
    }
}

/// A cheaply clonable handle to one view of a linear operator.
pub struct LinearOperator<T> {
    pair: Arc<Pair<T>>,
    side: Side,
}

impl<T> Clone for LinearOperator<T> {
    fn clone(&self) -> Self {
        Self { pair: Arc::clone(&self.pair), side: self.side }
    }
}

impl<T: Scalar> LinearOperator<T> {
    /// Two-phase construction of an operator and, unless symmetric, its transpose view.
    ///
    /// The dual view is linked against the primary once, here; it is never
    /// rebuilt when the transpose is requested later.
    pub(crate) fn assemble(
        kind: OperatorKind,
        symmetric: bool,
        primary: View<T>,
        dual: Option<View<T>>,
        options: &OperatorOptions,
    ) -> Result<Self, LinOpError> {
        check_dims(primary.nargout, primary.nargin, symmetric)?;
        let mut views = vec![primary];
        if let Some(dual) = dual.filter(|_| !symmetric) {
            check_transpose_of(&dual, &views[0])?;
            views.push(dual);
        }
        for view in &views {
            options.notify(OperatorEvent {
                kind,
                shape: (view.nargout, view.nargin),
                orientation: view.orientation,
                symmetric,
            });
        }
        Ok(Self {
            pair: Arc::new(Pair { kind, symmetric, views }),
            side: Side::Primary,
        })
    }

    /// Build an operator from a user-defined strategy.
    ///
    /// The result has no transpose unless `options.symmetric` is set; use
    /// [`LinearOperator::from_pair`] to attach one.
    pub fn from_strategy<S>(
        nargin: usize,
        nargout: usize,
        strategy: S,
        options: OperatorOptions,
    ) -> Result<Self, LinOpError>
    where
        S: MultiplyStrategy<T> + 'static,
    {
        let view = View::new(nargin, nargout, options.orientation, Arc::new(strategy));
        Self::assemble(OperatorKind::Custom, options.symmetric, view, None, &options)
    }

    /// Link two operators built without transposes into a new transpose pair.
    ///
    /// Fails with [`LinOpError::InvalidTransposeSource`] if `at` does not have
    /// the transposed shape of `a`, or if either side already has a transpose.
    /// Both views of the new pair are reported to `options`' observer.
    pub fn from_pair(a: &Self, at: &Self, options: &OperatorOptions) -> Result<Self, LinOpError> {
        for op in [a, at] {
            if op.has_transpose() {
                return Err(LinOpError::InvalidTransposeSource(format!(
                    "operator with shape {:?} already has a transpose",
                    op.shape()
                )));
            }
        }
        Self::assemble(a.kind(), false, a.view().clone(), Some(at.view().clone()), options)
    }

    fn view(&self) -> &View<T> {
        &self.pair.views[self.side.index()]
    }

    /// Input dimension.
    pub fn nargin(&self) -> usize {
        self.view().nargin
    }

    /// Output dimension.
    pub fn nargout(&self) -> usize {
        self.view().nargout
    }

    /// `(nargout, nargin)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.nargout(), self.nargin())
    }

    pub fn is_symmetric(&self) -> bool {
        self.pair.symmetric
    }

    pub fn orientation(&self) -> Orientation {
        self.view().orientation
    }

    pub fn kind(&self) -> OperatorKind {
        self.pair.kind
    }

    pub fn has_transpose(&self) -> bool {
        self.pair.symmetric || self.pair.views.len() == 2
    }

    /// The transpose view, sharing storage with `self`.
    pub fn transpose(&self) -> Result<Self, LinOpError> {
        if self.pair.symmetric {
            return Ok(self.clone());
        }
        if self.pair.views.len() < 2 {
            return Err(LinOpError::NoTransposeAvailable {
                nargout: self.nargout(),
                nargin: self.nargin(),
            });
        }
        Ok(Self { pair: Arc::clone(&self.pair), side: self.side.flip() })
    }

    /// True if both handles refer to the same view of the same operator.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.pair, &other.pair) && self.side == other.side
    }

    /// Compute `A x`.
    pub fn apply(&self, x: &[T]) -> Result<Vec<T>, LinOpError> {
        self.view().strategy.multiply(x)
    }

    /// Alias for [`apply`](LinearOperator::apply).
    pub fn call(&self, x: &[T]) -> Result<Vec<T>, LinOpError> {
        self.apply(x)
    }

    /// Compute `y ← A x`; `y` is left untouched on error.
    pub fn apply_into(&self, x: &[T], y: &mut [T]) -> Result<(), LinOpError> {
        check_len(self.nargout(), y.len())?;
        let ax = self.apply(x)?;
        check_len(y.len(), ax.len())?;
        y.copy_from_slice(&ax);
        Ok(())
    }
}

impl<T> fmt::Debug for LinearOperator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = &self.pair.views[self.side.index()];
        f.debug_struct("LinearOperator")
            .field("kind", &self.pair.kind)
            .field("shape", &(view.nargout, view.nargin))
            .field("orientation", &view.orientation)
            .field("symmetric", &self.pair.symmetric)
            .finish()
    }
}

impl<T: Scalar> Mul<&[T]> for &LinearOperator<T> {
    type Output = Result<Vec<T>, LinOpError>;

    fn mul(self, x: &[T]) -> Self::Output {
        self.apply(x)
    }
}

impl<T: Scalar> Mul<&Vec<T>> for &LinearOperator<T> {
    type Output = Result<Vec<T>, LinOpError>;

    fn mul(self, x: &Vec<T>) -> Self::Output {
        self.apply(x)
    }
}
