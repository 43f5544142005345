//! Core linear-algebra traits for linop.
//!
//! A matrix-like object is anything that reports its shape and declares which
//! multiplication routes it supports through [`Capabilities`]. Operators pick a
//! route once, when they are built, and never probe the matrix again.

use crate::error::LinOpError;
use bitflags::bitflags;
use num_traits::Float;

/// Scalar types usable inside operators.
pub trait Scalar: Float + Send + Sync + std::fmt::Debug + 'static {}

impl<T: Float + Send + Sync + std::fmt::Debug + 'static> Scalar for T {}

bitflags! {
    /// Multiplication routes a matrix-like object offers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// Direct product returning a fresh vector: y = A x.
        const MUL = 1;
        /// Direct reverse product returning a fresh vector: x = Aᵗ y.
        const RMUL = 1 << 1;
        /// Fill an output buffer with A x.
        const MATVEC = 1 << 2;
        /// Fill an output buffer with Aᵗ y.
        const MATVEC_TRANSP = 1 << 3;
    }
}

impl Capabilities {
    /// True if some route computes A x.
    pub fn can_forward(self) -> bool {
        self.intersects(Capabilities::MUL | Capabilities::MATVEC)
    }

    /// True if some route computes Aᵗ y.
    pub fn can_transpose(self) -> bool {
        self.intersects(Capabilities::RMUL | Capabilities::MATVEC_TRANSP)
    }
}

/// Shape query shared by every matrix provider.
pub trait MatShape {
    /// Number of rows.
    fn nrows(&self) -> usize;
    /// Number of columns.
    fn ncols(&self) -> usize;
    /// `(nrows, ncols)`.
    fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }
}

/// The capability set an external matrix must provide to be wrapped.
///
/// Only the routes listed in [`capabilities`](MatrixLike::capabilities) are
/// ever called. The defaults report [`LinOpError::NotImplemented`].
pub trait MatrixLike<T>: MatShape + Send + Sync {
    /// Routes this matrix implements.
    fn capabilities(&self) -> Capabilities;

    /// Compute A x into a new vector.
    fn mul(&self, x: &[T]) -> Result<Vec<T>, LinOpError> {
        let _ = x;
        Err(LinOpError::NotImplemented("mul"))
    }

    /// Compute Aᵗ y into a new vector.
    fn rmul(&self, y: &[T]) -> Result<Vec<T>, LinOpError> {
        let _ = y;
        Err(LinOpError::NotImplemented("rmul"))
    }

    /// Compute y ← A x. `x.len() == ncols()`, `y.len() == nrows()`.
    fn matvec(&self, x: &[T], y: &mut [T]) -> Result<(), LinOpError> {
        let _ = (x, y);
        Err(LinOpError::NotImplemented("matvec"))
    }

    /// Compute x ← Aᵗ y. `y.len() == nrows()`, `x.len() == ncols()`.
    fn matvec_transp(&self, y: &[T], x: &mut [T]) -> Result<(), LinOpError> {
        let _ = (y, x);
        Err(LinOpError::NotImplemented("matvec_transp"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_queries() {
        assert!(Capabilities::MUL.can_forward());
        assert!(!Capabilities::MUL.can_transpose());
        let fill = Capabilities::MATVEC | Capabilities::MATVEC_TRANSP;
        assert!(fill.can_forward() && fill.can_transpose());
        assert!(!Capabilities::empty().can_forward());
    }

    struct ShapeOnly;

    impl MatShape for ShapeOnly {
        fn nrows(&self) -> usize {
            2
        }
        fn ncols(&self) -> usize {
            3
        }
    }

    impl MatrixLike<f64> for ShapeOnly {
        fn capabilities(&self) -> Capabilities {
            Capabilities::empty()
        }
    }

    #[test]
    fn undeclared_routes_report_not_implemented() {
        let m = ShapeOnly;
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.mul(&[1.0; 3]), Err(LinOpError::NotImplemented("mul")));
        let mut y = [0.0; 3];
        assert_eq!(
            m.matvec_transp(&[1.0; 2], &mut y),
            Err(LinOpError::NotImplemented("matvec_transp"))
        );
    }
}
