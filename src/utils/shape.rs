//! Dimension checks shared by every operator variant.

use crate::error::LinOpError;

/// Fail with [`LinOpError::ShapeMismatch`] unless `actual == expected`.
pub(crate) fn check_len(expected: usize, actual: usize) -> Result<(), LinOpError> {
    if expected == actual {
        Ok(())
    } else {
        Err(LinOpError::ShapeMismatch { expected, actual })
    }
}

/// Validate operator dimensions: both positive, and square when symmetric.
pub(crate) fn check_dims(nargout: usize, nargin: usize, symmetric: bool) -> Result<(), LinOpError> {
    if nargin == 0 || nargout == 0 {
        return Err(LinOpError::InvalidShape {
            nargout,
            nargin,
            reason: "dimensions must be positive",
        });
    }
    if symmetric && nargin != nargout {
        return Err(LinOpError::InvalidShape {
            nargout,
            nargin,
            reason: "a symmetric operator must be square",
        });
    }
    Ok(())
}
