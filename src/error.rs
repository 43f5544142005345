use thiserror::Error;

// Unified error type for linop

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinOpError {
    #[error("shape mismatch: expected vector of length {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
    #[error("operator with shape ({nargout}, {nargin}) has no transpose")]
    NoTransposeAvailable { nargout: usize, nargin: usize },
    #[error("invalid transpose source: {0}")]
    InvalidTransposeSource(String),
    #[error("invalid operator shape ({nargout}, {nargin}): {reason}")]
    InvalidShape {
        nargout: usize,
        nargin: usize,
        reason: &'static str,
    },
    #[error("matrix is missing a required capability: {0}")]
    MissingCapability(&'static str),
    #[error("invalid sparse structure: {0}")]
    InvalidStructure(String),
}
