//! Construction options for operators.

pub mod options;
pub use options::OperatorOptions;
