//! Matrix module: dense and sparse matrix providers for wrapped operators.

pub mod dense;
pub use dense::DenseMatrix;
pub mod sparse;
pub use sparse::CsrMatrix;
