//! linop: matrix-free linear operators over Faer
//!
//! This crate represents linear maps by their action rather than by stored entries.
//! Operators can be built from closures, from any dense or sparse matrix that exposes
//! the capability set in [`crate::core::traits`], or as the normal-equations product `AᵗA`/`AAᵗ`
//! of another operator. Transposes are shared views, built once and linked both ways,
//! so iterative solvers can consume any of them through one contract.

pub mod config;
pub mod core;
pub mod error;
pub mod matrix;
pub mod operator;
pub mod utils;

// Re-exports for convenience
pub use config::*;
pub use crate::core::*;
pub use error::*;
pub use matrix::*;
pub use operator::*;
pub use utils::*;
