//! Shared helpers: shape checks and the construction observer.

pub mod observer;
pub(crate) mod shape;

pub use observer::{LogObserver, NoopObserver, OperatorEvent, OperatorObserver};
