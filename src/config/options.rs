//! Options shared by every operator constructor.
//!
//! This module provides the `OperatorOptions` struct, which carries the
//! symmetry flag, the canonical orientation flag, and the optional
//! construction observer. Options are copied into the transpose view built
//! alongside an operator, so both views of a pair report to the same observer.

use std::fmt;
use std::sync::Arc;

use crate::operator::Orientation;
use crate::utils::observer::{LogObserver, NoopObserver, OperatorEvent, OperatorObserver};

/// Operator construction options.
#[derive(Clone, Default)]
pub struct OperatorOptions {
    /// Operator equals its own transpose; requires a square shape.
    pub symmetric: bool,

    /// Forward applies a wrapped matrix as-is (or builds AᵗA for normal
    /// equations); Transposed applies its transpose (or builds AAᵗ).
    pub orientation: Orientation,

    /// Optional sink for construction events. `None` behaves like [`NoopObserver`].
    pub observer: Option<Arc<dyn OperatorObserver>>,
}

impl OperatorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn symmetric(mut self) -> Self {
        self.symmetric = true;
        self
    }

    pub fn transposed(mut self) -> Self {
        self.orientation = Orientation::Transposed;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn OperatorObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Route construction events to the `log` facade.
    pub fn with_logging(self) -> Self {
        self.with_observer(Arc::new(LogObserver))
    }

    /// Combine with options set earlier on a builder.
    ///
    /// Flags already set on `self` stay set; `other` can only turn them on.
    /// An observer in `other` replaces the current one.
    pub fn merge(mut self, other: OperatorOptions) -> Self {
        self.symmetric |= other.symmetric;
        if other.orientation.is_transposed() {
            self.orientation = Orientation::Transposed;
        }
        if other.observer.is_some() {
            self.observer = other.observer;
        }
        self
    }

    pub(crate) fn notify(&self, event: OperatorEvent) {
        match &self.observer {
            Some(observer) => observer.on_construct(&event),
            None => NoopObserver.on_construct(&event),
        }
    }
}

impl fmt::Debug for OperatorOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorOptions")
            .field("symmetric", &self.symmetric)
            .field("orientation", &self.orientation)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_flags() {
        let opts = OperatorOptions::new().symmetric().transposed();
        assert!(opts.symmetric);
        assert_eq!(opts.orientation, Orientation::Transposed);
        assert!(opts.observer.is_none());
        assert!(OperatorOptions::new().with_logging().observer.is_some());
    }

    #[test]
    fn merge_keeps_earlier_flags() {
        let opts = OperatorOptions::new().symmetric().transposed().merge(OperatorOptions::new().with_logging());
        assert!(opts.symmetric);
        assert_eq!(opts.orientation, Orientation::Transposed);
        assert!(opts.observer.is_some());
        let kept = OperatorOptions::new().with_logging().merge(OperatorOptions::new().symmetric());
        assert!(kept.symmetric && kept.observer.is_some());
    }

    #[test]
    fn debug_hides_observer_internals() {
        let s = format!("{:?}", OperatorOptions::new().with_logging());
        assert!(s.contains("observer: true"));
    }
}
