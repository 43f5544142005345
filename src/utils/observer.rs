//! Construction observer: the optional logging side-channel.
//!
//! Every operator view reports one [`OperatorEvent`] when it is built. The
//! default is [`NoopObserver`]; [`LogObserver`] forwards events to the `log`
//! facade on target `"linop"`. Observers never influence numerical results.

use crate::operator::{OperatorKind, Orientation};

/// Structured record emitted when an operator view is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorEvent {
    pub kind: OperatorKind,
    /// `(nargout, nargin)` of the new view.
    pub shape: (usize, usize),
    pub orientation: Orientation,
    pub symmetric: bool,
}

/// Sink for construction events.
pub trait OperatorObserver: Send + Sync {
    fn on_construct(&self, event: &OperatorEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl OperatorObserver for NoopObserver {
    fn on_construct(&self, _event: &OperatorEvent) {}
}

/// Emits `log::debug!` records for each event.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl OperatorObserver for LogObserver {
    fn on_construct(&self, event: &OperatorEvent) {
        match event.kind {
            OperatorKind::NormalEquations => log::debug!(
                target: "linop",
                "new normal-equations operator with shape {:?} ({})",
                event.shape,
                match event.orientation {
                    Orientation::Forward => "AᵗA",
                    Orientation::Transposed => "AAᵗ",
                }
            ),
            kind => log::debug!(
                target: "linop",
                "new {:?} operator with shape {:?}, transposed = {}, symmetric = {}",
                kind,
                event.shape,
                event.orientation.is_transposed(),
                event.symmetric
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_observer_accepts_events_without_a_logger() {
        let event = OperatorEvent {
            kind: OperatorKind::NormalEquations,
            shape: (3, 3),
            orientation: Orientation::Transposed,
            symmetric: true,
        };
        LogObserver.on_construct(&event);
        NoopObserver.on_construct(&event);
    }
}
