//! Injectable sink for advisory diagnostics.
//!
//! The engine reports a handful of conditions — undeclared destinations, a
//! missing initial state at build time, suppressed self-transitions — to a
//! caller-supplied sink. Diagnostics are purely advisory: the sink never
//! influences control flow, and the default sink discards everything.

use std::sync::Arc;

/// Receiver for human-readable warnings and errors from the engine.
pub trait DiagnosticSink {
    /// A recoverable oddity, e.g. a suppressed self-transition.
    fn warn(&self, message: &str);

    /// A rejected operation, e.g. a transition to an undeclared state.
    fn error(&self, message: &str);
}

/// Default sink: discards every diagnostic.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn warn(&self, _message: &str) {}

    fn error(&self, _message: &str) {}
}

/// Sink forwarding diagnostics to the `tracing` ecosystem under the
/// `machina` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn warn(&self, message: &str) {
        tracing::warn!(target: "machina", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "machina", "{message}");
    }
}

pub(crate) fn default_sink() -> Arc<dyn DiagnosticSink> {
    Arc::new(NullSink)
}
