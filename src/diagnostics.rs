//! Diagnostic events emitted while performing operations.
//!
//! Events are informational only. Every failure is still returned through the operation's
//! `Result`.

use std::fmt;
use std::sync::Arc;

/// Something noteworthy that happened during an operation.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticEvent {
    /// The operation that emitted the event, e.g. `"accept_offer"`.
    pub operation: &'static str,
    /// What happened.
    pub message: String,
}

impl fmt::Display for DiagnosticEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.operation, self.message)
    }
}

/// Receives diagnostic events.
pub trait DiagnosticHook: fmt::Debug + Send + Sync {
    /// Called for each event.
    fn on_event(&self, event: &DiagnosticEvent);
}

/// Forwards events to the `log` facade at debug level. This is the default hook.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogHook;

impl DiagnosticHook for LogHook {
    fn on_event(&self, event: &DiagnosticEvent) {
        log::debug!("{event}");
    }
}

/// Shared handle to a hook.
pub(crate) type SharedHook = Arc<dyn DiagnosticHook>;

/// Emits an event to the hook.
pub(crate) fn emit(hook: &SharedHook, operation: &'static str, message: impl fmt::Display) {
    hook.on_event(&DiagnosticEvent {
        operation,
        message: message.to_string(),
    });
}
