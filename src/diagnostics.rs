//! Process-wide diagnostic sink.
//!
//! The IR core never formats or prints diagnostics itself; it hands every
//! message to whatever handlers the embedding tool has registered. With no
//! handler registered, messages are dropped silently.
//!
//! Error-severity emission is gated by a [`FatalPolicy`]: the default
//! `Continue` returns to the caller, while `Abort` terminates the process.
//! Tools that treat IR inconsistencies as unrecoverable opt into `Abort`
//! explicitly via [`set_fatal_policy`].

use std::fmt;
use std::sync::LazyLock;

use parking_lot::RwLock;

use crate::location::Span;

/// How serious a diagnostic is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Note => "note",
        })
    }
}

/// A single reported message with its source position.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// Source path the message refers to; empty when the node had no location.
    pub path: String,
    pub span: Span,
}

/// What happens after an error-severity diagnostic is emitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FatalPolicy {
    /// Hand the message to the handlers and return to the caller.
    #[default]
    Continue,
    /// Hand the message to the handlers, then terminate the process.
    Abort,
}

/// Token returned by [`register_handler`], used to unregister later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

type Handler = Box<dyn Fn(&Diagnostic) + Send + Sync>;

struct Sink {
    next_id: u64,
    handlers: Vec<(u64, Handler)>,
    fatal_policy: FatalPolicy,
}

static SINK: LazyLock<RwLock<Sink>> = LazyLock::new(|| {
    RwLock::new(Sink {
        next_id: 0,
        handlers: Vec::new(),
        fatal_policy: FatalPolicy::Continue,
    })
});

/// Register a handler that receives every emitted diagnostic.
pub fn register_handler(handler: impl Fn(&Diagnostic) + Send + Sync + 'static) -> HandlerId {
    let mut sink = SINK.write();
    let id = sink.next_id;
    sink.next_id += 1;
    sink.handlers.push((id, Box::new(handler)));
    HandlerId(id)
}

/// Remove a previously registered handler. Unknown ids are ignored.
pub fn unregister_handler(id: HandlerId) {
    SINK.write().handlers.retain(|(key, _)| *key != id.0);
}

/// Replace the fatal policy, returning the previous one.
pub fn set_fatal_policy(policy: FatalPolicy) -> FatalPolicy {
    std::mem::replace(&mut SINK.write().fatal_policy, policy)
}

/// Hand a diagnostic to every registered handler.
///
/// When the diagnostic is [`Severity::Error`] and the policy is
/// [`FatalPolicy::Abort`], this call exits the process and does not return.
pub fn emit(diagnostic: Diagnostic) {
    // read_recursive(): a handler may emit follow-up notes without
    // deadlocking against a waiting writer.
    let sink = SINK.read_recursive();
    for (_, handler) in &sink.handlers {
        handler(&diagnostic);
    }
    if diagnostic.severity == Severity::Error && sink.fatal_policy == FatalPolicy::Abort {
        drop(sink);
        std::process::exit(1);
    }
}
