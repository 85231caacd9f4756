//! Fatal wiring defects.
//!
//! These are programming errors in the embedding application: a malformed
//! state tree or a machine driven in the wrong order. They are never
//! returned as values. The engine logs the defect and panics with its
//! message.

use thiserror::Error;

/// A violated engine invariant.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Defect {
    #[error("send_event called before start()")]
    NotStarted,

    #[error("start() called more than once")]
    AlreadyStarted,

    #[error("send_event called after stop()")]
    Stopped,

    #[error("machine poisoned: a previous dispatch panicked while draining the queue")]
    Poisoned,

    #[error("ancestor chain of '{state}' exceeds max depth {max_depth} (cycle or hierarchy too deep)")]
    DepthExceeded { state: String, max_depth: usize },

    #[error("state '{state}' answered the parent query with {response} instead of naming a parent")]
    MissingParent { state: String, response: String },

    #[error("state '{from}' requested a transition into the root state '{root}'")]
    TransitionToRoot { from: String, root: String },

    #[error("initial state '{state}' is the root state")]
    InitialIsRoot { state: String },

    #[error("invalid machine config: {reason}")]
    InvalidConfig { reason: String },
}

/// Log `defect` and abort the current operation.
#[track_caller]
pub(crate) fn raise(defect: Defect) -> ! {
    tracing::error!(%defect, "state machine defect");
    panic!("{defect}");
}
