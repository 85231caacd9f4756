//! The imperative shell around the pure core.
//!
//! This module owns everything that actually invokes handlers:
//! - **Queue**: FIFO of pending events, flattened so that events sent by
//!   handlers never dispatch recursively
//! - **Router**: offers each event to the current state and bubbles it up
//!   through ancestors
//! - **Transition**: runs exit actions, the transition action and entry
//!   actions along a resolved path
//! - **Machine**: ties them together with start/stop sequencing

mod machine;
mod queue;
mod router;
mod transition;

pub use machine::{Phase, StateMachine};
pub use queue::{EventQueue, Outbox};
