//! Core hierarchical state machine types and logic.
//!
//! This module contains the pure part of the engine:
//! - State identities via the `State` trait
//! - The handler contract (`Hsm`, `Signal`, `Response`)
//! - Transition path resolution through the nearest common ancestor
//! - Bounded transition history
//!
//! Nothing here invokes handlers on its own. Running entry/exit actions
//! and queueing events is the job of the [`engine`](crate::engine).

mod defect;
mod handler;
mod history;
mod path;
mod signal;
mod state;

pub(crate) use defect::raise;
pub use defect::Defect;
pub use handler::Hsm;
pub use history::{TransitionHistory, TransitionRecord};
pub use path::{PathKind, TransitionPath};
pub use signal::{Response, Signal, TransitionAction};
pub use state::State;
