//! Statetree: a hierarchical state machine runtime
//!
//! Statetree dispatches events to user-defined state handlers arranged in a
//! parent/child tree. Unhandled events bubble toward the root, and
//! transitions between any two states run the correct exit and entry
//! actions by walking up to their nearest common ancestor.
//!
//! # Core Concepts
//!
//! - **State**: a cheap, copyable identity naming one state (`State` trait)
//! - **Handler**: one `Hsm` implementation answering parent queries, entry
//!   and exit actions and domain events for every state
//! - **Transition path**: the ordered exits and entries between two states,
//!   resolved through their nearest common ancestor
//! - **Machine**: queues events, routes them and sequences start and stop
//!
//! The path resolution in [`core`] is pure; everything that invokes
//! handlers lives in [`engine`].
//!
//! # Example
//!
//! ```rust
//! use statetree::{state_enum, Hsm, Outbox, Response, Signal, StateMachine};
//!
//! state_enum! {
//!     pub enum Player {
//!         Top,
//!         Active,
//!         Playing,
//!         Paused,
//!         Stopped,
//!     }
//! }
//!
//! #[derive(Debug)]
//! pub enum Button {
//!     Play,
//!     Pause,
//!     Stop,
//! }
//!
//! #[derive(Default)]
//! struct PlayerHsm {
//!     log: Vec<String>,
//! }
//!
//! impl Hsm for PlayerHsm {
//!     type State = Player;
//!     type Event = Button;
//!
//!     fn handle(
//!         &mut self,
//!         state: Player,
//!         signal: Signal<'_, Button>,
//!         _outbox: &mut Outbox<'_, Button>,
//!     ) -> Response<Self> {
//!         use statetree::core::State;
//!         match signal {
//!             Signal::Entry => {
//!                 self.log.push(format!("enter {}", state.name()));
//!                 return Response::Handled;
//!             }
//!             Signal::Exit => {
//!                 self.log.push(format!("exit {}", state.name()));
//!                 return Response::Handled;
//!             }
//!             _ => {}
//!         }
//!         match (state, signal) {
//!             (Player::Playing, Signal::Event(Button::Pause)) => Response::Transition(Player::Paused),
//!             (Player::Paused, Signal::Event(Button::Play)) => Response::Transition(Player::Playing),
//!             (Player::Active, Signal::Event(Button::Stop)) => Response::Transition(Player::Stopped),
//!             (Player::Stopped, Signal::Event(Button::Play)) => Response::Transition(Player::Playing),
//!             (Player::Playing | Player::Paused, _) => Response::Parent(Player::Active),
//!             _ => Response::Parent(Player::Top),
//!         }
//!     }
//! }
//!
//! let mut machine = StateMachine::new(PlayerHsm::default(), Player::Top, Player::Playing);
//! machine.start();
//! machine.send_event(Button::Pause);
//! machine.send_event(Button::Stop); // handled by Active, the parent of Paused
//! assert_eq!(machine.current_state(), Player::Stopped);
//! assert_eq!(
//!     machine.handler().log,
//!     vec!["enter Active", "enter Playing", "exit Playing", "enter Paused", "exit Paused", "exit Active", "enter Stopped"]
//! );
//! ```

pub mod builder;
pub mod core;
pub mod engine;
pub mod validation;

// Re-export commonly used types
pub use crate::builder::{BuildError, MachineConfig, StateMachineBuilder};
pub use crate::core::{Defect, Hsm, PathKind, Response, Signal, State, TransitionPath};
pub use crate::engine::{Outbox, Phase, StateMachine};
