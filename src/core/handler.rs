//! The state handler contract implemented by embedding applications.

use super::signal::{Response, Signal};
use super::state::State;
use crate::engine::Outbox;
use std::fmt::Debug;

/// Behavior for every state of one hierarchical state machine.
///
/// The engine owns a value implementing this trait and calls
/// [`handle`](Hsm::handle) with the state being asked and the signal. A
/// typical implementation matches on `state` and then on `signal`.
///
/// Every non-root state must answer [`Signal::Parent`] with
/// [`Response::Parent`], and must give the same answer every time. The
/// parent query must not have side effects.
///
/// Handlers that need to send events to their own machine do so through
/// `outbox`; those events are queued and dispatched after the current one.
///
/// # Example
///
/// ```rust
/// use statetree::{state_enum, Hsm, Outbox, Response, Signal};
///
/// state_enum! {
///     pub enum Lamp {
///         Top,
///         Off,
///         On,
///     }
/// }
///
/// #[derive(Debug)]
/// pub enum Switch {
///     Toggle,
/// }
///
/// struct LampHsm {
///     lit: bool,
/// }
///
/// impl Hsm for LampHsm {
///     type State = Lamp;
///     type Event = Switch;
///
///     fn handle(
///         &mut self,
///         state: Lamp,
///         signal: Signal<'_, Switch>,
///         _outbox: &mut Outbox<'_, Switch>,
///     ) -> Response<Self> {
///         match (state, signal) {
///             (Lamp::Top, _) => Response::Handled,
///             (Lamp::On, Signal::Entry) => {
///                 self.lit = true;
///                 Response::Handled
///             }
///             (Lamp::On, Signal::Exit) => {
///                 self.lit = false;
///                 Response::Handled
///             }
///             (Lamp::Off, Signal::Event(Switch::Toggle)) => Response::Transition(Lamp::On),
///             (Lamp::On, Signal::Event(Switch::Toggle)) => Response::Transition(Lamp::Off),
///             _ => Response::Parent(Lamp::Top),
///         }
///     }
/// }
/// ```
pub trait Hsm: Sized {
    /// Identity type naming each state.
    type State: State;

    /// User event type.
    type Event: Debug;

    /// Respond to `signal` on behalf of `state`.
    fn handle(
        &mut self,
        state: Self::State,
        signal: Signal<'_, Self::Event>,
        outbox: &mut Outbox<'_, Self::Event>,
    ) -> Response<Self>;
}
