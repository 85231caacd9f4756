//! Signals delivered to state handlers and the responses they return.

use super::handler::Hsm;
use crate::engine::Outbox;
use std::fmt;

/// What a handler is being asked to do.
///
/// The first three variants are reserved for the engine. User events travel
/// in [`Signal::Event`], so a user event can never be mistaken for a
/// framework query.
pub enum Signal<'a, E> {
    /// Name your parent state with [`Response::Parent`].
    Parent,
    /// Run the state's entry action.
    Entry,
    /// Run the state's exit action.
    Exit,
    /// A domain event sent with `send_event`.
    Event(&'a E),
}

impl<E> Signal<'_, E> {
    /// Returns `true` for the three engine-reserved signals.
    pub fn is_reserved(&self) -> bool {
        !matches!(self, Signal::Event(_))
    }

    /// The user event, if this is one.
    pub fn event(&self) -> Option<&E> {
        match self {
            Signal::Event(event) => Some(event),
            _ => None,
        }
    }
}

impl<E> Clone for Signal<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Signal<'_, E> {}

impl<E: fmt::Debug> fmt::Debug for Signal<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Parent => f.write_str("Parent"),
            Signal::Entry => f.write_str("Entry"),
            Signal::Exit => f.write_str("Exit"),
            Signal::Event(event) => f.debug_tuple("Event").field(event).finish(),
        }
    }
}

/// Action run between the exits and the entries of a transition.
pub type TransitionAction<H> = fn(&mut H, &mut Outbox<'_, <H as Hsm>::Event>);

/// Outcome of invoking a handler.
pub enum Response<H: Hsm> {
    /// The signal was fully processed.
    Handled,

    /// Not handled here; try this parent next. Also the answer to
    /// [`Signal::Parent`].
    Parent(H::State),

    /// Move the machine to the given state.
    Transition(H::State),

    /// Move the machine to the given state, running the action after all
    /// exits and before any entry.
    TransitionWith(H::State, TransitionAction<H>),
}

impl<H: Hsm> Response<H> {
    /// Target of a transition request, if this is one.
    pub fn transition_target(&self) -> Option<H::State> {
        match self {
            Response::Transition(target) | Response::TransitionWith(target, _) => Some(*target),
            _ => None,
        }
    }
}

impl<H: Hsm> fmt::Debug for Response<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Handled => f.write_str("Handled"),
            Response::Parent(state) => f.debug_tuple("Parent").field(state).finish(),
            Response::Transition(state) => f.debug_tuple("Transition").field(state).finish(),
            Response::TransitionWith(state, _) => {
                f.debug_tuple("TransitionWith").field(state).finish()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Ping(u32);

    #[test]
    fn reserved_signals_are_flagged() {
        let ping = Ping(1);
        assert!(Signal::<Ping>::Parent.is_reserved());
        assert!(Signal::<Ping>::Entry.is_reserved());
        assert!(Signal::<Ping>::Exit.is_reserved());
        assert!(!Signal::Event(&ping).is_reserved());
    }

    #[test]
    fn event_accessor_returns_payload() {
        let ping = Ping(7);
        assert_eq!(Signal::Event(&ping).event(), Some(&Ping(7)));
        assert_eq!(Signal::<Ping>::Entry.event(), None);
    }

    #[test]
    fn signal_debug_shows_payload() {
        let ping = Ping(3);
        assert_eq!(format!("{:?}", Signal::Event(&ping)), "Event(Ping(3))");
        assert_eq!(format!("{:?}", Signal::<Ping>::Exit), "Exit");
    }
}
