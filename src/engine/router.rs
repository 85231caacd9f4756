//! Event routing: offer an event to the current state and bubble it up
//! through the ancestors until someone handles it.

use crate::core::{raise, Defect, Hsm, Response, Signal, State, TransitionAction};
use crate::engine::machine::StateMachine;
use crate::engine::queue::Outbox;
use tracing::trace;

impl<H: Hsm> StateMachine<H> {
    /// Dispatch one event fully, including any transition it triggers.
    pub(super) fn dispatch(&mut self, event: H::Event) {
        // `current` stays fixed while bubbling; only a transition moves it.
        let mut state = self.current;
        loop {
            let response = {
                let mut outbox = Outbox::new(&mut self.queue);
                self.handler
                    .handle(state, Signal::Event(&event), &mut outbox)
            };
            match response {
                Response::Handled => return,
                Response::Parent(parent) => {
                    if state == self.root {
                        trace!(?event, "event reached the root unhandled, discarding");
                        return;
                    }
                    trace!(from = %state.name(), to = %parent.name(), "bubbling event");
                    state = parent;
                }
                Response::Transition(target) => {
                    self.request_transition(state, target, None);
                    return;
                }
                Response::TransitionWith(target, action) => {
                    self.request_transition(state, target, Some(action));
                    return;
                }
            }
        }
    }

    /// Transition from the current state on behalf of `requester`, which
    /// may be an ancestor of the current state.
    fn request_transition(
        &mut self,
        requester: H::State,
        target: H::State,
        action: Option<TransitionAction<H>>,
    ) {
        if target == self.root {
            raise(Defect::TransitionToRoot {
                from: requester.name().to_string(),
                root: self.root.name().to_string(),
            });
        }
        trace!(
            requester = %requester.name(),
            target = %target.name(),
            "transition requested"
        );
        self.perform_transition(self.current, target, action);
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{Hsm, Response, Signal, State};
    use crate::engine::{Outbox, StateMachine};
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum Node {
        Root,
        Outer,
        Inner,
        Other,
    }

    impl State for Node {
        fn name(&self) -> &str {
            match self {
                Self::Root => "Root",
                Self::Outer => "Outer",
                Self::Inner => "Inner",
                Self::Other => "Other",
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Ev {
        InnerOnly,
        OuterOnly,
        RootOnly,
        Nobody,
        GoOther,
        GoRoot,
    }

    // Root -> Outer -> Inner, Root -> Other
    #[derive(Default)]
    struct Recorder {
        seen: Vec<(Node, Ev)>,
    }

    impl Hsm for Recorder {
        type State = Node;
        type Event = Ev;

        fn handle(
            &mut self,
            state: Node,
            signal: Signal<'_, Ev>,
            _outbox: &mut Outbox<'_, Ev>,
        ) -> Response<Self> {
            if let Signal::Event(ev) = signal {
                self.seen.push((state, *ev));
            }
            match (state, signal) {
                (Node::Inner, Signal::Event(Ev::InnerOnly)) => Response::Handled,
                (Node::Outer, Signal::Event(Ev::OuterOnly)) => Response::Handled,
                (Node::Outer, Signal::Event(Ev::GoOther)) => Response::Transition(Node::Other),
                (Node::Outer, Signal::Event(Ev::GoRoot)) => Response::Transition(Node::Root),
                (Node::Root, Signal::Event(Ev::RootOnly)) => Response::Handled,
                (Node::Root, _) => Response::Parent(Node::Root),
                (Node::Inner, _) => Response::Parent(Node::Outer),
                _ => Response::Parent(Node::Root),
            }
        }
    }

    fn machine() -> StateMachine<Recorder> {
        let mut machine = StateMachine::new(Recorder::default(), Node::Root, Node::Inner);
        machine.start();
        machine
    }

    #[test]
    fn handled_by_current_state_stops_immediately() {
        let mut machine = machine();
        machine.send_event(Ev::InnerOnly);
        assert_eq!(machine.handler().seen, vec![(Node::Inner, Ev::InnerOnly)]);
    }

    #[test]
    fn bubbles_until_an_ancestor_handles() {
        let mut machine = machine();
        machine.send_event(Ev::RootOnly);
        assert_eq!(
            machine.handler().seen,
            vec![
                (Node::Inner, Ev::RootOnly),
                (Node::Outer, Ev::RootOnly),
                (Node::Root, Ev::RootOnly),
            ]
        );
        assert_eq!(machine.current_state(), Node::Inner);
    }

    #[test]
    fn root_discards_unhandled_events() {
        let mut machine = machine();
        machine.send_event(Ev::Nobody);
        assert_eq!(machine.handler().seen.len(), 3);
        assert_eq!(machine.current_state(), Node::Inner);
    }

    #[test]
    fn ancestor_transition_starts_from_current_state() {
        let mut machine = machine();
        machine.send_event(Ev::GoOther);

        let last = machine.history().last().unwrap();
        assert_eq!(last.from, Node::Inner);
        assert_eq!(last.exits, vec![Node::Inner, Node::Outer]);
        assert_eq!(last.entries, vec![Node::Other]);
        assert_eq!(machine.current_state(), Node::Other);
    }

    #[test]
    fn bubbling_does_not_move_current_state() {
        let mut machine = machine();
        machine.send_event(Ev::OuterOnly);
        machine.send_event(Ev::InnerOnly);
        assert_eq!(machine.handler().seen.last(), Some(&(Node::Inner, Ev::InnerOnly)));
    }

    #[test]
    #[should_panic(expected = "requested a transition into the root state")]
    fn transition_into_root_is_fatal() {
        let mut machine = machine();
        machine.send_event(Ev::GoRoot);
    }
}
