//! Transition execution: run exits, the optional transition action and
//! entries along a resolved path, then move the current state.

use crate::core::{
    raise, Defect, Hsm, Response, Signal, State, TransitionAction, TransitionPath,
    TransitionRecord,
};
use crate::engine::machine::StateMachine;
use crate::engine::queue::{EventQueue, Outbox};
use tracing::{debug, warn};

impl<H: Hsm> StateMachine<H> {
    /// Move from `src` to `dst`.
    ///
    /// `current` is only updated after every action has run. Events sent by
    /// the actions stay queued until the caller's drain loop picks them up.
    pub(super) fn perform_transition(
        &mut self,
        src: H::State,
        dst: H::State,
        action: Option<TransitionAction<H>>,
    ) {
        let path = self.path_between(src, dst);

        for &state in &path.exits {
            self.run_action(state, Signal::Exit);
        }
        if let Some(action) = action {
            let mut outbox = Outbox::new(&mut self.queue);
            action(&mut self.handler, &mut outbox);
        }
        for &state in &path.entries {
            self.run_action(state, Signal::Entry);
        }

        self.current = dst;
        debug!(
            from = %src.name(),
            to = %dst.name(),
            kind = ?path.kind,
            exits = path.exits.len(),
            entries = path.entries.len(),
            "transition complete"
        );

        if self.config.record_history {
            self.history
                .record(TransitionRecord::from_path(self.sequence, src, dst, &path));
        }
        self.sequence += 1;
    }

    /// Resolve (or look up) the path between two states.
    pub(super) fn path_between(&mut self, src: H::State, dst: H::State) -> TransitionPath<H::State> {
        if self.config.cache_paths {
            if let Some(path) = self.path_cache.get(&(src, dst)) {
                return path.clone();
            }
        }

        let root = self.root;
        let max_depth = self.config.max_depth;
        let handler = &mut self.handler;
        let queue = &mut self.queue;
        let path = TransitionPath::resolve(src, dst, root, max_depth, |state| {
            query_parent(handler, queue, state)
        });

        if self.config.cache_paths {
            self.path_cache.insert((src, dst), path.clone());
        }
        path
    }

    fn run_action(&mut self, state: H::State, signal: Signal<'_, H::Event>) {
        let mut outbox = Outbox::new(&mut self.queue);
        let response = self.handler.handle(state, signal, &mut outbox);
        if let Some(target) = response.transition_target() {
            warn!(
                state = %state.name(),
                target = %target.name(),
                ?signal,
                "ignoring transition requested from an entry/exit action"
            );
        }
    }
}

/// Ask `state` for its parent. Anything but [`Response::Parent`] is a
/// wiring defect, since the root is never asked.
fn query_parent<H: Hsm>(
    handler: &mut H,
    queue: &mut EventQueue<H::Event>,
    state: H::State,
) -> H::State {
    let mut outbox = Outbox::new(queue);
    match handler.handle(state, Signal::Parent, &mut outbox) {
        Response::Parent(parent) => parent,
        other => raise(Defect::MissingParent {
            state: state.name().to_string(),
            response: format!("{other:?}"),
        }),
    }
}
