//! Hierarchical state machine instance.

use crate::builder::MachineConfig;
use crate::core::{raise, Defect, Hsm, State, TransitionHistory, TransitionPath};
use crate::engine::queue::EventQueue;
use crate::validation::{HierarchyRules, HierarchyViolation};
use std::collections::HashMap;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::{debug, warn};

/// Lifecycle phase of a machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Built, no handler has been called yet.
    Constructed,
    /// `start()` has run; events are accepted.
    Running,
    /// `stop()` has run; the machine is back at the root.
    Stopped,
}

/// A hierarchical state machine driving one [`Hsm`] handler.
///
/// Construction records the root and initial states without calling any
/// handler. [`start`](Self::start) enters the initial state,
/// [`send_event`](Self::send_event) dispatches events, and
/// [`stop`](Self::stop) (also run on drop) exits back to the root.
pub struct StateMachine<H: Hsm> {
    pub(super) handler: H,
    pub(super) root: H::State,
    pub(super) initial: H::State,
    pub(super) current: H::State,
    pub(super) phase: Phase,
    pub(super) queue: EventQueue<H::Event>,
    pub(super) config: MachineConfig,
    pub(super) history: TransitionHistory<H::State>,
    pub(super) path_cache: HashMap<(H::State, H::State), TransitionPath<H::State>>,
    pub(super) sequence: u64,
}

impl<H: Hsm> StateMachine<H> {
    /// Create a machine with the default config.
    ///
    /// Raises [`Defect::InitialIsRoot`] if `initial == root`; use
    /// [`StateMachineBuilder`](crate::builder::StateMachineBuilder) to get
    /// that as an error value instead.
    pub fn new(handler: H, root: H::State, initial: H::State) -> Self {
        Self::with_config(handler, root, initial, MachineConfig::default())
    }

    /// Create a machine with an explicit config.
    ///
    /// Raises [`Defect::InvalidConfig`] if the config does not validate.
    pub fn with_config(
        handler: H,
        root: H::State,
        initial: H::State,
        config: MachineConfig,
    ) -> Self {
        if initial == root {
            raise(Defect::InitialIsRoot {
                state: initial.name().to_string(),
            });
        }
        if let Err(error) = config.validate() {
            raise(Defect::InvalidConfig {
                reason: error.to_string(),
            });
        }
        let history = TransitionHistory::with_limit(config.history_limit);
        Self {
            handler,
            root,
            initial,
            current: root,
            phase: Phase::Constructed,
            queue: EventQueue::new(),
            config,
            history,
            path_cache: HashMap::new(),
            sequence: 0,
        }
    }

    /// Enter the initial state, running entry actions from just below the
    /// root down to the initial state.
    ///
    /// Must be called exactly once. Events sent by those entry actions are
    /// dispatched once the initial transition has completed.
    pub fn start(&mut self) {
        if self.phase != Phase::Constructed {
            raise(Defect::AlreadyStarted);
        }
        debug!(
            root = %self.root.name(),
            initial = %self.initial.name(),
            "starting state machine"
        );
        self.phase = Phase::Running;

        self.queue.set_dispatching(true);
        self.perform_transition(self.root, self.initial, None);
        self.drain();
    }

    /// Send an event to the machine.
    ///
    /// The event is offered to the current state and bubbles up through
    /// its ancestors until one handles it or requests a transition. Events
    /// sent by handlers while this runs are dispatched afterwards, in order,
    /// before this call returns.
    pub fn send_event(&mut self, event: H::Event) {
        match self.phase {
            Phase::Constructed => raise(Defect::NotStarted),
            Phase::Stopped => raise(Defect::Stopped),
            Phase::Running => {}
        }
        if self.queue.is_dispatching() {
            raise(Defect::Poisoned);
        }
        self.queue.push(event);
        self.queue.set_dispatching(true);
        self.drain();
    }

    /// Exit every active state up to the root.
    ///
    /// Safe to call more than once; only the first call on a running
    /// machine does anything. Events sent by exit actions are discarded.
    pub fn stop(&mut self) {
        match self.phase {
            Phase::Running => {}
            Phase::Constructed => {
                self.phase = Phase::Stopped;
                return;
            }
            Phase::Stopped => return,
        }
        if self.queue.is_dispatching() {
            warn!(
                state = %self.current.name(),
                "skipping teardown of a machine poisoned by a panic"
            );
            self.phase = Phase::Stopped;
            return;
        }

        debug!(state = %self.current.name(), "stopping state machine");
        self.queue.set_dispatching(true);
        self.perform_transition(self.current, self.root, None);
        self.queue.set_dispatching(false);

        let discarded = self.queue.take();
        if !discarded.is_empty() {
            warn!(
                count = discarded.len(),
                "discarding events sent during teardown"
            );
        }
        self.phase = Phase::Stopped;
    }

    /// Dispatch queued events until the queue is empty.
    ///
    /// The caller sets the dispatching flag. If a handler panics it stays
    /// set, which later marks the machine as poisoned.
    fn drain(&mut self) {
        while let Some(event) = self.queue.pop() {
            self.dispatch(event);
        }
        self.queue.set_dispatching(false);
    }

    /// Compute the path between two states without running any action.
    ///
    /// Parent queries are still sent to the handler (or served from the
    /// path cache when enabled).
    pub fn resolve_path(&mut self, src: H::State, dst: H::State) -> TransitionPath<H::State> {
        self.path_between(src, dst)
    }

    /// Check the hierarchy reachable from `states`, collecting every
    /// violation rather than stopping at the first.
    pub fn validate_hierarchy(
        &mut self,
        states: &[H::State],
    ) -> Validation<(), NonEmptyVec<HierarchyViolation>> {
        HierarchyRules::new(self.config.max_depth).enforce(&mut self.handler, self.root, states)
    }

    /// The state that gets first offer of new events.
    ///
    /// This is the root before `start()` and after `stop()`.
    pub fn current_state(&self) -> H::State {
        self.current
    }

    /// The state entered by `start()`.
    pub fn initial_state(&self) -> H::State {
        self.initial
    }

    /// The fixed root of the tree.
    pub fn root_state(&self) -> H::State {
        self.root
    }

    /// Where the machine is in its start/stop lifecycle.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True between `start()` and `stop()`.
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// The handler driven by this machine.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Mutable access to the handler, outside of any dispatch.
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Transitions recorded so far (empty if history is disabled).
    pub fn history(&self) -> &TransitionHistory<H::State> {
        &self.history
    }

    /// The config this machine was built with.
    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Events queued but not yet dispatched.
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }
}

impl<H: Hsm> Drop for StateMachine<H> {
    fn drop(&mut self) {
        if !std::thread::panicking() {
            self.stop();
        }
    }
}
