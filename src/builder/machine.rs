//! Builder for constructing state machines.

use crate::builder::config::MachineConfig;
use crate::builder::error::BuildError;
use crate::core::{Hsm, State};
use crate::engine::StateMachine;
use crate::validation::HierarchyRules;
use stillwater::validation::Validation;

/// Builder for constructing state machines with a fluent API.
///
/// Unlike [`StateMachine::new`], misconfiguration comes back as a
/// [`BuildError`] rather than a panic. Listing the machine's states with
/// [`validate`](Self::validate) also checks the whole hierarchy before the
/// machine exists.
pub struct StateMachineBuilder<H: Hsm> {
    handler: H,
    root: Option<H::State>,
    initial: Option<H::State>,
    config: MachineConfig,
    states: Vec<H::State>,
    strict: bool,
}

impl<H: Hsm> StateMachineBuilder<H> {
    /// Create a new builder around the handler.
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            root: None,
            initial: None,
            config: MachineConfig::default(),
            states: Vec::new(),
            strict: false,
        }
    }

    /// Set the root state (required).
    pub fn root(mut self, state: H::State) -> Self {
        self.root = Some(state);
        self
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: H::State) -> Self {
        self.initial = Some(state);
        self
    }

    /// Replace the whole config.
    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    pub fn record_history(mut self, record: bool) -> Self {
        self.config.record_history = record;
        self
    }

    pub fn history_limit(mut self, limit: usize) -> Self {
        self.config.history_limit = limit;
        self
    }

    pub fn cache_paths(mut self, cache: bool) -> Self {
        self.config.cache_paths = cache;
        self
    }

    /// Check these states' ancestor chains when building.
    pub fn validate<I>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = H::State>,
    {
        self.states.extend(states);
        self
    }

    /// Also reject parents that are not among the validated states.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Build the state machine. The machine is not started.
    pub fn build(mut self) -> Result<StateMachine<H>, BuildError> {
        let root = self.root.ok_or(BuildError::MissingRoot)?;
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if initial == root {
            return Err(BuildError::InitialIsRoot {
                state: initial.name().to_string(),
            });
        }
        self.config.validate()?;

        if !self.states.is_empty() {
            let rules = HierarchyRules::new(self.config.max_depth).strict(self.strict);
            if let Validation::Failure(errors) =
                rules.enforce(&mut self.handler, root, &self.states)
            {
                return Err(BuildError::InvalidHierarchy(errors.iter().cloned().collect()));
            }
        }

        Ok(StateMachine::with_config(
            self.handler,
            root,
            initial,
            self.config,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ConfigError;
    use crate::core::{Response, Signal};
    use crate::engine::{Outbox, Phase};
    use crate::validation::HierarchyViolation;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        Top,
        Idle,
        Busy,
        Orphan,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Top => "Top",
                Self::Idle => "Idle",
                Self::Busy => "Busy",
                Self::Orphan => "Orphan",
            }
        }
    }

    #[derive(Default)]
    struct Worker {
        calls: usize,
    }

    impl Hsm for Worker {
        type State = TestState;
        type Event = ();

        fn handle(
            &mut self,
            state: TestState,
            _signal: Signal<'_, ()>,
            _outbox: &mut Outbox<'_, ()>,
        ) -> Response<Self> {
            self.calls += 1;
            match state {
                TestState::Orphan => Response::Handled,
                TestState::Busy => Response::Parent(TestState::Idle),
                _ => Response::Parent(TestState::Top),
            }
        }
    }

    #[test]
    fn builder_validates_required_fields() {
        let result = StateMachineBuilder::new(Worker::default()).build();
        assert!(matches!(result, Err(BuildError::MissingRoot)));

        let result = StateMachineBuilder::new(Worker::default())
            .root(TestState::Top)
            .build();
        assert!(matches!(result, Err(BuildError::MissingInitialState)));
    }

    #[test]
    fn builder_rejects_initial_root() {
        let result = StateMachineBuilder::new(Worker::default())
            .root(TestState::Top)
            .initial(TestState::Top)
            .build();
        assert!(matches!(result, Err(BuildError::InitialIsRoot { .. })));
    }

    #[test]
    fn builder_rejects_bad_config() {
        let result = StateMachineBuilder::new(Worker::default())
            .root(TestState::Top)
            .initial(TestState::Idle)
            .max_depth(1)
            .build();
        assert!(matches!(
            result,
            Err(BuildError::InvalidConfig(ConfigError::MaxDepthTooSmall { .. }))
        ));
    }

    #[test]
    fn fluent_api_builds_unstarted_machine() {
        let machine = StateMachineBuilder::new(Worker::default())
            .root(TestState::Top)
            .initial(TestState::Busy)
            .cache_paths(true)
            .history_limit(4)
            .build()
            .unwrap();

        assert_eq!(machine.phase(), Phase::Constructed);
        assert_eq!(machine.handler().calls, 0);
        assert!(machine.config().cache_paths);
        assert_eq!(machine.config().history_limit, 4);
    }

    #[test]
    fn builder_reports_hierarchy_violations() {
        let result = StateMachineBuilder::new(Worker::default())
            .root(TestState::Top)
            .initial(TestState::Busy)
            .validate([TestState::Idle, TestState::Busy, TestState::Orphan])
            .build();

        match result {
            Err(BuildError::InvalidHierarchy(violations)) => {
                assert_eq!(violations.len(), 1);
                assert!(matches!(
                    &violations[0],
                    HierarchyViolation::MissingParent { state, .. } if state == "Orphan"
                ));
            }
            other => panic!("Expected InvalidHierarchy, got {:?}", other.err()),
        }
    }

    #[test]
    fn validated_machine_starts() {
        let mut machine = StateMachineBuilder::new(Worker::default())
            .root(TestState::Top)
            .initial(TestState::Busy)
            .validate([TestState::Top, TestState::Idle, TestState::Busy])
            .strict(true)
            .build()
            .unwrap();

        machine.start();
        assert_eq!(machine.current_state(), TestState::Busy);
    }
}
