//! Hierarchy rules checked with Validation.

use crate::core::{Hsm, Response, Signal, State};
use crate::engine::EventQueue;
use crate::validation::violations::HierarchyViolation;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::warn;

/// Rules a state hierarchy must satisfy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HierarchyRules {
    pub(crate) max_depth: usize,
    pub(crate) strict: bool,
}

impl HierarchyRules {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            strict: false,
        }
    }

    /// Also require every reported parent to be one of the listed states.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Walk every listed state up to `root`, accumulating ALL violations.
    ///
    /// Only parent queries are sent to `handler`. Events a handler sends
    /// while answering one are discarded.
    pub fn enforce<H: Hsm>(
        &self,
        handler: &mut H,
        root: H::State,
        states: &[H::State],
    ) -> Validation<(), NonEmptyVec<HierarchyViolation>> {
        let mut scratch = EventQueue::new();
        let checks: Vec<Validation<(), NonEmptyVec<HierarchyViolation>>> = states
            .iter()
            .filter(|state| **state != root)
            .map(|state| self.check_state(handler, &mut scratch, root, *state, states))
            .collect();

        if !scratch.is_empty() {
            warn!(
                count = scratch.len(),
                "discarding events sent while answering parent queries"
            );
        }

        Validation::all_vec(checks).map(|_| ())
    }

    fn check_state<H: Hsm>(
        &self,
        handler: &mut H,
        scratch: &mut EventQueue<H::Event>,
        root: H::State,
        state: H::State,
        listed: &[H::State],
    ) -> Validation<(), NonEmptyVec<HierarchyViolation>> {
        let mut chain = vec![state];
        let mut tail = state;
        loop {
            let mut outbox = scratch.outbox();
            let parent = match handler.handle(tail, Signal::Parent, &mut outbox) {
                Response::Parent(parent) => parent,
                other => {
                    return Validation::fail(HierarchyViolation::MissingParent {
                        state: tail.name().to_string(),
                        response: format!("{other:?}"),
                    })
                }
            };

            if self.strict && parent != root && !listed.contains(&parent) {
                return Validation::fail(HierarchyViolation::UnlistedParent {
                    state: tail.name().to_string(),
                    parent: parent.name().to_string(),
                });
            }
            if chain.contains(&parent) {
                return Validation::fail(HierarchyViolation::Cycle {
                    state: state.name().to_string(),
                    via: parent.name().to_string(),
                });
            }

            chain.push(parent);
            // The root still has to come if we have not reached it.
            let length = if parent == root {
                chain.len()
            } else {
                chain.len() + 1
            };
            if length > self.max_depth {
                return Validation::fail(HierarchyViolation::DepthExceeded {
                    state: state.name().to_string(),
                    max_depth: self.max_depth,
                });
            }
            if parent == root {
                return Validation::success(());
            }
            tail = parent;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Outbox;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum Node {
        Root,
        A,
        B,
        C,
        D,
        E,
    }

    impl State for Node {
        fn name(&self) -> &str {
            match self {
                Self::Root => "Root",
                Self::A => "A",
                Self::B => "B",
                Self::C => "C",
                Self::D => "D",
                Self::E => "E",
            }
        }
    }

    /// Parent table; `None` answers the parent query with `Handled`.
    struct Table(fn(Node) -> Option<Node>);

    impl Hsm for Table {
        type State = Node;
        type Event = ();

        fn handle(
            &mut self,
            state: Node,
            signal: Signal<'_, ()>,
            _outbox: &mut Outbox<'_, ()>,
        ) -> Response<Self> {
            match signal {
                Signal::Parent => match (self.0)(state) {
                    Some(parent) => Response::Parent(parent),
                    None => Response::Handled,
                },
                _ => Response::Handled,
            }
        }
    }

    const ALL: [Node; 6] = [Node::Root, Node::A, Node::B, Node::C, Node::D, Node::E];

    // Root -> A -> B -> C, Root -> D -> E
    fn well_formed(s: Node) -> Option<Node> {
        Some(match s {
            Node::B => Node::A,
            Node::C => Node::B,
            Node::E => Node::D,
            _ => Node::Root,
        })
    }

    #[test]
    fn well_formed_tree_passes() {
        let result = HierarchyRules::new(10).enforce(&mut Table(well_formed), Node::Root, &ALL);
        assert!(result.is_success());
    }

    #[test]
    fn depth_counts_state_through_root() {
        // C -> B -> A -> Root is four states long.
        let rules = HierarchyRules::new(4);
        assert!(rules
            .enforce(&mut Table(well_formed), Node::Root, &ALL)
            .is_success());

        let rules = HierarchyRules::new(3);
        let result = rules.enforce(&mut Table(well_formed), Node::Root, &ALL);
        match result {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 1);
                assert!(errors.iter().any(|e| matches!(
                    e,
                    HierarchyViolation::DepthExceeded { state, max_depth: 3 } if state == "C"
                )));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn accumulates_all_violations() {
        // A <-> B cycle, C has no parent answer, D and E are fine.
        fn broken(s: Node) -> Option<Node> {
            match s {
                Node::A => Some(Node::B),
                Node::B => Some(Node::A),
                Node::C => None,
                Node::E => Some(Node::D),
                _ => Some(Node::Root),
            }
        }

        let result = HierarchyRules::new(10).enforce(&mut Table(broken), Node::Root, &ALL);
        match result {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 3);
                let cycles = errors
                    .iter()
                    .filter(|e| matches!(e, HierarchyViolation::Cycle { .. }))
                    .count();
                let missing = errors
                    .iter()
                    .filter(|e| matches!(e, HierarchyViolation::MissingParent { .. }))
                    .count();
                assert_eq!(cycles, 2);
                assert_eq!(missing, 1);
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn strict_rules_reject_unlisted_parents() {
        let listed = [Node::Root, Node::B, Node::C];
        let lenient = HierarchyRules::new(10).enforce(&mut Table(well_formed), Node::Root, &listed);
        assert!(lenient.is_success());

        let strict = HierarchyRules::new(10)
            .strict(true)
            .enforce(&mut Table(well_formed), Node::Root, &listed);
        match strict {
            Validation::Failure(errors) => {
                assert!(errors
                    .iter()
                    .all(|e| matches!(e, HierarchyViolation::UnlistedParent { parent, .. } if parent == "A")));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn root_is_never_queried() {
        fn root_panics(s: Node) -> Option<Node> {
            assert_ne!(s, Node::Root, "root must not be asked for a parent");
            well_formed(s)
        }
        let result = HierarchyRules::new(10).enforce(&mut Table(root_panics), Node::Root, &ALL);
        assert!(result.is_success());
    }
}
