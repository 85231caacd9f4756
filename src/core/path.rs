//! Transition path resolution.
//!
//! Given a source and destination state, compute which states must be
//! exited and which entered. The tree is discovered through a parent lookup
//! supplied by the caller, so this module never touches handlers and has no
//! side effects beyond that lookup.

use super::defect::{raise, Defect};
use super::state::State;
use serde::{Deserialize, Serialize};

/// Shape of a resolved transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathKind {
    /// Source and destination are the same state.
    SelfLoop,
    /// Source is the root: only entries, root-to-leaf.
    FromRoot,
    /// Destination is the root: only exits, leaf-to-root.
    ToRoot,
    /// General case through the nearest common ancestor.
    Lca,
}

/// Ordered exit and entry actions for one transition.
///
/// `exits` are in execution order (innermost first), as are `entries`
/// (outermost first). The common ancestor appears in neither list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionPath<S: State> {
    pub kind: PathKind,
    pub exits: Vec<S>,
    pub entries: Vec<S>,
    /// Nearest common ancestor; `None` for a self-transition.
    pub ancestor: Option<S>,
}

impl<S: State> TransitionPath<S> {
    /// Resolve the path from `src` to `dst`.
    ///
    /// `parent_of` is only ever called with non-root states. Any ancestor
    /// chain longer than `max_depth` (counting the starting state and the
    /// root) raises [`Defect::DepthExceeded`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use statetree::core::{PathKind, TransitionPath};
    /// use statetree::state_enum;
    ///
    /// state_enum! {
    ///     enum Node { Root, A, B, C }
    /// }
    ///
    /// // Root -> A -> {B, C}
    /// let parent_of = |s: Node| match s {
    ///     Node::B | Node::C => Node::A,
    ///     _ => Node::Root,
    /// };
    ///
    /// let path = TransitionPath::resolve(Node::B, Node::C, Node::Root, 10, parent_of);
    /// assert_eq!(path.kind, PathKind::Lca);
    /// assert_eq!(path.exits, vec![Node::B]);
    /// assert_eq!(path.entries, vec![Node::C]);
    /// assert_eq!(path.ancestor, Some(Node::A));
    /// ```
    pub fn resolve<F>(src: S, dst: S, root: S, max_depth: usize, mut parent_of: F) -> Self
    where
        F: FnMut(S) -> S,
    {
        if src == dst {
            return Self {
                kind: PathKind::SelfLoop,
                exits: vec![src],
                entries: vec![dst],
                ancestor: None,
            };
        }

        if src == root {
            let mut chain = Chain::climb(dst, root, max_depth, &mut parent_of);
            chain.states.pop();
            chain.states.reverse();
            return Self {
                kind: PathKind::FromRoot,
                exits: Vec::new(),
                entries: chain.states,
                ancestor: Some(root),
            };
        }

        if dst == root {
            let mut chain = Chain::climb(src, root, max_depth, &mut parent_of);
            chain.states.pop();
            return Self {
                kind: PathKind::ToRoot,
                exits: chain.states,
                entries: Vec::new(),
                ancestor: Some(root),
            };
        }

        let mut srcs = Chain::new(src, max_depth);
        let mut dsts = Chain::new(dst, max_depth);

        // Walk both chains up one hop at a time. The path is complete once
        // the tail of either chain appears anywhere in the other; this also
        // covers one state being an ancestor of the other at unequal depth.
        while srcs.tail() != dsts.tail() {
            if srcs.truncate_after(dsts.tail()) {
                break;
            }
            if dsts.truncate_after(srcs.tail()) {
                break;
            }
            if srcs.tail() != root {
                srcs.push(parent_of(srcs.tail()));
            }
            if dsts.tail() != root {
                dsts.push(parent_of(dsts.tail()));
            }
        }
        debug_assert_eq!(srcs.tail(), dsts.tail());

        let ancestor = srcs.states.pop();
        dsts.states.pop();
        dsts.states.reverse();

        Self {
            kind: PathKind::Lca,
            exits: srcs.states,
            entries: dsts.states,
            ancestor,
        }
    }

    /// Number of entry and exit actions on this path.
    pub fn len(&self) -> usize {
        self.exits.len() + self.entries.len()
    }

    /// True when the transition runs no actions at all.
    pub fn is_empty(&self) -> bool {
        self.exits.is_empty() && self.entries.is_empty()
    }
}

/// A state followed by the ancestors discovered so far.
struct Chain<S: State> {
    states: Vec<S>,
    max_depth: usize,
}

impl<S: State> Chain<S> {
    fn new(start: S, max_depth: usize) -> Self {
        let mut states = Vec::with_capacity(max_depth.min(16));
        states.push(start);
        Self { states, max_depth }
    }

    /// Chain from `start` up to and including `root`.
    fn climb<F>(start: S, root: S, max_depth: usize, parent_of: &mut F) -> Self
    where
        F: FnMut(S) -> S,
    {
        let mut chain = Self::new(start, max_depth);
        while chain.tail() != root {
            let parent = parent_of(chain.tail());
            chain.push(parent);
        }
        chain
    }

    fn tail(&self) -> S {
        self.states[self.states.len() - 1]
    }

    fn push(&mut self, state: S) {
        self.states.push(state);
        if self.states.len() > self.max_depth {
            raise(Defect::DepthExceeded {
                state: self.states[0].name().to_string(),
                max_depth: self.max_depth,
            });
        }
    }

    /// If `state` is in the chain, drop everything above it and return true.
    fn truncate_after(&mut self, state: S) -> bool {
        match self.states.iter().position(|s| *s == state) {
            Some(index) => {
                self.states.truncate(index + 1);
                true
            }
            None => false,
        }
    }
}
