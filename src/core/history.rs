//! Transition history tracking.
//!
//! Every completed transition, including the start and stop transitions,
//! can be recorded with the exit and entry actions it ran. The history is
//! bounded; the oldest records are dropped first.

use super::path::{PathKind, TransitionPath};
use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single completed transition.
///
/// # Example
///
/// ```rust
/// use statetree::core::{PathKind, TransitionRecord};
/// use statetree::state_enum;
/// use chrono::Utc;
///
/// state_enum! {
///     enum Task { Top, Pending, Running }
/// }
///
/// let record = TransitionRecord {
///     sequence: 0,
///     from: Task::Pending,
///     to: Task::Running,
///     kind: PathKind::Lca,
///     exits: vec![Task::Pending],
///     entries: vec![Task::Running],
///     timestamp: Utc::now(),
/// };
/// assert_eq!(record.action_count(), 2);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionRecord<S: State> {
    /// Monotonic number of this transition within its machine
    pub sequence: u64,
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// Shape of the resolved path
    pub kind: PathKind,
    /// States exited, innermost first
    pub exits: Vec<S>,
    /// States entered, outermost first
    pub entries: Vec<S>,
    /// When the transition completed
    pub timestamp: DateTime<Utc>,
}

impl<S: State> TransitionRecord<S> {
    /// Build a record from a resolved path.
    pub fn from_path(sequence: u64, from: S, to: S, path: &TransitionPath<S>) -> Self {
        Self {
            sequence,
            from,
            to,
            kind: path.kind,
            exits: path.exits.clone(),
            entries: path.entries.clone(),
            timestamp: Utc::now(),
        }
    }

    /// Total exit and entry actions run by this transition.
    pub fn action_count(&self) -> usize {
        self.exits.len() + self.entries.len()
    }
}

/// Bounded, ordered history of transitions.
///
/// # Example
///
/// ```rust
/// use statetree::core::{PathKind, TransitionHistory, TransitionRecord};
/// use statetree::state_enum;
/// use chrono::Utc;
///
/// state_enum! {
///     enum Phase { Top, One, Two }
/// }
///
/// let mut history = TransitionHistory::with_limit(8);
/// history.record(TransitionRecord {
///     sequence: 0,
///     from: Phase::Top,
///     to: Phase::One,
///     kind: PathKind::FromRoot,
///     exits: vec![],
///     entries: vec![Phase::One],
///     timestamp: Utc::now(),
/// });
/// history.record(TransitionRecord {
///     sequence: 1,
///     from: Phase::One,
///     to: Phase::Two,
///     kind: PathKind::Lca,
///     exits: vec![Phase::One],
///     entries: vec![Phase::Two],
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.get_path(), vec![&Phase::Top, &Phase::One, &Phase::Two]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionHistory<S: State> {
    transitions: VecDeque<TransitionRecord<S>>,
    limit: usize,
    dropped: u64,
}

impl<S: State> Default for TransitionHistory<S> {
    fn default() -> Self {
        Self::with_limit(256)
    }
}

impl<S: State> TransitionHistory<S> {
    /// Create an empty history keeping at most `limit` records.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            transitions: VecDeque::new(),
            limit,
            dropped: 0,
        }
    }

    /// Append a record, evicting the oldest when full.
    pub fn record(&mut self, transition: TransitionRecord<S>) {
        if self.limit == 0 {
            self.dropped += 1;
            return;
        }
        if self.transitions.len() == self.limit {
            self.transitions.pop_front();
            self.dropped += 1;
        }
        self.transitions.push_back(transition);
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the oldest retained record, then the
    /// `to` state of each record.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Duration between the oldest and newest retained records.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.front(), self.transitions.back()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Retained records, oldest first.
    pub fn transitions(&self) -> impl Iterator<Item = &TransitionRecord<S>> {
        self.transitions.iter()
    }

    /// Most recent record.
    pub fn last(&self) -> Option<&TransitionRecord<S>> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Records evicted (or refused with a zero limit) so far.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Drop every record and reset the eviction counter.
    pub fn clear(&mut self) {
        self.transitions.clear();
        self.dropped = 0;
    }
}
