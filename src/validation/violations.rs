//! Hierarchy violations.

use thiserror::Error;

/// A defect found while checking a state hierarchy.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HierarchyViolation {
    #[error("Ancestor chain of '{state}' is longer than max depth {max_depth}")]
    DepthExceeded { state: String, max_depth: usize },

    #[error("Ancestor chain of '{state}' loops back through '{via}'")]
    Cycle { state: String, via: String },

    #[error("State '{state}' answered the parent query with {response}")]
    MissingParent { state: String, response: String },

    #[error("State '{state}' names parent '{parent}', which is not a listed state")]
    UnlistedParent { state: String, parent: String },
}
