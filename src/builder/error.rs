//! Build errors for the state machine builder.

use crate::builder::config::ConfigError;
use crate::validation::HierarchyViolation;
use thiserror::Error;

/// Errors that can occur when building a state machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Root state not specified. Call .root(state) before .build()")]
    MissingRoot,

    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Initial state '{state}' is the root state")]
    InitialIsRoot { state: String },

    #[error("Invalid machine config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Hierarchy validation failed with {} violation(s)", .0.len())]
    InvalidHierarchy(Vec<HierarchyViolation>),
}
