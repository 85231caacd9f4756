//! Builder API for ergonomic state machine construction.
//!
//! This module provides the fluent machine builder, its configuration and
//! the `state_enum!` macro for declaring state identities with minimal
//! boilerplate.

pub mod config;
pub mod error;
pub mod machine;
pub mod macros;

pub use config::{ConfigError, MachineConfig};
pub use error::BuildError;
pub use machine::StateMachineBuilder;
