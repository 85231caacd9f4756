//! State identity trait for hierarchical state machines.
//!
//! A state identity names exactly one state handler in the tree. It carries
//! no behavior of its own; behavior lives in the [`Hsm`](crate::Hsm)
//! implementation that matches on it.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state identities.
///
/// Identities are compared on every hop of a tree walk, so they must be
/// `Copy` and cheap to compare. A fieldless enum is the usual choice; see
/// [`state_enum!`](crate::state_enum) to generate one.
///
/// # Required Traits
///
/// - `Copy` + `Eq`: identities are passed by value and compared during walks
/// - `Hash`: identities key the optional transition path cache
/// - `Debug`: identities appear in defect diagnostics
/// - `Serialize` + `Deserialize`: identities appear in exported history
///
/// # Example
///
/// ```rust
/// use statetree::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Door {
///     Top,
///     Closed,
///     Locked,
///     Open,
/// }
///
/// impl State for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Top => "Top",
///             Self::Closed => "Closed",
///             Self::Locked => "Locked",
///             Self::Open => "Open",
///         }
///     }
/// }
/// ```
pub trait State:
    Copy + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}
