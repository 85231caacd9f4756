//! Hierarchy validation.
//!
//! At runtime a malformed tree is a fatal defect found on the first walk
//! that hits it. This module checks a whole hierarchy up front and, using
//! Stillwater's `Validation`, reports every violation in one pass instead
//! of stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use statetree::validation::HierarchyRules;
//! use statetree::{state_enum, Hsm, Outbox, Response, Signal};
//!
//! state_enum! {
//!     enum Node { Root, Parent, Child }
//! }
//!
//! struct Tree;
//!
//! impl Hsm for Tree {
//!     type State = Node;
//!     type Event = ();
//!
//!     fn handle(&mut self, state: Node, _: Signal<'_, ()>, _: &mut Outbox<'_, ()>) -> Response<Self> {
//!         match state {
//!             Node::Child => Response::Parent(Node::Parent),
//!             _ => Response::Parent(Node::Root),
//!         }
//!     }
//! }
//!
//! let result = HierarchyRules::new(10)
//!     .strict(true)
//!     .enforce(&mut Tree, Node::Root, &[Node::Root, Node::Parent, Node::Child]);
//! assert!(result.is_success());
//! ```

pub mod rules;
pub mod violations;

pub use rules::HierarchyRules;
pub use violations::HierarchyViolation;
