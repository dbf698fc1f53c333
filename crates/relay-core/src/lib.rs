//! # Relay Core
//!
//! The namespace engine and action model underneath Relay.
//!
//! ## Building Blocks
//!
//! - **Actions**: the dispatched message ([`Action`])
//! - **Namespaces**: nested trees of leaves ([`Namespace`], [`Node`]) addressed by
//!   divider-joined paths ([`NamespacePath`], [`NamespaceOptions`])
//! - **Flatten / unflatten**: converting between trees and flat maps keyed by full
//!   type strings ([`flatten`], [`unflatten`], [`FlatMap`])
//! - **Combined types**: one key standing for several types ([`CombinedType`],
//!   [`combine!`])
//!
//! ```text
//! ┌──────────────┐  flatten   ┌──────────┐  unflatten  ┌──────────────┐
//! │  spec tree   │──────────▶│ flat map │───────────▶│ creator tree │
//! └──────────────┘            └──────────┘            └──────────────┘
//!                                  │ expand combined keys
//!                                  ▼
//!                           dispatch table (framework)
//! ```
//!
//! ## Example
//!
//! ```
//! use relay_core::{Namespace, NamespaceOptions, flatten, unflatten};
//!
//! let tree = Namespace::new().branch("app", Namespace::new().leaf("notify", 1));
//! let options = NamespaceOptions::new().prefix("feature");
//!
//! let flat = flatten(tree.clone(), &options).unwrap();
//! assert_eq!(flat.get("feature/app/notify"), Some(&1));
//!
//! assert_eq!(unflatten(flat, &options).unwrap(), tree);
//! ```

pub mod action;
pub mod combine;
pub mod error;
pub mod namespace;

pub use action::Action;
pub use combine::{ActionType, CombinedType};
pub use error::{ActionError, ActionResult};
pub use namespace::{
    ACTION_TYPE_DELIMITER, DEFAULT_DIVIDER, FlatMap, Namespace, NamespaceOptions, NamespacePath,
    Node, flatten, unflatten,
};

/// Prelude for common imports.
pub mod prelude {
    pub use super::action::Action;
    pub use super::combine::{ActionType, CombinedType, combine};
    pub use super::error::{ActionError, ActionResult};
    pub use super::namespace::{Namespace, NamespaceOptions, Node};
}
