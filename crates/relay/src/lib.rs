//! # Relay
//!
//! Namespaced action creators, combined action types and reducer dispatch.
//!
//! ## Overview
//!
//! Relay builds two things from nested specifications: a tree of action
//! creators whose dispatch types are the divider-joined paths of their keys,
//! and a single reducer that routes each action to its handler by type.
//!
//! ```text
//! ┌──────────────┐  create_actions  ┌─────────────┐  call   ┌────────┐
//! │ ActionSpec   │─────────────────▶│ ActionTree  │────────▶│ Action │
//! │ tree         │                  └─────────────┘         └───┬────┘
//! └──────────────┘                                              │
//! ┌──────────────┐  handle_actions  ┌─────────────┐  reduce     │
//! │ HandlerTree  │─────────────────▶│  Reducer    │◀────────────┘
//! └──────────────┘                  └─────────────┘
//! ```
//!
//! - **Core** (`relay-core`): actions, namespace trees, flatten / unflatten,
//!   combined types
//! - **Framework** (`relay-framework`): creators, handler trees, dispatch
//!   tables, reducers
//! - **Runtime** (`relay-runtime`): configuration and logging
//!
//! ## Quick Start
//!
//! ```
//! use relay::prelude::*;
//! use serde_json::json;
//!
//! let options = NamespaceOptions::default();
//! let actions = create_actions(
//!     Namespace::new().branch(
//!         "counter",
//!         Namespace::new()
//!             .leaf("increment", ActionSpec::payload(|a| a[0].clone()))
//!             .leaf("reset", ActionSpec::Identity),
//!     ),
//!     Vec::<&str>::new(),
//!     &options,
//! )
//! .unwrap();
//! let increment = actions.get(&["counter", "increment"]).unwrap();
//!
//! let reducer = handle_actions(
//!     handlers! {
//!         "counter" => handlers! {
//!             "increment" => |s: i64, a: &Action| {
//!                 s + a.payload.as_ref().and_then(|p| p.as_i64()).unwrap_or_default()
//!             },
//!             "reset" => |_: i64, _: &Action| 0,
//!         },
//!     },
//!     Some(0),
//!     &options,
//! )
//! .unwrap();
//!
//! assert_eq!(increment.call(json!(7)).action_type, "counter/increment");
//! assert_eq!(reducer.reduce(Some(3), &increment.call(7)), 10);
//! ```

pub use relay_core;
pub use relay_framework;
pub use relay_runtime;

pub use relay_core::{
    Action, ActionError, ActionResult, ActionType, CombinedType, FlatMap, Namespace,
    NamespaceOptions, NamespacePath, Node, combine, flatten, unflatten,
};
pub use relay_framework::{
    ActionCreator, ActionSpec, ActionTree, Curried, CurriedAction, DispatchTable, HandlerSpec,
    HandlerTree, NextThrow, Reducer, camel_case, create_action, create_actions,
    create_curried_action, handle_action, handle_actions, handlers, spec_from_json,
};
pub use relay_runtime::{ConfigError, ConfigLoader, LoggingBuilder, RelayConfig};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use relay_core::prelude::*;
    pub use relay_framework::prelude::*;
}
