//! # Relay Framework
//!
//! Action creators and reducers built on the Relay namespace engine.
//!
//! This layer provides:
//! - Action creators with payload / meta transforms ([`creator`])
//! - Namespaced creator trees built from nested specs ([`actions`])
//! - Curried creators ([`curried`]) and camel-cased trees ([`casing`])
//! - Handler trees with next/throw semantics and the dispatch table
//!   ([`handler`])
//! - Reducers routing actions by type ([`reducer`]) and the
//!   [`handlers!`] macro
//!
//! ```text
//! ActionSpec tree ──create_actions──▶ ActionTree ──call──▶ Action
//!                                                            │
//! HandlerTree ──handle_actions──▶ Reducer ◀──────────────────┘
//! ```

pub mod actions;
pub mod casing;
pub mod creator;
pub mod curried;
pub mod handler;
pub mod macros;
pub mod reducer;

pub use actions::{ActionSpec, ActionTree, create_actions, spec_from_json};
pub use casing::camel_case;
pub use creator::{ActionCreator, ValueFn, create_action};
pub use curried::{Curried, CurriedAction, create_curried_action};
pub use handler::{
    DispatchTable, HandlerSpec, HandlerTree, IntoHandlerNode, IntoHandlerSpec, NextThrow,
    ReduceFn, ResolvedHandler, Transition,
};
pub use reducer::{Reducer, handle_action, handle_actions};

/// Prelude for common imports.
pub mod prelude {
    pub use super::actions::{ActionSpec, ActionTree, create_actions};
    pub use super::creator::{ActionCreator, create_action};
    pub use super::handler::{HandlerSpec, HandlerTree, NextThrow};
    pub use super::reducer::{Reducer, handle_action, handle_actions};
    pub use crate::handlers;
}
