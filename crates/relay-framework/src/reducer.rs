//! Reducers.
//!
//! A [`Reducer`] is the pure `(state, action) -> state` function produced by
//! [`handle_action`] and [`handle_actions`]. Dispatch never fails: an action
//! without a registered handler leaves the state untouched, and error
//! actions are routed to the `throw` side of their handler.
//!
//! # Example
//!
//! ```
//! use relay_core::{Action, NamespaceOptions};
//! use relay_framework::handler::HandlerTree;
//! use relay_framework::reducer::handle_actions;
//!
//! let reducer = handle_actions(
//!     HandlerTree::new()
//!         .on("increment", |state: i64, _: &Action| state + 1)
//!         .on("decrement", |state: i64, _: &Action| state - 1),
//!     Some(0),
//!     &NamespaceOptions::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(reducer.reduce(None, &Action::new("increment")), 1);
//! assert_eq!(reducer.reduce(Some(5), &Action::new("decrement")), 4);
//! assert_eq!(reducer.reduce(Some(5), &Action::new("unknown")), 5);
//! ```

use std::sync::Arc;

use relay_core::namespace::split_types;
use relay_core::{
    Action, ActionError, ActionResult, ActionType, Namespace, NamespaceOptions, Node,
};
use serde_json::Value;
use tracing::{Level, span, trace};

use crate::handler::{DispatchTable, HandlerSpec, IntoHandlerSpec};

/// Routes actions to their handlers.
///
/// Cloning is cheap: the dispatch table is shared.
#[derive(Debug)]
pub struct Reducer<S> {
    table: Arc<DispatchTable<S>>,
    default_state: S,
}

impl<S: Clone> Clone for Reducer<S> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
            default_state: self.default_state.clone(),
        }
    }
}

impl<S> Reducer<S> {
    /// Wraps a built table.
    ///
    /// # Errors
    ///
    /// [`ActionError::MissingDefaultState`] when `default_state` is `None`,
    /// naming the first registered key (constituents of a combined key are
    /// listed with `", "`).
    pub fn new(table: DispatchTable<S>, default_state: Option<S>) -> ActionResult<Self> {
        match default_state {
            Some(default_state) => Ok(Self {
                table: Arc::new(table),
                default_state,
            }),
            None => Err(ActionError::MissingDefaultState {
                action_type: table
                    .keys()
                    .first()
                    .map(|key| split_types(key).collect::<Vec<_>>().join(", "))
                    .unwrap_or_else(|| "(no handlers)".to_string()),
            }),
        }
    }

    /// The dispatch table.
    pub fn table(&self) -> &DispatchTable<S> {
        &self.table
    }

    /// The state used when none is given.
    pub fn default_state(&self) -> &S {
        &self.default_state
    }
}

impl<S: Clone> Reducer<S> {
    /// Applies `action` to `state`, starting from the default state when
    /// `state` is `None`.
    ///
    /// Without a matching handler the given state is returned as-is (for an
    /// `Arc` state, the very same allocation).
    pub fn reduce(&self, state: Option<S>, action: &Action) -> S {
        let span = span!(Level::TRACE, "reduce", action_type = %action.action_type);
        let _enter = span.enter();

        let state = state.unwrap_or_else(|| self.default_state.clone());
        match self.table.get(&action.action_type) {
            Some(handler) => {
                trace!(error = action.error, "Applying handler");
                handler.apply(state, action)
            }
            None => {
                trace!("No handler registered, state unchanged");
                state
            }
        }
    }

    /// Applies an untyped message.
    ///
    /// Anything that is not an action (no string `type`) leaves the state
    /// unchanged.
    pub fn reduce_value(&self, state: Option<S>, message: &Value) -> S {
        match Action::from_value(message) {
            Some(action) => self.reduce(state, &action),
            None => {
                trace!("Ignoring message that is not an action");
                state.unwrap_or_else(|| self.default_state.clone())
            }
        }
    }

    /// Converts into a plain reducer closure.
    pub fn into_fn(self) -> impl Fn(Option<S>, &Action) -> S + Clone + Send + Sync
    where
        S: Send + Sync,
    {
        move |state, action| self.reduce(state, action)
    }
}

/// Creates a reducer handling a single action type.
///
/// `action_type` may be a combined type, in which case every constituent is
/// handled.
///
/// # Errors
///
/// [`ActionError::MissingDefaultState`] when `default_state` is `None`.
pub fn handle_action<S>(
    action_type: impl ActionType,
    handler: impl IntoHandlerSpec<S>,
    default_state: Option<S>,
) -> ActionResult<Reducer<S>> {
    let root = Namespace::new().leaf(action_type.type_string(), handler.into_handler_spec());
    handle_actions(root, default_state, &NamespaceOptions::default())
}

/// Creates a reducer from a handler tree.
///
/// A default state is required even when the tree registers no handlers,
/// since [`Reducer::reduce`] must return a state when given `None`.
///
/// # Errors
///
/// - [`ActionError::InvalidHandlersShape`] if `handlers` is a single leaf.
/// - [`ActionError::MissingDefaultState`] when `default_state` is `None`,
///   naming `(no handlers)` for an empty tree.
/// - [`ActionError::InvalidNamespace`] for unusable options.
pub fn handle_actions<S>(
    handlers: impl Into<Node<HandlerSpec<S>>>,
    default_state: Option<S>,
    options: &NamespaceOptions,
) -> ActionResult<Reducer<S>> {
    let table = DispatchTable::build(handlers.into(), options)?;
    Reducer::new(table, default_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{HandlerTree, NextThrow};
    use serde_json::json;

    #[test]
    fn test_handle_action_default_state() {
        let reducer = handle_action("INCREMENT", |s: i32, _: &Action| s + 1, Some(0)).unwrap();
        assert_eq!(reducer.reduce(None, &Action::new("INCREMENT")), 1);
        assert_eq!(reducer.reduce(Some(9), &Action::new("OTHER")), 9);
        assert_eq!(*reducer.default_state(), 0);
    }

    #[test]
    fn test_missing_default_state() {
        let err = handle_action("ACTION_1", HandlerSpec::<i32>::Identity, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "default state for reducer handling ACTION_1 should be defined"
        );
    }

    #[test]
    fn test_missing_default_state_combined() {
        let err = handle_action("ACTION_1||ACTION_2", HandlerSpec::<i32>::Identity, None)
            .unwrap_err();
        assert_eq!(
            err,
            ActionError::MissingDefaultState {
                action_type: "ACTION_1, ACTION_2".into()
            }
        );
    }

    #[test]
    fn test_missing_default_state_without_handlers() {
        let err = handle_actions(HandlerTree::<i32>::new(), None, &NamespaceOptions::default())
            .unwrap_err();
        assert_eq!(
            err,
            ActionError::MissingDefaultState {
                action_type: "(no handlers)".into()
            }
        );
    }

    #[test]
    fn test_error_actions_use_throw() {
        let reducer = handle_action(
            "FETCH",
            NextThrow::new()
                .next(|_: String, _: &Action| "ok".to_string())
                .throw(|_: String, _: &Action| "failed".to_string()),
            Some(String::new()),
        )
        .unwrap();
        assert_eq!(reducer.reduce(None, &Action::new("FETCH")), "ok");
        assert_eq!(
            reducer.reduce(None, &Action::new("FETCH").with_error(true)),
            "failed"
        );
    }

    #[test]
    fn test_identity_keeps_same_allocation() {
        let reducer = handle_actions(
            HandlerTree::<Arc<Value>>::new().identity("noop"),
            Some(Arc::new(json!({}))),
            &NamespaceOptions::default(),
        )
        .unwrap();

        let state = Arc::new(json!({ "counter": 3 }));
        let same = reducer.reduce(Some(Arc::clone(&state)), &Action::new("noop"));
        assert!(Arc::ptr_eq(&state, &same));
        let unknown = reducer.reduce(Some(Arc::clone(&state)), &Action::new("other"));
        assert!(Arc::ptr_eq(&state, &unknown));
    }

    #[test]
    fn test_reduce_value_tolerates_non_actions() {
        let set = |_: i32, a: &Action| {
            a.payload.as_ref().and_then(Value::as_i64).unwrap_or_default() as i32
        };
        let reducer = handle_action("SET", set, Some(0)).unwrap();

        assert_eq!(reducer.reduce_value(Some(2), &json!({ "type": "SET", "payload": 7 })), 7);
        assert_eq!(reducer.reduce_value(Some(2), &json!({ "foo": { "bar": "baz" } })), 2);
        assert_eq!(reducer.reduce_value(None, &json!("SET")), 0);
    }

    #[test]
    fn test_into_fn() {
        let reducer = handle_action("INC", |s: i32, _: &Action| s + 1, Some(0)).unwrap();
        let f = reducer.into_fn();
        let g = f.clone();
        let once = f(None, &Action::new("INC"));
        assert_eq!(g(Some(once), &Action::new("INC")), 2);
    }
}
