//! Curried action creators.
//!
//! A curried creator collects a fixed number of arguments one at a time and
//! produces its action once the last one arrives.

use relay_core::{Action, ActionError, ActionResult, ActionType};
use serde_json::Value;

use crate::creator::{ActionCreator, ValueFn};

/// The result of supplying one argument to a [`CurriedAction`].
#[derive(Debug, Clone)]
pub enum Curried {
    /// More arguments are needed.
    Partial(CurriedAction),
    /// All arguments were supplied.
    Complete(Action),
}

impl Curried {
    /// Returns the action if all arguments have been supplied.
    pub fn into_action(self) -> Option<Action> {
        match self {
            Self::Complete(action) => Some(action),
            Self::Partial(_) => None,
        }
    }
}

/// An action creator taking its arguments one at a time.
#[derive(Debug, Clone)]
pub struct CurriedAction {
    creator: ActionCreator,
    arity: usize,
    collected: Vec<Value>,
}

impl CurriedAction {
    /// Number of arguments still missing.
    pub fn remaining(&self) -> usize {
        self.arity - self.collected.len()
    }

    /// The underlying creator.
    pub fn creator(&self) -> &ActionCreator {
        &self.creator
    }

    /// Supplies the next argument.
    ///
    /// Consumes a clone of the collected state, so a partial application can
    /// be reused with different continuations.
    pub fn apply(&self, arg: impl Into<Value>) -> Curried {
        let mut collected = self.collected.clone();
        collected.push(arg.into());
        if collected.len() == self.arity {
            Curried::Complete(self.creator.create(&collected))
        } else {
            Curried::Partial(Self {
                creator: self.creator.clone(),
                arity: self.arity,
                collected,
            })
        }
    }
}

impl ActionType for CurriedAction {
    fn type_string(&self) -> String {
        self.creator.type_string()
    }
}

/// Creates a curried creator whose payload transform receives all `arity`
/// arguments at once.
///
/// # Errors
///
/// [`ActionError::InvalidActionArgument`] for an empty type or a zero arity.
pub fn create_curried_action<F>(
    action_type: impl ActionType,
    arity: usize,
    payload: F,
) -> ActionResult<CurriedAction>
where
    F: Fn(&[Value]) -> Value + Send + Sync + 'static,
{
    if arity == 0 {
        return Err(ActionError::invalid_action(
            "curried action creators need at least one argument",
        ));
    }
    let payload: ValueFn = std::sync::Arc::new(payload);
    let creator = ActionCreator::new(action_type)?.with_transforms(Some(payload), None);
    Ok(CurriedAction {
        creator,
        arity,
        collected: Vec::with_capacity(arity),
    })
}
