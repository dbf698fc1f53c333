//! Action creators.
//!
//! An [`ActionCreator`] pairs a dispatch type with an optional payload
//! transform and an optional meta transform. Calling it with arguments
//! produces an [`Action`]; its [`type_string`](ActionType::type_string) is the
//! dispatch type, so a creator can be used wherever an action type is
//! expected (handler keys, [`combine!`](relay_core::combine)).
//!
//! # Example
//!
//! ```
//! use relay_framework::creator::ActionCreator;
//! use serde_json::json;
//!
//! let increment = ActionCreator::new("increment")
//!     .unwrap()
//!     .payload(|args| json!({ "amount": args[0] }));
//!
//! let action = increment.call(1);
//! assert_eq!(action.action_type, "increment");
//! assert_eq!(action.payload, Some(json!({ "amount": 1 })));
//! ```

use std::fmt;
use std::sync::Arc;

use relay_core::{Action, ActionError, ActionResult, ActionType};
use serde_json::Value;

/// A type-erased payload or meta transform over the creator's arguments.
pub type ValueFn = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// Builds actions of one dispatch type.
///
/// Cloning is cheap: the transforms are shared.
#[derive(Clone)]
pub struct ActionCreator {
    action_type: String,
    payload: Option<ValueFn>,
    meta: Option<ValueFn>,
}

impl ActionCreator {
    /// Creates an identity creator: the first argument becomes the payload.
    ///
    /// # Errors
    ///
    /// [`ActionError::InvalidActionArgument`] when the type string is empty.
    pub fn new(action_type: impl ActionType) -> ActionResult<Self> {
        let action_type = action_type.type_string();
        if action_type.is_empty() {
            return Err(ActionError::invalid_action(
                "expected action type to be a non-empty string",
            ));
        }
        Ok(Self {
            action_type,
            payload: None,
            meta: None,
        })
    }

    /// Sets the payload transform.
    pub fn payload<F>(mut self, f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.payload = Some(Arc::new(f));
        self
    }

    /// Sets the meta transform.
    pub fn meta<F>(mut self, f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.meta = Some(Arc::new(f));
        self
    }

    pub(crate) fn with_transforms(mut self, payload: Option<ValueFn>, meta: Option<ValueFn>) -> Self {
        self.payload = payload;
        self.meta = meta;
        self
    }

    /// The dispatch type.
    pub fn action_type(&self) -> &str {
        &self.action_type
    }

    /// Returns true if a meta transform is configured.
    pub fn has_meta(&self) -> bool {
        self.meta.is_some()
    }

    /// Creates an action from the given arguments.
    ///
    /// Without a payload transform the first argument is the payload; with no
    /// arguments there is no payload. The meta transform, if any, sees the
    /// same arguments.
    pub fn create(&self, args: &[Value]) -> Action {
        let payload = match &self.payload {
            Some(f) => Some(f(args)),
            None => args.first().cloned(),
        };
        Action {
            action_type: self.action_type.clone(),
            payload,
            meta: self.meta.as_ref().map(|f| f(args)),
            error: false,
        }
    }

    /// Creates an action from a single argument.
    pub fn call(&self, arg: impl Into<Value>) -> Action {
        self.create(&[arg.into()])
    }

    /// Creates an error action.
    ///
    /// The error value becomes the payload as-is (the payload transform is
    /// skipped) and `error` is set. The meta transform still runs, with the
    /// error as its only argument.
    pub fn fail(&self, error: impl Into<Value>) -> Action {
        let args = [error.into()];
        Action {
            action_type: self.action_type.clone(),
            meta: self.meta.as_ref().map(|f| f(&args)),
            payload: args.into_iter().next(),
            error: true,
        }
    }
}

impl ActionType for ActionCreator {
    fn type_string(&self) -> String {
        self.action_type.clone()
    }
}

impl fmt::Display for ActionCreator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.action_type)
    }
}

impl fmt::Debug for ActionCreator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionCreator")
            .field("action_type", &self.action_type)
            .field("has_payload", &self.payload.is_some())
            .field("has_meta", &self.meta.is_some())
            .finish()
    }
}

/// Creates an action creator from optional payload and meta transforms.
///
/// `None` for the payload transform means identity.
pub fn create_action(
    action_type: impl ActionType,
    payload: Option<ValueFn>,
    meta: Option<ValueFn>,
) -> ActionResult<ActionCreator> {
    Ok(ActionCreator::new(action_type)?.with_transforms(payload, meta))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_identity_payload() {
        let creator = ActionCreator::new("TYPE").unwrap();
        assert_eq!(creator.call(1), Action::new("TYPE").with_payload(1));
        assert_eq!(creator.create(&[]), Action::new("TYPE"));
    }

    #[test]
    fn test_payload_over_all_arguments() {
        let creator = ActionCreator::new("ACTION_TWO")
            .unwrap()
            .payload(|args| Value::Array(args.to_vec()));
        let action = creator.create(&[json!("value"), json!(2)]);
        assert_eq!(action.payload, Some(json!(["value", 2])));
        assert!(action.meta.is_none());
    }

    #[test]
    fn test_meta_only() {
        let creator = ActionCreator::new("action1")
            .unwrap()
            .meta(|args| json!({ "meta1": args[0] }));
        let action = creator.call(1);
        assert_eq!(action.payload, Some(json!(1)));
        assert_eq!(action.meta, Some(json!({ "meta1": 1 })));
        assert!(creator.has_meta());
    }

    #[test]
    fn test_fail_skips_payload_transform() {
        let creator = ActionCreator::new("notify")
            .unwrap()
            .payload(|_| json!("never"))
            .meta(|args| json!({ "seen": args[0] }));
        let action = creator.fail("no notification");
        assert!(action.error);
        assert_eq!(action.payload, Some(json!("no notification")));
        assert_eq!(action.meta, Some(json!({ "seen": "no notification" })));
    }

    #[test]
    fn test_type_string_and_display() {
        let creator = create_action("app/notify", None, None).unwrap();
        assert_eq!(creator.type_string(), "app/notify");
        assert_eq!(creator.to_string(), "app/notify");
    }

    #[test]
    fn test_empty_type_rejected() {
        let err = ActionCreator::new("").unwrap_err();
        assert!(matches!(err, ActionError::InvalidActionArgument { .. }));
    }
}
