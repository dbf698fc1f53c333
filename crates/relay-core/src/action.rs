//! The action message.
//!
//! Actions follow the flux-standard shape: a `type` discriminator, an
//! optional `payload`, optional `meta` and an `error` flag. When `error` is
//! true the payload carries the error value.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A dispatched message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// The dispatch type.
    #[serde(rename = "type")]
    pub action_type: String,

    /// The payload, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,

    /// Extra information not part of the payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,

    /// Whether the payload represents an error.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub error: bool,
}

impl Action {
    /// Creates an action with no payload or meta.
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            payload: None,
            meta: None,
            error: false,
        }
    }

    /// Sets the payload.
    pub fn with_payload(mut self, payload: impl Into<Value>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// Sets the meta value.
    pub fn with_meta(mut self, meta: impl Into<Value>) -> Self {
        self.meta = Some(meta.into());
        self
    }

    /// Marks the action as carrying an error.
    pub fn with_error(mut self, error: bool) -> Self {
        self.error = error;
        self
    }

    /// The dispatch type.
    pub fn action_type(&self) -> &str {
        &self.action_type
    }

    /// Returns true if the action represents an error.
    pub fn is_error(&self) -> bool {
        self.error
    }

    /// Reads an action out of an arbitrary JSON value.
    ///
    /// Lenient where deserialisation would be strict: only an object with a
    /// string `type` is required, and `error` counts only when it is `true`.
    /// Returns `None` for anything that is not an action.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let action_type = object.get("type")?.as_str()?.to_string();
        Some(Self {
            action_type,
            payload: object.get("payload").cloned(),
            meta: object.get("meta").cloned(),
            error: object.get("error").and_then(Value::as_bool) == Some(true),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_omits_absent_fields() {
        let action = Action::new("increment").with_payload(7);
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({"type": "increment", "payload": 7})
        );

        let failed = Action::new("notify").with_payload("boom").with_error(true);
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({"type": "notify", "payload": "boom", "error": true})
        );
    }

    #[test]
    fn test_deserialize_defaults() {
        let action: Action = serde_json::from_value(json!({"type": "x"})).unwrap();
        assert_eq!(action, Action::new("x"));
    }

    #[test]
    fn test_from_value_lenient() {
        let action = Action::from_value(&json!({
            "type": "x",
            "meta": {"k": 1},
            "error": "yes"
        }))
        .unwrap();
        assert_eq!(action.action_type(), "x");
        assert_eq!(action.meta, Some(json!({"k": 1})));
        assert!(!action.is_error());
    }

    #[test]
    fn test_from_value_rejects_non_actions() {
        assert!(Action::from_value(&json!({"foo": {"bar": "baz"}})).is_none());
        assert!(Action::from_value(&json!({"type": 3})).is_none());
        assert!(Action::from_value(&json!("increment")).is_none());
    }
}
