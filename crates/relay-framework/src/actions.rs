//! Namespaced action creator trees.
//!
//! [`create_actions`] takes a nested specification of payload / meta
//! transforms plus a list of identity action types and returns an
//! [`ActionTree`] of the same shape, whose creators carry full dispatch types:
//!
//! ```text
//! spec                              tree
//! app ─┬─ counter ─┬─ increment     app.counter.increment  → "app/counter/increment"
//!      │           └─ decrement     app.counter.decrement  → "app/counter/decrement"
//!      └─ notify                    app.notify             → "app/notify"
//! ```
//!
//! Internally the spec tree is flattened into full type strings, each leaf is
//! turned into an [`ActionCreator`], and the flat map is unflattened again.
//!
//! # Example
//!
//! ```
//! use relay_core::{Namespace, NamespaceOptions};
//! use relay_framework::actions::{ActionSpec, create_actions};
//! use serde_json::json;
//!
//! let spec = Namespace::new().branch(
//!     "app",
//!     Namespace::new().leaf("notify", ActionSpec::payload(|args| json!({ "message": args[0] }))),
//! );
//! let tree = create_actions(spec, ["login"], &NamespaceOptions::default()).unwrap();
//!
//! let notify = tree.get(&["app", "notify"]).unwrap();
//! assert_eq!(notify.call("hi").action_type, "app/notify");
//! assert_eq!(tree.get(&["login"]).unwrap().call(1).payload, Some(json!(1)));
//! ```

use std::fmt;
use std::sync::Arc;

use relay_core::namespace::is_combined;
use relay_core::{
    ActionError, ActionResult, ActionType, Namespace, NamespaceOptions, Node, flatten, unflatten,
};
use serde_json::Value;
use tracing::debug;

use crate::casing::camel_case;
use crate::creator::{ActionCreator, ValueFn};

/// How the creator for one action type is built.
#[derive(Clone, Default)]
pub enum ActionSpec {
    /// The first argument becomes the payload.
    #[default]
    Identity,
    /// A payload transform.
    Payload(ValueFn),
    /// A meta transform with an optional payload transform (identity when
    /// absent).
    PayloadMeta {
        /// Payload transform.
        payload: Option<ValueFn>,
        /// Meta transform.
        meta: ValueFn,
    },
}

impl ActionSpec {
    /// A payload transform.
    pub fn payload<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self::Payload(Arc::new(f))
    }

    /// Payload and meta transforms.
    pub fn payload_meta<P, M>(payload: P, meta: M) -> Self
    where
        P: Fn(&[Value]) -> Value + Send + Sync + 'static,
        M: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self::PayloadMeta {
            payload: Some(Arc::new(payload)),
            meta: Arc::new(meta),
        }
    }

    /// A meta transform with the identity payload.
    pub fn meta<M>(meta: M) -> Self
    where
        M: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self::PayloadMeta {
            payload: None,
            meta: Arc::new(meta),
        }
    }

    fn into_creator(self, action_type: String) -> ActionResult<ActionCreator> {
        let creator = ActionCreator::new(action_type)?;
        Ok(match self {
            Self::Identity => creator,
            Self::Payload(payload) => creator.with_transforms(Some(payload), None),
            Self::PayloadMeta { payload, meta } => creator.with_transforms(payload, Some(meta)),
        })
    }
}

impl fmt::Debug for ActionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => f.write_str("Identity"),
            Self::Payload(_) => f.write_str("Payload(..)"),
            Self::PayloadMeta { payload, .. } => f
                .debug_struct("PayloadMeta")
                .field("has_payload", &payload.is_some())
                .finish_non_exhaustive(),
        }
    }
}

/// Reads a declarative spec from JSON.
///
/// Objects become namespaces and `null` declares an identity action; any
/// other value is rejected, naming the path it was found at.
///
/// ```
/// use relay_framework::actions::spec_from_json;
/// use serde_json::json;
///
/// let spec = spec_from_json(&json!({ "app": { "counter": { "set": null } } })).unwrap();
/// assert_eq!(spec.leaf_count(), 1);
/// ```
pub fn spec_from_json(value: &Value) -> ActionResult<Namespace<ActionSpec>> {
    let Value::Object(map) = value else {
        return Err(ActionError::invalid_action(
            "expected optional object followed by string action types",
        ));
    };
    spec_level(map, &mut Vec::new())
}

fn spec_level(
    map: &serde_json::Map<String, Value>,
    path: &mut Vec<String>,
) -> ActionResult<Namespace<ActionSpec>> {
    let mut ns = Namespace::new();
    for (key, value) in map {
        path.push(key.clone());
        let node = match value {
            Value::Null => Node::Leaf(ActionSpec::Identity),
            Value::Object(inner) => Node::Branch(spec_level(inner, path)?),
            _ => {
                return Err(ActionError::invalid_action(format!(
                    "expected null or a nested object for {}",
                    path.join("/")
                )));
            }
        };
        path.pop();
        ns.insert(key.clone(), node);
    }
    Ok(ns)
}

/// A tree of action creators mirroring its specification.
#[derive(Debug, Clone, Default)]
pub struct ActionTree {
    root: Namespace<ActionCreator>,
}

impl ActionTree {
    /// Returns the creator at `path`.
    pub fn get<S: AsRef<str>>(&self, path: &[S]) -> Option<&ActionCreator> {
        self.root.leaf_at(path)
    }

    /// Returns the namespace at `path`.
    pub fn namespace<S: AsRef<str>>(&self, path: &[S]) -> Option<&Namespace<ActionCreator>> {
        self.root.lookup(path)?.as_branch()
    }

    /// The underlying namespace.
    pub fn as_namespace(&self) -> &Namespace<ActionCreator> {
        &self.root
    }

    /// Consumes the tree, returning the underlying namespace.
    pub fn into_namespace(self) -> Namespace<ActionCreator> {
        self.root
    }

    /// Every creator in the tree, depth first in declaration order.
    pub fn creators(&self) -> Vec<&ActionCreator> {
        fn collect<'a>(ns: &'a Namespace<ActionCreator>, out: &mut Vec<&'a ActionCreator>) {
            for (_, node) in ns.iter() {
                match node {
                    Node::Leaf(creator) => out.push(creator),
                    Node::Branch(inner) => collect(inner, out),
                }
            }
        }
        let mut out = Vec::new();
        collect(&self.root, &mut out);
        out
    }

    /// Number of creators in the tree.
    pub fn len(&self) -> usize {
        self.root.leaf_count()
    }

    /// Returns true if the tree holds no creators.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Renames every key to its camel-cased form.
    ///
    /// Dispatch types are unaffected; only lookup keys change.
    pub fn into_camel_case(self) -> Self {
        Self {
            root: self.root.map_keys(&|key: &str| camel_case(key)),
        }
    }
}

/// Builds creators for a spec tree plus trailing identity action types.
///
/// Identity types are added at the root before flattening, so they receive
/// the prefix and may themselves contain the divider (`"p/ACTION"` lands
/// under `p`). An identity type repeating a spec key replaces it.
///
/// # Errors
///
/// - [`ActionError::InvalidActionArgument`] for an empty identity type or a
///   spec key that yields a combined (`||`) type.
/// - [`ActionError::InvalidNamespace`] for unusable options.
/// - [`ActionError::NamespaceConflict`] when a type is both a leaf and a
///   namespace after splitting on the divider.
pub fn create_actions<I, T>(
    spec: Namespace<ActionSpec>,
    identity_types: I,
    options: &NamespaceOptions,
) -> ActionResult<ActionTree>
where
    I: IntoIterator<Item = T>,
    T: ActionType,
{
    let mut spec = spec;
    for action_type in identity_types {
        let action_type = action_type.type_string();
        if action_type.is_empty() {
            return Err(ActionError::invalid_action(
                "expected optional object followed by string action types",
            ));
        }
        spec.insert(action_type, Node::Leaf(ActionSpec::Identity));
    }

    let flat = flatten(spec, options)?;
    let mut creators = Vec::with_capacity(flat.len());
    for (action_type, leaf) in flat {
        if is_combined(&action_type) {
            return Err(ActionError::invalid_action(format!(
                "action type '{action_type}' cannot combine alternatives"
            )));
        }
        creators.push((action_type.clone(), leaf.into_creator(action_type)?));
    }

    let root = unflatten(creators, options)?;
    let tree = ActionTree { root };
    debug!(
        creators = tree.len(),
        divider = %options.divider,
        prefix = options.active_prefix().unwrap_or(""),
        "Created action creators"
    );
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_core::Action;
    use serde_json::json;

    fn app_spec() -> Namespace<ActionSpec> {
        Namespace::new()
            .branch(
                "app",
                Namespace::new()
                    .branch(
                        "counter",
                        Namespace::new()
                            .leaf("increment", ActionSpec::payload(|a| json!({ "amount": a[0] })))
                            .leaf(
                                "decrement",
                                ActionSpec::payload(|a| {
                                    json!({ "amount": -a[0].as_i64().unwrap_or_default() })
                                }),
                            )
                            .leaf("set", ActionSpec::Identity),
                    )
                    .leaf(
                        "notify",
                        ActionSpec::payload(|a| {
                            json!({ "message": format!("{}: {}", a[0].as_str().unwrap_or_default(), a[1].as_str().unwrap_or_default()) })
                        }),
                    ),
            )
            .leaf("login", ActionSpec::payload(|a| json!({ "username": a[0] })))
    }

    #[test]
    fn test_divided_action_map() {
        let tree =
            create_actions(app_spec(), ["actionOne", "actionTwo"], &NamespaceOptions::default())
                .unwrap();

        let increment = tree.get(&["app", "counter", "increment"]).unwrap();
        assert_eq!(
            increment.call(1),
            Action::new("app/counter/increment").with_payload(json!({ "amount": 1 }))
        );
        assert_eq!(
            tree.get(&["app", "counter", "decrement"]).unwrap().call(1).payload,
            Some(json!({ "amount": -1 }))
        );
        assert_eq!(
            tree.get(&["app", "counter", "set"]).unwrap().call(100),
            Action::new("app/counter/set").with_payload(100)
        );
        assert_eq!(
            tree.get(&["app", "notify"])
                .unwrap()
                .create(&[json!("yangmillstheory"), json!("Hello World")])
                .payload,
            Some(json!({ "message": "yangmillstheory: Hello World" }))
        );
        assert_eq!(tree.get(&["login"]).unwrap().action_type(), "login");
        assert_eq!(
            tree.get(&["actionOne"]).unwrap().call("one"),
            Action::new("actionOne").with_payload("one")
        );
        assert_eq!(tree.len(), 7);
    }

    #[test]
    fn test_prefix_and_divider() {
        let options = NamespaceOptions::new().divider("--").prefix("my-awesome-feature");
        let tree = create_actions(app_spec(), ["actionOne"], &options).unwrap();

        assert_eq!(
            tree.get(&["app", "counter", "increment"]).unwrap().action_type(),
            "my-awesome-feature--app--counter--increment"
        );
        assert_eq!(
            tree.get(&["login"]).unwrap().action_type(),
            "my-awesome-feature--login"
        );
        assert_eq!(
            tree.get(&["actionOne"]).unwrap().action_type(),
            "my-awesome-feature--actionOne"
        );
    }

    #[test]
    fn test_slash_in_key_nests() {
        let spec = Namespace::new()
            .leaf("p/ACTION_ONE", ActionSpec::Identity)
            .leaf("q/ACTION_TWO", ActionSpec::Identity);
        let tree = create_actions(spec, Vec::<String>::new(), &NamespaceOptions::default()).unwrap();
        assert_eq!(
            tree.get(&["p", "ACTION_ONE"]).unwrap().action_type(),
            "p/ACTION_ONE"
        );
        assert_eq!(
            tree.get(&["q", "ACTION_TWO"]).unwrap().action_type(),
            "q/ACTION_TWO"
        );
    }

    #[test]
    fn test_payload_meta_forms() {
        let spec = Namespace::new()
            .leaf("action1", ActionSpec::meta(|a| json!({ "meta1": a[0] })))
            .leaf(
                "action2",
                ActionSpec::payload_meta(|a| a[0]["value"].clone(), |a| json!({ "meta2": a[0]["value"] })),
            );
        let tree = create_actions(spec, Vec::<&str>::new(), &NamespaceOptions::default()).unwrap();

        let first = tree.get(&["action1"]).unwrap().call(1);
        assert_eq!(first.payload, Some(json!(1)));
        assert_eq!(first.meta, Some(json!({ "meta1": 1 })));

        let second = tree.get(&["action2"]).unwrap().call(json!({ "value": 2 }));
        assert_eq!(second.payload, Some(json!(2)));
        assert_eq!(second.meta, Some(json!({ "meta2": 2 })));
    }

    #[test]
    fn test_identity_type_validation() {
        let err = create_actions(Namespace::new(), ["ok", ""], &NamespaceOptions::default())
            .unwrap_err();
        assert!(matches!(err, ActionError::InvalidActionArgument { .. }));
    }

    #[test]
    fn test_combined_spec_key_rejected() {
        let spec = Namespace::new().leaf("a||b", ActionSpec::Identity);
        let err = create_actions(spec, Vec::<&str>::new(), &NamespaceOptions::default())
            .unwrap_err();
        assert!(matches!(err, ActionError::InvalidActionArgument { .. }));
    }

    #[test]
    fn test_spec_from_json() {
        let spec = spec_from_json(&json!({
            "action1": null,
            "foo": { "bar": null }
        }))
        .unwrap();
        let tree = create_actions(spec, Vec::<&str>::new(), &NamespaceOptions::default()).unwrap();
        assert_eq!(
            tree.get(&["foo", "bar"]).unwrap().call(1),
            Action::new("foo/bar").with_payload(1)
        );
        assert_eq!(tree.get(&["action1"]).unwrap().call(1).payload, Some(json!(1)));
    }

    #[test]
    fn test_spec_from_json_rejects_bad_leaves() {
        let err = spec_from_json(&json!({ "ACTION_1": null, "ACTION_2": "string" })).unwrap_err();
        assert_eq!(
            err,
            ActionError::invalid_action("expected null or a nested object for ACTION_2")
        );

        let err = spec_from_json(&json!({ "app": { "ACTION_1": [1, 2] } })).unwrap_err();
        assert_eq!(
            err,
            ActionError::invalid_action("expected null or a nested object for app/ACTION_1")
        );

        assert!(spec_from_json(&json!(1)).is_err());
    }

    #[test]
    fn test_into_camel_case() {
        let tree = create_actions(
            Namespace::new(),
            ["ACTION_ONE", "NAMESPACE/MY_ACTION"],
            &NamespaceOptions::default(),
        )
        .unwrap()
        .into_camel_case();

        let one = tree.get(&["actionOne"]).unwrap();
        assert_eq!(one.action_type(), "ACTION_ONE");
        assert_eq!(
            tree.get(&["namespace", "myAction"]).unwrap().action_type(),
            "NAMESPACE/MY_ACTION"
        );
    }

    #[test]
    fn test_creators_in_declaration_order() {
        let tree = create_actions(Namespace::new(), ["a", "b/c", "d"], &NamespaceOptions::default())
            .unwrap();
        let types: Vec<&str> = tree.creators().iter().map(|c| c.action_type()).collect();
        assert_eq!(types, ["a", "b/c", "d"]);
        assert!(tree.namespace(&["b"]).is_some());
    }
}
