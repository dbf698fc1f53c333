//! The dispatch table behind a reducer.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use relay_core::namespace::split_types;
use relay_core::{ActionError, ActionResult, NamespaceOptions, Node, flatten};
use tracing::debug;

use super::{HandlerSpec, ResolvedHandler};

/// Maps every concrete action type to its resolved handler.
///
/// Built once from a handler tree and read-only afterwards. Constituents of a
/// combined key share one handler.
pub struct DispatchTable<S> {
    handlers: HashMap<String, Arc<ResolvedHandler<S>>>,
    keys: Vec<String>,
}

impl<S> DispatchTable<S> {
    /// Builds a table from a handler tree.
    ///
    /// The tree is flattened with `options`; a key packing several
    /// alternatives registers its handler under each of them. When two keys
    /// resolve to the same type the later one wins.
    ///
    /// # Errors
    ///
    /// - [`ActionError::InvalidHandlersShape`] if `root` is a single leaf.
    /// - [`ActionError::InvalidNamespace`] for unusable options.
    pub fn build(root: Node<HandlerSpec<S>>, options: &NamespaceOptions) -> ActionResult<Self> {
        let Node::Branch(tree) = root else {
            return Err(ActionError::InvalidHandlersShape);
        };

        let flat = flatten(tree, options)?;
        let mut handlers = HashMap::with_capacity(flat.len());
        let mut keys = Vec::with_capacity(flat.len());

        for (key, spec) in flat {
            let resolved = Arc::new(spec.resolve());
            for action_type in split_types(&key) {
                if handlers
                    .insert(action_type.to_string(), Arc::clone(&resolved))
                    .is_some()
                {
                    debug!(action_type, key = %key, "Handler replaced by later registration");
                }
            }
            keys.push(key);
        }

        debug!(
            keys = keys.len(),
            action_types = handlers.len(),
            "Built dispatch table"
        );
        Ok(Self { handlers, keys })
    }

    /// Returns the handler registered for `action_type`.
    pub fn get(&self, action_type: &str) -> Option<&Arc<ResolvedHandler<S>>> {
        self.handlers.get(action_type)
    }

    /// Returns true if a handler is registered for `action_type`.
    pub fn contains(&self, action_type: &str) -> bool {
        self.handlers.contains_key(action_type)
    }

    /// The flattened keys in registration order; combined keys appear once,
    /// unsplit.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Every concrete action type with a handler, in no particular order.
    pub fn action_types(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Number of concrete action types with a handler.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns true if no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<S> fmt::Debug for DispatchTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchTable")
            .field("keys", &self.keys)
            .field("action_types", &self.handlers.len())
            .finish()
    }
}
