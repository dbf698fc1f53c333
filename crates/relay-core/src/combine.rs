//! Combined action types.
//!
//! A [`CombinedType`] stands for any one of several action types. Its string
//! form joins the constituents with [`ACTION_TYPE_DELIMITER`], which lets it
//! be used as a key in a handler tree: flattening splits it back apart and
//! registers the handler under every constituent.
//!
//! ```
//! use relay_core::{ActionType, combine};
//!
//! let both = combine!("increment", "decrement").unwrap();
//! assert_eq!(both.type_string(), "increment||decrement");
//! ```

use std::fmt;

use crate::error::{ActionError, ActionResult};
use crate::namespace::{ACTION_TYPE_DELIMITER, NamespacePath, split_types};

/// Anything that names a dispatch type.
///
/// Implemented for strings, namespace paths, combined types and (in the
/// framework crate) action creators.
pub trait ActionType {
    /// Returns the full dispatch type string.
    fn type_string(&self) -> String;
}

impl ActionType for str {
    fn type_string(&self) -> String {
        self.to_string()
    }
}

impl ActionType for String {
    fn type_string(&self) -> String {
        self.clone()
    }
}

impl<T: ActionType + ?Sized> ActionType for &T {
    fn type_string(&self) -> String {
        (**self).type_string()
    }
}

impl ActionType for NamespacePath {
    fn type_string(&self) -> String {
        NamespacePath::type_string(self)
    }
}

/// The logical OR of several action types.
///
/// Constituents keep the caller's order and are not de-duplicated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CombinedType {
    types: Vec<String>,
}

impl CombinedType {
    /// The constituent type strings, in the order given.
    pub fn types(&self) -> &[String] {
        &self.types
    }

    /// Returns true if `action_type` is one of the constituents.
    pub fn matches(&self, action_type: &str) -> bool {
        self.types.iter().any(|t| t == action_type)
    }

    /// Number of constituents.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Always false; a combined type has at least one constituent.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl ActionType for CombinedType {
    fn type_string(&self) -> String {
        self.types.join(ACTION_TYPE_DELIMITER)
    }
}

impl fmt::Display for CombinedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_string())
    }
}

/// Combines action types into one [`CombinedType`].
///
/// Items that are themselves combined contribute each of their
/// constituents.
///
/// # Errors
///
/// [`ActionError::InvalidCombinedTypeArgument`] when no items are given or an
/// item yields an empty type string.
pub fn combine<I, T>(items: I) -> ActionResult<CombinedType>
where
    I: IntoIterator<Item = T>,
    T: ActionType,
{
    let mut types = Vec::new();
    for (index, item) in items.into_iter().enumerate() {
        let type_string = item.type_string();
        for constituent in split_types(&type_string) {
            if constituent.is_empty() {
                return Err(ActionError::invalid_combined(format!(
                    "expected action types to be non-empty strings or action creators (argument {index})"
                )));
            }
            types.push(constituent.to_string());
        }
    }
    if types.is_empty() {
        return Err(ActionError::invalid_combined(
            "expected at least one action type",
        ));
    }
    Ok(CombinedType { types })
}

/// Combines heterogeneous action types: strings, creators, paths.
///
/// Expands to a call to [`combine`](crate::combine::combine) and evaluates to
/// an [`ActionResult<CombinedType>`](crate::ActionResult).
#[macro_export]
macro_rules! combine {
    ($($item:expr),+ $(,)?) => {
        $crate::combine::combine([$(&$item as &dyn $crate::ActionType),+])
    };
}
