//! Namespace engine.
//!
//! Action types are addressed by namespace paths: ordered segments joined by
//! a *divider* (`"/"` by default), optionally preceded by a prefix. Several
//! complete type strings can be packed into one key by joining them with the
//! reserved [`ACTION_TYPE_DELIMITER`]; such a key stands for any of its
//! alternatives.
//!
//! ```text
//! {app: {counter: {increment: f}}}     ──flatten──▶  {"app/counter/increment": f}
//! {"a||b": {c: f}}                      ──flatten──▶  {"a/c": f, "b/c": f}
//! ```
//!
//! - [`tree`]: the nested [`Namespace`] / [`Node`] representation
//! - [`flatten`](mod@flatten): tree → flat map, including the combined-type cross join
//! - [`unflatten`](mod@unflatten): flat map → tree

pub mod flatten;
pub mod tree;
pub mod unflatten;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ActionError, ActionResult};

pub use flatten::{FlatMap, connect_namespace, connect_prefix, flatten};
pub use tree::{Namespace, Node};
pub use unflatten::unflatten;

/// Divider used when none is configured.
pub const DEFAULT_DIVIDER: &str = "/";

/// Separator joining alternative type strings into one combined key.
pub const ACTION_TYPE_DELIMITER: &str = "||";

/// Splits a (possibly combined) key into its alternative type strings.
///
/// A key without the delimiter yields itself.
pub fn split_types(key: &str) -> impl Iterator<Item = &str> {
    key.split(ACTION_TYPE_DELIMITER)
}

/// Returns true if `key` packs several alternatives.
pub fn is_combined(key: &str) -> bool {
    key.contains(ACTION_TYPE_DELIMITER)
}

fn default_divider() -> String {
    DEFAULT_DIVIDER.to_string()
}

/// Divider and prefix settings shared by flattening, unflattening and
/// reducer construction.
///
/// When deserialised, `namespace` is accepted as an alias for `divider`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceOptions {
    /// Separator between namespace segments.
    #[serde(default = "default_divider", alias = "namespace")]
    pub divider: String,

    /// Optional prefix applied once to every root-level type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

impl Default for NamespaceOptions {
    fn default() -> Self {
        Self {
            divider: default_divider(),
            prefix: None,
        }
    }
}

impl NamespaceOptions {
    /// Creates options with the default divider and no prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the divider.
    pub fn divider(mut self, divider: impl Into<String>) -> Self {
        self.divider = divider.into();
        self
    }

    /// Sets the prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Returns the prefix, treating an empty prefix as none.
    pub fn active_prefix(&self) -> Option<&str> {
        self.prefix.as_deref().filter(|p| !p.is_empty())
    }

    /// Checks that the divider and delimiter cannot be confused.
    pub fn validate(&self) -> ActionResult<()> {
        if self.divider.is_empty() {
            return Err(ActionError::invalid_namespace("divider must not be empty"));
        }
        if self.divider.contains(ACTION_TYPE_DELIMITER)
            || ACTION_TYPE_DELIMITER.contains(self.divider.as_str())
        {
            return Err(ActionError::invalid_namespace(format!(
                "divider '{}' collides with the combined type delimiter '{}'",
                self.divider, ACTION_TYPE_DELIMITER
            )));
        }
        if let Some(prefix) = self.active_prefix()
            && is_combined(prefix)
        {
            return Err(ActionError::invalid_namespace(format!(
                "prefix '{prefix}' must not contain '{ACTION_TYPE_DELIMITER}'"
            )));
        }
        Ok(())
    }
}

/// A namespace path: segments plus the divider and prefix that render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespacePath {
    segments: Vec<String>,
    divider: String,
    prefix: Option<String>,
}

impl NamespacePath {
    /// Creates an empty path rendered with `options`.
    pub fn new(options: &NamespaceOptions) -> Self {
        Self {
            segments: Vec::new(),
            divider: options.divider.clone(),
            prefix: options.active_prefix().map(str::to_owned),
        }
    }

    /// Parses a full type string.
    ///
    /// With a prefix configured the key must start with `prefix + divider`;
    /// anything else is rejected with [`ActionError::MissingPrefix`].
    pub fn parse(key: &str, options: &NamespaceOptions) -> ActionResult<Self> {
        let mut path = Self::new(options);
        let rest = match &path.prefix {
            Some(prefix) => key
                .strip_prefix(prefix.as_str())
                .and_then(|rest| rest.strip_prefix(path.divider.as_str()))
                .ok_or_else(|| ActionError::MissingPrefix {
                    key: key.to_string(),
                    prefix: prefix.clone(),
                })?,
            None => key,
        };
        path.segments = rest.split(path.divider.as_str()).map(str::to_owned).collect();
        Ok(path)
    }

    /// Returns this path extended by one segment.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.segments.push(segment.into());
        next
    }

    /// The segments below the prefix.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The divider this path is rendered with.
    pub fn divider(&self) -> &str {
        &self.divider
    }

    /// The prefix this path is rendered with, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Renders the full dispatch type.
    pub fn type_string(&self) -> String {
        let body = self.segments.join(&self.divider);
        match &self.prefix {
            Some(prefix) => format!("{prefix}{}{body}", self.divider),
            None => body,
        }
    }
}

impl fmt::Display for NamespacePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_string())
    }
}
