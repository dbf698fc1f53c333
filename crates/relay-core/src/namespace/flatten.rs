//! Tree → flat map.
//!
//! Walking down a [`Namespace`] accumulates the path of the current branch.
//! When either the accumulated path or the next segment is a combined key,
//! the new path is the cross join of both sides' alternatives: a namespace
//! under N combined ancestors stands for every N-fold combination.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use super::tree::{Namespace, Node};
use super::{ACTION_TYPE_DELIMITER, NamespaceOptions, split_types};
use crate::error::ActionResult;

/// Flat mapping from full type string to leaf value.
///
/// Keys are unique; inserting an existing key replaces its value in place.
/// Registration order is kept and lookups go through a hash index.
#[derive(Clone)]
pub struct FlatMap<L> {
    entries: Vec<(String, L)>,
    index: HashMap<String, usize>,
}

impl<L> Default for FlatMap<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: fmt::Debug> fmt::Debug for FlatMap<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

impl<L: PartialEq> PartialEq for FlatMap<L> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<L> FlatMap<L> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Inserts a value, returning the one it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: L) -> Option<L> {
        let key = key.into();
        match self.index.get(&key) {
            Some(&index) => Some(std::mem::replace(&mut self.entries[index].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Moves every entry of `other` into this map.
    pub fn merge(&mut self, other: FlatMap<L>) {
        self.extend(other);
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&L> {
        self.index.get(key).map(|&index| &self.entries[index].1)
    }

    /// Returns true if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterates entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &L)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<L, K: Into<String>> Extend<(K, L)> for FlatMap<L> {
    fn extend<I: IntoIterator<Item = (K, L)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<L, K: Into<String>> FromIterator<(K, L)> for FlatMap<L> {
    fn from_iter<I: IntoIterator<Item = (K, L)>>(iter: I) -> Self {
        let mut map = FlatMap::new();
        map.extend(iter);
        map
    }
}

impl<L> IntoIterator for FlatMap<L> {
    type Item = (String, L);
    type IntoIter = std::vec::IntoIter<(String, L)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Joins an accumulated path with the next segment.
///
/// Both sides may be combined keys. The result enumerates every
/// `partial + divider + segment` pair with the partial alternatives in the
/// outer loop, joined by the delimiter.
pub fn connect_namespace(partial: &str, segment: &str, divider: &str) -> String {
    let leaves: Vec<&str> = split_types(segment).collect();
    split_types(partial)
        .flat_map(|p| leaves.iter().map(move |t| format!("{p}{divider}{t}")))
        .collect::<Vec<_>>()
        .join(ACTION_TYPE_DELIMITER)
}

/// Applies the configured prefix to a root-level key.
///
/// Each alternative of a combined root key receives the prefix once.
pub fn connect_prefix(segment: &str, options: &NamespaceOptions) -> String {
    match options.active_prefix() {
        Some(prefix) => split_types(segment)
            .map(|t| format!("{prefix}{}{t}", options.divider))
            .collect::<Vec<_>>()
            .join(ACTION_TYPE_DELIMITER),
        None => segment.to_string(),
    }
}

/// Flattens a tree into a [`FlatMap`] keyed by full type strings.
///
/// # Example
///
/// ```
/// use relay_core::namespace::{flatten, Namespace, NamespaceOptions};
///
/// let tree = Namespace::new().branch("a||b", Namespace::new().leaf("c", 1));
/// let flat = flatten(tree, &NamespaceOptions::default()).unwrap();
/// assert_eq!(flat.get("a/c||b/c"), Some(&1));
/// ```
pub fn flatten<L>(tree: Namespace<L>, options: &NamespaceOptions) -> ActionResult<FlatMap<L>> {
    options.validate()?;
    let mut flat = FlatMap::new();
    flatten_into(tree, options, None, &mut flat);
    debug!(
        entries = flat.len(),
        divider = %options.divider,
        prefix = options.active_prefix().unwrap_or(""),
        "Flattened namespace tree"
    );
    Ok(flat)
}

fn flatten_into<L>(
    tree: Namespace<L>,
    options: &NamespaceOptions,
    partial: Option<&str>,
    flat: &mut FlatMap<L>,
) {
    for (segment, node) in tree {
        let path = match partial {
            Some(partial) => connect_namespace(partial, &segment, &options.divider),
            None => connect_prefix(&segment, options),
        };
        match node {
            Node::Branch(inner) => flatten_into(inner, options, Some(&path), flat),
            Node::Leaf(leaf) => {
                flat.insert(path, leaf);
            }
        }
    }
}
