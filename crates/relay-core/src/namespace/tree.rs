//! Nested specification trees.
//!
//! A [`Namespace`] is an insertion-ordered mapping from segment to [`Node`];
//! a node is either a leaf value or another namespace. Classification is
//! decided by the variant tag when the tree is built, so walking a tree
//! never has to guess whether a value is a leaf.

use std::collections::HashMap;
use std::fmt;

/// A node in a specification tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<L> {
    /// A terminal value.
    Leaf(L),
    /// A nested namespace level.
    Branch(Namespace<L>),
}

impl<L> Node<L> {
    /// Returns the leaf value, if this is a leaf.
    pub fn as_leaf(&self) -> Option<&L> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Branch(_) => None,
        }
    }

    /// Returns the nested namespace, if this is a branch.
    pub fn as_branch(&self) -> Option<&Namespace<L>> {
        match self {
            Self::Leaf(_) => None,
            Self::Branch(ns) => Some(ns),
        }
    }

    /// Returns true for branch nodes.
    pub fn is_branch(&self) -> bool {
        matches!(self, Self::Branch(_))
    }

    /// Transforms every leaf, keeping the shape.
    pub fn map_leaves<M>(self, f: &mut impl FnMut(L) -> M) -> Node<M> {
        match self {
            Self::Leaf(leaf) => Node::Leaf(f(leaf)),
            Self::Branch(ns) => Node::Branch(ns.map_leaves_with(f)),
        }
    }
}

impl<L> From<Namespace<L>> for Node<L> {
    fn from(ns: Namespace<L>) -> Self {
        Self::Branch(ns)
    }
}

/// An ordered mapping from segment to [`Node`].
///
/// Inserting an existing segment replaces its node in place, so the original
/// position is kept. Lookups by segment go through a hash index.
#[derive(Clone)]
pub struct Namespace<L> {
    entries: Vec<(String, Node<L>)>,
    index: HashMap<String, usize>,
}

impl<L> Default for Namespace<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: PartialEq> PartialEq for Namespace<L> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<L: fmt::Debug> fmt::Debug for Namespace<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, n)| (k, n)))
            .finish()
    }
}

impl<L> Namespace<L> {
    /// Creates an empty namespace.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    fn push(&mut self, key: String, node: Node<L>) -> usize {
        let position = self.entries.len();
        self.index.insert(key.clone(), position);
        self.entries.push((key, node));
        position
    }

    /// Inserts a node, returning the node it replaced.
    pub fn insert(&mut self, key: impl Into<String>, node: Node<L>) -> Option<Node<L>> {
        let key = key.into();
        match self.position(&key) {
            Some(index) => Some(std::mem::replace(&mut self.entries[index].1, node)),
            None => {
                self.push(key, node);
                None
            }
        }
    }

    /// Adds a leaf (builder pattern).
    pub fn leaf(mut self, key: impl Into<String>, leaf: L) -> Self {
        self.insert(key, Node::Leaf(leaf));
        self
    }

    /// Adds a nested namespace (builder pattern).
    pub fn branch(mut self, key: impl Into<String>, ns: Namespace<L>) -> Self {
        self.insert(key, Node::Branch(ns));
        self
    }

    /// Returns the node stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Node<L>> {
        self.position(key).map(|index| &self.entries[index].1)
    }

    /// Follows `path` from this namespace.
    pub fn lookup<S: AsRef<str>>(&self, path: &[S]) -> Option<&Node<L>> {
        let (first, rest) = path.split_first()?;
        let node = self.get(first.as_ref())?;
        if rest.is_empty() {
            Some(node)
        } else {
            node.as_branch()?.lookup(rest)
        }
    }

    /// Returns the leaf at `path`, if the path ends on a leaf.
    pub fn leaf_at<S: AsRef<str>>(&self, path: &[S]) -> Option<&L> {
        self.lookup(path)?.as_leaf()
    }

    /// Returns the branch stored under `key`, creating an empty one if the
    /// key is vacant. Returns `None` if `key` holds a leaf.
    pub fn branch_or_insert(&mut self, key: &str) -> Option<&mut Namespace<L>> {
        let index = match self.position(key) {
            Some(index) => index,
            None => self.push(key.to_string(), Node::Branch(Namespace::new())),
        };
        match &mut self.entries[index].1 {
            Node::Branch(ns) => Some(ns),
            Node::Leaf(_) => None,
        }
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node<L>)> {
        self.entries.iter().map(|(k, n)| (k.as_str(), n))
    }

    /// Iterates keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of direct entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Counts leaves in the whole tree.
    pub fn leaf_count(&self) -> usize {
        self.entries
            .iter()
            .map(|(_, node)| match node {
                Node::Leaf(_) => 1,
                Node::Branch(ns) => ns.leaf_count(),
            })
            .sum()
    }

    /// Transforms every leaf, keeping the shape.
    pub fn map_leaves<M>(self, mut f: impl FnMut(L) -> M) -> Namespace<M> {
        self.map_leaves_with(&mut f)
    }

    fn map_leaves_with<M>(self, f: &mut impl FnMut(L) -> M) -> Namespace<M> {
        Namespace {
            entries: self
                .entries
                .into_iter()
                .map(|(key, node)| (key, node.map_leaves(f)))
                .collect(),
            index: self.index,
        }
    }

    /// Renames every key in the tree, keeping the shape.
    pub fn map_keys(self, f: &impl Fn(&str) -> String) -> Self {
        let mut out = Namespace::new();
        for (key, node) in self.entries {
            let node = match node {
                Node::Leaf(leaf) => Node::Leaf(leaf),
                Node::Branch(ns) => Node::Branch(ns.map_keys(f)),
            };
            out.insert(f(&key), node);
        }
        out
    }
}

impl<L, K: Into<String>> FromIterator<(K, Node<L>)> for Namespace<L> {
    fn from_iter<I: IntoIterator<Item = (K, Node<L>)>>(iter: I) -> Self {
        let mut ns = Namespace::new();
        for (key, node) in iter {
            ns.insert(key, node);
        }
        ns
    }
}

impl<L> IntoIterator for Namespace<L> {
    type Item = (String, Node<L>);
    type IntoIter = std::vec::IntoIter<(String, Node<L>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
