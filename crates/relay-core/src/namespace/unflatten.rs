//! Flat map → tree.

use tracing::debug;

use super::tree::{Namespace, Node};
use super::{NamespaceOptions, NamespacePath};
use crate::error::{ActionError, ActionResult};

/// Rebuilds a nested tree from entries keyed by full type strings.
///
/// The configured prefix is stripped from every key (a key without it is
/// rejected), the remainder is split on the divider and the value is stored
/// at the last segment, creating intermediate namespaces on the way.
///
/// # Errors
///
/// - [`ActionError::MissingPrefix`] when a prefix is configured and a key
///   does not start with `prefix + divider`.
/// - [`ActionError::NamespaceConflict`] when one key needs a namespace where
///   another already stored a leaf, or the other way round.
pub fn unflatten<L, I>(flat: I, options: &NamespaceOptions) -> ActionResult<Namespace<L>>
where
    I: IntoIterator<Item = (String, L)>,
{
    options.validate()?;
    let mut root = Namespace::new();
    let mut count = 0usize;
    for (key, value) in flat {
        let path = NamespacePath::parse(&key, options)?;
        insert_at(&mut root, &path, value)?;
        count += 1;
    }
    debug!(entries = count, top_level = root.len(), "Unflattened action types");
    Ok(root)
}

fn insert_at<L>(root: &mut Namespace<L>, path: &NamespacePath, value: L) -> ActionResult<()> {
    let conflict = |depth: usize| ActionError::NamespaceConflict {
        path: path.segments()[..=depth].join(path.divider()),
    };
    let Some((last, parents)) = path.segments().split_last() else {
        return Err(conflict(0));
    };

    let mut current = root;
    for (depth, segment) in parents.iter().enumerate() {
        current = current
            .branch_or_insert(segment)
            .ok_or_else(|| conflict(depth))?;
    }

    if current.get(last).is_some_and(Node::is_branch) {
        return Err(conflict(parents.len()));
    }
    current.insert(last.as_str(), Node::Leaf(value));
    Ok(())
}
