//! Reducer handlers and handler trees.
//!
//! A handler tree maps action types (or namespaces of them) to
//! [`HandlerSpec`]s. A spec is one of:
//!
//! - **Identity**: the state passes through untouched
//! - **Reduce**: one function used for regular actions; error actions pass
//!   through
//! - **NextThrow**: separate functions for regular (`next`) and error
//!   (`throw`) actions, either of which may be left out
//!
//! Every spec is normalised into a [`ResolvedHandler`] with both sides
//! present when the [`DispatchTable`] is built.
//!
//! ```
//! use relay_core::{Action, NamespaceOptions};
//! use relay_framework::handler::{DispatchTable, HandlerTree, NextThrow};
//!
//! let tree = HandlerTree::<i64>::new()
//!     .on("increment", |state, _| state + 1)
//!     .handle(
//!         "load",
//!         NextThrow::new().next(|_, action: &Action| {
//!             action.payload.as_ref().and_then(|p| p.as_i64()).unwrap_or_default()
//!         }),
//!     );
//!
//! let table = DispatchTable::build(tree.into(), &NamespaceOptions::default()).unwrap();
//! assert_eq!(table.len(), 2);
//! ```

pub mod table;

use std::fmt;
use std::sync::Arc;

use relay_core::{Action, ActionType, Namespace, Node};

pub use table::DispatchTable;

/// A type-erased reducer function.
pub type ReduceFn<S> = Arc<dyn Fn(S, &Action) -> S + Send + Sync>;

// ============================================================================
// Handler Specs
// ============================================================================

/// How one action type is handled, as written by the user.
pub enum HandlerSpec<S> {
    /// Leave the state unchanged.
    Identity,
    /// Handle regular actions; error actions pass through.
    Reduce(ReduceFn<S>),
    /// Separate regular and error handlers.
    NextThrow(NextThrow<S>),
}

impl<S> HandlerSpec<S> {
    /// A reducing handler for regular actions.
    pub fn reduce<F>(f: F) -> Self
    where
        F: Fn(S, &Action) -> S + Send + Sync + 'static,
    {
        Self::Reduce(Arc::new(f))
    }

    /// Normalises the spec so both sides are present.
    pub fn resolve(self) -> ResolvedHandler<S> {
        match self {
            Self::Identity => ResolvedHandler::identity(),
            Self::Reduce(f) => ResolvedHandler {
                next: Transition::Apply(f),
                throw: Transition::Identity,
            },
            Self::NextThrow(NextThrow { next, throw }) => ResolvedHandler {
                next: next.map_or(Transition::Identity, Transition::Apply),
                throw: throw.map_or(Transition::Identity, Transition::Apply),
            },
        }
    }
}

impl<S> Clone for HandlerSpec<S> {
    fn clone(&self) -> Self {
        match self {
            Self::Identity => Self::Identity,
            Self::Reduce(f) => Self::Reduce(Arc::clone(f)),
            Self::NextThrow(pair) => Self::NextThrow(pair.clone()),
        }
    }
}

impl<S> fmt::Debug for HandlerSpec<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => f.write_str("Identity"),
            Self::Reduce(_) => f.write_str("Reduce(..)"),
            Self::NextThrow(pair) => pair.fmt(f),
        }
    }
}

impl<S> From<NextThrow<S>> for HandlerSpec<S> {
    fn from(pair: NextThrow<S>) -> Self {
        Self::NextThrow(pair)
    }
}

/// A pair of regular / error handlers; absent sides are identity.
pub struct NextThrow<S> {
    next: Option<ReduceFn<S>>,
    throw: Option<ReduceFn<S>>,
}

impl<S> Default for NextThrow<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> NextThrow<S> {
    /// Creates a pair with both sides absent.
    pub fn new() -> Self {
        Self {
            next: None,
            throw: None,
        }
    }

    /// Sets the handler for regular actions.
    pub fn next<F>(mut self, f: F) -> Self
    where
        F: Fn(S, &Action) -> S + Send + Sync + 'static,
    {
        self.next = Some(Arc::new(f));
        self
    }

    /// Sets the handler for error actions.
    pub fn throw<F>(mut self, f: F) -> Self
    where
        F: Fn(S, &Action) -> S + Send + Sync + 'static,
    {
        self.throw = Some(Arc::new(f));
        self
    }
}

impl<S> Clone for NextThrow<S> {
    fn clone(&self) -> Self {
        Self {
            next: self.next.clone(),
            throw: self.throw.clone(),
        }
    }
}

impl<S> fmt::Debug for NextThrow<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NextThrow")
            .field("next", &self.next.is_some())
            .field("throw", &self.throw.is_some())
            .finish()
    }
}

// ============================================================================
// Resolved Handlers
// ============================================================================

/// One side of a resolved handler.
pub enum Transition<S> {
    /// Return the state unchanged.
    Identity,
    /// Apply a reducer function.
    Apply(ReduceFn<S>),
}

impl<S> Transition<S> {
    /// Returns true for the identity transition.
    pub fn is_identity(&self) -> bool {
        matches!(self, Self::Identity)
    }

    fn run(&self, state: S, action: &Action) -> S {
        match self {
            Self::Identity => state,
            Self::Apply(f) => f(state, action),
        }
    }
}

impl<S> fmt::Debug for Transition<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => f.write_str("Identity"),
            Self::Apply(_) => f.write_str("Apply(..)"),
        }
    }
}

/// A handler with both sides present.
#[derive(Debug)]
pub struct ResolvedHandler<S> {
    next: Transition<S>,
    throw: Transition<S>,
}

impl<S> ResolvedHandler<S> {
    /// The handler that leaves every state unchanged.
    pub fn identity() -> Self {
        Self {
            next: Transition::Identity,
            throw: Transition::Identity,
        }
    }

    /// The side used for regular actions.
    pub fn next(&self) -> &Transition<S> {
        &self.next
    }

    /// The side used for error actions.
    pub fn throw(&self) -> &Transition<S> {
        &self.throw
    }

    /// Routes to `throw` for error actions and to `next` otherwise.
    pub fn apply(&self, state: S, action: &Action) -> S {
        if action.error {
            self.throw.run(state, action)
        } else {
            self.next.run(state, action)
        }
    }
}

// ============================================================================
// Conversion Traits
// ============================================================================

/// Values usable as the handler for a single action type.
pub trait IntoHandlerSpec<S> {
    /// Converts into a handler spec.
    fn into_handler_spec(self) -> HandlerSpec<S>;
}

impl<S> IntoHandlerSpec<S> for HandlerSpec<S> {
    fn into_handler_spec(self) -> HandlerSpec<S> {
        self
    }
}

impl<S> IntoHandlerSpec<S> for NextThrow<S> {
    fn into_handler_spec(self) -> HandlerSpec<S> {
        HandlerSpec::NextThrow(self)
    }
}

impl<S, F> IntoHandlerSpec<S> for F
where
    F: Fn(S, &Action) -> S + Send + Sync + 'static,
{
    fn into_handler_spec(self) -> HandlerSpec<S> {
        HandlerSpec::Reduce(Arc::new(self))
    }
}

/// Values usable as a node of a handler tree: handler specs, reducer
/// functions and nested trees.
pub trait IntoHandlerNode<S> {
    /// Converts into a tree node.
    fn into_handler_node(self) -> Node<HandlerSpec<S>>;
}

impl<S> IntoHandlerNode<S> for HandlerSpec<S> {
    fn into_handler_node(self) -> Node<HandlerSpec<S>> {
        Node::Leaf(self)
    }
}

impl<S> IntoHandlerNode<S> for NextThrow<S> {
    fn into_handler_node(self) -> Node<HandlerSpec<S>> {
        Node::Leaf(HandlerSpec::NextThrow(self))
    }
}

impl<S> IntoHandlerNode<S> for HandlerTree<S> {
    fn into_handler_node(self) -> Node<HandlerSpec<S>> {
        Node::Branch(self.root)
    }
}

impl<S, F> IntoHandlerNode<S> for F
where
    F: Fn(S, &Action) -> S + Send + Sync + 'static,
{
    fn into_handler_node(self) -> Node<HandlerSpec<S>> {
        Node::Leaf(HandlerSpec::Reduce(Arc::new(self)))
    }
}

// ============================================================================
// Handler Tree Builder
// ============================================================================

/// A namespaced tree of handlers, built with a fluent API.
///
/// Keys are anything implementing [`ActionType`]: plain strings, action
/// creators or combined types. A combined key registers its handler under
/// every constituent.
pub struct HandlerTree<S> {
    root: Namespace<HandlerSpec<S>>,
}

impl<S> Default for HandlerTree<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> HandlerTree<S> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            root: Namespace::new(),
        }
    }

    /// Builds a root-level tree from `(type, spec)` pairs.
    ///
    /// Keys are used literally, so full type strings (including ones that
    /// already contain the divider) dispatch as written.
    pub fn from_pairs<I, K, H>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, H)>,
        K: ActionType,
        H: IntoHandlerSpec<S>,
    {
        pairs
            .into_iter()
            .fold(Self::new(), |tree, (key, spec)| {
                tree.handle(key, spec.into_handler_spec())
            })
    }

    /// Registers a reducer function for regular actions.
    pub fn on<F>(self, key: impl ActionType, f: F) -> Self
    where
        F: Fn(S, &Action) -> S + Send + Sync + 'static,
    {
        self.handle(key, HandlerSpec::reduce(f))
    }

    /// Registers a handler, a next/throw pair or a nested tree.
    pub fn handle(mut self, key: impl ActionType, node: impl IntoHandlerNode<S>) -> Self {
        self.root.insert(key.type_string(), node.into_handler_node());
        self
    }

    /// Registers a nested namespace.
    pub fn nest(self, key: impl ActionType, tree: HandlerTree<S>) -> Self {
        self.handle(key, tree)
    }

    /// Registers an identity handler.
    pub fn identity(self, key: impl ActionType) -> Self {
        self.handle(key, HandlerSpec::Identity)
    }

    /// Number of handlers in the tree, counting a combined key once.
    pub fn len(&self) -> usize {
        self.root.leaf_count()
    }

    /// Returns true if no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The underlying namespace.
    pub fn as_namespace(&self) -> &Namespace<HandlerSpec<S>> {
        &self.root
    }

    /// Consumes the tree, returning the underlying namespace.
    pub fn into_namespace(self) -> Namespace<HandlerSpec<S>> {
        self.root
    }
}

impl<S> Clone for HandlerTree<S> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
        }
    }
}

impl<S> fmt::Debug for HandlerTree<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerTree").field("root", &self.root).finish()
    }
}

impl<S> From<HandlerTree<S>> for Node<HandlerSpec<S>> {
    fn from(tree: HandlerTree<S>) -> Self {
        Node::Branch(tree.root)
    }
}
