//! Declarative handler trees.

/// Builds a [`HandlerTree`](crate::handler::HandlerTree) from `key => handler`
/// entries.
///
/// Keys are anything implementing [`ActionType`](relay_core::ActionType);
/// values are reducer closures, [`HandlerSpec`](crate::handler::HandlerSpec)s,
/// [`NextThrow`](crate::handler::NextThrow) pairs, or nested `handlers! { .. }`
/// trees.
///
/// ```
/// use relay_core::{Action, NamespaceOptions};
/// use relay_framework::handlers;
/// use relay_framework::handler::HandlerSpec;
/// use relay_framework::reducer::handle_actions;
///
/// let tree = handlers! {
///     "counter" => handlers! {
///         "increment" => |s: i64, _: &Action| s + 1,
///         "reset" => |_: i64, _: &Action| 0,
///     },
///     "noop" => HandlerSpec::Identity,
/// };
///
/// let reducer = handle_actions(tree, Some(0), &NamespaceOptions::default()).unwrap();
/// assert_eq!(reducer.reduce(Some(1), &Action::new("counter/increment")), 2);
/// ```
#[macro_export]
macro_rules! handlers {
    () => {
        $crate::handler::HandlerTree::new()
    };
    ($($key:expr => $handler:expr),+ $(,)?) => {
        $crate::handler::HandlerTree::new()$(.handle($key, $handler))+
    };
}
