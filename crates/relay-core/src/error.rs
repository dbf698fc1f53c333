//! Unified error types for the Relay core.
//!
//! Every failure is raised while building creator trees, combined types or
//! dispatch tables. Dispatching an action never fails.

use thiserror::Error;

/// Errors that can occur while constructing action trees and reducers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// An action type or creator specification was malformed.
    #[error("invalid action argument: {reason}")]
    InvalidActionArgument {
        /// Description of the rejected argument.
        reason: String,
    },

    /// A constituent passed to `combine` has no usable type string.
    #[error("invalid combined type argument: {reason}")]
    InvalidCombinedTypeArgument {
        /// Description of the rejected constituent.
        reason: String,
    },

    /// The root of a handler tree was not a mapping.
    #[error("expected handlers to be a mapping of action types to handlers")]
    InvalidHandlersShape,

    /// A handler was registered but no default state was supplied.
    #[error("default state for reducer handling {action_type} should be defined")]
    MissingDefaultState {
        /// The offending type, or the comma-joined constituents of a combined key.
        action_type: String,
    },

    /// The divider / prefix configuration cannot be used unambiguously.
    #[error("invalid namespace options: {reason}")]
    InvalidNamespace {
        /// Why the options were rejected.
        reason: String,
    },

    /// A flat key lacked the configured prefix during unflattening.
    #[error("action type '{key}' does not start with prefix '{prefix}'")]
    MissingPrefix {
        /// The flat key that was rejected.
        key: String,
        /// The configured prefix.
        prefix: String,
    },

    /// Two flat keys disagree on whether a path is a leaf or a namespace.
    #[error("namespace conflict at '{path}'")]
    NamespaceConflict {
        /// Segments leading to the conflict, joined by the divider.
        path: String,
    },
}

impl ActionError {
    /// Creates an invalid action argument error.
    pub fn invalid_action(reason: impl Into<String>) -> Self {
        Self::InvalidActionArgument {
            reason: reason.into(),
        }
    }

    /// Creates an invalid combined type argument error.
    pub fn invalid_combined(reason: impl Into<String>) -> Self {
        Self::InvalidCombinedTypeArgument {
            reason: reason.into(),
        }
    }

    /// Creates an invalid namespace error.
    pub fn invalid_namespace(reason: impl Into<String>) -> Self {
        Self::InvalidNamespace {
            reason: reason.into(),
        }
    }
}

/// Result type for action construction.
pub type ActionResult<T> = Result<T, ActionError>;
