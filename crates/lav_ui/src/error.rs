//! Error types for the UI engine

use crate::config::ConfigError;
use crate::ui::element::ElementId;

/// Rejected tree mutations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// An element cannot be its own child
    #[error("element {0} cannot be added to itself")]
    SelfParent(ElementId),

    /// The child already has a parent; detach it first
    #[error("element {child} is already a child of {parent}")]
    AlreadyParented {
        /// Element that was being added
        child: ElementId,
        /// Its current parent
        parent: ElementId,
    },

    /// Adding the child would make an ancestor its own descendant
    #[error("adding {child} under {parent} would create a cycle")]
    Cycle {
        /// Element that was being added
        child: ElementId,
        /// Intended parent
        parent: ElementId,
    },

    /// Removal target is not a direct child
    #[error("element {child} is not a child of {parent}")]
    NotAChild {
        /// Element that was being removed
        child: ElementId,
        /// Element it was removed from
        parent: ElementId,
    },
}

/// Property lookup failures
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PropError {
    /// No value stored under the key
    #[error("property not found: {0}")]
    NotFound(String),

    /// A value exists but holds a different type
    #[error("property {key} holds {found}, expected {expected}")]
    TypeMismatch {
        /// Property key
        key: String,
        /// Requested type
        expected: &'static str,
        /// Stored type
        found: &'static str,
    },
}

/// Aggregate error for the crate's fallible operations
#[derive(thiserror::Error, Debug)]
pub enum UIError {
    /// Tree mutation rejected
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// Property access failed
    #[error(transparent)]
    Prop(#[from] PropError),

    /// Configuration failed to load or validate
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Rendering backend failure
    #[error("render backend error: {0}")]
    Render(String),
}

/// Result alias for UI operations
pub type UIResult<T> = Result<T, UIError>;
