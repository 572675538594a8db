//! View tree error types

use thiserror::Error;

use crate::view::ViewId;

/// Errors raised by structural view tree operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// The id does not refer to a live view
    #[error("Unknown view: {0:?}")]
    UnknownView(ViewId),

    /// The child is not attached to the given parent
    #[error("View {child:?} is not a child of {parent:?}")]
    NotAChild { parent: ViewId, child: ViewId },

    /// The view has no parent container
    #[error("View {0:?} has no parent")]
    NoParent(ViewId),

    /// Attaching would make a view its own ancestor
    #[error("Cannot attach {child:?} under its own descendant {parent:?}")]
    WouldCycle { parent: ViewId, child: ViewId },
}

/// Result type for view tree operations
pub type Result<T> = std::result::Result<T, ViewError>;
