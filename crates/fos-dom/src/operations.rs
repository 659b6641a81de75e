//! DOM Node Operations - error type
//!
//! Failures raised by appendChild, removeChild and friends.

use crate::NodeId;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found
    #[error("Node not found: {0:?}")]
    NotFound(NodeId),

    /// Hierarchy error (e.g., inserting an ancestor into its descendant)
    #[error("Hierarchy request error: cannot insert {child:?} into {parent:?}")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    /// Invalid node type for the operation
    #[error("Invalid node type for {0:?}")]
    InvalidNodeType(NodeId),

    /// Node is not a child of the given parent
    #[error("{child:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, child: NodeId },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DomError::NotAChild { parent: NodeId(1), child: NodeId(4) };
        assert_eq!(err.to_string(), "NodeId(4) is not a child of NodeId(1)");

        let err = DomError::NotFound(NodeId(9));
        assert!(err.to_string().contains("NodeId(9)"));
    }
}
