use thiserror::Error;

use crate::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    #[error("node {id} missing")]
    Missing { id: NodeId },
    #[error("node {id} type mismatch; expected {expected}")]
    TypeMismatch { id: NodeId, expected: &'static str },
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Node(#[from] NodeError),
    #[error("saved state could not be encoded: {0}")]
    SaveState(#[from] serde_json::Error),
    #[error("composition did not settle after {iterations} passes")]
    Unsettled { iterations: usize },
}
