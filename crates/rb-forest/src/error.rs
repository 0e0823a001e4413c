use std::collections::TryReserveError;

use thiserror::Error;

/// Errors surfaced by the tree and the map façade.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// Lookup miss on an `at`-style access.
    #[error("key not found")]
    KeyNotFound,
    /// The arena could not grow to hold a new node. The tree is unchanged.
    #[error("node allocation failed: {0}")]
    AllocationFailure(#[from] TryReserveError),
    /// Every `u32` arena index is taken. The tree is unchanged.
    #[error("node index space exhausted ({0} slots)")]
    IndexSpaceExhausted(usize),
}

pub type Result<T> = std::result::Result<T, TreeError>;
