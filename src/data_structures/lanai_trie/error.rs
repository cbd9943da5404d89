//! Error types for the Lanai Trie.
//!
//! Single-word operations never fail. These errors belong to the batch
//! insertion path, where some are recovered locally and some are surfaced.

use std::time::Duration;

/// Errors that can occur in Lanai Trie batch operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum LanaiTrieError {
    /// The batch exceeds the caller-imposed word limit.
    #[error("Batch of {size} words exceeds the limit of {limit}")]
    BatchTooLarge {
        /// Number of words in the rejected batch.
        size: usize,
        /// The configured maximum.
        limit: usize,
    },

    /// The batch options cannot be used as given.
    #[error("Invalid batch options: {0}")]
    InvalidOptions(String),

    /// A background worker could not complete its chunk.
    #[error("Background worker failed: {0}")]
    WorkerFailed(String),

    /// A background worker did not answer within the allotted time.
    #[error("Background worker timed out after {0:?}")]
    WorkerTimeout(Duration),
}

impl LanaiTrieError {
    /// Whether the batch path recovers from this error by inserting synchronously.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::WorkerFailed(_) | Self::WorkerTimeout(_))
    }
}
