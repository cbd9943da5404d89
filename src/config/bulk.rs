//! Batch insertion configuration module.
//!
//! Controls how large word lists are chunked and when chunks are handed to
//! background workers.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Batch insertion configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkConfig {
    /// Always delegate chunks to background workers
    pub use_worker: bool,

    /// Number of words per chunk
    pub chunk_size: usize,

    /// Batches with more words than this are delegated automatically
    pub worker_threshold: usize,

    /// How long to wait for a single worker before falling back, in milliseconds
    pub worker_timeout_ms: u64,

    /// Maximum number of chunks in flight at once
    pub max_workers: usize,

    /// Reject batches larger than this (None for unbounded)
    pub max_batch_words: Option<usize>,
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self {
            use_worker: false,
            chunk_size: 100_000,
            worker_threshold: 100_000,
            worker_timeout_ms: 30_000,
            max_workers: num_cpus::get(),
            max_batch_words: None,
        }
    }
}

impl Validate for BulkConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.chunk_size == 0 {
            return Err(ConfigError::ValidationError(
                "chunk_size must be greater than 0".to_string(),
            ));
        }

        if self.worker_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "worker_timeout_ms must be greater than 0".to_string(),
            ));
        }

        if self.max_workers == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "bulk.max_workers".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        if self.max_batch_words == Some(0) {
            return Err(ConfigError::ValueOutOfRange {
                key: "bulk.max_batch_words".to_string(),
                message: "must be at least 1 when set".to_string(),
            });
        }

        Ok(())
    }
}
