//! Data structures for Lanai.
//!
//! This module contains the in-memory indexing structures. All
//! implementations are free of unsafe code.

pub mod lanai_trie;

// Re-export common data structures
pub use lanai_trie::{LanaiTrie, LanaiTrieError, LanaiTrieResult, SharedLanaiTrie};
