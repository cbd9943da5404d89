//! Lanai Library
//!
//! An in-memory string index supporting exact lookup, prefix enumeration,
//! autocomplete, bounded edit-distance matching and single-character wildcard
//! matching over a dynamic set of words.
//!
//! # Architecture
//!
//! - [`data_structures::lanai_trie`] holds the trie and its traversals
//! - [`config`] loads layered settings for batch insertion and logging
//! - [`error`] defines the crate-wide error type and reporting hook

pub mod config;
pub mod data_structures;
pub mod error;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

// Feature-gated modules
#[cfg(feature = "benchmarking")]
pub mod bench;

pub use data_structures::{LanaiTrie, SharedLanaiTrie};
