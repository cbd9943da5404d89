//! Test modules for Lanai.
//!
//! This module contains the in-crate test suites:
//! - Property-based tests for the trie operations using proptest
//! - Batch insertion tests with mocked progress observers
//! - Configuration loading and validation tests
//! - Error type and reporting tests
//! - Shared fixtures and strategies


// Re-export commonly used testing tools to simplify imports in test modules
pub use test_utils::{
    create_test_dir, levenshtein, matches_pattern, pattern_strategy, to_set,
    unicode_word_strategy, word_list_strategy, word_strategy, TestFixture,
};
