//! Thread-shareable handle to a Lanai Trie.
//!
//! Readers share a read lock; every mutation takes the write lock, so a reader
//! never observes a half-applied insert or prune.

use std::sync::Arc;

use parking_lot::RwLock;

use super::{BulkInsertOptions, BulkInsertSummary, LanaiTrie, LanaiTrieResult};

/// A cloneable, lock-protected [`LanaiTrie`].
#[derive(Debug, Clone, Default)]
pub struct SharedLanaiTrie {
    inner: Arc<RwLock<LanaiTrie>>,
}

impl SharedLanaiTrie {
    /// Creates a new empty shared trie.
    pub fn new() -> Self {
        Self::from_trie(LanaiTrie::new())
    }

    /// Wraps an existing trie.
    pub fn from_trie(trie: LanaiTrie) -> Self {
        Self {
            inner: Arc::new(RwLock::new(trie)),
        }
    }

    /// Inserts a word under the write lock.
    pub fn insert<W: AsRef<str>>(&self, word: W) {
        self.inner.write().insert(word);
    }

    /// Inserts a batch synchronously under a single write lock.
    pub fn insert_all<I, S>(
        &self,
        words: I,
        options: &BulkInsertOptions,
    ) -> LanaiTrieResult<BulkInsertSummary>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.inner.write().insert_all(words, options)
    }

    /// Deletes a word under the write lock.
    pub fn delete<W: AsRef<str>>(&self, word: W) -> bool {
        self.inner.write().delete(word)
    }

    /// See [`LanaiTrie::search`].
    pub fn search<W: AsRef<str>>(&self, word: W) -> bool {
        self.inner.read().search(word)
    }

    /// See [`LanaiTrie::starts_with`].
    pub fn starts_with<P: AsRef<str>>(&self, prefix: P) -> bool {
        self.inner.read().starts_with(prefix)
    }

    /// See [`LanaiTrie::autocomplete`].
    pub fn autocomplete<P: AsRef<str>>(&self, prefix: P) -> Vec<String> {
        self.inner.read().autocomplete(prefix)
    }

    /// See [`LanaiTrie::fuzzy_search`].
    pub fn fuzzy_search<W: AsRef<str>>(&self, word: W, max_distance: usize) -> Vec<String> {
        self.inner.read().fuzzy_search(word, max_distance)
    }

    /// See [`LanaiTrie::wildcard_search`].
    pub fn wildcard_search<P: AsRef<str>>(&self, pattern: P) -> Vec<String> {
        self.inner.read().wildcard_search(pattern)
    }

    /// See [`LanaiTrie::count_words`].
    pub fn count_words(&self) -> usize {
        self.inner.read().count_words()
    }

    /// See [`LanaiTrie::list_words`].
    pub fn list_words(&self) -> Vec<String> {
        self.inner.read().list_words()
    }

    /// Returns a copy of the current trie.
    pub fn snapshot(&self) -> LanaiTrie {
        self.inner.read().clone()
    }
}

impl From<LanaiTrie> for SharedLanaiTrie {
    fn from(trie: LanaiTrie) -> Self {
        Self::from_trie(trie)
    }
}
