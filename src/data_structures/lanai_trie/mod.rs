//! Lanai Trie Implementation
//!
//! This module provides an in-memory character trie over a dynamic set of
//! words. On top of exact lookup it offers prefix enumeration, autocomplete,
//! bounded edit-distance (fuzzy) search and single-character wildcard search.
//!
//! Key features:
//! * Any `char` is a valid edge label, including punctuation and symbols
//! * Deletion prunes branches that no longer lead to a stored word
//! * Batch insertion with optional offload to background workers
//! * A [`SharedLanaiTrie`] wrapper for single-writer/multi-reader use
//!
//! # Example
//!
//! ```
//! use lanai_lib::data_structures::lanai_trie::LanaiTrie;
//!
//! let mut trie = LanaiTrie::new();
//! trie.insert("apple");
//! trie.insert("app");
//!
//! assert!(trie.search("app"));
//! assert!(trie.starts_with("appl"));
//! assert_eq!(trie.wildcard_search("app.."), vec!["apple".to_string()]);
//! ```

mod bulk;
mod error;
mod fuzzy;
mod node;
mod shared;
mod wildcard;

pub use bulk::{BulkInsertOptions, BulkInsertSummary, ProgressObserver};
#[cfg(test)]
pub(crate) use bulk::MockProgressObserver;
pub use error::LanaiTrieError;
pub use shared::SharedLanaiTrie;
pub use wildcard::WILDCARD;

use fuzzy::FuzzySearcher;
use node::TrieNode;

/// Result type for Lanai Trie batch operations
pub type LanaiTrieResult<T> = Result<T, LanaiTrieError>;

/// Default edit distance used by callers that do not pick one.
pub const DEFAULT_MAX_DISTANCE: usize = 1;

/// Outcome of a recursive delete step.
enum Removal {
    /// The word is not stored; nothing changed.
    NotFound,
    /// The word was unmarked. `prune` tells the parent to detach this node.
    Removed { prune: bool },
}

/// An in-memory trie index over a set of words.
///
/// The trie is not internally synchronized; mutation takes `&mut self`.
/// Wrap it in a [`SharedLanaiTrie`] to share it across threads.
#[derive(Debug, Default, Clone)]
pub struct LanaiTrie {
    /// The root node, representing the empty prefix
    root: TrieNode,
}

impl LanaiTrie {
    /// Creates a new empty `LanaiTrie`.
    pub fn new() -> Self {
        Self {
            root: TrieNode::new(),
        }
    }

    /// Inserts a word, creating nodes for every new character transition.
    ///
    /// Inserting a word twice has no further effect. The empty string marks
    /// the root as terminal.
    pub fn insert<W>(&mut self, word: W)
    where
        W: AsRef<str>,
    {
        let node = word
            .as_ref()
            .chars()
            .fold(&mut self.root, |node, c| node.children.entry(c).or_default());
        node.is_terminal = true;
    }

    /// Returns `true` if `word` was inserted and not deleted since.
    ///
    /// A path that exists only as the prefix of longer words returns `false`.
    pub fn search<W>(&self, word: W) -> bool
    where
        W: AsRef<str>,
    {
        self.root
            .descend(word.as_ref())
            .map_or(false, |node| node.is_terminal)
    }

    /// Returns `true` if some stored word starts with `prefix`.
    ///
    /// The empty prefix always matches, even on an empty trie.
    pub fn starts_with<P>(&self, prefix: P) -> bool
    where
        P: AsRef<str>,
    {
        self.root.descend(prefix.as_ref()).is_some()
    }

    /// Removes a word from the trie and prunes nodes left without purpose.
    ///
    /// Pruning walks back toward the root and stops at the first ancestor
    /// that is terminal or still has other children. Deleting a word that is
    /// not stored is a no-op.
    ///
    /// # Returns
    ///
    /// `true` if the word was present and has been removed.
    pub fn delete<W>(&mut self, word: W) -> bool
    where
        W: AsRef<str>,
    {
        let chars: Vec<char> = word.as_ref().chars().collect();
        matches!(
            Self::delete_recursive(&mut self.root, &chars),
            Removal::Removed { .. }
        )
    }

    fn delete_recursive(node: &mut TrieNode, rest: &[char]) -> Removal {
        let Some((&c, tail)) = rest.split_first() else {
            if !node.is_terminal {
                return Removal::NotFound;
            }
            node.is_terminal = false;
            return Removal::Removed {
                prune: node.children.is_empty(),
            };
        };

        let Some(child) = node.children.get_mut(&c) else {
            return Removal::NotFound;
        };

        match Self::delete_recursive(child, tail) {
            Removal::NotFound => Removal::NotFound,
            Removal::Removed { prune } => {
                if prune {
                    tracing::trace!(edge = %c, "pruning trie node");
                    node.children.remove(&c);
                }
                Removal::Removed {
                    prune: prune && node.is_removable(),
                }
            }
        }
    }

    /// Returns every stored word that starts with `prefix`.
    ///
    /// Results are unordered and unlimited. If no stored word continues the
    /// prefix the result is empty.
    pub fn autocomplete<P>(&self, prefix: P) -> Vec<String>
    where
        P: AsRef<str>,
    {
        let prefix = prefix.as_ref();
        let Some(node) = self.root.descend(prefix) else {
            return Vec::new();
        };

        let mut results = Vec::new();
        let mut path = prefix.to_string();
        Self::collect_words(node, &mut path, &mut results);
        results
    }

    /// Returns every stored word whose Levenshtein distance to `word` is at
    /// most `max_distance`.
    ///
    /// Insertions, deletions and substitutions each cost one edit. Results
    /// are unordered and contain no duplicates.
    pub fn fuzzy_search<W>(&self, word: W, max_distance: usize) -> Vec<String>
    where
        W: AsRef<str>,
    {
        let target: Vec<char> = word.as_ref().chars().collect();
        FuzzySearcher::new(&target, max_distance).search(&self.root)
    }

    /// Returns every stored word matching `pattern`, where [`WILDCARD`]
    /// stands for any single character and every other character must
    /// match exactly.
    ///
    /// Only words of the same length as the pattern can match.
    pub fn wildcard_search<P>(&self, pattern: P) -> Vec<String>
    where
        P: AsRef<str>,
    {
        let pattern: Vec<char> = pattern.as_ref().chars().collect();
        wildcard::wildcard_search(&self.root, &pattern)
    }

    /// Returns the number of stored words.
    ///
    /// This requires traversing the entire trie, so it's an O(n) operation.
    pub fn count_words(&self) -> usize {
        Self::count_terminals(&self.root)
    }

    /// Returns every stored word, in no particular order.
    pub fn list_words(&self) -> Vec<String> {
        let mut results = Vec::new();
        Self::collect_words(&self.root, &mut String::new(), &mut results);
        results
    }

    /// Returns `true` if no word is stored.
    pub fn is_empty(&self) -> bool {
        self.root.is_removable()
    }

    /// Removes every word.
    pub fn clear(&mut self) {
        self.root = TrieNode::new();
    }

    fn collect_words(node: &TrieNode, path: &mut String, results: &mut Vec<String>) {
        if node.is_terminal {
            results.push(path.clone());
        }

        for (&c, child) in &node.children {
            path.push(c);
            Self::collect_words(child, path, results);
            path.pop();
        }
    }

    fn count_terminals(node: &TrieNode) -> usize {
        let own = usize::from(node.is_terminal);
        own + node.children.values().map(Self::count_terminals).sum::<usize>()
    }

    #[cfg(test)]
    fn node_count(&self) -> usize {
        fn count(node: &TrieNode) -> usize {
            1 + node.children.values().map(count).sum::<usize>()
        }
        count(&self.root)
    }
}

impl<S: AsRef<str>> Extend<S> for LanaiTrie {
    fn extend<I: IntoIterator<Item = S>>(&mut self, words: I) {
        for word in words {
            self.insert(word);
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for LanaiTrie {
    fn from_iter<I: IntoIterator<Item = S>>(words: I) -> Self {
        let mut trie = Self::new();
        trie.extend(words);
        trie
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn set(words: Vec<String>) -> HashSet<String> {
        words.into_iter().collect()
    }

    fn expected(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_trie_basic_operations() {
        let mut trie = LanaiTrie::new();

        // Test initial state
        assert!(trie.is_empty());
        assert_eq!(trie.count_words(), 0);

        // Test insertion
        trie.insert("hello");
        assert_eq!(trie.count_words(), 1);
        assert!(!trie.is_empty());

        // Test retrieval
        assert!(trie.search("hello"));
        assert!(!trie.search("hell"));
        assert!(!trie.search("nonexistent"));
        assert!(trie.starts_with("hell"));

        // Case is preserved, not folded
        assert!(!trie.search("HELLO"));

        // Test idempotent insert
        trie.insert("hello");
        assert_eq!(trie.count_words(), 1);

        // Test removal
        assert!(trie.delete("hello"));
        assert!(trie.is_empty());
        assert!(!trie.delete("hello"));
    }

    #[test]
    fn test_empty_string() {
        let mut trie = LanaiTrie::new();
        assert!(trie.starts_with(""));
        assert!(!trie.search(""));

        trie.insert("");
        assert!(trie.search(""));
        assert_eq!(trie.count_words(), 1);
        assert_eq!(trie.list_words(), vec![String::new()]);

        assert!(trie.delete(""));
        assert!(!trie.search(""));
        assert!(trie.is_empty());
    }

    #[test]
    fn test_trie_prefix_search() {
        let mut trie = LanaiTrie::new();

        trie.insert("apple");
        trie.insert("application");
        trie.insert("apply");
        trie.insert("banana");

        let results = set(trie.autocomplete("app"));
        assert_eq!(results, expected(&["apple", "application", "apply"]));

        // Test with no matches
        assert!(trie.autocomplete("orange").is_empty());
        assert!(trie.autocomplete("z").is_empty());

        // The empty prefix lists everything
        assert_eq!(set(trie.autocomplete("")), set(trie.list_words()));
    }

    #[test]
    fn test_autocomplete_includes_prefix_word() {
        let trie: LanaiTrie = ["apple", "app", "application", "banana"].into_iter().collect();
        assert_eq!(
            set(trie.autocomplete("ap")),
            expected(&["apple", "app", "application"])
        );
        assert_eq!(set(trie.autocomplete("app")), expected(&["apple", "app", "application"]));
    }

    #[test]
    fn test_delete_prefix_word_keeps_longer_word() {
        let mut trie: LanaiTrie = ["app", "apple"].into_iter().collect();
        let nodes_before = trie.node_count();

        assert!(trie.delete("app"));
        assert!(!trie.search("app"));
        assert!(trie.search("apple"));
        assert!(trie.starts_with("app"));
        assert_eq!(trie.node_count(), nodes_before);
    }

    #[test]
    fn test_delete_prunes_only_dead_branch() {
        let mut trie: LanaiTrie = ["app", "apple"].into_iter().collect();

        assert!(trie.delete("apple"));
        assert!(trie.search("app"));
        assert!(!trie.starts_with("appl"));
        // root + a + p + p
        assert_eq!(trie.node_count(), 4);

        assert!(trie.delete("app"));
        assert_eq!(trie.node_count(), 1);
        assert!(trie.is_empty());
    }

    #[test]
    fn test_delete_stops_at_branching_ancestor() {
        let mut trie: LanaiTrie = ["cart", "care"].into_iter().collect();

        assert!(trie.delete("cart"));
        assert!(trie.search("care"));
        assert!(!trie.starts_with("cart"));
        assert!(trie.starts_with("car"));
        // root + c + a + r + e
        assert_eq!(trie.node_count(), 5);
    }

    #[test]
    fn test_delete_missing_word_is_noop() {
        let mut trie: LanaiTrie = ["apple", "application"].into_iter().collect();
        let nodes_before = trie.node_count();

        assert!(!trie.delete("app"));
        assert!(!trie.delete("apples"));
        assert!(!trie.delete("banana"));
        assert_eq!(trie.node_count(), nodes_before);
        assert_eq!(trie.count_words(), 2);
    }

    #[test]
    fn test_concrete_scenario() {
        let mut trie: LanaiTrie = ["apple", "app", "application", "banana"].into_iter().collect();
        assert_eq!(trie.count_words(), 4);

        trie.delete("app");
        assert_eq!(trie.count_words(), 3);
        assert!(!trie.search("app"));
        assert!(trie.search("apple"));
    }

    #[test]
    fn test_symbols_and_digits() {
        let trie: LanaiTrie = ["c++", "c#", "4chan", "e-mail", "日本"].into_iter().collect();
        for word in ["c++", "c#", "4chan", "e-mail", "日本"] {
            assert!(trie.search(word), "{word} should be stored");
        }
        assert_eq!(set(trie.autocomplete("c")), expected(&["c++", "c#"]));
        assert!(trie.starts_with("日"));
    }

    #[test]
    fn test_count_matches_list() {
        let trie: LanaiTrie = ["a", "ab", "abc", "b", "ba"].into_iter().collect();
        assert_eq!(trie.count_words(), trie.list_words().len());
        assert_eq!(set(trie.list_words()), expected(&["a", "ab", "abc", "b", "ba"]));
    }

    #[test]
    fn test_clear() {
        let mut trie: LanaiTrie = ["one", "two"].into_iter().collect();
        trie.clear();
        assert!(trie.is_empty());
        assert!(trie.list_words().is_empty());
        assert!(trie.starts_with(""));
    }
}
