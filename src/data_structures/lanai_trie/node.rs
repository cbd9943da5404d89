//! Node implementation for the Lanai Trie.
//!
//! Each node owns its children outright, so dropping a node drops its whole
//! subtree. There are no back references; the structure is a plain tree.

use fnv::FnvHashMap;

/// A node in the Lanai Trie.
///
/// Each node represents one character transition on a word path. Terminal
/// nodes mark the end of a stored word.
#[derive(Debug, Default, Clone)]
pub struct TrieNode {
    /// Map of characters to child nodes
    pub children: FnvHashMap<char, TrieNode>,

    /// Whether the path from the root to this node spells a stored word
    pub is_terminal: bool,
}

impl TrieNode {
    /// Creates a new empty trie node.
    pub fn new() -> Self {
        Self {
            children: FnvHashMap::default(),
            is_terminal: false,
        }
    }

    /// Returns the child reached over `c`, if any.
    pub fn child(&self, c: char) -> Option<&TrieNode> {
        self.children.get(&c)
    }

    /// A node with no word ending at it and nothing below it can be pruned.
    pub fn is_removable(&self) -> bool {
        !self.is_terminal && self.children.is_empty()
    }

    /// Follows `path` one character at a time from this node.
    ///
    /// Returns `None` as soon as a required child is missing.
    pub fn descend(&self, path: &str) -> Option<&TrieNode> {
        path.chars().try_fold(self, |node, c| node.child(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_is_removable() {
        let node = TrieNode::new();
        assert!(node.is_removable());
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_descend() {
        let mut root = TrieNode::new();
        let mut a = TrieNode::new();
        a.children.insert('b', TrieNode { is_terminal: true, ..TrieNode::new() });
        root.children.insert('a', a);

        assert!(root.descend("").is_some());
        assert!(root.descend("ab").map(|n| n.is_terminal).unwrap_or(false));
        assert!(root.descend("abc").is_none());
        assert!(root.descend("b").is_none());
        assert!(!root.descend("a").unwrap().is_removable());
    }
}
