//! Single-character wildcard matching.

use super::node::TrieNode;

/// Pattern symbol that matches any single character.
pub const WILDCARD: char = '.';

/// Collects every stored word of the same length as `pattern` whose
/// characters agree with each literal position of the pattern.
pub(crate) fn wildcard_search(root: &TrieNode, pattern: &[char]) -> Vec<String> {
    let mut results = Vec::new();
    let mut path = String::new();
    collect(root, pattern, &mut path, &mut results);
    results
}

fn collect(node: &TrieNode, pattern: &[char], path: &mut String, results: &mut Vec<String>) {
    let Some((&head, rest)) = pattern.split_first() else {
        if node.is_terminal {
            results.push(path.clone());
        }
        return;
    };

    if head == WILDCARD {
        for (&c, child) in &node.children {
            path.push(c);
            collect(child, rest, path, results);
            path.pop();
        }
    } else if let Some(child) = node.child(head) {
        path.push(head);
        collect(child, rest, path, results);
        path.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::super::LanaiTrie;
    use std::collections::HashSet;

    fn matches(trie: &LanaiTrie, pattern: &str) -> HashSet<String> {
        trie.wildcard_search(pattern).into_iter().collect()
    }

    #[test]
    fn test_length_must_match() {
        let trie: LanaiTrie = ["apple", "app"].into_iter().collect();
        assert_eq!(matches(&trie, "app.."), HashSet::from(["apple".to_string()]));
        assert_eq!(matches(&trie, "a.."), HashSet::from(["app".to_string()]));
        assert!(matches(&trie, "app...").is_empty());
    }

    #[test]
    fn test_all_wildcards() {
        let trie: LanaiTrie = ["cat", "cot", "dog", "do"].into_iter().collect();
        let expected: HashSet<String> =
            ["cat", "cot", "dog"].iter().map(|s| s.to_string()).collect();
        assert_eq!(matches(&trie, "..."), expected);
    }

    #[test]
    fn test_literal_only() {
        let trie: LanaiTrie = ["cat", "cot"].into_iter().collect();
        assert_eq!(matches(&trie, "cot"), HashSet::from(["cot".to_string()]));
        assert!(matches(&trie, "cut").is_empty());
    }

    #[test]
    fn test_empty_pattern() {
        let mut trie: LanaiTrie = ["a"].into_iter().collect();
        assert!(matches(&trie, "").is_empty());
        trie.insert("");
        assert_eq!(matches(&trie, ""), HashSet::from([String::new()]));
    }

    #[test]
    fn test_stored_dot_is_matched_literally_or_by_wildcard() {
        let trie: LanaiTrie = ["a.b", "axb"].into_iter().collect();
        let expected: HashSet<String> = ["a.b", "axb"].iter().map(|s| s.to_string()).collect();
        assert_eq!(matches(&trie, "a.b"), expected);
    }
}
