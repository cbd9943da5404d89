//! Bounded edit-distance search over the trie.
//!
//! Each edge extends the Levenshtein row of its parent by one character of the
//! stored word. A branch is abandoned as soon as every cell of its row exceeds
//! the allowed distance, since no extension can bring the cost back down.

use super::node::TrieNode;

/// Collects every stored word within `max_distance` edits of a target word.
pub(crate) struct FuzzySearcher<'a> {
    target: &'a [char],
    max_distance: usize,
    results: Vec<String>,
}

impl<'a> FuzzySearcher<'a> {
    pub(crate) fn new(target: &'a [char], max_distance: usize) -> Self {
        Self {
            target,
            max_distance,
            results: Vec::new(),
        }
    }

    /// Runs the search from `root` and returns the matches in visit order.
    pub(crate) fn search(mut self, root: &TrieNode) -> Vec<String> {
        // Cost of turning the empty prefix into each prefix of the target.
        let row: Vec<usize> = (0..=self.target.len()).collect();
        let mut path = String::new();

        // The root only seeds the row; matching starts at its children.
        for (&c, child) in &root.children {
            self.visit(child, c, &row, &mut path);
        }
        self.results
    }

    fn visit(&mut self, node: &TrieNode, c: char, prev_row: &[usize], path: &mut String) {
        let row = self.next_row(prev_row, c);
        path.push(c);

        if node.is_terminal && row[self.target.len()] <= self.max_distance {
            self.results.push(path.clone());
        }

        let best = row.iter().copied().min().unwrap_or(usize::MAX);
        if best <= self.max_distance {
            for (&next, child) in &node.children {
                self.visit(child, next, &row, path);
            }
        }

        path.pop();
    }

    #[inline]
    fn next_row(&self, prev_row: &[usize], c: char) -> Vec<usize> {
        let columns = self.target.len() + 1;
        let mut row = Vec::with_capacity(columns);
        row.push(prev_row[0] + 1);

        for i in 1..columns {
            let insert_cost = row[i - 1] + 1;
            let delete_cost = prev_row[i] + 1;
            let replace_cost = prev_row[i - 1] + usize::from(self.target[i - 1] != c);
            row.push(insert_cost.min(delete_cost).min(replace_cost));
        }
        row
    }
}
