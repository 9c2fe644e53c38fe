use std::collections::BTreeSet;

use gist_graph::DepGraph;
use gist_protocol::TokenIdx;

/// One matched removal decision: the token whose parent edge matched a
/// relation pattern, and the label it matched under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    pub token: TokenIdx,
    pub relation: String,
}

/// Transient per-pass bookkeeping: everything marked for deletion plus
/// the matches that caused the marks. Lets one `remove_all` batch the
/// edit and gives the trace of why each token left.
#[derive(Debug, Clone, Default)]
pub struct RemovalRecord {
    marked: BTreeSet<TokenIdx>,
    matches: Vec<PatternMatch>,
}

impl RemovalRecord {
    /// Record a match on `token` and mark its whole subtree, so a
    /// removed modifier takes everything it governs with it.
    pub fn mark_subtree(&mut self, graph: &DepGraph, token: TokenIdx, relation: &str) {
        self.matches.push(PatternMatch {
            token,
            relation: relation.to_string(),
        });
        self.marked.extend(graph.subtree(token));
    }

    pub fn marked(&self) -> &BTreeSet<TokenIdx> {
        &self.marked
    }

    pub fn is_marked(&self, idx: TokenIdx) -> bool {
        self.marked.contains(&idx)
    }

    pub fn matches(&self) -> &[PatternMatch] {
        &self.matches
    }

    pub fn is_empty(&self) -> bool {
        self.marked.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_subtree_covers_dependents() {
        let mut graph = DepGraph::new();
        graph.add_edge(TokenIdx(3), TokenIdx(1), "amod");
        graph.add_edge(TokenIdx(1), TokenIdx(0), "advmod");

        let mut record = RemovalRecord::default();
        record.mark_subtree(&graph, TokenIdx(1), "amod");

        assert!(record.is_marked(TokenIdx(0)));
        assert!(record.is_marked(TokenIdx(1)));
        assert!(!record.is_marked(TokenIdx(3)));
        assert_eq!(record.matches().len(), 1);
        assert_eq!(record.matches()[0].relation, "amod");
    }
}
