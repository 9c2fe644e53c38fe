use std::collections::{BTreeSet, HashMap};

use gist_protocol::TokenIdx;
use petgraph::graph::{Graph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction};

/// Directed, labeled dependency graph over the tokens of one sentence.
///
/// Edges run head -> dependent and carry the grammatical relation label
/// of the upstream parsing convention. The graph is built once by the
/// parsing stage and is read-only during minimization.
pub struct DepGraph {
    graph: Graph<TokenIdx, String, Directed>,
    index_map: HashMap<TokenIdx, NodeIndex>,
}

impl DepGraph {
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            index_map: HashMap::new(),
        }
    }

    pub fn add_token(&mut self, idx: TokenIdx) {
        if !self.index_map.contains_key(&idx) {
            let node = self.graph.add_node(idx);
            self.index_map.insert(idx, node);
        }
    }

    /// Attach `dependent` under `head` with the given relation label.
    /// Either endpoint is created on first use.
    pub fn add_edge(&mut self, head: TokenIdx, dependent: TokenIdx, label: impl Into<String>) {
        let head_node = *self
            .index_map
            .entry(head)
            .or_insert_with(|| self.graph.add_node(head));
        let dep_node = *self
            .index_map
            .entry(dependent)
            .or_insert_with(|| self.graph.add_node(dependent));

        self.graph.add_edge(head_node, dep_node, label.into());
    }

    pub fn contains(&self, idx: TokenIdx) -> bool {
        self.index_map.contains_key(&idx)
    }

    /// Direct dependents of a token with their edge labels. Tokens the
    /// graph has never seen behave as if they had no dependents.
    pub fn children(&self, idx: TokenIdx) -> Vec<(TokenIdx, &str)> {
        let Some(&node) = self.index_map.get(&idx) else {
            return Vec::new();
        };
        self.graph
            .edges(node)
            .map(|edge| (self.graph[edge.target()], edge.weight().as_str()))
            .collect()
    }

    /// The edge connecting a token to its syntactic parent, if any.
    pub fn parent_relation(&self, idx: TokenIdx) -> Option<(TokenIdx, &str)> {
        let &node = self.index_map.get(&idx)?;
        self.graph
            .edges_directed(node, Direction::Incoming)
            .next()
            .map(|edge| (self.graph[edge.source()], edge.weight().as_str()))
    }

    /// The token together with all of its transitive dependents.
    ///
    /// Worklist traversal, so pathological chains cannot exhaust the
    /// call stack and cycles from a malformed parse terminate. A token
    /// absent from the graph yields the singleton set.
    pub fn subtree(&self, root: TokenIdx) -> BTreeSet<TokenIdx> {
        let mut collected = BTreeSet::new();
        collected.insert(root);

        let Some(&start) = self.index_map.get(&root) else {
            return collected;
        };

        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            for edge in self.graph.edges(node) {
                let target = edge.target();
                if collected.insert(self.graph[target]) {
                    stack.push(target);
                }
            }
        }

        collected
    }

    pub fn token_count(&self) -> usize {
        self.index_map.len()
    }
}

impl Default for DepGraph {
    fn default() -> Self {
        Self::new()
    }
}
