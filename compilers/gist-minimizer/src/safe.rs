use gist_graph::DepGraph;
use gist_protocol::Phrase;
use tracing::{debug, trace};

use crate::record::RemovalRecord;
use crate::tables::CompiledTables;

/// Relation-pattern-driven removal that is always correctness-
/// preserving. Idempotent: once pruned, no surviving edge matches.
///
/// Two scans feed one batched edit:
/// 1. direct dependents of the head whose edge matches the safe table,
/// 2. non-head named-entity tokens whose parent edge matches the
///    safe-entity table,
/// each taken together with its whole subtree so no governed fragment
/// is left dangling.
pub fn safe_minimize(
    phrase: &mut Phrase,
    graph: &DepGraph,
    tables: &CompiledTables,
) -> RemovalRecord {
    let mut record = RemovalRecord::default();
    let head = phrase.head();

    for (child, relation) in graph.children(head) {
        if !phrase.contains(child) {
            continue;
        }
        if tables.safe_head.matches(relation) {
            trace!(token = %child, relation, "safe pattern matched head dependent");
            record.mark_subtree(graph, child, relation);
        }
    }

    for token in phrase.tokens() {
        if token.idx == head || !token.is_entity() || record.is_marked(token.idx) {
            continue;
        }
        // A token the graph has never seen has no matchable parent edge.
        let Some((_, relation)) = graph.parent_relation(token.idx) else {
            continue;
        };
        if tables.safe_entity.matches(relation) {
            trace!(token = %token.idx, relation, "safe pattern matched entity attachment");
            record.mark_subtree(graph, token.idx, relation);
        }
    }

    let removed = phrase.remove_all(record.marked());
    if removed > 0 {
        debug!(%head, removed, matches = ?record.matches(), "safe tier pruned phrase");
    }
    record
}
