use gist_graph::DepGraph;
use gist_lexicon::{bigram_key, normalize_phrase, CollocationSet};
use gist_protocol::{Phrase, Token};
use tracing::{debug, trace};

use crate::record::RemovalRecord;
use crate::tables::CompiledTables;

/// Membership granularity for the fixed-expression check that can veto
/// a dictionary-tier removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FixedExpressionPolicy {
    /// Keep a modifier when `"{modifier-lemma} {head-lemma}"` is a
    /// lexicon entry. The narrowest rule that protects two-word fixed
    /// terms such as "sports car".
    #[default]
    Bigram,
    /// Keep a modifier when the normalized string of its whole subtree
    /// plus the head is a lexicon entry.
    SubtreeSpan,
}

/// Collocation-gated removal of the generic noun modifiers and
/// entity-internal tokens the safe tier deliberately leaves alone.
///
/// Runs only on an already safe-minimized phrase; single pass, not a
/// fixed point. A phrase that is itself a known collocation is treated
/// as atomic and left untouched.
pub fn dictionary_minimize<L>(
    phrase: &mut Phrase,
    graph: &DepGraph,
    tables: &CompiledTables,
    lexicon: &L,
    policy: FixedExpressionPolicy,
) -> RemovalRecord
where
    L: CollocationSet + ?Sized,
{
    let mut record = RemovalRecord::default();

    let key = normalize_phrase(phrase);
    if lexicon.contains_entry(&key) {
        debug!(%key, "phrase is a known collocation; left intact");
        return record;
    }

    let head = phrase.head();
    let head_lemma = phrase.head_token().lemma.clone();

    for (child, relation) in graph.children(head) {
        let Some(token) = phrase.get(child) else {
            continue;
        };
        // Entity tokens are governed by the span rule below, never by
        // the generic modifier rule.
        if token.is_entity() {
            continue;
        }
        if !tables.dictionary.matches(relation) {
            continue;
        }

        let fixed_expression = match policy {
            FixedExpressionPolicy::Bigram => {
                lexicon.contains_entry(&bigram_key(&token.lemma, &head_lemma))
            }
            FixedExpressionPolicy::SubtreeSpan => {
                let span = graph.subtree(child);
                let lemmas: Vec<String> = phrase
                    .tokens()
                    .iter()
                    .filter(|t| t.idx == head || span.contains(&t.idx))
                    .map(|t| t.lemma.to_lowercase())
                    .collect();
                lexicon.contains_entry(&lemmas.join(" "))
            }
        };

        if fixed_expression {
            trace!(token = %child, relation, "modifier kept: part of a fixed expression");
            continue;
        }
        record.mark_subtree(graph, child, relation);
    }

    for span in entity_spans(phrase) {
        if span.len() < 3 {
            continue; // no internal tokens to consider
        }
        let full: Vec<String> = span.iter().map(|t| t.lemma.to_lowercase()).collect();
        let full = full.join(" ");
        if lexicon.contains_entry(&full) {
            trace!(entity = %full, "entity kept whole: known collocation");
            continue;
        }
        for token in &span[1..span.len() - 1] {
            if token.idx == head || record.is_marked(token.idx) {
                continue;
            }
            let relation = graph
                .parent_relation(token.idx)
                .map(|(_, r)| r.to_string())
                .unwrap_or_else(|| token.relation.clone());
            record.mark_subtree(graph, token.idx, &relation);
        }
    }

    let removed = phrase.remove_all(record.marked());
    if removed > 0 {
        let minimized = normalize_phrase(phrase);
        debug!(%head, removed, %minimized, "dictionary tier pruned phrase");
    }
    record
}

/// Maximal runs of consecutive phrase tokens sharing one named-entity
/// tag, in phrase order.
fn entity_spans(phrase: &Phrase) -> Vec<Vec<&Token>> {
    let mut spans = Vec::new();
    let mut current: Vec<&Token> = Vec::new();

    for token in phrase.tokens() {
        let extends = match (token.ner.as_deref(), current.last()) {
            (Some(tag), Some(last)) => last.ner.as_deref() == Some(tag),
            _ => false,
        };
        if extends {
            current.push(token);
            continue;
        }
        if current.len() > 1 {
            spans.push(core::mem::take(&mut current));
        } else {
            current.clear();
        }
        if token.is_entity() {
            current.push(token);
        }
    }
    if current.len() > 1 {
        spans.push(current);
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use gist_lexicon::build_lexicon;
    use gist_protocol::TokenIdx;

    fn tok(idx: u32, surface: &str, relation: &str) -> Token {
        Token {
            idx: TokenIdx(idx),
            surface: surface.into(),
            lemma: surface.to_lowercase(),
            pos: "NN".into(),
            ner: None,
            relation: relation.into(),
        }
    }

    fn entity_tok(idx: u32, surface: &str, relation: &str, tag: &str) -> Token {
        Token {
            ner: Some(tag.into()),
            ..tok(idx, surface, relation)
        }
    }

    #[test]
    fn test_known_collocation_short_circuits() {
        let mut graph = DepGraph::new();
        graph.add_edge(TokenIdx(1), TokenIdx(0), "nn");

        let mut phrase = Phrase::new(
            vec![tok(0, "sports", "nn"), tok(1, "car", "dobj")],
            TokenIdx(1),
        )
        .unwrap();

        let lexicon = build_lexicon(1, ["sports car"]);
        let record = dictionary_minimize(
            &mut phrase,
            &graph,
            &CompiledTables::stanford_defaults(),
            &lexicon,
            FixedExpressionPolicy::default(),
        );

        assert!(record.is_empty());
        assert_eq!(phrase.len(), 2);
    }

    #[test]
    fn test_bigram_vetoes_removal() {
        // "red sports car": "red" goes, "sports" is protected by the
        // "sports car" entry
        let mut graph = DepGraph::new();
        graph.add_edge(TokenIdx(2), TokenIdx(0), "nn");
        graph.add_edge(TokenIdx(2), TokenIdx(1), "nn");

        let mut phrase = Phrase::new(
            vec![
                tok(0, "red", "nn"),
                tok(1, "sports", "nn"),
                tok(2, "car", "dobj"),
            ],
            TokenIdx(2),
        )
        .unwrap();

        let lexicon = build_lexicon(1, ["sports car"]);
        dictionary_minimize(
            &mut phrase,
            &graph,
            &CompiledTables::stanford_defaults(),
            &lexicon,
            FixedExpressionPolicy::Bigram,
        );

        let surfaces: Vec<&str> = phrase.tokens().iter().map(|t| t.surface.as_str()).collect();
        assert_eq!(surfaces, vec!["sports", "car"]);
    }

    #[test]
    fn test_entity_span_kept_when_listed() {
        let mut graph = DepGraph::new();
        graph.add_edge(TokenIdx(2), TokenIdx(0), "nn");
        graph.add_edge(TokenIdx(2), TokenIdx(1), "nn");

        let mut phrase = Phrase::new(
            vec![
                entity_tok(0, "New", "nn", "LOCATION"),
                entity_tok(1, "York", "nn", "LOCATION"),
                entity_tok(2, "City", "dobj", "LOCATION"),
            ],
            TokenIdx(2),
        )
        .unwrap();

        let lexicon = build_lexicon(1, ["new york city"]);
        let record = dictionary_minimize(
            &mut phrase,
            &graph,
            &CompiledTables::stanford_defaults(),
            &lexicon,
            FixedExpressionPolicy::default(),
        );

        assert!(record.is_empty());
        assert_eq!(phrase.len(), 3);
    }

    #[test]
    fn test_entity_internal_dropped_when_unlisted() {
        let mut graph = DepGraph::new();
        graph.add_edge(TokenIdx(2), TokenIdx(0), "nn");
        graph.add_edge(TokenIdx(2), TokenIdx(1), "nn");

        let mut phrase = Phrase::new(
            vec![
                entity_tok(0, "John", "nn", "PERSON"),
                entity_tok(1, "Quincy", "nn", "PERSON"),
                entity_tok(2, "Adams", "dobj", "PERSON"),
            ],
            TokenIdx(2),
        )
        .unwrap();

        let lexicon = build_lexicon(1, ["sports car"]);
        dictionary_minimize(
            &mut phrase,
            &graph,
            &CompiledTables::stanford_defaults(),
            &lexicon,
            FixedExpressionPolicy::default(),
        );

        let surfaces: Vec<&str> = phrase.tokens().iter().map(|t| t.surface.as_str()).collect();
        assert_eq!(surfaces, vec!["John", "Adams"]);
    }

    #[test]
    fn test_entity_modifier_exempt_from_generic_rule() {
        // "Eiffel Tower" with an empty lexicon: the nn edge matches the
        // dictionary table, but entity tokens only fall under the span
        // rule, so the mention survives
        let mut graph = DepGraph::new();
        graph.add_edge(TokenIdx(1), TokenIdx(0), "nn");

        let mut phrase = Phrase::new(
            vec![
                entity_tok(0, "Eiffel", "nn", "LOCATION"),
                entity_tok(1, "Tower", "dobj", "LOCATION"),
            ],
            TokenIdx(1),
        )
        .unwrap();

        let lexicon = build_lexicon(1, Vec::<&str>::new());
        let record = dictionary_minimize(
            &mut phrase,
            &graph,
            &CompiledTables::stanford_defaults(),
            &lexicon,
            FixedExpressionPolicy::default(),
        );

        assert!(record.is_empty());
        assert_eq!(phrase.len(), 2);
    }

    #[test]
    fn test_subtree_span_policy() {
        // "board of directors" via prep_of: the span policy checks the
        // whole attachment, not just the bigram
        let mut graph = DepGraph::new();
        graph.add_edge(TokenIdx(0), TokenIdx(2), "prep_of");
        graph.add_edge(TokenIdx(2), TokenIdx(1), "det");

        let mut phrase = Phrase::new(
            vec![
                tok(0, "board", "dobj"),
                tok(2, "directors", "prep_of"),
            ],
            TokenIdx(0),
        )
        .unwrap();

        let lexicon = build_lexicon(1, ["board directors"]);
        let record = dictionary_minimize(
            &mut phrase,
            &graph,
            &CompiledTables::stanford_defaults(),
            &lexicon,
            FixedExpressionPolicy::SubtreeSpan,
        );

        assert!(record.is_empty());
        assert_eq!(phrase.len(), 2);
    }
}
