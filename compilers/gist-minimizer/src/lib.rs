pub mod dictionary;
pub mod pattern;
pub mod record;
pub mod safe;
pub mod tables;

pub use dictionary::{dictionary_minimize, FixedExpressionPolicy};
pub use pattern::{PatternError, RelationPattern, RelationTable};
pub use record::{PatternMatch, RemovalRecord};
pub use safe::safe_minimize;
pub use tables::CompiledTables;

use gist_graph::DepGraph;
use gist_lexicon::{normalize_phrase, CollocationSet};
use gist_protocol::{Lexicon, MinimizeMode, Phrase};

/// Per-call facade over the two minimization tiers.
///
/// Holds only shared references to read-only tables and an optional
/// collocation lexicon, so one value can serve arbitrarily many
/// concurrent calls; each call takes exclusive mutable access to its
/// phrase for the duration.
pub struct Minimizer<'a, L: CollocationSet = Lexicon> {
    tables: &'a CompiledTables,
    lexicon: Option<&'a L>,
    mode: MinimizeMode,
    policy: FixedExpressionPolicy,
}

impl<'a> Minimizer<'a, Lexicon> {
    /// Safe tier only; no lexicon consulted.
    pub fn safe_only(tables: &'a CompiledTables) -> Self {
        Self {
            tables,
            lexicon: None,
            mode: MinimizeMode::SAFE,
            policy: FixedExpressionPolicy::default(),
        }
    }
}

impl<'a, L: CollocationSet> Minimizer<'a, L> {
    /// Both tiers, gated on the given lexicon.
    pub fn new(tables: &'a CompiledTables, lexicon: &'a L) -> Self {
        Self {
            tables,
            lexicon: Some(lexicon),
            mode: MinimizeMode::aggressive(),
            policy: FixedExpressionPolicy::default(),
        }
    }

    pub fn with_mode(mut self, mode: MinimizeMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_policy(mut self, policy: FixedExpressionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn minimize_subject(&self, phrase: &mut Phrase, graph: &DepGraph) {
        self.minimize_role("subject", phrase, graph);
    }

    pub fn minimize_object(&self, phrase: &mut Phrase, graph: &DepGraph) {
        self.minimize_role("object", phrase, graph);
    }

    fn minimize_role(&self, role: &'static str, phrase: &mut Phrase, graph: &DepGraph) {
        let _span = tracing::debug_span!("minimize", role, head = %phrase.head()).entered();

        // The safe tier runs first, unconditionally.
        safe::safe_minimize(phrase, graph, self.tables);

        if !self.mode.contains(MinimizeMode::DICTIONARY) {
            return;
        }
        // No lexicon supplied: behave as safe minimization only.
        let Some(lexicon) = self.lexicon else {
            return;
        };
        // Role-level gate: a safe-minimized phrase that is already a
        // known collocation stays whole. The dictionary tier re-checks
        // on entry, which also covers partial states reached there.
        if lexicon.contains_entry(&normalize_phrase(phrase)) {
            return;
        }
        dictionary::dictionary_minimize(phrase, graph, self.tables, lexicon, self.policy);
    }
}
