use gist_protocol::RuleTables;

use crate::pattern::{PatternError, RelationTable};

/// Head dependents that never alter truth conditions under the
/// collapsed-Stanford-dependencies convention.
pub const DEFAULT_SAFE_HEAD: &[&str] = &["det", "amod", "appos", "punct"];

/// Named-entity attachments that are always droppable.
pub const DEFAULT_SAFE_ENTITY: &[&str] = &["appos", "punct"];

/// Broader set evaluated only by the dictionary tier: compounds,
/// classifiers/quantifiers, and the parameterized prepositional and
/// nominal-modifier families.
pub const DEFAULT_DICTIONARY: &[&str] = &[
    "nn",
    "compound",
    "num",
    "quantmod",
    "poss",
    "prep_*",
    "nmod_*",
];

/// The three relation tables of the engine, pattern-compiled and ready
/// to match edge labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTables {
    pub safe_head: RelationTable,
    pub safe_entity: RelationTable,
    pub dictionary: RelationTable,
}

impl CompiledTables {
    pub fn from_lists<A, B, C>(
        safe_head: A,
        safe_entity: B,
        dictionary: C,
    ) -> Result<Self, PatternError>
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
        B: IntoIterator,
        B::Item: AsRef<str>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        Ok(Self {
            safe_head: RelationTable::from_patterns(safe_head)?,
            safe_entity: RelationTable::from_patterns(safe_entity)?,
            dictionary: RelationTable::from_patterns(dictionary)?,
        })
    }

    /// Compile an externally loaded rule-table artifact.
    pub fn compile(tables: &RuleTables) -> Result<Self, PatternError> {
        Self::from_lists(&tables.safe_head, &tables.safe_entity, &tables.dictionary)
    }

    /// Built-in tables for the collapsed Stanford dependencies tagset.
    pub fn stanford_defaults() -> Self {
        Self::from_lists(DEFAULT_SAFE_HEAD, DEFAULT_SAFE_ENTITY, DEFAULT_DICTIONARY)
            .expect("built-in relation tables parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_compile_and_match() {
        let tables = CompiledTables::stanford_defaults();
        assert!(tables.safe_head.matches("det"));
        assert!(tables.safe_head.matches("amod"));
        assert!(!tables.safe_head.matches("nn"));
        assert!(tables.dictionary.matches("nn"));
        assert!(tables.dictionary.matches("prep_of"));
        assert!(tables.dictionary.matches("nmod_about"));
        assert!(!tables.dictionary.matches("rcmod"));
    }

    #[test]
    fn test_compile_artifact_round_trip() {
        let artifact = RuleTables {
            version: 2,
            safe_head: vec!["det".into()],
            safe_entity: vec![],
            dictionary: vec!["prep_*".into()],
        };
        let tables = CompiledTables::compile(&artifact).unwrap();
        assert!(tables.safe_head.matches("det"));
        assert!(tables.safe_entity.is_empty());
        assert!(tables.dictionary.matches("prep_with"));
    }

    #[test]
    fn test_compile_surfaces_bad_patterns() {
        let artifact = RuleTables {
            version: 1,
            safe_head: vec!["d et".into()],
            safe_entity: vec![],
            dictionary: vec![],
        };
        assert!(CompiledTables::compile(&artifact).is_err());
    }
}
