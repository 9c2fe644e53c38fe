use nom::{
    bytes::complete::take_while1,
    character::complete::char,
    combinator::{all_consuming, opt},
    sequence::pair,
    IResult,
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("empty relation pattern")]
    Empty,
    #[error("invalid relation pattern syntax: {0:?}")]
    Syntax(String),
}

/// Predicate for characters allowed in a grammatical relation label.
/// Covers both collapsed Stanford labels ("prep_of") and UD-style
/// subtyped labels ("nmod:of").
fn is_label_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '-')
}

fn pattern_body(input: &str) -> IResult<&str, (&str, Option<char>)> {
    pair(take_while1(is_label_char), opt(char('*')))(input)
}

/// One entry of a relation table: `label` matches exactly, `label*`
/// matches the whole parameterized family sharing that prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationPattern {
    Exact(String),
    Prefix(String),
}

impl RelationPattern {
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(PatternError::Empty);
        }
        match all_consuming(pattern_body)(raw) {
            Ok((_, (label, Some(_)))) => Ok(Self::Prefix(label.to_string())),
            Ok((_, (label, None))) => Ok(Self::Exact(label.to_string())),
            Err(_) => Err(PatternError::Syntax(raw.to_string())),
        }
    }

    pub fn matches(&self, label: &str) -> bool {
        match self {
            Self::Exact(expected) => label == expected,
            Self::Prefix(prefix) => label.starts_with(prefix.as_str()),
        }
    }
}

/// An ordered list of relation patterns forming one minimization tier.
/// An empty table matches nothing, degrading its tier to a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationTable {
    patterns: Vec<RelationPattern>,
}

impl RelationTable {
    pub fn from_patterns<I>(raw_patterns: I) -> Result<Self, PatternError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let patterns = raw_patterns
            .into_iter()
            .map(|raw| RelationPattern::parse(raw.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn matches(&self, label: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(label))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_and_prefix_parse() {
        assert_eq!(
            RelationPattern::parse("det"),
            Ok(RelationPattern::Exact("det".into()))
        );
        assert_eq!(
            RelationPattern::parse("prep_*"),
            Ok(RelationPattern::Prefix("prep_".into()))
        );
        assert_eq!(
            RelationPattern::parse("nmod:of"),
            Ok(RelationPattern::Exact("nmod:of".into()))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(RelationPattern::parse("   "), Err(PatternError::Empty));
        assert_eq!(
            RelationPattern::parse("prep *"),
            Err(PatternError::Syntax("prep *".into()))
        );
        assert_eq!(
            RelationPattern::parse("*det"),
            Err(PatternError::Syntax("*det".into()))
        );
    }

    #[test]
    fn test_prefix_semantics() {
        let family = RelationPattern::parse("prep_*").unwrap();
        assert!(family.matches("prep_of"));
        assert!(family.matches("prep_in_front_of"));
        assert!(!family.matches("prepc"));

        let exact = RelationPattern::parse("prep_of").unwrap();
        assert!(exact.matches("prep_of"));
        assert!(!exact.matches("prep_off"));
    }

    #[test]
    fn test_empty_table_matches_nothing() {
        let table = RelationTable::default();
        assert!(table.is_empty());
        assert!(!table.matches("det"));
    }
}
