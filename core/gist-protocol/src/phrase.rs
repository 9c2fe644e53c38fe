use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::ids::TokenIdx;

/// One word of a dependency-parsed sentence, as produced by the upstream
/// tagging pipeline. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub idx: TokenIdx,
    pub surface: String,
    pub lemma: String,
    /// POS tag in the upstream pipeline's tagset; opaque to the engine.
    pub pos: String,
    /// Named-entity tag; `None` when the token is not part of a mention.
    pub ner: Option<String>,
    /// Label of the dependency edge to this token's syntactic parent.
    pub relation: String,
}

impl Token {
    pub fn is_entity(&self) -> bool {
        self.ner.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhraseError {
    /// The declared head index has no token in the sequence.
    HeadMissing(TokenIdx),
    /// Two tokens share a sentence index.
    DuplicateToken(TokenIdx),
}

impl fmt::Display for PhraseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhraseError::HeadMissing(idx) => write!(f, "head token {idx} is not in the phrase"),
            PhraseError::DuplicateToken(idx) => write!(f, "token index {idx} appears twice"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PhraseError {}

/// An ordered sequence of tokens forming one candidate noun phrase or
/// entity mention, rooted at `head`.
///
/// Invariants: token indices are unique, the head token is always
/// present, and no removal operation ever deletes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    head: TokenIdx,
    tokens: Vec<Token>,
}

impl Phrase {
    pub fn new(tokens: Vec<Token>, head: TokenIdx) -> Result<Self, PhraseError> {
        let mut seen = BTreeSet::new();
        for token in &tokens {
            if !seen.insert(token.idx) {
                return Err(PhraseError::DuplicateToken(token.idx));
            }
        }
        if !seen.contains(&head) {
            return Err(PhraseError::HeadMissing(head));
        }
        Ok(Self { head, tokens })
    }

    pub fn head(&self) -> TokenIdx {
        self.head
    }

    pub fn head_token(&self) -> &Token {
        self.tokens
            .iter()
            .find(|t| t.idx == self.head)
            .expect("phrase invariant: head token present")
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always false: the head token cannot be removed.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, idx: TokenIdx) -> bool {
        self.tokens.iter().any(|t| t.idx == idx)
    }

    pub fn get(&self, idx: TokenIdx) -> Option<&Token> {
        self.tokens.iter().find(|t| t.idx == idx)
    }

    pub fn indices(&self) -> impl Iterator<Item = TokenIdx> + '_ {
        self.tokens.iter().map(|t| t.idx)
    }

    /// Deletes every marked token, preserving the relative order of the
    /// survivors. Marks for tokens not in the phrase are no-ops; a mark
    /// on the head is silently ignored. Returns the number removed.
    pub fn remove_all(&mut self, marked: &BTreeSet<TokenIdx>) -> usize {
        let head = self.head;
        let before = self.tokens.len();
        self.tokens.retain(|t| t.idx == head || !marked.contains(&t.idx));
        before - self.tokens.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    fn tok(idx: u32, surface: &str) -> Token {
        Token {
            idx: TokenIdx(idx),
            surface: surface.to_string(),
            lemma: surface.to_string(),
            pos: "NN".to_string(),
            ner: None,
            relation: "dep".to_string(),
        }
    }

    #[test]
    fn test_new_rejects_missing_head() {
        let err = Phrase::new(vec![tok(0, "red"), tok(1, "car")], TokenIdx(7));
        assert_eq!(err, Err(PhraseError::HeadMissing(TokenIdx(7))));
    }

    #[test]
    fn test_new_rejects_duplicate_index() {
        let err = Phrase::new(vec![tok(0, "red"), tok(0, "car")], TokenIdx(0));
        assert_eq!(err, Err(PhraseError::DuplicateToken(TokenIdx(0))));
    }

    #[test]
    fn test_remove_all_preserves_order_and_head() {
        let mut phrase = Phrase::new(
            vec![tok(0, "the"), tok(1, "red"), tok(2, "car")],
            TokenIdx(2),
        )
        .unwrap();

        let mut marked = BTreeSet::new();
        marked.insert(TokenIdx(0));
        marked.insert(TokenIdx(2)); // head: must be ignored
        marked.insert(TokenIdx(9)); // not in phrase: no-op

        let removed = phrase.remove_all(&marked);
        assert_eq!(removed, 1);

        let surfaces: Vec<&str> = phrase.tokens().iter().map(|t| t.surface.as_str()).collect();
        assert_eq!(surfaces, vec!["red", "car"]);
        assert!(phrase.contains(phrase.head()));
    }
}
