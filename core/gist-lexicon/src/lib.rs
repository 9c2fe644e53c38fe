#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

use alloc::string::String;
use alloc::vec::Vec;

use gist_protocol::model::ArchivedLexicon;
use gist_protocol::{Lexicon, Phrase};

/// Normalize one collocation entry: lowercase, collapse internal
/// whitespace to single spaces, trim the ends.
pub fn normalize_entry(raw: &str) -> String {
    let words: Vec<String> = raw.split_whitespace().map(str::to_lowercase).collect();
    words.join(" ")
}

/// Lemma of every surviving token, lowercased, single-space-joined, in
/// phrase order. This is the lexicon lookup key for a phrase.
pub fn normalize_phrase(phrase: &Phrase) -> String {
    let lemmas: Vec<String> = phrase
        .tokens()
        .iter()
        .map(|t| t.lemma.to_lowercase())
        .collect();
    lemmas.join(" ")
}

/// Lookup key for the two-word fixed-expression check.
pub fn bigram_key(modifier_lemma: &str, head_lemma: &str) -> String {
    let mut key = modifier_lemma.to_lowercase();
    key.push(' ');
    key.push_str(&head_lemma.to_lowercase());
    key
}

/// Membership test over a set of normalized collocation keys.
///
/// Implemented by both the owned [`Lexicon`] and its archived form, so
/// the engine can run against an in-memory set in tests and against a
/// memory-mapped artifact in production without copying.
pub trait CollocationSet {
    fn contains_entry(&self, key: &str) -> bool;

    fn entry_count(&self) -> usize;
}

impl CollocationSet for Lexicon {
    fn contains_entry(&self, key: &str) -> bool {
        self.entries
            .binary_search_by(|entry| entry.as_str().cmp(key))
            .is_ok()
    }

    fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

impl CollocationSet for ArchivedLexicon {
    fn contains_entry(&self, key: &str) -> bool {
        self.entries
            .binary_search_by(|entry| entry.as_str().cmp(key))
            .is_ok()
    }

    fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

/// Build an owned lexicon from raw entries: normalize, sort, dedup.
/// The compiler tool runs this once so lookups can binary-search.
pub fn build_lexicon<I>(version: u32, raw_entries: I) -> Lexicon
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut entries: Vec<String> = raw_entries
        .into_iter()
        .map(|e| normalize_entry(e.as_ref()))
        .filter(|e| !e.is_empty())
        .collect();
    entries.sort_unstable();
    entries.dedup();
    Lexicon { version, entries }
}
