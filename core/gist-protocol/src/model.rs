use alloc::string::String;
use alloc::vec::Vec;

use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Compiled collocation lexicon: known fixed/frequent multi-word
/// expressions keyed by their normalized form (lemmas, lowercased,
/// space-joined).
///
/// Entries are sorted and deduplicated by the compiler tool so the
/// archived form can be binary-searched without deserializing.
#[derive(Debug, Clone, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Lexicon {
    pub version: u32,
    pub entries: Vec<String>,
}

/// Versioned relation-pattern configuration: the grammatical relation
/// labels (or `label*` prefixes) assigned to each minimization tier.
///
/// The label set must match the upstream dependency-parsing convention
/// or extraction quality silently degrades, which is why these travel
/// as a compiled artifact rather than code.
#[derive(Debug, Clone, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct RuleTables {
    pub version: u32,
    /// Dependents of the phrase head that never alter truth conditions.
    pub safe_head: Vec<String>,
    /// Named-entity attachments that are always droppable.
    pub safe_entity: Vec<String>,
    /// Broader set evaluated by the dictionary tier only.
    pub dictionary: Vec<String>,
}
