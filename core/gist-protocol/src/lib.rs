#![no_std] // Engine cores stay hostable in constrained runtimes

extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(feature = "std")]
extern crate std;

pub mod ids;
pub mod mode;
pub mod model;
pub mod phrase;

// Re-export core types for convenience
pub use ids::{SentenceId, TokenIdx};
pub use mode::MinimizeMode;
pub use model::{Lexicon, RuleTables};
pub use phrase::{Phrase, PhraseError, Token};
