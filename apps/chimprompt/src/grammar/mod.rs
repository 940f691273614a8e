//! ChimPrompt grammar: vocabulary, canonical text, editing operations and heuristic
//! extraction. Everything here is pure and synchronous.

pub mod elements;
pub mod error;
pub mod extract;
pub mod prompt;
pub mod segment;

pub use elements::{ElementDefinition, ElementKey, ELEMENTS, PRIORITY};
pub use error::GrammarError;
pub use extract::{extract_from_natural_language, DetectedInfo, ExtractionResult, MissingField};
pub use prompt::{parse, parse_strict, serialize, JumpMode, Prompt, Toggle, SEPARATOR};
pub use segment::{Keyword, Segment};
