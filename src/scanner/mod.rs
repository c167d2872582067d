//! Scanner contract and the value types scanners produce.

pub mod morse;
pub mod pattern;

use serde::{Deserialize, Serialize};

use crate::rules::Action;

pub use morse::MorseCodeScanner;
pub use pattern::PatternScanner;

/// Core trait for all prompt scanners.
///
/// Implementations are pure with respect to the configuration snapshot they
/// were constructed from and never mutate shared state. Empty prompt text
/// yields an empty result, not an error.
pub trait Scanner {
    /// Stable name used to label this scanner's results.
    fn name(&self) -> &'static str;

    /// Whether this scanner should run, derived from its configuration slice.
    fn enabled(&self) -> bool {
        true
    }

    fn scan(&self, prompt: &str) -> ScanResult;
}

/// Rule-specific diagnostic metadata attached to a match. The serde tag
/// doubles as the scanner-type marker in the serialized verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scanner_type", rename_all = "snake_case")]
pub enum MatchMetadata {
    Pattern {
        /// Source of the regex that fired, for diagnostics.
        pattern: String,
    },
    MorseCode {
        /// The raw candidate sequence as found in the prompt.
        morse_sequence: String,
        /// What the sequence decoded to.
        decoded_text: String,
        /// Byte offset of the candidate within the prompt.
        position: usize,
    },
}

/// One rule that fired. Never mutated after construction; aggregation only
/// reads these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanMatch {
    pub name: String,
    pub action: Action,
    pub description: String,
    pub metadata: MatchMetadata,
}

/// One scanner's output for one prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub scanner_name: String,
    pub matches: Vec<ScanMatch>,
}

impl ScanResult {
    pub fn empty(scanner_name: &str) -> Self {
        Self {
            scanner_name: scanner_name.to_string(),
            matches: Vec::new(),
        }
    }

    pub fn has_matches(&self) -> bool {
        !self.matches.is_empty()
    }
}
