//! Steganographic scanner: instructions hidden as morse code.
//!
//! Each decodable candidate from the morse module is re-run through the
//! fixed suspicious-content rules. A single candidate may trigger several
//! rules; all of them are reported.

use tracing::{debug, trace};

use crate::config::MorseScannerConfig;
use crate::morse;
use crate::rules::suspicious_rules;

use super::{MatchMetadata, ScanMatch, ScanResult, Scanner};

pub const MORSE_SCANNER_NAME: &str = "morse_code_scanner";

pub struct MorseCodeScanner {
    enabled: bool,
    min_morse_length: usize,
    max_decode_length: usize,
}

impl MorseCodeScanner {
    pub fn new(config: &MorseScannerConfig) -> Self {
        Self {
            enabled: config.enabled,
            min_morse_length: config.min_morse_length,
            max_decode_length: config.max_decode_length,
        }
    }
}

impl Scanner for MorseCodeScanner {
    fn name(&self) -> &'static str {
        MORSE_SCANNER_NAME
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn scan(&self, prompt: &str) -> ScanResult {
        let mut result = ScanResult::empty(MORSE_SCANNER_NAME);
        if prompt.is_empty() {
            return result;
        }

        let candidates = morse::extract_candidates(prompt, self.min_morse_length);
        trace!(
            candidates = candidates.len(),
            prompt_len = prompt.len(),
            "Extracted morse candidates"
        );

        for candidate in candidates {
            let Some(decoded) = morse::decode(&candidate.sequence, self.max_decode_length) else {
                continue;
            };

            debug!(
                position = candidate.position,
                decoded = %decoded,
                "Decoded morse candidate"
            );

            for rule in suspicious_rules() {
                if rule.matches(&decoded) {
                    result.matches.push(ScanMatch {
                        name: rule.name.to_string(),
                        action: rule.action,
                        description: rule.description.to_string(),
                        metadata: MatchMetadata::MorseCode {
                            morse_sequence: candidate.sequence.clone(),
                            decoded_text: decoded.clone(),
                            position: candidate.position,
                        },
                    });
                }
            }
        }

        result
    }
}
