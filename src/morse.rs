//! Morse-code extraction and decoding.
//!
//! Pure functions, deterministic given the input text and two tunables:
//! the minimum run length worth considering and a hard cap on decoded
//! output length. The cap is the resource bound against adversarially long
//! morse-like input; extraction itself is linear in the prompt.
//!
//! Pipeline: find maximal runs over the morse alphabet, keep the ones that
//! look like morse (dot/dash density), decode letter tokens against the
//! fixed table, and if the run carried no word boundaries, re-insert them
//! by searching for known high-signal words.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

/// Placeholder emitted for a letter token absent from the table.
pub const PLACEHOLDER: char = '?';

/// International morse table: dot/dash token to decoded character.
pub static MORSE_TABLE: &[(&str, char)] = &[
    (".-", 'A'),
    ("-...", 'B'),
    ("-.-.", 'C'),
    ("-..", 'D'),
    (".", 'E'),
    ("..-.", 'F'),
    ("--.", 'G'),
    ("....", 'H'),
    ("..", 'I'),
    (".---", 'J'),
    ("-.-", 'K'),
    (".-..", 'L'),
    ("--", 'M'),
    ("-.", 'N'),
    ("---", 'O'),
    (".--.", 'P'),
    ("--.-", 'Q'),
    (".-.", 'R'),
    ("...", 'S'),
    ("-", 'T'),
    ("..-", 'U'),
    ("...-", 'V'),
    (".--", 'W'),
    ("-..-", 'X'),
    ("-.--", 'Y'),
    ("--..", 'Z'),
    ("-----", '0'),
    (".----", '1'),
    ("..---", '2'),
    ("...--", '3'),
    ("....-", '4'),
    (".....", '5'),
    ("-....", '6'),
    ("--...", '7'),
    ("---..", '8'),
    ("----.", '9'),
    (".-.-.-", '.'),
    ("--..--", ','),
    ("..--..", '?'),
    (".----.", '\''),
    ("-.-.--", '!'),
    ("-.--.", '('),
    ("-.--.-", ')'),
    (".-...", '&'),
    ("---...", ':'),
    ("-.-.-.", ';'),
    ("-...-", '='),
    (".-.-.", '+'),
    ("-....-", '-'),
    ("..--.-", '_'),
    (".-..-.", '"'),
    (".--.-.", '@'),
];

static MORSE_LOOKUP: LazyLock<HashMap<&'static str, char>> =
    LazyLock::new(|| MORSE_TABLE.iter().copied().collect());

/// Maximal runs over the basic morse alphabet.
static BASIC_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.\-\s]+").expect("basic run"));

/// Second pass additionally accepts `/` and `|` as separators.
static EXTENDED_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.\-/|\s]+").expect("extended run"));

/// Word boundaries inside a candidate: runs of two or more whitespace chars.
static WORD_SEP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").expect("word sep"));

/// High-signal words searched for when a decoded run has no word
/// boundaries, longest first so long words are not split by their
/// substrings.
const KNOWN_WORDS: &[&str] = &[
    "INSTRUCTIONS",
    "DISREGARD",
    "JAILBREAK",
    "DEVELOPER",
    "ASSISTANT",
    "OVERRIDE",
    "PREVIOUS",
    "PRETEND",
    "IGNORE",
    "SYSTEM",
    "FORGET",
    "PROMPT",
    "REVEAL",
    "RULES",
    "MODE",
    "YOU",
    "ARE",
    "NOW",
    "ALL",
];

/// One candidate morse run found inside a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MorseCandidate {
    /// The run, trimmed, with `/` and `|` separators normalized to spaces.
    pub sequence: String,
    /// Byte offset of the run within the scanned text.
    pub position: usize,
}

/// Find candidate morse runs of at least `min_morse_length` characters.
/// Candidates are de-duplicated by sequence identity across both passes.
pub fn extract_candidates(text: &str, min_morse_length: usize) -> Vec<MorseCandidate> {
    let mut candidates = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for (pattern, normalize) in [(&*BASIC_RUN, false), (&*EXTENDED_RUN, true)] {
        for run in pattern.find_iter(text) {
            if !looks_like_morse(run.as_str()) {
                continue;
            }

            let normalized = if normalize {
                run.as_str().replace(['/', '|'], " ")
            } else {
                run.as_str().to_string()
            };

            let sequence = normalized.trim();
            if sequence.len() < min_morse_length {
                continue;
            }

            let leading = normalized.len() - normalized.trim_start().len();
            if seen.insert(sequence.to_string()) {
                candidates.push(MorseCandidate {
                    sequence: sequence.to_string(),
                    position: run.start() + leading,
                });
            }
        }
    }

    candidates
}

/// A run looks like morse when dots and dashes make up more than 70% of its
/// non-whitespace characters. Rejects ordinary punctuation-heavy prose at
/// the cost of missing sparse encodings.
fn looks_like_morse(run: &str) -> bool {
    let mut dot_dash = 0usize;
    let mut non_whitespace = 0usize;

    for c in run.chars() {
        if c.is_whitespace() {
            continue;
        }
        non_whitespace += 1;
        if c == '.' || c == '-' {
            dot_dash += 1;
        }
    }

    non_whitespace > 0 && (dot_dash as f64 / non_whitespace as f64) > 0.7
}

fn lookup(token: &str) -> Option<char> {
    MORSE_LOOKUP.get(token).copied()
}

/// Decode one candidate sequence.
///
/// Words are separated by runs of two or more whitespace characters,
/// letters within a word by single whitespace. Unknown letter tokens decode
/// to [`PLACEHOLDER`] rather than aborting the candidate. Output stops
/// accumulating at `max_decode_length`. Returns `None` when fewer than
/// three real characters survive decoding.
pub fn decode(sequence: &str, max_decode_length: usize) -> Option<String> {
    let mut decoded = String::new();

    'words: for (i, word) in WORD_SEP.split(sequence.trim()).enumerate() {
        if word.is_empty() {
            continue;
        }
        if i > 0 {
            if decoded.len() + 1 > max_decode_length {
                break;
            }
            decoded.push(' ');
        }
        for token in word.split_whitespace() {
            if decoded.len() + 1 > max_decode_length {
                break 'words;
            }
            decoded.push(lookup(token).unwrap_or(PLACEHOLDER));
        }
    }

    // A single long token means the sender dropped word gaps; best-effort
    // re-segmentation against the known-word dictionary.
    if !decoded.contains(' ') && decoded.len() > 10 {
        decoded = reconstruct_words(&decoded);
        decoded.truncate(max_decode_length);
    }

    let real_chars = decoded
        .chars()
        .filter(|c| *c != PLACEHOLDER && !c.is_whitespace())
        .count();
    if real_chars < 3 {
        return None;
    }

    Some(decoded)
}

/// Re-insert word boundaries around dictionary hits, longest word first,
/// then collapse whitespace. May leave some characters unsegmented.
fn reconstruct_words(token: &str) -> String {
    let mut out = token.to_string();
    for word in KNOWN_WORDS {
        if out.contains(word) {
            out = out.replace(word, &format!(" {word} "));
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
