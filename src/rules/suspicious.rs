//! Built-in suspicious-content rules for decoded steganographic payloads.
//!
//! These are fixed and compiled once at process start. They run against
//! *decoded* text, which is upper-case and may have imperfect word
//! segmentation, so the patterns use `\s*` between words rather than `\s+`.

use std::sync::LazyLock;

use regex::Regex;

use super::Action;

/// One built-in steganography rule.
#[derive(Debug)]
pub struct SuspiciousRule {
    pub name: &'static str,
    pub regex: Regex,
    pub action: Action,
    pub description: &'static str,
}

impl SuspiciousRule {
    pub fn matches(&self, decoded: &str) -> bool {
        self.regex.is_match(decoded)
    }
}

static SUSPICIOUS_RULES: LazyLock<Vec<SuspiciousRule>> = LazyLock::new(|| {
    vec![
        SuspiciousRule {
            name: "Morse Code Injection Attempt",
            regex: Regex::new(
                r"(?i)(ignore|disregard|forget|override)\s*(all\s*)?(previous|prior|above|earlier)\s*(instructions?|prompts?|rules?)",
            )
            .expect("instruction-override regex"),
            action: Action::Block,
            description: "Instruction-override directive hidden in encoded content",
        },
        SuspiciousRule {
            name: "Encoded Role Override",
            regex: Regex::new(r"(?i)(you\s*are\s*now|act\s*as|pretend\s*(to\s*be|you\s*are))")
                .expect("role-override regex"),
            action: Action::Block,
            description: "Role-override directive hidden in encoded content",
        },
        SuspiciousRule {
            name: "Encoded System Prompt Extraction",
            regex: Regex::new(
                r"(?i)(show|reveal|repeat|print|display)\s*(me\s*)?(your\s*|the\s*)?(system\s*prompt|initial\s*instructions?)",
            )
            .expect("system-prompt-extraction regex"),
            action: Action::Block,
            description: "System-prompt extraction request hidden in encoded content",
        },
        SuspiciousRule {
            name: "Encoded Jailbreak Attempt",
            regex: Regex::new(r"(?i)(jailbreak|developer\s*mode|do\s*anything\s*now|\bdan\s*mode)")
                .expect("jailbreak regex"),
            action: Action::Block,
            description: "Jailbreak keyword hidden in encoded content",
        },
        SuspiciousRule {
            name: "Encoded Harmful Content",
            regex: Regex::new(r"(?i)(bomb|weapon|exploit|malware|ransomware|poison)")
                .expect("harmful-content regex"),
            action: Action::Warn,
            description: "Harmful-content keyword hidden in encoded content",
        },
    ]
});

/// The fixed, process-wide suspicious-content rule list.
pub fn suspicious_rules() -> &'static [SuspiciousRule] {
    &SUSPICIOUS_RULES
}
