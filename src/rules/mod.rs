//! Severity actions and pattern rules.
//!
//! `Action` values form a strict total order (`allow < log < warn < block`);
//! the final verdict is always the maximum action across every match
//! produced during one `filter` call. `RuleSet` compiles the configured
//! patterns once per configuration generation so scans never pay regex
//! compilation cost and bad patterns are neutralized up front.

pub mod suspicious;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub use suspicious::{suspicious_rules, SuspiciousRule};

/// Severity action for a rule, ordered by increasing strictness.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    #[default]
    Allow,
    Log,
    Warn,
    Block,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Allow => "allow",
            Action::Log => "log",
            Action::Warn => "warn",
            Action::Block => "block",
        }
    }

    /// Parse an action string. Returns `None` for anything outside the
    /// known ordering; callers rank unknown actions as `allow`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "allow" => Some(Action::Allow),
            "log" => Some(Action::Log),
            "warn" => Some(Action::Warn),
            "block" => Some(Action::Block),
            _ => None,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One user-configured detection rule, as authored in the configuration
/// file. Case sensitivity is embedded in the pattern itself (inline `(?i)`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternRule {
    pub name: String,
    pub pattern: String,
    /// Omitted action falls back to the firewall-level `default_action`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default)]
    pub description: String,
}

/// A pattern rule with its regex compiled and its action resolved.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub name: String,
    pub pattern: String,
    pub regex: Regex,
    pub action: Action,
    pub description: String,
}

impl CompiledRule {
    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Immutable, precompiled collection of pattern rules. Built once when a
/// configuration snapshot is constructed.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    /// Compile the configured rules in order. A rule with an invalid regex
    /// or an unrecognized action does not abort the set: the regex failure
    /// drops the rule, the unknown action ranks as `allow`. Both are logged.
    pub fn compile(rules: &[PatternRule], default_action: Action) -> Self {
        let mut compiled = Vec::with_capacity(rules.len());

        for rule in rules {
            let regex = match Regex::new(&rule.pattern) {
                Ok(regex) => regex,
                Err(error) => {
                    warn!(
                        rule = %rule.name,
                        pattern = %rule.pattern,
                        %error,
                        "Skipping rule with invalid regex"
                    );
                    continue;
                }
            };

            let action = match rule.action.as_deref() {
                None => default_action,
                Some(value) => Action::parse(value).unwrap_or_else(|| {
                    warn!(
                        rule = %rule.name,
                        action = value,
                        "Unrecognized action, ranking as allow"
                    );
                    Action::Allow
                }),
            };

            compiled.push(CompiledRule {
                name: rule.name.clone(),
                pattern: rule.pattern.clone(),
                regex,
                action,
                description: rule.description.clone(),
            });
        }

        Self { rules: compiled }
    }

    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
