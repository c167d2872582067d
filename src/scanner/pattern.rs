//! Pattern scanner: user-configured regex rules against raw prompt text.

use tracing::trace;

use crate::config::Config;
use crate::rules::RuleSet;

use super::{MatchMetadata, ScanMatch, ScanResult, Scanner};

pub const PATTERN_SCANNER_NAME: &str = "pattern_scanner";

/// Applies the configured rule set to the raw prompt, in configured order.
/// Rules were compiled when the snapshot was built; a scan never pays
/// compilation cost and never sees an invalid pattern.
pub struct PatternScanner {
    rules: RuleSet,
}

impl PatternScanner {
    pub fn new(config: &Config) -> Self {
        Self {
            rules: RuleSet::compile(&config.patterns, config.default_action),
        }
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

impl Scanner for PatternScanner {
    fn name(&self) -> &'static str {
        PATTERN_SCANNER_NAME
    }

    fn scan(&self, prompt: &str) -> ScanResult {
        let mut result = ScanResult::empty(PATTERN_SCANNER_NAME);
        if prompt.is_empty() {
            return result;
        }

        trace!(
            rules = self.rules.len(),
            prompt_len = prompt.len(),
            "Scanning prompt against pattern rules"
        );

        for rule in self.rules.rules() {
            if rule.matches(prompt) {
                result.matches.push(ScanMatch {
                    name: rule.name.clone(),
                    action: rule.action,
                    description: rule.description.clone(),
                    metadata: MatchMetadata::Pattern {
                        pattern: rule.pattern.clone(),
                    },
                });
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Action, PatternRule};

    fn config_with_rules(rules: Vec<PatternRule>) -> Config {
        Config {
            patterns: rules,
            ..Config::default()
        }
    }

    fn rule(name: &str, pattern: &str, action: Option<&str>) -> PatternRule {
        PatternRule {
            name: name.to_string(),
            pattern: pattern.to_string(),
            action: action.map(String::from),
            description: format!("{name} rule"),
        }
    }

    #[test]
    fn test_matching_rule_produces_match() {
        let scanner = PatternScanner::new(&config_with_rules(vec![rule(
            "sql-injection",
            r"(?i)drop\s+table",
            Some("block"),
        )]));

        let result = scanner.scan("'; DROP TABLE users; --");
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].name, "sql-injection");
        assert_eq!(result.matches[0].action, Action::Block);
        assert!(matches!(
            &result.matches[0].metadata,
            MatchMetadata::Pattern { pattern } if pattern.contains("drop")
        ));
    }

    #[test]
    fn test_no_match_on_clean_prompt() {
        let scanner = PatternScanner::new(&config_with_rules(vec![rule(
            "sql-injection",
            r"(?i)drop\s+table",
            Some("block"),
        )]));

        let result = scanner.scan("What is the weather like today?");
        assert!(!result.has_matches());
    }

    #[test]
    fn test_empty_prompt_short_circuits() {
        let scanner = PatternScanner::new(&config_with_rules(vec![rule(
            "anything",
            ".*",
            Some("block"),
        )]));

        let result = scanner.scan("");
        assert!(!result.has_matches());
    }

    #[test]
    fn test_invalid_rule_skipped_scan_continues() {
        let scanner = PatternScanner::new(&config_with_rules(vec![
            rule("broken", "[invalid(", Some("block")),
            rule("valid", "hello", Some("warn")),
        ]));

        assert_eq!(scanner.rule_count(), 1);
        let result = scanner.scan("hello world");
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].name, "valid");
    }

    #[test]
    fn test_rule_without_action_uses_default() {
        let mut config = config_with_rules(vec![rule("defaulted", "x", None)]);
        config.default_action = Action::Warn;
        let scanner = PatternScanner::new(&config);

        let result = scanner.scan("x marks the spot");
        assert_eq!(result.matches[0].action, Action::Warn);
    }

    #[test]
    fn test_matches_reported_in_configured_order() {
        let scanner = PatternScanner::new(&config_with_rules(vec![
            rule("second-alphabetically", "prompt", Some("log")),
            rule("first-alphabetically", "prompt", Some("warn")),
        ]));

        let result = scanner.scan("a prompt matching both rules");
        assert_eq!(result.matches[0].name, "second-alphabetically");
        assert_eq!(result.matches[1].name, "first-alphabetically");
    }

    #[test]
    fn test_scanner_enabled_by_default() {
        let scanner = PatternScanner::new(&Config::default());
        assert!(scanner.enabled());
        assert_eq!(scanner.name(), "pattern_scanner");
    }
}
