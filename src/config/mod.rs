//! Configuration type definitions.
//!
//! The configuration is an immutable snapshot: loaded once, replaced
//! wholesale on reload, never mutated in place. Readers always see one
//! complete generation.

mod loading;

use serde::{Deserialize, Serialize};

use crate::rules::{Action, PatternRule};

/// Main configuration structure for the firewall.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Master switch; when false, `filter` allows everything unscanned.
    pub enabled: bool,
    /// Action applied to pattern rules that omit one.
    pub default_action: Action,
    /// User-configured pattern rules, applied in order.
    pub patterns: Vec<PatternRule>,
    /// Steganographic scanner configuration.
    pub morse_code_scanner: MorseScannerConfig,
    /// Logging policy, consumed by the hosting layer.
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: true,
            default_action: Action::Block,
            patterns: Vec::new(),
            morse_code_scanner: MorseScannerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Morse-code scanner configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MorseScannerConfig {
    pub enabled: bool,
    /// Minimum candidate run length worth decoding.
    pub min_morse_length: usize,
    /// Hard cap on decoded output length.
    pub max_decode_length: usize,
}

impl Default for MorseScannerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_morse_length: 10,
            max_decode_length: 1000,
        }
    }
}

/// Logging policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub enabled: bool,
    pub level: String,
    pub log_blocked: bool,
    pub log_allowed: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            log_blocked: true,
            log_allowed: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.enabled);
        assert_eq!(config.default_action, Action::Block);
        assert!(config.patterns.is_empty());
        assert!(config.morse_code_scanner.enabled);
        assert_eq!(config.morse_code_scanner.min_morse_length, 10);
        assert_eq!(config.morse_code_scanner.max_decode_length, 1000);
        assert!(config.logging.log_blocked);
        assert!(!config.logging.log_allowed);
    }

    #[test]
    fn test_yaml_full_shape() {
        let yaml = r#"
enabled: true
default_action: warn
patterns:
  - name: sql-injection
    pattern: '(?i)drop\s+table'
    action: block
    description: SQL injection attempt
  - name: role-override
    pattern: '(?i)you are now'
morse_code_scanner:
  enabled: true
  min_morse_length: 8
  max_decode_length: 500
logging:
  enabled: true
  level: debug
  log_blocked: true
  log_allowed: true
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.default_action, Action::Warn);
        assert_eq!(config.patterns.len(), 2);
        assert_eq!(config.patterns[0].action.as_deref(), Some("block"));
        assert!(config.patterns[1].action.is_none());
        assert_eq!(config.morse_code_scanner.min_morse_length, 8);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_yaml_partial_shape_fills_defaults() {
        let yaml = r#"
patterns:
  - name: only-rule
    pattern: 'x'
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.enabled);
        assert_eq!(config.default_action, Action::Block);
        assert_eq!(config.patterns.len(), 1);
        assert_eq!(config.morse_code_scanner.max_decode_length, 1000);
    }

    #[test]
    fn test_config_round_trips_through_yaml() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.default_action, config.default_action);
        assert_eq!(
            parsed.morse_code_scanner.min_morse_length,
            config.morse_code_scanner.min_morse_length
        );
    }
}
