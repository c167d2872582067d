//! Error types for prompt-firewall.
//!
//! Configuration errors are the only failures surfaced to callers, and even
//! those are masked behind a safe default by `Config::load`. Everything
//! inside the scanning core is local and recoverable.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FirewallError {
    #[error("Failed to read configuration file: {path}")]
    ReadConfig {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML configuration: {path}")]
    ParseYaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to parse JSON configuration: {path}")]
    ParseJson {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse TOML configuration: {path}")]
    ParseToml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Unsupported configuration format for {path}: .{extension}")]
    UnsupportedFormat { path: String, extension: String },

    #[error("Regex compilation error: {0}")]
    Regex(#[from] regex::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for prompt-firewall operations.
pub type Result<T> = std::result::Result<T, FirewallError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_read_config() {
        let err = FirewallError::ReadConfig {
            path: "/path/to/firewall.yaml".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to read configuration file: /path/to/firewall.yaml"
        );
    }

    #[test]
    fn test_error_display_unsupported_format() {
        let err = FirewallError::UnsupportedFormat {
            path: "firewall.ini".to_string(),
            extension: "ini".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unsupported configuration format for firewall.ini: .ini"
        );
    }

    #[test]
    fn test_error_from_regex_error() {
        let regex_err = regex::Regex::new("[invalid(").unwrap_err();
        let err: FirewallError = regex_err.into();
        assert!(err.to_string().contains("Regex compilation error"));
    }

    #[test]
    fn test_error_source_preserved() {
        use std::error::Error as _;

        let err = FirewallError::ReadConfig {
            path: "x".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());
    }
}
