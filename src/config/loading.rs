//! Configuration loading functions.

use std::fs;
use std::path::Path;

use tracing::warn;

use crate::error::{FirewallError, Result};

use super::Config;

impl Config {
    /// Load configuration from a file, dispatching on the extension.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| FirewallError::ReadConfig {
            path: path.display().to_string(),
            source: e,
        })?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "yaml" | "yml" => {
                serde_yaml::from_str(&content).map_err(|e| FirewallError::ParseYaml {
                    path: path.display().to_string(),
                    source: e,
                })
            }
            "json" => serde_json::from_str(&content).map_err(|e| FirewallError::ParseJson {
                path: path.display().to_string(),
                source: e,
            }),
            "toml" => toml::from_str(&content).map_err(|e| FirewallError::ParseToml {
                path: path.display().to_string(),
                source: e,
            }),
            _ => Err(FirewallError::UnsupportedFormat {
                path: path.display().to_string(),
                extension: ext,
            }),
        }
    }

    /// Load configuration, masking failures behind the built-in default
    /// (enabled, `default_action = block`, empty rule list). A missing or
    /// unreadable source is logged, never fatal.
    pub fn load(path: Option<&Path>) -> Self {
        match path {
            Some(path) => match Self::from_file(path) {
                Ok(config) => config,
                Err(error) => {
                    warn!(
                        path = %path.display(),
                        %error,
                        "Falling back to default configuration"
                    );
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }
}
