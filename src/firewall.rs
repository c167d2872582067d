//! The orchestrator: runs every enabled scanner over one prompt and folds
//! all matches into a single verdict.
//!
//! The active configuration generation lives behind an `ArcSwap`. A
//! `filter` call captures the snapshot once at entry and uses only that
//! copy; `reload` builds a brand-new snapshot and swaps the reference in
//! one step, so in-flight calls see either the fully-old or fully-new
//! configuration, never a mix.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::rules::{Action, PatternRule};
use crate::scanner::{MorseCodeScanner, PatternScanner, ScanMatch, ScanResult, Scanner};

/// Final decision for one prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    pub allowed: bool,
    pub action: Action,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub matched_patterns: Vec<ScanMatch>,
    pub scanner_results: Vec<ScanResult>,
}

impl Verdict {
    fn allow_unscanned() -> Self {
        Self {
            allowed: true,
            action: Action::Allow,
            message: None,
            matched_patterns: Vec::new(),
            scanner_results: Vec::new(),
        }
    }
}

/// One immutable configuration generation: the raw config plus the scanner
/// list built from it. Scanners compile their rules here, once.
struct Snapshot {
    config: Config,
    scanners: Vec<Box<dyn Scanner + Send + Sync>>,
}

impl Snapshot {
    fn new(config: Config) -> Self {
        let scanners: Vec<Box<dyn Scanner + Send + Sync>> = vec![
            Box::new(PatternScanner::new(&config)),
            Box::new(MorseCodeScanner::new(&config.morse_code_scanner)),
        ];
        Self { config, scanners }
    }
}

/// The prompt firewall.
pub struct PromptFirewall {
    snapshot: ArcSwap<Snapshot>,
}

impl PromptFirewall {
    pub fn new(config: Config) -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(Snapshot::new(config)),
        }
    }

    /// Judge one prompt. Runs all enabled scanners sequentially against a
    /// single configuration snapshot and returns the max-severity verdict.
    pub fn filter(&self, prompt: &str) -> Verdict {
        let snapshot = self.snapshot.load_full();

        if !snapshot.config.enabled {
            return Verdict::allow_unscanned();
        }

        let mut action = Action::Allow;
        let mut matched = Vec::new();
        let mut scanner_results = Vec::new();

        for scanner in &snapshot.scanners {
            if !scanner.enabled() {
                continue;
            }

            // A faulty scanner yields an empty result instead of aborting
            // the whole verdict.
            let result = panic::catch_unwind(AssertUnwindSafe(|| scanner.scan(prompt)))
                .unwrap_or_else(|_| {
                    error!(scanner = scanner.name(), "Scanner panicked during scan");
                    ScanResult::empty(scanner.name())
                });

            for m in &result.matches {
                if m.action > action {
                    action = m.action;
                }
                matched.push(m.clone());
            }
            scanner_results.push(result);
        }

        let allowed = action != Action::Block;
        let message = Self::build_message(action, &matched);

        let verdict = Verdict {
            allowed,
            action,
            message,
            matched_patterns: matched,
            scanner_results,
        };
        self.log_verdict(&snapshot.config, prompt, &verdict);
        verdict
    }

    fn build_message(action: Action, matched: &[ScanMatch]) -> Option<String> {
        if matched.is_empty() {
            return None;
        }

        let names = matched
            .iter()
            .map(|m| m.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        match action {
            Action::Block => Some(format!(
                "blocked due to security policy violations: {names}"
            )),
            Action::Warn => Some(format!("flagged for review: {names}")),
            Action::Log => Some(format!("logged for monitoring: {names}")),
            Action::Allow => None,
        }
    }

    fn log_verdict(&self, config: &Config, prompt: &str, verdict: &Verdict) {
        if !config.logging.enabled {
            return;
        }
        if !verdict.allowed && config.logging.log_blocked {
            warn!(
                action = %verdict.action,
                matches = verdict.matched_patterns.len(),
                prompt_len = prompt.len(),
                "Prompt blocked"
            );
        } else if verdict.allowed && config.logging.log_allowed {
            info!(
                action = %verdict.action,
                matches = verdict.matched_patterns.len(),
                prompt_len = prompt.len(),
                "Prompt allowed"
            );
        }
    }

    /// Atomically replace the active configuration snapshot.
    pub fn reload(&self, config: Config) {
        self.snapshot.store(Arc::new(Snapshot::new(config)));
    }

    /// Read-only view of the configured pattern rules.
    pub fn active_rules(&self) -> Vec<PatternRule> {
        self.snapshot.load().config.patterns.clone()
    }

    /// Defensive copy of the active configuration.
    pub fn active_config(&self) -> Config {
        self.snapshot.load().config.clone()
    }
}

impl Default for PromptFirewall {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
