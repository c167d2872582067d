pub mod cli;
pub mod config;
pub mod error;
pub mod firewall;
pub mod morse;
pub mod rules;
pub mod scanner;

pub use config::{Config, LoggingConfig, MorseScannerConfig};
pub use error::{FirewallError, Result};
pub use firewall::{PromptFirewall, Verdict};
pub use rules::{Action, PatternRule};
pub use scanner::{
    MatchMetadata, MorseCodeScanner, PatternScanner, ScanMatch, ScanResult, Scanner,
};
