use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "prompt-firewall",
    version,
    about = "Rule-based firewall for LLM prompts",
    long_about = "prompt-firewall inspects prompts destined for a language model and decides \
                  whether to allow, flag, or block them, including instructions hidden as morse code."
)]
pub struct Cli {
    /// Path to the configuration file (YAML, JSON, or TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Filter a prompt and print the verdict
    Check {
        /// The prompt text; read from stdin when omitted
        prompt: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },
    /// List the active pattern rules
    Rules,
}
