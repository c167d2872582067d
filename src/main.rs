use std::io::Read;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use prompt_firewall::cli::{Cli, Command, OutputFormat};
use prompt_firewall::{Config, PromptFirewall, Verdict};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref());

    init_tracing(&config);

    let firewall = PromptFirewall::new(config);

    match cli.command {
        Command::Check { prompt, format } => {
            let prompt = match prompt {
                Some(prompt) => prompt,
                None => match read_stdin() {
                    Ok(prompt) => prompt,
                    Err(e) => {
                        eprintln!("Failed to read prompt from stdin: {e}");
                        return ExitCode::from(2);
                    }
                },
            };

            let verdict = firewall.filter(&prompt);
            match format {
                OutputFormat::Terminal => print_terminal(&verdict),
                OutputFormat::Json => match serde_json::to_string_pretty(&verdict) {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        eprintln!("Failed to serialize verdict: {e}");
                        return ExitCode::from(2);
                    }
                },
            }

            if verdict.allowed {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Command::Rules => {
            print_rules(&firewall);
            ExitCode::SUCCESS
        }
    }
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_stdin() -> std::io::Result<String> {
    let mut prompt = String::new();
    std::io::stdin().read_to_string(&mut prompt)?;
    Ok(prompt.trim_end().to_string())
}

fn print_terminal(verdict: &Verdict) {
    let status = if verdict.allowed {
        "ALLOWED".green().bold()
    } else {
        "BLOCKED".red().bold()
    };
    println!("{} (action: {})", status, verdict.action);

    if let Some(message) = &verdict.message {
        println!("{message}");
    }

    for m in &verdict.matched_patterns {
        println!("  - {} [{}] {}", m.name.yellow(), m.action, m.description);
    }
}

fn print_rules(firewall: &PromptFirewall) {
    let rules = firewall.active_rules();
    if rules.is_empty() {
        println!("No pattern rules configured.");
        return;
    }
    for rule in rules {
        let action = rule.action.as_deref().unwrap_or("(default)");
        println!("{} [{}] {}", rule.name.bold(), action, rule.pattern);
    }
}
