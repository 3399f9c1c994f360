mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use openmemory::{Config, Error, MemoryStore, ToolDispatcher};
use tracing_subscriber::EnvFilter;

use commands::Commands;

/// openmemory - A local memory server for tool-calling AI agents
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the memory snapshot file (overrides config)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Owner used when a tool call omits one (overrides config)
    #[arg(long, global = true)]
    owner: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; stdout carries tool output.
fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<ExitCode, Error> {
    let config = resolve_config(cli)?;
    config.ensure_directories()?;

    let store = MemoryStore::open(&config.storage_path)?;
    let mut dispatcher = ToolDispatcher::new(store)
        .with_default_owner(config.default_owner.clone())
        .with_search_limit(config.search_limit);

    commands::execute(&cli.command, &mut dispatcher)
}

/// Layer CLI flags over the loaded configuration.
fn resolve_config(cli: &Cli) -> Result<Config, Error> {
    let mut config = Config::load()?;
    if let Some(store) = &cli.store {
        config.storage_path = store.clone();
    }
    if let Some(owner) = &cli.owner {
        config.default_owner = owner.clone();
    }
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["openmemory", "--verbose", "serve"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Serve));
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "openmemory",
            "call",
            "add_memories",
            "--args",
            r#"{"text": "hi"}"#,
            "--store",
            "/tmp/memories.json",
            "--owner",
            "alice",
        ]);
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/memories.json")));
        assert_eq!(cli.owner.as_deref(), Some("alice"));
        match cli.command {
            Commands::Call { tool, args } => {
                assert_eq!(tool, "add_memories");
                assert_eq!(args.as_deref(), Some(r#"{"text": "hi"}"#));
            }
            _ => panic!("expected call subcommand"),
        }
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["openmemory"]).is_err());
    }

    #[test]
    fn test_cli_status_json() {
        let cli = Cli::parse_from(["openmemory", "status", "--json"]);
        assert!(!cli.verbose);
        assert!(matches!(cli.command, Commands::Status { json: true }));
    }
}
