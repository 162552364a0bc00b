pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use shopscout_core::config::AppConfig;

#[derive(Debug, Parser)]
#[command(
    name = "shopscout",
    about = "ShopScout recommender CLI",
    long_about = "Query the explainable electronics recommender, inspect configuration, run readiness checks, and seed a demo catalog.",
    after_help = "Examples:\n  shopscout recommend \"best laptop under $1000 for data analysis\"\n  shopscout seed --out data/catalog.json\n  shopscout doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Run a query through the full filter/rank/explain pipeline")]
    Recommend {
        #[arg(help = "Free-text shopping request")]
        query: String,
        #[arg(long, help = "Catalog file to use instead of the configured path")]
        catalog: Option<PathBuf>,
        #[arg(long, help = "Emit the raw pipeline outcome as JSON instead of cards")]
        json: bool,
    },
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Validate config, catalog readability, and LLM credential readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Write the deterministic demo catalog to disk")]
    Seed {
        #[arg(long, help = "Destination path (defaults to the configured catalog path)")]
        out: Option<PathBuf>,
        #[arg(long, help = "Overwrite an existing file")]
        force: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Recommend { query, catalog, json } => {
            commands::recommend::run(&query, catalog.as_deref(), json)
        }
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => commands::doctor::run(json),
        Command::Seed { out, force } => commands::seed::run(out.as_deref(), force),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

/// Install the global tracing subscriber per the logging config. Safe to
/// call once per process; commands that never log skip it.
pub fn init_logging(config: &AppConfig) {
    use shopscout_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}
