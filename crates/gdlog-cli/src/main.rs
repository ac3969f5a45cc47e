//! gdlog CLI
//!
//! Command-line driver for the diagnostic collector

use clap::{Parser, Subcommand, ValueEnum};
use gdlog_core::logging_facility::{self, Profile};

mod commands;
mod script;

#[derive(Debug, Parser)]
#[command(name = "gdlog")]
#[command(about = "gdlog - Scoped diagnostic collection", long_about = None)]
struct Cli {
    /// Format of the collector's own log events on stderr (filter with RUST_LOG)
    #[arg(long, value_enum, global = true, default_value_t = LogProfile::Development)]
    log_profile: LogProfile,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogProfile {
    /// Human-readable events
    Development,
    /// JSON events
    Production,
}

impl From<LogProfile> for Profile {
    fn from(profile: LogProfile) -> Self {
        match profile {
            LogProfile::Development => Profile::Development,
            LogProfile::Production => Profile::Production,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Replay a diagnostic script through nested loggers
    Replay(commands::replay::ReplayArgs),
    /// List severities in ascending order
    Severities,
}

fn main() {
    let cli = Cli::parse();
    logging_facility::init(cli.log_profile.into());

    let result = match cli.command {
        Commands::Replay(args) => commands::replay::execute(args),
        Commands::Severities => commands::severities::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
