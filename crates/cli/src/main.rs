// courtsync CLI - headless stat reconciliation runs

mod commands;
mod exit_codes;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::EXIT_SUCCESS;

/// Error carried up to `main`: exit code plus what to print.
#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Parser)]
#[command(name = "courtsync")]
#[command(about = "Cross-page stat reconciliation (headless)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a reconciliation from a TOML config file
    #[command(after_help = "\
Examples:
  courtsync run wins.recon.toml
  courtsync run wins.recon.toml --json
  courtsync run wins.recon.toml --output report.json")]
    Run {
        /// Path to the .recon.toml config file
        config: PathBuf,

        /// Output JSON to stdout instead of human summary only
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate a recon config without running
    #[command(after_help = "\
Examples:
  courtsync validate wins.recon.toml")]
    Validate {
        /// Path to the .recon.toml config file
        config: PathBuf,
    },

    /// Resolve one raw team name against the roster tables
    #[command(after_help = "\
Examples:
  courtsync resolve GSW
  courtsync resolve 'Golden State'
  courtsync resolve Spurs --tables custom-league.toml")]
    Resolve {
        /// Raw name as scraped: full name, abbreviation, alias, or partial
        name: String,

        /// Custom roster tables (TOML); defaults to the builtin NBA tables
        #[arg(long)]
        tables: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { config, json, output } => commands::cmd_run(&config, json, output.as_deref()),
        Commands::Validate { config } => commands::cmd_validate(&config),
        Commands::Resolve { name, tables } => commands::cmd_resolve(&name, tables.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("error: {}", e.message);
            if let Some(hint) = e.hint {
                eprintln!("hint: {hint}");
            }
            ExitCode::from(e.code)
        }
    }
}
