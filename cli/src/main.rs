//! Cancelflow CLI - Drive the cancellation dialog engine from the terminal
//!
//! # Commands
//! - `cancelflow replay <script>` - Run a script of actions and print the final state
//! - `cancelflow actions <script>` - Print the actions available after a script
//! - `cancelflow schematic` - Print the dialog graph as JSON

mod config;
mod replay;
mod script;
mod telemetry;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::Config;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Cancellation dialog engine CLI
#[derive(Parser)]
#[command(name = "cancelflow")]
#[command(
    author,
    version,
    about = "Command-line driver for the cancellation dialog engine"
)]
struct Cli {
    /// Config file (default: ./cancelflow.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSON or TOML script of actions
    Replay {
        /// Script file (`.toml` for TOML, anything else is JSON)
        script: PathBuf,

        /// Stop at the first rejected action
        #[arg(long, overrides_with = "no_strict")]
        strict: bool,

        /// Skip rejected actions even if the config sets `strict`
        #[arg(long, overrides_with = "strict")]
        no_strict: bool,

        /// Disable pretty-printing JSON output
        #[arg(long)]
        compact: bool,
    },

    /// Print the actions available after replaying a script
    Actions {
        /// Script file
        script: PathBuf,
    },

    /// Print the dialog schematic
    Schematic {
        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    telemetry::init_tracing(&config)?;

    match cli.command {
        Commands::Replay {
            script,
            strict,
            no_strict,
            compact,
        } => {
            let strict = flag_override(strict, no_strict, config.strict);
            run_replay_command(&script, strict, config.pretty && !compact)
        }
        Commands::Actions { script } => run_actions_command(&script, config.pretty),
        Commands::Schematic { output } => run_schematic_command(output.as_deref(), config.pretty),
    }
}

fn run_replay_command(script_path: &Path, strict: bool, pretty: bool) -> Result<()> {
    let script = script::load_script(script_path)?;
    tracing::debug!(actions = script.actions.len(), strict, "Replaying script");

    let report = replay::replay(&script, strict)?;
    println!("{}", to_json(&report, pretty)?);
    Ok(())
}

fn run_actions_command(script_path: &Path, pretty: bool) -> Result<()> {
    let script = script::load_script(script_path)?;
    let report = replay::replay(&script, false)?;
    let listing = serde_json::json!({
        "screen": report.screen,
        "available_actions": report.available_actions,
    });
    println!("{}", to_json(&listing, pretty)?);
    Ok(())
}

fn run_schematic_command(output: Option<&Path>, pretty: bool) -> Result<()> {
    let schematic = cancelflow_flow::schematic();
    let json = to_json(&schematic, pretty)?;

    match output {
        Some(path) => {
            std::fs::write(path, json.as_bytes())
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            tracing::info!(path = %path.display(), "Schematic saved");
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Resolve an on/off flag pair against the config value.
fn flag_override(on: bool, off: bool, configured: bool) -> bool {
    if on {
        true
    } else if off {
        false
    } else {
        configured
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.context("Failed to serialize output")
}
