//! souls: generate and validate the agent files of an agent souls repository.
//!
//! # Usage
//!
//! ```text
//! souls [--root <dir>] [-v] generate [--check [--diff]]
//! souls [--root <dir>] [-v] validate [--check | --fix] [--json]
//! souls [--root <dir>] [-v] agents [--json]
//! souls [--root <dir>] [-v] migrate [--write]
//! ```

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use commands::{
    agents::AgentsArgs, generate::GenerateArgs, migrate::MigrateArgs, validate::ValidateArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "souls",
    version,
    about = "Generate and validate agent files from agents/manifest.json",
    long_about = None,
)]
struct Cli {
    /// Repository root containing agents/manifest.json.
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render agent wrappers and skill documents from the manifest.
    Generate(GenerateArgs),

    /// Run every repository check and report PASS/FAIL/WARN findings.
    Validate(ValidateArgs),

    /// List manifest agents in generation order.
    Agents(AgentsArgs),

    /// Add frontmatter to cheatsheets that lack it.
    Migrate(MigrateArgs),
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let root = cli.root.as_path();
    tracing::debug!(root = %root.display(), command = ?cli.command, "running command");
    match cli.command {
        Commands::Generate(args) => args.run(root),
        Commands::Validate(args) => args.run(root),
        Commands::Agents(args) => args.run(root),
        Commands::Migrate(args) => args.run(root),
    }
}
