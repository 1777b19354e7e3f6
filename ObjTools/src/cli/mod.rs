//! ObjTools CLI - Command-line interface for the map data extractors

pub mod commands;
pub mod progress;

use std::path::PathBuf;

use clap::Parser;
use commands::Commands;

use crate::config::ToolConfig;

#[derive(Parser)]
#[command(name = "objtools")]
#[command(about = "ObjTools: TotK object map data extraction", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML configuration file (defaults are used when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Run the ObjTools CLI
pub fn run_cli() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = ToolConfig::load_or_default(cli.config.as_deref())?;
    cli.command.execute(&config)?;

    Ok(())
}
