//! Subcommand enum definitions for CLI

use clap::Subcommand;
use std::path::PathBuf;

/// Map tile commands
#[derive(Subcommand)]
pub enum TilesCommands {
    /// Stitch source tiles into one full map per area
    Stitch {
        /// Areas to stitch (G, S, U)
        #[arg(default_values = ["G", "S", "U"])]
        areas: Vec<String>,

        /// Directory holding pngtiles/ (overrides tiles.work_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Suppress progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Slice stitched maps into the zoom pyramid
    Pyramid {
        /// Areas to slice (G, S, U)
        #[arg(default_values = ["G", "S", "U"])]
        areas: Vec<String>,

        /// Output root (overrides tiles.output_root)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Suppress progress bar
        #[arg(short, long)]
        quiet: bool,
    },
}
