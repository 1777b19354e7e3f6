use clap::Subcommand;
use std::path::PathBuf;

pub mod actors;
pub mod definitions;
pub mod execute;
pub mod markers;
pub mod names;
pub mod text;
pub mod tiles;

pub use definitions::TilesCommands;

#[derive(Subcommand)]
pub enum Commands {
    /// Build names.json from the ActorMsg tables
    Names {
        /// Message root holding USen.Product.100/
        msg_root: PathBuf,

        /// Manual overrides (key,value per line)
        #[arg(long, default_value = "missing.csv")]
        missing: PathBuf,

        /// Common-name fallbacks from `common-names`
        #[arg(long)]
        extra: Option<PathBuf>,

        /// Output file
        #[arg(short, long, default_value = "names.json")]
        output: PathBuf,
    },

    /// Find fallback names for unnamed actors
    CommonNames {
        /// StaticMsg/AttachmentCommonName.msyt
        common_name: PathBuf,

        /// Existing names.json
        names: PathBuf,

        /// Output file
        #[arg(short, long, default_value = "names_extra.json")]
        output: PathBuf,

        /// Only print the step headers
        #[arg(short, long)]
        quiet: bool,
    },

    /// List horn attachment materials of horned enemies
    Horns {
        /// Existing names.json
        names: PathBuf,

        /// Output file (printed to stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build the shrine text map (Dungeon.json)
    Dungeons {
        /// Message root holding USen.Product.100/
        msg_root: PathBuf,

        /// Output file
        #[arg(short, long, default_value = "Dungeon.json")]
        output: PathBuf,
    },

    /// Build the location text map (LocationMarker.json)
    Locations {
        /// Message root holding USen.Product.100/
        msg_root: PathBuf,

        /// Output file
        #[arg(short, long, default_value = "LocationMarker.json")]
        output: PathBuf,
    },

    /// Build static map markers (static.json)
    Static {
        /// romfs root holding Banc/
        romfs: PathBuf,

        /// Shrine location dump ([{map_name, Location}])
        #[arg(long, default_value = "tools/shrine_caves.json")]
        shrine_caves: PathBuf,

        /// Korok display ids
        #[arg(long, default_value = "tools/koroks_id.json")]
        korok_ids: PathBuf,

        /// Dispenser placement dump
        #[arg(long, default_value = "tools/rbox.json")]
        dispensers: PathBuf,

        /// Output file
        #[arg(short, long, default_value = "static.json")]
        output: PathBuf,
    },

    /// Map tile operations
    Tiles {
        #[command(subcommand)]
        command: TilesCommands,
    },
}
