//! Command execution implementations

use super::Commands;
use super::definitions::TilesCommands;
use super::{actors, markers, names, text, tiles};
use crate::config::ToolConfig;
use crate::markers::StaticSources;

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self, config: &ToolConfig) -> anyhow::Result<()> {
        match self {
            Commands::Names {
                msg_root,
                missing,
                extra,
                output,
            } => names::names(config, msg_root, missing, extra.as_deref(), output),
            Commands::CommonNames {
                common_name,
                names: names_path,
                output,
                quiet,
            } => names::common_names(config, common_name, names_path, output, *quiet),
            Commands::Horns { names, output } => actors::horns(config, names, output.as_deref()),
            Commands::Dungeons { msg_root, output } => text::dungeons(msg_root, output),
            Commands::Locations { msg_root, output } => text::locations(msg_root, output),
            Commands::Static {
                romfs,
                shrine_caves,
                korok_ids,
                dispensers,
                output,
            } => {
                let sources = StaticSources {
                    romfs: romfs.clone(),
                    shrine_caves: shrine_caves.clone(),
                    korok_ids: korok_ids.clone(),
                    dispensers: dispensers.clone(),
                };
                markers::static_markers(&sources, output)
            }
            Commands::Tiles { command } => command.execute(config),
        }
    }
}

impl TilesCommands {
    /// Execute the selected tile command.
    ///
    /// # Errors
    /// Returns an error if an area is unknown or an image cannot be processed.
    pub fn execute(&self, config: &ToolConfig) -> anyhow::Result<()> {
        match self {
            TilesCommands::Stitch {
                areas,
                output,
                quiet,
            } => tiles::stitch(config, areas, output.as_deref(), *quiet),
            TilesCommands::Pyramid {
                areas,
                output,
                quiet,
            } => tiles::pyramid(config, areas, output.as_deref(), *quiet),
        }
    }
}
