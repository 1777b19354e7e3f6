//! Tool configuration
//!
//! Every command runs with [`ToolConfig::default`] unless `--config` points at
//! a TOML file. Missing sections and fields fall back to the defaults, so a
//! config file only needs to list what differs.
//!
//! ```toml
//! [paths]
//! actor_root = "romfs/Pack/Actor"
//!
//! [names]
//! skip_aliases = ["Npc_Zelda"]
//!
//! [[tiles.zooms]]
//! zoom = 2
//! scale = 48.0
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::tiles::{TileFormat, TileLayout, ZoomLevel};

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub paths: PathsConfig,
    pub resolver: ResolverConfig,
    pub names: NamesConfig,
    pub tiles: TilesConfig,
}

/// Where actor packs and shared resources live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding one sub-directory per actor pack
    pub actor_root: PathBuf,
    /// Shared fallback root for records and components
    pub resident_common: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            actor_root: Path::new("Pack").join("Actor"),
            resident_common: Path::new("Pack").join("ResidentCommon"),
        }
    }
}

/// Prototype resolution limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Longest `$parent` chain accepted before resolution fails
    pub max_parent_depth: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_parent_depth: crate::record::DEFAULT_MAX_DEPTH,
        }
    }
}

/// Name table inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamesConfig {
    /// msyt tables relative to the message root, in merge order
    pub tables: Vec<String>,
    /// Keys whose first value wins when a later table disagrees
    pub skip_aliases: Vec<String>,
}

impl Default for NamesConfig {
    fn default() -> Self {
        Self {
            tables: crate::msyt::DEFAULT_NAME_TABLES
                .iter()
                .map(ToString::to_string)
                .collect(),
            skip_aliases: Vec::new(),
        }
    }
}

/// Map tile stitching and pyramid settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TilesConfig {
    /// Holds `pngtiles/` sources and the stitched full maps
    pub work_dir: PathBuf,
    /// Pyramid tiles are written under `{output_root}/map/`
    pub output_root: PathBuf,
    pub columns: u32,
    pub rows: u32,
    pub source_tile_size: u32,
    pub output_tile_size: u32,
    pub format: TileFormat,
    pub zooms: Vec<ZoomLevel>,
}

impl Default for TilesConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("txtmp"),
            output_root: Path::new("..").join("public").join("game_files"),
            columns: 12,
            rows: 10,
            source_tile_size: 3000,
            output_tile_size: 256,
            format: TileFormat::Webp,
            zooms: ZoomLevel::defaults(),
        }
    }
}

impl TilesConfig {
    /// Grid and tile sizes as a [`TileLayout`]
    pub fn layout(&self) -> TileLayout {
        TileLayout {
            columns: self.columns,
            rows: self.rows,
            source_tile_size: self.source_tile_size,
            output_tile_size: self.output_tile_size,
        }
    }
}

impl ToolConfig {
    /// Load a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading config from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Load a configuration file, or the defaults when no path is given
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Serialize to TOML text
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
