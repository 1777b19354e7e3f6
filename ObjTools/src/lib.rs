//! # ObjTools
//!
//! Extraction tools that turn decompiled Tears of the Kingdom game data into
//! the flat JSON documents and map tiles consumed by the object map viewer.
//!
//! ## Pipelines
//!
//! - **Records** - `$parent` prototype resolution and component lookup over
//!   JSON-converted actor parameter trees
//! - **Actors** - common-name fallbacks and horn attachment materials
//! - **Text tables** - msyt name tables, manual CSV overrides, dungeon and
//!   location text
//! - **Markers** - location-area placements classified into marker categories
//! - **Tiles** - stitched full-resolution maps sliced into a zoom pyramid
//!
//! ## Quick Start
//!
//! ### Resolving a record
//!
//! ```no_run
//! use objtools::record::RecordLoader;
//!
//! let loader = RecordLoader::new("Pack/Actor/Enemy_Bokoblin", "Pack/ResidentCommon");
//! let param = loader.load("Work/Actor/Enemy_Bokoblin.engine__actor__ActorParam.gyml")?;
//! println!("{} fields", param.len());
//! # Ok::<(), objtools::Error>(())
//! ```
//!
//! ### Building the name table
//!
//! ```no_run
//! use objtools::msyt::{MsytFile, NameTableBuilder};
//!
//! let mut builder = NameTableBuilder::new();
//! builder.add_table(&MsytFile::load("USen.Product.100/ActorMsg/NPC.msyt")?);
//! let (names, diagnostics) = builder.finish();
//! println!("{} names, {} skipped", names.len(), diagnostics.len());
//! # Ok::<(), objtools::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `objtools` command-line binary

pub mod error;
pub mod config;
pub mod diagnostics;
pub mod output;
pub mod record;
pub mod actor;
pub mod msyt;
pub mod markers;
pub mod tiles;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::config::ToolConfig;
    pub use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
    pub use crate::output::{DocBlock, JsonStyle, write_json};

    pub use crate::record::{ComponentLocator, Located, Record, RecordLoader, merge, merged};
    pub use crate::actor::{ActorPack, find_actor_packs};
    pub use crate::msyt::{
        KeyClass, MsytFile, NameTableBuilder, OverrideRow, classify_key, parse_overrides,
    };
    pub use crate::markers::{MarkerSet, StaticMarkers};
    pub use crate::tiles::{Area, TileLayout, ZoomLevel};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
