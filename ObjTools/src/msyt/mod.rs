//! msyt text tables
//!
//! Localized message tables are exported from MSBT to msyt, a YAML layout of
//! `entries: {key: {contents: [blocks]}}`. A block either carries literal
//! `text` or a control code; only the text is of interest here.
//!
//! # Overview
//!
//! - [`MsytFile`] - a parsed table, entries kept in file order
//! - [`classify_key`] - decides whether a key is a name, an alias, or neither
//! - [`NameTableBuilder`] - folds several tables, extra names and manual
//!   overrides into one sorted name map
//! - [`parse_overrides`] - the `missing.csv` override format
//! - [`dungeon_texts`] / [`location_texts`] - LocationMsg text maps

pub mod classify;
pub mod location;
pub mod names;
pub mod overrides;

pub use classify::{KeyClass, classify_key};
pub use location::{dungeon_texts, location_texts};
pub use names::{DEFAULT_NAME_TABLES, NameTableBuilder, read_name_map};
pub use overrides::{OverrideRow, OverrideValue, load_overrides, parse_overrides};

use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

use crate::error::Result;

/// A parsed msyt file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MsytFile {
    #[serde(default)]
    pub entries: IndexMap<String, MsytEntry>,
}

/// One message entry
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MsytEntry {
    #[serde(default)]
    pub contents: Vec<ContentBlock>,
}

/// A content block; control blocks have no text
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentBlock {
    #[serde(default)]
    pub text: Option<String>,
}

impl MsytFile {
    /// Load an msyt file from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Reading msyt {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse msyt YAML text
    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn get(&self, key: &str) -> Option<&MsytEntry> {
        self.entries.get(key)
    }
}

impl MsytEntry {
    /// Text of the first block
    pub fn first_text(&self) -> Option<&str> {
        self.contents.first().and_then(|b| b.text.as_deref())
    }

    /// Display text of a name entry
    ///
    /// Some entries open with a control block, so the second block's text
    /// is used when the first has none.
    pub fn display_text(&self) -> Option<&str> {
        self.first_text()
            .or_else(|| self.contents.get(1).and_then(|b| b.text.as_deref()))
    }

    /// All block texts joined with `separator`
    pub fn joined_text(&self, separator: &str) -> String {
        self.contents
            .iter()
            .filter_map(|b| b.text.as_deref())
            .collect::<Vec<_>>()
            .join(separator)
    }
}
