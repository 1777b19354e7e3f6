//! Static map markers (`static.json`)
//!
//! Three sources feed the marker document:
//!
//! - location-area placements, classified by the rule cascade in [`rules`]
//! - hidden korok placements ([`korok`])
//! - the dispenser placement dump ([`dispenser`])
//!
//! Markers are grouped by category. Category order is stable: the buckets
//! named by rules come first, then coarse categories in the order they are
//! first seen, then `Dispensers`.

pub mod dispenser;
pub mod korok;
pub mod location;
pub mod rules;

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result};
use crate::output::{DOC_KEY, DocBlock};

pub use dispenser::{DispenserMarker, load_dispensers};
pub use korok::{KorokIds, KorokMarker, korok_markers};
pub use location::{LocationMarker, ShrineCaves, location_markers};

/// Fields scanned for placements
pub const FIELDS: &[&str] = &["MainField", "MinusField"];

/// Location-area file of a field, relative to the romfs root
pub fn location_area_path(field: &str) -> String {
    format!("Banc/{field}/LocationArea/{field}.locationarea.json")
}

/// Hidden-korok file of a field, relative to the romfs root
pub fn hidden_korok_path(field: &str) -> String {
    format!("Banc/{field}/HiddenKorok/{field}.hiddenkorok.json")
}

pub const DISPENSER_CATEGORY: &str = "Dispensers";
pub const KOROK_CATEGORY: &str = "Korok";

/// Render a 64-bit placement id as `0x` plus 16 lowercase hex digits
///
/// Accepts JSON numbers and decimal strings.
pub fn parse_hash(value: &Value) -> Result<String> {
    let parsed = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    parsed
        .map(|v| format!("0x{v:016x}"))
        .ok_or_else(|| Error::InvalidHash {
            value: value.to_string(),
        })
}

/// World position
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Translate {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<[f64; 3]> for Translate {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

/// One marker of any source
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Marker {
    Location(LocationMarker),
    Korok(KorokMarker),
    Dispenser(DispenserMarker),
}

impl Marker {
    /// Message id for location and dispenser markers
    pub fn message_id(&self) -> Option<&str> {
        match self {
            Self::Location(m) => Some(&m.message_id),
            Self::Dispenser(m) => Some(&m.message_id),
            Self::Korok(_) => None,
        }
    }

    pub fn icon(&self) -> Option<&str> {
        match self {
            Self::Location(m) => m.icon.as_deref(),
            Self::Dispenser(m) => Some(&m.icon),
            Self::Korok(_) => None,
        }
    }
}

/// Markers grouped by category, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MarkerSet {
    categories: IndexMap<String, Vec<Marker>>,
}

impl MarkerSet {
    /// A set with the given categories present and empty
    pub fn with_categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for category in categories {
            set.ensure(category);
        }
        set
    }

    /// Make sure `category` exists, appending it if new
    pub fn ensure(&mut self, category: impl Into<String>) -> &mut Vec<Marker> {
        self.categories.entry(category.into()).or_default()
    }

    pub fn push(&mut self, category: impl Into<String>, marker: Marker) {
        self.ensure(category).push(marker);
    }

    pub fn extend<I: IntoIterator<Item = Marker>>(&mut self, category: impl Into<String>, markers: I) {
        self.ensure(category).extend(markers);
    }

    pub fn get(&self, category: &str) -> Option<&[Marker]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Marker])> {
        self.categories
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Total marker count across categories
    pub fn len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The `static.json` document
#[derive(Debug, Clone)]
pub struct StaticMarkers {
    pub markers: MarkerSet,
    pub doc: DocBlock,
}

impl Serialize for StaticMarkers {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("markers", &self.markers)?;
        map.serialize_entry(DOC_KEY, &self.doc)?;
        map.end()
    }
}

/// Input files for [`build_static_markers`]
#[derive(Debug, Clone)]
pub struct StaticSources {
    /// Root holding the `Banc/` tree
    pub romfs: PathBuf,
    pub shrine_caves: PathBuf,
    pub korok_ids: PathBuf,
    pub dispensers: PathBuf,
}

impl StaticSources {
    /// Sources with the auxiliary tables under `tools_dir`
    pub fn new(romfs: impl Into<PathBuf>, tools_dir: &Path) -> Self {
        Self {
            romfs: romfs.into(),
            shrine_caves: tools_dir.join("shrine_caves.json"),
            korok_ids: tools_dir.join("koroks_id.json"),
            dispensers: tools_dir.join("rbox.json"),
        }
    }
}

/// Build every static marker category
///
/// Location markers of both fields come first, each field followed by its
/// koroks; dispensers and the Bargainer statue are appended last.
pub fn build_static_markers(sources: &StaticSources) -> Result<(MarkerSet, Diagnostics)> {
    let shrine_caves = ShrineCaves::load(&sources.shrine_caves)?;
    let korok_ids = KorokIds::load(&sources.korok_ids)?;

    let mut markers = MarkerSet::with_categories(rules::PRESET_CATEGORIES.iter().copied());
    let mut diagnostics = Diagnostics::new();

    for field in FIELDS {
        let area = sources.romfs.join(location_area_path(field));
        let area = read_json(&area)?;
        location_markers(&area, &shrine_caves, &mut markers, &mut diagnostics)?;

        let hidden = read_json(&sources.romfs.join(hidden_korok_path(field)))?;
        let koroks = korok_markers(&hidden, &korok_ids)?;
        markers.extend(KOROK_CATEGORY, koroks.into_iter().map(Marker::Korok));
    }

    let dispensers = load_dispensers(&sources.dispensers)?;
    markers.extend(DISPENSER_CATEGORY, dispensers.into_iter().map(Marker::Dispenser));

    let (category, statue) = location::bargainer_statue()?;
    markers.push(category, Marker::Location(statue));

    tracing::info!(
        "Classified {} markers in {} categories",
        markers.len(),
        markers.categories().count()
    );
    Ok((markers, diagnostics))
}

pub(crate) fn read_json(path: &Path) -> Result<Value> {
    tracing::debug!("Reading {}", path.display());
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
