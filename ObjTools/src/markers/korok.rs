//! Hidden korok markers

use std::collections::HashMap;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Translate, parse_hash};
use crate::error::{Error, Result};

/// Koroks at or above this height are on sky islands
pub const SKY_HEIGHT: f64 = 750.0;

/// Koroks below the sky height that are still on sky islands
pub const SKY_EXCEPTIONS: &[&str] = &[
    "6577590198901788531",
    "2587961335290322890",
    "3494902862536172994",
];

/// Koroks above the sky height that are on the surface
pub const SURFACE_EXCEPTIONS: &[&str] = &["15262678164833260129", "18194949317466592174"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KorokMarker {
    /// Display id; the hash unless the id table names it
    pub id: Value,
    #[serde(rename = "Translate")]
    pub translate: Translate,
    pub hash_id: String,
    pub name: Value,
    pub map_static: u32,
    pub map_name: String,
    pub map_type: String,
}

/// Display ids for known koroks, keyed by formatted hash
#[derive(Debug, Clone, Default)]
pub struct KorokIds {
    ids: HashMap<String, Value>,
}

#[derive(Deserialize)]
struct KorokIdRow {
    id: Value,
}

impl KorokIds {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse `{"0x...": {"id": ...}}`
    pub fn from_json(text: &str) -> Result<Self> {
        let rows: HashMap<String, KorokIdRow> = serde_json::from_str(text)?;
        Ok(Self {
            ids: rows.into_iter().map(|(hash, row)| (hash, row.id)).collect(),
        })
    }

    pub fn get(&self, hash_id: &str) -> Option<&Value> {
        self.ids.get(hash_id)
    }
}

/// Map name for a korok at height `y`
pub fn korok_map(key: &str, y: f64) -> &'static str {
    if SURFACE_EXCEPTIONS.contains(&key) {
        "Surface"
    } else if y >= SKY_HEIGHT || SKY_EXCEPTIONS.contains(&key) {
        "Sky"
    } else {
        "Surface"
    }
}

/// Markers for one field's hidden korok file
///
/// The file maps each korok kind to `{hash: [x, y, z]}`.
pub fn korok_markers(hidden: &Value, ids: &KorokIds) -> Result<Vec<KorokMarker>> {
    let kinds: IndexMap<String, IndexMap<String, [f64; 3]>> =
        serde_json::from_value(hidden.clone()).map_err(|e| Error::InvalidPlacement {
            kind: "HiddenKorok".to_string(),
            message: e.to_string(),
        })?;

    let mut markers = Vec::new();
    for placements in kinds.values() {
        for (key, position) in placements {
            let hash_id = parse_hash(&Value::String(key.clone()))?;
            let id = ids
                .get(&hash_id)
                .cloned()
                .unwrap_or_else(|| Value::String(hash_id.clone()));
            markers.push(KorokMarker {
                name: id.clone(),
                id,
                translate: (*position).into(),
                hash_id,
                map_static: 1,
                map_name: korok_map(key, position[1]).to_string(),
                map_type: "Totk".to_string(),
            });
        }
    }

    tracing::debug!("Found {} koroks", markers.len());
    Ok(markers)
}
