//! Device dispenser markers
//!
//! Read from a dump of dispenser placements:
//! `[{unit_config_name, hash_id, data: {Translate}, equip, ui_equip, map_name, map_static}]`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Translate, parse_hash};
use crate::error::Result;

pub const DISPENSER_ICON: &str = "Dispenser";
pub const DISPENSER_NAME: &str = "Device Dispenser";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispenserMarker {
    #[serde(rename = "MessageID")]
    pub message_id: String,
    pub id: String,
    #[serde(rename = "Icon")]
    pub icon: String,
    #[serde(rename = "Priority")]
    pub priority: u32,
    pub name: String,
    #[serde(rename = "Translate")]
    pub translate: Translate,
    pub hash_id: String,
    #[serde(rename = "SaveFlag")]
    pub save_flag: String,
    pub equip: Value,
    pub ui_equip: Value,
    pub map_name: Value,
    pub map_static: Value,
    pub map_type: String,
}

#[derive(Debug, Deserialize)]
struct DispenserRow {
    unit_config_name: String,
    hash_id: Value,
    data: DispenserData,
    #[serde(default)]
    equip: Value,
    #[serde(default)]
    ui_equip: Value,
    #[serde(default)]
    map_name: Value,
    #[serde(default)]
    map_static: Value,
}

#[derive(Debug, Deserialize)]
struct DispenserData {
    #[serde(rename = "Translate")]
    translate: [f64; 3],
}

impl DispenserRow {
    fn into_marker(self) -> Result<DispenserMarker> {
        let hash_id = parse_hash(&self.hash_id)?;
        Ok(DispenserMarker {
            save_flag: format!("Location_{}", self.unit_config_name),
            message_id: self.unit_config_name,
            id: hash_id.clone(),
            icon: DISPENSER_ICON.to_string(),
            priority: 1,
            name: DISPENSER_NAME.to_string(),
            translate: self.data.translate.into(),
            hash_id,
            equip: self.equip,
            ui_equip: self.ui_equip,
            map_name: self.map_name,
            map_static: self.map_static,
            map_type: "Totk".to_string(),
        })
    }
}

/// Parse a dispenser dump
pub fn parse_dispensers(text: &str) -> Result<Vec<DispenserMarker>> {
    let rows: Vec<DispenserRow> = serde_json::from_str(text)?;
    rows.into_iter().map(DispenserRow::into_marker).collect()
}

pub fn load_dispensers(path: &Path) -> Result<Vec<DispenserMarker>> {
    let text = std::fs::read_to_string(path)?;
    let markers = parse_dispensers(&text)?;
    tracing::info!("Read {} dispensers from {}", markers.len(), path.display());
    Ok(markers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_dispensers() {
        let text = r#"[{
            "unit_config_name": "DeviceDispenser",
            "hash_id": "255",
            "data": {"Translate": [1.0, 2.0, 3.0]},
            "equip": ["SpringBoard"],
            "ui_equip": ["Spring"],
            "map_name": "Sky",
            "map_static": 1
        }]"#;

        let markers = parse_dispensers(text).unwrap();
        assert_eq!(markers.len(), 1);
        let marker = &markers[0];
        assert_eq!(marker.message_id, "DeviceDispenser");
        assert_eq!(marker.save_flag, "Location_DeviceDispenser");
        assert_eq!(marker.id, "0x00000000000000ff");
        assert_eq!(marker.hash_id, marker.id);
        assert_eq!(marker.equip, json!(["SpringBoard"]));
        assert_eq!(marker.map_name, json!("Sky"));
        assert_eq!(marker.icon, DISPENSER_ICON);
    }

    #[test]
    fn test_invalid_hash_is_fatal() {
        let text = r#"[{"unit_config_name": "D", "hash_id": "abc", "data": {"Translate": [0, 0, 0]}}]"#;
        assert!(parse_dispensers(text).is_err());
    }
}
