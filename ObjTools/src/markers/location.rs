//! Location-area placements

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::rules::{self, Candidate, Outcome};
use super::{Marker, MarkerSet, Translate, parse_hash};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::{Error, Result};

const LOCATION_PREFIX: &str = "Work/Location/";
const FARTHEST: &str = "Farthest";

/// A location-area marker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationMarker {
    #[serde(rename = "MessageID")]
    pub message_id: String,
    #[serde(rename = "Priority")]
    pub priority: u32,
    #[serde(rename = "Translate")]
    pub translate: Translate,
    #[serde(rename = "SaveFlag")]
    pub save_flag: String,
    pub hash_id: String,
    #[serde(rename = "ShrineInCave", skip_serializing_if = "Option::is_none")]
    pub shrine_in_cave: Option<bool>,
    #[serde(rename = "Icon", skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(rename = "ShowLevel", skip_serializing_if = "Option::is_none")]
    pub show_level: Option<String>,
}

impl LocationMarker {
    pub fn new(message_id: impl Into<String>, translate: Translate, hash_id: String) -> Self {
        let message_id = message_id.into();
        Self {
            save_flag: format!("Location_{message_id}"),
            message_id,
            priority: 1,
            translate,
            hash_id,
            shrine_in_cave: None,
            icon: None,
            show_level: None,
        }
    }
}

/// Which shrines sit inside caves, keyed by shrine message id
#[derive(Debug, Clone, Default)]
pub struct ShrineCaves {
    maps: HashMap<String, String>,
}

#[derive(Deserialize)]
struct ShrineCaveRow {
    map_name: String,
    #[serde(rename = "Location")]
    location: String,
}

impl ShrineCaves {
    /// Load the `[{map_name, Location}]` dump of shrine location markers
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let rows: Vec<ShrineCaveRow> = serde_json::from_str(text)?;
        let maps = rows
            .into_iter()
            .map(|row| {
                let map = row.map_name.split('_').next().unwrap_or_default().to_string();
                (row.location, map)
            })
            .collect();
        Ok(Self { maps })
    }

    /// `None` when the shrine is not in the table
    pub fn in_cave(&self, shrine: &str) -> Option<bool> {
        self.maps.get(shrine).map(|map| map == "Cave")
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AreaEntry {
    #[serde(default)]
    location_name: String,
    #[serde(rename = "InstanceID", default)]
    instance_id: Vec<Value>,
    #[serde(default)]
    trans: Vec<[f64; 3]>,
    #[serde(default)]
    target_zoom_level: Option<Vec<Value>>,
}

/// Message id of a `Work/Location/{id}.game__ui__LocationInfo.gyml` reference
pub fn message_id(location_name: &str) -> &str {
    let name = location_name
        .strip_prefix(LOCATION_PREFIX)
        .unwrap_or(location_name);
    name.split('.').next().unwrap_or(name)
}

/// Classify one field's location-area placements into `markers`
///
/// `area` maps each kind to a list of entries with parallel `InstanceID`,
/// `Trans` and optional `TargetZoomLevel` arrays.
pub fn location_markers(
    area: &Value,
    shrine_caves: &ShrineCaves,
    markers: &mut MarkerSet,
    diagnostics: &mut Diagnostics,
) -> Result<()> {
    let kinds = area.as_object().ok_or_else(|| Error::InvalidPlacement {
        kind: "LocationArea".to_string(),
        message: "expected an object of kinds".to_string(),
    })?;

    for (kind, values) in kinds {
        if kind == rules::DUNGEON_KIND {
            continue;
        }
        let entries: Vec<AreaEntry> =
            serde_json::from_value(values.clone()).map_err(|e| Error::InvalidPlacement {
                kind: kind.clone(),
                message: e.to_string(),
            })?;
        if entries.is_empty() {
            continue;
        }

        let coarse = rules::coarse_category(kind);
        if !rules::TYPES.iter().any(|(known, _)| *known == kind.as_str()) {
            tracing::debug!("{kind} has no coarse category, using it as is");
        }

        // Claimed markers land as they are seen; unclaimed ones follow per kind
        let mut unclaimed = Vec::new();
        for entry in &entries {
            for (claimed, marker) in entry_markers(kind, coarse, entry, shrine_caves, diagnostics)? {
                match claimed {
                    Some(category) => markers.push(category, Marker::Location(marker)),
                    None => unclaimed.push(Marker::Location(marker)),
                }
            }
        }
        markers.extend(coarse, unclaimed);
    }
    Ok(())
}

fn entry_markers(
    kind: &str,
    coarse: &str,
    entry: &AreaEntry,
    shrine_caves: &ShrineCaves,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<(Option<String>, LocationMarker)>> {
    let message = message_id(&entry.location_name);
    if message.is_empty() {
        return Ok(Vec::new());
    }
    if entry.trans.len() < entry.instance_id.len() {
        return Err(Error::InvalidPlacement {
            kind: kind.to_string(),
            message: format!(
                "{message}: {} instances but {} positions",
                entry.instance_id.len(),
                entry.trans.len()
            ),
        });
    }

    let mut out = Vec::new();
    for (index, instance) in entry.instance_id.iter().enumerate() {
        if rules::is_skipped_instance(message, index) {
            continue;
        }

        let mut marker = LocationMarker::new(message, entry.trans[index].into(), parse_hash(instance)?);
        if kind == "Shrine" {
            marker.shrine_in_cave = Some(shrine_caves.in_cave(message).unwrap_or_else(|| {
                diagnostics.push(
                    DiagnosticKind::UnrecognizedCategory,
                    message,
                    "shrine missing from shrine cave table",
                );
                false
            }));
        }
        marker.icon = rules::icon_for(kind).map(str::to_string);
        if kind.starts_with("Spot") {
            marker.show_level = entry
                .target_zoom_level
                .as_ref()
                .and_then(|levels| levels.get(index))
                .map(show_level_text);
        }
        if kind == "District" {
            marker.show_level = Some(FARTHEST.to_string());
        }

        let candidate = Candidate {
            message,
            coarse,
            show_level: marker.show_level.as_deref(),
        };
        match rules::classify(&candidate) {
            Outcome::Drop => {}
            Outcome::Place { category, icon, rename } => {
                if let Some(icon) = icon {
                    marker.icon = Some(icon.to_string());
                }
                if let Some(rename) = rename {
                    marker.message_id = rename.to_string();
                }
                out.push((Some(category), marker));
            }
            Outcome::Unclaimed => out.push((None, marker)),
        }
    }
    Ok(out)
}

fn show_level_text(value: &Value) -> String {
    value
        .as_str()
        .map_or_else(|| value.to_string(), str::to_string)
}

/// The depths Bargainer statue, which has no location-area entry
pub fn bargainer_statue() -> Result<(&'static str, LocationMarker)> {
    let mut marker = LocationMarker::new(
        "DemonStatue_01",
        Translate {
            x: -251.0,
            y: 125.0,
            z: -154.39,
        },
        parse_hash(&Value::String("13371596173322305161".to_string()))?,
    );
    marker.icon = Some("Bargainer".to_string());
    Ok(("Place", marker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn shrines() -> ShrineCaves {
        ShrineCaves::from_json(
            r#"[
                {"map_name": "Cave_Lanayru_0001", "Location": "Dungeon051"},
                {"map_name": "MainField_Dungeon001", "Location": "Dungeon001"}
            ]"#,
        )
        .unwrap()
    }

    fn location(marker: &Marker) -> &LocationMarker {
        match marker {
            Marker::Location(m) => m,
            other => panic!("not a location marker: {other:?}"),
        }
    }

    #[test]
    fn test_message_id() {
        assert_eq!(
            message_id("Work/Location/Kakariko.game__ui__LocationInfo.gyml"),
            "Kakariko"
        );
        assert_eq!(message_id(""), "");
    }

    #[test]
    fn test_battery_shop_placement_lands_in_shop() {
        let area = json!({
            "ShopArmor": [{
                "LocationName": "Work/Location/BatteryExchangeShop_01.game__ui__LocationInfo.gyml",
                "InstanceID": [42],
                "Trans": [[1.0, 2.0, 3.0]]
            }]
        });
        let mut markers = MarkerSet::with_categories(rules::PRESET_CATEGORIES.iter().copied());
        let mut diagnostics = Diagnostics::new();
        location_markers(&area, &shrines(), &mut markers, &mut diagnostics).unwrap();

        let shop = markers.get("Shop").unwrap();
        assert_eq!(shop.len(), 1);
        let marker = location(&shop[0]);
        assert_eq!(marker.icon.as_deref(), Some("Battery"));
        assert_eq!(marker.hash_id, "0x000000000000002a");
        assert_eq!(marker.save_flag, "Location_BatteryExchangeShop_01");
    }

    #[test]
    fn test_location_area_fields() {
        let area = json!({
            "Dungeon": [{
                "LocationName": "Work/Location/Dungeon001.game__ui__LocationInfo.gyml",
                "InstanceID": [1],
                "Trans": [[0.0, 0.0, 0.0]]
            }],
            "Shrine": [
                {
                    "LocationName": "Work/Location/Dungeon051.game__ui__LocationInfo.gyml",
                    "InstanceID": ["7"],
                    "Trans": [[5.0, 6.0, 7.0]]
                },
                {
                    "LocationName": "Work/Location/Dungeon999.game__ui__LocationInfo.gyml",
                    "InstanceID": [8],
                    "Trans": [[0.0, 0.0, 0.0]]
                }
            ],
            "SpotSmallWater": [{
                "LocationName": "Work/Location/Lake.game__ui__LocationInfo.gyml",
                "InstanceID": [2, 3],
                "Trans": [[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]],
                "TargetZoomLevel": ["Near", "Middle"]
            }],
            "District": [{
                "LocationName": "Work/Location/Hyrule.game__ui__LocationInfo.gyml",
                "InstanceID": [4],
                "Trans": [[0.0, 0.0, 0.0]]
            }],
            "City": [{
                "LocationName": "Work/Location/Gerudo.game__ui__LocationInfo.gyml",
                "InstanceID": [10, 11, 12],
                "Trans": [[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [2.0, 2.0, 2.0]]
            }],
            "Empty": [],
            "Unnamed": [{"LocationName": "", "InstanceID": [5], "Trans": [[0.0, 0.0, 0.0]]}]
        });

        let mut markers = MarkerSet::with_categories(rules::PRESET_CATEGORIES.iter().copied());
        let mut diagnostics = Diagnostics::new();
        location_markers(&area, &shrines(), &mut markers, &mut diagnostics).unwrap();

        let categories: Vec<_> = markers.categories().collect();
        assert_eq!(
            categories,
            vec!["Labo", "Chasm", "Korok", "Place", "Cave", "Shop", "Dungeon", "Location", "Unnamed"]
        );

        let dungeons = markers.get("Dungeon").unwrap();
        assert_eq!(location(&dungeons[0]).shrine_in_cave, Some(true));
        assert_eq!(location(&dungeons[0]).icon.as_deref(), Some("Dungeon"));
        assert_eq!(location(&dungeons[1]).shrine_in_cave, Some(false));
        assert!(diagnostics.contains(DiagnosticKind::UnrecognizedCategory, "Dungeon999"));

        let spots = markers.get("Location").unwrap();
        let levels: Vec<_> = spots
            .iter()
            .map(|m| location(m).show_level.as_deref())
            .collect();
        assert_eq!(levels, vec![Some("Near"), Some("Middle"), Some("Farthest")]);

        // Gerudo instances 0 and 1 are duplicates
        let places = markers.get("Place").unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(location(&places[0]).hash_id, "0x000000000000000c");
        assert_eq!(location(&places[0]).icon.as_deref(), Some("Village"));

        assert!(markers.get("Unnamed").unwrap().is_empty());
    }

    #[test]
    fn test_claimed_markers_precede_unclaimed_in_shared_bucket() {
        let area = json!({
            "CaveEntranceWell": [
                {
                    "LocationName": "Work/Location/Cave_Hebra_0001.game__ui__LocationInfo.gyml",
                    "InstanceID": [1],
                    "Trans": [[0.0, 0.0, 0.0]]
                },
                {
                    "LocationName": "Work/Location/Well_0001.game__ui__LocationInfo.gyml",
                    "InstanceID": [2],
                    "Trans": [[0.0, 0.0, 0.0]]
                },
                {
                    "LocationName": "Work/Location/Cave_Hebra_0002.game__ui__LocationInfo.gyml",
                    "InstanceID": [3],
                    "Trans": [[0.0, 0.0, 0.0]]
                }
            ]
        });
        let mut markers = MarkerSet::with_categories(rules::PRESET_CATEGORIES.iter().copied());
        location_markers(&area, &shrines(), &mut markers, &mut Diagnostics::new()).unwrap();

        let caves: Vec<_> = markers
            .get("Cave")
            .unwrap()
            .iter()
            .map(|m| (location(m).message_id.as_str(), location(m).icon.as_deref()))
            .collect();
        assert_eq!(
            caves,
            vec![
                ("Well_0001", Some("Well")),
                ("Cave_Hebra_0001", Some("Cave")),
                ("Cave_Hebra_0002", Some("Cave")),
            ]
        );
    }

    #[test]
    fn test_marker_serialization_order() {
        let mut marker = LocationMarker::new(
            "Kakariko",
            Translate { x: 1.0, y: 2.0, z: 3.5 },
            "0x0000000000000001".to_string(),
        );
        marker.icon = Some("Village".to_string());
        let text = serde_json::to_string(&marker).unwrap();
        assert_eq!(
            text,
            r#"{"MessageID":"Kakariko","Priority":1,"Translate":{"X":1.0,"Y":2.0,"Z":3.5},"SaveFlag":"Location_Kakariko","hash_id":"0x0000000000000001","Icon":"Village"}"#
        );
    }

    #[test]
    fn test_bargainer_statue() {
        let (category, marker) = bargainer_statue().unwrap();
        assert_eq!(category, "Place");
        assert_eq!(marker.hash_id, "0xb99173dfb6d93e89");
        assert_eq!(marker.save_flag, "Location_DemonStatue_01");
    }

    #[test]
    fn test_mismatched_positions_are_rejected() {
        let area = json!({
            "City": [{
                "LocationName": "Work/Location/Kakariko.game__ui__LocationInfo.gyml",
                "InstanceID": [1, 2],
                "Trans": [[0.0, 0.0, 0.0]]
            }]
        });
        let err = location_markers(
            &area,
            &ShrineCaves::default(),
            &mut MarkerSet::default(),
            &mut Diagnostics::new(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidPlacement { .. }));
    }
}
