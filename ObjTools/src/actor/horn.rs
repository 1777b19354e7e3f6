//! Horn material lookup
//!
//! Horned enemies name their horn attachment in a
//! `HornTypeAndAttachmentMappingTable`, reached through the actor's
//! `GameParameterTableRef`. Both components may be declared on any ancestor.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use super::ActorPack;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::Result;
use crate::record::{ComponentLocator, read_root, reference_stem};

const GAME_PARAMETER_TABLE: &str = "GameParameterTableRef";
const HORN_MAPPING_TABLE: &str = "HornTypeAndAttachmentMappingTable";
const HORN_MAPPING_KEY: &str = "HornTypeAndAttachmentMapping";

/// Figure actors share enemy parameters but carry no horn
const FIGURE_PREFIX: &str = "FldObj_";

const NO_HORN: &str = "NoHorn";
const DEFAULT_HORN_TYPE: &str = "Default";

/// Horn data for one actor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HornEntry {
    pub ui_actor_name: String,
    pub ui_name: String,
    pub attach_name: String,
    pub horn_type: String,
}

#[derive(Debug, Default)]
pub struct HornResult {
    pub entries: BTreeMap<String, HornEntry>,
    pub diagnostics: Diagnostics,
}

impl HornResult {
    /// `actor -> attachment` in actor order
    pub fn materials(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|(actor, entry)| (actor.clone(), entry.attach_name.clone()))
            .collect()
    }
}

/// Collect horn attachments for every actor pack
///
/// Only the first mapping entry is used; actors with several horns list the
/// same attachment for each.
pub fn extract_horns(
    packs: &[ActorPack],
    locator: &ComponentLocator,
    names: &BTreeMap<String, String>,
) -> Result<HornResult> {
    let mut result = HornResult::default();

    for pack in packs {
        if pack.name.starts_with(FIGURE_PREFIX) || !pack.has_param() {
            continue;
        }
        let param = read_root(pack.param_path())?;

        let Some((table, root)) = locator.load(&param, GAME_PARAMETER_TABLE, &pack.dir)? else {
            continue;
        };
        let Some((mapping, _)) = locator.load(&table, HORN_MAPPING_TABLE, &root)? else {
            continue;
        };

        let Some(first) = mapping
            .get(HORN_MAPPING_KEY)
            .and_then(Value::as_array)
            .and_then(|entries| entries.first())
        else {
            result.diagnostics.push(
                DiagnosticKind::UnexpectedContents,
                pack.name.as_str(),
                "empty horn mapping",
            );
            continue;
        };

        let attach_name = field(first, "AttachmentName")
            .map_or(NO_HORN, reference_stem)
            .to_string();
        let horn_type = field(first, "HornType")
            .unwrap_or(DEFAULT_HORN_TYPE)
            .to_string();

        let entry = HornEntry {
            ui_actor_name: display_name(names, &pack.name),
            ui_name: display_name(names, &attach_name),
            attach_name,
            horn_type,
        };
        result.entries.insert(pack.name.clone(), entry);
    }

    tracing::info!("Found horn data for {} actors", result.entries.len());
    Ok(result)
}

fn field<'a>(entry: &'a Value, key: &str) -> Option<&'a str> {
    entry
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn display_name(names: &BTreeMap<String, String>, key: &str) -> String {
    names.get(key).cloned().unwrap_or_else(|| key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_record(root: &Path, relative: &str, node: &Value) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, json!({ "RootNode": node }).to_string()).unwrap();
    }

    fn pack(actor_root: &Path, name: &str, param: &Value) -> ActorPack {
        let dir = actor_root.join(name);
        write_record(
            &dir,
            &format!("Actor/{name}.engine__actor__ActorParam.json"),
            param,
        );
        ActorPack::new(name, dir)
    }

    #[test]
    fn test_horn_from_inherited_tables() {
        let temp = TempDir::new().unwrap();
        let actors = temp.path().join("Pack/Actor");
        let common = temp.path().join("Pack/ResidentCommon");

        write_record(
            &common,
            "Actor/Enemy_Moriblin_Base.engine__actor__ActorParam.json",
            &json!({"Components": {"GameParameterTableRef": "?GameParameter/Moriblin.game__pp__GameParameterTable.bgyml"}}),
        );
        write_record(
            &common,
            "GameParameter/Moriblin.game__pp__GameParameterTable.json",
            &json!({"Components": {"HornTypeAndAttachmentMappingTable": "?GameParameter/Horn/Moriblin.game__enemy__HornTypeAndAttachmentMappingTable.bgyml"}}),
        );
        write_record(
            &common,
            "GameParameter/Horn/Moriblin.game__enemy__HornTypeAndAttachmentMappingTable.json",
            &json!({"HornTypeAndAttachmentMapping": [
                {"AttachmentName": "Work/Actor/Item_Enemy_12.engine__actor__ActorParam.gyml", "HornType": "Horn"},
                {"AttachmentName": "Work/Actor/Item_Enemy_99.engine__actor__ActorParam.gyml"}
            ]}),
        );

        let inherit = json!({"$parent": "Work/Actor/Enemy_Moriblin_Base.engine__actor__ActorParam.gyml"});
        let packs = vec![
            pack(&actors, "Enemy_Moriblin_Junior", &inherit),
            pack(&actors, "FldObj_EnemyFigure_Moriblin", &inherit),
            pack(&actors, "Obj_NoParams", &json!({})),
        ];
        let names: BTreeMap<String, String> = [
            ("Enemy_Moriblin_Junior".to_string(), "Moblin".to_string()),
            ("Item_Enemy_12".to_string(), "Moblin Horn".to_string()),
        ]
        .into_iter()
        .collect();

        let result = extract_horns(&packs, &ComponentLocator::new(&common), &names).unwrap();

        assert_eq!(result.entries.len(), 1);
        assert_eq!(
            result.entries["Enemy_Moriblin_Junior"],
            HornEntry {
                ui_actor_name: "Moblin".into(),
                ui_name: "Moblin Horn".into(),
                attach_name: "Item_Enemy_12".into(),
                horn_type: "Horn".into(),
            }
        );
        assert_eq!(
            result.materials(),
            [("Enemy_Moriblin_Junior".to_string(), "Item_Enemy_12".to_string())]
                .into_iter()
                .collect::<BTreeMap<_, _>>()
        );
    }

    #[test]
    fn test_missing_attachment_defaults_to_no_horn() {
        let temp = TempDir::new().unwrap();
        let actors = temp.path().join("Pack/Actor");
        let common = temp.path().join("Pack/ResidentCommon");

        let dir = actors.join("Enemy_Bokoblin");
        write_record(
            &dir,
            "GameParameter/Boko.game__pp__GameParameterTable.json",
            &json!({"Components": {"HornTypeAndAttachmentMappingTable": "?GameParameter/Horn.json"}}),
        );
        write_record(
            &dir,
            "GameParameter/Horn.json",
            &json!({"HornTypeAndAttachmentMapping": [{}]}),
        );
        let packs = vec![pack(
            &actors,
            "Enemy_Bokoblin",
            &json!({"Components": {"GameParameterTableRef": "?GameParameter/Boko.game__pp__GameParameterTable.bgyml"}}),
        )];

        let result =
            extract_horns(&packs, &ComponentLocator::new(&common), &BTreeMap::new()).unwrap();
        let entry = &result.entries["Enemy_Bokoblin"];
        assert_eq!(entry.attach_name, "NoHorn");
        assert_eq!(entry.horn_type, "Default");
        assert_eq!(entry.ui_actor_name, "Enemy_Bokoblin");
    }
}
