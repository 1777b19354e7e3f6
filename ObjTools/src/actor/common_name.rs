//! Common-name fallbacks for unnamed actors (`names_extra.json`)
//!
//! Many actors have no entry in the ActorMsg tables. They still get a UI
//! name in-game through one of two routes, tried in order:
//!
//! 1. `Components/ActorNameRef` points at another actor whose name is known
//! 2. `Components/AttachmentRef` carries a `CommonName` looked up as
//!    `{CommonName}_Name` in `StaticMsg/AttachmentCommonName.msyt`

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;

use super::ActorPack;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::Result;
use crate::msyt::MsytFile;
use crate::record::{Record, RecordLoader, component_reference, get_path, reference_stem};

/// Text given to attachments that only inherit the default common name
const DEFAULT_COMMON_NAME: &str = "Iron Ball";

/// Names found for actors that had none
#[derive(Debug, Default)]
pub struct CommonNameResult {
    /// Sorted `actor -> name`
    pub names: BTreeMap<String, String>,
    pub diagnostics: Diagnostics,
}

/// Resolve fallback names for every pack not already in `known`
///
/// `rescom` is the shared root used when a reference is not inside the pack.
pub fn extract_common_names(
    packs: &[ActorPack],
    rescom: &Path,
    common_names: &MsytFile,
    known: &BTreeMap<String, String>,
    max_depth: usize,
) -> Result<CommonNameResult> {
    let mut result = CommonNameResult::default();

    for pack in packs {
        if !pack.has_param() {
            continue;
        }
        if known.contains_key(&pack.name) {
            continue;
        }

        let loader = RecordLoader::new(&pack.dir, rescom).with_max_depth(max_depth);
        let param = loader.load_path(pack.param_path())?;

        match resolve_name(&pack.name, &param, &loader, common_names, known)? {
            Resolution::Named(name) => {
                result.names.insert(pack.name.clone(), name);
            }
            Resolution::Rejected => {
                tracing::debug!("{} only has the default common name", pack.name);
            }
            Resolution::Missing(detail) => {
                result
                    .diagnostics
                    .push(DiagnosticKind::UnresolvedName, pack.name.as_str(), detail);
            }
        }
    }

    tracing::info!("Resolved {} common names", result.names.len());
    Ok(result)
}

enum Resolution {
    Named(String),
    Rejected,
    Missing(String),
}

fn resolve_name(
    actor: &str,
    param: &Record,
    loader: &RecordLoader,
    common_names: &MsytFile,
    known: &BTreeMap<String, String>,
) -> Result<Resolution> {
    let name_ref = get_path(param, "Components/ActorNameRef")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty());

    if let Some(name_ref) = name_ref {
        let target = reference_stem(name_ref);
        return Ok(match known.get(target) {
            Some(name) => Resolution::Named(name.clone()),
            None => Resolution::Missing(format!("ActorNameRef {target} has no name")),
        });
    }

    let common_name = match component_reference(param, "AttachmentRef") {
        Some(reference) if !reference.is_empty() => {
            let attachment = loader.load(reference)?;
            attachment
                .get("CommonName")
                .and_then(Value::as_str)
                .map(ToString::to_string)
        }
        _ => None,
    };
    let Some(common_name) = common_name else {
        return Ok(Resolution::Missing("no ActorNameRef or CommonName".to_string()));
    };

    let Some(entry) = common_names.get(&format!("{common_name}_Name")) else {
        return Ok(Resolution::Missing(format!("no text for {common_name}_Name")));
    };
    let text = entry.joined_text(" ");
    if text == DEFAULT_COMMON_NAME && !actor.contains("IronBall") {
        return Ok(Resolution::Rejected);
    }
    Ok(Resolution::Named(text))
}
