//! Actor name table
//!
//! Builds the `names.json` map from the ActorMsg tables. Sources apply in
//! this order, each one only where the previous left room:
//!
//! 1. name and alias entries of every table, in table order
//! 2. extra names (common-name fallbacks) for keys still missing
//! 3. manual overrides for keys still missing, plus `$` redirects

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde_json::Value;

use super::classify::{KeyClass, classify_key};
use super::overrides::{OverrideRow, OverrideValue};
use super::MsytFile;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::{Error, Result};

/// ActorMsg tables merged into `names.json`, in merge order
pub const DEFAULT_NAME_TABLES: &[&str] = &[
    "USen.Product.100/ActorMsg/PictureBook.msyt",
    "USen.Product.100/ActorMsg/NPC.msyt",
    "USen.Product.100/ActorMsg/CharaDirectory.msyt",
    "USen.Product.100/ActorMsg/PouchContent.msyt",
];

/// Folds text tables, extra names and overrides into one name map
#[derive(Debug, Default)]
pub struct NameTableBuilder {
    names: BTreeMap<String, String>,
    skip_aliases: HashSet<String>,
    diagnostics: Diagnostics,
}

impl NameTableBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys whose first value is kept when a later table disagrees
    #[must_use]
    pub fn with_skip_aliases<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_aliases.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Merge one text table
    ///
    /// On a conflicting value the later table wins, except for aliases and
    /// skip-listed keys, which keep the value seen first.
    pub fn add_table(&mut self, table: &MsytFile) -> &mut Self {
        for (raw_key, entry) in &table.entries {
            let class = classify_key(raw_key);
            let (key, is_alias) = match &class {
                KeyClass::Name(key) => (key, false),
                KeyClass::Alias(key) => (key, true),
                KeyClass::Excluded => continue,
                KeyClass::Unclassified => {
                    self.diagnostics.push(
                        DiagnosticKind::UnclassifiedKey,
                        raw_key.as_str(),
                        entry.display_text().unwrap_or_default(),
                    );
                    continue;
                }
            };

            let Some(text) = entry.display_text() else {
                self.diagnostics
                    .push(DiagnosticKind::MissingText, raw_key.as_str(), "");
                continue;
            };

            match self.names.get_mut(key) {
                Some(existing) if existing.as_str() != text => {
                    if is_alias || self.skip_aliases.contains(key) {
                        self.diagnostics.push(
                            DiagnosticKind::DuplicateKey,
                            key.as_str(),
                            format!("kept '{existing}' over '{text}'"),
                        );
                    } else {
                        self.diagnostics.push(
                            DiagnosticKind::DuplicateKey,
                            key.as_str(),
                            format!("replaced '{existing}' with '{text}'"),
                        );
                        *existing = text.to_string();
                    }
                }
                Some(_) => {}
                None => {
                    self.names.insert(key.clone(), text.to_string());
                }
            }
        }
        self
    }

    /// Add names only for keys not already present
    pub fn add_extras<'a, I>(&mut self, extras: I) -> &mut Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        for (key, value) in extras {
            self.names
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
        self
    }

    /// Apply manual overrides in file order
    ///
    /// A redirect copies the resolved name of its target and fails if the
    /// target has none. A literal value never replaces an existing name.
    pub fn apply_overrides(&mut self, rows: &[OverrideRow]) -> Result<&mut Self> {
        for row in rows {
            match &row.value {
                OverrideValue::Empty => {}
                OverrideValue::Redirect(target) => {
                    let value = self.names.get(target).cloned().ok_or_else(|| {
                        Error::OverrideConflict {
                            key: row.key.clone(),
                            target: target.clone(),
                        }
                    })?;
                    self.names.insert(row.key.clone(), value);
                }
                OverrideValue::Text(value) => {
                    if let Some(existing) = self.names.get(&row.key) {
                        self.diagnostics.push(
                            DiagnosticKind::OverrideSkipped,
                            row.key.as_str(),
                            format!("line {}: already '{existing}'", row.line),
                        );
                    } else {
                        self.names.insert(row.key.clone(), value.clone());
                    }
                }
            }
        }
        Ok(self)
    }

    /// Names resolved so far
    pub fn names(&self) -> &BTreeMap<String, String> {
        &self.names
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Finish and return the sorted name map
    pub fn finish(self) -> (BTreeMap<String, String>, Diagnostics) {
        tracing::info!(
            "Built name table: {} names, {} skipped",
            self.names.len(),
            self.diagnostics.len()
        );
        (self.names, self.diagnostics)
    }
}

/// Read a `key -> name` JSON document, ignoring non-string values such as `_doc_`
pub fn read_name_map<P: AsRef<Path>>(path: P) -> Result<BTreeMap<String, String>> {
    let text = std::fs::read_to_string(path.as_ref())?;
    let raw: BTreeMap<String, Value> = serde_json::from_str(&text)?;
    Ok(raw
        .into_iter()
        .filter_map(|(k, v)| match v {
            Value::String(s) => Some((k, s)),
            _ => None,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msyt::parse_overrides;
    use pretty_assertions::assert_eq;

    fn table(yaml: &str) -> MsytFile {
        MsytFile::parse(yaml).unwrap()
    }

    #[test]
    fn test_later_table_wins_for_names() {
        let first = table("entries:\n  Npc_A_Name:\n    contents:\n      - text: Old\n");
        let second = table("entries:\n  Npc_A_Name:\n    contents:\n      - text: New\n");

        let mut builder = NameTableBuilder::new();
        builder.add_table(&first).add_table(&second);
        let (names, diagnostics) = builder.finish();

        assert_eq!(names["Npc_A"], "New");
        assert!(diagnostics.contains(DiagnosticKind::DuplicateKey, "Npc_A"));
    }

    #[test]
    fn test_skip_listed_key_keeps_first_value() {
        let first = table("entries:\n  Npc_A_Name:\n    contents:\n      - text: Old\n");
        let second = table("entries:\n  Npc_A_Name:\n    contents:\n      - text: New\n");

        let mut builder = NameTableBuilder::new().with_skip_aliases(["Npc_A"]);
        builder.add_table(&first).add_table(&second);
        assert_eq!(builder.names()["Npc_A"], "Old");
    }

    #[test]
    fn test_alias_never_replaces_name() {
        let names = table(
            "entries:\n  Npc_A_Name:\n    contents:\n      - text: Name\n  Npc_A_Alias:\n    contents:\n      - text: Alias\n  Npc_B_Alias:\n    contents:\n      - text: Only Alias\n",
        );
        let mut builder = NameTableBuilder::new();
        builder.add_table(&names);
        assert_eq!(builder.names()["Npc_A"], "Name");
        assert_eq!(builder.names()["Npc_B"], "Only Alias");
    }

    #[test]
    fn test_unclassified_and_missing_text_are_reported() {
        let names = table(
            "entries:\n  Npc_A_Desc:\n    contents:\n      - text: Hi\n  Npc_B_Name:\n    contents:\n      - control: {}\n  Npc_C_Caption:\n    contents:\n      - text: Skip\n",
        );
        let mut builder = NameTableBuilder::new();
        builder.add_table(&names);
        let (names, diagnostics) = builder.finish();
        assert!(names.is_empty());
        assert!(diagnostics.contains(DiagnosticKind::UnclassifiedKey, "Npc_A_Desc"));
        assert!(diagnostics.contains(DiagnosticKind::MissingText, "Npc_B_Name"));
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn test_extras_fill_only_missing_keys() {
        let names = table("entries:\n  Npc_A_Name:\n    contents:\n      - text: Table\n");
        let extras: BTreeMap<String, String> = [
            ("Npc_A".to_string(), "Extra".to_string()),
            ("Npc_Z".to_string(), "Zed".to_string()),
        ]
        .into_iter()
        .collect();

        let mut builder = NameTableBuilder::new();
        builder.add_table(&names).add_extras(&extras);
        assert_eq!(builder.names()["Npc_A"], "Table");
        assert_eq!(builder.names()["Npc_Z"], "Zed");
    }

    #[test]
    fn test_overrides_redirect_and_skip_existing() {
        let names = table("entries:\n  Npc_A_Name:\n    contents:\n      - text: Alice\n");
        let rows = parse_overrides("Npc_B,$Npc_A\nNpc_A,Not Alice\nNpc_C,Carol\nNpc_D,\n").unwrap();

        let mut builder = NameTableBuilder::new();
        builder.add_table(&names).apply_overrides(&rows).unwrap();
        let (names, diagnostics) = builder.finish();

        assert_eq!(names["Npc_A"], "Alice");
        assert_eq!(names["Npc_B"], "Alice");
        assert_eq!(names["Npc_C"], "Carol");
        assert!(!names.contains_key("Npc_D"));
        assert!(diagnostics.contains(DiagnosticKind::OverrideSkipped, "Npc_A"));
    }

    #[test]
    fn test_redirect_to_unresolved_key_fails() {
        let rows = parse_overrides("Npc_B,$Npc_Missing\n").unwrap();
        let mut builder = NameTableBuilder::new();
        let err = builder.apply_overrides(&rows).unwrap_err();
        assert!(matches!(
            err,
            Error::OverrideConflict { ref key, ref target } if key == "Npc_B" && target == "Npc_Missing"
        ));
    }

    #[test]
    fn test_output_is_sorted() {
        let names = table(
            "entries:\n  Z_Name:\n    contents:\n      - text: z\n  A_Name:\n    contents:\n      - text: a\n",
        );
        let mut builder = NameTableBuilder::new();
        builder.add_table(&names);
        let keys: Vec<_> = builder.names().keys().cloned().collect();
        assert_eq!(keys, vec!["A", "Z"]);
    }

    #[test]
    fn test_read_name_map_ignores_doc_block() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("names.json");
        std::fs::write(&path, r#"{"Npc_A": "Alice", "_doc_": {"path": "x"}}"#).unwrap();
        let names = read_name_map(&path).unwrap();
        assert_eq!(names.len(), 1);
        assert_eq!(names["Npc_A"], "Alice");
    }
}
