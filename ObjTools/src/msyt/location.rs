//! LocationMsg text maps (`Dungeon.json`, `LocationMarker.json`)

use indexmap::IndexMap;

use super::MsytFile;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Dungeon table, relative to the message root
pub const DUNGEON_TABLE: &str = "USen.Product.100/LocationMsg/Dungeon.msyt";
/// Location table, relative to the message root
pub const LOCATION_TABLE: &str = "USen.Product.100/LocationMsg/Location.msyt";

const SHRINE_SUFFIX: &str = " Shrine";

/// Shrine names and subtitles
///
/// `0NNN` keys hold shrine names and produce `DungeonNNN` plus
/// `DungeonNNN_master` (the name without " Shrine"); `2NNN` keys hold
/// subtitles and produce `DungeonNNN_sub`. `Ref_` keys are skipped.
pub fn dungeon_texts(table: &MsytFile) -> (IndexMap<String, String>, Diagnostics) {
    let mut out = IndexMap::new();
    let mut diagnostics = Diagnostics::new();

    for (key, entry) in &table.entries {
        if key.starts_with("Ref_") {
            continue;
        }
        let (prefix, id) = match key.split_at_checked(1) {
            Some((prefix @ ("0" | "2"), id)) => (prefix, id),
            _ => continue,
        };
        let Some(text) = entry.first_text() else {
            diagnostics.push(DiagnosticKind::MissingText, key.as_str(), "");
            continue;
        };

        if prefix == "2" {
            out.insert(format!("Dungeon{id}_sub"), text.to_string());
        } else {
            out.insert(format!("Dungeon{id}"), text.to_string());
            out.insert(format!("Dungeon{id}_master"), text.replace(SHRINE_SUFFIX, ""));
        }
    }

    tracing::info!("Read {} dungeon texts", out.len());
    (out, diagnostics)
}

/// Location marker names, keyed as in the table
///
/// Entries whose content count is not exactly one are reported but still
/// contribute their first block.
pub fn location_texts(table: &MsytFile) -> (IndexMap<String, String>, Diagnostics) {
    let mut out = IndexMap::new();
    let mut diagnostics = Diagnostics::new();

    for (key, entry) in &table.entries {
        if entry.contents.len() != 1 {
            diagnostics.push(
                DiagnosticKind::UnexpectedContents,
                key.as_str(),
                format!("{} content blocks", entry.contents.len()),
            );
        }
        match entry.first_text() {
            Some(text) => {
                out.insert(key.clone(), text.to_string());
            }
            None => diagnostics.push(DiagnosticKind::MissingText, key.as_str(), ""),
        }
    }

    tracing::info!("Read {} location texts", out.len());
    (out, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dungeon_texts() {
        let table = MsytFile::parse(
            r"
entries:
  Ref_001:
    contents:
      - text: ignored
  '0001':
    contents:
      - text: Ukouh Shrine
  '2001':
    contents:
      - text: The Ability to Build
  '1001':
    contents:
      - text: not a shrine key
",
        )
        .unwrap();

        let (texts, diagnostics) = dungeon_texts(&table);
        assert!(diagnostics.is_empty());
        let pairs: Vec<_> = texts.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(
            pairs,
            vec![
                ("Dungeon001", "Ukouh Shrine"),
                ("Dungeon001_master", "Ukouh"),
                ("Dungeon001_sub", "The Ability to Build"),
            ]
        );
    }

    #[test]
    fn test_location_texts_reports_multi_block_entries() {
        let table = MsytFile::parse(
            r"
entries:
  Kakariko:
    contents:
      - text: Kakariko Village
  Odd:
    contents:
      - text: First
      - text: Second
",
        )
        .unwrap();

        let (texts, diagnostics) = location_texts(&table);
        assert_eq!(texts["Kakariko"], "Kakariko Village");
        assert_eq!(texts["Odd"], "First");
        assert!(diagnostics.contains(DiagnosticKind::UnexpectedContents, "Odd"));
    }
}
