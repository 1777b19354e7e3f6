//! CLI commands for the LocationMsg text maps

use std::path::Path;

use crate::cli::progress::print_diagnostics;
use crate::msyt::location::{DUNGEON_TABLE, LOCATION_TABLE};
use crate::msyt::{MsytFile, dungeon_texts, location_texts};
use crate::output::{DocBlock, JsonStyle, string_document, write_json};

const MSYT_NOTE: &str = "msyt files created by msyt export file.msbt";

/// Write `Dungeon.json`
pub fn dungeons(msg_root: &Path, output: &Path) -> anyhow::Result<()> {
    let table = MsytFile::load(msg_root.join(DUNGEON_TABLE))?;
    let (texts, diagnostics) = dungeon_texts(&table);

    let doc = DocBlock::new("objmap/public/game_files/text/Dungeon.json", "objtools dungeons")
        .input(DUNGEON_TABLE)
        .note(MSYT_NOTE);
    write_json(output, &string_document(&texts, &doc)?, JsonStyle::Compact)?;

    println!("{} dungeon texts written to {}", texts.len(), output.display());
    print_diagnostics(&diagnostics);
    Ok(())
}

/// Write `LocationMarker.json`
pub fn locations(msg_root: &Path, output: &Path) -> anyhow::Result<()> {
    let table = MsytFile::load(msg_root.join(LOCATION_TABLE))?;
    let (texts, diagnostics) = location_texts(&table);

    let doc = DocBlock::new(
        "objmap/public/game_files/text/LocationMarker.json",
        "objtools locations",
    )
    .input(LOCATION_TABLE)
    .note(MSYT_NOTE);
    write_json(output, &string_document(&texts, &doc)?, JsonStyle::Compact)?;

    println!("{} location texts written to {}", texts.len(), output.display());
    print_diagnostics(&diagnostics);
    Ok(())
}
