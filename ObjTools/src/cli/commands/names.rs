//! CLI commands for the actor name tables

use std::path::Path;
use std::time::Instant;

use crate::actor::{extract_common_names, find_actor_packs};
use crate::cli::progress::{DOCUMENT, GEAR, LOOKING_GLASS, print_diagnostics, print_done, print_step};
use crate::config::ToolConfig;
use crate::msyt::{MsytFile, NameTableBuilder, load_overrides, read_name_map};
use crate::output::{DocBlock, JsonStyle, string_document, write_json};

const MSYT_NOTE: &str = "msyt files created by msyt export file.msbt";

/// Build `names.json` from the configured ActorMsg tables
pub fn names(
    config: &ToolConfig,
    msg_root: &Path,
    missing: &Path,
    extra: Option<&Path>,
    output: &Path,
) -> anyhow::Result<()> {
    let start = Instant::now();
    let tables = &config.names.tables;

    print_step(1, 3, LOOKING_GLASS, "Reading name tables...");
    let mut builder =
        NameTableBuilder::new().with_skip_aliases(config.names.skip_aliases.iter().cloned());
    for table in tables {
        builder.add_table(&MsytFile::load(msg_root.join(table))?);
    }

    print_step(2, 3, GEAR, "Applying extra names and overrides...");
    if let Some(extra) = extra {
        let extras = read_name_map(extra)?;
        builder.add_extras(&extras);
    }
    let rows = load_overrides(missing)?;
    builder.apply_overrides(&rows)?;
    let (names, diagnostics) = builder.finish();

    print_step(3, 3, DOCUMENT, "Writing names...");
    let mut doc = DocBlock::new("objmap/public/game_files/names.json", "objtools names")
        .inputs(tables.iter().cloned());
    if let Some(extra) = extra {
        doc = doc.input(extra.display().to_string());
    }
    let doc = doc
        .input(missing.display().to_string())
        .note(MSYT_NOTE)
        .note("missing.csv lists names absent from the tables; a $key value copies the name of another key");
    write_json(output, &string_document(&names, &doc)?, JsonStyle::Pretty)?;

    println!("{} names written to {}", names.len(), output.display());
    print_diagnostics(&diagnostics);
    print_done(start.elapsed());
    Ok(())
}

/// Build `names_extra.json` for actors without a table name
pub fn common_names(
    config: &ToolConfig,
    common_name: &Path,
    names_path: &Path,
    output: &Path,
    quiet: bool,
) -> anyhow::Result<()> {
    let start = Instant::now();

    print_step(1, 3, LOOKING_GLASS, "Scanning actor packs...");
    let packs = find_actor_packs(&config.paths.actor_root)?;
    let table = MsytFile::load(common_name)?;
    let known = read_name_map(names_path)?;
    if !quiet {
        println!("Found {} actor packs", packs.len());
    }

    print_step(2, 3, GEAR, "Resolving common names...");
    let result = extract_common_names(
        &packs,
        &config.paths.resident_common,
        &table,
        &known,
        config.resolver.max_parent_depth,
    )?;

    print_step(3, 3, DOCUMENT, "Writing names...");
    let doc = DocBlock::new("names_extra.json", "objtools common-names")
        .input(common_name.display().to_string())
        .input(names_path.display().to_string())
        .input(config.paths.actor_root.display().to_string());
    write_json(output, &string_document(&result.names, &doc)?, JsonStyle::Pretty)?;

    println!("{} names written to {}", result.names.len(), output.display());
    print_diagnostics(&result.diagnostics);
    print_done(start.elapsed());
    Ok(())
}
