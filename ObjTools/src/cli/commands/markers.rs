//! CLI command for static map markers

use std::path::Path;
use std::time::Instant;

use crate::cli::progress::{DISK, GEAR, print_diagnostics, print_done, print_step};
use crate::markers::{FIELDS, StaticMarkers, StaticSources, build_static_markers, location_area_path};
use crate::output::{DocBlock, JsonStyle, write_json};

/// Write `static.json`
pub fn static_markers(sources: &StaticSources, output: &Path) -> anyhow::Result<()> {
    let start = Instant::now();

    print_step(1, 2, GEAR, "Classifying placements...");
    let (markers, diagnostics) = build_static_markers(sources)?;
    for (category, list) in markers.iter() {
        println!("  {category}: {}", list.len());
    }

    print_step(2, 2, DISK, "Writing markers...");
    let doc = DocBlock::new(
        "objmap/public/game_files/map_summary/MainField/static.json",
        "objtools static",
    )
    .inputs(FIELDS.iter().map(|field| location_area_path(field)))
    .note("json input files created by decompressing the zstd byml files and converting them to json");
    let document = StaticMarkers { markers, doc };
    write_json(output, &document, JsonStyle::Pretty)?;

    print_diagnostics(&diagnostics);
    print_done(start.elapsed());
    Ok(())
}
