//! CLI commands for map tiles

use std::path::Path;
use std::time::Instant;

use indicatif::ProgressBar;

use crate::cli::progress::{DISK, PICTURE, print_done, print_step, simple_bar};
use crate::config::ToolConfig;
use crate::tiles::pyramid::load_full_map;
use crate::tiles::{Area, build_pyramid, full_map_path, stitch_area};

fn parse_areas(areas: &[String]) -> anyhow::Result<Vec<Area>> {
    Ok(areas
        .iter()
        .map(|a| a.parse::<Area>())
        .collect::<Result<_, _>>()?)
}

fn progress_bar(quiet: bool, msg: &str) -> ProgressBar {
    if quiet {
        ProgressBar::hidden()
    } else {
        simple_bar(0, msg)
    }
}

/// Stitch the source grid of each area into `{area}_full_map.png`
pub fn stitch(
    config: &ToolConfig,
    areas: &[String],
    work_dir: Option<&Path>,
    quiet: bool,
) -> anyhow::Result<()> {
    let start = Instant::now();
    let areas = parse_areas(areas)?;
    let work_dir = work_dir.unwrap_or(config.tiles.work_dir.as_path());
    let layout = config.tiles.layout();

    for (i, area) in areas.iter().enumerate() {
        print_step(i + 1, areas.len(), PICTURE, &format!("Stitching {area}..."));
        let pb = progress_bar(quiet, "Stitching");
        let path = stitch_area(work_dir, *area, &layout, |current, total, _| {
            pb.set_length(total as u64);
            pb.set_position(current as u64);
        })?;
        pb.finish_and_clear();
        println!("Wrote {}", path.display());
    }

    print_done(start.elapsed());
    Ok(())
}

/// Slice each area's stitched map into the zoom pyramid
pub fn pyramid(
    config: &ToolConfig,
    areas: &[String],
    output_root: Option<&Path>,
    quiet: bool,
) -> anyhow::Result<()> {
    let start = Instant::now();
    let areas = parse_areas(areas)?;
    let output_root = output_root.unwrap_or(config.tiles.output_root.as_path());
    let layout = config.tiles.layout();

    for (i, area) in areas.iter().enumerate() {
        let source = full_map_path(&config.tiles.work_dir, *area);
        print_step(i + 1, areas.len(), PICTURE, &format!("Loading {}...", source.display()));
        let full = load_full_map(&source)?;

        print_step(i + 1, areas.len(), DISK, &format!("Writing {area} tiles..."));
        let pb = progress_bar(quiet, "Tiles");
        let written = build_pyramid(
            &full,
            *area,
            &layout,
            &config.tiles.zooms,
            config.tiles.format,
            output_root,
            |current, total, _| {
                pb.set_length(total as u64);
                pb.set_position(current as u64);
            },
        )?;
        pb.finish_and_clear();
        println!("{written} {area} tiles written under {}", output_root.display());
    }

    print_done(start.elapsed());
    Ok(())
}
