//! Full-map stitching
//!
//! Source tiles are named `{area}_{xx}-{zz}_00.png` (two-digit grid indices)
//! and live in `{work_dir}/pngtiles/`.

use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage, imageops};

use super::{Area, TileLayout};
use crate::error::{Error, Result};

/// Path of one source tile
pub fn source_tile_path(work_dir: &Path, area: Area, x: u32, z: u32) -> PathBuf {
    work_dir
        .join("pngtiles")
        .join(format!("{}_{x:02}-{z:02}_00.png", area.letter()))
}

/// Path of the stitched map for `area`
pub fn full_map_path(work_dir: &Path, area: Area) -> PathBuf {
    work_dir.join(format!("{}_full_map.png", area.letter()))
}

/// Stitch the source grid of `area` into one image
///
/// Each tile is pasted at its grid index times the source tile size. A tile
/// of the wrong size is an error.
pub fn stitch<F>(work_dir: &Path, area: Area, layout: &TileLayout, progress: F) -> Result<RgbImage>
where
    F: Fn(usize, usize, &str),
{
    layout.validate()?;
    let (width, height) = layout.full_size();
    let size = layout.source_tile_size;
    let mut output = RgbImage::new(width, height);

    let total = (layout.columns * layout.rows) as usize;
    let mut current = 0;
    for x in 0..layout.columns {
        for z in 0..layout.rows {
            let path = source_tile_path(work_dir, area, x, z);
            current += 1;
            progress(current, total, &path.display().to_string());

            let tile = image::open(&path)?.to_rgb8();
            if tile.dimensions() != (size, size) {
                return Err(Error::InvalidTileLayout {
                    message: format!(
                        "{} is {}x{}, expected {size}x{size}",
                        path.display(),
                        tile.width(),
                        tile.height()
                    ),
                });
            }
            imageops::replace(
                &mut output,
                &tile,
                i64::from(x * size),
                i64::from(z * size),
            );
        }
    }
    Ok(output)
}

/// Stitch `area` and save it as PNG next to the source tiles
pub fn stitch_area<F>(work_dir: &Path, area: Area, layout: &TileLayout, progress: F) -> Result<PathBuf>
where
    F: Fn(usize, usize, &str),
{
    let output = stitch(work_dir, area, layout, progress)?;
    let path = full_map_path(work_dir, area);
    tracing::info!("Exporting {}", path.display());
    output.save_with_format(&path, ImageFormat::Png)?;
    Ok(path)
}
