//! Zoom pyramid generation

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use image::imageops::{self, FilterType};
use image::{ImageFormat, ImageReader, Rgba, RgbImage, RgbaImage};
use rayon::prelude::*;

use super::{Area, TileFormat, TileLayout, ZoomLevel};
use crate::error::{Error, Result};

/// Quality of lossy WebP tiles (0 to 100)
pub const WEBP_QUALITY: f32 = 80.0;

/// Where tile `(x, y)` of `zoom` is written
pub fn tile_path(
    output_root: &Path,
    area: Area,
    zoom: u32,
    x: u32,
    y: u32,
    format: TileFormat,
) -> PathBuf {
    output_root
        .join("map")
        .join(area.name())
        .join("maptex")
        .join(zoom.to_string())
        .join(x.to_string())
        .join(format!("{y}.{}", format.extension()))
}

/// Open a stitched full map without the decoder's size limits
pub fn load_full_map(path: &Path) -> Result<RgbImage> {
    let mut reader = ImageReader::open(path)?.with_guessed_format()?;
    reader.no_limits();
    Ok(reader.decode()?.to_rgb8())
}

/// The full map resized for `scale` (bicubic)
pub fn zoomed(full: &RgbImage, layout: &TileLayout, scale: f64) -> Result<RgbImage> {
    let (width, height) = layout.zoomed_size(scale)?;
    Ok(imageops::resize(full, width, height, FilterType::CatmullRom))
}

/// Cut tile `(x, y)` out of `image`
///
/// Parts of the tile past the image edge are transparent.
pub fn slice_tile(image: &RgbImage, x: u32, y: u32, size: u32) -> RgbaImage {
    let mut tile = RgbaImage::from_pixel(size, size, Rgba([0, 0, 0, 0]));
    let left = x * size;
    let top = y * size;
    let width = image.width().saturating_sub(left).min(size);
    let height = image.height().saturating_sub(top).min(size);

    for ty in 0..height {
        for tx in 0..width {
            let [r, g, b] = image.get_pixel(left + tx, top + ty).0;
            tile.put_pixel(tx, ty, Rgba([r, g, b, 255]));
        }
    }
    tile
}

/// Encode `tile` in `format` and write it to `path`
pub fn save_tile(tile: &RgbaImage, path: &Path, format: TileFormat) -> Result<()> {
    match format {
        TileFormat::Webp => {
            let encoded = webp::Encoder::from_rgba(tile.as_raw(), tile.width(), tile.height())
                .encode_simple(false, WEBP_QUALITY)
                .map_err(|status| Error::TileEncode {
                    path: path.to_path_buf(),
                    message: format!("{status:?}"),
                })?;
            std::fs::write(path, &*encoded)?;
        }
        TileFormat::Png => tile.save_with_format(path, ImageFormat::Png)?,
    }
    Ok(())
}

/// Slice one zoomed image and write every tile
///
/// Tiles are independent and written in parallel. Returns the tile count.
pub fn write_zoom_level<F>(
    zoomed: &RgbImage,
    area: Area,
    zoom: u32,
    layout: &TileLayout,
    format: TileFormat,
    output_root: &Path,
    progress: F,
) -> Result<usize>
where
    F: Fn(usize, usize, &str) + Send + Sync,
{
    let size = layout.output_tile_size;
    let (columns, rows) = layout.tile_grid(zoomed.width(), zoomed.height());
    let coords: Vec<(u32, u32)> = (0..columns)
        .flat_map(|x| (0..rows).map(move |y| (x, y)))
        .collect();
    let total = coords.len();
    let processed = AtomicUsize::new(0);

    coords.par_iter().try_for_each(|&(x, y)| -> Result<()> {
        let path = tile_path(output_root, area, zoom, x, y, format);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        save_tile(&slice_tile(zoomed, x, y, size), &path, format)?;

        let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
        progress(current, total, &path.display().to_string());
        Ok(())
    })?;

    tracing::info!("{area} zoom {zoom}: {columns}x{rows} tiles");
    Ok(total)
}

/// Write every zoom level of one area from its stitched full map
pub fn build_pyramid<F>(
    full: &RgbImage,
    area: Area,
    layout: &TileLayout,
    zooms: &[ZoomLevel],
    format: TileFormat,
    output_root: &Path,
    progress: F,
) -> Result<usize>
where
    F: Fn(usize, usize, &str) + Send + Sync,
{
    layout.validate()?;
    let mut written = 0;
    for level in zooms {
        let image = zoomed(full, layout, level.scale)?;
        written += write_zoom_level(&image, area, level.zoom, layout, format, output_root, &progress)?;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn layout() -> TileLayout {
        TileLayout {
            columns: 2,
            rows: 1,
            source_tile_size: 10,
            output_tile_size: 4,
        }
    }

    #[test]
    fn test_tile_path() {
        let path = tile_path(Path::new("out"), Area::Sky, 3, 5, 4, TileFormat::Webp);
        assert_eq!(path, Path::new("out/map/Sky/maptex/3/5/4.webp"));
    }

    #[test]
    fn test_slice_tile_pads_with_transparency() {
        let image = RgbImage::from_pixel(6, 5, Rgb([9, 8, 7]));

        let inner = slice_tile(&image, 0, 0, 4);
        assert!(inner.pixels().all(|p| *p == Rgba([9, 8, 7, 255])));

        let corner = slice_tile(&image, 1, 1, 4);
        assert_eq!(*corner.get_pixel(0, 0), Rgba([9, 8, 7, 255]));
        assert_eq!(*corner.get_pixel(1, 0), Rgba([9, 8, 7, 255]));
        assert_eq!(*corner.get_pixel(2, 0), Rgba([0, 0, 0, 0]));
        assert_eq!(*corner.get_pixel(0, 1), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_tiles_cover_the_zoomed_image_without_gaps() {
        let image = RgbImage::from_fn(10, 5, |x, y| Rgb([x as u8, y as u8, 0]));
        let (columns, rows) = layout().tile_grid(10, 5);
        assert_eq!((columns, rows), (3, 2));

        for y in 0..5 {
            for x in 0..10 {
                let tile = slice_tile(&image, x / 4, y / 4, 4);
                assert_eq!(
                    *tile.get_pixel(x % 4, y % 4),
                    Rgba([x as u8, y as u8, 0, 255])
                );
            }
        }
    }

    #[test]
    fn test_build_pyramid_writes_every_tile() {
        let temp = TempDir::new().unwrap();
        let full = RgbImage::from_pixel(20, 10, Rgb([200, 100, 50]));
        let zooms = vec![ZoomLevel::new(2, 2.0), ZoomLevel::new(3, 1.0)];

        let written = build_pyramid(
            &full,
            Area::Depths,
            &layout(),
            &zooms,
            TileFormat::Png,
            temp.path(),
            |_, _, _| {},
        )
        .unwrap();

        // 10x5 -> 3x2 tiles, 20x10 -> 5x3 tiles
        assert_eq!(written, 6 + 15);
        let corner = tile_path(temp.path(), Area::Depths, 3, 4, 2, TileFormat::Png);
        let tile = image::open(&corner).unwrap().to_rgba8();
        assert_eq!(tile.dimensions(), (4, 4));
        assert_eq!(*tile.get_pixel(0, 0), Rgba([200, 100, 50, 255]));
        assert_eq!(*tile.get_pixel(0, 2), Rgba([0, 0, 0, 0]));
        assert!(!tile_path(temp.path(), Area::Depths, 2, 3, 0, TileFormat::Png).exists());
    }

    #[test]
    fn test_webp_tiles_are_lossy() {
        let temp = TempDir::new().unwrap();
        let image = RgbImage::from_fn(10, 5, |x, y| Rgb([(x * 20) as u8, (y * 40) as u8, 90]));

        let written = write_zoom_level(
            &image,
            Area::Ground,
            4,
            &layout(),
            TileFormat::Webp,
            temp.path(),
            |_, _, _| {},
        )
        .unwrap();
        assert_eq!(written, 6);

        let read = |x, y| std::fs::read(tile_path(temp.path(), Area::Ground, 4, x, y, TileFormat::Webp)).unwrap();

        // Opaque tile: a single lossy VP8 chunk
        let opaque = read(0, 0);
        assert_eq!(&opaque[0..4], b"RIFF");
        assert_eq!(&opaque[8..12], b"WEBP");
        assert_eq!(&opaque[12..16], b"VP8 ");

        // Padded tile: extended header, alpha plane, lossy image data
        let padded = read(2, 1);
        assert_eq!(&padded[12..16], b"VP8X");
        assert!(padded.windows(4).any(|chunk| chunk == b"ALPH"));
        assert!(padded.windows(4).any(|chunk| chunk == b"VP8 "));
    }

    #[test]
    fn test_output_is_deterministic() {
        let temp = TempDir::new().unwrap();
        let full = RgbImage::from_fn(20, 10, |x, y| Rgb([(x * 12) as u8, (y * 25) as u8, 3]));
        let zooms = vec![ZoomLevel::new(2, 3.0)];
        let first = temp.path().join("a");
        let second = temp.path().join("b");

        for root in [&first, &second] {
            build_pyramid(&full, Area::Ground, &layout(), &zooms, TileFormat::Png, root, |_, _, _| {})
                .unwrap();
        }
        let a = std::fs::read(tile_path(&first, Area::Ground, 2, 1, 0, TileFormat::Png)).unwrap();
        let b = std::fs::read(tile_path(&second, Area::Ground, 2, 1, 0, TileFormat::Png)).unwrap();
        assert_eq!(a, b);
    }
}
