//! Map tile assembly
//!
//! The map of each area ships as a grid of large source tiles. They are
//! stitched into one full-resolution image ([`stitch`]), which is then
//! resized once per zoom level, padded with transparency to a whole number
//! of output tiles and sliced ([`pyramid`]).
//!
//! Output tiles are written to `map/{Area}/maptex/{zoom}/{x}/{y}.{ext}`.

pub mod pyramid;
pub mod stitch;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use pyramid::{build_pyramid, save_tile, slice_tile, tile_path, write_zoom_level, zoomed};
pub use stitch::{full_map_path, source_tile_path, stitch_area};

/// Map area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Area {
    Ground,
    Sky,
    Depths,
}

impl Area {
    pub const ALL: [Area; 3] = [Area::Ground, Area::Sky, Area::Depths];

    /// Letter used in source tile names
    pub fn letter(self) -> char {
        match self {
            Self::Ground => 'G',
            Self::Sky => 'S',
            Self::Depths => 'U',
        }
    }

    /// Directory name under `map/`
    pub fn name(self) -> &'static str {
        match self {
            Self::Ground => "Ground",
            Self::Sky => "Sky",
            Self::Depths => "Depths",
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Area {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "G" | "g" | "Ground" => Ok(Self::Ground),
            "S" | "s" | "Sky" => Ok(Self::Sky),
            "U" | "u" | "Depths" => Ok(Self::Depths),
            _ => Err(Error::UnknownArea(s.to_string())),
        }
    }
}

/// Tile image encoding
///
/// WebP tiles are lossy at [`pyramid::WEBP_QUALITY`]; PNG tiles are lossless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileFormat {
    #[default]
    Webp,
    Png,
}

impl TileFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Webp => "webp",
            Self::Png => "png",
        }
    }
}

/// A zoom level and the factor the full map is shrunk by for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoomLevel {
    pub zoom: u32,
    pub scale: f64,
}

impl ZoomLevel {
    pub fn new(zoom: u32, scale: f64) -> Self {
        Self { zoom, scale }
    }

    /// Zoom levels 2 to 7 of the object map viewer
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new(2, 48.0),
            Self::new(3, 24.0),
            Self::new(4, 12.0),
            Self::new(5, 6.0),
            Self::new(6, 3.0),
            Self::new(7, 1.5),
        ]
    }
}

/// Source grid and output tile sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileLayout {
    pub columns: u32,
    pub rows: u32,
    pub source_tile_size: u32,
    pub output_tile_size: u32,
}

impl Default for TileLayout {
    fn default() -> Self {
        Self {
            columns: 12,
            rows: 10,
            source_tile_size: 3000,
            output_tile_size: 256,
        }
    }
}

impl TileLayout {
    /// Reject layouts that would produce empty images
    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 || self.rows == 0 {
            return Err(Error::InvalidTileLayout {
                message: format!("empty source grid {}x{}", self.columns, self.rows),
            });
        }
        if self.source_tile_size == 0 || self.output_tile_size == 0 {
            return Err(Error::InvalidTileLayout {
                message: "tile sizes must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Size of the stitched full map
    pub fn full_size(&self) -> (u32, u32) {
        (
            self.columns * self.source_tile_size,
            self.rows * self.source_tile_size,
        )
    }

    /// Size of the full map shrunk by `scale`, truncated to whole pixels
    pub fn zoomed_size(&self, scale: f64) -> Result<(u32, u32)> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(Error::InvalidTileLayout {
                message: format!("invalid zoom scale {scale}"),
            });
        }
        let (width, height) = self.full_size();
        let size = (
            (f64::from(width) / scale) as u32,
            (f64::from(height) / scale) as u32,
        );
        if size.0 == 0 || size.1 == 0 {
            return Err(Error::InvalidTileLayout {
                message: format!("scale {scale} leaves an empty image"),
            });
        }
        Ok(size)
    }

    /// Output tile counts covering an image, padding the last row and column
    pub fn tile_grid(&self, width: u32, height: u32) -> (u32, u32) {
        (
            width.div_ceil(self.output_tile_size),
            height.div_ceil(self.output_tile_size),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_area_parsing() {
        assert_eq!("G".parse::<Area>().unwrap(), Area::Ground);
        assert_eq!("S".parse::<Area>().unwrap(), Area::Sky);
        assert_eq!("U".parse::<Area>().unwrap(), Area::Depths);
        assert!(matches!("X".parse::<Area>(), Err(Error::UnknownArea(_))));
        assert_eq!(Area::Depths.letter(), 'U');
        assert_eq!(Area::Depths.to_string(), "Depths");
    }

    #[test]
    fn test_full_layout_tile_counts() {
        let layout = TileLayout::default();
        assert_eq!(layout.full_size(), (36000, 30000));

        let (w, h) = layout.zoomed_size(24.0).unwrap();
        assert_eq!((w, h), (1500, 1250));
        assert_eq!(layout.tile_grid(w, h), (6, 5));
    }

    #[test]
    fn test_every_default_zoom_matches_viewer_extent() {
        let layout = TileLayout::default();
        // Highest x/y tile index served by the viewer at each zoom
        let expected = [(2, 2, 2), (3, 5, 4), (4, 11, 9), (5, 23, 19), (6, 46, 39), (7, 93, 78)];
        for (level, (zoom, max_x, max_y)) in ZoomLevel::defaults().iter().zip(expected) {
            assert_eq!(level.zoom, zoom);
            let (w, h) = layout.zoomed_size(level.scale).unwrap();
            assert_eq!(layout.tile_grid(w, h), (max_x + 1, max_y + 1), "zoom {zoom}");
        }
    }

    #[test]
    fn test_exact_multiple_needs_no_padding_tile() {
        let layout = TileLayout {
            output_tile_size: 4,
            ..TileLayout::default()
        };
        assert_eq!(layout.tile_grid(8, 9), (2, 3));
    }

    #[test]
    fn test_invalid_layouts() {
        let layout = TileLayout {
            columns: 0,
            ..TileLayout::default()
        };
        assert!(layout.validate().is_err());
        assert!(TileLayout::default().zoomed_size(0.0).is_err());
        assert!(TileLayout::default().zoomed_size(f64::NAN).is_err());
    }
}
