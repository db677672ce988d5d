//! Image assets: tiles, map and palette of a background image.

use std::sync::Arc;

use thiserror::Error;

use crate::hardware::color::Color;
use crate::hardware::map_cell::MapCell;
use crate::hardware::palette::MAX_COLORS_FULL_PALETTE;
use crate::hardware::tiles::{TILE_8BPP_BYTES, TILE_SIZE};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssetError {
    #[error("image size {width}x{height} is not a multiple of {tile}", tile = TILE_SIZE)]
    UnalignedSize { width: usize, height: usize },

    #[error("expected {expected} pixels, got {actual}")]
    PixelCount { expected: usize, actual: usize },

    #[error("tile data is {0} bytes, not a whole number of 8bpp tiles")]
    TileDataSize(usize),

    #[error("expected {expected} map cells, got {actual}")]
    MapSize { expected: usize, actual: usize },

    #[error("map cell {cell} points to tile {tile_index} but there are {tiles_count} tiles")]
    TileIndexOutOfRange {
        cell: usize,
        tile_index: usize,
        tiles_count: usize,
    },

    #[error(
        "image needs {0} unique tiles, a map can address {max}",
        max = MapCell::MAX_TILE_INDEX as usize + 1
    )]
    TooManyTiles(usize),

    #[error("palette has {0} colors, max is {max}", max = MAX_COLORS_FULL_PALETTE)]
    PaletteTooLarge(usize),

    #[error("no image named `{0}`")]
    UnknownImage(String),

    #[error("an image catalog can't be empty")]
    EmptyCatalog,
}

/// An immutable 8bpp background image.
///
/// Tiles are stored row-major and 64 bytes each; the map holds one cell per
/// image tile, row-major.
#[derive(Debug)]
pub struct ImageAsset {
    name: String,
    width_tiles: usize,
    height_tiles: usize,
    tiles: Vec<u8>,
    map: Vec<MapCell>,
    palette: Vec<Color>,
}

impl ImageAsset {
    /// # Errors
    /// When the size isn't tile aligned, the buffers don't match the size, a
    /// cell points past the tile data, or the palette is too large.
    pub fn new(
        name: impl Into<String>,
        width: usize,
        height: usize,
        tiles: Vec<u8>,
        map: Vec<MapCell>,
        palette: Vec<Color>,
    ) -> Result<Self, AssetError> {
        if width % TILE_SIZE != 0 || height % TILE_SIZE != 0 {
            return Err(AssetError::UnalignedSize { width, height });
        }

        if tiles.len() % TILE_8BPP_BYTES != 0 {
            return Err(AssetError::TileDataSize(tiles.len()));
        }

        let width_tiles = width / TILE_SIZE;
        let height_tiles = height / TILE_SIZE;
        if map.len() != width_tiles * height_tiles {
            return Err(AssetError::MapSize {
                expected: width_tiles * height_tiles,
                actual: map.len(),
            });
        }

        let tiles_count = tiles.len() / TILE_8BPP_BYTES;
        if let Some((cell, tile_index)) = map
            .iter()
            .map(|c| c.tile_index())
            .enumerate()
            .find(|(_, tile_index)| *tile_index >= tiles_count)
        {
            return Err(AssetError::TileIndexOutOfRange {
                cell,
                tile_index,
                tiles_count,
            });
        }

        if palette.len() > MAX_COLORS_FULL_PALETTE {
            return Err(AssetError::PaletteTooLarge(palette.len()));
        }

        Ok(Self {
            name: name.into(),
            width_tiles,
            height_tiles,
            tiles,
            map,
            palette,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn width_tiles(&self) -> usize {
        self.width_tiles
    }

    #[must_use]
    pub const fn height_tiles(&self) -> usize {
        self.height_tiles
    }

    #[must_use]
    pub const fn width_pixels(&self) -> usize {
        self.width_tiles * TILE_SIZE
    }

    #[must_use]
    pub const fn height_pixels(&self) -> usize {
        self.height_tiles * TILE_SIZE
    }

    /// Row-major 8bpp tile data.
    #[must_use]
    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    #[must_use]
    pub fn tiles_count(&self) -> usize {
        self.tiles.len() / TILE_8BPP_BYTES
    }

    /// Row-major map, `width_tiles` cells per row.
    #[must_use]
    pub fn map(&self) -> &[MapCell] {
        &self.map
    }

    #[must_use]
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Identity comparison, two assets with the same content are still
    /// different images.
    #[must_use]
    pub fn same(a: &Arc<Self>, b: &Arc<Self>) -> bool {
        Arc::ptr_eq(a, b)
    }
}

/// The images an application can show, in toggle order.
#[derive(Debug, Clone)]
pub struct ImageCatalog {
    images: Vec<Arc<ImageAsset>>,
}

impl ImageCatalog {
    /// # Errors
    /// If `images` is empty.
    pub fn new(images: Vec<ImageAsset>) -> Result<Self, AssetError> {
        if images.is_empty() {
            return Err(AssetError::EmptyCatalog);
        }

        Ok(Self {
            images: images.into_iter().map(Arc::new).collect(),
        })
    }

    #[must_use]
    pub fn first(&self) -> &Arc<ImageAsset> {
        &self.images[0]
    }

    /// # Errors
    /// If no image is called `name`.
    pub fn get(&self, name: &str) -> Result<&Arc<ImageAsset>, AssetError> {
        self.images
            .iter()
            .find(|image| image.name() == name)
            .ok_or_else(|| AssetError::UnknownImage(name.to_owned()))
    }

    /// The image following `current`, wrapping around. Images from other
    /// catalogs map to the first one.
    #[must_use]
    pub fn next_after(&self, current: &Arc<ImageAsset>) -> &Arc<ImageAsset> {
        let position = self
            .images
            .iter()
            .position(|image| ImageAsset::same(image, current));

        match position {
            Some(i) => &self.images[(i + 1) % self.images.len()],
            None => self.first(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ImageAsset>> {
        self.images.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
