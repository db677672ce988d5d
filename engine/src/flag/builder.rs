//! Converts an indexed bitmap into an [`ImageAsset`].
//!
//! The bitmap is cut in 8x8 tiles, left to right and top to bottom. Repeated
//! tiles, including mirrored copies, are stored once and referenced from the
//! map with the matching flip flags.

use std::collections::HashMap;

use tracing::debug;

use crate::hardware::color::Color;
use crate::hardware::map_cell::MapCell;
use crate::hardware::tiles::{TILE_8BPP_BYTES, TILE_SIZE};

use super::asset::{AssetError, ImageAsset};

type TilePixels = [u8; TILE_8BPP_BYTES];

/// Builds an asset from `width * height` palette indexes, row by row.
///
/// # Errors
/// If the size is not tile aligned, `pixels` has the wrong length, the image
/// needs more tiles than a map can address or the palette is too large.
#[allow(clippy::cast_possible_truncation)]
pub fn from_bitmap(
    name: &str,
    width: usize,
    height: usize,
    pixels: &[u8],
    palette: Vec<Color>,
) -> Result<ImageAsset, AssetError> {
    if width % TILE_SIZE != 0 || height % TILE_SIZE != 0 {
        return Err(AssetError::UnalignedSize { width, height });
    }

    if pixels.len() != width * height {
        return Err(AssetError::PixelCount {
            expected: width * height,
            actual: pixels.len(),
        });
    }

    let mut unique: HashMap<TilePixels, usize> = HashMap::new();
    let mut tiles = Vec::new();
    let mut map = Vec::with_capacity((width / TILE_SIZE) * (height / TILE_SIZE));

    for tile_y in 0..height / TILE_SIZE {
        for tile_x in 0..width / TILE_SIZE {
            let tile = cut_tile(pixels, width, tile_x, tile_y);

            let found = [(false, false), (true, false), (false, true), (true, true)]
                .into_iter()
                .find_map(|(h, v)| {
                    unique
                        .get(&flip_tile(&tile, h, v))
                        .map(|index| (*index, h, v))
                });

            let cell = if let Some((index, h, v)) = found {
                MapCell::new(index as u16).with_flips(h, v)
            } else {
                let index = unique.len();
                if index > usize::from(MapCell::MAX_TILE_INDEX) {
                    return Err(AssetError::TooManyTiles(index + 1));
                }
                unique.insert(tile, index);
                tiles.extend_from_slice(&tile);
                MapCell::new(index as u16)
            };

            map.push(cell);
        }
    }

    debug!(
        name,
        cells = map.len(),
        unique_tiles = unique.len(),
        "converted bitmap"
    );

    ImageAsset::new(name, width, height, tiles, map, palette)
}

fn cut_tile(pixels: &[u8], width: usize, tile_x: usize, tile_y: usize) -> TilePixels {
    let mut tile = [0; TILE_8BPP_BYTES];
    for (row, dest) in tile.chunks_exact_mut(TILE_SIZE).enumerate() {
        let start = (tile_y * TILE_SIZE + row) * width + tile_x * TILE_SIZE;
        dest.copy_from_slice(&pixels[start..start + TILE_SIZE]);
    }
    tile
}

fn flip_tile(tile: &TilePixels, horizontal: bool, vertical: bool) -> TilePixels {
    let mut flipped = [0; TILE_8BPP_BYTES];
    for (row, dest) in flipped.chunks_exact_mut(TILE_SIZE).enumerate() {
        let src_row = if vertical { TILE_SIZE - 1 - row } else { row };
        dest.copy_from_slice(&tile[src_row * TILE_SIZE..(src_row + 1) * TILE_SIZE]);
        if horizontal {
            dest.reverse();
        }
    }
    flipped
}
