//! Regular (text mode) background.
//!
//! The background is built from an allocated block of tiles, a set of 32x32
//! screen blocks and a palette. Only one screen block is shown at a time;
//! switching it is how a whole frame is flipped in one step.

use super::color::Color;
use super::lcd::{LCD_HEIGHT, LCD_WIDTH};
use super::map_cell::{SCREEN_BLOCK_SIZE, ScreenBlock};
use super::palette::BgPalette;
use super::tiles::{TILE_8BPP_BYTES, TILE_ROW_BYTES, TILE_SIZE, TileMemory};

/// Size in pixels of a 32x32 tiles map.
const MAP_PIXELS: usize = SCREEN_BLOCK_SIZE * TILE_SIZE;

#[derive(Debug, Clone)]
pub struct RegularBg {
    tiles: TileMemory,
    screen_blocks: Vec<ScreenBlock>,
    screen_block: usize,
    palette: BgPalette,
    pub hofs: u16,
    pub vofs: u16,
}

impl RegularBg {
    /// Builds a background whose map center is at the screen center.
    ///
    /// # Panics
    /// If `screen_blocks` is empty.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(tiles: TileMemory, screen_blocks: Vec<ScreenBlock>, palette: BgPalette) -> Self {
        assert!(!screen_blocks.is_empty(), "a background needs a map");

        Self {
            tiles,
            screen_blocks,
            screen_block: 0,
            palette,
            hofs: ((MAP_PIXELS - LCD_WIDTH) / 2) as u16,
            vofs: ((MAP_PIXELS - LCD_HEIGHT) / 2) as u16,
        }
    }

    #[must_use]
    pub const fn tiles(&self) -> &TileMemory {
        &self.tiles
    }

    pub const fn tiles_mut(&mut self) -> &mut TileMemory {
        &mut self.tiles
    }

    #[must_use]
    pub fn screen_block(&self, index: usize) -> &ScreenBlock {
        &self.screen_blocks[index]
    }

    /// Index of the screen block being displayed.
    #[must_use]
    pub const fn shown_screen_block(&self) -> usize {
        self.screen_block
    }

    /// # Panics
    /// If `index` is not an allocated screen block.
    pub fn show_screen_block(&mut self, index: usize) {
        assert!(index < self.screen_blocks.len(), "no screen block {index}");
        self.screen_block = index;
    }

    #[must_use]
    pub const fn palette(&self) -> &BgPalette {
        &self.palette
    }

    pub const fn palette_mut(&mut self) -> &mut BgPalette {
        &mut self.palette
    }

    /// Palette index of the pixel at screen position `(x, y)`, `0` is transparent.
    #[must_use]
    #[allow(clippy::similar_names)]
    pub fn palette_index(&self, x: usize, y: usize) -> usize {
        // Apply scrolling offset
        let scroll_x = (x + self.hofs as usize) % MAP_PIXELS;
        let scroll_y = (y + self.vofs as usize) % MAP_PIXELS;

        let cell = self.screen_blocks[self.screen_block]
            .cell(scroll_x / TILE_SIZE, scroll_y / TILE_SIZE);

        let pixel_x = scroll_x % TILE_SIZE;
        let pixel_y = scroll_y % TILE_SIZE;
        let pixel_x = if cell.horizontal_flip() {
            TILE_SIZE - 1 - pixel_x
        } else {
            pixel_x
        };
        let pixel_y = if cell.vertical_flip() {
            TILE_SIZE - 1 - pixel_y
        } else {
            pixel_y
        };

        // Cells past the allocated tiles read as transparent.
        let offset = cell.tile_index() * TILE_8BPP_BYTES + pixel_y * TILE_ROW_BYTES + pixel_x;
        self.tiles
            .as_slice()
            .get(offset)
            .copied()
            .map_or(0, usize::from)
    }

    /// Color of the pixel at screen position `(x, y)`, `None` when transparent.
    #[must_use]
    pub fn render(&self, x: usize, y: usize) -> Option<Color> {
        match self.palette_index(x, y) {
            0 => None,
            index => Some(self.palette.color(index)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::map_cell::MapCell;

    fn single_tile_bg() -> RegularBg {
        let mut tiles = TileMemory::allocate(4);
        // Tile 1: pixel (x, y) holds 8 * y + x.
        for (i, byte) in tiles.as_mut_slice()[TILE_8BPP_BYTES..].iter_mut().enumerate() {
            *byte = i as u8;
        }

        let mut block = ScreenBlock::default();
        block.set_cell(0, 0, MapCell::new(1));
        block.set_cell(1, 0, MapCell::new(1).with_flips(true, true));

        let mut palette = BgPalette::default();
        palette.set_colors(&(0..64).map(Color).collect::<Vec<_>>());

        let mut bg = RegularBg::new(tiles, vec![block], palette);
        bg.hofs = 0;
        bg.vofs = 0;
        bg
    }

    #[test]
    fn centered_by_default() {
        let bg = RegularBg::new(
            TileMemory::allocate(2),
            vec![ScreenBlock::default()],
            BgPalette::default(),
        );
        assert_eq!(bg.hofs, 8);
        assert_eq!(bg.vofs, 48);
    }

    #[test]
    fn reads_8bpp_pixels() {
        let bg = single_tile_bg();
        assert_eq!(bg.palette_index(3, 2), 8 * 2 + 3);
        assert_eq!(bg.render(3, 2), Some(Color(19)));

        // Tile 0 is blank.
        assert_eq!(bg.render(20, 20), None);
    }

    #[test]
    fn applies_flips() {
        let bg = single_tile_bg();
        assert_eq!(bg.palette_index(8, 0), 63);
        assert_eq!(bg.palette_index(14, 7), 1);
    }

    #[test]
    fn cells_past_the_tiles_are_transparent() {
        let mut bg = single_tile_bg();
        let mut block = ScreenBlock::default();
        block.set_cell(0, 0, MapCell::new(5));
        bg.screen_blocks = vec![block];
        assert_eq!(bg.palette_index(3, 3), 0);
        assert_eq!(bg.render(3, 3), None);
    }

    #[test]
    fn scroll_wraps_around_the_map() {
        let mut bg = single_tile_bg();
        bg.hofs = 255;
        bg.vofs = 255;
        assert_eq!(bg.palette_index(4, 3), 8 * 2 + 3);
    }
}
