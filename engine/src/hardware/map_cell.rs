use crate::bitwise::Bits;

/// Width and height, in cells, of a screen block.
pub const SCREEN_BLOCK_SIZE: usize = 32;

/// Number of cells in a screen block (2KB, 2 bytes per entry).
pub const SCREEN_BLOCK_CELLS: usize = SCREEN_BLOCK_SIZE * SCREEN_BLOCK_SIZE;

/// A text mode tilemap entry.
///
/// ```text
/// 0-9   tile number
/// 10    horizontal flip
/// 11    vertical flip
/// 12-15 palette bank, unused by 8bpp tiles
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MapCell(pub u16);

impl MapCell {
    /// Highest tile number addressable by a cell.
    pub const MAX_TILE_INDEX: u16 = 0x3FF;

    #[must_use]
    pub fn new(tile_index: u16) -> Self {
        debug_assert!(tile_index <= Self::MAX_TILE_INDEX);
        let mut cell = Self::default();
        cell.0.set_bits(0..=9, tile_index);
        cell
    }

    #[must_use]
    pub fn with_flips(mut self, horizontal: bool, vertical: bool) -> Self {
        self.0.set_bit(10, horizontal);
        self.0.set_bit(11, vertical);
        self
    }

    #[must_use]
    pub fn tile_index(self) -> usize {
        self.0.get_bits(0..=9).into()
    }

    #[must_use]
    pub fn horizontal_flip(self) -> bool {
        self.0.get_bit(10)
    }

    #[must_use]
    pub fn vertical_flip(self) -> bool {
        self.0.get_bit(11)
    }
}

/// A 32x32 tilemap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenBlock {
    cells: Vec<MapCell>,
}

impl Default for ScreenBlock {
    fn default() -> Self {
        Self {
            cells: vec![MapCell::default(); SCREEN_BLOCK_CELLS],
        }
    }
}

impl ScreenBlock {
    #[must_use]
    pub fn cell(&self, tile_x: usize, tile_y: usize) -> MapCell {
        self.cells[SCREEN_BLOCK_SIZE * tile_y + tile_x]
    }

    pub fn set_cell(&mut self, tile_x: usize, tile_y: usize, cell: MapCell) {
        self.cells[SCREEN_BLOCK_SIZE * tile_y + tile_x] = cell;
    }

    pub fn fill(&mut self, cell: MapCell) {
        self.cells.fill(cell);
    }

    #[must_use]
    pub fn cells(&self) -> &[MapCell] {
        &self.cells
    }
}
