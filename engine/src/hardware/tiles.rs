//! Background tile memory (character data).
//!
//! Tile storage is allocated and addressed in 4bpp tile units of 32 bytes.
//! An 8bpp tile is 64 bytes, so it takes the space of two units:
//!
//! ```text
//! 4bpp tile: 8 rows x 4 bytes  (2 pixels per byte)
//! 8bpp tile: 8 rows x 8 bytes  (1 pixel per byte)
//! ```

use tracing::debug;

/// Tiles are 8x8 pixels.
pub const TILE_SIZE: usize = 8;

/// Size of the allocation unit, one 4bpp tile.
pub const TILE_UNIT_BYTES: usize = 32;

/// Size of an 8bpp tile.
pub const TILE_8BPP_BYTES: usize = 2 * TILE_UNIT_BYTES;

/// One pixel row of an 8bpp tile.
pub const TILE_ROW_BYTES: usize = TILE_8BPP_BYTES / TILE_SIZE;

/// Allocation units taken by one 8bpp tile.
pub const UNITS_PER_8BPP_TILE: usize = TILE_8BPP_BYTES / TILE_UNIT_BYTES;

/// A zero initialized block of 8bpp tile memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMemory {
    data: Vec<u8>,
}

impl TileMemory {
    /// Reserves `units` 4bpp tile units for 8bpp tiles.
    ///
    /// # Panics
    /// If `units` can't hold a whole number of 8bpp tiles.
    #[must_use]
    pub fn allocate(units: usize) -> Self {
        assert!(
            units % UNITS_PER_8BPP_TILE == 0,
            "{units} units can't hold whole 8bpp tiles"
        );
        debug!(units, bytes = units * TILE_UNIT_BYTES, "allocating tiles");

        Self {
            data: vec![0; units * TILE_UNIT_BYTES],
        }
    }

    /// Allocated size in 4bpp units.
    #[must_use]
    pub fn units(&self) -> usize {
        self.data.len() / TILE_UNIT_BYTES
    }

    /// Number of 8bpp tiles.
    #[must_use]
    pub fn tiles_count(&self) -> usize {
        self.units() / UNITS_PER_8BPP_TILE
    }

    /// Bytes of the 8bpp tile `index`.
    #[must_use]
    pub fn tile_8bpp(&self, index: usize) -> &[u8] {
        let start = index * TILE_8BPP_BYTES;
        &self.data[start..start + TILE_8BPP_BYTES]
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

/// Byte offset of a position expressed in 4bpp units.
#[must_use]
pub const fn unit_offset(units: usize) -> usize {
    units * TILE_UNIT_BYTES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_in_units() {
        let memory = TileMemory::allocate(6);
        assert_eq!(memory.units(), 6);
        assert_eq!(memory.tiles_count(), 3);
        assert_eq!(memory.as_slice().len(), 6 * 32);
        assert!(memory.as_slice().iter().all(|b| *b == 0));
    }

    #[test]
    #[should_panic(expected = "can't hold whole")]
    fn odd_units_at_8bpp() {
        let _ = TileMemory::allocate(3);
    }

    #[test]
    fn tile_8bpp_spans_two_units() {
        let mut memory = TileMemory::allocate(4);
        memory.as_mut_slice()[unit_offset(2)] = 0xAB;
        assert_eq!(memory.tile_8bpp(1)[0], 0xAB);
        assert_eq!(memory.tile_8bpp(1).len(), TILE_8BPP_BYTES);
        assert_eq!(TILE_ROW_BYTES, 8);
    }
}
