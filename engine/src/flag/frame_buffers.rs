//! The two frame buffers holding displaced copies of the flag.
//!
//! Each buffer is `FLAG_WIDTH_TILES` column strips of `STRIP_TILES` 8bpp
//! tiles. Buffer `s` starts at 8bpp tile `1 + s * FLAG_TILES_NEEDED`, tile 0 is
//! left blank for the empty map cells. Every buffer has its own screen block
//! mapping the strips back to their place on screen, so showing a buffer is
//! just a screen block switch.

use tracing::{debug, trace};

use crate::hardware::background::RegularBg;
use crate::hardware::map_cell::{MapCell, ScreenBlock};
use crate::hardware::palette::BgPalette;
use crate::hardware::sin_lut::SinLookup;
use crate::hardware::tiles::{TILE_8BPP_BYTES, TILE_ROW_BYTES, TILE_SIZE, TileMemory, unit_offset};

use super::asset::ImageAsset;
use super::strip::copy_vertical_tile_strip_8bpp;
use super::waveform::Waveform;
use super::{
    FLAG_HEIGHT_TILES, FLAG_OFFSET_X, FLAG_OFFSET_Y, FLAG_TILES_NEEDED, FLAG_WIDTH_TILES,
    STRIP_TILES,
};

/// Bytes in one column strip.
pub const STRIP_BYTES: usize = STRIP_TILES * TILE_8BPP_BYTES;

/// Pixel rows in one column strip.
pub const STRIP_ROWS: usize = STRIP_TILES * TILE_SIZE;

/// Bytes in one frame buffer.
pub const SLOT_BYTES: usize = FLAG_TILES_NEEDED * TILE_8BPP_BYTES;

/// Tile memory to allocate, in 4bpp units: both buffers plus the blank tile.
/// The 2 is there because an 8bpp tile takes two 4bpp units.
pub const TILE_UNITS_NEEDED: usize = 2 * (2 * FLAG_TILES_NEEDED + 1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Front,
    Back,
}

impl Slot {
    /// The slot shown at `frame` in a run without image swaps.
    #[cfg(test)]
    pub(crate) const fn for_frame(frame: u32) -> Self {
        if frame & 1 == 0 { Self::Front } else { Self::Back }
    }

    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Front => 0,
            Self::Back => 1,
        }
    }

    /// First 8bpp tile of the slot.
    const fn first_tile(self) -> usize {
        1 + FLAG_TILES_NEEDED * self.index()
    }
}

/// Owns the flag background: both frame buffers, their screen blocks and the
/// palette.
pub struct FrameBuffers {
    bg: RegularBg,
    active: Slot,
}

impl FrameBuffers {
    /// Allocates the tiles of both buffers and maps them on screen, centered.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn allocate() -> Self {
        let tiles = TileMemory::allocate(TILE_UNITS_NEEDED);

        let screen_blocks = [Slot::Front, Slot::Back]
            .into_iter()
            .map(|slot| {
                let mut block = ScreenBlock::default();
                block.fill(MapCell::default());

                for x in 0..FLAG_WIDTH_TILES {
                    for y in 0..STRIP_TILES {
                        let tile_x = FLAG_OFFSET_X + x;
                        let tile_y = FLAG_OFFSET_Y + y - 1;
                        let tile_index = slot.first_tile() + STRIP_TILES * x + y;
                        block.set_cell(tile_x, tile_y, MapCell::new(tile_index as u16));
                    }
                }

                block
            })
            .collect();

        debug!(
            tiles = 2 * FLAG_TILES_NEEDED + 1,
            "flag frame buffers allocated"
        );

        Self {
            bg: RegularBg::new(tiles, screen_blocks, BgPalette::default()),
            active: Slot::Front,
        }
    }

    /// Writes `image` displaced for `frame` into `slot` and takes its palette.
    ///
    /// # Panics
    /// If the image geometry is not the flag's.
    pub fn load<L: SinLookup>(
        &mut self,
        wave: &Waveform<L>,
        image: &ImageAsset,
        frame: u32,
        slot: Slot,
    ) {
        assert_eq!(
            (image.width_tiles(), image.height_tiles()),
            (FLAG_WIDTH_TILES, FLAG_HEIGHT_TILES),
            "image `{}` doesn't have the flag size",
            image.name()
        );

        let slot_data = self.slot_mut(slot);
        for (x, strip) in slot_data.chunks_exact_mut(STRIP_BYTES).enumerate() {
            strip.fill(0);

            // One padding tile down, then moved by the displacement in rows.
            let disp = wave.displacement(column_x(x), frame);
            let first_row = TILE_SIZE.saturating_add_signed(disp as isize);

            copy_vertical_tile_strip_8bpp(
                &mut strip[first_row * TILE_ROW_BYTES..],
                image.tiles(),
                &image.map()[x..],
                image.width_tiles(),
                FLAG_HEIGHT_TILES,
            );
        }

        self.bg.palette_mut().set_colors(image.palette());
        debug!(image = image.name(), frame, ?slot, "image loaded");
    }

    /// Builds frame `frame + 1` in the hidden slot out of frame `frame` in the
    /// active one. The active slot is only read.
    pub fn advance<L: SinLookup>(&mut self, wave: &Waveform<L>, frame: u32) {
        let source = self.active;
        let [front, back] = self.slots_mut();
        let (src, dst) = match source {
            Slot::Front => (&*front, back),
            Slot::Back => (&*back, front),
        };

        for (x, (src_column, dst_column)) in src
            .chunks_exact(STRIP_BYTES)
            .zip(dst.chunks_exact_mut(STRIP_BYTES))
            .enumerate()
        {
            let delta = wave.delta(column_x(x), frame);
            shift_rows(src_column, dst_column, delta);
        }

        trace!(frame, from = ?source, "frame advanced");
    }

    /// Shows `slot` on the next refresh.
    pub fn present(&mut self, slot: Slot) {
        self.active = slot;
        self.bg.show_screen_block(slot.index());
    }

    #[must_use]
    pub const fn active(&self) -> Slot {
        self.active
    }

    #[must_use]
    pub const fn background(&self) -> &RegularBg {
        &self.bg
    }

    #[must_use]
    pub fn slot(&self, slot: Slot) -> &[u8] {
        let start = unit_offset(2 * slot.first_tile());
        &self.bg.tiles().as_slice()[start..start + SLOT_BYTES]
    }

    /// Strip of image column `x` in `slot`.
    #[must_use]
    pub fn column(&self, slot: Slot, x: usize) -> &[u8] {
        &self.slot(slot)[x * STRIP_BYTES..(x + 1) * STRIP_BYTES]
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut [u8] {
        let [front, back] = self.slots_mut();
        match slot {
            Slot::Front => front,
            Slot::Back => back,
        }
    }

    fn slots_mut(&mut self) -> [&mut [u8]; 2] {
        let data = self.bg.tiles_mut().as_mut_slice();
        let (_blank, slots) = data.split_at_mut(unit_offset(2 * Slot::Front.first_tile()));
        let (front, back) = slots.split_at_mut(SLOT_BYTES);
        [front, &mut back[..SLOT_BYTES]]
    }
}

/// Pixel x of the left edge of image column `x`.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const fn column_x(x: usize) -> i32 {
    (x * TILE_SIZE) as i32
}

/// Copies `src` into `dst` moved down by `delta` pixel rows (up when negative).
///
/// Rows that fall outside the strip are dropped and the rows left uncovered
/// are cleared, the copy never leaves the strip.
fn shift_rows(src: &[u8], dst: &mut [u8], delta: i32) {
    let len = src.len();
    let shift = (delta.unsigned_abs() as usize * TILE_ROW_BYTES).min(len);

    if delta >= 0 {
        let (uncovered, rest) = dst.split_at_mut(shift);
        rest.copy_from_slice(&src[..len - shift]);
        uncovered.fill(0);
    } else {
        let (rest, uncovered) = dst.split_at_mut(len - shift);
        rest.copy_from_slice(&src[shift..]);
        uncovered.fill(0);
    }
}
