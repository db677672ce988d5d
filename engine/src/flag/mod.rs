//! The waving flag effect.
//!
//! The flag image is kept in tile memory as one vertical strip of tiles per
//! image column, each with a blank padding tile above and below. Moving a
//! column up or down by a few pixels is then a single copy of the strip shifted
//! by whole 8 byte rows, no per pixel work is needed.
//!
//! Two copies of the flag are kept (the front and back frame buffers). Every
//! tick the hidden copy is rebuilt from the shown one shifted by how much each
//! column's displacement changes, then the two are flipped.
//!
//! ```text
//! tile memory (8bpp tiles)
//! ┌───┬──────────────────────────────┬──────────────────────────────┐
//! │ 0 │ front: 24 strips x 18 tiles  │ back: 24 strips x 18 tiles   │
//! └───┴──────────────────────────────┴──────────────────────────────┘
//!  blank
//! ```

pub mod artwork;
pub mod asset;
pub mod builder;
pub mod flags_bg;
pub mod frame_buffers;
pub mod snapshot;
pub mod strip;
pub mod waveform;

use crate::hardware::map_cell::SCREEN_BLOCK_SIZE;
use crate::hardware::tiles::TILE_SIZE;

// Flag dimensions
pub const FLAG_WIDTH_PIXELS: usize = 192;
pub const FLAG_HEIGHT_PIXELS: usize = 128;
pub const FLAG_WIDTH_TILES: usize = FLAG_WIDTH_PIXELS / TILE_SIZE;
pub const FLAG_HEIGHT_TILES: usize = FLAG_HEIGHT_PIXELS / TILE_SIZE;

// The flag is centered in the 32x32 map
pub const FLAG_OFFSET_X: usize = (SCREEN_BLOCK_SIZE - FLAG_WIDTH_TILES) / 2;
pub const FLAG_OFFSET_Y: usize = (SCREEN_BLOCK_SIZE - FLAG_HEIGHT_TILES) / 2;

/// Tiles in a column strip, the column plus one padding tile on each end.
pub const STRIP_TILES: usize = FLAG_HEIGHT_TILES + 2;

/// Tiles in one frame buffer.
pub const FLAG_TILES_NEEDED: usize = FLAG_WIDTH_TILES * STRIP_TILES;

// Wave shape
pub const WAVE_VERTICAL_AMPLITUDE: i32 = 4;
pub const WAVE_HORIZONTAL_PERIOD: i32 = 128;
pub const WAVE_HORIZONTAL_MULTIPLIER: i32 = 2048 / WAVE_HORIZONTAL_PERIOD;

pub use asset::{AssetError, ImageAsset, ImageCatalog};
pub use flags_bg::FlagsBg;
pub use frame_buffers::{FrameBuffers, Slot};
pub use snapshot::{Snapshot, SnapshotError};
pub use waveform::Waveform;
