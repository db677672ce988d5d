//! LCD output and refresh pacing.
//!
//! The LCD is 240x160 pixels. A full frame (visible lines plus VBlank) takes
//! 228 lines x 308 dots x 4 cycles = 280,896 cycles at 16.78 MHz, about 59.73 Hz.

use std::thread;
use std::time::{Duration, Instant};

use super::background::RegularBg;
use super::color::Color;

/// GBA display width
pub const LCD_WIDTH: usize = 240;

/// GBA display height
pub const LCD_HEIGHT: usize = 160;

const CPU_FREQUENCY_HZ: u64 = 16_777_216;
const CYCLES_PER_FRAME: u64 = 280_896;

/// Duration of one display refresh.
pub const FRAME_DURATION: Duration =
    Duration::from_nanos(CYCLES_PER_FRAME * 1_000_000_000 / CPU_FREQUENCY_HZ);

pub struct Lcd {
    pub buffer: Box<[[Color; LCD_WIDTH]; LCD_HEIGHT]>,
}

impl Default for Lcd {
    fn default() -> Self {
        Self {
            buffer: Box::new([[Color::default(); LCD_WIDTH]; LCD_HEIGHT]),
        }
    }
}

impl Lcd {
    /// Draws `bg` over the backdrop (palette color 0).
    pub fn render(&mut self, bg: &RegularBg) {
        let backdrop = bg.palette().color(0);
        for (y, row) in self.buffer.iter_mut().enumerate() {
            for (x, pixel) in row.iter_mut().enumerate() {
                *pixel = bg.render(x, y).unwrap_or(backdrop);
            }
        }
    }

    /// The frame as packed `[R, G, B]` bytes, row by row.
    #[must_use]
    pub fn to_rgb888(&self) -> Vec<u8> {
        self.buffer
            .iter()
            .flat_map(|row| row.iter().flat_map(Color::to_rgb888))
            .collect()
    }
}

/// Paces a loop to the display refresh rate.
pub struct VBlank {
    next: Instant,
}

impl Default for VBlank {
    fn default() -> Self {
        Self::new()
    }
}

impl VBlank {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next: Instant::now() + FRAME_DURATION,
        }
    }

    /// Blocks until the next refresh is due.
    ///
    /// When the caller fell behind by more than a frame the schedule is reset
    /// instead of trying to catch up.
    pub fn wait_for_vblank(&mut self) {
        let now = Instant::now();
        if let Some(remaining) = self.next.checked_duration_since(now) {
            thread::sleep(remaining);
            self.next += FRAME_DURATION;
        } else {
            self.next = now + FRAME_DURATION;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::map_cell::{MapCell, ScreenBlock};
    use crate::hardware::palette::BgPalette;
    use crate::hardware::tiles::{TILE_8BPP_BYTES, TileMemory};

    #[test]
    fn refresh_rate() {
        let hz = 1.0 / FRAME_DURATION.as_secs_f64();
        assert!((hz - 59.73).abs() < 0.01, "{hz}");
    }

    #[test]
    fn backdrop_and_tile_pixels() {
        let mut tiles = TileMemory::allocate(4);
        tiles.as_mut_slice()[TILE_8BPP_BYTES..].fill(1);

        // Map cell (1, 6) is the screen's top-left tile with the default scroll.
        let mut block = ScreenBlock::default();
        block.set_cell(1, 6, MapCell::new(1));

        let mut palette = BgPalette::default();
        let backdrop = Color::from_rgb(1, 2, 3);
        let solid = Color::from_rgb(31, 0, 0);
        palette.set_colors(&[backdrop, solid]);

        let mut lcd = Lcd::default();
        lcd.render(&RegularBg::new(tiles, vec![block], palette));

        assert_eq!(lcd.buffer[0][0], solid);
        assert_eq!(lcd.buffer[7][7], solid);
        assert_eq!(lcd.buffer[8][8], backdrop);

        let rgb = lcd.to_rgb888();
        assert_eq!(rgb.len(), LCD_WIDTH * LCD_HEIGHT * 3);
        assert_eq!(&rgb[..3], &[255, 0, 0]);
    }
}
