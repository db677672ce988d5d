//! Ripple waveform: vertical displacement of an image column over time.

use crate::hardware::sin_lut::{LUT_ANGLES, SinLookup, SinLut, round_fixed};

use super::{WAVE_HORIZONTAL_MULTIPLIER, WAVE_VERTICAL_AMPLITUDE};

/// Ticks needed for the wave to travel one full period.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const WAVE_CYCLE_TICKS: u32 = (LUT_ANGLES as i32 / WAVE_HORIZONTAL_MULTIPLIER) as u32;

pub struct Waveform<L = SinLut> {
    lut: L,
}

impl Default for Waveform {
    fn default() -> Self {
        Self::new(SinLut::new())
    }
}

impl<L: SinLookup> Waveform<L> {
    pub const fn new(lut: L) -> Self {
        Self { lut }
    }

    /// Vertical offset in pixels of the image column at pixel `x` on frame `t`.
    ///
    /// The angle wraps with a mask, so negative `x - t` and frame counter
    /// overflow both land back in the table.
    #[allow(clippy::cast_sign_loss)]
    pub fn displacement(&self, x: i32, t: u32) -> i32 {
        let angle = x
            .wrapping_sub_unsigned(t)
            .wrapping_mul(WAVE_HORIZONTAL_MULTIPLIER)
            & (LUT_ANGLES as i32 - 1);

        round_fixed(WAVE_VERTICAL_AMPLITUDE * self.lut.lut_sin(angle as usize))
    }

    /// Displacement change of column `x` between frame `t` and `t + 1`.
    pub fn delta(&self, x: i32, t: u32) -> i32 {
        self.displacement(x, t.wrapping_add(1)) - self.displacement(x, t)
    }
}
