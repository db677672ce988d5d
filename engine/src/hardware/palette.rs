//! Background palette RAM.
//!
//! 8bpp backgrounds use the 256 colors as a single palette. Index 0 is the
//! transparent entry; the LCD shows it as the backdrop color.

use super::color::Color;

/// BG palettes can be used as a single 256 color palette.
pub const MAX_COLORS_FULL_PALETTE: usize = 256;

/// Each 4bpp palette bank holds 16 colors.
pub const MAX_COLORS_SINGLE_PALETTE: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BgPalette {
    colors: Vec<Color>,
}

impl Default for BgPalette {
    fn default() -> Self {
        Self {
            colors: vec![Color::default(); MAX_COLORS_FULL_PALETTE],
        }
    }
}

impl BgPalette {
    /// Replaces the palette contents with `colors`.
    ///
    /// Entries past `colors.len()` are cleared so nothing of the previous
    /// image survives a swap.
    pub fn set_colors(&mut self, colors: &[Color]) {
        let count = colors.len().min(MAX_COLORS_FULL_PALETTE);
        self.colors[..count].copy_from_slice(&colors[..count]);
        self.colors[count..].fill(Color::default());
    }

    #[must_use]
    pub fn color(&self, index: usize) -> Color {
        self.colors[index]
    }

    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}
