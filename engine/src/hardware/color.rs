use crate::bitwise::Bits;

/// A 15-bit BGR color as stored in palette RAM.
///
/// ```text
/// red ---> [0 - 31]    0-4 bit
/// green -> [0 - 31]    5-9 bit
/// blue --> [0 - 31]    10-14 bit
/// unused ->            15 bit
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u16);

impl Color {
    #[must_use]
    pub const fn from_palette_color(value: u16) -> Self {
        Self(value & 0x7FFF)
    }

    /// Builds a color from 5-bit channels.
    #[must_use]
    pub fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        let mut value = 0_u16;
        value.set_bits(0..=4, red.into());
        value.set_bits(5..=9, green.into());
        value.set_bits(10..=14, blue.into());
        Self(value)
    }

    /// Builds a color from 8-bit channels, dropping the 3 low bits of each.
    #[must_use]
    pub fn from_rgb888(red: u8, green: u8, blue: u8) -> Self {
        Self::from_rgb(red >> 3, green >> 3, blue >> 3)
    }

    #[must_use]
    pub fn red(&self) -> u8 {
        self.0.get_bits(0..=4) as u8
    }

    #[must_use]
    pub fn green(&self) -> u8 {
        self.0.get_bits(5..=9) as u8
    }

    #[must_use]
    pub fn blue(&self) -> u8 {
        self.0.get_bits(10..=14) as u8
    }

    /// Expands to 8-bit channels, replicating the high bits into the low ones
    /// so that 31 maps to 255.
    #[must_use]
    pub fn to_rgb888(&self) -> [u8; 3] {
        let expand = |c: u8| (c << 3) | (c >> 2);
        [expand(self.red()), expand(self.green()), expand(self.blue())]
    }
}

impl From<u16> for Color {
    fn from(value: u16) -> Self {
        Self::from_palette_color(value)
    }
}

impl From<Color> for u16 {
    fn from(color: Color) -> Self {
        color.0
    }
}

pub mod colors {
    use super::Color;

    pub const BLACK: Color = Color(0);
    pub const WHITE: Color = Color(0x7FFF);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rgb() {
        let color = Color::from_rgb(8, 4, 2);
        assert_eq!(color.0, 0b0000_1000_1000_1000);
        assert_eq!(color.red(), 8);
        assert_eq!(color.green(), 4);
        assert_eq!(color.blue(), 2);
    }

    #[test]
    fn unused_bit_is_dropped() {
        assert_eq!(Color::from(0xFFFF), colors::WHITE);
    }

    #[test]
    fn rgb888_round_trip_is_lossless_on_5_bit_values() {
        assert_eq!(colors::WHITE.to_rgb888(), [255, 255, 255]);
        assert_eq!(colors::BLACK.to_rgb888(), [0, 0, 0]);

        let green = Color::from_rgb888(0, 156, 59);
        let [r, g, b] = green.to_rgb888();
        assert_eq!(Color::from_rgb888(r, g, b), green);
    }
}
