use std::fmt::Debug;
use std::mem::size_of;
use std::ops::RangeInclusive;

/// Bit helpers for the packed hardware words (map cells, RGB555 colors).
///
/// Bit indexes go from lsb to msb (right to left).
pub trait Bits
where
    Self: Copy + Into<u32> + TryFrom<u32>,
    <Self as TryFrom<u32>>::Error: Debug,
{
    fn get_bit(&self, bit_idx: u8) -> bool {
        debug_assert!(usize::from(bit_idx) < size_of::<Self>() * 8);
        let value: u32 = (*self).into();
        value & (1 << bit_idx) != 0
    }

    fn get_bits(&self, bits_range: RangeInclusive<u8>) -> Self {
        let start = *bits_range.start();
        let mask = field_mask(&bits_range);
        let value: u32 = (*self).into();

        // The masked field always fits back into `Self`.
        <Self as TryFrom<u32>>::try_from((value & mask) >> start).unwrap()
    }

    fn set_bit(&mut self, bit_idx: u8, on: bool) {
        debug_assert!(usize::from(bit_idx) < size_of::<Self>() * 8);
        let mut value: u32 = (*self).into();
        if on {
            value |= 1 << bit_idx;
        } else {
            value &= !(1 << bit_idx);
        }
        *self = <Self as TryFrom<u32>>::try_from(value).unwrap();
    }

    /// Writes `field` into `bits_range`, extra high bits of `field` are dropped.
    fn set_bits(&mut self, bits_range: RangeInclusive<u8>, field: Self) {
        let start = *bits_range.start();
        let mask = field_mask(&bits_range);
        let value: u32 = (*self).into();
        let field: u32 = field.into();

        let value = (value & !mask) | ((field << start) & mask);
        *self = <Self as TryFrom<u32>>::try_from(value).unwrap();
    }
}

fn field_mask(bits_range: &RangeInclusive<u8>) -> u32 {
    let length = u32::from(bits_range.end() - bits_range.start() + 1);
    let ones = if length >= 32 {
        u32::MAX
    } else {
        (1 << length) - 1
    };

    ones << bits_range.start()
}

impl Bits for u32 {}
impl Bits for u16 {}
impl Bits for u8 {}
