//! Sine lookup table over a 2048 unit circle.
//!
//! Values are fixed point with 12 fractional bits, so `4096` is `1.0`.

use std::f64::consts::TAU;

/// Angle units in a full turn.
pub const LUT_ANGLES: usize = 2048;

/// Fractional bits of the looked up values.
pub const FIXED_PRECISION: u32 = 12;

/// `1.0` in the table's fixed point format.
pub const FIXED_ONE: i32 = 1 << FIXED_PRECISION;

/// Source of sine values for the ripple.
pub trait SinLookup {
    /// Sine of `angle`, which must be in `[0, LUT_ANGLES)`.
    fn lut_sin(&self, angle: usize) -> i32;
}

/// Precomputed table, built once at startup.
pub struct SinLut {
    values: Box<[i16]>,
}

impl Default for SinLut {
    fn default() -> Self {
        Self::new()
    }
}

impl SinLut {
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn new() -> Self {
        let half_turn = LUT_ANGLES / 2;

        // Only the first half turn is evaluated, mirrored around its center,
        // so the table is exactly symmetric.
        let values = (0..LUT_ANGLES)
            .map(|angle| {
                let in_half = angle % half_turn;
                let folded = in_half.min(half_turn - in_half);
                let radians = TAU * folded as f64 / LUT_ANGLES as f64;
                let value = (radians.sin() * f64::from(FIXED_ONE)).round() as i16;
                if angle < half_turn { value } else { -value }
            })
            .collect();

        Self { values }
    }
}

impl SinLookup for SinLut {
    fn lut_sin(&self, angle: usize) -> i32 {
        self.values[angle].into()
    }
}

/// Rounds a fixed point value to the nearest integer, halves away from zero.
#[must_use]
pub const fn round_fixed(raw: i32) -> i32 {
    let half = FIXED_ONE / 2;
    if raw >= 0 {
        (raw + half) / FIXED_ONE
    } else {
        (raw - half) / FIXED_ONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadrants() {
        let lut = SinLut::new();
        assert_eq!(lut.lut_sin(0), 0);
        assert_eq!(lut.lut_sin(512), FIXED_ONE);
        assert_eq!(lut.lut_sin(1024), 0);
        assert_eq!(lut.lut_sin(1536), -FIXED_ONE);
    }

    #[test]
    fn odd_symmetry() {
        let lut = SinLut::new();
        for angle in 1..LUT_ANGLES {
            assert_eq!(lut.lut_sin(angle), -lut.lut_sin(LUT_ANGLES - angle));
        }
    }

    #[test]
    fn rounding() {
        assert_eq!(round_fixed(0), 0);
        assert_eq!(round_fixed(2047), 0);
        assert_eq!(round_fixed(2048), 1);
        assert_eq!(round_fixed(-2047), 0);
        assert_eq!(round_fixed(-2048), -1);
        assert_eq!(round_fixed(4 * FIXED_ONE), 4);
        assert_eq!(round_fixed(-4 * FIXED_ONE), -4);
    }
}
