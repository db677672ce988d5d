//! The two flag images, drawn procedurally at the flag size.
//!
//! Palette index 0 is the backdrop and is never drawn, so every flag pixel is
//! opaque and blank tile memory stays distinguishable from the flag.

use tracing::debug;

use crate::hardware::color::Color;

use super::asset::{AssetError, ImageAsset, ImageCatalog};
use super::builder::from_bitmap;
use super::{FLAG_HEIGHT_PIXELS, FLAG_WIDTH_PIXELS};

pub const BRAZIL: &str = "br";
pub const UNITED_STATES: &str = "us";

struct Canvas {
    pixels: Vec<u8>,
}

impl Canvas {
    fn new(background: u8) -> Self {
        Self {
            pixels: vec![background; FLAG_WIDTH_PIXELS * FLAG_HEIGHT_PIXELS],
        }
    }

    /// Paints `color` where `inside` holds, tested at pixel centers.
    #[allow(clippy::cast_precision_loss)]
    fn paint(&mut self, color: u8, inside: impl Fn(f32, f32) -> bool) {
        for (i, pixel) in self.pixels.iter_mut().enumerate() {
            let x = (i % FLAG_WIDTH_PIXELS) as f32 + 0.5;
            let y = (i / FLAG_WIDTH_PIXELS) as f32 + 0.5;
            if inside(x, y) {
                *pixel = color;
            }
        }
    }

    /// Small plus shaped star.
    fn star(&mut self, x: usize, y: usize, color: u8) {
        let points = [(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)];
        for (dx, dy) in points {
            let (Some(px), Some(py)) = (x.checked_add_signed(dx), y.checked_add_signed(dy)) else {
                continue;
            };
            if px < FLAG_WIDTH_PIXELS && py < FLAG_HEIGHT_PIXELS {
                self.pixels[py * FLAG_WIDTH_PIXELS + px] = color;
            }
        }
    }
}

/// # Errors
/// Never in practice, the drawing always fits the flag geometry.
pub fn brazil() -> Result<ImageAsset, AssetError> {
    const GREEN: u8 = 1;
    const YELLOW: u8 = 2;
    const BLUE: u8 = 3;
    const WHITE: u8 = 4;

    let (cx, cy) = (96.0_f32, 64.0_f32);
    let mut canvas = Canvas::new(GREEN);

    canvas.paint(YELLOW, |x, y| {
        (x - cx).abs() / 82.0 + (y - cy).abs() / 54.0 <= 1.0
    });
    canvas.paint(BLUE, |x, y| (x - cx).hypot(y - cy) <= 33.0);

    // Motto band, an arc across the globe.
    canvas.paint(WHITE, |x, y| {
        let on_globe = (x - cx).hypot(y - cy) <= 33.0;
        let band = (x - (cx - 8.0)).hypot(y - (cy + 64.0));
        on_globe && (68.0..=73.0).contains(&band)
    });

    let stars = [
        (86, 74),
        (92, 82),
        (100, 78),
        (106, 86),
        (96, 90),
        (80, 84),
        (112, 76),
        (90, 70),
        (102, 70),
        (84, 92),
    ];
    for (x, y) in stars {
        canvas.star(x, y, WHITE);
    }

    let palette = vec![
        Color::from_rgb888(0x18, 0x18, 0x20),
        Color::from_rgb888(0x00, 0x9C, 0x3B),
        Color::from_rgb888(0xFF, 0xDF, 0x00),
        Color::from_rgb888(0x00, 0x27, 0x76),
        Color::from_rgb888(0xFF, 0xFF, 0xFF),
    ];

    from_bitmap(
        BRAZIL,
        FLAG_WIDTH_PIXELS,
        FLAG_HEIGHT_PIXELS,
        &canvas.pixels,
        palette,
    )
}

/// # Errors
/// Never in practice, the drawing always fits the flag geometry.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn united_states() -> Result<ImageAsset, AssetError> {
    const RED: u8 = 1;
    const WHITE: u8 = 2;
    const BLUE: u8 = 3;

    const STRIPES: f32 = 13.0;
    let stripe_height = FLAG_HEIGHT_PIXELS as f32 / STRIPES;
    let canton_width = FLAG_WIDTH_PIXELS as f32 * 0.4;
    let canton_height = stripe_height * 7.0;

    let mut canvas = Canvas::new(RED);
    canvas.paint(WHITE, |_, y| {
        let stripe = (y / stripe_height) as u32;
        stripe % 2 == 1
    });
    canvas.paint(BLUE, |x, y| x < canton_width && y < canton_height);

    // 50 stars, rows of 6 and 5 alternating.
    for row in 0..9 {
        let y = 7 * row + 6;
        let (first, count) = if row % 2 == 0 { (6, 6) } else { (12, 5) };
        for column in 0..count {
            canvas.star(first + 13 * column, y, WHITE);
        }
    }

    let palette = vec![
        Color::from_rgb888(0x18, 0x18, 0x20),
        Color::from_rgb888(0xB2, 0x22, 0x34),
        Color::from_rgb888(0xFF, 0xFF, 0xFF),
        Color::from_rgb888(0x3C, 0x3B, 0x6E),
    ];

    from_bitmap(
        UNITED_STATES,
        FLAG_WIDTH_PIXELS,
        FLAG_HEIGHT_PIXELS,
        &canvas.pixels,
        palette,
    )
}

/// Both flags, Brazil first.
///
/// # Errors
/// If a flag fails to build.
pub fn default_catalog() -> Result<ImageCatalog, AssetError> {
    let images = vec![brazil()?, united_states()?];
    for image in &images {
        debug!(
            image = image.name(),
            tiles = image.tiles_count(),
            "flag artwork built"
        );
    }
    ImageCatalog::new(images)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::flag::{FLAG_HEIGHT_TILES, FLAG_WIDTH_TILES};

    #[test]
    fn catalog_order() {
        let catalog = default_catalog().unwrap();
        let names: Vec<_> = catalog.iter().map(|image| image.name().to_owned()).collect();
        assert_eq!(names, vec![BRAZIL.to_owned(), UNITED_STATES.to_owned()]);
    }

    #[test]
    fn flag_geometry() {
        for image in default_catalog().unwrap().iter() {
            assert_eq!(image.width_tiles(), FLAG_WIDTH_TILES);
            assert_eq!(image.height_tiles(), FLAG_HEIGHT_TILES);
            assert_eq!(image.map().len(), FLAG_WIDTH_TILES * FLAG_HEIGHT_TILES);
        }
    }

    #[test]
    fn backdrop_is_never_drawn() {
        for image in default_catalog().unwrap().iter() {
            assert!(image.tiles().iter().all(|p| *p != 0), "{}", image.name());
            let colors = image.palette().len();
            assert!(image.tiles().iter().all(|p| usize::from(*p) < colors));
        }
    }

    #[test]
    fn flat_areas_share_tiles() {
        let us = united_states().unwrap();
        assert!(us.tiles_count() < FLAG_WIDTH_TILES * FLAG_HEIGHT_TILES);
    }
}
