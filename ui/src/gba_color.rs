use egui::Color32;

use engine::hardware::color::Color;

pub struct GbaColor(pub Color);

impl From<GbaColor> for Color32 {
    fn from(gba_color: GbaColor) -> Self {
        let [red, green, blue] = gba_color.0.to_rgb888();
        Self::from_rgb(red, green, blue)
    }
}

impl From<Color32> for GbaColor {
    fn from(color_u32: Color32) -> Self {
        Self(Color::from_rgb(
            color_u32.r() >> 3,
            color_u32.g() >> 3,
            color_u32.b() >> 3,
        ))
    }
}
