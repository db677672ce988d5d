use std::sync::{Arc, Mutex};

use egui::Color32;

use engine::hardware::color::Color;
use engine::hardware::palette::MAX_COLORS_SINGLE_PALETTE;

use crate::flag_thread::FlagHandle;
use crate::gba_color::GbaColor;
use crate::ui_traits::UiTool;

/// Palette RAM start of the BG palette.
const BG_PALETTE_ADDRESS: u32 = 0x0500_0000;

/// The background palette as a 16x16 grid, one row per bank.
pub struct PaletteVisualizer {
    flag_handle: Arc<Mutex<FlagHandle>>,
    palette: Vec<Color>,
}

impl PaletteVisualizer {
    pub const fn new(flag_handle: Arc<Mutex<FlagHandle>>) -> Self {
        Self {
            flag_handle,
            palette: Vec::new(),
        }
    }
}

impl UiTool for PaletteVisualizer {
    fn name(&self) -> &'static str {
        "Palette Visualizer"
    }

    fn show(&mut self, ctx: &egui::Context, open: &mut bool) {
        egui::Window::new(self.name())
            .default_width(320.0)
            .default_height(500.0)
            .open(open)
            .show(ctx, |ui| {
                self.ui(ui);
            });
    }

    #[allow(clippy::cast_possible_truncation)]
    fn ui(&mut self, ui: &mut egui::Ui) {
        if let Ok(handle) = self.flag_handle.lock() {
            self.palette.clone_from(&handle.state.palette);
        }

        ui.label("BG Palette");

        egui::Grid::new("bg_palette")
            .striped(true)
            .spacing([2.0, 2.0])
            .show(ui, |ui| {
                ui.label("Address");
                for i in 0..MAX_COLORS_SINGLE_PALETTE {
                    ui.label(format!("{i:X}"));
                }
                ui.end_row();

                for (bank, colors) in self.palette.chunks(MAX_COLORS_SINGLE_PALETTE).enumerate() {
                    // 16 colors, every color is 2 bytes
                    let address =
                        BG_PALETTE_ADDRESS + (bank * MAX_COLORS_SINGLE_PALETTE * 2) as u32;
                    ui.label(format!("0x{address:08X}"));

                    for color in colors {
                        let color32: Color32 = GbaColor(*color).into();
                        ui.add(egui::Button::new("    ").fill(color32))
                            .on_hover_text(format!("0x{:04X}", color.0));
                    }
                    ui.end_row();
                }
            });
    }
}
