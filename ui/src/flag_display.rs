use std::sync::{Arc, Mutex};

use eframe::epaint::textures::TextureOptions;
use egui::load::SizedTexture;
use egui::{self, ColorImage, ImageSource, Ui};

use engine::hardware::lcd::{LCD_HEIGHT, LCD_WIDTH};

use crate::flag_thread::FlagHandle;
use crate::ui_traits::UiTool;

/// The LCD output of the animation thread.
pub struct FlagDisplay {
    flag_handle: Arc<Mutex<FlagHandle>>,
    texture: Option<egui::TextureHandle>,
}

impl FlagDisplay {
    pub(crate) const fn new(flag_handle: Arc<Mutex<FlagHandle>>) -> Self {
        Self {
            flag_handle,
            texture: None,
        }
    }
}

impl UiTool for FlagDisplay {
    fn name(&self) -> &'static str {
        "Flag Display"
    }

    #[allow(clippy::cast_precision_loss)]
    fn show(&mut self, ctx: &egui::Context, open: &mut bool) {
        egui::Window::new(self.name())
            .open(open)
            .default_width(2.0 * LCD_WIDTH as f32)
            .default_height(2.0 * LCD_HEIGHT as f32)
            .collapsible(false)
            .show(ctx, |ui| {
                self.ui(ui);
            });
    }

    fn ui(&mut self, ui: &mut Ui) {
        let frame = self
            .flag_handle
            .lock()
            .ok()
            .and_then(|mut handle| handle.frame.take());

        if let Some(rgb_data) = frame {
            let image = ColorImage::from_rgb([LCD_WIDTH, LCD_HEIGHT], &rgb_data);
            match &mut self.texture {
                Some(texture) => texture.set(image, TextureOptions::NEAREST),
                None => {
                    let texture = ui
                        .ctx()
                        .load_texture("flag_display", image, TextureOptions::NEAREST);
                    self.texture = Some(texture);
                }
            }
        }

        if let Some(texture) = &self.texture {
            ui.image(ImageSource::Texture(SizedTexture {
                id: texture.id(),
                size: ui.available_size(),
            }));
        } else {
            ui.label("Waiting for the first frame...");
        }
    }
}
