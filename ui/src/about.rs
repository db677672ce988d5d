use crate::ui_traits::UiTool;

#[derive(Default)]
pub struct About {}

impl UiTool for About {
    fn name(&self) -> &'static str {
        "About Flagwave"
    }

    fn show(&mut self, ctx: &egui::Context, open: &mut bool) {
        egui::Window::new(self.name())
            .default_width(300.0)
            .default_pos(egui::pos2(450.0, 10.0))
            .open(open)
            .show(ctx, |ui| {
                self.ui(ui);
            });
    }

    fn ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("🏁 Flagwave");
        ui.add_space(4.0);
        ui.label(
            "A flag waving on a GBA-style 8bpp tiled background.\n\
             Every frame each column of tiles is shifted up or down\n\
             between two frame buffers, following a sine wave.",
        );
        ui.add_space(8.0);
        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
    }
}
