//! Run, pause and step the animation, switch flags, press A.

use std::sync::{Arc, Mutex};

use engine::flag::Slot;

use crate::flag_thread::{FlagCommand, FlagHandle, GbaButton};
use crate::ui_traits::UiTool;

pub struct FlagControls {
    flag_handle: Arc<Mutex<FlagHandle>>,
}

impl FlagControls {
    pub const fn new(flag_handle: Arc<Mutex<FlagHandle>>) -> Self {
        Self { flag_handle }
    }

    fn send(&self, cmd: FlagCommand) {
        if let Ok(mut handle) = self.flag_handle.lock() {
            handle.send(cmd);
        }
    }
}

impl UiTool for FlagControls {
    fn name(&self) -> &'static str {
        "Flag Controls"
    }

    fn show(&mut self, ctx: &egui::Context, open: &mut bool) {
        egui::Window::new(self.name())
            .default_width(260.0)
            .open(open)
            .default_pos(egui::pos2(10.0, 10.0))
            .show(ctx, |ui| {
                self.ui(ui);
            });
    }

    fn ui(&mut self, ui: &mut egui::Ui) {
        let Some(state) = self
            .flag_handle
            .lock()
            .ok()
            .map(|handle| handle.state.clone())
        else {
            return;
        };

        ui.horizontal(|ui| {
            if ui
                .add_enabled(!state.is_running, egui::Button::new("▶"))
                .clicked()
            {
                self.send(FlagCommand::Run);
            }

            if ui
                .add_enabled(state.is_running, egui::Button::new("⏸ "))
                .clicked()
            {
                self.send(FlagCommand::Pause);
            }

            for count in [1, 10, 60] {
                if ui.button(format!("⏭x{count}")).clicked() {
                    self.send(FlagCommand::Step(count));
                }
            }
        });

        ui.add_space(8.0);

        egui::Grid::new("flag_state").num_columns(2).show(ui, |ui| {
            ui.label("Flag:");
            ui.monospace(state.image.as_str());
            ui.end_row();

            ui.label("Frame:");
            ui.monospace(state.frame.to_string());
            ui.end_row();

            ui.label("Showing:");
            ui.monospace(match state.active_slot {
                Slot::Front => "front buffer",
                Slot::Back => "back buffer",
            });
            ui.end_row();
        });

        ui.add_space(8.0);

        if ui.button("Next flag").clicked() {
            self.send(FlagCommand::SwapImage);
        }

        ui.add_space(8.0);
        ui.separator();

        let a_held = state.key_input & (GbaButton::A as u16) == 0;
        let text = egui::RichText::new("A").color(if a_held {
            egui::Color32::WHITE
        } else {
            egui::Color32::GRAY
        });
        let fill = if a_held {
            egui::Color32::from_rgb(0, 120, 215)
        } else {
            egui::Color32::from_rgb(50, 50, 50)
        };

        ui.horizontal(|ui| {
            if ui
                .add(egui::Button::new(text).fill(fill).min_size(egui::vec2(24.0, 18.0)))
                .clicked()
            {
                self.send(FlagCommand::SetKey {
                    button: GbaButton::A,
                    pressed: !a_held,
                });
            }
            ui.small("click to toggle, or hold the A key");
        });
        ui.small(format!("KEYINPUT: 0x{:04X}", state.key_input));

        let last_error = self
            .flag_handle
            .lock()
            .ok()
            .and_then(|handle| handle.last_error.clone());
        if let Some(message) = last_error {
            ui.colored_label(egui::Color32::LIGHT_RED, message);
        }
    }
}
