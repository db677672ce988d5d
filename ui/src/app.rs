//! # Flagwave UI Application
//!
//! The main application struct: it owns the handle to the animation thread and
//! the tool windows showing it.
//!
//! ```text
//! App::new(demo, run)
//!     │
//!     ├─► flag_thread::spawn(demo, run)
//!     │   └─► FlagDemo moves to the animation thread
//!     │
//!     └─► Create UI tools, sharing Arc<Mutex<FlagHandle>>:
//!         ├─► About
//!         ├─► FlagDisplay (LCD output)
//!         ├─► FlagControls (run/pause/step, next flag, A button)
//!         ├─► PaletteVisualizer (BG palette)
//!         └─► SaveGame (save/load state)
//! ```
//!
//! Every UI frame the handle is polled once, then each open tool draws from
//! the cached state. Holding the keyboard A key holds the keypad A button.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use engine::demo::FlagDemo;

use crate::flag_thread::{self, FlagCommand, FlagHandle, GbaButton};
use crate::{
    about, flag_controls::FlagControls, flag_display::FlagDisplay,
    palette_visualizer::PaletteVisualizer, savegame::SaveGame, ui_traits::UiTool,
};

pub struct App {
    flag_handle: Arc<Mutex<FlagHandle>>,
    tools: Vec<Box<dyn UiTool>>,
    open: BTreeSet<String>,
    a_held: bool,
}

impl App {
    /// Starts the animation thread with `demo`, running unless `paused`.
    #[must_use]
    pub fn new(demo: FlagDemo, paused: bool) -> Self {
        let flag_handle = Arc::new(Mutex::new(flag_thread::spawn(demo, !paused)));

        let tools: Vec<Box<dyn UiTool>> = vec![
            Box::<about::About>::default(),
            Box::new(FlagDisplay::new(Arc::clone(&flag_handle))),
            Box::new(FlagControls::new(Arc::clone(&flag_handle))),
            Box::new(PaletteVisualizer::new(Arc::clone(&flag_handle))),
            Box::new(SaveGame::new(Arc::clone(&flag_handle))),
        ];

        let mut open = BTreeSet::new();
        open.insert(tools[1].name().to_owned());
        open.insert(tools[2].name().to_owned());

        Self {
            flag_handle,
            tools,
            open,
            a_held: false,
        }
    }

    pub fn checkboxes(&mut self, ui: &mut egui::Ui) {
        let Self { tools, open, .. } = self;
        for tool in tools {
            let mut is_open = open.contains(tool.name());
            ui.toggle_value(&mut is_open, tool.name());
            set_open(open, tool.name(), is_open);
        }
    }

    fn windows(&mut self, ctx: &egui::Context) {
        let Self { tools, open, .. } = self;
        for tool in tools {
            let mut is_open = open.contains(tool.name());
            tool.show(ctx, &mut is_open);
            set_open(open, tool.name(), is_open);
        }
    }

    /// Forwards the keyboard A key to the keypad, on changes only.
    fn keyboard(&mut self, ctx: &egui::Context) {
        let a_held = ctx.input(|i| i.key_down(egui::Key::A));
        if a_held == self.a_held {
            return;
        }

        self.a_held = a_held;
        if let Ok(mut handle) = self.flag_handle.lock() {
            handle.send(FlagCommand::SetKey {
                button: GbaButton::A,
                pressed: a_held,
            });
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.request_repaint();

        if let Ok(mut handle) = self.flag_handle.lock() {
            handle.poll();
        }
        self.keyboard(ctx);

        egui::SidePanel::right("Flagwave Tools")
            .resizable(false)
            .default_width(200.0)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading("✒ Flagwave Tools");
                });

                ui.separator();

                self.checkboxes(ui);
            });

        self.windows(ctx);
    }
}

fn set_open(open: &mut BTreeSet<String>, key: &'static str, is_open: bool) {
    if is_open {
        if !open.contains(key) {
            open.insert(key.to_owned());
        }
    } else {
        open.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_open_toggles() {
        let mut open = BTreeSet::new();
        set_open(&mut open, "Flag Display", true);
        set_open(&mut open, "Flag Display", true);
        assert_eq!(open.len(), 1);
        set_open(&mut open, "Flag Display", false);
        assert!(open.is_empty());
    }
}
