use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::{env, fs};

use tracing::{error, info};

use crate::flag_thread::{FlagCommand, FlagHandle};
use crate::ui_traits::UiTool;

const SAVE_FILE_NAME: &str = "flagwave.state";

/// Saves the animation position to a file and loads it back.
pub struct SaveGame {
    flag_handle: Arc<Mutex<FlagHandle>>,
    path: PathBuf,
    status: String,
}

impl SaveGame {
    pub fn new(flag_handle: Arc<Mutex<FlagHandle>>) -> Self {
        Self::with_path(flag_handle, env::temp_dir().join(SAVE_FILE_NAME))
    }

    pub const fn with_path(flag_handle: Arc<Mutex<FlagHandle>>, path: PathBuf) -> Self {
        Self {
            flag_handle,
            path,
            status: String::new(),
        }
    }

    fn save_state(&mut self) {
        if let Ok(mut handle) = self.flag_handle.lock() {
            handle.send(FlagCommand::RequestSaveState);
            self.status = "saving...".to_owned();
        }
    }

    fn load_state(&mut self) {
        match fs::read(&self.path) {
            Ok(data) => {
                if let Ok(mut handle) = self.flag_handle.lock() {
                    handle.send(FlagCommand::LoadState(data));
                }
                info!(path = %self.path.display(), "state loaded");
                self.status = "loaded".to_owned();
            }
            Err(e) => {
                error!(path = %self.path.display(), "can't read save state: {e}");
                self.status = format!("can't read {}: {e}", self.path.display());
            }
        }
    }

    /// Writes the snapshot the animation thread sent back, if any.
    fn write_pending(&mut self) {
        let Some(data) = self
            .flag_handle
            .lock()
            .ok()
            .and_then(|mut handle| handle.save_data.take())
        else {
            return;
        };

        match fs::write(&self.path, data) {
            Ok(()) => {
                info!(path = %self.path.display(), "state saved");
                self.status = format!("saved to {}", self.path.display());
            }
            Err(e) => {
                error!(path = %self.path.display(), "can't write save state: {e}");
                self.status = format!("can't write {}: {e}", self.path.display());
            }
        }
    }
}

impl UiTool for SaveGame {
    fn name(&self) -> &'static str {
        "Save Game"
    }

    fn show(&mut self, ctx: &egui::Context, open: &mut bool) {
        // Runs while closed too, a save may still be in flight.
        self.write_pending();

        egui::Window::new(self.name())
            .default_width(100.0)
            .open(open)
            .default_pos(egui::pos2(10.0, 300.0))
            .show(ctx, |ui| self.ui(ui));
    }

    fn ui(&mut self, ui: &mut egui::Ui) {
        if ui.button("Save").clicked() {
            self.save_state();
        }

        if ui.button("Load").clicked() {
            self.load_state();
        }

        if !self.status.is_empty() {
            ui.small(self.status.as_str());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::{Duration, Instant};

    use engine::demo::FlagDemo;
    use engine::flag::artwork;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::flag_thread;

    #[test]
    fn save_then_load_through_a_file() {
        let demo = FlagDemo::new(artwork::default_catalog().unwrap(), None).unwrap();
        let handle = Arc::new(Mutex::new(flag_thread::spawn(demo, false)));
        let path = env::temp_dir().join(format!("flagwave-test-{}.state", std::process::id()));
        let mut savegame = SaveGame::with_path(Arc::clone(&handle), path.clone());

        let poll_until = |done: &dyn Fn(&FlagHandle) -> bool| {
            let deadline = Instant::now() + Duration::from_secs(5);
            loop {
                {
                    let mut handle = handle.lock().unwrap();
                    handle.poll();
                    if done(&handle) {
                        return;
                    }
                }
                assert!(Instant::now() < deadline, "animation thread timed out");
                thread::sleep(Duration::from_millis(1));
            }
        };

        handle.lock().unwrap().send(FlagCommand::Step(4));
        poll_until(&|h| h.state.frame == 4);

        savegame.save_state();
        poll_until(&|h| h.save_data.is_some());
        savegame.write_pending();
        assert!(path.exists());

        handle.lock().unwrap().send(FlagCommand::Step(3));
        poll_until(&|h| h.state.frame == 7);

        savegame.load_state();
        poll_until(&|h| h.state.frame == 4);
        assert_eq!(savegame.status, "loaded");

        let _ = fs::remove_file(path);
    }
}
