//! # Animation Thread
//!
//! Runs the flag demo on its own thread, paced to the display refresh rate,
//! and talks to the UI thread through lock-free SPSC channels.
//!
//! ```text
//! ┌─────────────────────────┐              ┌─────────────────────────────┐
//! │    Animation Thread     │              │        UI Thread            │
//! │                         │   Commands   │                             │
//! │  FlagDemo (owned here)  │ ◄─────────── │  FlagHandle                 │
//! │                         │   (SPSC)     │   - send commands           │
//! │  loop {                 │              │   - poll events             │
//! │    process commands     │   Events     │   - read cached state       │
//! │    if running:          │ ───────────► │                             │
//! │      demo.step()        │   (SPSC)     │                             │
//! │      send frame, state  │              │                             │
//! │      wait for VBlank    │              │                             │
//! │  }                      │              │                             │
//! └─────────────────────────┘              └─────────────────────────────┘
//! ```

use std::thread::{self, JoinHandle};
use std::time::Duration;

use engine::demo::FlagDemo;
use engine::flag::{Slot, Snapshot};
use engine::hardware::color::Color;
pub use engine::hardware::keypad::GbaButton;
use engine::hardware::lcd::VBlank;
use tracing::{info, warn};

/// Channel buffer sizes
const COMMAND_BUFFER_SIZE: usize = 64;
const EVENT_BUFFER_SIZE: usize = 64;

/// Commands sent from the UI thread to the animation thread.
#[derive(Debug, Clone)]
pub enum FlagCommand {
    /// Animate continuously until paused.
    Run,
    /// Pause the animation.
    Pause,
    /// Advance N frames then pause.
    Step(u32),
    /// Show the next flag, like pressing A.
    SwapImage,
    /// Set button state (pressed or released).
    SetKey { button: GbaButton, pressed: bool },
    /// Ask for an encoded snapshot.
    RequestSaveState,
    /// Restore an encoded snapshot.
    LoadState(Vec<u8>),
    /// Stop the thread.
    Shutdown,
}

/// Events sent from the animation thread to the UI thread.
#[derive(Debug, Clone)]
pub enum FlagEvent {
    State(FlagState),
    /// A new LCD frame, packed RGB888 rows.
    Frame(Vec<u8>),
    Paused,
    SaveStateData(Vec<u8>),
    /// A command failed.
    Error(String),
}

/// What the UI shows about the animation.
#[derive(Debug, Clone)]
pub struct FlagState {
    pub frame: u32,
    pub image: String,
    pub active_slot: Slot,
    pub palette: Vec<Color>,
    pub key_input: u16,
    pub is_running: bool,
}

impl FlagState {
    fn of(demo: &FlagDemo, is_running: bool) -> Self {
        let flags = demo.flags();
        Self {
            frame: flags.current_frame(),
            image: flags.current_image().name().to_owned(),
            active_slot: flags.active_slot(),
            palette: flags.background().palette().colors().to_vec(),
            key_input: demo.keypad.key_input,
            is_running,
        }
    }
}

struct FlagThread {
    demo: FlagDemo,
    cmd_rx: rtrb::Consumer<FlagCommand>,
    event_tx: rtrb::Producer<FlagEvent>,
    vblank: VBlank,

    running: bool,
    steps_remaining: u32,
}

impl FlagThread {
    fn run(mut self) {
        loop {
            if self.process_commands() {
                info!("animation thread stopped");
                return;
            }

            if self.running || self.steps_remaining > 0 {
                self.step();
            } else {
                // sleep briefly to avoid busy-waiting
                thread::sleep(Duration::from_millis(1));
            }
        }
    }

    /// Returns true when the thread must stop.
    fn process_commands(&mut self) -> bool {
        while let Ok(cmd) = self.cmd_rx.pop() {
            match cmd {
                FlagCommand::Run => {
                    self.running = true;
                    self.steps_remaining = 0;
                    self.vblank = VBlank::new();
                    self.send_state();
                }
                FlagCommand::Pause => {
                    self.running = false;
                    self.steps_remaining = 0;
                    self.send_event(FlagEvent::Paused);
                    self.send_state();
                }
                FlagCommand::Step(count) => {
                    self.running = false;
                    self.steps_remaining = count;
                }
                FlagCommand::SwapImage => {
                    self.demo.show_next();
                    self.send_frame();
                    self.send_state();
                }
                FlagCommand::SetKey { button, pressed } => {
                    self.demo.keypad.set_button(button, pressed);
                }
                FlagCommand::RequestSaveState => match self.demo.snapshot().to_bytes() {
                    Ok(data) => self.send_event(FlagEvent::SaveStateData(data)),
                    Err(e) => self.send_error(e.to_string()),
                },
                FlagCommand::LoadState(data) => {
                    let restored = Snapshot::from_bytes(&data)
                        .and_then(|snapshot| self.demo.restore(&snapshot));
                    match restored {
                        Ok(()) => {
                            self.send_frame();
                            self.send_state();
                        }
                        Err(e) => self.send_error(e.to_string()),
                    }
                }
                FlagCommand::Shutdown => return true,
            }
        }
        false
    }

    fn step(&mut self) {
        self.demo.step();
        self.send_frame();

        if self.steps_remaining > 0 {
            self.steps_remaining -= 1;
            if self.steps_remaining == 0 {
                self.send_event(FlagEvent::Paused);
            }
        }
        self.send_state();

        if self.running {
            self.vblank.wait_for_vblank();
        }
    }

    fn send_state(&mut self) {
        let state = FlagState::of(&self.demo, self.running);
        self.send_event(FlagEvent::State(state));
    }

    fn send_frame(&mut self) {
        let frame = self.demo.lcd().to_rgb888();
        self.send_event(FlagEvent::Frame(frame));
    }

    fn send_error(&mut self, message: String) {
        warn!("{message}");
        self.send_event(FlagEvent::Error(message));
    }

    /// Non-blocking, dropped if the UI is behind.
    fn send_event(&mut self, event: FlagEvent) {
        let _ = self.event_tx.push(event);
    }
}

/// Handle for the UI thread to communicate with the animation thread.
pub struct FlagHandle {
    cmd_tx: rtrb::Producer<FlagCommand>,
    event_rx: rtrb::Consumer<FlagEvent>,
    thread_handle: Option<JoinHandle<()>>,

    /// Latest state from the animation thread.
    pub state: FlagState,
    /// Latest LCD frame.
    pub frame: Option<Vec<u8>>,
    /// Encoded snapshot waiting to be written.
    pub save_data: Option<Vec<u8>>,
    /// Last command failure.
    pub last_error: Option<String>,
}

impl FlagHandle {
    pub fn send(&mut self, cmd: FlagCommand) {
        if self.cmd_tx.push(cmd).is_err() {
            warn!("animation command queue full, command dropped");
        }
    }

    /// Drains pending events into the cached state.
    pub fn poll(&mut self) {
        while let Ok(event) = self.event_rx.pop() {
            match event {
                FlagEvent::State(state) => {
                    self.state = state;
                }
                FlagEvent::Frame(frame) => {
                    self.frame = Some(frame);
                }
                FlagEvent::Paused => {
                    self.state.is_running = false;
                }
                FlagEvent::SaveStateData(data) => {
                    self.save_data = Some(data);
                }
                FlagEvent::Error(message) => {
                    self.last_error = Some(message);
                }
            }
        }
    }
}

impl Drop for FlagHandle {
    fn drop(&mut self) {
        let _ = self.cmd_tx.push(FlagCommand::Shutdown);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

/// Moves `demo` to a new animation thread.
///
/// The thread starts paused unless `run` is set.
#[must_use]
pub fn spawn(demo: FlagDemo, run: bool) -> FlagHandle {
    let (cmd_tx, cmd_rx) = rtrb::RingBuffer::new(COMMAND_BUFFER_SIZE);
    let (event_tx, event_rx) = rtrb::RingBuffer::new(EVENT_BUFFER_SIZE);

    let state = FlagState::of(&demo, run);
    let frame = Some(demo.lcd().to_rgb888());

    let thread_handle = thread::spawn(move || {
        FlagThread {
            demo,
            cmd_rx,
            event_tx,
            vblank: VBlank::new(),
            running: run,
            steps_remaining: 0,
        }
        .run();
    });

    FlagHandle {
        cmd_tx,
        event_rx,
        thread_handle: Some(thread_handle),
        state,
        frame,
        save_data: None,
        last_error: None,
    }
}
