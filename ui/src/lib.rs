pub mod about;
pub mod app;
pub mod flag_controls;
pub mod flag_display;
pub mod flag_thread;
pub mod gba_color;
pub mod palette_visualizer;
pub mod savegame;
pub mod ui_traits;
