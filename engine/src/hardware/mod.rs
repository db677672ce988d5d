//! Simulated display hardware the flag effect runs on: tile memory, screen
//! blocks, background palette, LCD compositor, keypad and sine table.

pub mod background;
pub mod color;
pub mod keypad;
pub mod lcd;
pub mod map_cell;
pub mod palette;
pub mod sin_lut;
pub mod tiles;
