#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
mod bitwise;

pub mod demo;

#[allow(clippy::module_name_repetitions)]
pub mod flag;

#[allow(clippy::large_stack_frames)]
pub mod hardware;
