// UI module - interactive terminal feedback
//
// This module contains:
// - terminal: platform-appropriate screen clearing
// - spinner: cancellable busy-spinner shown while a step blocks
//
// Everything here is cosmetic. A failure to clear the screen or render the
// spinner never fails the build.

pub mod spinner;
pub mod terminal;

pub use spinner::{Spinner, SpinnerHandle};
pub use terminal::clear_screen;
