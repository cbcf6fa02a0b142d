//! UI module for mood-tui
//!
//! This module contains the history list layout (`RenderedView`) and the
//! ratatui drawing code for the input field, list, key hints and dialogs.

mod helpers;
mod render;
mod view;

pub use render::{draw, list_viewport_width};
pub use view::{effective_width, RenderedView};
