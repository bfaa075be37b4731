//! Menu module - Interactive text menu

mod choice;
mod controller;

pub use choice::{menu_text, MenuChoice, EXIT_MESSAGE, INVALID_CHOICE, PROMPT};
pub use controller::MenuController;
