pub mod keymap;
pub mod palette;
pub mod tui;

pub use keymap::{KeyAction, Keymap};
pub use tui::TuiApp;
