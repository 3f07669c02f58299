/// UI building blocks used by the application in main.rs
///
/// - Keyboard shortcuts (keybindings.rs)
/// - Preview pane state and background image decoding (preview.rs)
/// - Native confirmation and error dialogs (dialogs.rs)

pub mod dialogs;
pub mod keybindings;
pub mod preview;
