mod components;
pub mod file_picker;
mod handlers;
mod screens;

pub use components::{DatabaseViewerUI, Popup, ScreenState};
pub use screens::{APP_NAME, PROJECT_URL};
