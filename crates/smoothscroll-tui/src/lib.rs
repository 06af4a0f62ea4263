pub mod app;
pub mod document;
pub mod event;
pub mod input;
pub mod keymap;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use document::{Document, DocumentViewport};
pub use theme::Theme;
