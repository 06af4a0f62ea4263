pub mod config;
pub mod error;
pub mod scroll;

pub use config::{AppConfig, KeymapConfig, ScrollConfig};
pub use error::{Error, Result};
pub use scroll::{Interaction, ScrollAnimator, Viewport};
