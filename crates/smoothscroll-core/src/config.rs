use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Smooth scrolling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Animate jumps (false = jump instantly)
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Upper bound on a single scroll animation, in milliseconds
    #[serde(default = "default_max_duration")]
    pub max_duration_ms: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            max_duration_ms: default_max_duration(),
        }
    }
}

impl ScrollConfig {
    /// Check the animator's construction precondition
    pub fn validate(&self) -> crate::Result<()> {
        if !self.max_duration_ms.is_finite() || self.max_duration_ms <= 0.0 {
            return Err(crate::Error::InvalidDuration(self.max_duration_ms));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Idle event poll interval in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Lines moved per wheel notch or line-scroll key
    #[serde(default = "default_scroll_lines")]
    pub scroll_lines: u16,
    /// Show a line number gutter
    #[serde(default)]
    pub show_line_numbers: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            scroll_lines: default_scroll_lines(),
            show_line_numbers: false,
        }
    }
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "k", "<C-d>" (Ctrl+d), "<S-g>" (Shift+g), "<CR>" (Enter), "<Esc>", "<Space>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the pager
    #[serde(default = "default_key_quit")]
    pub quit: String,

    // Manual scrolling (locks any running animation)
    /// Scroll one step down
    #[serde(default = "default_key_line_down")]
    pub line_down: String,
    /// Scroll one step up
    #[serde(default = "default_key_line_up")]
    pub line_up: String,

    // Animated scrolling
    /// Scroll half page down
    #[serde(default = "default_key_half_page_down")]
    pub half_page_down: String,
    /// Scroll half page up
    #[serde(default = "default_key_half_page_up")]
    pub half_page_up: String,
    /// Scroll full page down
    #[serde(default = "default_key_page_down")]
    pub page_down: String,
    /// Scroll full page up
    #[serde(default = "default_key_page_up")]
    pub page_up: String,
    /// Jump to top of document
    #[serde(default = "default_key_jump_to_top")]
    pub jump_to_top: String,
    /// Jump to bottom of document
    #[serde(default = "default_key_jump_to_bottom")]
    pub jump_to_bottom: String,
    /// Jump to next section heading
    #[serde(default = "default_key_next_section")]
    pub next_section: String,
    /// Jump to previous section heading
    #[serde(default = "default_key_prev_section")]
    pub prev_section: String,

    // Search
    /// Start forward search
    #[serde(default = "default_key_search_forward")]
    pub search_forward: String,
    /// Go to next search match
    #[serde(default = "default_key_next_match")]
    pub next_match: String,
    /// Go to previous search match
    #[serde(default = "default_key_prev_match")]
    pub prev_match: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            line_down: default_key_line_down(),
            line_up: default_key_line_up(),
            half_page_down: default_key_half_page_down(),
            half_page_up: default_key_half_page_up(),
            page_down: default_key_page_down(),
            page_up: default_key_page_up(),
            jump_to_top: default_key_jump_to_top(),
            jump_to_bottom: default_key_jump_to_bottom(),
            next_section: default_key_next_section(),
            prev_section: default_key_prev_section(),
            search_forward: default_key_search_forward(),
            next_match: default_key_next_match(),
            prev_match: default_key_prev_match(),
        }
    }
}

// Default keymap values (Vim-style notation)
fn default_key_quit() -> String { "q".to_string() }
fn default_key_line_down() -> String { "j".to_string() }
fn default_key_line_up() -> String { "k".to_string() }
fn default_key_half_page_down() -> String { "<C-d>".to_string() }
fn default_key_half_page_up() -> String { "<C-u>".to_string() }
fn default_key_page_down() -> String { "<C-f>".to_string() }
fn default_key_page_up() -> String { "<C-b>".to_string() }
fn default_key_jump_to_top() -> String { "gg".to_string() }
fn default_key_jump_to_bottom() -> String { "G".to_string() }
fn default_key_next_section() -> String { "]".to_string() }
fn default_key_prev_section() -> String { "[".to_string() }
fn default_key_search_forward() -> String { "/".to_string() }
fn default_key_next_match() -> String { "n".to_string() }
fn default_key_prev_match() -> String { "N".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("smoothscroll")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_duration() -> f64 {
    500.0
}

fn default_tick_rate() -> u64 {
    100
}

fn default_scroll_lines() -> u16 {
    3
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    /// Render configuration as pretty TOML
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    pub fn validate(&self) -> crate::Result<()> {
        self.scroll.validate()?;
        if self.ui.tick_rate_ms == 0 {
            return Err(crate::Error::Config(
                "ui.tick_rate_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/smoothscroll/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("smoothscroll")
            .join("config.toml")
    }

    /// Get the log file path used by the interactive pager
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("smoothscroll.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}
