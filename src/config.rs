use crate::growth_monitor::DEFAULT_POLL_INTERVAL;
use crate::line_scanner::DEFAULT_CHUNK_SIZE;
use crate::line_window::DEFAULT_MAX_LINE_BUFFER;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Smallest accepted `max_line_buffer`. The window also grows to fit at
/// least one screen at runtime.
pub const MIN_LINE_BUFFER: usize = 100;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pager: PagerConfig,

    /// Builtin theme name ("dark", "light", "high-contrast")
    #[serde(default = "default_theme_name")]
    pub theme: String,

    /// Extra bindings applied on top of the defaults
    #[serde(default)]
    pub keybindings: Vec<Keybinding>,
}

/// Pager behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagerConfig {
    /// Bytes read per chunk
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Maximum number of lines held in memory
    #[serde(default = "default_max_line_buffer")]
    pub max_line_buffer: usize,

    /// How often the file is checked for growth
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Columns moved by one horizontal scroll
    #[serde(default = "default_horizontal_scroll_step")]
    pub horizontal_scroll_step: usize,

    #[serde(default = "default_tab_width")]
    pub tab_width: usize,

    /// Keep the highlight on the newest line when the file grows
    #[serde(default = "default_true")]
    pub follow: bool,
}

fn default_theme_name() -> String {
    "dark".to_string()
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_max_line_buffer() -> usize {
    DEFAULT_MAX_LINE_BUFFER
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL.as_millis() as u64
}

fn default_horizontal_scroll_step() -> usize {
    5
}

fn default_tab_width() -> usize {
    4
}

fn default_true() -> bool {
    true
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            max_line_buffer: default_max_line_buffer(),
            poll_interval_ms: default_poll_interval_ms(),
            horizontal_scroll_step: default_horizontal_scroll_step(),
            tab_width: default_tab_width(),
            follow: true,
        }
    }
}

impl PagerConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Keybinding definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keybinding {
    /// Key name (e.g., "j", "PageDown", "Space")
    pub key: String,

    /// Modifiers (e.g., ["ctrl"], ["ctrl", "shift"])
    #[serde(default)]
    pub modifiers: Vec<String>,

    /// Action to perform (e.g., "move_down", "quit")
    pub action: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pager: PagerConfig::default(),
            theme: default_theme_name(),
            keybindings: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let config: Config = serde_json::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path.as_ref(), contents)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Default location of the user's config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("fresh-pager").join("config.json"))
    }

    /// Load `path` if given, otherwise the default location if that file
    /// exists, otherwise the builtin defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => {
                tracing::info!("Loading config from {}", path.display());
                Self::load_from_file(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pager.chunk_size == 0 {
            return Err(ConfigError::ValidationError(
                "chunk_size must be greater than 0".to_string(),
            ));
        }

        if self.pager.max_line_buffer < MIN_LINE_BUFFER {
            return Err(ConfigError::ValidationError(format!(
                "max_line_buffer must be at least {}",
                MIN_LINE_BUFFER
            )));
        }

        if self.pager.poll_interval_ms == 0 {
            return Err(ConfigError::ValidationError(
                "poll_interval_ms must be greater than 0".to_string(),
            ));
        }

        if self.pager.tab_width == 0 {
            return Err(ConfigError::ValidationError(
                "tab_width must be greater than 0".to_string(),
            ));
        }

        for binding in &self.keybindings {
            if binding.key.is_empty() {
                return Err(ConfigError::ValidationError(
                    "keybinding key cannot be empty".to_string(),
                ));
            }
            if binding.action.is_empty() {
                return Err(ConfigError::ValidationError(
                    "keybinding action cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "IO error: {}", msg),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::SerializeError(msg) => write!(f, "Serialize error: {}", msg),
            ConfigError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
