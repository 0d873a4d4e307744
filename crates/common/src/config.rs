//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{SwipekitError, SwipekitResult};

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Gesture tracking defaults.
    pub gesture: GestureDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default gesture tracking parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureDefaults {
    /// Key width in pixels, the base metric for all stroke thresholds.
    ///
    /// Should be refreshed from the active keyboard layout whenever it
    /// changes; the value here seeds strokes before a layout is known.
    pub key_width_px: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "swipekit=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gesture: GestureDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for GestureDefaults {
    fn default() -> Self {
        Self { key_width_px: 48 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl GestureDefaults {
    /// Reject a key width the stroke thresholds cannot be derived from.
    ///
    /// The tracker itself accepts any integer; this check belongs at the
    /// configuration boundary, before a bad value reaches a stroke.
    pub fn validate(&self) -> SwipekitResult<()> {
        if self.key_width_px == 0 {
            return Err(SwipekitError::config("key_width_px must be positive"));
        }
        Ok(())
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Load config from an explicit path, reporting any failure.
    pub fn load_from(path: &Path) -> SwipekitResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the standard location.
    pub fn save(&self) -> SwipekitResult<()> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, json)?;
        Ok(())
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("swipekit").join("config.json")
}
