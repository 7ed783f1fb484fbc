//! Configuration for the Cluml editor
//!
//! Configuration is organized into two sections:
//! - Editor settings (grid, snapping, canvas size, text metrics, undo depth)
//! - Sanity-check settings (visibility rule, member limit)
//!
//! Files may be JSON or TOML; the format is chosen from the extension.

use crate::error::{ConfigError, SettingsError, SettingsResult};
use cluml_core::session::{DEFAULT_CHAR_WIDTH, DEFAULT_PROPERTY_LIMIT};
use cluml_core::{EditorSession, MonospaceMetrics};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the configuration inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory name under the platform config directory.
const APP_DIR_NAME: &str = "cluml";

/// Editor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Grid spacing in canvas units
    pub grid: f64,
    /// Snap dropped items to the grid
    pub snap: bool,
    /// Width of a new diagram
    pub canvas_width: f64,
    /// Height of a new diagram
    pub canvas_height: f64,
    /// Average glyph width used to size class boxes
    pub char_width: f64,
    /// Number of undo snapshots kept
    pub undo_depth: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            grid: 10.0,
            snap: false,
            canvas_width: 1600.0,
            canvas_height: 1200.0,
            char_width: DEFAULT_CHAR_WIDTH,
            undo_depth: 50,
        }
    }
}

/// Sanity-check settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitySettings {
    /// Report attributes and operations that have no visibility marker
    pub show_visibility: bool,
    /// Maximum number of attributes plus operations before a class is flagged
    pub property_limit: usize,
}

impl Default for SanitySettings {
    fn default() -> Self {
        Self {
            show_visibility: true,
            property_limit: DEFAULT_PROPERTY_LIMIT,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Editor settings
    pub editor: EditorSettings,
    /// Sanity-check settings
    pub sanity: SanitySettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform default location of the configuration file
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            SettingsError::ConfigDirectory("no configuration directory on this platform".into())
        })?;
        Ok(dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load the configuration from the default path, falling back to defaults
    /// when no file exists yet.
    pub fn load_or_default() -> SettingsResult<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if !(self.editor.grid > 0.0) {
            return Err(SettingsError::invalid("editor.grid", "must be > 0"));
        }

        if !(self.editor.canvas_width > 0.0) || !(self.editor.canvas_height > 0.0) {
            return Err(SettingsError::invalid(
                "editor.canvas_width",
                "canvas dimensions must be > 0",
            ));
        }

        if !(self.editor.char_width > 0.0) {
            return Err(SettingsError::invalid("editor.char_width", "must be > 0"));
        }

        if self.editor.undo_depth == 0 {
            return Err(SettingsError::invalid("editor.undo_depth", "must be > 0"));
        }

        if self.sanity.property_limit == 0 {
            return Err(SettingsError::invalid("sanity.property_limit", "must be > 0"));
        }

        Ok(())
    }

    /// Build the editor session described by this configuration
    pub fn session(&self) -> EditorSession {
        let mut session = EditorSession::new();
        session.show_visibility = self.sanity.show_visibility;
        session.property_limit = self.sanity.property_limit;
        session.metrics = MonospaceMetrics {
            char_width: self.editor.char_width,
        };
        session
    }
}
