//! Cluml Settings Crate
//!
//! Loads, validates and saves the editor configuration, and turns it into
//! the [`cluml_core::EditorSession`] used by the diagram model.

pub mod config;
pub mod error;

pub use config::{Config, EditorSettings, SanitySettings, CONFIG_FILE_NAME};
pub use error::{ConfigError, SettingsError, SettingsResult};
