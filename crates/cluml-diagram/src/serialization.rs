//! Serialization and deserialization for Cluml documents.
//!
//! A document is a JSON object holding the grid settings, a file id and one
//! entry per diagram tab. Keys are camelCase.

use crate::association::NodeObj;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default grid spacing written to new documents.
pub const DEFAULT_GRID: f64 = 10.0;

fn is_false(value: &bool) -> bool {
    !*value
}

/// Complete document file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramsFile {
    #[serde(default = "default_grid")]
    pub grid: f64,
    #[serde(default, skip_serializing_if = "is_false")]
    pub snap: bool,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub diagrams: Vec<DiagramObj>,
}

fn default_grid() -> f64 {
    DEFAULT_GRID
}

/// One diagram tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramObj {
    pub name: String,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub components: Vec<ComponentObj>,
}

/// Serialized component. Class and association fields are optional and
/// only present for their own kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentObj {
    pub id: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub placed: bool,
    #[serde(default)]
    pub palette_desc: String,
    #[serde(default)]
    pub html_desc: String,
    #[serde(default)]
    pub palette_lbl: String,
    pub file_lbl: String,
    #[serde(default)]
    pub help_lbl: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_data: Option<NodeObj>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<SavedSanityElement>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operations: Option<Vec<SavedSanityElement>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(rename = "abstract", default, skip_serializing_if = "is_false")]
    pub is_abstract: bool,
}

/// A member row of a class box.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedSanityElement {
    pub value: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    /// Visibility symbol, empty when none was given.
    #[serde(default)]
    pub visibility: String,
    #[serde(rename = "abstract", default, skip_serializing_if = "is_false")]
    pub is_abstract: bool,
}

impl DiagramsFile {
    /// Save document to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize document")?;

        std::fs::write(path.as_ref(), json).context("Failed to write document file")?;

        Ok(())
    }

    /// Load document from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read document file")?;

        serde_json::from_str(&content).context("Failed to parse document file")
    }
}
