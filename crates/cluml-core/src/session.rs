//! Editor session context.
//!
//! Holds the state that is shared by every component created while a
//! document is open: the component id counter and the sanity-check switches.
//! A session is built from configuration at start-up and passed explicitly to
//! constructors and validators.
//!
//! Lifecycle:
//! - [`EditorSession::begin_document`] resets the id counter when a new
//!   document is created or before one is loaded.
//! - Loading calls [`EditorSession::observe_id`] for every loaded component so
//!   that new ids never collide with loaded ones.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default limit on attributes plus operations before a class is flagged.
pub const DEFAULT_PROPERTY_LIMIT: usize = 20;

/// Default average glyph width used to size class boxes.
pub const DEFAULT_CHAR_WIDTH: f64 = 7.5;

/// Prefix of every generated component id.
const ID_PREFIX: char = 'd';

/// Unique component identifier of the form `d<N>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(String);

impl ComponentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    fn from_number(n: u64) -> Self {
        Self(format!("{}{}", ID_PREFIX, n))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Numeric part of a generated id, if the id has the `d<N>` form.
    pub fn number(&self) -> Option<u64> {
        self.0.strip_prefix(ID_PREFIX)?.parse().ok()
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Text measurement used when laying out class boxes.
pub trait TextMetrics {
    fn text_width(&self, text: &str) -> f64;
}

/// Fixed average glyph width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    pub char_width: f64,
}

impl TextMetrics for MonospaceMetrics {
    fn text_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.char_width
    }
}

/// Process-wide editor state passed to constructors and validators.
#[derive(Debug, Clone)]
pub struct EditorSession {
    max_id: u64,
    /// Flag attributes and operations that have no visibility marker.
    pub show_visibility: bool,
    /// Maximum attributes plus operations before a class is flagged.
    pub property_limit: usize,
    /// Metrics for sizing class boxes.
    pub metrics: MonospaceMetrics,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    pub fn new() -> Self {
        Self {
            max_id: 0,
            show_visibility: true,
            property_limit: DEFAULT_PROPERTY_LIMIT,
            metrics: MonospaceMetrics {
                char_width: DEFAULT_CHAR_WIDTH,
            },
        }
    }

    /// Issues the next component id.
    pub fn next_id(&mut self) -> ComponentId {
        self.max_id += 1;
        ComponentId::from_number(self.max_id)
    }

    /// Highest id number issued or observed so far.
    pub fn max_id(&self) -> u64 {
        self.max_id
    }

    /// Records an existing id so later ids are issued above it.
    pub fn observe_id(&mut self, id: &ComponentId) {
        if let Some(n) = id.number() {
            if n > self.max_id {
                self.max_id = n;
            }
        }
    }

    /// Resets per-document state. Settings are kept.
    pub fn begin_document(&mut self) {
        self.max_id = 0;
    }

    pub fn text_width(&self, text: &str) -> f64 {
        self.metrics.text_width(text)
    }
}
