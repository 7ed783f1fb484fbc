//! # Cluml Core
//!
//! Core types shared by every Cluml crate:
//! - Geometry primitives (`Vector`, `Line`, `Rect`)
//! - The error taxonomy
//! - The editor session (id counter and sanity-check switches)
//! - Free-text sanitizing for saved documents

pub mod error;
pub mod geometry;
pub mod sanitize;
pub mod session;

pub use error::{ChainError, DiagramError, EditError, Error, Result};
pub use geometry::{Line, Rect, Vector};
pub use session::{ComponentId, EditorSession, MonospaceMetrics, TextMetrics};
