//! Error handling for Cluml
//!
//! Failures fall into three families, each with its own type:
//! - Node chain errors (structural bugs in an association's line nodes)
//! - Diagram errors (lookups and document loading)
//! - Edit errors (user input the model refuses to commit)
//!
//! Sanity-check findings are never errors; they are returned as data by the
//! sanity engine. All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Node chain error type
///
/// Raised when an association's node chain is asked to do something that
/// would break its structure. These indicate programming errors and are
/// fatal to the current operation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChainError {
    /// A serialized node carried a `nextType` tag that is not recognised
    #[error("Unknown node type tag: {tag}")]
    UnknownNodeType {
        /// The offending tag.
        tag: String,
    },

    /// A serialized chain ended before reaching a termination node
    #[error("Node chain ends without a termination node")]
    Unterminated,

    /// A node id no longer refers to a live node in the chain
    #[error("Stale node id {index}:{generation}")]
    StaleNode {
        /// Arena slot index.
        index: u32,
        /// Generation the id was issued for.
        generation: u32,
    },

    /// Termination nodes are permanent members of the chain
    #[error("Termination nodes cannot be removed from an association")]
    TerminationRemoval,

    /// Tried to insert after the final node of the chain
    #[error("Cannot insert a node after the end of the chain")]
    InsertAfterEnd,
}

/// Diagram error type
///
/// Represents lookup failures that indicate a caller bug, and problems
/// while loading a document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiagramError {
    /// A lookup was attempted with an empty component id
    #[error("Component lookup requires a non-empty id")]
    MissingId,

    /// No component with the given id exists in the diagram
    #[error("Component {id} not found")]
    ComponentNotFound {
        /// The id that was looked up.
        id: String,
    },

    /// The component exists but is not a class
    #[error("Component {id} is not a class")]
    NotAClass {
        /// The id of the component.
        id: String,
    },

    /// The component exists but is not an association
    #[error("Component {id} is not an association")]
    NotAnAssociation {
        /// The id of the component.
        id: String,
    },

    /// No diagram with the given name or index exists
    #[error("Diagram {name} not found")]
    DiagramNotFound {
        /// The name or index that was looked up.
        name: String,
    },

    /// Node chain failure inside a component
    #[error(transparent)]
    Chain(#[from] ChainError),
}

/// Edit error type
///
/// Returned when a user-supplied value is rejected. The model keeps its prior
/// state whenever one of these is produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    /// Another component in the diagram already uses this naming
    #[error("The name {name} is already in use")]
    DuplicateNaming {
        /// The rejected name.
        name: String,
    },

    /// Another diagram in the document already uses this name
    #[error("A diagram named {name} already exists")]
    DuplicateDiagramName {
        /// The rejected name.
        name: String,
    },

    /// The value may not be empty
    #[error("{field} must not be empty")]
    Empty {
        /// The field being edited.
        field: String,
    },

    /// The edited field does not exist (e.g. attribute index out of range)
    #[error("No such field: {field}")]
    NoSuchField {
        /// Description of the field.
        field: String,
    },

    /// The document must always keep one diagram
    #[error("Cannot remove the last diagram")]
    LastDiagram,
}

/// Main error type for Cluml
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Node chain error
    #[error(transparent)]
    Chain(#[from] ChainError),

    /// Diagram error
    #[error(transparent)]
    Diagram(#[from] DiagramError),

    /// Edit error
    #[error(transparent)]
    Edit(#[from] EditError),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a user edit rejection
    pub fn is_edit_error(&self) -> bool {
        matches!(self, Error::Edit(_))
    }

    /// Check if this error indicates a structural bug rather than bad input
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::Chain(_) | Error::Diagram(DiagramError::MissingId | DiagramError::Chain(_))
        )
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
