//! # Cluml Diagram
//!
//! Model of a UML class diagram editor: components, the node chains behind
//! associations, diagram and document containers, graph traversal and the
//! sanity-check engine.
//!
//! ## Core Components
//!
//! ### Model
//! - **Components**: Class and interface boxes, five association kinds
//! - **Node chains**: Bend points of an association, with orthogonal routing
//! - **Diagram**: Draw-ordered component list, hit testing, attachments
//! - **Diagrams**: The open document, a set of named diagram tabs
//!
//! ### Analysis
//! - **Traversal**: Reachability and cycle detection over the class graph
//! - **Sanity checks**: Pull-based validation producing coded findings
//!
//! ### Editing
//! - **History/Undo-Redo**: Document snapshots
//! - **Editor state**: Pointer and field-edit handling for a front end
//! - **Rendering**: Draw commands and SVG export
//!
//! ## Architecture
//!
//! ```text
//! EditorState
//!   ├── Diagrams (document)
//!   │     └── Diagram
//!   │           ├── Class ── Attribute / Operation / ClassName
//!   │           └── Association ── NodeChain ── TerminationNode
//!   ├── EditorSession (ids, sanity switches)
//!   └── History (snapshots)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cluml_diagram::{ComponentType, EditorState};
//! use cluml_core::Vector;
//!
//! let mut editor = EditorState::default();
//! let a = editor.add_component(ComponentType::Class, Vector::new(100.0, 100.0));
//! let b = editor.add_component(ComponentType::Class, Vector::new(400.0, 100.0));
//! editor.add_association(ComponentType::Inheritance, &a, &b)?;
//! for finding in editor.sanity_check() {
//!     println!("{} {}", finding.error_code, finding.description);
//! }
//! ```

pub mod association;
pub mod class;
pub mod component;
pub mod diagram;
pub mod diagrams;
pub mod editor_state;
pub mod history;
pub mod naming;
pub mod renderer;
pub mod sanity;
pub mod selectable;
pub mod serialization;
pub mod svg_renderer;

pub use association::{Association, AssociationVariant, End, NodeChain, NodeId, TerminationRef};
pub use class::{Class, ClassField, ClassVariant};
pub use component::{BuiltinRegistry, Component, ComponentKind, ComponentRegistry, ComponentType};
pub use diagram::{Diagram, FieldEditor, NodeHandle, Touched};
pub use diagrams::Diagrams;
pub use editor_state::{Drag, EditorOptions, EditorState};
pub use history::{History, UndoBackup};
pub use renderer::DrawCommand;
pub use sanity::{run_sanity_check, ComponentSource, SanityElement, SanityErrorInfo};
pub use selectable::Selectable;
pub use serialization::DiagramsFile;
pub use svg_renderer::render_svg;
