//! Editor state for UI integration.
//! Owns the open document, the editor session and the undo history, and
//! translates pointer and keyboard actions into model edits.
//!
//! This module is split into submodules:
//! - `components`: Component creation, deletion, dragging and field edits
//! - `file_io`: Save/load operations

mod components;
mod file_io;

pub use components::Drag;

use crate::component::BuiltinRegistry;
use crate::diagrams::Diagrams;
use crate::history::{History, UndoBackup, DEFAULT_UNDO_DEPTH};
use crate::sanity::{run_sanity_check, SanityErrorInfo};
use cluml_core::{EditorSession, Error};

/// Canvas and history settings for a new editor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorOptions {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub grid: f64,
    pub snap: bool,
    pub undo_depth: usize,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            canvas_width: 1600.0,
            canvas_height: 1200.0,
            grid: crate::serialization::DEFAULT_GRID,
            snap: false,
            undo_depth: DEFAULT_UNDO_DEPTH,
        }
    }
}

/// Editor state for UI integration
#[derive(Debug, Clone)]
pub struct EditorState {
    pub document: Diagrams,
    pub session: EditorSession,
    pub history: History,
    pub registry: BuiltinRegistry,
    pub current_file_path: Option<std::path::PathBuf>,
    pub is_modified: bool,
    pub(crate) drag: Option<Drag>,
    options: EditorOptions,
}

impl EditorState {
    pub fn new(session: EditorSession, options: EditorOptions) -> Self {
        let mut document = Diagrams::new(options.canvas_width, options.canvas_height);
        document.grid = options.grid;
        document.snap = options.snap;
        Self {
            document,
            session,
            history: History::new(options.undo_depth),
            registry: BuiltinRegistry,
            current_file_path: None,
            is_modified: false,
            drag: None,
            options,
        }
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    /// Grid spacing to snap to, when snapping is on.
    pub fn snap_grid(&self) -> Option<f64> {
        self.document.snap.then_some(self.document.grid)
    }

    pub fn set_snap(&mut self, snap: bool) {
        self.document.snap = snap;
    }

    /// Runs `edit` after backing the document up. A failed edit restores
    /// the backup and leaves both history stacks as they were.
    pub(crate) fn undoable<T>(
        &mut self,
        edit: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        self.history.record_tentative(self.document.clone());
        match edit(self) {
            Ok(value) => {
                self.history.commit();
                self.is_modified = true;
                Ok(value)
            }
            Err(err) => {
                self.cancel_backup();
                tracing::debug!("Edit rolled back: {}", err);
                Err(err)
            }
        }
    }

    /// Withdraws a tentative backup and puts the document back to it.
    pub(crate) fn cancel_backup(&mut self) {
        if let Some(previous) = self.history.cancel() {
            self.document = previous;
        }
    }

    /// Undo last change
    pub fn undo(&mut self) -> bool {
        let current = self.document.clone();
        match self.history.undo(current) {
            Some(previous) => {
                self.document = previous;
                self.drag = None;
                self.is_modified = true;
                true
            }
            None => false,
        }
    }

    /// Redo last undo
    pub fn redo(&mut self) -> bool {
        let current = self.document.clone();
        match self.history.redo(current) {
            Some(next) => {
                self.document = next;
                self.drag = None;
                self.is_modified = true;
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Clear history stacks
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Validates the active diagram.
    pub fn sanity_check(&self) -> Vec<SanityErrorInfo> {
        run_sanity_check(&self.document, &self.session)
    }

    /// Adds an automatically named diagram and switches to it.
    pub fn new_diagram(&mut self) -> String {
        self.history.backup(&self.document);
        self.is_modified = true;
        self.drag = None;
        self.document.new_diagram()
    }

    pub fn select_diagram(&mut self, name: &str) -> Result<(), Error> {
        self.drag = None;
        self.document.set_active(name)
    }

    pub fn rename_diagram(&mut self, name: &str, new_name: &str) -> Result<(), Error> {
        self.undoable(|state| state.document.rename_diagram(name, new_name))
    }

    pub fn remove_diagram(&mut self, name: &str) -> Result<(), Error> {
        self.drag = None;
        self.undoable(|state| state.document.remove_diagram(name).map(|_| ()))
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(EditorSession::new(), EditorOptions::default())
    }
}
