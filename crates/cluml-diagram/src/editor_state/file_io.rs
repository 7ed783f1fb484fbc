//! File I/O operations (save, load, new) for editor state.

use super::EditorState;
use crate::diagrams::Diagrams;
use crate::serialization::DiagramsFile;
use anyhow::Context;

impl EditorState {
    /// Save document to file.
    pub fn save_to_file(&mut self, path: impl AsRef<std::path::Path>) -> anyhow::Result<()> {
        self.document.save().save_to_file(&path)?;

        self.current_file_path = Some(path.as_ref().to_path_buf());
        self.is_modified = false;
        tracing::info!("Saved document to {}", path.as_ref().display());

        Ok(())
    }

    /// Load document from file.
    pub fn load_from_file(&mut self, path: impl AsRef<std::path::Path>) -> anyhow::Result<()> {
        let file = DiagramsFile::load_from_file(&path)?;
        let size = (self.options.canvas_width, self.options.canvas_height);
        let document = Diagrams::load(&file, &self.registry, &mut self.session, size)
            .with_context(|| format!("Failed to load document {}", path.as_ref().display()))?;

        self.document = document;
        self.drag = None;
        self.current_file_path = Some(path.as_ref().to_path_buf());
        self.is_modified = false;
        self.clear_history();

        Ok(())
    }

    /// Create new document (clear all).
    pub fn new_document(&mut self) {
        self.session.begin_document();
        let mut document = Diagrams::new(self.options.canvas_width, self.options.canvas_height);
        document.grid = self.options.grid;
        document.snap = self.options.snap;

        self.document = document;
        self.drag = None;
        self.current_file_path = None;
        self.is_modified = false;
        self.clear_history();
    }
}
