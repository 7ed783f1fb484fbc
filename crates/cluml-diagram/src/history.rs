//! Undo/redo history.
//!
//! The history stores whole-document snapshots. A snapshot is taken before
//! every undoable mutation through the [`UndoBackup`] hook; undo swaps the
//! current document with the most recent snapshot.

use crate::component::Component;
use crate::diagrams::Diagrams;
use cluml_core::ComponentId;
use std::collections::VecDeque;

/// Default number of snapshots kept.
pub const DEFAULT_UNDO_DEPTH: usize = 50;

/// Called before every undoable mutation.
pub trait UndoBackup {
    fn backup(&mut self, document: &Diagrams);
}

/// What a tentative backup displaced, kept until it is committed or
/// cancelled.
#[derive(Debug, Clone, Default)]
struct Pending {
    redo: Vec<Diagrams>,
    evicted: Option<Diagrams>,
}

#[derive(Debug, Clone)]
pub struct History {
    undo_stack: VecDeque<Diagrams>,
    redo_stack: Vec<Diagrams>,
    max_depth: usize,
    pending: Option<Pending>,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_DEPTH)
    }
}

impl History {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
            pending: None,
        }
    }

    /// Saves a snapshot and drops the redo branch.
    pub fn record(&mut self, snapshot: Diagrams) {
        self.pending = None;
        self.undo_stack.push_back(snapshot);
        self.redo_stack.clear();
        while self.undo_stack.len() > self.max_depth {
            self.undo_stack.pop_front();
        }
    }

    /// Saves a snapshot that may still be withdrawn with [`History::cancel`].
    /// The redo branch and any snapshot pushed out by the depth limit are
    /// held until then.
    pub fn record_tentative(&mut self, snapshot: Diagrams) {
        self.undo_stack.push_back(snapshot);
        let evicted = if self.undo_stack.len() > self.max_depth {
            self.undo_stack.pop_front()
        } else {
            None
        };
        self.pending = Some(Pending {
            redo: std::mem::take(&mut self.redo_stack),
            evicted,
        });
    }

    /// Keeps the tentative snapshot for good.
    pub fn commit(&mut self) {
        self.pending = None;
    }

    /// Withdraws the tentative snapshot and returns it. Both stacks are
    /// left as they were before [`History::record_tentative`].
    pub fn cancel(&mut self) -> Option<Diagrams> {
        let pending = self.pending.take()?;
        let snapshot = self.undo_stack.pop_back();
        if let Some(evicted) = pending.evicted {
            self.undo_stack.push_front(evicted);
        }
        self.redo_stack = pending.redo;
        snapshot
    }

    /// True while a tentative snapshot is waiting to be committed.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The most recent snapshot.
    pub fn last(&self) -> Option<&Diagrams> {
        self.undo_stack.back()
    }

    /// Returns the document to restore, keeping `current` for redo.
    pub fn undo(&mut self, current: Diagrams) -> Option<Diagrams> {
        self.pending = None;
        let previous = self.undo_stack.pop_back()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Returns the document to restore, keeping `current` for undo.
    pub fn redo(&mut self, current: Diagrams) -> Option<Diagrams> {
        self.pending = None;
        let next = self.redo_stack.pop()?;
        self.undo_stack.push_back(current);
        Some(next)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear history stacks
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.pending = None;
    }

    /// The component with the same id in the most recent snapshot.
    pub fn predecessor(&self, diagram: &str, id: &ComponentId) -> Option<&Component> {
        self.undo_stack
            .back()?
            .diagram_by_name(diagram)?
            .component_by_id(id.as_str())
            .ok()
            .flatten()
    }
}

impl UndoBackup for History {
    fn backup(&mut self, document: &Diagrams) {
        self.record(document.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Diagrams {
        let mut doc = Diagrams::new(100.0, 100.0);
        doc.rename_diagram("Diagram1", name).unwrap();
        doc
    }

    #[test]
    fn test_undo_redo_swap() {
        let mut history = History::new(10);
        history.backup(&named("First"));

        let restored = history.undo(named("Second")).unwrap();
        assert_eq!(restored.active().name, "First");
        assert!(history.can_redo());

        let again = history.redo(restored).unwrap();
        assert_eq!(again.active().name, "Second");
        assert!(!history.can_redo());
        assert!(history.can_undo());
    }

    #[test]
    fn test_depth_is_bounded() {
        let mut history = History::new(2);
        for name in ["A", "B", "C"] {
            history.backup(&named(name));
        }
        assert_eq!(history.undo_depth(), 2);
        let restored = history.undo(named("D")).unwrap();
        assert_eq!(restored.active().name, "C");
    }

    #[test]
    fn test_cancel_restores_redo_branch() {
        let mut history = History::new(5);
        history.backup(&named("A"));
        history.undo(named("B"));
        assert_eq!(history.redo_depth(), 1);

        history.record_tentative(named("A"));
        assert!(!history.can_redo());
        let withdrawn = history.cancel().unwrap();
        assert_eq!(withdrawn.active().name, "A");
        assert_eq!(history.redo_depth(), 1);
        assert_eq!(history.undo_depth(), 0);
        assert!(history.cancel().is_none());
    }

    #[test]
    fn test_cancel_restores_evicted_snapshot() {
        let mut history = History::new(2);
        history.backup(&named("A"));
        history.backup(&named("B"));
        history.record_tentative(named("C"));
        assert_eq!(history.undo_depth(), 2);

        history.cancel();
        assert_eq!(history.undo_depth(), 2);
        let restored = history.undo(named("D")).unwrap();
        assert_eq!(restored.active().name, "B");
        let restored = history.undo(restored).unwrap();
        assert_eq!(restored.active().name, "A");
    }

    #[test]
    fn test_commit_keeps_snapshot() {
        let mut history = History::new(5);
        history.backup(&named("A"));
        history.undo(named("B"));
        history.record_tentative(named("A"));
        history.commit();
        assert!(!history.is_pending());
        assert!(history.cancel().is_none());
        assert!(!history.can_redo());
        assert_eq!(history.undo_depth(), 1);
    }

    #[test]
    fn test_record_clears_redo() {
        let mut history = History::new(5);
        history.backup(&named("A"));
        history.undo(named("B"));
        history.backup(&named("C"));
        assert!(!history.can_redo());
    }
}
