//! Component operations (add, delete, drag, edit) for editor state.

use super::EditorState;
use crate::association::End;
use crate::class::ClassField;
use crate::component::{Component, ComponentType};
use crate::diagram::{FieldEditor, NodeHandle, Touched};
use cluml_core::{ComponentId, Error, Vector};

/// Length of a freshly dropped, unattached association.
const NEW_ASSOCIATION_LENGTH: f64 = 120.0;

/// What the pointer is currently dragging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Drag {
    Component(ComponentId),
    Node(NodeHandle),
}

impl EditorState {
    /// Places a new component of `component_type` at `position` in the
    /// active diagram.
    pub fn add_component(&mut self, component_type: ComponentType, position: Vector) -> ComponentId {
        self.history.record(self.document.clone());
        self.is_modified = true;

        let mut component = Component::new(component_type, &mut self.session);
        component.selectable.position = position;
        component.selectable.placed = true;
        if let Some(association) = component.as_association_mut() {
            association.chain.set_end_position(End::Start, position);
            association
                .chain
                .set_end_position(End::End, position + Vector::new(NEW_ASSOCIATION_LENGTH, 0.0));
        }
        self.document.active_mut().add(component)
    }

    /// Adds an association of `component_type` running from class `from`
    /// to class `to`.
    pub fn add_association(
        &mut self,
        component_type: ComponentType,
        from: &ComponentId,
        to: &ComponentId,
    ) -> Result<ComponentId, Error> {
        if !component_type.is_association() {
            return Err(Error::other(format!(
                "{} is not an association type",
                component_type
            )));
        }
        self.undoable(|state| {
            let mut component = Component::new(component_type, &mut state.session);
            component.selectable.placed = true;
            let diagram = state.document.active_mut();
            let id = diagram.add(component);
            diagram.connect(&id, from, to)?;
            let start = diagram.association(&id)?.start_position();
            diagram.component_mut(&id)?.selectable.position = start;
            Ok(id)
        })
    }

    /// Deletes a component; classes take their associations with them.
    pub fn delete(&mut self, id: &ComponentId) -> Result<Vec<Component>, Error> {
        if self.dragged_component() == Some(id) {
            self.drag = None;
        }
        self.undoable(|state| Ok(state.document.active_mut().remove(id)?))
    }

    fn dragged_component(&self) -> Option<&ComponentId> {
        match &self.drag {
            Some(Drag::Component(id)) => Some(id),
            Some(Drag::Node(handle)) => Some(&handle.association),
            None => None,
        }
    }

    /// Starts a drag at `point`. Touching an association edge inserts a
    /// bend point, so the document is backed up first. The backup is
    /// withdrawn again when nothing was hit, and settled in
    /// [`EditorState::pointer_up`] otherwise.
    pub fn pointer_down(&mut self, point: Vector) -> Result<Option<Touched>, Error> {
        self.history.record_tentative(self.document.clone());
        self.drag = None;
        let touched = match self.document.active_mut().touch(point) {
            Ok(Some(touched)) => touched,
            Ok(None) => {
                self.cancel_backup();
                return Ok(None);
            }
            Err(err) => {
                self.cancel_backup();
                return Err(err.into());
            }
        };
        match &touched {
            Touched::Component(id) => {
                match self.document.active_mut().component_mut(id) {
                    Ok(component) => component.selectable.grab(point),
                    Err(err) => {
                        self.cancel_backup();
                        return Err(err.into());
                    }
                }
                self.drag = Some(Drag::Component(id.clone()));
            }
            Touched::Node(handle) => self.drag = Some(Drag::Node(handle.clone())),
        }
        Ok(Some(touched))
    }

    /// Moves whatever is being dragged.
    pub fn pointer_move(&mut self, point: Vector) -> Result<(), Error> {
        let diagram = self.document.active_mut();
        match &self.drag {
            Some(Drag::Component(id)) => {
                let target = diagram.component(id)?.selectable.drag_target(point);
                diagram.move_component(id, target)?;
            }
            Some(Drag::Node(handle)) => diagram.move_node(handle, point)?,
            None => {}
        }
        Ok(())
    }

    /// Ends the drag, snapping to the grid when snapping is on. A click that
    /// left the document unchanged does not add an undo step.
    pub fn pointer_up(&mut self, point: Vector) -> Result<(), Error> {
        let result = self.drop_dragged(point);
        self.settle_backup();
        result
    }

    fn drop_dragged(&mut self, point: Vector) -> Result<(), Error> {
        self.pointer_move(point)?;
        let snap = self.snap_grid();
        let diagram = self.document.active_mut();
        match self.drag.take() {
            Some(Drag::Component(id)) => diagram.drop_component(&id, snap)?,
            Some(Drag::Node(handle)) => diagram.drop_node(&handle, snap)?,
            None => {}
        }
        Ok(())
    }

    fn settle_backup(&mut self) {
        if !self.history.is_pending() {
            return;
        }
        let unchanged = self
            .history
            .last()
            .is_some_and(|snapshot| snapshot.save() == self.document.save());
        if unchanged {
            self.history.cancel();
        } else {
            self.history.commit();
            self.is_modified = true;
        }
    }

    /// Commits an edited class field. A rejected value leaves the document
    /// and the history untouched.
    pub fn commit_edit(&mut self, id: &ComponentId, field: ClassField, value: &str) -> Result<(), Error> {
        let session = self.session.clone();
        self.undoable(|state| {
            state
                .document
                .active_mut()
                .commit_edit(id, field, value, &session)
        })
    }

    pub fn open_field_editor(&self, point: Vector, editor: &mut dyn FieldEditor) -> bool {
        self.document.active().open_field_editor(point, editor)
    }

    /// Makes every edge of an association orthogonal. Returns the number of
    /// corner nodes added.
    pub fn straighten(&mut self, id: &ComponentId) -> Result<usize, Error> {
        self.undoable(|state| {
            let association = state.document.active_mut().association_mut(id)?;
            Ok(association.chain.straighten()?)
        })
    }
}
