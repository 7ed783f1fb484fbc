//! Diagram container.
//!
//! A diagram keeps its components sorted by draw order (lowest first), so
//! drawing walks the list forwards and hit-testing walks it backwards. It
//! also owns the relations between components: class boxes know which
//! association ends are attached to them, and every geometric edit keeps
//! both sides consistent.

mod file_io;
mod traversal;

pub use file_io::{load_component, save_component};
pub use traversal::ReachableClasses;

use crate::association::{Association, End, NodeId, TerminationRef, NODE_TOUCH_RADIUS};
use crate::class::{Class, ClassField};
use crate::component::{Component, ComponentKind, ComponentType};
use crate::naming;
use cluml_core::{ComponentId, DiagramError, EditError, EditorSession, Error, Rect, Vector};
use std::collections::HashMap;

/// A node of an association, as grabbed by the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    pub association: ComponentId,
    pub node: NodeId,
}

/// Result of a hit test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Touched {
    Component(ComponentId),
    Node(NodeHandle),
}

/// Opens an in-place editor for a class field.
pub trait FieldEditor {
    fn open_field(&mut self, component: &ComponentId, field: ClassField, bounds: Rect, current: &str);
}

#[derive(Debug, Clone)]
pub struct Diagram {
    pub name: String,
    pub width: f64,
    pub height: f64,
    components: Vec<Component>,
    class_map: HashMap<String, usize>,
}

impl Diagram {
    pub fn new(name: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            components: Vec::new(),
            class_map: HashMap::new(),
        }
    }

    /// Components in draw order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Inserts a component, keeping draw order, and names it if its type
    /// requires a name and it has none.
    pub fn add(&mut self, mut component: Component) -> ComponentId {
        self.assign_naming(&mut component);
        let id = component.id().clone();
        let component_type = component.component_type();

        if self.components.len() <= 2 {
            self.components.push(component);
            self.components.sort_by_key(Component::draw_order);
        } else {
            let order = component.draw_order();
            let index = self
                .components
                .partition_point(|existing| existing.draw_order() <= order);
            self.components.insert(index, component);
        }

        self.rebuild_class_map();
        tracing::debug!("Added {} {} to {}", component_type, id, self.name);
        id
    }

    fn assign_naming(&self, component: &mut Component) {
        let Some(prefix) = component.palette().naming_prefix else {
            return;
        };
        if let Some(class) = component.as_class_mut() {
            if class.name.is_empty() {
                let name = naming::next_free_name(prefix, |name| self.class_map.contains_key(name));
                class.name.set_value(name);
                class.layout();
            }
        }
    }

    fn rebuild_class_map(&mut self) {
        self.class_map.clear();
        for component in &self.components {
            if let Some(class) = component.as_class() {
                if !class.name.is_empty() {
                    *self.class_map.entry(class.name.value().to_string()).or_insert(0) += 1;
                }
            }
        }
    }

    /// Class name to number of classes using it.
    pub fn class_map(&self) -> &HashMap<String, usize> {
        &self.class_map
    }

    pub fn name_count(&self, name: &str) -> usize {
        self.class_map.get(name).copied().unwrap_or(0)
    }

    fn index_of(&self, id: &ComponentId) -> Option<usize> {
        self.components.iter().position(|c| c.id() == id)
    }

    /// Looks a component up by id. An empty id is a caller bug.
    pub fn component_by_id(&self, id: &str) -> Result<Option<&Component>, DiagramError> {
        if id.is_empty() {
            return Err(DiagramError::MissingId);
        }
        Ok(self.components.iter().find(|c| c.id().as_str() == id))
    }

    pub fn component_by_naming(&self, naming: &str) -> Option<&Component> {
        self.components
            .iter()
            .find(|c| c.naming() == Some(naming))
    }

    pub fn components_by_type(&self, component_type: ComponentType) -> Vec<&Component> {
        self.components
            .iter()
            .filter(|c| c.component_type() == component_type)
            .collect()
    }

    pub fn component(&self, id: &ComponentId) -> Result<&Component, DiagramError> {
        self.components
            .iter()
            .find(|c| c.id() == id)
            .ok_or_else(|| DiagramError::ComponentNotFound { id: id.to_string() })
    }

    pub fn component_mut(&mut self, id: &ComponentId) -> Result<&mut Component, DiagramError> {
        self.components
            .iter_mut()
            .find(|c| c.id() == id)
            .ok_or_else(|| DiagramError::ComponentNotFound { id: id.to_string() })
    }

    pub fn class(&self, id: &ComponentId) -> Result<&Class, DiagramError> {
        self.component(id)?
            .as_class()
            .ok_or_else(|| DiagramError::NotAClass { id: id.to_string() })
    }

    pub fn class_mut(&mut self, id: &ComponentId) -> Result<&mut Class, DiagramError> {
        self.component_mut(id)?
            .as_class_mut()
            .ok_or_else(|| DiagramError::NotAClass { id: id.to_string() })
    }

    pub fn association(&self, id: &ComponentId) -> Result<&Association, DiagramError> {
        self.component(id)?
            .as_association()
            .ok_or_else(|| DiagramError::NotAnAssociation { id: id.to_string() })
    }

    pub fn association_mut(&mut self, id: &ComponentId) -> Result<&mut Association, DiagramError> {
        self.component_mut(id)?
            .as_association_mut()
            .ok_or_else(|| DiagramError::NotAnAssociation { id: id.to_string() })
    }

    pub fn classes(&self) -> impl Iterator<Item = (&ComponentId, &Class)> {
        self.components
            .iter()
            .filter_map(|c| c.as_class().map(|class| (c.id(), class)))
    }

    pub fn associations(&self) -> impl Iterator<Item = (&ComponentId, &Association)> {
        self.components
            .iter()
            .filter_map(|c| c.as_association().map(|association| (c.id(), association)))
    }

    /// Union of the bounds of every placed component.
    pub fn bounds(&self) -> Rect {
        self.components
            .iter()
            .filter(|c| c.is_placed())
            .fold(Rect::EMPTY, |acc, c| acc.union(&c.bounds()))
    }

    /// Topmost hit under `point`. Touching an association edge inserts a
    /// bend point there and returns it.
    pub fn touch(&mut self, point: Vector) -> Result<Option<Touched>, DiagramError> {
        for component in self.components.iter_mut().rev() {
            let placed = component.selectable.placed;
            let anchor = component.selectable.position;
            let id = component.id().clone();
            match &mut component.kind {
                ComponentKind::Class(class) => {
                    if placed && class.bounds(anchor).contains_point(point) {
                        return Ok(Some(Touched::Component(id)));
                    }
                }
                ComponentKind::Association(association) => {
                    if let Some(node) = association.touch(point, placed)? {
                        return Ok(Some(Touched::Node(NodeHandle {
                            association: id,
                            node,
                        })));
                    }
                }
            }
        }
        Ok(None)
    }

    /// Topmost placed class whose box (plus the node touch radius) holds `point`.
    pub fn class_at(&self, point: Vector) -> Option<&ComponentId> {
        self.components
            .iter()
            .rev()
            .filter(|c| c.is_placed())
            .find(|c| {
                c.as_class().is_some()
                    && c.bounds().inflate(NODE_TOUCH_RADIUS).contains_point(point)
            })
            .map(Component::id)
    }

    /// Removes a component. Removing a class also removes every association
    /// attached to it; removing an association detaches it from its classes.
    /// Returns everything removed.
    pub fn remove(&mut self, id: &ComponentId) -> Result<Vec<Component>, DiagramError> {
        let index = self
            .index_of(id)
            .ok_or_else(|| DiagramError::ComponentNotFound { id: id.to_string() })?;
        let mut removed = Vec::new();

        let attached: Option<Vec<ComponentId>> = self.components[index]
            .as_class()
            .map(|class| class.attached().map(|r| r.association.clone()).collect());
        match attached {
            Some(mut attached) => {
                attached.dedup();
                for association in attached {
                    if self.index_of(&association).is_some() {
                        tracing::debug!("Cascading delete of {} from {}", association, id);
                        removed.extend(self.remove(&association)?);
                    }
                }
            }
            None => {
                self.detach(id, End::Start)?;
                self.detach(id, End::End)?;
            }
        }

        let index = self
            .index_of(id)
            .ok_or_else(|| DiagramError::ComponentNotFound { id: id.to_string() })?;
        removed.push(self.components.remove(index));
        self.rebuild_class_map();
        Ok(removed)
    }

    /// Attaches an association end to a class, on the side of the class
    /// closest to where the end currently is.
    pub fn attach(
        &mut self,
        association: &ComponentId,
        end: End,
        class: &ComponentId,
    ) -> Result<(), DiagramError> {
        let rect = self.component(class)?.bounds().normalize();
        self.class(class)?;
        let current = self.association(association)?.chain.end_position(end);
        let (side, _) = rect.closest_side_t(current);

        self.detach(association, end)?;
        let a = self.association_mut(association)?;
        let termination = a.chain.termination_mut(end);
        termination.attached_to = Some(class.clone());
        termination.side = side;
        a.chain.set_end_position(end, rect.point_on_side(side));
        a.chain.sync()?;

        self.class_mut(class)?.attach(TerminationRef {
            association: association.clone(),
            end,
        });
        Ok(())
    }

    /// Detaches an association end from whatever class holds it.
    pub fn detach(&mut self, association: &ComponentId, end: End) -> Result<(), DiagramError> {
        let previous = self
            .association_mut(association)?
            .chain
            .termination_mut(end)
            .attached_to
            .take();
        if let Some(class) = previous {
            if let Ok(class) = self.class_mut(&class) {
                class.detach(&TerminationRef {
                    association: association.clone(),
                    end,
                });
            }
        }
        Ok(())
    }

    /// Attaches both ends, each on the side facing the other class.
    pub fn connect(
        &mut self,
        association: &ComponentId,
        from: &ComponentId,
        to: &ComponentId,
    ) -> Result<(), DiagramError> {
        let from_center = self.component(from)?.bounds().center();
        let to_center = self.component(to)?.bounds().center();
        {
            let a = self.association_mut(association)?;
            a.chain.set_end_position(End::Start, to_center);
            a.chain.set_end_position(End::End, from_center);
        }
        self.attach(association, End::Start, from)?;
        self.attach(association, End::End, to)
    }

    /// Moves attached association ends back onto the class perimeter.
    pub fn resync_attachments(&mut self, class: &ComponentId) -> Result<(), DiagramError> {
        let rect = self.component(class)?.bounds().normalize();
        let attached: Vec<TerminationRef> = self.class(class)?.attached().cloned().collect();
        for termination in attached {
            let a = self.association_mut(&termination.association)?;
            let side = a.chain.termination(termination.end).side;
            a.chain.set_end_position(termination.end, rect.point_on_side(side));
            a.chain.sync()?;
        }
        Ok(())
    }

    /// Moves a component's anchor, dragging attached ends along.
    pub fn move_component(&mut self, id: &ComponentId, position: Vector) -> Result<(), DiagramError> {
        let component = self.component_mut(id)?;
        component.selectable.position = position;
        if let Some(association) = component.as_association_mut() {
            let delta = position - association.start_position();
            association.chain.translate(delta);
            return Ok(());
        }
        self.resync_attachments(id)
    }

    /// Finishes placing a component, snapping it to the grid if asked.
    pub fn drop_component(&mut self, id: &ComponentId, snap: Option<f64>) -> Result<(), DiagramError> {
        let component = self.component_mut(id)?;
        component.selectable.placed = true;
        component.selectable.release();
        let position = component.position();
        let is_class = component.as_class().is_some();
        match snap {
            Some(grid) => self.move_component(id, position.snap(grid)),
            None if is_class => self.resync_attachments(id),
            None => Ok(()),
        }
    }

    /// Moves a single node while it is being dragged.
    pub fn move_node(&mut self, handle: &NodeHandle, position: Vector) -> Result<(), DiagramError> {
        let association = self.association_mut(&handle.association)?;
        association.chain.get_mut(handle.node)?.position = position;
        association.chain.sync()?;
        Ok(())
    }

    /// Finishes dragging a node.
    ///
    /// A termination node attaches to the class under it, or is detached if
    /// there is none. An intermediate node dropped next to a neighbour is
    /// removed.
    pub fn drop_node(&mut self, handle: &NodeHandle, snap: Option<f64>) -> Result<(), DiagramError> {
        let association = self.association(&handle.association)?;
        let end = association.chain.end_of(handle.node);
        let mut position = association.chain.get(handle.node)?.position;
        if let Some(grid) = snap {
            position = position.snap(grid);
        }
        self.association_mut(&handle.association)?
            .chain
            .get_mut(handle.node)?
            .position = position;

        match end {
            Some(end) => match self.class_at(position).cloned() {
                Some(class) => self.attach(&handle.association, end, &class),
                None => self.detach(&handle.association, end),
            },
            None => {
                let association = self.association_mut(&handle.association)?;
                association.simplify(handle.node)?;
                association.chain.sync()?;
                Ok(())
            }
        }
    }

    /// Renames a class, refusing empty or duplicate names.
    pub fn rename_class(&mut self, id: &ComponentId, name: &str) -> Result<(), Error> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EditError::Empty {
                field: "name".to_string(),
            }
            .into());
        }
        let taken = self
            .classes()
            .any(|(other, class)| other != id && class.name.value() == name);
        if taken {
            return Err(EditError::DuplicateNaming {
                name: name.to_string(),
            }
            .into());
        }

        let class = self.class_mut(id)?;
        class.name.set_value(name);
        class.layout();
        self.rebuild_class_map();
        self.resync_attachments(id)?;
        Ok(())
    }

    /// Applies an edit to a class field. Rejected edits leave the class as it was.
    pub fn commit_edit(
        &mut self,
        id: &ComponentId,
        field: ClassField,
        value: &str,
        session: &EditorSession,
    ) -> Result<(), Error> {
        match field {
            ClassField::Name => self.rename_class(id, value),
            _ => {
                self.class_mut(id)?.set_member(field, value, session)?;
                self.resync_attachments(id)?;
                Ok(())
            }
        }
    }

    /// Asks `editor` to open the class field under `point`. Returns whether
    /// a field was found.
    pub fn open_field_editor(&self, point: Vector, editor: &mut dyn FieldEditor) -> bool {
        for component in self.components.iter().rev().filter(|c| c.is_placed()) {
            let Some(class) = component.as_class() else {
                continue;
            };
            let anchor = component.selectable.position;
            let Some(field) = class.field_at(anchor, point) else {
                continue;
            };
            let bounds = class.field_bounds(anchor, field).unwrap_or_else(|| class.bounds(anchor));
            let current = class.field_value(field).unwrap_or_default();
            editor.open_field(component.id(), field, bounds, current);
            return true;
        }
        false
    }
}
