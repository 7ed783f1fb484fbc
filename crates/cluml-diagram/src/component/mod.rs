//! Diagram components.
//!
//! Components form a closed set of variants: class boxes (classes and
//! interfaces) and associations (five relationship kinds). Shared placement
//! state lives in [`Selectable`]; per-variant data lives in
//! [`ComponentKind`] and is reached by matching on it.

pub mod palette;

use crate::association::{Association, AssociationVariant};
use crate::class::{Class, ClassVariant};
use crate::sanity::{Checkable, SanityContext, SanityElement, SanityFinding};
use crate::selectable::Selectable;
use cluml_core::{ComponentId, EditorSession, Rect, Vector};
use palette::PaletteInfo;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use palette::{BuiltinRegistry, ComponentRegistry};

/// Concrete component type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentType {
    Class,
    Interface,
    Association,
    Inheritance,
    Composition,
    Aggregation,
    Containment,
}

impl ComponentType {
    pub const ALL: [ComponentType; 7] = [
        ComponentType::Class,
        ComponentType::Interface,
        ComponentType::Association,
        ComponentType::Inheritance,
        ComponentType::Composition,
        ComponentType::Aggregation,
        ComponentType::Containment,
    ];

    pub fn palette(self) -> &'static PaletteInfo {
        match self {
            ComponentType::Class => &palette::CLASS,
            ComponentType::Interface => &palette::INTERFACE,
            ComponentType::Association => &palette::ASSOCIATION,
            ComponentType::Inheritance => &palette::INHERITANCE,
            ComponentType::Composition => &palette::COMPOSITION,
            ComponentType::Aggregation => &palette::AGGREGATION,
            ComponentType::Containment => &palette::CONTAINMENT,
        }
    }

    pub fn file_lbl(self) -> &'static str {
        self.palette().file_lbl
    }

    pub fn class_variant(self) -> Option<ClassVariant> {
        match self {
            ComponentType::Class => Some(ClassVariant::Class),
            ComponentType::Interface => Some(ClassVariant::Interface),
            _ => None,
        }
    }

    pub fn association_variant(self) -> Option<AssociationVariant> {
        match self {
            ComponentType::Association => Some(AssociationVariant::Association),
            ComponentType::Inheritance => Some(AssociationVariant::Inheritance),
            ComponentType::Composition => Some(AssociationVariant::Composition),
            ComponentType::Aggregation => Some(AssociationVariant::Aggregation),
            ComponentType::Containment => Some(AssociationVariant::Containment),
            _ => None,
        }
    }

    pub fn is_class(self) -> bool {
        self.class_variant().is_some()
    }

    pub fn is_association(self) -> bool {
        self.association_variant().is_some()
    }
}

impl From<ClassVariant> for ComponentType {
    fn from(variant: ClassVariant) -> Self {
        match variant {
            ClassVariant::Class => ComponentType::Class,
            ClassVariant::Interface => ComponentType::Interface,
        }
    }
}

impl From<AssociationVariant> for ComponentType {
    fn from(variant: AssociationVariant) -> Self {
        match variant {
            AssociationVariant::Association => ComponentType::Association,
            AssociationVariant::Inheritance => ComponentType::Inheritance,
            AssociationVariant::Composition => ComponentType::Composition,
            AssociationVariant::Aggregation => ComponentType::Aggregation,
            AssociationVariant::Containment => ComponentType::Containment,
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.palette().palette_lbl)
    }
}

/// Per-variant component data.
#[derive(Debug, Clone)]
pub enum ComponentKind {
    Class(Class),
    Association(Association),
}

/// A component placed (or about to be placed) in a diagram.
#[derive(Debug, Clone)]
pub struct Component {
    id: ComponentId,
    pub selectable: Selectable,
    pub kind: ComponentKind,
}

impl Component {
    /// Creates a component with a fresh id from the session.
    pub fn new(component_type: ComponentType, session: &mut EditorSession) -> Self {
        let mut component = Self::with_id(session.next_id(), component_type);
        if let ComponentKind::Class(class) = &mut component.kind {
            class.relayout(session);
        }
        component
    }

    /// Creates a component with a known id, as when loading.
    pub fn with_id(id: ComponentId, component_type: ComponentType) -> Self {
        let association = |variant| {
            ComponentKind::Association(Association::new(variant, Vector::ZERO, Vector::ZERO))
        };
        let kind = match component_type {
            ComponentType::Class => ComponentKind::Class(Class::new(ClassVariant::Class)),
            ComponentType::Interface => ComponentKind::Class(Class::new(ClassVariant::Interface)),
            ComponentType::Association => association(AssociationVariant::Association),
            ComponentType::Inheritance => association(AssociationVariant::Inheritance),
            ComponentType::Composition => association(AssociationVariant::Composition),
            ComponentType::Aggregation => association(AssociationVariant::Aggregation),
            ComponentType::Containment => association(AssociationVariant::Containment),
        };
        Self {
            id,
            selectable: Selectable::new(component_type.palette().draw_order),
            kind,
        }
    }

    pub fn id(&self) -> &ComponentId {
        &self.id
    }

    pub fn component_type(&self) -> ComponentType {
        match &self.kind {
            ComponentKind::Class(class) => class.variant.into(),
            ComponentKind::Association(association) => association.variant.into(),
        }
    }

    pub fn palette(&self) -> &'static PaletteInfo {
        self.component_type().palette()
    }

    pub fn draw_order(&self) -> i32 {
        self.selectable.draw_order
    }

    pub fn is_placed(&self) -> bool {
        self.selectable.placed
    }

    /// Unique name within the diagram, for types that carry one.
    pub fn naming(&self) -> Option<&str> {
        match &self.kind {
            ComponentKind::Class(class) if !class.name.is_empty() => Some(class.name.value()),
            _ => None,
        }
    }

    /// Name used in findings and listings.
    pub fn display_name(&self) -> String {
        match self.naming() {
            Some(naming) => naming.to_string(),
            None => format!("{} {}", self.palette().palette_lbl, self.id),
        }
    }

    /// Anchor position: a class's center or an association's start node.
    pub fn position(&self) -> Vector {
        match &self.kind {
            ComponentKind::Class(_) => self.selectable.position,
            ComponentKind::Association(association) => association.start_position(),
        }
    }

    pub fn bounds(&self) -> Rect {
        match &self.kind {
            ComponentKind::Class(class) => class.bounds(self.selectable.position),
            ComponentKind::Association(association) => association.bounds(self.selectable.placed),
        }
    }

    pub fn as_class(&self) -> Option<&Class> {
        match &self.kind {
            ComponentKind::Class(class) => Some(class),
            ComponentKind::Association(_) => None,
        }
    }

    pub fn as_class_mut(&mut self) -> Option<&mut Class> {
        match &mut self.kind {
            ComponentKind::Class(class) => Some(class),
            ComponentKind::Association(_) => None,
        }
    }

    pub fn as_association(&self) -> Option<&Association> {
        match &self.kind {
            ComponentKind::Association(association) => Some(association),
            ComponentKind::Class(_) => None,
        }
    }

    pub fn as_association_mut(&mut self) -> Option<&mut Association> {
        match &mut self.kind {
            ComponentKind::Association(association) => Some(association),
            ComponentKind::Class(_) => None,
        }
    }
}

impl SanityElement for Component {
    fn element_type(&self) -> &'static str {
        self.palette().palette_lbl
    }

    fn element_name(&self) -> String {
        self.display_name()
    }

    fn process_sanity_check(&self, _ctx: &SanityContext<'_>) -> Vec<SanityFinding> {
        Vec::new()
    }

    fn forward_sanity_check<'a>(&'a self) -> Box<dyn Iterator<Item = Checkable<'a>> + 'a> {
        match &self.kind {
            ComponentKind::Class(class) => class.forward_sanity_check(),
            ComponentKind::Association(association) => association.forward_sanity_check(),
        }
    }

    fn attached_elements(&self) -> Vec<&dyn SanityElement> {
        match &self.kind {
            ComponentKind::Class(class) => class.attached_elements(),
            ComponentKind::Association(association) => association.attached_elements(),
        }
    }
}
