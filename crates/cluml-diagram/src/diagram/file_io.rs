//! Save and load of a single diagram.

use super::Diagram;
use crate::association::{End, NodeChain, TerminationRef};
use crate::class::MIN_WIDTH;
use crate::component::{Component, ComponentKind, ComponentRegistry, ComponentType};
use crate::sanity::{Attribute, Operation};
use crate::serialization::{ComponentObj, DiagramObj, SavedSanityElement};
use cluml_core::{sanitize, ChainError, ComponentId, EditorSession, Error, Vector};

fn save_member(value: &str, position: Vector, visibility: String, is_abstract: bool) -> SavedSanityElement {
    SavedSanityElement {
        value: sanitize::for_save(value),
        x: position.x,
        y: position.y,
        visibility,
        is_abstract,
    }
}

/// Serializable form of one component.
pub fn save_component(component: &Component) -> ComponentObj {
    let palette = component.palette();
    let position = component.position();
    let mut obj = ComponentObj {
        id: component.id().to_string(),
        x: position.x,
        y: position.y,
        name: component.naming().map(sanitize::for_save),
        placed: component.is_placed(),
        palette_desc: palette.palette_desc.to_string(),
        html_desc: palette.html_desc.to_string(),
        palette_lbl: palette.palette_lbl.to_string(),
        file_lbl: palette.file_lbl.to_string(),
        help_lbl: palette.help_lbl.to_string(),
        ..ComponentObj::default()
    };

    match &component.kind {
        ComponentKind::Class(class) => {
            let symbol = |v: Option<crate::sanity::Visibility>| {
                v.map(|v| v.symbol().to_string()).unwrap_or_default()
            };
            obj.attributes = Some(
                class
                    .attributes
                    .iter()
                    .map(|a| save_member(a.value(), a.position, symbol(a.visibility()), false))
                    .collect(),
            );
            obj.operations = Some(
                class
                    .operations
                    .iter()
                    .map(|o| save_member(o.value(), o.position, symbol(o.visibility()), o.is_abstract))
                    .collect(),
            );
            obj.width = Some(class.width());
            obj.is_abstract = class.is_abstract;
        }
        ComponentKind::Association(association) => {
            obj.node_data = Some(association.chain.save());
        }
    }
    obj
}

/// Rebuilds one component of a known type from its saved form. Attachments
/// are restored by [`Diagram::load`] once every class exists.
pub fn load_component(
    obj: &ComponentObj,
    component_type: ComponentType,
    session: &mut EditorSession,
) -> Result<Component, Error> {
    let id = if obj.id.is_empty() {
        let id = session.next_id();
        tracing::warn!("Component without id loaded as {}", id);
        id
    } else {
        ComponentId::new(obj.id.as_str())
    };

    let mut component = Component::with_id(id, component_type);
    component.selectable.position = Vector::new(obj.x, obj.y);
    component.selectable.placed = obj.placed;

    match &mut component.kind {
        ComponentKind::Class(class) => {
            if let Some(name) = &obj.name {
                class.name.set_value(sanitize::for_load(name));
            }
            class.is_abstract = obj.is_abstract;
            for saved in obj.attributes.iter().flatten() {
                class.attributes.push(Attribute::new(sanitize::for_load(&saved.value)));
            }
            for saved in obj.operations.iter().flatten() {
                let mut operation = Operation::new(sanitize::for_load(&saved.value));
                operation.is_abstract = saved.is_abstract;
                class.operations.push(operation);
            }
            class.restore_width(obj.width.unwrap_or(MIN_WIDTH), session);
        }
        ComponentKind::Association(association) => {
            let node_data = obj.node_data.as_ref().ok_or(ChainError::Unterminated)?;
            association.chain = NodeChain::load(node_data)?;
            component.selectable.position = association.start_position();
        }
    }
    Ok(component)
}

impl Diagram {
    pub fn save(&self) -> DiagramObj {
        DiagramObj {
            name: sanitize::for_save(&self.name),
            width: self.width,
            height: self.height,
            components: self.components.iter().map(save_component).collect(),
        }
    }

    /// Rebuilds a diagram from its saved form.
    ///
    /// Components load in palette load order so classes exist before the
    /// associations that attach to them. Unknown component types and
    /// attachments to missing classes are dropped with a warning.
    pub fn load(
        obj: &DiagramObj,
        registry: &dyn ComponentRegistry,
        session: &mut EditorSession,
    ) -> Result<Diagram, Error> {
        let mut diagram = Diagram::new(sanitize::for_load(&obj.name), obj.width, obj.height);

        for saved in &obj.components {
            session.observe_id(&ComponentId::new(saved.id.as_str()));
        }

        let mut typed: Vec<(&ComponentObj, ComponentType)> = Vec::new();
        for saved in &obj.components {
            match registry.get(&saved.file_lbl) {
                Some(component_type) => typed.push((saved, component_type)),
                None => tracing::warn!(
                    "Skipping component {} of unknown type {}",
                    saved.id,
                    saved.file_lbl
                ),
            }
        }
        typed.sort_by_key(|(_, component_type)| component_type.palette().load_order);

        for (saved, component_type) in typed {
            let component = load_component(saved, component_type, session)?;
            diagram.add(component);
        }

        diagram.restore_attachments();
        Ok(diagram)
    }

    fn restore_attachments(&mut self) {
        let mut links = Vec::new();
        for (id, association) in self.associations() {
            for end in [End::Start, End::End] {
                if let Some(class) = association.attached_class(end) {
                    links.push((id.clone(), end, class.clone()));
                }
            }
        }

        for (association, end, class) in links {
            let termination = TerminationRef {
                association: association.clone(),
                end,
            };
            if self.class(&class).is_ok() {
                if let Ok(class) = self.class_mut(&class) {
                    class.attach(termination);
                }
                continue;
            }
            tracing::warn!(
                "Detaching {} end of {} from missing class {}",
                end.label(),
                association,
                class
            );
            if let Ok(association) = self.association_mut(&association) {
                association.chain.termination_mut(end).attached_to = None;
            }
        }
    }
}
