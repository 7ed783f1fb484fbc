//! Synthetic rule elements and diagram-level rules.

use super::{codes, SanityContext, SanityElement, SanityErrorInfo, SanityFinding};
use crate::association::{Association, AssociationVariant, End};
use crate::class::Class;
use crate::diagram::Diagram;
use cluml_core::ComponentId;
use std::collections::{HashMap, HashSet};

/// Class-wide rules: member count and attributes on interfaces.
pub struct ClassRules<'a> {
    pub class: &'a Class,
}

impl SanityElement for ClassRules<'_> {
    fn element_type(&self) -> &'static str {
        if self.class.is_interface() {
            "Interface"
        } else {
            "Class"
        }
    }

    fn element_name(&self) -> String {
        self.class.name.value().to_string()
    }

    fn process_sanity_check(&self, ctx: &SanityContext<'_>) -> Vec<SanityFinding> {
        let mut findings = Vec::new();
        let members = self.class.attributes.len() + self.class.operations.len();
        if members > ctx.session.property_limit {
            findings.push(ctx.finding(
                codes::TOO_MANY_MEMBERS,
                self.element_type(),
                "",
                "Too many members",
            ));
        }
        if self.class.is_interface() && !self.class.attributes.is_empty() {
            findings.push(ctx.finding(
                codes::INTERFACE_ATTRIBUTES,
                self.element_type(),
                "",
                "Interfaces should not contain attributes",
            ));
        }
        findings
    }
}

/// Association-wide rules: attachment, orientation and whole-end multiplicity.
pub struct AssociationRules<'a> {
    pub association: &'a Association,
}

impl SanityElement for AssociationRules<'_> {
    fn element_type(&self) -> &'static str {
        "Association"
    }

    fn element_name(&self) -> String {
        self.association.variant.label().to_string()
    }

    fn process_sanity_check(&self, ctx: &SanityContext<'_>) -> Vec<SanityFinding> {
        let association = self.association;
        let mut findings = Vec::new();

        let attached = |end: End| {
            association
                .chain
                .termination(end)
                .attached_to
                .as_ref()
                .is_some_and(|id| ctx.diagram.class(id).is_ok())
        };

        for end in [End::Start, End::End] {
            if !attached(end) {
                findings.push(ctx.finding(
                    codes::END_NOT_ATTACHED,
                    self.element_type(),
                    end.label(),
                    "Association end not attached to a class",
                ));
            }
        }

        match association.variant {
            AssociationVariant::Inheritance => {
                let start = association.chain.end_position(End::Start);
                let end = association.chain.end_position(End::End);
                if attached(End::Start) && attached(End::End) && end.y > start.y {
                    findings.push(ctx.finding(
                        codes::INHERITANCE_UPSIDE_DOWN,
                        "Inheritance",
                        "",
                        "Inheritance is upside down (superclass drawn below subclass)",
                    ));
                }
            }
            AssociationVariant::Composition => {
                if !association.chain.termination(End::End).multiplicity.at_most_one() {
                    findings.push(ctx.finding(
                        codes::COMPOSITION_WHOLE_END,
                        "Composition",
                        End::End.label(),
                        "Whole end multiplicity must be at most 1",
                    ));
                }
            }
            _ => {}
        }

        findings
    }
}

fn composition_edges(diagram: &Diagram) -> HashMap<&ComponentId, Vec<&ComponentId>> {
    let mut edges: HashMap<&ComponentId, Vec<&ComponentId>> = HashMap::new();
    for (_, association) in diagram.associations() {
        if association.variant != AssociationVariant::Composition {
            continue;
        }
        let part = association.chain.termination(End::Start).attached_to.as_ref();
        let whole = association.chain.termination(End::End).attached_to.as_ref();
        if let (Some(part), Some(whole)) = (part, whole) {
            edges.entry(part).or_default().push(whole);
        }
    }
    edges
}

fn composes_itself<'a>(
    class: &'a ComponentId,
    edges: &HashMap<&'a ComponentId, Vec<&'a ComponentId>>,
    visited: &mut HashSet<&'a ComponentId>,
    on_stack: &mut HashSet<&'a ComponentId>,
) -> bool {
    visited.insert(class);
    on_stack.insert(class);
    for &next in edges.get(class).into_iter().flatten() {
        if on_stack.contains(next) {
            return true;
        }
        if !visited.contains(next) && composes_itself(next, edges, visited, on_stack) {
            return true;
        }
    }
    on_stack.remove(class);
    false
}

/// True when some class transitively composes itself.
pub fn has_composition_cycle(diagram: &Diagram) -> bool {
    let edges = composition_edges(diagram);
    let mut visited = HashSet::new();
    let mut on_stack = HashSet::new();
    edges.keys().any(|&class| {
        !visited.contains(class) && composes_itself(class, &edges, &mut visited, &mut on_stack)
    })
}

fn has_inheritance_cycle(diagram: &Diagram) -> bool {
    diagram.classes().any(|(id, _)| {
        diagram
            .has_association_cycle(id, &[AssociationVariant::Inheritance])
            .unwrap_or(false)
    })
}

/// Rules that concern the diagram as a whole. Each is reported at most once.
pub(super) fn diagram_findings(diagram: &Diagram) -> Vec<SanityErrorInfo> {
    let mut findings = Vec::new();
    if has_composition_cycle(diagram) {
        findings.push(SanityErrorInfo::new(
            codes::CIRCULAR_COMPOSITION,
            "Diagram",
            diagram.name.as_str(),
            "Circular composition",
        ));
    }
    if has_inheritance_cycle(diagram) {
        findings.push(SanityErrorInfo::new(
            codes::CIRCULAR_INHERITANCE,
            "Diagram",
            diagram.name.as_str(),
            "Circular inheritance",
        ));
    }
    findings
}
