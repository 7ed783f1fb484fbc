//! Sanity-check engine.
//!
//! Validation is pull based. Every component exposes the checkable elements
//! it owns in two ways: a lazy forward sequence (which may itself yield
//! forwarding elements) and a list of directly attached elements. The driver
//! drains both for each component of the current diagram, runs every element
//! once, and adds the diagram-level rules (circular composition and circular
//! inheritance). Findings are data; nothing here returns an error.

mod attribute;
mod class_name;
mod multiplicity;
mod operation;
mod rules;
mod tag;
mod visibility;

pub use attribute::Attribute;
pub use class_name::ClassName;
pub use multiplicity::{Multiplicity, MultiplicityKind};
pub use operation::{Operation, Parameter};
pub use rules::{has_composition_cycle, AssociationRules, ClassRules};
pub use tag::AssociationTag;
pub use visibility::Visibility;

use crate::component::Component;
use crate::diagram::Diagram;
use crate::diagrams::Diagrams;
use cluml_core::EditorSession;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Numeric rule codes. Rendered as `E` followed by four digits.
pub mod codes {
    pub const LEGACY: u16 = 0;

    pub const ATTRIBUTE_VISIBILITY_MISSING: u16 = 101;
    pub const ATTRIBUTE_NAME_MISSING: u16 = 102;
    pub const ATTRIBUTE_TYPE_MISSING: u16 = 103;
    pub const ATTRIBUTE_NAME_WHITESPACE: u16 = 104;
    pub const ATTRIBUTE_NAME_CASE: u16 = 105;

    pub const OPERATION_VISIBILITY_MISSING: u16 = 201;
    pub const OPERATION_NAME_MISSING: u16 = 202;
    pub const OPERATION_PARENTHESES_MISSING: u16 = 203;
    pub const PARAMETER_TYPE_MISSING: u16 = 204;
    pub const OPERATION_NAME_WHITESPACE: u16 = 205;

    pub const CLASS_NAME_MISSING: u16 = 301;
    pub const CLASS_NAME_CASE: u16 = 302;
    pub const CLASS_NAME_WHITESPACE: u16 = 303;
    pub const CLASS_NAME_DUPLICATE: u16 = 304;
    pub const TOO_MANY_MEMBERS: u16 = 305;
    pub const INTERFACE_ATTRIBUTES: u16 = 306;

    pub const MULTIPLICITY_INVALID: u16 = 401;
    pub const MULTIPLICITY_BOUNDS: u16 = 402;
    pub const COMPOSITION_WHOLE_END: u16 = 403;
    pub const ROLE_WHITESPACE: u16 = 404;
    pub const END_NOT_ATTACHED: u16 = 405;
    pub const INHERITANCE_UPSIDE_DOWN: u16 = 406;

    pub const CIRCULAR_COMPOSITION: u16 = 501;
    pub const CIRCULAR_INHERITANCE: u16 = 502;
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanityErrorInfo {
    pub error_code: String,
    pub element_type: String,
    pub element_name: String,
    pub description: String,
}

impl SanityErrorInfo {
    pub fn new(
        code: u16,
        element_type: impl Into<String>,
        element_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            error_code: format!("E{:04}", code),
            element_type: element_type.into(),
            element_name: element_name.into(),
            description: description.into(),
        }
    }
}

/// What an element reports: a structured finding or a bare message.
#[derive(Debug, Clone, PartialEq)]
pub enum SanityFinding {
    Info(SanityErrorInfo),
    Legacy(String),
}

impl SanityFinding {
    /// Normalizes into a [`SanityErrorInfo`]; bare messages get the legacy code.
    pub fn into_info(self, element: &dyn SanityElement, ctx: &SanityContext<'_>) -> SanityErrorInfo {
        match self {
            SanityFinding::Info(info) => info,
            SanityFinding::Legacy(description) => SanityErrorInfo::new(
                codes::LEGACY,
                element.element_type(),
                ctx.qualify(&element.element_name()),
                description,
            ),
        }
    }
}

/// Everything an element may consult while checking itself.
pub struct SanityContext<'a> {
    pub session: &'a EditorSession,
    pub diagram: &'a Diagram,
    /// Display name of the component owning the element.
    pub owner: &'a str,
}

impl<'a> SanityContext<'a> {
    /// `owner.name`, or just the owner when `name` is empty.
    pub fn qualify(&self, name: &str) -> String {
        if name.is_empty() || name == self.owner {
            self.owner.to_string()
        } else {
            format!("{}.{}", self.owner, name)
        }
    }

    pub fn finding(
        &self,
        code: u16,
        element_type: &str,
        name: &str,
        description: &str,
    ) -> SanityFinding {
        SanityFinding::Info(SanityErrorInfo::new(
            code,
            element_type,
            self.qualify(name),
            description,
        ))
    }
}

/// A checkable element reached during a sweep.
///
/// Borrowed elements live inside a component and are deduplicated by
/// address. Owned elements are synthetic rules built on the fly; they are
/// checked but never forwarded.
pub enum Checkable<'a> {
    Borrowed(&'a dyn SanityElement),
    Owned(Box<dyn SanityElement + 'a>),
}

impl<'a> Checkable<'a> {
    pub fn element(&self) -> &dyn SanityElement {
        match self {
            Checkable::Borrowed(element) => *element,
            Checkable::Owned(element) => element.as_ref(),
        }
    }
}

/// Something that can be validated.
pub trait SanityElement {
    /// Kind shown in findings ("Attribute", "Class", ...).
    fn element_type(&self) -> &'static str;

    /// Identifies this instance within its owner.
    fn element_name(&self) -> String;

    fn process_sanity_check(&self, ctx: &SanityContext<'_>) -> Vec<SanityFinding>;

    /// Further elements reachable from this one.
    fn forward_sanity_check<'a>(&'a self) -> Box<dyn Iterator<Item = Checkable<'a>> + 'a> {
        Box::new(std::iter::empty())
    }

    /// Elements held directly as fields.
    fn attached_elements(&self) -> Vec<&dyn SanityElement> {
        Vec::new()
    }
}

/// Supplies the components the sanity engine validates.
pub trait ComponentSource {
    fn current_diagram(&self) -> Option<&Diagram>;
}

impl ComponentSource for Diagram {
    fn current_diagram(&self) -> Option<&Diagram> {
        Some(self)
    }
}

impl ComponentSource for Diagrams {
    fn current_diagram(&self) -> Option<&Diagram> {
        Some(self.active())
    }
}

fn address(element: &dyn SanityElement) -> usize {
    (element as *const _) as *const () as usize
}

/// Drains a forward sequence depth first, skipping elements already seen.
fn drain<'a>(
    root: Box<dyn Iterator<Item = Checkable<'a>> + 'a>,
    out: &mut Vec<Checkable<'a>>,
    seen: &mut HashSet<usize>,
) {
    let mut stack = vec![root];
    loop {
        let next = match stack.last_mut() {
            Some(top) => top.next(),
            None => break,
        };
        match next {
            None => {
                stack.pop();
            }
            Some(Checkable::Borrowed(element)) => {
                if seen.insert(address(element)) {
                    out.push(Checkable::Borrowed(element));
                    stack.push(element.forward_sanity_check());
                }
            }
            Some(owned) => out.push(owned),
        }
    }
}

/// Every checkable element of `component`, forwarded ones first.
pub fn collect_sanity_elements(component: &Component) -> Vec<Checkable<'_>> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    let root: &dyn SanityElement = component;
    seen.insert(address(root));

    drain(root.forward_sanity_check(), &mut out, &mut seen);
    for element in root.attached_elements() {
        if seen.insert(address(element)) {
            out.push(Checkable::Borrowed(element));
            drain(element.forward_sanity_check(), &mut out, &mut seen);
        }
    }
    out
}

/// Runs every check against the current diagram of `source`.
pub fn run_sanity_check(
    source: &dyn ComponentSource,
    session: &EditorSession,
) -> Vec<SanityErrorInfo> {
    let Some(diagram) = source.current_diagram() else {
        return Vec::new();
    };

    let mut errors = Vec::new();
    for component in diagram.components() {
        let owner = component.display_name();
        let ctx = SanityContext {
            session,
            diagram,
            owner: &owner,
        };
        for checkable in collect_sanity_elements(component) {
            let element = checkable.element();
            for finding in element.process_sanity_check(&ctx) {
                errors.push(finding.into_info(element, &ctx));
            }
        }
    }

    errors.extend(rules::diagram_findings(diagram));
    tracing::debug!(
        "Sanity check of {} produced {} findings",
        diagram.name,
        errors.len()
    );
    errors
}
