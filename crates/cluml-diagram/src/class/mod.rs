//! Class and interface boxes.
//!
//! A class box is laid out around its anchor (the box center) in three
//! sections: name, attributes and operations. The width follows the longest
//! line of text and never drops below [`MIN_WIDTH`].

mod fields;

pub use fields::ClassField;

use crate::association::TerminationRef;
use crate::sanity::{
    Attribute, Checkable, ClassName, ClassRules, Operation, SanityContext, SanityElement,
    SanityFinding,
};
use cluml_core::session::DEFAULT_CHAR_WIDTH;
use cluml_core::{EditorSession, MonospaceMetrics, Rect, TextMetrics, Vector};
use std::cell::Cell;
use std::collections::BTreeSet;

pub const MIN_WIDTH: f64 = 200.0;
pub const ROW_HEIGHT: f64 = 20.0;
pub const PADDING: f64 = 10.0;
pub const INTERFACE_STEREOTYPE: &str = "«interface»";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassVariant {
    Class,
    Interface,
}

#[derive(Debug, Clone)]
pub struct Class {
    pub variant: ClassVariant,
    pub name: ClassName,
    pub attributes: Vec<Attribute>,
    pub operations: Vec<Operation>,
    pub is_abstract: bool,
    width: f64,
    metrics: MonospaceMetrics,
    attached: BTreeSet<TerminationRef>,
    visited: Cell<bool>,
}

impl Class {
    pub fn new(variant: ClassVariant) -> Self {
        Self {
            variant,
            name: ClassName::default(),
            attributes: Vec::new(),
            operations: Vec::new(),
            is_abstract: false,
            width: MIN_WIDTH,
            metrics: MonospaceMetrics {
                char_width: DEFAULT_CHAR_WIDTH,
            },
            attached: BTreeSet::new(),
            visited: Cell::new(false),
        }
    }

    pub fn is_interface(&self) -> bool {
        self.variant == ClassVariant::Interface
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn name_height(&self) -> f64 {
        let rows = if self.is_interface() { 2.0 } else { 1.0 };
        rows * ROW_HEIGHT + PADDING
    }

    pub fn attribute_height(&self) -> f64 {
        self.attributes.len() as f64 * ROW_HEIGHT + PADDING
    }

    pub fn operation_height(&self) -> f64 {
        self.operations.len() as f64 * ROW_HEIGHT + PADDING
    }

    pub fn height(&self) -> f64 {
        self.name_height() + self.attribute_height() + self.operation_height()
    }

    pub fn bounds(&self, center: Vector) -> Rect {
        Rect::centered(center, self.width, self.height())
    }

    /// Adopts the session's text metrics and lays the box out again.
    pub fn relayout(&mut self, session: &EditorSession) {
        self.metrics = session.metrics;
        self.layout();
    }

    /// Recomputes the width from the text and repositions member rows.
    pub fn layout(&mut self) {
        let metrics = self.metrics;
        let longest = std::iter::once(self.name.value())
            .chain(self.is_interface().then_some(INTERFACE_STEREOTYPE))
            .chain(self.attributes.iter().map(Attribute::value))
            .chain(self.operations.iter().map(Operation::value))
            .map(|text| metrics.text_width(text))
            .fold(0.0, f64::max);
        self.width = (longest + 2.0 * PADDING).max(MIN_WIDTH);

        let left = -self.width / 2.0 + PADDING;
        let top = -self.height() / 2.0;
        let attributes_top = top + self.name_height() + PADDING / 2.0;
        for (i, attribute) in self.attributes.iter_mut().enumerate() {
            attribute.position = Vector::new(left, attributes_top + i as f64 * ROW_HEIGHT);
        }
        let operations_top = top + self.name_height() + self.attribute_height() + PADDING / 2.0;
        for (i, operation) in self.operations.iter_mut().enumerate() {
            operation.position = Vector::new(left, operations_top + i as f64 * ROW_HEIGHT);
        }
    }

    /// Restores a saved width; the text still wins if it needs more room.
    pub(crate) fn restore_width(&mut self, width: f64, session: &EditorSession) {
        self.relayout(session);
        if width > self.width {
            self.width = width;
            self.relayout_rows();
        }
    }

    fn relayout_rows(&mut self) {
        let left = -self.width / 2.0 + PADDING;
        for attribute in &mut self.attributes {
            attribute.position.x = left;
        }
        for operation in &mut self.operations {
            operation.position.x = left;
        }
    }

    pub fn add_attribute(&mut self, value: impl Into<String>, session: &EditorSession) {
        self.attributes.push(Attribute::new(value));
        self.relayout(session);
    }

    pub fn add_operation(&mut self, value: impl Into<String>, session: &EditorSession) {
        self.operations.push(Operation::new(value));
        self.relayout(session);
    }

    /// Termination nodes attached to this class.
    pub fn attached(&self) -> impl Iterator<Item = &TerminationRef> {
        self.attached.iter()
    }

    pub(crate) fn attach(&mut self, termination: TerminationRef) {
        self.attached.insert(termination);
    }

    pub(crate) fn detach(&mut self, termination: &TerminationRef) -> bool {
        self.attached.remove(termination)
    }

    /// Traversal mark. Only set while a graph walk is in progress.
    pub fn is_visited(&self) -> bool {
        self.visited.get()
    }

    pub(crate) fn set_visited(&self, visited: bool) {
        self.visited.set(visited);
    }
}

impl SanityElement for Class {
    fn element_type(&self) -> &'static str {
        if self.is_interface() {
            "Interface"
        } else {
            "Class"
        }
    }

    fn element_name(&self) -> String {
        self.name.value().to_string()
    }

    fn process_sanity_check(&self, _ctx: &SanityContext<'_>) -> Vec<SanityFinding> {
        Vec::new()
    }

    fn forward_sanity_check<'a>(&'a self) -> Box<dyn Iterator<Item = Checkable<'a>> + 'a> {
        let attributes = self
            .attributes
            .iter()
            .map(|attribute| Checkable::Borrowed(attribute));
        let operations = self
            .operations
            .iter()
            .map(|operation| Checkable::Borrowed(operation));
        let rules = std::iter::once_with(move || Checkable::Owned(Box::new(ClassRules { class: self })));
        Box::new(attributes.chain(operations).chain(rules))
    }

    fn attached_elements(&self) -> Vec<&dyn SanityElement> {
        vec![&self.name]
    }
}
