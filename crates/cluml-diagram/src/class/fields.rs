//! Editable rows of a class box.

use super::{Class, PADDING, ROW_HEIGHT};
use crate::sanity::{Attribute, Operation};
use cluml_core::{EditError, EditorSession, Rect, Vector};

/// A text field inside a class box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassField {
    Name,
    Attribute(usize),
    Operation(usize),
    /// Free space below the last attribute; committing appends one.
    NewAttribute,
    /// Free space below the last operation; committing appends one.
    NewOperation,
}

impl Class {
    /// The field under `point` for a box anchored at `center`.
    pub fn field_at(&self, center: Vector, point: Vector) -> Option<ClassField> {
        let bounds = self.bounds(center);
        if !bounds.contains_point(point) {
            return None;
        }

        let attributes_top = bounds.top + self.name_height();
        let operations_top = attributes_top + self.attribute_height();
        if point.y < attributes_top {
            return Some(ClassField::Name);
        }

        let row = |section_top: f64| ((point.y - section_top - PADDING / 2.0) / ROW_HEIGHT).floor();
        if point.y < operations_top {
            let row = row(attributes_top);
            return Some(if row >= 0.0 && (row as usize) < self.attributes.len() {
                ClassField::Attribute(row as usize)
            } else {
                ClassField::NewAttribute
            });
        }

        let row = row(operations_top);
        Some(if row >= 0.0 && (row as usize) < self.operations.len() {
            ClassField::Operation(row as usize)
        } else {
            ClassField::NewOperation
        })
    }

    /// Canvas bounds of `field` for a box anchored at `center`.
    pub fn field_bounds(&self, center: Vector, field: ClassField) -> Option<Rect> {
        let bounds = self.bounds(center);
        let row_rect = |top: f64, height: f64| Rect::new(bounds.left, top, bounds.right, top + height);
        let attributes_top = bounds.top + self.name_height();
        let operations_top = attributes_top + self.attribute_height();
        match field {
            ClassField::Name => Some(row_rect(bounds.top, self.name_height())),
            ClassField::Attribute(i) => (i < self.attributes.len()).then(|| {
                row_rect(attributes_top + PADDING / 2.0 + i as f64 * ROW_HEIGHT, ROW_HEIGHT)
            }),
            ClassField::Operation(i) => (i < self.operations.len()).then(|| {
                row_rect(operations_top + PADDING / 2.0 + i as f64 * ROW_HEIGHT, ROW_HEIGHT)
            }),
            ClassField::NewAttribute => Some(row_rect(
                operations_top - PADDING / 2.0,
                PADDING / 2.0,
            )),
            ClassField::NewOperation => Some(row_rect(bounds.bottom - PADDING / 2.0, PADDING / 2.0)),
        }
    }

    /// Current text of `field`; new-row fields are empty.
    pub fn field_value(&self, field: ClassField) -> Option<&str> {
        match field {
            ClassField::Name => Some(self.name.value()),
            ClassField::Attribute(i) => self.attributes.get(i).map(|a| a.value()),
            ClassField::Operation(i) => self.operations.get(i).map(|o| o.value()),
            ClassField::NewAttribute | ClassField::NewOperation => Some(""),
        }
    }

    /// Commits a member edit. An empty value removes an existing row and is
    /// ignored for new rows. Names are committed through the diagram, which
    /// owns the uniqueness rule.
    pub fn set_member(
        &mut self,
        field: ClassField,
        value: &str,
        session: &EditorSession,
    ) -> Result<(), EditError> {
        let value = value.trim();
        let missing = |field: ClassField| EditError::NoSuchField {
            field: format!("{:?}", field),
        };
        match field {
            ClassField::Name => return Err(missing(field)),
            ClassField::Attribute(i) if value.is_empty() => {
                if i >= self.attributes.len() {
                    return Err(missing(field));
                }
                self.attributes.remove(i);
            }
            ClassField::Attribute(i) => self
                .attributes
                .get_mut(i)
                .ok_or_else(|| missing(field))?
                .set_value(value),
            ClassField::Operation(i) if value.is_empty() => {
                if i >= self.operations.len() {
                    return Err(missing(field));
                }
                self.operations.remove(i);
            }
            ClassField::Operation(i) => self
                .operations
                .get_mut(i)
                .ok_or_else(|| missing(field))?
                .set_value(value),
            ClassField::NewAttribute | ClassField::NewOperation if value.is_empty() => {}
            ClassField::NewAttribute => self.attributes.push(Attribute::new(value)),
            ClassField::NewOperation => self.operations.push(Operation::new(value)),
        }
        self.relayout(session);
        Ok(())
    }
}
