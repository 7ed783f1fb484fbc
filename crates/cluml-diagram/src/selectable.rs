//! Positionable, hit-testable base shared by every component.

use cluml_core::Vector;

/// Placement state of a component on the canvas.
///
/// `position` is the component's anchor (the center of a class box, the
/// start node of an association). `move_delta` is the offset between the
/// anchor and the pointer while the component is being dragged.
#[derive(Debug, Clone, PartialEq)]
pub struct Selectable {
    pub position: Vector,
    pub move_delta: Vector,
    pub placed: bool,
    pub movable: bool,
    pub draw_order: i32,
}

impl Selectable {
    pub fn new(draw_order: i32) -> Self {
        Self {
            position: Vector::ZERO,
            move_delta: Vector::ZERO,
            placed: false,
            movable: true,
            draw_order,
        }
    }

    /// Records the grab offset for a drag starting at `pointer`.
    pub fn grab(&mut self, pointer: Vector) {
        self.move_delta = self.position - pointer;
    }

    /// Anchor position for the pointer at `pointer`, keeping the grab offset.
    pub fn drag_target(&self, pointer: Vector) -> Vector {
        pointer + self.move_delta
    }

    pub fn release(&mut self) {
        self.move_delta = Vector::ZERO;
    }
}
