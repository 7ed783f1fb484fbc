//! Draw instructions for diagram components.
//!
//! Components describe themselves as a flat list of primitives in canvas
//! coordinates. Front ends (the SVG exporter, a GUI canvas) only have to
//! know how to paint these.

use crate::association::{Association, End, TailGlyph};
use crate::class::{Class, INTERFACE_STEREOTYPE, PADDING, ROW_HEIGHT};
use crate::component::{Component, ComponentKind};
use crate::diagram::Diagram;
use cluml_core::{Rect, Vector};

/// Offset from the top of a text row to its baseline.
const BASELINE: f64 = 15.0;
const ARROW_LENGTH: f64 = 14.0;
const ARROW_HALF_WIDTH: f64 = 7.0;
const DIAMOND_LENGTH: f64 = 20.0;
const DIAMOND_HALF_WIDTH: f64 = 6.0;
const CROSS_RADIUS: f64 = 7.0;
/// Distance of end labels from the attachment point.
const LABEL_OFFSET: f64 = 14.0;
/// Sideways spread between the multiplicity and the role label.
const LABEL_SPREAD: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub anchor: TextAnchor,
}

impl TextStyle {
    pub const PLAIN: TextStyle = TextStyle {
        bold: false,
        italic: false,
        anchor: TextAnchor::Start,
    };

    fn centered() -> Self {
        Self {
            anchor: TextAnchor::Middle,
            ..Self::PLAIN
        }
    }
}

/// A primitive in canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect { rect: Rect },
    Line { from: Vector, to: Vector },
    Polyline { points: Vec<Vector> },
    Polygon { points: Vec<Vector>, filled: bool },
    Circle { center: Vector, radius: f64 },
    Text { position: Vector, text: String, style: TextStyle },
}

impl Component {
    /// Primitives for this component. Associations look up their classes in
    /// `diagram` to place end labels outside the boxes.
    pub fn draw_commands(&self, diagram: &Diagram) -> Vec<DrawCommand> {
        match &self.kind {
            ComponentKind::Class(class) => class_commands(class, self.selectable.position),
            ComponentKind::Association(association) => association_commands(association, diagram),
        }
    }
}

impl Diagram {
    /// Primitives for every placed component, bottom to top.
    pub fn draw_commands(&self) -> Vec<DrawCommand> {
        self.components()
            .iter()
            .filter(|c| c.is_placed())
            .flat_map(|c| c.draw_commands(self))
            .collect()
    }
}

fn class_commands(class: &Class, center: Vector) -> Vec<DrawCommand> {
    let bounds = class.bounds(center);
    let mut commands = vec![DrawCommand::Rect { rect: bounds }];

    let attributes_top = bounds.top + class.name_height();
    let operations_top = attributes_top + class.attribute_height();
    for y in [attributes_top, operations_top] {
        commands.push(DrawCommand::Line {
            from: Vector::new(bounds.left, y),
            to: Vector::new(bounds.right, y),
        });
    }

    let mut row_top = bounds.top + PADDING / 2.0;
    if class.is_interface() {
        commands.push(DrawCommand::Text {
            position: Vector::new(center.x, row_top + BASELINE),
            text: INTERFACE_STEREOTYPE.to_string(),
            style: TextStyle::centered(),
        });
        row_top += ROW_HEIGHT;
    }
    commands.push(DrawCommand::Text {
        position: Vector::new(center.x, row_top + BASELINE),
        text: class.name.value().to_string(),
        style: TextStyle {
            bold: true,
            italic: class.is_abstract,
            anchor: TextAnchor::Middle,
        },
    });

    for attribute in &class.attributes {
        commands.push(DrawCommand::Text {
            position: center + attribute.position + Vector::new(0.0, BASELINE),
            text: attribute.value().to_string(),
            style: TextStyle::PLAIN,
        });
    }
    for operation in &class.operations {
        commands.push(DrawCommand::Text {
            position: center + operation.position + Vector::new(0.0, BASELINE),
            text: operation.value().to_string(),
            style: TextStyle {
                italic: operation.is_abstract,
                ..TextStyle::PLAIN
            },
        });
    }
    commands
}

fn association_commands(association: &Association, diagram: &Diagram) -> Vec<DrawCommand> {
    let points = association.chain.polyline();
    let mut commands = Vec::new();

    let tip = association.chain.end_position(End::End);
    let before_tip = points
        .iter()
        .rev()
        .find(|p| p.distance(tip) > f64::EPSILON)
        .copied();
    let direction = before_tip
        .map(|p| (tip - p).normalize())
        .unwrap_or(Vector::new(1.0, 0.0));

    commands.push(DrawCommand::Polyline { points });
    commands.extend(tail_glyph(association.variant.tail_glyph(), tip, direction));

    for end in [End::Start, End::End] {
        let termination = association.chain.termination(end);
        let at = association.chain.end_position(end);
        let normal = end_normal(association, diagram, end);
        let spread = normal.perpendicular() * LABEL_SPREAD;
        let anchor = at + normal * LABEL_OFFSET;
        for (text, offset) in [
            (termination.multiplicity.value(), spread),
            (termination.tag.value(), -spread),
        ] {
            if text.is_empty() {
                continue;
            }
            commands.push(DrawCommand::Text {
                position: anchor + offset,
                text: text.to_string(),
                style: TextStyle::centered(),
            });
        }
    }
    commands
}

/// Outward direction at an association end: the normal of the class side
/// it sits on, or the direction of its last segment when unattached.
fn end_normal(association: &Association, diagram: &Diagram, end: End) -> Vector {
    let termination = association.chain.termination(end);
    if let Some(class) = &termination.attached_to {
        if let Ok(component) = diagram.component(class) {
            return component.bounds().normalize().side_normal(termination.side);
        }
    }

    let chain = &association.chain;
    let id = chain.end_id(end);
    let neighbour = match end {
        End::Start => chain.next_of(id),
        End::End => chain.previous_of(id),
    };
    neighbour
        .and_then(|n| chain.get(n).ok())
        .map(|n| (chain.end_position(end) - n.position).normalize())
        .unwrap_or(Vector::new(0.0, -1.0))
}

fn tail_glyph(glyph: TailGlyph, tip: Vector, direction: Vector) -> Vec<DrawCommand> {
    let side = direction.perpendicular();
    match glyph {
        TailGlyph::None => Vec::new(),
        TailGlyph::HollowTriangle => {
            let base = tip - direction * ARROW_LENGTH;
            vec![DrawCommand::Polygon {
                points: vec![tip, base + side * ARROW_HALF_WIDTH, base - side * ARROW_HALF_WIDTH],
                filled: false,
            }]
        }
        TailGlyph::FilledDiamond | TailGlyph::HollowDiamond => {
            let middle = tip - direction * (DIAMOND_LENGTH / 2.0);
            vec![DrawCommand::Polygon {
                points: vec![
                    tip,
                    middle + side * DIAMOND_HALF_WIDTH,
                    tip - direction * DIAMOND_LENGTH,
                    middle - side * DIAMOND_HALF_WIDTH,
                ],
                filled: glyph == TailGlyph::FilledDiamond,
            }]
        }
        TailGlyph::CircledCross => {
            let center = tip - direction * CROSS_RADIUS;
            vec![
                DrawCommand::Circle {
                    center,
                    radius: CROSS_RADIUS,
                },
                DrawCommand::Line {
                    from: center - direction * CROSS_RADIUS,
                    to: center + direction * CROSS_RADIUS,
                },
                DrawCommand::Line {
                    from: center - side * CROSS_RADIUS,
                    to: center + side * CROSS_RADIUS,
                },
            ]
        }
    }
}
