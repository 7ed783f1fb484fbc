//! Associations between classes.
//!
//! An association owns a [`NodeChain`] whose two termination nodes attach
//! to class boxes. The five variants share all geometry and differ in the
//! glyph drawn at the end node and in a few sanity rules.

pub mod chain;
mod persist;

pub use chain::{
    LineNode, ManagedNode, NodeChain, NodeId, NodeKind, Nodes, Spin, TerminationNode,
    NODE_TOUCH_RADIUS,
};
pub use persist::{NodeObj, INTERMEDIATE_TAG, TERMINATION_TAG};

use crate::component::ComponentType;
use crate::sanity::{AssociationRules, Checkable, SanityContext, SanityElement, SanityFinding};
use cluml_core::{ChainError, ComponentId, Rect, Vector};

/// Distance within which a touch on an edge creates a bend point.
pub const EDGE_TOUCH_DISTANCE: f64 = 5.0;

/// Dropping an intermediate node this close to a neighbour removes it.
pub const SIMPLIFY_DISTANCE: f64 = 5.0;

/// One of the two chain ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum End {
    Start,
    End,
}

impl End {
    pub fn index(self) -> usize {
        match self {
            End::Start => 0,
            End::End => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            End::Start => "start",
            End::End => "end",
        }
    }

    pub fn other(self) -> End {
        match self {
            End::Start => End::End,
            End::End => End::Start,
        }
    }
}

/// Non-owning reference from a class to an association end attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TerminationRef {
    pub association: ComponentId,
    pub end: End,
}

/// Glyph drawn where the association meets its end class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailGlyph {
    None,
    HollowTriangle,
    FilledDiamond,
    HollowDiamond,
    CircledCross,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssociationVariant {
    Association,
    Inheritance,
    Composition,
    Aggregation,
    Containment,
}

impl AssociationVariant {
    pub fn label(self) -> &'static str {
        ComponentType::from(self).palette().palette_lbl
    }

    pub fn file_lbl(self) -> &'static str {
        ComponentType::from(self).file_lbl()
    }

    pub fn tail_glyph(self) -> TailGlyph {
        match self {
            AssociationVariant::Association => TailGlyph::None,
            AssociationVariant::Inheritance => TailGlyph::HollowTriangle,
            AssociationVariant::Composition => TailGlyph::FilledDiamond,
            AssociationVariant::Aggregation => TailGlyph::HollowDiamond,
            AssociationVariant::Containment => TailGlyph::CircledCross,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Association {
    pub variant: AssociationVariant,
    pub chain: NodeChain,
}

impl Association {
    pub fn new(variant: AssociationVariant, start: Vector, end: Vector) -> Self {
        Self {
            variant,
            chain: NodeChain::new(start, end),
        }
    }

    pub fn start_position(&self) -> Vector {
        self.chain.end_position(End::Start)
    }

    pub fn attached_class(&self, end: End) -> Option<&ComponentId> {
        self.chain.termination(end).attached_to.as_ref()
    }

    /// Union of the node hit boxes; empty while not on the canvas.
    pub fn bounds(&self, placed: bool) -> Rect {
        if !placed {
            return Rect::EMPTY;
        }
        self.chain
            .iter()
            .fold(Rect::EMPTY, |acc, (_, node)| acc.union(&node.bounds()))
    }

    /// Hit test that may create a bend point.
    ///
    /// Returns a node under `point`, or a new node spliced into the nearest
    /// edge when `point` lies within [`EDGE_TOUCH_DISTANCE`] of it. The new
    /// node inherits the spin of the edge it splits so the drawn path does
    /// not change.
    pub fn touch(&mut self, point: Vector, placed: bool) -> Result<Option<NodeId>, ChainError> {
        if !placed || !self.bounds(true).inflate(EDGE_TOUCH_DISTANCE).contains_point(point) {
            return Ok(None);
        }

        let hit = self
            .chain
            .iter()
            .find(|(_, node)| node.bounds().contains_point(point))
            .map(|(id, _)| id);
        if hit.is_some() {
            return Ok(hit);
        }

        match self.chain.nearest_edge(point) {
            Some((from, at, distance)) if distance <= EDGE_TOUCH_DISTANCE => {
                let spin = self.chain.get(from)?.spin;
                let id = self.chain.insert_after(from, at)?;
                self.chain.get_mut(id)?.spin = spin;
                Ok(Some(id))
            }
            _ => Ok(None),
        }
    }

    /// Removes `node` if it is an intermediate node lying within
    /// [`SIMPLIFY_DISTANCE`] of a neighbour. Returns whether it was removed.
    pub fn simplify(&mut self, node: NodeId) -> Result<bool, ChainError> {
        let line_node = self.chain.get(node)?;
        if line_node.kind() != NodeKind::Intermediate {
            return Ok(false);
        }
        let position = line_node.position;
        let too_close = [line_node.previous(), line_node.next()]
            .into_iter()
            .flatten()
            .filter_map(|id| self.chain.get(id).ok())
            .any(|neighbour| neighbour.position.distance(position) < SIMPLIFY_DISTANCE);
        if too_close {
            self.chain.remove(node)?;
            tracing::debug!("Simplified away node {:?}", node);
        }
        Ok(too_close)
    }
}

impl SanityElement for Association {
    fn element_type(&self) -> &'static str {
        self.variant.label()
    }

    fn element_name(&self) -> String {
        self.variant.label().to_string()
    }

    fn process_sanity_check(&self, _ctx: &SanityContext<'_>) -> Vec<SanityFinding> {
        Vec::new()
    }

    fn forward_sanity_check<'a>(&'a self) -> Box<dyn Iterator<Item = Checkable<'a>> + 'a> {
        let ends = [End::Start, End::End].into_iter().flat_map(move |end| {
            let termination = self.chain.termination(end);
            [
                Checkable::Borrowed(&termination.multiplicity as &dyn SanityElement),
                Checkable::Borrowed(&termination.tag as &dyn SanityElement),
            ]
        });
        let rules = std::iter::once_with(move || {
            Checkable::Owned(Box::new(AssociationRules { association: self }))
        });
        Box::new(ends.chain(rules))
    }

    fn attached_elements(&self) -> Vec<&dyn SanityElement> {
        [End::Start, End::End]
            .into_iter()
            .flat_map(|end| {
                let termination = self.chain.termination(end);
                [
                    &termination.multiplicity as &dyn SanityElement,
                    &termination.tag as &dyn SanityElement,
                ]
            })
            .collect()
    }
}
