//! The node chain behind an association.
//!
//! Nodes live in an arena and are addressed by generational [`NodeId`]s, so
//! an id held by the UI across edits either still names the same node or is
//! reported stale. The chain is a doubly linked list running from the start
//! termination node to the end termination node; both always exist.

use super::End;
use crate::sanity::{AssociationTag, Multiplicity};
use cluml_core::{ChainError, ComponentId, Line, Rect, Vector};
use serde::{Deserialize, Serialize};

/// Half size of the square used to hit-test a node.
pub const NODE_TOUCH_RADIUS: f64 = 6.0;

/// Tolerance when deciding whether an edge is already axis aligned.
const ALIGN_EPSILON: f64 = 1e-6;

/// Stable handle to a node of one chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    fn stale(self) -> ChainError {
        ChainError::StaleNode {
            index: self.index,
            generation: self.generation,
        }
    }
}

/// Orthogonal routing of the edge leaving a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spin {
    /// Leave horizontally, bend at `(next.x, this.y)`.
    Horizontal,
    /// Leave vertically, bend at `(this.x, next.y)`.
    Vertical,
}

/// A node kept at the corner between its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedNode {
    /// The incoming edge is horizontal and the outgoing one vertical.
    pub horizontal_first: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind {
    Intermediate,
    Managed(ManagedNode),
    Termination(End),
}

/// A point of the chain.
#[derive(Debug, Clone, PartialEq)]
pub struct LineNode {
    pub position: Vector,
    pub spin: Option<Spin>,
    kind: NodeKind,
    next: Option<NodeId>,
    previous: Option<NodeId>,
}

impl LineNode {
    fn new(position: Vector, kind: NodeKind) -> Self {
        Self {
            position,
            spin: None,
            kind,
            next: None,
            previous: None,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn next(&self) -> Option<NodeId> {
        self.next
    }

    pub fn previous(&self) -> Option<NodeId> {
        self.previous
    }

    pub fn is_termination(&self) -> bool {
        matches!(self.kind, NodeKind::Termination(_))
    }

    pub fn is_managed(&self) -> bool {
        matches!(self.kind, NodeKind::Managed(_))
    }

    /// Hit box around the node.
    pub fn bounds(&self) -> Rect {
        Rect::centered(
            self.position,
            2.0 * NODE_TOUCH_RADIUS,
            2.0 * NODE_TOUCH_RADIUS,
        )
    }
}

/// Extra state of the two chain ends.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TerminationNode {
    pub multiplicity: Multiplicity,
    pub tag: AssociationTag,
    /// Class this end is attached to. Non-owning.
    pub attached_to: Option<ComponentId>,
    /// Perimeter side value of the attachment point on that class.
    pub side: f64,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<LineNode>,
}

#[derive(Debug, Clone)]
pub struct NodeChain {
    slots: Vec<Slot>,
    free: Vec<u32>,
    start: NodeId,
    end: NodeId,
    terminations: [TerminationNode; 2],
}

impl NodeChain {
    /// A chain holding only its two termination nodes.
    pub fn new(start: Vector, end: Vector) -> Self {
        let placeholder = NodeId {
            index: 0,
            generation: 0,
        };
        let mut chain = Self {
            slots: Vec::new(),
            free: Vec::new(),
            start: placeholder,
            end: placeholder,
            terminations: Default::default(),
        };
        chain.start = chain.allocate(LineNode::new(start, NodeKind::Termination(End::Start)));
        chain.end = chain.allocate(LineNode::new(end, NodeKind::Termination(End::End)));
        let (start, end) = (chain.start, chain.end);
        if let Some(node) = chain.slot_mut(start) {
            node.next = Some(end);
        }
        if let Some(node) = chain.slot_mut(end) {
            node.previous = Some(start);
        }
        chain
    }

    fn allocate(&mut self, node: LineNode) -> NodeId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId {
            index: (self.slots.len() - 1) as u32,
            generation: 0,
        }
    }

    fn release(&mut self, id: NodeId) -> Option<LineNode> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Some(node)
    }

    fn slot(&self, id: NodeId) -> Option<&LineNode> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn slot_mut(&mut self, id: NodeId) -> Option<&mut LineNode> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn end(&self) -> NodeId {
        self.end
    }

    pub fn end_id(&self, end: End) -> NodeId {
        match end {
            End::Start => self.start,
            End::End => self.end,
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.slot(id).is_some()
    }

    pub fn get(&self, id: NodeId) -> Result<&LineNode, ChainError> {
        self.slot(id).ok_or_else(|| id.stale())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut LineNode, ChainError> {
        self.slot_mut(id).ok_or_else(|| id.stale())
    }

    pub fn termination(&self, end: End) -> &TerminationNode {
        &self.terminations[end.index()]
    }

    pub fn termination_mut(&mut self, end: End) -> &mut TerminationNode {
        &mut self.terminations[end.index()]
    }

    /// Which end `id` is, if it is a termination node.
    pub fn end_of(&self, id: NodeId) -> Option<End> {
        match self.slot(id)?.kind {
            NodeKind::Termination(end) => Some(end),
            _ => None,
        }
    }

    pub fn end_position(&self, end: End) -> Vector {
        self.slot(self.end_id(end))
            .map(|node| node.position)
            .unwrap_or_default()
    }

    pub fn set_end_position(&mut self, end: End, position: Vector) {
        let id = self.end_id(end);
        if let Some(node) = self.slot_mut(id) {
            node.position = position;
        }
    }

    pub fn next_of(&self, id: NodeId) -> Option<NodeId> {
        self.slot(id)?.next
    }

    pub fn previous_of(&self, id: NodeId) -> Option<NodeId> {
        self.slot(id)?.previous
    }

    pub fn is_managed(&self, id: NodeId) -> bool {
        self.slot(id).is_some_and(LineNode::is_managed)
    }

    /// Nodes from start to end.
    pub fn iter(&self) -> Nodes<'_> {
        Nodes {
            chain: self,
            current: Some(self.start),
            remaining: self.slots.len(),
        }
    }

    pub fn ids(&self) -> Vec<NodeId> {
        self.iter().map(|(id, _)| id).collect()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Always false; a chain has at least its two ends.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Consecutive node pairs `(node, node.next)`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.iter()
            .filter_map(|(id, node)| node.next.map(|next| (id, next)))
    }

    /// Drawn path of the edge leaving `from`, bend point included.
    pub fn edge_path(&self, from: NodeId) -> Option<Vec<Vector>> {
        let a = self.slot(from)?;
        let b = self.slot(a.next?)?;
        let mut path = vec![a.position];
        match a.spin {
            Some(Spin::Horizontal) => path.push(Vector::new(b.position.x, a.position.y)),
            Some(Spin::Vertical) => path.push(Vector::new(a.position.x, b.position.y)),
            None => {}
        }
        path.push(b.position);
        Some(path)
    }

    /// Every drawn point from start to end.
    pub fn polyline(&self) -> Vec<Vector> {
        let mut points = vec![self.end_position(End::Start)];
        for (from, _) in self.edges() {
            if let Some(path) = self.edge_path(from) {
                points.extend(path.into_iter().skip(1));
            }
        }
        points
    }

    /// Closest point on any edge path: `(edge start, point, distance)`.
    pub fn nearest_edge(&self, p: Vector) -> Option<(NodeId, Vector, f64)> {
        let mut best: Option<(NodeId, Vector, f64)> = None;
        for (from, _) in self.edges() {
            let Some(path) = self.edge_path(from) else {
                continue;
            };
            for pair in path.windows(2) {
                let (q, _) = Line::new(pair[0], pair[1]).closest_point(p);
                let d = q.distance(p);
                if best.map_or(true, |(_, _, best_d)| d < best_d) {
                    best = Some((from, q, d));
                }
            }
        }
        best
    }

    fn insert_node(&mut self, after: NodeId, mut node: LineNode) -> Result<NodeId, ChainError> {
        let next = self.get(after)?.next.ok_or(ChainError::InsertAfterEnd)?;
        node.previous = Some(after);
        node.next = Some(next);
        let id = self.allocate(node);
        if let Some(a) = self.slot_mut(after) {
            a.next = Some(id);
        }
        if let Some(b) = self.slot_mut(next) {
            b.previous = Some(id);
        }
        tracing::debug!("Inserted node {:?} after {:?}", id, after);
        Ok(id)
    }

    /// Splices a new intermediate node in after `after`.
    pub fn insert_after(&mut self, after: NodeId, position: Vector) -> Result<NodeId, ChainError> {
        self.insert_node(after, LineNode::new(position, NodeKind::Intermediate))
    }

    pub fn insert_managed_after(
        &mut self,
        after: NodeId,
        position: Vector,
        managed: ManagedNode,
    ) -> Result<NodeId, ChainError> {
        self.insert_node(after, LineNode::new(position, NodeKind::Managed(managed)))
    }

    /// Splices an intermediate node out of the chain.
    pub fn remove(&mut self, id: NodeId) -> Result<LineNode, ChainError> {
        let node = self.get(id)?;
        if node.is_termination() {
            return Err(ChainError::TerminationRemoval);
        }
        let (previous, next) = (node.previous, node.next);
        if let Some(p) = previous.and_then(|p| self.slot_mut(p)) {
            p.next = next;
        }
        if let Some(n) = next.and_then(|n| self.slot_mut(n)) {
            n.previous = previous;
        }
        tracing::debug!("Removed node {:?}", id);
        self.release(id).ok_or_else(|| id.stale())
    }

    /// Removes managed nodes that follow another managed node, then moves
    /// every managed node back onto the corner between its neighbours.
    /// Returns the number of nodes removed.
    pub fn sync(&mut self) -> Result<usize, ChainError> {
        let mut healed = 0;
        let mut current = self.start;
        while let Some(next) = self.next_of(current) {
            if self.is_managed(current) && self.is_managed(next) {
                self.remove(next)?;
                healed += 1;
            } else {
                current = next;
            }
        }

        for id in self.ids() {
            let Some(node) = self.slot(id) else {
                continue;
            };
            let NodeKind::Managed(managed) = node.kind else {
                continue;
            };
            let previous = node.previous.and_then(|p| self.slot(p));
            let next = node.next.and_then(|n| self.slot(n));
            let (Some(previous), Some(next)) = (previous, next) else {
                continue;
            };
            let corner = if managed.horizontal_first {
                Vector::new(next.position.x, previous.position.y)
            } else {
                Vector::new(previous.position.x, next.position.y)
            };
            if let Some(node) = self.slot_mut(id) {
                node.position = corner;
            }
        }
        Ok(healed)
    }

    /// Makes every straight diagonal edge orthogonal by inserting a managed
    /// corner node. Edges that already bend through their spin are left as
    /// they are. Returns the number of nodes inserted.
    pub fn straighten(&mut self) -> Result<usize, ChainError> {
        let mut inserted = 0;
        let edges: Vec<(NodeId, NodeId)> = self.edges().collect();
        for (a, b) in edges {
            let (node_a, node_b) = (self.get(a)?, self.get(b)?);
            if node_a.spin.is_some() || node_a.is_managed() || node_b.is_managed() {
                continue;
            }
            let (pa, pb) = (node_a.position, node_b.position);
            if (pa.x - pb.x).abs() < ALIGN_EPSILON || (pa.y - pb.y).abs() < ALIGN_EPSILON {
                continue;
            }
            self.insert_managed_after(
                a,
                Vector::new(pb.x, pa.y),
                ManagedNode {
                    horizontal_first: true,
                },
            )?;
            inserted += 1;
        }
        self.sync()?;
        Ok(inserted)
    }

    /// Moves every node by `delta`.
    pub fn translate(&mut self, delta: Vector) {
        for slot in &mut self.slots {
            if let Some(node) = slot.node.as_mut() {
                node.position += delta;
            }
        }
    }
}

/// Iterator over the nodes of a chain, start to end.
pub struct Nodes<'a> {
    chain: &'a NodeChain,
    current: Option<NodeId>,
    remaining: usize,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = (NodeId, &'a LineNode);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.current?;
        let node = self.chain.slot(id)?;
        self.remaining -= 1;
        self.current = node.next;
        Some((id, node))
    }
}
