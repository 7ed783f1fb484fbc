//! Saved form of a node chain.
//!
//! The chain is written as nested objects starting at the start node. Each
//! object names the type of the node that follows it in `nextType`.

use super::chain::{ManagedNode, NodeChain, NodeKind, Spin, TerminationNode};
use super::End;
use crate::sanity::{AssociationTag, Multiplicity};
use cluml_core::{sanitize, ChainError, ComponentId, Vector};
use serde::{Deserialize, Serialize};

pub const INTERMEDIATE_TAG: &str = "Intermediate";
pub const TERMINATION_TAG: &str = "Termination";

/// One saved node and, nested inside it, the rest of the chain.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeObj {
    pub x: f64,
    pub y: f64,
    pub next: Option<Box<NodeObj>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spin: Option<Spin>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed: Option<ManagedNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attached_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplicity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| sanitize::for_save(text))
}

impl NodeObj {
    fn write_termination(&mut self, termination: &TerminationNode) {
        self.attached_to = termination.attached_to.as_ref().map(|id| id.to_string());
        self.side = termination
            .attached_to
            .as_ref()
            .map(|_| termination.side);
        self.multiplicity = non_empty(termination.multiplicity.value());
        self.tag = non_empty(termination.tag.value());
    }

    fn read_termination(&self) -> TerminationNode {
        TerminationNode {
            multiplicity: Multiplicity::new(
                self.multiplicity.as_deref().map(sanitize::for_load).unwrap_or_default(),
            ),
            tag: AssociationTag::new(self.tag.as_deref().map(sanitize::for_load).unwrap_or_default()),
            attached_to: self.attached_to.as_deref().map(ComponentId::from),
            side: self.side.unwrap_or_default(),
        }
    }
}

impl NodeChain {
    /// Writes the chain depth first from the start node.
    pub fn save(&self) -> NodeObj {
        let nodes: Vec<_> = self.iter().collect();
        let mut next: Option<Box<NodeObj>> = None;
        let mut next_type: Option<&str> = None;

        for (_, node) in nodes.into_iter().rev() {
            let mut obj = NodeObj {
                x: node.position.x,
                y: node.position.y,
                next: next.take(),
                next_type: next_type.map(str::to_string),
                spin: node.spin,
                ..NodeObj::default()
            };
            match node.kind() {
                NodeKind::Termination(end) => {
                    obj.write_termination(self.termination(end));
                    next_type = Some(TERMINATION_TAG);
                }
                NodeKind::Managed(managed) => {
                    obj.managed = Some(managed);
                    next_type = Some(INTERMEDIATE_TAG);
                }
                NodeKind::Intermediate => next_type = Some(INTERMEDIATE_TAG),
            }
            next = Some(Box::new(obj));
        }

        next.map(|obj| *obj).unwrap_or_default()
    }

    /// Rebuilds a chain from its saved form.
    pub fn load(obj: &NodeObj) -> Result<NodeChain, ChainError> {
        let mut chain = NodeChain::new(Vector::new(obj.x, obj.y), Vector::ZERO);
        let start = chain.start();
        chain.get_mut(start)?.spin = obj.spin;
        *chain.termination_mut(End::Start) = obj.read_termination();

        let mut current = obj;
        let mut last = start;
        loop {
            let tag = current.next_type.as_deref().ok_or(ChainError::Unterminated)?;
            if tag != INTERMEDIATE_TAG && tag != TERMINATION_TAG {
                return Err(ChainError::UnknownNodeType {
                    tag: tag.to_string(),
                });
            }
            let next = current.next.as_deref().ok_or(ChainError::Unterminated)?;
            let position = Vector::new(next.x, next.y);

            if tag == TERMINATION_TAG {
                chain.set_end_position(End::End, position);
                *chain.termination_mut(End::End) = next.read_termination();
                break;
            }

            last = match next.managed {
                Some(managed) => chain.insert_managed_after(last, position, managed)?,
                None => chain.insert_after(last, position)?,
            };
            chain.get_mut(last)?.spin = next.spin;
            current = next;
        }

        Ok(chain)
    }
}
