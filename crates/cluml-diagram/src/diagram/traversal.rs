//! Reachability over the class graph.
//!
//! Edges run from the class holding an association's start end to the class
//! holding its end end. Walks mark classes through their `visited` flag and
//! clear every flag before returning control to the caller.

use super::Diagram;
use crate::association::{AssociationVariant, End};
use cluml_core::{ComponentId, DiagramError};
use std::collections::HashSet;

struct Frame {
    class: ComponentId,
    successors: Vec<ComponentId>,
}

impl Diagram {
    /// Classes directly reachable from `class` over associations whose
    /// variant is in `filter`. An empty filter accepts every variant.
    fn successors(&self, class: &ComponentId, filter: &[AssociationVariant]) -> Vec<ComponentId> {
        let Ok(source) = self.class(class) else {
            return Vec::new();
        };
        source
            .attached()
            .filter(|termination| termination.end == End::Start)
            .filter_map(|termination| self.association(&termination.association).ok())
            .filter(|association| filter.is_empty() || filter.contains(&association.variant))
            .filter_map(|association| association.attached_class(End::End).cloned())
            .filter(|target| self.class(target).is_ok())
            .collect()
    }

    fn clear_visited(&self) {
        for (_, class) in self.classes() {
            class.set_visited(false);
        }
    }

    /// True when a cycle is reachable from `class_id`.
    pub fn has_association_cycle(
        &self,
        class_id: &ComponentId,
        filter: &[AssociationVariant],
    ) -> Result<bool, DiagramError> {
        self.class(class_id)?;
        let found = self.find_cycle(class_id, filter);
        self.clear_visited();
        Ok(found)
    }

    fn find_cycle(&self, class_id: &ComponentId, filter: &[AssociationVariant]) -> bool {
        let mut on_path: HashSet<ComponentId> = HashSet::new();
        let mut stack = Vec::new();

        if let Ok(class) = self.class(class_id) {
            class.set_visited(true);
        }
        on_path.insert(class_id.clone());
        stack.push(Frame {
            class: class_id.clone(),
            successors: self.successors(class_id, filter),
        });

        while let Some(frame) = stack.last_mut() {
            match frame.successors.pop() {
                Some(next) => {
                    if on_path.contains(&next) {
                        return true;
                    }
                    let Ok(class) = self.class(&next) else {
                        continue;
                    };
                    if class.is_visited() {
                        continue;
                    }
                    class.set_visited(true);
                    on_path.insert(next.clone());
                    let successors = self.successors(&next, filter);
                    stack.push(Frame {
                        class: next,
                        successors,
                    });
                }
                None => {
                    if let Some(done) = stack.pop() {
                        on_path.remove(&done.class);
                    }
                }
            }
        }
        false
    }

    /// Lazily enumerates the classes reachable from `class_id`, itself
    /// included.
    pub fn generate_map(
        &self,
        class_id: &ComponentId,
        filter: &[AssociationVariant],
    ) -> Result<ReachableClasses<'_>, DiagramError> {
        self.class(class_id)?;
        Ok(ReachableClasses {
            diagram: self,
            filter: filter.to_vec(),
            pending: vec![class_id.clone()],
            finished: false,
        })
    }
}

/// Iterator returned by [`Diagram::generate_map`].
///
/// Visited flags are cleared when the walk completes or when the iterator
/// is dropped early.
pub struct ReachableClasses<'a> {
    diagram: &'a Diagram,
    filter: Vec<AssociationVariant>,
    pending: Vec<ComponentId>,
    finished: bool,
}

impl Iterator for ReachableClasses<'_> {
    type Item = ComponentId;

    fn next(&mut self) -> Option<ComponentId> {
        if self.finished {
            return None;
        }
        while let Some(id) = self.pending.pop() {
            let Ok(class) = self.diagram.class(&id) else {
                continue;
            };
            if class.is_visited() {
                continue;
            }
            class.set_visited(true);
            let mut successors = self.diagram.successors(&id, &self.filter);
            successors.reverse();
            self.pending.extend(successors);
            return Some(id);
        }
        self.finished = true;
        self.diagram.clear_visited();
        None
    }
}

impl Drop for ReachableClasses<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.diagram.clear_visited();
        }
    }
}
