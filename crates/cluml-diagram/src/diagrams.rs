//! The open document: an ordered set of diagram tabs.

use crate::component::ComponentRegistry;
use crate::diagram::Diagram;
use crate::naming;
use crate::serialization::{DiagramsFile, DEFAULT_GRID};
use cluml_core::{EditError, EditorSession, Error};

/// Prefix for automatically named diagrams.
pub const DIAGRAM_PREFIX: &str = "Diagram";

/// A document. Always holds at least one diagram; one of them is active.
#[derive(Debug, Clone)]
pub struct Diagrams {
    pub grid: f64,
    pub snap: bool,
    id: String,
    diagrams: Vec<Diagram>,
    active: usize,
}

impl Diagrams {
    /// A document with a single empty diagram of the given size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            grid: DEFAULT_GRID,
            snap: false,
            id: uuid::Uuid::new_v4().to_string(),
            diagrams: vec![Diagram::new(naming::nth_name(DIAGRAM_PREFIX, 0), width, height)],
            active: 0,
        }
    }

    /// File id, stable across saves.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn len(&self) -> usize {
        self.diagrams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagrams.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagram> {
        self.diagrams.iter()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> &Diagram {
        &self.diagrams[self.active]
    }

    pub fn active_mut(&mut self) -> &mut Diagram {
        &mut self.diagrams[self.active]
    }

    pub fn diagram_by_name(&self, name: &str) -> Option<&Diagram> {
        self.diagrams.iter().find(|d| d.name == name)
    }

    pub fn diagram_by_name_mut(&mut self, name: &str) -> Option<&mut Diagram> {
        self.diagrams.iter_mut().find(|d| d.name == name)
    }

    fn position_of(&self, name: &str) -> Option<usize> {
        self.diagrams.iter().position(|d| d.name == name)
    }

    fn check_name(&self, name: &str, except: Option<usize>) -> Result<(), EditError> {
        if name.trim().is_empty() {
            return Err(EditError::Empty {
                field: "diagram name".to_string(),
            });
        }
        match self.position_of(name) {
            Some(index) if Some(index) != except => Err(EditError::DuplicateDiagramName {
                name: name.to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Appends a diagram and makes it active.
    pub fn add_diagram(&mut self, diagram: Diagram) -> Result<(), EditError> {
        self.check_name(&diagram.name, None)?;
        tracing::debug!("Added diagram {}", diagram.name);
        self.diagrams.push(diagram);
        self.active = self.diagrams.len() - 1;
        Ok(())
    }

    /// Appends an automatically named diagram sized like the active one and
    /// makes it active. Returns its name.
    pub fn new_diagram(&mut self) -> String {
        let name = naming::next_free_name(DIAGRAM_PREFIX, |name| self.position_of(name).is_some());
        let active = self.active();
        let diagram = Diagram::new(name.clone(), active.width, active.height);
        self.diagrams.push(diagram);
        self.active = self.diagrams.len() - 1;
        name
    }

    /// Removes a diagram. The last remaining diagram cannot be removed.
    pub fn remove_diagram(&mut self, name: &str) -> Result<Diagram, Error> {
        let index = self
            .position_of(name)
            .ok_or_else(|| cluml_core::DiagramError::DiagramNotFound {
                name: name.to_string(),
            })?;
        if self.diagrams.len() == 1 {
            return Err(EditError::LastDiagram.into());
        }
        let removed = self.diagrams.remove(index);
        if self.active >= index && self.active > 0 {
            self.active -= 1;
        }
        Ok(removed)
    }

    pub fn rename_diagram(&mut self, name: &str, new_name: &str) -> Result<(), Error> {
        let index = self
            .position_of(name)
            .ok_or_else(|| cluml_core::DiagramError::DiagramNotFound {
                name: name.to_string(),
            })?;
        let new_name = new_name.trim();
        self.check_name(new_name, Some(index))?;
        self.diagrams[index].name = new_name.to_string();
        Ok(())
    }

    pub fn set_active(&mut self, name: &str) -> Result<(), Error> {
        self.active = self
            .position_of(name)
            .ok_or_else(|| cluml_core::DiagramError::DiagramNotFound {
                name: name.to_string(),
            })?;
        Ok(())
    }

    pub fn save(&self) -> DiagramsFile {
        DiagramsFile {
            grid: self.grid,
            snap: self.snap,
            id: self.id.clone(),
            diagrams: self.diagrams.iter().map(Diagram::save).collect(),
        }
    }

    /// Rebuilds a document. The session's id counter is reset first and
    /// ends up past every loaded id. A file without diagrams gets one
    /// empty diagram.
    pub fn load(
        file: &DiagramsFile,
        registry: &dyn ComponentRegistry,
        session: &mut EditorSession,
        default_size: (f64, f64),
    ) -> Result<Diagrams, Error> {
        session.begin_document();

        let mut diagrams = Vec::with_capacity(file.diagrams.len());
        for obj in &file.diagrams {
            if diagrams.iter().any(|d: &Diagram| d.name == obj.name) {
                tracing::warn!("Skipping duplicate diagram {}", obj.name);
                continue;
            }
            diagrams.push(Diagram::load(obj, registry, session)?);
        }
        if diagrams.is_empty() {
            tracing::warn!("Document has no diagrams, adding an empty one");
            let (width, height) = default_size;
            diagrams.push(Diagram::new(naming::nth_name(DIAGRAM_PREFIX, 0), width, height));
        }

        let id = if file.id.is_empty() {
            uuid::Uuid::new_v4().to_string()
        } else {
            file.id.clone()
        };

        tracing::info!(
            "Loaded document {} with {} diagrams",
            id,
            diagrams.len()
        );
        Ok(Diagrams {
            grid: file.grid,
            snap: file.snap,
            id,
            diagrams,
            active: 0,
        })
    }
}
