use cluml_core::{ComponentId, DiagramError, EditorSession, Vector};
use cluml_diagram::{AssociationVariant, Component, ComponentType, Diagram};
use std::collections::HashSet;

struct Graph {
    diagram: Diagram,
    session: EditorSession,
}

impl Graph {
    fn new() -> Self {
        Self {
            diagram: Diagram::new("Graph", 2000.0, 2000.0),
            session: EditorSession::new(),
        }
    }

    fn class(&mut self, x: f64, y: f64) -> ComponentId {
        let mut component = Component::new(ComponentType::Class, &mut self.session);
        component.selectable.position = Vector::new(x, y);
        component.selectable.placed = true;
        self.diagram.add(component)
    }

    fn edge(&mut self, component_type: ComponentType, from: &ComponentId, to: &ComponentId) -> ComponentId {
        let mut component = Component::new(component_type, &mut self.session);
        component.selectable.placed = true;
        let id = self.diagram.add(component);
        self.diagram.connect(&id, from, to).unwrap();
        id
    }

    fn all_clear(&self) -> bool {
        self.diagram.classes().all(|(_, class)| !class.is_visited())
    }
}

#[test]
fn test_triangle_is_a_cycle() {
    let mut g = Graph::new();
    let a = g.class(0.0, 0.0);
    let b = g.class(400.0, 0.0);
    let c = g.class(200.0, 400.0);
    g.edge(ComponentType::Association, &a, &b);
    g.edge(ComponentType::Association, &b, &c);
    g.edge(ComponentType::Association, &c, &a);

    assert!(g.diagram.has_association_cycle(&a, &[]).unwrap());
    assert!(g.all_clear());
    assert!(g.diagram.has_association_cycle(&a, &[]).unwrap());
    assert!(g.all_clear());
}

#[test]
fn test_path_is_not_a_cycle() {
    let mut g = Graph::new();
    let a = g.class(0.0, 0.0);
    let b = g.class(400.0, 0.0);
    let c = g.class(200.0, 400.0);
    g.edge(ComponentType::Association, &a, &b);
    g.edge(ComponentType::Association, &b, &c);

    for start in [&a, &b, &c] {
        assert!(!g.diagram.has_association_cycle(start, &[]).unwrap());
        assert!(g.all_clear());
    }
}

#[test]
fn test_diamond_is_not_a_cycle() {
    let mut g = Graph::new();
    let top = g.class(200.0, 0.0);
    let left = g.class(0.0, 300.0);
    let right = g.class(400.0, 300.0);
    let bottom = g.class(200.0, 600.0);
    g.edge(ComponentType::Association, &top, &left);
    g.edge(ComponentType::Association, &top, &right);
    g.edge(ComponentType::Association, &left, &bottom);
    g.edge(ComponentType::Association, &right, &bottom);

    assert!(!g.diagram.has_association_cycle(&top, &[]).unwrap());
}

#[test]
fn test_filter_restricts_edges() {
    let mut g = Graph::new();
    let a = g.class(0.0, 0.0);
    let b = g.class(400.0, 0.0);
    g.edge(ComponentType::Inheritance, &a, &b);
    g.edge(ComponentType::Association, &b, &a);

    assert!(g.diagram.has_association_cycle(&a, &[]).unwrap());
    assert!(!g
        .diagram
        .has_association_cycle(&a, &[AssociationVariant::Inheritance])
        .unwrap());
}

#[test]
fn test_generate_map_reaches_downstream_classes() {
    let mut g = Graph::new();
    let a = g.class(0.0, 0.0);
    let b = g.class(400.0, 0.0);
    let c = g.class(200.0, 400.0);
    let lone = g.class(800.0, 800.0);
    g.edge(ComponentType::Association, &a, &b);
    g.edge(ComponentType::Composition, &b, &c);

    let reached: HashSet<ComponentId> = g.diagram.generate_map(&a, &[]).unwrap().collect();
    assert_eq!(reached, HashSet::from([a.clone(), b.clone(), c.clone()]));
    assert!(g.all_clear());

    let first: Vec<ComponentId> = g.diagram.generate_map(&a, &[]).unwrap().collect();
    assert_eq!(first[0], a);

    let only_c: Vec<ComponentId> = g.diagram.generate_map(&c, &[]).unwrap().collect();
    assert_eq!(only_c, vec![c.clone()]);

    let filtered: HashSet<ComponentId> = g
        .diagram
        .generate_map(&a, &[AssociationVariant::Association])
        .unwrap()
        .collect();
    assert!(!filtered.contains(&c));
    assert!(!filtered.contains(&lone));
}

#[test]
fn test_generate_map_clears_flags_when_dropped_early() {
    let mut g = Graph::new();
    let a = g.class(0.0, 0.0);
    let b = g.class(400.0, 0.0);
    g.edge(ComponentType::Association, &a, &b);

    {
        let mut walk = g.diagram.generate_map(&a, &[]).unwrap();
        assert_eq!(walk.next(), Some(a.clone()));
        assert!(!g.all_clear());
    }
    assert!(g.all_clear());
}

#[test]
fn test_queries_require_a_class() {
    let mut g = Graph::new();
    let a = g.class(0.0, 0.0);
    let b = g.class(400.0, 0.0);
    let link = g.edge(ComponentType::Association, &a, &b);

    assert!(matches!(
        g.diagram.has_association_cycle(&link, &[]),
        Err(DiagramError::NotAClass { .. })
    ));
    assert!(g.diagram.generate_map(&ComponentId::new("d404"), &[]).is_err());
}
