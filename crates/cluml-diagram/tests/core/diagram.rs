use cluml_core::{ComponentId, EditorSession, Vector};
use cluml_diagram::association::End;
use cluml_diagram::{Component, ComponentType, Diagram, NodeHandle, Touched};

fn add_class(diagram: &mut Diagram, session: &mut EditorSession, x: f64, y: f64) -> ComponentId {
    let mut component = Component::new(ComponentType::Class, session);
    component.selectable.position = Vector::new(x, y);
    component.selectable.placed = true;
    diagram.add(component)
}

fn link(
    diagram: &mut Diagram,
    session: &mut EditorSession,
    component_type: ComponentType,
    from: &ComponentId,
    to: &ComponentId,
) -> ComponentId {
    let mut component = Component::new(component_type, session);
    component.selectable.placed = true;
    let id = diagram.add(component);
    diagram.connect(&id, from, to).unwrap();
    id
}

#[test]
fn test_lookup_by_id_and_type() {
    let mut session = EditorSession::new();
    let mut diagram = Diagram::new("Main", 1000.0, 800.0);
    let a = add_class(&mut diagram, &mut session, 100.0, 100.0);
    let b = add_class(&mut diagram, &mut session, 500.0, 100.0);
    let l = link(&mut diagram, &mut session, ComponentType::Aggregation, &a, &b);

    for id in [&a, &b, &l] {
        let found = diagram.component_by_id(id.as_str()).unwrap().unwrap();
        assert_eq!(found.id(), id);
        let same_type = diagram.components_by_type(found.component_type());
        assert!(same_type.iter().any(|c| c.id() == id));
    }
    assert_eq!(diagram.components_by_type(ComponentType::Class).len(), 2);
    assert!(diagram.component_by_naming("Class2").is_some());
}

#[test]
fn test_insertion_keeps_draw_order() {
    let mut session = EditorSession::new();
    let mut diagram = Diagram::new("Main", 1000.0, 800.0);
    for order in [3, 1, 4, 1, 5] {
        let mut component = Component::new(ComponentType::Association, &mut session);
        component.selectable.draw_order = order;
        diagram.add(component);
    }
    let orders: Vec<i32> = diagram.components().iter().map(Component::draw_order).collect();
    assert_eq!(orders, vec![1, 1, 3, 4, 5]);
}

#[test]
fn test_classes_draw_below_associations() {
    let mut session = EditorSession::new();
    let mut diagram = Diagram::new("Main", 1000.0, 800.0);
    let a = add_class(&mut diagram, &mut session, 100.0, 100.0);
    let b = add_class(&mut diagram, &mut session, 500.0, 100.0);
    link(&mut diagram, &mut session, ComponentType::Association, &a, &b);
    add_class(&mut diagram, &mut session, 100.0, 400.0);

    let kinds: Vec<bool> = diagram
        .components()
        .iter()
        .map(|c| c.as_class().is_some())
        .collect();
    assert_eq!(kinds, vec![true, true, true, false]);
}

#[test]
fn test_connect_attaches_facing_sides() {
    let mut session = EditorSession::new();
    let mut diagram = Diagram::new("Main", 1000.0, 800.0);
    let a = add_class(&mut diagram, &mut session, 100.0, 100.0);
    let b = add_class(&mut diagram, &mut session, 500.0, 100.0);
    let l = link(&mut diagram, &mut session, ComponentType::Association, &a, &b);

    let association = diagram.association(&l).unwrap();
    assert_eq!(association.attached_class(End::Start), Some(&a));
    assert_eq!(association.attached_class(End::End), Some(&b));
    assert_eq!(association.chain.end_position(End::Start), Vector::new(200.0, 100.0));
    assert_eq!(association.chain.end_position(End::End), Vector::new(400.0, 100.0));
    assert_eq!(diagram.class(&a).unwrap().attached().count(), 1);
}

#[test]
fn test_moving_class_drags_attached_ends() {
    let mut session = EditorSession::new();
    let mut diagram = Diagram::new("Main", 1000.0, 800.0);
    let a = add_class(&mut diagram, &mut session, 100.0, 100.0);
    let b = add_class(&mut diagram, &mut session, 500.0, 100.0);
    let l = link(&mut diagram, &mut session, ComponentType::Association, &a, &b);

    diagram.move_component(&b, Vector::new(500.0, 300.0)).unwrap();
    let end = diagram.association(&l).unwrap().chain.end_position(End::End);
    assert_eq!(end, Vector::new(400.0, 300.0));
}

#[test]
fn test_deleting_class_cascades_to_associations() {
    let mut session = EditorSession::new();
    let mut diagram = Diagram::new("Main", 1000.0, 800.0);
    let a = add_class(&mut diagram, &mut session, 100.0, 100.0);
    let b = add_class(&mut diagram, &mut session, 500.0, 100.0);
    let c = add_class(&mut diagram, &mut session, 500.0, 400.0);
    link(&mut diagram, &mut session, ComponentType::Association, &a, &b);
    link(&mut diagram, &mut session, ComponentType::Inheritance, &c, &a);
    let kept = link(&mut diagram, &mut session, ComponentType::Association, &b, &c);

    let removed = diagram.remove(&a).unwrap();
    assert_eq!(removed.len(), 3);
    assert_eq!(diagram.len(), 3);
    assert!(diagram.component_by_id(kept.as_str()).unwrap().is_some());
    assert_eq!(diagram.class(&b).unwrap().attached().count(), 1);
    assert_eq!(diagram.class(&c).unwrap().attached().count(), 1);
    assert_eq!(diagram.name_count("Class1"), 0);
}

#[test]
fn test_deleting_association_detaches_ends() {
    let mut session = EditorSession::new();
    let mut diagram = Diagram::new("Main", 1000.0, 800.0);
    let a = add_class(&mut diagram, &mut session, 100.0, 100.0);
    let b = add_class(&mut diagram, &mut session, 500.0, 100.0);
    let l = link(&mut diagram, &mut session, ComponentType::Composition, &a, &b);

    diagram.remove(&l).unwrap();
    assert_eq!(diagram.len(), 2);
    assert_eq!(diagram.class(&a).unwrap().attached().count(), 0);
    assert_eq!(diagram.class(&b).unwrap().attached().count(), 0);
}

#[test]
fn test_touching_edge_creates_and_simplifies_bend_point() {
    let mut session = EditorSession::new();
    let mut diagram = Diagram::new("Main", 1000.0, 800.0);
    let a = add_class(&mut diagram, &mut session, 100.0, 100.0);
    let b = add_class(&mut diagram, &mut session, 500.0, 100.0);
    let l = link(&mut diagram, &mut session, ComponentType::Association, &a, &b);

    let touched = diagram.touch(Vector::new(300.0, 102.0)).unwrap();
    let Some(Touched::Node(handle)) = touched else {
        panic!("expected a node, got {:?}", touched);
    };
    assert_eq!(handle.association, l);
    assert_eq!(diagram.association(&l).unwrap().chain.len(), 3);

    diagram.move_node(&handle, Vector::new(300.0, 200.0)).unwrap();
    diagram.drop_node(&handle, None).unwrap();
    assert_eq!(diagram.association(&l).unwrap().chain.len(), 3);

    diagram.move_node(&handle, Vector::new(203.0, 100.0)).unwrap();
    diagram.drop_node(&handle, None).unwrap();
    assert_eq!(diagram.association(&l).unwrap().chain.len(), 2);
}

#[test]
fn test_dropping_termination_node_reattaches() {
    let mut session = EditorSession::new();
    let mut diagram = Diagram::new("Main", 1000.0, 800.0);
    let a = add_class(&mut diagram, &mut session, 100.0, 100.0);
    let b = add_class(&mut diagram, &mut session, 500.0, 100.0);
    let c = add_class(&mut diagram, &mut session, 500.0, 500.0);
    let l = link(&mut diagram, &mut session, ComponentType::Association, &a, &b);

    let handle = NodeHandle {
        association: l.clone(),
        node: diagram.association(&l).unwrap().chain.end(),
    };

    diagram.move_node(&handle, Vector::new(800.0, 300.0)).unwrap();
    diagram.drop_node(&handle, None).unwrap();
    assert_eq!(diagram.association(&l).unwrap().attached_class(End::End), None);
    assert_eq!(diagram.class(&b).unwrap().attached().count(), 0);

    diagram.move_node(&handle, Vector::new(480.0, 480.0)).unwrap();
    diagram.drop_node(&handle, Some(10.0)).unwrap();
    let association = diagram.association(&l).unwrap();
    assert_eq!(association.attached_class(End::End), Some(&c));
    let c_bounds = diagram.component(&c).unwrap().bounds();
    assert!(c_bounds.inflate(0.5).contains_point(association.chain.end_position(End::End)));
}

#[test]
fn test_bounds_cover_placed_components_only() {
    let mut session = EditorSession::new();
    let mut diagram = Diagram::new("Main", 1000.0, 800.0);
    add_class(&mut diagram, &mut session, 100.0, 100.0);
    let mut floating = Component::new(ComponentType::Class, &mut session);
    floating.selectable.position = Vector::new(900.0, 900.0);
    diagram.add(floating);

    let bounds = diagram.bounds();
    assert_eq!(bounds.left, 0.0);
    assert_eq!(bounds.right, 200.0);
    assert!(bounds.bottom < 900.0);
}

#[test]
fn test_lookup_errors() {
    let mut session = EditorSession::new();
    let mut diagram = Diagram::new("Main", 1000.0, 800.0);
    let a = add_class(&mut diagram, &mut session, 100.0, 100.0);

    assert!(diagram.component_by_id("").is_err());
    assert!(diagram.association(&a).is_err());
    assert!(diagram.class(&ComponentId::new("d99")).is_err());
}
