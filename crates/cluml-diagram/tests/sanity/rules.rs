use cluml_core::{ComponentId, EditorSession, Vector};
use cluml_diagram::sanity::has_composition_cycle;
use cluml_diagram::{run_sanity_check, Component, ComponentType, Diagram, Diagrams, SanityErrorInfo};

fn named_class(diagram: &mut Diagram, session: &mut EditorSession, name: &str, x: f64, y: f64) -> ComponentId {
    let mut component = Component::new(ComponentType::Class, session);
    component.selectable.position = Vector::new(x, y);
    component.selectable.placed = true;
    if let Some(class) = component.as_class_mut() {
        class.name.set_value(name);
    }
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

fn count(findings: &[SanityErrorInfo], code: &str) -> usize {
    findings.iter().filter(|f| f.error_code == code).count()
}

#[test]
fn test_circular_composition_reported_once() {
    let mut session = EditorSession::new();
    let mut diagram = Diagram::new("Parts", 1000.0, 800.0);
    let a = named_class(&mut diagram, &mut session, "Engine", 100.0, 100.0);
    let b = named_class(&mut diagram, &mut session, "Piston", 500.0, 100.0);
    let c = named_class(&mut diagram, &mut session, "Ring", 300.0, 500.0);
    link(&mut diagram, &mut session, ComponentType::Composition, &a, &b);
    link(&mut diagram, &mut session, ComponentType::Composition, &b, &c);
    assert!(!has_composition_cycle(&diagram));

    link(&mut diagram, &mut session, ComponentType::Composition, &c, &a);
    assert!(has_composition_cycle(&diagram));

    let findings = run_sanity_check(&diagram, &session);
    assert_eq!(count(&findings, "E0501"), 1);
    let finding = findings.iter().find(|f| f.error_code == "E0501").unwrap();
    assert_eq!(finding.element_type, "Diagram");
    assert_eq!(finding.element_name, "Parts");
    assert_eq!(count(&findings, "E0502"), 0);
}

#[test]
fn test_circular_inheritance() {
    let mut session = EditorSession::new();
    let mut diagram = Diagram::new("Types", 1000.0, 800.0);
    let a = named_class(&mut diagram, &mut session, "Animal", 100.0, 100.0);
    let b = named_class(&mut diagram, &mut session, "Dog", 500.0, 100.0);
    link(&mut diagram, &mut session, ComponentType::Inheritance, &a, &b);
    assert_eq!(count(&run_sanity_check(&diagram, &session), "E0502"), 0);

    link(&mut diagram, &mut session, ComponentType::Inheritance, &b, &a);
    let findings = run_sanity_check(&diagram, &session);
    assert_eq!(count(&findings, "E0502"), 1);
    assert_eq!(count(&findings, "E0406"), 0);
    assert!(diagram.classes().all(|(_, class)| !class.is_visited()));
}

#[test]
fn test_upside_down_inheritance() {
    let mut session = EditorSession::new();
    let mut diagram = Diagram::new("Types", 1000.0, 800.0);
    let base = named_class(&mut diagram, &mut session, "Base", 300.0, 100.0);
    let derived = named_class(&mut diagram, &mut session, "Derived", 300.0, 400.0);
    let inheritance = link(&mut diagram, &mut session, ComponentType::Inheritance, &derived, &base);
    assert_eq!(count(&run_sanity_check(&diagram, &session), "E0406"), 0);

    diagram.move_component(&base, Vector::new(300.0, 700.0)).unwrap();
    diagram.move_component(&derived, Vector::new(300.0, 100.0)).unwrap();
    diagram.drop_component(&base, None).unwrap();
    let end = diagram.association(&inheritance).unwrap().chain.end_position(cluml_diagram::End::End);
    assert!(end.y > 100.0);
    assert_eq!(count(&run_sanity_check(&diagram, &session), "E0406"), 1);
}

#[test]
fn test_unattached_ends() {
    let mut session = EditorSession::new();
    let mut diagram = Diagram::new("Loose", 1000.0, 800.0);
    let mut component = Component::new(ComponentType::Inheritance, &mut session);
    component.selectable.placed = true;
    diagram.add(component);

    let findings = run_sanity_check(&diagram, &session);
    assert_eq!(count(&findings, "E0405"), 2);
    assert_eq!(count(&findings, "E0406"), 0);
    let names: Vec<&str> = findings.iter().map(|f| f.element_name.as_str()).collect();
    assert!(names.iter().all(|name| name.starts_with("Inheritance d1.")));
}

#[test]
fn test_duplicate_class_names() {
    let mut session = EditorSession::new();
    let mut diagram = Diagram::new("Main", 1000.0, 800.0);
    named_class(&mut diagram, &mut session, "Order", 100.0, 100.0);
    named_class(&mut diagram, &mut session, "Order", 500.0, 100.0);
    named_class(&mut diagram, &mut session, "Invoice", 100.0, 500.0);

    let findings = run_sanity_check(&diagram, &session);
    assert_eq!(count(&findings, "E0304"), 2);
    assert!(findings
        .iter()
        .filter(|f| f.error_code == "E0304")
        .all(|f| f.element_name == "Order"));
}

#[test]
fn test_member_limit() {
    let mut session = EditorSession::new();
    session.property_limit = 2;
    let mut diagram = Diagram::new("Main", 1000.0, 800.0);
    let id = named_class(&mut diagram, &mut session, "Config", 100.0, 100.0);
    {
        let class = diagram.class_mut(&id).unwrap();
        class.add_attribute("+host: String", &session);
        class.add_attribute("+port: int", &session);
    }
    assert_eq!(count(&run_sanity_check(&diagram, &session), "E0305"), 0);

    diagram
        .class_mut(&id)
        .unwrap()
        .add_operation("+load(): Config", &session);
    assert_eq!(count(&run_sanity_check(&diagram, &session), "E0305"), 1);
}

#[test]
fn test_document_checks_active_diagram() {
    let mut session = EditorSession::new();
    let mut doc = Diagrams::new(1000.0, 800.0);
    named_class(doc.active_mut(), &mut session, "lowercase", 100.0, 100.0);
    assert_eq!(count(&run_sanity_check(&doc, &session), "E0302"), 1);

    doc.new_diagram();
    assert!(run_sanity_check(&doc, &session).is_empty());
}
