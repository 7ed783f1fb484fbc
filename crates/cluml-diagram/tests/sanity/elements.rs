use cluml_core::{ComponentId, EditorSession, Vector};
use cluml_diagram::association::End;
use cluml_diagram::{run_sanity_check, Component, ComponentType, Diagram, SanityErrorInfo};

fn class_with(
    diagram: &mut Diagram,
    session: &mut EditorSession,
    component_type: ComponentType,
    name: &str,
    attributes: &[&str],
    operations: &[&str],
) -> ComponentId {
    let mut component = Component::new(component_type, session);
    component.selectable.position = Vector::new(100.0 + 300.0 * diagram.len() as f64, 100.0);
    component.selectable.placed = true;
    if let Some(class) = component.as_class_mut() {
        class.name.set_value(name);
        for attribute in attributes {
            class.add_attribute(*attribute, session);
        }
        for operation in operations {
            class.add_operation(*operation, session);
        }
    }
    diagram.add(component)
}

fn codes(findings: &[SanityErrorInfo]) -> Vec<&str> {
    findings.iter().map(|f| f.error_code.as_str()).collect()
}

#[test]
fn test_well_formed_class_is_clean() {
    let mut session = EditorSession::new();
    let mut diagram = Diagram::new("Main", 1000.0, 800.0);
    class_with(
        &mut diagram,
        &mut session,
        ComponentType::Class,
        "Customer",
        &["+name: String", "-MAX_ORDERS: int = 10"],
        &["+placeOrder(item: Item, count: int): Order", "#reset()"],
    );
    assert!(run_sanity_check(&diagram, &session).is_empty());
}

#[test]
fn test_visibility_rule_follows_session_switch() {
    let mut session = EditorSession::new();
    let mut diagram = Diagram::new("Main", 1000.0, 800.0);
    class_with(
        &mut diagram,
        &mut session,
        ComponentType::Class,
        "Foo",
        &["attribute: String"],
        &[],
    );

    let findings = run_sanity_check(&diagram, &session);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].error_code, "E0101");
    assert_eq!(findings[0].element_type, "Attribute");
    assert_eq!(findings[0].element_name, "Foo.attribute");
    assert_eq!(findings[0].description, "Visibility missing");

    session.show_visibility = false;
    assert!(run_sanity_check(&diagram, &session).is_empty());
}

#[test]
fn test_attribute_problems() {
    let mut session = EditorSession::new();
    session.show_visibility = false;
    let mut diagram = Diagram::new("Main", 1000.0, 800.0);
    class_with(
        &mut diagram,
        &mut session,
        ComponentType::Class,
        "Foo",
        &["+Count: int", "+first name: String", "+untyped", "+: int"],
        &[],
    );

    let findings = run_sanity_check(&diagram, &session);
    assert_eq!(codes(&findings), vec!["E0105", "E0104", "E0103", "E0102"]);
}

#[test]
fn test_operation_problems() {
    let mut session = EditorSession::new();
    let mut diagram = Diagram::new("Main", 1000.0, 800.0);
    class_with(
        &mut diagram,
        &mut session,
        ComponentType::Class,
        "Foo",
        &[],
        &["+compute(x, y: int): int", "run"],
    );

    let findings = run_sanity_check(&diagram, &session);
    let parameter = findings
        .iter()
        .find(|f| f.error_code == "E0204")
        .expect("parameter finding");
    assert_eq!(parameter.element_name, "Foo.compute(x)");
    assert_eq!(
        codes(&findings),
        vec!["E0204", "E0201", "E0203"]
    );
}

#[test]
fn test_class_name_problems() {
    let mut session = EditorSession::new();
    let mut diagram = Diagram::new("Main", 1000.0, 800.0);
    class_with(&mut diagram, &mut session, ComponentType::Class, "order line", &[], &[]);

    let findings = run_sanity_check(&diagram, &session);
    assert_eq!(codes(&findings), vec!["E0302", "E0303"]);
    assert!(findings.iter().all(|f| f.element_type == "Class"));
}

#[test]
fn test_interface_with_attributes() {
    let mut session = EditorSession::new();
    let mut diagram = Diagram::new("Main", 1000.0, 800.0);
    class_with(
        &mut diagram,
        &mut session,
        ComponentType::Interface,
        "Shape",
        &["+sides: int"],
        &["+area(): double"],
    );

    let findings = run_sanity_check(&diagram, &session);
    assert_eq!(codes(&findings), vec!["E0306"]);
    assert_eq!(findings[0].element_type, "Interface");
}

#[test]
fn test_association_end_labels() {
    let mut session = EditorSession::new();
    let mut diagram = Diagram::new("Main", 1000.0, 800.0);
    let part = class_with(&mut diagram, &mut session, ComponentType::Class, "Wheel", &[], &[]);
    let whole = class_with(&mut diagram, &mut session, ComponentType::Class, "Car", &[], &[]);

    let mut component = Component::new(ComponentType::Composition, &mut session);
    component.selectable.placed = true;
    let link = diagram.add(component);
    diagram.connect(&link, &part, &whole).unwrap();
    {
        let chain = &mut diagram.association_mut(&link).unwrap().chain;
        chain.termination_mut(End::Start).multiplicity.set_value("4..2");
        chain.termination_mut(End::Start).tag.set_value("+front wheels");
        chain.termination_mut(End::End).multiplicity.set_value("*");
    }

    let findings = run_sanity_check(&diagram, &session);
    assert_eq!(codes(&findings), vec!["E0402", "E0404", "E0403"]);

    diagram
        .association_mut(&link)
        .unwrap()
        .chain
        .termination_mut(End::End)
        .multiplicity
        .set_value("one");
    let findings = run_sanity_check(&diagram, &session);
    assert!(codes(&findings).contains(&"E0401"));
    assert!(!codes(&findings).contains(&"E0403"));
}
