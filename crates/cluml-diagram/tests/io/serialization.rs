use cluml_core::{ComponentId, EditorSession, Vector};
use cluml_diagram::association::End;
use cluml_diagram::{BuiltinRegistry, Component, ComponentType, Diagrams, DiagramsFile};

const SIZE: (f64, f64) = (1600.0, 1200.0);

fn sample_document(session: &mut EditorSession) -> (Diagrams, ComponentId, ComponentId, ComponentId) {
    let mut doc = Diagrams::new(SIZE.0, SIZE.1);
    let diagram = doc.active_mut();

    let mut foo = Component::new(ComponentType::Class, session);
    foo.selectable.position = Vector::new(150.0, 120.0);
    foo.selectable.placed = true;
    if let Some(class) = foo.as_class_mut() {
        class.name.set_value("Foo");
        class.add_attribute("-items: List<Item>", session);
        class.add_operation("+size(): int", session);
    }
    let foo = diagram.add(foo);

    let mut bar = Component::new(ComponentType::Interface, session);
    bar.selectable.position = Vector::new(550.0, 120.0);
    bar.selectable.placed = true;
    let bar = diagram.add(bar);

    let mut link = Component::new(ComponentType::Aggregation, session);
    link.selectable.placed = true;
    let link = diagram.add(link);
    diagram.connect(&link, &foo, &bar).unwrap();
    diagram
        .association_mut(&link)
        .unwrap()
        .chain
        .termination_mut(End::Start)
        .multiplicity
        .set_value("0..*");

    (doc, foo, bar, link)
}

fn reload(file: &DiagramsFile) -> (Diagrams, EditorSession) {
    let mut session = EditorSession::new();
    let doc = Diagrams::load(file, &BuiltinRegistry, &mut session, SIZE).unwrap();
    (doc, session)
}

#[test]
fn test_file_round_trip_keeps_model() {
    let mut session = EditorSession::new();
    let (doc, foo, bar, link) = sample_document(&mut session);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    doc.save().save_to_file(&path).unwrap();
    let file = DiagramsFile::load_from_file(&path).unwrap();
    let (loaded, _) = reload(&file);

    assert_eq!(loaded.id(), doc.id());
    let diagram = loaded.active();
    let class = diagram.class(&foo).unwrap();
    assert_eq!(class.name.value(), "Foo");
    assert_eq!(class.attributes[0].value(), "-items: List<Item>");
    assert_eq!(class.operations[0].value(), "+size(): int");
    assert!(diagram.component(&bar).unwrap().as_class().unwrap().is_interface());

    let association = diagram.association(&link).unwrap();
    assert_eq!(association.attached_class(End::Start), Some(&foo));
    assert_eq!(association.attached_class(End::End), Some(&bar));
    assert_eq!(
        association.chain.termination(End::Start).multiplicity.value(),
        "0..*"
    );
    assert_eq!(diagram.class(&bar).unwrap().attached().count(), 1);
}

#[test]
fn test_json_field_names() {
    let mut session = EditorSession::new();
    let (doc, ..) = sample_document(&mut session);
    let json = serde_json::to_value(doc.save()).unwrap();

    let components = &json["diagrams"][0]["components"];
    let class = &components[0];
    assert_eq!(class["fileLbl"], ComponentType::Class.file_lbl());
    assert_eq!(class["name"], "Foo");
    assert!(class.get("nodeData").is_none());
    assert_eq!(class["attributes"][0]["visibility"], "-");

    let association = &components[2];
    assert_eq!(association["nodeData"]["nextType"], "Termination");
    assert!(association.get("attributes").is_none());
}

#[test]
fn test_unknown_component_type_is_skipped() {
    let mut session = EditorSession::new();
    let (doc, _, bar, _) = sample_document(&mut session);
    let mut file = doc.save();
    let bar_obj = file.diagrams[0]
        .components
        .iter_mut()
        .find(|c| c.id == bar.as_str())
        .unwrap();
    bar_obj.file_lbl = "StickyNote".to_string();

    let (loaded, _) = reload(&file);
    assert_eq!(loaded.active().len(), 2);
    assert!(loaded.active().component_by_id(bar.as_str()).unwrap().is_none());
}

#[test]
fn test_dangling_attachment_is_detached() {
    let mut session = EditorSession::new();
    let (doc, foo, bar, link) = sample_document(&mut session);
    let mut file = doc.save();
    file.diagrams[0].components.retain(|c| c.id != bar.as_str());

    let (loaded, _) = reload(&file);
    let association = loaded.active().association(&link).unwrap();
    assert_eq!(association.attached_class(End::Start), Some(&foo));
    assert_eq!(association.attached_class(End::End), None);
}

#[test]
fn test_markup_is_stripped_on_load() {
    let mut session = EditorSession::new();
    let (doc, foo, ..) = sample_document(&mut session);
    let mut file = doc.save();
    file.diagrams[0].components[0].name = Some("Foo<script>alert(1)</script>".to_string());

    let (loaded, _) = reload(&file);
    assert_eq!(loaded.active().class(&foo).unwrap().name.value(), "Foo");
}

#[test]
fn test_loaded_ids_advance_session() {
    let mut session = EditorSession::new();
    let (doc, ..) = sample_document(&mut session);
    let mut file = doc.save();
    file.diagrams[0].components[0].id = "d42".to_string();

    let (loaded, mut session) = reload(&file);
    assert!(loaded.active().component_by_id("d42").unwrap().is_some());
    assert_eq!(session.next_id().as_str(), "d43");
}

#[test]
fn test_empty_document_gets_a_diagram() {
    let file: DiagramsFile = serde_json::from_str(r#"{"id": "", "diagrams": []}"#).unwrap();
    let (loaded, _) = reload(&file);
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded.active().name, "Diagram1");
    assert!(!loaded.id().is_empty());
    assert_eq!(loaded.grid, 10.0);
}

#[test]
fn test_broken_chain_fails_load() {
    let mut session = EditorSession::new();
    let (doc, _, _, link) = sample_document(&mut session);
    let mut file = doc.save();
    let link_obj = file.diagrams[0]
        .components
        .iter_mut()
        .find(|c| c.id == link.as_str())
        .unwrap();
    link_obj.node_data = None;

    let mut session = EditorSession::new();
    let err = Diagrams::load(&file, &BuiltinRegistry, &mut session, SIZE).unwrap_err();
    assert!(err.is_structural());
}
