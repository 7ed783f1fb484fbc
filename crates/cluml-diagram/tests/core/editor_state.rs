use cluml_core::{ComponentId, Error, Rect, Vector};
use cluml_diagram::{ClassField, ComponentType, EditorState, FieldEditor, Touched};

#[derive(Default)]
struct RecordingEditor {
    opened: Vec<(ComponentId, ClassField, String)>,
}

impl FieldEditor for RecordingEditor {
    fn open_field(&mut self, component: &ComponentId, field: ClassField, _bounds: Rect, current: &str) {
        self.opened.push((component.clone(), field, current.to_string()));
    }
}

fn two_classes(state: &mut EditorState) -> (ComponentId, ComponentId) {
    let a = state.add_component(ComponentType::Class, Vector::new(100.0, 100.0));
    let b = state.add_component(ComponentType::Class, Vector::new(500.0, 100.0));
    (a, b)
}

#[test]
fn test_undo_redo_sequence() {
    let mut state = EditorState::default();
    assert!(!state.can_undo());
    two_classes(&mut state);
    assert_eq!(state.document.active().len(), 2);

    assert!(state.undo());
    assert_eq!(state.document.active().len(), 1);
    assert!(state.can_redo());
    assert!(state.redo());
    assert_eq!(state.document.active().len(), 2);

    state.undo();
    state.add_component(ComponentType::Interface, Vector::new(300.0, 400.0));
    assert!(!state.can_redo());
    assert!(!state.redo());
}

#[test]
fn test_add_association_rejects_class_type() {
    let mut state = EditorState::default();
    let (a, b) = two_classes(&mut state);
    let depth = state.history.undo_depth();

    let err = state.add_association(ComponentType::Class, &a, &b).unwrap_err();
    assert!(matches!(err, Error::Other(_)));
    assert_eq!(state.history.undo_depth(), depth);
    assert_eq!(state.document.active().len(), 2);
}

#[test]
fn test_failed_connect_rolls_back() {
    let mut state = EditorState::default();
    let (a, _) = two_classes(&mut state);
    let depth = state.history.undo_depth();

    let missing = ComponentId::new("d404");
    assert!(state.add_association(ComponentType::Association, &a, &missing).is_err());
    assert_eq!(state.history.undo_depth(), depth);
    assert_eq!(state.document.active().len(), 2);
}

#[test]
fn test_dragging_bend_point_is_undoable() {
    let mut state = EditorState::default();
    let (a, b) = two_classes(&mut state);
    let link = state.add_association(ComponentType::Association, &a, &b).unwrap();

    let touched = state.pointer_down(Vector::new(300.0, 100.0)).unwrap();
    assert!(matches!(touched, Some(Touched::Node(_))));
    state.pointer_move(Vector::new(300.0, 220.0)).unwrap();
    state.pointer_up(Vector::new(300.0, 250.0)).unwrap();

    let chain_len = |state: &EditorState| state.document.active().association(&link).unwrap().chain.len();
    assert_eq!(chain_len(&state), 3);
    assert!(state.undo());
    assert_eq!(chain_len(&state), 2);
}

#[test]
fn test_snap_applies_on_release() {
    let mut state = EditorState::default();
    state.set_snap(true);
    let a = state.add_component(ComponentType::Class, Vector::new(100.0, 100.0));

    state.pointer_down(Vector::new(100.0, 100.0)).unwrap();
    state.pointer_up(Vector::new(133.0, 147.0)).unwrap();
    let position = state.document.active().component(&a).unwrap().position();
    assert_eq!(position, Vector::new(130.0, 150.0));
}

#[test]
fn test_field_editing_through_editor() {
    let mut state = EditorState::default();
    let a = state.add_component(ComponentType::Class, Vector::new(100.0, 100.0));

    let mut editor = RecordingEditor::default();
    assert!(state.open_field_editor(Vector::new(100.0, 85.0), &mut editor));
    assert_eq!(editor.opened, vec![(a.clone(), ClassField::Name, "Class1".to_string())]);
    assert!(!state.open_field_editor(Vector::new(900.0, 900.0), &mut editor));

    state.commit_edit(&a, ClassField::Name, "Customer").unwrap();
    state
        .commit_edit(&a, ClassField::NewAttribute, "-id: long")
        .unwrap();
    let class = state.document.active().class(&a).unwrap();
    assert_eq!(class.name.value(), "Customer");
    assert_eq!(class.attributes.len(), 1);
    assert!(state.document.active().component_by_naming("Customer").is_some());
}

#[test]
fn test_sanity_check_reports_diagram_problems() {
    let mut state = EditorState::default();
    let sub = state.add_component(ComponentType::Class, Vector::new(100.0, 100.0));
    let sup = state.add_component(ComponentType::Class, Vector::new(100.0, 400.0));
    state.add_association(ComponentType::Inheritance, &sub, &sup).unwrap();
    state.add_component(ComponentType::Containment, Vector::new(600.0, 600.0));

    let codes: Vec<String> = state
        .sanity_check()
        .into_iter()
        .map(|finding| finding.error_code)
        .collect();
    assert!(codes.contains(&"E0406".to_string()));
    assert_eq!(codes.iter().filter(|c| *c == "E0405").count(), 2);
}

#[test]
fn test_diagram_tabs() {
    let mut state = EditorState::default();
    state.add_component(ComponentType::Class, Vector::new(100.0, 100.0));

    let second = state.new_diagram();
    assert_eq!(second, "Diagram2");
    assert!(state.document.active().is_empty());

    state.rename_diagram(&second, "Domain").unwrap();
    state.select_diagram("Diagram1").unwrap();
    assert_eq!(state.document.active().len(), 1);

    state.remove_diagram("Domain").unwrap();
    assert_eq!(state.document.len(), 1);
    assert!(state.remove_diagram("Diagram1").is_err());
    assert!(state.select_diagram("Domain").is_err());
}
