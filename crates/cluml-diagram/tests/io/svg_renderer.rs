use cluml_core::{EditorSession, Vector};
use cluml_diagram::{render_svg, Component, ComponentType, Diagram};

fn class_at(diagram: &mut Diagram, session: &mut EditorSession, name: &str, x: f64, placed: bool) {
    let mut component = Component::new(ComponentType::Class, session);
    component.selectable.position = Vector::new(x, 100.0);
    component.selectable.placed = placed;
    if let Some(class) = component.as_class_mut() {
        class.name.set_value(name);
        class.add_attribute("+items: List<Item>", session);
    }
    diagram.add(component);
}

#[test]
fn test_svg_contains_placed_classes_only() {
    let mut session = EditorSession::new();
    let mut diagram = Diagram::new("Shop", 800.0, 600.0);
    class_at(&mut diagram, &mut session, "Cart", 150.0, true);
    class_at(&mut diagram, &mut session, "Ghost", 500.0, false);

    let svg = render_svg(&diagram);
    assert!(svg.contains("width=\"800\" height=\"600\""));
    assert!(svg.contains(">Cart</text>"));
    assert!(!svg.contains("Ghost"));
    assert!(svg.contains("+items: List&lt;Item&gt;"));
    assert_eq!(svg.matches("<rect").count(), 2);
}

#[test]
fn test_svg_draws_association_path_and_glyph() {
    let mut session = EditorSession::new();
    let mut diagram = Diagram::new("Shop", 800.0, 600.0);
    class_at(&mut diagram, &mut session, "Cart", 150.0, true);
    class_at(&mut diagram, &mut session, "Order", 550.0, true);
    let from = diagram.component_by_naming("Cart").unwrap().id().clone();
    let to = diagram.component_by_naming("Order").unwrap().id().clone();

    let mut link = Component::new(ComponentType::Composition, &mut session);
    link.selectable.placed = true;
    let link = diagram.add(link);
    diagram.connect(&link, &from, &to).unwrap();

    let svg = render_svg(&diagram);
    assert!(svg.contains("<polyline points=\"250,100 450,100\""));
    assert!(svg.contains("<polygon"));
}
