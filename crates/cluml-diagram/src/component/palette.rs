//! Palette metadata and the component registry.
//!
//! Metadata is static and shared by every instance (and every undo
//! snapshot) of a component type.

use super::ComponentType;

/// Fixed description of a component type.
#[derive(Debug, PartialEq, Eq)]
pub struct PaletteInfo {
    pub palette_lbl: &'static str,
    pub palette_desc: &'static str,
    pub html_desc: &'static str,
    pub help_lbl: &'static str,
    /// Serialization type tag.
    pub file_lbl: &'static str,
    pub palette_group: &'static str,
    pub palette_order: u32,
    /// Components with a lower load order are loaded first.
    pub load_order: u32,
    pub draw_order: i32,
    /// Prefix for automatic naming; `None` when the type is never named.
    pub naming_prefix: Option<&'static str>,
}

pub const CLASSES_GROUP: &str = "Classes";
pub const RELATIONS_GROUP: &str = "Relations";

pub static CLASS: PaletteInfo = PaletteInfo {
    palette_lbl: "Class",
    palette_desc: "Class box with attributes and operations",
    html_desc: "<h1>Class</h1><p>A class with a name, attributes and operations.</p>",
    help_lbl: "class",
    file_lbl: "Class",
    palette_group: CLASSES_GROUP,
    palette_order: 1,
    load_order: 0,
    draw_order: 0,
    naming_prefix: Some("Class"),
};

pub static INTERFACE: PaletteInfo = PaletteInfo {
    palette_lbl: "Interface",
    palette_desc: "Interface box with operations",
    html_desc: "<h1>Interface</h1><p>An interface declaring operations.</p>",
    help_lbl: "interface",
    file_lbl: "InterfaceClass",
    palette_group: CLASSES_GROUP,
    palette_order: 2,
    load_order: 0,
    draw_order: 0,
    naming_prefix: Some("Interface"),
};

pub static ASSOCIATION: PaletteInfo = PaletteInfo {
    palette_lbl: "Association",
    palette_desc: "Plain association between two classes",
    html_desc: "<h1>Association</h1><p>A structural relationship.</p>",
    help_lbl: "association",
    file_lbl: "Association",
    palette_group: RELATIONS_GROUP,
    palette_order: 1,
    load_order: 1,
    draw_order: 1,
    naming_prefix: None,
};

pub static INHERITANCE: PaletteInfo = PaletteInfo {
    palette_lbl: "Inheritance",
    palette_desc: "Subclass to superclass",
    html_desc: "<h1>Inheritance</h1><p>The arrow points at the superclass.</p>",
    help_lbl: "inheritance",
    file_lbl: "Inheritance",
    palette_group: RELATIONS_GROUP,
    palette_order: 2,
    load_order: 1,
    draw_order: 1,
    naming_prefix: None,
};

pub static COMPOSITION: PaletteInfo = PaletteInfo {
    palette_lbl: "Composition",
    palette_desc: "Part to owning whole",
    html_desc: "<h1>Composition</h1><p>The filled diamond marks the whole.</p>",
    help_lbl: "composition",
    file_lbl: "Composition",
    palette_group: RELATIONS_GROUP,
    palette_order: 3,
    load_order: 1,
    draw_order: 1,
    naming_prefix: None,
};

pub static AGGREGATION: PaletteInfo = PaletteInfo {
    palette_lbl: "Aggregation",
    palette_desc: "Part to aggregate",
    html_desc: "<h1>Aggregation</h1><p>The hollow diamond marks the aggregate.</p>",
    help_lbl: "aggregation",
    file_lbl: "Aggregation",
    palette_group: RELATIONS_GROUP,
    palette_order: 4,
    load_order: 1,
    draw_order: 1,
    naming_prefix: None,
};

pub static CONTAINMENT: PaletteInfo = PaletteInfo {
    palette_lbl: "Containment",
    palette_desc: "Nested element to container",
    html_desc: "<h1>Containment</h1><p>The circled cross marks the container.</p>",
    help_lbl: "containment",
    file_lbl: "Containment",
    palette_group: RELATIONS_GROUP,
    palette_order: 5,
    load_order: 1,
    draw_order: 1,
    naming_prefix: None,
};

/// Resolves serialization tags to component types.
pub trait ComponentRegistry {
    fn get(&self, file_lbl: &str) -> Option<ComponentType>;

    /// Palette groups in display order, each sorted by palette order.
    fn palette_groups(&self) -> Vec<(&'static str, Vec<ComponentType>)>;
}

/// Registry of the built-in component types.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinRegistry;

impl ComponentRegistry for BuiltinRegistry {
    fn get(&self, file_lbl: &str) -> Option<ComponentType> {
        ComponentType::ALL
            .into_iter()
            .find(|ty| ty.palette().file_lbl == file_lbl)
    }

    fn palette_groups(&self) -> Vec<(&'static str, Vec<ComponentType>)> {
        [CLASSES_GROUP, RELATIONS_GROUP]
            .into_iter()
            .map(|group| {
                let mut types: Vec<ComponentType> = ComponentType::ALL
                    .into_iter()
                    .filter(|ty| ty.palette().palette_group == group)
                    .collect();
                types.sort_by_key(|ty| ty.palette().palette_order);
                (group, types)
            })
            .collect()
    }
}
