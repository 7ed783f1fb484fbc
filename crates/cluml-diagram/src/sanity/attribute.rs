use super::{codes, SanityContext, SanityElement, SanityFinding, Visibility};
use cluml_core::Vector;

/// A class attribute written as `[visibility] name : type [= default]`.
///
/// The raw text is kept as typed; the parts are parsed from it whenever it
/// changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    value: String,
    /// Position of the row, relative to the class anchor.
    pub position: Vector,
    visibility: Option<Visibility>,
    name: String,
    type_name: Option<String>,
}

impl Attribute {
    pub fn new(value: impl Into<String>) -> Self {
        let mut attribute = Self {
            value: String::new(),
            position: Vector::ZERO,
            visibility: None,
            name: String::new(),
            type_name: None,
        };
        attribute.set_value(value);
        attribute
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        let (visibility, rest) = Visibility::split(&self.value);
        let (name, type_name) = match rest.split_once(':') {
            Some((name, ty)) => {
                let ty = ty.split('=').next().unwrap_or("").trim();
                (name.trim(), (!ty.is_empty()).then(|| ty.to_string()))
            }
            None => (rest.split('=').next().unwrap_or("").trim(), None),
        };
        self.visibility = visibility;
        self.name = name.to_string();
        self.type_name = type_name;
    }

    pub fn visibility(&self) -> Option<Visibility> {
        self.visibility
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }
}

/// `MAX_SIZE` style names are exempt from the lowercase rule.
fn is_constant_name(name: &str) -> bool {
    name.chars()
        .all(|c| c.is_uppercase() || c.is_ascii_digit() || c == '_')
}

impl SanityElement for Attribute {
    fn element_type(&self) -> &'static str {
        "Attribute"
    }

    fn element_name(&self) -> String {
        if self.name.is_empty() {
            self.value.trim().to_string()
        } else {
            self.name.clone()
        }
    }

    fn process_sanity_check(&self, ctx: &SanityContext<'_>) -> Vec<SanityFinding> {
        let element_name = self.element_name();
        let mut findings = Vec::new();
        let mut report = |code, description| {
            findings.push(ctx.finding(code, self.element_type(), &element_name, description));
        };

        if ctx.session.show_visibility && self.visibility.is_none() {
            report(codes::ATTRIBUTE_VISIBILITY_MISSING, "Visibility missing");
        }

        if self.name.is_empty() {
            report(codes::ATTRIBUTE_NAME_MISSING, "Attribute name missing");
        } else {
            if self.name.chars().any(char::is_whitespace) {
                report(
                    codes::ATTRIBUTE_NAME_WHITESPACE,
                    "Attribute name contains whitespace",
                );
            }
            let starts_upper = self.name.chars().next().is_some_and(char::is_uppercase);
            if starts_upper && !is_constant_name(&self.name) {
                report(
                    codes::ATTRIBUTE_NAME_CASE,
                    "Attribute name should begin with a lowercase letter",
                );
            }
        }

        if self.type_name.is_none() {
            report(codes::ATTRIBUTE_TYPE_MISSING, "Attribute type missing");
        }

        findings
    }
}
