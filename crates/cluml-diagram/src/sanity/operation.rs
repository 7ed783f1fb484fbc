use super::{codes, SanityContext, SanityElement, SanityFinding, Visibility};
use cluml_core::Vector;

/// One parameter of an operation, written `name : type`.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub type_name: Option<String>,
}

/// A class operation written as `[visibility] name(params) [: return]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    value: String,
    /// Position of the row, relative to the class anchor.
    pub position: Vector,
    pub is_abstract: bool,
    visibility: Option<Visibility>,
    name: String,
    parameters: Vec<Parameter>,
    return_type: Option<String>,
    has_parentheses: bool,
}

/// Splits at commas that are not nested inside brackets.
fn split_parameters(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '<' | '(' | '[' | '{' => depth += 1,
            '>' | ')' | ']' | '}' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

fn parse_parameter(text: &str) -> Parameter {
    match text.split_once(':') {
        Some((name, ty)) => {
            let ty = ty.split('=').next().unwrap_or("").trim();
            Parameter {
                name: name.trim().to_string(),
                type_name: (!ty.is_empty()).then(|| ty.to_string()),
            }
        }
        None => Parameter {
            name: text.trim().to_string(),
            type_name: None,
        },
    }
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

impl Operation {
    pub fn new(value: impl Into<String>) -> Self {
        let mut operation = Self {
            value: String::new(),
            position: Vector::ZERO,
            is_abstract: false,
            visibility: None,
            name: String::new(),
            parameters: Vec::new(),
            return_type: None,
            has_parentheses: false,
        };
        operation.set_value(value);
        operation
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        let (visibility, rest) = Visibility::split(&self.value);
        self.visibility = visibility;
        self.parameters.clear();

        let open = rest.find('(');
        let close = rest.rfind(')');
        match (open, close) {
            (Some(open), Some(close)) if close > open => {
                self.name = rest[..open].trim().to_string();
                self.parameters = split_parameters(&rest[open + 1..close])
                    .into_iter()
                    .map(parse_parameter)
                    .collect();
                let tail = rest[close + 1..].trim();
                self.return_type = tail.strip_prefix(':').and_then(non_empty);
                self.has_parentheses = true;
            }
            _ => {
                let (name, ret) = rest.split_once(':').unwrap_or((rest, ""));
                let name = open.map_or(name, |open| &rest[..open.min(name.len())]);
                self.name = name.trim().to_string();
                self.return_type = non_empty(ret);
                self.has_parentheses = false;
            }
        }
    }

    pub fn visibility(&self) -> Option<Visibility> {
        self.visibility
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn return_type(&self) -> Option<&str> {
        self.return_type.as_deref()
    }

    pub fn has_parentheses(&self) -> bool {
        self.has_parentheses
    }
}

impl SanityElement for Operation {
    fn element_type(&self) -> &'static str {
        "Operation"
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
        let element_type = self.element_type();
        let mut findings = Vec::new();

        if ctx.session.show_visibility && self.visibility.is_none() {
            findings.push(ctx.finding(
                codes::OPERATION_VISIBILITY_MISSING,
                element_type,
                &element_name,
                "Visibility missing",
            ));
        }

        if self.name.is_empty() {
            findings.push(ctx.finding(
                codes::OPERATION_NAME_MISSING,
                element_type,
                &element_name,
                "Operation name missing",
            ));
        } else if self.name.chars().any(char::is_whitespace) {
            findings.push(ctx.finding(
                codes::OPERATION_NAME_WHITESPACE,
                element_type,
                &element_name,
                "Operation name contains whitespace",
            ));
        }

        if !self.has_parentheses {
            findings.push(ctx.finding(
                codes::OPERATION_PARENTHESES_MISSING,
                element_type,
                &element_name,
                "Operation is missing parentheses",
            ));
        }

        for parameter in self.parameters.iter().filter(|p| p.type_name.is_none()) {
            findings.push(ctx.finding(
                codes::PARAMETER_TYPE_MISSING,
                element_type,
                &format!("{}({})", element_name, parameter.name),
                "Parameter missing type",
            ));
        }

        findings
    }
}
