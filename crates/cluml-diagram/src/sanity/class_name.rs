use super::{codes, SanityContext, SanityElement, SanityFinding};

/// The name of a class box. Doubles as the component's naming.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClassName {
    value: String,
}

impl ClassName {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }
}

impl SanityElement for ClassName {
    fn element_type(&self) -> &'static str {
        "Class"
    }

    fn element_name(&self) -> String {
        self.value.clone()
    }

    fn process_sanity_check(&self, ctx: &SanityContext<'_>) -> Vec<SanityFinding> {
        let name = self.value.trim();
        if name.is_empty() {
            return vec![ctx.finding(
                codes::CLASS_NAME_MISSING,
                self.element_type(),
                "",
                "Class name missing",
            )];
        }

        let mut findings = Vec::new();
        if !name.chars().next().is_some_and(char::is_uppercase) {
            findings.push(ctx.finding(
                codes::CLASS_NAME_CASE,
                self.element_type(),
                name,
                "Class name should begin with an uppercase letter",
            ));
        }
        if name.chars().any(char::is_whitespace) {
            findings.push(ctx.finding(
                codes::CLASS_NAME_WHITESPACE,
                self.element_type(),
                name,
                "Class name contains whitespace",
            ));
        }
        if ctx.diagram.name_count(&self.value) > 1 {
            findings.push(ctx.finding(
                codes::CLASS_NAME_DUPLICATE,
                self.element_type(),
                name,
                "Duplicate class name",
            ));
        }
        findings
    }
}
