use super::{codes, SanityContext, SanityElement, SanityFinding, Visibility};

/// Role label on an association end.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AssociationTag {
    value: String,
}

impl AssociationTag {
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

    /// Role name without its visibility marker.
    pub fn role(&self) -> &str {
        Visibility::split(&self.value).1.trim()
    }
}

impl SanityElement for AssociationTag {
    fn element_type(&self) -> &'static str {
        "Role"
    }

    fn element_name(&self) -> String {
        self.role().to_string()
    }

    fn process_sanity_check(&self, ctx: &SanityContext<'_>) -> Vec<SanityFinding> {
        if self.role().chars().any(char::is_whitespace) {
            vec![ctx.finding(
                codes::ROLE_WHITESPACE,
                self.element_type(),
                self.role(),
                "Role name contains whitespace",
            )]
        } else {
            Vec::new()
        }
    }
}
