use super::{codes, SanityContext, SanityElement, SanityFinding};
use regex::Regex;
use std::sync::OnceLock;

fn number_regex() -> &'static Regex {
    static NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();
    NUMBER_REGEX.get_or_init(|| Regex::new(r"^\d+$").expect("invalid regex pattern"))
}

fn any_regex() -> &'static Regex {
    static ANY_REGEX: OnceLock<Regex> = OnceLock::new();
    ANY_REGEX.get_or_init(|| Regex::new(r"^\*$").expect("invalid regex pattern"))
}

fn range_regex() -> &'static Regex {
    static RANGE_REGEX: OnceLock<Regex> = OnceLock::new();
    RANGE_REGEX.get_or_init(|| {
        Regex::new(r"^(\d+)\s*\.\.\s*(\d+|\*)$").expect("invalid regex pattern")
    })
}

/// Parsed form of a multiplicity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiplicityKind {
    Empty,
    NumberOnly(u32),
    AnyOnly,
    /// `lower..upper`; `upper` is `None` for `*`.
    Range { lower: u32, upper: Option<u32> },
    Invalid,
}

/// Multiplicity label on an association end: `1`, `*`, `0..1`, `1..*`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Multiplicity {
    value: String,
}

impl Multiplicity {
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

    pub fn kind(&self) -> MultiplicityKind {
        let text = self.value.trim();
        if text.is_empty() {
            return MultiplicityKind::Empty;
        }
        if number_regex().is_match(text) {
            return text
                .parse()
                .map_or(MultiplicityKind::Invalid, MultiplicityKind::NumberOnly);
        }
        if any_regex().is_match(text) {
            return MultiplicityKind::AnyOnly;
        }
        if let Some(caps) = range_regex().captures(text) {
            let lower = caps[1].parse::<u32>();
            let upper = match &caps[2] {
                "*" => Ok(None),
                bound => bound.parse::<u32>().map(Some),
            };
            if let (Ok(lower), Ok(upper)) = (lower, upper) {
                return MultiplicityKind::Range { lower, upper };
            }
        }
        MultiplicityKind::Invalid
    }

    /// True when the end admits at most one instance. Empty and invalid
    /// values count as satisfied; invalid ones are reported separately.
    pub fn at_most_one(&self) -> bool {
        match self.kind() {
            MultiplicityKind::Empty | MultiplicityKind::Invalid => true,
            MultiplicityKind::NumberOnly(n) => n <= 1,
            MultiplicityKind::AnyOnly => false,
            MultiplicityKind::Range { upper, .. } => upper.is_some_and(|u| u <= 1),
        }
    }
}

impl SanityElement for Multiplicity {
    fn element_type(&self) -> &'static str {
        "Multiplicity"
    }

    fn element_name(&self) -> String {
        self.value.clone()
    }

    fn process_sanity_check(&self, ctx: &SanityContext<'_>) -> Vec<SanityFinding> {
        match self.kind() {
            MultiplicityKind::Invalid => vec![ctx.finding(
                codes::MULTIPLICITY_INVALID,
                self.element_type(),
                &self.value,
                "Invalid multiplicity",
            )],
            MultiplicityKind::Range {
                lower,
                upper: Some(upper),
            } if lower > upper => vec![ctx.finding(
                codes::MULTIPLICITY_BOUNDS,
                self.element_type(),
                &self.value,
                "Lower bound exceeds upper bound",
            )],
            _ => Vec::new(),
        }
    }
}
