use std::fmt;

/// UML member visibility marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Private,
    Protected,
    Package,
}

impl Visibility {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Public),
            '-' => Some(Self::Private),
            '#' => Some(Self::Protected),
            '~' => Some(Self::Package),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Self::Public => '+',
            Self::Private => '-',
            Self::Protected => '#',
            Self::Package => '~',
        }
    }

    /// Splits a leading visibility marker off `text` (which is trimmed).
    pub fn split(text: &str) -> (Option<Self>, &str) {
        let text = text.trim();
        let mut chars = text.chars();
        match chars.next().and_then(Self::from_symbol) {
            Some(visibility) => (Some(visibility), chars.as_str().trim_start()),
            None => (None, text),
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
