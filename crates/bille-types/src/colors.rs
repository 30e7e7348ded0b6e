use facet::Facet;
use std::fmt;

/// Color used for the root lane axis when no branch color applies.
pub const DEFAULT_MAIN_COLOR: &str = "#212121";

/// Color of a plain value shape with no explicit color.
pub const DEFAULT_SHAPE_COLOR: &str = "#e91e63";

/// Color of a nested-observable marker with no explicit color.
pub const DEFAULT_OBSERVABLE_COLOR: &str = "#9e9e9e";

/// Distinguishable hues for sources that want to color values themselves.
pub const PALETTE: [&str; 8] = [
    "#e91e63", "#3f51b5", "#009688", "#ff9800", "#9c27b0", "#4caf50", "#03a9f4", "#795548",
];

/// A CSS color string as the external renderer consumes it.
#[derive(Facet, Debug, Clone, PartialEq, Eq, Hash)]
#[facet(transparent)]
pub struct Color(String);

impl Color {
    pub fn main_default() -> Self {
        Self(DEFAULT_MAIN_COLOR.to_string())
    }

    pub fn shape_default() -> Self {
        Self(DEFAULT_SHAPE_COLOR.to_string())
    }

    pub fn observable_default() -> Self {
        Self(DEFAULT_OBSERVABLE_COLOR.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Color {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
