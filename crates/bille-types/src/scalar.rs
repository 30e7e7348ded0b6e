use facet::Facet;
use std::fmt;

/// A plain value emitted by a stream.
///
/// The value domain is closed: streams feeding bille hand over either a
/// primitive or a pre-formatted description of a composite value
/// ([`Scalar::Structured`]), which the default renderer turns into an
/// ellipsis with a monospace tooltip.
#[derive(Facet, Debug, Clone, PartialEq)]
#[repr(u8)]
#[facet(rename_all = "snake_case")]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Pre-formatted multi-line body of a structured value.
    Structured(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value}"),
            Self::Structured(body) => write!(f, "{body}"),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

/// Display text of a stream error.
///
/// Mirrors how errors degrade for display: a carried message wins, a raw
/// value is shown as-is, and a stream that errored with no value at all gets
/// a generic placeholder.
#[derive(Facet, Debug, Clone, PartialEq, Eq)]
#[repr(u8)]
#[facet(rename_all = "snake_case")]
pub enum ErrorText {
    Message(String),
    Raw(String),
    Unspecified,
}

impl ErrorText {
    pub fn message(text: impl Into<String>) -> Self {
        Self::Message(text.into())
    }
}

impl fmt::Display for ErrorText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(text) | Self::Raw(text) => write!(f, "{text}"),
            Self::Unspecified => write!(f, "error"),
        }
    }
}
