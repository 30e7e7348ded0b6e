use crate::observable::BoxObservable;
use std::error::Error;
use std::fmt;

/// Construction of the root stream failed before tracing began.
///
/// This is the synchronous error path: a factory that cannot produce a
/// stream reports one descriptive string and never enters the tracing
/// protocol at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError(String);

impl SourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Error for SourceError {}

/// Boundary through which the root stream is obtained.
///
/// The surrounding system may back this with an embedded interpreter, a
/// sandboxed process, or a hard-coded scenario; the tracer only cares that it
/// yields a stream or a single synchronous error.
pub trait ObservableFactory {
    fn build(&self) -> Result<BoxObservable, SourceError>;
}

impl<F> ObservableFactory for F
where
    F: Fn() -> Result<BoxObservable, SourceError>,
{
    fn build(&self) -> Result<BoxObservable, SourceError> {
        self()
    }
}
