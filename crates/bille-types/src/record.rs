use crate::{ErrorText, Path, Scalar};
use facet::Facet;

/// One record in the linear sequence a trace produces.
///
/// `time_ms` is wall-clock milliseconds since the trace started, never
/// stream-relative time. For [`TracePayload::Timeout`] the path carries no
/// meaning; the marker ends the whole trace.
#[derive(Facet, Debug, Clone, PartialEq)]
pub struct TraceRecord {
    pub time_ms: u64,
    pub path: Path,
    pub payload: TracePayload,
}

#[derive(Facet, Debug, Clone, PartialEq)]
#[repr(u8)]
#[facet(rename_all = "snake_case")]
pub enum TracePayload {
    /// A plain emitted value.
    Value(Scalar),
    /// A nested stream was discovered; its history arrives under a child path.
    NestedObservable,
    /// The stream at `path` errored. Terminal for that stream only.
    Error(ErrorText),
    /// The stream at `path` completed. Terminal for that stream only.
    Completed,
    /// The whole trace hit its wall-clock timeout.
    Timeout,
}

impl TracePayload {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// True for payloads that end the stream they are addressed to.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Error(_) | Self::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_is_not_stream_terminal() {
        assert!(TracePayload::Timeout.is_timeout());
        assert!(!TracePayload::Timeout.is_terminal());
        assert!(TracePayload::Completed.is_terminal());
        assert!(TracePayload::Error(ErrorText::Unspecified).is_terminal());
        assert!(!TracePayload::Value(Scalar::Int(1)).is_terminal());
    }
}
