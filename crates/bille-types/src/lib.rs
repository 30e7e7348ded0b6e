//! Shared data model for bille's marble-diagram pipeline.
//!
//! Everything flowing between the stream tracer, the snapshot tree, the model
//! builder, and the tooltip engine is defined here:
//!
//! - [`Path`]: the address of a nested observable inside the snapshot tree.
//! - [`TraceRecord`] / [`TracePayload`]: the uniform record sequence the
//!   tracer produces.
//! - [`SnapshotTree`]: the append-only, arena-backed accumulation of one
//!   trace's history.
//! - [`Scalar`], [`ErrorText`], [`Color`], [`TextStyle`], [`TooltipSpec`]:
//!   the value and styling vocabulary shared by the builder and the external
//!   renderer.
//!
//! All public types derive [`facet::Facet`] so the diagram model can be
//! handed to an out-of-process renderer as JSON.

mod colors;
mod path;
mod record;
mod scalar;
mod style;
mod tree;

pub use colors::{
    Color, DEFAULT_MAIN_COLOR, DEFAULT_OBSERVABLE_COLOR, DEFAULT_SHAPE_COLOR, PALETTE,
};
pub use path::Path;
pub use record::{TracePayload, TraceRecord};
pub use scalar::{ErrorText, Scalar};
pub use style::{TextStyle, TooltipSpec};
pub use tree::{ApplyError, Item, NodeId, SnapshotNode, SnapshotTree};
