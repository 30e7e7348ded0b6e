//! Pure derivation of the diagram model from a snapshot tree.
//!
//! [`build_model`] turns the accumulated history of one trace into an
//! ordered list of lanes and cross-lane connectors; the tooltip module then
//! extracts, filters, and places hover/persistent annotations on top of it.
//! Everything here is synchronous, deterministic, and recomputed from
//! scratch after each batch of tracer output — the tree is small relative to
//! a UI frame budget, so there is no incremental patching.

mod model;
mod renderer;
mod tooltips;

pub use model::{
    build_model, Completion, Connector, DiagramModel, Lane, LaneValue, ModelOptions,
};
pub use renderer::{DefaultRenderer, RenderInput, Rendered, ValueRenderer};
pub use tooltips::{
    canvas_dimensions, extract_tooltips, has_hover_tooltip, hide_tooltip, place_tooltips,
    show_tooltip, visible_tooltips, BoxSize, SlotId, TimeScale, Tooltip, TooltipBox,
    TooltipLayout,
};
