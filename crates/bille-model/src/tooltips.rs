use crate::model::{Lane, LaneValue};
use bille_types::{Color, TextStyle};
use facet::Facet;

/// Which anchor on a lane a tooltip belongs to: a value by index, or the
/// lane's error.
#[derive(Facet, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
#[facet(rename_all = "snake_case")]
pub enum SlotId {
    Value(usize),
    Error,
}

/// A tooltip candidate extracted from the diagram model.
#[derive(Facet, Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub observable_index: usize,
    pub slot: SlotId,
    pub time_ms: u64,
    pub text: String,
    pub text_style: TextStyle,
    pub background_color: Option<Color>,
    pub persistent: bool,
}

impl Tooltip {
    fn matches(&self, observable_index: usize, slot: SlotId) -> bool {
        self.observable_index == observable_index && self.slot == slot
    }
}

/// Collects tooltip candidates from every lane's values and errors.
///
/// Only values/errors declaring a non-empty tooltip text yield a candidate;
/// a declared style is overlaid on `default_text_style`.
pub fn extract_tooltips(lanes: &[Lane], default_text_style: &TextStyle) -> Vec<Tooltip> {
    let mut tooltips = Vec::new();
    for (observable_index, lane) in lanes.iter().enumerate() {
        for (value_index, value) in lane.values.iter().enumerate() {
            push_if_declared(
                &mut tooltips,
                value,
                observable_index,
                SlotId::Value(value_index),
                default_text_style,
            );
        }
        if let Some(error) = &lane.error {
            push_if_declared(
                &mut tooltips,
                error,
                observable_index,
                SlotId::Error,
                default_text_style,
            );
        }
    }
    tooltips
}

fn push_if_declared(
    tooltips: &mut Vec<Tooltip>,
    value: &LaneValue,
    observable_index: usize,
    slot: SlotId,
    default_text_style: &TextStyle,
) {
    let Some(spec) = &value.tooltip else {
        return;
    };
    if spec.text.is_empty() {
        return;
    }
    let text_style = match &spec.text_style {
        Some(style) => style.merged_over(default_text_style),
        None => default_text_style.clone(),
    };
    tooltips.push(Tooltip {
        observable_index,
        slot,
        time_ms: value.time_ms,
        text: spec.text.clone(),
        text_style,
        background_color: spec.background_color.clone(),
        persistent: spec.persistent,
    });
}

/// Currently visible tooltips: every persistent one, plus every candidate in
/// the hover-selected set.
pub fn visible_tooltips(selected: &[Tooltip], all: &[Tooltip]) -> Vec<Tooltip> {
    all.iter()
        .filter(|tooltip| {
            tooltip.persistent
                || selected
                    .iter()
                    .any(|s| s.matches(tooltip.observable_index, tooltip.slot))
        })
        .cloned()
        .collect()
}

/// True if the slot has a hover-only tooltip (persistent ones are always
/// shown and never react to hover).
pub fn has_hover_tooltip(observable_index: usize, slot: SlotId, all: &[Tooltip]) -> bool {
    all.iter()
        .any(|tooltip| !tooltip.persistent && tooltip.matches(observable_index, slot))
}

/// Adds the slot's tooltip to the hover-selected set. Unknown slots,
/// persistent tooltips, and already-visible slots are no-ops.
pub fn show_tooltip(
    observable_index: usize,
    slot: SlotId,
    visible: &[Tooltip],
    all: &[Tooltip],
) -> Vec<Tooltip> {
    let mut result = visible.to_vec();
    let Some(tooltip) = all
        .iter()
        .find(|tooltip| tooltip.matches(observable_index, slot))
    else {
        return result;
    };
    if tooltip.persistent || visible.iter().any(|v| v.matches(observable_index, slot)) {
        return result;
    }
    result.push(tooltip.clone());
    result
}

/// Removes the slot's tooltip from the hover-selected set (the last match,
/// if several). Persistent tooltips never enter the set, so hiding one is a
/// no-op.
pub fn hide_tooltip(observable_index: usize, slot: SlotId, visible: &[Tooltip]) -> Vec<Tooltip> {
    let mut result = visible.to_vec();
    if let Some(position) = result
        .iter()
        .rposition(|tooltip| tooltip.matches(observable_index, slot))
    {
        result.remove(position);
    }
    result
}

/// Linear time-to-x mapping, the one slice of scale math this layer needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl TimeScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn x(&self, time_ms: u64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return r0;
        }
        r0 + (time_ms as f64 - d0) / (d1 - d0) * (r1 - r0)
    }
}

/// Externally measured text-box dimensions, and the unit for canvas sizes.
#[derive(Facet, Debug, Clone, Copy, PartialEq)]
pub struct BoxSize {
    pub width: f64,
    pub height: f64,
}

/// Geometry constants of the surrounding renderer's layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipLayout {
    pub margin_left: f64,
    pub counts_height: f64,
    pub observable_height: f64,
    pub shape_size: f64,
    pub arrow_height: f64,
    pub arrow_distance: f64,
    pub padding_top: f64,
    pub padding_right: f64,
    pub padding_bottom: f64,
    pub padding_left: f64,
}

/// A placed tooltip, ready to draw.
#[derive(Facet, Debug, Clone, PartialEq)]
pub struct TooltipBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub text: String,
    pub text_style: TextStyle,
    pub background_color: Option<Color>,
}

/// Computes each visible tooltip's on-canvas rectangle.
///
/// `measured` pairs with `tooltips` by index. A tooltip centers on its
/// anchor's x and hangs below the anchor shape by the arrow distance and
/// height; one whose measured width or height is zero (empty, or not yet
/// measured) is dropped rather than rendered as a degenerate box.
pub fn place_tooltips(
    tooltips: &[Tooltip],
    measured: &[BoxSize],
    scale: &TimeScale,
    layout: &TooltipLayout,
) -> Vec<TooltipBox> {
    let mut boxes = Vec::new();
    for (tooltip, size) in tooltips.iter().zip(measured) {
        if size.width == 0.0 || size.height == 0.0 {
            continue;
        }
        let shape_center_x = layout.margin_left + scale.x(tooltip.time_ms);
        let shape_bottom_y = layout.counts_height
            + layout.observable_height * (tooltip.observable_index as f64 + 0.5)
            + layout.shape_size / 2.0;
        let width = layout.padding_left + size.width + layout.padding_right;
        let height = layout.padding_top + size.height + layout.padding_bottom;
        boxes.push(TooltipBox {
            x: shape_center_x - width / 2.0,
            y: shape_bottom_y + layout.arrow_distance + layout.arrow_height,
            width,
            height,
            text: tooltip.text.clone(),
            text_style: tooltip.text_style.clone(),
            background_color: tooltip.background_color.clone(),
        });
    }
    boxes
}

/// Canvas size once tooltips are accounted for: width never grows, height
/// grows to the lowest placed tooltip's bottom edge.
pub fn canvas_dimensions(base_width: f64, base_height: f64, boxes: &[TooltipBox]) -> BoxSize {
    let mut height = base_height;
    for tooltip_box in boxes {
        let bottom = tooltip_box.y + tooltip_box.height;
        if bottom > height {
            height = bottom;
        }
    }
    BoxSize {
        width: base_width,
        height,
    }
}
