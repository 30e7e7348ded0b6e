use crate::renderer::{DefaultRenderer, RenderInput, ValueRenderer};
use bille_types::{Color, ErrorText, Item, NodeId, Scalar, SnapshotTree, TextStyle, TooltipSpec};
use facet::Facet;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Options for [`build_model`].
///
/// With no renderer, [`DefaultRenderer`] decides texts and tooltips. The
/// merge threshold, when set, folds values closer together than the given
/// number of milliseconds into one counted value.
pub struct ModelOptions<'a> {
    pub renderer: Option<&'a dyn ValueRenderer>,
    pub inherit_main_color: bool,
    pub merge_threshold_ms: Option<u64>,
}

impl Default for ModelOptions<'_> {
    fn default() -> Self {
        Self {
            renderer: None,
            inherit_main_color: true,
            merge_threshold_ms: None,
        }
    }
}

/// The derived diagram: one lane per observable instance, in spawn-time
/// order, plus the connectors linking parents to the lanes they spawned.
#[derive(Facet, Debug, Clone, PartialEq)]
pub struct DiagramModel {
    pub lanes: Vec<Lane>,
    pub connectors: Vec<Connector>,
}

/// One rendering row, derived from exactly one snapshot node.
#[derive(Facet, Debug, Clone, PartialEq)]
pub struct Lane {
    pub values: Vec<LaneValue>,
    pub start_time_ms: u64,
    pub main_color: Color,
    pub end_time_ms: Option<u64>,
    pub error: Option<LaneValue>,
    pub completed: Option<Completion>,
}

#[derive(Facet, Debug, Clone, PartialEq)]
pub struct Completion {
    pub time_ms: u64,
    /// Time of the last rendered value, for collision avoidance between the
    /// completion bar and that value's shape in the downstream layout.
    pub last_value_before_completed_ms: Option<u64>,
}

/// Visual edge from the lane that spawned a nested observable to the lane
/// representing it, at the spawn time.
#[derive(Facet, Debug, Clone, PartialEq)]
pub struct Connector {
    pub time_ms: u64,
    pub from_index: usize,
    pub to_index: usize,
    pub color: Color,
}

/// One displayed value on a lane.
#[derive(Facet, Debug, Clone, PartialEq)]
pub struct LaneValue {
    pub time_ms: u64,
    pub text: String,
    pub color: Option<Color>,
    pub is_observable: bool,
    /// Present once values have been folded together by the merge policy.
    pub count: Option<u32>,
    pub tooltip: Option<TooltipSpec>,
    pub text_style: Option<TextStyle>,
}

struct QueueEntry {
    start_time_ms: u64,
    /// Insertion sequence; breaks start-time ties in discovery order.
    seq: u64,
    node: NodeId,
    main_color: Color,
    from_index: Option<usize>,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.start_time_ms == other.start_time_ms && self.seq == other.seq
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    // Reversed so the std max-heap pops the earliest-starting entry.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .start_time_ms
            .cmp(&self.start_time_ms)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Derives the diagram model from a snapshot tree.
///
/// Pure function of the tree and options: lanes come out in spawn-time
/// order (ties broken by discovery order), one per observable instance
/// discovered so far, regardless of nesting depth or path order.
pub fn build_model(tree: &SnapshotTree, options: &ModelOptions<'_>) -> DiagramModel {
    static STOCK_RENDERER: DefaultRenderer = DefaultRenderer;
    let renderer: &dyn ValueRenderer = options.renderer.unwrap_or(&STOCK_RENDERER);

    let mut lanes: Vec<Lane> = Vec::new();
    let mut connectors: Vec<Connector> = Vec::new();

    let mut seq = 0u64;
    let mut queue = BinaryHeap::new();
    queue.push(QueueEntry {
        start_time_ms: 0,
        seq,
        node: tree.root(),
        main_color: Color::main_default(),
        from_index: None,
    });

    while let Some(entry) = queue.pop() {
        let observable_index = lanes.len();

        if let Some(from_index) = entry.from_index {
            connectors.push(Connector {
                time_ms: entry.start_time_ms,
                from_index,
                to_index: observable_index,
                color: entry.main_color.clone(),
            });
        }

        let mut lane = Lane {
            values: Vec::new(),
            start_time_ms: entry.start_time_ms,
            main_color: entry.main_color.clone(),
            end_time_ms: None,
            error: None,
            completed: None,
        };
        // Collected tooltip texts per merged value, parallel to lane.values.
        let mut merged: Vec<Option<Vec<String>>> = Vec::new();

        for item in tree.node(entry.node).items() {
            let value_index = lane.values.len();
            match item {
                Item::Nested {
                    time_ms,
                    color,
                    node,
                } => {
                    let value = prepare_nested(
                        *time_ms,
                        color.as_ref(),
                        observable_index,
                        value_index,
                        renderer,
                    );
                    let branch_color = value
                        .color
                        .clone()
                        .unwrap_or_else(Color::observable_default);
                    seq += 1;
                    queue.push(QueueEntry {
                        start_time_ms: *time_ms,
                        seq,
                        node: *node,
                        main_color: if options.inherit_main_color {
                            branch_color
                        } else {
                            Color::main_default()
                        },
                        from_index: Some(observable_index),
                    });
                    lane.values.push(value);
                    merged.push(None);
                }
                Item::Error { time_ms, error } => {
                    lane.end_time_ms = Some(*time_ms);
                    lane.error = Some(prepare_error(
                        *time_ms,
                        error,
                        observable_index,
                        value_index,
                        renderer,
                    ));
                }
                Item::Completed { time_ms } => {
                    lane.end_time_ms = Some(*time_ms);
                    lane.completed = Some(Completion {
                        time_ms: *time_ms,
                        last_value_before_completed_ms: lane
                            .values
                            .last()
                            .map(|value| value.time_ms),
                    });
                }
                Item::Value {
                    time_ms,
                    value,
                    color,
                } => {
                    let prepared = prepare_value(
                        *time_ms,
                        value,
                        color.as_ref(),
                        observable_index,
                        value_index,
                        renderer,
                    );
                    push_or_merge(&mut lane, &mut merged, prepared, options.merge_threshold_ms);
                }
            }
        }

        for (value, texts) in lane.values.iter_mut().zip(&merged) {
            if let Some(texts) = texts {
                value.tooltip = Some(TooltipSpec::text(texts.join(", ")));
                value.text_style = None;
            }
        }

        lanes.push(lane);
    }

    DiagramModel { lanes, connectors }
}

/// Applies the merge policy: a value within the threshold of the previous
/// rendered value folds into it instead of being appended. The first fold
/// synthesizes the combined tooltip from both display texts and switches the
/// text to an ellipsis; later folds only extend the count and tooltip.
fn push_or_merge(
    lane: &mut Lane,
    merged: &mut Vec<Option<Vec<String>>>,
    prepared: LaneValue,
    merge_threshold_ms: Option<u64>,
) {
    let can_merge = match (merge_threshold_ms, lane.values.last()) {
        (Some(threshold), Some(last)) => {
            prepared.time_ms.saturating_sub(last.time_ms) <= threshold
        }
        _ => false,
    };

    if !can_merge {
        lane.values.push(prepared);
        merged.push(None);
        return;
    }

    let last_index = lane.values.len() - 1;
    let last = &mut lane.values[last_index];
    match last.count {
        Some(count) => {
            last.count = Some(count + 1);
            if let Some(texts) = merged[last_index].as_mut() {
                texts.push(tooltip_text(&prepared));
            }
        }
        None => {
            // First fold: capture the target's text before it becomes "...".
            merged[last_index] = Some(vec![tooltip_text(last), tooltip_text(&prepared)]);
            last.text = "...".to_string();
            last.count = Some(2);
        }
    }
}

/// Text a value contributes to a combined tooltip: its own tooltip text when
/// it declares one, otherwise its display text.
fn tooltip_text(value: &LaneValue) -> String {
    value
        .tooltip
        .as_ref()
        .filter(|tooltip| !tooltip.text.is_empty())
        .map(|tooltip| tooltip.text.clone())
        .unwrap_or_else(|| value.text.clone())
}

fn prepare_value(
    time_ms: u64,
    value: &Scalar,
    explicit_color: Option<&Color>,
    observable_index: usize,
    value_index: usize,
    renderer: &dyn ValueRenderer,
) -> LaneValue {
    let rendered = renderer.render(RenderInput {
        is_observable: false,
        is_error: false,
        value: Some(value),
        error: None,
        observable_index,
        value_index,
    });
    LaneValue {
        time_ms,
        text: rendered.text.unwrap_or_default(),
        color: rendered
            .color
            .or_else(|| explicit_color.cloned())
            .or_else(|| Some(Color::shape_default())),
        is_observable: false,
        count: None,
        tooltip: rendered.tooltip,
        text_style: rendered.text_style,
    }
}

fn prepare_nested(
    time_ms: u64,
    explicit_color: Option<&Color>,
    observable_index: usize,
    value_index: usize,
    renderer: &dyn ValueRenderer,
) -> LaneValue {
    let rendered = renderer.render(RenderInput {
        is_observable: true,
        is_error: false,
        value: None,
        error: None,
        observable_index,
        value_index,
    });
    LaneValue {
        time_ms,
        text: rendered.text.unwrap_or_default(),
        color: rendered
            .color
            .or_else(|| explicit_color.cloned())
            .or_else(|| Some(Color::observable_default())),
        is_observable: true,
        count: None,
        tooltip: rendered.tooltip,
        text_style: rendered.text_style,
    }
}

fn prepare_error(
    time_ms: u64,
    error: &ErrorText,
    observable_index: usize,
    value_index: usize,
    renderer: &dyn ValueRenderer,
) -> LaneValue {
    let rendered = renderer.render(RenderInput {
        is_observable: false,
        is_error: true,
        value: None,
        error: Some(error),
        observable_index,
        value_index,
    });
    LaneValue {
        time_ms,
        text: rendered.text.unwrap_or_default(),
        // Errors carry no default color; the renderer may still set one.
        color: rendered.color,
        is_observable: false,
        count: None,
        tooltip: rendered.tooltip,
        text_style: rendered.text_style,
    }
}

#[cfg(test)]
mod tests;
