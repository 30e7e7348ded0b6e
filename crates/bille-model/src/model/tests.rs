use super::*;
use crate::renderer::Rendered;
use bille_types::{ErrorText, SnapshotTree};

fn options() -> ModelOptions<'static> {
    ModelOptions::default()
}

#[test]
fn empty_tree_yields_a_single_bare_lane() {
    let tree = SnapshotTree::new();
    let model = build_model(&tree, &options());

    assert_eq!(model.connectors, vec![]);
    assert_eq!(model.lanes.len(), 1);
    let root = &model.lanes[0];
    assert_eq!(root.start_time_ms, 0);
    assert_eq!(root.main_color, Color::main_default());
    assert!(root.values.is_empty());
    assert!(root.end_time_ms.is_none() && root.error.is_none() && root.completed.is_none());
}

#[test]
fn build_model_is_a_pure_function_of_the_tree() {
    let mut tree = SnapshotTree::new();
    let root = tree.root();
    tree.push_value(root, 100, Scalar::Int(1), None);
    let child = tree.add_nested(root, 200, None);
    tree.push_value(child, 300, Scalar::from("x"), None);
    tree.push_completed(root, 400);

    let first = build_model(&tree, &options());
    let second = build_model(&tree, &options());
    assert_eq!(first, second);
}

#[test]
fn errored_lane_gets_end_time_and_prepared_error() {
    let mut tree = SnapshotTree::new();
    let root = tree.root();
    tree.push_value(root, 100, Scalar::Int(10), None);
    tree.push_error(root, 200, ErrorText::message("boom"));

    let model = build_model(&tree, &options());
    let lane = &model.lanes[0];

    assert_eq!(lane.end_time_ms, Some(200));
    assert!(lane.completed.is_none());

    let value = &lane.values[0];
    assert_eq!(value.text, "10");
    assert_eq!(value.color, Some(Color::shape_default()));

    let error = lane.error.as_ref().expect("lane should carry its error");
    assert_eq!(error.time_ms, 200);
    assert_eq!(error.color, None);
    assert_eq!(
        error.tooltip.as_ref().map(|t| t.text.as_str()),
        Some("boom")
    );
}

#[test]
fn completed_lane_remembers_its_last_value_time() {
    let mut tree = SnapshotTree::new();
    let root = tree.root();
    tree.push_value(root, 100, Scalar::Int(1), None);
    tree.push_completed(root, 300);

    let model = build_model(&tree, &options());
    let completed = model.lanes[0]
        .completed
        .clone()
        .expect("lane should be completed");
    assert_eq!(completed.time_ms, 300);
    assert_eq!(completed.last_value_before_completed_ms, Some(100));
}

#[test]
fn completion_without_values_has_no_collision_hint() {
    let mut tree = SnapshotTree::new();
    tree.push_completed(tree.root(), 50);

    let model = build_model(&tree, &options());
    let completed = model.lanes[0].completed.clone().unwrap();
    assert_eq!(completed.last_value_before_completed_ms, None);
}

#[test]
fn lanes_come_out_in_spawn_time_order_not_path_order() {
    // root spawns A at 1000 and B at 2000; A spawns C at 1500.
    // Path order would visit B before C; spawn-time order must not.
    let mut tree = SnapshotTree::new();
    let root = tree.root();
    let a = tree.add_nested(root, 1000, None);
    let _c = tree.add_nested(a, 1500, None);
    let _b = tree.add_nested(root, 2000, None);

    let model = build_model(&tree, &options());
    assert_eq!(model.lanes.len(), 4);
    assert_eq!(model.lanes[1].start_time_ms, 1000); // A
    assert_eq!(model.lanes[2].start_time_ms, 1500); // C, spawned by A
    assert_eq!(model.lanes[3].start_time_ms, 2000); // B

    assert_eq!(
        model.connectors,
        vec![
            Connector {
                time_ms: 1000,
                from_index: 0,
                to_index: 1,
                color: Color::observable_default(),
            },
            Connector {
                time_ms: 1500,
                from_index: 1,
                to_index: 2,
                color: Color::observable_default(),
            },
            Connector {
                time_ms: 2000,
                from_index: 0,
                to_index: 3,
                color: Color::observable_default(),
            },
        ]
    );
}

#[test]
fn simultaneous_spawns_keep_discovery_order() {
    let mut tree = SnapshotTree::new();
    let root = tree.root();
    let first = tree.add_nested(root, 500, None);
    let second = tree.add_nested(root, 500, None);
    tree.push_value(first, 600, Scalar::Int(1), None);
    tree.push_value(second, 700, Scalar::Int(2), None);

    let model = build_model(&tree, &options());
    assert_eq!(model.lanes[1].values[0].time_ms, 600);
    assert_eq!(model.lanes[2].values[0].time_ms, 700);
}

#[test]
fn nested_markers_inherit_explicit_colors_into_child_lanes() {
    let mut tree = SnapshotTree::new();
    let child = tree.add_nested(tree.root(), 100, Some(Color::from("#ff0000")));
    tree.push_value(child, 200, Scalar::Int(1), None);

    let model = build_model(&tree, &options());
    let marker = &model.lanes[0].values[0];
    assert!(marker.is_observable);
    assert_eq!(marker.text, "");
    assert_eq!(marker.color, Some(Color::from("#ff0000")));

    assert_eq!(model.lanes[1].main_color, Color::from("#ff0000"));
    assert_eq!(model.connectors[0].color, Color::from("#ff0000"));
}

#[test]
fn inherit_main_color_false_uses_the_global_default() {
    let mut tree = SnapshotTree::new();
    let child = tree.add_nested(tree.root(), 100, Some(Color::from("#ff0000")));
    tree.push_value(child, 200, Scalar::Int(1), None);

    let model = build_model(
        &tree,
        &ModelOptions {
            inherit_main_color: false,
            ..ModelOptions::default()
        },
    );
    assert_eq!(model.lanes[1].main_color, Color::main_default());
    assert_eq!(model.connectors[0].color, Color::main_default());
}

#[test]
fn merge_folds_three_values_into_one_counted_value() {
    let mut tree = SnapshotTree::new();
    let root = tree.root();
    tree.push_value(root, 100, Scalar::from("a"), None);
    tree.push_value(root, 150, Scalar::from("b"), None);
    tree.push_value(root, 200, Scalar::from("c"), None);
    tree.push_value(root, 400, Scalar::from("d"), None);

    let model = build_model(
        &tree,
        &ModelOptions {
            merge_threshold_ms: Some(100),
            ..ModelOptions::default()
        },
    );
    let values = &model.lanes[0].values;
    assert_eq!(values.len(), 2);

    let folded = &values[0];
    assert_eq!(folded.time_ms, 100);
    assert_eq!(folded.text, "...");
    assert_eq!(folded.count, Some(3));
    assert_eq!(
        folded.tooltip.as_ref().map(|t| t.text.as_str()),
        Some("a, b, c")
    );
    assert!(folded.text_style.is_none());

    let lone = &values[1];
    assert_eq!(lone.time_ms, 400);
    assert_eq!(lone.text, "d");
    assert_eq!(lone.count, None);
}

#[test]
fn merge_prefers_declared_tooltip_texts() {
    // Long values already collapse to "..." with their text in a tooltip;
    // the combined tooltip must join those texts, not the ellipses.
    let mut tree = SnapshotTree::new();
    let root = tree.root();
    tree.push_value(root, 100, Scalar::from("hello"), None);
    tree.push_value(root, 150, Scalar::from("world"), None);

    let model = build_model(
        &tree,
        &ModelOptions {
            merge_threshold_ms: Some(100),
            ..ModelOptions::default()
        },
    );
    let folded = &model.lanes[0].values[0];
    assert_eq!(folded.count, Some(2));
    assert_eq!(
        folded.tooltip.as_ref().map(|t| t.text.as_str()),
        Some("hello, world")
    );
}

#[test]
fn no_threshold_means_no_merging() {
    let mut tree = SnapshotTree::new();
    let root = tree.root();
    tree.push_value(root, 100, Scalar::from("a"), None);
    tree.push_value(root, 101, Scalar::from("b"), None);

    let model = build_model(&tree, &options());
    assert_eq!(model.lanes[0].values.len(), 2);
}

struct UppercaseRenderer;

impl ValueRenderer for UppercaseRenderer {
    fn render(&self, input: RenderInput<'_>) -> Rendered {
        if input.is_error {
            return Rendered {
                text: Some("ERR".to_string()),
                color: Some(Color::from("#000000")),
                ..Rendered::default()
            };
        }
        Rendered {
            text: input.value.map(|value| value.to_string().to_uppercase()),
            color: Some(Color::from("#00ff00")),
            ..Rendered::default()
        }
    }
}

#[test]
fn renderer_output_overrides_defaults() {
    let mut tree = SnapshotTree::new();
    let root = tree.root();
    tree.push_value(root, 100, Scalar::from("abc"), Some(Color::from("#123456")));
    tree.push_error(root, 200, ErrorText::Unspecified);

    let model = build_model(
        &tree,
        &ModelOptions {
            renderer: Some(&UppercaseRenderer),
            ..ModelOptions::default()
        },
    );
    let value = &model.lanes[0].values[0];
    assert_eq!(value.text, "ABC");
    // Renderer color wins over the explicit item color.
    assert_eq!(value.color, Some(Color::from("#00ff00")));

    let error = model.lanes[0].error.as_ref().unwrap();
    assert_eq!(error.text, "ERR");
    assert_eq!(error.color, Some(Color::from("#000000")));
}

#[test]
fn lane_count_tracks_discovered_observables() {
    let mut tree = SnapshotTree::new();
    let root = tree.root();
    assert_eq!(build_model(&tree, &options()).lanes.len(), 1);

    let child = tree.add_nested(root, 100, None);
    assert_eq!(build_model(&tree, &options()).lanes.len(), 2);

    tree.add_nested(child, 200, None);
    assert_eq!(build_model(&tree, &options()).lanes.len(), 3);
}
