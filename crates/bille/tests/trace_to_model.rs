//! End-to-end: trace a scripted higher-order stream, fold the records into a
//! snapshot tree, and derive the diagram model.

use bille::{trace, Script, TraceEvent};
use bille_model::{build_model, Connector, ModelOptions};
use bille_types::{Color, Scalar, SnapshotTree, TracePayload};
use std::time::Duration;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

async fn snapshot(script: Script, timeout: Duration) -> SnapshotTree {
    let mut trace = trace(script.into_observable(), timeout);
    let mut tree = SnapshotTree::new();
    while let Some(event) = trace.recv().await {
        match event {
            TraceEvent::Record(record) => {
                if record.payload == TracePayload::Timeout {
                    break;
                }
                tree.apply(&record).expect("records arrive in a valid order");
            }
            TraceEvent::Ended(_) => break,
        }
    }
    tree
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn nested_stream_becomes_a_second_lane_with_a_connector() {
    // The outer stream emits an inner stream at 500ms; the inner stream
    // emits "x" 1000ms after it is subscribed, i.e. at 1500ms absolute.
    let inner = Script::new().next(ms(1000), Scalar::from("x"));
    let outer = Script::new().stream(ms(500), inner);

    let tree = snapshot(outer, ms(2000)).await;
    let model = build_model(&tree, &ModelOptions::default());

    assert_eq!(model.lanes.len(), 2);
    assert_eq!(
        model.connectors,
        vec![Connector {
            time_ms: 500,
            from_index: 0,
            to_index: 1,
            color: Color::observable_default(),
        }]
    );

    let outer_lane = &model.lanes[0];
    assert_eq!(outer_lane.values.len(), 1);
    assert!(outer_lane.values[0].is_observable);
    assert_eq!(outer_lane.values[0].time_ms, 500);
    // Neither stream terminated before the timeout froze the diagram.
    assert!(outer_lane.end_time_ms.is_none());

    let inner_lane = &model.lanes[1];
    assert_eq!(inner_lane.start_time_ms, 500);
    assert_eq!(inner_lane.values.len(), 1);
    assert_eq!(inner_lane.values[0].time_ms, 1500);
    assert_eq!(inner_lane.values[0].text, "x");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn completed_streams_close_their_lanes() {
    let inner = Script::new()
        .next(ms(100), Scalar::Int(7))
        .complete(ms(200));
    let outer = Script::new()
        .next(ms(250), Scalar::Int(0))
        .stream(ms(500), inner)
        .complete(ms(1000));

    let tree = snapshot(outer, ms(5000)).await;
    let model = build_model(&tree, &ModelOptions::default());

    assert_eq!(model.lanes.len(), 2);

    let outer_lane = &model.lanes[0];
    assert_eq!(outer_lane.end_time_ms, Some(1000));
    let completed = outer_lane.completed.as_ref().expect("outer completed");
    assert_eq!(completed.time_ms, 1000);
    // The nested marker at 500 is the last value before completion.
    assert_eq!(completed.last_value_before_completed_ms, Some(500));

    let inner_lane = &model.lanes[1];
    assert_eq!(inner_lane.end_time_ms, Some(700));
    assert_eq!(inner_lane.values[0].time_ms, 600);
    assert_eq!(inner_lane.values[0].text, "7");
}
