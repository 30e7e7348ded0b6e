pub mod burst;
pub mod failing;
pub mod higher_order;
pub mod payloads;
pub mod ticks;

use bille::{BoxObservable, TraceEvent};
use bille_model::{build_model, DiagramModel, ModelOptions, Tooltip};
use bille_types::{SnapshotTree, TextStyle};
use facet::Facet;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub timeout: Duration,
    pub merge_threshold_ms: Option<u64>,
    pub inherit_main_color: bool,
    pub pretty: bool,
}

/// What a scenario prints: the derived diagram plus its tooltip candidates.
#[derive(Facet, Debug)]
struct DiagramDump {
    model: DiagramModel,
    tooltips: Vec<Tooltip>,
}

/// Traces `observable`, folds its records into a snapshot tree until the
/// trace ends or times out, then prints the derived model as JSON.
pub(crate) async fn drive(observable: BoxObservable, options: &RunOptions) -> Result<(), String> {
    let mut trace = bille::trace(observable, options.timeout);
    let mut tree = SnapshotTree::new();

    while let Some(event) = trace.recv().await {
        match event {
            TraceEvent::Record(record) => {
                if record.payload.is_timeout() {
                    info!(time_ms = record.time_ms, "trace timed out");
                    break;
                }
                tree.apply(&record)
                    .map_err(|e| format!("failed to apply trace record: {e}"))?;
            }
            TraceEvent::Ended(end) => {
                info!(?end, "trace ended");
                break;
            }
        }
    }

    let model = build_model(
        &tree,
        &ModelOptions {
            merge_threshold_ms: options.merge_threshold_ms,
            inherit_main_color: options.inherit_main_color,
            ..ModelOptions::default()
        },
    );
    let tooltips = bille_model::extract_tooltips(&model.lanes, &TextStyle::default());
    let dump = DiagramDump { model, tooltips };

    let json = if options.pretty {
        facet_json::to_string_pretty(&dump)
    } else {
        facet_json::to_string(&dump)
    }
    .map_err(|e| format!("failed to encode diagram: {e}"))?;
    println!("{json}");
    Ok(())
}
