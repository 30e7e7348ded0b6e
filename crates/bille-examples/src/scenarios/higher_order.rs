use super::RunOptions;
use bille::Script;
use bille_types::Scalar;
use std::time::Duration;

fn counting(base: i64) -> Script {
    Script::new()
        .next(Duration::from_millis(200), Scalar::Int(base))
        .next(Duration::from_millis(400), Scalar::Int(base + 1))
        .next(Duration::from_millis(600), Scalar::Int(base + 2))
        .complete(Duration::from_millis(800))
}

/// A stream of streams: the outer stream hands out two counting streams and
/// completes; the trace finishes when the last inner stream does.
pub async fn run(options: &RunOptions) -> Result<(), String> {
    let outer = Script::new()
        .stream(Duration::from_millis(300), counting(0))
        .stream(Duration::from_millis(900), counting(10))
        .complete(Duration::from_millis(1200));
    super::drive(outer.into_observable(), options).await
}
