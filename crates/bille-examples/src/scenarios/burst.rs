use super::RunOptions;
use bille::Script;
use bille_types::Scalar;
use std::time::Duration;

/// A burst of values close enough to fold into one counted shape. Applies a
/// 100ms merge threshold when the caller did not pick one, so the fold is
/// visible out of the box.
pub async fn run(options: &RunOptions) -> Result<(), String> {
    let script = Script::new()
        .next(Duration::from_millis(100), Scalar::from("alpha"))
        .next(Duration::from_millis(140), Scalar::from("beta"))
        .next(Duration::from_millis(180), Scalar::from("gamma"))
        .next(Duration::from_millis(800), Scalar::from("delta"))
        .complete(Duration::from_millis(1000));

    let options = RunOptions {
        merge_threshold_ms: options.merge_threshold_ms.or(Some(100)),
        ..*options
    };
    super::drive(script.into_observable(), &options).await
}
