use super::RunOptions;
use bille::Script;
use bille_types::Scalar;
use std::time::Duration;

/// One of each value kind, exercising the stock renderer's inline, ellipsis,
/// and structured-tooltip presentations.
pub async fn run(options: &RunOptions) -> Result<(), String> {
    let script = Script::new()
        .next(Duration::from_millis(100), Scalar::Bool(true))
        .next(Duration::from_millis(300), Scalar::Int(42))
        .next(Duration::from_millis(500), Scalar::Float(3.25))
        .next(Duration::from_millis(700), Scalar::from("a longer text value"))
        .next(
            Duration::from_millis(900),
            Scalar::Structured("{\n  \"name\": \"bille\",\n  \"kind\": \"demo\"\n}".to_string()),
        )
        .next(Duration::from_millis(1100), Scalar::Null)
        .complete(Duration::from_millis(1300));
    super::drive(script.into_observable(), options).await
}
