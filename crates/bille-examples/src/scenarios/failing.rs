use super::RunOptions;
use bille::Script;
use bille_types::{ErrorText, Scalar};
use std::time::Duration;

/// An inner stream that errors, tearing the whole trace down once the error
/// record has flushed.
pub async fn run(options: &RunOptions) -> Result<(), String> {
    let inner = Script::new()
        .next(Duration::from_millis(200), Scalar::Int(1))
        .error(
            Duration::from_millis(500),
            ErrorText::message("inner stream failed"),
        );
    let outer = Script::new()
        .next(Duration::from_millis(100), Scalar::from("ok"))
        .stream(Duration::from_millis(400), inner);
    super::drive(outer.into_observable(), options).await
}
