use super::RunOptions;
use bille::interval;
use std::time::Duration;

/// An endless tick stream; the global timeout is what ends the diagram.
pub async fn run(options: &RunOptions) -> Result<(), String> {
    super::drive(interval(Duration::from_millis(250)), options).await
}
