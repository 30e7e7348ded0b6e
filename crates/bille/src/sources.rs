use crate::observable::{BoxObservable, Emission, Observable, Subscriber, Subscription};
use bille_types::{ErrorText, Scalar};
use std::time::Duration;

/// One scheduled step of a scripted stream.
#[derive(Debug, Clone)]
pub enum ScriptStep {
    Next(Scalar),
    /// Emits a nested scripted stream; its offsets are relative to the moment
    /// the tracer subscribes to it (i.e. the moment it is emitted).
    NextStream(Script),
    Error(ErrorText),
    Complete,
}

/// A deterministic stream description: steps at offsets from subscribe time.
///
/// Steps run in list order; keep offsets non-decreasing. `Error` and
/// `Complete` are terminal — later steps are never reached. A script without
/// a terminal step models a stream that never terminates on its own.
#[derive(Debug, Clone, Default)]
pub struct Script {
    steps: Vec<(Duration, ScriptStep)>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(mut self, at: Duration, value: Scalar) -> Self {
        self.steps.push((at, ScriptStep::Next(value)));
        self
    }

    pub fn stream(mut self, at: Duration, inner: Script) -> Self {
        self.steps.push((at, ScriptStep::NextStream(inner)));
        self
    }

    pub fn error(mut self, at: Duration, error: ErrorText) -> Self {
        self.steps.push((at, ScriptStep::Error(error)));
        self
    }

    pub fn complete(mut self, at: Duration) -> Self {
        self.steps.push((at, ScriptStep::Complete));
        self
    }

    pub fn into_observable(self) -> BoxObservable {
        Box::new(ScriptedObservable::new(self))
    }
}

/// Stream that replays a [`Script`] from a spawned task.
pub struct ScriptedObservable {
    script: Script,
}

impl ScriptedObservable {
    pub fn new(script: Script) -> Self {
        Self { script }
    }
}

impl Observable for ScriptedObservable {
    fn subscribe(self: Box<Self>, mut subscriber: Box<dyn Subscriber>) -> Subscription {
        let handle = tokio::spawn(async move {
            let start = tokio::time::Instant::now();
            for (offset, step) in self.script.steps {
                tokio::time::sleep_until(start + offset).await;
                match step {
                    ScriptStep::Next(value) => subscriber.on_next(Emission::Value(value)),
                    ScriptStep::NextStream(inner) => {
                        subscriber.on_next(Emission::Stream(inner.into_observable()));
                    }
                    ScriptStep::Error(error) => {
                        subscriber.on_error(error);
                        return;
                    }
                    ScriptStep::Complete => {
                        subscriber.on_complete();
                        return;
                    }
                }
            }
        });
        Subscription::new(handle.abort_handle())
    }
}

/// Stream emitting `Int(0), Int(1), …` every `period`, never terminating.
pub fn interval(period: Duration) -> BoxObservable {
    Box::new(IntervalObservable { period })
}

struct IntervalObservable {
    period: Duration,
}

impl Observable for IntervalObservable {
    fn subscribe(self: Box<Self>, mut subscriber: Box<dyn Subscriber>) -> Subscription {
        let period = self.period;
        let handle = tokio::spawn(async move {
            // The deadline accumulates; the period is never multiplied by
            // the tick count, which would overflow for long-lived intervals.
            let mut next = tokio::time::Instant::now() + period;
            for tick in 0i64.. {
                tokio::time::sleep_until(next).await;
                next += period;
                subscriber.on_next(Emission::Value(Scalar::Int(tick)));
            }
        });
        Subscription::new(handle.abort_handle())
    }
}
