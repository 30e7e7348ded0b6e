//! Live tracing of asynchronous streams for marble-diagram rendering.
//!
//! A [`trace`] subscribes to a root [`Observable`] and, recursively, to every
//! stream it emits as a value, flattening the whole subscription tree into a
//! single linear sequence of path-addressed [`TraceRecord`]s. One wall-clock
//! timeout governs the entire tree; whichever of timeout, error, or natural
//! completion happens first tears everything down exactly once.
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use bille::{Script, trace};
//! use bille_types::Scalar;
//!
//! # async fn demo() {
//! let script = Script::new()
//!     .next(Duration::from_millis(100), Scalar::Int(1))
//!     .complete(Duration::from_millis(200));
//!
//! let mut trace = trace(script.into_observable(), Duration::from_secs(1));
//! while let Some(event) = trace.recv().await {
//!     // apply records to a SnapshotTree, rebuild the model, redraw
//! }
//! # }
//! ```
//!
//! [`TraceRecord`]: bille_types::TraceRecord

mod observable;
mod source;
mod sources;
mod trace;

pub use observable::{BoxObservable, Emission, Observable, Subscriber, Subscription};
pub use source::{ObservableFactory, SourceError};
pub use sources::{interval, Script, ScriptStep, ScriptedObservable};
pub use trace::{trace, Trace, TraceEnd, TraceEvent};
