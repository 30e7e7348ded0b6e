use crate::observable::{BoxObservable, Emission, Subscriber, Subscription};
use bille_types::{ErrorText, Path, TracePayload, TraceRecord};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::debug;

/// What a [`Trace`] yields to its consumer.
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    Record(TraceRecord),
    /// The whole trace is over; no further events follow.
    Ended(TraceEnd),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEnd {
    /// Every subscribed stream (root and nested) completed.
    Completed,
    /// Some stream errored; the trace was torn down after flushing records.
    Errored,
}

/// A live trace of one root stream and everything nested inside it.
///
/// Dropping the trace (or calling [`Trace::cancel`]) releases every active
/// subscription and the timeout timer; teardown is idempotent with natural
/// completion and with the timeout, whichever fires first.
pub struct Trace {
    events: mpsc::UnboundedReceiver<TraceEvent>,
    shared: Arc<TraceShared>,
}

impl Trace {
    /// Receives the next event; `None` once the trace is fully torn down.
    pub async fn recv(&mut self) -> Option<TraceEvent> {
        self.events.recv().await
    }

    /// Abandons the trace early, releasing all subscriptions and the timer.
    pub fn cancel(&self) {
        self.shared.cancel();
    }
}

impl Drop for Trace {
    fn drop(&mut self) {
        self.shared.cancel();
    }
}

/// Subscribes to `observable` and every stream it emits, recursively,
/// producing a single linear record sequence.
///
/// A single wall-clock timeout covers the whole subscription tree. On firing
/// it emits a [`TracePayload::Timeout`] record and unsubscribes everything;
/// natural completion of all streams cancels it instead. Record times are
/// milliseconds since this call (tokio clock, so paused-clock tests are
/// exact).
pub fn trace(observable: BoxObservable, timeout: Duration) -> Trace {
    let (tx, events) = mpsc::unbounded_channel();
    let shared = Arc::new(TraceShared {
        start: tokio::time::Instant::now(),
        state: Mutex::new(TraceState {
            tx: Some(tx),
            subscriptions: Vec::new(),
            open: 0,
            ended: false,
            timer: None,
        }),
    });

    let timer_shared = Arc::clone(&shared);
    let timer = tokio::spawn(async move {
        tokio::time::sleep(timeout).await;
        timer_shared.fire_timeout();
    });
    shared.state.lock().timer = Some(timer.abort_handle());

    shared.subscribe_stream(observable, Path::root());
    debug!(timeout_ms = timeout.as_millis() as u64, "trace started");

    Trace { events, shared }
}

struct TraceShared {
    start: tokio::time::Instant,
    state: Mutex<TraceState>,
}

struct TraceState {
    /// Taken on teardown so the consumer's channel closes.
    tx: Option<mpsc::UnboundedSender<TraceEvent>>,
    subscriptions: Vec<Subscription>,
    /// Subscriptions that have not yet delivered a terminal callback.
    open: usize,
    ended: bool,
    timer: Option<AbortHandle>,
}

impl TraceState {
    fn release_all(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        // Dropping a Subscription aborts its producer task.
        self.subscriptions.clear();
    }
}

impl TraceShared {
    fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis().min(u64::MAX as u128) as u64
    }

    /// Registers and subscribes one stream of the tree.
    ///
    /// The open-count is bumped before subscribing so a stream that
    /// terminates immediately cannot be observed as "all closed" while its
    /// registration is still in flight.
    fn subscribe_stream(self: &Arc<Self>, observable: BoxObservable, path: Path) {
        {
            let mut state = self.state.lock();
            if state.ended {
                return;
            }
            state.open += 1;
        }

        let subscriber = TraceSubscriber {
            shared: Arc::clone(self),
            path: path.clone(),
            index: -1,
        };
        let subscription = observable.subscribe(Box::new(subscriber));

        let mut state = self.state.lock();
        if state.ended {
            subscription.unsubscribe();
            return;
        }
        state.subscriptions.push(subscription);
        drop(state);
        debug!(%path, "subscribed");
    }

    fn emit_record(&self, payload: TracePayload, path: Path) {
        let record = TraceRecord {
            time_ms: self.elapsed_ms(),
            path,
            payload,
        };
        let state = self.state.lock();
        if state.ended {
            return;
        }
        if let Some(tx) = &state.tx {
            let _ = tx.send(TraceEvent::Record(record));
        }
    }

    fn mark_closed(&self) {
        let mut state = self.state.lock();
        state.open = state.open.saturating_sub(1);
    }

    /// Global completion: all subscriptions closed. Runs one tick after the
    /// final `on_complete` so sibling records already in flight land first.
    fn finish_if_all_closed(&self) {
        let mut state = self.state.lock();
        if state.ended || state.open > 0 {
            return;
        }
        state.ended = true;
        state.release_all();
        let tx = state.tx.take();
        drop(state);
        if let Some(tx) = tx {
            let _ = tx.send(TraceEvent::Ended(TraceEnd::Completed));
        }
        debug!("trace completed");
    }

    /// Global error: some stream errored. Runs one tick after the error
    /// record so nested error records reach the consumer before teardown.
    fn finish_errored(&self) {
        let mut state = self.state.lock();
        if state.ended {
            return;
        }
        state.ended = true;
        state.release_all();
        let tx = state.tx.take();
        drop(state);
        if let Some(tx) = tx {
            let _ = tx.send(TraceEvent::Ended(TraceEnd::Errored));
        }
        debug!("trace ended after stream error");
    }

    fn fire_timeout(&self) {
        let time_ms = self.elapsed_ms();
        let mut state = self.state.lock();
        if state.ended {
            return;
        }
        state.ended = true;
        state.timer = None;
        state.subscriptions.clear();
        let tx = state.tx.take();
        drop(state);
        if let Some(tx) = tx {
            // A timeout is a marker record, not a completion: the consumer
            // freezes the diagram without a "completed" indicator.
            let _ = tx.send(TraceEvent::Record(TraceRecord {
                time_ms,
                path: Path::root(),
                payload: TracePayload::Timeout,
            }));
        }
        debug!(time_ms, "trace timed out");
    }

    fn cancel(&self) {
        let mut state = self.state.lock();
        if state.ended {
            return;
        }
        state.ended = true;
        state.release_all();
        state.tx = None;
        drop(state);
        debug!("trace cancelled");
    }
}

/// Per-stream subscriber: counts emissions, forwards records, and recurses
/// into nested streams.
struct TraceSubscriber {
    shared: Arc<TraceShared>,
    path: Path,
    /// Emission counter; starts at -1 and counts every emission, nested
    /// streams included. The index, not the value, determines a child's path
    /// suffix.
    index: i64,
}

impl Subscriber for TraceSubscriber {
    fn on_next(&mut self, emission: Emission) {
        self.index += 1;
        match emission {
            Emission::Value(value) => {
                self.shared
                    .emit_record(TracePayload::Value(value), self.path.clone());
            }
            Emission::Stream(observable) => {
                self.shared
                    .emit_record(TracePayload::NestedObservable, self.path.clone());
                self.shared
                    .subscribe_stream(observable, self.path.child(self.index as u32));
            }
        }
    }

    fn on_error(&mut self, error: ErrorText) {
        self.shared
            .emit_record(TracePayload::Error(error), self.path.clone());
        self.shared.mark_closed();
        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            tokio::task::yield_now().await;
            shared.finish_errored();
        });
    }

    fn on_complete(&mut self) {
        self.shared
            .emit_record(TracePayload::Completed, self.path.clone());
        self.shared.mark_closed();
        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            tokio::task::yield_now().await;
            shared.finish_if_all_closed();
        });
    }
}
