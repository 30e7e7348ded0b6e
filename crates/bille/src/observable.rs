use bille_types::{ErrorText, Scalar};
use tokio::task::AbortHandle;

/// What a stream hands to its subscriber on each emission.
///
/// Streams are higher-order: an emitted value may itself be a stream, in
/// which case the tracer subscribes to it recursively.
pub enum Emission {
    Value(Scalar),
    Stream(BoxObservable),
}

/// Receiving end of a subscription.
///
/// Callbacks run on the producer's task. Within one stream they arrive in
/// strict time order; after `on_error` or `on_complete` no further callbacks
/// are delivered for that stream.
pub trait Subscriber: Send + 'static {
    fn on_next(&mut self, emission: Emission);
    fn on_error(&mut self, error: ErrorText);
    fn on_complete(&mut self);
}

/// An asynchronous producer of zero or more values over time.
///
/// Subscribing hands ownership of the producer over and returns an
/// unsubscribe capability. A producer is expected to drive its subscriber
/// from a spawned task.
pub trait Observable: Send + 'static {
    fn subscribe(self: Box<Self>, subscriber: Box<dyn Subscriber>) -> Subscription;
}

pub type BoxObservable = Box<dyn Observable>;

/// Handle releasing one subscription's resources.
///
/// Unsubscribing aborts the producer task; it is idempotent and also happens
/// on drop, so holding subscriptions in a container gives scoped release on
/// every exit path.
pub struct Subscription {
    abort: AbortHandle,
}

impl Subscription {
    pub fn new(abort: AbortHandle) -> Self {
        Self { abort }
    }

    pub fn unsubscribe(&self) {
        self.abort.abort();
    }

    /// True once the producer task has finished or been aborted.
    pub fn is_closed(&self) -> bool {
        self.abort.is_finished()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.abort.abort();
    }
}
