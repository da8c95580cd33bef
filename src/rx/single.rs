//! Single-value reactive handle.

use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use super::Subscription;
use crate::error::{ImError, Result};

type StartFn<T> = Box<dyn FnOnce(SingleEmitter<T>) + Send>;

/// A lazy, single-value asynchronous operation.
///
/// Nothing reaches the engine until [`subscribe`](Single::subscribe) — or
/// `.await`, which subscribes via `IntoFuture`. Each subscription runs the
/// start function exactly once with a freshly bound emitter, so calling a
/// producing method twice starts the underlying operation twice; there is
/// no implicit sharing or caching.
#[must_use = "a Single is lazy and does nothing until subscribed or awaited"]
pub struct Single<T> {
    start: StartFn<T>,
}

impl<T: Send + 'static> Single<T> {
    /// Wrap a start function. The function kicks off the engine operation,
    /// handing the emitter to the callback object it registers.
    pub fn create<F>(start: F) -> Self
    where
        F: FnOnce(SingleEmitter<T>) + Send + 'static,
    {
        Self {
            start: Box::new(start),
        }
    }

    /// Start the operation and return the future resolving to its outcome.
    pub fn subscribe(self) -> SingleFuture<T> {
        let (tx, rx) = oneshot::channel();
        let subscription = Subscription::new();
        let emitter = SingleEmitter {
            tx: Arc::new(Mutex::new(Some(tx))),
            subscription: subscription.clone(),
        };
        (self.start)(emitter);
        SingleFuture { rx, subscription }
    }
}

impl<T: Send + 'static> IntoFuture for Single<T> {
    type Output = Result<T>;
    type IntoFuture = SingleFuture<T>;

    fn into_future(self) -> Self::IntoFuture {
        self.subscribe()
    }
}

/// Emitting side of a subscribed [`Single`], held by the engine callback
/// adapter.
///
/// Cheap to clone, and every method takes `&self`, so the engine may invoke
/// the callback from any of its threads. The first terminal delivery wins;
/// anything arriving after that, or after disposal, is dropped.
pub struct SingleEmitter<T> {
    tx: Arc<Mutex<Option<oneshot::Sender<Result<T>>>>>,
    subscription: Subscription,
}

impl<T> Clone for SingleEmitter<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
            subscription: self.subscription.clone(),
        }
    }
}

impl<T: Send> SingleEmitter<T> {
    /// Deliver the terminal success value.
    pub fn success(&self, value: T) {
        self.deliver(Ok(value));
    }

    /// Deliver the terminal failure.
    pub fn error(&self, error: ImError) {
        self.deliver(Err(error));
    }

    /// Whether the consumer has cancelled. Callback adapters may check this
    /// to skip building a value that would be dropped anyway.
    pub fn is_disposed(&self) -> bool {
        self.subscription.is_disposed()
    }

    /// Register the action run when the consumer cancels.
    pub fn on_dispose<F>(&self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.subscription.set_on_dispose(Box::new(action));
    }

    fn deliver(&self, outcome: Result<T>) {
        if self.subscription.is_disposed() {
            tracing::trace!("dropping terminal event after disposal");
            return;
        }
        let tx = self.tx.lock().ok().and_then(|mut slot| slot.take());
        match tx {
            Some(tx) => {
                let _ = tx.send(outcome);
            }
            None => tracing::trace!("suppressing second terminal event"),
        }
    }
}

/// Future side of a subscribed [`Single`].
///
/// Dropping it disposes the subscription — the cooperative cancellation
/// path. A subscription disposed while pending resolves to
/// [`ImError::Canceled`], as does one whose emitter the engine released
/// without ever firing a terminal callback.
pub struct SingleFuture<T> {
    rx: oneshot::Receiver<Result<T>>,
    subscription: Subscription,
}

impl<T> SingleFuture<T> {
    /// A handle for cancelling this operation from elsewhere.
    pub fn subscription(&self) -> Subscription {
        self.subscription.clone()
    }
}

impl<T> Future for SingleFuture<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if self.subscription.is_disposed() {
            return Poll::Ready(Err(ImError::Canceled));
        }
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            Poll::Ready(Err(_)) => Poll::Ready(Err(ImError::Canceled)),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<T> Drop for SingleFuture<T> {
    fn drop(&mut self) {
        self.subscription.dispose();
    }
}
