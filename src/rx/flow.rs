//! Multi-value reactive handle.

use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

use super::Subscription;
use crate::error::{ImError, Result};

type StartFn<T> = Box<dyn FnOnce(FlowEmitter<T>) + Send>;

/// A lazy, multi-value asynchronous operation: zero or more non-terminal
/// emissions followed by at most one terminal completion or failure.
///
/// Persistent listeners are `Flow`s that never finish on their own;
/// dropping the [`EventStream`] (or disposing its subscription) is what
/// stops them and releases the engine's listener slot.
#[must_use = "a Flow is lazy and does nothing until subscribed"]
pub struct Flow<T> {
    start: StartFn<T>,
}

impl<T: Send + 'static> Flow<T> {
    /// Wrap a start function, as [`super::Single::create`] does.
    pub fn create<F>(start: F) -> Self
    where
        F: FnOnce(FlowEmitter<T>) + Send + 'static,
    {
        Self {
            start: Box::new(start),
        }
    }

    /// Start the operation and return the stream of its emissions.
    pub fn subscribe(self) -> EventStream<T> {
        let (tx, rx) = mpsc::unbounded_channel();
        let subscription = Subscription::new();
        let emitter = FlowEmitter {
            tx: Arc::new(Mutex::new(Some(tx))),
            subscription: subscription.clone(),
        };
        (self.start)(emitter);
        EventStream {
            inner: UnboundedReceiverStream::new(rx),
            subscription,
        }
    }
}

/// Emitting side of a subscribed [`Flow`], held by the engine callback
/// adapter. Cheap to clone; `&self` methods, callable from any engine
/// thread.
pub struct FlowEmitter<T> {
    tx: Arc<Mutex<Option<mpsc::UnboundedSender<Result<T>>>>>,
    subscription: Subscription,
}

impl<T> Clone for FlowEmitter<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
            subscription: self.subscription.clone(),
        }
    }
}

impl<T: Send> FlowEmitter<T> {
    /// Deliver a non-terminal emission.
    pub fn emit(&self, value: T) {
        if self.subscription.is_disposed() {
            tracing::trace!("dropping emission after disposal");
            return;
        }
        if let Ok(slot) = self.tx.lock() {
            match slot.as_ref() {
                Some(tx) => {
                    let _ = tx.send(Ok(value));
                }
                None => tracing::trace!("dropping emission after terminal event"),
            }
        }
    }

    /// Deliver the terminal failure and close the stream.
    pub fn fail(&self, error: ImError) {
        if self.subscription.is_disposed() {
            tracing::trace!("dropping terminal event after disposal");
            return;
        }
        let tx = self.tx.lock().ok().and_then(|mut slot| slot.take());
        match tx {
            Some(tx) => {
                let _ = tx.send(Err(error));
            }
            None => tracing::trace!("suppressing second terminal event"),
        }
    }

    /// Close the stream successfully.
    pub fn finish(&self) {
        let _ = self.tx.lock().ok().and_then(|mut slot| slot.take());
    }

    pub fn is_disposed(&self) -> bool {
        self.subscription.is_disposed()
    }

    /// Register the action run when the consumer cancels — for persistent
    /// listeners, the call that clears the engine's listener slot.
    pub fn on_dispose<F>(&self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.subscription.set_on_dispose(Box::new(action));
    }
}

/// Stream side of a subscribed [`Flow`].
///
/// Yields `Ok` for every non-terminal emission; an `Err` item is always the
/// last one. Dropping the stream disposes the subscription, which releases
/// any engine listener slot the start function occupied.
pub struct EventStream<T> {
    inner: UnboundedReceiverStream<Result<T>>,
    subscription: Subscription,
}

impl<T> EventStream<T> {
    /// A handle for cancelling this subscription from elsewhere.
    pub fn subscription(&self) -> Subscription {
        self.subscription.clone()
    }
}

impl<T> Stream for EventStream<T> {
    type Item = Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.subscription.is_disposed() {
            return Poll::Ready(None);
        }
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

impl<T> Drop for EventStream<T> {
    fn drop(&mut self) {
        self.subscription.dispose();
    }
}
