//! Completion-only reactive handle.

use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::task::{Context, Poll};

use super::{Single, SingleEmitter, SingleFuture, Subscription};
use crate::error::{ImError, Result};

/// A lazy operation that completes or fails without producing a value.
///
/// Same laws as [`Single`]: lazy start, one engine call per subscription,
/// at most one terminal event, disposal suppresses everything after it.
#[must_use = "a Completion is lazy and does nothing until subscribed or awaited"]
pub struct Completion {
    inner: Single<()>,
}

impl Completion {
    /// Wrap a start function, as [`Single::create`] does.
    pub fn create<F>(start: F) -> Self
    where
        F: FnOnce(CompletionEmitter) + Send + 'static,
    {
        Self {
            inner: Single::create(move |emitter| start(CompletionEmitter { inner: emitter })),
        }
    }

    /// Start the operation and return the future resolving on completion.
    pub fn subscribe(self) -> CompletionFuture {
        CompletionFuture {
            inner: self.inner.subscribe(),
        }
    }
}

impl IntoFuture for Completion {
    type Output = Result<()>;
    type IntoFuture = CompletionFuture;

    fn into_future(self) -> Self::IntoFuture {
        self.subscribe()
    }
}

/// Emitting side of a subscribed [`Completion`].
#[derive(Clone)]
pub struct CompletionEmitter {
    inner: SingleEmitter<()>,
}

impl CompletionEmitter {
    /// Deliver the terminal completion.
    pub fn complete(&self) {
        self.inner.success(());
    }

    /// Deliver the terminal failure.
    pub fn error(&self, error: ImError) {
        self.inner.error(error);
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.is_disposed()
    }

    pub fn on_dispose<F>(&self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.inner.on_dispose(action);
    }
}

/// Future side of a subscribed [`Completion`]; dropping it disposes.
pub struct CompletionFuture {
    inner: SingleFuture<()>,
}

impl CompletionFuture {
    /// A handle for cancelling this operation from elsewhere.
    pub fn subscription(&self) -> Subscription {
        self.inner.subscription()
    }
}

impl Future for CompletionFuture {
    type Output = Result<()>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.inner).poll(cx)
    }
}
