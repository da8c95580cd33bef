//! Shared adapters from engine callbacks to reactive emitters.
//!
//! Each bridged operation constructs one of these with the emitter bound to
//! its subscription and hands it to the engine; the engine invokes it from
//! a thread of its own choosing and the adapter forwards the outcome,
//! subject to the emitter's disposal and single-terminal rules.
//!
//! Callback shapes specific to a single operation (connect, chat room
//! history, media transfers) keep their adapters private to the module
//! that owns the operation.

use crate::engine::{OperationCallback, ResultCallback, SendMessageCallback};
use crate::error::{ErrorCode, ImError};
use crate::rx::{CompletionEmitter, SingleEmitter};
use crate::types::Message;

/// Forwards a completion-only engine callback.
pub(crate) struct OperationForwarder {
    emitter: CompletionEmitter,
}

impl OperationForwarder {
    pub(crate) fn new(emitter: CompletionEmitter) -> Self {
        Self { emitter }
    }
}

impl OperationCallback for OperationForwarder {
    fn on_success(&self) {
        self.emitter.complete();
    }

    fn on_error(&self, code: Option<ErrorCode>) {
        self.emitter.error(ImError::Operation { code });
    }
}

/// Forwards a single-result engine callback.
///
/// A success with an absent payload is surfaced as [`ImError::EmptyResult`]
/// — an operation that claims to have produced a value and delivers none
/// has failed as far as the consumer is concerned.
pub(crate) struct ResultForwarder<T> {
    emitter: SingleEmitter<T>,
}

impl<T> ResultForwarder<T> {
    pub(crate) fn new(emitter: SingleEmitter<T>) -> Self {
        Self { emitter }
    }
}

impl<T: Send> ResultCallback<T> for ResultForwarder<T> {
    fn on_success(&self, value: Option<T>) {
        match value {
            Some(value) => self.emitter.success(value),
            None => self.emitter.error(ImError::EmptyResult),
        }
    }

    fn on_error(&self, code: Option<ErrorCode>) {
        self.emitter.error(ImError::Operation { code });
    }
}

/// Forwards a send callback, handing the unsent message back on failure.
pub(crate) struct SendForwarder {
    emitter: SingleEmitter<Message>,
}

impl SendForwarder {
    pub(crate) fn new(emitter: SingleEmitter<Message>) -> Self {
        Self { emitter }
    }
}

impl SendMessageCallback for SendForwarder {
    fn on_attached(&self, _message: Message) {
        // Local-store write; the single resolves on delivery, not on attach.
    }

    fn on_success(&self, message: Option<Message>) {
        match message {
            Some(message) => self.emitter.success(message),
            None => self.emitter.error(ImError::EmptyResult),
        }
    }

    fn on_error(&self, message: Option<Message>, code: Option<ErrorCode>) {
        self.emitter.error(ImError::SendFailed {
            code,
            message: message.map(Box::new),
        });
    }
}
