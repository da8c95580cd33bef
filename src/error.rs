//! Error types for the reactive IM bindings.

use thiserror::Error;

use crate::types::Message;

/// Result type alias for all reactive operations in this crate.
pub type Result<T> = std::result::Result<T, ImError>;

/// Opaque error code reported by the wrapped engine.
///
/// The adapter never interprets the code; it is carried verbatim so callers
/// can branch on the values the engine vendor publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ErrorCode(pub i32);

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Failures surfaced through the reactive handles.
///
/// Every failure terminates exactly one operation's handle; none is fatal to
/// the process and none is retried here — reconnect and redelivery live
/// inside the wrapped engine.
#[derive(Error, Debug)]
pub enum ImError {
    /// The engine reported a failure for an operation.
    #[error("operation failed (code {code:?})")]
    Operation {
        /// Engine error code, absent when the engine reported none.
        code: Option<ErrorCode>,
    },

    /// A send operation failed; the unsent message is handed back so the
    /// caller can retry or surface it.
    #[error("failed to send message (code {code:?})")]
    SendFailed {
        code: Option<ErrorCode>,
        /// The message that did not go out, when the engine returned it.
        message: Option<Box<Message>>,
    },

    /// The server rejected the credential during connect.
    ///
    /// Distinct from [`ImError::Operation`] so callers can refresh an
    /// expired token instead of treating the failure as transient.
    #[error("token rejected by server")]
    TokenIncorrect {
        /// The token that was rejected.
        token: String,
    },

    /// A chat room action failed.
    #[error("chat room action failed for user {user_id:?} (code {code:?})")]
    ChatRoom {
        user_id: Option<String>,
        code: Option<ErrorCode>,
    },

    /// The engine invoked a success callback without a result payload.
    #[error("engine reported success without a result payload")]
    EmptyResult,

    /// The subscription was disposed, or the engine released its callback,
    /// before a terminal event arrived. Produced locally, never by an
    /// engine callback.
    #[error("subscription cancelled before a terminal event")]
    Canceled,
}
