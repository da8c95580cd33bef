//! Session lifecycle: connect, disconnect and connection state.

use std::sync::Arc;

use crate::engine::{ConnectCallback, ConnectionStatusListener, ImEngine, LogListener};
use crate::error::{ErrorCode, ImError};
use crate::rx::{Flow, FlowEmitter, Single, SingleEmitter};
use crate::types::ConnectionStatus;

/// Session operations.
#[derive(Clone)]
pub struct ConnectionManager {
    engine: Arc<dyn ImEngine>,
}

impl ConnectionManager {
    pub(crate) fn new(engine: Arc<dyn ImEngine>) -> Self {
        Self { engine }
    }

    /// Establish the session with a server-issued token.
    ///
    /// Resolves with the connected user's id. A rejected credential
    /// surfaces as [`ImError::TokenIncorrect`], distinct from the generic
    /// [`ImError::Operation`], so callers can fetch a fresh token instead
    /// of retrying a doomed one. Reconnection after transient failures is
    /// the engine's business and happens behind this call.
    ///
    /// # Example
    /// ```no_run
    /// # use rx_imlib::{ImError, RxImClient};
    /// # async fn demo(client: &RxImClient, token: &str) -> rx_imlib::Result<()> {
    /// match client.connection().connect(token).await {
    ///     Ok(user_id) => println!("connected as {user_id}"),
    ///     Err(ImError::TokenIncorrect { .. }) => println!("token expired, refresh it"),
    ///     Err(other) => return Err(other),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn connect(&self, token: impl Into<String>) -> Single<String> {
        let engine = self.engine.clone();
        let token = token.into();
        Single::create(move |emitter| {
            let callback = ConnectForwarder {
                token: token.clone(),
                emitter,
            };
            engine.connect(token, Box::new(callback));
        })
    }

    /// Drop the server connection; push delivery continues.
    pub fn disconnect(&self) {
        self.engine.disconnect();
    }

    /// Drop the connection and stop push delivery as well.
    pub fn logout(&self) {
        self.engine.logout();
    }

    /// Connection state transitions, as a stream. Occupies the engine's
    /// single status-listener slot until cancelled.
    pub fn status_changes(&self) -> Flow<ConnectionStatus> {
        let engine = self.engine.clone();
        Flow::create(move |emitter| {
            let slot = engine.clone();
            emitter.on_dispose(move || {
                tracing::debug!("clearing connection status listener");
                slot.set_connection_status_listener(None);
            });
            engine.set_connection_status_listener(Some(Box::new(StatusForwarder { emitter })));
        })
    }

    /// The engine's diagnostic log output, as a stream. Register before
    /// connecting to observe the connection phase.
    pub fn log_lines(&self) -> Flow<String> {
        let engine = self.engine.clone();
        Flow::create(move |emitter| {
            let slot = engine.clone();
            emitter.on_dispose(move || {
                tracing::debug!("clearing engine log listener");
                slot.set_log_listener(None);
            });
            engine.set_log_listener(Some(Box::new(LogForwarder { emitter })));
        })
    }
}

struct ConnectForwarder {
    token: String,
    emitter: SingleEmitter<String>,
}

impl ConnectCallback for ConnectForwarder {
    fn on_success(&self, user_id: Option<String>) {
        match user_id {
            Some(user_id) => self.emitter.success(user_id),
            None => self.emitter.error(ImError::EmptyResult),
        }
    }

    fn on_error(&self, code: Option<ErrorCode>) {
        self.emitter.error(ImError::Operation { code });
    }

    fn on_token_incorrect(&self) {
        self.emitter.error(ImError::TokenIncorrect {
            token: self.token.clone(),
        });
    }
}

struct StatusForwarder {
    emitter: FlowEmitter<ConnectionStatus>,
}

impl ConnectionStatusListener for StatusForwarder {
    fn on_changed(&self, status: ConnectionStatus) {
        self.emitter.emit(status);
    }
}

struct LogForwarder {
    emitter: FlowEmitter<String>,
}

impl LogListener for LogForwarder {
    fn on_log(&self, line: String) {
        self.emitter.emit(line);
    }
}
