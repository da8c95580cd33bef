//! Client entry point and configuration.

use std::sync::Arc;

use crate::blacklist::BlacklistManager;
use crate::chat_room::ChatRoomManager;
use crate::connection::ConnectionManager;
use crate::conversation::ConversationManager;
use crate::discussion::DiscussionManager;
use crate::engine::ImEngine;
use crate::media::MediaManager;
use crate::message::MessageManager;

/// Client configuration.
#[derive(Debug, Clone, Default)]
pub struct ImConfig {
    /// Application key registered with the IM service, forwarded to the
    /// engine at initialization.
    pub app_key: Option<String>,
}

impl ImConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the application key.
    pub fn with_app_key(mut self, app_key: impl Into<String>) -> Self {
        self.app_key = Some(app_key.into());
        self
    }
}

/// Reactive client over a wrapped IM engine.
///
/// Cheap to clone; every manager shares the same engine instance. The
/// client introduces no state of its own — conversations, messages and
/// connection state all live inside the engine.
#[derive(Clone)]
pub struct RxImClient {
    engine: Arc<dyn ImEngine>,
}

impl RxImClient {
    /// Wrap an engine instance.
    pub fn new<E: ImEngine>(engine: E) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Wrap an engine instance that is already shared.
    pub fn from_arc(engine: Arc<dyn ImEngine>) -> Self {
        Self { engine }
    }

    /// Wrap an engine instance and initialize it with the configuration.
    pub fn with_config<E: ImEngine>(engine: E, config: ImConfig) -> Self {
        let client = Self::new(engine);
        client.engine.init(config.app_key);
        client
    }

    /// Session management: connect, disconnect and connection state.
    pub fn connection(&self) -> ConnectionManager {
        ConnectionManager::new(self.engine.clone())
    }

    /// Message sending, history, search and message-level listeners.
    pub fn messages(&self) -> MessageManager {
        MessageManager::new(self.engine.clone())
    }

    /// Conversation store queries, drafts, unread counts and settings.
    pub fn conversations(&self) -> ConversationManager {
        ConversationManager::new(self.engine.clone())
    }

    /// Chat room membership, info and history.
    pub fn chat_rooms(&self) -> ChatRoomManager {
        ChatRoomManager::new(self.engine.clone())
    }

    /// Discussion group management.
    pub fn discussions(&self) -> DiscussionManager {
        DiscussionManager::new(self.engine.clone())
    }

    /// Blacklist management.
    pub fn blacklist(&self) -> BlacklistManager {
        BlacklistManager::new(self.engine.clone())
    }

    /// Media attachment downloads.
    pub fn media(&self) -> MediaManager {
        MediaManager::new(self.engine.clone())
    }
}
