//! Blacklist management.
//!
//! A blacklisted peer can still be messaged by the current user; only the
//! reverse direction is blocked, with the peer told their message was
//! rejected. That policy is the engine's; this module only bridges it.

use std::sync::Arc;

use crate::bridge::{OperationForwarder, ResultForwarder};
use crate::engine::{ImEngine, ResultCallback};
use crate::error::{ErrorCode, ImError};
use crate::rx::{Completion, Single, SingleEmitter};
use crate::types::BlacklistStatus;

/// Blacklist operations.
#[derive(Clone)]
pub struct BlacklistManager {
    engine: Arc<dyn ImEngine>,
}

impl BlacklistManager {
    pub(crate) fn new(engine: Arc<dyn ImEngine>) -> Self {
        Self { engine }
    }

    /// Put a user on the blacklist.
    pub fn add(&self, user_id: impl Into<String>) -> Completion {
        let engine = self.engine.clone();
        let user_id = user_id.into();
        Completion::create(move |emitter| {
            engine.add_to_blacklist(user_id, Box::new(OperationForwarder::new(emitter)));
        })
    }

    /// Take a user off the blacklist.
    pub fn remove(&self, user_id: impl Into<String>) -> Completion {
        let engine = self.engine.clone();
        let user_id = user_id.into();
        Completion::create(move |emitter| {
            engine.remove_from_blacklist(user_id, Box::new(OperationForwarder::new(emitter)));
        })
    }

    /// Whether a user is blacklisted.
    pub fn status(&self, user_id: impl Into<String>) -> Single<BlacklistStatus> {
        let engine = self.engine.clone();
        let user_id = user_id.into();
        Single::create(move |emitter| {
            engine.get_blacklist_status(user_id, Box::new(ResultForwarder::new(emitter)));
        })
    }

    /// The current user's full blacklist. An absent list from the engine
    /// means an empty blacklist and resolves as such.
    pub fn blacklist(&self) -> Single<Vec<String>> {
        let engine = self.engine.clone();
        Single::create(move |emitter| {
            engine.get_blacklist(Box::new(BlacklistForwarder { emitter }));
        })
    }
}

struct BlacklistForwarder {
    emitter: SingleEmitter<Vec<String>>,
}

impl ResultCallback<Vec<String>> for BlacklistForwarder {
    fn on_success(&self, users: Option<Vec<String>>) {
        self.emitter.success(users.unwrap_or_default());
    }

    fn on_error(&self, code: Option<ErrorCode>) {
        self.emitter.error(ImError::Operation { code });
    }
}
