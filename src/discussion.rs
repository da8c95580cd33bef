//! Discussion group management.

use std::sync::Arc;

use crate::bridge::{OperationForwarder, ResultForwarder};
use crate::engine::ImEngine;
use crate::rx::{Completion, Single};
use crate::types::Discussion;

/// Discussion operations.
#[derive(Clone)]
pub struct DiscussionManager {
    engine: Arc<dyn ImEngine>,
}

impl DiscussionManager {
    pub(crate) fn new(engine: Arc<dyn ImEngine>) -> Self {
        Self { engine }
    }

    /// Load one discussion.
    pub fn discussion(&self, discussion_id: impl Into<String>) -> Single<Discussion> {
        let engine = self.engine.clone();
        let discussion_id = discussion_id.into();
        Single::create(move |emitter| {
            engine.get_discussion(discussion_id, Box::new(ResultForwarder::new(emitter)));
        })
    }

    /// Create a discussion with the given members. Resolves with the new
    /// discussion's id.
    pub fn create(&self, name: impl Into<String>, user_ids: Vec<String>) -> Single<String> {
        let engine = self.engine.clone();
        let name = name.into();
        Single::create(move |emitter| {
            engine.create_discussion(name, user_ids, Box::new(ResultForwarder::new(emitter)));
        })
    }

    /// Rename a discussion.
    pub fn set_name(
        &self,
        discussion_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Completion {
        let engine = self.engine.clone();
        let discussion_id = discussion_id.into();
        let name = name.into();
        Completion::create(move |emitter| {
            engine.set_discussion_name(
                discussion_id,
                name,
                Box::new(OperationForwarder::new(emitter)),
            );
        })
    }

    /// Invite members into a discussion.
    pub fn add_members(
        &self,
        discussion_id: impl Into<String>,
        user_ids: Vec<String>,
    ) -> Completion {
        let engine = self.engine.clone();
        let discussion_id = discussion_id.into();
        Completion::create(move |emitter| {
            engine.add_member_to_discussion(
                discussion_id,
                user_ids,
                Box::new(OperationForwarder::new(emitter)),
            );
        })
    }

    /// Remove one member from a discussion.
    pub fn remove_member(
        &self,
        discussion_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Completion {
        let engine = self.engine.clone();
        let discussion_id = discussion_id.into();
        let user_id = user_id.into();
        Completion::create(move |emitter| {
            engine.remove_member_from_discussion(
                discussion_id,
                user_id,
                Box::new(OperationForwarder::new(emitter)),
            );
        })
    }

    /// Leave a discussion.
    pub fn quit(&self, discussion_id: impl Into<String>) -> Completion {
        let engine = self.engine.clone();
        let discussion_id = discussion_id.into();
        Completion::create(move |emitter| {
            engine.quit_discussion(discussion_id, Box::new(OperationForwarder::new(emitter)));
        })
    }
}
