//! Conversation store queries, drafts, unread counts and settings.

use std::sync::Arc;

use crate::bridge::{OperationForwarder, ResultForwarder};
use crate::engine::{ImEngine, SyncReadStatusListener, TypingStatusListener};
use crate::rx::{Completion, Flow, FlowEmitter, Single};
use crate::types::{
    Conversation, ConversationInfo, ConversationType, ConversationTypingStatus,
    NotificationStatus, TypingStatus,
};

/// Conversation operations.
#[derive(Clone)]
pub struct ConversationManager {
    engine: Arc<dyn ImEngine>,
}

impl ConversationManager {
    pub(crate) fn new(engine: Arc<dyn ImEngine>) -> Self {
        Self { engine }
    }

    /// Load one conversation from the local store.
    pub fn conversation(
        &self,
        conversation_type: ConversationType,
        target_id: impl Into<String>,
    ) -> Single<Conversation> {
        let engine = self.engine.clone();
        let target_id = target_id.into();
        Single::create(move |emitter| {
            engine.get_conversation(
                conversation_type,
                target_id,
                Box::new(ResultForwarder::new(emitter)),
            );
        })
    }

    /// The default conversation list: private, group and system chats.
    pub fn conversation_list(&self) -> Single<Vec<Conversation>> {
        let engine = self.engine.clone();
        Single::create(move |emitter| {
            engine.get_conversation_list(Box::new(ResultForwarder::new(emitter)));
        })
    }

    /// Conversation list restricted to the given types.
    pub fn conversation_list_of(
        &self,
        conversation_types: Vec<ConversationType>,
    ) -> Single<Vec<Conversation>> {
        let engine = self.engine.clone();
        Single::create(move |emitter| {
            engine.get_conversation_list_of(
                conversation_types,
                Box::new(ResultForwarder::new(emitter)),
            );
        })
    }

    /// One page of the conversation list, walking backward from
    /// `timestamp`; pass zero for the first page. Fewer than `count`
    /// results means the list is exhausted.
    pub fn conversation_list_by_page(
        &self,
        timestamp: i64,
        count: i32,
        conversation_types: Vec<ConversationType>,
    ) -> Single<Vec<Conversation>> {
        let engine = self.engine.clone();
        Single::create(move |emitter| {
            engine.get_conversation_list_by_page(
                timestamp,
                count,
                conversation_types,
                Box::new(ResultForwarder::new(emitter)),
            );
        })
    }

    /// Remove a conversation from the list without deleting its messages.
    /// It reappears on the next message.
    pub fn remove_conversation(
        &self,
        conversation_type: ConversationType,
        target_id: impl Into<String>,
    ) -> Single<bool> {
        let engine = self.engine.clone();
        let target_id = target_id.into();
        Single::create(move |emitter| {
            engine.remove_conversation(
                conversation_type,
                target_id,
                Box::new(ResultForwarder::new(emitter)),
            );
        })
    }

    /// Mute or unmute one conversation. Resolves with the status now in
    /// effect.
    pub fn set_notification_status(
        &self,
        conversation_type: ConversationType,
        target_id: impl Into<String>,
        status: NotificationStatus,
    ) -> Single<NotificationStatus> {
        let engine = self.engine.clone();
        let target_id = target_id.into();
        Single::create(move |emitter| {
            engine.set_conversation_notification_status(
                conversation_type,
                target_id,
                status,
                Box::new(ResultForwarder::new(emitter)),
            );
        })
    }

    /// Current notification setting of one conversation.
    pub fn notification_status(
        &self,
        conversation_type: ConversationType,
        target_id: impl Into<String>,
    ) -> Single<NotificationStatus> {
        let engine = self.engine.clone();
        let target_id = target_id.into();
        Single::create(move |emitter| {
            engine.get_conversation_notification_status(
                conversation_type,
                target_id,
                Box::new(ResultForwarder::new(emitter)),
            );
        })
    }

    /// Silence all notifications daily from `start_time` (`HH:MM:SS`) for
    /// `span_minutes` minutes.
    pub fn set_notification_quiet_hours(
        &self,
        start_time: impl Into<String>,
        span_minutes: i32,
    ) -> Completion {
        let engine = self.engine.clone();
        let start_time = start_time.into();
        Completion::create(move |emitter| {
            engine.set_notification_quiet_hours(
                start_time,
                span_minutes,
                Box::new(OperationForwarder::new(emitter)),
            );
        })
    }

    /// Lift the daily quiet hours.
    pub fn remove_notification_quiet_hours(&self) -> Completion {
        let engine = self.engine.clone();
        Completion::create(move |emitter| {
            engine.remove_notification_quiet_hours(Box::new(OperationForwarder::new(emitter)));
        })
    }

    /// Stash unsent input text for one conversation.
    pub fn save_draft(
        &self,
        conversation_type: ConversationType,
        target_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Single<bool> {
        let engine = self.engine.clone();
        let target_id = target_id.into();
        let content = content.into();
        Single::create(move |emitter| {
            engine.save_text_message_draft(
                conversation_type,
                target_id,
                content,
                Box::new(ResultForwarder::new(emitter)),
            );
        })
    }

    /// The stashed draft of one conversation.
    pub fn draft(
        &self,
        conversation_type: ConversationType,
        target_id: impl Into<String>,
    ) -> Single<String> {
        let engine = self.engine.clone();
        let target_id = target_id.into();
        Single::create(move |emitter| {
            engine.get_text_message_draft(
                conversation_type,
                target_id,
                Box::new(ResultForwarder::new(emitter)),
            );
        })
    }

    /// Drop the stashed draft of one conversation.
    pub fn clear_draft(
        &self,
        conversation_type: ConversationType,
        target_id: impl Into<String>,
    ) -> Single<bool> {
        let engine = self.engine.clone();
        let target_id = target_id.into();
        Single::create(move |emitter| {
            engine.clear_text_message_draft(
                conversation_type,
                target_id,
                Box::new(ResultForwarder::new(emitter)),
            );
        })
    }

    /// Pin or unpin a conversation.
    pub fn set_to_top(
        &self,
        conversation_type: ConversationType,
        target_id: impl Into<String>,
        is_top: bool,
    ) -> Single<bool> {
        let engine = self.engine.clone();
        let target_id = target_id.into();
        Single::create(move |emitter| {
            engine.set_conversation_to_top(
                conversation_type,
                target_id,
                is_top,
                Box::new(ResultForwarder::new(emitter)),
            );
        })
    }

    /// Unread total across every conversation type except chat rooms.
    pub fn total_unread_count(&self) -> Single<i32> {
        let engine = self.engine.clone();
        Single::create(move |emitter| {
            engine.get_total_unread_count(Box::new(ResultForwarder::new(emitter)));
        })
    }

    /// Unread total across the given conversations.
    pub fn total_unread_count_of(&self, conversations: Vec<Conversation>) -> Single<i32> {
        let engine = self.engine.clone();
        Single::create(move |emitter| {
            engine.get_total_unread_count_of(
                conversations,
                Box::new(ResultForwarder::new(emitter)),
            );
        })
    }

    /// Unread total across the given conversation types.
    pub fn unread_count(&self, conversation_types: Vec<ConversationType>) -> Single<i32> {
        let engine = self.engine.clone();
        Single::create(move |emitter| {
            engine.get_unread_count(conversation_types, Box::new(ResultForwarder::new(emitter)));
        })
    }

    /// Tell other devices logged into this account that a conversation was
    /// read up to `timestamp`.
    pub fn sync_read_status(
        &self,
        conversation_type: ConversationType,
        target_id: impl Into<String>,
        timestamp: i64,
    ) -> Completion {
        let engine = self.engine.clone();
        let target_id = target_id.into();
        Completion::create(move |emitter| {
            engine.sync_conversation_read_status(
                conversation_type,
                target_id,
                timestamp,
                Box::new(OperationForwarder::new(emitter)),
            );
        })
    }

    /// Unread clears performed on other devices, as a stream. Occupies the
    /// engine's single slot for this listener kind until cancelled.
    pub fn read_status_synced(&self) -> Flow<ConversationInfo> {
        let engine = self.engine.clone();
        Flow::create(move |emitter| {
            let slot = engine.clone();
            emitter.on_dispose(move || {
                tracing::debug!("clearing sync read status listener");
                slot.set_sync_read_status_listener(None);
            });
            engine.set_sync_read_status_listener(Some(Box::new(SyncReadForwarder { emitter })));
        })
    }

    /// Typing activity in conversations, as a stream. Single engine slot,
    /// released on cancellation.
    pub fn typing_status(&self) -> Flow<ConversationTypingStatus> {
        let engine = self.engine.clone();
        Flow::create(move |emitter| {
            let slot = engine.clone();
            emitter.on_dispose(move || {
                tracing::debug!("clearing typing status listener");
                slot.set_typing_status_listener(None);
            });
            engine.set_typing_status_listener(Some(Box::new(TypingForwarder { emitter })));
        })
    }
}

struct SyncReadForwarder {
    emitter: FlowEmitter<ConversationInfo>,
}

impl SyncReadStatusListener for SyncReadForwarder {
    fn on_synced(&self, conversation_type: ConversationType, target_id: String) {
        self.emitter.emit(ConversationInfo {
            conversation_type,
            target_id,
        });
    }
}

struct TypingForwarder {
    emitter: FlowEmitter<ConversationTypingStatus>,
}

impl TypingStatusListener for TypingForwarder {
    fn on_typing(
        &self,
        conversation_type: ConversationType,
        target_id: String,
        typing: Vec<TypingStatus>,
    ) {
        self.emitter.emit(ConversationTypingStatus {
            conversation_type,
            target_id,
            typing,
        });
    }
}
