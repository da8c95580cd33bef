//! Chat room membership, info and history.
//!
//! Chat rooms are transient: leaving the chat UI leaves the room, nothing
//! is stored locally, and the server keeps only a short message tail.
//! All of that lives in the engine; this module only bridges the calls.

use std::sync::Arc;

use crate::bridge::{OperationForwarder, ResultForwarder};
use crate::engine::{ChatRoomActionListener, ChatRoomHistoryCallback, ImEngine};
use crate::error::{ErrorCode, ImError};
use crate::rx::{Completion, Flow, FlowEmitter, Single, SingleEmitter};
use crate::types::{
    ChatRoomAction, ChatRoomEvent, ChatRoomInfo, ChatRoomMemberOrder, Message, TimestampOrder,
};

/// Chat room operations.
#[derive(Clone)]
pub struct ChatRoomManager {
    engine: Arc<dyn ImEngine>,
}

impl ChatRoomManager {
    pub(crate) fn new(engine: Arc<dyn ImEngine>) -> Self {
        Self { engine }
    }

    /// Join a room, creating it if needed. `message_count` is how much of
    /// the recent tail to pull on entry: `-1` none, up to 50.
    pub fn join(&self, room_id: impl Into<String>, message_count: i32) -> Completion {
        let engine = self.engine.clone();
        let room_id = room_id.into();
        Completion::create(move |emitter| {
            engine.join_chat_room(
                room_id,
                message_count,
                Box::new(OperationForwarder::new(emitter)),
            );
        })
    }

    /// Join only if the room already exists.
    pub fn join_existing(&self, room_id: impl Into<String>, message_count: i32) -> Completion {
        let engine = self.engine.clone();
        let room_id = room_id.into();
        Completion::create(move |emitter| {
            engine.join_exist_chat_room(
                room_id,
                message_count,
                Box::new(OperationForwarder::new(emitter)),
            );
        })
    }

    /// Leave a room.
    pub fn quit(&self, room_id: impl Into<String>) -> Completion {
        let engine = self.engine.clone();
        let room_id = room_id.into();
        Completion::create(move |emitter| {
            engine.quit_chat_room(room_id, Box::new(OperationForwarder::new(emitter)));
        })
    }

    /// Room info with a member sample, at most 20, in the given join order.
    pub fn info(
        &self,
        room_id: impl Into<String>,
        member_count: i32,
        order: ChatRoomMemberOrder,
    ) -> Single<ChatRoomInfo> {
        let engine = self.engine.clone();
        let room_id = room_id.into();
        Single::create(move |emitter| {
            engine.get_chat_room_info(
                room_id,
                member_count,
                order,
                Box::new(ResultForwarder::new(emitter)),
            );
        })
    }

    /// Server-stored room history starting at `record_time` (zero for the
    /// oldest stored message), up to 200 per pull. An absent list from the
    /// engine means the room has no stored history and resolves empty.
    pub fn history(
        &self,
        room_id: impl Into<String>,
        record_time: i64,
        count: i32,
        order: TimestampOrder,
    ) -> Single<Vec<Message>> {
        let engine = self.engine.clone();
        let room_id = room_id.into();
        Single::create(move |emitter| {
            engine.get_chat_room_history_messages(
                room_id,
                record_time,
                count,
                order,
                Box::new(HistoryForwarder { emitter }),
            );
        })
    }

    /// Membership transitions, as a stream. The engine's error callback is
    /// terminal here and carries the affected user id. Single engine slot,
    /// released on cancellation.
    pub fn actions(&self) -> Flow<ChatRoomEvent> {
        let engine = self.engine.clone();
        Flow::create(move |emitter| {
            let slot = engine.clone();
            emitter.on_dispose(move || {
                tracing::debug!("clearing chat room action listener");
                slot.set_chat_room_action_listener(None);
            });
            engine.set_chat_room_action_listener(Some(Box::new(ActionForwarder { emitter })));
        })
    }
}

struct HistoryForwarder {
    emitter: SingleEmitter<Vec<Message>>,
}

impl ChatRoomHistoryCallback for HistoryForwarder {
    fn on_success(&self, messages: Option<Vec<Message>>, _sync_time: i64) {
        self.emitter.success(messages.unwrap_or_default());
    }

    fn on_error(&self, code: Option<ErrorCode>) {
        self.emitter.error(ImError::Operation { code });
    }
}

struct ActionForwarder {
    emitter: FlowEmitter<ChatRoomEvent>,
}

impl ActionForwarder {
    fn event(&self, action: ChatRoomAction, user_id: Option<String>) {
        self.emitter.emit(ChatRoomEvent { action, user_id });
    }
}

impl ChatRoomActionListener for ActionForwarder {
    fn on_joining(&self, user_id: Option<String>) {
        self.event(ChatRoomAction::Joining, user_id);
    }

    fn on_joined(&self, user_id: Option<String>) {
        self.event(ChatRoomAction::Joined, user_id);
    }

    fn on_quit(&self, user_id: Option<String>) {
        self.event(ChatRoomAction::Quit, user_id);
    }

    fn on_error(&self, user_id: Option<String>, code: Option<ErrorCode>) {
        self.emitter.fail(ImError::ChatRoom { user_id, code });
    }
}
