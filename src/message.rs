//! Message operations: sending, history, search, state and listeners.

use std::sync::Arc;

use crate::bridge::{OperationForwarder, ResultForwarder, SendForwarder};
use crate::engine::{
    ImEngine, ReceiveMessageListener, RecallMessageListener, SendMediaMessageCallback,
};
use crate::error::{ErrorCode, ImError};
use crate::rx::{Completion, Flow, FlowEmitter, Single};
use crate::types::{
    ConversationType, GetMessageDirection, Message, MessageContent, MessageRecalled,
    ReceivedMessage, ReceivedStatus, RecallNotification, SearchConversationResult, SendMediaEvent,
    SentStatus,
};

/// Message operations.
#[derive(Clone)]
pub struct MessageManager {
    engine: Arc<dyn ImEngine>,
}

impl MessageManager {
    pub(crate) fn new(engine: Arc<dyn ImEngine>) -> Self {
        Self { engine }
    }

    /// Send a message into a conversation.
    ///
    /// Resolves with the delivered message; a failure is
    /// [`ImError::SendFailed`] carrying the message that did not go out.
    ///
    /// # Example
    /// ```no_run
    /// # use rx_imlib::{ConversationType, MessageContent, RxImClient};
    /// # async fn demo(client: &RxImClient) -> rx_imlib::Result<()> {
    /// let sent = client
    ///     .messages()
    ///     .send_message(
    ///         ConversationType::Private,
    ///         "peer-id",
    ///         MessageContent::Text { content: "hello".into() },
    ///         None,
    ///         None,
    ///     )
    ///     .await?;
    /// println!("delivered as {}", sent.message_id);
    /// # Ok(())
    /// # }
    /// ```
    pub fn send_message(
        &self,
        conversation_type: ConversationType,
        target_id: impl Into<String>,
        content: MessageContent,
        push_content: Option<String>,
        push_data: Option<String>,
    ) -> Single<Message> {
        let engine = self.engine.clone();
        let target_id = target_id.into();
        Single::create(move |emitter| {
            engine.send_message(
                conversation_type,
                target_id,
                content,
                push_content,
                push_data,
                Box::new(SendForwarder::new(emitter)),
            );
        })
    }

    /// Send an already-built message entity.
    pub fn send(
        &self,
        message: Message,
        push_content: Option<String>,
        push_data: Option<String>,
    ) -> Single<Message> {
        let engine = self.engine.clone();
        Single::create(move |emitter| {
            engine.send(
                message,
                push_content,
                push_data,
                Box::new(SendForwarder::new(emitter)),
            );
        })
    }

    /// Send a location message; the entity's content must be
    /// [`MessageContent::Location`].
    pub fn send_location_message(
        &self,
        message: Message,
        push_content: Option<String>,
        push_data: Option<String>,
    ) -> Single<Message> {
        let engine = self.engine.clone();
        Single::create(move |emitter| {
            engine.send_location_message(
                message,
                push_content,
                push_data,
                Box::new(SendForwarder::new(emitter)),
            );
        })
    }

    /// Send a message visible only to the listed members of a group.
    pub fn send_directional_message(
        &self,
        conversation_type: ConversationType,
        target_id: impl Into<String>,
        content: MessageContent,
        user_ids: Vec<String>,
        push_content: Option<String>,
        push_data: Option<String>,
    ) -> Single<Message> {
        let engine = self.engine.clone();
        let target_id = target_id.into();
        Single::create(move |emitter| {
            engine.send_directional_message(
                conversation_type,
                target_id,
                content,
                user_ids,
                push_content,
                push_data,
                Box::new(SendForwarder::new(emitter)),
            );
        })
    }

    /// Send an image message, observing the upload as it happens.
    ///
    /// The flow emits [`SendMediaEvent::Attached`] and
    /// [`SendMediaEvent::Progress`] events, then one
    /// [`SendMediaEvent::Sent`] and closes.
    ///
    /// # Example
    /// ```no_run
    /// # use futures::StreamExt;
    /// # use rx_imlib::{ConversationType, MessageContent, RxImClient, SendMediaEvent};
    /// # async fn demo(client: &RxImClient, content: MessageContent) -> rx_imlib::Result<()> {
    /// let mut upload = client
    ///     .messages()
    ///     .send_image_message(ConversationType::Private, "peer-id", content, None, None)
    ///     .subscribe();
    /// while let Some(event) = upload.next().await {
    ///     if let SendMediaEvent::Progress { progress, .. } = event? {
    ///         println!("{progress}%");
    ///     }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn send_image_message(
        &self,
        conversation_type: ConversationType,
        target_id: impl Into<String>,
        content: MessageContent,
        push_content: Option<String>,
        push_data: Option<String>,
    ) -> Flow<SendMediaEvent> {
        let engine = self.engine.clone();
        let target_id = target_id.into();
        Flow::create(move |emitter| {
            engine.send_image_message(
                conversation_type,
                target_id,
                content,
                push_content,
                push_data,
                Box::new(SendMediaForwarder { emitter }),
            );
        })
    }

    /// Fetch local history before `oldest_message_id`, newest first. Pass
    /// `-1` on the first page.
    pub fn history(
        &self,
        conversation_type: ConversationType,
        target_id: impl Into<String>,
        oldest_message_id: i64,
        count: i32,
    ) -> Single<Vec<Message>> {
        let engine = self.engine.clone();
        let target_id = target_id.into();
        Single::create(move |emitter| {
            engine.get_history_messages(
                conversation_type,
                target_id,
                oldest_message_id,
                count,
                Box::new(ResultForwarder::new(emitter)),
            );
        })
    }

    /// Local history restricted to one message type.
    pub fn history_by_object_name(
        &self,
        conversation_type: ConversationType,
        target_id: impl Into<String>,
        object_name: impl Into<String>,
        oldest_message_id: i64,
        count: i32,
    ) -> Single<Vec<Message>> {
        let engine = self.engine.clone();
        let target_id = target_id.into();
        let object_name = object_name.into();
        Single::create(move |emitter| {
            engine.get_history_messages_by_object_name(
                conversation_type,
                target_id,
                object_name,
                oldest_message_id,
                count,
                Box::new(ResultForwarder::new(emitter)),
            );
        })
    }

    /// Local history walking forward or backward from a base message; the
    /// base message itself is not included.
    pub fn history_in_direction(
        &self,
        conversation_type: ConversationType,
        target_id: impl Into<String>,
        object_name: impl Into<String>,
        base_message_id: i64,
        count: i32,
        direction: GetMessageDirection,
    ) -> Single<Vec<Message>> {
        let engine = self.engine.clone();
        let target_id = target_id.into();
        let object_name = object_name.into();
        Single::create(move |emitter| {
            engine.get_history_messages_in_direction(
                conversation_type,
                target_id,
                object_name,
                base_message_id,
                count,
                direction,
                Box::new(ResultForwarder::new(emitter)),
            );
        })
    }

    /// Messages around a point in time: `before` older and `after` newer
    /// than `sent_time`, including the anchor message.
    pub fn history_around(
        &self,
        conversation_type: ConversationType,
        target_id: impl Into<String>,
        sent_time: i64,
        before: i32,
        after: i32,
    ) -> Single<Vec<Message>> {
        let engine = self.engine.clone();
        let target_id = target_id.into();
        Single::create(move |emitter| {
            engine.get_history_messages_around(
                conversation_type,
                target_id,
                sent_time,
                before,
                after,
                Box::new(ResultForwarder::new(emitter)),
            );
        })
    }

    /// Server-side history, for pulling messages onto a fresh device.
    pub fn remote_history(
        &self,
        conversation_type: ConversationType,
        target_id: impl Into<String>,
        date_time: i64,
        count: i32,
    ) -> Single<Vec<Message>> {
        let engine = self.engine.clone();
        let target_id = target_id.into();
        Single::create(move |emitter| {
            engine.get_remote_history_messages(
                conversation_type,
                target_id,
                date_time,
                count,
                Box::new(ResultForwarder::new(emitter)),
            );
        })
    }

    /// Clear all chat records of one conversation.
    pub fn clear_messages(
        &self,
        conversation_type: ConversationType,
        target_id: impl Into<String>,
    ) -> Single<bool> {
        let engine = self.engine.clone();
        let target_id = target_id.into();
        Single::create(move |emitter| {
            engine.clear_messages(
                conversation_type,
                target_id,
                Box::new(ResultForwarder::new(emitter)),
            );
        })
    }

    /// Delete all of a conversation's messages and compact the local store.
    pub fn delete_messages(
        &self,
        conversation_type: ConversationType,
        target_id: impl Into<String>,
    ) -> Single<bool> {
        let engine = self.engine.clone();
        let target_id = target_id.into();
        Single::create(move |emitter| {
            engine.delete_messages(
                conversation_type,
                target_id,
                Box::new(ResultForwarder::new(emitter)),
            );
        })
    }

    /// Delete specific messages by id.
    pub fn delete_messages_by_id(&self, message_ids: Vec<i64>) -> Single<bool> {
        let engine = self.engine.clone();
        Single::create(move |emitter| {
            engine.delete_messages_by_id(message_ids, Box::new(ResultForwarder::new(emitter)));
        })
    }

    /// Search local history for conversations containing the keyword.
    pub fn search_conversations(
        &self,
        keyword: impl Into<String>,
        conversation_types: Vec<ConversationType>,
        object_names: Vec<String>,
    ) -> Single<Vec<SearchConversationResult>> {
        let engine = self.engine.clone();
        let keyword = keyword.into();
        Single::create(move |emitter| {
            engine.search_conversations(
                keyword,
                conversation_types,
                object_names,
                Box::new(ResultForwarder::new(emitter)),
            );
        })
    }

    /// Search one conversation's local history. `count` of zero returns
    /// every match; `begin_time` of zero starts from the newest message.
    pub fn search_messages(
        &self,
        conversation_type: ConversationType,
        target_id: impl Into<String>,
        keyword: impl Into<String>,
        count: i32,
        begin_time: i64,
    ) -> Single<Vec<Message>> {
        let engine = self.engine.clone();
        let target_id = target_id.into();
        let keyword = keyword.into();
        Single::create(move |emitter| {
            engine.search_messages(
                conversation_type,
                target_id,
                keyword,
                count,
                begin_time,
                Box::new(ResultForwarder::new(emitter)),
            );
        })
    }

    /// Mark a whole conversation read.
    pub fn clear_unread_status(
        &self,
        conversation_type: ConversationType,
        target_id: impl Into<String>,
    ) -> Single<bool> {
        let engine = self.engine.clone();
        let target_id = target_id.into();
        Single::create(move |emitter| {
            engine.clear_messages_unread_status(
                conversation_type,
                target_id,
                Box::new(ResultForwarder::new(emitter)),
            );
        })
    }

    /// Mark messages sent before `timestamp` read.
    pub fn clear_unread_status_before(
        &self,
        conversation_type: ConversationType,
        target_id: impl Into<String>,
        timestamp: i64,
    ) -> Completion {
        let engine = self.engine.clone();
        let target_id = target_id.into();
        Completion::create(move |emitter| {
            engine.clear_messages_unread_status_before(
                conversation_type,
                target_id,
                timestamp,
                Box::new(OperationForwarder::new(emitter)),
            );
        })
    }

    /// Update the received status of one message.
    pub fn set_received_status(
        &self,
        message_id: i64,
        received_status: ReceivedStatus,
    ) -> Single<bool> {
        let engine = self.engine.clone();
        Single::create(move |emitter| {
            engine.set_message_received_status(
                message_id,
                received_status,
                Box::new(ResultForwarder::new(emitter)),
            );
        })
    }

    /// Load one message from the local store.
    pub fn message(&self, message_id: i64) -> Single<Message> {
        let engine = self.engine.clone();
        Single::create(move |emitter| {
            engine.get_message(message_id, Box::new(ResultForwarder::new(emitter)));
        })
    }

    /// Insert an outgoing message into the local store without sending it.
    pub fn insert_outgoing(
        &self,
        conversation_type: ConversationType,
        target_id: impl Into<String>,
        sent_status: SentStatus,
        content: MessageContent,
        sent_time: i64,
    ) -> Single<Message> {
        let engine = self.engine.clone();
        let target_id = target_id.into();
        Single::create(move |emitter| {
            engine.insert_outgoing_message(
                conversation_type,
                target_id,
                sent_status,
                content,
                sent_time,
                Box::new(ResultForwarder::new(emitter)),
            );
        })
    }

    /// Insert an incoming message into the local store.
    pub fn insert_incoming(
        &self,
        conversation_type: ConversationType,
        target_id: impl Into<String>,
        sender_user_id: impl Into<String>,
        received_status: ReceivedStatus,
        content: MessageContent,
        sent_time: i64,
    ) -> Single<Message> {
        let engine = self.engine.clone();
        let target_id = target_id.into();
        let sender_user_id = sender_user_id.into();
        Single::create(move |emitter| {
            engine.insert_incoming_message(
                conversation_type,
                target_id,
                sender_user_id,
                received_status,
                content,
                sent_time,
                Box::new(ResultForwarder::new(emitter)),
            );
        })
    }

    /// Recall a sent message. Resolves with the notification the engine
    /// stores in its place.
    pub fn recall(
        &self,
        message: Message,
        push_content: Option<String>,
    ) -> Single<RecallNotification> {
        let engine = self.engine.clone();
        Single::create(move |emitter| {
            engine.recall_message(message, push_content, Box::new(ResultForwarder::new(emitter)));
        })
    }

    /// Request read receipts for one of our own messages.
    pub fn send_read_receipt_request(&self, message: Message) -> Completion {
        let engine = self.engine.clone();
        Completion::create(move |emitter| {
            engine.send_read_receipt_request(message, Box::new(OperationForwarder::new(emitter)));
        })
    }

    /// Answer read-receipt requests for the given messages.
    pub fn send_read_receipt_response(
        &self,
        conversation_type: ConversationType,
        target_id: impl Into<String>,
        messages: Vec<Message>,
    ) -> Completion {
        let engine = self.engine.clone();
        let target_id = target_id.into();
        Completion::create(move |emitter| {
            engine.send_read_receipt_response(
                conversation_type,
                target_id,
                messages,
                Box::new(OperationForwarder::new(emitter)),
            );
        })
    }

    /// Set how long the server keeps offline messages, 1 to 7 days.
    pub fn set_offline_message_duration(&self, days: i32) -> Single<i64> {
        let engine = self.engine.clone();
        Single::create(move |emitter| {
            engine.set_offline_message_duration(days, Box::new(ResultForwarder::new(emitter)));
        })
    }

    /// Current offline retention, as the engine reports it.
    pub fn offline_message_duration(&self) -> Single<String> {
        let engine = self.engine.clone();
        Single::create(move |emitter| {
            engine.get_offline_message_duration(Box::new(ResultForwarder::new(emitter)));
        })
    }

    /// Messages pushed by the engine, as a stream.
    ///
    /// Occupies the engine's single receive-listener slot until the stream
    /// is dropped or its subscription disposed; a later subscriber replaces
    /// an earlier one at the engine level.
    ///
    /// # Example
    /// ```no_run
    /// # use futures::StreamExt;
    /// # use rx_imlib::RxImClient;
    /// # async fn demo(client: &RxImClient) -> rx_imlib::Result<()> {
    /// let mut incoming = client.messages().incoming().subscribe();
    /// while let Some(received) = incoming.next().await {
    ///     let received = received?;
    ///     println!("{:?}", received.message.content);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn incoming(&self) -> Flow<ReceivedMessage> {
        let engine = self.engine.clone();
        Flow::create(move |emitter| {
            let slot = engine.clone();
            emitter.on_dispose(move || {
                tracing::debug!("clearing receive message listener");
                slot.set_receive_message_listener(None);
            });
            engine.set_receive_message_listener(Some(Box::new(ReceiveForwarder { emitter })));
        })
    }

    /// Recalls of already-delivered messages, as a stream. Same single-slot
    /// behavior as [`incoming`](MessageManager::incoming).
    pub fn recalled(&self) -> Flow<MessageRecalled> {
        let engine = self.engine.clone();
        Flow::create(move |emitter| {
            let slot = engine.clone();
            emitter.on_dispose(move || {
                tracing::debug!("clearing recall message listener");
                slot.set_recall_message_listener(None);
            });
            engine.set_recall_message_listener(Some(Box::new(RecallForwarder { emitter })));
        })
    }
}

struct SendMediaForwarder {
    emitter: FlowEmitter<SendMediaEvent>,
}

impl SendMediaMessageCallback for SendMediaForwarder {
    fn on_attached(&self, message: Message) {
        self.emitter.emit(SendMediaEvent::Attached(message));
    }

    fn on_progress(&self, message: Message, progress: u8) {
        self.emitter.emit(SendMediaEvent::Progress { message, progress });
    }

    fn on_success(&self, message: Message) {
        self.emitter.emit(SendMediaEvent::Sent(message));
        self.emitter.finish();
    }

    fn on_error(&self, message: Option<Message>, code: Option<ErrorCode>) {
        self.emitter.fail(ImError::SendFailed {
            code,
            message: message.map(Box::new),
        });
    }
}

struct ReceiveForwarder {
    emitter: FlowEmitter<ReceivedMessage>,
}

impl ReceiveMessageListener for ReceiveForwarder {
    fn on_received(&self, message: Message, remaining: i32) {
        self.emitter.emit(ReceivedMessage { message, remaining });
    }
}

struct RecallForwarder {
    emitter: FlowEmitter<MessageRecalled>,
}

impl RecallMessageListener for RecallForwarder {
    fn on_recalled(&self, message: Message, recall: RecallNotification) {
        self.emitter.emit(MessageRecalled {
            message,
            recall_notification: recall,
        });
    }
}
