//! The boundary to the wrapped IM engine.
//!
//! Everything behind these traits is an opaque external collaborator: the
//! engine owns connection management, message storage, retry and delivery
//! semantics, runs its own worker threads, and reports every outcome by
//! invoking the callback object handed to it — possibly well after the
//! originating call returned, and never on the caller's thread. The engine
//! serializes the invocations on any one callback object; the adapter
//! relies on that and adds no locking of its own around deliveries.
//!
//! Listener slots are global and single-occupancy on the engine side: each
//! listener kind has exactly one slot, registering replaces the previous
//! occupant and `None` clears it. The adapter does not multiplex these
//! slots — that the last subscriber wins is a constraint of the wrapped
//! engine, not a property enforced here.
//!
//! Error codes and several payloads are nullable at this boundary and are
//! therefore explicit `Option`s; the adapter decides per call-site whether
//! an absent payload is a default or a defect.

use crate::error::ErrorCode;
use crate::types::{
    BlacklistStatus, ChatRoomInfo, ChatRoomMemberOrder, ConnectionStatus, Conversation,
    ConversationType, Discussion, GetMessageDirection, MediaType, Message, MessageContent,
    NotificationStatus, ReceivedStatus, RecallNotification, SearchConversationResult, SentStatus,
    TimestampOrder, TypingStatus,
};

// ---------------------------------------------------------------------------
// One-shot callbacks
// ---------------------------------------------------------------------------

/// Callback for operations that complete without a result value.
pub trait OperationCallback: Send {
    fn on_success(&self);
    fn on_error(&self, code: Option<ErrorCode>);
}

/// Callback for operations producing a single result value.
pub trait ResultCallback<T>: Send {
    /// The engine may fire a success with no value attached.
    fn on_success(&self, value: Option<T>);
    fn on_error(&self, code: Option<ErrorCode>);
}

/// Callback for message send operations.
pub trait SendMessageCallback: Send {
    /// The message was written to the local store and queued for delivery.
    fn on_attached(&self, message: Message);
    fn on_success(&self, message: Option<Message>);
    /// The message that failed to go out rides along with the code.
    fn on_error(&self, message: Option<Message>, code: Option<ErrorCode>);
}

/// Callback for media-bearing sends, which report upload progress.
pub trait SendMediaMessageCallback: Send {
    fn on_attached(&self, message: Message);
    fn on_progress(&self, message: Message, progress: u8);
    fn on_success(&self, message: Message);
    fn on_error(&self, message: Option<Message>, code: Option<ErrorCode>);
}

/// Callback for the connect operation — the one callback with a third
/// terminal outcome beyond success and failure.
pub trait ConnectCallback: Send {
    fn on_success(&self, user_id: Option<String>);
    fn on_error(&self, code: Option<ErrorCode>);
    /// The server rejected the credential; reconnecting with the same token
    /// will not help.
    fn on_token_incorrect(&self);
}

/// Callback for media downloads.
pub trait DownloadMediaCallback: Send {
    fn on_progress(&self, progress: u8);
    fn on_success(&self, media_id: Option<String>);
    fn on_error(&self, code: Option<ErrorCode>);
}

/// Callback for chat room history pulls.
pub trait ChatRoomHistoryCallback: Send {
    /// `sync_time` is the server-side cursor for the next pull.
    fn on_success(&self, messages: Option<Vec<Message>>, sync_time: i64);
    fn on_error(&self, code: Option<ErrorCode>);
}

// ---------------------------------------------------------------------------
// Persistent listeners (single global slot per kind)
// ---------------------------------------------------------------------------

/// Listener for messages pushed by the engine.
pub trait ReceiveMessageListener: Send {
    /// `remaining` counts the messages still queued in this delivery batch.
    fn on_received(&self, message: Message, remaining: i32);
}

/// Listener for recalls of already-delivered messages.
pub trait RecallMessageListener: Send {
    fn on_recalled(&self, message: Message, recall: RecallNotification);
}

/// Listener for typing activity in conversations.
pub trait TypingStatusListener: Send {
    fn on_typing(
        &self,
        conversation_type: ConversationType,
        target_id: String,
        typing: Vec<TypingStatus>,
    );
}

/// Listener for unread-state clears performed on other devices.
pub trait SyncReadStatusListener: Send {
    fn on_synced(&self, conversation_type: ConversationType, target_id: String);
}

/// Listener for chat room membership transitions.
pub trait ChatRoomActionListener: Send {
    fn on_joining(&self, user_id: Option<String>);
    fn on_joined(&self, user_id: Option<String>);
    fn on_quit(&self, user_id: Option<String>);
    fn on_error(&self, user_id: Option<String>, code: Option<ErrorCode>);
}

/// Listener for connection state transitions.
pub trait ConnectionStatusListener: Send {
    fn on_changed(&self, status: ConnectionStatus);
}

/// Listener for the engine's own diagnostic log lines.
pub trait LogListener: Send {
    fn on_log(&self, line: String);
}

// ---------------------------------------------------------------------------
// Engine surface, by domain
// ---------------------------------------------------------------------------

/// Session lifecycle.
pub trait ConnectionEngine: Send + Sync {
    /// One-time engine initialization with the registered application key.
    fn init(&self, app_key: Option<String>);
    fn connect(&self, token: String, callback: Box<dyn ConnectCallback>);
    /// Drops the connection; push delivery continues.
    fn disconnect(&self);
    /// Drops the connection and stops push delivery.
    fn logout(&self);
    fn set_connection_status_listener(&self, listener: Option<Box<dyn ConnectionStatusListener>>);
    fn set_log_listener(&self, listener: Option<Box<dyn LogListener>>);
}

/// Message sending, history, search and message-level listeners.
pub trait MessageEngine: Send + Sync {
    fn send_message(
        &self,
        conversation_type: ConversationType,
        target_id: String,
        content: MessageContent,
        push_content: Option<String>,
        push_data: Option<String>,
        callback: Box<dyn SendMessageCallback>,
    );
    fn send(
        &self,
        message: Message,
        push_content: Option<String>,
        push_data: Option<String>,
        callback: Box<dyn SendMessageCallback>,
    );
    fn send_location_message(
        &self,
        message: Message,
        push_content: Option<String>,
        push_data: Option<String>,
        callback: Box<dyn SendMessageCallback>,
    );
    /// Delivers to a subset of a group; the other members never see it.
    fn send_directional_message(
        &self,
        conversation_type: ConversationType,
        target_id: String,
        content: MessageContent,
        user_ids: Vec<String>,
        push_content: Option<String>,
        push_data: Option<String>,
        callback: Box<dyn SendMessageCallback>,
    );
    fn send_image_message(
        &self,
        conversation_type: ConversationType,
        target_id: String,
        content: MessageContent,
        push_content: Option<String>,
        push_data: Option<String>,
        callback: Box<dyn SendMediaMessageCallback>,
    );

    fn get_history_messages(
        &self,
        conversation_type: ConversationType,
        target_id: String,
        oldest_message_id: i64,
        count: i32,
        callback: Box<dyn ResultCallback<Vec<Message>>>,
    );
    fn get_history_messages_by_object_name(
        &self,
        conversation_type: ConversationType,
        target_id: String,
        object_name: String,
        oldest_message_id: i64,
        count: i32,
        callback: Box<dyn ResultCallback<Vec<Message>>>,
    );
    fn get_history_messages_in_direction(
        &self,
        conversation_type: ConversationType,
        target_id: String,
        object_name: String,
        base_message_id: i64,
        count: i32,
        direction: GetMessageDirection,
        callback: Box<dyn ResultCallback<Vec<Message>>>,
    );
    fn get_history_messages_around(
        &self,
        conversation_type: ConversationType,
        target_id: String,
        sent_time: i64,
        before: i32,
        after: i32,
        callback: Box<dyn ResultCallback<Vec<Message>>>,
    );
    fn get_remote_history_messages(
        &self,
        conversation_type: ConversationType,
        target_id: String,
        date_time: i64,
        count: i32,
        callback: Box<dyn ResultCallback<Vec<Message>>>,
    );

    fn clear_messages(
        &self,
        conversation_type: ConversationType,
        target_id: String,
        callback: Box<dyn ResultCallback<bool>>,
    );
    fn delete_messages(
        &self,
        conversation_type: ConversationType,
        target_id: String,
        callback: Box<dyn ResultCallback<bool>>,
    );
    fn delete_messages_by_id(&self, message_ids: Vec<i64>, callback: Box<dyn ResultCallback<bool>>);

    fn search_conversations(
        &self,
        keyword: String,
        conversation_types: Vec<ConversationType>,
        object_names: Vec<String>,
        callback: Box<dyn ResultCallback<Vec<SearchConversationResult>>>,
    );
    fn search_messages(
        &self,
        conversation_type: ConversationType,
        target_id: String,
        keyword: String,
        count: i32,
        begin_time: i64,
        callback: Box<dyn ResultCallback<Vec<Message>>>,
    );

    fn clear_messages_unread_status(
        &self,
        conversation_type: ConversationType,
        target_id: String,
        callback: Box<dyn ResultCallback<bool>>,
    );
    fn clear_messages_unread_status_before(
        &self,
        conversation_type: ConversationType,
        target_id: String,
        timestamp: i64,
        callback: Box<dyn OperationCallback>,
    );
    fn set_message_received_status(
        &self,
        message_id: i64,
        received_status: ReceivedStatus,
        callback: Box<dyn ResultCallback<bool>>,
    );

    fn get_message(&self, message_id: i64, callback: Box<dyn ResultCallback<Message>>);
    fn insert_outgoing_message(
        &self,
        conversation_type: ConversationType,
        target_id: String,
        sent_status: SentStatus,
        content: MessageContent,
        sent_time: i64,
        callback: Box<dyn ResultCallback<Message>>,
    );
    fn insert_incoming_message(
        &self,
        conversation_type: ConversationType,
        target_id: String,
        sender_user_id: String,
        received_status: ReceivedStatus,
        content: MessageContent,
        sent_time: i64,
        callback: Box<dyn ResultCallback<Message>>,
    );

    fn recall_message(
        &self,
        message: Message,
        push_content: Option<String>,
        callback: Box<dyn ResultCallback<RecallNotification>>,
    );

    fn send_read_receipt_request(&self, message: Message, callback: Box<dyn OperationCallback>);
    fn send_read_receipt_response(
        &self,
        conversation_type: ConversationType,
        target_id: String,
        messages: Vec<Message>,
        callback: Box<dyn OperationCallback>,
    );

    fn set_offline_message_duration(&self, days: i32, callback: Box<dyn ResultCallback<i64>>);
    fn get_offline_message_duration(&self, callback: Box<dyn ResultCallback<String>>);

    fn set_receive_message_listener(&self, listener: Option<Box<dyn ReceiveMessageListener>>);
    fn set_recall_message_listener(&self, listener: Option<Box<dyn RecallMessageListener>>);
}

/// Conversation store queries and settings.
pub trait ConversationEngine: Send + Sync {
    fn get_conversation(
        &self,
        conversation_type: ConversationType,
        target_id: String,
        callback: Box<dyn ResultCallback<Conversation>>,
    );
    fn get_conversation_list(&self, callback: Box<dyn ResultCallback<Vec<Conversation>>>);
    fn get_conversation_list_of(
        &self,
        conversation_types: Vec<ConversationType>,
        callback: Box<dyn ResultCallback<Vec<Conversation>>>,
    );
    fn get_conversation_list_by_page(
        &self,
        timestamp: i64,
        count: i32,
        conversation_types: Vec<ConversationType>,
        callback: Box<dyn ResultCallback<Vec<Conversation>>>,
    );
    fn remove_conversation(
        &self,
        conversation_type: ConversationType,
        target_id: String,
        callback: Box<dyn ResultCallback<bool>>,
    );

    fn set_conversation_notification_status(
        &self,
        conversation_type: ConversationType,
        target_id: String,
        status: NotificationStatus,
        callback: Box<dyn ResultCallback<NotificationStatus>>,
    );
    fn get_conversation_notification_status(
        &self,
        conversation_type: ConversationType,
        target_id: String,
        callback: Box<dyn ResultCallback<NotificationStatus>>,
    );
    fn set_notification_quiet_hours(
        &self,
        start_time: String,
        span_minutes: i32,
        callback: Box<dyn OperationCallback>,
    );
    fn remove_notification_quiet_hours(&self, callback: Box<dyn OperationCallback>);

    fn save_text_message_draft(
        &self,
        conversation_type: ConversationType,
        target_id: String,
        content: String,
        callback: Box<dyn ResultCallback<bool>>,
    );
    fn get_text_message_draft(
        &self,
        conversation_type: ConversationType,
        target_id: String,
        callback: Box<dyn ResultCallback<String>>,
    );
    fn clear_text_message_draft(
        &self,
        conversation_type: ConversationType,
        target_id: String,
        callback: Box<dyn ResultCallback<bool>>,
    );

    fn set_conversation_to_top(
        &self,
        conversation_type: ConversationType,
        target_id: String,
        is_top: bool,
        callback: Box<dyn ResultCallback<bool>>,
    );

    fn get_total_unread_count(&self, callback: Box<dyn ResultCallback<i32>>);
    fn get_total_unread_count_of(
        &self,
        conversations: Vec<Conversation>,
        callback: Box<dyn ResultCallback<i32>>,
    );
    fn get_unread_count(
        &self,
        conversation_types: Vec<ConversationType>,
        callback: Box<dyn ResultCallback<i32>>,
    );

    fn sync_conversation_read_status(
        &self,
        conversation_type: ConversationType,
        target_id: String,
        timestamp: i64,
        callback: Box<dyn OperationCallback>,
    );
    fn set_sync_read_status_listener(&self, listener: Option<Box<dyn SyncReadStatusListener>>);
    fn set_typing_status_listener(&self, listener: Option<Box<dyn TypingStatusListener>>);
}

/// Chat room membership and history.
pub trait ChatRoomEngine: Send + Sync {
    /// Joins, creating the room if it does not exist.
    fn join_chat_room(&self, room_id: String, message_count: i32, callback: Box<dyn OperationCallback>);
    /// Joins only if the room already exists.
    fn join_exist_chat_room(
        &self,
        room_id: String,
        message_count: i32,
        callback: Box<dyn OperationCallback>,
    );
    fn quit_chat_room(&self, room_id: String, callback: Box<dyn OperationCallback>);
    fn get_chat_room_info(
        &self,
        room_id: String,
        member_count: i32,
        order: ChatRoomMemberOrder,
        callback: Box<dyn ResultCallback<ChatRoomInfo>>,
    );
    fn get_chat_room_history_messages(
        &self,
        room_id: String,
        record_time: i64,
        count: i32,
        order: TimestampOrder,
        callback: Box<dyn ChatRoomHistoryCallback>,
    );
    fn set_chat_room_action_listener(&self, listener: Option<Box<dyn ChatRoomActionListener>>);
}

/// Discussion group management.
pub trait DiscussionEngine: Send + Sync {
    fn get_discussion(&self, discussion_id: String, callback: Box<dyn ResultCallback<Discussion>>);
    fn create_discussion(
        &self,
        name: String,
        user_ids: Vec<String>,
        callback: Box<dyn ResultCallback<String>>,
    );
    fn set_discussion_name(
        &self,
        discussion_id: String,
        name: String,
        callback: Box<dyn OperationCallback>,
    );
    fn add_member_to_discussion(
        &self,
        discussion_id: String,
        user_ids: Vec<String>,
        callback: Box<dyn OperationCallback>,
    );
    fn remove_member_from_discussion(
        &self,
        discussion_id: String,
        user_id: String,
        callback: Box<dyn OperationCallback>,
    );
    fn quit_discussion(&self, discussion_id: String, callback: Box<dyn OperationCallback>);
}

/// Blacklist management.
pub trait BlacklistEngine: Send + Sync {
    fn add_to_blacklist(&self, user_id: String, callback: Box<dyn OperationCallback>);
    fn remove_from_blacklist(&self, user_id: String, callback: Box<dyn OperationCallback>);
    fn get_blacklist_status(
        &self,
        user_id: String,
        callback: Box<dyn ResultCallback<BlacklistStatus>>,
    );
    fn get_blacklist(&self, callback: Box<dyn ResultCallback<Vec<String>>>);
}

/// Media attachment downloads.
pub trait MediaEngine: Send + Sync {
    fn download_media(
        &self,
        conversation_type: ConversationType,
        target_id: String,
        media_type: MediaType,
        url: String,
        callback: Box<dyn DownloadMediaCallback>,
    );
}

/// The complete engine surface the reactive client is built over.
pub trait ImEngine:
    ConnectionEngine
    + MessageEngine
    + ConversationEngine
    + ChatRoomEngine
    + DiscussionEngine
    + BlacklistEngine
    + MediaEngine
    + 'static
{
}

impl<T> ImEngine for T where
    T: ConnectionEngine
        + MessageEngine
        + ConversationEngine
        + ChatRoomEngine
        + DiscussionEngine
        + BlacklistEngine
        + MediaEngine
        + 'static
{
}
