//! Shared test support: a scriptable engine stub.
//!
//! The stub records every engine entry point it sees, captures the callback
//! objects the adapter hands it, and lets tests fire those callbacks after
//! the fact — the same way the real engine would from one of its worker
//! threads. Listener slots count their `None` clears so tests can assert
//! release behavior.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use rx_imlib::engine::*;
use rx_imlib::types::*;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("trace")
        .with_test_writer()
        .try_init();
}

/// A plain text message for driving send and history scenarios.
pub fn text_message(message_id: i64, body: &str) -> Message {
    Message {
        message_id,
        conversation_type: ConversationType::Private,
        target_id: "peer-1".into(),
        sender_user_id: "user-1".into(),
        direction: MessageDirection::Send,
        received_status: ReceivedStatus::Unread,
        sent_status: SentStatus::Sending,
        sent_time: 1_700_000_000_000 + message_id,
        received_time: 0,
        content: MessageContent::Text {
            content: body.into(),
        },
        extra: None,
    }
}

fn store_listener<L: ?Sized>(
    slot: &Mutex<Option<Box<L>>>,
    listener: Option<Box<L>>,
    cleared: &Mutex<Vec<&'static str>>,
    kind: &'static str,
) {
    if listener.is_none() {
        cleared.lock().unwrap().push(kind);
    }
    *slot.lock().unwrap() = listener;
}

#[derive(Default)]
pub struct StubEngine {
    /// Engine entry points in invocation order.
    pub calls: Mutex<Vec<String>>,
    /// Listener kinds cleared with `None`, in order.
    pub cleared: Mutex<Vec<&'static str>>,

    // Captured one-shot callbacks, by shape.
    pub operation_callbacks: Mutex<Vec<Box<dyn OperationCallback>>>,
    pub connect_callbacks: Mutex<Vec<Box<dyn ConnectCallback>>>,
    pub send_callbacks: Mutex<Vec<Box<dyn SendMessageCallback>>>,
    pub send_media_callbacks: Mutex<Vec<Box<dyn SendMediaMessageCallback>>>,
    pub download_callbacks: Mutex<Vec<Box<dyn DownloadMediaCallback>>>,
    pub chat_room_history_callbacks: Mutex<Vec<Box<dyn ChatRoomHistoryCallback>>>,

    pub bool_callbacks: Mutex<Vec<Box<dyn ResultCallback<bool>>>>,
    pub i32_callbacks: Mutex<Vec<Box<dyn ResultCallback<i32>>>>,
    pub i64_callbacks: Mutex<Vec<Box<dyn ResultCallback<i64>>>>,
    pub string_callbacks: Mutex<Vec<Box<dyn ResultCallback<String>>>>,
    pub string_list_callbacks: Mutex<Vec<Box<dyn ResultCallback<Vec<String>>>>>,
    pub message_callbacks: Mutex<Vec<Box<dyn ResultCallback<Message>>>>,
    pub message_list_callbacks: Mutex<Vec<Box<dyn ResultCallback<Vec<Message>>>>>,
    pub conversation_callbacks: Mutex<Vec<Box<dyn ResultCallback<Conversation>>>>,
    pub conversation_list_callbacks: Mutex<Vec<Box<dyn ResultCallback<Vec<Conversation>>>>>,
    pub notification_status_callbacks: Mutex<Vec<Box<dyn ResultCallback<NotificationStatus>>>>,
    pub blacklist_status_callbacks: Mutex<Vec<Box<dyn ResultCallback<BlacklistStatus>>>>,
    pub chat_room_info_callbacks: Mutex<Vec<Box<dyn ResultCallback<ChatRoomInfo>>>>,
    pub discussion_callbacks: Mutex<Vec<Box<dyn ResultCallback<Discussion>>>>,
    pub search_result_callbacks:
        Mutex<Vec<Box<dyn ResultCallback<Vec<SearchConversationResult>>>>>,
    pub recall_callbacks: Mutex<Vec<Box<dyn ResultCallback<RecallNotification>>>>,

    // Listener slots, one per kind, as the real engine keeps them.
    pub receive_listener: Mutex<Option<Box<dyn ReceiveMessageListener>>>,
    pub recall_listener: Mutex<Option<Box<dyn RecallMessageListener>>>,
    pub typing_listener: Mutex<Option<Box<dyn TypingStatusListener>>>,
    pub sync_read_listener: Mutex<Option<Box<dyn SyncReadStatusListener>>>,
    pub chat_room_listener: Mutex<Option<Box<dyn ChatRoomActionListener>>>,
    pub connection_listener: Mutex<Option<Box<dyn ConnectionStatusListener>>>,
    pub log_listener: Mutex<Option<Box<dyn LogListener>>>,
}

impl StubEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn record(&self, name: &str) {
        self.calls.lock().unwrap().push(name.to_string());
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| *call == name)
            .count()
    }

    pub fn cleared_count(&self, kind: &str) -> usize {
        self.cleared
            .lock()
            .unwrap()
            .iter()
            .filter(|cleared| **cleared == kind)
            .count()
    }
}

impl ConnectionEngine for StubEngine {
    fn init(&self, _app_key: Option<String>) {
        self.record("init");
    }

    fn connect(&self, _token: String, callback: Box<dyn ConnectCallback>) {
        self.record("connect");
        self.connect_callbacks.lock().unwrap().push(callback);
    }

    fn disconnect(&self) {
        self.record("disconnect");
    }

    fn logout(&self) {
        self.record("logout");
    }

    fn set_connection_status_listener(&self, listener: Option<Box<dyn ConnectionStatusListener>>) {
        self.record("set_connection_status_listener");
        store_listener(
            &self.connection_listener,
            listener,
            &self.cleared,
            "connection_status",
        );
    }

    fn set_log_listener(&self, listener: Option<Box<dyn LogListener>>) {
        self.record("set_log_listener");
        store_listener(&self.log_listener, listener, &self.cleared, "log");
    }
}

impl MessageEngine for StubEngine {
    fn send_message(
        &self,
        _conversation_type: ConversationType,
        _target_id: String,
        _content: MessageContent,
        _push_content: Option<String>,
        _push_data: Option<String>,
        callback: Box<dyn SendMessageCallback>,
    ) {
        self.record("send_message");
        self.send_callbacks.lock().unwrap().push(callback);
    }

    fn send(
        &self,
        _message: Message,
        _push_content: Option<String>,
        _push_data: Option<String>,
        callback: Box<dyn SendMessageCallback>,
    ) {
        self.record("send");
        self.send_callbacks.lock().unwrap().push(callback);
    }

    fn send_location_message(
        &self,
        _message: Message,
        _push_content: Option<String>,
        _push_data: Option<String>,
        callback: Box<dyn SendMessageCallback>,
    ) {
        self.record("send_location_message");
        self.send_callbacks.lock().unwrap().push(callback);
    }

    fn send_directional_message(
        &self,
        _conversation_type: ConversationType,
        _target_id: String,
        _content: MessageContent,
        _user_ids: Vec<String>,
        _push_content: Option<String>,
        _push_data: Option<String>,
        callback: Box<dyn SendMessageCallback>,
    ) {
        self.record("send_directional_message");
        self.send_callbacks.lock().unwrap().push(callback);
    }

    fn send_image_message(
        &self,
        _conversation_type: ConversationType,
        _target_id: String,
        _content: MessageContent,
        _push_content: Option<String>,
        _push_data: Option<String>,
        callback: Box<dyn SendMediaMessageCallback>,
    ) {
        self.record("send_image_message");
        self.send_media_callbacks.lock().unwrap().push(callback);
    }

    fn get_history_messages(
        &self,
        _conversation_type: ConversationType,
        _target_id: String,
        _oldest_message_id: i64,
        _count: i32,
        callback: Box<dyn ResultCallback<Vec<Message>>>,
    ) {
        self.record("get_history_messages");
        self.message_list_callbacks.lock().unwrap().push(callback);
    }

    fn get_history_messages_by_object_name(
        &self,
        _conversation_type: ConversationType,
        _target_id: String,
        _object_name: String,
        _oldest_message_id: i64,
        _count: i32,
        callback: Box<dyn ResultCallback<Vec<Message>>>,
    ) {
        self.record("get_history_messages_by_object_name");
        self.message_list_callbacks.lock().unwrap().push(callback);
    }

    fn get_history_messages_in_direction(
        &self,
        _conversation_type: ConversationType,
        _target_id: String,
        _object_name: String,
        _base_message_id: i64,
        _count: i32,
        _direction: GetMessageDirection,
        callback: Box<dyn ResultCallback<Vec<Message>>>,
    ) {
        self.record("get_history_messages_in_direction");
        self.message_list_callbacks.lock().unwrap().push(callback);
    }

    fn get_history_messages_around(
        &self,
        _conversation_type: ConversationType,
        _target_id: String,
        _sent_time: i64,
        _before: i32,
        _after: i32,
        callback: Box<dyn ResultCallback<Vec<Message>>>,
    ) {
        self.record("get_history_messages_around");
        self.message_list_callbacks.lock().unwrap().push(callback);
    }

    fn get_remote_history_messages(
        &self,
        _conversation_type: ConversationType,
        _target_id: String,
        _date_time: i64,
        _count: i32,
        callback: Box<dyn ResultCallback<Vec<Message>>>,
    ) {
        self.record("get_remote_history_messages");
        self.message_list_callbacks.lock().unwrap().push(callback);
    }

    fn clear_messages(
        &self,
        _conversation_type: ConversationType,
        _target_id: String,
        callback: Box<dyn ResultCallback<bool>>,
    ) {
        self.record("clear_messages");
        self.bool_callbacks.lock().unwrap().push(callback);
    }

    fn delete_messages(
        &self,
        _conversation_type: ConversationType,
        _target_id: String,
        callback: Box<dyn ResultCallback<bool>>,
    ) {
        self.record("delete_messages");
        self.bool_callbacks.lock().unwrap().push(callback);
    }

    fn delete_messages_by_id(
        &self,
        _message_ids: Vec<i64>,
        callback: Box<dyn ResultCallback<bool>>,
    ) {
        self.record("delete_messages_by_id");
        self.bool_callbacks.lock().unwrap().push(callback);
    }

    fn search_conversations(
        &self,
        _keyword: String,
        _conversation_types: Vec<ConversationType>,
        _object_names: Vec<String>,
        callback: Box<dyn ResultCallback<Vec<SearchConversationResult>>>,
    ) {
        self.record("search_conversations");
        self.search_result_callbacks.lock().unwrap().push(callback);
    }

    fn search_messages(
        &self,
        _conversation_type: ConversationType,
        _target_id: String,
        _keyword: String,
        _count: i32,
        _begin_time: i64,
        callback: Box<dyn ResultCallback<Vec<Message>>>,
    ) {
        self.record("search_messages");
        self.message_list_callbacks.lock().unwrap().push(callback);
    }

    fn clear_messages_unread_status(
        &self,
        _conversation_type: ConversationType,
        _target_id: String,
        callback: Box<dyn ResultCallback<bool>>,
    ) {
        self.record("clear_messages_unread_status");
        self.bool_callbacks.lock().unwrap().push(callback);
    }

    fn clear_messages_unread_status_before(
        &self,
        _conversation_type: ConversationType,
        _target_id: String,
        _timestamp: i64,
        callback: Box<dyn OperationCallback>,
    ) {
        self.record("clear_messages_unread_status_before");
        self.operation_callbacks.lock().unwrap().push(callback);
    }

    fn set_message_received_status(
        &self,
        _message_id: i64,
        _received_status: ReceivedStatus,
        callback: Box<dyn ResultCallback<bool>>,
    ) {
        self.record("set_message_received_status");
        self.bool_callbacks.lock().unwrap().push(callback);
    }

    fn get_message(&self, _message_id: i64, callback: Box<dyn ResultCallback<Message>>) {
        self.record("get_message");
        self.message_callbacks.lock().unwrap().push(callback);
    }

    fn insert_outgoing_message(
        &self,
        _conversation_type: ConversationType,
        _target_id: String,
        _sent_status: SentStatus,
        _content: MessageContent,
        _sent_time: i64,
        callback: Box<dyn ResultCallback<Message>>,
    ) {
        self.record("insert_outgoing_message");
        self.message_callbacks.lock().unwrap().push(callback);
    }

    fn insert_incoming_message(
        &self,
        _conversation_type: ConversationType,
        _target_id: String,
        _sender_user_id: String,
        _received_status: ReceivedStatus,
        _content: MessageContent,
        _sent_time: i64,
        callback: Box<dyn ResultCallback<Message>>,
    ) {
        self.record("insert_incoming_message");
        self.message_callbacks.lock().unwrap().push(callback);
    }

    fn recall_message(
        &self,
        _message: Message,
        _push_content: Option<String>,
        callback: Box<dyn ResultCallback<RecallNotification>>,
    ) {
        self.record("recall_message");
        self.recall_callbacks.lock().unwrap().push(callback);
    }

    fn send_read_receipt_request(&self, _message: Message, callback: Box<dyn OperationCallback>) {
        self.record("send_read_receipt_request");
        self.operation_callbacks.lock().unwrap().push(callback);
    }

    fn send_read_receipt_response(
        &self,
        _conversation_type: ConversationType,
        _target_id: String,
        _messages: Vec<Message>,
        callback: Box<dyn OperationCallback>,
    ) {
        self.record("send_read_receipt_response");
        self.operation_callbacks.lock().unwrap().push(callback);
    }

    fn set_offline_message_duration(&self, _days: i32, callback: Box<dyn ResultCallback<i64>>) {
        self.record("set_offline_message_duration");
        self.i64_callbacks.lock().unwrap().push(callback);
    }

    fn get_offline_message_duration(&self, callback: Box<dyn ResultCallback<String>>) {
        self.record("get_offline_message_duration");
        self.string_callbacks.lock().unwrap().push(callback);
    }

    fn set_receive_message_listener(&self, listener: Option<Box<dyn ReceiveMessageListener>>) {
        self.record("set_receive_message_listener");
        store_listener(&self.receive_listener, listener, &self.cleared, "receive");
    }

    fn set_recall_message_listener(&self, listener: Option<Box<dyn RecallMessageListener>>) {
        self.record("set_recall_message_listener");
        store_listener(&self.recall_listener, listener, &self.cleared, "recall");
    }
}

impl ConversationEngine for StubEngine {
    fn get_conversation(
        &self,
        _conversation_type: ConversationType,
        _target_id: String,
        callback: Box<dyn ResultCallback<Conversation>>,
    ) {
        self.record("get_conversation");
        self.conversation_callbacks.lock().unwrap().push(callback);
    }

    fn get_conversation_list(&self, callback: Box<dyn ResultCallback<Vec<Conversation>>>) {
        self.record("get_conversation_list");
        self.conversation_list_callbacks
            .lock()
            .unwrap()
            .push(callback);
    }

    fn get_conversation_list_of(
        &self,
        _conversation_types: Vec<ConversationType>,
        callback: Box<dyn ResultCallback<Vec<Conversation>>>,
    ) {
        self.record("get_conversation_list_of");
        self.conversation_list_callbacks
            .lock()
            .unwrap()
            .push(callback);
    }

    fn get_conversation_list_by_page(
        &self,
        _timestamp: i64,
        _count: i32,
        _conversation_types: Vec<ConversationType>,
        callback: Box<dyn ResultCallback<Vec<Conversation>>>,
    ) {
        self.record("get_conversation_list_by_page");
        self.conversation_list_callbacks
            .lock()
            .unwrap()
            .push(callback);
    }

    fn remove_conversation(
        &self,
        _conversation_type: ConversationType,
        _target_id: String,
        callback: Box<dyn ResultCallback<bool>>,
    ) {
        self.record("remove_conversation");
        self.bool_callbacks.lock().unwrap().push(callback);
    }

    fn set_conversation_notification_status(
        &self,
        _conversation_type: ConversationType,
        _target_id: String,
        _status: NotificationStatus,
        callback: Box<dyn ResultCallback<NotificationStatus>>,
    ) {
        self.record("set_conversation_notification_status");
        self.notification_status_callbacks
            .lock()
            .unwrap()
            .push(callback);
    }

    fn get_conversation_notification_status(
        &self,
        _conversation_type: ConversationType,
        _target_id: String,
        callback: Box<dyn ResultCallback<NotificationStatus>>,
    ) {
        self.record("get_conversation_notification_status");
        self.notification_status_callbacks
            .lock()
            .unwrap()
            .push(callback);
    }

    fn set_notification_quiet_hours(
        &self,
        _start_time: String,
        _span_minutes: i32,
        callback: Box<dyn OperationCallback>,
    ) {
        self.record("set_notification_quiet_hours");
        self.operation_callbacks.lock().unwrap().push(callback);
    }

    fn remove_notification_quiet_hours(&self, callback: Box<dyn OperationCallback>) {
        self.record("remove_notification_quiet_hours");
        self.operation_callbacks.lock().unwrap().push(callback);
    }

    fn save_text_message_draft(
        &self,
        _conversation_type: ConversationType,
        _target_id: String,
        _content: String,
        callback: Box<dyn ResultCallback<bool>>,
    ) {
        self.record("save_text_message_draft");
        self.bool_callbacks.lock().unwrap().push(callback);
    }

    fn get_text_message_draft(
        &self,
        _conversation_type: ConversationType,
        _target_id: String,
        callback: Box<dyn ResultCallback<String>>,
    ) {
        self.record("get_text_message_draft");
        self.string_callbacks.lock().unwrap().push(callback);
    }

    fn clear_text_message_draft(
        &self,
        _conversation_type: ConversationType,
        _target_id: String,
        callback: Box<dyn ResultCallback<bool>>,
    ) {
        self.record("clear_text_message_draft");
        self.bool_callbacks.lock().unwrap().push(callback);
    }

    fn set_conversation_to_top(
        &self,
        _conversation_type: ConversationType,
        _target_id: String,
        _is_top: bool,
        callback: Box<dyn ResultCallback<bool>>,
    ) {
        self.record("set_conversation_to_top");
        self.bool_callbacks.lock().unwrap().push(callback);
    }

    fn get_total_unread_count(&self, callback: Box<dyn ResultCallback<i32>>) {
        self.record("get_total_unread_count");
        self.i32_callbacks.lock().unwrap().push(callback);
    }

    fn get_total_unread_count_of(
        &self,
        _conversations: Vec<Conversation>,
        callback: Box<dyn ResultCallback<i32>>,
    ) {
        self.record("get_total_unread_count_of");
        self.i32_callbacks.lock().unwrap().push(callback);
    }

    fn get_unread_count(
        &self,
        _conversation_types: Vec<ConversationType>,
        callback: Box<dyn ResultCallback<i32>>,
    ) {
        self.record("get_unread_count");
        self.i32_callbacks.lock().unwrap().push(callback);
    }

    fn sync_conversation_read_status(
        &self,
        _conversation_type: ConversationType,
        _target_id: String,
        _timestamp: i64,
        callback: Box<dyn OperationCallback>,
    ) {
        self.record("sync_conversation_read_status");
        self.operation_callbacks.lock().unwrap().push(callback);
    }

    fn set_sync_read_status_listener(&self, listener: Option<Box<dyn SyncReadStatusListener>>) {
        self.record("set_sync_read_status_listener");
        store_listener(
            &self.sync_read_listener,
            listener,
            &self.cleared,
            "sync_read",
        );
    }

    fn set_typing_status_listener(&self, listener: Option<Box<dyn TypingStatusListener>>) {
        self.record("set_typing_status_listener");
        store_listener(&self.typing_listener, listener, &self.cleared, "typing");
    }
}

impl ChatRoomEngine for StubEngine {
    fn join_chat_room(
        &self,
        _room_id: String,
        _message_count: i32,
        callback: Box<dyn OperationCallback>,
    ) {
        self.record("join_chat_room");
        self.operation_callbacks.lock().unwrap().push(callback);
    }

    fn join_exist_chat_room(
        &self,
        _room_id: String,
        _message_count: i32,
        callback: Box<dyn OperationCallback>,
    ) {
        self.record("join_exist_chat_room");
        self.operation_callbacks.lock().unwrap().push(callback);
    }

    fn quit_chat_room(&self, _room_id: String, callback: Box<dyn OperationCallback>) {
        self.record("quit_chat_room");
        self.operation_callbacks.lock().unwrap().push(callback);
    }

    fn get_chat_room_info(
        &self,
        _room_id: String,
        _member_count: i32,
        _order: ChatRoomMemberOrder,
        callback: Box<dyn ResultCallback<ChatRoomInfo>>,
    ) {
        self.record("get_chat_room_info");
        self.chat_room_info_callbacks.lock().unwrap().push(callback);
    }

    fn get_chat_room_history_messages(
        &self,
        _room_id: String,
        _record_time: i64,
        _count: i32,
        _order: TimestampOrder,
        callback: Box<dyn ChatRoomHistoryCallback>,
    ) {
        self.record("get_chat_room_history_messages");
        self.chat_room_history_callbacks
            .lock()
            .unwrap()
            .push(callback);
    }

    fn set_chat_room_action_listener(&self, listener: Option<Box<dyn ChatRoomActionListener>>) {
        self.record("set_chat_room_action_listener");
        store_listener(
            &self.chat_room_listener,
            listener,
            &self.cleared,
            "chat_room_action",
        );
    }
}

impl DiscussionEngine for StubEngine {
    fn get_discussion(&self, _discussion_id: String, callback: Box<dyn ResultCallback<Discussion>>) {
        self.record("get_discussion");
        self.discussion_callbacks.lock().unwrap().push(callback);
    }

    fn create_discussion(
        &self,
        _name: String,
        _user_ids: Vec<String>,
        callback: Box<dyn ResultCallback<String>>,
    ) {
        self.record("create_discussion");
        self.string_callbacks.lock().unwrap().push(callback);
    }

    fn set_discussion_name(
        &self,
        _discussion_id: String,
        _name: String,
        callback: Box<dyn OperationCallback>,
    ) {
        self.record("set_discussion_name");
        self.operation_callbacks.lock().unwrap().push(callback);
    }

    fn add_member_to_discussion(
        &self,
        _discussion_id: String,
        _user_ids: Vec<String>,
        callback: Box<dyn OperationCallback>,
    ) {
        self.record("add_member_to_discussion");
        self.operation_callbacks.lock().unwrap().push(callback);
    }

    fn remove_member_from_discussion(
        &self,
        _discussion_id: String,
        _user_id: String,
        callback: Box<dyn OperationCallback>,
    ) {
        self.record("remove_member_from_discussion");
        self.operation_callbacks.lock().unwrap().push(callback);
    }

    fn quit_discussion(&self, _discussion_id: String, callback: Box<dyn OperationCallback>) {
        self.record("quit_discussion");
        self.operation_callbacks.lock().unwrap().push(callback);
    }
}

impl BlacklistEngine for StubEngine {
    fn add_to_blacklist(&self, _user_id: String, callback: Box<dyn OperationCallback>) {
        self.record("add_to_blacklist");
        self.operation_callbacks.lock().unwrap().push(callback);
    }

    fn remove_from_blacklist(&self, _user_id: String, callback: Box<dyn OperationCallback>) {
        self.record("remove_from_blacklist");
        self.operation_callbacks.lock().unwrap().push(callback);
    }

    fn get_blacklist_status(
        &self,
        _user_id: String,
        callback: Box<dyn ResultCallback<BlacklistStatus>>,
    ) {
        self.record("get_blacklist_status");
        self.blacklist_status_callbacks
            .lock()
            .unwrap()
            .push(callback);
    }

    fn get_blacklist(&self, callback: Box<dyn ResultCallback<Vec<String>>>) {
        self.record("get_blacklist");
        self.string_list_callbacks.lock().unwrap().push(callback);
    }
}

impl MediaEngine for StubEngine {
    fn download_media(
        &self,
        _conversation_type: ConversationType,
        _target_id: String,
        _media_type: MediaType,
        _url: String,
        callback: Box<dyn DownloadMediaCallback>,
    ) {
        self.record("download_media");
        self.download_callbacks.lock().unwrap().push(callback);
    }
}
