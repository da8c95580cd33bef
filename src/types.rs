//! Model types mirrored from the wrapped engine's data model.
//!
//! Plain data carriers. None of these outlives a single logical operation
//! and none holds state of its own; the engine's local store is the source
//! of truth for all of them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of conversation a message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationType {
    Private,
    Group,
    Discussion,
    ChatRoom,
    CustomerService,
    System,
    AppPublicService,
    PublicService,
}

/// Direction of a message relative to the current user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageDirection {
    Send,
    Receive,
}

/// Receipt state of a message on this device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceivedStatus {
    Unread,
    Read,
    Listened,
    Downloaded,
}

/// Delivery state of an outgoing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentStatus {
    Sending,
    Failed,
    Sent,
    Received,
    Read,
    Destroyed,
}

/// Content body of a message.
///
/// Application-defined types travel as [`MessageContent::Custom`] with an
/// opaque JSON payload; the adapter never looks inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessageContent {
    Text {
        content: String,
    },
    Image {
        thumb_uri: Option<String>,
        remote_uri: Option<String>,
        is_full: bool,
    },
    Voice {
        uri: String,
        duration: i32,
    },
    Location {
        latitude: f64,
        longitude: f64,
        poi: Option<String>,
    },
    Custom {
        object_name: String,
        payload: Value,
    },
}

impl MessageContent {
    /// Message type identifier, as used by history and search filters.
    pub fn object_name(&self) -> &str {
        match self {
            MessageContent::Text { .. } => "text",
            MessageContent::Image { .. } => "image",
            MessageContent::Voice { .. } => "voice",
            MessageContent::Location { .. } => "location",
            MessageContent::Custom { object_name, .. } => object_name,
        }
    }
}

/// A message as stored and delivered by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub conversation_type: ConversationType,
    pub target_id: String,
    pub sender_user_id: String,
    pub direction: MessageDirection,
    pub received_status: ReceivedStatus,
    pub sent_status: SentStatus,
    /// Sender-side timestamp in milliseconds.
    pub sent_time: i64,
    /// Receiver-side timestamp in milliseconds; zero for outgoing messages.
    pub received_time: i64,
    pub content: MessageContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
}

/// An incoming message plus the number of messages still queued behind it
/// in the same delivery batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceivedMessage {
    pub message: Message,
    pub remaining: i32,
}

/// Notification setting of a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    DoNotDisturb,
    Notify,
}

/// A conversation summary from the engine's local store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub conversation_type: ConversationType,
    pub target_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub unread_message_count: i32,
    pub is_top: bool,
    /// Sent time of the latest message, milliseconds.
    pub sent_time: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_message: Option<MessageContent>,
}

/// Which side of a base message a history query walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GetMessageDirection {
    /// Messages older than the base message.
    Front,
    /// Messages newer than the base message.
    Behind,
}

/// Ordering of timestamp-keyed history pulls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampOrder {
    Descending,
    Ascending,
}

/// One conversation matched by a keyword search, with its hit count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConversationResult {
    pub conversation: Conversation,
    pub match_count: i32,
}

/// Ordering of the member sample returned with chat room info.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRoomMemberOrder {
    /// Earliest joiners first.
    Ascending,
    /// Latest joiners first.
    Descending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRoomMemberInfo {
    pub user_id: String,
    /// Join timestamp in milliseconds.
    pub join_time: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRoomInfo {
    pub room_id: String,
    pub total_member_count: i32,
    pub members: Vec<ChatRoomMemberInfo>,
    pub member_order: ChatRoomMemberOrder,
}

/// Membership transition reported by the chat room action listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRoomAction {
    Joining,
    Joined,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRoomEvent {
    pub action: ChatRoomAction,
    pub user_id: Option<String>,
}

/// A multi-party discussion group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discussion {
    pub id: String,
    pub name: String,
    pub creator_id: String,
    pub member_ids: Vec<String>,
}

/// Whether a user is on the current user's blacklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlacklistStatus {
    InBlacklist,
    NotInBlacklist,
}

/// One peer currently typing in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypingStatus {
    pub user_id: String,
    /// Message type name the sender declared, e.g. a text or voice tag.
    pub typing_content_type: String,
    pub sent_time: i64,
}

/// Typing activity in one conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTypingStatus {
    pub conversation_type: ConversationType,
    pub target_id: String,
    pub typing: Vec<TypingStatus>,
}

/// Conversation whose unread state was cleared from another device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationInfo {
    pub conversation_type: ConversationType,
    pub target_id: String,
}

/// Placeholder the engine stores in place of a recalled message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecallNotification {
    pub operator_id: String,
    pub recall_time: i64,
    pub original_object_name: String,
}

/// A recall observed through the recall listener.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecalled {
    pub message: Message,
    pub recall_notification: RecallNotification,
}

/// Connection state reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Connected,
    Connecting,
    Disconnected,
    NetworkUnavailable,
    KickedOfflineByOtherClient,
    TokenIncorrect,
    ServerInvalid,
}

/// Kind of media attachment to download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Image,
    Audio,
    Video,
    File,
}

/// Events emitted while a media-bearing message is sent.
///
/// Zero or more `Attached`/`Progress` events precede exactly one `Sent`,
/// after which the stream closes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SendMediaEvent {
    /// The message was stored locally and queued for upload.
    Attached(Message),
    Progress { message: Message, progress: u8 },
    Sent(Message),
}

/// Events emitted while a piece of media downloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadEvent {
    Progress(u8),
    /// Terminal event; the engine may or may not report a media id.
    Done { media_id: Option<String> },
}
