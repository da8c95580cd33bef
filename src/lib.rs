//! # rx-imlib
//!
//! Reactive stream bindings over a callback-based instant-messaging client
//! SDK.
//!
//! The wrapped engine reports every outcome through side-effecting callback
//! objects invoked from its own worker threads. This crate renders that
//! surface as three reactive shapes:
//!
//! - [`Completion`](rx::Completion) — completes or fails, no value.
//! - [`Single<T>`](rx::Single) — one value or a failure.
//! - [`Flow<T>`](rx::Flow) — progress or event emissions, then at most one
//!   terminal completion or failure; persistent listeners are `Flow`s that
//!   only end when cancelled.
//!
//! Every operation is lazy: nothing reaches the engine until the handle is
//! subscribed (or `.await`ed), each subscription starts the engine call
//! exactly once, and cancelling a subscription suppresses all further
//! emissions and releases any engine listener slot it occupied. The crate
//! adds no scheduling, no retries and no state of its own — connection
//! management, storage and delivery guarantees all live inside the engine.
//!
//! ## Quick start
//!
//! ```no_run
//! use futures::StreamExt;
//! use rx_imlib::{ConversationType, MessageContent, RxImClient};
//!
//! # async fn demo(client: &RxImClient) -> rx_imlib::Result<()> {
//! // Connect, then send a text message.
//! let user_id = client.connection().connect("server-issued-token").await?;
//! println!("connected as {user_id}");
//!
//! let sent = client
//!     .messages()
//!     .send_message(
//!         ConversationType::Private,
//!         "peer-id",
//!         MessageContent::Text { content: "hello".into() },
//!         None,
//!         None,
//!     )
//!     .await?;
//! println!("delivered as {}", sent.message_id);
//!
//! // Watch incoming messages until the stream is dropped.
//! let mut incoming = client.messages().incoming().subscribe();
//! while let Some(received) = incoming.next().await {
//!     let received = received?;
//!     println!("{}: {:?}", received.message.sender_user_id, received.message.content);
//! }
//! # Ok(())
//! # }
//! ```

pub mod blacklist;
pub mod chat_room;
pub mod client;
pub mod connection;
pub mod conversation;
pub mod discussion;
pub mod engine;
pub mod error;
pub mod media;
pub mod message;
pub mod rx;
pub mod types;

mod bridge;

pub use client::{ImConfig, RxImClient};
pub use error::{ErrorCode, ImError, Result};
pub use rx::{Completion, EventStream, Flow, Single, Subscription};
pub use types::*;
