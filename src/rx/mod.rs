//! Reactive primitives bridging callback lifecycles to stream lifecycles.
//!
//! Three shapes cover the whole engine surface:
//!
//! - [`Completion`] — completes or fails, carries no value.
//! - [`Single`] — resolves to one value or a failure.
//! - [`Flow`] — zero or more non-terminal emissions, then at most one
//!   terminal completion or failure. Persistent listeners are `Flow`s that
//!   never finish on their own; cancellation is what ends them.
//!
//! All three obey the same laws. A handle is lazy: the start function runs
//! exactly once, at subscribe time, with an emitter bound to that one
//! subscription. At most one terminal event is ever delivered. Disposing
//! the subscription suppresses every later emission — the engine may keep
//! invoking the callback, nothing reaches the consumer — and runs the
//! registered dispose action, which is where persistent listeners clear
//! their engine slot.

mod completion;
mod flow;
mod single;
mod subscription;

pub use completion::{Completion, CompletionEmitter, CompletionFuture};
pub use flow::{EventStream, Flow, FlowEmitter};
pub use single::{Single, SingleEmitter, SingleFuture};
pub use subscription::Subscription;
