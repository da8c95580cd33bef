//! Per-subscription disposal state.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

type DisposeAction = Box<dyn FnOnce() + Send>;

#[derive(Default)]
struct State {
    disposed: AtomicBool,
    on_dispose: Mutex<Option<DisposeAction>>,
}

/// Handle over one outstanding bridged operation.
///
/// The disposed flag is the only cross-thread shared state in the adapter:
/// whichever thread cancels writes it, the engine thread delivering
/// callbacks reads it. It moves `false → true` exactly once and terminal
/// states are never left.
#[derive(Clone, Default)]
pub struct Subscription {
    state: Arc<State>,
}

impl Subscription {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Whether the consumer has cancelled this operation.
    pub fn is_disposed(&self) -> bool {
        self.state.disposed.load(Ordering::Acquire)
    }

    /// Cancel the operation: every later emission is suppressed and the
    /// registered dispose action runs. Idempotent; the action runs at most
    /// once. Cancellation is cooperative — in-flight engine work is not
    /// interrupted, its outcome is dropped on arrival.
    pub fn dispose(&self) {
        if self.state.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        let action = self
            .state
            .on_dispose
            .lock()
            .ok()
            .and_then(|mut slot| slot.take());
        if let Some(action) = action {
            tracing::trace!("running dispose action");
            action();
        }
    }

    /// Register the action that releases whatever the start function
    /// acquired — typically an engine listener slot. Registering on an
    /// already-disposed subscription runs the action immediately, so
    /// release happens on every exit path.
    pub(crate) fn set_on_dispose(&self, action: DisposeAction) {
        if let Ok(mut slot) = self.state.on_dispose.lock() {
            if !self.is_disposed() {
                *slot = Some(action);
                return;
            }
        }
        action();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
