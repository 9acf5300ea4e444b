//! Observable holder of the current [`SessionState`].
//!
//! The store keeps the latest value plus one channel per subscriber. A write
//! replaces the value and fans it out while holding the same lock, so every
//! subscriber sees the same total order of transitions. New subscribers get
//! the latest value first (replay-1) and then the live tail. Transitions are
//! never coalesced.

use crate::session::state::{Credential, SessionState};
use crate::transport::AccessTokenSource;
use parking_lot::Mutex;
use secrecy::SecretString;
use tokio::sync::mpsc;
use tracing::trace;

#[derive(Default)]
struct Inner {
    state: SessionState,
    subscribers: Vec<mpsc::UnboundedSender<SessionState>>,
    /// Bumped by every logout; refreshes started under an older value are stale.
    logout_epoch: u64,
}

impl Inner {
    fn publish(&mut self, next: SessionState) {
        trace!(
            from = self.state.label(),
            to = next.label(),
            "session state transition"
        );
        self.subscribers
            .retain(|subscriber| subscriber.send(next.clone()).is_ok());
        self.state = next;
    }
}

/// Process-wide session state. Shared behind an `Arc`; only
/// [`crate::session::SessionClient`] writes to it.
#[derive(Default)]
pub struct SessionStore {
    inner: Mutex<Inner>,
}

impl SessionStore {
    /// Creates a store in the `Unknown` state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Synchronous snapshot of the latest state.
    #[must_use]
    pub fn current_state(&self) -> SessionState {
        self.inner.lock().state.clone()
    }

    /// Subscribes to state changes, starting with the current value.
    #[must_use]
    pub fn observe(&self) -> Subscription {
        let mut inner = self.inner.lock();
        let (tx, rx) = mpsc::unbounded_channel();
        // The receiver is alive, so this send cannot fail.
        let _ = tx.send(inner.state.clone());
        inner.subscribers.push(tx);
        Subscription { rx }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.lock().state.is_authenticated()
    }

    #[must_use]
    pub fn current_user(&self) -> Option<Credential> {
        self.inner.lock().state.credential().cloned()
    }

    #[must_use]
    pub fn has_any_role<S: AsRef<str>>(&self, required: &[S]) -> bool {
        self.inner.lock().state.has_any_role(required)
    }

    /// Replaces the state and publishes it. Subscribers whose receiver was
    /// dropped are pruned here.
    pub(crate) fn set(&self, next: SessionState) {
        self.inner.lock().publish(next);
    }

    /// Ends the session for good: publishes `Anonymous` and invalidates every
    /// write guarded by an earlier [`SessionStore::logout_epoch`].
    pub(crate) fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.logout_epoch += 1;
        inner.publish(SessionState::Anonymous);
    }

    pub(crate) fn logout_epoch(&self) -> u64 {
        self.inner.lock().logout_epoch
    }

    /// Publishes `next` only if no logout happened since `epoch` was read.
    /// The check and the write share one lock, so a concurrent logout either
    /// lands first and wins or lands after and overwrites.
    pub(crate) fn set_unless_logged_out(&self, epoch: u64, next: SessionState) -> bool {
        let mut inner = self.inner.lock();
        if inner.logout_epoch != epoch {
            return false;
        }
        inner.publish(next);
        true
    }

    #[cfg(test)]
    pub(crate) fn subscriber_count(&self) -> usize {
        self.inner.lock().subscribers.len()
    }
}

impl AccessTokenSource for SessionStore {
    fn current_access_token(&self) -> Option<SecretString> {
        self.inner
            .lock()
            .state
            .credential()
            .map(|credential| credential.access_token().clone())
    }
}

/// Live feed of session transitions for one subscriber.
pub struct Subscription {
    rx: mpsc::UnboundedReceiver<SessionState>,
}

impl Subscription {
    /// Waits for the next state. Returns `None` only once the store is gone.
    pub async fn recv(&mut self) -> Option<SessionState> {
        self.rx.recv().await
    }

    /// Returns the next already-published state without waiting.
    pub fn try_recv(&mut self) -> Option<SessionState> {
        self.rx.try_recv().ok()
    }
}
