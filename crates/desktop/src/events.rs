//! Session change notifications for UI subscribers.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Mutex;
use std::time::Duration;

use assetology_core::Session;

/// A committed change to the live session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedIn(Session),
    ProfileUpdated(Session),
    LoggedOut,
}

/// A subscription to session changes.
///
/// Each subscription receives every event published after it was created,
/// in publication order.
#[derive(Debug)]
pub struct Subscription {
    receiver: Receiver<SessionEvent>,
}

impl Subscription {
    /// Try to receive an event without blocking.
    pub fn try_recv(&self) -> Result<SessionEvent, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for an event.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<SessionEvent, RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Drain everything currently queued.
    pub fn drain(&self) -> Vec<SessionEvent> {
        self.receiver.try_iter().collect()
    }
}

/// Fan-out of [`SessionEvent`]s.
///
/// - No IO / no async
/// - Dropped subscriptions are pruned on the next publish
#[derive(Debug, Default)]
pub struct SessionEvents {
    subscribers: Mutex<Vec<Sender<SessionEvent>>>,
}

impl SessionEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, event: SessionEvent) {
        let Ok(mut subs) = self.subscribers.lock() else {
            tracing::error!("session event subscribers lock poisoned; event dropped");
            return;
        };
        subs.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::channel();

        // A poisoned lock still yields a (silent) subscription.
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }

        Subscription { receiver: rx }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|subs| subs.len()).unwrap_or(0)
    }
}
