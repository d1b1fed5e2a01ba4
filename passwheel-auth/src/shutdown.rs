//! Cooperative shutdown plumbing for refresher tasks.
//!
//! A host supervisor holds the [`ShutdownCoordinator`] and hands a
//! [`ShutdownSignal`] to each refresher it starts. The signal is
//! level-triggered: shutdown requested before a task first polls its signal
//! is still observed, so a refresher cancelled at startup does not hang.

use tokio::sync::watch;

/// Shutdown signal that can be cloned and awaited.
#[derive(Clone)]
pub struct ShutdownSignal {
    receiver: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Wait for the shutdown signal.
    ///
    /// Resolves immediately when shutdown was already requested, and also
    /// when the coordinator has been dropped.
    pub async fn recv(&mut self) {
        let _ = self.receiver.wait_for(|stop| *stop).await;
    }
}

/// Shutdown coordinator that can trigger shutdown signals.
pub struct ShutdownCoordinator {
    sender: watch::Sender<bool>,
}

impl ShutdownCoordinator {
    /// Create a new shutdown coordinator.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self { sender }
    }

    /// Get a signal receiver.
    #[must_use]
    pub fn signal(&self) -> ShutdownSignal {
        ShutdownSignal {
            receiver: self.sender.subscribe(),
        }
    }

    /// Trigger shutdown.
    ///
    /// Latched: a signal created after this call still observes it, even
    /// when no receiver existed at the time of the call.
    pub fn shutdown(&self) {
        // send() would discard the value while no receiver is subscribed.
        self.sender.send_replace(true);
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
