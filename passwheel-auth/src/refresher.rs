//! Background refresh loop.
//!
//! One refresher per window keeps the triple aligned with the wall clock.
//! The loop is event-driven: an interval timer on one arm, the shutdown
//! signal on the other. Zero refreshers is fine for short-lived processes
//! that only need the construction-time tokens (the CLI works that way);
//! more than one is wasteful but not unsafe.

use std::sync::Arc;

use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::shutdown::ShutdownSignal;
use crate::window::Passkey;

impl Passkey {
    /// Drive this window until `shutdown` fires.
    ///
    /// Refreshes immediately on entry, so the triple is live before the
    /// first tick even if cancellation lands straight away; then refreshes
    /// on every timer tick. Returns once the shutdown signal fires or its
    /// coordinator is dropped, leaving the triple frozen at its
    /// last-computed values.
    pub async fn run(&self, mut shutdown: ShutdownSignal) {
        self.refresh();
        debug!(
            interval_secs = self.interval().as_secs(),
            "token refresher started"
        );

        let mut ticker = tokio::time::interval(self.interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately and is covered by the refresh
        // above.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.refresh();
                }
                _ = shutdown.recv() => {
                    debug!("token refresher stopped");
                    return;
                }
            }
        }
    }

    /// Spawn [`Passkey::run`] onto the current tokio runtime.
    pub fn spawn_refresher(
        self: &Arc<Self>,
        shutdown: ShutdownSignal,
    ) -> tokio::task::JoinHandle<()> {
        let passkey = Arc::clone(self);
        tokio::spawn(async move { passkey.run(shutdown).await })
    }
}
