use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use super::types::{CallbackOutcome, RedirectTarget};

/// Cancellable redirect delay
///
/// The target is delivered on the channel once the delay elapses.
/// Dropping the timer aborts the pending redirect, which is how an
/// unmounting view cancels its timers; in-flight work that already
/// resolved simply has its result discarded.
pub struct RedirectTimer {
    handle: JoinHandle<()>,
}

impl RedirectTimer {
    /// Schedule `target` to fire after `delay`
    pub fn schedule(
        target: RedirectTarget,
        delay: Duration,
        tx: oneshot::Sender<RedirectTarget>,
    ) -> Self {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(target);
        });
        Self { handle }
    }

    /// Cancel the pending redirect
    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for RedirectTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl CallbackOutcome {
    /// Schedule this outcome's redirect on its configured delay
    pub fn schedule_redirect(&self, tx: oneshot::Sender<RedirectTarget>) -> RedirectTimer {
        RedirectTimer::schedule(self.redirect, self.delay, tx)
    }
}
