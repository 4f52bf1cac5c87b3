use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use tokio::task::AbortHandle;

/// Schedules delayed asynchronous work, cancelling any previously scheduled
/// work that has not fired yet. Used for search-as-you-type re-querying:
/// each keystroke schedules a query that is dropped if superseded before
/// the delay elapses.
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<AbortHandle>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Debouncer {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Schedule `work` to run after the configured delay, aborting any
    /// previously scheduled work.
    pub fn schedule<F, Fut>(&self, work: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            work().await;
        });

        let mut pending = self.pending.lock().expect("debouncer mutex poisoned");
        if let Some(prior) = pending.replace(task.abort_handle()) {
            prior.abort();
        }
    }

    /// Drop whatever is currently scheduled without running it.
    pub fn cancel(&self) {
        let mut pending = self.pending.lock().expect("debouncer mutex poisoned");
        if let Some(prior) = pending.take() {
            prior.abort();
        }
    }
}
