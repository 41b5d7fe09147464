//! Cancellable delayed task used to debounce search input

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Handle to one scheduled action. Dropping it cancels the action.
struct PendingTimer {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl PendingTimer {
    fn cancel(&self) {
        self.token.cancel();
    }

    fn is_live(&self) -> bool {
        !self.token.is_cancelled() && !self.handle.is_finished()
    }
}

impl Drop for PendingTimer {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Runs the most recently scheduled action once no newer action has been
/// scheduled for a full `window`.
pub struct Debouncer {
    window: Duration,
    pending: Option<PendingTimer>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self { window, pending: None }
    }

    /// Replace any pending action with `action`, to run after the window.
    ///
    /// Only the wait is pending. Once the window has elapsed the action is
    /// detached and `cancel` no longer affects it.
    pub fn schedule<F, Fut>(&mut self, action: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.cancel();

        let token = CancellationToken::new();
        let child = token.clone();
        let window = self.window;

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = child.cancelled() => {
                    tracing::trace!("Debounce timer cancelled");
                }
                _ = tokio::time::sleep(window) => {
                    // The timer is done once the window elapses; the action runs on its own
                    tokio::spawn(action());
                }
            }
        });

        self.pending = Some(PendingTimer { token, handle });
    }

    /// Cancel the pending action, if any. Nothing fires afterwards.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(PendingTimer::is_live)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    fn recorder() -> Arc<Mutex<Vec<String>>> {
        Arc::new(Mutex::new(Vec::new()))
    }

    fn record(log: &Arc<Mutex<Vec<String>>>, value: &str) -> impl FnOnce() -> futures::future::BoxFuture<'static, ()> + Send + 'static {
        let log = log.clone();
        let value = value.to_string();
        move || Box::pin(async move { log.lock().await.push(value) })
    }

    #[tokio::test(start_paused = true)]
    async fn fires_after_window() {
        let log = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(400));

        debouncer.schedule(record(&log, "abbey"));
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(399)).await;
        assert!(log.lock().await.is_empty());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(*log.lock().await, ["abbey"]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn running_action_is_not_pending() {
        let log = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(400));

        let slow_log = log.clone();
        debouncer.schedule(move || async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            slow_log.lock().await.push("slow".to_string());
        });

        // Window elapsed, action still sleeping
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(!debouncer.is_pending());
        assert!(log.lock().await.is_empty());

        // Cancelling after the window does not abort the running action
        debouncer.cancel();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(*log.lock().await, ["slow"]);
    }

    #[tokio::test(start_paused = true)]
    async fn burst_only_fires_last() {
        let log = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(400));

        for value in ["a", "ab", "abb", "abbe", "abbey"] {
            debouncer.schedule(record(&log, value));
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        tokio::time::sleep(Duration::from_millis(400)).await;

        assert_eq!(*log.lock().await, ["abbey"]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_suppresses_action() {
        let log = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(400));

        debouncer.schedule(record(&log, "abbey"));
        tokio::time::sleep(Duration::from_millis(200)).await;
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(log.lock().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_pending_action() {
        let log = recorder();
        {
            let mut debouncer = Debouncer::new(Duration::from_millis(400));
            debouncer.schedule(record(&log, "abbey"));
        }

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(log.lock().await.is_empty());
    }
}
