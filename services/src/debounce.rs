use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Cancel-and-replace scheduler for delayed work.
///
/// Every [`schedule`](Debouncer::schedule) call takes a new generation number
/// and cancels whatever was pending. When the delay elapses the task only runs
/// if its generation is still the latest, so at most one of a burst of calls
/// ever executes: the last one.
///
/// Must be used from within a tokio runtime.
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
    pending: Mutex<Option<CancellationToken>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Generation of the most recently scheduled (or cancelled) task.
    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Schedules `task` to run after the delay, superseding any pending task.
    ///
    /// Returns the generation assigned to `task`.
    pub fn schedule<F, Fut>(&self, task: F) -> u64
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let cancel_token = CancellationToken::new();
        self.replace_pending(Some(cancel_token.clone()));

        let latest = self.generation.clone();
        let delay = self.delay;

        tokio::spawn(async move {
            tokio::select! {
                () = tokio::time::sleep(delay) => {}
                () = cancel_token.cancelled() => {
                    log::trace!("Debounced task {generation} superseded");
                    return;
                }
            }

            if latest.load(Ordering::SeqCst) != generation {
                log::trace!("Debounced task {generation} is stale, skipping");
                return;
            }

            task().await;
        });

        generation
    }

    /// Drops the pending task, if any.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.replace_pending(None);
    }

    fn replace_pending(&self, next: Option<CancellationToken>) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = std::mem::replace(&mut *pending, next) {
            previous.cancel();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.replace_pending(None);
    }
}
