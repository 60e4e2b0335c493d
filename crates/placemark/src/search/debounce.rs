//! Deferred-call coalescing for bursty input.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::trace;

/// Coalesces a burst of calls into the last one.
///
/// Each [`call`](Self::call) cancels the previous pending call, if any, and
/// schedules its future to run after the configured delay. Once the delay
/// elapses the future is detached and runs to completion; only the waiting
/// period can be cancelled.
///
/// Fire and forget: nothing is returned to the caller. Must be used from
/// within a Tokio runtime.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `future` to run after the delay, dropping any pending call.
    pub fn call<F>(&mut self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Detached, so a later cancel() only ever aborts the waiting
            // period, never a call already under way.
            tokio::spawn(future);
        }));
    }

    /// Abort the pending call without scheduling a new one.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            trace!("Cancelling pending debounced call");
            handle.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
