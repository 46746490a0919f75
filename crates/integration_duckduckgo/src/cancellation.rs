//! Cooperative cancellation for in-flight queries
//!
//! A [`CancellationToken`] is created per query and handed to every fetch of
//! that query. The flag only ever moves from `false` to `true`. Setting it
//! wakes any request that is currently waiting on the network, and every
//! fetch checks it before sending and after each received body chunk.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tokio::sync::Notify;

#[derive(Debug, Default)]
struct Inner {
    cancelled: AtomicBool,
    notify: Notify,
}

/// Shared, clonable cancellation flag
///
/// Clones observe the same flag, so one clone can be moved to another
/// thread or task and used to cancel the query that owns the original.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

impl CancellationToken {
    /// Create a fresh, uncancelled token
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flag and wake pending waiters
    ///
    /// Returns `true` if this call performed the transition, `false` if the
    /// token was already cancelled.
    pub fn cancel(&self) -> bool {
        let first = !self.inner.cancelled.swap(true, Ordering::AcqRel);
        if first {
            self.inner.notify.notify_waiters();
        }
        first
    }

    /// Check whether the token has been cancelled
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Wait until the token is cancelled
    ///
    /// Resolves immediately if it already is.
    pub async fn cancelled(&self) {
        loop {
            let notified = self.inner.notify.notified();
            tokio::pin!(notified);
            // Register before checking the flag so a concurrent cancel()
            // cannot slip between the check and the wait.
            notified.as_mut().enable();

            if self.is_cancelled() {
                return;
            }

            notified.await;
        }
    }
}
