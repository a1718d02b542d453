//! Request generations for discarding stale responses.

use std::sync::atomic::{AtomicU64, Ordering};

/// Token captured when a request is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// Monotonic counter; only the most recently issued token is current.
#[derive(Debug, Default)]
pub struct RequestGenerations {
    latest: AtomicU64,
}

impl RequestGenerations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new token, superseding every earlier one.
    pub fn begin(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }
}
