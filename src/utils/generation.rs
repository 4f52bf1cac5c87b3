use std::sync::atomic::{AtomicU64, Ordering};

/// A monotonic stamp for last-write-wins fetches. A view takes a new stamp
/// before issuing a request and only applies the result if the stamp is
/// still current when the response arrives; responses for older stamps are
/// discarded regardless of completion order.
#[derive(Default)]
pub struct Generation(AtomicU64);

impl Generation {
    pub fn new() -> Self {
        Generation(AtomicU64::new(0))
    }

    /// Start a new fetch, invalidating all earlier stamps.
    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether `stamp` still identifies the latest fetch.
    pub fn is_current(&self, stamp: u64) -> bool {
        self.0.load(Ordering::SeqCst) == stamp
    }
}
