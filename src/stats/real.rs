use std::sync::atomic::{AtomicU64, Ordering};

static TRAVERSAL_STATS: AtomicU64 = AtomicU64::new(0);

#[inline]
pub fn record(steps: u64) {
    TRAVERSAL_STATS.fetch_add(steps, Ordering::Relaxed);
}

pub fn read() -> u64 {
    TRAVERSAL_STATS.load(Ordering::Relaxed)
}

pub fn reset() {
    TRAVERSAL_STATS.store(0, Ordering::Relaxed);
}
