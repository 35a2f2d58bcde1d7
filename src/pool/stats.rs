// src/pool/stats.rs
//! Statistics tracking for buffer pools.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Snapshot of a pool's counters.
///
/// Counters are updated with `Relaxed` ordering; under concurrency a snapshot
/// is eventually consistent rather than exact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Number of idle buffers in the pool
    pub available: usize,
    /// Total number of `get()` calls
    pub acquired: usize,
    /// Buffers freshly allocated because the pool was empty
    pub allocated: usize,
    /// Total number of `put()` calls
    pub released: usize,
    /// Released buffers that were kept for reuse
    pub retained: usize,
    /// Released buffers discarded for exceeding `max_retained_capacity`
    pub dropped_oversized: usize,
    /// Released buffers discarded because the pool was full
    pub dropped_full: usize,
}

impl PoolStats {
    /// Acquisitions served from the free set.
    pub fn hits(&self) -> usize {
        self.acquired.saturating_sub(self.allocated)
    }

    /// Returns the pool hit rate as a percentage (0.0-100.0).
    ///
    /// # Examples
    ///
    /// ```
    /// use freebuf::prelude::*;
    ///
    /// let pool = ListPool::new(PoolConfig::default());
    /// let buf = pool.get(); // miss
    /// pool.put(buf);
    /// let _buf = pool.get(); // hit
    ///
    /// assert_eq!(pool.stats().hit_rate(), 50.0);
    /// ```
    pub fn hit_rate(&self) -> f64 {
        if self.acquired == 0 {
            return 0.0;
        }
        (self.hits() as f64 / self.acquired as f64) * 100.0
    }

    /// Released buffers discarded by either bound.
    pub fn dropped(&self) -> usize {
        self.dropped_oversized + self.dropped_full
    }

    /// Buffers acquired and not yet released.
    ///
    /// Pre-seeded buffers count as releases, so this saturates at zero.
    pub fn in_use(&self) -> usize {
        self.acquired.saturating_sub(self.released)
    }
}

#[derive(Debug, Default)]
pub(crate) struct Counters {
    pub(crate) acquired: AtomicUsize,
    pub(crate) allocated: AtomicUsize,
    pub(crate) released: AtomicUsize,
    pub(crate) retained: AtomicUsize,
    pub(crate) dropped_oversized: AtomicUsize,
    pub(crate) dropped_full: AtomicUsize,
}

impl Counters {
    #[inline]
    pub(crate) fn bump(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self, available: usize) -> PoolStats {
        PoolStats {
            available,
            acquired: self.acquired.load(Ordering::Relaxed),
            allocated: self.allocated.load(Ordering::Relaxed),
            released: self.released.load(Ordering::Relaxed),
            retained: self.retained.load(Ordering::Relaxed),
            dropped_oversized: self.dropped_oversized.load(Ordering::Relaxed),
            dropped_full: self.dropped_full.load(Ordering::Relaxed),
        }
    }
}
