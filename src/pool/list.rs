// src/pool/list.rs
//! Guarded-list pool: a `VecDeque` of idle buffers behind one `Mutex`.
//!
//! # Locking
//!
//! The mutex covers only the push/pop on the deque. Capacity checks, clearing
//! (or zeroing) a released buffer, allocating on a miss and freeing a rejected
//! buffer all happen outside the lock.
//!
//! A poisoned lock is recovered: every critical section is a single
//! `VecDeque` operation, so the deque is never observed half-updated.
//!
//! # Ordering
//!
//! FIFO. `get` takes the oldest idle buffer, `put` appends to the tail.

use super::Pool;
use super::config::{Backend, PoolConfig};
use super::policy::Policy;
use super::stats::PoolStats;
use crate::buffer::Buffer;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Thread-safe buffer pool backed by a `Mutex`-guarded list.
///
/// Simple and reliable; every operation is serialized against every other.
/// For a lock-free alternative with the same contract see
/// [`QueuePool`](crate::pool::QueuePool).
///
/// # Thread Safety
///
/// Can be shared across threads via `Arc`.
///
/// # Example
///
/// ```rust
/// use freebuf::prelude::*;
///
/// let pool = ListPool::new(PoolConfig {
///     initial_capacity: 4096,
///     max_retained_capacity: 16384,
///     max_pool_size: 100,
///     ..PoolConfig::default()
/// });
///
/// let mut buf = pool.get();
/// buf.put_u32(42)?;
/// pool.put(buf);
/// assert_eq!(pool.available(), 1);
/// # Ok::<(), freebuf::BufferError>(())
/// ```
pub struct ListPool {
    free: Mutex<VecDeque<Buffer>>,
    policy: Policy,
}

impl Default for ListPool {
    fn default() -> Self {
        Self::new(PoolConfig::default())
    }
}

impl ListPool {
    /// Creates an empty pool. Use [`Pool::seed`] or [`Pool::put`] to pre-fill it.
    ///
    /// `config.backend` is replaced with [`Backend::GuardedList`].
    pub fn new(config: PoolConfig) -> Self {
        Self {
            free: Mutex::new(VecDeque::new()),
            policy: Policy::new(config.with_backend(Backend::GuardedList)),
        }
    }

    #[inline]
    fn lock(&self) -> MutexGuard<'_, VecDeque<Buffer>> {
        self.free.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drops every idle buffer.
    pub fn clear(&self) {
        let drained = std::mem::take(&mut *self.lock());
        drop(drained);
    }
}

impl Pool for ListPool {
    fn get(&self) -> Buffer {
        let popped = self.lock().pop_front();
        self.policy.acquired(popped)
    }

    fn put(&self, buffer: Buffer) {
        let Some(buffer) = self.policy.admit(buffer) else {
            return;
        };

        let rejected = {
            let mut free = self.lock();
            if self.policy.has_room(free.len()) {
                free.push_back(buffer);
                None
            } else {
                Some(buffer)
            }
        };

        match rejected {
            None => self.policy.retained(),
            Some(buffer) => self.policy.reject_full(buffer),
        }
    }

    fn available(&self) -> usize {
        self.lock().len()
    }

    fn config(&self) -> &PoolConfig {
        &self.policy.config
    }

    fn stats(&self) -> PoolStats {
        self.policy.stats(self.available())
    }
}

impl std::fmt::Debug for ListPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListPool")
            .field("config", &self.policy.config)
            .field("available", &self.available())
            .finish()
    }
}
