// src/pool/queue.rs
//! Lock-free pool built on a fixed-capacity crossbeam queue.
//!
//! # Architecture
//!
//! The free set is a `crossbeam::queue::ArrayQueue` whose capacity is
//! `max_pool_size`, so the size bound needs no counter of its own:
//!
//! - `get` is a non-blocking pop; an empty queue is a pool miss.
//! - `put` is a non-blocking push; a full queue hands the buffer back and it
//!   is discarded.
//!
//! With `max_pool_size == 0` (unbounded) the free set is a `SegQueue` instead,
//! since an `ArrayQueue` needs a nonzero capacity.
//!
//! # Races
//!
//! Each push and pop is atomic, but nothing ties a caller's view of the queue
//! to the operation that follows. A `put` may be discarded just after another
//! thread's `get` made room, and a `get` may allocate while a buffer is being
//! pushed. Both outcomes are valid pool behaviour. The queue can never hold
//! more than `max_pool_size` buffers.

use super::Pool;
use super::config::{Backend, MAX_QUEUE_POOL_SIZE, PoolConfig};
use super::policy::Policy;
use super::stats::PoolStats;
use crate::buffer::Buffer;
use crossbeam::queue::{ArrayQueue, SegQueue};

enum FreeQueue {
    Bounded(ArrayQueue<Buffer>),
    Unbounded(SegQueue<Buffer>),
}

impl FreeQueue {
    fn with_capacity(capacity: usize) -> Self {
        if capacity == 0 {
            FreeQueue::Unbounded(SegQueue::new())
        } else {
            FreeQueue::Bounded(ArrayQueue::new(capacity))
        }
    }

    #[inline]
    fn pop(&self) -> Option<Buffer> {
        match self {
            FreeQueue::Bounded(q) => q.pop(),
            FreeQueue::Unbounded(q) => q.pop(),
        }
    }

    /// Hands the buffer back when the queue is full.
    #[inline]
    fn push(&self, buffer: Buffer) -> Result<(), Buffer> {
        match self {
            FreeQueue::Bounded(q) => q.push(buffer),
            FreeQueue::Unbounded(q) => {
                q.push(buffer);
                Ok(())
            }
        }
    }

    #[inline]
    fn len(&self) -> usize {
        match self {
            FreeQueue::Bounded(q) => q.len(),
            FreeQueue::Unbounded(q) => q.len(),
        }
    }
}

/// Lock-free buffer pool backed by a bounded concurrent queue.
///
/// Same contract as [`ListPool`](crate::pool::ListPool), with synchronization
/// delegated to the queue.
///
/// # Example
///
/// ```rust
/// use freebuf::prelude::*;
/// use std::sync::Arc;
/// use std::thread;
///
/// let pool = Arc::new(QueuePool::new(PoolConfig::default()));
///
/// let handles: Vec<_> = (0..4).map(|_| {
///     let pool = Arc::clone(&pool);
///     thread::spawn(move || {
///         for i in 0..1000u32 {
///             let mut buf = pool.acquire();
///             buf.put_u32(i).unwrap();
///         }
///     })
/// }).collect();
/// for h in handles { h.join().unwrap(); }
///
/// assert!(pool.available() <= 100);
/// println!("Hit rate: {:.1}%", pool.stats().hit_rate());
/// ```
pub struct QueuePool {
    free: FreeQueue,
    policy: Policy,
}

impl Default for QueuePool {
    fn default() -> Self {
        Self::new(PoolConfig::default())
    }
}

impl QueuePool {
    /// Creates an empty pool whose queue holds `config.max_pool_size` buffers.
    ///
    /// `config.backend` is replaced with [`Backend::BoundedQueue`].
    ///
    /// # Panics
    ///
    /// Panics if `config.max_pool_size` exceeds [`MAX_QUEUE_POOL_SIZE`].
    /// [`PoolConfig::validate`] reports the same condition as an error.
    pub fn new(config: PoolConfig) -> Self {
        assert!(
            config.max_pool_size <= MAX_QUEUE_POOL_SIZE,
            "max_pool_size {} exceeds bounded queue limit {}",
            config.max_pool_size,
            MAX_QUEUE_POOL_SIZE
        );
        Self {
            free: FreeQueue::with_capacity(config.max_pool_size),
            policy: Policy::new(config.with_backend(Backend::BoundedQueue)),
        }
    }

    /// Drains every idle buffer.
    pub fn clear(&self) {
        while self.free.pop().is_some() {}
    }
}

impl Pool for QueuePool {
    #[inline]
    fn get(&self) -> Buffer {
        self.policy.acquired(self.free.pop())
    }

    #[inline]
    fn put(&self, buffer: Buffer) {
        let Some(buffer) = self.policy.admit(buffer) else {
            return;
        };
        match self.free.push(buffer) {
            Ok(()) => self.policy.retained(),
            Err(buffer) => self.policy.reject_full(buffer),
        }
    }

    #[inline]
    fn available(&self) -> usize {
        self.free.len()
    }

    fn config(&self) -> &PoolConfig {
        &self.policy.config
    }

    fn stats(&self) -> PoolStats {
        self.policy.stats(self.available())
    }
}

impl std::fmt::Debug for QueuePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueuePool")
            .field("config", &self.policy.config)
            .field("available", &self.available())
            .finish()
    }
}
