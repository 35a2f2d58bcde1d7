// src/pool/dispatch.rs
//! Backend chosen at construction time from [`PoolConfig::backend`].

use super::Pool;
use super::config::{Backend, PoolConfig};
use super::list::ListPool;
use super::queue::QueuePool;
use super::stats::PoolStats;
use crate::buffer::Buffer;
use crate::error::Result;

/// A pool whose storage strategy is picked by `config.backend`.
///
/// Use this when the backend is a deployment decision; use [`ListPool`] or
/// [`QueuePool`] directly when it is fixed in code.
///
/// # Example
///
/// ```rust
/// use freebuf::prelude::*;
///
/// let pool = BufferPool::try_new(PoolConfig::network().with_backend(Backend::BoundedQueue))?;
/// assert_eq!(pool.backend(), Backend::BoundedQueue);
///
/// pool.seed(4);
/// let buf = pool.get();
/// assert!(buf.capacity() >= 1500);
/// # Ok::<(), freebuf::BufferError>(())
/// ```
#[derive(Debug)]
pub enum BufferPool {
    /// Mutex-guarded list
    List(ListPool),
    /// Lock-free bounded queue
    Queue(QueuePool),
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(PoolConfig::default())
    }
}

impl BufferPool {
    /// Builds the backend named by `config.backend` without validating `config`.
    ///
    /// # Panics
    ///
    /// Panics in the cases listed on [`QueuePool::new`].
    pub fn new(config: PoolConfig) -> Self {
        match config.backend {
            Backend::GuardedList => BufferPool::List(ListPool::new(config)),
            Backend::BoundedQueue => BufferPool::Queue(QueuePool::new(config)),
        }
    }

    /// Validates `config`, then builds the pool.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidConfig`](crate::BufferError::InvalidConfig)
    /// as described on [`PoolConfig::validate`].
    pub fn try_new(config: PoolConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// The backend in use.
    pub fn backend(&self) -> Backend {
        match self {
            BufferPool::List(_) => Backend::GuardedList,
            BufferPool::Queue(_) => Backend::BoundedQueue,
        }
    }

    /// Drops every idle buffer.
    pub fn clear(&self) {
        match self {
            BufferPool::List(p) => p.clear(),
            BufferPool::Queue(p) => p.clear(),
        }
    }
}

impl Pool for BufferPool {
    #[inline]
    fn get(&self) -> Buffer {
        match self {
            BufferPool::List(p) => p.get(),
            BufferPool::Queue(p) => p.get(),
        }
    }

    #[inline]
    fn put(&self, buffer: Buffer) {
        match self {
            BufferPool::List(p) => p.put(buffer),
            BufferPool::Queue(p) => p.put(buffer),
        }
    }

    fn available(&self) -> usize {
        match self {
            BufferPool::List(p) => p.available(),
            BufferPool::Queue(p) => p.available(),
        }
    }

    fn config(&self) -> &PoolConfig {
        match self {
            BufferPool::List(p) => p.config(),
            BufferPool::Queue(p) => p.config(),
        }
    }

    fn stats(&self) -> PoolStats {
        match self {
            BufferPool::List(p) => p.stats(),
            BufferPool::Queue(p) => p.stats(),
        }
    }
}
