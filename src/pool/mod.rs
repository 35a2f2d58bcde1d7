// src/pool/mod.rs
//! Bounded buffer pools with interchangeable storage backends.
//!
//! Every backend implements [`Pool`] with the same release policy:
//!
//! 1. A buffer whose capacity exceeds `max_retained_capacity` is discarded.
//! 2. Otherwise it is cleared (or zeroized, with `zero_on_release`).
//! 3. If the free set already holds `max_pool_size` buffers, it is discarded.
//! 4. Otherwise it joins the free set.
//!
//! Acquisition never blocks: an empty pool allocates a fresh buffer of
//! `initial_capacity` bytes.

pub(crate) mod config;
pub(crate) mod dispatch;
pub(crate) mod guard;
pub(crate) mod list;
pub(crate) mod policy;
pub(crate) mod queue;
pub(crate) mod stats;

pub use config::{Backend, MAX_QUEUE_POOL_SIZE, PoolConfig};
pub use dispatch::BufferPool;
pub use guard::PooledBuffer;
pub use list::ListPool;
pub use queue::QueuePool;
pub use stats::PoolStats;

use crate::buffer::Buffer;

/// A bounded free-list of reusable [`Buffer`]s.
///
/// Both operations take `&self`, never block and never fail. Ownership does
/// the bookkeeping: [`get`](Self::get) hands a buffer out by value and the
/// pool keeps no reference to it; [`put`](Self::put) takes it back by value,
/// and a rejected buffer is simply freed.
pub trait Pool: Send + Sync {
    /// Takes an idle buffer, or allocates one if the pool is empty.
    ///
    /// The returned buffer is empty with its cursor at 0.
    fn get(&self) -> Buffer;

    /// Returns a buffer to the pool, subject to the capacity and size bounds.
    fn put(&self, buffer: Buffer);

    /// Number of idle buffers right now.
    ///
    /// Only a snapshot under concurrency.
    fn available(&self) -> usize;

    /// The configuration this pool was built with.
    fn config(&self) -> &PoolConfig;

    /// Returns a snapshot of pool statistics.
    fn stats(&self) -> PoolStats;

    /// Acquires a buffer that is released back to this pool on drop.
    fn acquire(&self) -> PooledBuffer<'_, Self>
    where
        Self: Sized,
    {
        PooledBuffer::new(self)
    }

    /// Pre-fills the pool by releasing `count` freshly allocated buffers.
    ///
    /// Goes through [`put`](Self::put), so anything beyond `max_pool_size` is
    /// discarded.
    fn seed(&self, count: usize) {
        for _ in 0..count {
            self.put(self.config().new_buffer());
        }
    }
}
