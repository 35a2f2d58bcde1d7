// src/lib.rs
//! # Bounded Buffer Free-List
//!
//! A pool that hands out growable byte buffers and takes them back for reuse,
//! bounding both the capacity of any retained buffer and the number of
//! retained buffers, so pooled memory stays bounded in long-running processes.
//!
//! Features:
//! - Non-blocking `get`/`put`: an empty pool allocates, a full pool discards
//! - Oversized buffers are dropped on release instead of pinning memory
//! - Two interchangeable backends: a mutex-guarded list and a lock-free
//!   bounded queue (crossbeam), selectable at construction time
//! - Scoped acquisition that releases on every exit path
//! - Optional secure zeroing of released buffers (`zeroize`)
//! - Per-pool statistics and `tracing` events for every discard
//!
//! ```rust
//! use freebuf::prelude::*;
//!
//! let pool = ListPool::new(PoolConfig {
//!     initial_capacity: 1024,
//!     max_retained_capacity: 2048,
//!     max_pool_size: 2,
//!     ..PoolConfig::default()
//! });
//!
//! let mut buf = pool.get();
//! buf.put_bytes(b"hello")?;
//! pool.put(buf);
//! assert_eq!(pool.available(), 1);
//!
//! let mut grown = Buffer::with_capacity(4096);
//! grown.put_bytes(b"too big to keep")?;
//! pool.put(grown);
//! assert_eq!(pool.available(), 1);
//! # Ok::<(), BufferError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod buffer;
pub mod error;
pub mod pool;

// Re-export main types
pub use buffer::Buffer;
pub use error::{BufferError, Result, ResultExt};
pub use pool::{
    Backend, BufferPool, ListPool, MAX_QUEUE_POOL_SIZE, Pool, PoolConfig, PoolStats,
    PooledBuffer, QueuePool,
};

/// Commonly used imports.
pub mod prelude {
    pub use crate::buffer::Buffer;
    pub use crate::error::{BufferError, Result};
    pub use crate::pool::{
        Backend, BufferPool, ListPool, Pool, PoolConfig, PoolStats, PooledBuffer, QueuePool,
    };
}
