// src/pool/config.rs
//! Configuration for buffer pools

use crate::buffer::{BUF_MAX_SIZE, Buffer};
use crate::error::{BufferError, Result};

/// Largest `max_pool_size` accepted for [`Backend::BoundedQueue`].
///
/// The queue allocates one slot per idle buffer up front, so this caps that
/// allocation at roughly 40MB.
pub const MAX_QUEUE_POOL_SIZE: usize = 1 << 20;

/// Storage strategy behind a [`BufferPool`](super::BufferPool).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// `Mutex<VecDeque<Buffer>>`; see [`ListPool`](super::ListPool).
    #[default]
    GuardedList,
    /// Fixed-capacity lock-free queue; see [`QueuePool`](super::QueuePool).
    BoundedQueue,
}

impl Backend {
    /// Short name used in log events.
    pub fn name(self) -> &'static str {
        match self {
            Backend::GuardedList => "guarded-list",
            Backend::BoundedQueue => "bounded-queue",
        }
    }
}

/// Configuration for buffer pool behavior.
///
/// A zero bound disables that bound. The configuration is fixed for the
/// lifetime of the pool built from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Capacity (bytes) of buffers allocated on a pool miss; 0 allocates lazily
    pub initial_capacity: usize,
    /// Largest buffer capacity accepted back on release; 0 = unbounded
    pub max_retained_capacity: usize,
    /// Maximum number of idle buffers kept; 0 = unbounded
    pub max_pool_size: usize,
    /// Zeroize the whole allocation on release instead of a plain clear
    pub zero_on_release: bool,
    /// Storage strategy used by [`BufferPool::new`](super::BufferPool::new)
    pub backend: Backend,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 8192,       // 8KB buffers
            max_retained_capacity: 65536, // drop anything grown past 64KB
            max_pool_size: 100,           // keep up to 100 idle buffers
            zero_on_release: false,
            backend: Backend::GuardedList,
        }
    }
}

impl PoolConfig {
    /// Configuration for embedded systems (low memory).
    pub fn small() -> Self {
        Self {
            initial_capacity: 1024,
            max_retained_capacity: 4096,
            max_pool_size: 20,
            ..Self::default()
        }
    }

    /// Configuration for high-throughput servers.
    pub fn large() -> Self {
        Self {
            initial_capacity: 65536,
            max_retained_capacity: 1 << 20,
            max_pool_size: 1000,
            ..Self::default()
        }
    }

    /// Configuration for network packet processing (MTU-sized).
    pub fn network() -> Self {
        Self {
            initial_capacity: 1500,     // Standard MTU
            max_retained_capacity: 9000, // Jumbo frame
            max_pool_size: 500,
            ..Self::default()
        }
    }

    /// No bounds at all: lazily allocated buffers, every release retained.
    pub fn unbounded() -> Self {
        Self {
            initial_capacity: 0,
            max_retained_capacity: 0,
            max_pool_size: 0,
            ..Self::default()
        }
    }

    /// Returns the configuration with a different storage backend.
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Returns the configuration with secure zeroing on release toggled.
    pub fn with_zero_on_release(mut self, enabled: bool) -> Self {
        self.zero_on_release = enabled;
        self
    }

    /// Allocates the buffer handed out on a pool miss.
    ///
    /// The allocation is capped at [`BUF_MAX_SIZE`].
    pub fn new_buffer(&self) -> Buffer {
        match self.fresh_capacity() {
            0 => Buffer::new(),
            capacity => Buffer::with_capacity(capacity),
        }
    }

    #[inline]
    pub(crate) fn fresh_capacity(&self) -> usize {
        self.initial_capacity.min(BUF_MAX_SIZE)
    }

    /// Checks the configuration for values that would make the pool useless.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidConfig`] if `initial_capacity` exceeds
    /// [`BUF_MAX_SIZE`] or a nonzero `max_retained_capacity` (every freshly
    /// allocated buffer would be discarded on release). With
    /// [`Backend::BoundedQueue`], also rejects a `max_pool_size` above
    /// [`MAX_QUEUE_POOL_SIZE`].
    ///
    /// # Examples
    ///
    /// ```
    /// use freebuf::PoolConfig;
    ///
    /// assert!(PoolConfig::default().validate().is_ok());
    ///
    /// let inverted = PoolConfig {
    ///     initial_capacity: 4096,
    ///     max_retained_capacity: 1024,
    ///     ..PoolConfig::default()
    /// };
    /// assert!(inverted.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity > BUF_MAX_SIZE {
            return Err(BufferError::InvalidConfig(format!(
                "initial_capacity {} exceeds maximum buffer size {}",
                self.initial_capacity, BUF_MAX_SIZE
            )));
        }
        if self.max_retained_capacity > 0 && self.initial_capacity > self.max_retained_capacity {
            return Err(BufferError::InvalidConfig(format!(
                "initial_capacity {} exceeds max_retained_capacity {}",
                self.initial_capacity, self.max_retained_capacity
            )));
        }
        if self.backend == Backend::BoundedQueue && self.max_pool_size > MAX_QUEUE_POOL_SIZE {
            return Err(BufferError::InvalidConfig(format!(
                "max_pool_size {} exceeds bounded queue limit {}",
                self.max_pool_size, MAX_QUEUE_POOL_SIZE
            )));
        }
        Ok(())
    }
}
