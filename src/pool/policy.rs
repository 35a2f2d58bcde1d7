// src/pool/policy.rs
//! Acquire/release policy shared by every storage backend.
//!
//! A backend only knows how to pop from and push into its free set. Everything
//! else (allocating on a miss, rejecting oversized buffers, clearing, counting
//! and logging discards) lives here so both backends behave identically.

use super::config::PoolConfig;
use super::stats::{Counters, PoolStats};
use crate::buffer::Buffer;
use tracing::{debug, trace};

pub(crate) struct Policy {
    pub(crate) config: PoolConfig,
    counters: Counters,
}

impl Policy {
    /// `config.backend` must already name the backend being built.
    pub(crate) fn new(config: PoolConfig) -> Self {
        debug!(
            backend = config.backend.name(),
            initial_capacity = config.initial_capacity,
            max_retained_capacity = config.max_retained_capacity,
            max_pool_size = config.max_pool_size,
            zero_on_release = config.zero_on_release,
            "buffer pool created"
        );
        Self {
            config,
            counters: Counters::default(),
        }
    }

    /// Completes an acquisition: hands out the popped buffer, or a fresh one
    /// on a miss.
    #[inline]
    pub(crate) fn acquired(&self, popped: Option<Buffer>) -> Buffer {
        Counters::bump(&self.counters.acquired);
        match popped {
            Some(buffer) => buffer,
            None => {
                Counters::bump(&self.counters.allocated);
                self.config.new_buffer()
            }
        }
    }

    /// Capacity check then clear. Returns `None` when the buffer was discarded.
    ///
    /// The capacity check comes first so an oversized buffer is freed without
    /// being cleared.
    #[inline]
    pub(crate) fn admit(&self, mut buffer: Buffer) -> Option<Buffer> {
        Counters::bump(&self.counters.released);

        let max = self.config.max_retained_capacity;
        if max > 0 && buffer.capacity() > max {
            Counters::bump(&self.counters.dropped_oversized);
            trace!(
                capacity = buffer.capacity(),
                max_retained_capacity = max,
                "discarding oversized buffer"
            );
            return None;
        }

        if self.config.zero_on_release {
            buffer.burn();
        } else {
            buffer.reset();
        }
        Some(buffer)
    }

    /// Whether a free set holding `len` buffers has room for one more.
    #[inline]
    pub(crate) fn has_room(&self, len: usize) -> bool {
        self.config.max_pool_size == 0 || len < self.config.max_pool_size
    }

    #[inline]
    pub(crate) fn retained(&self) {
        Counters::bump(&self.counters.retained);
    }

    /// Drops a cleared buffer that found the free set full.
    #[inline]
    pub(crate) fn reject_full(&self, buffer: Buffer) {
        Counters::bump(&self.counters.dropped_full);
        trace!(
            capacity = buffer.capacity(),
            max_pool_size = self.config.max_pool_size,
            "pool full, discarding buffer"
        );
        drop(buffer);
    }

    pub(crate) fn stats(&self, available: usize) -> PoolStats {
        self.counters.snapshot(available)
    }
}
