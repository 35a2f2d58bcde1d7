// src/pool/guard.rs
//! Scoped acquisition: a buffer that goes back to its pool when dropped.

use super::Pool;
use crate::buffer::Buffer;
use std::ops::{Deref, DerefMut};

/// A buffer borrowed from a [`Pool`] through [`Pool::acquire`].
///
/// On drop the buffer is released through [`Pool::put`], so the pool's
/// capacity and size bounds apply. This holds on every exit path, including
/// `?` early returns and panics unwinding through the scope.
///
/// Use [`into_inner`](Self::into_inner) or [`discard`](Self::discard) to opt
/// out of the automatic release.
///
/// # Example
///
/// ```rust
/// use freebuf::prelude::*;
///
/// fn frame(pool: &ListPool, payload: &[u8]) -> freebuf::Result<usize> {
///     let mut buf = pool.acquire();
///     buf.put_u32(payload.len() as u32)?;
///     buf.put_bytes(payload)?;
///     Ok(buf.len())
/// } // buf returns to the pool here, even on error
///
/// let pool = ListPool::new(PoolConfig::default());
/// assert_eq!(frame(&pool, b"hello")?, 9);
/// assert_eq!(pool.available(), 1);
/// # Ok::<(), freebuf::BufferError>(())
/// ```
pub struct PooledBuffer<'a, P: Pool + ?Sized> {
    buffer: Buffer,
    /// `None` once the buffer has been detached from the pool
    pool: Option<&'a P>,
}

impl<'a, P: Pool + ?Sized> PooledBuffer<'a, P> {
    pub(crate) fn new(pool: &'a P) -> Self {
        Self {
            buffer: pool.get(),
            pool: Some(pool),
        }
    }

    /// Extracts the buffer without returning it to the pool.
    ///
    /// The caller owns it from now on and may later hand it back with
    /// [`Pool::put`].
    pub fn into_inner(mut self) -> Buffer {
        self.pool = None;
        std::mem::take(&mut self.buffer)
    }

    /// Drops the buffer immediately, bypassing the pool.
    pub fn discard(mut self) {
        self.pool = None;
    }
}

impl<P: Pool + ?Sized> Deref for PooledBuffer<'_, P> {
    type Target = Buffer;

    fn deref(&self) -> &Self::Target {
        &self.buffer
    }
}

impl<P: Pool + ?Sized> DerefMut for PooledBuffer<'_, P> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buffer
    }
}

impl<P: Pool + ?Sized> Drop for PooledBuffer<'_, P> {
    fn drop(&mut self) {
        if let Some(pool) = self.pool.take() {
            pool.put(std::mem::take(&mut self.buffer));
        }
    }
}

impl<P: Pool + ?Sized> std::fmt::Debug for PooledBuffer<'_, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PooledBuffer")
            .field("buffer", &self.buffer)
            .field("attached", &self.pool.is_some())
            .finish()
    }
}
