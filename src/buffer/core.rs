// src/buffer/core.rs
//! Core buffer structure and basic operations
//!
//! This module provides the growable [`Buffer`] type handed out by the pools.
//! Writes always append at the end and grow the backing allocation; reads
//! consume from a cursor that starts at zero.

use crate::error::{BufferError, Result};
use std::fmt;
use zeroize::Zeroize;

/// Maximum single increment to prevent integer overflow
pub const BUF_MAX_INCR: usize = 1_000_000_000;
/// Maximum buffer size (1GB)
pub const BUF_MAX_SIZE: usize = 1_000_000_000;

/// A growable byte buffer with a read cursor.
///
/// The valid data is everything written so far; [`len`](Self::len) is its
/// length and [`capacity`](Self::capacity) is the size of the backing
/// allocation. [`reset`](Self::reset) empties the buffer while keeping the
/// allocation, which is what makes a buffer worth pooling.
///
/// # Examples
///
/// ```
/// use freebuf::Buffer;
/// # use freebuf::BufferError;
///
/// let mut buf = Buffer::with_capacity(1024);
/// buf.put_u32(42)?;
/// buf.put_bytes(b"hello")?;
/// assert_eq!(buf.len(), 9);
/// # Ok::<(), BufferError>(())
/// ```
#[derive(Clone, Default, Zeroize)]
pub struct Buffer {
    /// Valid data; `data.len()` is the buffer length
    pub(crate) data: Vec<u8>,
    /// Current read position
    pub(crate) pos: usize,
}

impl Buffer {
    /// Creates an empty buffer without allocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use freebuf::Buffer;
    ///
    /// let buf = Buffer::new();
    /// assert_eq!(buf.capacity(), 0);
    /// assert!(buf.is_empty());
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Self {
            data: Vec::new(),
            pos: 0,
        }
    }

    /// Creates an empty buffer with at least `capacity` bytes pre-allocated.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds [`BUF_MAX_SIZE`] (1GB).
    ///
    /// # Examples
    ///
    /// ```
    /// use freebuf::Buffer;
    ///
    /// let buf = Buffer::with_capacity(8192);
    /// assert!(buf.capacity() >= 8192);
    /// assert_eq!(buf.len(), 0);
    /// ```
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(
            capacity <= BUF_MAX_SIZE,
            "Buffer capacity {} exceeds maximum {}",
            capacity,
            BUF_MAX_SIZE
        );
        Self {
            data: Vec::with_capacity(capacity),
            pos: 0,
        }
    }

    /// Creates a buffer from existing data, with the cursor at 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use freebuf::Buffer;
    ///
    /// let buf = Buffer::from_vec(vec![1, 2, 3, 4, 5]);
    /// assert_eq!(buf.len(), 5);
    /// assert_eq!(buf.pos(), 0);
    /// ```
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self { data, pos: 0 }
    }

    /// Consumes the buffer and returns the backing vector.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Returns the size of the backing allocation.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Returns the length of valid data in the buffer.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the buffer contains no valid data.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the current read position.
    #[inline(always)]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Returns the number of bytes available to read from the current position.
    ///
    /// # Examples
    ///
    /// ```
    /// use freebuf::Buffer;
    /// # use freebuf::BufferError;
    ///
    /// let mut buf = Buffer::new();
    /// buf.put_u32(42)?;
    /// buf.put_u32(43)?;
    ///
    /// assert_eq!(buf.remaining(), 8);
    /// buf.get_u32()?;
    /// assert_eq!(buf.remaining(), 4);
    /// # Ok::<(), BufferError>(())
    /// ```
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Checks if at least `count` bytes are available to read.
    #[inline(always)]
    pub fn has_remaining(&self, count: usize) -> bool {
        self.remaining() >= count
    }

    /// Sets the read position.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::PositionOutOfBounds`] if `pos` exceeds the buffer length.
    #[inline]
    pub fn set_pos(&mut self, pos: usize) -> Result<()> {
        if pos > self.data.len() {
            return Err(BufferError::PositionOutOfBounds);
        }
        self.pos = pos;
        Ok(())
    }

    /// Advances the read position by `incr`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::PositionOutOfBounds`] if the increment is larger
    /// than [`BUF_MAX_INCR`] or would move past the end of the data.
    pub fn incr_pos(&mut self, incr: usize) -> Result<()> {
        if incr > BUF_MAX_INCR || incr > self.remaining() {
            return Err(BufferError::PositionOutOfBounds);
        }
        self.pos += incr;
        Ok(())
    }

    /// Empties the buffer for reuse, keeping its allocation.
    ///
    /// This does not zero the contents. Use [`burn`](Self::burn) for that.
    ///
    /// # Examples
    ///
    /// ```
    /// use freebuf::Buffer;
    /// # use freebuf::BufferError;
    ///
    /// let mut buf = Buffer::with_capacity(1024);
    /// buf.put_u32(42)?;
    /// let cap = buf.capacity();
    ///
    /// buf.reset();
    /// assert_eq!(buf.len(), 0);
    /// assert_eq!(buf.pos(), 0);
    /// assert_eq!(buf.capacity(), cap);
    /// # Ok::<(), BufferError>(())
    /// ```
    #[inline]
    pub fn reset(&mut self) {
        self.data.clear();
        self.pos = 0;
    }

    /// Securely zeros the whole allocation, then empties the buffer.
    ///
    /// Uses compiler-resistant zeroing via the [`zeroize`] crate. Spare
    /// capacity past the current length is wiped too, and the allocation is
    /// kept.
    pub fn burn(&mut self) {
        self.zeroize();
    }

    /// Returns a slice of all valid data in the buffer.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Returns a mutable slice of all valid data.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Reserves room for at least `additional` more bytes.
    ///
    /// Similar to [`Vec::reserve`].
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.data.reserve(additional);
    }

    /// Shrinks the allocation to fit the current length.
    #[inline]
    pub fn shrink_to_fit(&mut self) {
        self.data.shrink_to_fit();
    }

    /// Makes sure `additional` bytes can be appended without exceeding
    /// [`BUF_MAX_SIZE`].
    #[inline]
    pub(crate) fn check_grow(&self, additional: usize) -> Result<()> {
        if additional > BUF_MAX_INCR || self.data.len() + additional > BUF_MAX_SIZE {
            return Err(BufferError::SizeTooBig);
        }
        Ok(())
    }
}

impl AsRef<[u8]> for Buffer {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("pos", &self.pos)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_does_not_allocate() {
        let buf = Buffer::new();
        assert_eq!(buf.capacity(), 0);
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.pos(), 0);
    }

    #[test]
    fn test_with_capacity() {
        let buf = Buffer::with_capacity(1024);
        assert!(buf.capacity() >= 1024);
        assert_eq!(buf.len(), 0);
    }

    #[test]
    #[should_panic(expected = "exceeds maximum")]
    fn test_with_capacity_too_big() {
        let _ = Buffer::with_capacity(BUF_MAX_SIZE + 1);
    }

    #[test]
    fn test_from_vec() {
        let buf = Buffer::from_vec(vec![1, 2, 3, 4, 5]);
        assert_eq!(buf.len(), 5);
        assert_eq!(buf.as_slice(), &[1, 2, 3, 4, 5]);
        assert_eq!(buf.into_vec(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_reset_keeps_capacity() {
        let mut buf = Buffer::from_vec(vec![7; 100]);
        buf.pos = 50;
        let cap = buf.capacity();

        buf.reset();
        assert_eq!(buf.pos(), 0);
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.capacity(), cap);
    }

    #[test]
    fn test_burn_wipes_spare_capacity() {
        let mut buf = Buffer::with_capacity(64);
        buf.data.extend_from_slice(&[0xAA; 32]);
        let cap = buf.capacity();

        buf.burn();
        assert!(buf.is_empty());
        assert_eq!(buf.pos(), 0);
        assert_eq!(buf.capacity(), cap);

        // SAFETY: the allocation holds `cap` initialized (zeroed) bytes after burn.
        let raw = unsafe { std::slice::from_raw_parts(buf.data.as_ptr(), 32) };
        assert_eq!(raw, &[0u8; 32]);
    }

    #[test]
    fn test_set_pos_and_incr() {
        let mut buf = Buffer::from_vec(vec![0; 10]);
        assert!(buf.set_pos(11).is_err());
        buf.set_pos(4).unwrap();
        assert_eq!(buf.remaining(), 6);
        buf.incr_pos(6).unwrap();
        assert_eq!(buf.incr_pos(1), Err(BufferError::PositionOutOfBounds));
    }

    #[test]
    fn test_check_grow() {
        let buf = Buffer::new();
        assert!(buf.check_grow(16).is_ok());
        assert_eq!(buf.check_grow(BUF_MAX_SIZE + 1), Err(BufferError::SizeTooBig));
    }

    #[test]
    fn test_debug_omits_contents() {
        let buf = Buffer::from_vec(b"secret".to_vec());
        let printed = format!("{:?}", buf);
        assert!(printed.contains("len: 6"));
        assert!(!printed.contains("secret"));
    }
}
