// src/buffer/ops.rs
//! Buffer read/write operations

use super::core::Buffer;
use crate::error::{BufferError, Result};
use std::io;

/// Maximum length-prefixed string length (400KB)
const MAX_STRING_LEN: usize = 400_000;

impl Buffer {
    /// Appends a single byte.
    ///
    /// Safe to call on a buffer fresh out of a pool: the buffer grows as needed.
    #[inline]
    pub fn put_byte(&mut self, val: u8) -> Result<()> {
        self.check_grow(1)?;
        self.data.push(val);
        Ok(())
    }

    /// Appends bytes, growing the allocation as needed.
    #[inline]
    pub fn put_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.check_grow(bytes.len())?;
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    /// Appends a `u32` in big-endian format.
    #[inline]
    pub fn put_u32(&mut self, val: u32) -> Result<()> {
        self.put_bytes(&val.to_be_bytes())
    }

    /// Appends a `u64` in big-endian format.
    #[inline]
    pub fn put_u64(&mut self, val: u64) -> Result<()> {
        self.put_bytes(&val.to_be_bytes())
    }

    /// Appends a length-prefixed string (u32 big-endian length, then bytes).
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::SizeTooBig`] if `s` is longer than 400KB.
    pub fn put_string(&mut self, s: &[u8]) -> Result<()> {
        if s.len() > MAX_STRING_LEN {
            return Err(BufferError::SizeTooBig);
        }
        self.check_grow(4 + s.len())?;
        self.put_u32(s.len() as u32)?;
        self.put_bytes(s)
    }

    /// Reads a single byte.
    #[inline]
    pub fn get_byte(&mut self) -> Result<u8> {
        Ok(self.get_bytes_ref(1)?[0])
    }

    /// Reads a byte as a boolean (any non-zero value is `true`).
    #[inline]
    pub fn get_bool(&mut self) -> Result<bool> {
        Ok(self.get_byte()? != 0)
    }

    /// Reads a `u32` in big-endian format.
    #[inline]
    pub fn get_u32(&mut self) -> Result<u32> {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(self.get_bytes_ref(4)?);
        Ok(u32::from_be_bytes(raw))
    }

    /// Reads a `u64` in big-endian format.
    #[inline]
    pub fn get_u64(&mut self) -> Result<u64> {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(self.get_bytes_ref(8)?);
        Ok(u64::from_be_bytes(raw))
    }

    /// Reads bytes, returning an owned `Vec`.
    #[inline]
    pub fn get_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        self.get_bytes_ref(len).map(<[u8]>::to_vec)
    }

    /// Reads bytes as a slice reference (zero-copy) and advances the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::BufferOverflow`] if fewer than `len` bytes remain.
    #[inline]
    pub fn get_bytes_ref(&mut self, len: usize) -> Result<&[u8]> {
        if len > self.remaining() {
            return Err(BufferError::BufferOverflow);
        }
        let start = self.pos;
        self.pos += len;
        Ok(&self.data[start..start + len])
    }

    /// Reads a length-prefixed string written by [`put_string`](Self::put_string).
    ///
    /// On error the cursor is left where it was.
    pub fn get_string(&mut self) -> Result<Vec<u8>> {
        let start = self.pos;
        let len = self.get_u32()? as usize;
        if len > MAX_STRING_LEN {
            self.pos = start;
            return Err(BufferError::SizeTooBig);
        }
        match self.get_bytes(len) {
            Ok(s) => Ok(s),
            Err(e) => {
                self.pos = start;
                Err(e)
            }
        }
    }
}

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.put_bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl io::Read for Buffer {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let n = out.len().min(self.remaining());
        out[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}
