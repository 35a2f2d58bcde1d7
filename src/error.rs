// src/error.rs
//! Error types for buffer cursor operations and pool configuration.
//!
//! Pool operations themselves never fail: oversized and pool-full releases are
//! silent policy discards. Errors only surface from [`Buffer`](crate::Buffer)
//! reads/writes and from [`PoolConfig::validate`](crate::PoolConfig::validate).

use std::fmt;

/// Errors that can occur during buffer operations or pool construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Position exceeds buffer length
    PositionOutOfBounds,
    /// Attempted to read beyond the valid data
    BufferOverflow,
    /// Buffer size exceeds maximum allowed
    SizeTooBig,
    /// Pool configuration is inconsistent
    InvalidConfig(String),
    /// I/O error (for compatibility)
    Io(String),
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PositionOutOfBounds => write!(f, "Position out of bounds"),
            Self::BufferOverflow => write!(f, "Buffer overflow"),
            Self::SizeTooBig => write!(f, "Buffer size too big"),
            Self::InvalidConfig(msg) => write!(f, "Invalid pool configuration: {}", msg),
            Self::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for BufferError {}

// ============================================================================
// CONVERSIONS
// ============================================================================

/// Convert BufferError to std::io::Error
impl From<BufferError> for std::io::Error {
    fn from(err: BufferError) -> Self {
        use std::io::ErrorKind;
        match err {
            BufferError::BufferOverflow => std::io::Error::new(ErrorKind::UnexpectedEof, err),
            BufferError::SizeTooBig => std::io::Error::new(ErrorKind::OutOfMemory, err),
            BufferError::InvalidConfig(_) => std::io::Error::new(ErrorKind::InvalidInput, err),
            BufferError::Io(msg) => std::io::Error::other(msg),
            _ => std::io::Error::other(err),
        }
    }
}

/// Convert std::io::Error to BufferError
impl From<std::io::Error> for BufferError {
    fn from(err: std::io::Error) -> Self {
        BufferError::Io(err.to_string())
    }
}

/// Result type alias for buffer operations
pub type Result<T> = std::result::Result<T, BufferError>;

/// Extension trait for converting Results between different error types
pub trait ResultExt<T> {
    /// Convert to anyhow::Result
    #[cfg(feature = "anyhow")]
    fn into_anyhow(self) -> anyhow::Result<T>;

    /// Convert to io::Result
    fn into_io(self) -> std::io::Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    #[cfg(feature = "anyhow")]
    fn into_anyhow(self) -> anyhow::Result<T> {
        self.map_err(anyhow::Error::from)
    }

    fn into_io(self) -> std::io::Result<T> {
        self.map_err(|e| e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_io() {
        let io_err: std::io::Error = BufferError::BufferOverflow.into();
        assert_eq!(io_err.kind(), std::io::ErrorKind::UnexpectedEof);

        let io_err: std::io::Error = BufferError::InvalidConfig("x".into()).into();
        assert_eq!(io_err.kind(), std::io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_io_round_trip_keeps_message() {
        let io_err = std::io::Error::other("disk on fire");
        let buf_err: BufferError = io_err.into();
        assert_eq!(buf_err, BufferError::Io("disk on fire".to_string()));
    }

    #[test]
    fn test_result_ext() {
        let result: Result<u32> = Ok(42);
        assert_eq!(result.into_io().unwrap(), 42);

        let failed: Result<u32> = Err(BufferError::PositionOutOfBounds);
        assert!(failed.into_io().is_err());
    }

    #[cfg(feature = "anyhow")]
    #[test]
    fn test_anyhow_conversion() {
        let result: Result<()> = Err(BufferError::SizeTooBig);
        let err = result.into_anyhow().unwrap_err();
        assert!(err.to_string().contains("too big"));
    }
}
