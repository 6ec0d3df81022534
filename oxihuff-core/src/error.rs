//! Error types for OxiHuff operations.
//!
//! A single error enum covers the bit stream layer, the Huffman codec, and
//! the checksummed container used by the CLI. Empty input is never an error.

use std::io;
use thiserror::Error;

/// The main error type for OxiHuff operations.
#[derive(Debug, Error)]
pub enum OxiHuffError {
    /// I/O error from an underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed call parameters (e.g. a zero-width bit group).
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the rejected parameter.
        message: String,
    },

    /// The bit reader ran out of meaningful bits.
    #[error("End of stream: requested {requested} bits, {available} available")]
    EndOfStream {
        /// Number of bits the caller asked for.
        requested: u64,
        /// Number of meaningful bits that were left.
        available: u64,
    },

    /// A write was attempted on a bit writer that has already been flushed.
    #[error("Bit stream already closed")]
    StreamClosed,

    /// Structurally invalid persisted header.
    #[error("Corrupt header: {message}")]
    CorruptHeader {
        /// Description of the inconsistency.
        message: String,
    },

    /// A bit pattern that maps to no symbol.
    #[error("Invalid Huffman code at bit position {bit_position}")]
    InvalidCode {
        /// Bit position where the invalid code was found.
        bit_position: u64,
    },

    /// A header declares more than the configured decoder limit.
    #[error("Limit exceeded: {what} is {value}, limit is {limit}")]
    LimitExceeded {
        /// Which quantity went over the limit.
        what: &'static str,
        /// Declared value.
        value: u64,
        /// Configured limit.
        limit: u64,
    },

    /// CRC checksum mismatch.
    #[error("CRC mismatch: expected {expected:#x}, computed {computed:#x}")]
    CrcMismatch {
        /// Expected CRC value from the container.
        expected: u32,
        /// Computed CRC value from data.
        computed: u32,
    },

    /// Invalid magic number in a container header.
    #[error("Invalid magic number: expected {expected:02x?}, found {found:02x?}")]
    InvalidMagic {
        /// Expected magic bytes.
        expected: Vec<u8>,
        /// Actual magic bytes found.
        found: Vec<u8>,
    },
}

/// Result type alias for OxiHuff operations.
pub type Result<T> = std::result::Result<T, OxiHuffError>;

impl OxiHuffError {
    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an end-of-stream error.
    pub fn end_of_stream(requested: u64, available: u64) -> Self {
        Self::EndOfStream {
            requested,
            available,
        }
    }

    /// Create a corrupt header error.
    pub fn corrupt_header(message: impl Into<String>) -> Self {
        Self::CorruptHeader {
            message: message.into(),
        }
    }

    /// Create an invalid code error.
    pub fn invalid_code(bit_position: u64) -> Self {
        Self::InvalidCode { bit_position }
    }

    /// Create a limit exceeded error.
    pub fn limit_exceeded(what: &'static str, value: u64, limit: u64) -> Self {
        Self::LimitExceeded { what, value, limit }
    }

    /// Create a CRC mismatch error.
    pub fn crc_mismatch(expected: u32, computed: u32) -> Self {
        Self::CrcMismatch { expected, computed }
    }

    /// Create an invalid magic error.
    pub fn invalid_magic(expected: impl Into<Vec<u8>>, found: impl Into<Vec<u8>>) -> Self {
        Self::InvalidMagic {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Whether this error means the input was cut short.
    pub fn is_truncation(&self) -> bool {
        matches!(self, Self::EndOfStream { .. })
    }
}
