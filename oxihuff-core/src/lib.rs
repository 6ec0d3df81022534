//! # OxiHuff Core
//!
//! Core components for the OxiHuff Huffman codec.
//!
//! - [`bitstream`]: MSB-first bit-level I/O over in-memory buffers
//! - [`crc`]: CRC-32 for out-of-band integrity checks
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ CLI                                                     │
//! │     oxihuff binary, checksummed file container          │
//! ├─────────────────────────────────────────────────────────┤
//! │ Codec                                                   │
//! │     frequency table, tree, code table, wire format      │
//! ├─────────────────────────────────────────────────────────┤
//! │ BitStream (this crate)                                  │
//! │     BitWriter/BitReader, BitBuffer, CRC-32              │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_core::bitstream::{BitReader, BitWriter};
//! use oxihuff_core::crc::Crc32;
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0xABC, 12).unwrap();
//! let buffer = writer.flush().unwrap();
//!
//! let mut reader = BitReader::new(&buffer);
//! assert_eq!(reader.read_bits(12).unwrap(), 0xABC);
//!
//! let crc = Crc32::compute(b"Hello, World!");
//! assert_eq!(crc, 0xEC4AC3D0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod crc;
pub mod error;

// Re-exports for convenience
pub use bitstream::{BitBuffer, BitReader, BitWriter};
pub use crc::Crc32;
pub use error::{OxiHuffError, Result};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{BitBuffer, BitReader, BitWriter};
    pub use crate::crc::Crc32;
    pub use crate::error::{OxiHuffError, Result};
}
