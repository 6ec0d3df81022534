//! # OxiHuff Codec
//!
//! Pure Rust Huffman coding over arbitrary symbol alphabets.
//!
//! A unit is compressed by counting symbol frequencies, building a
//! deterministic Huffman tree, and packing each symbol's prefix code
//! MSB-first into a bit buffer. Only the frequency table is persisted; the
//! decoder rebuilds the identical tree from it.
//!
//! ## Features
//!
//! - **Generic alphabet**: `u8`, `u16`, `u32`, `u64`, and `char` symbols
//!   via the [`Symbol`] trait
//! - **Deterministic trees**: ties are broken by construction order
//! - **Byte-exact format**: big-endian header, see [`format`]
//! - **Exact truncation detection**: the decoder knows the payload length
//!   before it starts walking the tree
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_codec::{compress, decompress};
//!
//! let original = b"aaaabbbcc";
//! let compressed = compress(original).unwrap();
//! let decompressed = decompress(&compressed).unwrap();
//! assert_eq!(decompressed, original);
//! ```
//!
//! ## Other alphabets
//!
//! ```rust
//! use oxihuff_codec::{decode, encode};
//!
//! let text: Vec<char> = "ünïcödé ünïcödé".chars().collect();
//! let unit = encode(&text).unwrap();
//! assert_eq!(decode(&unit).unwrap(), text);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod code;
pub mod config;
pub mod decode;
pub mod encode;
pub mod format;
pub mod frequency;
pub mod symbol;
pub mod tree;

pub use code::{Code, CodeTable};
pub use config::HuffmanConfig;
pub use decode::HuffmanDecoder;
pub use encode::HuffmanEncoder;
pub use format::{EncodedUnit, UnitStats};
pub use frequency::FrequencyTable;
pub use symbol::Symbol;
pub use tree::{HuffmanTree, Node};

pub use oxihuff_core::error::{OxiHuffError, Result};

/// Compress bytes into a serialized unit.
///
/// # Example
///
/// ```rust
/// use oxihuff_codec::compress;
///
/// let data = b"TOBEORNOTTOBEORTOBEORNOT".repeat(8);
/// let compressed = compress(&data).unwrap();
/// assert!(compressed.len() < data.len());
/// ```
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    HuffmanEncoder::default().encode_to_vec(data)
}

/// Decompress a serialized unit back into bytes.
///
/// # Example
///
/// ```rust
/// use oxihuff_codec::{compress, decompress};
///
/// let compressed = compress(b"").unwrap();
/// assert!(decompress(&compressed).unwrap().is_empty());
/// ```
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    HuffmanDecoder::default().decode_bytes(data)
}

/// Encode symbols with the default configuration.
pub fn encode<T: Symbol>(input: &[T]) -> Result<EncodedUnit<T>> {
    HuffmanEncoder::default().encode(input)
}

/// Decode a unit with the default configuration.
pub fn decode<T: Symbol>(unit: &EncodedUnit<T>) -> Result<Vec<T>> {
    HuffmanDecoder::default().decode(unit)
}
