//! Bit-level I/O over in-memory buffers.
//!
//! This module provides [`BitWriter`] and [`BitReader`] for packing and
//! unpacking variable-length codes, plus the sealed [`BitBuffer`] they
//! exchange.
//!
//! # Bit Ordering
//!
//! Bits are packed MSB-first: the first bit written lands in bit 7 of the
//! first byte. Multi-bit groups are written most-significant bit first, so
//! `write_bits(0b101, 3)` followed by `flush()` yields `0b1010_0000`. The
//! layout never depends on host endianness.
//!
//! # Example
//!
//! ```
//! use oxihuff_core::bitstream::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0b101, 3).unwrap();
//! writer.write_bits(0b1100, 4).unwrap();
//! let buffer = writer.flush().unwrap();
//! assert_eq!(buffer.as_bytes(), &[0b1011_1000]);
//! assert_eq!(buffer.padding_bits(), 1);
//!
//! let mut reader = BitReader::new(&buffer);
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(4).unwrap(), 0b1100);
//! assert_eq!(reader.remaining(), 0);
//! ```

use crate::error::{OxiHuffError, Result};

/// Widest bit group accepted by [`BitWriter::write_bits`] and
/// [`BitReader::read_bits`].
pub const MAX_BITS_PER_CALL: u8 = 64;

/// A sealed, byte-aligned bit sequence.
///
/// Holds the packed bytes and the number of zero padding bits (0-7) at the
/// end of the last byte that are not part of the logical content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    /// Packed bytes, MSB-first.
    bytes: Vec<u8>,
    /// Trailing padding bits in the last byte.
    padding: u8,
}

impl BitBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a buffer from stored bytes and a declared padding count.
    ///
    /// Fails with `InvalidArgument` if `padding` exceeds 7.
    pub fn from_parts(bytes: Vec<u8>, padding: u8) -> Result<Self> {
        check_padding(padding)?;
        Ok(Self { bytes, padding })
    }

    /// The packed bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of padding bits in the last byte.
    pub fn padding_bits(&self) -> u8 {
        self.padding
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of meaningful bits (bytes * 8 minus padding).
    pub fn bit_len(&self) -> u64 {
        meaningful_bits(self.bytes.len(), self.padding)
    }

    /// Consume the buffer, returning the bytes and padding count.
    pub fn into_parts(self) -> (Vec<u8>, u8) {
        (self.bytes, self.padding)
    }
}

fn check_padding(padding: u8) -> Result<()> {
    if padding > 7 {
        return Err(OxiHuffError::invalid_argument(format!(
            "padding of {padding} bits exceeds 7"
        )));
    }
    Ok(())
}

fn check_width(count: u8) -> Result<()> {
    if count == 0 || count > MAX_BITS_PER_CALL {
        return Err(OxiHuffError::invalid_argument(format!(
            "bit count {count} outside 1..={MAX_BITS_PER_CALL}"
        )));
    }
    Ok(())
}

fn meaningful_bits(len: usize, padding: u8) -> u64 {
    (len as u64 * 8).saturating_sub(padding as u64)
}

/// MSB-first bit writer that accumulates into an owned byte buffer.
///
/// Call [`flush`](Self::flush) to pad the final byte and take the sealed
/// [`BitBuffer`]. The writer is closed afterwards.
#[derive(Debug, Default)]
pub struct BitWriter {
    /// Committed bytes.
    output: Vec<u8>,
    /// Pending bits (right-aligned, fewer than 8 between calls).
    buffer: u64,
    /// Number of pending bits in `buffer`.
    bits_in_buffer: u8,
    /// Total bits written.
    total_bits_written: u64,
    /// Set once `flush` has sealed the output.
    closed: bool,
}

impl BitWriter {
    /// Create a new, empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with room for `bits` bits.
    pub fn with_capacity(bits: u64) -> Self {
        let bytes = usize::try_from(bits.div_ceil(8)).unwrap_or(usize::MAX);
        Self {
            output: Vec::with_capacity(bytes),
            ..Self::default()
        }
    }

    /// Total bits written so far (padding excluded).
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Whether [`flush`](Self::flush) has already been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[inline]
    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(OxiHuffError::StreamClosed);
        }
        Ok(())
    }

    /// Append up to 32 bits and commit every complete byte.
    #[inline]
    fn push_bits(&mut self, value: u64, count: u8) {
        debug_assert!(count <= 32);

        let mask = (1u64 << count) - 1;
        self.buffer = (self.buffer << count) | (value & mask);
        self.bits_in_buffer += count;
        self.total_bits_written += count as u64;

        while self.bits_in_buffer >= 8 {
            let byte = (self.buffer >> (self.bits_in_buffer - 8)) as u8;
            self.output.push(byte);
            self.bits_in_buffer -= 8;
        }
        self.buffer &= (1u64 << self.bits_in_buffer) - 1;
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.ensure_open()?;
        self.push_bits(bit as u64, 1);
        Ok(())
    }

    /// Write the `count` least-significant bits of `value`, MSB first.
    ///
    /// `count` must be in `1..=64`.
    pub fn write_bits(&mut self, value: u64, count: u8) -> Result<()> {
        self.ensure_open()?;
        check_width(count)?;

        if count > 32 {
            self.push_bits(value >> 32, count - 32);
            self.push_bits(value & 0xFFFF_FFFF, 32);
        } else {
            self.push_bits(value, count);
        }
        Ok(())
    }

    /// Pad the partial byte with zeros and seal the output.
    ///
    /// Any later write or flush fails with `StreamClosed`.
    pub fn flush(&mut self) -> Result<BitBuffer> {
        self.ensure_open()?;

        let mut padding = 0u8;
        if self.bits_in_buffer > 0 {
            padding = 8 - self.bits_in_buffer;
            self.output.push((self.buffer << padding) as u8);
            self.buffer = 0;
            self.bits_in_buffer = 0;
        }
        self.closed = true;

        Ok(BitBuffer {
            bytes: std::mem::take(&mut self.output),
            padding,
        })
    }
}

/// MSB-first bit reader over a borrowed byte slice.
///
/// Only the meaningful bits are readable: trailing padding declared by the
/// buffer is never returned.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    /// Input data.
    data: &'a [u8],
    /// Number of meaningful bits in `data`.
    bit_len: u64,
    /// Bit cursor.
    position: u64,
}

impl<'a> BitReader<'a> {
    /// Create a reader over a sealed buffer.
    pub fn new(buffer: &'a BitBuffer) -> Self {
        Self {
            data: &buffer.bytes,
            bit_len: buffer.bit_len(),
            position: 0,
        }
    }

    /// Create a reader over raw bytes whose last byte carries `padding`
    /// unused bits.
    pub fn from_slice(data: &'a [u8], padding: u8) -> Result<Self> {
        check_padding(padding)?;
        Ok(Self {
            data,
            bit_len: meaningful_bits(data.len(), padding),
            position: 0,
        })
    }

    /// Number of bits consumed so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Number of unread meaningful bits.
    pub fn remaining(&self) -> u64 {
        self.bit_len - self.position
    }

    /// Read one bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.position >= self.bit_len {
            return Err(OxiHuffError::end_of_stream(1, 0));
        }

        let byte = self.data[(self.position / 8) as usize];
        let shift = 7 - (self.position % 8);
        self.position += 1;

        Ok((byte >> shift) & 1 != 0)
    }

    /// Read `count` bits (1..=64), reassembled MSB first.
    ///
    /// On `EndOfStream` the cursor is left untouched.
    pub fn read_bits(&mut self, count: u8) -> Result<u64> {
        check_width(count)?;

        let available = self.remaining();
        if available < count as u64 {
            return Err(OxiHuffError::end_of_stream(count as u64, available));
        }

        let mut value = 0u64;
        let mut left = count as u64;
        while left > 0 {
            let byte = self.data[(self.position / 8) as usize] as u64;
            let in_byte = 8 - self.position % 8;
            let take = in_byte.min(left);
            let bits = (byte >> (in_byte - take)) & ((1u64 << take) - 1);

            value = (value << take) | bits;
            self.position += take;
            left -= take;
        }

        Ok(value)
    }
}
