//! Persisted unit format.
//!
//! Every encoded unit is laid out as follows, all integers big-endian:
//!
//! ```text
//! [symbol_count: u64][distinct_symbols: u32]
//!   distinct_symbols x [symbol: T::WIDTH bytes][frequency: u64]
//! [padding_bits: u8]
//! [payload: bytes...]
//! ```
//!
//! Only frequencies are stored. The decoder rebuilds the tree with the same
//! deterministic construction the encoder used.

use crate::config::HuffmanConfig;
use crate::frequency::FrequencyTable;
use crate::symbol::Symbol;
use oxihuff_core::BitBuffer;
use oxihuff_core::error::{OxiHuffError, Result};

/// Size of `symbol_count` plus `distinct_symbols`.
pub const FIXED_HEADER_LEN: usize = 8 + 4;

/// Size of one stored frequency.
const FREQUENCY_LEN: usize = 8;

/// Size of the padding byte.
const PADDING_LEN: usize = 1;

/// Bytes taken by the header for `distinct` symbols of type `T`.
pub fn header_len<T: Symbol>(distinct: usize) -> usize {
    FIXED_HEADER_LEN + distinct * (T::WIDTH + FREQUENCY_LEN) + PADDING_LEN
}

/// A self-contained compressed unit: frequency header plus packed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedUnit<T: Symbol> {
    frequencies: FrequencyTable<T>,
    symbol_count: u64,
    payload: BitBuffer,
}

impl<T: Symbol> EncodedUnit<T> {
    /// The unit for empty input: no symbols, no payload.
    pub fn empty() -> Self {
        Self {
            frequencies: FrequencyTable::new(),
            symbol_count: 0,
            payload: BitBuffer::new(),
        }
    }

    pub(crate) fn from_parts(
        frequencies: FrequencyTable<T>,
        symbol_count: u64,
        payload: BitBuffer,
    ) -> Self {
        Self {
            frequencies,
            symbol_count,
            payload,
        }
    }

    /// Whether this unit encodes no symbols.
    pub fn is_empty(&self) -> bool {
        self.symbol_count == 0
    }

    /// Frequency table in population order.
    pub fn frequencies(&self) -> &FrequencyTable<T> {
        &self.frequencies
    }

    /// Number of symbols in the original input.
    pub fn symbol_count(&self) -> u64 {
        self.symbol_count
    }

    /// Packed payload.
    pub fn payload(&self) -> &BitBuffer {
        &self.payload
    }

    /// Serialized header size in bytes.
    pub fn header_len(&self) -> usize {
        header_len::<T>(self.frequencies.len())
    }

    /// Serialized size in bytes.
    pub fn encoded_len(&self) -> usize {
        self.header_len() + self.payload.len()
    }

    /// Size summary.
    pub fn stats(&self) -> UnitStats {
        UnitStats {
            symbol_count: self.symbol_count,
            distinct_symbols: self.frequencies.len(),
            raw_bytes: self.symbol_count.saturating_mul(T::WIDTH as u64),
            header_bytes: self.header_len() as u64,
            payload_bytes: self.payload.len() as u64,
            padding_bits: self.payload.padding_bits(),
        }
    }

    /// Serialize into a new byte vector.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.write_to(&mut out);
        out
    }

    /// Append the serialized unit to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.symbol_count.to_be_bytes());
        // The encoder rejects alphabets wider than u32::MAX.
        out.extend_from_slice(&(self.frequencies.len() as u32).to_be_bytes());
        for (symbol, count) in self.frequencies.iter() {
            symbol.write_be(out);
            out.extend_from_slice(&count.to_be_bytes());
        }
        out.push(self.payload.padding_bits());
        out.extend_from_slice(self.payload.as_bytes());
    }

    /// Parse a serialized unit with default limits.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes_with_config(bytes, &HuffmanConfig::DEFAULT)
    }

    /// Parse a serialized unit, enforcing the limits in `config`.
    pub fn from_bytes_with_config(bytes: &[u8], config: &HuffmanConfig) -> Result<Self> {
        let (header, offset) = parse_header::<T>(bytes, config)?;
        let payload = BitBuffer::from_parts(bytes[offset..].to_vec(), header.padding)?;
        Ok(Self {
            frequencies: header.frequencies,
            symbol_count: header.symbol_count,
            payload,
        })
    }
}

/// Size summary of an encoded unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitStats {
    /// Symbols in the original input.
    pub symbol_count: u64,
    /// Distinct symbols in the header.
    pub distinct_symbols: usize,
    /// Size of the original input in bytes.
    pub raw_bytes: u64,
    /// Header size in bytes.
    pub header_bytes: u64,
    /// Payload size in bytes.
    pub payload_bytes: u64,
    /// Padding bits in the last payload byte.
    pub padding_bits: u8,
}

impl UnitStats {
    /// Total serialized size.
    pub fn encoded_bytes(&self) -> u64 {
        self.header_bytes + self.payload_bytes
    }

    /// Encoded size as a percentage of the raw size (0 for empty input).
    pub fn ratio(&self) -> f64 {
        if self.raw_bytes == 0 {
            return 0.0;
        }
        self.encoded_bytes() as f64 / self.raw_bytes as f64 * 100.0
    }

    /// Space saved as a percentage of the raw size; negative on expansion.
    pub fn space_savings(&self) -> f64 {
        if self.raw_bytes == 0 {
            return 0.0;
        }
        100.0 - self.ratio()
    }
}

/// Parsed and validated header fields.
#[derive(Debug)]
pub(crate) struct Header<T: Symbol> {
    pub(crate) frequencies: FrequencyTable<T>,
    pub(crate) symbol_count: u64,
    pub(crate) padding: u8,
}

/// Big-endian cursor over header bytes.
struct HeaderCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> HeaderCursor<'a> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, len: usize, what: &str) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(OxiHuffError::corrupt_header(format!(
                "truncated {what}: need {len} bytes at offset {}, {} left",
                self.pos,
                self.remaining()
            )));
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn read_u64(&mut self, what: &str) -> Result<u64> {
        let bytes = self.take(8, what)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(bytes);
        Ok(u64::from_be_bytes(buf))
    }

    fn read_u32(&mut self, what: &str) -> Result<u32> {
        let bytes = self.take(4, what)?;
        let mut buf = [0u8; 4];
        buf.copy_from_slice(bytes);
        Ok(u32::from_be_bytes(buf))
    }

    fn read_u8(&mut self, what: &str) -> Result<u8> {
        Ok(self.take(1, what)?[0])
    }
}

/// Parse and validate the header, returning it with the payload offset.
pub(crate) fn parse_header<T: Symbol>(
    bytes: &[u8],
    config: &HuffmanConfig,
) -> Result<(Header<T>, usize)> {
    let mut cursor = HeaderCursor {
        data: bytes,
        pos: 0,
    };

    let symbol_count = cursor.read_u64("symbol count")?;
    config.check_symbol_count(symbol_count)?;

    let distinct = cursor.read_u32("distinct symbol count")?;
    config.check_distinct_symbols(distinct as u64)?;

    let table_len = distinct as usize * (T::WIDTH + FREQUENCY_LEN);
    if cursor.remaining() < table_len + PADDING_LEN {
        return Err(OxiHuffError::corrupt_header(format!(
            "header declares {distinct} symbols ({} bytes) but only {} bytes follow",
            table_len + PADDING_LEN,
            cursor.remaining()
        )));
    }

    let mut frequencies = FrequencyTable::new();
    for _ in 0..distinct {
        let raw = cursor.take(T::WIDTH, "symbol")?;
        let symbol = T::read_be(raw).ok_or_else(|| {
            OxiHuffError::corrupt_header(format!("undecodable symbol value {raw:02x?}"))
        })?;
        let count = cursor.read_u64("frequency")?;
        frequencies
            .try_insert(symbol, count)
            .map_err(OxiHuffError::corrupt_header)?;
    }

    let padding = cursor.read_u8("padding")?;
    if padding > 7 {
        return Err(OxiHuffError::corrupt_header(format!(
            "padding of {padding} bits exceeds 7"
        )));
    }

    if frequencies.total() != symbol_count {
        return Err(OxiHuffError::corrupt_header(format!(
            "frequencies sum to {} but header declares {symbol_count} symbols",
            frequencies.total()
        )));
    }

    if symbol_count == 0 && (padding != 0 || cursor.remaining() != 0) {
        return Err(OxiHuffError::corrupt_header(
            "empty unit carries payload data",
        ));
    }

    Ok((
        Header {
            frequencies,
            symbol_count,
            padding,
        },
        cursor.pos,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxihuff_core::BitWriter;

    fn sample_unit() -> EncodedUnit<u8> {
        let frequencies = FrequencyTable::from_symbols(b"aab".as_slice());
        let mut writer = BitWriter::new();
        writer.write_bits(0b001, 3).unwrap();
        EncodedUnit::from_parts(frequencies, 3, writer.flush().unwrap())
    }

    #[test]
    fn test_layout() {
        let bytes = sample_unit().to_bytes();
        let expected = [
            0, 0, 0, 0, 0, 0, 0, 3, // symbol count
            0, 0, 0, 2, // distinct symbols
            b'a', 0, 0, 0, 0, 0, 0, 0, 2, // a: 2
            b'b', 0, 0, 0, 0, 0, 0, 0, 1, // b: 1
            5,           // padding
            0b0010_0000, // payload
        ];
        assert_eq!(bytes, expected);
        assert_eq!(sample_unit().encoded_len(), expected.len());
    }

    #[test]
    fn test_parse_back() {
        let unit = sample_unit();
        let parsed = EncodedUnit::<u8>::from_bytes(&unit.to_bytes()).unwrap();
        assert_eq!(parsed, unit);
    }

    #[test]
    fn test_empty_unit() {
        let unit = EncodedUnit::<u8>::empty();
        let bytes = unit.to_bytes();
        assert_eq!(bytes.len(), FIXED_HEADER_LEN + 1);
        assert!(bytes.iter().all(|&b| b == 0));

        let parsed = EncodedUnit::<u8>::from_bytes(&bytes).unwrap();
        assert!(parsed.is_empty());
        assert_eq!(parsed.stats().ratio(), 0.0);
    }

    #[test]
    fn test_truncated_fixed_fields() {
        for len in 0..FIXED_HEADER_LEN {
            let bytes = vec![0u8; len];
            assert!(matches!(
                EncodedUnit::<u8>::from_bytes(&bytes),
                Err(OxiHuffError::CorruptHeader { .. })
            ));
        }
    }

    #[test]
    fn test_distinct_count_exceeds_length() {
        let mut bytes = sample_unit().to_bytes();
        bytes[11] = 200;
        let err = EncodedUnit::<u8>::from_bytes(&bytes).unwrap_err();
        assert!(err.to_string().contains("declares 200 symbols"));
    }

    #[test]
    fn test_frequency_sum_mismatch() {
        let mut bytes = sample_unit().to_bytes();
        bytes[7] = 4;
        assert!(matches!(
            EncodedUnit::<u8>::from_bytes(&bytes),
            Err(OxiHuffError::CorruptHeader { .. })
        ));
    }

    #[test]
    fn test_bad_padding() {
        let mut bytes = sample_unit().to_bytes();
        bytes[30] = 8;
        assert!(matches!(
            EncodedUnit::<u8>::from_bytes(&bytes),
            Err(OxiHuffError::CorruptHeader { .. })
        ));
    }

    #[test]
    fn test_duplicate_and_zero_frequency() {
        let mut dup = sample_unit().to_bytes();
        dup[21] = b'a';
        assert!(EncodedUnit::<u8>::from_bytes(&dup).is_err());

        let mut zero = sample_unit().to_bytes();
        zero[29] = 0;
        assert!(EncodedUnit::<u8>::from_bytes(&zero).is_err());
    }

    #[test]
    fn test_empty_unit_with_payload() {
        let mut bytes = EncodedUnit::<u8>::empty().to_bytes();
        bytes.push(0xFF);
        assert!(matches!(
            EncodedUnit::<u8>::from_bytes(&bytes),
            Err(OxiHuffError::CorruptHeader { .. })
        ));
    }

    #[test]
    fn test_limits() {
        let bytes = sample_unit().to_bytes();
        let config = HuffmanConfig::new().with_max_symbol_count(2);
        assert!(matches!(
            EncodedUnit::<u8>::from_bytes_with_config(&bytes, &config),
            Err(OxiHuffError::LimitExceeded { .. })
        ));

        let config = HuffmanConfig::new().with_max_distinct_symbols(1);
        assert!(matches!(
            EncodedUnit::<u8>::from_bytes_with_config(&bytes, &config),
            Err(OxiHuffError::LimitExceeded { .. })
        ));
    }

    #[test]
    fn test_invalid_char_symbol() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&1u64.to_be_bytes());
        bytes.extend_from_slice(&1u32.to_be_bytes());
        bytes.extend_from_slice(&0xD800u32.to_be_bytes());
        bytes.extend_from_slice(&1u64.to_be_bytes());
        bytes.extend_from_slice(&[7, 0x00]);
        let err = EncodedUnit::<char>::from_bytes(&bytes).unwrap_err();
        assert!(err.to_string().contains("undecodable symbol"));
    }

    #[test]
    fn test_stats() {
        let stats = sample_unit().stats();
        assert_eq!(stats.symbol_count, 3);
        assert_eq!(stats.distinct_symbols, 2);
        assert_eq!(stats.raw_bytes, 3);
        assert_eq!(stats.header_bytes, 31);
        assert_eq!(stats.payload_bytes, 1);
        assert_eq!(stats.encoded_bytes(), 32);
        assert!(stats.space_savings() < 0.0);
    }
}
