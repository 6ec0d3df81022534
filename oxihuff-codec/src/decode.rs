//! Huffman decoder (decompression).

use crate::code::CodeTable;
use crate::config::HuffmanConfig;
use crate::format::{EncodedUnit, parse_header};
use crate::frequency::FrequencyTable;
use crate::symbol::Symbol;
use crate::tree::HuffmanTree;
use log::{debug, warn};
use oxihuff_core::BitReader;
use oxihuff_core::error::{OxiHuffError, Result};

/// Huffman decoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffmanDecoder {
    config: HuffmanConfig,
}

impl HuffmanDecoder {
    /// Create a decoder with the given configuration.
    pub fn new(config: HuffmanConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &HuffmanConfig {
        &self.config
    }

    /// Decode a parsed unit.
    ///
    /// Fails with `EndOfStream` if the payload is shorter than the
    /// frequencies require. No partial output is returned on failure.
    pub fn decode<T: Symbol>(&self, unit: &EncodedUnit<T>) -> Result<Vec<T>> {
        self.config.check_symbol_count(unit.symbol_count())?;
        self.config
            .check_distinct_symbols(unit.frequencies().len() as u64)?;

        let mut reader = BitReader::new(unit.payload());
        self.decode_payload(unit.frequencies(), unit.symbol_count(), &mut reader)
    }

    /// Decode a serialized unit without copying its payload.
    pub fn decode_bytes<T: Symbol>(&self, bytes: &[u8]) -> Result<Vec<T>> {
        let (header, offset) = parse_header::<T>(bytes, &self.config)?;
        let mut reader = BitReader::from_slice(&bytes[offset..], header.padding)?;
        self.decode_payload(&header.frequencies, header.symbol_count, &mut reader)
    }

    fn decode_payload<T: Symbol>(
        &self,
        frequencies: &FrequencyTable<T>,
        symbol_count: u64,
        reader: &mut BitReader<'_>,
    ) -> Result<Vec<T>> {
        if symbol_count == 0 {
            return Ok(Vec::new());
        }

        let tree = HuffmanTree::build(frequencies)?;
        let table = CodeTable::from_tree(&tree)?;

        let expected_bits = table.payload_bits(frequencies);
        let available = reader.remaining();
        if available < expected_bits {
            return Err(OxiHuffError::end_of_stream(expected_bits, available));
        }
        if available > expected_bits {
            let extra = available - expected_bits;
            if self.config.strict_payload {
                return Err(OxiHuffError::corrupt_header(format!(
                    "payload carries {extra} bits past the last symbol"
                )));
            }
            warn!("[Huffman] Ignoring {extra} trailing payload bits");
        }

        // Every code is at least one bit, so the count is bounded by the
        // payload size checked above.
        let mut output = Vec::with_capacity(symbol_count as usize);
        for _ in 0..symbol_count {
            output.push(tree.decode_symbol(reader)?);
        }

        debug!(
            "[Huffman] Decoded {} symbols ({} distinct) from {} payload bits",
            symbol_count,
            frequencies.len(),
            reader.position()
        );
        Ok(output)
    }
}
