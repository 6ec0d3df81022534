//! Huffman encoder (compression).

use crate::code::CodeTable;
use crate::config::HuffmanConfig;
use crate::format::EncodedUnit;
use crate::frequency::FrequencyTable;
use crate::symbol::Symbol;
use crate::tree::HuffmanTree;
use log::{debug, log_enabled, trace, warn};
use oxihuff_core::BitWriter;
use oxihuff_core::error::{OxiHuffError, Result};

/// Huffman encoder.
///
/// Holds only configuration; every call owns its own tree, table, and
/// buffers, so one encoder can be shared across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffmanEncoder {
    config: HuffmanConfig,
}

impl HuffmanEncoder {
    /// Create an encoder with the given configuration.
    pub fn new(config: HuffmanConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &HuffmanConfig {
        &self.config
    }

    /// Encode `input` into a self-contained unit.
    ///
    /// # Algorithm
    ///
    /// 1. Count symbol frequencies in one pass
    /// 2. Build the Huffman tree and derive the code table
    /// 3. Stream every symbol's code through a [`BitWriter`] and seal it
    ///
    /// Empty input yields [`EncodedUnit::empty`] without building a tree.
    /// Output is deterministic for identical input.
    pub fn encode<T: Symbol>(&self, input: &[T]) -> Result<EncodedUnit<T>> {
        if input.is_empty() {
            debug!("[Huffman] Empty input, emitting empty unit");
            return Ok(EncodedUnit::empty());
        }

        let symbol_count = input.len() as u64;
        self.config.check_symbol_count(symbol_count)?;

        let frequencies = FrequencyTable::from_symbols(input);
        self.config.check_distinct_symbols(frequencies.len() as u64)?;
        if frequencies.len() > u32::MAX as usize {
            return Err(OxiHuffError::invalid_argument(format!(
                "{} distinct symbols do not fit the u32 header field",
                frequencies.len()
            )));
        }

        let tree = HuffmanTree::build(&frequencies)?;
        let table = CodeTable::from_tree(&tree)?;
        if log_enabled!(log::Level::Trace) {
            trace!("[Huffman] Code table:\n{table}");
        }

        let payload_bits = table.payload_bits(&frequencies);
        let mut writer = BitWriter::with_capacity(payload_bits);
        for symbol in input {
            let code = table.get(symbol).ok_or_else(|| {
                OxiHuffError::invalid_argument(format!("symbol {symbol:?} missing from code table"))
            })?;
            code.write_to(&mut writer)?;
        }
        debug_assert_eq!(writer.bits_written(), payload_bits);
        let payload = writer.flush()?;

        let unit = EncodedUnit::from_parts(frequencies, symbol_count, payload);
        let stats = unit.stats();
        debug!(
            "[Huffman] Encoded {} symbols ({} distinct, max code {} bits): {} -> {} bytes ({:.2}%), table overhead {} bytes",
            stats.symbol_count,
            stats.distinct_symbols,
            table.max_len(),
            stats.raw_bytes,
            stats.encoded_bytes(),
            stats.ratio(),
            stats.header_bytes,
        );
        if stats.encoded_bytes() > stats.raw_bytes {
            warn!(
                "[Huffman] No compression achieved: {} -> {} bytes",
                stats.raw_bytes,
                stats.encoded_bytes()
            );
        }

        Ok(unit)
    }

    /// Encode `input` straight to its serialized form.
    pub fn encode_to_vec<T: Symbol>(&self, input: &[T]) -> Result<Vec<u8>> {
        Ok(self.encode(input)?.to_bytes())
    }
}
