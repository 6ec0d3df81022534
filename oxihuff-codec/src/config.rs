//! Codec configuration.

use oxihuff_core::error::{OxiHuffError, Result};

/// Limits and strictness settings shared by encoder and decoder.
///
/// The encoder refuses inputs its decoder counterpart would reject, so a
/// unit produced under a configuration always decodes under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HuffmanConfig {
    /// Largest symbol count a unit may declare.
    pub max_symbol_count: u64,
    /// Largest number of distinct symbols a header may declare.
    pub max_distinct_symbols: u32,
    /// Reject payloads carrying meaningful bits past the last symbol.
    /// When unset such bits are ignored with a warning.
    pub strict_payload: bool,
}

impl HuffmanConfig {
    /// No limits, lenient payload handling.
    pub const DEFAULT: Self = Self {
        max_symbol_count: u64::MAX,
        max_distinct_symbols: u32::MAX,
        strict_payload: false,
    };

    /// Settings for untrusted input.
    ///
    /// - At most 2^32 symbols per unit
    /// - At most 2^16 distinct symbols
    /// - Trailing payload bits are an error
    pub const STRICT: Self = Self {
        max_symbol_count: 1 << 32,
        max_distinct_symbols: 1 << 16,
        strict_payload: true,
    };

    /// Create the default configuration.
    pub fn new() -> Self {
        Self::DEFAULT
    }

    /// Set the symbol count limit.
    pub fn with_max_symbol_count(mut self, limit: u64) -> Self {
        self.max_symbol_count = limit;
        self
    }

    /// Set the distinct symbol limit.
    pub fn with_max_distinct_symbols(mut self, limit: u32) -> Self {
        self.max_distinct_symbols = limit;
        self
    }

    /// Enable or disable strict payload checking.
    pub fn with_strict_payload(mut self, strict: bool) -> Self {
        self.strict_payload = strict;
        self
    }

    /// Check a declared symbol count against the limit.
    pub fn check_symbol_count(&self, count: u64) -> Result<()> {
        if count > self.max_symbol_count {
            return Err(OxiHuffError::limit_exceeded(
                "symbol count",
                count,
                self.max_symbol_count,
            ));
        }
        Ok(())
    }

    /// Check a declared distinct symbol count against the limit.
    pub fn check_distinct_symbols(&self, count: u64) -> Result<()> {
        if count > self.max_distinct_symbols as u64 {
            return Err(OxiHuffError::limit_exceeded(
                "distinct symbol count",
                count,
                self.max_distinct_symbols as u64,
            ));
        }
        Ok(())
    }
}

impl Default for HuffmanConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
