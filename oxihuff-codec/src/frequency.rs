//! Symbol frequency tables.

use crate::symbol::Symbol;
use oxihuff_core::error::{OxiHuffError, Result};
use std::collections::HashMap;

/// Occurrence counts per symbol, in population order.
///
/// Population order is the order in which symbols were first recorded. It
/// fixes the sequence numbers used for tie-breaking during tree
/// construction and the order of entries in the persisted header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<T: Symbol> {
    /// (symbol, count) pairs in population order.
    entries: Vec<(T, u64)>,
    /// Symbol to position in `entries`.
    index: HashMap<T, usize>,
    /// Sum of all counts.
    total: u64,
}

impl<T: Symbol> FrequencyTable<T> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            total: 0,
        }
    }

    /// Count every symbol of `input` in a single pass.
    pub fn from_symbols(input: &[T]) -> Self {
        let mut table = Self::new();
        for &symbol in input {
            table.record(symbol);
        }
        table
    }

    /// Build a table from explicit `(symbol, count)` pairs, kept in the
    /// given order.
    ///
    /// Fails with `InvalidArgument` on a zero count, a repeated symbol, or
    /// a total that overflows `u64`.
    pub fn from_entries(entries: impl IntoIterator<Item = (T, u64)>) -> Result<Self> {
        let mut table = Self::new();
        for (symbol, count) in entries {
            table
                .try_insert(symbol, count)
                .map_err(OxiHuffError::invalid_argument)?;
        }
        Ok(table)
    }

    /// Record one occurrence of `symbol`.
    #[inline]
    pub fn record(&mut self, symbol: T) {
        match self.index.get(&symbol) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(symbol, self.entries.len());
                self.entries.push((symbol, 1));
            }
        }
        self.total += 1;
    }

    /// Insert a new symbol with a pre-computed count.
    ///
    /// The error string describes which invariant the pair would break.
    pub(crate) fn try_insert(&mut self, symbol: T, count: u64) -> std::result::Result<(), String> {
        if count == 0 {
            return Err(format!("symbol {symbol:?} has zero frequency"));
        }
        if self.index.contains_key(&symbol) {
            return Err(format!("symbol {symbol:?} listed twice"));
        }
        let total = self
            .total
            .checked_add(count)
            .ok_or_else(|| "frequency total overflows u64".to_string())?;

        self.index.insert(symbol, self.entries.len());
        self.entries.push((symbol, count));
        self.total = total;
        Ok(())
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no symbol has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts (the number of symbols in the source).
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Count for `symbol`, if present.
    pub fn get(&self, symbol: &T) -> Option<u64> {
        self.index.get(symbol).map(|&i| self.entries[i].1)
    }

    /// Iterate `(symbol, count)` pairs in population order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (T, u64)> + '_ {
        self.entries.iter().copied()
    }
}

impl<T: Symbol> Default for FrequencyTable<T> {
    fn default() -> Self {
        Self::new()
    }
}
