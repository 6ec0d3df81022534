//! Prefix codes and code tables.
//!
//! Codes are read off root-to-leaf paths (left edge `0`, right edge `1`),
//! so no code is a prefix of another. No canonicalization or length
//! limiting is applied.

use crate::frequency::FrequencyTable;
use crate::symbol::Symbol;
use crate::tree::{HuffmanTree, Node};
use oxihuff_core::BitWriter;
use oxihuff_core::error::{OxiHuffError, Result};
use std::collections::HashMap;
use std::fmt;

/// Longest representable code.
///
/// Trees built from `u64` frequency totals cannot exceed roughly 92 levels
/// (a Fibonacci-weighted alphabet), so this bound is never reached in
/// practice.
pub const MAX_CODE_LENGTH: u8 = 127;

/// A variable-length code, MSB-first.
///
/// The first bit of the code is the most significant of the `len` low bits
/// of `bits`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Code {
    bits: u128,
    len: u8,
}

impl Code {
    /// Build a code from its `len` low bits.
    ///
    /// Fails with `InvalidArgument` if `len` exceeds [`MAX_CODE_LENGTH`] or
    /// `bits` has bits set above `len`.
    pub fn new(bits: u128, len: u8) -> Result<Self> {
        if len > MAX_CODE_LENGTH {
            return Err(OxiHuffError::invalid_argument(format!(
                "code length {len} exceeds {MAX_CODE_LENGTH}"
            )));
        }
        if bits >> len != 0 {
            return Err(OxiHuffError::invalid_argument(format!(
                "code value {bits:#b} does not fit in {len} bits"
            )));
        }
        Ok(Self { bits, len })
    }

    /// Extend the code by one bit.
    fn push(self, bit: bool) -> Result<Self> {
        Self::new((self.bits << 1) | bit as u128, self.len + 1)
    }

    /// Length in bits.
    pub fn len(&self) -> u8 {
        self.len
    }

    /// Whether the code has no bits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The code bits, right-aligned.
    pub fn bits(&self) -> u128 {
        self.bits
    }

    /// The `index`-th bit, counting from the first bit emitted.
    pub fn bit(&self, index: u8) -> Option<bool> {
        (index < self.len).then(|| (self.bits >> (self.len - 1 - index)) & 1 == 1)
    }

    /// Whether `self` is a prefix of `other` (a code is a prefix of itself).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && other.bits >> (other.len - self.len) == self.bits
    }

    /// Emit the code through `writer`.
    #[inline]
    pub fn write_to(&self, writer: &mut BitWriter) -> Result<()> {
        match self.len {
            0 => Ok(()),
            1..=64 => writer.write_bits(self.bits as u64, self.len),
            _ => {
                writer.write_bits((self.bits >> 64) as u64, self.len - 64)?;
                writer.write_bits(self.bits as u64, 64)
            }
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.len {
            let bit = (self.bits >> (self.len - 1 - i)) & 1;
            write!(f, "{bit}")?;
        }
        Ok(())
    }
}

/// Symbol to code mapping derived from a [`HuffmanTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable<T: Symbol> {
    codes: HashMap<T, Code>,
    max_len: u8,
}

impl<T: Symbol> CodeTable<T> {
    /// Derive codes by depth-first traversal of `tree`.
    ///
    /// A tree that is a single leaf assigns that symbol the 1-bit code `0`.
    pub fn from_tree(tree: &HuffmanTree<T>) -> Result<Self> {
        let mut codes = HashMap::with_capacity(tree.leaf_count());
        let mut max_len = 0u8;

        let start = match tree.root() {
            Node::Leaf { .. } => Code::default().push(false)?,
            Node::Internal { .. } => Code::default(),
        };
        let mut stack = vec![(tree.root(), start)];

        while let Some((node, code)) = stack.pop() {
            match node {
                Node::Leaf { symbol, .. } => {
                    max_len = max_len.max(code.len());
                    codes.insert(*symbol, code);
                }
                Node::Internal { left, right, .. } => {
                    stack.push((right.as_ref(), code.push(true)?));
                    stack.push((left.as_ref(), code.push(false)?));
                }
            }
        }

        Ok(Self { codes, max_len })
    }

    /// Code for `symbol`, if it is part of the alphabet.
    #[inline]
    pub fn get(&self, symbol: &T) -> Option<&Code> {
        self.codes.get(symbol)
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Length of the longest code.
    pub fn max_len(&self) -> u8 {
        self.max_len
    }

    /// All `(symbol, code)` pairs sorted by symbol.
    pub fn sorted(&self) -> Vec<(T, Code)> {
        let mut pairs: Vec<_> = self.codes.iter().map(|(&s, &c)| (s, c)).collect();
        pairs.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        pairs
    }

    /// Exact payload size in bits for data with these `frequencies`.
    ///
    /// Symbols missing from the table contribute nothing.
    pub fn payload_bits(&self, frequencies: &FrequencyTable<T>) -> u64 {
        frequencies
            .iter()
            .filter_map(|(symbol, count)| {
                self.get(&symbol)
                    .map(|code| count.saturating_mul(code.len() as u64))
            })
            .fold(0u64, u64::saturating_add)
    }
}

impl<T: Symbol> fmt::Display for CodeTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (symbol, code) in self.sorted() {
            writeln!(f, "{symbol:?}: {code} ({} bits)", code.len())?;
        }
        Ok(())
    }
}
