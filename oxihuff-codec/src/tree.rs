//! Huffman tree construction.
//!
//! Trees are built by greedy merging of the two lowest-weight nodes. The
//! construction is fully deterministic so that an encoder and a decoder
//! holding the same [`FrequencyTable`] derive the same codes.
//!
//! # Tie-break rule
//!
//! Every node carries a sequence number: leaves are numbered in the table's
//! population order, and each merged node takes the next unused number.
//! Among nodes of equal weight the one with the lower sequence number is
//! extracted first. Of each extracted pair, the first becomes the left
//! (`0`) child and the second the right (`1`) child.

use crate::frequency::FrequencyTable;
use crate::symbol::Symbol;
use oxihuff_core::BitReader;
use oxihuff_core::error::{OxiHuffError, Result};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Node in the Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<T> {
    /// A single symbol.
    Leaf {
        /// The symbol.
        symbol: T,
        /// Occurrence count.
        weight: u64,
    },
    /// Two exclusively owned children.
    Internal {
        /// Sum of the children's weights.
        weight: u64,
        /// Child on the `0` edge.
        left: Box<Node<T>>,
        /// Child on the `1` edge.
        right: Box<Node<T>>,
    },
}

impl<T> Node<T> {
    /// Weight of this subtree.
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// Heap entry ordered by `(weight, sequence)` only.
#[derive(Debug)]
struct Pending<T> {
    weight: u64,
    sequence: u64,
    node: Node<T>,
}

impl<T> PartialEq for Pending<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Pending<T> {}

impl<T> PartialOrd for Pending<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Pending<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.weight, self.sequence).cmp(&(other.weight, other.sequence))
    }
}

/// A Huffman tree built from a frequency table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree<T> {
    root: Node<T>,
    leaves: usize,
}

impl<T: Symbol> HuffmanTree<T> {
    /// Build the tree for `frequencies`.
    ///
    /// Fails with `InvalidArgument` if the table is empty. A table with a
    /// single symbol yields a tree that is one leaf.
    pub fn build(frequencies: &FrequencyTable<T>) -> Result<Self> {
        let leaves = frequencies.len();
        let mut heap = BinaryHeap::with_capacity(leaves);
        let mut sequence = 0u64;

        for (symbol, weight) in frequencies.iter() {
            heap.push(Reverse(Pending {
                weight,
                sequence,
                node: Node::Leaf { symbol, weight },
            }));
            sequence += 1;
        }

        loop {
            let Some(Reverse(left)) = heap.pop() else {
                return Err(OxiHuffError::invalid_argument(
                    "cannot build a Huffman tree from an empty frequency table",
                ));
            };
            let Some(Reverse(right)) = heap.pop() else {
                return Ok(Self {
                    root: left.node,
                    leaves,
                });
            };

            // Bounded by the table total, which fits in u64.
            let weight = left.weight + right.weight;
            heap.push(Reverse(Pending {
                weight,
                sequence,
                node: Node::Internal {
                    weight,
                    left: Box::new(left.node),
                    right: Box::new(right.node),
                },
            }));
            sequence += 1;
        }
    }

    /// The root node.
    pub fn root(&self) -> &Node<T> {
        &self.root
    }

    /// Number of leaves (distinct symbols).
    pub fn leaf_count(&self) -> usize {
        self.leaves
    }

    /// Decode one symbol by walking from the root, one bit per edge.
    ///
    /// A single-leaf tree consumes exactly one bit, which must be `0`.
    #[inline]
    pub fn decode_symbol(&self, reader: &mut BitReader<'_>) -> Result<T> {
        let mut node = &self.root;

        if let Node::Leaf { symbol, .. } = node {
            let position = reader.position();
            if reader.read_bit()? {
                return Err(OxiHuffError::invalid_code(position));
            }
            return Ok(*symbol);
        }

        loop {
            match node {
                Node::Leaf { symbol, .. } => return Ok(*symbol),
                Node::Internal { left, right, .. } => {
                    node = if reader.read_bit()? { right } else { left };
                }
            }
        }
    }
}
