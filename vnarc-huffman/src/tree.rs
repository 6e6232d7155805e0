//! Huffman tree construction and bit-by-bit decoding.
//!
//! Trees are stored flat: node ids below the alphabet size are leaves (the
//! id is the symbol), larger ids are internal nodes indexing `children`.

use log::{debug, trace};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use vnarc_core::bitstream::BitReader;
use vnarc_core::error::{Result, VnArcError};

/// Longest code accepted by [`HuffmanTree::from_lengths`].
pub const MAX_CODE_LENGTH: u8 = 24;

/// Largest alphabet a tree can hold.
pub const MAX_SYMBOLS: usize = 1 << 16;

/// Marker for an absent child or parent.
const NONE: u32 = u32::MAX;

/// Which child a stream bit selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Polarity {
    /// Bit 0 selects child 0.
    #[default]
    ZeroIsChild0,
    /// Bit 1 selects child 0.
    OneIsChild0,
}

impl Polarity {
    /// Child index selected by `bit`.
    #[inline]
    pub fn child(self, bit: u8) -> usize {
        match self {
            Self::ZeroIsChild0 => bit as usize,
            Self::OneIsChild0 => (bit ^ 1) as usize,
        }
    }

    /// Stream bit that selects `child`.
    #[inline]
    pub fn bit(self, child: u8) -> u8 {
        match self {
            Self::ZeroIsChild0 => child,
            Self::OneIsChild0 => child ^ 1,
        }
    }
}

/// A binary code tree over an alphabet of up to [`MAX_SYMBOLS`] symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    /// Alphabet size.
    symbols: usize,
    /// `[child0, child1]` of each internal node.
    children: Vec<[u32; 2]>,
    /// Parent of every node, leaves first.
    parents: Vec<u32>,
    /// Root node id.
    root: u32,
    /// Sum of the weights for weight-built trees.
    total_weight: Option<u64>,
}

impl HuffmanTree {
    /// Build a tree by repeatedly merging the two lightest nodes.
    ///
    /// Ties go to the lowest node id, so leaves win over merged nodes and
    /// older merged nodes over newer ones. The lightest of each pair becomes
    /// child 1. A table with a single nonzero weight yields a zero-bit code.
    pub fn from_weights(weights: &[u32]) -> Result<Self> {
        let symbols = weights.len();
        check_alphabet(symbols)?;

        let mut heap: BinaryHeap<Reverse<(u64, u32)>> = weights
            .iter()
            .enumerate()
            .filter(|&(_, &w)| w > 0)
            .map(|(symbol, &w)| Reverse((w as u64, symbol as u32)))
            .collect();
        let total_weight: u64 = weights.iter().map(|&w| w as u64).sum();

        let mut tree = Self {
            symbols,
            children: Vec::with_capacity(heap.len().saturating_sub(1)),
            parents: vec![NONE; symbols],
            root: NONE,
            total_weight: Some(total_weight),
        };

        loop {
            match (heap.pop(), heap.pop()) {
                (None, _) => {
                    return Err(VnArcError::invalid_table("every weight is zero"));
                }
                (Some(Reverse((_, node))), None) => {
                    tree.root = node;
                    break;
                }
                (Some(Reverse((w1, lightest))), Some(Reverse((w2, second)))) => {
                    let id = tree.push_internal([second, lightest]);
                    heap.push(Reverse((w1 + w2, id)));
                }
            }
        }

        if tree.children.is_empty() {
            debug!("huffman weights select a single symbol {}", tree.root);
        }
        trace!(
            "huffman tree from {symbols} weights: {} internal nodes, total {total_weight}",
            tree.children.len()
        );
        Ok(tree)
    }

    /// [`HuffmanTree::from_weights`] for a table that must describe exactly
    /// `symbol_count` symbols.
    pub fn from_weights_checked(weights: &[u32], symbol_count: usize) -> Result<Self> {
        if weights.len() != symbol_count {
            return Err(VnArcError::invalid_table(format!(
                "{} weights for an alphabet of {symbol_count} symbols",
                weights.len()
            )));
        }
        Self::from_weights(weights)
    }

    /// Build a canonical tree from code lengths (0 = symbol unused).
    ///
    /// Codes are assigned in increasing (length, symbol) order and inserted
    /// most significant bit first; code bit 0 is child 0. Incomplete codes
    /// are accepted and leave absent children in the tree.
    pub fn from_lengths(lengths: &[u8]) -> Result<Self> {
        let symbols = lengths.len();
        check_alphabet(symbols)?;

        let max_length = lengths.iter().copied().max().unwrap_or(0);
        if max_length == 0 {
            return Err(VnArcError::invalid_table("every code length is zero"));
        }
        if max_length > MAX_CODE_LENGTH {
            return Err(VnArcError::invalid_table(format!(
                "code length {max_length} exceeds {MAX_CODE_LENGTH}"
            )));
        }

        let mut bl_count = [0u32; MAX_CODE_LENGTH as usize + 1];
        for &len in lengths.iter().filter(|&&len| len > 0) {
            bl_count[len as usize] += 1;
        }

        // Kraft sum in units of the longest code
        let used: u64 = (1..=max_length)
            .map(|len| (bl_count[len as usize] as u64) << (max_length - len))
            .sum();
        if used > 1u64 << max_length {
            return Err(VnArcError::invalid_table("over-subscribed code lengths"));
        }

        let mut next_code = [0u32; MAX_CODE_LENGTH as usize + 1];
        let mut code = 0u32;
        for bits in 1..=max_length as usize {
            code = (code + bl_count[bits - 1]) << 1;
            next_code[bits] = code;
        }

        let mut tree = Self {
            symbols,
            children: Vec::new(),
            parents: vec![NONE; symbols],
            root: NONE,
            total_weight: None,
        };
        tree.root = tree.push_internal([NONE, NONE]);

        for (symbol, &len) in lengths.iter().enumerate() {
            if len == 0 {
                continue;
            }
            let code = next_code[len as usize];
            next_code[len as usize] += 1;
            tree.insert(symbol as u32, code, len)?;
        }

        trace!(
            "canonical huffman tree: {symbols} symbols, max length {max_length}, {} internal nodes",
            tree.children.len()
        );
        Ok(tree)
    }

    fn push_internal(&mut self, children: [u32; 2]) -> u32 {
        let id = (self.symbols + self.children.len()) as u32;
        self.children.push(children);
        self.parents.push(NONE);
        for child in children.into_iter().filter(|&c| c != NONE) {
            self.parents[child as usize] = id;
        }
        id
    }

    fn insert(&mut self, symbol: u32, code: u32, len: u8) -> Result<()> {
        let mut node = self.root;
        for shift in (0..len).rev() {
            let bit = ((code >> shift) & 1) as usize;
            let Some(index) = self.internal_index(node) else {
                return Err(VnArcError::invalid_table(format!(
                    "code for symbol {symbol} runs through a leaf"
                )));
            };
            let child = self.children[index][bit];
            node = if shift == 0 {
                if child != NONE {
                    return Err(VnArcError::invalid_table(format!(
                        "code for symbol {symbol} is already taken"
                    )));
                }
                self.children[index][bit] = symbol;
                self.parents[symbol as usize] = node;
                symbol
            } else if child == NONE {
                let id = self.push_internal([NONE, NONE]);
                self.children[index][bit] = id;
                self.parents[id as usize] = node;
                id
            } else {
                child
            };
        }
        Ok(())
    }

    #[inline]
    fn internal_index(&self, node: u32) -> Option<usize> {
        (node as usize).checked_sub(self.symbols)
    }

    /// Alphabet size (including symbols without a code).
    pub fn symbol_count(&self) -> usize {
        self.symbols
    }

    /// Number of nodes in the tree: coded symbols plus internal nodes.
    pub fn node_count(&self) -> usize {
        let leaves = self.parents[..self.symbols]
            .iter()
            .enumerate()
            .filter(|&(symbol, &parent)| parent != NONE || symbol as u32 == self.root)
            .count();
        leaves + self.children.len()
    }

    /// Sum of the weights the tree was built from, if any.
    pub fn total_weight(&self) -> Option<u64> {
        self.total_weight
    }

    /// Whether every decode yields one symbol without reading bits.
    pub fn is_degenerate(&self) -> bool {
        (self.root as usize) < self.symbols
    }

    /// Child path from the root to `symbol`, one entry (0 or 1) per level.
    ///
    /// Returns `None` for a symbol without a code; the single symbol of a
    /// degenerate tree has an empty path.
    pub fn code_of(&self, symbol: u16) -> Option<Vec<u8>> {
        let symbol = symbol as u32;
        if symbol as usize >= self.symbols {
            return None;
        }
        if symbol == self.root {
            return Some(Vec::new());
        }

        let mut path = Vec::new();
        let mut node = symbol;
        while node != self.root {
            let parent = *self.parents.get(node as usize)?;
            let index = self.internal_index(parent)?;
            let child = if self.children[index][0] == node { 0 } else { 1 };
            path.push(child);
            node = parent;
        }
        path.reverse();
        Some(path)
    }

    /// Decode one symbol, or `Ok(None)` if the input ends mid-code.
    #[inline]
    pub fn decode_symbol(
        &self,
        reader: &mut BitReader<'_>,
        polarity: Polarity,
    ) -> Result<Option<u16>> {
        let mut node = self.root;
        while let Some(index) = self.internal_index(node) {
            let Some(bit) = reader.next_bit() else {
                return Ok(None);
            };
            let next = self.children[index][polarity.child(bit)];
            if next == NONE {
                return Err(VnArcError::invalid_huffman(reader.bits_read()));
            }
            node = next;
        }
        Ok(Some(node as u16))
    }
}

fn check_alphabet(symbols: usize) -> Result<()> {
    if symbols == 0 || symbols > MAX_SYMBOLS {
        return Err(VnArcError::invalid_table(format!(
            "alphabet of {symbols} symbols outside 1..={MAX_SYMBOLS}"
        )));
    }
    Ok(())
}
