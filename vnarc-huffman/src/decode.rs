//! Huffman block decoder.

use crate::tree::{HuffmanTree, Polarity};
use log::debug;
use vnarc_core::bitstream::{BitOrder, BitReader};
use vnarc_core::error::{Result, VnArcError};
use vnarc_core::traits::{BlockDecoder, DecodeStatus, Outcome};

/// Decodes a stream of Huffman codes into symbols.
///
/// # Example
///
/// ```
/// use vnarc_core::bitstream::BitOrder;
/// use vnarc_core::traits::BlockDecoder;
/// use vnarc_huffman::{HuffmanDecoder, HuffmanTree, Polarity};
///
/// let tree = HuffmanTree::from_weights(&[5, 3]).unwrap();
/// let decoder = HuffmanDecoder::new(tree, BitOrder::MsbFirst, Polarity::ZeroIsChild0);
///
/// // Bits 0 1 1 0
/// let decoded = decoder.decode(&[0b0110_0000], 4).unwrap();
/// assert_eq!(decoded.data, vec![0, 1, 1, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanDecoder {
    tree: HuffmanTree,
    order: BitOrder,
    polarity: Polarity,
    require_weight_total: bool,
}

impl HuffmanDecoder {
    /// Create a decoder over `tree`.
    pub fn new(tree: HuffmanTree, order: BitOrder, polarity: Polarity) -> Self {
        Self {
            tree,
            order,
            polarity,
            require_weight_total: false,
        }
    }

    /// Build the tree from a weight table and create a decoder over it.
    pub fn from_weights(weights: &[u32], order: BitOrder, polarity: Polarity) -> Result<Self> {
        Ok(Self::new(HuffmanTree::from_weights(weights)?, order, polarity))
    }

    /// Require the tree's weights to sum to the number of symbols requested.
    ///
    /// Frequency tables that count the decoded output use this to reject a
    /// table that disagrees with the declared length. Only trees built from
    /// weights can carry the check.
    pub fn with_weight_total(mut self) -> Result<Self> {
        if self.tree.total_weight().is_none() {
            return Err(VnArcError::invalid_parameter(
                "weight total check needs a tree built from weights",
            ));
        }
        self.require_weight_total = true;
        Ok(self)
    }

    /// The decoding tree.
    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    fn check_total(&self, requested: usize) -> Result<()> {
        match self.tree.total_weight() {
            Some(total) if self.require_weight_total && total != requested as u64 => {
                Err(VnArcError::invalid_table(format!(
                    "weights sum to {total} but {requested} symbols were requested"
                )))
            }
            _ => Ok(()),
        }
    }

    /// Decode up to `count` symbols of any width.
    ///
    /// The result is shorter than `count` when the input ends mid-code.
    pub fn decode_symbols(&self, input: &[u8], count: usize) -> Result<(Vec<u16>, DecodeStatus)> {
        self.check_total(count)?;
        let mut reader = BitReader::new(input, self.order);
        // Every code but the zero-bit one costs at least one input bit.
        let capacity = if self.tree.is_degenerate() {
            count
        } else {
            count.min(input.len().saturating_mul(8))
        };
        let mut symbols = Vec::with_capacity(capacity);
        while symbols.len() < count {
            match self.tree.decode_symbol(&mut reader, self.polarity)? {
                Some(symbol) => symbols.push(symbol),
                None => break,
            }
        }
        let status = if symbols.len() == count {
            DecodeStatus::Complete
        } else {
            debug!("huffman input ended after {} of {count} symbols", symbols.len());
            DecodeStatus::Truncated
        };
        Ok((symbols, status))
    }
}

impl BlockDecoder for HuffmanDecoder {
    fn decode_into(&self, input: &[u8], output: &mut [u8]) -> Result<Outcome> {
        self.check_total(output.len())?;
        let mut reader = BitReader::new(input, self.order);
        let mut produced = 0;

        for slot in output.iter_mut() {
            let Some(symbol) = self.tree.decode_symbol(&mut reader, self.polarity)? else {
                debug!(
                    "huffman input ended after {produced} of {} symbols",
                    output.len()
                );
                break;
            };
            *slot = u8::try_from(symbol).map_err(|_| VnArcError::SymbolOutOfRange { symbol })?;
            produced += 1;
        }

        Ok(Outcome::new(reader.position(), produced, output.len()))
    }
}
