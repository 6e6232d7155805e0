//! Reference Huffman encoder built on `HuffmanTree::code_of`.

#![allow(dead_code)]

use vnarc_core::bitstream::{BitOrder, BitWriter};
use vnarc_huffman::{HuffmanTree, Polarity};

/// Encode `symbols` with the codes of `tree`.
pub fn encode(
    tree: &HuffmanTree,
    symbols: &[u16],
    order: BitOrder,
    polarity: Polarity,
) -> Vec<u8> {
    let mut writer = BitWriter::new(order);
    for &symbol in symbols {
        let path = tree.code_of(symbol).expect("symbol has a code");
        for child in path {
            writer.write_bit(polarity.bit(child) != 0);
        }
    }
    writer.finish()
}

/// Frequency table of `data` over a byte alphabet.
pub fn byte_weights(data: &[u8]) -> Vec<u32> {
    let mut weights = vec![0u32; 256];
    for &b in data {
        weights[b as usize] += 1;
    }
    weights
}

/// Skewed deterministic test data.
pub fn skewed_data(len: usize) -> Vec<u8> {
    let mut seed: u32 = 0x2545_F491;
    (0..len)
        .map(|_| {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            // Low values are far more likely
            let r = seed % 1000;
            (r * r / 4000) as u8
        })
        .collect()
}
