//! Integration tests for tree construction and decoding.

mod common;

use common::{byte_weights, encode, skewed_data};
use vnarc_core::bitstream::BitOrder;
use vnarc_core::error::VnArcError;
use vnarc_core::traits::{BlockDecoder, DecodeStatus};
use vnarc_huffman::{HuffmanDecoder, HuffmanTree, Polarity};

#[test]
fn test_two_weights_first_bit_zero() {
    let decoder =
        HuffmanDecoder::from_weights(&[5, 3], BitOrder::MsbFirst, Polarity::ZeroIsChild0).unwrap();
    let decoded = decoder.decode(&[0x00], 1).unwrap();
    assert_eq!(decoded.data, vec![0]);
}

#[test]
fn test_construction_is_deterministic() {
    let weights = byte_weights(&skewed_data(10_000));
    let a = HuffmanTree::from_weights(&weights).unwrap();
    let b = HuffmanTree::from_weights(&weights).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_frequency_table_roundtrip() {
    for order in [BitOrder::MsbFirst, BitOrder::LsbFirst] {
        for polarity in [Polarity::ZeroIsChild0, Polarity::OneIsChild0] {
            let data = skewed_data(20_000);
            let tree = HuffmanTree::from_weights(&byte_weights(&data)).unwrap();
            let symbols: Vec<u16> = data.iter().map(|&b| b as u16).collect();
            let encoded = encode(&tree, &symbols, order, polarity);
            assert!(encoded.len() < data.len());

            let decoder = HuffmanDecoder::new(tree, order, polarity)
                .with_weight_total()
                .unwrap();
            let decoded = decoder.decode(&encoded, data.len()).unwrap();
            assert!(decoded.is_complete());
            assert_eq!(decoded.data, data);
        }
    }
}

#[test]
fn test_canonical_roundtrip() {
    // 2 codes of length 2, 8 of length 5 and 32 of length 7 fill the code space
    let mut lengths = vec![2u8; 2];
    lengths.extend([5u8; 8]);
    lengths.extend([7u8; 32]);
    let tree = HuffmanTree::from_lengths(&lengths).unwrap();
    let symbols: Vec<u16> = (0..500).map(|i| (i * 7 % 42) as u16).collect();
    let encoded = encode(&tree, &symbols, BitOrder::MsbFirst, Polarity::ZeroIsChild0);

    let decoder = HuffmanDecoder::new(tree, BitOrder::MsbFirst, Polarity::ZeroIsChild0);
    let (decoded, status) = decoder.decode_symbols(&encoded, symbols.len()).unwrap();
    assert_eq!(status, DecodeStatus::Complete);
    assert_eq!(decoded, symbols);
}

#[test]
fn test_code_lengths_follow_weights() {
    let tree = HuffmanTree::from_weights(&[1, 2, 4, 8, 16]).unwrap();
    let len = |s| tree.code_of(s).unwrap().len();
    assert_eq!(len(4), 1);
    assert_eq!(len(3), 2);
    assert_eq!(len(2), 3);
    assert_eq!(len(1), 4);
    assert_eq!(len(0), 4);
}

#[test]
fn test_truncated_prefix() {
    let data = skewed_data(2_000);
    let tree = HuffmanTree::from_weights(&byte_weights(&data)).unwrap();
    let symbols: Vec<u16> = data.iter().map(|&b| b as u16).collect();
    let encoded = encode(&tree, &symbols, BitOrder::MsbFirst, Polarity::ZeroIsChild0);

    let decoder = HuffmanDecoder::new(tree, BitOrder::MsbFirst, Polarity::ZeroIsChild0);
    let decoded = decoder.decode(&encoded[..encoded.len() / 2], data.len()).unwrap();
    assert_eq!(decoded.status, DecodeStatus::Truncated);
    assert_eq!(decoded.data, data[..decoded.data.len()]);
}

#[test]
fn test_invalid_code_position() {
    // Codes 0 and 10 only; 11 walks into a missing child
    let tree = HuffmanTree::from_lengths(&[1, 2]).unwrap();
    let decoder = HuffmanDecoder::new(tree, BitOrder::MsbFirst, Polarity::ZeroIsChild0);
    let err = decoder.decode(&[0b0101_1000], 4).unwrap_err();
    assert_eq!(err, VnArcError::invalid_huffman(5));
}
