//! # VnArc Huffman
//!
//! Huffman decoding for container formats that ship their own code tables.
//!
//! Two ways of describing a tree are supported:
//!
//! - **Weight tables**: symbol frequencies merged lightest-first, as stored
//!   by many image and script codecs
//! - **Code lengths**: canonical codes assigned in (length, symbol) order
//!
//! The bit that selects a child differs between codecs, so it is a
//! [`Polarity`] parameter of the decoder rather than a fixed convention.
//!
//! ## Example
//!
//! ```rust
//! use vnarc_core::bitstream::BitOrder;
//! use vnarc_core::traits::BlockDecoder;
//! use vnarc_huffman::{HuffmanDecoder, Polarity};
//!
//! let decoder =
//!     HuffmanDecoder::from_weights(&[5, 3], BitOrder::MsbFirst, Polarity::ZeroIsChild0).unwrap();
//! let decoded = decoder.decode(&[0b1000_0000], 2).unwrap();
//! assert_eq!(decoded.data, vec![1, 0]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![forbid(unsafe_code)]

pub mod decode;
pub mod tree;

// Re-exports
pub use decode::HuffmanDecoder;
pub use tree::{HuffmanTree, MAX_CODE_LENGTH, MAX_SYMBOLS, Polarity};
