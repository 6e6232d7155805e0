//! # VnArc LZSS
//!
//! Configurable LZSS decoding.
//!
//! Many archive and image formats use small LZSS variants that differ only in
//! details: window size and pre-fill, whether flags come in bytes or single
//! bits, how a match splits into offset and length, and what happens at the
//! edges of the output. This crate decodes all of them from one
//! [`LzConfig`] record:
//!
//! - **CLASSIC**: 4 KB zero-filled window, LSB-first flag bytes, nibble pairs
//! - **CLASSIC_2K**: the same with a 2 KB window
//! - **BACKREF_WORD**: windowless, big-endian 12/4 match words
//! - **BITSTREAM_4K**: 4 KB window addressed by bit-packed 12/4 fields
//! - **TWO_LEVEL**: windowless, short and long bit-packed matches
//! - **neighbor(stride)**: matches restricted to a table of image neighbours
//!
//! ## Example
//!
//! ```rust
//! use vnarc_core::traits::BlockDecoder;
//! use vnarc_lzss::{LzConfig, LzDecoder};
//!
//! let decoder = LzDecoder::new(LzConfig::CLASSIC).unwrap();
//!
//! // One flag byte: literal 'h', literal 'i'
//! let decoded = decoder.decode(&[0x03, b'h', b'i'], 2).unwrap();
//! assert_eq!(decoded.data, b"hi");
//! ```
//!
//! ## Edge behaviour
//!
//! Running out of input is never an error: the output produced so far is
//! returned with [`vnarc_core::DecodeStatus::Truncated`]. Matches that reach
//! before the start of the output or past its end are handled according to
//! the configured [`EndRule`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![forbid(unsafe_code)]

pub mod config;
pub mod decode;
pub mod tables;
pub mod token;

// Re-exports
pub use config::{
    BitScheme, ControlScheme, EndRule, FlagByteScheme, LzConfig, MatchField, OffsetRule,
    PairLayout, WindowConfig,
};
pub use decode::{LzDecoder, decompress};
pub use tables::{NEIGHBORS_16, Neighbor};
pub use token::{LzToken, Tokens};
