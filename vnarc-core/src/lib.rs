//! # VnArc Core
//!
//! Core components for the VnArc decoding primitives.
//!
//! This crate provides the building blocks shared by every codec crate:
//!
//! - [`bitstream`]: Bit-level I/O in either bit order, with end of input as
//!   an ordinary outcome
//! - [`copy`]: Overlap-safe copying for LZ back-references
//! - [`window`]: Pre-filled sliding window for LZSS decompression
//! - [`traits`]: The `BlockDecoder` trait and decode outcomes
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! VnArc is the shared layer under a catalog of per-engine container readers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Container readers (outside this workspace)              │
//! │     header parsing, directory tables, file sniffing     │
//! ├─────────────────────────────────────────────────────────┤
//! │ Codecs                                                  │
//! │     LZSS family, Huffman, planar images, keystreams     │
//! ├─────────────────────────────────────────────────────────┤
//! │ Core (this crate)                                       │
//! │     BitReader/BitWriter, overlap copy, Window           │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use vnarc_core::bitstream::{BitOrder, BitReader};
//! use vnarc_core::copy::overlap_copy;
//!
//! // Read bits from data
//! let data = [0xAB, 0xCD];
//! let mut reader = BitReader::new(&data, BitOrder::MsbFirst);
//! assert_eq!(reader.read_bits(12).complete(), Some(0xABC));
//!
//! // Expand a back-reference with distance 1
//! let mut buf = *b"z\0\0\0";
//! overlap_copy(&mut buf, 0, 1, 3).unwrap();
//! assert_eq!(&buf, b"zzzz");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![forbid(unsafe_code)]

pub mod bitstream;
pub mod copy;
pub mod error;
pub mod traits;
pub mod window;

// Re-exports for convenience
pub use bitstream::{BitOrder, BitReader, BitRun, BitWriter};
pub use copy::{copy_back_reference, overlap_copy};
pub use error::{Result, VnArcError};
pub use traits::{BlockDecoder, DecodeStatus, Decoded, Outcome};
pub use window::Window;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{BitOrder, BitReader, BitWriter};
    pub use crate::error::{Result, VnArcError};
    pub use crate::traits::{BlockDecoder, DecodeStatus, Decoded, Outcome};
    pub use crate::window::Window;
}
