//! # VnArc Planar
//!
//! Reassembly of separately compressed channel planes into interleaved
//! pixels.
//!
//! Image codecs often compress each colour channel on its own and leave the
//! container to put the pixels back together. This crate covers the common
//! steps:
//!
//! - **Interleaving** planes into B, G, R, A lanes under a [`ChannelMap`]
//! - **Vertical delta** over three horizontal bands ([`DeltaMode`])
//! - **Alpha runs** written into the alpha lane at 4, 5, 7 or 8 bits of
//!   precision ([`overlay_alpha`], [`read_alpha_runs`])
//!
//! ## Example
//!
//! ```rust
//! use vnarc_planar::{ChannelMap, DeltaMode, PlanarLayout, Reassembler};
//!
//! let layout = PlanarLayout::new(1, 3, 1).unwrap();
//! let reassembler = Reassembler::new(layout, ChannelMap::GRAY)
//!     .unwrap()
//!     .with_delta(DeltaMode::VerticalBands);
//!
//! // One row per band: nothing to add
//! let pixels = reassembler.assemble(&[[7u8, 8, 9]]).unwrap();
//! assert_eq!(pixels, vec![7, 8, 9]);
//! ```
//!
//! ## Parallel decoding
//!
//! With the `parallel` feature, [`decode_planes`] decodes the channel inputs
//! on the rayon thread pool before they are reassembled.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![forbid(unsafe_code)]

pub mod alpha;
pub mod layout;
pub mod reassemble;

// Re-exports
pub use alpha::{AlphaPrecision, AlphaRun, overlay_alpha, read_alpha_runs};
pub use layout::{ChannelMap, DeltaMode, MAX_LANES, PlanarLayout};
pub use reassemble::{Reassembler, decode_planes};
