//! Core traits and outcome types shared by the decoders.
//!
//! Every decoder writes into a caller-sized output buffer and reports how far
//! it got. A decode that ran out of input is a normal [`DecodeStatus`], not an
//! error; corrupt data and unusable parameters are the `Err` side.

use crate::error::Result;

/// How a decode call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStatus {
    /// The output buffer was filled.
    Complete,
    /// The input ended (possibly mid-token) or the codec's early-stop rule
    /// fired before the output was filled.
    Truncated,
}

/// Progress report of a single [`BlockDecoder::decode_into`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Input bytes consumed (a partially read byte counts as consumed).
    pub consumed: usize,
    /// Output bytes produced.
    pub produced: usize,
    /// Whether the output was filled.
    pub status: DecodeStatus,
}

impl Outcome {
    /// Build an outcome, deriving the status from the requested length.
    pub fn new(consumed: usize, produced: usize, requested: usize) -> Self {
        let status = if produced >= requested {
            DecodeStatus::Complete
        } else {
            DecodeStatus::Truncated
        };
        Self {
            consumed,
            produced,
            status,
        }
    }

    /// Whether the output was filled.
    pub fn is_complete(&self) -> bool {
        self.status == DecodeStatus::Complete
    }
}

/// Owned result of [`BlockDecoder::decode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Decoded bytes; shorter than requested when truncated.
    pub data: Vec<u8>,
    /// Whether the requested length was reached.
    pub status: DecodeStatus,
}

impl Decoded {
    /// Whether the requested length was reached.
    pub fn is_complete(&self) -> bool {
        self.status == DecodeStatus::Complete
    }
}

/// A one-shot decoder over a complete input buffer.
///
/// Implementations carry only configuration; all working state (windows,
/// trees, bit cursors) is created inside each call, so one decoder may be
/// shared across threads.
pub trait BlockDecoder {
    /// Decode `input` into `output`, filling at most `output.len()` bytes.
    fn decode_into(&self, input: &[u8], output: &mut [u8]) -> Result<Outcome>;

    /// Decode `input` into a fresh buffer of `len` bytes (convenience method).
    ///
    /// The returned data is cut to the number of bytes actually produced.
    fn decode(&self, input: &[u8], len: usize) -> Result<Decoded> {
        let mut data = vec![0u8; len];
        let outcome = self.decode_into(input, &mut data)?;
        data.truncate(outcome.produced);
        Ok(Decoded {
            data,
            status: outcome.status,
        })
    }
}
