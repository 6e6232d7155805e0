//! Error types for VnArc decoding operations.
//!
//! Every hard failure of the decoding primitives is reported through
//! [`VnArcError`]. Running out of input is *not* an error: decoders report it
//! through [`crate::traits::DecodeStatus::Truncated`] instead.

use thiserror::Error;

/// The main error type for VnArc operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VnArcError {
    /// A configuration value or mode selector is unusable.
    #[error("Invalid parameter: {message}")]
    InvalidParameter {
        /// Description of the rejected parameter.
        message: String,
    },

    /// A weight or length table cannot produce a usable Huffman tree.
    #[error("Invalid Huffman table: {message}")]
    InvalidHuffmanTable {
        /// Description of the table problem.
        message: String,
    },

    /// The bit stream walked into a branch the tree does not have.
    #[error("Invalid Huffman code at bit position {bit_position}")]
    InvalidHuffmanCode {
        /// Bit position where the invalid code was found.
        bit_position: u64,
    },

    /// A back-reference points before the start of the available history.
    #[error("Invalid back-reference distance: {distance} exceeds history size {history_size}")]
    InvalidDistance {
        /// The invalid distance value.
        distance: usize,
        /// Number of bytes that could have been referenced.
        history_size: usize,
    },

    /// A match would write past the end of the output buffer.
    #[error("Output overrun at {position}: {length} bytes do not fit in {capacity}")]
    OutputOverrun {
        /// Write position at which the match starts.
        position: usize,
        /// Length of the match.
        length: usize,
        /// Size of the output buffer.
        capacity: usize,
    },

    /// A copy range lies outside the buffer it addresses.
    #[error("Range {start}..{end} is outside a buffer of {len} bytes")]
    OutOfBounds {
        /// First index of the range.
        start: usize,
        /// One past the last index of the range.
        end: usize,
        /// Length of the buffer.
        len: usize,
    },

    /// A decoded channel plane holds fewer bytes than the image needs.
    #[error("Plane {channel} too short: need {expected} bytes, have {found}")]
    PlaneTooShort {
        /// Index of the offending plane.
        channel: usize,
        /// Bytes required (width x height).
        expected: usize,
        /// Bytes supplied.
        found: usize,
    },

    /// A decoded symbol does not fit the output representation.
    #[error("Symbol {symbol} does not fit in an output byte")]
    SymbolOutOfRange {
        /// The decoded symbol.
        symbol: u16,
    },
}

/// Result type alias for VnArc operations.
pub type Result<T> = std::result::Result<T, VnArcError>;

impl VnArcError {
    /// Create an invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Create an invalid Huffman table error.
    pub fn invalid_table(message: impl Into<String>) -> Self {
        Self::InvalidHuffmanTable {
            message: message.into(),
        }
    }

    /// Create an invalid Huffman code error.
    pub fn invalid_huffman(bit_position: u64) -> Self {
        Self::InvalidHuffmanCode { bit_position }
    }

    /// Create an invalid distance error.
    pub fn invalid_distance(distance: usize, history_size: usize) -> Self {
        Self::InvalidDistance {
            distance,
            history_size,
        }
    }

    /// Create an output overrun error.
    pub fn output_overrun(position: usize, length: usize, capacity: usize) -> Self {
        Self::OutputOverrun {
            position,
            length,
            capacity,
        }
    }

    /// Create an out-of-bounds error.
    pub fn out_of_bounds(start: usize, end: usize, len: usize) -> Self {
        Self::OutOfBounds { start, end, len }
    }

    /// Create a plane-too-short error.
    pub fn plane_too_short(channel: usize, expected: usize, found: usize) -> Self {
        Self::PlaneTooShort {
            channel,
            expected,
            found,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VnArcError::invalid_parameter("window capacity 0");
        assert!(err.to_string().contains("window capacity 0"));

        let err = VnArcError::output_overrun(10, 5, 12);
        assert_eq!(
            err.to_string(),
            "Output overrun at 10: 5 bytes do not fit in 12"
        );

        let err = VnArcError::plane_too_short(2, 16, 15);
        assert!(err.to_string().contains("Plane 2"));
    }

    #[test]
    fn test_errors_compare() {
        assert_eq!(
            VnArcError::invalid_distance(5, 3),
            VnArcError::InvalidDistance {
                distance: 5,
                history_size: 3
            }
        );
        assert_ne!(
            VnArcError::invalid_huffman(1),
            VnArcError::invalid_huffman(2)
        );
    }
}
