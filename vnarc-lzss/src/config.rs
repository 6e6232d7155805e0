//! LZSS configuration for the engine families.
//!
//! One [`LzConfig`] record describes a whole codec variant: the window, how
//! control flags and match fields are laid out, how a match's offset becomes
//! a source position, and what happens at the edges of the output.

use crate::tables::{NEIGHBORS_16, Neighbor};
use std::borrow::Cow;
use vnarc_core::bitstream::BitOrder;
use vnarc_core::error::{Result, VnArcError};
use vnarc_core::window::sizes;

/// Widest offset field accepted in a bit-level scheme.
pub const MAX_OFFSET_BITS: u8 = 24;
/// Widest length field accepted in a bit-level scheme.
pub const MAX_LENGTH_BITS: u8 = 16;

/// Ring window geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowConfig {
    /// Number of bytes in the ring.
    pub capacity: usize,
    /// Byte the ring is filled with before decoding starts.
    pub fill: u8,
    /// Ring index of the first byte written.
    pub initial_cursor: usize,
}

impl WindowConfig {
    /// The classic 4 KB window: zero fill, cursor at `4096 - 18`.
    pub const CLASSIC: Self = Self::classic(sizes::CLASSIC, 0);

    /// A window of `capacity` bytes with the cursor `18` bytes before the end.
    pub const fn classic(capacity: usize, fill: u8) -> Self {
        Self {
            capacity,
            fill,
            initial_cursor: capacity.saturating_sub(sizes::LOOKAHEAD),
        }
    }
}

/// How the two bytes of a match are split into offset and length code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PairLayout {
    /// 12-bit offset: the first byte plus the high nibble of the second byte
    /// as bits 8-11. The low nibble of the second byte is the length code.
    Nibble,
    /// A 16-bit word whose low `offset_bits` bits are the offset and whose
    /// remaining high bits are the length code.
    LengthHigh {
        /// Width of the offset part.
        offset_bits: u8,
        /// Whether the word is stored big-endian.
        big_endian: bool,
    },
    /// A 16-bit word whose low `length_bits` bits are the length code and
    /// whose remaining high bits are the offset.
    LengthLow {
        /// Width of the length part.
        length_bits: u8,
        /// Whether the word is stored big-endian.
        big_endian: bool,
    },
}

impl PairLayout {
    /// Split a match pair into `(offset, length_code)`.
    #[inline]
    pub fn split(&self, first: u8, second: u8) -> (u32, u32) {
        match *self {
            Self::Nibble => {
                let offset = first as u32 | ((second as u32 & 0xF0) << 4);
                (offset, second as u32 & 0x0F)
            }
            Self::LengthHigh {
                offset_bits,
                big_endian,
            } => {
                let word = Self::word(first, second, big_endian);
                (word & ((1 << offset_bits) - 1), word >> offset_bits)
            }
            Self::LengthLow {
                length_bits,
                big_endian,
            } => {
                let word = Self::word(first, second, big_endian);
                (word >> length_bits, word & ((1 << length_bits) - 1))
            }
        }
    }

    /// Largest offset and length code the layout can carry.
    pub fn limits(&self) -> (u32, u32) {
        match *self {
            Self::Nibble => (0xFFF, 0xF),
            Self::LengthHigh { offset_bits, .. } => {
                ((1 << offset_bits) - 1, (1 << (16 - offset_bits)) - 1)
            }
            Self::LengthLow { length_bits, .. } => {
                ((1 << (16 - length_bits)) - 1, (1 << length_bits) - 1)
            }
        }
    }

    fn word(first: u8, second: u8, big_endian: bool) -> u32 {
        if big_endian {
            u16::from_be_bytes([first, second]) as u32
        } else {
            u16::from_le_bytes([first, second]) as u32
        }
    }
}

/// Byte-oriented control: a flag byte governs the next eight tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlagByteScheme {
    /// Order in which the flags of a control byte are consumed.
    pub flag_order: BitOrder,
    /// Flag value (0 or 1) that selects a literal.
    pub literal_flag: u8,
    /// Layout of the two-byte match pair.
    pub layout: PairLayout,
    /// Added to the stored length code.
    pub min_length: usize,
}

/// Width of one match branch in a bit-level scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchField {
    /// Width of the offset field (read first).
    pub offset_bits: u8,
    /// Width of the length field (read second).
    pub length_bits: u8,
    /// Added to the stored length code.
    pub min_length: usize,
}

impl MatchField {
    /// Largest offset the field can carry.
    pub fn max_offset(&self) -> u32 {
        ((1u64 << self.offset_bits) - 1) as u32
    }

    /// Longest match the field can carry.
    pub fn max_length(&self) -> usize {
        self.min_length + ((1usize << self.length_bits) - 1)
    }
}

/// Bit-oriented control: every flag is a single bit in the stream.
///
/// A control bit selects a literal (eight bits follow) or a match. With a
/// `long` branch present, a second control bit chooses between the `short`
/// and `long` match fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BitScheme {
    /// Bit packing of the stream.
    pub order: BitOrder,
    /// Control bit value (0 or 1) that selects a literal.
    pub literal_flag: u8,
    /// Match fields used when there is no `long` branch or when the second
    /// control bit equals `short_flag`.
    pub short: MatchField,
    /// Optional second match branch.
    pub long: Option<MatchField>,
    /// Second control bit value (0 or 1) that selects `short`.
    pub short_flag: u8,
}

/// How literal/match decisions and match fields are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ControlScheme {
    /// Flag bytes with raw literal bytes and two-byte match pairs.
    FlagByte(FlagByteScheme),
    /// Single control bits with bit-packed fields.
    Bits(BitScheme),
}

/// How the offset of a match becomes a source position.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OffsetRule {
    /// The offset is an absolute ring index (reduced modulo the capacity).
    /// Requires a window.
    WindowAbsolute,
    /// The offset plus `bias` is the backward distance from the write
    /// position.
    Backward {
        /// Added to the stored offset.
        bias: u32,
    },
    /// The offset indexes a table of neighbour displacements resolved against
    /// the row stride. Requires that there is no window.
    Neighbor {
        /// Legal displacements.
        table: Cow<'static, [Neighbor]>,
        /// Row stride in bytes.
        stride: usize,
    },
}

/// Behaviour at the edges of the output buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EndRule {
    /// A source before the start of the output and a match past its end are
    /// both errors.
    #[default]
    Strict,
    /// A source before the start of the output ends the stream normally with
    /// the bytes produced so far. A match past the end is an error.
    StopOnUnderflow,
    /// A match past the end of the output is cut at the end and the decode
    /// completes. A source before the start is an error.
    ClipAtEnd,
}

/// Full description of one LZSS variant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LzConfig {
    /// Ring window, or `None` when matches read straight from the output.
    ///
    /// Without a window the output buffer is its own history: the decoder
    /// reads back from bytes it already wrote, while the input is still only
    /// read sequentially.
    pub window: Option<WindowConfig>,
    /// Token layout.
    pub scheme: ControlScheme,
    /// Offset interpretation.
    pub offsets: OffsetRule,
    /// Edge behaviour.
    pub end: EndRule,
}

impl LzConfig {
    /// Classic 4 KB LZSS.
    ///
    /// - Zero-filled window, cursor at 4078
    /// - LSB-first flag bytes, flag 1 selects a literal
    /// - Nibble pairs with absolute window offsets, lengths 3-18
    /// - Matches running past the output are cut
    pub const CLASSIC: Self = Self {
        window: Some(WindowConfig::CLASSIC),
        scheme: ControlScheme::FlagByte(FlagByteScheme {
            flag_order: BitOrder::LsbFirst,
            literal_flag: 1,
            layout: PairLayout::Nibble,
            min_length: 3,
        }),
        offsets: OffsetRule::WindowAbsolute,
        end: EndRule::ClipAtEnd,
    };

    /// [`LzConfig::CLASSIC`] with a 2 KB window (cursor at 2030); offsets
    /// wrap modulo the capacity.
    pub const CLASSIC_2K: Self = Self {
        window: Some(WindowConfig::classic(sizes::SMALL, 0)),
        ..Self::CLASSIC
    };

    /// Windowless byte-pair LZ.
    ///
    /// - LSB-first flag bytes, flag 0 selects a literal
    /// - Big-endian match word: 4-bit length code over a 12-bit offset
    /// - Distance is offset + 1, length is code + 3
    /// - Strict edges
    pub const BACKREF_WORD: Self = Self {
        window: None,
        scheme: ControlScheme::FlagByte(FlagByteScheme {
            flag_order: BitOrder::LsbFirst,
            literal_flag: 0,
            layout: PairLayout::LengthHigh {
                offset_bits: 12,
                big_endian: true,
            },
            min_length: 3,
        }),
        offsets: OffsetRule::Backward { bias: 1 },
        end: EndRule::Strict,
    };

    /// Bit-packed LZSS over a 4 KB window.
    ///
    /// - Zero-filled window, cursor at 4078
    /// - MSB-first control bits, 1 selects a literal
    /// - 12-bit absolute offset, 4-bit length code, lengths 2-17
    /// - Matches running past the output are cut
    pub const BITSTREAM_4K: Self = Self {
        window: Some(WindowConfig::CLASSIC),
        scheme: ControlScheme::Bits(BitScheme {
            order: BitOrder::MsbFirst,
            literal_flag: 1,
            short: MatchField {
                offset_bits: 12,
                length_bits: 4,
                min_length: 2,
            },
            long: None,
            short_flag: 0,
        }),
        offsets: OffsetRule::WindowAbsolute,
        end: EndRule::ClipAtEnd,
    };

    /// Two-level bit scheme without a window.
    ///
    /// - MSB-first control bits, 1 selects a literal
    /// - Second bit 0: short match, 8-bit offset, 2-bit length code, lengths 2-5
    /// - Second bit 1: long match, 13-bit offset, 4-bit length code, lengths 3-18
    /// - Distance is offset + 1; a source before the output start ends the stream
    pub const TWO_LEVEL: Self = Self {
        window: None,
        scheme: ControlScheme::Bits(BitScheme {
            order: BitOrder::MsbFirst,
            literal_flag: 1,
            short: MatchField {
                offset_bits: 8,
                length_bits: 2,
                min_length: 2,
            },
            long: Some(MatchField {
                offset_bits: 13,
                length_bits: 4,
                min_length: 3,
            }),
            short_flag: 0,
        }),
        offsets: OffsetRule::Backward { bias: 1 },
        end: EndRule::StopOnUnderflow,
    };

    /// Neighbour-table LZ for images with rows of `stride` bytes.
    ///
    /// - MSB-first control bits, 1 selects a literal
    /// - 4-bit index into [`NEIGHBORS_16`], 4-bit length code, lengths 1-16
    /// - A source before the output start ends the stream
    pub fn neighbor(stride: usize) -> Self {
        Self {
            window: None,
            scheme: ControlScheme::Bits(BitScheme {
                order: BitOrder::MsbFirst,
                literal_flag: 1,
                short: MatchField {
                    offset_bits: 4,
                    length_bits: 4,
                    min_length: 1,
                },
                long: None,
                short_flag: 0,
            }),
            offsets: OffsetRule::Neighbor {
                table: Cow::Borrowed(&NEIGHBORS_16),
                stride,
            },
            end: EndRule::StopOnUnderflow,
        }
    }

    /// Replace the window fill byte (builder style).
    pub fn with_fill(mut self, fill: u8) -> Self {
        if let Some(window) = self.window.as_mut() {
            window.fill = fill;
        }
        self
    }

    /// Replace the edge behaviour (builder style).
    pub fn with_end(mut self, end: EndRule) -> Self {
        self.end = end;
        self
    }

    /// Check the record for internal consistency.
    pub fn validate(&self) -> Result<()> {
        if let Some(window) = &self.window {
            if window.capacity == 0 || window.capacity > sizes::MAX {
                return Err(VnArcError::invalid_parameter(format!(
                    "window capacity {} outside 1..={}",
                    window.capacity,
                    sizes::MAX
                )));
            }
            if window.initial_cursor >= window.capacity {
                return Err(VnArcError::invalid_parameter(format!(
                    "initial cursor {} outside window of {} bytes",
                    window.initial_cursor, window.capacity
                )));
            }
        }

        match &self.scheme {
            ControlScheme::FlagByte(scheme) => {
                check_flag("literal flag", scheme.literal_flag)?;
                check_min_length(scheme.min_length)?;
                match scheme.layout {
                    PairLayout::Nibble => {}
                    PairLayout::LengthHigh {
                        offset_bits: bits, ..
                    }
                    | PairLayout::LengthLow {
                        length_bits: bits, ..
                    } => {
                        if bits == 0 || bits >= 16 {
                            return Err(VnArcError::invalid_parameter(format!(
                                "pair field width {bits} outside 1..=15"
                            )));
                        }
                    }
                }
            }
            ControlScheme::Bits(scheme) => {
                check_flag("literal flag", scheme.literal_flag)?;
                check_flag("short flag", scheme.short_flag)?;
                check_field(&scheme.short)?;
                if let Some(long) = &scheme.long {
                    check_field(long)?;
                }
            }
        }

        match &self.offsets {
            OffsetRule::WindowAbsolute if self.window.is_none() => Err(
                VnArcError::invalid_parameter("absolute offsets need a window"),
            ),
            OffsetRule::Neighbor { table, stride } => {
                if self.window.is_some() {
                    return Err(VnArcError::invalid_parameter(
                        "neighbour offsets write straight into the output",
                    ));
                }
                if table.is_empty() || *stride == 0 {
                    return Err(VnArcError::invalid_parameter(format!(
                        "neighbour table of {} entries with stride {stride}",
                        table.len()
                    )));
                }
                if let Some(bad) = table.iter().find(|n| n.distance(*stride).is_none()) {
                    return Err(VnArcError::invalid_parameter(format!(
                        "neighbour ({}, {}) does not point backwards at stride {stride}",
                        bad.dx, bad.dy
                    )));
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl Default for LzConfig {
    fn default() -> Self {
        Self::CLASSIC
    }
}

fn check_flag(name: &str, value: u8) -> Result<()> {
    if value > 1 {
        return Err(VnArcError::invalid_parameter(format!(
            "{name} must be 0 or 1, got {value}"
        )));
    }
    Ok(())
}

fn check_min_length(min_length: usize) -> Result<()> {
    if min_length == 0 {
        return Err(VnArcError::invalid_parameter("minimum match length 0"));
    }
    Ok(())
}

fn check_field(field: &MatchField) -> Result<()> {
    check_min_length(field.min_length)?;
    if field.offset_bits > MAX_OFFSET_BITS || field.length_bits > MAX_LENGTH_BITS {
        return Err(VnArcError::invalid_parameter(format!(
            "match field {}+{} bits exceeds {MAX_OFFSET_BITS}+{MAX_LENGTH_BITS}",
            field.offset_bits, field.length_bits
        )));
    }
    Ok(())
}
