//! Token readers for the LZSS control schemes.
//!
//! A token stream yields literals and matches until the input runs out. A
//! token cut off by the end of input is not yielded; the decoder treats the
//! end of the iterator as truncation unless the output is already full.

use crate::config::{BitScheme, ControlScheme, FlagByteScheme, MatchField};
use vnarc_core::bitstream::{BitOrder, BitReader};

/// One decoded LZSS token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LzToken {
    /// A literal byte.
    Literal(u8),
    /// A match reference.
    Match {
        /// Raw offset field; its meaning depends on the offset rule.
        offset: u32,
        /// Number of bytes to copy (minimum length already added).
        length: usize,
    },
}

/// Flag-byte token reader.
///
/// A control byte supplies eight flags; a literal flag is followed by one raw
/// byte and a match flag by a two-byte pair.
#[derive(Debug, Clone)]
pub struct FlagByteTokens<'a> {
    reader: BitReader<'a>,
    scheme: FlagByteScheme,
    flags: u8,
    flags_left: u8,
}

impl<'a> FlagByteTokens<'a> {
    /// Create a reader over `input`.
    pub fn new(input: &'a [u8], scheme: FlagByteScheme) -> Self {
        Self {
            reader: BitReader::new(input, BitOrder::MsbFirst),
            scheme,
            flags: 0,
            flags_left: 0,
        }
    }

    /// Input bytes consumed so far.
    pub fn consumed(&self) -> usize {
        self.reader.position()
    }

    fn next_flag(&mut self) -> Option<u8> {
        if self.flags_left == 0 {
            self.flags = self.reader.read_byte()?;
            self.flags_left = 8;
        }
        self.flags_left -= 1;
        let flag = match self.scheme.flag_order {
            BitOrder::LsbFirst => {
                let flag = self.flags & 1;
                self.flags >>= 1;
                flag
            }
            BitOrder::MsbFirst => {
                let flag = self.flags >> 7;
                self.flags <<= 1;
                flag
            }
        };
        Some(flag)
    }
}

impl Iterator for FlagByteTokens<'_> {
    type Item = LzToken;

    fn next(&mut self) -> Option<LzToken> {
        if self.next_flag()? == self.scheme.literal_flag {
            return self.reader.read_byte().map(LzToken::Literal);
        }
        let first = self.reader.read_byte()?;
        let second = self.reader.read_byte()?;
        let (offset, code) = self.scheme.layout.split(first, second);
        Some(LzToken::Match {
            offset,
            length: code as usize + self.scheme.min_length,
        })
    }
}

/// Bit-level token reader.
#[derive(Debug, Clone)]
pub struct BitTokens<'a> {
    reader: BitReader<'a>,
    scheme: BitScheme,
}

impl<'a> BitTokens<'a> {
    /// Create a reader over `input`.
    pub fn new(input: &'a [u8], scheme: BitScheme) -> Self {
        Self {
            reader: BitReader::new(input, scheme.order),
            scheme,
        }
    }

    /// Input bytes consumed so far (a partially read byte counts).
    pub fn consumed(&self) -> usize {
        self.reader.position()
    }

    fn read_field(&mut self, field: MatchField) -> Option<LzToken> {
        let offset = self.reader.read_bits(field.offset_bits).complete()?;
        let code = self.reader.read_bits(field.length_bits).complete()?;
        Some(LzToken::Match {
            offset,
            length: code as usize + field.min_length,
        })
    }
}

impl Iterator for BitTokens<'_> {
    type Item = LzToken;

    fn next(&mut self) -> Option<LzToken> {
        let control = self.reader.next_bit()?;
        if control == self.scheme.literal_flag {
            let byte = self.reader.read_bits(8).complete()?;
            return Some(LzToken::Literal(byte as u8));
        }

        let field = match self.scheme.long {
            Some(long) => {
                if self.reader.next_bit()? == self.scheme.short_flag {
                    self.scheme.short
                } else {
                    long
                }
            }
            None => self.scheme.short,
        };
        self.read_field(field)
    }
}

/// Token reader for any [`ControlScheme`].
#[derive(Debug, Clone)]
pub enum Tokens<'a> {
    /// Flag-byte layout.
    FlagByte(FlagByteTokens<'a>),
    /// Bit-level layout.
    Bits(BitTokens<'a>),
}

impl<'a> Tokens<'a> {
    /// Create the reader matching `scheme`.
    pub fn new(input: &'a [u8], scheme: &ControlScheme) -> Self {
        match *scheme {
            ControlScheme::FlagByte(s) => Self::FlagByte(FlagByteTokens::new(input, s)),
            ControlScheme::Bits(s) => Self::Bits(BitTokens::new(input, s)),
        }
    }

    /// Input bytes consumed so far.
    pub fn consumed(&self) -> usize {
        match self {
            Self::FlagByte(t) => t.consumed(),
            Self::Bits(t) => t.consumed(),
        }
    }
}

impl Iterator for Tokens<'_> {
    type Item = LzToken;

    #[inline]
    fn next(&mut self) -> Option<LzToken> {
        match self {
            Self::FlagByte(t) => t.next(),
            Self::Bits(t) => t.next(),
        }
    }
}
