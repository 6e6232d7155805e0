//! Bit-level I/O for the decoding primitives.
//!
//! This module provides [`BitReader`] and [`BitWriter`] for reading and writing
//! data at the bit level. Engines disagree on how bits are packed into bytes,
//! so both types take a [`BitOrder`].
//!
//! # Bit Ordering
//!
//! - [`BitOrder::MsbFirst`]: the first bit of a byte is its most significant
//!   bit (`0x80`).
//! - [`BitOrder::LsbFirst`]: the first bit of a byte is its least significant
//!   bit (`0x01`).
//!
//! Independently of the packing, multi-bit reads compose their bits
//! most-significant-first in the order consumed: the first bit read becomes
//! the highest bit of the returned value. Two consecutive reads of `n` and `m`
//! bits therefore always equal one read of `n + m` bits split at bit `m`.
//!
//! # End of input
//!
//! Running out of input is an ordinary outcome. [`BitReader::next_bit`]
//! returns `None`, and [`BitReader::read_bits`] returns a [`BitRun`] that
//! records how many of the requested bits were actually available.
//!
//! # Example
//!
//! ```
//! use vnarc_core::bitstream::{BitOrder, BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new(BitOrder::MsbFirst);
//! writer.write_bits(0b101, 3);
//! writer.write_bits(0b1100, 4);
//! let data = writer.finish();
//!
//! let mut reader = BitReader::new(&data, BitOrder::MsbFirst);
//! assert_eq!(reader.read_bits(3).complete(), Some(0b101));
//! assert_eq!(reader.read_bits(4).complete(), Some(0b1100));
//! ```

use crate::error::{Result, VnArcError};

/// Maximum length of a unary run before [`BitReader::count_unary`] stops.
pub const UNARY_CAP: u32 = 32;

/// Order in which the bits of each byte are consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BitOrder {
    /// Most significant bit of each byte first.
    #[default]
    MsbFirst,
    /// Least significant bit of each byte first.
    LsbFirst,
}

/// Result of a multi-bit read.
///
/// `value` holds the bits that were read, composed most-significant-first.
/// When the input ended early, `len` is smaller than `requested`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitRun {
    /// The bits read so far.
    pub value: u32,
    /// Number of bits actually read.
    pub len: u8,
    /// Number of bits that were requested.
    pub requested: u8,
}

impl BitRun {
    /// Whether every requested bit was read.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.len == self.requested
    }

    /// The value, if every requested bit was read.
    #[inline]
    pub fn complete(self) -> Option<u32> {
        self.is_complete().then_some(self.value)
    }
}

/// A bit-level cursor over a byte slice.
///
/// At most one byte is buffered: between 0 and 8 unread bits are held, and a
/// new byte is pulled from the source only when a bit is requested and the
/// buffer is empty.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    /// Input data.
    data: &'a [u8],
    /// Position of the next byte to pull from `data`.
    byte_pos: usize,
    /// Partially consumed byte, aligned so the next bit is at the read end.
    current: u8,
    /// Number of valid unread bits in `current`.
    bits_left: u8,
    /// Bit packing of the source.
    order: BitOrder,
    /// Total bits read (for error reporting).
    total_bits_read: u64,
}

impl<'a> BitReader<'a> {
    /// Create a new `BitReader` over `data`.
    pub fn new(data: &'a [u8], order: BitOrder) -> Self {
        Self {
            data,
            byte_pos: 0,
            current: 0,
            bits_left: 0,
            order,
            total_bits_read: 0,
        }
    }

    /// The declared bit order.
    pub fn order(&self) -> BitOrder {
        self.order
    }

    /// Byte offset of the next byte that will be pulled from the source.
    ///
    /// A partially consumed byte counts as consumed.
    pub fn position(&self) -> usize {
        self.byte_pos
    }

    /// Get the total number of bits read so far.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Whether no bits remain, neither buffered nor in the source.
    pub fn is_exhausted(&self) -> bool {
        self.bits_left == 0 && self.byte_pos >= self.data.len()
    }

    /// Read one bit, or `None` at end of input.
    #[inline]
    pub fn next_bit(&mut self) -> Option<u8> {
        if self.bits_left == 0 {
            let byte = *self.data.get(self.byte_pos)?;
            self.byte_pos += 1;
            self.current = byte;
            self.bits_left = 8;
        }

        let bit = match self.order {
            BitOrder::MsbFirst => {
                let bit = self.current >> 7;
                self.current <<= 1;
                bit
            }
            BitOrder::LsbFirst => {
                let bit = self.current & 1;
                self.current >>= 1;
                bit
            }
        };
        self.bits_left -= 1;
        self.total_bits_read += 1;
        Some(bit)
    }

    /// Read up to 32 bits, first bit read in the most significant position.
    ///
    /// The result records how many bits were available; use
    /// [`BitRun::complete`] when a partial read means truncation.
    #[inline]
    pub fn read_bits(&mut self, count: u8) -> BitRun {
        debug_assert!(count <= 32, "Cannot read more than 32 bits at once");

        let mut run = BitRun {
            value: 0,
            len: 0,
            requested: count,
        };
        for _ in 0..count {
            match self.next_bit() {
                Some(bit) => {
                    run.value = (run.value << 1) | bit as u32;
                    run.len += 1;
                }
                None => break,
            }
        }
        run
    }

    /// Read a single bit as a boolean.
    #[inline]
    pub fn read_bit(&mut self) -> Option<bool> {
        self.next_bit().map(|bit| bit != 0)
    }

    /// Count a run of 1-bits terminated by a 0-bit.
    ///
    /// The run stops at [`UNARY_CAP`] ones without needing a terminator.
    /// Returns the run length plus one, so an immediate 0-bit yields 1.
    pub fn count_unary(&mut self) -> Option<u32> {
        let mut ones = 0;
        while ones < UNARY_CAP {
            if self.next_bit()? == 0 {
                break;
            }
            ones += 1;
        }
        Some(ones + 1)
    }

    /// Read an Elias-gamma style count.
    ///
    /// A unary prefix of `k` ones is followed by `k` payload bits; the result
    /// is `(1 << k) | payload`, so a zero-length prefix yields 1. End of input
    /// yields `Ok(None)`; a prefix longer than 31 ones cannot be represented
    /// and is reported as corrupt.
    pub fn read_gamma(&mut self) -> Result<Option<u32>> {
        let Some(run) = self.count_unary() else {
            return Ok(None);
        };
        let ones = run - 1;
        if ones == 0 {
            return Ok(Some(1));
        }
        if ones > 31 {
            return Err(VnArcError::invalid_parameter(format!(
                "gamma prefix of {ones} bits at bit position {}",
                self.total_bits_read
            )));
        }
        Ok(self
            .read_bits(ones as u8)
            .complete()
            .map(|payload| (1u32 << ones) | payload))
    }

    /// Discard the unread bits of the current byte.
    pub fn align_to_byte(&mut self) {
        self.total_bits_read += self.bits_left as u64;
        self.bits_left = 0;
        self.current = 0;
    }

    /// Read a whole byte from the source, discarding any partial bits first.
    #[inline]
    pub fn read_byte(&mut self) -> Option<u8> {
        self.align_to_byte();
        let byte = *self.data.get(self.byte_pos)?;
        self.byte_pos += 1;
        self.total_bits_read += 8;
        Some(byte)
    }
}

/// A bit-level writer producing a byte vector.
///
/// The counterpart of [`BitReader`]: `write_bits(value, n)` emits the `n` low
/// bits of `value` highest first, packed according to the [`BitOrder`].
/// Call [`BitWriter::finish`] to pad the last partial byte with zeros.
#[derive(Debug, Clone)]
pub struct BitWriter {
    /// Completed bytes.
    output: Vec<u8>,
    /// Partially filled byte.
    current: u8,
    /// Number of bits in `current`.
    bits_in_current: u8,
    /// Bit packing of the output.
    order: BitOrder,
}

impl BitWriter {
    /// Create a new `BitWriter`.
    pub fn new(order: BitOrder) -> Self {
        Self {
            output: Vec::new(),
            current: 0,
            bits_in_current: 0,
            order,
        }
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        let shift = match self.order {
            BitOrder::MsbFirst => 7 - self.bits_in_current,
            BitOrder::LsbFirst => self.bits_in_current,
        };
        self.current |= (bit as u8) << shift;
        self.bits_in_current += 1;

        if self.bits_in_current == 8 {
            self.output.push(self.current);
            self.current = 0;
            self.bits_in_current = 0;
        }
    }

    /// Write the `count` low bits of `value`, most significant first.
    pub fn write_bits(&mut self, value: u32, count: u8) {
        debug_assert!(count <= 32, "Cannot write more than 32 bits at once");

        for i in (0..count).rev() {
            self.write_bit((value >> i) & 1 != 0);
        }
    }

    /// Pad to the next byte boundary with zeros.
    pub fn align_to_byte(&mut self) {
        if self.bits_in_current > 0 {
            self.output.push(self.current);
            self.current = 0;
            self.bits_in_current = 0;
        }
    }

    /// Pad to a byte boundary and append a raw byte.
    pub fn write_byte(&mut self, byte: u8) {
        self.align_to_byte();
        self.output.push(byte);
    }

    /// Number of complete bytes written so far.
    pub fn len(&self) -> usize {
        self.output.len()
    }

    /// Whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.output.is_empty() && self.bits_in_current == 0
    }

    /// Pad the final byte with zeros and return the output.
    pub fn finish(mut self) -> Vec<u8> {
        self.align_to_byte();
        self.output
    }
}
