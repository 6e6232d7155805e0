//! Sliding window (ring buffer) for LZSS decompression.
//!
//! Window-based codecs keep the most recent output in a fixed-capacity ring
//! that starts out pre-filled with a constant and has its write cursor at a
//! declared initial position. Matches may reference the pre-filled region
//! before any real output exists.
//!
//! # Sizes
//!
//! Capacities vary per codec; the common ones are listed in [`sizes`].
//! Any non-zero capacity is accepted.

use crate::error::{Result, VnArcError};

/// Common window geometry.
pub mod sizes {
    /// Small window (2 KB).
    pub const SMALL: usize = 2048;
    /// Classic LZSS window (4 KB).
    pub const CLASSIC: usize = 4096;
    /// Classic LZSS look-ahead; the initial cursor is `capacity - LOOKAHEAD`.
    pub const LOOKAHEAD: usize = 18;
    /// Largest capacity accepted by [`super::Window::new`] (16 MB).
    pub const MAX: usize = 1 << 24;
}

/// A fixed-capacity ring of recently produced bytes.
///
/// Positions are absolute ring indices in `0..capacity`; the cursor marks
/// where the next byte is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    /// The underlying buffer.
    buffer: Vec<u8>,
    /// Current write position (next byte will be written here).
    position: usize,
}

impl Window {
    /// Create a window filled with `fill` and its cursor at `initial_cursor`.
    pub fn new(capacity: usize, fill: u8, initial_cursor: usize) -> Result<Self> {
        if capacity == 0 || capacity > sizes::MAX {
            return Err(VnArcError::invalid_parameter(format!(
                "window capacity {capacity} outside 1..={}",
                sizes::MAX
            )));
        }
        if initial_cursor >= capacity {
            return Err(VnArcError::invalid_parameter(format!(
                "initial cursor {initial_cursor} outside window of {capacity} bytes"
            )));
        }

        Ok(Self {
            buffer: vec![fill; capacity],
            position: initial_cursor,
        })
    }

    /// The classic 4 KB window: zero fill, cursor at `4096 - 18`.
    pub fn classic() -> Self {
        Self {
            buffer: vec![0; sizes::CLASSIC],
            position: sizes::CLASSIC - sizes::LOOKAHEAD,
        }
    }

    /// Get the capacity of the window.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Get the current write position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Write a single byte at the cursor and advance it.
    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        self.buffer[self.position] = byte;
        self.position += 1;
        if self.position == self.buffer.len() {
            self.position = 0;
        }
    }

    /// Read the byte at an absolute ring index (taken modulo the capacity).
    #[inline]
    pub fn byte_at(&self, index: usize) -> u8 {
        self.buffer[index % self.buffer.len()]
    }

    /// Ring index `distance` bytes behind the cursor.
    ///
    /// Distance 1 is the most recently written byte and distance `capacity`
    /// is the byte at the cursor itself (the oldest one).
    pub fn index_at_distance(&self, distance: usize) -> Result<usize> {
        let capacity = self.buffer.len();
        if distance == 0 || distance > capacity {
            return Err(VnArcError::invalid_distance(distance, capacity));
        }
        Ok((self.position + capacity - distance) % capacity)
    }

    /// Copy a match starting at ring index `start` into `out` and the window.
    ///
    /// Bytes are moved one at a time, so a source that runs into the bytes
    /// being written repeats them, as an LZ match must.
    pub fn copy_match(&mut self, start: usize, out: &mut [u8]) {
        let capacity = self.buffer.len();
        let mut src = start % capacity;
        for slot in out.iter_mut() {
            let byte = self.buffer[src];
            *slot = byte;
            self.write_byte(byte);
            src += 1;
            if src == capacity {
                src = 0;
            }
        }
    }

    /// Reset every byte to `fill` and move the cursor to `cursor`.
    pub fn reset(&mut self, fill: u8, cursor: usize) -> Result<()> {
        if cursor >= self.buffer.len() {
            return Err(VnArcError::invalid_parameter(format!(
                "cursor {cursor} outside window of {} bytes",
                self.buffer.len()
            )));
        }
        self.buffer.fill(fill);
        self.position = cursor;
        Ok(())
    }
}
