//! Overlap-safe byte copying for LZ back-references.
//!
//! LZ decoders copy `length` bytes from `write_position - distance` to
//! `write_position` inside the same buffer. When the distance is smaller than
//! the length the ranges overlap and the copy must behave like a forward
//! byte-by-byte loop, so that the last `distance` bytes repeat as a short
//! cycle (`distance == 1` fills with a single byte).
//!
//! `<[u8]>::copy_within` has memmove semantics, which is the same thing only
//! when the source does not start before an overlapping destination. This
//! module handles every placement and checks bounds before touching memory.

use crate::error::{Result, VnArcError};

/// Check that `start..start + len` lies inside a buffer of `buf_len` bytes.
#[inline]
pub fn check_range(buf_len: usize, start: usize, len: usize) -> Result<()> {
    match start.checked_add(len) {
        Some(end) if end <= buf_len => Ok(()),
        Some(end) => Err(VnArcError::out_of_bounds(start, end, buf_len)),
        None => Err(VnArcError::out_of_bounds(start, usize::MAX, buf_len)),
    }
}

/// Copy `len` bytes from `src` to `dst` within `buf`.
///
/// The result is identical to
/// `for i in 0..len { buf[dst + i] = buf[src + i] }` for every relative
/// placement of the two ranges. Out-of-range requests are rejected before
/// anything is written.
///
/// # Example
///
/// ```
/// use vnarc_core::copy::overlap_copy;
///
/// let mut buf = *b"AB\0\0\0\0\0";
/// overlap_copy(&mut buf, 0, 2, 5).unwrap();
/// assert_eq!(&buf, b"ABABABA");
/// ```
pub fn overlap_copy(buf: &mut [u8], src: usize, dst: usize, len: usize) -> Result<()> {
    check_range(buf.len(), src, len)?;
    check_range(buf.len(), dst, len)?;

    if len == 0 || src == dst {
        return Ok(());
    }

    // Source after destination, or no overlap: memmove gives the forward result.
    if src > dst || src + len <= dst {
        buf.copy_within(src..src + len, dst);
        return Ok(());
    }

    // src < dst < src + len: the forward loop repeats buf[src..dst]. Each pass
    // copies everything already valid, so the source never overlaps the
    // destination and the chunk doubles.
    let period = dst - src;
    let mut copied = 0;
    while copied < len {
        let chunk = (period + copied).min(len - copied);
        buf.copy_within(src..src + chunk, dst + copied);
        copied += chunk;
    }

    Ok(())
}

/// Copy a back-reference at `distance` behind `pos` and return the new position.
///
/// This is the LZ form of [`overlap_copy`]: the source is `pos - distance`.
/// A distance of zero or one reaching before the start of `buf` is an
/// [`VnArcError::InvalidDistance`]; a copy running past the end of `buf` is an
/// [`VnArcError::OutputOverrun`].
#[inline]
pub fn copy_back_reference(
    buf: &mut [u8],
    pos: usize,
    distance: usize,
    len: usize,
) -> Result<usize> {
    if distance == 0 || distance > pos {
        return Err(VnArcError::invalid_distance(distance, pos));
    }
    if pos.checked_add(len).is_none_or(|end| end > buf.len()) {
        return Err(VnArcError::output_overrun(pos, len, buf.len()));
    }
    overlap_copy(buf, pos - distance, pos, len)?;
    Ok(pos + len)
}
