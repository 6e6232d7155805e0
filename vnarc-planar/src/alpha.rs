//! Run-length alpha overlay.
//!
//! Some codecs store the alpha channel apart from the colour planes, as
//! (value, run length) pairs at reduced precision. The runs are written
//! straight into the alpha lane of an already interleaved image.

use crate::layout::PlanarLayout;
use log::debug;
use vnarc_core::bitstream::BitReader;
use vnarc_core::error::{Result, VnArcError};

/// Stored precision of alpha values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlphaPrecision {
    /// 4-bit values.
    Bits4,
    /// 5-bit values.
    Bits5,
    /// 7-bit values.
    Bits7,
    /// Full 8-bit values.
    #[default]
    Bits8,
}

impl AlphaPrecision {
    /// Stored bits per value.
    pub fn bits(self) -> u8 {
        match self {
            Self::Bits4 => 4,
            Self::Bits5 => 5,
            Self::Bits7 => 7,
            Self::Bits8 => 8,
        }
    }

    /// Widen a stored value to 8 bits by replicating its high bits.
    ///
    /// The maximum stored value maps to 255 and zero stays zero.
    #[inline]
    pub fn expand(self, value: u8) -> u8 {
        let bits = self.bits();
        if bits == 8 {
            return value;
        }
        let value = value & ((1 << bits) - 1);
        (value << (8 - bits)) | (value >> (2 * bits - 8))
    }
}

/// A run of pixels sharing one alpha value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlphaRun {
    /// Stored alpha value (at the source precision).
    pub value: u8,
    /// Number of pixels.
    pub length: usize,
}

/// Write `runs` into lane `lane` of the interleaved `pixels`.
///
/// Runs are expanded from `precision` and applied from the first pixel on.
/// Runs covering more pixels than the image has are an error and nothing is
/// written; runs that stop short leave the remaining alpha bytes untouched.
pub fn overlay_alpha(
    pixels: &mut [u8],
    layout: &PlanarLayout,
    lane: usize,
    runs: &[AlphaRun],
    precision: AlphaPrecision,
) -> Result<()> {
    layout.validate()?;
    if lane >= layout.pixel_size {
        return Err(VnArcError::invalid_parameter(format!(
            "alpha lane {lane} outside a {}-byte pixel",
            layout.pixel_size
        )));
    }
    if pixels.len() != layout.output_len() {
        return Err(VnArcError::invalid_parameter(format!(
            "pixel buffer of {} bytes for an image of {}",
            pixels.len(),
            layout.output_len()
        )));
    }

    let pixel_count = layout.pixel_count();
    let covered = runs
        .iter()
        .try_fold(0usize, |acc, run| acc.checked_add(run.length))
        .unwrap_or(usize::MAX);
    if covered > pixel_count {
        return Err(VnArcError::out_of_bounds(0, covered, pixel_count));
    }
    if covered < pixel_count {
        debug!("alpha runs cover {covered} of {pixel_count} pixels");
    }

    let mut alpha = pixels.iter_mut().skip(lane).step_by(layout.pixel_size);
    for run in runs {
        let value = precision.expand(run.value);
        for slot in alpha.by_ref().take(run.length) {
            *slot = value;
        }
    }
    Ok(())
}

/// Parse (value, run length) pairs until `pixel_count` pixels are covered or
/// the input ends.
///
/// Each pair is a value of `precision.bits()` bits followed by a gamma-coded
/// run length (see [`BitReader::read_gamma`]). A pair cut off by the end of
/// input is dropped. The last run is returned as stored even if it overshoots
/// the pixel count; [`overlay_alpha`] rejects it.
pub fn read_alpha_runs(
    reader: &mut BitReader<'_>,
    precision: AlphaPrecision,
    pixel_count: usize,
) -> Result<Vec<AlphaRun>> {
    let mut runs = Vec::new();
    let mut covered = 0usize;
    while covered < pixel_count {
        let Some(value) = reader.read_bits(precision.bits()).complete() else {
            break;
        };
        let Some(length) = reader.read_gamma()? else {
            break;
        };
        let length = length as usize;
        covered = covered.saturating_add(length);
        runs.push(AlphaRun {
            value: value as u8,
            length,
        });
    }
    if covered < pixel_count {
        debug!("alpha input ended after {covered} of {pixel_count} pixels");
    }
    Ok(runs)
}
