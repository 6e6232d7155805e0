//! Interleaving of channel planes into pixels.

use crate::layout::{ChannelMap, DeltaMode, PlanarLayout};
use log::trace;
use vnarc_core::error::{Result, VnArcError};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Combines separately decoded channel planes into one pixel buffer.
///
/// # Example
///
/// ```
/// use vnarc_planar::{ChannelMap, PlanarLayout, Reassembler};
///
/// let layout = PlanarLayout::new(2, 1, 3).unwrap();
/// let reassembler = Reassembler::new(layout, ChannelMap::BGR).unwrap();
/// let pixels = reassembler.assemble(&[[1u8, 2], [3, 4], [5, 6]]).unwrap();
/// assert_eq!(pixels, vec![1, 3, 5, 2, 4, 6]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reassembler {
    layout: PlanarLayout,
    map: ChannelMap,
    delta: DeltaMode,
    fill: u8,
}

impl Reassembler {
    /// Create a reassembler for `layout` fed according to `map`.
    pub fn new(layout: PlanarLayout, map: ChannelMap) -> Result<Self> {
        layout.validate()?;
        map.validate(layout.pixel_size)?;
        trace!(
            "planar reassembler: {}x{}x{} lanes {:?}",
            layout.width,
            layout.height,
            layout.pixel_size,
            map.lanes()
        );
        Ok(Self {
            layout,
            map,
            delta: DeltaMode::None,
            fill: 0,
        })
    }

    /// Set the row prediction (builder style).
    pub fn with_delta(mut self, delta: DeltaMode) -> Self {
        self.delta = delta;
        self
    }

    /// Set the byte written to lanes no plane feeds (builder style).
    pub fn with_fill(mut self, fill: u8) -> Self {
        self.fill = fill;
        self
    }

    /// The image geometry.
    pub fn layout(&self) -> &PlanarLayout {
        &self.layout
    }

    /// Interleave `planes` into a buffer of `width * height * pixel_size`
    /// bytes.
    ///
    /// Exactly one plane per mapped lane is expected. A plane holding fewer
    /// than `width * height` bytes is an error; extra bytes are ignored.
    pub fn assemble<P: AsRef<[u8]>>(&self, planes: &[P]) -> Result<Vec<u8>> {
        let mut out = vec![self.fill; self.layout.output_len()];
        self.assemble_into(planes, &mut out)?;
        Ok(out)
    }

    /// [`Reassembler::assemble`] into a caller buffer of the exact output size.
    pub fn assemble_into<P: AsRef<[u8]>>(&self, planes: &[P], out: &mut [u8]) -> Result<()> {
        if planes.len() != self.map.planes() {
            return Err(VnArcError::invalid_parameter(format!(
                "{} planes supplied for a map of {}",
                planes.len(),
                self.map.planes()
            )));
        }
        let expected = self.layout.output_len();
        if out.len() != expected {
            return Err(VnArcError::invalid_parameter(format!(
                "output of {} bytes for an image of {expected}",
                out.len()
            )));
        }

        let pixels = self.layout.pixel_count();
        for (channel, plane) in planes.iter().enumerate() {
            let found = plane.as_ref().len();
            if found < pixels {
                return Err(VnArcError::plane_too_short(channel, pixels, found));
            }
        }

        let pixel_size = self.layout.pixel_size;
        out.fill(self.fill);
        for (plane, &lane) in planes.iter().zip(self.map.lanes()) {
            let lane_bytes = out.iter_mut().skip(lane as usize).step_by(pixel_size);
            for (dst, &src) in lane_bytes.zip(&plane.as_ref()[..pixels]) {
                *dst = src;
            }
        }

        if self.delta == DeltaMode::VerticalBands {
            self.undo_vertical_delta(out);
        }
        Ok(())
    }

    fn undo_vertical_delta(&self, out: &mut [u8]) {
        let stride = self.layout.stride();
        let pixel_size = self.layout.pixel_size;
        let band = self.layout.height / 3;
        let band_starts = [0, band, 2 * band];

        for y in 1..self.layout.height {
            if band_starts.contains(&y) {
                continue;
            }
            let (above, rest) = out.split_at_mut(y * stride);
            let above = &above[(y - 1) * stride..];
            let row = &mut rest[..stride];
            for &lane in self.map.lanes() {
                let lane = lane as usize;
                for x in (lane..stride).step_by(pixel_size) {
                    row[x] = row[x].wrapping_add(above[x]);
                }
            }
        }
    }
}

/// Run `decode` over every channel input and collect the planes in order.
///
/// With the `parallel` feature the channels are decoded concurrently. The
/// first error (in channel order) is returned.
#[cfg(feature = "parallel")]
pub fn decode_planes<I, F>(inputs: &[I], decode: F) -> Result<Vec<Vec<u8>>>
where
    I: Sync,
    F: Fn(usize, &I) -> Result<Vec<u8>> + Sync + Send,
{
    let results: Vec<Result<Vec<u8>>> = inputs
        .par_iter()
        .enumerate()
        .map(|(channel, input)| decode(channel, input))
        .collect();
    results.into_iter().collect()
}

/// Run `decode` over every channel input and collect the planes in order.
///
/// Channels are decoded one after another on the calling thread. Decoding
/// stops at the first failing channel and its error is returned.
#[cfg(not(feature = "parallel"))]
pub fn decode_planes<I, F>(inputs: &[I], decode: F) -> Result<Vec<Vec<u8>>>
where
    I: Sync,
    F: Fn(usize, &I) -> Result<Vec<u8>> + Sync + Send,
{
    inputs
        .iter()
        .enumerate()
        .map(|(channel, input)| decode(channel, input))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_by_two_bgr() {
        let layout = PlanarLayout::new(2, 2, 3).unwrap();
        let reassembler = Reassembler::new(layout, ChannelMap::BGR).unwrap();
        let b = [0x10u8, 0x11, 0x12, 0x13];
        let g = [0x20, 0x21, 0x22, 0x23];
        let r = [0x30, 0x31, 0x32, 0x33];
        let pixels = reassembler.assemble(&[b, g, r]).unwrap();
        assert_eq!(
            pixels,
            vec![
                0x10, 0x20, 0x30, 0x11, 0x21, 0x31, 0x12, 0x22, 0x32, 0x13, 0x23, 0x33
            ]
        );
    }

    #[test]
    fn test_rgb_into_four_lanes_with_fill() {
        let layout = PlanarLayout::new(1, 2, 4).unwrap();
        let reassembler = Reassembler::new(layout, ChannelMap::RGB)
            .unwrap()
            .with_fill(0xFF);
        let pixels = reassembler.assemble(&[[1u8, 2], [3, 4], [5, 6]]).unwrap();
        assert_eq!(pixels, vec![5, 3, 1, 0xFF, 6, 4, 2, 0xFF]);
    }

    #[test]
    fn test_plane_too_short() {
        let layout = PlanarLayout::new(2, 2, 3).unwrap();
        let reassembler = Reassembler::new(layout, ChannelMap::BGR).unwrap();
        let err = reassembler
            .assemble(&[&[0u8; 4][..], &[0u8; 3][..], &[0u8; 4][..]])
            .unwrap_err();
        assert_eq!(err, VnArcError::plane_too_short(1, 4, 3));
    }

    #[test]
    fn test_wrong_plane_count() {
        let layout = PlanarLayout::new(1, 1, 3).unwrap();
        let reassembler = Reassembler::new(layout, ChannelMap::BGR).unwrap();
        assert!(reassembler.assemble(&[[1u8], [2]]).is_err());
    }

    #[test]
    fn test_vertical_bands() {
        // Height 7: bands of 2, 2 and 3 rows start at 0, 2 and 4
        let layout = PlanarLayout::new(1, 7, 1).unwrap();
        let reassembler = Reassembler::new(layout, ChannelMap::GRAY)
            .unwrap()
            .with_delta(DeltaMode::VerticalBands);
        let pixels = reassembler.assemble(&[[10u8, 1, 20, 2, 30, 3, 255]]).unwrap();
        assert_eq!(pixels, vec![10, 11, 20, 22, 30, 33, 32]);
    }

    #[test]
    fn test_short_image_is_one_band() {
        let layout = PlanarLayout::new(2, 2, 1).unwrap();
        let reassembler = Reassembler::new(layout, ChannelMap::GRAY)
            .unwrap()
            .with_delta(DeltaMode::VerticalBands);
        let pixels = reassembler.assemble(&[[1u8, 2, 3, 4]]).unwrap();
        assert_eq!(pixels, vec![1, 2, 4, 6]);
    }

    #[test]
    fn test_delta_skips_filled_lanes() {
        let layout = PlanarLayout::new(1, 2, 2).unwrap();
        let reassembler = Reassembler::new(layout, ChannelMap::GRAY)
            .unwrap()
            .with_delta(DeltaMode::VerticalBands)
            .with_fill(7);
        let pixels = reassembler.assemble(&[[5u8, 5]]).unwrap();
        assert_eq!(pixels, vec![5, 7, 10, 7]);
    }

    #[test]
    fn test_decode_planes_in_order() {
        let inputs = [3usize, 1, 2];
        let planes = decode_planes(&inputs, |channel, &n| Ok(vec![channel as u8; n])).unwrap();
        assert_eq!(planes, vec![vec![0; 3], vec![1], vec![2, 2]]);

        let err = decode_planes(&inputs, |channel, _| {
            if channel == 1 {
                Err(VnArcError::invalid_parameter("bad channel"))
            } else {
                Ok(Vec::new())
            }
        });
        assert!(err.is_err());
    }

    #[test]
    fn test_decode_planes_reports_lowest_failing_channel() {
        let inputs = [0u8, 1, 2, 3];
        let err = decode_planes(&inputs, |channel, _| {
            if channel == 0 {
                std::thread::sleep(std::time::Duration::from_millis(100));
            }
            if channel == 3 {
                Ok(vec![3])
            } else {
                Err(VnArcError::invalid_parameter(format!("channel {channel}")))
            }
        })
        .unwrap_err();
        assert_eq!(err, VnArcError::invalid_parameter("channel 0"));
    }
}
