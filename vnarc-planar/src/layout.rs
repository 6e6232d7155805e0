//! Image geometry and channel mappings.
//!
//! Output pixels are stored lane by lane in B, G, R, A order (lane 0 is blue).
//! A [`ChannelMap`] says which lane each incoming plane lands in.

use vnarc_core::error::{Result, VnArcError};

/// Most lanes a pixel can have.
pub const MAX_LANES: usize = 4;

/// Dimensions of an interleaved image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanarLayout {
    /// Pixels per row.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Bytes (lanes) per pixel, 1 to 4.
    pub pixel_size: usize,
}

impl PlanarLayout {
    /// Create a layout, rejecting unusable pixel sizes and overflowing areas.
    pub fn new(width: usize, height: usize, pixel_size: usize) -> Result<Self> {
        let layout = Self {
            width,
            height,
            pixel_size,
        };
        layout.validate()?;
        Ok(layout)
    }

    /// Check the pixel size and that the output size is addressable.
    pub fn validate(&self) -> Result<()> {
        if self.pixel_size == 0 || self.pixel_size > MAX_LANES {
            return Err(VnArcError::invalid_parameter(format!(
                "pixel size {} outside 1..={MAX_LANES}",
                self.pixel_size
            )));
        }
        self.width
            .checked_mul(self.height)
            .and_then(|n| n.checked_mul(self.pixel_size))
            .map(|_| ())
            .ok_or_else(|| {
                VnArcError::invalid_parameter(format!(
                    "image of {}x{}x{} overflows",
                    self.width, self.height, self.pixel_size
                ))
            })
    }

    /// Pixels in the image.
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Bytes in one interleaved row.
    pub fn stride(&self) -> usize {
        self.width * self.pixel_size
    }

    /// Bytes in the interleaved image.
    pub fn output_len(&self) -> usize {
        self.pixel_count() * self.pixel_size
    }
}

/// Plane index to lane index mapping.
///
/// Serialized as the list of lanes in plane order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<u8>", into = "Vec<u8>")
)]
pub struct ChannelMap {
    lanes: [u8; MAX_LANES],
    planes: u8,
}

impl ChannelMap {
    /// Planes arrive as blue, green, red.
    pub const BGR: Self = Self::from_lanes([0, 1, 2, 0], 3);
    /// Planes arrive as blue, green, red, alpha.
    pub const BGRA: Self = Self::from_lanes([0, 1, 2, 3], 4);
    /// Planes arrive as red, green, blue.
    pub const RGB: Self = Self::from_lanes([2, 1, 0, 0], 3);
    /// Planes arrive as red, green, blue, alpha.
    pub const RGBA: Self = Self::from_lanes([2, 1, 0, 3], 4);
    /// A single grey plane.
    pub const GRAY: Self = Self::from_lanes([0, 0, 0, 0], 1);

    const fn from_lanes(lanes: [u8; MAX_LANES], planes: u8) -> Self {
        Self { lanes, planes }
    }

    /// Build a mapping where plane `i` lands in lane `lanes[i]`.
    pub fn new(lanes: &[u8]) -> Result<Self> {
        if lanes.is_empty() || lanes.len() > MAX_LANES {
            return Err(VnArcError::invalid_parameter(format!(
                "{} planes outside 1..={MAX_LANES}",
                lanes.len()
            )));
        }
        let mut map = Self::from_lanes([0; MAX_LANES], lanes.len() as u8);
        map.lanes[..lanes.len()].copy_from_slice(lanes);
        Ok(map)
    }

    /// Number of planes fed.
    pub fn planes(&self) -> usize {
        self.planes as usize
    }

    /// Lane of each plane, in plane order.
    pub fn lanes(&self) -> &[u8] {
        &self.lanes[..self.planes()]
    }

    /// Check the mapping against a pixel size.
    ///
    /// More planes than lanes, a lane at or past the pixel size, and two
    /// planes feeding one lane are rejected.
    pub fn validate(&self, pixel_size: usize) -> Result<()> {
        if self.planes() > pixel_size {
            return Err(VnArcError::invalid_parameter(format!(
                "{} planes for {pixel_size} lanes",
                self.planes()
            )));
        }
        let mut seen = [false; MAX_LANES];
        for &lane in self.lanes() {
            let lane = lane as usize;
            if lane >= pixel_size {
                return Err(VnArcError::invalid_parameter(format!(
                    "lane {lane} outside a {pixel_size}-byte pixel"
                )));
            }
            if std::mem::replace(&mut seen[lane], true) {
                return Err(VnArcError::invalid_parameter(format!(
                    "lane {lane} fed by two planes"
                )));
            }
        }
        Ok(())
    }
}

impl TryFrom<Vec<u8>> for ChannelMap {
    type Error = VnArcError;

    fn try_from(lanes: Vec<u8>) -> Result<Self> {
        Self::new(&lanes)
    }
}

impl From<ChannelMap> for Vec<u8> {
    fn from(map: ChannelMap) -> Self {
        map.lanes().to_vec()
    }
}

/// Row prediction applied to the planes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeltaMode {
    /// Planes hold final values.
    #[default]
    None,
    /// The image is cut into three bands of `height / 3` rows (the last band
    /// takes the remainder); each row except a band's first stores its
    /// difference from the row above.
    VerticalBands,
}
