//! LZSS decoder driven by an [`LzConfig`].

use crate::config::{EndRule, LzConfig, OffsetRule};
use crate::token::{LzToken, Tokens};
use log::{debug, trace};
use vnarc_core::copy::copy_back_reference;
use vnarc_core::error::{Result, VnArcError};
use vnarc_core::traits::{BlockDecoder, Decoded, Outcome};
use vnarc_core::window::Window;

/// Where a match reads from.
enum Source {
    /// Absolute ring index.
    Ring(usize),
    /// Backward distance from the write position.
    Behind(usize),
    /// The source lies before the start of the output.
    Underflow(usize),
}

/// A validated LZSS decoder.
///
/// The decoder only holds its configuration; each call builds a fresh window,
/// so decoding is deterministic and the decoder can be shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LzDecoder {
    config: LzConfig,
}

impl LzDecoder {
    /// Create a decoder, rejecting inconsistent configurations.
    pub fn new(config: LzConfig) -> Result<Self> {
        config.validate()?;
        trace!(
            "lzss decoder: window={:?} offsets={:?} end={:?}",
            config.window, config.offsets, config.end
        );
        Ok(Self { config })
    }

    /// The configuration in use.
    pub fn config(&self) -> &LzConfig {
        &self.config
    }

    /// Iterate over the raw tokens of `input`.
    pub fn tokens<'a>(&self, input: &'a [u8]) -> Tokens<'a> {
        Tokens::new(input, &self.config.scheme)
    }
}

impl BlockDecoder for LzDecoder {
    fn decode_into(&self, input: &[u8], output: &mut [u8]) -> Result<Outcome> {
        run(&self.config, input, output)
    }
}

/// Decode `input` with `config` into a buffer of `len` bytes.
///
/// # Example
///
/// ```
/// use vnarc_lzss::{LzConfig, decompress};
///
/// let decoded = decompress(&[0x01, b'A'], &LzConfig::CLASSIC, 1).unwrap();
/// assert_eq!(decoded.data, b"A");
/// assert!(decoded.is_complete());
/// ```
pub fn decompress(input: &[u8], config: &LzConfig, len: usize) -> Result<Decoded> {
    config.validate()?;
    let mut data = vec![0u8; len];
    let outcome = run(config, input, &mut data)?;
    data.truncate(outcome.produced);
    Ok(Decoded {
        data,
        status: outcome.status,
    })
}

fn run(config: &LzConfig, input: &[u8], output: &mut [u8]) -> Result<Outcome> {
    let mut window = match &config.window {
        Some(w) => Some(Window::new(w.capacity, w.fill, w.initial_cursor)?),
        None => None,
    };
    let mut tokens = Tokens::new(input, &config.scheme);
    let capacity = output.len();
    let mut pos = 0;

    while pos < capacity {
        let Some(token) = tokens.next() else {
            debug!("lzss input ended after {pos} of {capacity} bytes");
            break;
        };

        match token {
            LzToken::Literal(byte) => {
                output[pos] = byte;
                if let Some(window) = window.as_mut() {
                    window.write_byte(byte);
                }
                pos += 1;
            }
            LzToken::Match { offset, length } => {
                let source = resolve(config, window.as_ref(), offset, pos)?;
                if let Source::Underflow(distance) = source {
                    if config.end == EndRule::StopOnUnderflow {
                        debug!("lzss stopped at {pos}: distance {distance} before output start");
                        break;
                    }
                    return Err(VnArcError::invalid_distance(distance, pos));
                }

                let length = if pos + length > capacity {
                    if config.end != EndRule::ClipAtEnd {
                        return Err(VnArcError::output_overrun(pos, length, capacity));
                    }
                    capacity - pos
                } else {
                    length
                };

                pos = match (source, window.as_mut()) {
                    (Source::Ring(start), Some(window)) => {
                        window.copy_match(start, &mut output[pos..pos + length]);
                        pos + length
                    }
                    (Source::Behind(distance), Some(window)) => {
                        let start = window.index_at_distance(distance)?;
                        window.copy_match(start, &mut output[pos..pos + length]);
                        pos + length
                    }
                    (Source::Behind(distance), None) => {
                        copy_back_reference(output, pos, distance, length)?
                    }
                    _ => {
                        return Err(VnArcError::invalid_parameter(
                            "absolute offsets need a window",
                        ));
                    }
                };
            }
        }
    }

    Ok(Outcome::new(tokens.consumed(), pos, capacity))
}

fn resolve(config: &LzConfig, window: Option<&Window>, offset: u32, pos: usize) -> Result<Source> {
    let distance = match &config.offsets {
        OffsetRule::WindowAbsolute => {
            let capacity = window.map_or(1, Window::capacity);
            return Ok(Source::Ring(offset as usize % capacity));
        }
        OffsetRule::Backward { bias } => offset as usize + *bias as usize,
        OffsetRule::Neighbor { table, stride } => table
            .get(offset as usize)
            .and_then(|n| n.distance(*stride))
            .ok_or_else(|| {
                VnArcError::invalid_parameter(format!(
                    "neighbour index {offset} outside table of {} entries",
                    table.len()
                ))
            })?,
    };

    if distance == 0 {
        return Err(VnArcError::invalid_distance(0, pos));
    }
    let history = window.map_or(pos, Window::capacity);
    if distance > history {
        return Ok(Source::Underflow(distance));
    }
    Ok(Source::Behind(distance))
}
