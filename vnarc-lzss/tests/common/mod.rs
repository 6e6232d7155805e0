//! Reference LZSS encoders used to produce test streams.
//!
//! These are deliberately simple greedy encoders: they only have to emit
//! streams the decoder must reproduce exactly, not compress well.

#![allow(dead_code)]

use std::collections::HashMap;
use vnarc_core::bitstream::{BitOrder, BitWriter};
use vnarc_lzss::{
    BitScheme, ControlScheme, FlagByteScheme, LzConfig, MatchField, OffsetRule, PairLayout,
};

/// Candidates examined per hash bucket.
const MAX_CANDIDATES: usize = 32;

/// An encoder decision at one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Literal(u8),
    Copy { offset: u32, length: usize, long: bool },
}

/// Deterministic test data with plenty of repeats.
pub fn sample_data(len: usize) -> Vec<u8> {
    const WORDS: [&[u8]; 6] = [
        b"the ",
        b"quick ",
        b"archive ",
        b"entry ",
        b"\x00\x00\x00",
        b"\xFF\x10",
    ];
    let mut seed: u64 = 0x9E37_79B9_7F4A_7C15;
    let mut data = Vec::with_capacity(len);
    while data.len() < len {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let pick = (seed >> 33) as usize;
        if pick % 5 == 0 {
            data.push((seed >> 48) as u8);
        } else {
            data.extend_from_slice(WORDS[pick % WORDS.len()]);
        }
    }
    data.truncate(len);
    data
}

/// Longest earlier match for `pos`, as `(distance, length)`.
struct MatchFinder {
    chains: HashMap<[u8; 3], Vec<usize>>,
}

impl MatchFinder {
    fn new() -> Self {
        Self {
            chains: HashMap::new(),
        }
    }

    fn insert(&mut self, data: &[u8], pos: usize) {
        if pos + 3 <= data.len() {
            let key = [data[pos], data[pos + 1], data[pos + 2]];
            self.chains.entry(key).or_default().push(pos);
        }
    }

    fn find(&self, data: &[u8], pos: usize, max_distance: usize, max_len: usize) -> (usize, usize) {
        if pos + 3 > data.len() {
            return (0, 0);
        }
        let key = [data[pos], data[pos + 1], data[pos + 2]];
        let Some(chain) = self.chains.get(&key) else {
            return (0, 0);
        };
        let limit = max_len.min(data.len() - pos);
        let mut best = (0, 0);
        for &candidate in chain.iter().rev().take(MAX_CANDIDATES) {
            let distance = pos - candidate;
            if distance > max_distance {
                break;
            }
            let length = (0..limit)
                .take_while(|&k| data[candidate + k] == data[pos + k])
                .count();
            if length > best.1 {
                best = (distance, length);
            }
        }
        best
    }
}

/// Raw offset field for a match at `pos` reaching `distance` back.
fn raw_offset(config: &LzConfig, pos: usize, distance: usize) -> u32 {
    match &config.offsets {
        OffsetRule::WindowAbsolute => {
            let window = config.window.expect("absolute offsets need a window");
            let cap = window.capacity as i64;
            ((window.initial_cursor + pos) as i64 - distance as i64).rem_euclid(cap) as u32
        }
        OffsetRule::Backward { bias } => (distance - *bias as usize) as u32,
        OffsetRule::Neighbor { .. } => unreachable!("neighbour streams use encode_neighbor"),
    }
}

/// Largest distance the configuration can express.
fn max_distance(config: &LzConfig, max_offset: u32) -> usize {
    match (&config.offsets, config.window) {
        (OffsetRule::WindowAbsolute, Some(window)) => window.capacity - 1,
        (OffsetRule::Backward { bias }, window) => {
            let reach = max_offset as usize + *bias as usize;
            window.map_or(reach, |w| reach.min(w.capacity))
        }
        _ => unreachable!(),
    }
}

fn greedy_ops(data: &[u8], config: &LzConfig, fields: &[MatchField]) -> Vec<Op> {
    let mut finder = MatchFinder::new();
    let mut ops = Vec::new();
    let max_len = fields.iter().map(MatchField::max_length).max().unwrap_or(0);
    let reach = fields
        .iter()
        .map(|f| max_distance(config, f.max_offset()))
        .max()
        .unwrap_or(0);

    let mut pos = 0;
    while pos < data.len() {
        let (distance, length) = finder.find(data, pos, reach, max_len);
        let chosen = fields.iter().enumerate().find_map(|(i, f)| {
            let fits = distance > 0
                && distance <= max_distance(config, f.max_offset())
                && length >= f.min_length;
            fits.then(|| (i, length.min(f.max_length())))
        });

        let step = match chosen {
            Some((field, length)) => {
                ops.push(Op::Copy {
                    offset: raw_offset(config, pos, distance),
                    length,
                    long: field == 1,
                });
                length
            }
            None => {
                ops.push(Op::Literal(data[pos]));
                1
            }
        };
        for p in pos..pos + step {
            finder.insert(data, p);
        }
        pos += step;
    }
    ops
}

fn serialize_flag_bytes(ops: &[Op], scheme: &FlagByteScheme) -> Vec<u8> {
    let mut out = Vec::new();
    for group in ops.chunks(8) {
        let flag_pos = out.len();
        out.push(0u8);
        let mut flags = 0u8;
        for (i, op) in group.iter().enumerate() {
            let flag = match *op {
                Op::Literal(byte) => {
                    out.push(byte);
                    scheme.literal_flag
                }
                Op::Copy { offset, length, .. } => {
                    let code = (length - scheme.min_length) as u32;
                    out.extend_from_slice(&pair(scheme.layout, offset, code));
                    1 - scheme.literal_flag
                }
            };
            let shift = match scheme.flag_order {
                BitOrder::LsbFirst => i,
                BitOrder::MsbFirst => 7 - i,
            };
            flags |= flag << shift;
        }
        // Unused trailing flags select literals the decoder never reaches
        out[flag_pos] = flags;
    }
    out
}

fn pair(layout: PairLayout, offset: u32, code: u32) -> [u8; 2] {
    let (word, big_endian) = match layout {
        PairLayout::Nibble => {
            return [offset as u8, (((offset >> 4) & 0xF0) | code) as u8];
        }
        PairLayout::LengthHigh {
            offset_bits,
            big_endian,
        } => ((code << offset_bits) | offset, big_endian),
        PairLayout::LengthLow {
            length_bits,
            big_endian,
        } => ((offset << length_bits) | code, big_endian),
    };
    if big_endian {
        (word as u16).to_be_bytes()
    } else {
        (word as u16).to_le_bytes()
    }
}

fn serialize_bits(ops: &[Op], scheme: &BitScheme) -> Vec<u8> {
    let mut writer = BitWriter::new(scheme.order);
    for op in ops {
        match *op {
            Op::Literal(byte) => {
                writer.write_bits(scheme.literal_flag as u32, 1);
                writer.write_bits(byte as u32, 8);
            }
            Op::Copy {
                offset,
                length,
                long,
            } => {
                writer.write_bits(1 - scheme.literal_flag as u32, 1);
                let field = match scheme.long {
                    Some(long_field) => {
                        let selector = if long {
                            1 - scheme.short_flag
                        } else {
                            scheme.short_flag
                        };
                        writer.write_bits(selector as u32, 1);
                        if long { long_field } else { scheme.short }
                    }
                    None => scheme.short,
                };
                writer.write_bits(offset, field.offset_bits);
                writer.write_bits((length - field.min_length) as u32, field.length_bits);
            }
        }
    }
    writer.finish()
}

/// Encode `data` for any window or backward-offset configuration.
pub fn encode(data: &[u8], config: &LzConfig) -> Vec<u8> {
    match &config.scheme {
        ControlScheme::FlagByte(scheme) => {
            let (max_offset, max_code) = scheme.layout.limits();
            let length_bits = 32 - max_code.leading_zeros();
            let field = MatchField {
                offset_bits: (32 - max_offset.leading_zeros()) as u8,
                length_bits: length_bits as u8,
                min_length: scheme.min_length,
            };
            let ops = greedy_ops(data, config, &[field]);
            serialize_flag_bytes(&ops, scheme)
        }
        ControlScheme::Bits(scheme) => {
            let mut fields = vec![scheme.short];
            fields.extend(scheme.long);
            let ops = greedy_ops(data, config, &fields);
            serialize_bits(&ops, scheme)
        }
    }
}

/// Encode `data` for a neighbour-table configuration, picking the longest
/// table entry at every position.
pub fn encode_neighbor(data: &[u8], config: &LzConfig) -> Vec<u8> {
    let (OffsetRule::Neighbor { table, stride }, ControlScheme::Bits(scheme)) =
        (&config.offsets, &config.scheme)
    else {
        panic!("not a neighbour configuration");
    };
    let field = scheme.short;

    let mut ops = Vec::new();
    let mut pos = 0;
    while pos < data.len() {
        let limit = field.max_length().min(data.len() - pos);
        let best = table
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.distance(*stride).map(|d| (i, d)))
            .filter(|&(_, d)| d <= pos)
            .map(|(i, d)| {
                let length = (0..limit)
                    .take_while(|&k| data[pos + k] == data[pos + k - d])
                    .count();
                (i, length)
            })
            .max_by_key(|&(i, length)| (length, std::cmp::Reverse(i)));

        match best {
            Some((index, length)) if length >= field.min_length => {
                ops.push(Op::Copy {
                    offset: index as u32,
                    length,
                    long: false,
                });
                pos += length;
            }
            _ => {
                ops.push(Op::Literal(data[pos]));
                pos += 1;
            }
        }
    }
    serialize_bits(&ops, scheme)
}

/// A synthetic image: rows of `stride` bytes that mostly repeat the row above.
pub fn sample_image(stride: usize, rows: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(stride * rows);
    for y in 0..rows {
        for x in 0..stride {
            let base = ((x / 4) * 17 + (y / 8) * 3) as u8;
            let noise = if (x * 7 + y * 13) % 29 == 0 { 0x55 } else { 0 };
            data.push(base ^ noise);
        }
    }
    data
}
