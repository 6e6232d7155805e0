//! MD5 hex-chain keystream.
//!
//! Each 32-byte block of the keystream is the lowercase hex rendering of
//! `md5(key || decimal(counter))`, with the counter stepping once per block.

use crate::keystream::Keystream;

/// Bytes of keystream produced per digest.
pub const BLOCK_SIZE: usize = 32;

/// Keystream built from chained MD5 hex digests.
///
/// ```
/// use vnarc_cipher::{Keystream, Md5HexChain};
///
/// let mut chain = Md5HexChain::new(b"key", 0);
/// let mut block = [0u8; 32];
/// chain.apply(&mut block);
/// assert_eq!(&block[..], format!("{:x}", md5::compute(b"key0")).as_bytes());
/// ```
#[derive(Debug, Clone)]
pub struct Md5HexChain {
    key: Vec<u8>,
    counter: u64,
    block: [u8; BLOCK_SIZE],
    used: usize,
}

impl Md5HexChain {
    /// Create a chain over `key` whose first block uses `start_counter`.
    pub fn new(key: &[u8], start_counter: u64) -> Self {
        Self {
            key: key.to_vec(),
            counter: start_counter,
            block: [0; BLOCK_SIZE],
            used: BLOCK_SIZE,
        }
    }

    /// Counter of the next block to be generated.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    fn refill(&mut self) {
        let mut context = md5::Context::new();
        context.consume(&self.key);
        context.consume(self.counter.to_string().as_bytes());
        let hex = format!("{:x}", context.compute());
        self.block.copy_from_slice(hex.as_bytes());
        self.counter = self.counter.wrapping_add(1);
        self.used = 0;
    }
}

impl Keystream for Md5HexChain {
    #[inline]
    fn next_byte(&mut self) -> u8 {
        if self.used == BLOCK_SIZE {
            self.refill();
        }
        let byte = self.block[self.used];
        self.used += 1;
        byte
    }
}
