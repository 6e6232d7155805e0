//! Linear congruential keystreams.

use crate::keystream::{Biased, Keystream};

/// Multiplier of the MSVC `rand()` generator.
pub const MSVC_MULTIPLIER: u32 = 214013;
/// Increment of the MSVC `rand()` generator.
pub const MSVC_INCREMENT: u32 = 2531011;

/// Modulus of the Park-Miller generator (2^31 - 1).
pub const PARK_MILLER_MODULUS: u32 = 0x7FFF_FFFF;
/// Multiplier of the Park-Miller generator.
pub const PARK_MILLER_MULTIPLIER: u64 = 16807;

/// Bias added by [`decrypt_script`].
pub const SCRIPT_BIAS: u8 = 0x80;

/// The MSVC `rand()` generator.
///
/// `seed = seed * 214013 + 2531011` (wrapping), output bits 16-30. The
/// keystream byte is the low byte of each output.
///
/// ```
/// use vnarc_cipher::MsvcRand;
///
/// let mut rng = MsvcRand::new(0);
/// assert_eq!(rng.next_rand(), 38);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MsvcRand {
    seed: u32,
}

impl MsvcRand {
    /// Seed the generator.
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// Advance and return the 15-bit output.
    #[inline]
    pub fn next_rand(&mut self) -> u16 {
        self.seed = self
            .seed
            .wrapping_mul(MSVC_MULTIPLIER)
            .wrapping_add(MSVC_INCREMENT);
        ((self.seed >> 16) & 0x7FFF) as u16
    }
}

impl Keystream for MsvcRand {
    #[inline]
    fn next_byte(&mut self) -> u8 {
        self.next_rand() as u8
    }
}

/// The Park-Miller minimal standard generator.
///
/// `seed = seed * 16807 mod (2^31 - 1)`; the keystream byte is the low byte
/// of each new seed. A seed that is a multiple of the modulus stays zero, so
/// the keystream is all zeros and decryption leaves the data unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParkMiller {
    seed: u32,
}

impl ParkMiller {
    /// Seed the generator (reduced modulo 2^31 - 1).
    pub fn new(seed: u32) -> Self {
        Self {
            seed: seed % PARK_MILLER_MODULUS,
        }
    }

    /// Advance and return the new seed.
    #[inline]
    pub fn next_seed(&mut self) -> u32 {
        let next = self.seed as u64 * PARK_MILLER_MULTIPLIER % PARK_MILLER_MODULUS as u64;
        self.seed = next as u32;
        self.seed
    }
}

impl Keystream for ParkMiller {
    #[inline]
    fn next_byte(&mut self) -> u8 {
        self.next_seed() as u8
    }
}

/// Decrypt a script buffer: XOR with [`MsvcRand`] seeded by `seed`, then add
/// `0x80` to every byte.
pub fn decrypt_script(buffer: &mut [u8], seed: u32) {
    Biased::new(MsvcRand::new(seed), SCRIPT_BIAS).apply(buffer);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msvc_sequence() {
        let mut rng = MsvcRand::new(0);
        assert_eq!(rng.next_rand(), 38);
        assert_eq!(rng.next_rand(), 7719);
        assert_eq!(rng.next_rand(), 21238);

        let mut rng = MsvcRand::new(1);
        assert_eq!(rng.next_rand(), 41);
        assert_eq!(rng.next_rand(), 18467);
    }

    #[test]
    fn test_msvc_keystream_is_low_byte() {
        let mut rng = MsvcRand::new(0);
        let mut buf = [0u8; 2];
        rng.apply(&mut buf);
        assert_eq!(buf, [38, (7719 & 0xFF) as u8]);
    }

    #[test]
    fn test_park_miller_sequence() {
        let mut rng = ParkMiller::new(1);
        assert_eq!(rng.next_seed(), 16807);
        assert_eq!(rng.next_seed(), 282475249);
        assert_eq!(rng.next_seed(), 1622650073);
    }

    #[test]
    fn test_park_miller_zero_seed_is_identity() {
        for seed in [0, PARK_MILLER_MODULUS] {
            let mut buf = *b"plain";
            ParkMiller::new(seed).apply(&mut buf);
            assert_eq!(&buf, b"plain");
        }
    }

    #[test]
    fn test_decrypt_script_bias() {
        let mut plain = *b"text";
        // Encrypt: subtract the bias, then XOR
        let mut rng = MsvcRand::new(1234);
        for b in plain.iter_mut() {
            *b = b.wrapping_sub(SCRIPT_BIAS) ^ rng.next_byte();
        }
        decrypt_script(&mut plain, 1234);
        assert_eq!(&plain, b"text");
    }
}
