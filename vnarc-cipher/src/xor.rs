//! Repeating-key XOR with optional bit rotation.

use crate::keystream::Keystream;
use vnarc_core::error::{Result, VnArcError};

/// Bit rotation applied to each ciphertext byte before the XOR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    /// No rotation.
    #[default]
    None,
    /// Rotate left by the given number of bits.
    Left(u32),
    /// Rotate right by the given number of bits.
    Right(u32),
}

impl Rotation {
    /// Apply the rotation to `byte`.
    #[inline]
    pub fn rotate(self, byte: u8) -> u8 {
        match self {
            Self::None => byte,
            Self::Left(n) => byte.rotate_left(n),
            Self::Right(n) => byte.rotate_right(n),
        }
    }

    /// The rotation that undoes this one.
    pub fn inverse(self) -> Self {
        match self {
            Self::None => Self::None,
            Self::Left(n) => Self::Right(n),
            Self::Right(n) => Self::Left(n),
        }
    }
}

/// A fixed key cycled over the buffer.
///
/// [`Keystream::apply`] decrypts: each byte is rotated, then XORed with the
/// next key byte. Without rotation this is its own inverse; use
/// [`RepeatingKey::encrypt`] otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatingKey {
    key: Vec<u8>,
    position: usize,
    rotation: Rotation,
}

impl RepeatingKey {
    /// Create a keystream over `key`. An empty key is rejected.
    pub fn new(key: &[u8]) -> Result<Self> {
        if key.is_empty() {
            return Err(VnArcError::invalid_parameter("empty XOR key"));
        }
        Ok(Self {
            key: key.to_vec(),
            position: 0,
            rotation: Rotation::None,
        })
    }

    /// Rotate every byte before the XOR (builder style).
    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Inverse of [`Keystream::apply`]: XOR, then undo the rotation.
    pub fn encrypt(&mut self, buffer: &mut [u8]) {
        let inverse = self.rotation.inverse();
        for byte in buffer.iter_mut() {
            *byte = inverse.rotate(*byte ^ self.next_byte());
        }
    }
}

impl Keystream for RepeatingKey {
    #[inline]
    fn next_byte(&mut self) -> u8 {
        let byte = self.key[self.position];
        self.position += 1;
        if self.position == self.key.len() {
            self.position = 0;
        }
        byte
    }

    fn apply(&mut self, buffer: &mut [u8]) {
        for byte in buffer.iter_mut() {
            *byte = self.rotation.rotate(*byte) ^ self.next_byte();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_cycles() {
        let mut buf = [0u8; 5];
        RepeatingKey::new(&[1, 2]).unwrap().apply(&mut buf);
        assert_eq!(buf, [1, 2, 1, 2, 1]);
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(matches!(
            RepeatingKey::new(&[]),
            Err(VnArcError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_rotation_before_xor() {
        let mut buf = [0b1000_0001];
        RepeatingKey::new(&[0x0F])
            .unwrap()
            .with_rotation(Rotation::Left(1))
            .apply(&mut buf);
        assert_eq!(buf, [0b0000_0011 ^ 0x0F]);

        let mut buf = [0b1000_0001];
        RepeatingKey::new(&[0x00])
            .unwrap()
            .with_rotation(Rotation::Right(2))
            .apply(&mut buf);
        assert_eq!(buf, [0b0110_0000]);
    }

    #[test]
    fn test_encrypt_inverts_apply() {
        for rotation in [Rotation::None, Rotation::Left(3), Rotation::Right(5)] {
            let key = RepeatingKey::new(b"xyz").unwrap().with_rotation(rotation);
            let mut buf = b"rotated payload".to_vec();
            key.clone().encrypt(&mut buf);
            key.clone().apply(&mut buf);
            assert_eq!(&buf, b"rotated payload", "{rotation:?}");
        }
    }
}
