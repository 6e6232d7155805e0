//! The keystream abstraction and helpers shared by every generator.
//!
//! None of these ciphers are authenticated: a wrong key produces plausible
//! garbage rather than an error. Callers check a known signature after
//! decrypting, which [`find_key`] automates.

use log::{debug, trace};

/// A byte-at-a-time keystream generator.
pub trait Keystream {
    /// Produce the next keystream byte.
    fn next_byte(&mut self) -> u8;

    /// Transform `buffer` in place.
    ///
    /// The default XORs every byte with the keystream, which both encrypts
    /// and decrypts.
    fn apply(&mut self, buffer: &mut [u8]) {
        for byte in buffer.iter_mut() {
            *byte ^= self.next_byte();
        }
    }
}

impl<K: Keystream + ?Sized> Keystream for &mut K {
    #[inline]
    fn next_byte(&mut self) -> u8 {
        (**self).next_byte()
    }

    fn apply(&mut self, buffer: &mut [u8]) {
        (**self).apply(buffer)
    }
}

impl<K: Keystream + ?Sized> Keystream for Box<K> {
    #[inline]
    fn next_byte(&mut self) -> u8 {
        (**self).next_byte()
    }

    fn apply(&mut self, buffer: &mut [u8]) {
        (**self).apply(buffer)
    }
}

/// A keystream followed by a constant added to every byte.
///
/// [`Keystream::apply`] XORs with the inner keystream and then adds `bias`
/// (wrapping), unconditionally. `next_byte` exposes the raw inner keystream.
#[derive(Debug, Clone)]
pub struct Biased<K> {
    inner: K,
    bias: u8,
}

impl<K: Keystream> Biased<K> {
    /// Wrap `inner` with a byte bias.
    pub fn new(inner: K, bias: u8) -> Self {
        Self { inner, bias }
    }

    /// The wrapped keystream.
    pub fn into_inner(self) -> K {
        self.inner
    }
}

impl<K: Keystream> Keystream for Biased<K> {
    #[inline]
    fn next_byte(&mut self) -> u8 {
        self.inner.next_byte()
    }

    fn apply(&mut self, buffer: &mut [u8]) {
        for byte in buffer.iter_mut() {
            *byte = (*byte ^ self.inner.next_byte()).wrapping_add(self.bias);
        }
    }
}

/// Try each key candidate until the decrypted data starts with `magic`.
///
/// `make` builds a fresh keystream for a candidate. Returns the index of the
/// first matching candidate and the full plaintext, or `None` when no
/// candidate matches (including when `data` is shorter than `magic`).
///
/// # Example
///
/// ```
/// use vnarc_cipher::{Keystream, MsvcRand, find_key};
///
/// let mut data = *b"PACK....";
/// MsvcRand::new(7).apply(&mut data);
///
/// let found = find_key(&data, &[1u32, 7, 9], b"PACK", |&seed| MsvcRand::new(seed));
/// assert_eq!(found.map(|(i, _)| i), Some(1));
/// ```
pub fn find_key<C, K, F>(
    data: &[u8],
    candidates: &[C],
    magic: &[u8],
    mut make: F,
) -> Option<(usize, Vec<u8>)>
where
    K: Keystream,
    F: FnMut(&C) -> K,
{
    if data.len() < magic.len() {
        return None;
    }

    for (index, candidate) in candidates.iter().enumerate() {
        let mut prefix = data[..magic.len()].to_vec();
        make(candidate).apply(&mut prefix);
        if prefix != magic {
            trace!("key candidate {index} rejected");
            continue;
        }

        let mut plain = data.to_vec();
        make(candidate).apply(&mut plain);
        debug!("key candidate {index} of {} matches", candidates.len());
        return Some((index, plain));
    }
    debug!("none of {} key candidates matched", candidates.len());
    None
}
