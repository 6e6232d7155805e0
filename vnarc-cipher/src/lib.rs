//! # VnArc Cipher
//!
//! Keyed XOR stream ciphers used to obscure archive entries and scripts.
//!
//! - [`MsvcRand`]: the MSVC `rand()` LCG, low byte of each output
//! - [`ParkMiller`]: the minimal standard multiplicative generator
//! - [`Md5HexChain`]: lowercase hex MD5 digests of `key || counter`
//! - [`RepeatingKey`]: a cycled key with optional per-byte rotation
//! - [`Biased`] / [`decrypt_script`]: a keystream followed by a constant add
//!
//! These provide obscurity, not security. A wrong key is not detected; use
//! [`find_key`] to try candidates against a known signature.
//!
//! ## Example
//!
//! ```rust
//! use vnarc_cipher::{Keystream, ParkMiller};
//!
//! let mut data = *b"secret";
//! ParkMiller::new(42).apply(&mut data);
//! assert_ne!(&data, b"secret");
//!
//! ParkMiller::new(42).apply(&mut data);
//! assert_eq!(&data, b"secret");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![forbid(unsafe_code)]

pub mod hash;
pub mod keystream;
pub mod lcg;
pub mod xor;

// Re-exports
pub use hash::Md5HexChain;
pub use keystream::{Biased, Keystream, find_key};
pub use lcg::{MsvcRand, ParkMiller, SCRIPT_BIAS, decrypt_script};
pub use xor::{RepeatingKey, Rotation};
