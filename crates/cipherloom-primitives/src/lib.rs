//! Cipherloom leaf algorithm adapters
//!
//! Concrete algorithms behind the `cipherloom-core` contracts. The round
//! functions themselves live in external RustCrypto crates; the adapters
//! here contribute capability metadata, parameter validation, and
//! zeroize-on-drop key handling, and are otherwise interchangeable with
//! any other implementation of the contracts.
//!
//! | Descriptor | Kind | Backing crate |
//! |---|---|---|
//! | [`Aes128`], [`Aes192`], [`Aes256`] | block | `aes` |
//! | [`ChaCha20`] | stream | `chacha20` |
//! | [`Sha1`] | hash | `sha1` |
//! | [`Sha256`], [`Sha512`] | hash | `sha2` |
//! | [`Shake256`] | hash (XOF) | `sha3` |
//! | [`OsEntropy`] | entropy | `getrandom` |

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod aes;
pub mod chacha;
pub mod entropy;
pub mod hash;

pub use aes::{AES_BLOCK, Aes128, Aes192, Aes256};
pub use chacha::ChaCha20;
pub use entropy::OsEntropy;
pub use hash::{Sha1, Sha256, Sha512, Shake256};
