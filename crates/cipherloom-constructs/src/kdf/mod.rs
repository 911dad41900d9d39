//! Password-based key derivation.
//!
//! [`pbkdf2`] iterates a keyed MAC in counter mode; [`scrypt`] layers the
//! memory-hard ROMix transform between two single-iteration PBKDF2
//! passes. Both take the pseudorandom function as an
//! [`cipherloom_core::MacAlgo`] descriptor, so any MAC adapter (HMAC over
//! any hash, CMAC over any block cipher) can drive them.

mod pbkdf2;
mod salt;
mod scrypt;

pub use pbkdf2::pbkdf2;
pub use salt::generate_salt;
pub use scrypt::{scrypt, ScryptParams};
