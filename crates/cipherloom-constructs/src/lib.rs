//! Cipherloom composed constructions
//!
//! Adapters that build higher-level primitives out of the
//! `cipherloom-core` contracts, without naming any concrete algorithm:
//! every construction here closes over the descriptors it wraps and is
//! itself a descriptor, so compositions nest (`eax(ctr(aes-128),
//! cmac(aes-128))` is three adapters deep).
//!
//! | Construction | Builds | From |
//! |---|---|---|
//! | [`mode::Ecb`], [`mode::Cbc`], [`mode::Cfb`], [`mode::Ofb`], [`mode::Ctr`] | stream | block |
//! | [`mac::Cmac`], [`mac::Xcbc`] | MAC | block |
//! | [`mac::Hmac`] | MAC | hash |
//! | [`aead::Eax`] | authenticated stream | stream + MAC |
//! | [`kdf::pbkdf2`], [`kdf::scrypt`] | derived keys | MAC |

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod aead;
pub mod kdf;
pub mod mac;
pub mod mode;

pub use aead::Eax;
pub use kdf::{generate_salt, pbkdf2, scrypt, ScryptParams};
pub use mac::{Cmac, Hmac, Xcbc};
pub use mode::{Cbc, Cfb, Ctr, Ecb, Ofb};
