//! Cipherloom primitive contracts
//!
//! Uniform contracts for interchangeable cryptographic primitives: block
//! ciphers, stream ciphers, hashes, MACs, and authenticated streams all
//! follow the same descriptor/instance split.
//!
//! # Descriptors and instances
//!
//! A *descriptor* (the `*Algo` traits) is an immutable algorithm
//! description: a name, capability limits, and a constructor. Descriptors
//! are `Send + Sync` and shared freely via `Arc`; composed constructions
//! close over the descriptors they wrap. An *instance* (the owning
//! wrapper structs) is mutable per-use state created from a descriptor.
//! Instances are exclusively owned and never internally locked — create
//! one per thread from a shared descriptor.
//!
//! # Lifecycle
//!
//! ```text
//! Descriptor (Arc, immutable)
//!        │ create(params)      — capability-validated, fails atomically
//!        ▼
//! Instance ──operate──▶ … ──┐
//!        │ recreate(self)    │  may-move: consumes the old handle,
//!        ◀───────────────────┘  returns the only valid one
//!        │ drop
//!        ▼
//! secure wipe (structural, via zeroize-on-drop guards)
//! ```
//!
//! Capability parameters (`rounds`, key, IV, tag length) are validated
//! against the descriptor's [`Caps`] *before* dispatch; a violation is a
//! typed [`Error`] with zero bytes consumed, never a partially-completed
//! cryptographic operation.
//!
//! # Security
//!
//! - Sensitive state lives in [`SecretBytes`] guards wiped on drop
//! - Hash/MAC single-pass rules are checked, not documented conventions
//! - Tag verification is the caller's job: use [`verify_tags`] and
//!   discard plaintext on mismatch — nothing here auto-rejects forgeries
//! - Entropy is an injected collaborator ([`EntropySource`]), never a
//!   process-wide singleton

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod authstream;
pub mod block;
pub mod caps;
pub mod entropy;
pub mod error;
pub mod hash;
pub mod mac;
pub mod params;
pub mod secret;
pub mod stream;
mod verify;

#[cfg(test)]
pub(crate) mod testutil;

pub use authstream::{AeadAlgo, AeadState, AuthStream};
pub use block::{Block, BlockAlgo, BlockState};
pub use caps::{Caps, UNBOUNDED};
pub use entropy::EntropySource;
pub use error::Error;
pub use hash::{Hash, HashAlgo, HashState};
pub use mac::{Mac, MacAlgo, MacState};
pub use params::Params;
pub use secret::SecretBytes;
pub use stream::{Stream, StreamAlgo, StreamState};
pub use verify::verify_tags;
