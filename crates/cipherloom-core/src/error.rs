//! Error types for the cipherloom toolkit.
//!
//! Strongly-typed errors for the two failure classes the contracts
//! distinguish: contract violations (capability limits exceeded, wrong
//! granularity, operations out of phase) and resource failures (entropy
//! acquisition). Contract violations are surfaced as typed errors at the
//! boundary with zero bytes consumed; they never leave a half-finished
//! cryptographic operation behind.
//!
//! Authentication failure is deliberately absent: the toolkit only computes
//! tags. Rejecting a forged ciphertext is the caller's job (see
//! [`crate::verify_tags`]).

use thiserror::Error;

/// Errors that can occur during primitive creation and operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Key exceeds the descriptor's capability limit
    #[error("key length {len} exceeds limit {max}")]
    KeyTooLong {
        /// Supplied key length in bytes
        len: usize,
        /// The descriptor's `max_key` capability
        max: usize,
    },

    /// Key length is not one the algorithm can schedule
    #[error("key length {len} is not valid for {algorithm}")]
    BadKeyLength {
        /// Supplied key length in bytes
        len: usize,
        /// Algorithm that refused the key
        algorithm: &'static str,
    },

    /// IV/nonce exceeds the descriptor's capability limit
    #[error("iv length {len} exceeds limit {max}")]
    IvTooLong {
        /// Supplied IV length in bytes
        len: usize,
        /// The descriptor's `max_iv` capability
        max: usize,
    },

    /// Requested tag output exceeds the descriptor's capability limit
    #[error("tag length {len} exceeds limit {max}")]
    TagTooLong {
        /// Requested tag length in bytes (cumulative across calls)
        len: usize,
        /// The descriptor's `max_tag` capability
        max: usize,
    },

    /// Round count outside the supported range
    #[error("{rounds} rounds outside the supported range (max {max})")]
    BadRounds {
        /// Requested round count
        rounds: usize,
        /// The descriptor's `max_rounds` capability
        max: usize,
    },

    /// Buffer length violates the stream's granularity requirement
    #[error("length {len} is not a multiple of {multof}")]
    NotMultiple {
        /// Supplied buffer length in bytes
        len: usize,
        /// The descriptor's `multof` capability
        multof: usize,
    },

    /// Block operation called with a buffer that is not exactly one block
    #[error("buffer length {len} does not match block size {block_size}")]
    WrongBlockLength {
        /// Supplied buffer length in bytes
        len: usize,
        /// The descriptor's `block_size` capability
        block_size: usize,
    },

    /// Operation attempted after the instance finalized
    ///
    /// Hash and MAC instances are single-pass: once any output/tag bytes
    /// have been produced, further absorption is refused.
    #[error("instance is finalized; no further {operation} calls accepted")]
    Finalized {
        /// The refused operation
        operation: &'static str,
    },

    /// Requested derivation output exceeds what the construction can address
    #[error("requested output of {len} bytes exceeds the derivable maximum {max}")]
    OutputTooLong {
        /// Requested output length in bytes
        len: usize,
        /// Maximum addressable output in bytes
        max: usize,
    },

    /// Operation not provided by this algorithm
    #[error("{0} is not supported by this algorithm")]
    Unsupported(&'static str),

    /// Construction parameter outside its valid range
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    /// Entropy source I/O failure
    #[error("entropy source failure: {0}")]
    Entropy(String),
}
