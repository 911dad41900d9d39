//! Capability metadata for primitive descriptors.
//!
//! Every descriptor publishes one [`Caps`] record. Instance wrappers
//! validate creation parameters and per-call buffer lengths against it
//! *before* dispatching into the algorithm, so out-of-contract inputs never
//! reach a key schedule or transform.

use crate::error::Error;
use crate::params::Params;

/// Marks an unbounded capability (XOF output length, EAX nonce length).
pub const UNBOUNDED: usize = usize::MAX;

/// Capability limits published by a descriptor.
///
/// All limits are in bytes except the round counts. A limit of zero means
/// the corresponding parameter is not accepted at all (e.g. `max_iv = 0`
/// for ECB); [`UNBOUNDED`] means no limit is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caps {
    /// Maximum key length accepted by `create`/`recreate`
    pub max_key: usize,
    /// Maximum IV/nonce length accepted by `create`/`recreate`
    pub max_iv: usize,
    /// Maximum total tag/output bytes an instance can produce
    pub max_tag: usize,
    /// Block size of the permutation (0 for primitives without one)
    pub block_size: usize,
    /// Required byte-length granularity for bulk stream operations
    pub multof: usize,
    /// Maximum round count (0 when rounds are not tunable)
    pub max_rounds: usize,
    /// Round count used when `rounds == 0` is requested
    pub default_rounds: usize,
}

impl Caps {
    /// All-zero capabilities, for struct-update construction.
    pub const NONE: Self = Self {
        max_key: 0,
        max_iv: 0,
        max_tag: 0,
        block_size: 0,
        multof: 0,
        max_rounds: 0,
        default_rounds: 0,
    };

    /// Validates creation parameters against these limits.
    ///
    /// Checked before any dispatch into the algorithm; on error nothing has
    /// been keyed or absorbed.
    pub fn validate(&self, params: &Params<'_>) -> Result<(), Error> {
        if params.key.len() > self.max_key {
            return Err(Error::KeyTooLong { len: params.key.len(), max: self.max_key });
        }
        if params.iv.len() > self.max_iv {
            return Err(Error::IvTooLong { len: params.iv.len(), max: self.max_iv });
        }
        if params.tag_len > self.max_tag {
            return Err(Error::TagTooLong { len: params.tag_len, max: self.max_tag });
        }
        if params.rounds > self.max_rounds {
            return Err(Error::BadRounds { rounds: params.rounds, max: self.max_rounds });
        }
        Ok(())
    }

    /// Checks a bulk-operation length against the granularity requirement.
    pub fn check_granularity(&self, len: usize) -> Result<(), Error> {
        if self.multof > 1 && !len.is_multiple_of(self.multof) {
            return Err(Error::NotMultiple { len, multof: self.multof });
        }
        Ok(())
    }

    /// Resolves a requested round count, substituting the default for zero.
    pub fn effective_rounds(&self, requested: usize) -> usize {
        if requested == 0 { self.default_rounds } else { requested }
    }
}
