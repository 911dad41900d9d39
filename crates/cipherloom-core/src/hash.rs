//! Hash contract: descriptor, state, and owning instance.
//!
//! Hash instances are single-pass: absorb with `update` any number of
//! times, then squeeze with `output` (repeatedly, for extendable-output
//! functions). The wrapper tracks the absorb→squeeze phase change, so an
//! `update` after any `output` is a typed [`Error::Finalized`] instead of
//! undefined behavior, and cumulative output is bounded by `max_tag`.

use core::fmt;
use std::sync::Arc;

use crate::caps::{Caps, UNBOUNDED};
use crate::error::Error;
use crate::params::Params;

/// Immutable descriptor for one hash algorithm.
///
/// For fixed-output hashes `max_tag` is the digest length and
/// `block_size` the compression block size (the quantity HMAC pads keys
/// to). Extendable-output functions advertise `max_tag ==`
/// [`UNBOUNDED`].
pub trait HashAlgo: Send + Sync {
    /// Algorithm name, e.g. `"sha-256"`.
    fn name(&self) -> &str;

    /// Capability limits for this algorithm.
    fn caps(&self) -> Caps;

    /// Returns fresh absorbing state.
    fn create(&self, params: &Params<'_>) -> Result<Box<dyn HashState>, Error>;
}

/// Mutable per-instance state produced by [`HashAlgo::create`].
///
/// The wrapper guarantees call ordering: every `update` precedes the
/// first `output`, and total output stays within `max_tag`.
pub trait HashState: Send {
    /// Absorbs input.
    fn update(&mut self, data: &[u8]) -> Result<(), Error>;

    /// Squeezes output, finalizing internally on the first call.
    fn output(&mut self, out: &mut [u8]) -> Result<(), Error>;

    /// Resets to fresh absorbing state with new parameters.
    fn rekey(&mut self, params: &Params<'_>) -> Result<(), Error>;
}

/// An owned hash instance.
pub struct Hash {
    algo: Arc<dyn HashAlgo>,
    caps: Caps,
    state: Box<dyn HashState>,
    emitted: usize,
    finalized: bool,
}

impl Hash {
    /// Creates an instance, validating parameters against the descriptor's
    /// capabilities first.
    pub fn create(algo: Arc<dyn HashAlgo>, params: &Params<'_>) -> Result<Self, Error> {
        let caps = algo.caps();
        caps.validate(params)?;
        let state = algo.create(params)?;
        Ok(Self { algo, caps, state, emitted: 0, finalized: false })
    }

    /// Re-parameterizes this instance, consuming the old handle.
    ///
    /// The returned handle starts a fresh absorb phase.
    pub fn recreate(mut self, params: &Params<'_>) -> Result<Self, Error> {
        self.caps.validate(params)?;
        match self.state.rekey(params) {
            Ok(()) => {}
            Err(Error::Unsupported(_)) => self.state = self.algo.create(params)?,
            Err(err) => return Err(err),
        }
        self.emitted = 0;
        self.finalized = false;
        Ok(self)
    }

    /// The descriptor this instance was created from.
    pub fn algo(&self) -> Arc<dyn HashAlgo> {
        Arc::clone(&self.algo)
    }

    /// Capability snapshot taken at creation.
    pub fn caps(&self) -> Caps {
        self.caps
    }

    /// Absorbs input. Refused once any output has been squeezed.
    pub fn update(&mut self, data: &[u8]) -> Result<(), Error> {
        if self.finalized {
            return Err(Error::Finalized { operation: "update" });
        }
        self.state.update(data)
    }

    /// Squeezes output bytes.
    ///
    /// Callable repeatedly for extendable-output hashes; cumulative output
    /// is bounded by `max_tag` for fixed-output ones.
    pub fn output(&mut self, out: &mut [u8]) -> Result<(), Error> {
        let total = self.emitted.saturating_add(out.len());
        if self.caps.max_tag != UNBOUNDED && total > self.caps.max_tag {
            return Err(Error::TagTooLong { len: total, max: self.caps.max_tag });
        }
        self.state.output(out)?;
        self.finalized = true;
        self.emitted = total;
        Ok(())
    }
}

// Redacted: keyed hashes carry key material in their state.
impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self.algo.name())
    }
}
