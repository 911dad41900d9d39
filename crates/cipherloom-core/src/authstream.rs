//! Authenticated-stream (AEAD) contract: descriptor, state, instance.
//!
//! An authenticated stream encrypts or decrypts data while computing an
//! authentication tag over both the ciphertext and separately-supplied
//! associated data. The two inputs are authenticated under distinct
//! domains, so associated-data bytes can never stand in for ciphertext
//! bytes when the tag is recomputed.
//!
//! # Tag verification is the caller's job
//!
//! Instances only *compute* tags. On decryption, the caller MUST compare
//! the recomputed tag against the transmitted one with
//! [`crate::verify_tags`] and discard the plaintext on mismatch. Nothing
//! here rejects a forged ciphertext automatically.

use core::fmt;
use std::sync::Arc;

use crate::caps::{Caps, UNBOUNDED};
use crate::error::Error;
use crate::params::Params;

/// Immutable descriptor for one authenticated-stream construction.
pub trait AeadAlgo: Send + Sync {
    /// Construction name, e.g. `"eax(ctr(aes-128),cmac(aes-128))"`.
    fn name(&self) -> &str;

    /// Capability limits for this construction.
    fn caps(&self) -> Caps;

    /// Derives sub-keys, primes the authentication domains, and returns
    /// fresh state.
    fn create(&self, params: &Params<'_>) -> Result<Box<dyn AeadState>, Error>;
}

/// Mutable per-instance state produced by [`AeadAlgo::create`].
///
/// The wrapper guarantees granularity and phase ordering; sub-instances
/// owned by this state are destroyed (with secure wipe) when it drops.
pub trait AeadState: Send {
    /// Absorbs associated data (authenticated, not encrypted).
    fn aad(&mut self, data: &[u8]) -> Result<(), Error>;

    /// Encrypts in place and authenticates the resulting ciphertext.
    fn encrypt(&mut self, data: &mut [u8]) -> Result<(), Error>;

    /// Authenticates the ciphertext, then decrypts in place.
    fn decrypt(&mut self, data: &mut [u8]) -> Result<(), Error>;

    /// Produces tag bytes, finalizing internally on the first call.
    fn tag(&mut self, out: &mut [u8]) -> Result<(), Error>;

    /// Re-derives all key-dependent state from new parameters.
    fn rekey(&mut self, params: &Params<'_>) -> Result<(), Error>;
}

/// An owned authenticated-stream instance.
pub struct AuthStream {
    algo: Arc<dyn AeadAlgo>,
    caps: Caps,
    state: Box<dyn AeadState>,
    emitted: usize,
    finalized: bool,
}

impl AuthStream {
    /// Creates an instance, validating parameters against the descriptor's
    /// capabilities first.
    pub fn create(algo: Arc<dyn AeadAlgo>, params: &Params<'_>) -> Result<Self, Error> {
        let caps = algo.caps();
        caps.validate(params)?;
        let state = algo.create(params)?;
        Ok(Self { algo, caps, state, emitted: 0, finalized: false })
    }

    /// Re-parameterizes this instance, consuming the old handle.
    ///
    /// All sub-instances are destroyed and re-derived; on failure no live
    /// handle remains.
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
    pub fn algo(&self) -> Arc<dyn AeadAlgo> {
        Arc::clone(&self.algo)
    }

    /// Capability snapshot taken at creation.
    pub fn caps(&self) -> Caps {
        self.caps
    }

    /// Absorbs associated data.
    ///
    /// May be supplied before, after, or interleaved with data calls —
    /// associated data is authenticated under its own domain.
    pub fn aad(&mut self, data: &[u8]) -> Result<(), Error> {
        if self.finalized {
            return Err(Error::Finalized { operation: "aad" });
        }
        self.state.aad(data)
    }

    /// Encrypts in place, feeding the ciphertext to the authenticator.
    pub fn encrypt(&mut self, data: &mut [u8]) -> Result<(), Error> {
        if self.finalized {
            return Err(Error::Finalized { operation: "encrypt" });
        }
        self.caps.check_granularity(data.len())?;
        self.state.encrypt(data)
    }

    /// Feeds the ciphertext to the authenticator, then decrypts in place.
    pub fn decrypt(&mut self, data: &mut [u8]) -> Result<(), Error> {
        if self.finalized {
            return Err(Error::Finalized { operation: "decrypt" });
        }
        self.caps.check_granularity(data.len())?;
        self.state.decrypt(data)
    }

    /// Produces tag bytes, incrementally up to `max_tag` in total.
    pub fn tag(&mut self, out: &mut [u8]) -> Result<(), Error> {
        let total = self.emitted.saturating_add(out.len());
        if self.caps.max_tag != UNBOUNDED && total > self.caps.max_tag {
            return Err(Error::TagTooLong { len: total, max: self.caps.max_tag });
        }
        self.state.tag(out)?;
        self.finalized = true;
        self.emitted = total;
        Ok(())
    }
}

// Redacted: the state box holds both sub-primitive keys.
impl fmt::Debug for AuthStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthStream({})", self.algo.name())
    }
}
