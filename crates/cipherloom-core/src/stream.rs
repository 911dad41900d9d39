//! Stream cipher contract: descriptor, state, and owning instance.
//!
//! A stream primitive transforms arbitrary-length buffers and carries
//! position/counter state across calls. Its `multof` capability declares
//! the byte-length granularity bulk calls must respect (1 for true stream
//! ciphers, the block size for ECB/CBC-style wrappers); the wrapper
//! enforces it before dispatch, so a refused call consumes zero bytes.

use core::fmt;
use std::sync::Arc;

use crate::caps::Caps;
use crate::error::Error;
use crate::params::Params;

/// Immutable descriptor for one stream cipher algorithm.
pub trait StreamAlgo: Send + Sync {
    /// Algorithm name, e.g. `"chacha20"` or `"ctr(aes-128)"`.
    fn name(&self) -> &str;

    /// Capability limits for this algorithm.
    fn caps(&self) -> Caps;

    /// Runs the key schedule and returns fresh state.
    ///
    /// Parameters have already been validated against [`StreamAlgo::caps`]
    /// by the [`Stream`] wrapper.
    fn create(&self, params: &Params<'_>) -> Result<Box<dyn StreamState>, Error>;
}

/// Mutable per-instance state produced by [`StreamAlgo::create`].
///
/// Buffer lengths have already been checked against `multof` when these
/// methods are called.
pub trait StreamState: Send {
    /// Encrypts the buffer in place, advancing position state.
    fn encrypt(&mut self, data: &mut [u8]) -> Result<(), Error>;

    /// Decrypts the buffer in place, advancing position state.
    fn decrypt(&mut self, data: &mut [u8]) -> Result<(), Error>;

    /// Fills the buffer with raw keystream (PRNG output).
    fn keystream(&mut self, out: &mut [u8]) -> Result<(), Error>;

    /// Re-runs the key schedule in place with new parameters.
    ///
    /// Returning [`Error::Unsupported`] tells the wrapper to destroy this
    /// state and create a fresh one instead.
    fn rekey(&mut self, params: &Params<'_>) -> Result<(), Error>;
}

/// An owned stream cipher instance.
pub struct Stream {
    algo: Arc<dyn StreamAlgo>,
    caps: Caps,
    state: Box<dyn StreamState>,
}

impl Stream {
    /// Creates an instance, validating parameters against the descriptor's
    /// capabilities first.
    pub fn create(algo: Arc<dyn StreamAlgo>, params: &Params<'_>) -> Result<Self, Error> {
        let caps = algo.caps();
        caps.validate(params)?;
        let state = algo.create(params)?;
        Ok(Self { algo, caps, state })
    }

    /// Re-parameterizes this instance, consuming the old handle.
    ///
    /// May-move semantics: the returned handle is the only valid one. On
    /// failure the instance is destroyed (with secure wipe) and no live
    /// handle remains.
    pub fn recreate(mut self, params: &Params<'_>) -> Result<Self, Error> {
        self.caps.validate(params)?;
        match self.state.rekey(params) {
            Ok(()) => Ok(self),
            Err(Error::Unsupported(_)) => {
                self.state = self.algo.create(params)?;
                Ok(self)
            }
            Err(err) => Err(err),
        }
    }

    /// The descriptor this instance was created from.
    pub fn algo(&self) -> Arc<dyn StreamAlgo> {
        Arc::clone(&self.algo)
    }

    /// Capability snapshot taken at creation.
    pub fn caps(&self) -> Caps {
        self.caps
    }

    /// Encrypts the buffer in place.
    pub fn encrypt(&mut self, data: &mut [u8]) -> Result<(), Error> {
        self.caps.check_granularity(data.len())?;
        self.state.encrypt(data)
    }

    /// Decrypts the buffer in place.
    pub fn decrypt(&mut self, data: &mut [u8]) -> Result<(), Error> {
        self.caps.check_granularity(data.len())?;
        self.state.decrypt(data)
    }

    /// Fills the buffer with raw keystream.
    pub fn keystream(&mut self, out: &mut [u8]) -> Result<(), Error> {
        self.caps.check_granularity(out.len())?;
        self.state.keystream(out)
    }
}

// Redacted: the state box holds key schedule and position material.
impl fmt::Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stream({})", self.algo.name())
    }
}
