//! MAC contract: descriptor, state, and owning instance.
//!
//! A MAC absorbs key-dependent authenticated data with `update`, then
//! produces the authentication value with `tag`. `tag` may be called once
//! or incrementally, up to `max_tag` total bytes; the first `tag` call
//! finalizes the instance and further `update` calls are refused.

use core::fmt;
use std::sync::Arc;

use crate::caps::{Caps, UNBOUNDED};
use crate::error::Error;
use crate::params::Params;

/// Immutable descriptor for one MAC algorithm.
pub trait MacAlgo: Send + Sync {
    /// Algorithm name, e.g. `"hmac(sha-256)"`.
    fn name(&self) -> &str;

    /// Capability limits for this algorithm.
    fn caps(&self) -> Caps;

    /// Runs the key schedule and returns fresh absorbing state.
    fn create(&self, params: &Params<'_>) -> Result<Box<dyn MacState>, Error>;
}

/// Mutable per-instance state produced by [`MacAlgo::create`].
///
/// The wrapper guarantees call ordering: every `update` precedes the
/// first `tag`, and total tag output stays within `max_tag`.
pub trait MacState: Send {
    /// Absorbs authenticated data.
    fn update(&mut self, data: &[u8]) -> Result<(), Error>;

    /// Produces tag bytes, finalizing internally on the first call.
    fn tag(&mut self, out: &mut [u8]) -> Result<(), Error>;

    /// Re-derives all key-dependent state from new parameters.
    ///
    /// Implementations MUST NOT reuse key-derived buffers across a key
    /// change; everything is recomputed from scratch.
    fn rekey(&mut self, params: &Params<'_>) -> Result<(), Error>;
}

/// An owned MAC instance.
pub struct Mac {
    algo: Arc<dyn MacAlgo>,
    caps: Caps,
    state: Box<dyn MacState>,
    emitted: usize,
    finalized: bool,
}

impl Mac {
    /// Creates an instance, validating parameters against the descriptor's
    /// capabilities first.
    pub fn create(algo: Arc<dyn MacAlgo>, params: &Params<'_>) -> Result<Self, Error> {
        let caps = algo.caps();
        caps.validate(params)?;
        let state = algo.create(params)?;
        Ok(Self { algo, caps, state, emitted: 0, finalized: false })
    }

    /// Re-parameterizes this instance, consuming the old handle.
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
    pub fn algo(&self) -> Arc<dyn MacAlgo> {
        Arc::clone(&self.algo)
    }

    /// Capability snapshot taken at creation.
    pub fn caps(&self) -> Caps {
        self.caps
    }

    /// Absorbs authenticated data. Refused once any tag bytes exist.
    pub fn update(&mut self, data: &[u8]) -> Result<(), Error> {
        if self.finalized {
            return Err(Error::Finalized { operation: "update" });
        }
        self.state.update(data)
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

// Redacted: the state box holds the MAC key and derived subkeys.
impl fmt::Debug for Mac {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mac({})", self.algo.name())
    }
}

#[cfg(test)]
mod tests {
    use super::Mac;
    use crate::error::Error;
    use crate::params::Params;
    use crate::testutil::{ROTOR_BLOCK, XorMac};
    use std::sync::Arc;

    fn tag_of(key: &[u8], message: &[u8]) -> [u8; ROTOR_BLOCK] {
        let mut mac = Mac::create(Arc::new(XorMac), &Params::new(key)).unwrap();
        mac.update(message).unwrap();
        let mut out = [0u8; ROTOR_BLOCK];
        mac.tag(&mut out).unwrap();
        out
    }

    #[test]
    fn update_after_tag_is_refused() {
        let key = [5u8; ROTOR_BLOCK];
        let mut mac = Mac::create(Arc::new(XorMac), &Params::new(&key)).unwrap();
        mac.update(b"data").unwrap();
        let mut out = [0u8; 4];
        mac.tag(&mut out).unwrap();
        assert_eq!(mac.update(b"late"), Err(Error::Finalized { operation: "update" }));
    }

    #[test]
    fn incremental_tag_is_bounded_and_contiguous() {
        let key = [5u8; ROTOR_BLOCK];
        let full = tag_of(&key, b"message");

        let mut mac = Mac::create(Arc::new(XorMac), &Params::new(&key)).unwrap();
        mac.update(b"message").unwrap();
        let mut head = [0u8; 3];
        let mut tail = [0u8; 5];
        mac.tag(&mut head).unwrap();
        mac.tag(&mut tail).unwrap();
        assert_eq!(&full[..3], &head);
        assert_eq!(&full[3..], &tail);

        let mut excess = [0u8; 1];
        assert_eq!(
            mac.tag(&mut excess),
            Err(Error::TagTooLong { len: ROTOR_BLOCK + 1, max: ROTOR_BLOCK }),
        );
    }

    #[test]
    fn different_keys_produce_different_tags() {
        assert_ne!(tag_of(&[1u8; ROTOR_BLOCK], b"m"), tag_of(&[2u8; ROTOR_BLOCK], b"m"));
    }

    #[test]
    fn recreate_rederives_key_state() {
        let mut mac =
            Mac::create(Arc::new(XorMac), &Params::new(&[1u8; ROTOR_BLOCK])).unwrap();
        mac.update(b"old").unwrap();

        let mut mac = mac.recreate(&Params::new(&[2u8; ROTOR_BLOCK])).unwrap();
        mac.update(b"m").unwrap();
        let mut out = [0u8; ROTOR_BLOCK];
        mac.tag(&mut out).unwrap();
        assert_eq!(out, tag_of(&[2u8; ROTOR_BLOCK], b"m"));
    }
}
