//! HMAC over a hash function.
//!
//! `H((K ^ opad) || H((K ^ ipad) || m))` with `ipad = 0x36` and `opad =
//! 0x5C` repeated to the hash's block size. Keys longer than the block
//! size are pre-hashed to the digest length first. Re-keying re-derives
//! the padded key from scratch; the previous pad buffer is never reused
//! across a key change.

use std::sync::Arc;

use cipherloom_core::caps::{Caps, UNBOUNDED};
use cipherloom_core::error::Error;
use cipherloom_core::hash::{Hash, HashAlgo};
use cipherloom_core::mac::{MacAlgo, MacState};
use cipherloom_core::params::Params;
use cipherloom_core::secret::SecretBytes;

const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5C;

/// HMAC descriptor over a fixed-output hash.
pub struct Hmac {
    hash: Arc<dyn HashAlgo>,
    caps: Caps,
    name: String,
}

impl Hmac {
    /// Wraps `hash` in HMAC.
    ///
    /// The hash must have a fixed digest length; extendable-output
    /// functions are refused.
    pub fn new(hash: Arc<dyn HashAlgo>) -> Result<Self, Error> {
        let h = hash.caps();
        if h.block_size == 0 {
            return Err(Error::Unsupported("hmac over a hash without a block size"));
        }
        if h.max_tag == UNBOUNDED {
            return Err(Error::Unsupported("hmac over an extendable-output hash"));
        }
        let caps = Caps {
            max_key: UNBOUNDED,
            max_tag: h.max_tag,
            block_size: h.block_size,
            ..Caps::NONE
        };
        let name = format!("hmac({})", hash.name());
        Ok(Self { hash, caps, name })
    }
}

// Key normalized to exactly one hash block: long keys are hashed down,
// short ones zero-extended.
fn padded_key(hash: &Arc<dyn HashAlgo>, key: &[u8]) -> Result<SecretBytes, Error> {
    let caps = hash.caps();
    let mut padded = SecretBytes::zeroed(caps.block_size);
    if key.len() > caps.block_size {
        let mut digester = Hash::create(Arc::clone(hash), &Params::default())?;
        digester.update(key)?;
        digester.output(&mut padded[..caps.max_tag])?;
    } else {
        padded[..key.len()].copy_from_slice(key);
    }
    Ok(padded)
}

// Fresh inner hash primed with (key ^ ipad).
fn primed_inner(hash: &Arc<dyn HashAlgo>, key_block: &SecretBytes) -> Result<Hash, Error> {
    let mut inner = Hash::create(Arc::clone(hash), &Params::default())?;
    let mut pad = SecretBytes::copy_from(key_block);
    for byte in pad.iter_mut() {
        *byte ^= IPAD;
    }
    inner.update(&pad)?;
    Ok(inner)
}

impl MacAlgo for Hmac {
    fn name(&self) -> &str {
        &self.name
    }

    fn caps(&self) -> Caps {
        self.caps
    }

    fn create(&self, params: &Params<'_>) -> Result<Box<dyn MacState>, Error> {
        let key_block = padded_key(&self.hash, params.key)?;
        let inner = primed_inner(&self.hash, &key_block)?;
        Ok(Box::new(HmacState {
            hash: Arc::clone(&self.hash),
            inner,
            key_block,
            digest_len: self.caps.max_tag,
            tag: None,
            offset: 0,
        }))
    }
}

struct HmacState {
    hash: Arc<dyn HashAlgo>,
    inner: Hash,
    key_block: SecretBytes,
    digest_len: usize,
    tag: Option<SecretBytes>,
    offset: usize,
}

impl MacState for HmacState {
    fn update(&mut self, data: &[u8]) -> Result<(), Error> {
        self.inner.update(data)
    }

    fn tag(&mut self, out: &mut [u8]) -> Result<(), Error> {
        if self.tag.is_none() {
            let mut inner_digest = SecretBytes::zeroed(self.digest_len);
            self.inner.output(&mut inner_digest)?;

            let mut outer = Hash::create(Arc::clone(&self.hash), &Params::default())?;
            let mut pad = SecretBytes::copy_from(&self.key_block);
            for byte in pad.iter_mut() {
                *byte ^= OPAD;
            }
            outer.update(&pad)?;
            outer.update(&inner_digest)?;

            let mut full = SecretBytes::zeroed(self.digest_len);
            outer.output(&mut full)?;
            self.tag = Some(full);
        }
        let Some(tag) = self.tag.as_ref() else {
            return Err(Error::Finalized { operation: "tag" });
        };
        let end = self.offset + out.len();
        let Some(slice) = tag.get(self.offset..end) else {
            return Err(Error::TagTooLong { len: end, max: tag.len() });
        };
        out.copy_from_slice(slice);
        self.offset = end;
        Ok(())
    }

    fn rekey(&mut self, params: &Params<'_>) -> Result<(), Error> {
        // Both padded keys are re-derived from the new key material; the
        // old pad buffer must not survive a key change.
        let key_block = padded_key(&self.hash, params.key)?;
        let inner = primed_inner(&self.hash, &key_block)?;
        self.key_block = key_block;
        self.inner = inner;
        self.tag = None;
        self.offset = 0;
        Ok(())
    }
}
