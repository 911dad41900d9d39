//! Hash function adapters.
//!
//! Fixed-output digests (SHA-1, SHA-256, SHA-512) and an
//! extendable-output function (SHAKE-256) behind the [`HashAlgo`]
//! contract. `block_size` advertises the compression block size — the
//! quantity HMAC pads keys to — and `max_tag` the digest length
//! ([`UNBOUNDED`] for the XOF).
//!
//! The fixed adapters buffer the digest on the first `output` call so
//! that output can be squeezed incrementally; the buffer is wiped on
//! drop since digests of secret inputs (HMAC inner hashes) are
//! themselves secret.

use cipherloom_core::caps::{Caps, UNBOUNDED};
use cipherloom_core::error::Error;
use cipherloom_core::hash::{HashAlgo, HashState};
use cipherloom_core::params::Params;
use cipherloom_core::secret::SecretBytes;
use sha2::digest::{Digest, ExtendableOutput, Update, XofReader};

struct FixedState<D> {
    hasher: Option<D>,
    digest: SecretBytes,
    offset: usize,
}

impl<D: Digest + Send> HashState for FixedState<D> {
    fn update(&mut self, data: &[u8]) -> Result<(), Error> {
        match self.hasher.as_mut() {
            Some(hasher) => {
                Digest::update(hasher, data);
                Ok(())
            }
            None => Err(Error::Finalized { operation: "update" }),
        }
    }

    fn output(&mut self, out: &mut [u8]) -> Result<(), Error> {
        if let Some(hasher) = self.hasher.take() {
            self.digest = SecretBytes::copy_from(&hasher.finalize());
        }
        let end = self.offset + out.len();
        let Some(slice) = self.digest.get(self.offset..end) else {
            return Err(Error::TagTooLong { len: end, max: self.digest.len() });
        };
        out.copy_from_slice(slice);
        self.offset = end;
        Ok(())
    }

    fn rekey(&mut self, _params: &Params<'_>) -> Result<(), Error> {
        self.hasher = Some(D::new());
        self.digest = SecretBytes::zeroed(0);
        self.offset = 0;
        Ok(())
    }
}

macro_rules! fixed_hash_descriptor {
    ($(#[$doc:meta])* $name:ident, $inner:ty, $label:literal, $digest_len:literal, $block:literal) => {
        $(#[$doc])*
        pub struct $name;

        impl HashAlgo for $name {
            fn name(&self) -> &str {
                $label
            }

            fn caps(&self) -> Caps {
                Caps { max_tag: $digest_len, block_size: $block, ..Caps::NONE }
            }

            fn create(&self, _params: &Params<'_>) -> Result<Box<dyn HashState>, Error> {
                Ok(Box::new(FixedState::<$inner> {
                    hasher: Some(<$inner>::new()),
                    digest: SecretBytes::zeroed(0),
                    offset: 0,
                }))
            }
        }
    };
}

fixed_hash_descriptor!(
    /// SHA-1 descriptor (20-byte digest, 64-byte block). Legacy; present
    /// for HMAC interop and KDF vectors, not for new designs.
    Sha1,
    sha1::Sha1,
    "sha-1",
    20,
    64
);

fixed_hash_descriptor!(
    /// SHA-256 descriptor (32-byte digest, 64-byte block).
    Sha256,
    sha2::Sha256,
    "sha-256",
    32,
    64
);

fixed_hash_descriptor!(
    /// SHA-512 descriptor (64-byte digest, 128-byte block).
    Sha512,
    sha2::Sha512,
    "sha-512",
    64,
    128
);

/// SHAKE-256 extendable-output descriptor (136-byte rate, unbounded
/// output).
pub struct Shake256;

impl HashAlgo for Shake256 {
    fn name(&self) -> &str {
        "shake-256"
    }

    fn caps(&self) -> Caps {
        Caps { max_tag: UNBOUNDED, block_size: 136, ..Caps::NONE }
    }

    fn create(&self, _params: &Params<'_>) -> Result<Box<dyn HashState>, Error> {
        Ok(Box::new(ShakeState { hasher: Some(sha3::Shake256::default()), reader: None }))
    }
}

struct ShakeState {
    hasher: Option<sha3::Shake256>,
    reader: Option<<sha3::Shake256 as ExtendableOutput>::Reader>,
}

impl HashState for ShakeState {
    fn update(&mut self, data: &[u8]) -> Result<(), Error> {
        match self.hasher.as_mut() {
            Some(hasher) => {
                Update::update(hasher, data);
                Ok(())
            }
            None => Err(Error::Finalized { operation: "update" }),
        }
    }

    fn output(&mut self, out: &mut [u8]) -> Result<(), Error> {
        if self.reader.is_none() {
            let Some(hasher) = self.hasher.take() else {
                return Err(Error::Finalized { operation: "output" });
            };
            self.reader = Some(hasher.finalize_xof());
        }
        let Some(reader) = self.reader.as_mut() else {
            return Err(Error::Finalized { operation: "output" });
        };
        reader.read(out);
        Ok(())
    }

    fn rekey(&mut self, _params: &Params<'_>) -> Result<(), Error> {
        self.hasher = Some(sha3::Shake256::default());
        self.reader = None;
        Ok(())
    }
}
