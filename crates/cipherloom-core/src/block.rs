//! Block cipher contract: descriptor, state, and owning instance.
//!
//! A block cipher transforms exactly one `block_size`-byte block per call
//! and keeps no position state between calls: the transform is a pure
//! function of the key schedule (and tweak, for tweakable ciphers).

use core::fmt;
use std::sync::Arc;

use crate::caps::Caps;
use crate::error::Error;
use crate::params::Params;

/// Immutable descriptor for one block cipher algorithm.
///
/// Descriptors are freely shared across threads via `Arc`; composed
/// constructions close over the `Arc` and compute their own capabilities
/// from [`BlockAlgo::caps`] at construction time.
pub trait BlockAlgo: Send + Sync {
    /// Algorithm name, e.g. `"aes-128"`.
    fn name(&self) -> &str;

    /// Capability limits for this algorithm.
    fn caps(&self) -> Caps;

    /// Runs the key schedule and returns fresh state.
    ///
    /// Parameters have already been validated against [`BlockAlgo::caps`]
    /// by the [`Block`] wrapper; implementations only check constraints the
    /// capability record cannot express (exact key lengths, fixed round
    /// counts). On failure nothing sensitive is left behind.
    fn create(&self, params: &Params<'_>) -> Result<Box<dyn BlockState>, Error>;
}

/// Mutable per-instance state produced by [`BlockAlgo::create`].
pub trait BlockState: Send {
    /// Encrypts one block in place. The buffer is exactly one block long.
    fn encrypt_block(&mut self, block: &mut [u8]) -> Result<(), Error>;

    /// Decrypts one block in place. The buffer is exactly one block long.
    fn decrypt_block(&mut self, block: &mut [u8]) -> Result<(), Error>;

    /// Re-runs the key schedule in place with new parameters.
    ///
    /// Returning [`Error::Unsupported`] tells the wrapper to destroy this
    /// state and create a fresh one instead.
    fn rekey(&mut self, params: &Params<'_>) -> Result<(), Error>;

    /// Installs a tweak for tweakable ciphers.
    fn tweak(&mut self, _tweak: &[u8]) -> Result<(), Error> {
        Err(Error::Unsupported("tweak"))
    }
}

/// An owned block cipher instance.
///
/// Holds the descriptor for capability re-checks, a capability snapshot,
/// and the algorithm state. Exclusive to its owner; create one instance
/// per thread from a shared descriptor.
pub struct Block {
    algo: Arc<dyn BlockAlgo>,
    caps: Caps,
    state: Box<dyn BlockState>,
}

impl Block {
    /// Creates an instance, validating parameters against the descriptor's
    /// capabilities first.
    pub fn create(algo: Arc<dyn BlockAlgo>, params: &Params<'_>) -> Result<Self, Error> {
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
            // Old state dropped (and wiped) before the replacement is kept.
            Err(Error::Unsupported(_)) => {
                self.state = self.algo.create(params)?;
                Ok(self)
            }
            Err(err) => Err(err),
        }
    }

    /// The descriptor this instance was created from.
    pub fn algo(&self) -> Arc<dyn BlockAlgo> {
        Arc::clone(&self.algo)
    }

    /// Capability snapshot taken at creation.
    pub fn caps(&self) -> Caps {
        self.caps
    }

    /// Block size in bytes.
    pub fn block_size(&self) -> usize {
        self.caps.block_size
    }

    /// Encrypts exactly one block in place.
    pub fn encrypt_block(&mut self, block: &mut [u8]) -> Result<(), Error> {
        self.check_block(block.len())?;
        self.state.encrypt_block(block)
    }

    /// Decrypts exactly one block in place.
    pub fn decrypt_block(&mut self, block: &mut [u8]) -> Result<(), Error> {
        self.check_block(block.len())?;
        self.state.decrypt_block(block)
    }

    /// Installs a tweak, for algorithms that support one.
    pub fn tweak(&mut self, tweak: &[u8]) -> Result<(), Error> {
        self.state.tweak(tweak)
    }

    fn check_block(&self, len: usize) -> Result<(), Error> {
        if len == self.caps.block_size {
            Ok(())
        } else {
            Err(Error::WrongBlockLength { len, block_size: self.caps.block_size })
        }
    }
}

// Redacted: the state box holds key schedule material.
impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Block({})", self.algo.name())
    }
}

#[cfg(test)]
mod tests {
    use super::{Block, BlockAlgo, BlockState};
    use crate::error::Error;
    use crate::params::Params;
    use crate::testutil::{ROTOR_BLOCK, Rotor};
    use std::sync::Arc;

    #[test]
    fn create_validates_key_against_caps() {
        let key = [0u8; ROTOR_BLOCK + 1];
        let err = Block::create(Arc::new(Rotor), &Params::new(&key)).unwrap_err();
        assert_eq!(err, Error::KeyTooLong { len: ROTOR_BLOCK + 1, max: ROTOR_BLOCK });
    }

    #[test]
    fn wrong_block_length_is_refused_before_dispatch() {
        let key = [7u8; ROTOR_BLOCK];
        let mut cipher = Block::create(Arc::new(Rotor), &Params::new(&key)).unwrap();
        let mut short = [0u8; ROTOR_BLOCK - 1];
        assert_eq!(
            cipher.encrypt_block(&mut short),
            Err(Error::WrongBlockLength { len: ROTOR_BLOCK - 1, block_size: ROTOR_BLOCK }),
        );
    }

    #[test]
    fn encrypt_then_decrypt_round_trips() {
        let key = [0x3C; ROTOR_BLOCK];
        let mut cipher = Block::create(Arc::new(Rotor), &Params::new(&key)).unwrap();
        let plaintext = *b"12345678";
        let mut block = plaintext;
        cipher.encrypt_block(&mut block).unwrap();
        assert_ne!(block, plaintext);
        cipher.decrypt_block(&mut block).unwrap();
        assert_eq!(block, plaintext);
    }

    #[test]
    fn recreate_changes_the_effective_key() {
        let algo: Arc<dyn BlockAlgo> = Arc::new(Rotor);
        let mut cipher = Block::create(Arc::clone(&algo), &Params::new(&[1u8; ROTOR_BLOCK])).unwrap();
        let mut before = *b"abcdefgh";
        cipher.encrypt_block(&mut before).unwrap();

        let mut cipher = cipher.recreate(&Params::new(&[2u8; ROTOR_BLOCK])).unwrap();
        let mut after = *b"abcdefgh";
        cipher.encrypt_block(&mut after).unwrap();
        assert_ne!(before, after);

        let mut fresh = Block::create(algo, &Params::new(&[2u8; ROTOR_BLOCK])).unwrap();
        let mut expected = *b"abcdefgh";
        fresh.encrypt_block(&mut expected).unwrap();
        assert_eq!(after, expected);
    }

    #[test]
    fn debug_output_names_the_algorithm_only() {
        let key = [5u8; ROTOR_BLOCK];
        let cipher = Block::create(Arc::new(Rotor), &Params::new(&key)).unwrap();
        assert_eq!(format!("{cipher:?}"), "Block(rotor)");
    }

    #[test]
    fn tweak_defaults_to_unsupported() {
        struct NoTweak;
        impl BlockState for NoTweak {
            fn encrypt_block(&mut self, _block: &mut [u8]) -> Result<(), Error> {
                Ok(())
            }
            fn decrypt_block(&mut self, _block: &mut [u8]) -> Result<(), Error> {
                Ok(())
            }
            fn rekey(&mut self, _params: &Params<'_>) -> Result<(), Error> {
                Ok(())
            }
        }
        let mut state: Box<dyn BlockState> = Box::new(NoTweak);
        assert_eq!(state.tweak(&[0u8; 8]), Err(Error::Unsupported("tweak")));
    }
}
