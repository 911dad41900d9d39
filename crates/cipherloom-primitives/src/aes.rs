//! AES block cipher adapters.
//!
//! Thin adapters exposing the RustCrypto `aes` crate behind the
//! [`BlockAlgo`] contract. The round structure lives in the external
//! crate; these adapters contribute capability metadata, parameter
//! checking, and zeroize-on-drop key schedules (the `aes` crate's
//! `zeroize` feature).

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use cipherloom_core::block::{BlockAlgo, BlockState};
use cipherloom_core::caps::Caps;
use cipherloom_core::error::Error;
use cipherloom_core::params::Params;

/// AES block size in bytes.
pub const AES_BLOCK: usize = 16;

// The aes crate fixes the round count per key size; only 0 (default) or
// the exact default is accepted.
fn check_rounds(requested: usize, fixed: usize) -> Result<(), Error> {
    if requested == 0 || requested == fixed {
        Ok(())
    } else {
        Err(Error::BadRounds { rounds: requested, max: fixed })
    }
}

struct AesState<C> {
    cipher: C,
    key_len: usize,
    rounds: usize,
    label: &'static str,
}

impl<C: KeyInit> AesState<C> {
    fn schedule(
        params: &Params<'_>,
        key_len: usize,
        rounds: usize,
        label: &'static str,
    ) -> Result<C, Error> {
        check_rounds(params.rounds, rounds)?;
        if params.key.len() != key_len {
            return Err(Error::BadKeyLength { len: params.key.len(), algorithm: label });
        }
        C::new_from_slice(params.key)
            .map_err(|_| Error::BadKeyLength { len: params.key.len(), algorithm: label })
    }
}

impl<C> BlockState for AesState<C>
where
    C: BlockEncrypt + BlockDecrypt + KeyInit + Send,
{
    fn encrypt_block(&mut self, block: &mut [u8]) -> Result<(), Error> {
        if block.len() != AES_BLOCK {
            return Err(Error::WrongBlockLength { len: block.len(), block_size: AES_BLOCK });
        }
        self.cipher.encrypt_block(GenericArray::from_mut_slice(block));
        Ok(())
    }

    fn decrypt_block(&mut self, block: &mut [u8]) -> Result<(), Error> {
        if block.len() != AES_BLOCK {
            return Err(Error::WrongBlockLength { len: block.len(), block_size: AES_BLOCK });
        }
        self.cipher.decrypt_block(GenericArray::from_mut_slice(block));
        Ok(())
    }

    fn rekey(&mut self, params: &Params<'_>) -> Result<(), Error> {
        // Old schedule is dropped (and zeroized) only after the new one
        // exists, keeping failure atomic.
        self.cipher = Self::schedule(params, self.key_len, self.rounds, self.label)?;
        Ok(())
    }
}

macro_rules! aes_descriptor {
    ($(#[$doc:meta])* $name:ident, $inner:ty, $label:literal, $key_len:literal, $rounds:literal) => {
        $(#[$doc])*
        pub struct $name;

        impl BlockAlgo for $name {
            fn name(&self) -> &str {
                $label
            }

            fn caps(&self) -> Caps {
                Caps {
                    max_key: $key_len,
                    block_size: AES_BLOCK,
                    multof: AES_BLOCK,
                    max_rounds: $rounds,
                    default_rounds: $rounds,
                    ..Caps::NONE
                }
            }

            fn create(&self, params: &Params<'_>) -> Result<Box<dyn BlockState>, Error> {
                let cipher =
                    AesState::<$inner>::schedule(params, $key_len, $rounds, $label)?;
                Ok(Box::new(AesState {
                    cipher,
                    key_len: $key_len,
                    rounds: $rounds,
                    label: $label,
                }))
            }
        }
    };
}

aes_descriptor!(
    /// AES-128 block descriptor (16-byte key, 10 rounds).
    Aes128,
    aes::Aes128,
    "aes-128",
    16,
    10
);

aes_descriptor!(
    /// AES-192 block descriptor (24-byte key, 12 rounds).
    Aes192,
    aes::Aes192,
    "aes-192",
    24,
    12
);

aes_descriptor!(
    /// AES-256 block descriptor (32-byte key, 14 rounds).
    Aes256,
    aes::Aes256,
    "aes-256",
    32,
    14
);

#[cfg(test)]
mod tests {
    use super::{Aes128, Aes192, Aes256};
    use cipherloom_core::block::{Block, BlockAlgo};
    use cipherloom_core::error::Error;
    use cipherloom_core::params::Params;
    use std::sync::Arc;

    // FIPS-197 appendix C vectors: sequential key bytes, plaintext
    // 00112233445566778899aabbccddeeff.
    fn fips197_check(algo: Arc<dyn BlockAlgo>, key_len: usize, expected: &str) {
        let key: Vec<u8> = (0..key_len as u8).collect();
        let mut cipher = Block::create(algo, &Params::new(&key)).unwrap();

        let mut block = hex::decode("00112233445566778899aabbccddeeff").unwrap();
        cipher.encrypt_block(&mut block).unwrap();
        assert_eq!(hex::encode(&block), expected);

        cipher.decrypt_block(&mut block).unwrap();
        assert_eq!(hex::encode(&block), "00112233445566778899aabbccddeeff");
    }

    #[test]
    fn aes128_matches_fips197() {
        fips197_check(Arc::new(Aes128), 16, "69c4e0d86a7b0430d8cdb78070b4c55a");
    }

    #[test]
    fn aes192_matches_fips197() {
        fips197_check(Arc::new(Aes192), 24, "dda97ca4864cdfe06eaf70a0ec0d7191");
    }

    #[test]
    fn aes256_matches_fips197() {
        fips197_check(Arc::new(Aes256), 32, "8ea2b7ca516745bfeafc49904b496089");
    }

    #[test]
    fn short_key_is_refused() {
        let err = Block::create(Arc::new(Aes128), &Params::new(&[0u8; 12])).unwrap_err();
        assert_eq!(err, Error::BadKeyLength { len: 12, algorithm: "aes-128" });
    }

    #[test]
    fn nondefault_rounds_are_refused() {
        let err =
            Block::create(Arc::new(Aes128), &Params::new(&[0u8; 16]).with_rounds(9)).unwrap_err();
        assert_eq!(err, Error::BadRounds { rounds: 9, max: 10 });
    }

    #[test]
    fn default_rounds_can_be_spelled_out() {
        assert!(Block::create(Arc::new(Aes256), &Params::new(&[0u8; 32]).with_rounds(14)).is_ok());
    }
}
