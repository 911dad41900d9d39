//! ChaCha20 stream cipher adapter.

use chacha20::cipher::{KeyIvInit, StreamCipher};
use cipherloom_core::caps::Caps;
use cipherloom_core::error::Error;
use cipherloom_core::params::Params;
use cipherloom_core::stream::{StreamAlgo, StreamState};
use zeroize::Zeroize;

const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;

/// ChaCha20 (IETF variant, 96-bit nonce) stream descriptor.
///
/// Nonces shorter than 12 bytes are zero-padded on the right, matching
/// the IV convention of the mode-of-operation wrappers.
pub struct ChaCha20;

impl StreamAlgo for ChaCha20 {
    fn name(&self) -> &str {
        "chacha20"
    }

    fn caps(&self) -> Caps {
        Caps {
            max_key: KEY_LEN,
            max_iv: NONCE_LEN,
            block_size: 64,
            multof: 1,
            ..Caps::NONE
        }
    }

    fn create(&self, params: &Params<'_>) -> Result<Box<dyn StreamState>, Error> {
        Ok(Box::new(ChaChaState { cipher: schedule(params)? }))
    }
}

fn schedule(params: &Params<'_>) -> Result<chacha20::ChaCha20, Error> {
    if params.key.len() != KEY_LEN {
        return Err(Error::BadKeyLength { len: params.key.len(), algorithm: "chacha20" });
    }
    let mut nonce = [0u8; NONCE_LEN];
    nonce[..params.iv.len()].copy_from_slice(params.iv);
    let cipher = chacha20::ChaCha20::new_from_slices(params.key, &nonce)
        .map_err(|_| Error::BadKeyLength { len: params.key.len(), algorithm: "chacha20" });
    nonce.zeroize();
    cipher
}

struct ChaChaState {
    cipher: chacha20::ChaCha20,
}

impl ChaChaState {
    fn apply(&mut self, data: &mut [u8]) -> Result<(), Error> {
        self.cipher
            .try_apply_keystream(data)
            .map_err(|_| Error::InvalidParameter("chacha20 keystream exhausted"))
    }
}

impl StreamState for ChaChaState {
    fn encrypt(&mut self, data: &mut [u8]) -> Result<(), Error> {
        self.apply(data)
    }

    fn decrypt(&mut self, data: &mut [u8]) -> Result<(), Error> {
        self.apply(data)
    }

    fn keystream(&mut self, out: &mut [u8]) -> Result<(), Error> {
        out.fill(0);
        self.apply(out)
    }

    fn rekey(&mut self, params: &Params<'_>) -> Result<(), Error> {
        self.cipher = schedule(params)?;
        Ok(())
    }
}
