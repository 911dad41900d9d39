//! Cipher feedback mode.
//!
//! Self-synchronizing: produced ciphertext feeds back into the shift
//! register, so the keystream depends on the data stream. Sub-block
//! calls are supported through the `used` offset (`multof = 1`).

use std::sync::Arc;

use cipherloom_core::block::{Block, BlockAlgo};
use cipherloom_core::caps::Caps;
use cipherloom_core::error::Error;
use cipherloom_core::params::Params;
use cipherloom_core::secret::SecretBytes;
use cipherloom_core::stream::{StreamAlgo, StreamState};

use super::{base_params, mode_caps, padded_iv};

/// CFB mode descriptor over a block cipher.
pub struct Cfb {
    base: Arc<dyn BlockAlgo>,
    caps: Caps,
    name: String,
}

impl Cfb {
    /// Wraps `base` in CFB mode.
    pub fn new(base: Arc<dyn BlockAlgo>) -> Self {
        let block_size = base.caps().block_size;
        let caps = mode_caps(base.as_ref(), 1, block_size);
        let name = format!("cfb({})", base.name());
        Self { base, caps, name }
    }
}

impl StreamAlgo for Cfb {
    fn name(&self) -> &str {
        &self.name
    }

    fn caps(&self) -> Caps {
        self.caps
    }

    fn create(&self, params: &Params<'_>) -> Result<Box<dyn StreamState>, Error> {
        let cipher = Block::create(Arc::clone(&self.base), &base_params(params))?;
        let block_size = self.caps.block_size;
        Ok(Box::new(CfbState {
            cipher,
            register: padded_iv(params.iv, block_size),
            pad: SecretBytes::zeroed(block_size),
            // Forces E(register) before the first byte.
            used: block_size,
        }))
    }
}

struct CfbState {
    cipher: Block,
    register: SecretBytes,
    pad: SecretBytes,
    used: usize,
}

impl CfbState {
    fn refill(&mut self) -> Result<(), Error> {
        self.pad.copy_from_slice(&self.register);
        self.cipher.encrypt_block(&mut self.pad)?;
        self.used = 0;
        Ok(())
    }
}

impl StreamState for CfbState {
    fn encrypt(&mut self, data: &mut [u8]) -> Result<(), Error> {
        for byte in data {
            if self.used == self.pad.len() {
                self.refill()?;
            }
            *byte ^= self.pad[self.used];
            self.register[self.used] = *byte;
            self.used += 1;
        }
        Ok(())
    }

    fn decrypt(&mut self, data: &mut [u8]) -> Result<(), Error> {
        for byte in data {
            if self.used == self.pad.len() {
                self.refill()?;
            }
            let ciphertext = *byte;
            *byte ^= self.pad[self.used];
            self.register[self.used] = ciphertext;
            self.used += 1;
        }
        Ok(())
    }

    fn keystream(&mut self, out: &mut [u8]) -> Result<(), Error> {
        out.fill(0);
        self.encrypt(out)
    }

    fn rekey(&mut self, params: &Params<'_>) -> Result<(), Error> {
        self.cipher = Block::create(self.cipher.algo(), &base_params(params))?;
        let block_size = self.cipher.block_size();
        self.register = padded_iv(params.iv, block_size);
        self.pad = SecretBytes::zeroed(block_size);
        self.used = block_size;
        Ok(())
    }
}
