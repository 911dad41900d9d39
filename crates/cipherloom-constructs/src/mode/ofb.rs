//! Output feedback mode.
//!
//! The cipher's own output feeds back on itself, so the keystream is
//! independent of the data stream. Sub-block calls are supported through
//! the `used` offset (`multof = 1`).

use std::sync::Arc;

use cipherloom_core::block::{Block, BlockAlgo};
use cipherloom_core::caps::Caps;
use cipherloom_core::error::Error;
use cipherloom_core::params::Params;
use cipherloom_core::secret::SecretBytes;
use cipherloom_core::stream::{StreamAlgo, StreamState};

use super::{base_params, mode_caps, padded_iv};

/// OFB mode descriptor over a block cipher.
pub struct Ofb {
    base: Arc<dyn BlockAlgo>,
    caps: Caps,
    name: String,
}

impl Ofb {
    /// Wraps `base` in OFB mode.
    pub fn new(base: Arc<dyn BlockAlgo>) -> Self {
        let block_size = base.caps().block_size;
        let caps = mode_caps(base.as_ref(), 1, block_size);
        let name = format!("ofb({})", base.name());
        Self { base, caps, name }
    }
}

impl StreamAlgo for Ofb {
    fn name(&self) -> &str {
        &self.name
    }

    fn caps(&self) -> Caps {
        self.caps
    }

    fn create(&self, params: &Params<'_>) -> Result<Box<dyn StreamState>, Error> {
        let cipher = Block::create(Arc::clone(&self.base), &base_params(params))?;
        let block_size = self.caps.block_size;
        Ok(Box::new(OfbState {
            cipher,
            pad: padded_iv(params.iv, block_size),
            used: block_size,
        }))
    }
}

struct OfbState {
    cipher: Block,
    pad: SecretBytes,
    used: usize,
}

impl OfbState {
    fn apply(&mut self, data: &mut [u8]) -> Result<(), Error> {
        for byte in data {
            if self.used == self.pad.len() {
                self.cipher.encrypt_block(&mut self.pad)?;
                self.used = 0;
            }
            *byte ^= self.pad[self.used];
            self.used += 1;
        }
        Ok(())
    }
}

impl StreamState for OfbState {
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
        self.cipher = Block::create(self.cipher.algo(), &base_params(params))?;
        let block_size = self.cipher.block_size();
        self.pad = padded_iv(params.iv, block_size);
        self.used = block_size;
        Ok(())
    }
}
