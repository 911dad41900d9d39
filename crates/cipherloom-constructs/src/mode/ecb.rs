//! Electronic codebook mode.
//!
//! No residual state; every call must supply a whole number of blocks
//! (`multof = block_size`, enforced by the `Stream` wrapper before
//! dispatch). ECB leaks equal-block structure and exists for protocol
//! compatibility and as a building block, not as a recommendation.

use std::sync::Arc;

use cipherloom_core::block::{Block, BlockAlgo};
use cipherloom_core::caps::Caps;
use cipherloom_core::error::Error;
use cipherloom_core::params::Params;
use cipherloom_core::stream::{StreamAlgo, StreamState};

use super::{base_params, mode_caps};

/// ECB mode descriptor over a block cipher.
pub struct Ecb {
    base: Arc<dyn BlockAlgo>,
    caps: Caps,
    name: String,
}

impl Ecb {
    /// Wraps `base` in ECB mode.
    pub fn new(base: Arc<dyn BlockAlgo>) -> Self {
        let caps = mode_caps(base.as_ref(), base.caps().block_size, 0);
        let name = format!("ecb({})", base.name());
        Self { base, caps, name }
    }
}

impl StreamAlgo for Ecb {
    fn name(&self) -> &str {
        &self.name
    }

    fn caps(&self) -> Caps {
        self.caps
    }

    fn create(&self, params: &Params<'_>) -> Result<Box<dyn StreamState>, Error> {
        let cipher = Block::create(Arc::clone(&self.base), &base_params(params))?;
        Ok(Box::new(EcbState { cipher }))
    }
}

struct EcbState {
    cipher: Block,
}

impl StreamState for EcbState {
    fn encrypt(&mut self, data: &mut [u8]) -> Result<(), Error> {
        for block in data.chunks_mut(self.cipher.block_size()) {
            self.cipher.encrypt_block(block)?;
        }
        Ok(())
    }

    fn decrypt(&mut self, data: &mut [u8]) -> Result<(), Error> {
        for block in data.chunks_mut(self.cipher.block_size()) {
            self.cipher.decrypt_block(block)?;
        }
        Ok(())
    }

    fn keystream(&mut self, out: &mut [u8]) -> Result<(), Error> {
        out.fill(0);
        self.encrypt(out)
    }

    fn rekey(&mut self, params: &Params<'_>) -> Result<(), Error> {
        self.cipher = Block::create(self.cipher.algo(), &base_params(params))?;
        Ok(())
    }
}
