//! Counter mode.
//!
//! The whole counter block is treated as one big-endian integer: on
//! keystream exhaustion the block is encrypted, then incremented with
//! the carry propagating leftward. Sub-block calls are supported through
//! the `used` offset (`multof = 1`).

use std::sync::Arc;

use cipherloom_core::block::{Block, BlockAlgo};
use cipherloom_core::caps::Caps;
use cipherloom_core::error::Error;
use cipherloom_core::params::Params;
use cipherloom_core::secret::SecretBytes;
use cipherloom_core::stream::{StreamAlgo, StreamState};

use super::{base_params, mode_caps, padded_iv};

/// CTR mode descriptor over a block cipher.
pub struct Ctr {
    base: Arc<dyn BlockAlgo>,
    caps: Caps,
    name: String,
}

impl Ctr {
    /// Wraps `base` in CTR mode.
    pub fn new(base: Arc<dyn BlockAlgo>) -> Self {
        let block_size = base.caps().block_size;
        let caps = mode_caps(base.as_ref(), 1, block_size);
        let name = format!("ctr({})", base.name());
        Self { base, caps, name }
    }
}

impl StreamAlgo for Ctr {
    fn name(&self) -> &str {
        &self.name
    }

    fn caps(&self) -> Caps {
        self.caps
    }

    fn create(&self, params: &Params<'_>) -> Result<Box<dyn StreamState>, Error> {
        let cipher = Block::create(Arc::clone(&self.base), &base_params(params))?;
        let block_size = self.caps.block_size;
        Ok(Box::new(CtrState {
            cipher,
            counter: padded_iv(params.iv, block_size),
            pad: SecretBytes::zeroed(block_size),
            used: block_size,
        }))
    }
}

struct CtrState {
    cipher: Block,
    counter: SecretBytes,
    pad: SecretBytes,
    used: usize,
}

impl CtrState {
    fn refill(&mut self) -> Result<(), Error> {
        self.pad.copy_from_slice(&self.counter);
        self.cipher.encrypt_block(&mut self.pad)?;
        // Big-endian increment, carry toward the leftmost byte.
        for byte in self.counter.iter_mut().rev() {
            *byte = byte.wrapping_add(1);
            if *byte != 0 {
                break;
            }
        }
        self.used = 0;
        Ok(())
    }

    fn apply(&mut self, data: &mut [u8]) -> Result<(), Error> {
        for byte in data {
            if self.used == self.pad.len() {
                self.refill()?;
            }
            *byte ^= self.pad[self.used];
            self.used += 1;
        }
        Ok(())
    }
}

impl StreamState for CtrState {
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
        self.counter = padded_iv(params.iv, block_size);
        self.pad = SecretBytes::zeroed(block_size);
        self.used = block_size;
        Ok(())
    }
}
