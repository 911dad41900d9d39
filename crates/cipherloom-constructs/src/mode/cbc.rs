//! Cipher block chaining mode.
//!
//! One block of chain state. Decryption buffers the incoming ciphertext
//! block before overwriting the chain, so decrypting a buffer in place
//! is correct. `multof = block_size`.

use std::sync::Arc;

use cipherloom_core::block::{Block, BlockAlgo};
use cipherloom_core::caps::Caps;
use cipherloom_core::error::Error;
use cipherloom_core::params::Params;
use cipherloom_core::secret::SecretBytes;
use cipherloom_core::stream::{StreamAlgo, StreamState};

use super::{base_params, mode_caps, padded_iv};

/// CBC mode descriptor over a block cipher.
pub struct Cbc {
    base: Arc<dyn BlockAlgo>,
    caps: Caps,
    name: String,
}

impl Cbc {
    /// Wraps `base` in CBC mode.
    pub fn new(base: Arc<dyn BlockAlgo>) -> Self {
        let block_size = base.caps().block_size;
        let caps = mode_caps(base.as_ref(), block_size, block_size);
        let name = format!("cbc({})", base.name());
        Self { base, caps, name }
    }
}

impl StreamAlgo for Cbc {
    fn name(&self) -> &str {
        &self.name
    }

    fn caps(&self) -> Caps {
        self.caps
    }

    fn create(&self, params: &Params<'_>) -> Result<Box<dyn StreamState>, Error> {
        let cipher = Block::create(Arc::clone(&self.base), &base_params(params))?;
        let chain = padded_iv(params.iv, self.caps.block_size);
        let scratch = SecretBytes::zeroed(self.caps.block_size);
        Ok(Box::new(CbcState { cipher, chain, scratch }))
    }
}

struct CbcState {
    cipher: Block,
    chain: SecretBytes,
    scratch: SecretBytes,
}

impl StreamState for CbcState {
    fn encrypt(&mut self, data: &mut [u8]) -> Result<(), Error> {
        for block in data.chunks_mut(self.cipher.block_size()) {
            for (b, c) in block.iter_mut().zip(self.chain.iter()) {
                *b ^= c;
            }
            self.cipher.encrypt_block(block)?;
            self.chain.copy_from_slice(block);
        }
        Ok(())
    }

    fn decrypt(&mut self, data: &mut [u8]) -> Result<(), Error> {
        for block in data.chunks_mut(self.cipher.block_size()) {
            // Keep the ciphertext: it becomes the next chain value after
            // the block is overwritten with plaintext.
            self.scratch.copy_from_slice(block);
            self.cipher.decrypt_block(block)?;
            for (b, c) in block.iter_mut().zip(self.chain.iter()) {
                *b ^= c;
            }
            self.chain.copy_from_slice(&self.scratch);
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
        self.chain = padded_iv(params.iv, block_size);
        self.scratch = SecretBytes::zeroed(block_size);
        Ok(())
    }
}
