//! MAC adapters: Block → MAC (CMAC/OMAC, XCBC) and Hash → MAC (HMAC).
//!
//! Each descriptor closes over the base descriptor it wraps and
//! implements [`cipherloom_core::MacAlgo`]. The block-based family runs
//! a CBC-MAC chain whose final block is XORed with a subkey selected by
//! whether the message filled it exactly (subkey for complete blocks) or
//! needed `0x80` padding (subkey for partial blocks); the two families
//! differ only in how the subkeys are derived.

mod cmac;
mod hmac;
mod xcbc;

pub use cmac::Cmac;
pub use hmac::Hmac;
pub use xcbc::Xcbc;

use cipherloom_core::block::Block;
use cipherloom_core::error::Error;
use cipherloom_core::params::Params;
use cipherloom_core::secret::SecretBytes;

// Block ciphers take no IV or tag length; strip them before delegating.
fn base_params<'a>(params: &Params<'a>) -> Params<'a> {
    Params::new(params.key).with_rounds(params.rounds)
}

// CBC-MAC chain shared by CMAC and XCBC: buffers up to one block so the
// final block can receive its subkey treatment at tag time.
struct CbcChain {
    chain: SecretBytes,
    buf: SecretBytes,
    buf_len: usize,
}

impl CbcChain {
    fn new(block_size: usize) -> Self {
        Self {
            chain: SecretBytes::zeroed(block_size),
            buf: SecretBytes::zeroed(block_size),
            buf_len: 0,
        }
    }

    fn absorb(&mut self, cipher: &mut Block, mut data: &[u8]) -> Result<(), Error> {
        let block_size = self.buf.len();
        while !data.is_empty() {
            // Flush only when more input follows, so the last full block
            // stays buffered for finalization.
            if self.buf_len == block_size {
                self.chain.xor_assign(&self.buf);
                cipher.encrypt_block(&mut self.chain)?;
                self.buf_len = 0;
            }
            let take = (block_size - self.buf_len).min(data.len());
            self.buf[self.buf_len..self.buf_len + take].copy_from_slice(&data[..take]);
            self.buf_len += take;
            data = &data[take..];
        }
        Ok(())
    }

    // Folds the buffered final block into the chain, XORing `complete`
    // if it was full or padding with a single 0x80 bit and XORing
    // `partial` otherwise, then encrypts once more. The chain then holds
    // the full-length tag.
    fn finish(
        &mut self,
        cipher: &mut Block,
        complete: &[u8],
        partial: &[u8],
    ) -> Result<(), Error> {
        let block_size = self.buf.len();
        if self.buf_len == block_size {
            self.chain.xor_assign(&self.buf);
            self.chain.xor_assign(complete);
        } else {
            self.buf[self.buf_len] = 0x80;
            for byte in &mut self.buf[self.buf_len + 1..] {
                *byte = 0;
            }
            self.chain.xor_assign(&self.buf);
            self.chain.xor_assign(partial);
        }
        cipher.encrypt_block(&mut self.chain)
    }

    fn reset(&mut self) {
        self.chain.wipe();
        self.buf.wipe();
        self.buf_len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::CbcChain;

    #[test]
    fn new_chain_is_empty() {
        let chain = CbcChain::new(16);
        assert_eq!(chain.buf_len, 0);
        assert!(chain.chain.iter().all(|&b| b == 0));
    }
}
