//! CMAC (OMAC1) over a block cipher.
//!
//! Subkeys are derived by doubling `L = E(0^n)` in GF(2^n): `K1 =
//! dbl(L)` masks a complete final block, `K2 = dbl(K1)` a padded one.
//! Only 64- and 128-bit block ciphers are supported (the reduction
//! polynomials 0x1B and 0x87).

use std::sync::Arc;

use cipherloom_core::block::{Block, BlockAlgo};
use cipherloom_core::caps::Caps;
use cipherloom_core::error::Error;
use cipherloom_core::mac::{MacAlgo, MacState};
use cipherloom_core::params::Params;
use cipherloom_core::secret::SecretBytes;

use super::{CbcChain, base_params};

/// CMAC descriptor over a block cipher.
pub struct Cmac {
    base: Arc<dyn BlockAlgo>,
    caps: Caps,
    name: String,
}

impl Cmac {
    /// Wraps `base` in CMAC.
    ///
    /// Fails for block sizes other than 8 or 16 bytes, for which no
    /// doubling constant is defined here.
    pub fn new(base: Arc<dyn BlockAlgo>) -> Result<Self, Error> {
        let b = base.caps();
        if b.block_size != 8 && b.block_size != 16 {
            return Err(Error::Unsupported("cmac over this block size"));
        }
        let caps = Caps {
            max_key: b.max_key,
            max_tag: b.block_size,
            block_size: b.block_size,
            max_rounds: b.max_rounds,
            default_rounds: b.default_rounds,
            ..Caps::NONE
        };
        let name = format!("cmac({})", base.name());
        Ok(Self { base, caps, name })
    }
}

// GF(2^n) doubling: shift the block left one bit; on carry out, reduce
// with the block-size polynomial.
fn dbl(block: &mut [u8]) {
    let poly: u8 = if block.len() == 16 { 0x87 } else { 0x1B };
    let mut carry = 0u8;
    for byte in block.iter_mut().rev() {
        let next_carry = *byte >> 7;
        *byte = (*byte << 1) | carry;
        carry = next_carry;
    }
    if carry == 1 {
        if let Some(last) = block.last_mut() {
            *last ^= poly;
        }
    }
}

fn derive_subkeys(cipher: &mut Block, block_size: usize) -> Result<(SecretBytes, SecretBytes), Error> {
    let mut k1 = SecretBytes::zeroed(block_size);
    cipher.encrypt_block(&mut k1)?;
    dbl(&mut k1);
    let mut k2 = SecretBytes::copy_from(&k1);
    dbl(&mut k2);
    Ok((k1, k2))
}

impl MacAlgo for Cmac {
    fn name(&self) -> &str {
        &self.name
    }

    fn caps(&self) -> Caps {
        self.caps
    }

    fn create(&self, params: &Params<'_>) -> Result<Box<dyn MacState>, Error> {
        let mut cipher = Block::create(Arc::clone(&self.base), &base_params(params))?;
        let block_size = self.caps.block_size;
        let (k1, k2) = derive_subkeys(&mut cipher, block_size)?;
        Ok(Box::new(CmacState {
            cipher,
            k1,
            k2,
            chain: CbcChain::new(block_size),
            tag: None,
            offset: 0,
        }))
    }
}

struct CmacState {
    cipher: Block,
    k1: SecretBytes,
    k2: SecretBytes,
    chain: CbcChain,
    tag: Option<SecretBytes>,
    offset: usize,
}

impl MacState for CmacState {
    fn update(&mut self, data: &[u8]) -> Result<(), Error> {
        self.chain.absorb(&mut self.cipher, data)
    }

    fn tag(&mut self, out: &mut [u8]) -> Result<(), Error> {
        if self.tag.is_none() {
            self.chain.finish(&mut self.cipher, &self.k1, &self.k2)?;
            self.tag = Some(SecretBytes::copy_from(&self.chain.chain));
        }
        let Some(tag) = self.tag.as_ref() else {
            return Err(Error::Finalized { operation: "tag" });
        };
        let end = self.offset + out.len();
        let Some(slice) = tag.get(self.offset..end) else {
            return Err(Error::TagTooLong { len: end, max: tag.len() });
        };
        out.copy_from_slice(slice);
        self.offset = end;
        Ok(())
    }

    fn rekey(&mut self, params: &Params<'_>) -> Result<(), Error> {
        let mut cipher = Block::create(self.cipher.algo(), &base_params(params))?;
        let block_size = cipher.block_size();
        let (k1, k2) = derive_subkeys(&mut cipher, block_size)?;
        self.cipher = cipher;
        self.k1 = k1;
        self.k2 = k2;
        self.chain.reset();
        self.tag = None;
        self.offset = 0;
        Ok(())
    }
}
