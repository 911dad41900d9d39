//! XCBC-MAC over a block cipher.
//!
//! Three subkeys are derived by encrypting the constant blocks
//! `0x01^n`, `0x02^n`, `0x03^n` under the primary key. K1 re-keys the
//! cipher for the CBC-MAC chain; K2 masks a complete final block and K3
//! a padded one. The derived K1 is one block long, so the base cipher
//! must accept a `block_size`-byte key (AES-128 does; AES-256 does
//! not).

use std::sync::Arc;

use cipherloom_core::block::{Block, BlockAlgo};
use cipherloom_core::caps::Caps;
use cipherloom_core::error::Error;
use cipherloom_core::mac::{MacAlgo, MacState};
use cipherloom_core::params::Params;
use cipherloom_core::secret::SecretBytes;

use super::{CbcChain, base_params};

/// XCBC-MAC descriptor over a block cipher.
pub struct Xcbc {
    base: Arc<dyn BlockAlgo>,
    caps: Caps,
    name: String,
}

impl Xcbc {
    /// Wraps `base` in XCBC-MAC.
    pub fn new(base: Arc<dyn BlockAlgo>) -> Self {
        let b = base.caps();
        let caps = Caps {
            max_key: b.max_key,
            max_tag: b.block_size,
            block_size: b.block_size,
            max_rounds: b.max_rounds,
            default_rounds: b.default_rounds,
            ..Caps::NONE
        };
        let name = format!("xcbc({})", base.name());
        Self { base, caps, name }
    }
}

struct Subkeys {
    chain_cipher: Block,
    k2: SecretBytes,
    k3: SecretBytes,
}

fn derive(base: &Arc<dyn BlockAlgo>, params: &Params<'_>) -> Result<Subkeys, Error> {
    let mut primary = Block::create(Arc::clone(base), &base_params(params))?;
    let block_size = primary.block_size();

    let mut constant = |tag: u8| -> Result<SecretBytes, Error> {
        let mut block = SecretBytes::zeroed(block_size);
        block.fill(tag);
        primary.encrypt_block(&mut block)?;
        Ok(block)
    };
    let k1 = constant(0x01)?;
    let k2 = constant(0x02)?;
    let k3 = constant(0x03)?;

    // The chain runs under K1, not the primary key.
    let chain_cipher =
        Block::create(Arc::clone(base), &Params::new(&k1).with_rounds(params.rounds))?;
    Ok(Subkeys { chain_cipher, k2, k3 })
}

impl MacAlgo for Xcbc {
    fn name(&self) -> &str {
        &self.name
    }

    fn caps(&self) -> Caps {
        self.caps
    }

    fn create(&self, params: &Params<'_>) -> Result<Box<dyn MacState>, Error> {
        let Subkeys { chain_cipher, k2, k3 } = derive(&self.base, params)?;
        let block_size = self.caps.block_size;
        Ok(Box::new(XcbcState {
            base: Arc::clone(&self.base),
            cipher: chain_cipher,
            k2,
            k3,
            chain: CbcChain::new(block_size),
            tag: None,
            offset: 0,
        }))
    }
}

struct XcbcState {
    base: Arc<dyn BlockAlgo>,
    cipher: Block,
    k2: SecretBytes,
    k3: SecretBytes,
    chain: CbcChain,
    tag: Option<SecretBytes>,
    offset: usize,
}

impl MacState for XcbcState {
    fn update(&mut self, data: &[u8]) -> Result<(), Error> {
        self.chain.absorb(&mut self.cipher, data)
    }

    fn tag(&mut self, out: &mut [u8]) -> Result<(), Error> {
        if self.tag.is_none() {
            self.chain.finish(&mut self.cipher, &self.k2, &self.k3)?;
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
        let Subkeys { chain_cipher, k2, k3 } = derive(&self.base, params)?;
        self.cipher = chain_cipher;
        self.k2 = k2;
        self.k3 = k3;
        self.chain.reset();
        self.tag = None;
        self.offset = 0;
        Ok(())
    }
}
