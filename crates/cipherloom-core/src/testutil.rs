//! Toy primitives for exercising the framework contracts in unit tests.
//!
//! These are NOT ciphers. They are small invertible/accumulating
//! transforms with the right shapes, so lifecycle, capability, and phase
//! rules can be tested without pulling real algorithms into this crate.

use crate::block::{BlockAlgo, BlockState};
use crate::caps::Caps;
use crate::error::Error;
use crate::hash::{HashAlgo, HashState};
use crate::mac::{MacAlgo, MacState};
use crate::params::Params;
use crate::stream::{StreamAlgo, StreamState};

/// Block size shared by all toy primitives.
pub const ROTOR_BLOCK: usize = 8;

fn toy_key(params: &Params<'_>) -> Result<[u8; ROTOR_BLOCK], Error> {
    <[u8; ROTOR_BLOCK]>::try_from(params.key)
        .map_err(|_| Error::BadKeyLength { len: params.key.len(), algorithm: "toy" })
}

/// Toy block "cipher": rotate-left-one-byte, then XOR the key.
pub struct Rotor;

impl BlockAlgo for Rotor {
    fn name(&self) -> &str {
        "rotor"
    }

    fn caps(&self) -> Caps {
        Caps {
            max_key: ROTOR_BLOCK,
            block_size: ROTOR_BLOCK,
            multof: ROTOR_BLOCK,
            ..Caps::NONE
        }
    }

    fn create(&self, params: &Params<'_>) -> Result<Box<dyn BlockState>, Error> {
        Ok(Box::new(RotorState { key: toy_key(params)? }))
    }
}

struct RotorState {
    key: [u8; ROTOR_BLOCK],
}

impl BlockState for RotorState {
    fn encrypt_block(&mut self, block: &mut [u8]) -> Result<(), Error> {
        block.rotate_left(1);
        for (b, k) in block.iter_mut().zip(&self.key) {
            *b ^= k;
        }
        Ok(())
    }

    fn decrypt_block(&mut self, block: &mut [u8]) -> Result<(), Error> {
        for (b, k) in block.iter_mut().zip(&self.key) {
            *b ^= k;
        }
        block.rotate_right(1);
        Ok(())
    }

    fn rekey(&mut self, params: &Params<'_>) -> Result<(), Error> {
        self.key = toy_key(params)?;
        Ok(())
    }
}

/// Toy stream "cipher" with `multof = ROTOR_BLOCK`: XORs a counter-mixed
/// keystream.
pub struct RotorStream;

impl StreamAlgo for RotorStream {
    fn name(&self) -> &str {
        "rotor-stream"
    }

    fn caps(&self) -> Caps {
        Caps {
            max_key: ROTOR_BLOCK,
            max_iv: ROTOR_BLOCK,
            block_size: ROTOR_BLOCK,
            multof: ROTOR_BLOCK,
            ..Caps::NONE
        }
    }

    fn create(&self, params: &Params<'_>) -> Result<Box<dyn StreamState>, Error> {
        Ok(Box::new(RotorStreamState { key: toy_key(params)?, position: 0 }))
    }
}

struct RotorStreamState {
    key: [u8; ROTOR_BLOCK],
    position: u64,
}

impl RotorStreamState {
    fn apply(&mut self, data: &mut [u8]) {
        for byte in data {
            let k = self.key[(self.position % ROTOR_BLOCK as u64) as usize];
            *byte ^= k ^ (self.position as u8);
            self.position = self.position.wrapping_add(1);
        }
    }
}

impl StreamState for RotorStreamState {
    fn encrypt(&mut self, data: &mut [u8]) -> Result<(), Error> {
        self.apply(data);
        Ok(())
    }

    fn decrypt(&mut self, data: &mut [u8]) -> Result<(), Error> {
        self.apply(data);
        Ok(())
    }

    fn keystream(&mut self, out: &mut [u8]) -> Result<(), Error> {
        out.fill(0);
        self.apply(out);
        Ok(())
    }

    fn rekey(&mut self, params: &Params<'_>) -> Result<(), Error> {
        self.key = toy_key(params)?;
        self.position = 0;
        Ok(())
    }
}

/// Toy 8-byte hash supporting incremental output.
pub struct Folder;

impl HashAlgo for Folder {
    fn name(&self) -> &str {
        "folder"
    }

    fn caps(&self) -> Caps {
        Caps { max_tag: ROTOR_BLOCK, block_size: ROTOR_BLOCK, ..Caps::NONE }
    }

    fn create(&self, _params: &Params<'_>) -> Result<Box<dyn HashState>, Error> {
        Ok(Box::new(FolderState {
            acc: [0u8; ROTOR_BLOCK],
            absorbed: 0,
            digest: None,
            offset: 0,
        }))
    }
}

struct FolderState {
    acc: [u8; ROTOR_BLOCK],
    absorbed: u64,
    digest: Option<[u8; ROTOR_BLOCK]>,
    offset: usize,
}

impl HashState for FolderState {
    fn update(&mut self, data: &[u8]) -> Result<(), Error> {
        for byte in data {
            let slot = (self.absorbed % ROTOR_BLOCK as u64) as usize;
            self.acc[slot] = self.acc[slot].rotate_left(3) ^ byte;
            self.absorbed = self.absorbed.wrapping_add(1);
        }
        Ok(())
    }

    fn output(&mut self, out: &mut [u8]) -> Result<(), Error> {
        let digest = match self.digest {
            Some(digest) => digest,
            None => {
                let mut digest = self.acc;
                let len = self.absorbed.to_be_bytes();
                for (d, l) in digest.iter_mut().zip(&len) {
                    *d = d.rotate_left(1) ^ l;
                }
                self.digest = Some(digest);
                digest
            }
        };
        let end = self.offset + out.len();
        let Some(slice) = digest.get(self.offset..end) else {
            return Err(Error::OutputTooLong { len: end, max: ROTOR_BLOCK });
        };
        out.copy_from_slice(slice);
        self.offset = end;
        Ok(())
    }

    fn rekey(&mut self, _params: &Params<'_>) -> Result<(), Error> {
        self.acc = [0u8; ROTOR_BLOCK];
        self.absorbed = 0;
        self.digest = None;
        self.offset = 0;
        Ok(())
    }
}

/// Toy 8-byte MAC supporting incremental tag output.
pub struct XorMac;

impl MacAlgo for XorMac {
    fn name(&self) -> &str {
        "xor-mac"
    }

    fn caps(&self) -> Caps {
        Caps {
            max_key: ROTOR_BLOCK,
            max_tag: ROTOR_BLOCK,
            block_size: ROTOR_BLOCK,
            ..Caps::NONE
        }
    }

    fn create(&self, params: &Params<'_>) -> Result<Box<dyn MacState>, Error> {
        let key = toy_key(params)?;
        Ok(Box::new(XorMacState { acc: key, absorbed: 0, tag: None, offset: 0 }))
    }
}

struct XorMacState {
    acc: [u8; ROTOR_BLOCK],
    absorbed: u64,
    tag: Option<[u8; ROTOR_BLOCK]>,
    offset: usize,
}

impl MacState for XorMacState {
    fn update(&mut self, data: &[u8]) -> Result<(), Error> {
        for byte in data {
            let slot = (self.absorbed % ROTOR_BLOCK as u64) as usize;
            self.acc[slot] = self.acc[slot].rotate_left(5) ^ byte;
            self.absorbed = self.absorbed.wrapping_add(1);
        }
        Ok(())
    }

    fn tag(&mut self, out: &mut [u8]) -> Result<(), Error> {
        let tag = match self.tag {
            Some(tag) => tag,
            None => {
                let mut tag = self.acc;
                for (i, byte) in tag.iter_mut().enumerate() {
                    *byte = byte.rotate_left(2) ^ (i as u8);
                }
                self.tag = Some(tag);
                tag
            }
        };
        let end = self.offset + out.len();
        let Some(slice) = tag.get(self.offset..end) else {
            return Err(Error::TagTooLong { len: end, max: ROTOR_BLOCK });
        };
        out.copy_from_slice(slice);
        self.offset = end;
        Ok(())
    }

    fn rekey(&mut self, params: &Params<'_>) -> Result<(), Error> {
        self.acc = toy_key(params)?;
        self.absorbed = 0;
        self.tag = None;
        self.offset = 0;
        Ok(())
    }
}
