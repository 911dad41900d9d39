//! scrypt memory-hard key derivation (RFC 7914).
//!
//! The memory is the security parameter: ROMix stores all `N`
//! intermediate states, `128 * r` bytes each, and the full scratch is
//! allocated up front. Time/memory trade-offs that recompute states
//! instead of storing them are out of contract.

use std::sync::Arc;

use cipherloom_core::error::Error;
use cipherloom_core::mac::MacAlgo;
use cipherloom_core::secret::SecretBytes;
use zeroize::Zeroize;

use super::pbkdf2;

const SALSA_BLOCK: usize = 64;

/// Cost parameters for [`scrypt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScryptParams {
    /// CPU/memory cost; must be a power of two greater than 1.
    pub n: usize,
    /// Block size multiplier (the RFC's `r`).
    pub r: usize,
    /// Parallelization count (the RFC's `p`).
    pub p: usize,
}

impl ScryptParams {
    fn validate(self) -> Result<(), Error> {
        if self.n < 2 || !self.n.is_power_of_two() {
            return Err(Error::InvalidParameter("scrypt N must be a power of two above 1"));
        }
        if self.r == 0 || self.p == 0 {
            return Err(Error::InvalidParameter("scrypt r and p must be at least 1"));
        }
        // r * p < 2^30, and the scratch allocation must not overflow.
        let Some(rp) = self.r.checked_mul(self.p) else {
            return Err(Error::InvalidParameter("scrypt r * p is out of range"));
        };
        if rp >= 1 << 30 {
            return Err(Error::InvalidParameter("scrypt r * p is out of range"));
        }
        if self.n.checked_mul(128 * self.r).is_none() {
            return Err(Error::InvalidParameter("scrypt N * r scratch size overflows"));
        }
        Ok(())
    }
}

/// Derives `out.len()` bytes from `(password, salt)` under the given
/// cost parameters, using `mac` as the PBKDF2 pseudorandom function.
pub fn scrypt(
    mac: Arc<dyn MacAlgo>,
    password: &[u8],
    salt: &[u8],
    params: ScryptParams,
    out: &mut [u8],
) -> Result<(), Error> {
    params.validate()?;
    let block_len = 128 * params.r;

    let mut blocks = SecretBytes::zeroed(params.p * block_len);
    pbkdf2(Arc::clone(&mac), password, salt, 1, &mut blocks)?;

    // The whole N-state table, allocated before any mixing starts.
    let mut table = vec![0u8; params.n * block_len];
    let mut work = SecretBytes::zeroed(block_len);
    let mut shuffle = SecretBytes::zeroed(block_len);
    for block in blocks.chunks_mut(block_len) {
        romix(block, params.n, &mut table, &mut work, &mut shuffle);
    }
    table.zeroize();

    pbkdf2(mac, password, &blocks, 1, out)
}

// ROMix: fill the table with the BlockMix orbit of `block`, then make N
// data-dependent passes back over it.
fn romix(block: &mut [u8], n: usize, table: &mut [u8], work: &mut [u8], shuffle: &mut [u8]) {
    let block_len = block.len();
    work.copy_from_slice(block);
    for slot in table.chunks_mut(block_len) {
        slot.copy_from_slice(work);
        block_mix(work, shuffle);
    }
    for _ in 0..n {
        // n is a power of two, so the mask is the modulo.
        let j = integerify(work) & (n - 1);
        for (byte, stored) in work.iter_mut().zip(&table[j * block_len..]) {
            *byte ^= stored;
        }
        block_mix(work, shuffle);
    }
    block.copy_from_slice(work);
}

// BlockMix: chain Salsa20/8 over the 2r 64-byte sub-blocks, writing
// even-indexed results to the first half and odd-indexed to the second.
fn block_mix(work: &mut [u8], shuffle: &mut [u8]) {
    let halves = work.len() / (2 * SALSA_BLOCK);
    let mut register = [0u8; SALSA_BLOCK];
    register.copy_from_slice(&work[work.len() - SALSA_BLOCK..]);

    for (i, sub) in work.chunks(SALSA_BLOCK).enumerate() {
        for (byte, input) in register.iter_mut().zip(sub) {
            *byte ^= input;
        }
        salsa20_8(&mut register);
        let slot = if i % 2 == 0 { i / 2 } else { halves + i / 2 };
        shuffle[slot * SALSA_BLOCK..(slot + 1) * SALSA_BLOCK].copy_from_slice(&register);
    }
    work.copy_from_slice(shuffle);
    register.zeroize();
}

// Little-endian integer from the first 8 bytes of the last sub-block.
fn integerify(work: &[u8]) -> usize {
    let start = work.len() - SALSA_BLOCK;
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&work[start..start + 8]);
    u64::from_le_bytes(raw) as usize
}

// Salsa20/8 core: 4 double-rounds plus the feed-forward addition.
fn salsa20_8(block: &mut [u8; SALSA_BLOCK]) {
    let mut input = [0u32; 16];
    for (word, raw) in input.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]);
    }

    macro_rules! quarter {
        ($x:ident, $a:literal, $b:literal, $c:literal, $d:literal) => {
            $x[$b] ^= $x[$a].wrapping_add($x[$d]).rotate_left(7);
            $x[$c] ^= $x[$b].wrapping_add($x[$a]).rotate_left(9);
            $x[$d] ^= $x[$c].wrapping_add($x[$b]).rotate_left(13);
            $x[$a] ^= $x[$d].wrapping_add($x[$c]).rotate_left(18);
        };
    }

    let mut x = input;
    for _ in 0..4 {
        quarter!(x, 0, 4, 8, 12);
        quarter!(x, 5, 9, 13, 1);
        quarter!(x, 10, 14, 2, 6);
        quarter!(x, 15, 3, 7, 11);
        quarter!(x, 0, 1, 2, 3);
        quarter!(x, 5, 6, 7, 4);
        quarter!(x, 10, 11, 8, 9);
        quarter!(x, 15, 12, 13, 14);
    }

    for ((raw, word), added) in block.chunks_exact_mut(4).zip(x).zip(input) {
        raw.copy_from_slice(&word.wrapping_add(added).to_le_bytes());
    }
    x.zeroize();
    input.zeroize();
}
