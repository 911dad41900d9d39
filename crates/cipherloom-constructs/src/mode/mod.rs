//! Modes of operation: Block → Stream adapters.
//!
//! Each mode descriptor closes over an `Arc<dyn BlockAlgo>` and
//! implements [`cipherloom_core::StreamAlgo`], so a wrapped block cipher
//! is used exactly like a native stream cipher. Capability limits are
//! computed from the base descriptor at construction: `max_iv` is the
//! block size (0 for ECB), `multof` is the block size for ECB/CBC and 1
//! for the keystream modes, and round limits pass through.
//!
//! IVs shorter than the block size are zero-padded on the right at
//! creation.

mod cbc;
mod cfb;
mod ctr;
mod ecb;
mod ofb;

pub use cbc::Cbc;
pub use cfb::Cfb;
pub use ctr::Ctr;
pub use ecb::Ecb;
pub use ofb::Ofb;

use cipherloom_core::block::BlockAlgo;
use cipherloom_core::caps::Caps;
use cipherloom_core::params::Params;
use cipherloom_core::secret::SecretBytes;

// Shared capability computation: IV-carrying mode over `base`, with the
// given bulk granularity.
fn mode_caps(base: &dyn BlockAlgo, multof: usize, max_iv: usize) -> Caps {
    let b = base.caps();
    Caps {
        max_key: b.max_key,
        max_iv,
        max_tag: 0,
        block_size: b.block_size,
        multof,
        max_rounds: b.max_rounds,
        default_rounds: b.default_rounds,
    }
}

// IV zero-padded on the right to one block.
fn padded_iv(iv: &[u8], block_size: usize) -> SecretBytes {
    let mut padded = SecretBytes::zeroed(block_size);
    padded[..iv.len()].copy_from_slice(iv);
    padded
}

// Block ciphers take no IV; strip it before delegating create/rekey.
fn base_params<'a>(params: &Params<'a>) -> Params<'a> {
    Params::new(params.key).with_rounds(params.rounds)
}

#[cfg(test)]
mod tests {
    use super::padded_iv;

    #[test]
    fn short_iv_pads_on_the_right() {
        let padded = padded_iv(&[1, 2, 3], 8);
        assert_eq!(&*padded, &[1, 2, 3, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn full_iv_is_unchanged() {
        let padded = padded_iv(&[9; 8], 8);
        assert_eq!(&*padded, &[9; 8]);
    }
}
