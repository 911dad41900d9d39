//! PBKDF2 in counter mode (RFC 2898).

use std::sync::Arc;

use cipherloom_core::caps::UNBOUNDED;
use cipherloom_core::error::Error;
use cipherloom_core::mac::{Mac, MacAlgo};
use cipherloom_core::params::Params;
use cipherloom_core::secret::SecretBytes;

/// Derives `out.len()` bytes from `(password, salt)` with `iterations`
/// rounds of the given MAC.
///
/// Each output block of `max_tag` bytes is the XOR of the iteration
/// chain `U_1 = MAC(salt || counter)`, `U_j = MAC(U_{j-1})`, with the
/// block counter a 1-based big-endian 32-bit integer. Output longer
/// than `2^32 - 1` blocks would wrap the counter and is refused.
pub fn pbkdf2(
    mac: Arc<dyn MacAlgo>,
    password: &[u8],
    salt: &[u8],
    iterations: usize,
    out: &mut [u8],
) -> Result<(), Error> {
    let hlen = mac.caps().max_tag;
    if hlen == 0 || hlen == UNBOUNDED {
        return Err(Error::Unsupported("pbkdf2 over a mac without a fixed tag length"));
    }
    if iterations == 0 {
        return Err(Error::InvalidParameter("pbkdf2 iteration count must be at least 1"));
    }
    let blocks = out.len().div_ceil(hlen);
    let max = (u32::MAX as usize).saturating_mul(hlen);
    if blocks > u32::MAX as usize {
        return Err(Error::OutputTooLong { len: out.len(), max });
    }

    let params = Params::new(password);
    let mut prf = Mac::create(mac, &params)?;
    let mut chain = SecretBytes::zeroed(hlen);
    let mut acc = SecretBytes::zeroed(hlen);

    for (index, block) in out.chunks_mut(hlen).enumerate() {
        let counter = (index as u32) + 1;
        prf.update(salt)?;
        prf.update(&counter.to_be_bytes())?;
        prf.tag(&mut chain)?;
        acc.copy_from_slice(&chain);

        for _ in 1..iterations {
            prf = prf.recreate(&params)?;
            prf.update(&chain)?;
            prf.tag(&mut chain)?;
            acc.xor_assign(&chain);
        }

        block.copy_from_slice(&acc[..block.len()]);
        prf = prf.recreate(&params)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::pbkdf2;
    use crate::mac::Hmac;
    use cipherloom_core::error::Error;
    use cipherloom_primitives::Sha1;
    use std::sync::Arc;

    fn hmac_sha1() -> Arc<Hmac> {
        Arc::new(Hmac::new(Arc::new(Sha1)).unwrap())
    }

    // RFC 6070 case 1.
    #[test]
    fn single_iteration_matches_rfc6070() {
        let mut out = [0u8; 20];
        pbkdf2(hmac_sha1(), b"password", b"salt", 1, &mut out).unwrap();
        assert_eq!(hex::encode(out), "0c60c80f961f0e71f3a9b524af6012062fe037a6");
    }

    // RFC 6070 case 2.
    #[test]
    fn two_iterations_match_rfc6070() {
        let mut out = [0u8; 20];
        pbkdf2(hmac_sha1(), b"password", b"salt", 2, &mut out).unwrap();
        assert_eq!(hex::encode(out), "ea6c014dc72d6f8ccd1ed92ace1d41f0d8de8957");
    }

    #[test]
    fn output_shorter_than_one_block_is_a_prefix() {
        let mut full = [0u8; 20];
        let mut short = [0u8; 7];
        pbkdf2(hmac_sha1(), b"password", b"salt", 2, &mut full).unwrap();
        pbkdf2(hmac_sha1(), b"password", b"salt", 2, &mut short).unwrap();
        assert_eq!(&full[..7], &short);
    }

    #[test]
    fn zero_iterations_are_refused() {
        let mut out = [0u8; 20];
        assert_eq!(
            pbkdf2(hmac_sha1(), b"p", b"s", 0, &mut out),
            Err(Error::InvalidParameter("pbkdf2 iteration count must be at least 1")),
        );
    }
}
