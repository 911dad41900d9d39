//! Salt generation for the key-derivation functions.

use cipherloom_core::entropy::EntropySource;
use cipherloom_core::error::Error;
use cipherloom_core::secret::SecretBytes;

/// Draws a `len`-byte salt from the entropy source.
///
/// The salt is not secret once stored alongside the derived key, but it
/// is returned in wiped-on-drop storage so discarded candidates never
/// linger.
pub fn generate_salt(entropy: &mut dyn EntropySource, len: usize) -> Result<SecretBytes, Error> {
    let mut salt = SecretBytes::zeroed(len);
    entropy.fill(&mut salt)?;
    Ok(salt)
}
