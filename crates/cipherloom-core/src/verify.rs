//! Constant-time tag verification.

use subtle::ConstantTimeEq;

/// Compares an expected tag against a received one in constant time.
///
/// The AEAD composition computes tags but never rejects ciphertexts
/// itself; callers MUST verify with this function (or an equivalent
/// constant-time comparison) and discard the plaintext on mismatch.
/// Comparing with `==` leaks the first differing byte's position through
/// timing.
///
/// Lengths are public information, so a length mismatch returns early.
pub fn verify_tags(expected: &[u8], received: &[u8]) -> bool {
    expected.len() == received.len() && bool::from(expected.ct_eq(received))
}
