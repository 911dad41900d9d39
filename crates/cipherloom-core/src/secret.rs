//! Secure-erasure guard for sensitive buffers.
//!
//! Key schedules, chain blocks, buffered keystream, and derived subkeys
//! live in [`SecretBytes`] so that erasure is structural: the `Drop` impl
//! performs a volatile wipe the optimizer cannot elide, instead of relying
//! on a manually repeated call at every exit path.

use core::fmt;
use core::ops::{Deref, DerefMut};

use zeroize::Zeroize;

/// Heap-allocated byte buffer wiped on drop.
pub struct SecretBytes(Vec<u8>);

impl SecretBytes {
    /// An all-zero buffer of the given length.
    pub fn zeroed(len: usize) -> Self {
        Self(vec![0u8; len])
    }

    /// A buffer holding a copy of `data`.
    pub fn copy_from(data: &[u8]) -> Self {
        Self(data.to_vec())
    }

    /// Buffer length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Wipes the contents in place, keeping the allocation.
    pub fn wipe(&mut self) {
        self.0.as_mut_slice().zeroize();
    }

    /// XORs `other` into this buffer byte-for-byte over the common prefix.
    pub fn xor_assign(&mut self, other: &[u8]) {
        for (dst, src) in self.0.iter_mut().zip(other) {
            *dst ^= src;
        }
    }
}

impl Deref for SecretBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl DerefMut for SecretBytes {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

impl Drop for SecretBytes {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

// Redacted: key material must never reach a log sink or panic message.
impl fmt::Debug for SecretBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretBytes({} bytes)", self.0.len())
    }
}
