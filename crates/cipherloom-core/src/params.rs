//! Creation parameters shared by every primitive kind.

use core::fmt;

/// Borrowed parameters for `create` and `recreate`.
///
/// One parameter record serves all primitive kinds; kinds that take no IV
/// or tag length simply leave the fields at their defaults. `rounds == 0`
/// selects the descriptor's default round count.
#[derive(Clone, Copy, Default)]
pub struct Params<'a> {
    /// Round count (0 selects the descriptor default)
    pub rounds: usize,
    /// Key material
    pub key: &'a [u8],
    /// IV or nonce (empty when the kind takes none)
    pub iv: &'a [u8],
    /// Requested tag length hint (0 when unused)
    pub tag_len: usize,
}

impl<'a> Params<'a> {
    /// Parameters with the given key and all other fields defaulted.
    pub fn new(key: &'a [u8]) -> Self {
        Self { rounds: 0, key, iv: &[], tag_len: 0 }
    }

    /// Sets the IV/nonce.
    pub fn with_iv(self, iv: &'a [u8]) -> Self {
        Self { iv, ..self }
    }

    /// Sets an explicit round count.
    pub fn with_rounds(self, rounds: usize) -> Self {
        Self { rounds, ..self }
    }

    /// Sets the requested tag length.
    pub fn with_tag_len(self, tag_len: usize) -> Self {
        Self { tag_len, ..self }
    }
}

// Key bytes are redacted: parameter records travel through error paths
// and must never reach a log sink or panic message.
impl fmt::Debug for Params<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Params")
            .field("rounds", &self.rounds)
            .field("key_len", &self.key.len())
            .field("iv_len", &self.iv.len())
            .field("tag_len", &self.tag_len)
            .finish()
    }
}
