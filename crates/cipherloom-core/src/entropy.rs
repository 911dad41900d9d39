//! Entropy collaborator abstraction.
//!
//! Decouples the toolkit from OS entropy acquisition. Callers inject an
//! implementation (the production source lives with the leaf adapters;
//! tests use deterministic sources), never a module-level singleton. This
//! is the only interface in the toolkit that may block on I/O.

use crate::error::Error;

/// A byte-producing entropy source.
///
/// # Invariants
///
/// - Production implementations MUST draw from a cryptographically secure
///   source.
/// - On error the buffer contents are unspecified and MUST NOT be used.
pub trait EntropySource {
    /// Fills the buffer completely with entropy, or fails.
    fn fill(&mut self, buffer: &mut [u8]) -> Result<(), Error>;
}

#[cfg(test)]
mod tests {
    use super::EntropySource;
    use crate::error::Error;

    struct Repeating(u8);

    impl EntropySource for Repeating {
        fn fill(&mut self, buffer: &mut [u8]) -> Result<(), Error> {
            buffer.fill(self.0);
            Ok(())
        }
    }

    #[test]
    fn sources_are_object_safe() {
        let mut source: Box<dyn EntropySource> = Box::new(Repeating(0x5A));
        let mut buffer = [0u8; 8];
        source.fill(&mut buffer).unwrap();
        assert_eq!(buffer, [0x5A; 8]);
    }
}
