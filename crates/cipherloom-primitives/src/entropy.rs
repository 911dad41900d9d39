//! OS entropy source.

use cipherloom_core::entropy::EntropySource;
use cipherloom_core::error::Error;

/// Entropy source backed by the operating system (`getrandom`).
///
/// This is the production implementation of the injected entropy
/// collaborator; it may block while the OS gathers entropy early in
/// boot.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&mut self, buffer: &mut [u8]) -> Result<(), Error> {
        getrandom::fill(buffer).map_err(|err| Error::Entropy(err.to_string()))
    }
}
