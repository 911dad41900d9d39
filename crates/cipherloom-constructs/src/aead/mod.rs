//! Authenticated encryption built from a stream cipher and a MAC.

mod eax;

pub use eax::Eax;
