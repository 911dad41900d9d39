//! Fuzz target for the authenticated-stream composition.
//!
//! Drives encrypt/decrypt with arbitrary keys, nonces, headers, and
//! chunk boundaries. Invariants checked on every input:
//! - no panic, ever (invalid parameters must surface as errors)
//! - decrypt(encrypt(pt)) == pt whenever creation succeeds
//! - the recomputed tag matches the tag produced at encryption

#![no_main]

use arbitrary::Arbitrary;
use cipherloom_constructs::{Cmac, Ctr, Eax};
use cipherloom_core::{verify_tags, AuthStream, Params};
use cipherloom_primitives::Aes128;
use libfuzzer_sys::fuzz_target;
use std::sync::Arc;

#[derive(Arbitrary, Debug)]
struct Input {
    key: Vec<u8>,
    nonce: Vec<u8>,
    header: Vec<u8>,
    plaintext: Vec<u8>,
    cut: usize,
}

fuzz_target!(|input: Input| {
    let stream = Arc::new(Ctr::new(Arc::new(Aes128)));
    let Ok(mac) = Cmac::new(Arc::new(Aes128)) else { return };
    let Ok(algo) = Eax::new(stream, Arc::new(mac)) else { return };
    let algo = Arc::new(algo);

    let params = Params::new(&input.key).with_iv(&input.nonce);
    let Ok(mut enc) = AuthStream::create(Arc::clone(&algo), &params) else {
        return;
    };

    let mut data = input.plaintext.clone();
    let cut = if data.is_empty() { 0 } else { input.cut % data.len() };
    let (head, tail) = data.split_at_mut(cut);
    enc.aad(&input.header).unwrap();
    enc.encrypt(head).unwrap();
    enc.encrypt(tail).unwrap();
    let mut sent = [0u8; 16];
    enc.tag(&mut sent).unwrap();

    let mut dec = AuthStream::create(algo, &params).unwrap();
    dec.decrypt(&mut data).unwrap();
    dec.aad(&input.header).unwrap();
    let mut recomputed = [0u8; 16];
    dec.tag(&mut recomputed).unwrap();

    assert_eq!(data, input.plaintext);
    assert!(verify_tags(&sent, &recomputed));
});
