//! Fuzz target for the key-derivation entry points.
//!
//! Arbitrary passwords, salts, and cost parameters must either derive
//! bytes or return a typed error; no input may panic or over-allocate.
//! Costs are clamped so a fuzz iteration stays cheap.

#![no_main]

use arbitrary::Arbitrary;
use cipherloom_constructs::{pbkdf2, scrypt, Hmac, ScryptParams};
use cipherloom_core::MacAlgo;
use cipherloom_primitives::Sha256;
use libfuzzer_sys::fuzz_target;
use std::sync::Arc;

#[derive(Arbitrary, Debug)]
struct Input {
    password: Vec<u8>,
    salt: Vec<u8>,
    iterations: u8,
    n: u8,
    r: u8,
    p: u8,
    out_len: u8,
}

fuzz_target!(|input: Input| {
    let mac: Arc<dyn MacAlgo> = Arc::new(Hmac::new(Arc::new(Sha256)).unwrap());
    let mut out = vec![0u8; input.out_len as usize];

    let _ = pbkdf2(
        Arc::clone(&mac),
        &input.password,
        &input.salt,
        input.iterations as usize,
        &mut out,
    );

    let params = ScryptParams {
        n: input.n as usize % 64,
        r: input.r as usize % 8,
        p: input.p as usize % 4,
    };
    let _ = scrypt(mac, &input.password, &input.salt, params, &mut out);
});
