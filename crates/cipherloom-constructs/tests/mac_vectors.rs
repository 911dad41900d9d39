//! Known-answer vectors for the MAC adapters (RFC 4493, RFC 3566,
//! RFC 2202, RFC 4231).

use std::sync::Arc;

use cipherloom_constructs::Hmac;
use cipherloom_core::{Mac, MacAlgo, Params};
use cipherloom_primitives::Sha256;

fn tag_hex(algo: Arc<dyn MacAlgo>, key: &[u8], message: &[u8], tag_len: usize) -> String {
    let mut mac = Mac::create(algo, &Params::new(key)).unwrap();
    mac.update(message).unwrap();
    let mut tag = vec![0u8; tag_len];
    mac.tag(&mut tag).unwrap();
    hex::encode(tag)
}

mod cmac_aes128 {
    use super::tag_hex;
    use cipherloom_constructs::Cmac;
    use cipherloom_primitives::Aes128;
    use std::sync::Arc;

    fn check(message_hex: &str, expected: &str) {
        let algo = Arc::new(Cmac::new(Arc::new(Aes128)).unwrap());
        let key = hex::decode("2b7e151628aed2a6abf7158809cf4f3c").unwrap();
        let message = hex::decode(message_hex).unwrap();
        assert_eq!(tag_hex(algo, &key, &message, 16), expected);
    }

    #[test]
    fn empty_message() {
        check("", "bb1d6929e95937287fa37d129b756746");
    }

    #[test]
    fn one_block() {
        check(
            "6bc1bee22e409f96e93d7e117393172a",
            "070a16b46b4d4144f79bdd9dd04a287c",
        );
    }

    #[test]
    fn partial_final_block() {
        check(
            "6bc1bee22e409f96e93d7e117393172a\
             ae2d8a571e03ac9c9eb76fac45af8e51\
             30c81c46a35ce411",
            "dfa66747de9ae63030ca32611497c827",
        );
    }

    #[test]
    fn four_blocks() {
        check(
            "6bc1bee22e409f96e93d7e117393172a\
             ae2d8a571e03ac9c9eb76fac45af8e51\
             30c81c46a35ce411e5fbc1191a0a52ef\
             f69f2445df4f9b17ad2b417be66c3710",
            "51f0bebf7e3b9d92fc49741779363cfe",
        );
    }
}

mod xcbc_aes128 {
    use super::tag_hex;
    use cipherloom_constructs::Xcbc;
    use cipherloom_primitives::Aes128;
    use std::sync::Arc;

    fn check(message: &[u8], expected: &str) {
        let algo = Arc::new(Xcbc::new(Arc::new(Aes128)));
        let key = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        assert_eq!(tag_hex(algo, &key, message, 16), expected);
    }

    #[test]
    fn empty_message() {
        check(b"", "75f0251d528ac01c4573dfd584d79f29");
    }

    #[test]
    fn three_bytes() {
        check(&[0, 1, 2], "5b376580ae2f19afe7219ceef172756f");
    }

    #[test]
    fn one_block() {
        let message: Vec<u8> = (0..16).collect();
        check(&message, "d2a246fa349b68a79998a4394ff7a263");
    }

    #[test]
    fn two_blocks() {
        let message: Vec<u8> = (0..32).collect();
        check(&message, "f54f0ec8d2b9f3d36807734bd5283fd4");
    }
}

mod hmac {
    use super::tag_hex;
    use cipherloom_constructs::Hmac;
    use cipherloom_primitives::{Sha1, Sha256};
    use std::sync::Arc;

    #[test]
    fn sha1_rfc2202_case_1() {
        let algo = Arc::new(Hmac::new(Arc::new(Sha1)).unwrap());
        assert_eq!(
            tag_hex(algo, &[0x0B; 20], b"Hi There", 20),
            "b617318655057264e28bc0b6fb378c8ef146be00",
        );
    }

    #[test]
    fn sha1_rfc2202_case_2() {
        let algo = Arc::new(Hmac::new(Arc::new(Sha1)).unwrap());
        assert_eq!(
            tag_hex(algo, b"Jefe", b"what do ya want for nothing?", 20),
            "effcdf6ae5eb2fa2d27416d5f184df9c259a7c79",
        );
    }

    #[test]
    fn sha256_rfc4231_case_1() {
        let algo = Arc::new(Hmac::new(Arc::new(Sha256)).unwrap());
        assert_eq!(
            tag_hex(algo, &[0x0B; 20], b"Hi There", 32),
            "b0344c61d8db38535ca8afceaf0bf12b881dc200c9833da726e9376c2e32cff7",
        );
    }

    #[test]
    fn sha256_rfc4231_case_2() {
        let algo = Arc::new(Hmac::new(Arc::new(Sha256)).unwrap());
        assert_eq!(
            tag_hex(algo, b"Jefe", b"what do ya want for nothing?", 32),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843",
        );
    }

    // Keys longer than the hash block are pre-hashed first.
    #[test]
    fn sha256_rfc4231_long_key() {
        let algo = Arc::new(Hmac::new(Arc::new(Sha256)).unwrap());
        assert_eq!(
            tag_hex(
                algo,
                &[0xAA; 131],
                b"Test Using Larger Than Block-Size Key - Hash Key First",
                32,
            ),
            "60e431591ee0b67f0d8a26aacbf5b77f8e0bc6213728c5140546040f0ee37f54",
        );
    }
}

// Truncated tags are a prefix of the full tag, and the cumulative
// output stays bounded.
#[test]
fn truncated_tag_is_a_prefix() {
    let algo = Arc::new(Hmac::new(Arc::new(Sha256)).unwrap());
    let full = tag_hex(Arc::clone(&algo) as Arc<dyn MacAlgo>, b"key", b"message", 32);

    let mut mac = Mac::create(algo, &Params::new(b"key")).unwrap();
    mac.update(b"message").unwrap();
    let mut head = [0u8; 12];
    mac.tag(&mut head).unwrap();
    assert_eq!(hex::encode(head), &full[..24]);

    let mut rest = [0u8; 20];
    mac.tag(&mut rest).unwrap();
    assert_eq!(hex::encode(rest), &full[24..]);

    let mut excess = [0u8; 1];
    assert!(mac.tag(&mut excess).is_err());
}
