//! EAX2-style composition of one stream cipher and one MAC.
//!
//! Keys are split at creation: the stream cipher takes a suffix of
//! `min(ceil(key_len / 2), stream.max_key)` bytes and the MAC takes the
//! remaining prefix. Three MAC instances are derived from the MAC key,
//! each primed with one all-zero block whose last byte is the domain
//! number: domain 0 MACs the nonce into the working IV that keys the
//! stream cipher, domain 1 MACs the associated data, domain 2 MACs the
//! ciphertext. The final tag is the byte-wise XOR of all three results,
//! so header bytes can never stand in for ciphertext bytes.
//!
//! Tag verification stays with the caller; see
//! [`cipherloom_core::verify_tags`].

use std::sync::Arc;

use cipherloom_core::authstream::{AeadAlgo, AeadState};
use cipherloom_core::caps::{Caps, UNBOUNDED};
use cipherloom_core::error::Error;
use cipherloom_core::mac::{Mac, MacAlgo};
use cipherloom_core::params::Params;
use cipherloom_core::secret::SecretBytes;
use cipherloom_core::stream::{Stream, StreamAlgo};

/// EAX2 descriptor over a stream cipher and a MAC.
pub struct Eax {
    stream: Arc<dyn StreamAlgo>,
    mac: Arc<dyn MacAlgo>,
    caps: Caps,
    name: String,
}

impl Eax {
    /// Composes `stream` and `mac` into an authenticated stream.
    ///
    /// The MAC must have a block size (for the domain priming blocks)
    /// and a fixed tag length.
    pub fn new(stream: Arc<dyn StreamAlgo>, mac: Arc<dyn MacAlgo>) -> Result<Self, Error> {
        let s = stream.caps();
        let m = mac.caps();
        if m.block_size == 0 {
            return Err(Error::Unsupported("eax over a mac without a block size"));
        }
        if m.max_tag == 0 || m.max_tag == UNBOUNDED {
            return Err(Error::Unsupported("eax over a mac without a fixed tag length"));
        }
        let caps = Caps {
            max_key: s.max_key.saturating_add(m.max_key),
            max_iv: UNBOUNDED,
            max_tag: m.max_tag.min(m.block_size),
            block_size: s.block_size,
            multof: s.multof,
            max_rounds: s.max_rounds.min(m.max_rounds),
            default_rounds: 0,
        };
        let name = format!("eax({},{})", stream.name(), mac.name());
        Ok(Self { stream, mac, caps, name })
    }
}

// MAC-key prefix, stream-key suffix.
fn split_key(key: &[u8], stream_max: usize) -> (&[u8], &[u8]) {
    let stream_len = key.len().div_ceil(2).min(stream_max);
    key.split_at(key.len() - stream_len)
}

struct Parts {
    stream: Stream,
    header_mac: Mac,
    data_mac: Mac,
    nonce_tag: SecretBytes,
}

fn build(
    stream_algo: &Arc<dyn StreamAlgo>,
    mac_algo: &Arc<dyn MacAlgo>,
    params: &Params<'_>,
) -> Result<Parts, Error> {
    let m = mac_algo.caps();
    let (mac_key, stream_key) = split_key(params.key, stream_algo.caps().max_key);
    let mac_params = Params::new(mac_key).with_rounds(params.rounds);

    let domain = |number: u8| -> Result<Mac, Error> {
        let mut mac = Mac::create(Arc::clone(mac_algo), &mac_params)?;
        let mut block = vec![0u8; m.block_size];
        block[m.block_size - 1] = number;
        mac.update(&block)?;
        Ok(mac)
    };

    // Domain 0 turns the caller's nonce (any length) into the working IV.
    let mut nonce_mac = domain(0)?;
    nonce_mac.update(params.iv)?;
    let mut nonce_tag = SecretBytes::zeroed(m.max_tag);
    nonce_mac.tag(&mut nonce_tag)?;

    let header_mac = domain(1)?;
    let data_mac = domain(2)?;

    let iv_len = nonce_tag.len().min(stream_algo.caps().max_iv);
    let stream = Stream::create(
        Arc::clone(stream_algo),
        &Params::new(stream_key).with_iv(&nonce_tag[..iv_len]).with_rounds(params.rounds),
    )?;
    Ok(Parts { stream, header_mac, data_mac, nonce_tag })
}

impl AeadAlgo for Eax {
    fn name(&self) -> &str {
        &self.name
    }

    fn caps(&self) -> Caps {
        self.caps
    }

    fn create(&self, params: &Params<'_>) -> Result<Box<dyn AeadState>, Error> {
        let parts = build(&self.stream, &self.mac, params)?;
        Ok(Box::new(EaxState {
            stream_algo: Arc::clone(&self.stream),
            mac_algo: Arc::clone(&self.mac),
            stream: parts.stream,
            header_mac: parts.header_mac,
            data_mac: parts.data_mac,
            nonce_tag: parts.nonce_tag,
            tag: None,
            offset: 0,
        }))
    }
}

struct EaxState {
    stream_algo: Arc<dyn StreamAlgo>,
    mac_algo: Arc<dyn MacAlgo>,
    stream: Stream,
    header_mac: Mac,
    data_mac: Mac,
    nonce_tag: SecretBytes,
    tag: Option<SecretBytes>,
    offset: usize,
}

impl AeadState for EaxState {
    fn aad(&mut self, data: &[u8]) -> Result<(), Error> {
        self.header_mac.update(data)
    }

    fn encrypt(&mut self, data: &mut [u8]) -> Result<(), Error> {
        self.stream.encrypt(data)?;
        self.data_mac.update(data)
    }

    fn decrypt(&mut self, data: &mut [u8]) -> Result<(), Error> {
        // The authenticator sees the ciphertext on both directions.
        self.data_mac.update(data)?;
        self.stream.decrypt(data)
    }

    fn tag(&mut self, out: &mut [u8]) -> Result<(), Error> {
        if self.tag.is_none() {
            let len = self.nonce_tag.len();
            let mut combined = SecretBytes::zeroed(len);
            self.data_mac.tag(&mut combined)?;

            let mut header = SecretBytes::zeroed(len);
            self.header_mac.tag(&mut header)?;
            combined.xor_assign(&header);
            combined.xor_assign(&self.nonce_tag);
            self.tag = Some(combined);
        }
        let Some(tag) = self.tag.as_ref() else {
            return Err(Error::Finalized { operation: "tag" });
        };
        let end = self.offset + out.len();
        let Some(slice) = tag.get(self.offset..end) else {
            return Err(Error::TagTooLong { len: end, max: tag.len() });
        };
        out.copy_from_slice(slice);
        self.offset = end;
        Ok(())
    }

    fn rekey(&mut self, params: &Params<'_>) -> Result<(), Error> {
        let parts = build(&self.stream_algo, &self.mac_algo, params)?;
        self.stream = parts.stream;
        self.header_mac = parts.header_mac;
        self.data_mac = parts.data_mac;
        self.nonce_tag = parts.nonce_tag;
        self.tag = None;
        self.offset = 0;
        Ok(())
    }
}
