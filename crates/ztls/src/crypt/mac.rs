//! Per-record MACs for MAC-then-encrypt suites.
//!
//! SSL 3.0 uses a nested digest construction with fixed pads. TLS 1.0 and
//! later use HMAC over the sequence number, the full record header and the
//! payload.

use hmac::{Hmac, Mac};
use md5::Md5;
use sha1::{Digest, Sha1};
use zeroize::Zeroize;
use ztls_types::{CryptoError, TlsError};

use super::MacAlg;
use crate::ProtocolVersion;

const SSL30_PAD1: [u8; 48] = [0x36; 48];
const SSL30_PAD2: [u8; 48] = [0x5c; 48];

/// Length of the sequence number prefix fed to every record MAC.
pub const SEQ_LEN: usize = 8;
/// Length of the record header: type, version, length.
pub const HEADER_LEN: usize = 5;

/// Keyed HMAC state, cloned for every record.
#[derive(Clone)]
pub enum HmacState {
    Md5(Hmac<Md5>),
    Sha1(Hmac<Sha1>),
}

/// A keyed record MAC for one connection direction.
pub enum RecordMac {
    /// SSL 3.0 legacy digest MAC. The version bytes of the header are not
    /// authenticated.
    Ssl30 { alg: MacAlg, key: Vec<u8> },
    /// TLS 1.0+ HMAC, keyed once at construction.
    Tls10(HmacState),
}

impl std::fmt::Debug for RecordMac {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordMac::Ssl30 { alg, .. } => f.debug_tuple("Ssl30").field(alg).finish(),
            RecordMac::Tls10(HmacState::Md5(_)) => f.write_str("Tls10(Md5)"),
            RecordMac::Tls10(HmacState::Sha1(_)) => f.write_str("Tls10(Sha1)"),
        }
    }
}

impl Drop for RecordMac {
    fn drop(&mut self) {
        if let RecordMac::Ssl30 { key, .. } = self {
            key.zeroize();
        }
    }
}

/// Pad length for the legacy construction: 40 bytes for a 20-byte digest,
/// 48 otherwise.
pub fn ssl30_pad_len(alg: MacAlg) -> usize {
    if alg.size() == 20 {
        40
    } else {
        48
    }
}

fn ssl30_digest<D: Digest>(
    key: &[u8],
    pad_len: usize,
    seq: &[u8; SEQ_LEN],
    header: &[u8; HEADER_LEN],
    payload: &[u8],
) -> Vec<u8> {
    let mut inner = D::new();
    inner.update(key);
    inner.update(&SSL30_PAD1[..pad_len]);
    inner.update(seq);
    inner.update(&header[..1]);
    inner.update(&header[3..5]);
    inner.update(payload);
    let inner = inner.finalize();

    let mut outer = D::new();
    outer.update(key);
    outer.update(&SSL30_PAD2[..pad_len]);
    outer.update(&inner);
    outer.finalize().to_vec()
}

fn hmac_tag<M: Mac + Clone>(
    keyed: &M,
    seq: &[u8; SEQ_LEN],
    header: &[u8; HEADER_LEN],
    payload: &[u8],
) -> Vec<u8> {
    let mut mac = keyed.clone();
    mac.update(seq);
    mac.update(header);
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}

impl RecordMac {
    /// Build the MAC for `version`: the legacy construction under SSL 3.0,
    /// HMAC otherwise.
    pub fn new(version: ProtocolVersion, alg: MacAlg, key: &[u8]) -> Result<Self, TlsError> {
        if version.is_ssl30() {
            return Ok(RecordMac::Ssl30 {
                alg,
                key: key.to_vec(),
            });
        }
        let state = match alg {
            MacAlg::Md5 => HmacState::Md5(
                <Hmac<Md5> as Mac>::new_from_slice(key).map_err(|_| CryptoError::InvalidArg)?,
            ),
            MacAlg::Sha1 => HmacState::Sha1(
                <Hmac<Sha1> as Mac>::new_from_slice(key).map_err(|_| CryptoError::InvalidArg)?,
            ),
        };
        Ok(RecordMac::Tls10(state))
    }

    pub fn alg(&self) -> MacAlg {
        match self {
            RecordMac::Ssl30 { alg, .. } => *alg,
            RecordMac::Tls10(HmacState::Md5(_)) => MacAlg::Md5,
            RecordMac::Tls10(HmacState::Sha1(_)) => MacAlg::Sha1,
        }
    }

    /// Output length in bytes.
    pub fn size(&self) -> usize {
        self.alg().size()
    }

    /// Compute the MAC of one record. Each call starts from fresh state.
    pub fn mac(&self, seq: &[u8; SEQ_LEN], header: &[u8; HEADER_LEN], payload: &[u8]) -> Vec<u8> {
        match self {
            RecordMac::Ssl30 { alg, key } => {
                let pad_len = ssl30_pad_len(*alg);
                match alg {
                    MacAlg::Md5 => ssl30_digest::<Md5>(key, pad_len, seq, header, payload),
                    MacAlg::Sha1 => ssl30_digest::<Sha1>(key, pad_len, seq, header, payload),
                }
            }
            RecordMac::Tls10(HmacState::Md5(h)) => hmac_tag(h, seq, header, payload),
            RecordMac::Tls10(HmacState::Sha1(h)) => hmac_tag(h, seq, header, payload),
        }
    }
}
