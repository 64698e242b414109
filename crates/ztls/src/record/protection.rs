//! Per-direction record protection built from a suite descriptor.
//!
//! Stream fragment = encrypted(plaintext || MAC)
//! CBC fragment    = [explicit_IV ||] encrypted(plaintext || MAC || padding)
//! AEAD fragment   = explicit_nonce(8) || ciphertext || tag(16)
//!
//! MAC input is seq(8) || type(1) || version(2) || length(2) || plaintext.
//! AEAD additional data is the same prefix without the plaintext.

use subtle::{Choice, ConstantTimeEq};
use ztls_types::{CryptoError, TlsError};

use super::{
    record_header, ContentType, MAX_CIPHERTEXT_LENGTH, MAX_PLAINTEXT_LENGTH, RECORD_HEADER_LEN,
};
use crate::crypt::aead::{new_aead, FixedNonceAead, EXPLICIT_NONCE_LEN, TAG_LEN};
use crate::crypt::cipher::{new_cipher, CipherDirection, CipherState};
use crate::crypt::mac::RecordMac;
use crate::crypt::{CipherSuiteDescriptor, SuiteProtection};
use crate::{CipherSuite, ProtocolVersion};

/// Largest block size among the bulk ciphers.
const MAX_BLOCK_SIZE: usize = 16;

enum Protection {
    Cipher { cipher: CipherState, mac: RecordMac },
    Aead(FixedNonceAead),
}

fn check_len(expected: usize, got: usize) -> Result<(), TlsError> {
    if expected != got {
        return Err(CryptoError::InvalidKeyLength { expected, got }.into());
    }
    Ok(())
}

fn build_protection(
    descriptor: &CipherSuiteDescriptor,
    version: ProtocolVersion,
    key: &[u8],
    mac_key: &[u8],
    iv: &[u8],
    direction: CipherDirection,
) -> Result<Protection, TlsError> {
    check_len(descriptor.key_len, key.len())?;
    check_len(descriptor.mac_len, mac_key.len())?;
    if iv.len() != descriptor.iv_len {
        return Err(CryptoError::InvalidIvLength {
            expected: descriptor.iv_len,
            got: iv.len(),
        }
        .into());
    }

    let protection = match descriptor.protection {
        SuiteProtection::Cipher { cipher, mac } => Protection::Cipher {
            cipher: new_cipher(cipher, key, iv, direction)?,
            mac: RecordMac::new(version, mac, mac_key)?,
        },
        SuiteProtection::Aead(alg) => Protection::Aead(new_aead(alg, key, iv)?),
    };
    tracing::debug!(
        "record protection ready: suite {} {:?} {:?}",
        descriptor.id,
        version,
        direction
    );
    Ok(protection)
}

fn next_seq(seq: &mut u64) -> Result<[u8; 8], TlsError> {
    if *seq == u64::MAX {
        return Err(TlsError::RecordError("sequence number overflow".into()));
    }
    let current = seq.to_be_bytes();
    *seq += 1;
    Ok(current)
}

/// Write-side record protection.
pub struct RecordSealer {
    suite: CipherSuite,
    version: ProtocolVersion,
    protection: Protection,
    seq: u64,
}

impl RecordSealer {
    /// Key a sealer for `descriptor`. Key material must match the
    /// descriptor's lengths exactly; `iv` is the CBC IV or the 4-byte AEAD
    /// salt, and empty for RC4.
    pub fn new(
        descriptor: &CipherSuiteDescriptor,
        version: ProtocolVersion,
        key: &[u8],
        mac_key: &[u8],
        iv: &[u8],
    ) -> Result<Self, TlsError> {
        let protection = build_protection(
            descriptor,
            version,
            key,
            mac_key,
            iv,
            CipherDirection::Encrypt,
        )?;
        Ok(Self {
            suite: descriptor.id,
            version,
            protection,
            seq: 0,
        })
    }

    pub fn suite(&self) -> CipherSuite {
        self.suite
    }

    /// Sequence number of the next record.
    pub fn sequence_number(&self) -> u64 {
        self.seq
    }

    /// Protect one plaintext fragment, returning the wire fragment.
    pub fn protect(
        &mut self,
        content_type: ContentType,
        payload: &[u8],
    ) -> Result<Vec<u8>, TlsError> {
        if payload.len() > MAX_PLAINTEXT_LENGTH {
            return Err(TlsError::RecordError("plaintext exceeds maximum".into()));
        }
        let seq = next_seq(&mut self.seq)?;
        let header = record_header(content_type, self.version, payload.len());

        let fragment = match &mut self.protection {
            Protection::Cipher { cipher, mac } => match cipher.block_size() {
                None => {
                    let mut data = Vec::with_capacity(payload.len() + mac.size());
                    data.extend_from_slice(payload);
                    data.extend_from_slice(&mac.mac(&seq, &header, payload));
                    cipher.apply_keystream(&mut data)?;
                    data
                }
                Some(block_size) => {
                    let tag = mac.mac(&seq, &header, payload);
                    let data_len = payload.len() + tag.len();
                    let pad_len = (block_size - (data_len + 1) % block_size) % block_size;
                    let mut data = Vec::with_capacity(block_size + data_len + pad_len + 1);
                    if self.version.has_explicit_cbc_iv() {
                        // A random first block becomes the IV of the rest of
                        // the record under CBC chaining.
                        let mut explicit_iv = [0u8; MAX_BLOCK_SIZE];
                        getrandom::getrandom(&mut explicit_iv[..block_size])
                            .map_err(|_| CryptoError::RandomFailed)?;
                        data.extend_from_slice(&explicit_iv[..block_size]);
                    }
                    data.extend_from_slice(payload);
                    data.extend_from_slice(&tag);
                    data.resize(data.len() + pad_len + 1, pad_len as u8);
                    cipher.encrypt_blocks(&mut data)?;
                    data
                }
            },
            Protection::Aead(aead) => {
                let mut aad = [0u8; 8 + RECORD_HEADER_LEN];
                aad[..8].copy_from_slice(&seq);
                aad[8..].copy_from_slice(&header);
                let sealed = aead.seal(&seq, payload, &aad)?;
                let mut fragment = Vec::with_capacity(EXPLICIT_NONCE_LEN + sealed.len());
                fragment.extend_from_slice(&seq);
                fragment.extend_from_slice(&sealed);
                fragment
            }
        };

        tracing::trace!(
            "sealed record: type {:?}, {} -> {} bytes",
            content_type,
            payload.len(),
            fragment.len()
        );
        Ok(fragment)
    }
}

fn auth_failure(suite: CipherSuite) -> TlsError {
    tracing::debug!("record failed to authenticate: suite {}", suite);
    TlsError::BadRecordMac
}

/// Read-side record protection.
pub struct RecordOpener {
    suite: CipherSuite,
    version: ProtocolVersion,
    protection: Protection,
    seq: u64,
}

/// Locate and check CBC padding in decrypted data. Returns the content
/// length (0 when the padding length is impossible) and whether the padding
/// is acceptable. SSL 3.0 padding bytes are arbitrary; only the length is
/// checked.
fn check_padding(data: &[u8], mac_size: usize, block_size: usize, ssl30: bool) -> (usize, Choice) {
    let pad_len = data[data.len() - 1] as usize;
    let overhead = pad_len + 1 + mac_size;
    let good_len = overhead <= data.len();
    let mut good = Choice::from(good_len as u8);

    if ssl30 {
        good &= Choice::from((pad_len < block_size) as u8);
    } else {
        let pad_start = data.len().saturating_sub(pad_len + 1);
        for b in &data[pad_start..] {
            good &= b.ct_eq(&(pad_len as u8));
        }
    }

    let content_len = if good_len { data.len() - overhead } else { 0 };
    (content_len, good)
}

impl RecordOpener {
    /// Key an opener for `descriptor`. See [`RecordSealer::new`].
    pub fn new(
        descriptor: &CipherSuiteDescriptor,
        version: ProtocolVersion,
        key: &[u8],
        mac_key: &[u8],
        iv: &[u8],
    ) -> Result<Self, TlsError> {
        let protection = build_protection(
            descriptor,
            version,
            key,
            mac_key,
            iv,
            CipherDirection::Decrypt,
        )?;
        Ok(Self {
            suite: descriptor.id,
            version,
            protection,
            seq: 0,
        })
    }

    pub fn suite(&self) -> CipherSuite {
        self.suite
    }

    /// Sequence number of the next record.
    pub fn sequence_number(&self) -> u64 {
        self.seq
    }

    /// Verify and strip protection from one wire fragment.
    ///
    /// MAC, padding and tag failures all yield [`TlsError::BadRecordMac`].
    pub fn unprotect(
        &mut self,
        content_type: ContentType,
        fragment: &[u8],
    ) -> Result<Vec<u8>, TlsError> {
        if fragment.len() > MAX_CIPHERTEXT_LENGTH {
            return Err(TlsError::RecordError("record overflow".into()));
        }
        if self.seq == u64::MAX {
            return Err(TlsError::RecordError("sequence number overflow".into()));
        }
        let seq = self.seq.to_be_bytes();
        let suite = self.suite;
        let version = self.version;

        let plaintext = match &mut self.protection {
            Protection::Cipher { cipher, mac } => {
                let mac_size = mac.size();
                match cipher.block_size() {
                    None => {
                        if fragment.len() < mac_size {
                            return Err(auth_failure(suite));
                        }
                        let mut data = fragment.to_vec();
                        cipher.apply_keystream(&mut data)?;
                        let content_len = data.len() - mac_size;
                        let header = record_header(content_type, version, content_len);
                        let expected = mac.mac(&seq, &header, &data[..content_len]);
                        if !bool::from(data[content_len..].ct_eq(&expected)) {
                            return Err(auth_failure(suite));
                        }
                        data.truncate(content_len);
                        data
                    }
                    Some(block_size) => {
                        let prefix = if version.has_explicit_cbc_iv() {
                            block_size
                        } else {
                            0
                        };
                        let min_len = prefix + (mac_size + 1).div_ceil(block_size) * block_size;
                        if fragment.len() < min_len || fragment.len() % block_size != 0 {
                            return Err(auth_failure(suite));
                        }
                        let mut decrypted = fragment.to_vec();
                        cipher.decrypt_blocks(&mut decrypted)?;
                        let data = &decrypted[prefix..];

                        let (content_len, pad_ok) =
                            check_padding(data, mac_size, block_size, version.is_ssl30());
                        // Always compute the MAC so a bad pad costs the same.
                        let header = record_header(content_type, version, content_len);
                        let expected = mac.mac(&seq, &header, &data[..content_len]);
                        let received = &data[content_len..content_len + mac_size];
                        let ok = pad_ok & received.ct_eq(&expected);
                        if !bool::from(ok) {
                            return Err(auth_failure(suite));
                        }
                        data[..content_len].to_vec()
                    }
                }
            }
            Protection::Aead(aead) => {
                if fragment.len() < EXPLICIT_NONCE_LEN + TAG_LEN {
                    return Err(auth_failure(suite));
                }
                let (explicit, sealed) = fragment.split_at(EXPLICIT_NONCE_LEN);
                let mut explicit_nonce = [0u8; EXPLICIT_NONCE_LEN];
                explicit_nonce.copy_from_slice(explicit);
                let header = record_header(content_type, version, sealed.len() - TAG_LEN);
                let mut aad = [0u8; 8 + RECORD_HEADER_LEN];
                aad[..8].copy_from_slice(&seq);
                aad[8..].copy_from_slice(&header);
                aead.open(&explicit_nonce, sealed, &aad)?
            }
        };

        if plaintext.len() > MAX_PLAINTEXT_LENGTH {
            return Err(TlsError::RecordError("record overflow".into()));
        }
        self.seq += 1;
        tracing::trace!(
            "opened record: type {:?}, {} -> {} bytes",
            content_type,
            fragment.len(),
            plaintext.len()
        );
        Ok(plaintext)
    }
}
