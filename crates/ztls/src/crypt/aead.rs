//! TLS 1.2 AEAD with a fixed nonce prefix.
//!
//! The 12-byte GCM nonce is the 4-byte salt from the key block followed by
//! the 8-byte explicit nonce carried in each record. Sealing and opening use
//! separate nonce buffers, so one instance can serve both directions at once
//! through [`FixedNonceAead::split`].

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes128Gcm, Aes256Gcm, Nonce};
use zeroize::Zeroize;
use ztls_types::{CryptoError, TlsError};

use super::AeadAlg;

/// Length of the per-connection salt.
pub const FIXED_NONCE_LEN: usize = 4;
/// Length of the per-record explicit nonce.
pub const EXPLICIT_NONCE_LEN: usize = 8;
/// GCM tag length.
pub const TAG_LEN: usize = 16;

const NONCE_LEN: usize = FIXED_NONCE_LEN + EXPLICIT_NONCE_LEN;

/// Trait for record-layer AEAD primitives.
pub trait TlsAead: Send + Sync {
    /// Encrypt plaintext. Returns `ciphertext || tag`.
    fn encrypt(&self, nonce: &[u8], aad: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, TlsError>;

    /// Decrypt `ciphertext || tag`. Returns plaintext.
    fn decrypt(
        &self,
        nonce: &[u8],
        aad: &[u8],
        ciphertext_with_tag: &[u8],
    ) -> Result<Vec<u8>, TlsError>;

    /// Tag size in bytes.
    fn tag_size(&self) -> usize;
}

/// AES-GCM (128-bit or 256-bit key).
pub enum AesGcmAead {
    Aes128(Box<Aes128Gcm>),
    Aes256(Box<Aes256Gcm>),
}

impl AesGcmAead {
    pub fn new(alg: AeadAlg, key: &[u8]) -> Result<Self, TlsError> {
        if key.len() != alg.key_len() {
            return Err(CryptoError::InvalidKeyLength {
                expected: alg.key_len(),
                got: key.len(),
            }
            .into());
        }
        let bad_len = |_| CryptoError::InvalidArg;
        Ok(match alg {
            AeadAlg::Aes128Gcm => {
                AesGcmAead::Aes128(Box::new(Aes128Gcm::new_from_slice(key).map_err(bad_len)?))
            }
            AeadAlg::Aes256Gcm => {
                AesGcmAead::Aes256(Box::new(Aes256Gcm::new_from_slice(key).map_err(bad_len)?))
            }
        })
    }
}

impl TlsAead for AesGcmAead {
    fn encrypt(&self, nonce: &[u8], aad: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, TlsError> {
        if nonce.len() != NONCE_LEN {
            return Err(CryptoError::InvalidArg.into());
        }
        let nonce = Nonce::from_slice(nonce);
        let payload = Payload {
            msg: plaintext,
            aad,
        };
        let sealed = match self {
            AesGcmAead::Aes128(c) => c.encrypt(nonce, payload),
            AesGcmAead::Aes256(c) => c.encrypt(nonce, payload),
        };
        // aes-gcm only refuses inputs beyond the GCM length limit.
        sealed.map_err(|_| TlsError::RecordError("aead: plaintext too long".into()))
    }

    fn decrypt(
        &self,
        nonce: &[u8],
        aad: &[u8],
        ciphertext_with_tag: &[u8],
    ) -> Result<Vec<u8>, TlsError> {
        if nonce.len() != NONCE_LEN {
            return Err(CryptoError::InvalidArg.into());
        }
        let nonce = Nonce::from_slice(nonce);
        let payload = Payload {
            msg: ciphertext_with_tag,
            aad,
        };
        let opened = match self {
            AesGcmAead::Aes128(c) => c.decrypt(nonce, payload),
            AesGcmAead::Aes256(c) => c.decrypt(nonce, payload),
        };
        opened.map_err(|_| CryptoError::AeadTagVerifyFail.into())
    }

    fn tag_size(&self) -> usize {
        TAG_LEN
    }
}

fn seal_with(
    aead: &dyn TlsAead,
    nonce: &mut [u8; NONCE_LEN],
    explicit_nonce: &[u8; EXPLICIT_NONCE_LEN],
    plaintext: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>, TlsError> {
    nonce[FIXED_NONCE_LEN..].copy_from_slice(explicit_nonce);
    aead.encrypt(&nonce[..], aad, plaintext)
}

fn open_with(
    aead: &dyn TlsAead,
    nonce: &mut [u8; NONCE_LEN],
    explicit_nonce: &[u8; EXPLICIT_NONCE_LEN],
    ciphertext: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>, TlsError> {
    nonce[FIXED_NONCE_LEN..].copy_from_slice(explicit_nonce);
    // Fail closed: the caller learns only that the record did not verify.
    aead.decrypt(&nonce[..], aad, ciphertext).map_err(|_| {
        tracing::debug!("aead record failed to authenticate");
        TlsError::BadRecordMac
    })
}

/// An AEAD keyed with a 4-byte fixed nonce prefix.
pub struct FixedNonceAead {
    aead: Box<dyn TlsAead>,
    seal_nonce: [u8; NONCE_LEN],
    open_nonce: [u8; NONCE_LEN],
}

impl std::fmt::Debug for FixedNonceAead {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedNonceAead").finish_non_exhaustive()
    }
}

impl Drop for FixedNonceAead {
    fn drop(&mut self) {
        self.seal_nonce.zeroize();
        self.open_nonce.zeroize();
    }
}

/// Build the AEAD for an AEAD suite from its key and 4-byte fixed nonce.
pub fn new_aead(alg: AeadAlg, key: &[u8], fixed_nonce: &[u8]) -> Result<FixedNonceAead, TlsError> {
    let aead = AesGcmAead::new(alg, key)?;
    FixedNonceAead::new(Box::new(aead), fixed_nonce)
}

impl FixedNonceAead {
    pub fn new(aead: Box<dyn TlsAead>, fixed_nonce: &[u8]) -> Result<Self, TlsError> {
        if fixed_nonce.len() != FIXED_NONCE_LEN {
            return Err(CryptoError::InvalidIvLength {
                expected: FIXED_NONCE_LEN,
                got: fixed_nonce.len(),
            }
            .into());
        }
        let mut seal_nonce = [0u8; NONCE_LEN];
        seal_nonce[..FIXED_NONCE_LEN].copy_from_slice(fixed_nonce);
        Ok(Self {
            aead,
            seal_nonce,
            open_nonce: seal_nonce,
        })
    }

    /// Bytes of explicit nonce carried per record.
    pub fn nonce_size(&self) -> usize {
        EXPLICIT_NONCE_LEN
    }

    /// Bytes added to the plaintext by sealing.
    pub fn overhead(&self) -> usize {
        self.aead.tag_size()
    }

    /// Encrypt `plaintext`, returning `ciphertext || tag`.
    pub fn seal(
        &mut self,
        explicit_nonce: &[u8; EXPLICIT_NONCE_LEN],
        plaintext: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, TlsError> {
        seal_with(
            self.aead.as_ref(),
            &mut self.seal_nonce,
            explicit_nonce,
            plaintext,
            aad,
        )
    }

    /// Verify and decrypt `ciphertext || tag`. Any failure is reported as
    /// [`TlsError::BadRecordMac`] and no plaintext is released.
    pub fn open(
        &mut self,
        explicit_nonce: &[u8; EXPLICIT_NONCE_LEN],
        ciphertext: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, TlsError> {
        open_with(
            self.aead.as_ref(),
            &mut self.open_nonce,
            explicit_nonce,
            ciphertext,
            aad,
        )
    }

    /// Split into halves that seal and open independently.
    pub fn split(&mut self) -> (SealHalf<'_>, OpenHalf<'_>) {
        let aead = self.aead.as_ref();
        (
            SealHalf {
                aead,
                nonce: &mut self.seal_nonce,
            },
            OpenHalf {
                aead,
                nonce: &mut self.open_nonce,
            },
        )
    }
}

/// Sealing side of a split [`FixedNonceAead`].
pub struct SealHalf<'a> {
    aead: &'a dyn TlsAead,
    nonce: &'a mut [u8; NONCE_LEN],
}

impl SealHalf<'_> {
    pub fn seal(
        &mut self,
        explicit_nonce: &[u8; EXPLICIT_NONCE_LEN],
        plaintext: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, TlsError> {
        seal_with(self.aead, self.nonce, explicit_nonce, plaintext, aad)
    }
}

/// Opening side of a split [`FixedNonceAead`].
pub struct OpenHalf<'a> {
    aead: &'a dyn TlsAead,
    nonce: &'a mut [u8; NONCE_LEN],
}

impl OpenHalf<'_> {
    pub fn open(
        &mut self,
        explicit_nonce: &[u8; EXPLICIT_NONCE_LEN],
        ciphertext: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, TlsError> {
        open_with(self.aead, self.nonce, explicit_nonce, ciphertext, aad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn gcm128_zero_key() -> FixedNonceAead {
        new_aead(AeadAlg::Aes128Gcm, &[0u8; 16], &[0u8; 4]).unwrap()
    }

    #[test]
    fn test_gcm_test_case_1_empty_plaintext() {
        let mut aead = gcm128_zero_key();
        let sealed = aead.seal(&[0u8; 8], &[], &[]).unwrap();
        assert_eq!(hex::encode(&sealed), "58e2fccefa7e3061367f1d57a4e7455a");
        assert!(aead.open(&[0u8; 8], &sealed, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_gcm_test_case_2_one_block() {
        let mut aead = gcm128_zero_key();
        let sealed = aead.seal(&[0u8; 8], &[0u8; 16], &[]).unwrap();
        assert_eq!(
            hex::encode(&sealed),
            "0388dace60b6a392f328c2b971b2fe78ab6e47d42cec13bdf53a67b21257bddf"
        );
    }

    #[test]
    fn test_sizes() {
        let aead = new_aead(AeadAlg::Aes256Gcm, &[1u8; 32], &[2u8; 4]).unwrap();
        assert_eq!(aead.nonce_size(), 8);
        assert_eq!(aead.overhead(), 16);
    }

    #[test]
    fn test_bad_key_and_salt_lengths() {
        assert!(matches!(
            new_aead(AeadAlg::Aes128Gcm, &[0u8; 32], &[0u8; 4]),
            Err(TlsError::CryptoError(CryptoError::InvalidKeyLength {
                expected: 16,
                got: 32
            }))
        ));
        assert!(matches!(
            new_aead(AeadAlg::Aes128Gcm, &[0u8; 16], &[0u8; 12]),
            Err(TlsError::CryptoError(CryptoError::InvalidIvLength {
                expected: 4,
                got: 12
            }))
        ));
    }

    #[test]
    fn test_wrong_aad_or_nonce_rejected() {
        let mut aead = new_aead(AeadAlg::Aes128Gcm, &[9u8; 16], &[1, 2, 3, 4]).unwrap();
        let explicit = 5u64.to_be_bytes();
        let sealed = aead.seal(&explicit, b"record body", b"aad-1").unwrap();

        assert!(matches!(
            aead.open(&explicit, &sealed, b"aad-2"),
            Err(TlsError::BadRecordMac)
        ));
        assert!(matches!(
            aead.open(&6u64.to_be_bytes(), &sealed, b"aad-1"),
            Err(TlsError::BadRecordMac)
        ));
        assert!(matches!(
            aead.open(&explicit, &sealed[..TAG_LEN - 1], b"aad-1"),
            Err(TlsError::BadRecordMac)
        ));
        assert_eq!(
            aead.open(&explicit, &sealed, b"aad-1").unwrap(),
            b"record body"
        );
    }

    #[test]
    fn test_fixed_salt_matters() {
        let mut a = new_aead(AeadAlg::Aes128Gcm, &[9u8; 16], &[1, 2, 3, 4]).unwrap();
        let mut b = new_aead(AeadAlg::Aes128Gcm, &[9u8; 16], &[1, 2, 3, 5]).unwrap();
        let sealed = a.seal(&[0u8; 8], b"x", &[]).unwrap();
        assert!(b.open(&[0u8; 8], &sealed, &[]).is_err());
    }

    #[test]
    fn test_split_seal_and_open_concurrently() {
        let mut writer = new_aead(AeadAlg::Aes128Gcm, &[3u8; 16], &[7u8; 4]).unwrap();
        let peer_records: Vec<(u64, Vec<u8>)> = (0..64u64)
            .map(|seq| {
                let body = format!("peer record {seq}").into_bytes();
                (seq, writer.seal(&seq.to_be_bytes(), &body, b"hdr").unwrap())
            })
            .collect();

        let mut shared = new_aead(AeadAlg::Aes128Gcm, &[3u8; 16], &[7u8; 4]).unwrap();
        let (mut seal, mut open) = shared.split();
        let (sealed, opened) = std::thread::scope(|s| {
            let sealer = s.spawn(move || {
                (0..64u64)
                    .map(|seq| seal.seal(&seq.to_be_bytes(), b"local", b"hdr").unwrap())
                    .collect::<Vec<_>>()
            });
            let opener = s.spawn(move || {
                peer_records
                    .iter()
                    .map(|(seq, ct)| open.open(&seq.to_be_bytes(), ct, b"hdr").unwrap())
                    .collect::<Vec<_>>()
            });
            (sealer.join().unwrap(), opener.join().unwrap())
        });

        for (seq, body) in opened.iter().enumerate() {
            assert_eq!(body, format!("peer record {seq}").as_bytes());
        }
        let mut reader = new_aead(AeadAlg::Aes128Gcm, &[3u8; 16], &[7u8; 4]).unwrap();
        for (seq, ct) in sealed.iter().enumerate() {
            let seq = seq as u64;
            assert_eq!(reader.open(&seq.to_be_bytes(), ct, b"hdr").unwrap(), b"local");
        }
    }

    proptest! {
        #[test]
        fn prop_seal_open_roundtrip(
            key in prop::array::uniform16(any::<u8>()),
            salt in prop::array::uniform4(any::<u8>()),
            explicit in prop::array::uniform8(any::<u8>()),
            plaintext in prop::collection::vec(any::<u8>(), 0..256),
            aad in prop::collection::vec(any::<u8>(), 0..32),
        ) {
            let mut aead = new_aead(AeadAlg::Aes128Gcm, &key, &salt).unwrap();
            let sealed = aead.seal(&explicit, &plaintext, &aad).unwrap();
            prop_assert_eq!(sealed.len(), plaintext.len() + aead.overhead());
            prop_assert_eq!(aead.open(&explicit, &sealed, &aad).unwrap(), plaintext);
        }

        #[test]
        fn prop_any_bit_flip_rejected(
            plaintext in prop::collection::vec(any::<u8>(), 0..128),
            bit in any::<prop::sample::Index>(),
        ) {
            let mut aead = new_aead(AeadAlg::Aes128Gcm, &[0x42u8; 16], &[1u8; 4]).unwrap();
            let mut sealed = aead.seal(&[0u8; 8], &plaintext, b"aad").unwrap();
            let pos = bit.index(sealed.len() * 8);
            sealed[pos / 8] ^= 1 << (pos % 8);
            prop_assert!(matches!(
                aead.open(&[0u8; 8], &sealed, b"aad"),
                Err(TlsError::BadRecordMac)
            ));
        }
    }
}
