//! Bulk cipher construction for MAC-then-encrypt suites.
//!
//! RC4 is a stream cipher; AES and 3DES run in CBC mode. A CBC state keeps
//! its chaining value across calls, so consecutive records continue the same
//! chain as SSL 3.0 and TLS 1.0 require. Encryption and decryption states are
//! distinct objects built from different IVs.

use aes::{Aes128, Aes256};
use cipher::consts::U16;
use cipher::generic_array::GenericArray;
use cipher::{BlockDecryptMut, BlockEncryptMut, KeyInit, KeyIvInit, StreamCipher};
use des::TdesEde3;
use rc4::Rc4;
use ztls_types::{CryptoError, TlsError};

use super::BulkCipherAlg;

/// Which of the two CBC objects to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherDirection {
    /// Write side, keyed with the local IV.
    Encrypt,
    /// Read side, keyed with the peer's IV.
    Decrypt,
}

/// CBC encryption state.
pub enum CbcEncryptor {
    Aes128(cbc::Encryptor<Aes128>),
    Aes256(cbc::Encryptor<Aes256>),
    TripleDes(cbc::Encryptor<TdesEde3>),
}

/// CBC decryption state.
pub enum CbcDecryptor {
    Aes128(cbc::Decryptor<Aes128>),
    Aes256(cbc::Decryptor<Aes256>),
    TripleDes(cbc::Decryptor<TdesEde3>),
}

/// A keyed bulk cipher bound to one connection direction.
pub enum CipherState {
    Rc4(Box<Rc4<U16>>),
    CbcEncrypt(CbcEncryptor),
    CbcDecrypt(CbcDecryptor),
}

impl std::fmt::Debug for CipherState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            CipherState::Rc4(_) => "Rc4",
            CipherState::CbcEncrypt(_) => "CbcEncrypt",
            CipherState::CbcDecrypt(_) => "CbcDecrypt",
        };
        f.debug_tuple("CipherState").field(&kind).finish()
    }
}

fn check_key(alg: BulkCipherAlg, key: &[u8]) -> Result<(), CryptoError> {
    if key.len() != alg.key_len() {
        return Err(CryptoError::InvalidKeyLength {
            expected: alg.key_len(),
            got: key.len(),
        });
    }
    Ok(())
}

/// Build the RC4 state for a stream suite.
pub fn new_stream_cipher(alg: BulkCipherAlg, key: &[u8]) -> Result<CipherState, TlsError> {
    if !alg.is_stream() {
        return Err(CryptoError::InvalidArg.into());
    }
    check_key(alg, key)?;
    let rc4 = Rc4::<U16>::new_from_slice(key).map_err(|_| CryptoError::InvalidKeyLength {
        expected: alg.key_len(),
        got: key.len(),
    })?;
    Ok(CipherState::Rc4(Box::new(rc4)))
}

/// Build a CBC encryptor or decryptor for a block suite.
pub fn new_cbc_cipher(
    alg: BulkCipherAlg,
    key: &[u8],
    iv: &[u8],
    direction: CipherDirection,
) -> Result<CipherState, TlsError> {
    let Some(block_size) = alg.block_size() else {
        return Err(CryptoError::InvalidArg.into());
    };
    check_key(alg, key)?;
    if iv.len() != block_size {
        return Err(CryptoError::InvalidIvLength {
            expected: block_size,
            got: iv.len(),
        }
        .into());
    }

    // Lengths were checked above, so new_from_slices cannot reject them.
    let bad_len = |_| CryptoError::InvalidArg;
    let state = match direction {
        CipherDirection::Encrypt => CipherState::CbcEncrypt(match alg {
            BulkCipherAlg::Aes128Cbc => {
                CbcEncryptor::Aes128(cbc::Encryptor::new_from_slices(key, iv).map_err(bad_len)?)
            }
            BulkCipherAlg::Aes256Cbc => {
                CbcEncryptor::Aes256(cbc::Encryptor::new_from_slices(key, iv).map_err(bad_len)?)
            }
            BulkCipherAlg::TripleDesCbc => CbcEncryptor::TripleDes(
                cbc::Encryptor::new_from_slices(key, iv).map_err(bad_len)?,
            ),
            BulkCipherAlg::Rc4_128 => return Err(CryptoError::InvalidArg.into()),
        }),
        CipherDirection::Decrypt => CipherState::CbcDecrypt(match alg {
            BulkCipherAlg::Aes128Cbc => {
                CbcDecryptor::Aes128(cbc::Decryptor::new_from_slices(key, iv).map_err(bad_len)?)
            }
            BulkCipherAlg::Aes256Cbc => {
                CbcDecryptor::Aes256(cbc::Decryptor::new_from_slices(key, iv).map_err(bad_len)?)
            }
            BulkCipherAlg::TripleDesCbc => CbcDecryptor::TripleDes(
                cbc::Decryptor::new_from_slices(key, iv).map_err(bad_len)?,
            ),
            BulkCipherAlg::Rc4_128 => return Err(CryptoError::InvalidArg.into()),
        }),
    };
    Ok(state)
}

/// Build whichever cipher state `alg` calls for. The IV is ignored for RC4.
pub fn new_cipher(
    alg: BulkCipherAlg,
    key: &[u8],
    iv: &[u8],
    direction: CipherDirection,
) -> Result<CipherState, TlsError> {
    if alg.is_stream() {
        new_stream_cipher(alg, key)
    } else {
        new_cbc_cipher(alg, key, iv, direction)
    }
}

fn cbc_encrypt_in_place<C: BlockEncryptMut>(
    cipher: &mut C,
    data: &mut [u8],
) -> Result<(), CryptoError> {
    let block_size = C::block_size();
    if data.len() % block_size != 0 {
        return Err(CryptoError::NotBlockAligned { block_size });
    }
    for chunk in data.chunks_exact_mut(block_size) {
        cipher.encrypt_block_mut(GenericArray::from_mut_slice(chunk));
    }
    Ok(())
}

fn cbc_decrypt_in_place<C: BlockDecryptMut>(
    cipher: &mut C,
    data: &mut [u8],
) -> Result<(), CryptoError> {
    let block_size = C::block_size();
    if data.len() % block_size != 0 {
        return Err(CryptoError::NotBlockAligned { block_size });
    }
    for chunk in data.chunks_exact_mut(block_size) {
        cipher.decrypt_block_mut(GenericArray::from_mut_slice(chunk));
    }
    Ok(())
}

impl CipherState {
    /// Block size in bytes, `None` for RC4.
    pub fn block_size(&self) -> Option<usize> {
        match self {
            CipherState::Rc4(_) => None,
            CipherState::CbcEncrypt(CbcEncryptor::TripleDes(_))
            | CipherState::CbcDecrypt(CbcDecryptor::TripleDes(_)) => Some(8),
            CipherState::CbcEncrypt(_) | CipherState::CbcDecrypt(_) => Some(16),
        }
    }

    /// XOR the RC4 keystream into `data`. Encryption and decryption are the
    /// same operation.
    pub fn apply_keystream(&mut self, data: &mut [u8]) -> Result<(), CryptoError> {
        match self {
            CipherState::Rc4(rc4) => {
                rc4.apply_keystream(data);
                Ok(())
            }
            _ => Err(CryptoError::InvalidArg),
        }
    }

    /// CBC-encrypt whole blocks in place, continuing the chain.
    pub fn encrypt_blocks(&mut self, data: &mut [u8]) -> Result<(), CryptoError> {
        match self {
            CipherState::CbcEncrypt(CbcEncryptor::Aes128(c)) => cbc_encrypt_in_place(c, data),
            CipherState::CbcEncrypt(CbcEncryptor::Aes256(c)) => cbc_encrypt_in_place(c, data),
            CipherState::CbcEncrypt(CbcEncryptor::TripleDes(c)) => cbc_encrypt_in_place(c, data),
            _ => Err(CryptoError::InvalidArg),
        }
    }

    /// CBC-decrypt whole blocks in place, continuing the chain.
    pub fn decrypt_blocks(&mut self, data: &mut [u8]) -> Result<(), CryptoError> {
        match self {
            CipherState::CbcDecrypt(CbcDecryptor::Aes128(c)) => cbc_decrypt_in_place(c, data),
            CipherState::CbcDecrypt(CbcDecryptor::Aes256(c)) => cbc_decrypt_in_place(c, data),
            CipherState::CbcDecrypt(CbcDecryptor::TripleDes(c)) => cbc_decrypt_in_place(c, data),
            _ => Err(CryptoError::InvalidArg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unhex(s: &str) -> Vec<u8> {
        hex::decode(s).unwrap()
    }

    #[test]
    fn test_aes128_cbc_sp800_38a_vector_across_calls() {
        // NIST SP 800-38A F.2.1, blocks fed one call at a time to exercise
        // chaining across calls.
        let key = unhex("2b7e151628aed2a6abf7158809cf4f3c");
        let iv = unhex("000102030405060708090a0b0c0d0e0f");
        let mut enc =
            new_cbc_cipher(BulkCipherAlg::Aes128Cbc, &key, &iv, CipherDirection::Encrypt).unwrap();

        let mut block1 = unhex("6bc1bee22e409f96e93d7e117393172a");
        let mut block2 = unhex("ae2d8a571e03ac9c9eb76fac45af8e51");
        enc.encrypt_blocks(&mut block1).unwrap();
        enc.encrypt_blocks(&mut block2).unwrap();
        assert_eq!(hex::encode(&block1), "7649abac8119b246cee98e9b12e9197d");
        assert_eq!(hex::encode(&block2), "5086cb9b507219ee95db113a917678b2");

        let mut dec =
            new_cbc_cipher(BulkCipherAlg::Aes128Cbc, &key, &iv, CipherDirection::Decrypt).unwrap();
        let mut both = [block1, block2].concat();
        dec.decrypt_blocks(&mut both).unwrap();
        assert_eq!(
            hex::encode(&both),
            "6bc1bee22e409f96e93d7e117393172aae2d8a571e03ac9c9eb76fac45af8e51"
        );
    }

    #[test]
    fn test_3des_cbc_roundtrip() {
        let key = [0x11u8; 24];
        let iv = [0x22u8; 8];
        let mut enc =
            new_cbc_cipher(BulkCipherAlg::TripleDesCbc, &key, &iv, CipherDirection::Encrypt)
                .unwrap();
        let mut dec =
            new_cbc_cipher(BulkCipherAlg::TripleDesCbc, &key, &iv, CipherDirection::Decrypt)
                .unwrap();
        assert_eq!(enc.block_size(), Some(8));

        let plaintext = b"sixteen byte msg".to_vec();
        let mut data = plaintext.clone();
        enc.encrypt_blocks(&mut data).unwrap();
        assert_ne!(data, plaintext);
        dec.decrypt_blocks(&mut data).unwrap();
        assert_eq!(data, plaintext);
    }

    #[test]
    fn test_aes256_cbc_roundtrip() {
        let key = [0x42u8; 32];
        let iv = [0x01u8; 16];
        let mut enc = new_cipher(BulkCipherAlg::Aes256Cbc, &key, &iv, CipherDirection::Encrypt)
            .unwrap();
        let mut dec = new_cipher(BulkCipherAlg::Aes256Cbc, &key, &iv, CipherDirection::Decrypt)
            .unwrap();
        let mut data = [0x5au8; 48];
        enc.encrypt_blocks(&mut data).unwrap();
        dec.decrypt_blocks(&mut data).unwrap();
        assert_eq!(data, [0x5au8; 48]);
    }

    #[test]
    fn test_rc4_roundtrip_with_independent_states() {
        let key = [0x07u8; 16];
        let mut writer = new_stream_cipher(BulkCipherAlg::Rc4_128, &key).unwrap();
        let mut reader = new_stream_cipher(BulkCipherAlg::Rc4_128, &key).unwrap();
        assert_eq!(writer.block_size(), None);

        for msg in [&b"first record"[..], &b"second record"[..]] {
            let mut data = msg.to_vec();
            writer.apply_keystream(&mut data).unwrap();
            assert_ne!(data, msg);
            reader.apply_keystream(&mut data).unwrap();
            assert_eq!(data, msg);
        }
    }

    #[test]
    fn test_wrong_key_length_rejected() {
        let err = new_cbc_cipher(
            BulkCipherAlg::Aes128Cbc,
            &[0u8; 15],
            &[0u8; 16],
            CipherDirection::Encrypt,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TlsError::CryptoError(CryptoError::InvalidKeyLength {
                expected: 16,
                got: 15
            })
        ));
        assert!(new_stream_cipher(BulkCipherAlg::Rc4_128, &[0u8; 5]).is_err());
    }

    #[test]
    fn test_wrong_iv_length_rejected() {
        let err = new_cbc_cipher(
            BulkCipherAlg::TripleDesCbc,
            &[0u8; 24],
            &[0u8; 16],
            CipherDirection::Decrypt,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TlsError::CryptoError(CryptoError::InvalidIvLength {
                expected: 8,
                got: 16
            })
        ));
    }

    #[test]
    fn test_mode_mismatch_rejected() {
        assert!(new_stream_cipher(BulkCipherAlg::Aes128Cbc, &[0u8; 16]).is_err());
        assert!(new_cbc_cipher(
            BulkCipherAlg::Rc4_128,
            &[0u8; 16],
            &[],
            CipherDirection::Encrypt
        )
        .is_err());

        let mut enc = new_cbc_cipher(
            BulkCipherAlg::Aes128Cbc,
            &[0u8; 16],
            &[0u8; 16],
            CipherDirection::Encrypt,
        )
        .unwrap();
        let mut block = [0u8; 16];
        assert!(enc.decrypt_blocks(&mut block).is_err());
        assert!(enc.apply_keystream(&mut block).is_err());
    }

    #[test]
    fn test_unaligned_input_rejected() {
        let mut enc = new_cbc_cipher(
            BulkCipherAlg::Aes128Cbc,
            &[0u8; 16],
            &[0u8; 16],
            CipherDirection::Encrypt,
        )
        .unwrap();
        let mut data = [0u8; 17];
        assert!(matches!(
            enc.encrypt_blocks(&mut data),
            Err(CryptoError::NotBlockAligned { block_size: 16 })
        ));
    }
}
