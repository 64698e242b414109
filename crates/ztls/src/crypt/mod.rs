//! Cipher suite registry.
//!
//! Binds each implemented suite identifier to the shape of its key material,
//! the key agreement it needs, its applicability flags, and the primitives
//! that protect its records.

pub mod aead;
pub mod cipher;
pub mod mac;

use crate::CipherSuite;

/// Key agreement family a suite requires. The agreement itself lives in the
/// handshake engine; the registry only records which one to instantiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAgreementFamily {
    /// Client encrypts the premaster secret to the server's RSA key.
    Rsa,
    /// RSA key transport with an ephemeral 512-bit export key.
    RsaExport,
    /// Ephemeral ECDH, server parameters signed with RSA.
    EcdheRsa,
    /// Ephemeral ECDH, server parameters signed with ECDSA.
    EcdheEcdsa,
}

/// Applicability constraints, checked by the caller before a suite may be
/// offered or accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SuiteFlags(u8);

impl SuiteFlags {
    pub const NONE: Self = Self(0);
    /// Only selectable when the peer supports an acceptable curve and point
    /// format.
    pub const ECDHE: Self = Self(1 << 0);
    /// Only selectable with an ECDSA certificate; otherwise the suite is RSA
    /// authenticated.
    pub const ECDSA: Self = Self(1 << 1);
    /// Only advertised and accepted under TLS 1.2.
    pub const TLS12: Self = Self(1 << 2);

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl std::ops::BitOr for SuiteFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// Bulk cipher used by MAC-then-encrypt suites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkCipherAlg {
    Rc4_128,
    Aes128Cbc,
    Aes256Cbc,
    TripleDesCbc,
}

impl BulkCipherAlg {
    pub fn key_len(self) -> usize {
        match self {
            BulkCipherAlg::Rc4_128 | BulkCipherAlg::Aes128Cbc => 16,
            BulkCipherAlg::Aes256Cbc => 32,
            BulkCipherAlg::TripleDesCbc => 24,
        }
    }

    /// Block size in bytes, `None` for the stream cipher.
    pub fn block_size(self) -> Option<usize> {
        match self {
            BulkCipherAlg::Rc4_128 => None,
            BulkCipherAlg::Aes128Cbc | BulkCipherAlg::Aes256Cbc => Some(16),
            BulkCipherAlg::TripleDesCbc => Some(8),
        }
    }

    pub fn is_stream(self) -> bool {
        self.block_size().is_none()
    }
}

/// Digest underlying the per-record MAC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacAlg {
    Md5,
    Sha1,
}

impl MacAlg {
    /// Digest (and MAC) output length in bytes.
    pub fn size(self) -> usize {
        match self {
            MacAlg::Md5 => 16,
            MacAlg::Sha1 => 20,
        }
    }
}

/// AEAD used by AEAD suites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AeadAlg {
    Aes128Gcm,
    Aes256Gcm,
}

impl AeadAlg {
    pub fn key_len(self) -> usize {
        match self {
            AeadAlg::Aes128Gcm => 16,
            AeadAlg::Aes256Gcm => 32,
        }
    }
}

/// How a suite protects records: a cipher paired with a MAC, or an AEAD.
/// A suite is always exactly one of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteProtection {
    Cipher { cipher: BulkCipherAlg, mac: MacAlg },
    Aead(AeadAlg),
}

/// Static description of an implemented cipher suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CipherSuiteDescriptor {
    /// The cipher suite identifier.
    pub id: CipherSuite,
    /// Encryption key length in bytes.
    pub key_len: usize,
    /// MAC key length in bytes (0 for AEAD).
    pub mac_len: usize,
    /// CBC IV length, or the 4-byte fixed nonce salt for AEAD (0 for RC4).
    pub iv_len: usize,
    pub key_agreement: KeyAgreementFamily,
    pub flags: SuiteFlags,
    pub protection: SuiteProtection,
}

impl CipherSuiteDescriptor {
    pub fn cipher_factory(&self) -> Option<BulkCipherAlg> {
        match self.protection {
            SuiteProtection::Cipher { cipher, .. } => Some(cipher),
            SuiteProtection::Aead(_) => None,
        }
    }

    pub fn mac_factory(&self) -> Option<MacAlg> {
        match self.protection {
            SuiteProtection::Cipher { mac, .. } => Some(mac),
            SuiteProtection::Aead(_) => None,
        }
    }

    pub fn aead_factory(&self) -> Option<AeadAlg> {
        match self.protection {
            SuiteProtection::Aead(aead) => Some(aead),
            SuiteProtection::Cipher { .. } => None,
        }
    }

    pub fn is_aead(&self) -> bool {
        matches!(self.protection, SuiteProtection::Aead(_))
    }

    /// Total key material needed from the key block:
    /// 2*mac_key + 2*enc_key + 2*iv.
    pub fn key_block_len(&self) -> usize {
        2 * self.mac_len + 2 * self.key_len + 2 * self.iv_len
    }
}

const AES_128_GCM: SuiteProtection = SuiteProtection::Aead(AeadAlg::Aes128Gcm);

const fn with_sha1(cipher: BulkCipherAlg) -> SuiteProtection {
    SuiteProtection::Cipher {
        cipher,
        mac: MacAlg::Sha1,
    }
}

/// Implemented suites in preference order.
///
/// ECDHE comes before plain RSA, and RC4 before AES-CBC (Lucky13).
pub static CIPHER_SUITES: &[CipherSuiteDescriptor] = &[
    CipherSuiteDescriptor {
        id: CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256,
        key_len: 16,
        mac_len: 0,
        iv_len: 4,
        key_agreement: KeyAgreementFamily::EcdheRsa,
        flags: SuiteFlags::ECDHE.union(SuiteFlags::TLS12),
        protection: AES_128_GCM,
    },
    CipherSuiteDescriptor {
        id: CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256,
        key_len: 16,
        mac_len: 0,
        iv_len: 4,
        key_agreement: KeyAgreementFamily::EcdheEcdsa,
        flags: SuiteFlags::ECDHE
            .union(SuiteFlags::ECDSA)
            .union(SuiteFlags::TLS12),
        protection: AES_128_GCM,
    },
    CipherSuiteDescriptor {
        id: CipherSuite::TLS_ECDHE_RSA_WITH_RC4_128_SHA,
        key_len: 16,
        mac_len: 20,
        iv_len: 0,
        key_agreement: KeyAgreementFamily::EcdheRsa,
        flags: SuiteFlags::ECDHE,
        protection: with_sha1(BulkCipherAlg::Rc4_128),
    },
    CipherSuiteDescriptor {
        id: CipherSuite::TLS_ECDHE_ECDSA_WITH_RC4_128_SHA,
        key_len: 16,
        mac_len: 20,
        iv_len: 0,
        key_agreement: KeyAgreementFamily::EcdheEcdsa,
        flags: SuiteFlags::ECDHE.union(SuiteFlags::ECDSA),
        protection: with_sha1(BulkCipherAlg::Rc4_128),
    },
    CipherSuiteDescriptor {
        id: CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA,
        key_len: 16,
        mac_len: 20,
        iv_len: 16,
        key_agreement: KeyAgreementFamily::EcdheRsa,
        flags: SuiteFlags::ECDHE,
        protection: with_sha1(BulkCipherAlg::Aes128Cbc),
    },
    CipherSuiteDescriptor {
        id: CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA,
        key_len: 16,
        mac_len: 20,
        iv_len: 16,
        key_agreement: KeyAgreementFamily::EcdheEcdsa,
        flags: SuiteFlags::ECDHE.union(SuiteFlags::ECDSA),
        protection: with_sha1(BulkCipherAlg::Aes128Cbc),
    },
    CipherSuiteDescriptor {
        id: CipherSuite::TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA,
        key_len: 32,
        mac_len: 20,
        iv_len: 16,
        key_agreement: KeyAgreementFamily::EcdheRsa,
        flags: SuiteFlags::ECDHE,
        protection: with_sha1(BulkCipherAlg::Aes256Cbc),
    },
    CipherSuiteDescriptor {
        id: CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA,
        key_len: 32,
        mac_len: 20,
        iv_len: 16,
        key_agreement: KeyAgreementFamily::EcdheEcdsa,
        flags: SuiteFlags::ECDHE.union(SuiteFlags::ECDSA),
        protection: with_sha1(BulkCipherAlg::Aes256Cbc),
    },
    CipherSuiteDescriptor {
        id: CipherSuite::TLS_RSA_WITH_RC4_128_SHA,
        key_len: 16,
        mac_len: 20,
        iv_len: 0,
        key_agreement: KeyAgreementFamily::Rsa,
        flags: SuiteFlags::NONE,
        protection: with_sha1(BulkCipherAlg::Rc4_128),
    },
    CipherSuiteDescriptor {
        id: CipherSuite::TLS_RSA_WITH_AES_128_GCM_SHA256,
        key_len: 16,
        mac_len: 0,
        iv_len: 4,
        key_agreement: KeyAgreementFamily::Rsa,
        flags: SuiteFlags::NONE,
        protection: AES_128_GCM,
    },
    CipherSuiteDescriptor {
        id: CipherSuite::TLS_RSA_WITH_AES_128_CBC_SHA,
        key_len: 16,
        mac_len: 20,
        iv_len: 16,
        key_agreement: KeyAgreementFamily::Rsa,
        flags: SuiteFlags::NONE,
        protection: with_sha1(BulkCipherAlg::Aes128Cbc),
    },
    CipherSuiteDescriptor {
        id: CipherSuite::TLS_RSA_WITH_AES_256_CBC_SHA,
        key_len: 32,
        mac_len: 20,
        iv_len: 16,
        key_agreement: KeyAgreementFamily::Rsa,
        flags: SuiteFlags::NONE,
        protection: with_sha1(BulkCipherAlg::Aes256Cbc),
    },
    CipherSuiteDescriptor {
        id: CipherSuite::TLS_ECDHE_RSA_WITH_3DES_EDE_CBC_SHA,
        key_len: 24,
        mac_len: 20,
        iv_len: 8,
        key_agreement: KeyAgreementFamily::EcdheRsa,
        flags: SuiteFlags::ECDHE,
        protection: with_sha1(BulkCipherAlg::TripleDesCbc),
    },
    CipherSuiteDescriptor {
        id: CipherSuite::TLS_RSA_WITH_3DES_EDE_CBC_SHA,
        key_len: 24,
        mac_len: 20,
        iv_len: 8,
        key_agreement: KeyAgreementFamily::Rsa,
        flags: SuiteFlags::NONE,
        protection: with_sha1(BulkCipherAlg::TripleDesCbc),
    },
];

/// Look up the descriptor for an implemented suite.
pub fn cipher_suite_by_id(id: CipherSuite) -> Option<&'static CipherSuiteDescriptor> {
    CIPHER_SUITES.iter().find(|suite| suite.id == id)
}

/// Returns true if the registry can build record protection for `id`.
pub fn is_implemented(id: CipherSuite) -> bool {
    cipher_suite_by_id(id).is_some()
}
