#![forbid(unsafe_code)]
#![doc = "Cipher-suite registry and record-protection primitives for the ztls handshake engine."]

pub mod config;
pub mod crypt;
pub mod negotiate;
pub mod record;
pub mod suite_lists;

pub use ztls_types::{CryptoError, TlsError};

/// Protocol versions the engine can speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProtocolVersion {
    Ssl30,
    Tls10,
    Tls11,
    Tls12,
}

impl ProtocolVersion {
    /// The 16-bit value carried in record and handshake headers.
    pub fn wire(self) -> u16 {
        match self {
            ProtocolVersion::Ssl30 => 0x0300,
            ProtocolVersion::Tls10 => 0x0301,
            ProtocolVersion::Tls11 => 0x0302,
            ProtocolVersion::Tls12 => 0x0303,
        }
    }

    pub fn from_wire(value: u16) -> Option<Self> {
        match value {
            0x0300 => Some(ProtocolVersion::Ssl30),
            0x0301 => Some(ProtocolVersion::Tls10),
            0x0302 => Some(ProtocolVersion::Tls11),
            0x0303 => Some(ProtocolVersion::Tls12),
            _ => None,
        }
    }

    /// SSL 3.0 authenticates records with the legacy digest MAC.
    pub fn is_ssl30(self) -> bool {
        self == ProtocolVersion::Ssl30
    }

    /// Gate for suites flagged as TLS 1.2 only.
    pub fn is_tls12_or_later(self) -> bool {
        self >= ProtocolVersion::Tls12
    }

    /// TLS 1.1 and later send an explicit IV with every CBC record.
    pub fn has_explicit_cbc_iv(self) -> bool {
        self >= ProtocolVersion::Tls11
    }
}

/// TLS cipher suite identifier (IANA TLS Cipher Suite registry).
///
/// Unknown values are representable: peers and client profiles routinely
/// name suites this engine does not implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CipherSuite(pub u16);

impl CipherSuite {
    // Suites with a descriptor in the registry
    pub const TLS_RSA_WITH_RC4_128_SHA: Self = Self(0x0005);
    pub const TLS_RSA_WITH_3DES_EDE_CBC_SHA: Self = Self(0x000a);
    pub const TLS_RSA_WITH_AES_128_CBC_SHA: Self = Self(0x002f);
    pub const TLS_RSA_WITH_AES_256_CBC_SHA: Self = Self(0x0035);
    pub const TLS_RSA_WITH_AES_128_GCM_SHA256: Self = Self(0x009c);
    pub const TLS_ECDHE_ECDSA_WITH_RC4_128_SHA: Self = Self(0xc007);
    pub const TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA: Self = Self(0xc009);
    pub const TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA: Self = Self(0xc00a);
    pub const TLS_ECDHE_RSA_WITH_RC4_128_SHA: Self = Self(0xc011);
    pub const TLS_ECDHE_RSA_WITH_3DES_EDE_CBC_SHA: Self = Self(0xc012);
    pub const TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA: Self = Self(0xc013);
    pub const TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA: Self = Self(0xc014);
    pub const TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256: Self = Self(0xc02f);
    pub const TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256: Self = Self(0xc02b);
    pub const TLS_RSA_WITH_RC4_128_MD5: Self = Self(0x0004);

    // Export suites
    pub const TLS_RSA_EXPORT_WITH_RC4_40_MD5: Self = Self(0x0003);
    pub const TLS_RSA_EXPORT_WITH_RC2_CBC_40_MD5: Self = Self(0x0006);
    pub const TLS_RSA_EXPORT_WITH_DES40_CBC_SHA: Self = Self(0x0008);
    pub const TLS_DH_DSS_EXPORT_WITH_DES40_CBC_SHA: Self = Self(0x000b);
    pub const TLS_DH_RSA_EXPORT_WITH_DES40_CBC_SHA: Self = Self(0x000e);
    pub const TLS_DHE_DSS_EXPORT_WITH_DES40_CBC_SHA: Self = Self(0x0011);
    pub const TLS_DHE_RSA_EXPORT_WITH_DES40_CBC_SHA: Self = Self(0x0014);
    pub const TLS_DH_ANON_EXPORT_WITH_RC4_40_MD5: Self = Self(0x0017);
    pub const TLS_DH_ANON_EXPORT_WITH_DES40_CBC_SHA: Self = Self(0x0019);
    pub const TLS_KRB5_EXPORT_WITH_DES_CBC_40_SHA: Self = Self(0x0026);
    pub const TLS_KRB5_EXPORT_WITH_RC2_CBC_40_SHA: Self = Self(0x0027);
    pub const TLS_KRB5_EXPORT_WITH_RC4_40_SHA: Self = Self(0x0028);
    pub const TLS_KRB5_EXPORT_WITH_DES_CBC_40_MD5: Self = Self(0x0029);
    pub const TLS_KRB5_EXPORT_WITH_RC2_CBC_40_MD5: Self = Self(0x002a);
    pub const TLS_KRB5_EXPORT_WITH_RC4_40_MD5: Self = Self(0x002b);
    pub const TLS_RSA_EXPORT1024_WITH_RC4_56_MD5: Self = Self(0x0060);
    pub const TLS_RSA_EXPORT1024_WITH_RC2_CBC_56_MD5: Self = Self(0x0061);
    pub const TLS_RSA_EXPORT1024_WITH_DES_CBC_SHA: Self = Self(0x0062);
    pub const TLS_DHE_DSS_EXPORT1024_WITH_DES_CBC_SHA: Self = Self(0x0063);
    pub const TLS_RSA_EXPORT1024_WITH_RC4_56_SHA: Self = Self(0x0064);
    pub const TLS_DHE_DSS_EXPORT1024_WITH_RC4_56_SHA: Self = Self(0x0065);

    // DHE suites
    pub const TLS_DHE_DSS_WITH_DES_CBC_SHA: Self = Self(0x0012);
    pub const TLS_DHE_DSS_WITH_3DES_EDE_CBC_SHA: Self = Self(0x0013);
    pub const TLS_DHE_RSA_WITH_DES_CBC_SHA: Self = Self(0x0015);
    pub const TLS_DHE_RSA_WITH_3DES_EDE_CBC_SHA: Self = Self(0x0016);
    pub const TLS_DHE_DSS_WITH_AES_128_CBC_SHA: Self = Self(0x0032);
    pub const TLS_DHE_RSA_WITH_AES_128_CBC_SHA: Self = Self(0x0033);
    pub const TLS_DHE_DSS_WITH_AES_256_CBC_SHA: Self = Self(0x0038);
    pub const TLS_DHE_RSA_WITH_AES_256_CBC_SHA: Self = Self(0x0039);
    pub const TLS_DHE_DSS_WITH_AES_128_CBC_SHA256: Self = Self(0x0040);
    pub const TLS_DHE_DSS_WITH_CAMELLIA_128_CBC_SHA: Self = Self(0x0044);
    pub const TLS_DHE_RSA_WITH_CAMELLIA_128_CBC_SHA: Self = Self(0x0045);
    pub const TLS_DHE_DSS_WITH_RC4_128_SHA: Self = Self(0x0066);
    pub const TLS_DHE_RSA_WITH_AES_128_CBC_SHA256: Self = Self(0x0067);
    pub const TLS_DHE_DSS_WITH_AES_256_CBC_SHA256: Self = Self(0x006a);
    pub const TLS_DHE_RSA_WITH_AES_256_CBC_SHA256: Self = Self(0x006b);
    pub const TLS_DHE_DSS_WITH_CAMELLIA_256_CBC_SHA: Self = Self(0x0087);
    pub const TLS_DHE_RSA_WITH_CAMELLIA_256_CBC_SHA: Self = Self(0x0088);
    pub const TLS_DHE_DSS_WITH_SEED_CBC_SHA: Self = Self(0x0099);
    pub const TLS_DHE_RSA_WITH_SEED_CBC_SHA: Self = Self(0x009a);
    pub const TLS_DHE_RSA_WITH_AES_128_GCM_SHA256: Self = Self(0x009e);
    pub const TLS_DHE_RSA_WITH_AES_256_GCM_SHA384: Self = Self(0x009f);
    pub const TLS_DHE_DSS_WITH_AES_128_GCM_SHA256: Self = Self(0x00a2);
    pub const TLS_DHE_DSS_WITH_AES_256_GCM_SHA384: Self = Self(0x00a3);
    pub const TLS_DHE_DSS_WITH_CAMELLIA_128_CBC_SHA256: Self = Self(0x00bd);
    pub const TLS_DHE_RSA_WITH_CAMELLIA_128_CBC_SHA256: Self = Self(0x00be);
    pub const TLS_DHE_DSS_WITH_CAMELLIA_256_CBC_SHA256: Self = Self(0x00c3);
    pub const TLS_DHE_RSA_WITH_CAMELLIA_256_CBC_SHA256: Self = Self(0x00c4);
    pub const TLS_DHE_DSS_WITH_ARIA_128_CBC_SHA256: Self = Self(0xc042);
    pub const TLS_DHE_DSS_WITH_ARIA_256_CBC_SHA384: Self = Self(0xc043);
    pub const TLS_DHE_RSA_WITH_ARIA_128_CBC_SHA256: Self = Self(0xc044);
    pub const TLS_DHE_RSA_WITH_ARIA_256_CBC_SHA384: Self = Self(0xc045);
    pub const TLS_DHE_RSA_WITH_ARIA_128_GCM_SHA256: Self = Self(0xc052);
    pub const TLS_DHE_RSA_WITH_ARIA_256_GCM_SHA384: Self = Self(0xc053);
    pub const TLS_DHE_DSS_WITH_ARIA_128_GCM_SHA256: Self = Self(0xc056);
    pub const TLS_DHE_DSS_WITH_ARIA_256_GCM_SHA384: Self = Self(0xc057);
    pub const TLS_DHE_RSA_WITH_CAMELLIA_128_GCM_SHA256: Self = Self(0xc07c);
    pub const TLS_DHE_RSA_WITH_CAMELLIA_256_GCM_SHA384: Self = Self(0xc07d);
    pub const TLS_DHE_DSS_WITH_CAMELLIA_128_GCM_SHA256: Self = Self(0xc080);
    pub const TLS_DHE_DSS_WITH_CAMELLIA_256_GCM_SHA384: Self = Self(0xc081);
    pub const TLS_DHE_RSA_WITH_AES_128_CCM: Self = Self(0xc09e);
    pub const TLS_DHE_RSA_WITH_AES_256_CCM: Self = Self(0xc09f);
    pub const TLS_DHE_RSA_WITH_AES_128_CCM_8: Self = Self(0xc0a2);
    pub const TLS_DHE_RSA_WITH_AES_256_CCM_8: Self = Self(0xc0a3);

    // ChaCha20-Poly1305 suites, pre-RFC 7905 draft code points as sent by
    // the browsers profiled in `suite_lists`.
    pub const TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256: Self = Self(0xcc13);
    pub const TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256: Self = Self(0xcc14);
    pub const TLS_DHE_RSA_WITH_CHACHA20_POLY1305_SHA256: Self = Self(0xcc15);
}

impl std::fmt::Display for CipherSuite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:04x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_version_wire_roundtrip() {
        for v in [
            ProtocolVersion::Ssl30,
            ProtocolVersion::Tls10,
            ProtocolVersion::Tls11,
            ProtocolVersion::Tls12,
        ] {
            assert_eq!(ProtocolVersion::from_wire(v.wire()), Some(v));
        }
        assert_eq!(ProtocolVersion::from_wire(0x0304), None);
    }

    #[test]
    fn test_protocol_version_gates() {
        assert!(ProtocolVersion::Ssl30.is_ssl30());
        assert!(!ProtocolVersion::Tls10.is_ssl30());
        assert!(!ProtocolVersion::Tls11.is_tls12_or_later());
        assert!(ProtocolVersion::Tls12.is_tls12_or_later());
        assert!(!ProtocolVersion::Tls10.has_explicit_cbc_iv());
        assert!(ProtocolVersion::Tls11.has_explicit_cbc_iv());
    }

    #[test]
    fn test_cipher_suite_display() {
        assert_eq!(
            CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256.to_string(),
            "0xc02f"
        );
        assert_eq!(CipherSuite::TLS_RSA_WITH_RC4_128_SHA.to_string(), "0x0005");
    }
}
