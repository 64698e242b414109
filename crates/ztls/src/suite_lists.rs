//! Named suite lists used to build client offers and classify server
//! choices.
//!
//! These are reference data: the orders match the profiled clients, and
//! several entries name suites that [`crate::crypt::CIPHER_SUITES`] does not
//! implement.

use crate::CipherSuite;

/// RSA key transport suites.
pub static RSA_CIPHERS: &[CipherSuite] = &[
    CipherSuite::TLS_RSA_WITH_RC4_128_SHA,
    CipherSuite::TLS_RSA_WITH_3DES_EDE_CBC_SHA,
    CipherSuite::TLS_RSA_WITH_AES_128_CBC_SHA,
    CipherSuite::TLS_RSA_WITH_AES_256_CBC_SHA,
    CipherSuite::TLS_RSA_WITH_AES_128_GCM_SHA256,
];

/// Finite-field DHE suites.
pub static DHE_CIPHERS: &[CipherSuite] = &[
    CipherSuite::TLS_DHE_DSS_WITH_DES_CBC_SHA,
    CipherSuite::TLS_DHE_DSS_WITH_3DES_EDE_CBC_SHA,
    CipherSuite::TLS_DHE_RSA_WITH_DES_CBC_SHA,
    CipherSuite::TLS_DHE_RSA_WITH_3DES_EDE_CBC_SHA,
    CipherSuite::TLS_DHE_DSS_WITH_AES_128_CBC_SHA,
    CipherSuite::TLS_DHE_RSA_WITH_AES_128_CBC_SHA,
    CipherSuite::TLS_DHE_DSS_WITH_AES_256_CBC_SHA,
    CipherSuite::TLS_DHE_RSA_WITH_AES_256_CBC_SHA,
    CipherSuite::TLS_DHE_DSS_WITH_AES_128_CBC_SHA256,
    CipherSuite::TLS_DHE_DSS_WITH_CAMELLIA_128_CBC_SHA,
    CipherSuite::TLS_DHE_RSA_WITH_CAMELLIA_128_CBC_SHA,
    CipherSuite::TLS_DHE_DSS_WITH_RC4_128_SHA,
    CipherSuite::TLS_DHE_RSA_WITH_AES_128_CBC_SHA256,
    CipherSuite::TLS_DHE_DSS_WITH_AES_256_CBC_SHA256,
    CipherSuite::TLS_DHE_RSA_WITH_AES_256_CBC_SHA256,
    CipherSuite::TLS_DHE_DSS_WITH_CAMELLIA_256_CBC_SHA,
    CipherSuite::TLS_DHE_RSA_WITH_CAMELLIA_256_CBC_SHA,
    CipherSuite::TLS_DHE_DSS_WITH_SEED_CBC_SHA,
    CipherSuite::TLS_DHE_RSA_WITH_SEED_CBC_SHA,
    CipherSuite::TLS_DHE_RSA_WITH_AES_128_GCM_SHA256,
    CipherSuite::TLS_DHE_RSA_WITH_AES_256_GCM_SHA384,
    CipherSuite::TLS_DHE_DSS_WITH_AES_128_GCM_SHA256,
    CipherSuite::TLS_DHE_DSS_WITH_AES_256_GCM_SHA384,
    CipherSuite::TLS_DHE_DSS_WITH_CAMELLIA_128_CBC_SHA256,
    CipherSuite::TLS_DHE_RSA_WITH_CAMELLIA_128_CBC_SHA256,
    CipherSuite::TLS_DHE_DSS_WITH_CAMELLIA_256_CBC_SHA256,
    CipherSuite::TLS_DHE_RSA_WITH_CAMELLIA_256_CBC_SHA256,
    CipherSuite::TLS_DHE_DSS_WITH_ARIA_128_CBC_SHA256,
    CipherSuite::TLS_DHE_DSS_WITH_ARIA_256_CBC_SHA384,
    CipherSuite::TLS_DHE_RSA_WITH_ARIA_128_CBC_SHA256,
    CipherSuite::TLS_DHE_RSA_WITH_ARIA_256_CBC_SHA384,
    CipherSuite::TLS_DHE_RSA_WITH_ARIA_128_GCM_SHA256,
    CipherSuite::TLS_DHE_RSA_WITH_ARIA_256_GCM_SHA384,
    CipherSuite::TLS_DHE_DSS_WITH_ARIA_128_GCM_SHA256,
    CipherSuite::TLS_DHE_DSS_WITH_ARIA_256_GCM_SHA384,
    CipherSuite::TLS_DHE_RSA_WITH_CAMELLIA_128_GCM_SHA256,
    CipherSuite::TLS_DHE_RSA_WITH_CAMELLIA_256_GCM_SHA384,
    CipherSuite::TLS_DHE_DSS_WITH_CAMELLIA_128_GCM_SHA256,
    CipherSuite::TLS_DHE_DSS_WITH_CAMELLIA_256_GCM_SHA384,
    CipherSuite::TLS_DHE_RSA_WITH_AES_128_CCM,
    CipherSuite::TLS_DHE_RSA_WITH_AES_256_CCM,
    CipherSuite::TLS_DHE_RSA_WITH_AES_128_CCM_8,
    CipherSuite::TLS_DHE_RSA_WITH_AES_256_CCM_8,
    CipherSuite::TLS_DHE_RSA_WITH_CHACHA20_POLY1305_SHA256,
];

/// All export-grade suites.
pub static EXPORT_CIPHERS: &[CipherSuite] = &[
    CipherSuite::TLS_RSA_EXPORT_WITH_RC4_40_MD5,
    CipherSuite::TLS_RSA_EXPORT_WITH_RC2_CBC_40_MD5,
    CipherSuite::TLS_RSA_EXPORT_WITH_DES40_CBC_SHA,
    CipherSuite::TLS_DH_DSS_EXPORT_WITH_DES40_CBC_SHA,
    CipherSuite::TLS_DH_RSA_EXPORT_WITH_DES40_CBC_SHA,
    CipherSuite::TLS_DHE_DSS_EXPORT_WITH_DES40_CBC_SHA,
    CipherSuite::TLS_DHE_RSA_EXPORT_WITH_DES40_CBC_SHA,
    CipherSuite::TLS_DH_ANON_EXPORT_WITH_RC4_40_MD5,
    CipherSuite::TLS_DH_ANON_EXPORT_WITH_DES40_CBC_SHA,
    CipherSuite::TLS_KRB5_EXPORT_WITH_DES_CBC_40_SHA,
    CipherSuite::TLS_KRB5_EXPORT_WITH_RC2_CBC_40_SHA,
    CipherSuite::TLS_KRB5_EXPORT_WITH_RC4_40_SHA,
    CipherSuite::TLS_KRB5_EXPORT_WITH_DES_CBC_40_MD5,
    CipherSuite::TLS_KRB5_EXPORT_WITH_RC2_CBC_40_MD5,
    CipherSuite::TLS_KRB5_EXPORT_WITH_RC4_40_MD5,
    CipherSuite::TLS_RSA_EXPORT1024_WITH_RC4_56_MD5,
    CipherSuite::TLS_RSA_EXPORT1024_WITH_RC2_CBC_56_MD5,
    CipherSuite::TLS_RSA_EXPORT1024_WITH_DES_CBC_SHA,
    CipherSuite::TLS_DHE_DSS_EXPORT1024_WITH_DES_CBC_SHA,
    CipherSuite::TLS_RSA_EXPORT1024_WITH_RC4_56_SHA,
    CipherSuite::TLS_DHE_DSS_EXPORT1024_WITH_RC4_56_SHA,
];

/// Export suites using RSA key transport.
pub static RSA_EXPORT_CIPHERS: &[CipherSuite] = &[
    CipherSuite::TLS_RSA_EXPORT_WITH_RC4_40_MD5,
    CipherSuite::TLS_RSA_EXPORT_WITH_RC2_CBC_40_MD5,
    CipherSuite::TLS_RSA_EXPORT_WITH_DES40_CBC_SHA,
    CipherSuite::TLS_RSA_EXPORT1024_WITH_RC4_56_MD5,
    CipherSuite::TLS_RSA_EXPORT1024_WITH_RC2_CBC_56_MD5,
    CipherSuite::TLS_RSA_EXPORT1024_WITH_DES_CBC_SHA,
    CipherSuite::TLS_RSA_EXPORT1024_WITH_RC4_56_SHA,
];

/// Export suites with a 512-bit ephemeral RSA key.
pub static RSA_512_EXPORT_CIPHERS: &[CipherSuite] = &[
    CipherSuite::TLS_RSA_EXPORT_WITH_RC4_40_MD5,
    CipherSuite::TLS_RSA_EXPORT_WITH_RC2_CBC_40_MD5,
    CipherSuite::TLS_RSA_EXPORT_WITH_DES40_CBC_SHA,
];

/// Export suites using DH or DHE.
pub static DHE_EXPORT_CIPHERS: &[CipherSuite] = &[
    CipherSuite::TLS_DHE_RSA_EXPORT_WITH_DES40_CBC_SHA,
    CipherSuite::TLS_DH_ANON_EXPORT_WITH_RC4_40_MD5,
    CipherSuite::TLS_DH_ANON_EXPORT_WITH_DES40_CBC_SHA,
    CipherSuite::TLS_DHE_DSS_EXPORT_WITH_DES40_CBC_SHA,
];

/// Export DHE suites restricted to 512-bit groups. Empty.
pub static DHE_512_EXPORT_CIPHERS: &[CipherSuite] = &[];

/// Implemented suites that use CBC mode.
pub static CBC_SUITE_ID_LIST: &[CipherSuite] = &[
    CipherSuite::TLS_RSA_WITH_3DES_EDE_CBC_SHA,
    CipherSuite::TLS_RSA_WITH_AES_128_CBC_SHA,
    CipherSuite::TLS_RSA_WITH_AES_256_CBC_SHA,
    CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA,
    CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA,
    CipherSuite::TLS_ECDHE_RSA_WITH_3DES_EDE_CBC_SHA,
    CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA,
    CipherSuite::TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA,
];

/// Suites offered by Chrome, in its order.
pub static CHROME_CIPHERS: &[CipherSuite] = &[
    CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256,
    CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256,
    CipherSuite::TLS_DHE_RSA_WITH_AES_128_GCM_SHA256,
    CipherSuite::TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256,
    CipherSuite::TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256,
    CipherSuite::TLS_DHE_RSA_WITH_CHACHA20_POLY1305_SHA256,
    CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA,
    CipherSuite::TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA,
    CipherSuite::TLS_DHE_RSA_WITH_AES_256_CBC_SHA,
    CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA,
    CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA,
    CipherSuite::TLS_DHE_RSA_WITH_AES_128_CBC_SHA,
    CipherSuite::TLS_ECDHE_ECDSA_WITH_RC4_128_SHA,
    CipherSuite::TLS_ECDHE_RSA_WITH_RC4_128_SHA,
    CipherSuite::TLS_RSA_WITH_AES_128_GCM_SHA256,
    CipherSuite::TLS_RSA_WITH_AES_256_CBC_SHA,
    CipherSuite::TLS_RSA_WITH_AES_128_CBC_SHA,
    CipherSuite::TLS_RSA_WITH_RC4_128_SHA,
    CipherSuite::TLS_RSA_WITH_RC4_128_MD5,
    CipherSuite::TLS_RSA_WITH_3DES_EDE_CBC_SHA,
];

/// Chrome's offer with the DHE suites removed.
pub static CHROME_NO_DHE_CIPHERS: &[CipherSuite] = &[
    CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256,
    CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256,
    CipherSuite::TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256,
    CipherSuite::TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256,
    CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA,
    CipherSuite::TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA,
    CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA,
    CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA,
    CipherSuite::TLS_ECDHE_ECDSA_WITH_RC4_128_SHA,
    CipherSuite::TLS_ECDHE_RSA_WITH_RC4_128_SHA,
    CipherSuite::TLS_RSA_WITH_AES_128_GCM_SHA256,
    CipherSuite::TLS_RSA_WITH_AES_256_CBC_SHA,
    CipherSuite::TLS_RSA_WITH_AES_128_CBC_SHA,
    CipherSuite::TLS_RSA_WITH_RC4_128_SHA,
    CipherSuite::TLS_RSA_WITH_RC4_128_MD5,
    CipherSuite::TLS_RSA_WITH_3DES_EDE_CBC_SHA,
];

/// Suites offered by Firefox, in its order.
pub static FIREFOX_CIPHERS: &[CipherSuite] = &[
    CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256,
    CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256,
    CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA,
    CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA,
    CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA,
    CipherSuite::TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA,
    CipherSuite::TLS_DHE_RSA_WITH_AES_128_CBC_SHA,
    CipherSuite::TLS_DHE_DSS_WITH_AES_128_CBC_SHA,
    CipherSuite::TLS_DHE_RSA_WITH_AES_256_CBC_SHA,
    CipherSuite::TLS_RSA_WITH_AES_128_CBC_SHA,
    CipherSuite::TLS_RSA_WITH_AES_256_CBC_SHA,
    CipherSuite::TLS_RSA_WITH_3DES_EDE_CBC_SHA,
];

/// Suites offered by Windows SChannel.
pub static SCHANNEL_SUITES: &[CipherSuite] = &[
    CipherSuite::TLS_RSA_WITH_AES_128_GCM_SHA256,
    CipherSuite::TLS_RSA_WITH_RC4_128_SHA,
];

/// Literal membership test.
pub fn cipher_in_list(id: CipherSuite, list: &[CipherSuite]) -> bool {
    list.contains(&id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypt::{cipher_suite_by_id, is_implemented};
    use std::collections::HashSet;

    fn all_lists() -> [(&'static str, &'static [CipherSuite]); 12] {
        [
            ("RSA_CIPHERS", RSA_CIPHERS),
            ("DHE_CIPHERS", DHE_CIPHERS),
            ("EXPORT_CIPHERS", EXPORT_CIPHERS),
            ("RSA_EXPORT_CIPHERS", RSA_EXPORT_CIPHERS),
            ("RSA_512_EXPORT_CIPHERS", RSA_512_EXPORT_CIPHERS),
            ("DHE_EXPORT_CIPHERS", DHE_EXPORT_CIPHERS),
            ("DHE_512_EXPORT_CIPHERS", DHE_512_EXPORT_CIPHERS),
            ("CBC_SUITE_ID_LIST", CBC_SUITE_ID_LIST),
            ("CHROME_CIPHERS", CHROME_CIPHERS),
            ("CHROME_NO_DHE_CIPHERS", CHROME_NO_DHE_CIPHERS),
            ("FIREFOX_CIPHERS", FIREFOX_CIPHERS),
            ("SCHANNEL_SUITES", SCHANNEL_SUITES),
        ]
    }

    #[test]
    fn test_lists_have_no_duplicates() {
        for (name, list) in all_lists() {
            let unique: HashSet<_> = list.iter().collect();
            assert_eq!(unique.len(), list.len(), "{name} has duplicates");
        }
    }

    #[test]
    fn test_list_sizes() {
        let sizes: Vec<usize> = all_lists().iter().map(|(_, l)| l.len()).collect();
        assert_eq!(sizes, vec![5, 44, 21, 7, 3, 4, 0, 8, 20, 16, 12, 2]);
    }

    #[test]
    fn test_membership_is_literal() {
        assert!(cipher_in_list(CipherSuite(0x0005), RSA_CIPHERS));
        assert!(!cipher_in_list(CipherSuite(0xc013), RSA_CIPHERS));
        assert!(!cipher_in_list(CipherSuite(0x0005), DHE_512_EXPORT_CIPHERS));
        // Listed but not implemented.
        assert!(cipher_in_list(CipherSuite(0xcc13), CHROME_CIPHERS));
        assert!(!is_implemented(CipherSuite(0xcc13)));
        // Implemented but not listed.
        assert!(!cipher_in_list(CipherSuite(0xc02f), SCHANNEL_SUITES));
    }

    #[test]
    fn test_browser_orders() {
        assert_eq!(
            &CHROME_CIPHERS[..3],
            &[
                CipherSuite(0xc02b),
                CipherSuite(0xc02f),
                CipherSuite(0x009e)
            ][..]
        );
        assert_eq!(CHROME_CIPHERS.last(), Some(&CipherSuite(0x000a)));
        assert_eq!(FIREFOX_CIPHERS[0], CipherSuite(0xc02b));
        assert_eq!(
            SCHANNEL_SUITES,
            &[CipherSuite(0x009c), CipherSuite(0x0005)][..]
        );
    }

    #[test]
    fn test_chrome_no_dhe_is_chrome_minus_dhe() {
        let expected: Vec<CipherSuite> = CHROME_CIPHERS
            .iter()
            .copied()
            .filter(|id| !cipher_in_list(*id, DHE_CIPHERS))
            .collect();
        assert_eq!(CHROME_NO_DHE_CIPHERS, expected.as_slice());
    }

    #[test]
    fn test_cbc_list_is_implemented_cbc() {
        for id in CBC_SUITE_ID_LIST {
            let suite = cipher_suite_by_id(*id).unwrap();
            let cipher = suite.cipher_factory().unwrap();
            assert!(cipher.block_size().is_some(), "{id} is not CBC");
        }
    }

    #[test]
    fn test_export_sublists() {
        for id in RSA_EXPORT_CIPHERS.iter().chain(DHE_EXPORT_CIPHERS) {
            assert!(cipher_in_list(*id, EXPORT_CIPHERS), "{id}");
        }
        for id in RSA_512_EXPORT_CIPHERS {
            assert!(cipher_in_list(*id, RSA_EXPORT_CIPHERS), "{id}");
        }
    }
}
