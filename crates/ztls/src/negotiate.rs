//! Cipher suite negotiation.

use ztls_types::TlsError;

use crate::crypt::{cipher_suite_by_id, CipherSuiteDescriptor};
use crate::CipherSuite;

/// Resolve `want` against the locally supported ids.
///
/// Returns the registry entry for `want` if `have` contains it and the
/// registry implements it. Applicability flags are the caller's business.
pub fn mutual_cipher_suite(
    have: &[CipherSuite],
    want: CipherSuite,
) -> Option<&'static CipherSuiteDescriptor> {
    if !have.contains(&want) {
        tracing::debug!("cipher suite {} not in supported list", want);
        return None;
    }
    let suite = cipher_suite_by_id(want);
    if suite.is_none() {
        tracing::debug!("cipher suite {} supported but not implemented", want);
    }
    suite
}

/// Pick the first id in `preference` that is mutual with `supported`.
pub fn select_cipher_suite(
    preference: &[CipherSuite],
    supported: &[CipherSuite],
) -> Result<&'static CipherSuiteDescriptor, TlsError> {
    preference
        .iter()
        .find_map(|id| mutual_cipher_suite(supported, *id))
        .ok_or(TlsError::NoSharedCipherSuite)
}
