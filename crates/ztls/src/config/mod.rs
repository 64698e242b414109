//! Cipher suite configuration and per-connection filtering.

use ztls_types::TlsError;

use crate::crypt::{cipher_suite_by_id, CipherSuiteDescriptor, SuiteFlags, CIPHER_SUITES};
use crate::negotiate::select_cipher_suite;
use crate::{CipherSuite, ProtocolVersion};

/// Key type of the certificate authenticating the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertKeyType {
    Rsa,
    Ecdsa,
}

/// Facts about one connection that decide which suites are usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuiteContext {
    /// Negotiated protocol version.
    pub version: ProtocolVersion,
    pub cert_type: CertKeyType,
    /// The peer supports an acceptable curve and point format.
    pub ecdhe_ok: bool,
}

/// Returns true if `suite`'s flags allow it on a connection described by
/// `ctx`.
pub fn suite_applicable(suite: &CipherSuiteDescriptor, ctx: &SuiteContext) -> bool {
    if suite.flags.contains(SuiteFlags::ECDHE) && !ctx.ecdhe_ok {
        return false;
    }
    if suite.flags.contains(SuiteFlags::ECDSA) != (ctx.cert_type == CertKeyType::Ecdsa) {
        return false;
    }
    if suite.flags.contains(SuiteFlags::TLS12) && !ctx.version.is_tls12_or_later() {
        return false;
    }
    true
}

/// Cipher suite configuration.
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    /// Minimum supported protocol version.
    pub min_version: ProtocolVersion,
    /// Maximum supported protocol version.
    pub max_version: ProtocolVersion,
    /// Enabled cipher suites (in preference order).
    pub cipher_suites: Vec<CipherSuite>,
}

impl SuiteConfig {
    /// Create a new config builder.
    pub fn builder() -> SuiteConfigBuilder {
        SuiteConfigBuilder::default()
    }

    pub fn supports_version(&self, version: ProtocolVersion) -> bool {
        (self.min_version..=self.max_version).contains(&version)
    }

    /// Enabled ids usable under `ctx`, in preference order. Ids the registry
    /// does not implement are dropped.
    pub fn supported_suites(&self, ctx: &SuiteContext) -> Result<Vec<CipherSuite>, TlsError> {
        if !self.supports_version(ctx.version) {
            return Err(TlsError::UnsupportedVersion);
        }
        Ok(self
            .cipher_suites
            .iter()
            .filter_map(|id| cipher_suite_by_id(*id))
            .filter(|suite| suite_applicable(suite, ctx))
            .map(|suite| suite.id)
            .collect())
    }

    /// Choose a suite from a peer's offer, honoring local preference.
    pub fn negotiate(
        &self,
        ctx: &SuiteContext,
        offered: &[CipherSuite],
    ) -> Result<&'static CipherSuiteDescriptor, TlsError> {
        let supported = self.supported_suites(ctx)?;
        select_cipher_suite(&supported, offered)
    }
}

/// Builder for `SuiteConfig`.
#[derive(Debug, Clone)]
pub struct SuiteConfigBuilder {
    min_version: ProtocolVersion,
    max_version: ProtocolVersion,
    cipher_suites: Vec<CipherSuite>,
}

impl Default for SuiteConfigBuilder {
    fn default() -> Self {
        Self {
            min_version: ProtocolVersion::Ssl30,
            max_version: ProtocolVersion::Tls12,
            cipher_suites: CIPHER_SUITES.iter().map(|suite| suite.id).collect(),
        }
    }
}

impl SuiteConfigBuilder {
    pub fn min_version(mut self, version: ProtocolVersion) -> Self {
        self.min_version = version;
        self
    }

    pub fn max_version(mut self, version: ProtocolVersion) -> Self {
        self.max_version = version;
        self
    }

    pub fn cipher_suites(mut self, suites: &[CipherSuite]) -> Self {
        self.cipher_suites = suites.to_vec();
        self
    }

    pub fn build(self) -> SuiteConfig {
        SuiteConfig {
            min_version: self.min_version,
            max_version: self.max_version,
            cipher_suites: self.cipher_suites,
        }
    }
}
