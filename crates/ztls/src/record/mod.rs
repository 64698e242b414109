//! Record protection for SSL 3.0 through TLS 1.2.
//!
//! Framing and fragmentation live in the connection layer. This module only
//! turns a plaintext fragment into a protected one and back.

mod protection;

pub use protection::{RecordOpener, RecordSealer};

use crate::ProtocolVersion;

/// Maximum plaintext fragment size (2^14 bytes).
pub const MAX_PLAINTEXT_LENGTH: usize = 16384;

/// Largest expansion protection may add to a fragment (RFC 5246 §6.2.3).
pub const MAX_CIPHERTEXT_OVERHEAD: usize = 2048;

/// Maximum protected fragment size accepted by [`RecordOpener::unprotect`].
pub const MAX_CIPHERTEXT_LENGTH: usize = MAX_PLAINTEXT_LENGTH + MAX_CIPHERTEXT_OVERHEAD;

/// Record header size: content_type(1) + version(2) + length(2).
pub const RECORD_HEADER_LEN: usize = 5;

/// Record content types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ContentType {
    ChangeCipherSpec = 20,
    Alert = 21,
    Handshake = 22,
    ApplicationData = 23,
}

impl ContentType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            20 => Some(ContentType::ChangeCipherSpec),
            21 => Some(ContentType::Alert),
            22 => Some(ContentType::Handshake),
            23 => Some(ContentType::ApplicationData),
            _ => None,
        }
    }
}

/// The header fed to the record MAC and the AEAD additional data:
/// type, version and plaintext length.
pub fn record_header(
    content_type: ContentType,
    version: ProtocolVersion,
    len: usize,
) -> [u8; RECORD_HEADER_LEN] {
    let version = version.wire().to_be_bytes();
    let len = (len as u16).to_be_bytes();
    [content_type as u8, version[0], version[1], len[0], len[1]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_roundtrip() {
        for ct in [
            ContentType::ChangeCipherSpec,
            ContentType::Alert,
            ContentType::Handshake,
            ContentType::ApplicationData,
        ] {
            assert_eq!(ContentType::from_u8(ct as u8), Some(ct));
        }
        assert_eq!(ContentType::from_u8(24), None);
    }

    #[test]
    fn test_record_header_layout() {
        let header = record_header(ContentType::Handshake, ProtocolVersion::Tls11, 0x0123);
        assert_eq!(header, [22, 0x03, 0x02, 0x01, 0x23]);
        let header = record_header(
            ContentType::ApplicationData,
            ProtocolVersion::Ssl30,
            MAX_PLAINTEXT_LENGTH,
        );
        assert_eq!(header, [23, 0x03, 0x00, 0x40, 0x00]);
    }

    #[test]
    fn test_limits() {
        assert_eq!(MAX_CIPHERTEXT_LENGTH, 16384 + 2048);
    }
}
