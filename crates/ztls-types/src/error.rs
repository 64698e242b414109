/// Errors raised while building or driving a cryptographic primitive.
///
/// These indicate that the caller handed a primitive material of the wrong
/// shape. They are configuration errors: suite construction must be aborted,
/// never retried with repaired input.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("invalid argument")]
    InvalidArg,
    #[error("invalid key length: expected {expected}, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },
    #[error("invalid iv length: expected {expected}, got {got}")]
    InvalidIvLength { expected: usize, got: usize },
    #[error("input is not a multiple of the {block_size}-byte block size")]
    NotBlockAligned { block_size: usize },
    #[error("aead: tag verification failed")]
    AeadTagVerifyFail,
    #[error("random number generation failed")]
    RandomFailed,
}

/// TLS protocol errors surfaced to the handshake engine and record layer.
#[derive(Debug, thiserror::Error)]
pub enum TlsError {
    #[error("no shared cipher suite")]
    NoSharedCipherSuite,
    #[error("unsupported protocol version")]
    UnsupportedVersion,
    /// Record authentication failed. Deliberately carries no detail about
    /// which check (MAC, padding, tag) rejected the record.
    #[error("bad record MAC")]
    BadRecordMac,
    #[error("record layer error: {0}")]
    RecordError(String),
    #[error("crypto error: {0}")]
    CryptoError(#[from] CryptoError),
}
