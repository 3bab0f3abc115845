//! Error types.

use thiserror::Error;

/// The two ways a signed string can be rejected.
///
/// Both mean "reject the input". They are kept apart so that callers can tell
/// garbage input from tampering (or a mis-rotated key ring) in their telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ValidationError {
    /// The input is not framed the way this scheme frames strings: the
    /// separator is missing, the authenticator segment is empty, or no
    /// configured prefix matches.
    #[error("invalid string")]
    Malformed,

    /// The input is well framed, but no configured key reproduces its
    /// authenticator.
    #[error("invalid signature")]
    SignatureInvalid,
}

impl ValidationError {
    /// A short, stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Malformed => "malformed",
            Self::SignatureInvalid => "signature_invalid",
        }
    }
}

/// A key ring that can never be used to sign or validate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("not configured")]
    NotConfigured,

    #[error("empty key at index {index}")]
    EmptyKey { index: usize },
}

/// Failure to read the comma/whitespace separated hex key list.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseKeysError {
    #[error("invalid hex in key #{index} ({token:?}): {source}")]
    InvalidHex {
        index: usize,
        token: String,
        #[source]
        source: hex::FromHexError,
    },
}
