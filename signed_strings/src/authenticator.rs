//! HMAC-SHA256 authenticators over framed messages.

use crate::key::Key;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Length of an authenticator in bytes.
pub const AUTHENTICATOR_LEN: usize = 32;

/// Length of an authenticator once hex encoded, as it appears on the wire.
pub const AUTHENTICATOR_HEX_LEN: usize = AUTHENTICATOR_LEN * 2;

/// The keyed checksum of a frame (`prefix + payload`).
///
/// Never computed over the bare payload and never over the separator.
///
/// # Examples
///
/// ```
/// # use signed_strings::{Authenticator, Key};
/// let key = Key::from(b"hello world".to_vec());
/// let auth = Authenticator::compute(&key, "TOKEN-foo");
/// assert_eq!(
///     auth.to_hex(),
///     "1c54d5a9d70312670528e4046ccdad77d97dcd2bcccdc161f25dd63dd7c97a1e"
/// );
/// assert!(auth.matches_hex(&auth.to_hex()));
/// ```
#[derive(Clone, Copy)]
pub struct Authenticator([u8; AUTHENTICATOR_LEN]);

impl Authenticator {
    pub fn compute(key: &Key, frame: &str) -> Self {
        let mut mac = HmacSha256::new_from_slice(key.as_slice())
            .expect("HMAC accepts keys of any length");
        mac.update(frame.as_bytes());

        let mut out = [0u8; AUTHENTICATOR_LEN];
        out.copy_from_slice(&mac.finalize().into_bytes());
        Self(out)
    }

    pub fn as_bytes(&self) -> &[u8; AUTHENTICATOR_LEN] {
        &self.0
    }

    /// Lower-case hex, exactly [`AUTHENTICATOR_HEX_LEN`] characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Compare against a hex authenticator taken from untrusted input.
    ///
    /// Anything that is not exactly [`AUTHENTICATOR_HEX_LEN`] long is rejected
    /// up front; the length of a genuine authenticator is public. The
    /// comparison itself takes the same time wherever the first difference is.
    pub fn matches_hex(&self, candidate: &str) -> bool {
        if candidate.len() != AUTHENTICATOR_HEX_LEN {
            return false;
        }

        constant_time_eq(self.to_hex().as_bytes(), candidate.as_bytes())
    }
}

impl fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Authenticator({})", self.to_hex())
    }
}

/// Byte comparison whose running time depends only on the input lengths.
pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
