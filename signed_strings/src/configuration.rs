//! The signer/validator and its immutable settings.

use crate::{
    authenticator::Authenticator,
    error::{ConfigurationError, ValidationError},
    framing::{cut_last, cut_longest_prefix},
    key::{Key, Keys, RECOMMENDED_KEY_LEN},
};
use nonempty::NonEmpty;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

/// Separator used when none (or an empty one) is configured.
pub const DEFAULT_SEPARATOR: &str = "-";

/// Signs strings and validates signed strings.
///
/// Built once, then shared freely: signing and validation never mutate it.
///
/// * The first key signs; every key is accepted when validating, which allows
///   rolling a new key in ahead of retiring the old one.
/// * The first prefix is attached on signing; every prefix is accepted when
///   validating. The empty prefix is a valid choice and is the default.
/// * The separator sits between the frame and the authenticator. It is
///   purely cosmetic and may also occur inside payloads.
///
/// A signed string reads `<prefix><payload><separator><authenticator>`,
/// where the authenticator is 64 lower-case hex characters of
/// HMAC-SHA256 over `<prefix><payload>`. Nothing is escaped. The
/// authenticator is split off at the rightmost separator and the longest
/// matching prefix is stripped; if payloads are arbitrary, pick a separator
/// and prefixes that cannot be confused with payload text, or accept those
/// two rules as the disambiguation policy.
///
/// # Examples
///
/// ```
/// # use signed_strings::{Configuration, Key, Keys, ValidationError};
/// let conf = Configuration::new(Keys::from(vec![b"hello world".to_vec()]))
///     .with_prefixes(["TOKEN-"]);
///
/// let signed = conf.sign("foo");
/// assert_eq!(
///     signed,
///     "TOKEN-foo-1c54d5a9d70312670528e4046ccdad77d97dcd2bcccdc161f25dd63dd7c97a1e"
/// );
/// assert_eq!(conf.validate(&signed), Ok("foo"));
/// assert_eq!(conf.validate(""), Err(ValidationError::Malformed));
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "Settings")]
pub struct Configuration {
    keys: NonEmpty<Key>,
    prefixes: NonEmpty<String>,
    separator: String,
}

/// The on-disk shape of a [`Configuration`].
///
/// `prefixes` and `separator` may be omitted.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Settings {
    keys: Keys,
    #[serde(default)]
    prefixes: Vec<String>,
    #[serde(default)]
    separator: String,
}

impl TryFrom<Settings> for Configuration {
    type Error = ConfigurationError;

    fn try_from(settings: Settings) -> Result<Self, Self::Error> {
        Ok(Self::try_new(settings.keys)?
            .with_prefixes(settings.prefixes)
            .with_separator(settings.separator))
    }
}

impl Configuration {
    /// Build a configuration around a key ring.
    ///
    /// # Panics
    ///
    /// An empty key ring or a zero-length key is a deployment mistake, not an
    /// input problem, and aborts with `signed_strings: not configured` or
    /// `signed_strings: empty key`. Use [`Configuration::try_new`] where the
    /// keys come from a file that may be wrong.
    pub fn new(keys: impl Into<Keys>) -> Self {
        match Self::try_new(keys) {
            Ok(conf) => conf,
            Err(ConfigurationError::NotConfigured) => panic!("signed_strings: not configured"),
            Err(ConfigurationError::EmptyKey { .. }) => panic!("signed_strings: empty key"),
        }
    }

    /// Same as [`Configuration::new`], reporting a bad key ring as a value.
    pub fn try_new(keys: impl Into<Keys>) -> Result<Self, ConfigurationError> {
        let keys = NonEmpty::from_vec(keys.into().into_vec())
            .ok_or(ConfigurationError::NotConfigured)?;

        for (index, key) in keys.iter().enumerate() {
            if key.is_empty() {
                return Err(ConfigurationError::EmptyKey { index });
            }

            if key.len() < RECOMMENDED_KEY_LEN {
                warn!(
                    index,
                    len = key.len(),
                    recommended = RECOMMENDED_KEY_LEN,
                    "short HMAC key"
                );
            }
        }

        Ok(Self {
            keys,
            prefixes: NonEmpty::new(String::new()),
            separator: DEFAULT_SEPARATOR.to_string(),
        })
    }

    /// Replace the prefix ring. The first prefix is used for new strings.
    ///
    /// An empty list means a single empty prefix.
    pub fn with_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let prefixes: Vec<String> = prefixes.into_iter().map(Into::into).collect();
        self.prefixes =
            NonEmpty::from_vec(prefixes).unwrap_or_else(|| NonEmpty::new(String::new()));
        self
    }

    /// Replace the separator. An empty separator means [`DEFAULT_SEPARATOR`].
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        if separator.ends_with(|c: char| matches!(c, '0'..='9' | 'a'..='f')) {
            // its rightmost occurrence may fall inside the authenticator
            warn!(separator = %separator, "separator ends in a hex digit");
        }

        self.separator = if separator.is_empty() {
            DEFAULT_SEPARATOR.to_string()
        } else {
            separator
        };
        self
    }

    pub fn keys(&self) -> &NonEmpty<Key> {
        &self.keys
    }

    /// The key new strings are signed with.
    pub fn signing_key(&self) -> &Key {
        &self.keys.head
    }

    pub fn prefixes(&self) -> &NonEmpty<String> {
        &self.prefixes
    }

    /// The prefix attached to new strings.
    pub fn signing_prefix(&self) -> &str {
        &self.prefixes.head
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Sign `payload`, attaching the active prefix.
    ///
    /// Deterministic: the same payload under the same active key, prefix, and
    /// separator always produces the same string.
    #[instrument(level = "trace", skip_all, fields(payload_len = payload.len()))]
    pub fn sign(&self, payload: &str) -> String {
        let prefix = self.signing_prefix();
        let auth = Authenticator::compute(self.signing_key(), &[prefix, payload].concat());

        let mut signed = String::with_capacity(
            prefix.len() + payload.len() + self.separator.len() + 2 * auth.as_bytes().len(),
        );
        signed.push_str(prefix);
        signed.push_str(payload);
        signed.push_str(&self.separator);
        signed.push_str(&auth.to_hex());
        signed
    }

    /// Check a signed string and return the payload it carries.
    ///
    /// The returned payload borrows from `signed`.
    #[instrument(level = "trace", skip_all, fields(signed_len = signed.len()))]
    pub fn validate<'a>(&self, signed: &'a str) -> Result<&'a str, ValidationError> {
        let result = self.try_validate(signed);
        if let Err(err) = result {
            debug!(kind = err.kind(), "rejected signed string");
        }
        result
    }

    fn try_validate<'a>(&self, signed: &'a str) -> Result<&'a str, ValidationError> {
        let (frame, auth) = match cut_last(signed, &self.separator) {
            Some((frame, auth)) if !auth.is_empty() => (frame, auth),
            _ => return Err(ValidationError::Malformed),
        };

        let (payload, prefix_index) =
            cut_longest_prefix(frame, self.prefixes.iter()).ok_or(ValidationError::Malformed)?;

        let key_index = self
            .keys
            .iter()
            .position(|key| Authenticator::compute(key, frame).matches_hex(auth))
            .ok_or(ValidationError::SignatureInvalid)?;

        if key_index > 0 || prefix_index > 0 {
            debug!(key_index, prefix_index, "validated with a non-active key or prefix");
        }

        Ok(payload)
    }
}
