//! Secret keys and the textual key-ring format.

use crate::error::ParseKeysError;
use derive_more::{Deref, From};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// Size of the keys produced by [`Key::generate`].
///
/// Matches the SHA-256 output size. Shorter keys are accepted but flagged
/// when a [`Configuration`][crate::Configuration] is built.
pub const RECOMMENDED_KEY_LEN: usize = 32;

/// A secret HMAC key.
///
/// The bytes never show up in [`Debug`] output.
///
/// # Examples
///
/// ```
/// # use signed_strings::Key;
/// let key = Key::from(b"hello world".to_vec());
/// assert_eq!(format!("{:?}", key), "<Key>");
/// assert_eq!(key.len(), 11);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Key(Vec<u8>);

impl Key {
    /// Generate a new random key of [`RECOMMENDED_KEY_LEN`] bytes.
    pub fn generate<R: rand::CryptoRng + rand::RngCore>(csprng: &mut R) -> Self {
        let mut key = vec![0u8; RECOMMENDED_KEY_LEN];
        csprng.fill_bytes(&mut key);
        Self(key)
    }

    /// Get the key as a byte slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lower-case hex, the same form [`parse_keys`] reads.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<Key>")
    }
}

impl From<Vec<u8>> for Key {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Key {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for Key {
    fn from(bytes: [u8; N]) -> Self {
        Self(bytes.to_vec())
    }
}

impl AsRef<[u8]> for Key {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(any(test, feature = "arbitrary"))]
impl<'a> arbitrary::Arbitrary<'a> for Key {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let mut bytes = vec![u.arbitrary::<u8>()?];
        bytes.extend(u.arbitrary::<Vec<u8>>()?);
        Ok(Self(bytes))
    }
}

/// An ordered list of keys, as read from configuration text.
///
/// Reads and writes the comma or whitespace separated hex format, so it can be
/// plugged into a flag parser, an environment variable, or a config file.
///
/// # Examples
///
/// ```
/// # use signed_strings::Keys;
/// let keys: Keys = "787653b737a07fa0,d5d73e9d64076e18".parse().unwrap();
/// assert_eq!(keys.len(), 2);
/// assert_eq!(keys.to_string(), "787653b737a07fa0 d5d73e9d64076e18");
/// ```
#[derive(Clone, Default, PartialEq, Eq, Deref, From)]
pub struct Keys(Vec<Key>);

impl Keys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: Key) {
        self.0.push(key);
    }

    pub fn into_vec(self) -> Vec<Key> {
        self.0
    }
}

impl fmt::Debug for Keys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keys(<{} keys>)", self.0.len())
    }
}

impl fmt::Display for Keys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(&key.to_hex())?;
        }
        Ok(())
    }
}

impl FromStr for Keys {
    type Err = ParseKeysError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_keys(s)
    }
}

impl From<Vec<Vec<u8>>> for Keys {
    fn from(raw: Vec<Vec<u8>>) -> Self {
        raw.into_iter().map(Key::from).collect()
    }
}

impl FromIterator<Key> for Keys {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Keys {
    type Item = Key;
    type IntoIter = std::vec::IntoIter<Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Keys {
    type Item = &'a Key;
    type IntoIter = std::slice::Iter<'a, Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for Keys {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Keys {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_keys(&raw).map_err(serde::de::Error::custom)
    }
}

/// Parse a comma or whitespace separated list of hex-encoded keys.
///
/// Runs of separators collapse and empty tokens are skipped, so an empty
/// string yields an empty list. Order is preserved.
///
/// # Examples
///
/// ```
/// # use signed_strings::parse_keys;
/// let keys = parse_keys("787653b737a07fa0 d5d73e9d64076e18,,,81b5a01659b74a84").unwrap();
/// assert_eq!(keys.len(), 3);
/// assert_eq!(keys[2].to_hex(), "81b5a01659b74a84");
///
/// assert!(parse_keys("zzz").is_err());
/// ```
pub fn parse_keys(text: &str) -> Result<Keys, ParseKeysError> {
    text.split(is_key_separator)
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(index, token)| {
            hex::decode(token)
                .map(Key::from)
                .map_err(|source| ParseKeysError::InvalidHex {
                    index,
                    token: token.to_string(),
                    source,
                })
        })
        .collect()
}

fn is_key_separator(c: char) -> bool {
    c == ',' || c.is_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_keys_mixed_separators() {
        let keys = parse_keys("787653b737a07fa0 d5d73e9d64076e18,,,81b5a01659b74a84").unwrap();
        let hexes: Vec<String> = keys.iter().map(Key::to_hex).collect();
        assert_eq!(
            hexes,
            vec!["787653b737a07fa0", "d5d73e9d64076e18", "81b5a01659b74a84"]
        );
    }

    #[test]
    fn test_parse_keys_tabs_and_newlines() {
        let keys = parse_keys("\n\t0102 ,\r\n0304\t").unwrap();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].as_slice(), &[1, 2]);
        assert_eq!(keys[1].as_slice(), &[3, 4]);
    }

    #[test]
    fn test_parse_keys_accepts_uppercase() {
        let keys = parse_keys("ABCDEF").unwrap();
        assert_eq!(keys[0].as_slice(), &[0xab, 0xcd, 0xef]);
    }

    #[test]
    fn test_parse_keys_empty_input() {
        assert!(parse_keys("").unwrap().is_empty());
        assert!(parse_keys(" ,, ,").unwrap().is_empty());
    }

    #[test]
    fn test_parse_keys_reports_bad_token() {
        let err = parse_keys("0102,zzzz,0304").unwrap_err();
        let ParseKeysError::InvalidHex { index, token, source } = err;
        assert_eq!(index, 1);
        assert_eq!(token, "zzzz");
        assert_eq!(
            source,
            hex::FromHexError::InvalidHexCharacter { c: 'z', index: 0 }
        );
    }

    #[test]
    fn test_parse_keys_odd_length() {
        let err = parse_keys("abc").unwrap_err();
        let ParseKeysError::InvalidHex { source, .. } = err;
        assert_eq!(source, hex::FromHexError::OddLength);
    }

    #[test]
    fn test_display_roundtrips_through_from_str() {
        let keys: Keys = vec![vec![0x78u8, 0x76], vec![0xd5u8, 0xd7, 0x3e]].into();
        let text = keys.to_string();
        assert_eq!(text, "7876 d5d73e");
        assert_eq!(text.parse::<Keys>().unwrap(), keys);
    }

    #[test]
    fn test_debug_hides_material() {
        let keys: Keys = vec![b"secret".to_vec()].into();
        let debugged = format!("{:?}", keys);
        assert!(!debugged.contains("736563726574"));
        assert_eq!(format!("{:?}", keys[0]), "<Key>");
    }

    #[test]
    fn test_generate_is_recommended_length() {
        let key = Key::generate(&mut rand::thread_rng());
        assert_eq!(key.len(), RECOMMENDED_KEY_LEN);
    }
}
