//! Tamper-evident strings.
//!
//! A [`Configuration`] appends an HMAC-SHA256 authenticator to a payload so
//! that anyone holding one of its keys can later get the exact payload back
//! and know it was not altered. Keys and prefixes are kept as ordered rings
//! (first one active, all accepted), so both can rotate without invalidating
//! strings issued earlier.
//!
//! Signing is deterministic. There is no expiry, replay protection, or
//! encryption: the payload travels in the clear.
//!
//! ```
//! # use signed_strings::{parse_keys, Configuration, ValidationError};
//! let old = Configuration::new(parse_keys("68656c6c6f20776f726c64").unwrap());
//! let issued = old.sign("user:42");
//!
//! // Roll in a new key; strings signed with the old one still validate.
//! let new = Configuration::new(parse_keys("0011223344556677, 68656c6c6f20776f726c64").unwrap());
//! assert_eq!(new.validate(&issued), Ok("user:42"));
//! assert_ne!(new.sign("user:42"), issued);
//!
//! assert_eq!(new.validate("user:42"), Err(ValidationError::Malformed));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_debug_implementations,
    future_incompatible,
    let_underscore,
    rust_2021_compatibility,
    nonstandard_style
)]
#![deny(unreachable_pub)]

pub mod authenticator;
pub mod configuration;
pub mod error;
pub mod key;

mod framing;

pub use authenticator::{Authenticator, AUTHENTICATOR_HEX_LEN};
pub use configuration::{Configuration, DEFAULT_SEPARATOR};
pub use error::{ConfigurationError, ParseKeysError, ValidationError};
pub use key::{parse_keys, Key, Keys, RECOMMENDED_KEY_LEN};
