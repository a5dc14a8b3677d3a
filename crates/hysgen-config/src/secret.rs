//! Secret generator / credential resolver
//!
//! A user-supplied password is accepted verbatim when it is long enough.
//! Empty input falls back to 6 lowercase hex characters derived from a
//! hash of the current nanosecond timestamp. The generated value only
//! needs to be unique for this run, not cryptographically strong.

use crate::error::ValidationError;
use crate::validate;
use blake2::{Blake2s256, Digest};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Minimum length for a user-supplied password.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Length of a generated password in hex characters.
const GENERATED_LEN: usize = 6;

/// An accepted authentication password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Resolve a raw input line.
    ///
    /// Empty input generates a password; anything shorter than
    /// [`MIN_PASSWORD_LEN`] is rejected for re-prompting.
    pub fn resolve(raw: &str) -> Result<Self, ValidationError> {
        if raw.is_empty() {
            return Ok(Self::generate());
        }
        validate::password_long_enough(raw)?;
        Ok(Self(raw.to_string()))
    }

    /// Generate a password from the current timestamp.
    pub fn generate() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        Self(derive(nanos))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive the 6-hex-char password for a given nanosecond timestamp.
fn derive(nanos: u128) -> String {
    let digest = Blake2s256::digest(nanos.to_string().as_bytes());

    let mut out = String::with_capacity(GENERATED_LEN);
    for byte in digest.iter().take(GENERATED_LEN / 2) {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbatim_when_long_enough() {
        let credential = Credential::resolve("abcdef").unwrap();
        assert_eq!(credential.as_str(), "abcdef");

        let longer = Credential::resolve("correct horse battery").unwrap();
        assert_eq!(longer.as_str(), "correct horse battery");
    }

    #[test]
    fn test_short_passwords_rejected() {
        for raw in ["a", "ab", "abc", "abcd", "abcde"] {
            assert_eq!(
                Credential::resolve(raw),
                Err(ValidationError::TooShort { min: 6 }),
                "{raw:?} should be too short"
            );
        }
    }

    #[test]
    fn test_generated_shape() {
        let credential = Credential::generate();

        assert_eq!(credential.as_str().len(), 6);
        assert!(
            credential
                .as_str()
                .chars()
                .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
        );
    }

    #[test]
    fn test_empty_input_generates() {
        let credential = Credential::resolve("").unwrap();
        assert_eq!(credential.as_str().len(), 6);
    }

    #[test]
    fn test_distinct_timestamps_distinct_passwords() {
        assert_ne!(derive(1_000_000_001), derive(1_000_000_002));
        assert_ne!(derive(0), derive(u128::MAX));
    }
}
