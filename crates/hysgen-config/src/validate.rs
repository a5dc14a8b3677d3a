//! Validator primitives
//!
//! Pure predicate/normalization functions shared by the resolvers. Each
//! returns the normalized value on success and a [`ValidationError`]
//! describing exactly why the input was rejected otherwise.

use crate::error::ValidationError;
use crate::port::MAX_PORT;
use crate::secret::MIN_PASSWORD_LEN;
use std::num::IntErrorKind;
use std::path::{Path, PathBuf};

/// Parse a raw port string and check it against the inclusive 0..=65535 bound.
///
/// Values too large even for the parse still report the range error, not a
/// parse error.
pub fn port_in_range(raw: &str) -> Result<u16, ValidationError> {
    let value: i64 = raw.trim().parse().map_err(|e: std::num::ParseIntError| {
        match e.kind() {
            IntErrorKind::PosOverflow => ValidationError::AboveRange { max: MAX_PORT },
            IntErrorKind::NegOverflow => ValidationError::BelowRange,
            _ => ValidationError::NotANumber,
        }
    })?;

    if value < 0 {
        return Err(ValidationError::BelowRange);
    }
    if value > i64::from(MAX_PORT) {
        return Err(ValidationError::AboveRange { max: MAX_PORT });
    }

    Ok(value as u16)
}

/// Check a user-supplied password against the minimum length.
pub fn password_long_enough(raw: &str) -> Result<(), ValidationError> {
    if raw.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

/// Require that a raw input names an existing file.
pub fn existing_path(raw: &str) -> Result<PathBuf, ValidationError> {
    let path = Path::new(raw.trim());
    if path.exists() {
        Ok(path.to_path_buf())
    } else {
        Err(ValidationError::PathNotFound(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_bounds() {
        assert_eq!(port_in_range("0"), Ok(0));
        assert_eq!(port_in_range("65535"), Ok(65535));
        assert_eq!(port_in_range("-1"), Err(ValidationError::BelowRange));
        assert_eq!(
            port_in_range("65536"),
            Err(ValidationError::AboveRange { max: 65535 })
        );
    }

    #[test]
    fn test_port_not_a_number() {
        assert_eq!(port_in_range("abc"), Err(ValidationError::NotANumber));
        assert_eq!(port_in_range(""), Err(ValidationError::NotANumber));
        assert_eq!(port_in_range("4 4"), Err(ValidationError::NotANumber));
    }

    #[test]
    fn test_port_overflow_is_still_a_range_error() {
        assert_eq!(
            port_in_range("99999999999999999999"),
            Err(ValidationError::AboveRange { max: 65535 })
        );
        assert_eq!(
            port_in_range("-99999999999999999999"),
            Err(ValidationError::BelowRange)
        );
    }

    #[test]
    fn test_port_whitespace_tolerated() {
        assert_eq!(port_in_range(" 443 "), Ok(443));
    }

    #[test]
    fn test_password_length() {
        assert!(password_long_enough("abcdef").is_ok());
        assert_eq!(
            password_long_enough("abc"),
            Err(ValidationError::TooShort { min: 6 })
        );
    }

    #[test]
    fn test_existing_path() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let raw = file.path().to_str().unwrap();

        assert_eq!(existing_path(raw), Ok(file.path().to_path_buf()));
        assert!(matches!(
            existing_path("/definitely/not/here.crt"),
            Err(ValidationError::PathNotFound(_))
        ));
    }
}
