//! SMTP address model and the prefixed wire encoding.
//!
//! Hosted-mail directories encode the primary/secondary distinction in the
//! case of the address prefix: `SMTP:` marks the single primary address,
//! `smtp:` marks a secondary alias. Internally an address is a structured
//! value; the prefixed string form exists only at the persistence boundary.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Wire prefix for the primary address. Case is significant.
pub const PRIMARY_PREFIX: &str = "SMTP";

/// Wire prefix for a secondary alias. Case is significant.
pub const SECONDARY_PREFIX: &str = "smtp";

/// Errors from parsing the prefixed wire form of an address.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseAddressError {
    /// The prefix token was neither `SMTP` nor `smtp`.
    #[error("invalid address prefix: {0:?} (expected \"SMTP\" or \"smtp\")")]
    InvalidPrefix(String),

    /// No `:` separator between prefix and address.
    #[error("missing prefix separator in {0:?}")]
    MissingSeparator(String),

    /// No `@` between local part and domain.
    #[error("missing '@' in address {0:?}")]
    MissingAt(String),

    /// Empty local part or domain.
    #[error("empty local part or domain in {0:?}")]
    EmptyPart(String),
}

/// A single SMTP address on a mailbox.
///
/// Equality compares all three fields; two addresses for the same email with
/// different primary flags are distinct values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SmtpAddress {
    /// Part before the `@`.
    pub local_part: String,
    /// Part after the `@`.
    pub domain: String,
    /// Whether this is the mailbox's primary (outbound "from") address.
    pub is_primary: bool,
}

impl SmtpAddress {
    /// Creates an address with an explicit primary flag.
    #[must_use]
    pub fn new(local_part: impl Into<String>, domain: impl Into<String>, is_primary: bool) -> Self {
        Self {
            local_part: local_part.into(),
            domain: domain.into(),
            is_primary,
        }
    }

    /// Creates a primary address.
    #[must_use]
    pub fn primary(local_part: impl Into<String>, domain: impl Into<String>) -> Self {
        Self::new(local_part, domain, true)
    }

    /// Creates a secondary alias.
    #[must_use]
    pub fn secondary(local_part: impl Into<String>, domain: impl Into<String>) -> Self {
        Self::new(local_part, domain, false)
    }

    /// The bare `local-part@domain` form, without the prefix token.
    #[must_use]
    pub fn email(&self) -> String {
        format!("{}@{}", self.local_part, self.domain)
    }

    /// Returns a copy demoted to a secondary alias.
    #[must_use]
    pub fn demoted(&self) -> Self {
        Self {
            is_primary: false,
            ..self.clone()
        }
    }

    /// Serializes to the prefixed wire form, e.g. `SMTP:alice@example.com`.
    #[must_use]
    pub fn to_wire(&self) -> String {
        let prefix = if self.is_primary {
            PRIMARY_PREFIX
        } else {
            SECONDARY_PREFIX
        };
        format!("{prefix}:{}@{}", self.local_part, self.domain)
    }

    /// Parses the prefixed wire form.
    ///
    /// # Errors
    ///
    /// Returns [`ParseAddressError`] when the prefix is not exactly `SMTP` or
    /// `smtp`, or the remainder is not `local-part@domain`.
    pub fn parse_wire(s: &str) -> Result<Self, ParseAddressError> {
        let (prefix, rest) = s
            .split_once(':')
            .ok_or_else(|| ParseAddressError::MissingSeparator(s.to_string()))?;

        let is_primary = match prefix {
            PRIMARY_PREFIX => true,
            SECONDARY_PREFIX => false,
            other => return Err(ParseAddressError::InvalidPrefix(other.to_string())),
        };

        let (local_part, domain) = rest
            .split_once('@')
            .ok_or_else(|| ParseAddressError::MissingAt(s.to_string()))?;

        if local_part.is_empty() || domain.is_empty() {
            return Err(ParseAddressError::EmptyPart(s.to_string()));
        }

        Ok(Self::new(local_part, domain, is_primary))
    }
}

impl std::fmt::Display for SmtpAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_wire())
    }
}

impl FromStr for SmtpAddress {
    type Err = ParseAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_wire(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_primary() {
        let addr = SmtpAddress::parse_wire("SMTP:alice@example.com").unwrap();
        assert_eq!(addr.local_part, "alice");
        assert_eq!(addr.domain, "example.com");
        assert!(addr.is_primary);
    }

    #[test]
    fn parse_secondary() {
        let addr = SmtpAddress::parse_wire("smtp:bob@example.org").unwrap();
        assert!(!addr.is_primary);
        assert_eq!(addr.email(), "bob@example.org");
    }

    #[test]
    fn parse_rejects_mixed_case_prefix() {
        let err = SmtpAddress::parse_wire("Smtp:alice@example.com").unwrap_err();
        assert_eq!(err, ParseAddressError::InvalidPrefix("Smtp".to_string()));
    }

    #[test]
    fn parse_rejects_missing_separator() {
        assert!(matches!(
            SmtpAddress::parse_wire("alice@example.com"),
            Err(ParseAddressError::MissingSeparator(_))
        ));
    }

    #[test]
    fn parse_rejects_missing_at() {
        assert!(matches!(
            SmtpAddress::parse_wire("smtp:alice.example.com"),
            Err(ParseAddressError::MissingAt(_))
        ));
    }

    #[test]
    fn parse_rejects_empty_parts() {
        assert!(matches!(
            SmtpAddress::parse_wire("smtp:@example.com"),
            Err(ParseAddressError::EmptyPart(_))
        ));
        assert!(matches!(
            SmtpAddress::parse_wire("SMTP:alice@"),
            Err(ParseAddressError::EmptyPart(_))
        ));
    }

    #[test]
    fn wire_round_trip() {
        for s in ["SMTP:alice@example.com", "smtp:a.b+c@sub.example.org"] {
            let addr: SmtpAddress = s.parse().unwrap();
            assert_eq!(addr.to_wire(), s);
        }
    }

    #[test]
    fn display_matches_wire() {
        let addr = SmtpAddress::primary("alice", "example.com");
        assert_eq!(addr.to_string(), "SMTP:alice@example.com");
        assert_eq!(addr.demoted().to_string(), "smtp:alice@example.com");
    }

    #[test]
    fn primary_flag_distinguishes_equal_emails() {
        let a = SmtpAddress::primary("alice", "example.com");
        let b = SmtpAddress::secondary("alice", "example.com");
        assert_eq!(a.email(), b.email());
        assert_ne!(a, b);
    }
}
