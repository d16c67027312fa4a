//! Mailbox model types.

use crate::address::SmtpAddress;
use serde::{Deserialize, Serialize};

/// A mailbox as enumerated by the tenant directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mailbox {
    /// Directory alias; also the local part used for the new address.
    pub alias: String,
    /// Human-readable display name.
    pub display_name: String,
    /// Ordered address list. Replaced wholesale on write, never patched.
    pub addresses: Vec<SmtpAddress>,
}

impl Mailbox {
    /// Creates a mailbox.
    #[must_use]
    pub fn new(
        alias: impl Into<String>,
        display_name: impl Into<String>,
        addresses: Vec<SmtpAddress>,
    ) -> Self {
        Self {
            alias: alias.into(),
            display_name: display_name.into(),
            addresses,
        }
    }

    /// The current primary address, if the list has one.
    #[must_use]
    pub fn primary_address(&self) -> Option<&SmtpAddress> {
        self.addresses.iter().find(|a| a.is_primary)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn primary_address_found() {
        let mbox = Mailbox::new(
            "alice",
            "Alice Adams",
            vec![
                SmtpAddress::secondary("alice", "alt.example"),
                SmtpAddress::primary("alice", "example.com"),
            ],
        );
        assert_eq!(
            mbox.primary_address().unwrap().to_wire(),
            "SMTP:alice@example.com"
        );
    }

    #[test]
    fn primary_address_absent() {
        let mbox = Mailbox::new(
            "bob",
            "Bob",
            vec![SmtpAddress::secondary("bob", "alt.example")],
        );
        assert!(mbox.primary_address().is_none());
    }
}
