//! Collaborator traits the run engine is written against.
//!
//! The tenant HTTP client implements both; tests substitute in-memory mocks.

use crate::address::SmtpAddress;
use crate::error::Result;
use crate::mailbox::Mailbox;

/// Read side of the tenant: domain registration and mailbox enumeration.
pub trait MailboxDirectory {
    /// Whether `domain` is registered and accepted by the tenant.
    fn domain_accepted(&self, domain: &str) -> impl Future<Output = Result<bool>> + Send;

    /// Enumerates every mailbox as a materialized list.
    fn list_mailboxes(&self) -> impl Future<Output = Result<Vec<Mailbox>>> + Send;
}

/// Write side of the tenant: the authoritative replace-all address write.
pub trait MailboxWriter {
    /// Replaces the full address list of the mailbox identified by `alias`.
    ///
    /// Addresses are serialized to their prefixed wire strings at this
    /// boundary. The write is not retried on failure.
    fn set_addresses(
        &self,
        alias: &str,
        addresses: &[SmtpAddress],
    ) -> impl Future<Output = Result<()>> + Send;
}
