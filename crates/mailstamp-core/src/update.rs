//! The address-list transformation.
//!
//! One pure function computes a mailbox's new address list when a freshly
//! accepted domain is rolled out, and one records the commit/no-commit
//! outcome per mailbox.

use crate::address::SmtpAddress;
use crate::mailbox::Mailbox;

/// Computes the updated address list for one mailbox.
///
/// Builds `local_part@domain` (primary iff `make_primary`), removes any
/// existing entry exactly equal to it, primary flag included, so a re-run
/// cannot duplicate it, demotes every remaining primary when the new address
/// takes over as primary, and appends the new address at the end.
///
/// The duplicate guard is deliberately exact: a same-email entry whose
/// primary flag differs is left untouched. In particular a secondary run
/// never demotes an existing primary for the same email.
///
/// Pure and idempotent: applying it twice with the same arguments yields the
/// same list as applying it once.
#[must_use]
pub fn compute_updated_addresses(
    current: &[SmtpAddress],
    local_part: &str,
    domain: &str,
    make_primary: bool,
) -> Vec<SmtpAddress> {
    let new_address = SmtpAddress::new(local_part, domain, make_primary);

    let mut updated: Vec<SmtpAddress> = current
        .iter()
        .filter(|addr| **addr != new_address)
        .map(|addr| {
            if make_primary && addr.is_primary {
                addr.demoted()
            } else {
                addr.clone()
            }
        })
        .collect();

    updated.push(new_address);
    updated
}

/// Per-mailbox outcome of one run, kept only long enough to log it.
#[derive(Debug, Clone)]
pub struct UpdateDecision {
    /// Alias of the mailbox the decision is about.
    pub alias: String,
    /// Address list before the transformation.
    pub original: Vec<SmtpAddress>,
    /// The address added by this run.
    pub new_address: SmtpAddress,
    /// Address list after the transformation.
    pub finalized: Vec<SmtpAddress>,
    /// Whether the list was written back to the tenant.
    pub committed: bool,
    /// Write failure, if the commit was attempted and refused.
    pub error: Option<String>,
}

impl UpdateDecision {
    /// Builds the decision record for a mailbox before any write happens.
    #[must_use]
    pub fn pending(mailbox: &Mailbox, new_address: SmtpAddress, finalized: Vec<SmtpAddress>) -> Self {
        Self {
            alias: mailbox.alias.clone(),
            original: mailbox.addresses.clone(),
            new_address,
            finalized,
            committed: false,
            error: None,
        }
    }

    /// Whether the write for this mailbox was attempted and failed.
    #[must_use]
    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}
