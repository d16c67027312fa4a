//! The run engine: sequential roll-out of a new domain across all mailboxes.

use tracing::{error, info, warn};

use crate::error::{Error, Result};
use crate::mailbox::Mailbox;
use crate::store::{MailboxDirectory, MailboxWriter};
use crate::update::{UpdateDecision, compute_updated_addresses};

/// Parameters of one roll-out run.
#[derive(Debug, Clone)]
pub struct RunPlan {
    /// The freshly accepted domain to roll out.
    pub domain: String,
    /// Add the new address as the primary, demoting any existing primary.
    pub make_primary: bool,
    /// Perform the authoritative writes. False is dry-run, the default.
    pub commit: bool,
}

/// Aggregate counts over one run, for the closing log line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Mailboxes processed.
    pub processed: usize,
    /// Mailboxes whose write succeeded.
    pub committed: usize,
    /// Mailboxes whose write was attempted and failed.
    pub failed: usize,
}

/// Everything a run produced, in mailbox input order.
#[derive(Debug)]
pub struct RunReport {
    /// One decision per mailbox, in the order the directory listed them.
    pub decisions: Vec<UpdateDecision>,
}

impl RunReport {
    /// Aggregates the per-mailbox decisions.
    #[must_use]
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            processed: self.decisions.len(),
            committed: self.decisions.iter().filter(|d| d.committed).count(),
            failed: self.decisions.iter().filter(|d| d.failed()).count(),
        }
    }
}

/// Applies the transformation to one mailbox and, in commit mode, persists it.
///
/// In dry-run mode the writer is never invoked. A refused write is recorded on
/// the decision rather than propagated, so one bad mailbox does not abort the
/// rest of the run.
pub async fn decide<W: MailboxWriter>(
    mailbox: &Mailbox,
    plan: &RunPlan,
    writer: &W,
) -> UpdateDecision {
    let finalized = compute_updated_addresses(
        &mailbox.addresses,
        &mailbox.alias,
        &plan.domain,
        plan.make_primary,
    );
    let new_address =
        crate::address::SmtpAddress::new(&mailbox.alias, &plan.domain, plan.make_primary);
    let mut decision = UpdateDecision::pending(mailbox, new_address, finalized);

    if !plan.commit {
        info!(alias = %mailbox.alias, new = %decision.new_address, "dry-run, not writing");
        return decision;
    }

    match writer.set_addresses(&mailbox.alias, &decision.finalized).await {
        Ok(()) => {
            info!(alias = %mailbox.alias, new = %decision.new_address, "addresses written");
            decision.committed = true;
        }
        Err(e) => {
            error!(alias = %mailbox.alias, error = %e, "address write failed");
            decision.error = Some(e.to_string());
        }
    }

    decision
}

/// Runs the full roll-out: domain check, enumeration, per-mailbox decisions.
///
/// Strictly sequential; decision order equals directory order.
///
/// # Errors
///
/// Returns [`Error::DomainNotAccepted`] before any mailbox is touched when
/// the tenant does not accept `plan.domain`, and propagates directory
/// failures. Per-mailbox write failures do not abort the run; they are
/// recorded on the affected decisions.
pub async fn run<S>(store: &S, plan: &RunPlan) -> Result<RunReport>
where
    S: MailboxDirectory + MailboxWriter,
{
    if !store.domain_accepted(&plan.domain).await? {
        return Err(Error::DomainNotAccepted(plan.domain.clone()));
    }

    let mailboxes = store.list_mailboxes().await?;
    info!(
        domain = %plan.domain,
        commit = plan.commit,
        make_primary = plan.make_primary,
        mailboxes = mailboxes.len(),
        "starting roll-out"
    );

    let mut decisions = Vec::with_capacity(mailboxes.len());
    for mailbox in &mailboxes {
        decisions.push(decide(mailbox, plan, store).await);
    }

    let report = RunReport { decisions };
    let summary = report.summary();
    if summary.failed > 0 {
        warn!(failed = summary.failed, "roll-out finished with failures");
    }
    Ok(report)
}
