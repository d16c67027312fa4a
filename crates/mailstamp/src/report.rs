//! Formats run results into the human-readable log lines.

use mailstamp_core::{RunPlan, RunSummary, SmtpAddress, UpdateDecision};

fn join_wire(addresses: &[SmtpAddress]) -> String {
    addresses
        .iter()
        .map(SmtpAddress::to_wire)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Opening line of a run.
pub fn header(plan: &RunPlan) -> String {
    let mode = if plan.commit { "commit" } else { "dry-run" };
    format!(
        "run started domain={} mode={mode} make_primary={}",
        plan.domain, plan.make_primary
    )
}

/// The log lines for one mailbox's decision.
pub fn decision_lines(decision: &UpdateDecision) -> Vec<String> {
    let alias = &decision.alias;
    let mut lines = vec![
        format!("mailbox {alias}: current [{}]", join_wire(&decision.original)),
        format!("mailbox {alias}: final [{}]", join_wire(&decision.finalized)),
    ];

    let status = if let Some(error) = &decision.error {
        format!("mailbox {alias}: FAILED: {error}")
    } else if decision.committed {
        format!("mailbox {alias}: committed {}", decision.new_address)
    } else {
        format!("mailbox {alias}: dry-run, would add {}", decision.new_address)
    };
    lines.push(status);
    lines
}

/// Closing line of a run.
pub fn footer(summary: RunSummary) -> String {
    format!(
        "run finished processed={} committed={} failed={}",
        summary.processed, summary.committed, summary.failed
    )
}
