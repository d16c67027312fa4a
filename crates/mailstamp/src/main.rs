//! `mailstamp` - Bulk SMTP alias roll-out for tenant domain cutovers
//!
//! Adds `alias@<new-domain>` to every mailbox of a tenant, as a secondary
//! alias or as the new primary address. Dry-run by default; `--commit`
//! performs the writes. Every run appends to a human-readable log file.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod report;
mod runlog;

use anyhow::{Context as _, Result, bail};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mailstamp_core::RunPlan;
use mailstamp_tenant::{TenantConfig, TenantSession};

use runlog::RunLog;

#[derive(Parser)]
#[command(
    name = "mailstamp",
    about = "Bulk SMTP alias roll-out for tenant domain cutovers",
    version
)]
struct Args {
    /// The freshly accepted domain to roll out, e.g. new.example.com
    #[arg(long)]
    domain: String,

    /// Perform the writes. Without this flag the run is a dry-run.
    #[arg(long)]
    commit: bool,

    /// Make the new address the primary, demoting any existing primary.
    #[arg(long)]
    make_primary: bool,

    /// Base URL of the tenant admin API
    #[arg(long, env = "MAILSTAMP_BASE_URL")]
    base_url: url::Url,

    /// Bearer token for the tenant admin API
    #[arg(long, env = "MAILSTAMP_TOKEN", hide_env_values = true)]
    token: String,

    /// Path of the append-only run log
    #[arg(long, default_value = "mailstamp.log")]
    log_file: std::path::PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mailstamp=info,mailstamp_core=info,mailstamp_tenant=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut log = RunLog::open(&args.log_file)
        .with_context(|| format!("cannot open run log {}", args.log_file.display()))?;

    let plan = RunPlan {
        domain: args.domain,
        make_primary: args.make_primary,
        commit: args.commit,
    };

    let session = TenantSession::connect(TenantConfig {
        base_url: args.base_url,
        token: args.token,
    })
    .await
    .context("cannot establish tenant session")?;
    info!(tenant = %session.organization().name, "connected");

    log.line(&report::header(&plan))?;

    let run_report = match mailstamp_core::run(&session, &plan).await {
        Ok(run_report) => run_report,
        Err(e) => {
            log.line(&format!("run aborted: {e}"))?;
            session.close();
            return Err(e).context("roll-out aborted");
        }
    };

    for decision in &run_report.decisions {
        for line in report::decision_lines(decision) {
            log.line(&line)?;
        }
    }

    let summary = run_report.summary();
    log.line(&report::footer(summary))?;
    session.close();

    println!(
        "{} mailboxes processed, {} committed, {} failed ({})",
        summary.processed,
        summary.committed,
        summary.failed,
        if plan.commit { "commit" } else { "dry-run" }
    );

    if summary.failed > 0 {
        warn!(failed = summary.failed, "some mailboxes were not updated");
        bail!("{} mailbox update(s) failed; see the run log", summary.failed);
    }
    Ok(())
}
