//! # mailstamp-core
//!
//! Address-list transformation and run engine for rolling a freshly accepted
//! domain out across a tenant's mailboxes.
//!
//! This crate provides:
//! - The structured [`SmtpAddress`] model and its prefixed wire encoding
//! - The pure per-mailbox transformation ([`compute_updated_addresses`])
//! - The sequential run engine with its commit/dry-run gate ([`run`])
//! - The collaborator traits the tenant client implements
//!
//! It performs no I/O of its own; the directory and persistence collaborators
//! are injected by the caller.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod address;
mod error;
pub mod mailbox;
pub mod run;
pub mod store;
pub mod update;

pub use address::{ParseAddressError, SmtpAddress};
pub use error::{Error, Result};
pub use mailbox::Mailbox;
pub use run::{RunPlan, RunReport, RunSummary, decide, run};
pub use store::{MailboxDirectory, MailboxWriter};
pub use update::{UpdateDecision, compute_updated_addresses};
