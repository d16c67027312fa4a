//! # mailstamp-tenant
//!
//! HTTP client for the tenant admin API: session lifecycle, accepted-domain
//! lookup, mailbox enumeration, and the authoritative replace-all address
//! write. Implements the collaborator traits from `mailstamp-core` so the run
//! engine never sees HTTP.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod error;
mod session;

pub use error::{Error, Result};
pub use session::{DomainRecord, MailboxRecord, Organization, TenantConfig, TenantSession};
