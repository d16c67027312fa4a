//! Error types for the core library.

use thiserror::Error;

/// Errors that can occur while running an address roll-out.
#[derive(Debug, Error)]
pub enum Error {
    /// The target domain is not an accepted domain of the tenant.
    #[error("domain {0:?} is not an accepted domain of the tenant")]
    DomainNotAccepted(String),

    /// Address wire form could not be parsed.
    #[error("address parse error: {0}")]
    Address(#[from] crate::address::ParseAddressError),

    /// The injected directory or persistence collaborator failed.
    #[error("mailbox store error: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wraps a collaborator failure.
    #[must_use]
    pub fn store(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Store(Box::new(source))
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
