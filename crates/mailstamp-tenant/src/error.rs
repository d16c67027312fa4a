//! Error types for tenant API operations.

use reqwest::StatusCode;

/// Result type alias for tenant API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Tenant API error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Base URL or endpoint path could not be parsed.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// The bearer token was rejected.
    #[error("tenant rejected the credentials (HTTP 401)")]
    Unauthorized,

    /// The API answered with a status the client does not expect.
    #[error("unexpected status {status} from {endpoint}")]
    UnexpectedStatus {
        /// Endpoint path that was called.
        endpoint: String,
        /// Status the server answered with.
        status: StatusCode,
    },

    /// The directory returned an address string the wire codec rejects.
    #[error("invalid address in directory data: {0}")]
    Address(#[from] mailstamp_core::ParseAddressError),
}

impl From<Error> for mailstamp_core::Error {
    fn from(e: Error) -> Self {
        match e {
            Error::Address(parse) => Self::Address(parse),
            other => Self::store(other),
        }
    }
}
