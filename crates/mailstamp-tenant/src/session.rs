//! Authenticated tenant session with an explicit connect/use/close lifecycle.

use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use mailstamp_core::{Mailbox, MailboxDirectory, MailboxWriter, SmtpAddress};

use crate::error::{Error, Result};

/// Connection parameters for a tenant session.
#[derive(Debug, Clone)]
pub struct TenantConfig {
    /// Base URL of the tenant admin API, e.g. `https://admin.example.com/`.
    /// A missing trailing slash is added on connect, so
    /// `https://admin.example.com/api` and `https://admin.example.com/api/`
    /// address the same API root.
    pub base_url: Url,
    /// Bearer token for the admin API.
    pub token: String,
}

/// `Url::join` resolves relative to the parent of a path without a trailing
/// slash, which would silently drop the last segment of the base URL.
fn ensure_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// Organization record returned when a session is established.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Organization {
    /// Stable tenant identifier.
    pub id: String,
    /// Display name of the tenant.
    pub name: String,
}

/// Accepted-domain record.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DomainRecord {
    /// Domain name as registered.
    pub name: String,
    /// Whether the registration has been verified and the domain accepts mail.
    pub verified: bool,
}

/// One mailbox as returned by the directory listing.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailboxRecord {
    /// Directory alias.
    pub alias: String,
    /// Display name.
    pub display_name: String,
    /// Prefixed wire strings, e.g. `SMTP:alice@example.com`.
    pub email_addresses: Vec<String>,
}

impl MailboxRecord {
    /// Decodes the wire address strings into the structured model.
    ///
    /// # Errors
    ///
    /// Returns an error when any address string fails the wire codec.
    pub fn into_mailbox(self) -> Result<Mailbox> {
        let addresses = self
            .email_addresses
            .iter()
            .map(|s| SmtpAddress::parse_wire(s))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Mailbox::new(self.alias, self.display_name, addresses))
    }
}

#[derive(Debug, Deserialize)]
struct MailboxListing {
    mailboxes: Vec<MailboxRecord>,
}

#[derive(Debug, Serialize)]
struct SetAddressesBody<'a> {
    email_addresses: &'a [String],
}

/// An authenticated session against the tenant admin API.
///
/// Obtained from [`TenantSession::connect`], used for the duration of one run,
/// torn down with [`TenantSession::close`]. The session is the injected
/// directory and persistence collaborator of the run engine.
#[derive(Debug)]
pub struct TenantSession {
    http: Client,
    base_url: Url,
    token: String,
    organization: Organization,
}

impl TenantSession {
    /// Establishes a session by validating the token against the tenant.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] when the token is rejected, and
    /// transport or status errors otherwise.
    pub async fn connect(config: TenantConfig) -> Result<Self> {
        let http = Client::new();
        let base_url = ensure_trailing_slash(config.base_url);
        let url = base_url.join("v1/organization")?;
        let response = http
            .get(url)
            .bearer_auth(&config.token)
            .send()
            .await?;

        let organization: Organization = Self::expect_ok(response, "v1/organization")
            .await?
            .json()
            .await?;
        info!(tenant = %organization.name, "tenant session established");

        Ok(Self {
            http,
            base_url,
            token: config.token,
            organization,
        })
    }

    /// The organization this session is connected to.
    #[must_use]
    pub const fn organization(&self) -> &Organization {
        &self.organization
    }

    /// Tears the session down.
    pub fn close(self) {
        info!(tenant = %self.organization.name, "tenant session closed");
        drop(self);
    }

    /// Checks whether `domain` is registered and verified for the tenant.
    ///
    /// A 404 means the domain is not registered at all; both that and an
    /// unverified registration count as not accepted.
    ///
    /// # Errors
    ///
    /// Returns transport or status errors from the lookup.
    pub async fn domain_accepted(&self, domain: &str) -> Result<bool> {
        let endpoint = format!("v1/domains/{domain}");
        let url = self.base_url.join(&endpoint)?;
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(domain, "domain not registered");
            return Ok(false);
        }
        let record: DomainRecord = Self::expect_ok(response, &endpoint).await?.json().await?;
        Ok(record.verified)
    }

    /// Fetches the full mailbox list as one materialized sequence.
    ///
    /// # Errors
    ///
    /// Returns transport, status, or address-decoding errors.
    pub async fn list_mailboxes(&self) -> Result<Vec<Mailbox>> {
        let url = self.base_url.join("v1/mailboxes")?;
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let listing: MailboxListing = Self::expect_ok(response, "v1/mailboxes")
            .await?
            .json()
            .await?;
        debug!(count = listing.mailboxes.len(), "mailboxes listed");
        listing
            .mailboxes
            .into_iter()
            .map(MailboxRecord::into_mailbox)
            .collect()
    }

    /// Replaces the full address list of one mailbox.
    ///
    /// Addresses are serialized to their prefixed wire strings here, at the
    /// persistence boundary. Not retried on failure.
    ///
    /// # Errors
    ///
    /// Returns transport or status errors from the write.
    pub async fn set_addresses(&self, alias: &str, addresses: &[SmtpAddress]) -> Result<()> {
        let endpoint = format!("v1/mailboxes/{alias}/addresses");
        let url = self.base_url.join(&endpoint)?;
        let wire: Vec<String> = addresses.iter().map(SmtpAddress::to_wire).collect();
        let response = self
            .http
            .put(url)
            .bearer_auth(&self.token)
            .json(&SetAddressesBody {
                email_addresses: &wire,
            })
            .send()
            .await?;

        Self::expect_ok(response, &endpoint).await?;
        debug!(alias, count = wire.len(), "address list replaced");
        Ok(())
    }

    async fn expect_ok(response: Response, endpoint: &str) -> Result<Response> {
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED => Err(Error::Unauthorized),
            status => Err(Error::UnexpectedStatus {
                endpoint: endpoint.to_string(),
                status,
            }),
        }
    }
}

impl MailboxDirectory for TenantSession {
    async fn domain_accepted(&self, domain: &str) -> mailstamp_core::Result<bool> {
        Ok(Self::domain_accepted(self, domain).await?)
    }

    async fn list_mailboxes(&self) -> mailstamp_core::Result<Vec<Mailbox>> {
        Ok(Self::list_mailboxes(self).await?)
    }
}

impl MailboxWriter for TenantSession {
    async fn set_addresses(
        &self,
        alias: &str,
        addresses: &[SmtpAddress],
    ) -> mailstamp_core::Result<()> {
        Ok(Self::set_addresses(self, alias, addresses).await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn mailbox_record_decodes() {
        let record = MailboxRecord {
            alias: "alice".to_string(),
            display_name: "Alice Adams".to_string(),
            email_addresses: vec![
                "SMTP:alice@old.com".to_string(),
                "smtp:alice@alt.com".to_string(),
            ],
        };

        let mailbox = record.into_mailbox().unwrap();
        assert_eq!(mailbox.alias, "alice");
        assert_eq!(mailbox.addresses.len(), 2);
        assert!(mailbox.addresses[0].is_primary);
        assert!(!mailbox.addresses[1].is_primary);
    }

    #[test]
    fn mailbox_record_rejects_bad_prefix() {
        let record = MailboxRecord {
            alias: "bob".to_string(),
            display_name: "Bob".to_string(),
            email_addresses: vec!["x500:/o=org/cn=bob".to_string()],
        };
        assert!(matches!(record.into_mailbox(), Err(Error::Address(_))));
    }

    #[test]
    fn listing_deserialization() {
        let json = r#"{
            "mailboxes": [
                {
                    "alias": "alice",
                    "display_name": "Alice Adams",
                    "email_addresses": ["SMTP:alice@old.com"]
                }
            ]
        }"#;

        let listing: MailboxListing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.mailboxes.len(), 1);
        assert_eq!(listing.mailboxes[0].alias, "alice");
    }

    #[test]
    fn domain_record_deserialization() {
        let json = r#"{"name": "new.com", "verified": false}"#;
        let record: DomainRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name, "new.com");
        assert!(!record.verified);
    }

    #[test]
    fn set_addresses_body_serialization() {
        let wire = vec!["smtp:alice@new.com".to_string()];
        let body = SetAddressesBody {
            email_addresses: &wire,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["email_addresses"][0], "smtp:alice@new.com");
    }

    #[test]
    fn base_url_without_trailing_slash_keeps_its_last_segment() {
        let base = ensure_trailing_slash("https://admin.example.com/api".parse().unwrap());
        assert_eq!(base.as_str(), "https://admin.example.com/api/");
        assert_eq!(
            base.join("v1/organization").unwrap().as_str(),
            "https://admin.example.com/api/v1/organization"
        );
    }

    #[test]
    fn base_url_with_trailing_slash_is_unchanged() {
        let base = ensure_trailing_slash("https://admin.example.com/api/".parse().unwrap());
        assert_eq!(base.as_str(), "https://admin.example.com/api/");
    }

    #[test]
    fn tenant_error_converts_to_core_store_error() {
        let err = Error::UnexpectedStatus {
            endpoint: "v1/mailboxes".to_string(),
            status: StatusCode::BAD_GATEWAY,
        };
        let core: mailstamp_core::Error = err.into();
        assert!(matches!(core, mailstamp_core::Error::Store(_)));
    }
}
