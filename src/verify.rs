//! # Verification
//!
//! The core of the crate: fetch a domain's `.well-known` DID configuration
//! document, verify each linkage credential through the injected
//! [`CredentialVerifier`], cross-check the claimed origin against the
//! serving domain, and aggregate the outcome into a [`VerificationResult`].
//!
//! Failures are handled at two levels. A domain, download, or document
//! structure problem aborts the call with [`Error`]. A problem with an
//! individual credential never does: each entry is verified independently
//! and its failure is recorded in [`VerificationResult::errors`] while the
//! remaining entries are still processed.

use anyhow::{anyhow, Context};
use serde::Serialize;

use crate::document::{DidConfigurationDocument, LinkageCredential, DID_CONFIGURATION_PATH};
use crate::error::Error;
use crate::provider::{CredentialVerifier, Fetcher};
use crate::{domain, Result};

const ERROR_INVALID_LINKED_DID_CREDENTIAL: &str = "Invalid linked DID credential.";
const ERROR_NO_LINKED_DID_CREDENTIAL: &str = "No linked DID credential.";

/// Verifies `.well-known` DID configuration documents.
pub struct Verifier<F, V>
where
    F: Fetcher,
    V: CredentialVerifier,
{
    fetcher: F,
    credentials: V,
}

impl<F, V> Verifier<F, V>
where
    F: Fetcher,
    V: CredentialVerifier,
{
    /// Create a verifier from the injected fetch and credential
    /// verification capabilities.
    pub const fn new(fetcher: F, credentials: V) -> Self {
        Self { fetcher, credentials }
    }

    /// Verify the DID configuration served by `domain`.
    ///
    /// The domain may carry an `https://` or `http://` prefix, which is
    /// stripped before validation. Every invocation is independent: the
    /// document is fetched fresh and nothing is persisted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDomain`] for a malformed domain,
    /// [`Error::DownloadFailed`] when the document cannot be fetched or
    /// parsed, and [`Error::MalformedDocument`] when it has no linkage
    /// list. Per-credential failures do not error; they are reported in
    /// [`VerificationResult::errors`].
    pub async fn verify(&self, domain: &str) -> Result<VerificationResult> {
        let domain = domain::strip_scheme(domain);
        domain::validate(domain)?;

        let url = format!("https://{domain}{DID_CONFIGURATION_PATH}");
        tracing::debug!("fetching DID configuration from {url}");

        let raw = match self.fetcher.fetch(&url).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!("failed to fetch DID configuration: {e}");
                return Err(Error::DownloadFailed { url, source: e });
            }
        };
        let config: DidConfigurationDocument = match serde_json::from_str(&raw) {
            Ok(config) => config,
            Err(e) => return Err(Error::DownloadFailed { url, source: e.into() }),
        };
        let Some(linked) = config.linked() else {
            return Err(Error::MalformedDocument);
        };

        let mut dids: Vec<String> = Vec::new();
        let mut errors = Vec::new();

        for entry in linked {
            match self.verify_entry(entry, domain).await {
                Ok(did) => {
                    // set semantics, first-seen order
                    if !dids.contains(&did) {
                        dids.push(did);
                    }
                }
                Err(e) => errors.push(VerificationError::from_cause(entry, &e)),
            }
        }

        let valid = errors.is_empty() && !dids.is_empty();

        Ok(VerificationResult {
            domain: domain.to_string(),
            dids,
            errors,
            did_configuration: config,
            valid,
            raw_did_configuration: raw,
        })
    }

    /// Verify a single linkage entry, returning the linked DID. Both entry
    /// forms converge on the injected verifier: embedded credentials are
    /// re-serialized rather than checked through a JSON-LD proof suite.
    async fn verify_entry(
        &self, entry: &LinkageCredential, domain: &str,
    ) -> anyhow::Result<String> {
        let raw = entry.to_raw().context(ERROR_INVALID_LINKED_DID_CREDENTIAL)?;
        let message = self
            .credentials
            .verify(&raw, false)
            .await
            .context(ERROR_INVALID_LINKED_DID_CREDENTIAL)?;
        let Some(verified) = message.credentials.into_iter().next() else {
            return Err(anyhow!(ERROR_NO_LINKED_DID_CREDENTIAL));
        };

        // the claimed origin must match the domain serving the document
        let subject = &verified.credential_subject;
        let origin = subject.origin.as_deref().unwrap_or_default();
        if domain::strip_scheme(origin) != domain {
            let subject_did = subject.id.as_deref().unwrap_or_default();
            return Err(anyhow!(
                "The DID {subject_did} is linked to an unexpected domain {origin}, instead of {domain}"
            ));
        }

        let did = match &verified.issuer {
            Some(issuer) if !issuer.id().is_empty() => issuer.id().to_string(),
            _ => subject
                .id
                .clone()
                .ok_or_else(|| anyhow!("credential contains no issuer or subject DID"))?,
        };
        Ok(did)
    }
}

/// Outcome of verifying a domain's DID configuration.
///
/// Callers must distinguish "verification ran but found problems" (a
/// successful call with `valid == false` and populated `errors`) from
/// "verification could not run at all", which is an [`Error`] instead.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    /// The verified domain, scheme-stripped.
    pub domain: String,

    /// DIDs whose linkage credentials verified, de-duplicated, in
    /// first-seen document order.
    pub dids: Vec<String>,

    /// Per-credential failures, in document order.
    pub errors: Vec<VerificationError>,

    /// The parsed configuration document.
    pub did_configuration: DidConfigurationDocument,

    /// True only when no credential failed and at least one DID verified.
    pub valid: bool,

    /// The original response body, preserved for audit and debugging.
    pub raw_did_configuration: String,
}

/// A linkage credential that failed verification or the origin check.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct VerificationError {
    /// Serialized form of the offending credential.
    pub vc: String,

    /// Failure messages, outermost first, innermost cause last.
    pub errors: Vec<String>,
}

impl VerificationError {
    fn from_cause(entry: &LinkageCredential, cause: &anyhow::Error) -> Self {
        let vc = match entry {
            LinkageCredential::Jwt(jwt) => jwt.clone(),
            LinkageCredential::Vc(vc) => serde_json::to_string(vc).unwrap_or_default(),
            LinkageCredential::Other(value) => value.to_string(),
        };
        Self { vc, errors: cause.chain().map(ToString::to_string).collect() }
    }
}
