//! # Errors
//!
//! Typed errors for configuration verification and generation. These cover
//! the fatal, whole-call failures only: per-credential verification
//! failures are recovered into [`crate::VerificationResult::errors`] and
//! never surface here.

use thiserror::Error;

/// Fatal errors returned by [`crate::Verifier`] and [`crate::Generator`].
#[derive(Error, Debug)]
pub enum Error {
    /// The supplied domain is not a plausible DNS host name.
    #[error("Invalid web domain")]
    InvalidDomain,

    /// The well-known document could not be fetched or parsed as JSON.
    #[error("Failed to download the .well-known DID configuration at '{url}'. Error: {source}")]
    DownloadFailed {
        /// The well-known URL the fetch was attempted against.
        url: String,

        /// The underlying transport or JSON parse failure.
        source: anyhow::Error,
    },

    /// The document contains neither `linked_dids` nor the deprecated
    /// `entries` key.
    #[error("The DID configuration must contain a `linked_dids` property.")]
    MalformedDocument,

    /// A DID passed to the generator is not managed by the injected
    /// resolver. Generation aborts on the first occurrence.
    #[error("Identifier not found")]
    IdentifierNotFound,

    /// The injected issuer returned a credential without a compact JWT
    /// proof despite one being requested.
    #[error("issued credential has no JWT proof")]
    MissingJwtProof,

    /// A collaborator failed outside the per-entry recovery path.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
