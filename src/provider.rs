//! # Provider Traits
//!
//! Capabilities injected into [`crate::Verifier`] and [`crate::Generator`].
//! Cryptographic proof handling, DID management, and network I/O all live
//! behind these traits so the orchestration can be exercised with
//! deterministic fakes (see [`crate::test_utils`]).

use std::future::Future;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::document::VerifiableCredential;

/// [`Fetcher`] retrieves the raw text of a document over HTTPS.
///
/// Implementers need only return the response body for a successful GET of
/// the given URL, or fail. See [`crate::HttpFetcher`] for the reqwest-backed
/// implementation.
pub trait Fetcher: Send + Sync {
    /// Fetch the document at `url`, returning the response body as text.
    ///
    /// # Errors
    ///
    /// Returns an error on any transport failure or non-success status.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String>> + Send;
}

/// [`CredentialVerifier`] validates the cryptographic proof of a linkage
/// credential and returns its decoded claims.
///
/// The raw input is either a compact JWT or a serialized JSON credential;
/// both entry forms in a configuration document converge on this one call.
pub trait CredentialVerifier: Send + Sync {
    /// Verify a raw credential, returning the message it decodes to. The
    /// message is ephemeral; `save` is false for verification-only use.
    ///
    /// # Errors
    ///
    /// Returns an error if the proof, issuer binding, or structure of the
    /// credential is invalid.
    fn verify(&self, raw: &str, save: bool) -> impl Future<Output = Result<Message>> + Send;
}

/// [`CredentialIssuer`] signs a credential payload with the requested proof
/// format.
pub trait CredentialIssuer: Send + Sync {
    /// Sign `credential`, returning the signed artifact. When `save` is
    /// true the issuer additionally persists the produced credential.
    ///
    /// # Errors
    ///
    /// Returns an error if signing fails or the payload is unacceptable to
    /// the issuer.
    fn issue(
        &self, credential: &VerifiableCredential, proof_format: ProofFormat, save: bool,
    ) -> impl Future<Output = Result<VerifiableCredential>> + Send;
}

/// [`IdentifierResolver`] resolves a DID to an identifier managed by the
/// caller, confirming ownership before a linkage credential is issued for
/// it.
pub trait IdentifierResolver: Send + Sync {
    /// Resolve `did` to a managed identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the DID is not managed by this agent.
    fn resolve_identifier(&self, did: &str) -> impl Future<Output = Result<Identifier>> + Send;
}

/// Decoded message returned by a [`CredentialVerifier`].
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Message {
    /// The verified credentials embedded in the message. The first entry
    /// is the linkage credential.
    #[serde(default)]
    pub credentials: Vec<VerifiableCredential>,
}

/// A DID managed by the caller, as returned by an [`IdentifierResolver`].
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Identifier {
    /// The resolved DID.
    pub did: String,
}

/// Proof format requested from a [`CredentialIssuer`].
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProofFormat {
    /// Compact JWT proof.
    #[default]
    Jwt,

    /// Linked-data (JSON-LD) proof.
    Lds,
}
