//! # Well-Known DID Configuration
//!
//! This crate verifies and generates `.well-known/did-configuration.json`
//! documents: domain-level proofs that a set of Decentralized Identifiers
//! (DIDs) are controlled by, and linked to, a web domain.
//!
//! See the [DIF Well Known DID Configuration](https://identity.foundation/.well-known/resources/did-configuration/)
//! specification for more.
//!
//! Cryptographic signing and verification of linkage credentials is
//! delegated to injected providers ([`Fetcher`], [`CredentialVerifier`],
//! [`CredentialIssuer`], [`IdentifierResolver`]); this crate implements
//! the orchestration only:
//!
//! * [`Verifier`] fetches a domain's configuration document and checks each
//!   linkage credential against the serving domain.
//! * [`Generator`] builds a configuration document for DIDs owned by the
//!   caller.

mod document;
mod domain;
mod error;
mod generate;
mod http;
mod provider;
pub mod test_utils;
mod verify;

pub use self::document::{
    CredentialSubject, DidConfigurationDocument, Issuer, LinkageCredential, OneOrMany, Proof,
    VerifiableCredential, CREDENTIALS_CONTEXT_V1, DID_CONFIGURATION_CONTEXT_V0_0,
    DID_CONFIGURATION_CONTEXT_V0_2, DID_CONFIGURATION_PATH,
};
pub use self::error::Error;
pub use self::generate::{GenerationArgs, Generator};
pub use self::http::HttpFetcher;
pub use self::provider::{
    CredentialIssuer, CredentialVerifier, Fetcher, Identifier, IdentifierResolver, Message,
    ProofFormat,
};
pub use self::verify::{VerificationError, VerificationResult, Verifier};

/// Result type for Well-Known DID Configuration operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
