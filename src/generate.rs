//! # Generation
//!
//! Build a `.well-known` DID configuration document for DIDs owned by the
//! caller. The inverse of verification: for each DID an unsigned
//! domain-linkage payload is built, signed by the injected
//! [`CredentialIssuer`] as a compact JWT, and appended to the document's
//! `linked_dids` list.

use crate::document::{
    CredentialSubject, DidConfigurationDocument, Issuer, LinkageCredential, VerifiableCredential,
    CREDENTIALS_CONTEXT_V1, DID_CONFIGURATION_CONTEXT_V0_0,
};
use crate::error::Error;
use crate::provider::{CredentialIssuer, IdentifierResolver, ProofFormat};
use crate::{domain, Result};

/// Arguments for generating a DID configuration document.
#[derive(Clone, Debug, Default)]
pub struct GenerationArgs {
    /// DIDs to link to the domain. Each must be managed by the injected
    /// resolver.
    pub dids: Vec<String>,

    /// The domain the DIDs are linked to.
    pub domain: String,

    /// When true, the issuer additionally persists each produced
    /// credential.
    pub save: bool,
}

/// Generates `.well-known` DID configuration documents.
pub struct Generator<R, I>
where
    R: IdentifierResolver,
    I: CredentialIssuer,
{
    resolver: R,
    issuer: I,
}

impl<R, I> Generator<R, I>
where
    R: IdentifierResolver,
    I: CredentialIssuer,
{
    /// Create a generator from the injected DID resolution and credential
    /// issuance capabilities.
    pub const fn new(resolver: R, issuer: I) -> Self {
        Self { resolver, issuer }
    }

    /// Generate a configuration document linking `args.dids` to
    /// `args.domain`.
    ///
    /// Unlike verification, DID resolution failures are not isolated: the
    /// call aborts on the first DID the resolver does not manage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDomain`] for a malformed domain,
    /// [`Error::IdentifierNotFound`] for an unmanaged DID,
    /// [`Error::MissingJwtProof`] if the issuer returns a credential
    /// without a compact JWT, and any issuance failure transparently.
    pub async fn generate(&self, args: &GenerationArgs) -> Result<DidConfigurationDocument> {
        let origin = domain::strip_scheme(&args.domain);
        domain::validate(origin)?;

        let mut linked_dids = Vec::with_capacity(args.dids.len());

        for did in &args.dids {
            let identity = self
                .resolver
                .resolve_identifier(did)
                .await
                .map_err(|_| Error::IdentifierNotFound)?;
            tracing::debug!("issuing domain linkage credential for {did}");

            let payload = VerifiableCredential {
                context: vec![
                    CREDENTIALS_CONTEXT_V1.to_string(),
                    DID_CONFIGURATION_CONTEXT_V0_0.to_string(),
                ]
                .into(),
                type_: vec![
                    "VerifiableCredential".to_string(),
                    "DomainLinkageCredential".to_string(),
                ]
                .into(),
                issuer: Some(Issuer::Object { id: identity.did.clone() }),
                credential_subject: CredentialSubject {
                    id: Some(identity.did),
                    origin: Some(origin.to_string()),
                    ..CredentialSubject::default()
                },
                ..VerifiableCredential::default()
            };

            let signed = self.issuer.issue(&payload, ProofFormat::Jwt, args.save).await?;
            let Some(jwt) = signed.proof.and_then(|proof| proof.jwt) else {
                return Err(Error::MissingJwtProof);
            };
            linked_dids.push(LinkageCredential::Jwt(jwt));
        }

        Ok(DidConfigurationDocument {
            context: DID_CONFIGURATION_CONTEXT_V0_0.to_string(),
            linked_dids: Some(linked_dids),
            entries: None,
        })
    }
}
