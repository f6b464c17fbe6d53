//! # Test Utilities
//!
//! Deterministic, in-memory implementations of the provider traits for
//! exercising verification and generation without networking or real
//! cryptography. The fakes round-trip credentials through an *unsigned*
//! JWT-shaped encoding (base64url JSON payload with a fixed header and
//! signature), which is enough to test the orchestration: signature
//! validity itself is the injected provider's concern in production.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, bail, Context, Result};
use base64ct::{Base64UrlUnpadded, Encoding};

use crate::document::{Proof, VerifiableCredential, DID_CONFIGURATION_PATH};
use crate::provider::{
    CredentialIssuer, CredentialVerifier, Fetcher, Identifier, IdentifierResolver, Message,
    ProofFormat,
};

// base64url of `{"alg":"none"}`
const TOKEN_HEADER: &str = "eyJhbGciOiJub25lIn0";
const TOKEN_SIGNATURE: &str = "unsigned";

/// Encode a credential as an unsigned JWT-shaped token.
#[must_use]
pub fn encode_token(vc: &VerifiableCredential) -> String {
    let payload = serde_json::to_vec(vc).unwrap_or_default();
    format!("{TOKEN_HEADER}.{}.{TOKEN_SIGNATURE}", Base64UrlUnpadded::encode_string(&payload))
}

/// Decode a credential from an unsigned JWT-shaped token.
///
/// # Errors
///
/// Returns an error if the token is not three dot-separated segments or
/// the payload is not a base64url-encoded credential.
pub fn decode_token(token: &str) -> Result<VerifiableCredential> {
    let segments: Vec<&str> = token.split('.').collect();
    let &[_, payload, _] = segments.as_slice() else {
        bail!("token is not in compact JWT form");
    };
    let bytes = Base64UrlUnpadded::decode_vec(payload)
        .map_err(|e| anyhow!("invalid token payload encoding: {e}"))?;
    serde_json::from_slice(&bytes).context("invalid token payload")
}

/// A [`Fetcher`] serving fixed bodies from memory, keyed by URL.
#[derive(Clone, Debug, Default)]
pub struct StaticFetcher {
    bodies: HashMap<String, String>,
}

impl StaticFetcher {
    /// Create an empty fetcher. Every fetch fails until bodies are added.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` at `domain`'s well-known DID configuration path.
    #[must_use]
    pub fn serve(mut self, domain: &str, body: impl Into<String>) -> Self {
        self.bodies.insert(format!("https://{domain}{DID_CONFIGURATION_PATH}"), body.into());
        self
    }
}

impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.bodies.get(url).cloned().ok_or_else(|| anyhow!("404 Not Found: {url}"))
    }
}

/// A [`CredentialVerifier`] that decodes tokens and embedded credentials
/// structurally, without checking any cryptography.
#[derive(Clone, Debug, Default)]
pub struct FakeVerifier;

impl CredentialVerifier for FakeVerifier {
    async fn verify(&self, raw: &str, _save: bool) -> Result<Message> {
        let vc = if raw.trim_start().starts_with('{') {
            serde_json::from_str(raw).context("invalid credential")?
        } else {
            decode_token(raw)?
        };
        Ok(Message { credentials: vec![vc] })
    }
}

/// A [`CredentialVerifier`] that rejects everything, for exercising
/// invalid-signature scenarios.
#[derive(Clone, Debug, Default)]
pub struct DenyAllVerifier;

impl CredentialVerifier for DenyAllVerifier {
    async fn verify(&self, _raw: &str, _save: bool) -> Result<Message> {
        Err(anyhow!("signature verification failed"))
    }
}

/// A [`CredentialIssuer`] that attaches an unsigned JWT-shaped proof and
/// records which credentials it was asked to persist. Clones share the
/// save log, so a clone kept outside the generator can inspect it.
#[derive(Clone, Debug, Default)]
pub struct FakeIssuer {
    saved: Arc<Mutex<Vec<String>>>,
}

impl FakeIssuer {
    /// Create an issuer with an empty save log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokens the issuer was asked to persist (`save == true`).
    ///
    /// # Panics
    ///
    /// Panics if the save log mutex is poisoned.
    #[must_use]
    pub fn saved(&self) -> Vec<String> {
        self.saved.lock().expect("save log should not be poisoned").clone()
    }
}

impl CredentialIssuer for FakeIssuer {
    async fn issue(
        &self, credential: &VerifiableCredential, proof_format: ProofFormat, save: bool,
    ) -> Result<VerifiableCredential> {
        if proof_format != ProofFormat::Jwt {
            bail!("unsupported proof format");
        }
        let jwt = encode_token(credential);
        if save {
            self.saved.lock().map_err(|_| anyhow!("save log poisoned"))?.push(jwt.clone());
        }
        let mut signed = credential.clone();
        signed.proof =
            Some(Proof { type_: Some("JwtProof2020".to_string()), jwt: Some(jwt), ..Proof::default() });
        Ok(signed)
    }
}

/// An [`IdentifierResolver`] managing a fixed set of DIDs.
#[derive(Clone, Debug, Default)]
pub struct FakeResolver {
    managed: HashSet<String>,
}

impl FakeResolver {
    /// Create a resolver managing the given DIDs.
    #[must_use]
    pub fn new(dids: &[&str]) -> Self {
        Self { managed: dids.iter().map(ToString::to_string).collect() }
    }
}

impl IdentifierResolver for FakeResolver {
    async fn resolve_identifier(&self, did: &str) -> Result<Identifier> {
        if self.managed.contains(did) {
            Ok(Identifier { did: did.to_string() })
        } else {
            Err(anyhow!("identifier {did} is not managed by this agent"))
        }
    }
}
