//! # Data Model
//!
//! Wire types for the `.well-known/did-configuration.json` document and the
//! domain-linkage credentials it carries. The credential model is a minimal
//! subset of the W3C Verifiable Credentials data model v1.1, just enough
//! to express and inspect a domain linkage. Unknown fields are preserved
//! through flattened maps so credentials survive re-serialization intact.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Path under a domain at which the DID configuration document is served.
pub const DID_CONFIGURATION_PATH: &str = "/.well-known/did-configuration.json";

/// JSON-LD context for v0.0 DID configuration documents.
pub const DID_CONFIGURATION_CONTEXT_V0_0: &str =
    "https://identity.foundation/.well-known/contexts/did-configuration-v0.0.jsonld";

/// JSON-LD context for v0.2 DID configuration documents. Accepted on read
/// alongside v0.0; generated documents reference v0.0.
pub const DID_CONFIGURATION_CONTEXT_V0_2: &str =
    "https://identity.foundation/.well-known/contexts/did-configuration-v0.2.jsonld";

/// Base W3C credentials context referenced by linkage credentials.
pub const CREDENTIALS_CONTEXT_V1: &str = "https://www.w3.org/2018/credentials/v1";

/// A `.well-known` DID configuration document.
///
/// Produced by [`crate::Generator`] and consumed by [`crate::Verifier`].
/// A structurally valid document carries its credentials under
/// `linked_dids`, or under the deprecated `entries` alias which is accepted
/// on read but never written.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct DidConfigurationDocument {
    /// The document's JSON-LD context.
    #[serde(rename = "@context")]
    pub context: String,

    /// Credentials linking DIDs to the serving domain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_dids: Option<Vec<LinkageCredential>>,

    /// Deprecated alias for `linked_dids`. Read-only legacy support.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<LinkageCredential>>,
}

impl DidConfigurationDocument {
    /// The document's linkage credentials, preferring the current key over
    /// the deprecated alias. `None` when neither key is present, which is
    /// a structurally invalid document, as opposed to a present-but-empty
    /// list.
    #[must_use]
    pub fn linked(&self) -> Option<&[LinkageCredential]> {
        self.linked_dids.as_deref().or(self.entries.as_deref())
    }
}

/// A single entry in the configuration's linkage list: either an opaque
/// signed JWT in compact form or an embedded JSON-LD credential.
///
/// An entry of any other shape is captured as [`Self::Other`] so that a
/// single malformed entry fails its own verification rather than aborting
/// the parse of the whole document.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum LinkageCredential {
    /// A signed credential in compact JWT serialization.
    Jwt(String),

    /// An embedded verifiable credential object.
    Vc(VerifiableCredential),

    /// An entry that is neither a JWT string nor a credential object.
    /// Always fails verification, as a per-entry error.
    Other(Value),
}

impl LinkageCredential {
    /// The entry's raw form as submitted to the credential verifier: the
    /// JWT string itself, or any other entry re-serialized to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if an embedded credential cannot be serialized.
    pub fn to_raw(&self) -> anyhow::Result<String> {
        match self {
            Self::Jwt(jwt) => Ok(jwt.clone()),
            Self::Vc(vc) => Ok(serde_json::to_string(vc)?),
            Self::Other(value) => Ok(value.to_string()),
        }
    }
}

/// A domain-linkage verifiable credential.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct VerifiableCredential {
    /// JSON-LD context(s). A single URI or an ordered set.
    #[serde(rename = "@context", skip_serializing_if = "OneOrMany::is_empty")]
    pub context: OneOrMany<String>,

    /// Credential type(s), e.g.
    /// `["VerifiableCredential", "DomainLinkageCredential"]`.
    #[serde(rename = "type", skip_serializing_if = "OneOrMany::is_empty")]
    pub type_: OneOrMany<String>,

    /// The credential's issuer: a DID, either bare or wrapped in an object
    /// with an `id` property.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<Issuer>,

    /// RFC 3339 timestamp the credential becomes valid.
    #[serde(rename = "issuanceDate", skip_serializing_if = "Option::is_none")]
    pub issuance_date: Option<chrono::DateTime<chrono::Utc>>,

    /// Claims about the credential subject: for domain linkage, the
    /// subject DID and the origin it is linked to.
    #[serde(rename = "credentialSubject")]
    pub credential_subject: CredentialSubject,

    /// Cryptographic proof. Absent on unsigned payloads submitted for
    /// issuance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof: Option<Proof>,

    /// Fields outside the domain-linkage subset, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A credential issuer: either a bare DID string or an object with an `id`
/// property. Both forms appear in published configuration documents.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Issuer {
    /// Bare issuer DID.
    Id(String),

    /// Issuer object with an `id` property.
    Object {
        /// The issuer DID.
        id: String,
    },
}

impl Issuer {
    /// The issuer's DID regardless of representation.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) | Self::Object { id } => id,
        }
    }
}

/// Domain-linkage credential subject.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct CredentialSubject {
    /// The linked DID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The web origin the DID claims to be linked to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,

    /// Additional subject claims, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A credential proof. Modelled loosely: the verifier delegates proof
/// checking to the injected provider, so only the compact JWT form issued
/// by [`crate::Generator`] is given a named field.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Proof {
    /// Proof suite type, e.g. `JwtProof2020`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    /// Compact JWT serialization of the signed credential.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jwt: Option<String>,

    /// Suite-specific proof properties, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A value that serializes as either a single item or an ordered set, as
/// JSON-LD allows for `@context` and `type`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// A single item.
    One(T),

    /// An ordered set of items.
    Many(Vec<T>),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl<T> OneOrMany<T> {
    /// True when no items are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::One(_) => false,
            Self::Many(items) => items.is_empty(),
        }
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(items: Vec<T>) -> Self {
        Self::Many(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linked_dids_preferred_over_entries() {
        let doc: DidConfigurationDocument = serde_json::from_str(
            r#"{"@context": "ctx", "linked_dids": ["a.b.c"], "entries": ["x.y.z"]}"#,
        )
        .unwrap();
        assert_eq!(doc.linked(), Some(&[LinkageCredential::Jwt("a.b.c".into())][..]));
    }

    #[test]
    fn entries_alias_accepted() {
        let doc: DidConfigurationDocument =
            serde_json::from_str(r#"{"@context": "ctx", "entries": ["a.b.c"]}"#).unwrap();
        assert!(doc.linked_dids.is_none());
        assert_eq!(doc.linked().unwrap().len(), 1);
    }

    #[test]
    fn missing_linkage_keys() {
        let doc: DidConfigurationDocument =
            serde_json::from_str(r#"{"@context": "ctx", "foo": []}"#).unwrap();
        assert!(doc.linked().is_none());
    }

    #[test]
    fn entries_never_written() {
        let doc = DidConfigurationDocument {
            context: DID_CONFIGURATION_CONTEXT_V0_0.to_string(),
            linked_dids: Some(vec![LinkageCredential::Jwt("a.b.c".into())]),
            entries: None,
        };
        let json = serde_json::to_string(&doc).unwrap();
        assert!(!json.contains("entries"));
    }

    #[test]
    fn embedded_credential_with_bare_issuer() {
        let entry: LinkageCredential = serde_json::from_str(
            r#"{
                "@context": ["https://www.w3.org/2018/credentials/v1"],
                "type": ["VerifiableCredential", "DomainLinkageCredential"],
                "issuer": "did:ethr:0xcafe",
                "credentialSubject": {"id": "did:ethr:0xcafe", "origin": "test.com"},
                "proof": {"type": "EthereumEip712Signature2021", "proofValue": "0xff"}
            }"#,
        )
        .unwrap();
        let LinkageCredential::Vc(vc) = entry else {
            panic!("should be an embedded credential");
        };
        assert_eq!(vc.issuer.as_ref().unwrap().id(), "did:ethr:0xcafe");
        assert_eq!(vc.credential_subject.origin.as_deref(), Some("test.com"));
    }

    #[test]
    fn unexpected_entry_shape_still_parses() {
        let doc: DidConfigurationDocument = serde_json::from_str(
            r#"{"@context": "ctx", "linked_dids": ["a.b.c", 42, [true]]}"#,
        )
        .unwrap();
        let linked = doc.linked().unwrap();
        assert_eq!(linked.len(), 3);
        assert!(matches!(&linked[1], LinkageCredential::Other(v) if v == &serde_json::json!(42)));
        assert_eq!(linked[2].to_raw().unwrap(), "[true]");
    }

    #[test]
    fn extra_fields_survive_roundtrip() {
        let json = r#"{"@context":["c"],"type":["t"],"issuer":{"id":"did:ex:1"},"issuanceDate":"2021-11-15T16:52:52Z","credentialSubject":{"id":"did:ex:1","origin":"mesh.xyz","role":"admin"},"proof":{"type":"JwtProof2020","jwt":"a.b.c"},"expirationDate":"2031-11-15T16:52:52Z"}"#;
        let vc: VerifiableCredential = serde_json::from_str(json).unwrap();
        assert!(vc.extra.contains_key("expirationDate"));
        assert_eq!(vc.credential_subject.extra["role"], "admin");
        let out = serde_json::to_value(&vc).unwrap();
        assert_eq!(out["expirationDate"], "2031-11-15T16:52:52Z");
    }
}
