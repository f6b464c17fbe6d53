//! # Domain Handling
//!
//! Normalization and validation of the web domain a configuration document
//! is served from (and the origin claimed inside linkage credentials).

use std::sync::LazyLock;

use regex::Regex;

use crate::error::Error;

// Simplified RFC 1035 host name: dot-separated labels that start and end
// alphanumeric with interior hyphens, ending in an alphabetic label of at
// least two characters.
static DOMAIN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^[a-zA-Z0-9]([a-zA-Z0-9-]*[a-zA-Z0-9])?(\\.[a-zA-Z0-9]([a-zA-Z0-9-]*[a-zA-Z0-9])?)*\\.[a-zA-Z]{2,}$")
        .expect("should compile")
});

/// Strip a leading `https://` or `http://` scheme from a domain or origin.
///
/// A plain prefix strip, not URL parsing: paths, ports and userinfo are
/// left untouched and will fail validation downstream.
#[must_use]
pub fn strip_scheme(domain: &str) -> &str {
    domain
        .strip_prefix("https://")
        .or_else(|| domain.strip_prefix("http://"))
        .unwrap_or(domain)
}

/// Check that a (scheme-stripped) domain is a plausible DNS host name.
///
/// # Errors
///
/// Returns [`Error::InvalidDomain`] if the domain does not match the host
/// name pattern.
pub fn validate(domain: &str) -> crate::Result<()> {
    if DOMAIN_REGEX.is_match(domain) {
        Ok(())
    } else {
        Err(Error::InvalidDomain)
    }
}
