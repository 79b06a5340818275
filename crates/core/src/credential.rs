//! Service-key credentials.

use base64::{Engine as _, engine::general_purpose};
use serde::Deserialize;
use std::fmt;

/// A sanitized service key for one backend project.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceKey(String);

impl ServiceKey {
    /// Wrap an already sanitized key.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the raw key for request headers.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Decode the unverified JWT payload claims, if the key is a JWT.
    pub fn claims(&self) -> Option<KeyClaims> {
        KeyClaims::decode(&self.0)
    }
}

impl fmt::Debug for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ServiceKey").field(&"<redacted>").finish()
    }
}

/// Claims of interest from a Supabase service key.
///
/// The signature is never checked; the claims only help an operator confirm
/// which project and role each key belongs to.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct KeyClaims {
    /// Project reference.
    #[serde(rename = "ref")]
    pub project_ref: Option<String>,
    /// Postgres role the key maps to (e.g. `service_role`).
    pub role: Option<String>,
}

impl KeyClaims {
    /// Decode the payload segment of a JWT.
    pub fn decode(jwt: &str) -> Option<Self> {
        let payload = jwt.split('.').nth(1)?;
        let bytes = general_purpose::URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    /// Project reference, or `?` when unknown.
    pub fn project_ref_or_unknown(&self) -> &str {
        self.project_ref.as_deref().unwrap_or("?")
    }

    /// Role, or `?` when unknown.
    pub fn role_or_unknown(&self) -> &str {
        self.role.as_deref().unwrap_or("?")
    }
}
