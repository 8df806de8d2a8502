//! Request-scoped identity claims.
//!
//! The access resolver never reads ambient request state: callers pass the
//! claims of the current request explicitly, through [`ClaimsSource`].

use serde::{Deserialize, Serialize};

/// Well-known claim type carrying tenant identifiers.
pub const DEFAULT_TENANT_CLAIM: &str = "customer_id";

/// A single `(type, value)` claim asserted by the authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Claim {
    #[serde(rename = "type")]
    claim_type: String,
    value: String,
}

impl Claim {
    #[must_use]
    pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn claim_type(&self) -> &str {
        &self.claim_type
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Anything exposing the claims of the current request.
///
/// `Option<T>` is a source too: `None` stands for an unauthenticated request
/// and yields no claims.
pub trait ClaimsSource {
    /// Values of every claim of `claim_type`, in the order they were asserted.
    fn claim_values(&self, claim_type: &str) -> Vec<&str>;
}

impl ClaimsSource for [Claim] {
    fn claim_values(&self, claim_type: &str) -> Vec<&str> {
        self.iter()
            .filter(|c| c.claim_type == claim_type)
            .map(Claim::value)
            .collect()
    }
}

impl ClaimsSource for Vec<Claim> {
    fn claim_values(&self, claim_type: &str) -> Vec<&str> {
        self.as_slice().claim_values(claim_type)
    }
}

impl<T: ClaimsSource> ClaimsSource for Option<T> {
    fn claim_values(&self, claim_type: &str) -> Vec<&str> {
        self.as_ref()
            .map(|source| source.claim_values(claim_type))
            .unwrap_or_default()
    }
}

/// The authenticated identity of one request.
///
/// Built by the hosting service's authentication layer and passed to the
/// resolver for the lifetime of that request only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestIdentity {
    /// Subject (user or service) the claims were issued to.
    subject_id: Option<String>,
    #[serde(default)]
    claims: Vec<Claim>,
}

impl RequestIdentity {
    #[must_use]
    pub fn builder() -> RequestIdentityBuilder {
        RequestIdentityBuilder::default()
    }

    /// An identity with no subject and no claims.
    #[must_use]
    pub fn anonymous() -> Self {
        RequestIdentityBuilder::default().build()
    }

    #[must_use]
    pub fn subject_id(&self) -> Option<&str> {
        self.subject_id.as_deref()
    }

    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.subject_id.is_none()
    }

    #[must_use]
    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }
}

impl ClaimsSource for RequestIdentity {
    fn claim_values(&self, claim_type: &str) -> Vec<&str> {
        self.claims.claim_values(claim_type)
    }
}

/// Builder for [`RequestIdentity`]; claims keep the order they are added in.
#[derive(Debug, Default)]
pub struct RequestIdentityBuilder {
    subject_id: Option<String>,
    claims: Vec<Claim>,
}

impl RequestIdentityBuilder {
    #[must_use]
    pub fn subject_id(mut self, subject_id: &str) -> Self {
        self.subject_id = Some(subject_id.to_owned());
        self
    }

    #[must_use]
    pub fn claim(mut self, claim_type: &str, value: &str) -> Self {
        self.claims.push(Claim::new(claim_type, value));
        self
    }

    #[must_use]
    pub fn claims(mut self, claims: impl IntoIterator<Item = Claim>) -> Self {
        self.claims.extend(claims);
        self
    }

    #[must_use]
    pub fn build(self) -> RequestIdentity {
        RequestIdentity {
            subject_id: self.subject_id,
            claims: self.claims,
        }
    }
}
