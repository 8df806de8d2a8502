//! Claim-based access resolution over tenant index namespaces.
//!
//! The resolver is fail-closed: a missing identity, missing claims and
//! malformed claim values all resolve to an empty tenant set, which grants
//! access to nothing. There is no wildcard or admin tenant.

use std::collections::HashSet;
use std::slice;

use time::OffsetDateTime;
use tracing::{debug, trace};

use crate::claims::ClaimsSource;
use crate::config::TenantIndexConfig;
use crate::descriptor::IndexDescriptor;
use crate::error::{FragmentKind, ValidationError};
use crate::identifiers::{IndexType, TenantId};
use crate::naming::IndexNameBuilder;

/// Tenants the current caller may access, in first-seen order without
/// duplicates.
///
/// Recomputed for every request and never cached. Empty means deny-all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizedTenants {
    tenants: Vec<TenantId>,
}

impl AuthorizedTenants {
    /// An empty set: no tenant is accessible.
    #[must_use]
    pub fn deny_all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, tenant: &TenantId) -> bool {
        self.tenants.contains(tenant)
    }

    /// Returns `true` if no tenant is accessible.
    #[must_use]
    pub fn is_deny_all(&self) -> bool {
        self.tenants.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tenants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tenants.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, TenantId> {
        self.tenants.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[TenantId] {
        &self.tenants
    }
}

impl FromIterator<TenantId> for AuthorizedTenants {
    fn from_iter<I: IntoIterator<Item = TenantId>>(iter: I) -> Self {
        let mut seen = HashSet::new();
        let tenants = iter
            .into_iter()
            .filter(|tenant| seen.insert(tenant.clone()))
            .collect();
        Self { tenants }
    }
}

impl<'a> IntoIterator for &'a AuthorizedTenants {
    type Item = &'a TenantId;
    type IntoIter = slice::Iter<'a, TenantId>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Gate between an authenticated caller and the tenant index namespace.
///
/// Parameterized by the claim type carrying tenant identifiers, so one
/// resolver type serves every claim convention. Immutable and shareable.
#[derive(Debug, Clone)]
pub struct AccessResolver {
    claim_type: String,
    builder: IndexNameBuilder,
}

impl AccessResolver {
    /// # Errors
    ///
    /// Returns [`ValidationError::Empty`] if `claim_type` is blank.
    pub fn new(
        claim_type: impl Into<String>,
        builder: IndexNameBuilder,
    ) -> Result<Self, ValidationError> {
        let claim_type = claim_type.into();
        if claim_type.trim().is_empty() {
            return Err(ValidationError::Empty {
                kind: FragmentKind::ClaimType,
            });
        }
        Ok(Self {
            claim_type,
            builder,
        })
    }

    /// Build from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the prefix or the claim type is invalid.
    pub fn from_config(cfg: &TenantIndexConfig) -> Result<Self, ValidationError> {
        Self::new(cfg.claim_type.clone(), IndexNameBuilder::from_config(cfg)?)
    }

    #[must_use]
    pub fn claim_type(&self) -> &str {
        &self.claim_type
    }

    #[must_use]
    pub fn builder(&self) -> &IndexNameBuilder {
        &self.builder
    }

    /// Tenants named by the caller's claims of the configured type.
    ///
    /// Claim values that are not valid tenant ids are dropped; the remaining
    /// claims still grant access.
    #[tracing::instrument(skip_all, fields(claim_type = %self.claim_type))]
    pub fn authorized_tenants<C>(&self, identity: &C) -> AuthorizedTenants
    where
        C: ClaimsSource + ?Sized,
    {
        let tenants: AuthorizedTenants = identity
            .claim_values(&self.claim_type)
            .into_iter()
            .filter_map(|value| match TenantId::new(value) {
                Ok(tenant) => Some(tenant),
                Err(e) => {
                    debug!(error = %e, "Dropping malformed tenant claim");
                    None
                }
            })
            .collect();

        trace!(tenant_count = tenants.len(), "Resolved authorized tenants");
        tenants
    }

    /// Whether the caller may access the descriptor's tenant.
    #[must_use]
    pub fn is_accessible<C>(&self, descriptor: &IndexDescriptor, identity: &C) -> bool
    where
        C: ClaimsSource + ?Sized,
    {
        self.authorized_tenants(identity)
            .contains(descriptor.tenant())
    }

    /// Wildcard descriptors for every tenant the caller may access.
    #[must_use]
    pub fn accessible_indices<C>(&self, index_type: &IndexType, identity: &C) -> Vec<IndexDescriptor>
    where
        C: ClaimsSource + ?Sized,
    {
        let tenants = self.authorized_tenants(identity);
        self.builder.build_for_tenants(index_type, &tenants)
    }

    /// Per-bucket descriptors over `[from, to)` for every accessible tenant.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvertedRange`] if `from` is after `to`, or
    /// [`ValidationError::RangeOutOfBounds`] if a bound has no UTC form.
    pub fn accessible_indices_in_range<C>(
        &self,
        index_type: &IndexType,
        from: OffsetDateTime,
        to: OffsetDateTime,
        identity: &C,
    ) -> Result<Vec<IndexDescriptor>, ValidationError>
    where
        C: ClaimsSource + ?Sized,
    {
        let tenants = self.authorized_tenants(identity);
        self.builder
            .build_for_range(index_type, from, to, &tenants)
    }

    /// Keep only the descriptors the caller may access, preserving order.
    ///
    /// Claims are resolved once for the whole batch.
    #[must_use]
    pub fn retain_accessible<C>(
        &self,
        mut descriptors: Vec<IndexDescriptor>,
        identity: &C,
    ) -> Vec<IndexDescriptor>
    where
        C: ClaimsSource + ?Sized,
    {
        let tenants = self.authorized_tenants(identity);
        descriptors.retain(|d| tenants.contains(d.tenant()));
        descriptors
    }
}
