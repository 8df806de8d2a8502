//! Deterministic construction of index name patterns.

use std::sync::Arc;

use time::OffsetDateTime;

use crate::config::TenantIndexConfig;
use crate::descriptor::{IndexBaseName, IndexDescriptor};
use crate::error::ValidationError;
use crate::identifiers::{IndexType, NamingPrefix, TenantId};
use crate::strategy::{IntervalNamingStrategy, NamingStrategy, TimeRange};

/// Shared stem for every pattern of `index_type` under `prefix`.
#[must_use]
pub fn base_name(prefix: &NamingPrefix, index_type: &IndexType) -> IndexBaseName {
    IndexBaseName::new(prefix, index_type)
}

/// One `{base}_{tenant}_*` descriptor per tenant, in input order.
#[must_use]
pub fn build_for_tenants<'a, I>(
    index_type: &IndexType,
    prefix: &NamingPrefix,
    tenants: I,
) -> Vec<IndexDescriptor>
where
    I: IntoIterator<Item = &'a TenantId>,
{
    let base = base_name(prefix, index_type);
    tenants
        .into_iter()
        .map(|tenant| IndexDescriptor::all_partitions(&base, tenant))
        .collect()
}

/// Per-tenant expansion of `range` through `strategy`, flattened.
///
/// Tenants keep their input order; each tenant's descriptors stay grouped in
/// the order the strategy returned them.
#[must_use]
pub fn build_for_range<'a, I>(
    index_type: &IndexType,
    prefix: &NamingPrefix,
    range: &TimeRange,
    tenants: I,
    strategy: &dyn NamingStrategy,
) -> Vec<IndexDescriptor>
where
    I: IntoIterator<Item = &'a TenantId>,
{
    if range.is_empty() {
        return Vec::new();
    }
    tenants
        .into_iter()
        .flat_map(|tenant| strategy.expand(range, prefix, index_type, tenant))
        .collect()
}

/// Immutable index name builder configured with a prefix and a strategy.
///
/// Cheap to clone and safe to share across threads.
#[derive(Debug, Clone)]
pub struct IndexNameBuilder {
    prefix: NamingPrefix,
    strategy: Arc<dyn NamingStrategy>,
}

impl IndexNameBuilder {
    #[must_use]
    pub fn new(prefix: NamingPrefix, strategy: Arc<dyn NamingStrategy>) -> Self {
        Self { prefix, strategy }
    }

    /// Builder with yearly buckets.
    #[must_use]
    pub fn yearly(prefix: NamingPrefix) -> Self {
        Self::new(prefix, Arc::new(IntervalNamingStrategy::yearly()))
    }

    /// Build from configuration, validating the prefix.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the configured prefix is invalid.
    pub fn from_config(cfg: &TenantIndexConfig) -> Result<Self, ValidationError> {
        let prefix = NamingPrefix::new(&cfg.prefix)?;
        Ok(Self::new(
            prefix,
            Arc::new(IntervalNamingStrategy::new(cfg.bucket)),
        ))
    }

    #[must_use]
    pub fn prefix(&self) -> &NamingPrefix {
        &self.prefix
    }

    #[must_use]
    pub fn strategy(&self) -> &dyn NamingStrategy {
        self.strategy.as_ref()
    }

    #[must_use]
    pub fn base_name(&self, index_type: &IndexType) -> IndexBaseName {
        base_name(&self.prefix, index_type)
    }

    /// Wildcard descriptors covering every partition of each tenant.
    #[must_use]
    pub fn build_for_tenants<'a, I>(&self, index_type: &IndexType, tenants: I) -> Vec<IndexDescriptor>
    where
        I: IntoIterator<Item = &'a TenantId>,
    {
        build_for_tenants(index_type, &self.prefix, tenants)
    }

    /// Concrete per-bucket descriptors for `[from, to)`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvertedRange`] if `from` is after `to`, or
    /// [`ValidationError::RangeOutOfBounds`] if a bound has no UTC form.
    pub fn build_for_range<'a, I>(
        &self,
        index_type: &IndexType,
        from: OffsetDateTime,
        to: OffsetDateTime,
        tenants: I,
    ) -> Result<Vec<IndexDescriptor>, ValidationError>
    where
        I: IntoIterator<Item = &'a TenantId>,
    {
        let range = TimeRange::new(from, to)?;
        Ok(build_for_range(
            index_type,
            &self.prefix,
            &range,
            tenants,
            self.strategy.as_ref(),
        ))
    }
}
