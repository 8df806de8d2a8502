//! Configuration for tenant index naming and access resolution.

use serde::Deserialize;

use crate::claims::DEFAULT_TENANT_CLAIM;
use crate::strategy::BucketWidth;

/// Configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TenantIndexConfig {
    /// Deployment-wide naming prefix. Empty means "no prefix".
    pub prefix: String,

    /// Claim type carrying the caller's tenant identifiers.
    pub claim_type: String,

    /// Time bucket width for range queries.
    pub bucket: BucketWidth,
}

impl Default for TenantIndexConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            claim_type: DEFAULT_TENANT_CLAIM.to_owned(),
            bucket: BucketWidth::Year,
        }
    }
}
