#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Tenant index namespacing
//!
//! Partitions a shared search backend into per-tenant index namespaces and
//! decides, per request, which of them the caller may touch:
//!
//! - [`TenantId`], [`NamingPrefix`], [`IndexType`] - validated identifiers
//! - [`IndexDescriptor`] - a tenant bound to an index name or pattern
//! - [`IndexNameBuilder`] - naming with an injected [`NamingStrategy`]
//! - [`AccessResolver`] - claim-based, fail-closed index access
//!
//! ## Usage
//!
//! ```
//! use tenant_index::{AccessResolver, IndexType, RequestIdentity, TenantIndexConfig};
//!
//! let resolver = AccessResolver::from_config(&TenantIndexConfig::default())?;
//! let logs = IndexType::new("logs")?;
//!
//! let identity = RequestIdentity::builder()
//!     .subject_id("user-1")
//!     .claim("customer_id", "Acme")
//!     .build();
//!
//! let indices = resolver.accessible_indices(&logs, &identity);
//! assert_eq!(indices[0].pattern(), "logs_acme_*");
//! # Ok::<(), tenant_index::ValidationError>(())
//! ```

pub mod claims;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod identifiers;
pub mod naming;
pub mod prelude;
pub mod resolver;
pub mod strategy;

pub use claims::{
    Claim, ClaimsSource, DEFAULT_TENANT_CLAIM, RequestIdentity, RequestIdentityBuilder,
};
pub use config::TenantIndexConfig;
pub use descriptor::{IndexBaseName, IndexDescriptor, PartitionLabel, WILDCARD};
pub use error::{FragmentKind, ValidationError};
pub use identifiers::{IndexType, NamingPrefix, TenantId};
pub use naming::{IndexNameBuilder, base_name, build_for_range, build_for_tenants};
pub use resolver::{AccessResolver, AuthorizedTenants};
pub use strategy::{BucketWidth, IntervalNamingStrategy, NamingStrategy, TimeBucket, TimeRange};
