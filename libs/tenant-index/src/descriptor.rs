//! Index descriptors: a tenant bound to a concrete index name or pattern.

use std::fmt;

use serde::Serialize;

use crate::error::{FragmentKind, ValidationError};
use crate::identifiers::{IndexType, NamingPrefix, TenantId};

/// Suffix matching every time partition of a tenant's index family.
pub const WILDCARD: char = '*';

/// Shared stem of every index name for one index type and prefix.
///
/// `{type}` when the prefix is the "no prefix" sentinel, `{type}_{prefix}`
/// otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexBaseName(String);

impl IndexBaseName {
    #[must_use]
    pub fn new(prefix: &NamingPrefix, index_type: &IndexType) -> Self {
        if prefix.is_none() {
            Self(index_type.as_str().to_owned())
        } else {
            Self(format!("{index_type}_{prefix}"))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IndexBaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Suffix naming one time partition of a tenant's index family, e.g. `2024`.
///
/// Only lowercase `[a-z0-9._-]` is accepted, so a label can never widen a
/// pattern with `*` or append another index with `,`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartitionLabel(String);

impl PartitionLabel {
    /// Validate a partition label.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the label is empty or contains a
    /// character outside `[a-z0-9._-]`.
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        if raw.is_empty() {
            return Err(ValidationError::Empty {
                kind: FragmentKind::PartitionLabel,
            });
        }

        if let Some(character) = raw.chars().find(|c| {
            !(c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(*c, '.' | '_' | '-'))
        }) {
            return Err(ValidationError::InvalidCharacter {
                kind: FragmentKind::PartitionLabel,
                value: raw.to_owned(),
                character,
            });
        }

        Ok(Self(raw.to_owned()))
    }

    /// Label rendered from calendar numbers; holds only digits, `.` and `-`.
    pub(crate) fn from_calendar(label: String) -> Self {
        Self(label)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartitionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A resolved index name or name pattern owned by one tenant.
///
/// Descriptors can only be composed from an [`IndexBaseName`], a
/// [`TenantId`] and optionally a [`PartitionLabel`], all of which are already
/// validated and lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct IndexDescriptor {
    tenant: TenantId,
    pattern: String,
}

impl IndexDescriptor {
    /// `{base}_{tenant}_*`: every partition of the tenant's index family.
    #[must_use]
    pub fn all_partitions(base: &IndexBaseName, tenant: &TenantId) -> Self {
        Self {
            tenant: tenant.clone(),
            pattern: format!("{base}_{tenant}_{WILDCARD}"),
        }
    }

    /// `{base}_{tenant}_{partition}`: one concrete partition.
    #[must_use]
    pub fn partition(base: &IndexBaseName, tenant: &TenantId, partition: &PartitionLabel) -> Self {
        Self {
            tenant: tenant.clone(),
            pattern: format!("{base}_{tenant}_{partition}"),
        }
    }

    #[must_use]
    pub fn tenant(&self) -> &TenantId {
        &self.tenant
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns `true` if the pattern ends with the [`WILDCARD`] suffix.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.pattern.ends_with(WILDCARD)
    }
}

impl fmt::Display for IndexDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}
