//! Validated, canonical identifiers used to compose index names.
//!
//! Every type here is validated exactly once, at construction. The inner
//! string is private and there are no setters, so holding a value is proof
//! that it passed the character rule. Deserialization goes through the same
//! constructors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FragmentKind, ValidationError};

/// Trims, checks the `[a-zA-Z0-9_-]` rule and lowercases.
fn canonicalize(raw: &str, kind: FragmentKind) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { kind });
    }

    if let Some(character) = trimmed
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
    {
        return Err(ValidationError::InvalidCharacter {
            kind,
            value: raw.to_owned(),
            character,
        });
    }

    Ok(trimmed.to_ascii_lowercase())
}

macro_rules! string_conversions {
    ($ty:ident) => {
        impl FromStr for $ty {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<&str> for $ty {
            type Error = ValidationError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<String> for $ty {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(&value)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

/// Identifier of a tenant (customer) owning an index namespace.
///
/// Always lowercase, so `"Acme"` and `"acme"` name the same tenant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TenantId(String);

impl TenantId {
    /// Validate and canonicalize a raw tenant identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the input is empty, whitespace-only or
    /// contains a character outside `[a-zA-Z0-9_-]`.
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        canonicalize(raw, FragmentKind::TenantId).map(Self)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

string_conversions!(TenantId);

/// Deployment-wide segment inserted between index type and tenant.
///
/// The empty string is the "no prefix" sentinel. Whitespace-only input is not
/// treated as empty and is rejected.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct NamingPrefix(String);

impl NamingPrefix {
    /// Validate and canonicalize a raw prefix.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the input is non-empty and either
    /// whitespace-only or contains a character outside `[a-zA-Z0-9_-]`.
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        if raw.is_empty() {
            return Ok(Self::none());
        }
        canonicalize(raw, FragmentKind::NamingPrefix).map(Self)
    }

    /// The "no prefix" sentinel.
    #[must_use]
    pub fn none() -> Self {
        Self(String::new())
    }

    /// Returns `true` for the "no prefix" sentinel.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

string_conversions!(NamingPrefix);

/// Category of documents stored in an index family, e.g. `logs` or `events`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IndexType(String);

impl IndexType {
    /// Validate and canonicalize a raw index type tag.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the input is empty, whitespace-only or
    /// contains a character outside `[a-zA-Z0-9_-]`.
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        canonicalize(raw, FragmentKind::IndexType).map(Self)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

string_conversions!(IndexType);

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn tenant_id_is_lowercased() {
        assert_eq!(TenantId::new("CustomerKAM_1").unwrap().as_str(), "customerkam_1");
        assert_eq!(TenantId::new("CustomerKAM-1").unwrap().as_str(), "customerkam-1");
    }

    #[test]
    fn tenant_id_trims_surrounding_whitespace() {
        assert_eq!(TenantId::new("  Acme\n").unwrap().as_str(), "acme");
    }

    #[test]
    fn tenant_id_rejects_invalid_input() {
        for raw in ["", "  ", "\t", "\n", "$$", "!!WAT!!", "ok..", "a b", "tenant/1"] {
            assert!(TenantId::new(raw).is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn tenant_id_rejects_non_ascii_letters() {
        let err = TenantId::new("caf\u{e9}").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidCharacter {
                kind: FragmentKind::TenantId,
                value: "caf\u{e9}".to_owned(),
                character: '\u{e9}',
            }
        );
    }

    #[test]
    fn tenant_id_error_names_fragment_and_character() {
        let err = TenantId::new("ok..").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("tenant id"), "{message}");
        assert!(message.contains("'ok..'"), "{message}");
        assert!(message.contains("'.'"), "{message}");
    }

    #[test]
    fn whitespace_only_tenant_is_reported_as_empty() {
        assert_eq!(
            TenantId::new(" \t ").unwrap_err(),
            ValidationError::Empty {
                kind: FragmentKind::TenantId
            }
        );
    }

    #[test]
    fn empty_prefix_is_the_none_sentinel() {
        let prefix = NamingPrefix::new("").unwrap();
        assert!(prefix.is_none());
        assert_eq!(prefix, NamingPrefix::none());
        assert_eq!(prefix, NamingPrefix::default());
    }

    #[test]
    fn prefix_rejects_whitespace_and_punctuation() {
        for raw in ["!@#$%", "\t", "\n", "   ", " "] {
            let err = NamingPrefix::new(raw).unwrap_err();
            assert_eq!(err.kind(), Some(FragmentKind::NamingPrefix), "{raw:?}");
        }
    }

    #[test]
    fn prefix_is_lowercased() {
        let prefix = NamingPrefix::new("DB_Prefixx_1").unwrap();
        assert!(!prefix.is_none());
        assert_eq!(prefix.as_str(), "db_prefixx_1");
    }

    #[test]
    fn index_type_is_lowercased() {
        assert_eq!(IndexType::new("Events").unwrap().as_str(), "events");
        assert!(IndexType::new("").is_err());
        assert!(IndexType::new("log.s").is_err());
    }

    #[test]
    fn parse_goes_through_validation() {
        let tenant: TenantId = "ACME".parse().unwrap();
        assert_eq!(tenant.to_string(), "acme");
        assert!("no way".parse::<TenantId>().is_err());
    }

    #[test]
    fn deserialize_validates() {
        let tenant: TenantId = serde_json::from_str("\"Acme\"").unwrap();
        assert_eq!(tenant.as_str(), "acme");

        assert!(serde_json::from_str::<TenantId>("\"a$b\"").is_err());
        assert!(serde_json::from_str::<NamingPrefix>("\"  \"").is_err());
        assert!(
            serde_json::from_str::<NamingPrefix>("\"\"")
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn serializes_as_plain_string() {
        let tenant = TenantId::new("Acme").unwrap();
        assert_eq!(serde_json::to_string(&tenant).unwrap(), "\"acme\"");
    }
}
