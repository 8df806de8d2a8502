//! Error types for tenant index naming.

use std::fmt;

use thiserror::Error;
use time::OffsetDateTime;

/// The kind of input fragment a [`ValidationError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    TenantId,
    NamingPrefix,
    IndexType,
    ClaimType,
    PartitionLabel,
}

impl FragmentKind {
    /// Human-readable character class accepted for this fragment.
    #[must_use]
    pub fn allowed_characters(self) -> &'static str {
        match self {
            Self::PartitionLabel => "lowercase letters, digits, '.', '_' and '-'",
            Self::TenantId | Self::NamingPrefix | Self::IndexType | Self::ClaimType => {
                "letters, digits, '_' and '-'"
            }
        }
    }
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TenantId => "tenant id",
            Self::NamingPrefix => "naming prefix",
            Self::IndexType => "index type",
            Self::ClaimType => "claim type",
            Self::PartitionLabel => "partition label",
        };
        f.write_str(name)
    }
}

/// Errors raised while constructing identifiers or naming inputs.
///
/// Access denial is never an error: an unauthorized caller simply resolves to
/// an empty tenant set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Input was empty or contained only whitespace.
    #[error("{kind} must not be empty or whitespace-only")]
    Empty { kind: FragmentKind },

    /// Input contained a character outside the fragment's allowed class.
    #[error(
        "{kind} '{value}' contains invalid character {character:?}: only {} are allowed",
        .kind.allowed_characters()
    )]
    InvalidCharacter {
        kind: FragmentKind,
        value: String,
        character: char,
    },

    /// Lower bound of a time range lies after its upper bound.
    #[error("time range start {from} is after its end {to}")]
    InvertedRange {
        from: OffsetDateTime,
        to: OffsetDateTime,
    },

    /// A range bound has no UTC representation within the supported calendar.
    #[error("time range {from} .. {to} falls outside the representable UTC calendar")]
    RangeOutOfBounds {
        from: OffsetDateTime,
        to: OffsetDateTime,
    },
}

impl ValidationError {
    /// The fragment kind this error refers to, if any.
    #[must_use]
    pub fn kind(&self) -> Option<FragmentKind> {
        match self {
            Self::Empty { kind } | Self::InvalidCharacter { kind, .. } => Some(*kind),
            Self::InvertedRange { .. } | Self::RangeOutOfBounds { .. } => None,
        }
    }
}
