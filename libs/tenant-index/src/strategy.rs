//! Time-partitioned naming strategies.
//!
//! A [`NamingStrategy`] expands a half-open [`TimeRange`] into one
//! [`IndexDescriptor`] per time bucket for a single tenant. Implementations
//! must return buckets that are contiguous, non-overlapping and ascending,
//! and must return nothing for an empty range.

use std::fmt;
use std::iter::successors;

use serde::Deserialize;
use time::{Date, Month, OffsetDateTime, Time, UtcOffset};

use crate::descriptor::{IndexBaseName, IndexDescriptor, PartitionLabel};
use crate::error::ValidationError;
use crate::identifiers::{IndexType, NamingPrefix, TenantId};

/// Half-open range of instants `[from, to)`, normalized to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    from: OffsetDateTime,
    to: OffsetDateTime,
}

impl TimeRange {
    /// Build a range, rejecting `from > to`. `from == to` is a valid empty
    /// range.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvertedRange`] if `from` is after `to`, and
    /// [`ValidationError::RangeOutOfBounds`] if either bound has no UTC
    /// representation.
    pub fn new(from: OffsetDateTime, to: OffsetDateTime) -> Result<Self, ValidationError> {
        if from > to {
            return Err(ValidationError::InvertedRange { from, to });
        }
        let (Some(from_utc), Some(to_utc)) = (
            from.checked_to_offset(UtcOffset::UTC),
            to.checked_to_offset(UtcOffset::UTC),
        ) else {
            return Err(ValidationError::RangeOutOfBounds { from, to });
        };
        Ok(Self {
            from: from_utc,
            to: to_utc,
        })
    }

    #[must_use]
    pub fn from(&self) -> OffsetDateTime {
        self.from
    }

    #[must_use]
    pub fn to(&self) -> OffsetDateTime {
        self.to
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }
}

/// Capability expanding a time range into per-bucket index descriptors.
///
/// The strategy trusts its inputs: tenant, prefix and type are already
/// validated values.
pub trait NamingStrategy: Send + Sync + fmt::Debug {
    /// Expand `range` into descriptors for one tenant, in chronological order.
    fn expand(
        &self,
        range: &TimeRange,
        prefix: &NamingPrefix,
        index_type: &IndexType,
        tenant: &TenantId,
    ) -> Vec<IndexDescriptor>;
}

/// Width of a time bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketWidth {
    /// Calendar years, labelled `yyyy`.
    #[default]
    Year,
    /// Calendar months, labelled `yyyy.mm`.
    Month,
    /// Calendar days, labelled `yyyy.mm.dd`.
    Day,
}

/// One calendar bucket `[start, end)` and its index name suffix.
///
/// The last representable bucket ends at the last representable instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeBucket {
    start: OffsetDateTime,
    end: OffsetDateTime,
    label: PartitionLabel,
}

impl TimeBucket {
    #[must_use]
    pub fn start(&self) -> OffsetDateTime {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> OffsetDateTime {
        self.end
    }

    #[must_use]
    pub fn label(&self) -> &PartitionLabel {
        &self.label
    }
}

impl BucketWidth {
    /// Every bucket intersecting `range`, partial buckets at both ends
    /// included.
    #[must_use]
    pub fn buckets(self, range: &TimeRange) -> Vec<TimeBucket> {
        if range.is_empty() {
            return Vec::new();
        }

        successors(self.floor(range.from().date()), |start| {
            self.next_start(*start)
        })
        .map(|start| start.midnight().assume_utc())
        .take_while(|start| *start < range.to())
        .map(|start| {
            let end = self
                .next_start(start.date())
                .map_or_else(end_of_time, |next| next.midnight().assume_utc());
            TimeBucket {
                start,
                end,
                label: self.label(start.date()),
            }
        })
        .collect()
    }

    fn floor(self, date: Date) -> Option<Date> {
        match self {
            Self::Year => Date::from_calendar_date(date.year(), Month::January, 1).ok(),
            Self::Month => Date::from_calendar_date(date.year(), date.month(), 1).ok(),
            Self::Day => Some(date),
        }
    }

    /// `None` once the next bucket would fall outside the representable range.
    fn next_start(self, start: Date) -> Option<Date> {
        match self {
            Self::Year => Date::from_calendar_date(start.year().checked_add(1)?, Month::January, 1)
                .ok(),
            Self::Month => {
                let year = if start.month() == Month::December {
                    start.year().checked_add(1)?
                } else {
                    start.year()
                };
                Date::from_calendar_date(year, start.month().next(), 1).ok()
            }
            Self::Day => start.next_day(),
        }
    }

    fn label(self, start: Date) -> PartitionLabel {
        let (year, month, day) = (start.year(), u8::from(start.month()), start.day());
        PartitionLabel::from_calendar(match self {
            Self::Year => format!("{year:04}"),
            Self::Month => format!("{year:04}.{month:02}"),
            Self::Day => format!("{year:04}.{month:02}.{day:02}"),
        })
    }
}

fn end_of_time() -> OffsetDateTime {
    Date::MAX.with_time(Time::MAX).assume_utc()
}

/// Calendar-bucketed strategy: `{base}_{tenant}_{label}` per bucket.
///
/// Defaults to yearly buckets, i.e. `<type>[_<prefix>]_<tenant>_<yyyy>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntervalNamingStrategy {
    width: BucketWidth,
}

impl IntervalNamingStrategy {
    #[must_use]
    pub fn new(width: BucketWidth) -> Self {
        Self { width }
    }

    #[must_use]
    pub fn yearly() -> Self {
        Self::new(BucketWidth::Year)
    }

    #[must_use]
    pub fn width(self) -> BucketWidth {
        self.width
    }
}

impl NamingStrategy for IntervalNamingStrategy {
    fn expand(
        &self,
        range: &TimeRange,
        prefix: &NamingPrefix,
        index_type: &IndexType,
        tenant: &TenantId,
    ) -> Vec<IndexDescriptor> {
        let base = IndexBaseName::new(prefix, index_type);
        self.width
            .buckets(range)
            .iter()
            .map(|bucket| IndexDescriptor::partition(&base, tenant, bucket.label()))
            .collect()
    }
}
