//! Core value types shared across the crate.

use crate::error::FrameError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity key of a frame, derived from its anchor time.
///
/// Keys are totally ordered and the collection keeps frames sorted by them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FrameKey(pub i64);

impl FrameKey {
    /// Default identity: days since the common era of `time`.
    pub fn from_date(time: NaiveDate) -> Self {
        use chrono::Datelike;
        FrameKey(i64::from(time.num_days_from_ce()))
    }
}

impl fmt::Display for FrameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Half-open `[start, end)` span of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSpan {
    start: NaiveDate,
    end: NaiveDate,
}

impl TimeSpan {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, FrameError> {
        if end < start {
            return Err(FrameError::InvalidSpan { start, end });
        }
        Ok(TimeSpan { start, end })
    }

    /// Span between two dates in whichever order they are given.
    pub fn ordered(a: NaiveDate, b: NaiveDate) -> Self {
        TimeSpan {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// True when `other` lies fully inside this span.
    pub fn contains_span(&self, other: &TimeSpan) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn contains(&self, time: NaiveDate) -> bool {
        self.start <= time && time < self.end
    }

    pub fn overlaps(&self, other: &TimeSpan) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
