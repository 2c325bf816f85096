//! Granularity Strategies
//!
//! A granularity is the pair of adjacency functions (previous/next time unit)
//! plus the identity and span functions for one kind of view. Strategies are
//! plain function values injected into the manager at construction.
//!
//! Precondition for custom strategies: `previous(t) < t < next(t)` for every
//! `t` the view navigates to. Non-monotonic functions are not detected.

use crate::types::{FrameKey, TimeSpan};
use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Built-in view granularities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GranularityKind {
    Day,
    Week,
    Month,
}

impl GranularityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GranularityKind::Day => "day",
            GranularityKind::Week => "week",
            GranularityKind::Month => "month",
        }
    }

    pub fn strategy(self) -> Granularity {
        match self {
            GranularityKind::Day => Granularity::day(),
            GranularityKind::Week => Granularity::week(),
            GranularityKind::Month => Granularity::month(),
        }
    }
}

impl fmt::Display for GranularityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GranularityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(GranularityKind::Day),
            "week" => Ok(GranularityKind::Week),
            "month" => Ok(GranularityKind::Month),
            other => Err(format!(
                "Invalid granularity: {} (must be 'day', 'week', or 'month')",
                other
            )),
        }
    }
}

/// Adjacency, identity and span functions for one view type.
#[derive(Clone, Copy)]
pub struct Granularity {
    name: &'static str,
    previous: fn(NaiveDate) -> NaiveDate,
    next: fn(NaiveDate) -> NaiveDate,
    identity: fn(NaiveDate) -> FrameKey,
    span: fn(NaiveDate) -> TimeSpan,
}

impl fmt::Debug for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Granularity").field("name", &self.name).finish()
    }
}

impl Granularity {
    /// Custom strategy; identity and span use the day rules until overridden.
    pub fn new(
        name: &'static str,
        previous: fn(NaiveDate) -> NaiveDate,
        next: fn(NaiveDate) -> NaiveDate,
    ) -> Self {
        Granularity {
            name,
            previous,
            next,
            identity: FrameKey::from_date,
            span: day_span,
        }
    }

    pub fn with_identity(mut self, identity: fn(NaiveDate) -> FrameKey) -> Self {
        self.identity = identity;
        self
    }

    pub fn with_span(mut self, span: fn(NaiveDate) -> TimeSpan) -> Self {
        self.span = span;
        self
    }

    pub fn day() -> Self {
        Granularity::new("day", previous_day, next_day)
    }

    /// Weeks start on Monday.
    pub fn week() -> Self {
        Granularity::new("week", previous_week, next_week)
            .with_identity(|t| FrameKey::from_date(week_start(t)))
            .with_span(week_span)
    }

    pub fn month() -> Self {
        Granularity::new("month", previous_month, next_month)
            .with_identity(|t| FrameKey::from_date(month_start(t)))
            .with_span(month_span)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn previous(&self, time: NaiveDate) -> NaiveDate {
        (self.previous)(time)
    }

    pub fn next(&self, time: NaiveDate) -> NaiveDate {
        (self.next)(time)
    }

    pub fn identity(&self, time: NaiveDate) -> FrameKey {
        (self.identity)(time)
    }

    pub fn span(&self, time: NaiveDate) -> TimeSpan {
        (self.span)(time)
    }
}

fn previous_day(t: NaiveDate) -> NaiveDate {
    t.pred_opt().unwrap_or(NaiveDate::MIN)
}

fn next_day(t: NaiveDate) -> NaiveDate {
    t.succ_opt().unwrap_or(NaiveDate::MAX)
}

fn day_span(t: NaiveDate) -> TimeSpan {
    TimeSpan::ordered(t, next_day(t))
}

fn previous_week(t: NaiveDate) -> NaiveDate {
    t.checked_sub_days(Days::new(7)).unwrap_or(NaiveDate::MIN)
}

fn next_week(t: NaiveDate) -> NaiveDate {
    t.checked_add_days(Days::new(7)).unwrap_or(NaiveDate::MAX)
}

fn week_start(t: NaiveDate) -> NaiveDate {
    let offset = u64::from(t.weekday().num_days_from_monday());
    t.checked_sub_days(Days::new(offset)).unwrap_or(NaiveDate::MIN)
}

fn week_span(t: NaiveDate) -> TimeSpan {
    let start = week_start(t);
    TimeSpan::ordered(start, next_week(start))
}

fn previous_month(t: NaiveDate) -> NaiveDate {
    t.checked_sub_months(Months::new(1)).unwrap_or(NaiveDate::MIN)
}

fn next_month(t: NaiveDate) -> NaiveDate {
    t.checked_add_months(Months::new(1)).unwrap_or(NaiveDate::MAX)
}

fn month_start(t: NaiveDate) -> NaiveDate {
    t.with_day(1).unwrap_or(t)
}

fn month_span(t: NaiveDate) -> TimeSpan {
    let start = month_start(t);
    TimeSpan::ordered(start, next_month(start))
}
