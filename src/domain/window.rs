//! Time windows for popularity queries.
//!
//! Spans use the engine's date-math units (`5m`, `1h`, `1d`, `1w`, ...).
//! Every window resolves to a half-open `[from, to)` interval of absolute
//! instants before a request is built.

use crate::utils::error::{Result, SearchError};
use chrono::{DateTime, Duration, Months, Utc};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

impl SpanUnit {
    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "s" => Some(Self::Seconds),
            "m" => Some(Self::Minutes),
            "h" | "H" => Some(Self::Hours),
            "d" => Some(Self::Days),
            "w" => Some(Self::Weeks),
            "M" => Some(Self::Months),
            "y" => Some(Self::Years),
            _ => None,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Self::Seconds => "s",
            Self::Minutes => "m",
            Self::Hours => "h",
            Self::Days => "d",
            Self::Weeks => "w",
            Self::Months => "M",
            Self::Years => "y",
        }
    }
}

/// A relative duration such as `5m` or `1d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativeSpan {
    pub amount: u32,
    pub unit: SpanUnit,
}

impl RelativeSpan {
    pub fn new(amount: u32, unit: SpanUnit) -> Self {
        Self { amount, unit }
    }

    /// Returns `now - self`. Months and years follow the calendar.
    pub fn before(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        let amount = i64::from(self.amount);
        let resolved = match self.unit {
            SpanUnit::Seconds => now.checked_sub_signed(Duration::seconds(amount)),
            SpanUnit::Minutes => now.checked_sub_signed(Duration::minutes(amount)),
            SpanUnit::Hours => now.checked_sub_signed(Duration::hours(amount)),
            SpanUnit::Days => now.checked_sub_signed(Duration::days(amount)),
            SpanUnit::Weeks => now.checked_sub_signed(Duration::weeks(amount)),
            SpanUnit::Months => now.checked_sub_months(Months::new(self.amount)),
            SpanUnit::Years => self
                .amount
                .checked_mul(12)
                .and_then(|months| now.checked_sub_months(Months::new(months))),
        };
        resolved.ok_or_else(|| {
            SearchError::invalid_argument(format!("duration '{}' is out of range", self))
        })
    }
}

impl FromStr for RelativeSpan {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| SearchError::invalid_argument(format!("duration '{}' has no unit", s)))?;
        let (digits, suffix) = s.split_at(split);

        if digits.is_empty() {
            return Err(SearchError::invalid_argument(format!(
                "duration '{}' has no amount",
                s
            )));
        }
        let amount: u32 = digits.parse().map_err(|_| {
            SearchError::invalid_argument(format!("duration '{}' has an invalid amount", s))
        })?;
        let unit = SpanUnit::from_suffix(suffix).ok_or_else(|| {
            SearchError::invalid_argument(format!(
                "duration '{}' has unknown unit '{}' (expected one of s, m, h, d, w, M, y)",
                s, suffix
            ))
        })?;

        Ok(Self { amount, unit })
    }
}

impl fmt::Display for RelativeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.suffix())
    }
}

/// One end of an explicit window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBoundary {
    Now,
    Ago(RelativeSpan),
    At(DateTime<Utc>),
}

impl TimeBoundary {
    pub fn resolve(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        match self {
            Self::Now => Ok(now),
            Self::Ago(span) => span.before(now),
            Self::At(instant) => Ok(*instant),
        }
    }
}

impl FromStr for TimeBoundary {
    type Err = SearchError;

    /// Accepts `now`, `now-<span>`, a bare `<span>` (meaning that long ago)
    /// or an RFC 3339 instant.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(SearchError::invalid_argument("time boundary cannot be empty"));
        }
        if s == "now" {
            return Ok(Self::Now);
        }
        if let Some(span) = s.strip_prefix("now-") {
            return span.parse().map(Self::Ago);
        }
        if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self::At(instant.with_timezone(&Utc)));
        }
        s.parse().map(Self::Ago)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    /// `[now - span, now)`
    Last(RelativeSpan),
    /// `[from, to)`
    Between { from: TimeBoundary, to: TimeBoundary },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl ResolvedWindow {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from <= instant && instant < self.to
    }
}

impl TimeWindow {
    pub fn last(duration: &str) -> Result<Self> {
        Ok(Self::Last(duration.parse()?))
    }

    pub fn between(from: &str, to: &str) -> Result<Self> {
        Ok(Self::Between {
            from: from.parse()?,
            to: to.parse()?,
        })
    }

    /// Resolves both ends against `now`; an empty or inverted interval is
    /// rejected rather than swapped.
    pub fn resolve(&self, now: DateTime<Utc>) -> Result<ResolvedWindow> {
        let (from, to) = match self {
            Self::Last(span) => (span.before(now)?, now),
            Self::Between { from, to } => (from.resolve(now)?, to.resolve(now)?),
        };

        if from >= to {
            return Err(SearchError::invalid_argument(format!(
                "time window start {} must be before its end {}",
                from.to_rfc3339(),
                to.to_rfc3339()
            )));
        }
        Ok(ResolvedWindow { from, to })
    }
}
