//! Query window resolution.

use chrono::{DateTime, Duration, Utc};

use crate::error::{Error, Result};

/// Resolved `[start, end]` query window. Immutable after resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// Normalizes explicit endpoints and an optional signed span into a
    /// concrete window. Endpoints default to `now - 15m` and `now`. A
    /// positive span moves `end`, a negative one moves `start`; zero or
    /// absent leaves both endpoints exactly as given, unvalidated.
    pub fn resolve(
        start: Option<&str>,
        end: Option<&str>,
        span: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let start = match start {
            Some(value) => parse_rfc3339(value)?,
            None => now - Duration::minutes(15),
        };
        let end = match end {
            Some(value) => parse_rfc3339(value)?,
            None => now,
        };

        let mut range = Self { start, end };
        if let Some(span) = span {
            let delta = parse_span(span)?;
            if delta > Duration::zero() {
                range.end = range.start + delta;
            } else if delta < Duration::zero() {
                range.start = range.end + delta;
            }
        }
        Ok(range)
    }

    pub fn start_millis(&self) -> i64 {
        self.start.timestamp_millis()
    }

    pub fn end_millis(&self) -> i64 {
        self.end.timestamp_millis()
    }
}

fn parse_rfc3339(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|source| Error::Parse {
            value: value.to_string(),
            source,
        })
}

/// Signed humantime literal: `15m`, `-1h30m`, `0s`.
fn parse_span(value: &str) -> Result<Duration> {
    let (negative, body) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value),
    };
    let std = humantime::parse_duration(body).map_err(|_| Error::Span(value.to_string()))?;
    let delta = Duration::from_std(std).map_err(|_| Error::Span(value.to_string()))?;
    Ok(if negative { -delta } else { delta })
}
