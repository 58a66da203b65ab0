//! Check-in streak shown on the dashboard.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate};

/// Consecutive days, ending today, with at least one check-in.
///
/// Several check-ins on the same day count once. No check-in today means 0.
pub fn check_in_streak<I>(dates: I, today: NaiveDate) -> u32
where
    I: IntoIterator<Item = NaiveDate>,
{
    let days: BTreeSet<NaiveDate> = dates.into_iter().collect();
    let mut streak = 0u32;
    let mut day = Some(today);
    while let Some(d) = day.filter(|d| days.contains(d)) {
        streak += 1;
        day = d.pred_opt();
    }
    streak
}

/// Same as [`check_in_streak`] for raw record dates.
/// Accepts `YYYY-MM-DD` or RFC 3339 timestamps; anything else is skipped.
pub fn check_in_streak_from_strings<'a, I>(dates: I, today: NaiveDate) -> u32
where
    I: IntoIterator<Item = &'a str>,
{
    check_in_streak(dates.into_iter().filter_map(parse_record_date), today)
}

fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}
