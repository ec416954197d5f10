use chrono::{Datelike, NaiveDate};
use crate::models::RangeStatus;

/// Longest range, in days, a single fetch may cover
pub const MAX_RANGE_DAYS: i64 = 365;

/// Initial range: first day of the current month up to today
pub fn default_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first_of_month = today.with_day(1).unwrap_or(today);
    (first_of_month, today)
}

/// Decide whether a date range may be fetched
///
/// Derived fresh from the inputs on every change, never stored, so the
/// enabled flag and the message cannot drift apart.
pub fn check_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    today: NaiveDate,
) -> RangeStatus {
    let (Some(start), Some(end)) = (start, end) else {
        return RangeStatus::blocked("Please select both start and end dates.");
    };

    if start >= end {
        RangeStatus::blocked("Start date should be earlier than the end date.")
    } else if start >= today {
        RangeStatus::blocked("Start date should be today or earlier.")
    } else if end > today {
        RangeStatus::blocked("End date should not exceed today.")
    } else if (end - start).num_days() > MAX_RANGE_DAYS {
        RangeStatus::blocked("Date range must not exceed 365 days.")
    } else {
        RangeStatus::ok()
    }
}

/// Parse a `YYYY-MM-DD` date as typed by the user; blank means unset
pub fn parse_date(input: &str) -> Result<Option<NaiveDate>, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| format!("❌ Invalid date '{}'. Use YYYY-MM-DD", input))
}
