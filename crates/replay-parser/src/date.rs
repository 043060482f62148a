//! Calendar helpers shared by the title parsers, and the display formatter
//! for millisecond timestamps.

use chrono::{DateTime, Datelike, Days, Local, Months, NaiveDate, NaiveTime, TimeDelta, TimeZone};

/// Largest magnitude accepted for an epoch-millisecond timestamp
/// (100 000 000 days either side of the epoch).
pub const MAX_TIMESTAMP_MS: i64 = 8_640_000_000_000_000;

/// Rendered by [`format_date`] for timestamps that cannot be shown.
pub const INVALID_DATE_PLACEHOLDER: &str = "----/--/--";

/// Builds a calendar date from title components, letting out-of-range
/// months and days roll over: month 13 is January of the next year, day 0
/// is the last day of the previous month, `2月30日` lands in March.
pub fn calendar_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let date = match month {
        0 => first.checked_sub_months(Months::new(1))?,
        m => first.checked_add_months(Months::new(m - 1))?,
    };
    match day {
        0 => date.pred_opt(),
        d => date.checked_add_days(Days::new(u64::from(d - 1))),
    }
}

/// Epoch milliseconds of midnight on `date` in `tz`.
///
/// When midnight does not exist (a DST jump at 00:00) the first instant
/// after the gap is used.
pub fn midnight_millis_in<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Option<i64> {
    let midnight = date.and_time(NaiveTime::MIN);
    let instant = tz
        .from_local_datetime(&midnight)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(midnight + TimeDelta::hours(1))).earliest())?;
    checked_timestamp(instant.timestamp_millis())
}

/// Epoch milliseconds of local midnight for the given title components.
pub fn local_midnight_millis(year: i32, month: u32, day: u32) -> Option<i64> {
    midnight_millis_in(&Local, calendar_date(year, month, day)?)
}

/// Returns `millis` when it lies inside the representable timestamp range.
pub fn checked_timestamp(millis: i64) -> Option<i64> {
    (-MAX_TIMESTAMP_MS..=MAX_TIMESTAMP_MS)
        .contains(&millis)
        .then_some(millis)
}

/// Formats a millisecond timestamp as a local `yyyy-mm-dd` date.
///
/// Accepts any `f64`. Non-finite values, values outside the timestamp
/// range and dates whose year falls outside `0..=9999` produce
/// [`INVALID_DATE_PLACEHOLDER`].
///
/// ```rust
/// use replay_parser::date::{format_date, INVALID_DATE_PLACEHOLDER};
///
/// assert_eq!(format_date(f64::NAN), INVALID_DATE_PLACEHOLDER);
/// assert_eq!(format_date(8_640_000_000_000_000.0), INVALID_DATE_PLACEHOLDER);
/// assert_ne!(format_date(-1.0), INVALID_DATE_PLACEHOLDER);
/// ```
pub fn format_date(timestamp: f64) -> String {
    format_date_in(timestamp, &Local)
}

/// [`format_date`] against an explicit time zone.
pub fn format_date_in<Tz: TimeZone>(timestamp: f64, tz: &Tz) -> String {
    if !timestamp.is_finite() {
        return INVALID_DATE_PLACEHOLDER.to_string();
    }

    let millis = timestamp.trunc();
    if millis.abs() > MAX_TIMESTAMP_MS as f64 {
        return INVALID_DATE_PLACEHOLDER.to_string();
    }

    let Some(utc) = DateTime::from_timestamp_millis(millis as i64) else {
        return INVALID_DATE_PLACEHOLDER.to_string();
    };
    let date = utc.with_timezone(tz);

    if !(0..=9999).contains(&date.year()) {
        return INVALID_DATE_PLACEHOLDER.to_string();
    }

    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}
