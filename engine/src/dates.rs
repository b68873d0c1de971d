//! FILENAME: engine/src/dates.rs
//! PURPOSE: Parsing and formatting of the date strings stored on records.
//! CONTEXT: Storage hands dates over as text, either plain `YYYY-MM-DD` or a
//! full timestamp. Nothing here panics on malformed input; callers get `None`.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

const NAIVE_TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parses a stored date or timestamp. Offsets are normalized to UTC,
/// bare dates read as midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }

    for fmt in NAIVE_TIMESTAMP_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    parse_timestamp(raw).map(|dt| dt.date())
}

/// Renders a stored date as `dd/mm/yyyy` (Greek locale order).
pub fn format_date_dmy(raw: &str) -> Option<String> {
    parse_date(raw).map(|d| d.format("%d/%m/%Y").to_string())
}

/// Whole days elapsed from `from` to `to`, rounded toward zero.
pub fn days_between(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    (to - from).num_days()
}

/// Calendar month `delta` months away from (year, month). Month is 1-based.
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + (month as i32 - 1) + delta;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

/// Year/month identity of a date, for calendar-month bucketing.
pub fn year_month<D: Datelike>(date: &D) -> (i32, u32) {
    (date.year(), date.month())
}

/// Abbreviated Greek month name (1-based month).
pub fn greek_month_abbrev(month: u32) -> &'static str {
    match month {
        1 => "Ιαν",
        2 => "Φεβ",
        3 => "Μαρ",
        4 => "Απρ",
        5 => "Μαΐ",
        6 => "Ιουν",
        7 => "Ιουλ",
        8 => "Αυγ",
        9 => "Σεπ",
        10 => "Οκτ",
        11 => "Νοε",
        12 => "Δεκ",
        _ => "-",
    }
}
