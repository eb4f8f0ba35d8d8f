//! Field-level parsing and normalization for raw SIGACT rows.
//!
//! Nothing in here fails: malformed input is absorbed by passing it
//! through or by falling back to a non-finite coordinate, so a single bad
//! cell never aborts a load.

use std::cmp::Ordering;

use chrono::NaiveDate;

/// Splits a combined timestamp into its date and time portions.
///
/// The split happens at the first run of whitespace. The time portion is
/// empty when the timestamp carries no time.
#[must_use]
pub fn split_timestamp(raw: &str) -> (&str, &str) {
    let raw = raw.trim();
    raw.split_once(char::is_whitespace)
        .map_or((raw, ""), |(date, time)| (date, time.trim()))
}

/// Rewrites an `M/D/YYYY` date into canonical `YYYY-MM-DD`.
///
/// Dates without a `/` are assumed to already be canonical and are
/// returned unchanged. A `/` date is also returned unchanged unless it has
/// exactly three numeric components: a month and day of one or two digits
/// and a four-digit year.
#[must_use]
pub fn normalize_date(date: &str) -> String {
    if !date.contains('/') {
        return date.to_owned();
    }

    let parts: Vec<&str> = date.split('/').collect();
    match parts.as_slice() {
        [month, day, year]
            if is_digits(month, 1, 2) && is_digits(day, 1, 2) && is_digits(year, 4, 4) =>
        {
            format!("{year}-{month:0>2}-{day:0>2}")
        }
        _ => date.to_owned(),
    }
}

fn is_digits(s: &str, min_len: usize, max_len: usize) -> bool {
    (min_len..=max_len).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parses a coordinate, yielding `NaN` for missing or non-numeric text.
#[must_use]
pub fn parse_coordinate(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// Parses a canonical date key as a calendar date.
///
/// Accepts non-zero-padded month and day components so that pass-through
/// keys like `2008-1-2` still order by their calendar value.
#[must_use]
pub fn parse_calendar_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Orders two date keys by calendar value.
///
/// Keys that are not calendar dates sort after every real date. Ties
/// (including two unparseable keys) fall back to lexical order so the
/// ordering is total.
#[must_use]
pub fn calendar_order(a: &str, b: &str) -> Ordering {
    match (parse_calendar_date(a), parse_calendar_date(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Sorts date keys ascending by calendar value (see [`calendar_order`]).
pub fn sort_by_calendar<T, F>(items: &mut [T], key: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by_cached_key(|item| {
        let date = key(item);
        let parsed = parse_calendar_date(date);
        (parsed.is_none(), parsed, date.to_owned())
    });
}
