//! Text forms accepted for the temporal value types.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

/// RFC 3339, or any naive date-time form read as UTC.
pub(crate) fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|ts| ts.with_timezone(&Utc))
        .ok()
        .or_else(|| parse_datetime(text).map(|naive| naive.and_utc()))
}

/// A date-time without offset; a bare date means midnight.
pub(crate) fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| parse_date(text)?.and_hms_opt(0, 0, 0))
}

pub(crate) fn parse_date(text: &str) -> Option<NaiveDate> { NaiveDate::parse_from_str(text, "%Y-%m-%d").ok() }

/// `[-][d.]hh:mm[:ss[.fffffff]]` or a whole number of days, `[-]d`.
pub(crate) fn parse_duration(text: &str) -> Option<TimeDelta> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    if body.is_empty() {
        return None;
    }

    let magnitude = if !body.contains(':') {
        TimeDelta::try_days(parse_digits(body)?)?
    } else {
        let (days, clock) = match body.split_once('.') {
            // a '.' before the first ':' separates days from the clock
            Some((days, clock)) if !days.contains(':') => (parse_digits(days)?, clock),
            _ => (0, body),
        };

        let mut parts = clock.split(':');
        let hours = parse_digits(parts.next()?)?;
        let minutes = parse_digits(parts.next()?)?;
        let seconds = parts.next();
        if parts.next().is_some() || hours > 23 || minutes > 59 {
            return None;
        }

        let mut total = TimeDelta::try_days(days)?
            .checked_add(&TimeDelta::try_hours(hours)?)?
            .checked_add(&TimeDelta::try_minutes(minutes)?)?;
        if let Some(seconds) = seconds {
            total = total.checked_add(&parse_seconds(seconds)?)?;
        }
        total
    };

    Some(if negative { -magnitude } else { magnitude })
}

fn parse_seconds(text: &str) -> Option<TimeDelta> {
    let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
    let seconds = parse_digits(whole)?;
    if seconds > 59 || fraction.len() > 9 || (text.contains('.') && fraction.is_empty()) {
        return None;
    }
    let nanos = if fraction.is_empty() { 0 } else { parse_digits(fraction)? * 10i64.pow(9 - fraction.len() as u32) };
    TimeDelta::try_seconds(seconds)?.checked_add(&TimeDelta::nanoseconds(nanos))
}

fn parse_digits(text: &str) -> Option<i64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
