use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta};
use polars::prelude::{AnyValue, TimeUnit};

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses a date written in one of the accepted layouts.
///
/// Anything that is not a date yields `None`. A trailing time of day is ignored.
pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(date_time.date());
        }
    }
    if let Ok(date_time) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(date_time.date_naive());
    }

    // e.g. "2020-01-01 00:00:00.000 UTC" or "2020-01-01T10:00"
    trimmed
        .split([' ', 'T'])
        .next()
        .filter(|date_part| date_part.len() < trimmed.len())
        .and_then(|date_part| NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok())
}

pub(crate) fn any_value_to_date(value: &AnyValue) -> Option<NaiveDate> {
    match value {
        AnyValue::Null => None,
        AnyValue::String(s) => parse_date(s),
        AnyValue::StringOwned(s) => parse_date(s.as_str()),
        AnyValue::Date(days) => epoch_date()?.checked_add_signed(TimeDelta::days(*days as i64)),
        AnyValue::Datetime(ts, unit, _) => timestamp_to_date(*ts, unit),
        AnyValue::DatetimeOwned(ts, unit, _) => timestamp_to_date(*ts, unit),
        _ => None,
    }
}

pub(crate) fn any_value_to_f64(value: &AnyValue) -> Option<f64> {
    let parsed = match value {
        AnyValue::Null | AnyValue::Boolean(_) => None,
        AnyValue::String(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
        AnyValue::StringOwned(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
        other => other.extract::<f64>(),
    };
    parsed.filter(|f| f.is_finite())
}

/// Reads a categorical code. Floats are only accepted when they carry no fractional part.
pub(crate) fn any_value_to_code(value: &AnyValue) -> Option<i64> {
    match value {
        AnyValue::Null | AnyValue::Boolean(_) => None,
        AnyValue::String(s) => parse_code(s),
        AnyValue::StringOwned(s) => parse_code(s.as_str()),
        AnyValue::Float32(f) => float_to_code(*f as f64),
        AnyValue::Float64(f) => float_to_code(*f),
        other => other.extract::<i64>(),
    }
}

pub(crate) fn any_value_to_string(value: &AnyValue) -> Option<String> {
    match value {
        AnyValue::Null => None,
        AnyValue::String(s) => Some(s.to_string()),
        AnyValue::StringOwned(s) => Some(s.to_string()),
        other => Some(other.to_string()),
    }
}

/// Renders a categorical cell as text. Integer codes lose any trailing `.0`.
pub(crate) fn any_value_to_label(value: &AnyValue) -> Option<String> {
    any_value_to_code(value)
        .map(|code| code.to_string())
        .or_else(|| any_value_to_string(value))
}

fn parse_code(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .ok()
        .or_else(|| trimmed.parse::<f64>().ok().and_then(float_to_code))
}

fn float_to_code(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn epoch_date() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1970, 1, 1)
}

fn timestamp_to_date(ts: i64, unit: &TimeUnit) -> Option<NaiveDate> {
    let date_time = match unit {
        TimeUnit::Milliseconds => DateTime::from_timestamp_millis(ts)?,
        TimeUnit::Microseconds => DateTime::from_timestamp_micros(ts)?,
        TimeUnit::Nanoseconds => DateTime::from_timestamp_nanos(ts),
    };
    Some(date_time.date_naive())
}
