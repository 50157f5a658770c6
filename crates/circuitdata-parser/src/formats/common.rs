use std::num::ParseFloatError;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::errors::ParserError;
use crate::model::DecimalSeparator;

static DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
];

static DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y"];

static OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%#z", "%Y-%m-%d %H:%M:%S%.f%#z"];

/// Cell values read as missing, the marker set spreadsheet and pandas exports use.
pub const MISSING_VALUE_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// True for empty cells and any of [`MISSING_VALUE_MARKERS`].
pub fn is_missing_marker(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || MISSING_VALUE_MARKERS.contains(&trimmed)
}

/// Parses a timestamp cell into naive UTC microseconds.
///
/// With an explicit `format` only that layout (or its date-only reading) is
/// accepted. Otherwise the common layouts are tried in order and values with
/// a UTC offset are shifted to UTC.
pub fn parse_timestamp(
    source_name: &str,
    value: &str,
    line_index: usize,
    format: Option<&str>,
) -> Result<i64, ParserError> {
    let trimmed = value.trim();
    let parsed = match format {
        Some(fmt) => parse_with_format(trimmed, fmt),
        None => parse_inferred(trimmed),
    };

    parsed
        .map(|dt| dt.and_utc().timestamp_micros())
        .ok_or_else(|| ParserError::InvalidTimestamp {
            source_name: source_name.to_string(),
            line_index,
            value: trimmed.to_string(),
        })
}

fn parse_with_format(value: &str, fmt: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, fmt)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, fmt)
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

fn parse_inferred(value: &str) -> Option<NaiveDateTime> {
    if value.is_empty() {
        return None;
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, fmt) {
            return Some(dt.with_timezone(&Utc).naive_utc());
        }
    }

    DATE_FORMATS.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(value, fmt)
            .ok()
            .map(|date| date.and_time(NaiveTime::MIN))
    })
}

/// Parses a numeric cell. Empty cells and missing-value markers are `None`.
pub fn parse_optional_f64(
    value: &str,
    decimal: DecimalSeparator,
) -> Result<Option<f64>, ParseFloatError> {
    let trimmed = value.trim();
    if is_missing_marker(trimmed) {
        return Ok(None);
    }

    match decimal {
        DecimalSeparator::Point => trimmed.parse::<f64>().map(Some),
        DecimalSeparator::Comma => trimmed.replace(',', ".").parse::<f64>().map(Some),
    }
}
