//! Typed coercion functions for raw cell values.
//!
//! Each cleaner is a pure function that narrows a raw value toward one
//! target type. Expected dirty data (placeholder text, malformed numbers,
//! unparseable dates) resolves to null — only a genuine contract violation
//! (a value whose type the cleaner cannot interpret at all) is an error.

use chrono::{DateTime, Datelike};

use mcm_map::matcher;
use mcm_model::CellValue;

use crate::error::CleanError;

/// Placeholder spellings treated as "no value".
pub const NONE_SYNONYMS: [&str; 3] = ["not available", "not applicable", "n/a"];

/// Spellings accepted as boolean true.
pub const BOOL_SYNONYMS: [&str; 4] = ["true", "yes", "y", "1"];

/// Pass-through cleaning for values without a typed target.
///
/// Text fuzzy-matching a none-synonym becomes `Null`; everything else is
/// returned unchanged.
pub fn default_cleaner(value: CellValue) -> CellValue {
    if let CellValue::Text(text) = &value
        && matches_synonym(text, &NONE_SYNONYMS)
    {
        return CellValue::Null;
    }
    value
}

/// Coerces a value into a float.
///
/// ```
/// use mcm_clean::float_cleaner;
/// use mcm_model::CellValue;
///
/// assert_eq!(float_cleaner(&CellValue::from("1,123.45")).unwrap(), Some(1123.45));
/// assert_eq!(float_cleaner(&CellValue::from("1,123.45 ?")).unwrap(), Some(1123.45));
/// assert_eq!(float_cleaner(&CellValue::from(50_i64)).unwrap(), Some(50.0));
/// assert_eq!(float_cleaner(&CellValue::Null).unwrap(), None);
/// assert_eq!(float_cleaner(&CellValue::from("wut")).unwrap(), None);
/// ```
///
/// Punctuation other than the decimal point is stripped before parsing.
/// Date and boolean values are a contract violation, not dirty data.
pub fn float_cleaner(value: &CellValue) -> Result<Option<f64>, CleanError> {
    match value {
        CellValue::Null => Ok(None),
        CellValue::Int(i) => Ok(Some(*i as f64)),
        CellValue::Float(x) => Ok(Some(*x)),
        CellValue::Text(text) => {
            let stripped: String = text
                .chars()
                .filter(|ch| !(ch.is_ascii_punctuation() && *ch != '.'))
                .collect();
            Ok(stripped.trim().parse::<f64>().ok())
        }
        other => Err(CleanError::coercion("float", other)),
    }
}

/// Coerces a value into a boolean. Total: anything not recognized as true
/// is `false`, never null, never an error.
pub fn bool_cleaner(value: &CellValue) -> bool {
    match value {
        CellValue::Bool(b) => *b,
        CellValue::Null => false,
        other => matches_synonym(&other.to_string(), &BOOL_SYNONYMS),
    }
}

/// Coerces a value into a datetime.
///
/// Null/empty input and anything unparseable resolve to `None`; existing
/// date/datetime values pass through. A numeric-looking string that no date
/// format accepts is reinterpreted as a Unix timestamp in seconds, falling
/// back to milliseconds when seconds land outside the plausible calendar
/// range.
pub fn date_cleaner(value: &CellValue) -> Option<CellValue> {
    if value.is_blank() {
        return None;
    }
    match value {
        CellValue::Date(_) | CellValue::DateTime(_) => Some(value.clone()),
        CellValue::Text(text) => parse_date_text(text).map(CellValue::DateTime),
        _ => None,
    }
}

/// Keeps a value only if it fuzzy-matches one of the allowed choices.
pub fn enum_cleaner(value: &CellValue, choices: &[String]) -> Option<CellValue> {
    if value.is_blank() || choices.is_empty() {
        return None;
    }
    let known = matcher::is_known(
        &value.to_string(),
        choices,
        matcher::DEFAULT_MIN_CONFIDENCE,
    )
    .unwrap_or(false);
    known.then(|| value.clone())
}

fn matches_synonym(text: &str, synonyms: &[&str]) -> bool {
    // `is_known` only fails on an empty candidate set; ours are constants.
    matcher::is_known(
        text.trim().to_lowercase().as_str(),
        synonyms,
        matcher::DEFAULT_MIN_CONFIDENCE,
    )
    .unwrap_or(false)
}

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: [&str; 9] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%m/%d/%y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

fn parse_date_text(text: &str) -> Option<chrono::NaiveDateTime> {
    let trimmed = text.trim();
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = chrono::NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(parsed) = chrono::NaiveDate::parse_from_str(trimmed, format) {
            return parsed.and_hms_opt(0, 0, 0);
        }
    }
    // Numeric strings: Unix seconds, then milliseconds if seconds overflow.
    let numeric: f64 = trimmed.parse().ok()?;
    timestamp_fallback(numeric)
}

/// Years a timestamp must land in to be taken at face value. Wider values
/// are retried as milliseconds.
const TIMESTAMP_YEAR_RANGE: std::ops::RangeInclusive<i32> = 1..=9999;

fn timestamp_fallback(numeric: f64) -> Option<chrono::NaiveDateTime> {
    let plausible = |dt: &chrono::NaiveDateTime| TIMESTAMP_YEAR_RANGE.contains(&dt.year());
    DateTime::from_timestamp(numeric as i64, 0)
        .map(|dt| dt.naive_utc())
        .filter(&plausible)
        .or_else(|| {
            DateTime::from_timestamp_millis(numeric as i64)
                .map(|dt| dt.naive_utc())
                .filter(&plausible)
        })
}
