//! Format predicates applied to string fields.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

/// Canonical hyphenated UUID, any case.
pub const UUID_PATTERN: &str =
    r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$";

const URL_PATTERN: &str = r"^https?://[^\s/$.?#][^\s]*$";

static UUID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(UUID_PATTERN).expect("valid regex"));
static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(URL_PATTERN).expect("valid regex"));

/// Expected shape of a field's string value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldFormat {
    Uuid,
    Iso8601,
    Url,
    /// A non-blank string, or a number. Objects, arrays and booleans fail.
    Text,
}

impl FieldFormat {
    /// Human-readable description used in violation messages.
    pub fn description(&self) -> &'static str {
        match self {
            FieldFormat::Uuid => "a valid UUID",
            FieldFormat::Iso8601 => "a valid ISO-8601 timestamp",
            FieldFormat::Url => "a valid http(s) URL",
            FieldFormat::Text => "a non-blank string or number",
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            FieldFormat::Uuid => is_uuid(value),
            FieldFormat::Iso8601 => is_iso8601(value),
            FieldFormat::Url => is_http_url(value),
            FieldFormat::Text => !value.trim().is_empty(),
        }
    }

    /// Check a JSON value. Only `Text` accepts numbers; everything else
    /// must be a string matching [`FieldFormat::matches`].
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (FieldFormat::Text, Value::Number(_)) => true,
            (_, Value::String(s)) => self.matches(s),
            _ => false,
        }
    }
}

pub fn is_uuid(value: &str) -> bool {
    UUID_RE.is_match(value)
}

/// Extended and basic ISO-8601 date-times with an offset (`Z`, `+02:00`,
/// `+0200`), naive date-times with or without seconds, and plain
/// `YYYY-MM-DD` dates.
pub fn is_iso8601(value: &str) -> bool {
    parse_iso8601(value).is_some()
}

const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
];

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse an ISO-8601 value into a fixed-offset timestamp. Naive values are
/// taken as UTC; bare dates as midnight UTC.
pub fn parse_iso8601(value: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts);
    }

    // `%z` has no spelling for `Z`.
    let with_offset = match value.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{rest}+00:00"),
        None => value.to_string(),
    };
    if let Some(ts) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(&with_offset, fmt).ok())
    {
        return Some(ts);
    }

    let utc = FixedOffset::east_opt(0)?;
    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
    {
        return Some(naive.and_utc().with_timezone(&utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().with_timezone(&utc))
}

pub fn is_http_url(value: &str) -> bool {
    URL_RE.is_match(value)
}
