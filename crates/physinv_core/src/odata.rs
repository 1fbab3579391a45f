//! OData v2 JSON conventions: the `d.results` envelope, `/Date(ms)/` literals
//! and deferred navigation properties.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub d: Option<ResultSet<T>>,
    pub error: Option<ServiceError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResultSet<T> {
    pub results: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ServiceError {
    #[serde(default)]
    pub code: String,
    pub message: ServiceErrorMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ServiceErrorMessage {
    #[serde(default)]
    pub value: String,
}

/// Parses `/Date(1609459200000)/`, `/Date(1609459200000+0000)/` or a plain
/// `YYYY-MM-DD` value into a calendar date (UTC).
pub fn parse_odata_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Some(inner) = raw
        .strip_prefix("/Date(")
        .and_then(|rest| rest.strip_suffix(")/"))
    {
        // Offset suffixes only name the sender's zone; the millis are UTC.
        let millis_end = inner
            .char_indices()
            .skip(1)
            .find(|(_, c)| matches!(c, '+' | '-'))
            .map(|(idx, _)| idx)
            .unwrap_or(inner.len());
        let millis: i64 = inner[..millis_end].parse().ok()?;
        return DateTime::<Utc>::from_timestamp_millis(millis).map(|dt| dt.date_naive());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Nullable properties arrive as `null`; those decode to the type's default.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

pub(crate) fn date_opt<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_odata_date(value)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid OData date `{value}`"))),
    }
}

pub(crate) fn deferred_uri<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    // Expanded navigation properties carry inline results instead of a link.
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(|value| value.pointer("/__deferred/uri"))
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|uri| !uri.is_empty())
        .map(str::to_string))
}
