use chrono::{DateTime, SecondsFormat, Utc};
use serde::{de, Deserialize, Deserializer};

/// A point in time, always normalised to UTC.
pub type Instant = DateTime<Utc>;

/// Parse the source's RFC822 encoding, e.g. `Tue, 21 Apr 2015 10:00:00 GMT`.
pub fn parse_rfc822(text: &str) -> Result<Instant, chrono::ParseError> {
    DateTime::parse_from_rfc2822(text.trim()).map(|dt| dt.with_timezone(&Utc))
}

/// RFC3339 in UTC with a `Z` designator. Fractional seconds appear only when non-zero.
pub fn format_instant(instant: &Instant) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Decodes a nullable RFC822 instant.
///
/// JSON `null`, the literal string `"null"` and the empty string all map to `None`.
pub(crate) fn nullable_rfc822<'de, D>(deserializer: D) -> Result<Option<Instant>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") | Some("null") => Ok(None),
        Some(text) => parse_rfc822(text)
            .map(Some)
            .map_err(|err| de::Error::custom(format!("invalid timestamp {text:?}: {err}"))),
    }
}

/// Treats an explicit JSON `null` like an absent field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
