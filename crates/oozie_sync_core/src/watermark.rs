use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::timestamp::{format_instant, Instant};

/// 2000-01-01T00:00:00Z, used when no marker has been written yet.
const BEGINNING_UNIX_SECS: i64 = 946_684_800;

/// Everything modified at or before this instant has already been emitted.
///
/// Advancing never moves it backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Watermark(Instant);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid watermark {text:?}: {reason}")]
pub struct WatermarkParseError {
    pub text: String,
    pub reason: String,
}

impl Watermark {
    pub fn beginning() -> Self {
        Self(DateTime::from_timestamp(BEGINNING_UNIX_SECS, 0).unwrap_or_default())
    }

    pub fn at(instant: Instant) -> Self {
        Self(instant)
    }

    pub fn instant(&self) -> Instant {
        self.0
    }

    /// True when `instant` is already covered, i.e. not strictly newer.
    pub fn covers(&self, instant: &Instant) -> bool {
        *instant <= self.0
    }

    #[must_use]
    pub fn advance(self, instant: Instant) -> Self {
        Self(self.0.max(instant))
    }

    #[must_use]
    pub fn advance_all<I>(self, instants: I) -> Self
    where
        I: IntoIterator<Item = Instant>,
    {
        instants.into_iter().fold(self, Self::advance)
    }

    pub fn to_marker_text(&self) -> String {
        format_instant(&self.0)
    }

    pub fn parse_marker_text(text: &str) -> Result<Self, WatermarkParseError> {
        let trimmed = text.trim();
        DateTime::parse_from_rfc3339(trimmed)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|err| WatermarkParseError {
                text: trimmed.to_string(),
                reason: err.to_string(),
            })
    }
}

impl fmt::Display for Watermark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_marker_text())
    }
}
