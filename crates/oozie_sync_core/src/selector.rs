use std::fmt;

use regex::Regex;
use thiserror::Error;

use crate::{Record, Watermark};

/// Reconciler workflow names: `aws-reconciler-production-<account>-<yyyy>-<mm>`.
pub const DEFAULT_NAME_PATTERN: &str =
    r"^aws-reconciler-production-([0-9]{12})-([0-9]{4})-([0-9]{2})$";

/// Capture groups 1..=3 must be tenant id, year and month.
const REQUIRED_GROUPS: usize = 3;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("invalid regular expression: {0}")]
    Invalid(#[from] regex::Error),
    #[error("name pattern needs 3 capture groups (tenant, year, month), found {found}")]
    TooFewGroups { found: usize },
}

/// Compiled workflow-name pattern.
#[derive(Debug, Clone)]
pub struct NamePattern {
    regex: Regex,
}

/// Partition fields extracted from a matching workflow name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedIdentity {
    pub tenant_id: String,
    pub year: String,
    pub month: String,
}

impl NamePattern {
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let regex = Regex::new(pattern)?;
        // captures_len counts the implicit whole-match group.
        let found = regex.captures_len() - 1;
        if found < REQUIRED_GROUPS {
            return Err(PatternError::TooFewGroups { found });
        }
        Ok(Self { regex })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Matches and splits `name` in one step; `None` if it does not match or an
    /// optional group did not participate.
    pub fn decompose(&self, name: &str) -> Option<ParsedIdentity> {
        let caps = self.regex.captures(name)?;
        let group = |idx: usize| caps.get(idx).map(|m| m.as_str().to_string());
        Some(ParsedIdentity {
            tenant_id: group(1)?,
            year: group(2)?,
            month: group(3)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    NameMismatch,
    /// No `lastModTime`; treated as not yet complete.
    MissingLastModified,
    /// Modified at or before the watermark.
    NotNewer,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NameMismatch => write!(f, "name does not match pattern"),
            SkipReason::MissingLastModified => write!(f, "no last modified time"),
            SkipReason::NotNewer => write!(f, "not newer than watermark"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accept(ParsedIdentity),
    Skip(SkipReason),
}

/// Decide whether `record` belongs in this pass.
///
/// The name is checked first, so a non-matching record is never compared
/// against the watermark. The watermark itself is exclusive.
pub fn classify(record: &Record, watermark: &Watermark, pattern: &NamePattern) -> Verdict {
    let Some(identity) = pattern.decompose(&record.name) else {
        return Verdict::Skip(SkipReason::NameMismatch);
    };
    match record.last_modified_at.as_ref() {
        None => Verdict::Skip(SkipReason::MissingLastModified),
        Some(modified) if watermark.covers(modified) => Verdict::Skip(SkipReason::NotNewer),
        Some(_) => Verdict::Accept(identity),
    }
}

/// [`classify`] reduced to the accepted decomposition.
pub fn accept(
    record: &Record,
    watermark: &Watermark,
    pattern: &NamePattern,
) -> Option<ParsedIdentity> {
    match classify(record, watermark, pattern) {
        Verdict::Accept(identity) => Some(identity),
        Verdict::Skip(_) => None,
    }
}

/// Per-reason tally of records left out of a pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkipCounts {
    pub name_mismatch: usize,
    pub missing_last_modified: usize,
    pub not_newer: usize,
}

impl SkipCounts {
    pub fn record(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::NameMismatch => self.name_mismatch += 1,
            SkipReason::MissingLastModified => self.missing_last_modified += 1,
            SkipReason::NotNewer => self.not_newer += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.name_mismatch + self.missing_last_modified + self.not_newer
    }
}
