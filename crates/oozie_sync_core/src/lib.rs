//! Oozie sync core: pure record model, watermark and selection rules.
mod record;
mod selector;
mod stage;
mod timestamp;
mod watermark;

pub use record::{Record, RecordSet};
pub use selector::{
    accept, classify, NamePattern, ParsedIdentity, PatternError, SkipCounts, SkipReason, Verdict,
    DEFAULT_NAME_PATTERN,
};
pub use stage::PassStage;
pub use timestamp::{format_instant, parse_rfc822, Instant};
pub use watermark::{Watermark, WatermarkParseError};
