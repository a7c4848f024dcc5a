use std::fmt;
use std::io;
use std::path::PathBuf;

use oozie_sync_core::{PassStage, PatternError, WatermarkParseError};
use thiserror::Error;

use crate::persist::PersistError;

/// How a record source failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceFailure {
    InvalidUrl,
    Network,
    Timeout,
    HttpStatus(u16),
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Malformed,
    SnapshotUnreadable,
}

impl fmt::Display for SourceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFailure::InvalidUrl => write!(f, "invalid url"),
            SourceFailure::Network => write!(f, "network error"),
            SourceFailure::Timeout => write!(f, "timeout"),
            SourceFailure::HttpStatus(code) => write!(f, "http status {code}"),
            SourceFailure::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            SourceFailure::Malformed => write!(f, "malformed payload"),
            SourceFailure::SnapshotUnreadable => write!(f, "snapshot unreadable"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct SourceError {
    pub kind: SourceFailure,
    pub message: String,
}

impl SourceError {
    pub(crate) fn new(kind: SourceFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Fatal errors of a sync pass. None of them are retried.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("missing configuration: {0}")]
    ConfigMissing(String),
    #[error("invalid configuration: {0}")]
    ConfigInvalid(String),
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),
    #[error("source returned status {status}: {message}")]
    SourceBadStatus { status: u16, message: String },
    #[error("source payload malformed: {0}")]
    SourceMalformed(String),
    #[error("snapshot unreadable: {0}")]
    SnapshotUnreadable(String),
    #[error("marker {path:?} is corrupt: {source}")]
    StateCorrupt {
        path: PathBuf,
        source: WatermarkParseError,
    },
    #[error("marker {path:?} could not be read: {source}")]
    StateUnreadable { path: PathBuf, source: io::Error },
    #[error("output unwritable: {0}")]
    OutputUnwritable(#[from] PersistError),
    #[error("invalid name pattern: {0}")]
    PatternCompileFailure(#[from] PatternError),
}

/// Field-free discriminant of [`SyncError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ConfigMissing,
    ConfigInvalid,
    SourceUnavailable,
    SourceBadStatus,
    SourceMalformed,
    SnapshotUnreadable,
    StateCorrupt,
    StateUnreadable,
    OutputUnwritable,
    PatternCompileFailure,
}

impl SyncError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SyncError::ConfigMissing(_) => ErrorKind::ConfigMissing,
            SyncError::ConfigInvalid(_) => ErrorKind::ConfigInvalid,
            SyncError::SourceUnavailable(_) => ErrorKind::SourceUnavailable,
            SyncError::SourceBadStatus { .. } => ErrorKind::SourceBadStatus,
            SyncError::SourceMalformed(_) => ErrorKind::SourceMalformed,
            SyncError::SnapshotUnreadable(_) => ErrorKind::SnapshotUnreadable,
            SyncError::StateCorrupt { .. } => ErrorKind::StateCorrupt,
            SyncError::StateUnreadable { .. } => ErrorKind::StateUnreadable,
            SyncError::OutputUnwritable(_) => ErrorKind::OutputUnwritable,
            SyncError::PatternCompileFailure(_) => ErrorKind::PatternCompileFailure,
        }
    }
}

impl From<SourceError> for SyncError {
    fn from(err: SourceError) -> Self {
        let message = err.message;
        match err.kind {
            SourceFailure::InvalidUrl => SyncError::ConfigInvalid(message),
            SourceFailure::Network | SourceFailure::Timeout => {
                SyncError::SourceUnavailable(format!("{}: {message}", err.kind))
            }
            SourceFailure::HttpStatus(status) => SyncError::SourceBadStatus { status, message },
            SourceFailure::TooLarge { .. } | SourceFailure::Malformed => {
                SyncError::SourceMalformed(format!("{}: {message}", err.kind))
            }
            SourceFailure::SnapshotUnreadable => SyncError::SnapshotUnreadable(message),
        }
    }
}

/// A pass that stopped before persisting a new watermark.
#[derive(Debug, Error)]
#[error("sync pass failed during {stage}: {error}")]
pub struct PassFailed {
    pub stage: PassStage,
    #[source]
    pub error: SyncError,
}
