use std::path::PathBuf;
use std::time::Duration;

use envconfig::Envconfig;
use oozie_sync_core::{NamePattern, DEFAULT_NAME_PATTERN};
use oozie_sync_engine::{SourceSettings, SyncError};
use sync_logging::LogSettings;

#[derive(Envconfig, Debug, Clone)]
pub struct AppConfig {
    /// Base address of the Oozie server; only needed without a snapshot file.
    #[envconfig(from = "OOZIE_URL")]
    pub oozie_url: Option<String>,

    /// Overrides the reconciler naming pattern.
    #[envconfig(from = "OOZIE_SYNC_NAME_PATTERN")]
    pub name_pattern: Option<String>,

    #[envconfig(from = "OOZIE_SYNC_CONNECT_TIMEOUT_SECS", default = "10")]
    pub connect_timeout_secs: u64,

    #[envconfig(from = "OOZIE_SYNC_REQUEST_TIMEOUT_SECS", default = "60")]
    pub request_timeout_secs: u64,

    #[envconfig(from = "OOZIE_SYNC_MAX_RESPONSE_BYTES", default = "67108864")]
    pub max_response_bytes: u64,

    #[envconfig(from = "OOZIE_SYNC_LOG_LEVEL", default = "info")]
    pub log_level: String,

    #[envconfig(from = "OOZIE_SYNC_LOG_FILE")]
    pub log_file: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, SyncError> {
        Self::init_from_env().map_err(|err| SyncError::ConfigInvalid(err.to_string()))
    }

    /// The live source address. Unset and empty are both missing.
    pub fn oozie_url(&self) -> Result<&str, SyncError> {
        match self.oozie_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(SyncError::ConfigMissing(
                "the environment variable OOZIE_URL is not set".to_string(),
            )),
        }
    }

    pub fn name_pattern(&self) -> Result<NamePattern, SyncError> {
        let pattern = self.name_pattern.as_deref().unwrap_or(DEFAULT_NAME_PATTERN);
        Ok(NamePattern::new(pattern)?)
    }

    pub fn source_settings(&self) -> SourceSettings {
        SourceSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_response_bytes,
            ..SourceSettings::default()
        }
    }

    pub fn log_settings(&self) -> Result<LogSettings, SyncError> {
        let level = sync_logging::parse_level(&self.log_level).ok_or_else(|| {
            SyncError::ConfigInvalid(format!(
                "OOZIE_SYNC_LOG_LEVEL={:?} is not a log level",
                self.log_level
            ))
        })?;
        Ok(LogSettings {
            level,
            file: self
                .log_file
                .as_deref()
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}
