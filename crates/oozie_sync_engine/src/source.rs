use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::StreamExt;
use oozie_sync_core::RecordSet;
use reqwest::StatusCode;
use url::Url;

use crate::{SourceError, SourceFailure};

/// Path of the job listing, relative to the configured base address.
pub const JOBS_PATH: &str = "v1/jobs";

#[derive(Debug, Clone)]
pub struct SourceSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            redirect_limit: 5,
            max_bytes: 64 * 1024 * 1024,
        }
    }
}

/// Supplies the full current job listing in one call.
///
/// Implementations neither filter nor page nor retry.
#[async_trait::async_trait]
pub trait RecordSource: Send + Sync {
    /// Human-readable origin for log lines.
    fn describe(&self) -> String;

    async fn fetch(&self) -> Result<RecordSet, SourceError>;
}

/// Live listing from the workflow server over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRecordSource {
    jobs_url: Url,
    client: reqwest::Client,
    settings: SourceSettings,
}

impl HttpRecordSource {
    pub fn new(base_url: &str, settings: SourceSettings) -> Result<Self, SourceError> {
        let jobs_url = jobs_url(base_url)?;
        let client = build_client(&settings)?;
        Ok(Self {
            jobs_url,
            client,
            settings,
        })
    }

    pub fn jobs_url(&self) -> &Url {
        &self.jobs_url
    }
}

/// `{base}/v1/jobs`, whether or not `base` ends with a slash.
pub fn jobs_url(base_url: &str) -> Result<Url, SourceError> {
    let trimmed = base_url.trim();
    let mut base = Url::parse(trimmed)
        .map_err(|err| SourceError::new(SourceFailure::InvalidUrl, format!("{trimmed}: {err}")))?;
    if base.cannot_be_a_base() {
        return Err(SourceError::new(
            SourceFailure::InvalidUrl,
            format!("{trimmed}: not a base address"),
        ));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(JOBS_PATH)
        .map_err(|err| SourceError::new(SourceFailure::InvalidUrl, format!("{trimmed}: {err}")))
}

fn build_client(settings: &SourceSettings) -> Result<reqwest::Client, SourceError> {
    reqwest::Client::builder()
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.request_timeout)
        .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
        .build()
        .map_err(|err| SourceError::new(SourceFailure::Network, err.to_string()))
}

#[async_trait::async_trait]
impl RecordSource for HttpRecordSource {
    fn describe(&self) -> String {
        self.jobs_url.to_string()
    }

    async fn fetch(&self) -> Result<RecordSet, SourceError> {
        let response = self
            .client
            .get(self.jobs_url.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(SourceError::new(
                SourceFailure::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, Some(content_len)));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, Some(next_len)));
            }
            bytes.extend_from_slice(&chunk);
        }

        RecordSet::from_json(&bytes)
            .map_err(|err| SourceError::new(SourceFailure::Malformed, err.to_string()))
    }
}

fn too_large(max_bytes: u64, actual: Option<u64>) -> SourceError {
    SourceError::new(
        SourceFailure::TooLarge { max_bytes, actual },
        "response too large",
    )
}

/// Transport failures only; a body cut off mid-stream is a network error.
/// `Malformed` is reserved for bytes that arrived but do not decode.
fn map_reqwest_error(err: reqwest::Error) -> SourceError {
    if err.is_timeout() {
        return SourceError::new(SourceFailure::Timeout, err.to_string());
    }
    SourceError::new(SourceFailure::Network, err.to_string())
}

/// A listing saved earlier to a local JSON file.
#[derive(Debug, Clone)]
pub struct SnapshotRecordSource {
    path: PathBuf,
}

impl SnapshotRecordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl RecordSource for SnapshotRecordSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<RecordSet, SourceError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|err| {
            SourceError::new(
                SourceFailure::SnapshotUnreadable,
                format!("failed to open {}: {err}", self.path.display()),
            )
        })?;
        RecordSet::from_json(&bytes).map_err(|err| {
            SourceError::new(
                SourceFailure::SnapshotUnreadable,
                format!("failed to parse {}: {err}", self.path.display()),
            )
        })
    }
}
