use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use oozie_sync_core::Watermark;
use sync_logging::sync_debug;

use crate::persist::AtomicFileWriter;
use crate::SyncError;

/// Name of the watermark file inside the output directory.
pub const MARKER_FILENAME: &str = "_marker";

/// Durable home of the watermark between passes.
pub trait WatermarkStore: Send + Sync {
    /// The stored watermark, or [`Watermark::beginning`] when none was saved yet.
    fn load(&self) -> Result<Watermark, SyncError>;

    /// Replace the stored watermark. After a crash `load` returns either the old or the new value.
    fn save(&self, watermark: Watermark) -> Result<(), SyncError>;
}

/// Keeps the watermark as RFC3339 text in `{output_dir}/_marker`.
#[derive(Debug, Clone)]
pub struct MarkerStore {
    writer: AtomicFileWriter,
}

impl MarkerStore {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            writer: AtomicFileWriter::new(output_dir.into()),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.writer.dir().join(MARKER_FILENAME)
    }

    pub fn dir(&self) -> &Path {
        self.writer.dir()
    }
}

impl WatermarkStore for MarkerStore {
    fn load(&self) -> Result<Watermark, SyncError> {
        let path = self.path();
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                sync_debug!("No marker at {:?}; starting from the beginning", path);
                return Ok(Watermark::beginning());
            }
            Err(source) => return Err(SyncError::StateUnreadable { path, source }),
        };

        let text = String::from_utf8_lossy(&bytes);
        Watermark::parse_marker_text(&text).map_err(|source| SyncError::StateCorrupt { path, source })
    }

    fn save(&self, watermark: Watermark) -> Result<(), SyncError> {
        let text = watermark.to_marker_text();
        let path = self.writer.write(MARKER_FILENAME, text.as_bytes())?;
        sync_debug!("Saved marker {} to {:?}", text, path);
        Ok(())
    }
}
