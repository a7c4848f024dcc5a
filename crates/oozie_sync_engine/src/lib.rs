//! Oozie sync engine: record sources, watermark store, CSV artifacts and the pass runner.
mod emit;
mod error;
mod filename;
mod pass;
mod persist;
mod source;
mod store;

pub use emit::{ArtifactWriter, ARTIFACT_HEADER};
pub use error::{ErrorKind, PassFailed, SourceError, SourceFailure, SyncError};
pub use filename::artifact_filename;
pub use pass::{run_pass, Clock, PassConfig, PassReport};
pub use persist::{ensure_output_dir, publish, AtomicFileWriter, PersistError, Publish};
pub use source::{
    jobs_url, HttpRecordSource, RecordSource, SnapshotRecordSource, SourceSettings, JOBS_PATH,
};
pub use store::{MarkerStore, WatermarkStore, MARKER_FILENAME};
