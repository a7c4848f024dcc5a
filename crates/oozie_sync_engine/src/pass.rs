use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use oozie_sync_core::{
    classify, Instant, NamePattern, PassStage, RecordSet, SkipCounts, Verdict, Watermark,
};
use sync_logging::{sync_debug, sync_error, sync_info};

use crate::emit::ArtifactWriter;
use crate::filename::artifact_filename;
use crate::persist::ensure_output_dir;
use crate::source::RecordSource;
use crate::store::WatermarkStore;
use crate::{PassFailed, SyncError};

pub type Clock = Arc<dyn Fn() -> Instant + Send + Sync>;

/// Everything one pass needs besides its source and store.
#[derive(Clone)]
pub struct PassConfig {
    pub output_dir: PathBuf,
    pub name_pattern: NamePattern,
    /// Wall clock; its value at pass start names the artifact.
    pub now_utc: Clock,
}

impl PassConfig {
    pub fn new(output_dir: impl Into<PathBuf>, name_pattern: NamePattern) -> Self {
        Self {
            output_dir: output_dir.into(),
            name_pattern,
            now_utc: Arc::new(Utc::now),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    pub started_at: Instant,
    pub artifact: PathBuf,
    pub loaded: Watermark,
    pub persisted: Watermark,
    /// Records in the source listing.
    pub total: usize,
    pub written: usize,
    pub skipped: SkipCounts,
}

struct Emitted {
    artifact: PathBuf,
    accepted: Vec<Instant>,
    written: usize,
    skipped: SkipCounts,
}

/// Walks the stages in order and tags failures with the stage they happened in.
struct StageTracker {
    stage: PassStage,
}

impl StageTracker {
    fn start() -> Self {
        sync_debug!("Pass stage: {}", PassStage::Init);
        Self {
            stage: PassStage::Init,
        }
    }

    fn enter(&mut self, next: PassStage) {
        debug_assert_eq!(self.stage.next(), Some(next), "pass stages out of order");
        sync_debug!("Pass stage: {} -> {}", self.stage, next);
        self.stage = next;
    }

    fn fail(&self, error: impl Into<SyncError>) -> PassFailed {
        let error = error.into();
        sync_error!("Sync pass failed during {}: {}", self.stage, error);
        PassFailed {
            stage: self.stage,
            error,
        }
    }
}

/// Run one incremental pass.
///
/// The artifact is completely written and renamed into place before the
/// watermark is saved. A failure at any stage returns early and leaves the
/// stored watermark untouched, so the next pass sees the same records again.
/// With nothing accepted the loaded watermark is saved back unchanged, which
/// refreshes the marker's modification time.
pub async fn run_pass(
    config: &PassConfig,
    source: &dyn RecordSource,
    store: &dyn WatermarkStore,
) -> Result<PassReport, PassFailed> {
    let mut tracker = StageTracker::start();
    let started_at = (config.now_utc)();
    ensure_output_dir(&config.output_dir).map_err(|e| tracker.fail(e))?;

    tracker.enter(PassStage::LoadWatermark);
    let loaded = store.load().map_err(|e| tracker.fail(e))?;
    sync_info!("Writing workflows from: {}", loaded);

    tracker.enter(PassStage::FetchSource);
    sync_info!("Fetching workflows from {}", source.describe());
    let set = source.fetch().await.map_err(|e| tracker.fail(e))?;
    sync_debug!(
        "Source listing: total={} len={} offset={} received={}",
        set.total,
        set.returned,
        set.offset,
        set.len()
    );

    tracker.enter(PassStage::FilterAndEmit);
    let emitted =
        filter_and_emit(config, &set, &loaded, &started_at).map_err(|e| tracker.fail(e))?;

    tracker.enter(PassStage::AdvanceWatermark);
    let next = loaded.advance_all(emitted.accepted.iter().copied());
    debug_assert!(next >= loaded, "watermark moved backwards");

    tracker.enter(PassStage::PersistWatermark);
    store.save(next).map_err(|e| tracker.fail(e))?;

    tracker.enter(PassStage::Done);
    let report = PassReport {
        started_at,
        artifact: emitted.artifact,
        loaded,
        persisted: next,
        total: set.len(),
        written: emitted.written,
        skipped: emitted.skipped,
    };
    sync_info!(
        "Pass done: wrote {} of {} workflows to {:?} (skipped: {} name mismatch, {} without last modified, {} not newer); watermark {} -> {}",
        report.written,
        report.total,
        report.artifact,
        report.skipped.name_mismatch,
        report.skipped.missing_last_modified,
        report.skipped.not_newer,
        report.loaded,
        report.persisted
    );
    Ok(report)
}

fn filter_and_emit(
    config: &PassConfig,
    set: &RecordSet,
    watermark: &Watermark,
    started_at: &Instant,
) -> Result<Emitted, SyncError> {
    let filename = artifact_filename(started_at);
    let mut writer = ArtifactWriter::create(&config.output_dir, &filename)?;
    let mut accepted = Vec::new();
    let mut skipped = SkipCounts::default();

    for record in &set.records {
        match classify(record, watermark, &config.name_pattern) {
            Verdict::Accept(identity) => {
                writer.write_row(record, &identity)?;
                accepted.extend(record.last_modified_at);
                sync_info!("Write workflow: {}", record.name);
            }
            Verdict::Skip(reason) => {
                sync_debug!("Skip workflow {} ({}): {}", record.id, record.name, reason);
                skipped.record(reason);
            }
        }
    }

    let written = writer.rows();
    let artifact = writer.finish()?;
    Ok(Emitted {
        artifact,
        accepted,
        written,
        skipped,
    })
}
