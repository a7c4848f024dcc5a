use std::path::{Path, PathBuf};

use oozie_sync_core::{format_instant, Instant, ParsedIdentity, Record};
use tempfile::NamedTempFile;

use crate::persist::{publish, PersistError, Publish};

/// Column names of every artifact, in output order.
pub const ARTIFACT_HEADER: [&str; 9] = [
    "id",
    "appName",
    "master",
    "year",
    "month",
    "status",
    "createdTime",
    "lastModTime",
    "endTime",
];

/// One pass's CSV artifact.
///
/// Rows go to a temp file next to the target; [`ArtifactWriter::finish`]
/// flushes, syncs and renames it into place without overwriting an existing
/// file. Dropping the writer without finishing removes the temp file, so a
/// failed pass leaves no partial artifact behind.
pub struct ArtifactWriter {
    target: PathBuf,
    csv: csv::Writer<NamedTempFile>,
    rows: usize,
}

impl ArtifactWriter {
    pub fn create(dir: &Path, filename: &str) -> Result<Self, PersistError> {
        let target = dir.join(filename);
        if target.exists() {
            return Err(PersistError::AlreadyExists(target));
        }

        let tmp = NamedTempFile::new_in(dir)?;
        let mut csv = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(tmp);
        csv.write_record(ARTIFACT_HEADER)?;

        Ok(Self {
            target,
            csv,
            rows: 0,
        })
    }

    pub fn write_row(
        &mut self,
        record: &Record,
        identity: &ParsedIdentity,
    ) -> Result<(), PersistError> {
        let created = instant_cell(record.created_at.as_ref());
        let modified = instant_cell(record.last_modified_at.as_ref());
        let ended = instant_cell(record.ended_at.as_ref());
        self.csv.write_record([
            record.id.as_str(),
            record.name.as_str(),
            identity.tenant_id.as_str(),
            identity.year.as_str(),
            identity.month.as_str(),
            record.status.as_str(),
            created.as_str(),
            modified.as_str(),
            ended.as_str(),
        ])?;
        self.rows += 1;
        Ok(())
    }

    /// Data rows written so far, header excluded.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn finish(self) -> Result<PathBuf, PersistError> {
        let tmp = self
            .csv
            .into_inner()
            .map_err(|err| PersistError::Io(err.into_error()))?;
        publish(tmp, &self.target, Publish::NoClobber)?;
        Ok(self.target)
    }
}

/// Null instants become empty cells.
fn instant_cell(instant: Option<&Instant>) -> String {
    instant.map(format_instant).unwrap_or_default()
}
