use oozie_sync_core::Instant;

/// UTC, lexically sortable, and free of `:` so it is valid on every filesystem.
const ARTIFACT_TIME_FORMAT: &str = "%Y-%m-%dT%H-%M-%SZ";

/// `{started_at}.csv`, e.g. `2023-07-01T08-30-05Z.csv`.
pub fn artifact_filename(started_at: &Instant) -> String {
    format!("{}.csv", started_at.format(ARTIFACT_TIME_FORMAT))
}
