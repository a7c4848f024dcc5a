//! `oozie_sync [SNAPSHOT_FILE] OUTPUT_DIR`: one incremental export pass.
mod cli;
mod config;

use std::process::ExitCode;

use anyhow::anyhow;
use clap::Parser;
use oozie_sync_engine::{
    run_pass, HttpRecordSource, MarkerStore, PassConfig, PassFailed, RecordSource,
    SnapshotRecordSource, SyncError,
};
use sync_logging::sync_info;

use crate::cli::{Cli, Mode};
use crate::config::AppConfig;

fn main() -> ExitCode {
    // Usage errors are reported by clap on stderr with exit status 2.
    let cli = Cli::parse();
    match run(cli.into_mode()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if !already_logged(&err) {
                eprintln!("oozie_sync: {err}");
            }
            ExitCode::FAILURE
        }
    }
}

/// A failed pass has been logged by the engine; setup errors have not.
fn already_logged(err: &anyhow::Error) -> bool {
    err.downcast_ref::<PassFailed>().is_some()
}

fn run(mode: Mode) -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    sync_logging::initialize(&config.log_settings()?);

    let output_dir = mode.output_dir().to_path_buf();
    let pass_config = PassConfig::new(&output_dir, config.name_pattern()?);
    let store = MarkerStore::new(&output_dir);
    let source: Box<dyn RecordSource> = match &mode {
        Mode::Live { .. } => Box::new(
            HttpRecordSource::new(config.oozie_url()?, config.source_settings())
                .map_err(SyncError::from)?,
        ),
        Mode::Snapshot { snapshot, .. } => Box::new(SnapshotRecordSource::new(snapshot)),
    };

    // One pass, driven to completion on the calling thread.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| anyhow!("failed to start async runtime: {err}"))?;
    let report = runtime.block_on(run_pass(&pass_config, source.as_ref(), &store))?;

    sync_info!(
        "Exported {} workflows to {}",
        report.written,
        report.artifact.display()
    );
    Ok(())
}
