use std::path::{Path, PathBuf};

use clap::Parser;

/// Export new reconciler workflow runs from Oozie as CSV.
///
/// With one path, fetches `$OOZIE_URL/v1/jobs`. With two, reads the listing
/// from a saved JSON snapshot instead.
#[derive(Debug, Parser)]
#[command(
    name = "oozie_sync",
    version,
    about,
    override_usage = "oozie_sync [SNAPSHOT_FILE] <OUTPUT_DIR>"
)]
pub struct Cli {
    /// Output directory, or the snapshot file when two paths are given
    #[arg(value_name = "SNAPSHOT_FILE|OUTPUT_DIR")]
    first: PathBuf,

    /// Output directory when the first path is a snapshot file
    #[arg(value_name = "OUTPUT_DIR")]
    second: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Live { output_dir: PathBuf },
    Snapshot { snapshot: PathBuf, output_dir: PathBuf },
}

impl Mode {
    pub fn output_dir(&self) -> &Path {
        match self {
            Mode::Live { output_dir } | Mode::Snapshot { output_dir, .. } => output_dir,
        }
    }
}

impl Cli {
    pub fn into_mode(self) -> Mode {
        match self.second {
            Some(output_dir) => Mode::Snapshot {
                snapshot: self.first,
                output_dir,
            },
            None => Mode::Live {
                output_dir: self.first,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Mode, clap::Error> {
        Cli::try_parse_from(std::iter::once("oozie_sync").chain(args.iter().copied()))
            .map(Cli::into_mode)
    }

    #[test]
    fn one_path_is_live_mode() {
        assert_eq!(
            parse(&["out"]).unwrap(),
            Mode::Live {
                output_dir: PathBuf::from("out")
            }
        );
    }

    #[test]
    fn two_paths_are_snapshot_then_output() {
        let mode = parse(&["jobs.json", "out"]).unwrap();
        assert_eq!(
            mode,
            Mode::Snapshot {
                snapshot: PathBuf::from("jobs.json"),
                output_dir: PathBuf::from("out"),
            }
        );
        assert_eq!(mode.output_dir(), Path::new("out"));
    }

    #[test]
    fn other_argument_counts_are_usage_errors() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["a", "b", "c"]).is_err());
    }
}
