//! File logging for the CLI.
//!
//! Each run writes `latest.log` in the cache directory. The previous run's
//! file is archived under a timestamped name and only the newest archives
//! are kept.

use std::fs;
use std::fs::File;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use chrono::DateTime;
use chrono::Local;
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::paths;

const LATEST: &str = "latest.log";
const ARCHIVE_PREFIX: &str = "comedor-";

/// Archived logs kept alongside `latest.log`.
pub const KEEP_ARCHIVES: usize = 25;

/// The directory holding the CLI's log files.
pub struct LogDir {
    dir: PathBuf,
}

impl LogDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn latest(&self) -> PathBuf {
        self.dir.join(LATEST)
    }

    /// Moves `latest.log` aside under a name stamped with `now`.
    ///
    /// Returns the archive path, or `None` when there was nothing to move.
    pub fn archive_latest(&self, now: DateTime<Local>) -> io::Result<Option<PathBuf>> {
        let latest = self.latest();
        if !latest.exists() {
            return Ok(None);
        }
        let name = format!("{}{}.log", ARCHIVE_PREFIX, now.format("%Y%m%d-%H%M%S"));
        let archive = self.dir.join(name);
        fs::rename(&latest, &archive)?;
        Ok(Some(archive))
    }

    /// Archived logs, oldest first.
    pub fn archives(&self) -> io::Result<Vec<PathBuf>> {
        let mut archives: Vec<PathBuf> = fs::read_dir(&self.dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| is_archive(path))
            .collect();
        // Timestamps in the name sort chronologically.
        archives.sort();
        Ok(archives)
    }

    /// Deletes all but the `keep` newest archives. Returns how many went.
    pub fn prune(&self, keep: usize) -> io::Result<usize> {
        let archives = self.archives()?;
        let excess = archives.len().saturating_sub(keep);
        for path in &archives[..excess] {
            fs::remove_file(path)?;
        }
        Ok(excess)
    }

    /// Archives the previous log, prunes old ones and opens a fresh
    /// `latest.log`.
    fn open_fresh(&self) -> io::Result<File> {
        fs::create_dir_all(&self.dir)?;
        self.archive_latest(Local::now())?;
        self.prune(KEEP_ARCHIVES)?;
        File::create(self.latest())
    }
}

fn is_archive(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(ARCHIVE_PREFIX) && name.ends_with(".log"))
}

/// Starts file logging. Logging stays off when no cache directory is
/// available or the log file cannot be opened.
pub fn init(verbose: bool) {
    let Some(dir) = paths::cache_dir() else {
        return;
    };
    let file = match LogDir::new(dir).open_fresh() {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: file logging disabled: {}", e);
            return;
        }
    };

    let level = if verbose {
        LevelFilter::Trace
    } else {
        LevelFilter::Debug
    };
    let _ = WriteLogger::init(level, Config::default(), file);
}
