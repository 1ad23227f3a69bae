//! Removal of stale intermediates left behind by earlier runs.
//!
//! The tiling tool drops `.kro` lock files next to its inputs and writes
//! into `output` folders. Both are removed before discovery so stale
//! scratch space is never mistaken for a panorama.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, TilesError};

use super::OUTPUT_DIR_NAME;

/// Extension of the tiling tool's lock files.
pub const LOCK_EXTENSION: &str = "kro";

/// What a cleanup pass removed.
#[derive(Debug, Default)]
pub struct CleanupReport {
    pub lock_files: Vec<PathBuf>,
    pub output_dirs: Vec<PathBuf>,
}

impl CleanupReport {
    pub fn total(&self) -> usize {
        self.lock_files.len() + self.output_dirs.len()
    }
}

/// Recursively delete lock files and `output` folders under `root`.
///
/// A missing root is left alone; discovery reports it. Any failed removal
/// aborts the pass.
pub fn clean(root: &Path) -> Result<CleanupReport> {
    let mut report = CleanupReport::default();

    if !root.exists() {
        return Ok(report);
    }

    let mut walker = WalkDir::new(root).min_depth(1).into_iter();
    while let Some(entry) = walker.next() {
        let entry = entry.map_err(|e| TilesError::Io {
            path: e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf()),
            message: format!("Failed to scan for stale files: {}", e),
        })?;
        let path = entry.path();

        if entry.file_type().is_dir() {
            if entry.file_name() == OUTPUT_DIR_NAME {
                walker.skip_current_dir();
                fs::remove_dir_all(path)
                    .map_err(|e| TilesError::io(path, "Failed to remove output folder", e))?;
                tracing::debug!(path = %path.display(), "removed stale output folder");
                report.output_dirs.push(path.to_path_buf());
            }
            continue;
        }

        if is_lock_file(path) {
            fs::remove_file(path)
                .map_err(|e| TilesError::io(path, "Failed to remove lock file", e))?;
            tracing::debug!(path = %path.display(), "removed lock file");
            report.lock_files.push(path.to_path_buf());
        }
    }

    Ok(report)
}

fn is_lock_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == LOCK_EXTENSION)
}
