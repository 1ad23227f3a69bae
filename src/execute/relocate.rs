//! Patching and moving the tool's output.

use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Result, TilesError};
use crate::plan::PathRewrite;

/// Rewrite `file` in place, applying `rewrite` to every line.
///
/// Plain text substitution: any occurrence of the token is replaced, not
/// only the ones inside scene URLs. Line endings are preserved.
pub fn rewrite_file(file: &Path, rewrite: &PathRewrite) -> Result<()> {
    let content = fs::read_to_string(file)
        .map_err(|e| TilesError::io(file, "Failed to read XML descriptor", e))?;

    let patched: String = content
        .split_inclusive('\n')
        .map(|line| rewrite.apply(line))
        .collect();

    fs::write(file, patched).map_err(|e| TilesError::io(file, "Failed to write XML descriptor", e))
}

/// Move a file or directory, replacing an existing destination file.
///
/// Falls back to copy and delete when a rename is not possible, which is
/// the case when the panos directory lives on another filesystem.
pub fn move_path(from: &Path, to: &Path) -> Result<()> {
    let move_error = |e: io::Error| TilesError::Io {
        path: from.to_path_buf(),
        message: format!("Failed to move to {}: {}", to.display(), e),
    };

    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::debug!(
                from = %from.display(),
                to = %to.display(),
                error = %e,
                "rename failed, copying"
            );
            copy_then_remove(from, to).map_err(move_error)
        }
    }
}

fn copy_then_remove(from: &Path, to: &Path) -> io::Result<()> {
    if !from.is_dir() {
        fs::copy(from, to)?;
        return fs::remove_file(from);
    }

    for entry in WalkDir::new(from) {
        let entry = entry?;
        let target = to.join(entry.path().strip_prefix(from).map_err(io::Error::other)?);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    fs::remove_dir_all(from)
}

/// Recursively delete a directory.
pub fn remove_dir(dir: &Path) -> Result<()> {
    fs::remove_dir_all(dir).map_err(|e| TilesError::io(dir, "Failed to remove output folder", e))
}
