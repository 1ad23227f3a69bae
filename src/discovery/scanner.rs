//! Directory scanner for discovering panoramas.
//!
//! Lists the panos directory one level deep: top-level files are items,
//! and each top-level folder contributes its immediate child files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, TilesError};

use super::{Item, OUTPUT_DIR_NAME};

/// Result of scanning the panos directory.
#[derive(Debug, Default)]
pub struct Discovery {
    /// The scanned directory.
    pub root: PathBuf,
    /// Top-level entries (files and folders), sorted by name.
    pub top_level: Vec<PathBuf>,
    /// Panoramas to tile, in scan order.
    pub items: Vec<Item>,
}

impl Discovery {
    /// Get the total number of discovered items.
    pub fn total(&self) -> usize {
        self.items.len()
    }

    /// Check if no items were discovered.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn empty_error(root: &Path) -> TilesError {
    TilesError::Validation {
        message: "panos directory is empty".to_string(),
        help: Some(format!("Put source panoramas in {}", root.display())),
    }
}

/// Fail unless `root` exists and has at least one entry.
pub fn ensure_not_empty(root: &Path) -> Result<()> {
    let mut entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(_) => return Err(empty_error(root)),
    };
    match entries.next() {
        Some(_) => Ok(()),
        None => Err(empty_error(root)),
    }
}

/// Scan the panos directory for items.
pub fn discover(root: &Path) -> Result<Discovery> {
    ensure_not_empty(root)?;

    let top_level = sorted_entries(root)?;
    let mut items = Vec::new();

    for entry in &top_level {
        if entry.is_file() {
            items.extend(Item::new(entry.clone(), None));
        } else if entry.is_dir() {
            let parent_name = entry
                .file_name()
                .map(|n| n.to_string_lossy().into_owned());

            for child in sorted_entries(entry)? {
                if child.is_file() {
                    items.extend(Item::new(child, parent_name.clone()));
                }
            }
        }
    }

    Ok(Discovery {
        root: root.to_path_buf(),
        top_level,
        items,
    })
}

/// Immediate children of `dir`, minus hidden entries and `output` folders,
/// sorted by name.
fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let read = fs::read_dir(dir).map_err(|e| TilesError::io(dir, "Failed to list directory", e))?;

    let mut entries = Vec::new();
    for entry in read {
        let entry = entry.map_err(|e| TilesError::io(dir, "Failed to list directory", e))?;
        let name = entry.file_name();
        if name == OUTPUT_DIR_NAME || name.to_string_lossy().starts_with('.') {
            continue;
        }
        entries.push(entry.path());
    }
    entries.sort();
    Ok(entries)
}
