//! Source discovery for panotiles projects.
//!
//! This module clears stale intermediates out of the panos directory and
//! lists the panoramas to tile: top-level files, plus the files one level
//! down inside each top-level folder.
//!
//! # Example
//!
//! ```ignore
//! use panotiles::discovery::{clean, discover};
//!
//! clean(&panos_dir)?;
//! let discovery = discover(&panos_dir)?;
//! println!("Found {} panoramas", discovery.items.len());
//! ```

mod cleanup;
mod scanner;

use std::borrow::Cow;
use std::path::{Path, PathBuf};

pub use cleanup::{clean, CleanupReport, LOCK_EXTENSION};
pub use scanner::{discover, ensure_not_empty, Discovery};

/// Name of the scratch folder the tiling tool writes into.
pub const OUTPUT_DIR_NAME: &str = "output";

/// Marker in a base name that identifies a visualiser scene.
pub const SCENE_MARKER: &str = "scene";

/// A single panorama to tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Path of the source image.
    pub path: PathBuf,
    /// File name without extension.
    pub base_name: String,
    /// Enclosing folder name when nested inside a top-level folder.
    pub parent_name: Option<String>,
}

impl Item {
    /// Build an item from a source path. Returns `None` for paths without a
    /// file name.
    pub fn new(path: impl Into<PathBuf>, parent_name: Option<String>) -> Option<Self> {
        let path = path.into();
        let base_name = base_name(&path)?;
        Some(Self {
            path,
            base_name,
            parent_name,
        })
    }

    /// Directory that holds the source image.
    pub fn source_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Whether the base name marks this item as a visualiser scene.
    pub fn is_scene(&self) -> bool {
        self.base_name.contains(SCENE_MARKER)
    }

    /// Name of the folder holding the source image. For top-level items
    /// this is the panos directory itself.
    pub fn car_name(&self) -> Cow<'_, str> {
        match (&self.parent_name, self.source_dir().file_name()) {
            (Some(parent), _) => Cow::Borrowed(parent.as_str()),
            (None, Some(dir)) => dir.to_string_lossy(),
            (None, None) => Cow::Borrowed(self.base_name.as_str()),
        }
    }
}

/// File name with its final extension stripped.
pub fn base_name(path: &Path) -> Option<String> {
    path.file_stem().map(|s| s.to_string_lossy().into_owned())
}
