//! Project manifest (tiles.yaml) parsing.
//!
//! The manifest tells panotiles where the tiling tool and its config
//! templates live, where the source panoramas are, and whether tool
//! failures should abort the run.

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TilesError};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "tiles.yaml";

/// Project manifest loaded from tiles.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Tiling executable. A bare name is looked up in the project root,
    /// then on `PATH`.
    #[serde(default = "default_tool")]
    pub tool: PathBuf,

    /// Directory holding the tiling config templates.
    #[serde(default = "default_templates")]
    pub templates: PathBuf,

    /// Directory containing the source panoramas, relative to the project root.
    #[serde(default = "default_panos")]
    pub panos: PathBuf,

    /// Fail the run when the tool exits non-zero or leaves artifacts missing.
    #[serde(default)]
    pub strict: bool,
}

fn default_tool() -> PathBuf {
    PathBuf::from("krpanotools")
}

fn default_templates() -> PathBuf {
    PathBuf::from("templates")
}

fn default_panos() -> PathBuf {
    PathBuf::from(".src").join("panos")
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            tool: default_tool(),
            templates: default_templates(),
            panos: default_panos(),
            strict: false,
        }
    }
}

impl Manifest {
    /// Load manifest from a tiles.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| TilesError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Load `root/tiles.yaml` if present, defaults otherwise.
    pub fn load_or_default(root: &Path) -> Result<Self> {
        let path = root.join(MANIFEST_FILENAME);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| TilesError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some(format!("Check {} syntax", MANIFEST_FILENAME)),
        })
    }

    /// Templates directory resolved against the project root.
    pub fn templates_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.templates)
    }

    /// Locate the tiling executable.
    ///
    /// Absolute paths and paths present under `root` are taken as-is; bare
    /// names fall back to a `PATH` search.
    pub fn resolve_tool(&self, root: &Path) -> Option<PathBuf> {
        let local = root.join(&self.tool);
        if local.is_file() {
            return Some(local);
        }
        if self.tool.is_absolute() || self.tool.components().count() > 1 {
            return None;
        }

        let path_var = env::var_os("PATH")?;
        env::split_paths(&path_var).find_map(|dir| {
            let candidate = dir.join(&self.tool);
            if candidate.is_file() {
                return Some(candidate);
            }
            let with_suffix = dir.join(format!(
                "{}{}",
                self.tool.display(),
                env::consts::EXE_SUFFIX
            ));
            with_suffix.is_file().then_some(with_suffix)
        })
    }
}
