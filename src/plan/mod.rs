//! Per-item planning.
//!
//! Turns a discovered [`Item`] into an [`InvocationPlan`]: the tool call to
//! make and every path the result has to end up in. Planning touches the
//! filesystem only through the [`Workspace`], which is probed once per run.

mod variant;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::discovery::Item;
use crate::manifest::Manifest;
use crate::prompt::TileOptions;

pub use variant::{ProjectVariant, GFORCES_GROUP, HR_OWEN_GROUP};

/// Folder whose presence switches generic tours to shared-asset paths.
pub const SHARED_DIR_NAME: &str = "shared";

/// The directory a run operates in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    /// Working directory of the run; target paths are built under it.
    pub root: PathBuf,
    /// Directory containing the source panoramas.
    pub panos_dir: PathBuf,
    /// Name of the directory one level above `root`.
    pub project_group: Option<String>,
    /// Whether `root/shared/` exists.
    pub shared_assets: bool,
}

impl Workspace {
    /// Probe `root` for the facts planning depends on.
    pub fn new(root: impl Into<PathBuf>, manifest: &Manifest) -> Self {
        let root = root.into();
        let project_group = root
            .parent()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned());

        Self {
            panos_dir: root.join(&manifest.panos),
            shared_assets: root.join(SHARED_DIR_NAME).is_dir(),
            project_group,
            root,
        }
    }
}

/// Every path involved in tiling one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPaths {
    pub input_dir: PathBuf,
    pub files_dir: PathBuf,
    pub scenes_dir: PathBuf,
    /// Scratch folder the tool writes into.
    pub output_dir: PathBuf,
    pub output_tiles_dir: PathBuf,
    pub output_xml_file: PathBuf,
    /// Where the tiles end up. Its existence marks the item as done.
    pub final_tiles_dir: PathBuf,
    pub final_xml_file: PathBuf,
}

/// Literal substitution applied to the generated XML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRewrite {
    pub from: String,
    pub to: String,
}

impl PathRewrite {
    pub fn apply(&self, line: &str) -> String {
        line.replace(&self.from, &self.to)
    }
}

/// Variant-specific part of a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub paths: TargetPaths,
    pub rewrite: PathRewrite,
    /// Short label used in status output.
    pub message: String,
}

/// A single call of the tiling tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub tool: PathBuf,
    pub config_file: PathBuf,
    pub source: PathBuf,
}

impl Invocation {
    /// Arguments after the program name: `makepano -config=<file> <source>`.
    pub fn args(&self) -> Vec<OsString> {
        let mut config = OsString::from("-config=");
        config.push(&self.config_file);
        vec![
            OsString::from("makepano"),
            config,
            self.source.clone().into_os_string(),
        ]
    }
}

/// Everything needed to tile and relocate one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationPlan {
    pub item: Item,
    pub variant: ProjectVariant,
    pub invocation: Invocation,
    pub paths: TargetPaths,
    pub rewrite: PathRewrite,
    pub message: String,
}

impl InvocationPlan {
    /// Whether a previous run already produced this item's tiles.
    pub fn is_done(&self) -> bool {
        self.paths.final_tiles_dir.exists()
    }
}

/// Run-wide inputs shared by every plan.
#[derive(Debug, Clone)]
pub struct Planner {
    workspace: Workspace,
    tool: PathBuf,
    config_file: PathBuf,
}

impl Planner {
    pub fn new(
        workspace: Workspace,
        tool: PathBuf,
        templates_dir: &Path,
        options: TileOptions,
    ) -> Self {
        Self {
            config_file: templates_dir.join(options.config_file_name()),
            workspace,
            tool,
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Config template used for every item of the run.
    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Plan a single item.
    pub fn plan(&self, item: &Item) -> InvocationPlan {
        let variant =
            ProjectVariant::select(self.workspace.project_group.as_deref(), item.is_scene());
        let Layout {
            paths,
            rewrite,
            message,
        } = variant.layout(item, &self.workspace);

        InvocationPlan {
            item: item.clone(),
            variant,
            invocation: Invocation {
                tool: self.tool.clone(),
                config_file: self.config_file.clone(),
                source: item.path.clone(),
            },
            paths,
            rewrite,
            message,
        }
    }

    /// Plan every item, in order.
    pub fn plan_all(&self, items: &[Item]) -> Vec<InvocationPlan> {
        items.iter().map(|item| self.plan(item)).collect()
    }
}
