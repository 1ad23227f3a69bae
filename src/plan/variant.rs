//! Project variants and their output layouts.
//!
//! Which layout a panorama gets depends on the project group the run
//! belongs to and on whether the panorama is a visualiser scene. Each
//! variant has its own layout builder.

use std::fmt;
use std::path::Path;

use crate::discovery::{Item, OUTPUT_DIR_NAME};

use super::{Layout, PathRewrite, TargetPaths, Workspace};

/// Project group that gets the dealer layouts.
pub const GFORCES_GROUP: &str = "gforces";
/// Project group with its own non-scene layout.
pub const HR_OWEN_GROUP: &str = "hr_owen";

/// How target paths are computed for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectVariant {
    /// Regular car tour.
    Generic,
    /// Scene of a visualiser in a special project.
    SpecialVisualiser,
    /// Non-scene panorama in an HR Owen project.
    SpecialOtherHrOwen,
    /// Non-scene panorama in a gforces project.
    SpecialOtherGeneric,
}

impl ProjectVariant {
    /// Pick the variant for a project group and an item's scene flag.
    pub fn select(project_group: Option<&str>, is_scene: bool) -> Self {
        match (project_group, is_scene) {
            (Some(GFORCES_GROUP | HR_OWEN_GROUP), true) => ProjectVariant::SpecialVisualiser,
            (Some(HR_OWEN_GROUP), false) => ProjectVariant::SpecialOtherHrOwen,
            (Some(GFORCES_GROUP), false) => ProjectVariant::SpecialOtherGeneric,
            _ => ProjectVariant::Generic,
        }
    }

    /// Compute the layout of `item` under this variant.
    pub fn layout(self, item: &Item, workspace: &Workspace) -> Layout {
        match self {
            ProjectVariant::Generic => generic(item, workspace),
            ProjectVariant::SpecialVisualiser => visualiser(item, workspace),
            ProjectVariant::SpecialOtherHrOwen => other_hr_owen(item, workspace),
            ProjectVariant::SpecialOtherGeneric => other_generic(item, workspace),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ProjectVariant::Generic => "generic",
            ProjectVariant::SpecialVisualiser => "visualiser",
            ProjectVariant::SpecialOtherHrOwen => "hr-owen",
            ProjectVariant::SpecialOtherGeneric => "special",
        }
    }
}

impl fmt::Display for ProjectVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `<root>/<dir>/files/scenes` skeleton shared by every variant.
fn skeleton(
    workspace: &Workspace,
    dir: &str,
    tiles: &str,
    xml: &str,
    output_dir: &Path,
    base_name: &str,
) -> TargetPaths {
    let input_dir = workspace.root.join(dir);
    let files_dir = input_dir.join("files");
    let scenes_dir = files_dir.join("scenes");

    TargetPaths {
        final_tiles_dir: scenes_dir.join(tiles),
        final_xml_file: scenes_dir.join(xml),
        output_tiles_dir: output_dir.join("scenes").join(base_name),
        output_xml_file: output_dir.join(format!("{}.xml", base_name)),
        output_dir: output_dir.to_path_buf(),
        input_dir,
        files_dir,
        scenes_dir,
    }
}

fn scene_token(base_name: &str) -> String {
    format!("scenes/{}", base_name)
}

fn generic(item: &Item, workspace: &Workspace) -> Layout {
    let tour = item.base_name.as_str();
    let car = item.car_name();
    let output_dir = item.source_dir().join(OUTPUT_DIR_NAME);

    let to = if workspace.shared_assets {
        format!("%SWFPATH%/../{}/files/scenes/tiles", tour)
    } else {
        format!("%CURRENTXML%/scenes/{}", tour)
    };

    Layout {
        paths: skeleton(workspace, &car, tour, &format!("{}.xml", tour), &output_dir, tour),
        rewrite: PathRewrite {
            from: scene_token(tour),
            to,
        },
        message: format!("{}/{}", car, tour),
    }
}

fn visualiser(item: &Item, workspace: &Workspace) -> Layout {
    let tour = item.base_name.as_str();
    let car = item.car_name();
    let output_dir = item.source_dir().join(OUTPUT_DIR_NAME);

    Layout {
        paths: skeleton(workspace, &car, tour, &format!("{}.xml", tour), &output_dir, tour),
        rewrite: PathRewrite {
            from: scene_token(tour),
            to: format!("%SWFPATH%/../{}/files/scenes/{}", car, tour),
        },
        message: format!("{}/{}", car, tour),
    }
}

fn other_hr_owen(item: &Item, workspace: &Workspace) -> Layout {
    let tour = item.base_name.as_str();
    let output_dir = workspace.panos_dir.join(tour).join(OUTPUT_DIR_NAME);

    Layout {
        paths: skeleton(workspace, tour, "tiles", &format!("{}.xml", tour), &output_dir, tour),
        rewrite: PathRewrite {
            from: scene_token(tour),
            to: format!("%SWFPATH%/../../{}/files/scenes/{}", tour, tour),
        },
        message: format!("{}/{}", tour, tour),
    }
}

fn other_generic(item: &Item, workspace: &Workspace) -> Layout {
    let tour = item.base_name.as_str();
    let output_dir = workspace.panos_dir.join(OUTPUT_DIR_NAME);

    Layout {
        paths: skeleton(workspace, tour, "tiles", "scene.xml", &output_dir, tour),
        rewrite: PathRewrite {
            from: scene_token(tour),
            to: format!("%SWFPATH%/../{}/files/scenes/tiles", tour),
        },
        message: format!("{}/{}", tour, tour),
    }
}
