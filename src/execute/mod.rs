//! Running the tiling tool and relocating what it produced.
//!
//! For each plan that is not already done: create the target folders, run
//! the tool, patch the XML descriptor, move tiles and descriptor into place
//! and drop the scratch `output` folder. A relocation step whose source is
//! missing is skipped with a warning; in strict mode it fails the run, as
//! does a non-zero tool exit.

mod relocate;
mod runner;

use std::fs;
use std::path::Path;

pub use relocate::{move_path, remove_dir, rewrite_file};
pub use runner::{ProcessRunner, ToolOutcome, ToolRunner};

use crate::error::{Result, TilesError};
use crate::plan::InvocationPlan;
use crate::validation::{Diagnostic, Diagnostics};

/// What happened to one item.
#[derive(Debug)]
pub enum Outcome {
    /// Tiles were already in place; nothing ran.
    Skipped,
    /// The tool ran. Warnings list anything that could not be relocated.
    Tiled {
        tool: ToolOutcome,
        warnings: Diagnostics,
    },
}

/// Executes plans with a given tool runner.
pub struct Executor<'a> {
    runner: &'a dyn ToolRunner,
    strict: bool,
}

impl<'a> Executor<'a> {
    pub fn new(runner: &'a dyn ToolRunner) -> Self {
        Self {
            runner,
            strict: false,
        }
    }

    /// Fail on a non-zero tool exit or a missing artifact.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn execute(&self, plan: &InvocationPlan) -> Result<Outcome> {
        if plan.is_done() {
            tracing::debug!(item = %plan.message, "tiles already present");
            return Ok(Outcome::Skipped);
        }

        let paths = &plan.paths;
        tracing::debug!(
            item = %plan.message,
            variant = %plan.variant,
            output = %paths.output_dir.display(),
            tiles = %paths.final_tiles_dir.display(),
            xml = %paths.final_xml_file.display(),
            "planned"
        );

        for dir in [&paths.input_dir, &paths.files_dir, &paths.scenes_dir] {
            fs::create_dir_all(dir)
                .map_err(|e| TilesError::io(dir, "Failed to create folder", e))?;
        }

        let tool = self.runner.run(&plan.invocation)?;
        if !tool.is_success() {
            if self.strict {
                return Err(TilesError::Tool {
                    message: format!(
                        "{} exited with {:?} for {}",
                        plan.invocation.tool.display(),
                        tool.code,
                        plan.message
                    ),
                    help: Some("Run the tool by hand on this panorama to see its output".to_string()),
                });
            }
            tracing::warn!(item = %plan.message, code = ?tool.code, "tiling tool reported failure");
        } else {
            tracing::debug!(item = %plan.message, "tiling tool finished");
        }

        let mut warnings = Diagnostics::new();

        // A missing descriptor is guarded like the tiles and the move below:
        // a warning by default, fatal only in strict mode.
        if self.present(&paths.output_xml_file, "XML descriptor", plan, &mut warnings)? {
            rewrite_file(&paths.output_xml_file, &plan.rewrite)?;
        }

        if self.present(&paths.output_tiles_dir, "tiles folder", plan, &mut warnings)? {
            move_path(&paths.output_tiles_dir, &paths.final_tiles_dir)?;
        }

        if paths.output_xml_file.exists() {
            move_path(&paths.output_xml_file, &paths.final_xml_file)?;
        }

        if paths.output_dir.exists() {
            remove_dir(&paths.output_dir)?;
        }

        Ok(Outcome::Tiled { tool, warnings })
    }

    /// Check a generated artifact, recording a warning (or failing in
    /// strict mode) when it is missing.
    fn present(
        &self,
        path: &Path,
        what: &str,
        plan: &InvocationPlan,
        warnings: &mut Diagnostics,
    ) -> Result<bool> {
        if path.exists() {
            return Ok(true);
        }

        let message = format!(
            "{}: expected {} at {} was not generated",
            plan.message,
            what,
            path.display()
        );
        if self.strict {
            return Err(TilesError::Tool {
                message,
                help: Some("Check the tiling config template and the source image".to_string()),
            });
        }

        tracing::warn!(item = %plan.message, path = %path.display(), "missing {}", what);
        warnings.push(
            Diagnostic::warning("panotiles::relocate::missing-artifact", message)
                .with_help("The item was left partially processed"),
        );
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::Item;
    use crate::plan::{Invocation, Planner, Workspace};
    use crate::prompt::TileOptions;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use tempfile::tempdir;

    /// Writes tiles and a descriptor into `<source dir>/output`, like krpano.
    struct FakeKrpano {
        calls: RefCell<Vec<PathBuf>>,
        code: i32,
        produce: bool,
    }

    impl FakeKrpano {
        fn new() -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                code: 0,
                produce: true,
            }
        }
    }

    impl ToolRunner for FakeKrpano {
        fn run(&self, invocation: &Invocation) -> Result<ToolOutcome> {
            self.calls.borrow_mut().push(invocation.source.clone());
            if self.produce {
                let stem = invocation.source.file_stem().unwrap().to_string_lossy().into_owned();
                let output = invocation.source.parent().unwrap().join("output");
                let tiles = output.join("scenes").join(&stem);
                fs::create_dir_all(&tiles).unwrap();
                fs::write(tiles.join("l1_f.jpg"), "tile").unwrap();
                fs::write(
                    output.join(format!("{}.xml", stem)),
                    format!("<image url=\"scenes/{}/l1_%s.jpg\"/>\n", stem),
                )
                .unwrap();
            }
            Ok(ToolOutcome { code: Some(self.code) })
        }
    }

    fn plan_for(root: &Path) -> InvocationPlan {
        let panos = root.join(".src/panos");
        fs::create_dir_all(panos.join("car1")).unwrap();
        let source = panos.join("car1/a_b_c_d.jpg");
        fs::write(&source, "jpg").unwrap();

        let workspace = Workspace {
            root: root.to_path_buf(),
            panos_dir: panos,
            project_group: Some("clients".to_string()),
            shared_assets: false,
        };
        let planner = Planner::new(
            workspace,
            PathBuf::from("krpanotools"),
            Path::new("templates"),
            TileOptions::default(),
        );
        planner.plan(&Item::new(source, Some("car1".to_string())).unwrap())
    }

    #[test]
    fn test_execute_relocates_output() {
        let dir = tempdir().unwrap();
        let plan = plan_for(dir.path());
        let runner = FakeKrpano::new();

        let outcome = Executor::new(&runner).execute(&plan).unwrap();

        match outcome {
            Outcome::Tiled { tool, warnings } => {
                assert!(tool.is_success());
                assert!(warnings.is_empty());
            }
            Outcome::Skipped => panic!("should have tiled"),
        }
        assert!(plan.paths.final_tiles_dir.join("l1_f.jpg").exists());
        assert_eq!(
            fs::read_to_string(&plan.paths.final_xml_file).unwrap(),
            "<image url=\"%CURRENTXML%/scenes/a_b_c_d/l1_%s.jpg\"/>\n"
        );
        assert!(!plan.paths.output_dir.exists());
    }

    #[test]
    fn test_execute_skips_done_items() {
        let dir = tempdir().unwrap();
        let plan = plan_for(dir.path());
        fs::create_dir_all(&plan.paths.final_tiles_dir).unwrap();
        let runner = FakeKrpano::new();

        let outcome = Executor::new(&runner).execute(&plan).unwrap();

        assert!(matches!(outcome, Outcome::Skipped));
        assert!(runner.calls.borrow().is_empty());
    }

    #[test]
    fn test_execute_ignores_exit_status_by_default() {
        let dir = tempdir().unwrap();
        let plan = plan_for(dir.path());
        let runner = FakeKrpano {
            code: 3,
            ..FakeKrpano::new()
        };

        let outcome = Executor::new(&runner).execute(&plan).unwrap();

        assert!(matches!(outcome, Outcome::Tiled { tool, .. } if tool.code == Some(3)));
        assert!(plan.paths.final_tiles_dir.exists());
    }

    #[test]
    fn test_execute_strict_fails_on_exit_status() {
        let dir = tempdir().unwrap();
        let plan = plan_for(dir.path());
        let runner = FakeKrpano {
            code: 3,
            ..FakeKrpano::new()
        };

        let err = Executor::new(&runner).strict(true).execute(&plan).unwrap_err();
        assert!(matches!(err, TilesError::Tool { .. }));
    }

    #[test]
    fn test_execute_warns_on_missing_artifacts() {
        let dir = tempdir().unwrap();
        let plan = plan_for(dir.path());
        let runner = FakeKrpano {
            produce: false,
            ..FakeKrpano::new()
        };

        let outcome = Executor::new(&runner).execute(&plan).unwrap();

        match outcome {
            Outcome::Tiled { warnings, .. } => assert_eq!(warnings.warning_count(), 2),
            Outcome::Skipped => panic!("should have run"),
        }
        assert!(plan.paths.scenes_dir.is_dir());
        assert!(!plan.paths.final_tiles_dir.exists());
    }

    #[test]
    fn test_execute_strict_fails_on_missing_artifacts() {
        let dir = tempdir().unwrap();
        let plan = plan_for(dir.path());
        let runner = FakeKrpano {
            produce: false,
            ..FakeKrpano::new()
        };

        let err = Executor::new(&runner).strict(true).execute(&plan).unwrap_err();
        assert!(err.to_string().contains("XML descriptor"));
    }
}
