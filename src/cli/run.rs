//! Run command implementation.
//!
//! Checks the environment, asks the two tiling questions and hands over to
//! the batch pipeline.

use std::env;
use std::path::Path;

use clap::Args;

use crate::discovery::ensure_not_empty;
use crate::error::{Result, TilesError};
use crate::execute::ProcessRunner;
use crate::manifest::{Manifest, MANIFEST_FILENAME};
use crate::output::{plural, Printer};
use crate::pipeline::{process, RunOptions};
use crate::plan::{Planner, Workspace};
use crate::prompt::{Prompter, TerminalPrompter, TileOptions};

/// Tile every panorama under .src/panos
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Skip checking that names have four underscore-separated parts
    #[arg(short = 'i', long = "ignore-underscores")]
    pub ignore_underscores: bool,
}

impl RunArgs {
    /// Whether the four-token naming check runs.
    pub fn check_tokens(&self) -> bool {
        !self.ignore_underscores
    }
}

pub fn run(args: RunArgs, printer: &Printer) -> Result<()> {
    let root = env::current_dir().map_err(|e| TilesError::Environment {
        message: format!("Cannot read the working directory: {}", e),
        help: None,
    })?;

    run_in(&root, args, &mut TerminalPrompter::stdio(), printer)
}

/// Run with an explicit project root and prompter.
pub fn run_in(
    root: &Path,
    args: RunArgs,
    prompter: &mut dyn Prompter,
    printer: &Printer,
) -> Result<()> {
    let manifest = Manifest::load_or_default(root)?;
    let workspace = Workspace::new(root, &manifest);

    // Nothing is asked or touched until the preconditions hold.
    ensure_not_empty(&workspace.panos_dir)?;
    let tool = manifest
        .resolve_tool(&workspace.root)
        .ok_or_else(|| TilesError::Environment {
            message: format!("Tiling tool '{}' not found", manifest.tool.display()),
            help: Some(format!(
                "Install krpano tools or set `tool` in {}",
                MANIFEST_FILENAME
            )),
        })?;

    let options = TileOptions::prompt(prompter)?;
    tracing::info!(
        vr = options.vr,
        preview_1024 = options.preview_1024,
        group = ?workspace.project_group,
        "Started"
    );

    let templates = manifest.templates_dir(&workspace.root);
    let planner = Planner::new(workspace, tool, &templates, options);
    let run_options = RunOptions {
        check_tokens: args.check_tokens(),
        strict: manifest.strict,
    };

    let summary = process(&planner, &ProcessRunner, run_options, printer)?;

    let mut line = format!(
        "{}, {} already done",
        plural(summary.tiled, "panorama tiled", "panoramas tiled"),
        summary.skipped
    );
    if summary.warnings > 0 {
        line.push_str(&format!(", {}", plural(summary.warnings, "warning", "warnings")));
    }
    printer.success("Finished", &line);
    tracing::info!("Finished");

    Ok(())
}
