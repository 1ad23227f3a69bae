//! The batch run, from cleanup to relocation.

use crate::discovery::{clean, discover};
use crate::error::Result;
use crate::execute::{Executor, Outcome, ToolRunner};
use crate::output::{display_path, plural, Printer};
use crate::plan::Planner;
use crate::validation::{print_diagnostics, validate_discovery};

/// Switches for a run.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Enforce the four-token naming convention.
    pub check_tokens: bool,
    /// Fail on tool errors and missing artifacts instead of warning.
    pub strict: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            check_tokens: true,
            strict: false,
        }
    }
}

/// Counts reported at the end of a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub tiled: usize,
    pub skipped: usize,
    pub warnings: usize,
}

/// Clean, discover, validate, plan and execute every panorama.
///
/// Validation failures abort before the tool runs for any item.
pub fn process(
    planner: &Planner,
    runner: &dyn ToolRunner,
    options: RunOptions,
    printer: &Printer,
) -> Result<RunSummary> {
    let workspace = planner.workspace();
    let panos_dir = &workspace.panos_dir;

    let cleaned = clean(panos_dir)?;
    if cleaned.total() > 0 {
        printer.info(
            "Cleaned",
            &plural(cleaned.total(), "stale intermediate", "stale intermediates"),
        );
    }

    let discovery = discover(panos_dir)?;
    printer.status(
        "Scanning",
        &format!(
            "{} ({})",
            display_path(panos_dir, &workspace.root),
            plural(discovery.total(), "panorama", "panoramas")
        ),
    );

    validate_discovery(&discovery, options.check_tokens)?;

    let executor = Executor::new(runner).strict(options.strict);
    let mut summary = RunSummary::default();

    for plan in planner.plan_all(&discovery.items) {
        if plan.is_done() {
            printer.info("Skipping", &format!("{} (already tiled)", plan.message));
        } else {
            printer.status("Tiling", &plan.message);
        }

        match executor.execute(&plan)? {
            Outcome::Skipped => summary.skipped += 1,
            Outcome::Tiled { warnings, .. } => {
                summary.tiled += 1;
                if !warnings.is_empty() {
                    summary.warnings += warnings.warning_count();
                    print_diagnostics(printer, &warnings);
                }
            }
        }
    }

    Ok(summary)
}
