//! panotiles - Batch panorama tile generator
//!
//! A library for turning a folder of panorama sources into krpano tile sets
//! laid out for car tours: discovery and naming checks, per-project path
//! planning, tool invocation and output relocation.

pub mod cli;
pub mod discovery;
pub mod error;
pub mod execute;
pub mod manifest;
pub mod output;
pub mod pipeline;
pub mod plan;
pub mod prompt;
pub mod validation;

pub use discovery::{clean, discover, ensure_not_empty, Discovery, Item};
pub use error::{Result, TilesError};
pub use execute::{Executor, Outcome, ProcessRunner, ToolOutcome, ToolRunner};
pub use manifest::Manifest;
pub use pipeline::{process, RunOptions, RunSummary};
pub use plan::{Invocation, InvocationPlan, Planner, ProjectVariant, Workspace};
pub use prompt::{Prompter, TerminalPrompter, TileOptions};
pub use validation::{validate_discovery, Diagnostic, Diagnostics, Severity};
