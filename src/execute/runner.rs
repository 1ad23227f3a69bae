//! Launching the tiling tool.

use std::process::{Command, Stdio};

use crate::error::{Result, TilesError};
use crate::plan::Invocation;

/// How a tool call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolOutcome {
    /// Exit code, `None` when the process was killed by a signal.
    pub code: Option<i32>,
}

impl ToolOutcome {
    pub fn success() -> Self {
        Self { code: Some(0) }
    }

    pub fn failure(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Something that can run a tiling invocation to completion.
pub trait ToolRunner {
    fn run(&self, invocation: &Invocation) -> Result<ToolOutcome>;
}

/// Runs the real executable, blocking, with its output discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<ToolOutcome> {
        let status = Command::new(&invocation.tool)
            .args(invocation.args())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| TilesError::Tool {
                message: format!("Failed to launch {}: {}", invocation.tool.display(), e),
                help: Some("Set `tool` in tiles.yaml to the krpano tools executable".to_string()),
            })?;

        Ok(ToolOutcome {
            code: status.code(),
        })
    }
}
