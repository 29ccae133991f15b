//! `dumpbin /EXPORTS` invocation.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use super::ExportSource;
use crate::error::{BindError, BindResult};

/// Tool invoked when none is configured.
pub const DEFAULT_TOOL: &str = "dumpbin.exe";

/// Captures the output of the MSVC `dumpbin` tool.
#[derive(Debug, Clone)]
pub struct DumpbinSource
{
    tool: PathBuf,
}

impl DumpbinSource
{
    pub fn new(tool: impl Into<PathBuf>) -> Self
    {
        Self { tool: tool.into() }
    }
}

impl Default for DumpbinSource
{
    fn default() -> Self
    {
        Self::new(DEFAULT_TOOL)
    }
}

impl ExportSource for DumpbinSource
{
    fn listing(&self, binary: &Path) -> BindResult<String>
    {
        info!(tool = %self.tool.display(), binary = %binary.display(), "running export listing tool");
        let output = Command::new(&self.tool).arg("/EXPORTS").arg(binary).output()?;

        if !output.status.success() {
            return Err(BindError::ToolFailed {
                tool: self.tool.display().to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(bytes = text.len(), "captured export listing");
        Ok(text)
    }

    fn name(&self) -> &'static str
    {
        "dumpbin"
    }
}
