//! Synchronous invocation of external status tools

use std::io;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::infrastructure::traits::CommandRunner;
use crate::application::ToolFailure;

/// An external executable plus its fixed argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalTool {
    pub program: String,
    pub args: Vec<String>,
}

impl ExternalTool {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }
}

/// Runs external tools and captures their standard output.
///
/// There is no timeout: the call blocks until the tool exits.
#[derive(Clone)]
pub struct ToolInvoker {
    cmd: Arc<dyn CommandRunner>,
}

impl ToolInvoker {
    pub fn new(cmd: Arc<dyn CommandRunner>) -> Self {
        Self { cmd }
    }

    /// Run `tool` and return its raw stdout bytes, undecoded.
    #[instrument(skip(self), fields(program = %tool.program))]
    pub fn invoke(&self, tool: &ExternalTool) -> Result<Vec<u8>, ToolFailure> {
        let args: Vec<&str> = tool.args.iter().map(String::as_str).collect();

        let output = self.cmd.run(&tool.program, &args).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                ToolFailure::NotFound(e)
            } else {
                ToolFailure::Spawn(e)
            }
        })?;

        if !output.status.success() {
            return Err(ToolFailure::ExitStatus {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        debug!("invoke: captured {} bytes", output.stdout.len());
        Ok(output.stdout)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::infrastructure::traits::RealCommandRunner;

    fn invoker() -> ToolInvoker {
        ToolInvoker::new(Arc::new(RealCommandRunner))
    }

    #[test]
    fn given_missing_executable_when_invoking_then_not_found() {
        let tool = ExternalTool::new("termux-cli-test-no-such-tool-4f1c");

        let result = invoker().invoke(&tool);

        assert!(matches!(result, Err(ToolFailure::NotFound(_))));
    }

    #[test]
    fn given_successful_tool_when_invoking_then_returns_raw_stdout() {
        let tool = ExternalTool::new("echo").with_args(["-n", "{\"percentage\":1}"]);

        let raw = invoker().invoke(&tool).unwrap();

        assert_eq!(raw, b"{\"percentage\":1}");
    }

    #[test]
    fn given_failing_tool_when_invoking_then_exit_status_reported() {
        let tool = ExternalTool::new("sh").with_args(["-c", "echo boom >&2; exit 3"]);

        let result = invoker().invoke(&tool);

        match result {
            Err(ToolFailure::ExitStatus { code, stderr }) => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "boom");
            }
            other => panic!("expected ExitStatus, got {:?}", other),
        }
    }
}
