//! Battery status service
//!
//! Runs the battery tool, decodes its JSON and renders the report.

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{decode, BatteryInfo, Render, Report};
use crate::infrastructure::{ExternalTool, ToolInvoker};

/// Battery status service.
pub struct BatteryService {
    invoker: ToolInvoker,
    tool: ExternalTool,
}

impl BatteryService {
    /// Create a new battery service for the given tool.
    pub fn new(invoker: ToolInvoker, tool: ExternalTool) -> Self {
        Self { invoker, tool }
    }

    /// Invoke the tool and decode its output.
    #[instrument(skip(self))]
    pub fn fetch(&self) -> ApplicationResult<BatteryInfo> {
        debug!(stage = "invoking", program = %self.tool.program);
        let raw = self
            .invoker
            .invoke(&self.tool)
            .map_err(|cause| ApplicationError::ToolUnavailable {
                tool: self.tool.program.clone(),
                cause,
            })?;

        debug!(stage = "decoding", bytes = raw.len());
        Ok(decode::<BatteryInfo>(&raw)?)
    }

    /// Full pipeline: invoke, decode, render.
    pub fn status(&self, verbose: bool) -> ApplicationResult<Report> {
        let info = self.fetch()?;
        debug!(stage = "rendering", percentage = info.percentage);
        Ok(info.render(verbose))
    }
}
