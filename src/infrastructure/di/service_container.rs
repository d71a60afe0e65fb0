//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{BatteryService, SystemService};
use crate::config::Settings;
use crate::infrastructure::traits::{
    CommandRunner, RealCommandRunner, RealSystemProbe, SystemProbe,
};
use crate::infrastructure::ToolInvoker;

/// Container holding the settings and I/O boundaries for one invocation.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Command runner abstraction
    pub cmd: Arc<dyn CommandRunner>,

    /// Host introspection abstraction
    pub probe: Arc<dyn SystemProbe>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(
            settings,
            Arc::new(RealCommandRunner),
            Arc::new(RealSystemProbe),
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        cmd: Arc<dyn CommandRunner>,
        probe: Arc<dyn SystemProbe>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            cmd,
            probe,
        }
    }

    pub fn battery_service(&self) -> BatteryService {
        BatteryService::new(
            ToolInvoker::new(Arc::clone(&self.cmd)),
            self.settings.battery.external_tool(),
        )
    }

    pub fn system_service(&self) -> SystemService {
        SystemService::new(Arc::clone(&self.probe), Arc::clone(&self.settings))
    }
}
