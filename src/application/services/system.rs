//! System information service

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::config::Settings;
use crate::domain::{Render, Report, RuntimeInfo, SystemInfo};
use crate::infrastructure::traits::SystemProbe;

/// Assembles a [`SystemInfo`] from the host probe and the configured allow-list.
pub struct SystemService {
    probe: Arc<dyn SystemProbe>,
    settings: Arc<Settings>,
}

impl SystemService {
    pub fn new(probe: Arc<dyn SystemProbe>, settings: Arc<Settings>) -> Self {
        Self { probe, settings }
    }

    /// Snapshot the host. Allow-listed variables that are unset or empty are skipped.
    #[instrument(skip(self))]
    pub fn info(&self) -> SystemInfo {
        let environment = self
            .settings
            .system
            .env_vars
            .iter()
            .filter_map(|name| {
                self.probe
                    .env_var(name)
                    .filter(|value| !value.is_empty())
                    .map(|value| (name.clone(), value))
            })
            .collect::<Vec<_>>();
        debug!("info: {} allow-listed variables set", environment.len());

        SystemInfo {
            os: self.probe.os(),
            arch: self.probe.arch(),
            cpus: self.probe.cpu_count(),
            hostname: self.probe.hostname(),
            environment,
            runtime: RuntimeInfo {
                version: env!("CARGO_PKG_VERSION").to_string(),
                pid: self.probe.pid(),
            },
        }
    }

    pub fn report(&self, verbose: bool) -> Report {
        self.info().render(verbose)
    }
}
