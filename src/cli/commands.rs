//! Command tree definition and dispatch table

use std::io::Write;

use clap_complete::Shell;
use tracing::{debug, instrument};

use crate::cli::output;
use crate::cli::registry::{CommandRegistry, CommandSpec, Context, Dispatch, FlagSpec, Invocation};
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Shells accepted by `completion`.
pub const SHELLS: &[&str] = &["bash", "elvish", "fish", "powershell", "zsh"];

/// Handler selected by a leaf command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    BatteryStatus,
    SystemInfo,
    ConfigShow,
    ConfigPath,
    Completion,
}

/// Assemble the full command tree.
pub fn build_registry() -> CliResult<CommandRegistry> {
    let mut registry = CommandRegistry::new(
        CommandSpec::group("termux-cli", "A powerful CLI tool for Termux on Android")
            .long_about(
                "Termux CLI - a fast command-line tool built for Termux on Android.\n\n\
                 Gives simplified access to:\n  \
                 - System information\n  \
                 - Battery status (via Termux-API)",
            )
            .flag(FlagSpec::switch("verbose", "Verbose output").short('v').global())
            .flag(
                FlagSpec::value(
                    "config",
                    "FILE",
                    "Config file (default is $XDG_CONFIG_HOME/termux-cli/termux-cli.toml)",
                )
                .global(),
            )
            .flag(
                FlagSpec::count("debug", "Debug logging on stderr (-d info, -dd debug, -ddd trace)")
                    .short('d')
                    .global(),
            ),
    );

    registry.register(
        &[],
        CommandSpec::group("battery", "Battery status and information")
            .long_about("Get battery status, health, and charging information using Termux-API."),
    )?;
    registry.register(
        &["battery"],
        CommandSpec::leaf("status", "Display battery status", Action::BatteryStatus).long_about(
            "Display current battery status including percentage, health, and charging state.",
        ),
    )?;

    registry.register(
        &[],
        CommandSpec::group("system", "System information commands")
            .long_about("Get information about the Android/Termux system."),
    )?;
    registry.register(
        &["system"],
        CommandSpec::leaf("info", "Display system information", Action::SystemInfo).long_about(
            "Display general information about the device, kernel, and Termux environment.",
        ),
    )?;

    registry.register(&[], CommandSpec::group("config", "Inspect settings"))?;
    registry.register(
        &["config"],
        CommandSpec::leaf("show", "Show effective settings as TOML", Action::ConfigShow),
    )?;
    registry.register(
        &["config"],
        CommandSpec::leaf("path", "Show config file locations", Action::ConfigPath),
    )?;

    registry.register(
        &[],
        CommandSpec::leaf("completion", "Generate shell completions", Action::Completion)
            .flag(FlagSpec::positional("shell", "SHELL", SHELLS, "Shell type")),
    )?;

    Ok(registry)
}

/// Services for an invocation, with settings loaded from its `--config`.
pub fn container_for(ctx: &Context) -> CliResult<ServiceContainer> {
    let settings = Settings::load(ctx.config.as_deref())?;
    Ok(ServiceContainer::new(settings))
}

/// Run a resolved invocation against real services.
///
/// Help and version output never touch the settings, so a broken config
/// file cannot hide them.
pub fn run(
    registry: &CommandRegistry,
    invocation: &Invocation,
    out: &mut dyn Write,
) -> CliResult<()> {
    if let Dispatch::Print(text) = &invocation.dispatch {
        return write_text(out, text);
    }
    let container = container_for(&invocation.context)?;
    dispatch(registry, invocation, &container, out)
}

/// Invoke the handler for a resolved invocation.
pub fn dispatch(
    registry: &CommandRegistry,
    invocation: &Invocation,
    container: &ServiceContainer,
    out: &mut dyn Write,
) -> CliResult<()> {
    let ctx = &invocation.context;
    match &invocation.dispatch {
        Dispatch::Print(text) => write_text(out, text),
        Dispatch::Run(action) => {
            debug!(?action, "dispatch");
            match action {
                Action::BatteryStatus => _battery_status(container, ctx, out),
                Action::SystemInfo => _system_info(container, ctx, out),
                Action::ConfigShow => _config_show(container, out),
                Action::ConfigPath => _config_path(ctx, out),
                Action::Completion => _completion(registry, invocation, out),
            }
        }
    }
}

#[instrument(skip(container, out))]
fn _battery_status(
    container: &ServiceContainer,
    ctx: &Context,
    out: &mut dyn Write,
) -> CliResult<()> {
    let report = container.battery_service().status(ctx.verbose)?;
    output::write_report(out, &report).map_err(|e| InfraError::io("write battery report", e))?;
    Ok(())
}

#[instrument(skip(container, out))]
fn _system_info(container: &ServiceContainer, ctx: &Context, out: &mut dyn Write) -> CliResult<()> {
    let report = container.system_service().report(ctx.verbose);
    output::write_report(out, &report).map_err(|e| InfraError::io("write system report", e))?;
    Ok(())
}

fn _config_show(container: &ServiceContainer, out: &mut dyn Write) -> CliResult<()> {
    let text = container.settings.to_toml()?;
    write_text(out, &text)
}

fn _config_path(ctx: &Context, out: &mut dyn Write) -> CliResult<()> {
    let mut text = match global_config_path() {
        Some(path) => format!(
            "Global: {} ({})\n",
            path.display(),
            if path.exists() { "exists" } else { "not found" }
        ),
        None => "Global: no config directory available\n".to_string(),
    };
    if let Some(config) = &ctx.config {
        text.push_str(&format!("Active: {}\n", config.display()));
    }
    write_text(out, &text)
}

fn _completion(
    registry: &CommandRegistry,
    invocation: &Invocation,
    out: &mut dyn Write,
) -> CliResult<()> {
    let name = invocation
        .value("shell")
        .ok_or_else(|| CliError::Usage("completion requires a shell".to_string()))?;
    let shell = name.parse::<Shell>().map_err(CliError::Usage)?;
    let mut cmd = registry.to_command();
    clap_complete::generate(shell, &mut cmd, registry.name(), out);
    Ok(())
}

fn write_text(out: &mut dyn Write, text: &str) -> CliResult<()> {
    out.write_all(text.as_bytes())
        .and_then(|_| out.flush())
        .map_err(|e| InfraError::io("write output", e))?;
    Ok(())
}
