//! End-to-end tests: argv → command tree → tool → decoder → renderer
#![cfg(unix)]

use std::io;
use std::os::unix::process::ExitStatusExt;
use std::process::{ExitStatus, Output};
use std::sync::{Arc, Mutex};

use termux_cli::cli::{build_registry, CliError};
use termux_cli::config::Settings;
use termux_cli::exitcode;
use termux_cli::infrastructure::di::ServiceContainer;
use termux_cli::infrastructure::traits::{CommandRunner, SystemProbe};

enum Reply {
    Stdout(&'static str),
    Exit(i32, &'static str),
    Missing,
}

/// Mock command runner that records invocations and returns a canned reply
struct MockRunner {
    reply: Reply,
    calls: Mutex<Vec<String>>,
}

impl MockRunner {
    fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<Output> {
        let mut line = cmd.to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        self.calls.lock().unwrap().push(line);

        match self.reply {
            Reply::Stdout(stdout) => Ok(Output {
                status: ExitStatus::from_raw(0),
                stdout: stdout.as_bytes().to_vec(),
                stderr: vec![],
            }),
            Reply::Exit(code, stderr) => Ok(Output {
                status: ExitStatus::from_raw(code << 8),
                stdout: vec![],
                stderr: stderr.as_bytes().to_vec(),
            }),
            Reply::Missing => Err(io::Error::new(
                io::ErrorKind::NotFound,
                "No such file or directory (os error 2)",
            )),
        }
    }
}

/// Probe with fixed host values
struct FixedProbe;

impl SystemProbe for FixedProbe {
    fn os(&self) -> String {
        "android".into()
    }
    fn arch(&self) -> String {
        "aarch64".into()
    }
    fn cpu_count(&self) -> usize {
        8
    }
    fn hostname(&self) -> Option<String> {
        Some("localhost".into())
    }
    fn env_var(&self, name: &str) -> Option<String> {
        match name {
            "HOME" => Some("/data/data/com.termux/files/home".into()),
            "PREFIX" => Some("/data/data/com.termux/files/usr".into()),
            "TMPDIR" => Some(String::new()),
            _ => None,
        }
    }
    fn pid(&self) -> u32 {
        4242
    }
}

const CHARGING: &str = r#"{"health":"GOOD","percentage":85,"plugged":"AC","status":"CHARGING","temperature":31.5,"current":500}"#;

fn container(runner: Arc<MockRunner>) -> ServiceContainer {
    ServiceContainer::with_deps(Settings::default(), runner, Arc::new(FixedProbe))
}

fn execute(argv: &[&str], runner: Arc<MockRunner>) -> (Result<(), CliError>, String) {
    termux_cli::util::testing::init_test_setup();
    colored::control::set_override(false);
    let registry = build_registry().unwrap();
    let mut out = Vec::new();
    let result = registry.execute(argv.iter().copied(), &container(runner), &mut out);
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn given_charging_payload_when_battery_status_verbose_then_full_report() {
    // Arrange
    let runner = MockRunner::new(Reply::Stdout(CHARGING));

    // Act
    let (result, text) = execute(&["termux-cli", "battery", "status", "-v"], runner.clone());

    // Assert
    result.unwrap();
    assert_eq!(runner.calls(), vec!["termux-battery-status".to_string()]);
    assert_eq!(
        text,
        "=== Battery Status ===\n\
         Percentage: 85%\n\
         Status: CHARGING\n\
         Health: GOOD\n\
         Plugged: AC\n\
         Temperature: 31.5°C\n\
         \n\
         [██████████░░] 85% ⚡\n\
         \n\
         Current: 500 mA\n"
    );
}

#[test]
fn given_charging_payload_when_not_verbose_then_current_hidden() {
    let runner = MockRunner::new(Reply::Stdout(CHARGING));

    let (result, text) = execute(&["termux-cli", "battery", "status"], runner);

    result.unwrap();
    assert!(text.contains("[██████████░░] 85% ⚡\n"));
    assert!(!text.contains("Current"));
}

#[test]
fn given_full_battery_when_battery_status_then_fullest_bar_with_check() {
    let runner = MockRunner::new(Reply::Stdout(
        r#"{"health":"GOOD","percentage":100,"plugged":"AC","status":"FULL","temperature":28.0,"current":0}"#,
    ));

    let (result, text) = execute(&["termux-cli", "battery", "status"], runner);

    result.unwrap();
    assert!(text.contains("[████████████] 100% ✓\n"));
}

#[test]
fn given_sentinel_current_when_verbose_then_current_not_printed() {
    let runner = MockRunner::new(Reply::Stdout(
        r#"{"health":"GOOD","percentage":42,"plugged":"UNPLUGGED","status":"DISCHARGING","temperature":30.1,"current":-9223372036854775808}"#,
    ));

    let (result, text) = execute(&["termux-cli", "-v", "battery", "status"], runner);

    result.unwrap();
    assert!(text.contains("[██████░░░░░░] 42%\n"));
    assert!(!text.contains("Current"));
}

#[test]
fn given_null_current_when_verbose_then_report_without_current() {
    let runner = MockRunner::new(Reply::Stdout(
        r#"{"health":"GOOD","percentage":42,"plugged":"UNPLUGGED","status":"DISCHARGING","temperature":30.1,"current":null}"#,
    ));

    let (result, text) = execute(&["termux-cli", "battery", "status", "-v"], runner);

    result.unwrap();
    assert!(text.contains("[██████░░░░░░] 42%\n"));
    assert!(!text.contains("Current"));
}

#[test]
fn given_missing_tool_when_battery_status_then_tool_unavailable_with_hint() {
    let runner = MockRunner::new(Reply::Missing);

    let (result, text) = execute(&["termux-cli", "battery", "status"], runner);

    let err = result.unwrap_err();
    assert_eq!(err.exit_code(), exitcode::UNAVAILABLE);
    assert_eq!(err.to_string(), "unable to run termux-battery-status");
    assert_eq!(
        err.diagnostics(false),
        vec!["Make sure Termux-API is installed: pkg install termux-api".to_string()]
    );
    assert!(err
        .diagnostics(true)
        .iter()
        .any(|l| l.contains("No such file or directory")));
    assert!(text.is_empty());
}

#[test]
fn given_tool_exits_non_zero_when_battery_status_then_tool_unavailable() {
    let runner = MockRunner::new(Reply::Exit(1, "Termux:API is not installed"));

    let (result, _) = execute(&["termux-cli", "battery", "status"], runner);

    let err = result.unwrap_err();
    assert_eq!(err.exit_code(), exitcode::UNAVAILABLE);
    assert!(err
        .diagnostics(true)
        .iter()
        .any(|l| l.contains("exited with status 1: Termux:API is not installed")));
}

#[test]
fn given_truncated_json_when_battery_status_then_decode_error_and_no_output() {
    let runner = MockRunner::new(Reply::Stdout(r#"{"health":"GOOD","percen"#));

    let (result, text) = execute(&["termux-cli", "battery", "status"], runner);

    let err = result.unwrap_err();
    assert_eq!(err.exit_code(), exitcode::DATAERR);
    assert!(err.to_string().starts_with("error parsing battery info:"));
    assert!(text.is_empty());
}

#[test]
fn given_unknown_subcommand_when_executing_then_usage_error_and_tool_not_run() {
    let runner = MockRunner::new(Reply::Stdout(CHARGING));

    let (result, text) = execute(&["termux-cli", "battery", "launch"], runner.clone());

    let err = result.unwrap_err();
    assert!(matches!(err, CliError::Usage(_)));
    assert_eq!(err.exit_code(), exitcode::USAGE);
    assert!(runner.calls().is_empty());
    assert!(text.is_empty());
}

#[test]
fn given_unknown_flag_when_executing_then_usage_error_and_tool_not_run() {
    let runner = MockRunner::new(Reply::Stdout(CHARGING));

    let (result, _) = execute(&["termux-cli", "battery", "status", "--fast"], runner.clone());

    assert!(matches!(result, Err(CliError::Usage(_))));
    assert!(runner.calls().is_empty());
}

#[test]
fn given_group_without_subcommand_when_executing_then_help_printed() {
    let runner = MockRunner::new(Reply::Stdout(CHARGING));

    let (result, text) = execute(&["termux-cli", "battery"], runner.clone());

    result.unwrap();
    assert!(text.contains("status"));
    assert!(runner.calls().is_empty());
}

#[test]
fn given_group_with_verbose_flag_when_executing_then_help_printed() {
    let runner = MockRunner::new(Reply::Stdout(CHARGING));

    let (result, text) = execute(&["termux-cli", "battery", "-v"], runner.clone());

    result.unwrap();
    assert!(text.contains("status"));
    assert!(runner.calls().is_empty());
}

#[test]
fn given_probe_when_system_info_then_allow_listed_non_empty_vars_shown() {
    let runner = MockRunner::new(Reply::Missing);

    let (result, text) = execute(&["termux-cli", "system", "info"], runner.clone());

    result.unwrap();
    assert_eq!(
        text,
        "=== System Information ===\n\
         OS: android\n\
         Architecture: aarch64\n\
         CPUs: 8\n\
         Hostname: localhost\n\
         \n\
         === Termux Environment ===\n\
         HOME: /data/data/com.termux/files/home\n\
         PREFIX: /data/data/com.termux/files/usr\n"
    );
    assert!(runner.calls().is_empty());
}

#[test]
fn given_verbose_when_system_info_then_runtime_section_shown() {
    let runner = MockRunner::new(Reply::Missing);

    let (result, text) = execute(&["termux-cli", "system", "info", "--verbose"], runner);

    result.unwrap();
    assert!(text.contains("=== Runtime ===\n"));
    assert!(text.contains(&format!("Version: {}\n", env!("CARGO_PKG_VERSION"))));
    assert!(text.contains("PID: 4242\n"));
}

#[test]
fn given_config_show_when_executing_then_prints_effective_toml() {
    let runner = MockRunner::new(Reply::Missing);

    let (result, text) = execute(&["termux-cli", "config", "show"], runner);

    result.unwrap();
    assert!(text.contains("[battery]"));
    assert!(text.contains("tool = \"termux-battery-status\""));
    assert!(text.contains("[system]"));
}

#[test]
fn given_completion_bash_when_executing_then_script_mentions_commands() {
    let runner = MockRunner::new(Reply::Missing);

    let (result, text) = execute(&["termux-cli", "completion", "bash"], runner);

    result.unwrap();
    assert!(text.contains("termux-cli"));
    assert!(text.contains("battery"));
}

#[test]
fn given_custom_tool_in_settings_when_battery_status_then_that_tool_invoked() {
    termux_cli::util::testing::init_test_setup();
    let runner = MockRunner::new(Reply::Stdout(CHARGING));
    let mut settings = Settings::default();
    settings.battery.tool = "fake-battery".into();
    settings.battery.args = vec!["--json".into()];
    let container = ServiceContainer::with_deps(settings, runner.clone(), Arc::new(FixedProbe));
    let registry = build_registry().unwrap();
    let mut out = Vec::new();

    registry
        .execute(["termux-cli", "battery", "status"], &container, &mut out)
        .unwrap();

    assert_eq!(runner.calls(), vec!["fake-battery --json".to_string()]);
}
