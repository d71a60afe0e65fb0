//! Deterministic text rendering of status records
//!
//! Rendering is a pure function of the record and the verbose flag, so the
//! same input always yields byte-identical text.

use std::fmt;

use crate::domain::{BatteryInfo, ChargeState, SystemInfo};

/// Gauge bars from fullest (bucket 0) to emptiest (bucket 5).
pub const BARS: [&str; 6] = [
    "████████████",
    "██████████░░",
    "████████░░░░",
    "██████░░░░░░",
    "████░░░░░░░░",
    "██░░░░░░░░░░",
];

/// Inclusive lower bounds for buckets 0..=4; anything below falls into bucket 5.
const THRESHOLDS: [i64; 5] = [90, 75, 50, 25, 10];

/// Bucket index for a percentage. Exact thresholds go to the fuller bucket.
pub fn bucket(percentage: i64) -> usize {
    THRESHOLDS
        .iter()
        .position(|&lower| percentage >= lower)
        .unwrap_or(THRESHOLDS.len())
}

/// Icon appended after the percentage for the given charge state.
pub fn charge_suffix(status: ChargeState) -> &'static str {
    match status {
        ChargeState::Charging => " ⚡",
        ChargeState::Full => " ✓",
        _ => "",
    }
}

/// `[<bar>] <percentage>%<suffix>`
pub fn gauge(percentage: i64, status: ChargeState) -> String {
    format!(
        "[{}] {}%{}",
        BARS[bucket(percentage)],
        percentage,
        charge_suffix(status)
    )
}

/// One line of a rendered report.
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    /// Section title, shown as `=== title ===`
    Header(String),
    /// `label: value`
    Field { label: String, value: String },
    Text(String),
    Blank,
}

impl Line {
    pub fn header(title: impl Into<String>) -> Self {
        Line::Header(title.into())
    }

    pub fn field(label: impl Into<String>, value: impl fmt::Display) -> Self {
        Line::Field {
            label: label.into(),
            value: value.to_string(),
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Header(title) => write!(f, "=== {} ===", title),
            Line::Field { label, value } => write!(f, "{}: {}", label, value),
            Line::Text(text) => f.write_str(text),
            Line::Blank => Ok(()),
        }
    }
}

/// Ordered lines ready for display; every line ends with a newline when printed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    lines: Vec<Line>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: Line) {
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Records that know how to present themselves.
pub trait Render {
    fn render(&self, verbose: bool) -> Report;
}

impl Render for BatteryInfo {
    fn render(&self, verbose: bool) -> Report {
        let mut report = Report::new();
        report.push(Line::header("Battery Status"));
        report.push(Line::field("Percentage", format!("{}%", self.percentage)));
        report.push(Line::field("Status", self.status));
        report.push(Line::field("Health", &self.health));
        report.push(Line::field("Plugged", &self.plugged));
        report.push(Line::field(
            "Temperature",
            format!("{:.1}°C", self.temperature),
        ));
        report.push(Line::Blank);
        report.push(Line::Text(gauge(self.percentage, self.status)));

        if verbose {
            if let Some(current) = self.reported_current() {
                report.push(Line::Blank);
                report.push(Line::field("Current", format!("{} mA", current)));
            }
        }
        report
    }
}

impl Render for SystemInfo {
    fn render(&self, verbose: bool) -> Report {
        let mut report = Report::new();
        report.push(Line::header("System Information"));
        report.push(Line::field("OS", &self.os));
        report.push(Line::field("Architecture", &self.arch));
        report.push(Line::field("CPUs", self.cpus));
        if let Some(hostname) = &self.hostname {
            report.push(Line::field("Hostname", hostname));
        }

        report.push(Line::Blank);
        report.push(Line::header("Termux Environment"));
        for (name, value) in &self.environment {
            report.push(Line::field(name, value));
        }

        if verbose {
            report.push(Line::Blank);
            report.push(Line::header("Runtime"));
            report.push(Line::field("Version", &self.runtime.version));
            report.push(Line::field("PID", self.runtime.pid));
        }
        report
    }
}
