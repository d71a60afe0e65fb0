//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use std::io::{self, Write};

use colored::Colorize;

use crate::cli::CliError;
use crate::domain::{Line, Report};

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print a note (dimmed) to stderr
pub fn note(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}", msg.to_string().dimmed());
}

/// Print indented detail to stderr (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("  {}", msg);
}

/// Report a failed invocation on stderr.
///
/// Usage errors are printed as clap rendered them; everything else gets the
/// `error:` prefix followed by its diagnostics.
pub fn failure(err: &CliError, verbose: bool) {
    match err {
        CliError::Usage(usage) => eprint!("{}", usage),
        _ => {
            error(err);
            for line in err.diagnostics(verbose) {
                detail(&line);
            }
        }
    }
}

/// Write a rendered report; section headers are cyan bold, other lines plain.
pub fn write_report(out: &mut dyn Write, report: &Report) -> io::Result<()> {
    for line in report.lines() {
        match line {
            Line::Header(_) => writeln!(out, "{}", line.to_string().cyan().bold())?,
            _ => writeln!(out, "{}", line)?,
        }
    }
    out.flush()
}
