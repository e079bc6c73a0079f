//! Report rendering.

use std::fmt::Write;

use errauditor_core::{AuditResult, Diagnostic};

use crate::Report;

const WHITE: &str = "\x1b[37m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// When to emit ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ColorMode {
    /// Color when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

fn paint(out: &mut String, color: &str, text: &str, colors: bool) {
    if colors {
        let _ = writeln!(out, "{color}{text}{RESET}");
    } else {
        let _ = writeln!(out, "{text}");
    }
}

/// One header per function, then one line per descriptor.
pub fn render_origins(result: &AuditResult, colors: bool) -> String {
    let mut out = String::new();
    for origin in &result.origins {
        paint(
            &mut out,
            WHITE,
            &format!("{}:  {}", origin.location, origin.function),
            colors,
        );
        for descriptor in &origin.descriptors {
            paint(&mut out, RED, &format!("---{descriptor} "), colors);
        }
    }
    out
}

pub fn render_diagnostics(diagnostics: &[Diagnostic]) -> String {
    let mut out = String::new();
    for diagnostic in diagnostics {
        let _ = writeln!(out, "{diagnostic}");
    }
    out
}

pub fn render_report(report: &Report, colors: bool) -> String {
    match report {
        Report::Origins(result) => render_origins(result, colors),
        Report::Diagnostics(diagnostics) => render_diagnostics(diagnostics),
    }
}
