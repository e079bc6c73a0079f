//! Command-line option groups.
//!
//! Flattened into the binary's `Cli` and reused by tests through the
//! `with_*` builders.

use clap::Args;

use crate::output::ColorMode;

/// How results are rendered.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputOptions {
    /// Print positioned diagnostics instead of grouped error origins.
    #[arg(long)]
    pub diagnostics: bool,

    /// When to colorize the report.
    #[arg(long, value_enum, value_name = "WHEN", default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
}

/// Which files are analyzed and how.
#[derive(Args, Debug, Clone, Default)]
pub struct ProcessingOptions {
    /// Analyze files in parallel; output order is unchanged.
    #[arg(long)]
    pub parallel: bool,

    /// Skip every file whose directory matches REGEX (repeatable).
    #[arg(
        short = 'e',
        long = "exclude",
        value_name = "REGEX",
        action = clap::ArgAction::Append
    )]
    pub exclude: Vec<String>,
}

impl OutputOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_diagnostics(mut self, diagnostics: bool) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn with_color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }
}

impl ProcessingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude.push(pattern.into());
        self
    }
}
