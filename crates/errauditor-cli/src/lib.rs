//! errauditor command-line interface.
//!
pub mod discovery;
pub mod options;
pub mod output;
pub mod pipeline;
pub mod profile;

use errauditor_core::{AuditResult, Diagnostic, Frontend};
use errauditor_error::Result;

pub use discovery::{Excludes, GoEnv, Target, discover_files};
pub use options::{OutputOptions, ProcessingOptions};
pub use output::{ColorMode, render_report};
pub use pipeline::{audit_trees, collect_diagnostics, load_trees};
pub use profile::profile_phase;

/// Options for running errauditor.
#[derive(Debug, Clone, Default)]
pub struct AuditOptions {
    /// Files, directories, `dir/...` trees or package paths.
    pub targets: Vec<String>,
    pub output: OutputOptions,
    pub processing: ProcessingOptions,
}

/// What a run produced, in the selected output mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Origins(AuditResult),
    Diagnostics(Vec<Diagnostic>),
}

/// Main entry point
///
/// Only configuration errors are returned; problems with individual targets
/// are logged and leave them out of the report.
pub fn run_main<L: Frontend>(opts: &AuditOptions) -> Result<Report> {
    run_main_in::<L>(opts, &GoEnv::from_env())
}

/// [`run_main`] with an explicit package lookup environment.
pub fn run_main_in<L: Frontend>(opts: &AuditOptions, go_env: &GoEnv) -> Result<Report> {
    let excludes = Excludes::compile(&opts.processing.exclude)?;
    let files = discover_files(&opts.targets, &excludes, go_env, L::supported_extensions());
    let trees = load_trees::<L>(&files, opts.processing.parallel);

    if opts.output.diagnostics {
        Ok(Report::Diagnostics(collect_diagnostics(&trees)?))
    } else {
        Ok(Report::Origins(audit_trees(&trees, opts.processing.parallel)))
    }
}
