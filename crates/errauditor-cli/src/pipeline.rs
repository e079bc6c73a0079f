//! Processing pipeline: read, filter generated code, parse, audit.

use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use errauditor_core::{
    AuditResult, Diagnostic, Frontend, SourceFile, SyntaxTree, aggregate, is_generated, run_pass,
};
use errauditor_error::{Error, ErrorStatus, Result};

use crate::profile::profile_phase;

/// Read and parse one file.
///
/// Generated files come back as a `Skip` error.
pub fn load_file<L: Frontend>(path: &Path) -> Result<SyntaxTree> {
    let display = path.to_string_lossy().into_owned();
    let file = SourceFile::read(&display).map_err(|e| e.with_operation("pipeline::load_file"))?;
    if is_generated(file.content()) {
        return Err(Error::generated_file(display).with_operation("pipeline::load_file"));
    }
    L::parse(&file).map_err(|e| e.with_operation("pipeline::load_file"))
}

fn load_or_log<L: Frontend>(path: &PathBuf) -> Option<SyntaxTree> {
    match load_file::<L>(path) {
        Ok(tree) => Some(tree),
        Err(err) if err.status() == ErrorStatus::Skip => {
            debug!(path = %path.display(), "{}", err.message());
            None
        }
        Err(err) => {
            debug!(path = %path.display(), error = %err, "failed to check file");
            None
        }
    }
}

/// Parse `files`, dropping the ones that fail. Input order is kept.
pub fn load_trees<L: Frontend>(files: &[PathBuf], parallel: bool) -> Vec<SyntaxTree> {
    let parse_start = Instant::now();
    info!("Parsing {} {} files", files.len(), L::NAME);

    let trees: Vec<SyntaxTree> = profile_phase("parsing", || {
        if parallel {
            files.par_iter().filter_map(load_or_log::<L>).collect()
        } else {
            files.iter().filter_map(load_or_log::<L>).collect()
        }
    });

    info!(
        "Parsing: {:.2}s ({} of {} files analyzed)",
        parse_start.elapsed().as_secs_f64(),
        trees.len(),
        files.len()
    );
    trees
}

/// Aggregate error origins; parallel runs merge per-file results in order.
pub fn audit_trees(trees: &[SyntaxTree], parallel: bool) -> AuditResult {
    let audit_start = Instant::now();
    let result = profile_phase("audit", || {
        if parallel {
            let per_file: Vec<AuditResult> =
                trees.par_iter().map(|tree| aggregate([tree])).collect();
            per_file.into_iter().collect()
        } else {
            aggregate(trees)
        }
    });
    info!(
        "Audit: {:.2}s ({} origins)",
        audit_start.elapsed().as_secs_f64(),
        result.len()
    );
    result
}

pub fn collect_diagnostics(trees: &[SyntaxTree]) -> Result<Vec<Diagnostic>> {
    let mut diagnostics = Vec::new();
    run_pass(trees, &mut |diagnostic: Diagnostic| diagnostics.push(diagnostic))?;
    Ok(diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use errauditor_error::ErrorKind;
    use errauditor_go::LangGo;

    #[test]
    fn test_generated_file_is_skip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gen.go");
        std::fs::write(
            &path,
            "// Code generated by mockgen. DO NOT EDIT.\n\npackage p\n\nfunc F() error { return errs.X }\n",
        )
        .unwrap();

        let err = load_file::<LangGo>(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GeneratedFile);
        assert_eq!(err.status(), ErrorStatus::Skip);
        assert!(load_trees::<LangGo>(&[path], false).is_empty());
    }

    #[test]
    fn test_failures_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.go");
        let bad = dir.path().join("bad.go");
        std::fs::write(&good, "package p\n\nfunc F() error { return errs.X }\n").unwrap();
        std::fs::write(&bad, "package p\n\nfunc F() error {\n").unwrap();
        let missing = dir.path().join("missing.go");

        let trees = load_trees::<LangGo>(&[bad, missing, good], false);
        assert_eq!(trees.len(), 1);
        assert_eq!(audit_trees(&trees, false).origins[0].descriptors, vec!["X()"]);
    }
}
