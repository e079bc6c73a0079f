use errauditor_core::{AuditResult, Diagnostic, SyntaxTree, aggregate, run_pass};
use errauditor_go::parse_source;
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[allow(dead_code)]
pub fn parse(source: &str, path: &str) -> SyntaxTree {
    init_tracing();
    parse_source(source, path).unwrap_or_else(|err| panic!("{path} should parse: {err}"))
}

#[allow(dead_code)]
pub fn audit(source: &str) -> AuditResult {
    let tree = parse(source, "f.go");
    aggregate([&tree])
}

/// Descriptors recorded for `function`, or an empty list.
#[allow(dead_code)]
pub fn descriptors_of(source: &str, function: &str) -> Vec<String> {
    audit(source)
        .origins
        .into_iter()
        .find(|origin| origin.function == function)
        .map(|origin| origin.descriptors)
        .unwrap_or_default()
}

#[allow(dead_code)]
pub fn pass_output(source: &str, path: &str) -> Vec<String> {
    let tree = parse(source, path);
    let mut lines = Vec::new();
    run_pass([&tree], &mut |d: Diagnostic| lines.push(d.to_string())).unwrap();
    lines
}
