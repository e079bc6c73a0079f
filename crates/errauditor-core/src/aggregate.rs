//! Per-function aggregation of error descriptors.

use crate::audit::{AuditSink, FunctionScope, audit_tree};
use crate::extract::ReturnSite;
use crate::syntax::{Location, SyntaxTree};

/// Where the errors of one function come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorOrigin {
    pub function: String,
    pub location: Location,
    /// Non-empty, in source order.
    pub descriptors: Vec<String>,
}

/// Accumulated audit output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditResult {
    pub origins: Vec<ErrorOrigin>,
    /// Reserved: no classification rule separates wrapped errors yet.
    pub wrapped_error_count: u64,
    /// Reserved: no classification rule separates sentinel errors yet.
    pub const_error_count: u64,
}

impl AuditResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    pub fn len(&self) -> usize {
        self.origins.len()
    }

    /// Append `other` after the origins already held.
    pub fn merge(&mut self, other: AuditResult) {
        self.origins.extend(other.origins);
        self.wrapped_error_count += other.wrapped_error_count;
        self.const_error_count += other.const_error_count;
    }
}

impl FromIterator<AuditResult> for AuditResult {
    fn from_iter<I: IntoIterator<Item = AuditResult>>(iter: I) -> Self {
        let mut merged = AuditResult::new();
        for result in iter {
            merged.merge(result);
        }
        merged
    }
}

/// Collecting sink: records an [`ErrorOrigin`] for every function that
/// produced at least one descriptor.
#[derive(Debug, Default)]
pub struct Aggregator {
    result: AuditResult,
    pending: Vec<String>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue accumulating into an existing result.
    pub fn with_result(result: AuditResult) -> Self {
        Self {
            result,
            pending: Vec::new(),
        }
    }

    pub fn add_tree(&mut self, tree: &SyntaxTree) {
        audit_tree(tree, self);
    }

    pub fn result(&self) -> &AuditResult {
        &self.result
    }

    pub fn finish(self) -> AuditResult {
        self.result
    }
}

impl AuditSink for Aggregator {
    fn enter_function(&mut self, _scope: &FunctionScope<'_>) {
        self.pending.clear();
    }

    fn return_site(&mut self, _scope: &FunctionScope<'_>, site: &ReturnSite) {
        if site.has_descriptor() {
            self.pending.push(site.descriptor.clone());
        }
    }

    fn leave_function(&mut self, scope: &FunctionScope<'_>) {
        if self.pending.is_empty() {
            return;
        }
        self.result.origins.push(ErrorOrigin {
            function: scope.func.name.clone(),
            location: scope.location(),
            descriptors: std::mem::take(&mut self.pending),
        });
    }
}

/// Aggregate a sequence of trees into a fresh result.
pub fn aggregate<'a, I>(trees: I) -> AuditResult
where
    I: IntoIterator<Item = &'a SyntaxTree>,
{
    let mut aggregator = Aggregator::new();
    for tree in trees {
        aggregator.add_tree(tree);
    }
    aggregator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{Decl, FunctionDecl, LiteralKind, Node, Position, ResultField, TypeExpr};
    use pretty_assertions::assert_eq;

    fn p(line: u32, column: u32) -> Position {
        Position::new(line, column)
    }

    fn error_fn(name: &str, line: u32, body: Vec<Node>) -> Decl {
        Decl::Function(
            FunctionDecl::new(name, p(line, 1))
                .with_results(vec![ResultField::unnamed(TypeExpr::named("error"))])
                .with_body(body),
        )
    }

    /// `func F() error` that returns `Wrap("msg: %s", e)` under a branch, then `last`.
    fn sample_tree(last: Node) -> SyntaxTree {
        let body = vec![
            Node::other(
                "short_var_declaration",
                vec![
                    Node::ident("e", p(2, 2)),
                    Node::call(
                        Node::ident("NewError", p(2, 7)),
                        vec![Node::literal(LiteralKind::String, "\"x\"", p(2, 16))],
                        p(2, 7),
                    ),
                ],
                p(2, 2),
            ),
            Node::other(
                "if_statement",
                vec![
                    Node::ident("cond", p(3, 5)),
                    Node::ret(
                        vec![Node::call(
                            Node::ident("Wrap", p(4, 10)),
                            vec![
                                Node::literal(LiteralKind::String, "\"msg: %s\"", p(4, 15)),
                                Node::ident("e", p(4, 27)),
                            ],
                            p(4, 10),
                        )],
                        p(4, 3),
                    ),
                ],
                p(3, 2),
            ),
            Node::ret(vec![last], p(6, 2)),
        ];
        SyntaxTree::new(Some("f.go")).with_decl(error_fn("F", 1, body))
    }

    #[test]
    fn test_wrap_and_sentinel_selector() {
        let sentinel = Node::selector(Node::ident("errs", p(6, 9)), "SentinelErr", p(6, 9));
        let result = aggregate([&sample_tree(sentinel)]);

        assert_eq!(result.len(), 1);
        let origin = &result.origins[0];
        assert_eq!(origin.function, "F");
        assert_eq!(origin.location.to_string(), "f.go:1:1");
        assert_eq!(
            origin.descriptors,
            vec!["Wrap(\"msg: %s\",)".to_string(), "SentinelErr()".to_string()]
        );
    }

    #[test]
    fn test_bare_sentinel_identifier_is_not_reported() {
        let result = aggregate([&sample_tree(Node::ident("SentinelErr", p(6, 9)))]);
        assert_eq!(result.origins[0].descriptors, vec!["Wrap(\"msg: %s\",)".to_string()]);
    }

    #[test]
    fn test_function_without_descriptors_is_not_recorded() {
        let tree = SyntaxTree::new(Some("g.go"))
            .with_decl(error_fn(
                "Quiet",
                1,
                vec![Node::ret(vec![Node::ident("nil", p(2, 9))], p(2, 2))],
            ))
            .with_decl(error_fn(
                "Loud",
                4,
                vec![Node::ret(
                    vec![Node::selector(Node::ident("io", p(5, 9)), "EOF", p(5, 9))],
                    p(5, 2),
                )],
            ));

        let result = aggregate([&tree]);
        assert_eq!(result.len(), 1);
        assert_eq!(result.origins[0].function, "Loud");
        assert_eq!(result.wrapped_error_count, 0);
        assert_eq!(result.const_error_count, 0);
    }

    #[test]
    fn test_aggregation_is_deterministic() {
        let sentinel = Node::selector(Node::ident("errs", p(6, 9)), "SentinelErr", p(6, 9));
        let tree = sample_tree(sentinel);

        assert_eq!(aggregate([&tree, &tree]), aggregate([&tree, &tree]));
    }

    #[test]
    fn test_merge_preserves_order() {
        let first = aggregate([&sample_tree(Node::ident("e", p(6, 9)))]);
        let second = aggregate([&SyntaxTree::new(Some("h.go")).with_decl(error_fn(
            "H",
            1,
            vec![Node::ret(
                vec![Node::selector(Node::ident("os", p(2, 9)), "ErrExist", p(2, 9))],
                p(2, 2),
            )],
        ))]);

        let merged: AuditResult = vec![first.clone(), second.clone()].into_iter().collect();
        let names: Vec<&str> = merged.origins.iter().map(|o| o.function.as_str()).collect();
        assert_eq!(names, vec!["F", "H"]);

        let mut aggregator = Aggregator::with_result(first);
        aggregator.add_tree(&SyntaxTree::new(None));
        assert_eq!(aggregator.result().len(), 1);
    }
}
