//! Return-site discovery and error-expression classification.

use std::fmt::Write;

use strum_macros::{Display, IntoStaticStr};
use tracing::debug;

use crate::syntax::{CallExpr, Node, Position};
use crate::visit::walk_nodes;

/// Shape of the expression that supplies the error value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum OriginKind {
    /// A call building or wrapping an error: `fmt.Errorf(...)`.
    Call,
    /// A member access naming an existing error: `io.EOF`.
    Selector,
    /// Anything else, including missing expressions.
    None,
}

/// A `return` statement found inside a qualifying function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnSite {
    /// Position of the `return` keyword.
    pub position: Position,
    /// Position of the expression at the error index, if the statement has one.
    pub expr_position: Option<Position>,
    pub kind: OriginKind,
    /// Empty iff `kind` is `OriginKind::None`.
    pub descriptor: String,
}

impl ReturnSite {
    fn skipped(position: Position, expr_position: Option<Position>) -> Self {
        Self {
            position,
            expr_position,
            kind: OriginKind::None,
            descriptor: String::new(),
        }
    }

    pub fn has_descriptor(&self) -> bool {
        !self.descriptor.is_empty()
    }
}

/// Classify a returned expression and build its descriptor.
///
/// - call with a resolvable callee: `Name(lit,lit,)`; non-literal arguments
///   are dropped
/// - selector: `Member()`
/// - everything else: `(None, "")`
pub fn classify_expression(expr: &Node) -> (OriginKind, String) {
    match expr {
        Node::Call(call) => match callee_name(call) {
            Some(name) => (
                OriginKind::Call,
                format!("{}({})", name, literal_arguments(&call.args)),
            ),
            None => (OriginKind::None, String::new()),
        },
        Node::Selector(selector) => (OriginKind::Selector, format!("{}()", selector.member)),
        Node::Return(_) | Node::Ident(_) | Node::Literal(_) | Node::Other(_) => {
            (OriginKind::None, String::new())
        }
    }
}

fn callee_name(call: &CallExpr) -> Option<&str> {
    match call.callee.as_ref() {
        Node::Selector(selector) => Some(selector.member.as_str()),
        Node::Ident(ident) => Some(ident.name.as_str()),
        Node::Return(_) | Node::Call(_) | Node::Literal(_) | Node::Other(_) => None,
    }
}

/// Join the literal arguments of a call, each followed by a comma.
pub fn literal_arguments(args: &[Node]) -> String {
    let mut joined = String::new();
    for arg in args {
        if let Node::Literal(literal) = arg {
            let _ = write!(joined, "{},", literal.text);
        }
    }
    joined
}

/// Find every `return` in `body`, at any depth, and classify the expression
/// at `error_index`.
///
/// Statements with fewer results than `error_index + 1` (naked returns in
/// functions with named results, or `return f()` forwarding a tuple) are
/// recorded as skipped sites instead of failing the walk.
pub fn extract_return_sites(body: &[Node], error_index: usize) -> Vec<ReturnSite> {
    let mut sites = Vec::new();

    walk_nodes(body, &mut |node: &Node| {
        let Node::Return(stmt) = node else {
            return true;
        };

        match stmt.results.get(error_index) {
            Some(expr) => {
                let (kind, descriptor) = classify_expression(expr);
                sites.push(ReturnSite {
                    position: stmt.position,
                    expr_position: Some(expr.position()),
                    kind,
                    descriptor,
                });
            }
            None => {
                debug!(
                    position = %stmt.position,
                    results = stmt.results.len(),
                    error_index,
                    "return has no expression at the error index, skipping"
                );
                sites.push(ReturnSite::skipped(stmt.position, None));
            }
        }
        true
    });

    sites
}

/// Ordered non-empty descriptors of a site list.
pub fn descriptors(sites: &[ReturnSite]) -> Vec<String> {
    sites
        .iter()
        .filter(|site| site.has_descriptor())
        .map(|site| site.descriptor.clone())
        .collect()
}
