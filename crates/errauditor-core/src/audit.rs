//! Audit driver: one traversal, pluggable consumers.
//!
//! `audit_tree` walks the declarations of a file, classifies each function,
//! extracts return sites for the ones returning `error` and reports every
//! step to an [`AuditSink`]. Collecting results and emitting diagnostics are
//! both sinks over this single walk.

use crate::classify::{ErrorType, classify_function};
use crate::extract::{ReturnSite, extract_return_sites};
use crate::syntax::{Decl, FunctionDecl, Location, SyntaxTree};

/// Function currently being audited.
#[derive(Debug, Clone, Copy)]
pub struct FunctionScope<'a> {
    pub tree: &'a SyntaxTree,
    pub func: &'a FunctionDecl,
    pub error_index: usize,
}

impl FunctionScope<'_> {
    pub fn location(&self) -> Location {
        self.tree.locate(self.func.position)
    }
}

/// Consumer of audit events.
///
/// Events for one function always arrive as
/// `enter_function`, zero or more `return_site`, `leave_function`.
pub trait AuditSink {
    fn enter_function(&mut self, _scope: &FunctionScope<'_>) {}

    fn return_site(&mut self, scope: &FunctionScope<'_>, site: &ReturnSite);

    fn leave_function(&mut self, _scope: &FunctionScope<'_>) {}
}

/// Audit all function declarations of `tree`, in declaration order.
pub fn audit_tree<S: AuditSink + ?Sized>(tree: &SyntaxTree, sink: &mut S) {
    for decl in &tree.decls {
        let func = match decl {
            Decl::Function(func) => func,
            Decl::Other { .. } => continue,
        };

        let (error_type, index) = classify_function(func.signature.as_ref());
        let Some(error_index) = index else {
            continue;
        };
        if error_type != ErrorType::Error {
            continue;
        }

        let scope = FunctionScope {
            tree,
            func,
            error_index,
        };
        sink.enter_function(&scope);
        if let Some(body) = &func.body {
            for site in extract_return_sites(body, error_index) {
                sink.return_site(&scope, &site);
            }
        }
        sink.leave_function(&scope);
    }
}
