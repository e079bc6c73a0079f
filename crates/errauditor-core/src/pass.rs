//! Diagnostic pass: the audit expressed as positioned messages.
//!
//! The pass reports every function returning `error` at its declaration,
//! whether or not a descriptor follows, then one diagnostic per call or
//! selector return expression.

use std::fmt;

use errauditor_error::Result;

use crate::audit::{AuditSink, FunctionScope, audit_tree};
use crate::extract::{OriginKind, ReturnSite};
use crate::syntax::{Location, SyntaxTree};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub location: Location,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

/// Receiver of diagnostics, injected by whoever hosts the pass.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl<F> DiagnosticSink for F
where
    F: FnMut(Diagnostic),
{
    fn report(&mut self, diagnostic: Diagnostic) {
        self(diagnostic)
    }
}

/// Adapts a [`DiagnosticSink`] to audit events.
pub struct PassEmitter<'s, D: DiagnosticSink + ?Sized> {
    sink: &'s mut D,
}

impl<'s, D: DiagnosticSink + ?Sized> PassEmitter<'s, D> {
    pub fn new(sink: &'s mut D) -> Self {
        Self { sink }
    }
}

impl<D: DiagnosticSink + ?Sized> AuditSink for PassEmitter<'_, D> {
    fn enter_function(&mut self, scope: &FunctionScope<'_>) {
        self.sink.report(Diagnostic {
            location: scope.location(),
            message: format!(" -- {}() ---", scope.func.name),
        });
    }

    fn return_site(&mut self, scope: &FunctionScope<'_>, site: &ReturnSite) {
        if site.kind == OriginKind::None {
            return;
        }
        let Some(position) = site.expr_position else {
            return;
        };
        self.sink.report(Diagnostic {
            location: scope.tree.locate(position),
            message: format!("-- {} --", site.descriptor),
        });
    }
}

/// Run the pass over one compilation unit set.
///
/// All output goes through `sink`; the return value carries nothing and the
/// pass never fails.
pub fn run_pass<'a, I, D>(trees: I, sink: &mut D) -> Result<()>
where
    I: IntoIterator<Item = &'a SyntaxTree>,
    D: DiagnosticSink + ?Sized,
{
    let mut emitter = PassEmitter::new(sink);
    for tree in trees {
        audit_tree(tree, &mut emitter);
    }
    Ok(())
}
