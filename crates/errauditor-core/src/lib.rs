//! Core of errauditor: find where the errors returned by a function come from.
//!
//! A [`Frontend`] lowers source into a [`SyntaxTree`]. [`audit_tree`] then
//! classifies every function, extracts the `return` sites that populate its
//! error result and hands them to an [`AuditSink`]: the [`Aggregator`] builds
//! an [`AuditResult`], the [`PassEmitter`] turns them into diagnostics.

pub mod aggregate;
pub mod audit;
pub mod classify;
pub mod extract;
pub mod file;
pub mod generated;
pub mod lang_def;
pub mod pass;
pub mod syntax;
pub mod visit;

pub use errauditor_error::{Error, ErrorKind, ErrorStatus, Result};

pub use aggregate::{AuditResult, Aggregator, ErrorOrigin, aggregate};
pub use audit::{AuditSink, FunctionScope, audit_tree};
pub use classify::{ERROR_TYPE_NAME, ErrorType, classify_function};
pub use extract::{OriginKind, ReturnSite, classify_expression, extract_return_sites};
pub use file::SourceFile;
pub use generated::is_generated;
pub use lang_def::Frontend;
pub use pass::{Diagnostic, DiagnosticSink, PassEmitter, run_pass};
pub use syntax::{
    Decl, FunctionDecl, Location, Node, Position, ResultField, Signature, SyntaxTree, TypeExpr,
};
