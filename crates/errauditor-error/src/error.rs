//! The main Error type for errauditor.

use crate::{ErrorKind, ErrorStatus};
use std::fmt;

/// Unified error type for all errauditor operations.
pub struct Error {
    kind: ErrorKind,
    message: String,
    status: ErrorStatus,
    operation: &'static str,
    context: Vec<(&'static str, String)>,
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl Error {
    /// Create a new error with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: kind.default_status(),
            operation: "",
            context: Vec::new(),
            source: None,
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the error status
    pub fn status(&self) -> ErrorStatus {
        self.status
    }

    /// Get the operation that caused this error
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Get the context key-value pairs
    pub fn context(&self) -> &[(&'static str, String)] {
        &self.context
    }

    /// Get the source error (if any).
    pub fn source_ref(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.source.as_ref().map(|e| e.as_ref())
    }

    /// Set the operation that caused this error.
    ///
    /// If an operation was already set, the previous one is moved to context
    /// as "called" to preserve the call chain.
    pub fn with_operation(mut self, operation: &'static str) -> Self {
        if !self.operation.is_empty() {
            self.context.push(("called", self.operation.to_string()));
        }
        self.operation = operation;
        self
    }

    /// Add context to the error
    pub fn with_context(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.context.push((key, value.into()));
        self
    }

    /// Set the source error.
    ///
    /// # Panics (debug only)
    /// Panics in debug mode if source was already set.
    pub fn set_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        debug_assert!(self.source.is_none(), "source error already set");
        self.source = Some(Box::new(source));
        self
    }

    /// Check if this error must abort the run
    pub fn is_fatal(&self) -> bool {
        self.status.is_fatal()
    }
}

impl fmt::Display for Error {
    /// `<message> [<Kind>, <status>, in <operation>, key=value...]`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = if self.message.is_empty() {
            self.kind.as_str()
        } else {
            self.message.as_str()
        };
        write!(f, "{message} [{}, {}", self.kind, self.status)?;
        if !self.operation.is_empty() {
            write!(f, ", in {}", self.operation)?;
        }
        for (key, value) in &self.context {
            write!(f, ", {key}={value}")?;
        }
        f.write_str("]")
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("Error");
        out.field("kind", &self.kind)
            .field("status", &self.status)
            .field("message", &self.message);
        if !self.operation.is_empty() {
            out.field("operation", &self.operation);
        }
        if !self.context.is_empty() {
            out.field("context", &self.context);
        }
        if let Some(source) = &self.source {
            out.field("source", source);
        }
        out.finish()
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            _ => ErrorKind::IoFailed,
        };
        Error::new(kind, err.to_string())
            .with_operation("io")
            .set_source(err)
    }
}

impl Error {
    /// Create an Unexpected error.
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }

    /// Create a ConfigInvalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create a ParseFailed error
    pub fn parse_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ParseFailed, message)
    }

    /// Create an EncodingError
    pub fn encoding(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EncodingError, message)
    }

    /// Create a GrammarError
    pub fn grammar(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::GrammarError, message)
    }

    /// Create a FileNotFound error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(ErrorKind::FileNotFound, format!("file '{}' not found", path))
            .with_context("path", path)
    }

    /// Create a PackageNotFound error
    pub fn package_not_found(package: impl Into<String>) -> Self {
        let package = package.into();
        Self::new(
            ErrorKind::PackageNotFound,
            format!("cannot find package '{}'", package),
        )
        .with_context("package", package)
    }

    /// Create a NoSourceFiles error
    pub fn no_source_files(dir: impl Into<String>) -> Self {
        let dir = dir.into();
        Self::new(
            ErrorKind::NoSourceFiles,
            format!("no Go source files in '{}'", dir),
        )
        .with_context("dir", dir)
    }

    /// Create a GeneratedFile skip signal
    pub fn generated_file(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(
            ErrorKind::GeneratedFile,
            format!("{} is a generated file", path),
        )
        .with_context("path", path)
    }

    /// Create a TraversalFailed error
    pub fn traversal_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TraversalFailed, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::new(ErrorKind::ParseFailed, "unexpected token");
        assert_eq!(err.kind(), ErrorKind::ParseFailed);
        assert_eq!(err.message(), "unexpected token");
        assert_eq!(err.status(), ErrorStatus::Recoverable);
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::new(ErrorKind::PackageNotFound, "not found")
            .with_operation("discovery::resolve_package")
            .with_context("package", "example.com/app")
            .with_context("gopath", "/home/dev/go");

        assert_eq!(err.operation(), "discovery::resolve_package");
        assert_eq!(err.context().len(), 2);
        assert_eq!(err.context()[0], ("package", "example.com/app".to_string()));
    }

    #[test]
    fn test_operation_chaining() {
        let err = Error::new(ErrorKind::ParseFailed, "failed")
            .with_operation("go::parse")
            .with_operation("pipeline::audit_file");

        assert_eq!(err.operation(), "pipeline::audit_file");
        assert_eq!(err.context().len(), 1);
        assert_eq!(err.context()[0], ("called", "go::parse".to_string()));
    }

    #[test]
    fn test_config_errors_are_fatal() {
        assert!(Error::config_invalid("bad pattern").is_fatal());
        assert!(!Error::file_not_found("main.go").is_fatal());
    }

    #[test]
    fn test_generated_file_is_skip() {
        let err = Error::generated_file("api.pb.go");
        assert_eq!(err.status(), ErrorStatus::Skip);
        assert!(!err.status().is_failure());
        assert_eq!(err.message(), "api.pb.go is a generated file");
    }

    #[test]
    fn test_display() {
        let err = Error::new(ErrorKind::ParseFailed, "unexpected EOF")
            .with_operation("go::parse")
            .with_context("file", "main.go")
            .with_context("line", "42");

        assert_eq!(
            err.to_string(),
            "unexpected EOF [ParseFailed, recoverable, in go::parse, file=main.go, line=42]"
        );
        assert_eq!(
            Error::new(ErrorKind::Unexpected, "").to_string(),
            "Unexpected [Unexpected, recoverable]"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: Error = io_err.into();

        assert_eq!(err.kind(), ErrorKind::FileNotFound);
        assert_eq!(err.operation(), "io");
        assert!(err.source_ref().is_some());
    }
}
