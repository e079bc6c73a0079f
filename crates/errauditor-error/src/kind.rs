//! Error kinds for errauditor operations

use strum_macros::{Display, IntoStaticStr};

use crate::ErrorStatus;

/// The kind of error that occurred.
///
/// Callers match on ErrorKind to decide whether a run continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // General errors
    // =========================================================================
    /// An unexpected error occurred - catch-all for unhandled cases
    Unexpected,

    /// Invalid configuration, e.g. an exclude pattern that does not compile
    ConfigInvalid,

    // =========================================================================
    // Parse errors
    // =========================================================================
    /// Failed to parse source code
    ParseFailed,

    /// Encoding error (invalid UTF-8, etc.)
    EncodingError,

    /// Tree-sitter grammar could not be loaded
    GrammarError,

    // =========================================================================
    // Target errors
    // =========================================================================
    /// File not found
    FileNotFound,

    /// Permission denied
    PermissionDenied,

    /// IO operation failed
    IoFailed,

    /// Directory traversal failed
    TraversalFailed,

    /// Go package could not be located
    PackageNotFound,

    /// Directory or package holds no Go source files
    NoSourceFiles,

    /// File carries a generated-code header
    GeneratedFile,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Default propagation status for this kind
    pub fn default_status(&self) -> ErrorStatus {
        match self {
            ErrorKind::ConfigInvalid => ErrorStatus::Fatal,
            ErrorKind::GeneratedFile => ErrorStatus::Skip,
            _ => ErrorStatus::Recoverable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::ParseFailed.to_string(), "ParseFailed");
        assert_eq!(ErrorKind::PackageNotFound.as_str(), "PackageNotFound");
    }

    #[test]
    fn test_default_status() {
        assert_eq!(ErrorKind::ConfigInvalid.default_status(), ErrorStatus::Fatal);
        assert_eq!(ErrorKind::GeneratedFile.default_status(), ErrorStatus::Skip);
        assert_eq!(ErrorKind::ParseFailed.default_status(), ErrorStatus::Recoverable);
        assert_eq!(ErrorKind::IoFailed.default_status(), ErrorStatus::Recoverable);
    }
}
