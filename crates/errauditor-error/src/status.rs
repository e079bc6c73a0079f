//! Error status for run-level propagation

use std::fmt;

/// How far an error propagates through a run.
///
/// - `Fatal`: abort the whole run, reported once, non-zero exit
/// - `Recoverable`: drop the offending target, log it, keep going
/// - `Skip`: not a failure at all, the target is deliberately left out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorStatus {
    /// Configuration problems: bad arguments, malformed exclude patterns.
    Fatal,

    /// Per-target problems.
    ///
    /// Examples: FileNotFound, ParseFailed, PackageNotFound
    #[default]
    Recoverable,

    /// Skip signal, e.g. a generated file.
    Skip,
}

impl ErrorStatus {
    /// Check if the run must stop
    pub fn is_fatal(&self) -> bool {
        matches!(self, ErrorStatus::Fatal)
    }

    /// Check if this is a true failure rather than a skip signal
    pub fn is_failure(&self) -> bool {
        !matches!(self, ErrorStatus::Skip)
    }

    /// Get status as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorStatus::Fatal => "fatal",
            ErrorStatus::Recoverable => "recoverable",
            ErrorStatus::Skip => "skip",
        }
    }
}

impl fmt::Display for ErrorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
