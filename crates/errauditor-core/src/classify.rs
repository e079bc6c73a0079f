//! Function classification: does a signature return an error, and where.

use strum_macros::{Display, IntoStaticStr};

use crate::syntax::Signature;

/// Name of the language's built-in error interface.
pub const ERROR_TYPE_NAME: &str = "error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum ErrorType {
    Error,
    Default,
}

/// Classify a function by its declared results.
///
/// Results are scanned in declaration order and the first one whose type is
/// the bare name `error` wins; later error-typed results are not reported.
/// The index is the value position inside the result list, so a grouped
/// field such as `(a, b int, err error)` puts `err` at index 2.
///
/// A missing signature or an empty result list classifies as
/// `(Default, None)`.
pub fn classify_function(signature: Option<&Signature>) -> (ErrorType, Option<usize>) {
    let Some(signature) = signature else {
        return (ErrorType::Default, None);
    };

    let mut index = 0;
    for field in &signature.results {
        if field.ty.name() == Some(ERROR_TYPE_NAME) {
            return (ErrorType::Error, Some(index));
        }
        index += field.arity();
    }
    (ErrorType::Default, None)
}
