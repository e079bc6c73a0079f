//! # errauditor-error
//!
//! Unified error handling for errauditor.
//!
//! ## Design Philosophy
//!
//! - **ErrorKind**: Know what error occurred (e.g., ParseFailed, ConfigInvalid)
//! - **ErrorStatus**: Decide how far it propagates (Fatal, Recoverable, Skip)
//! - **Error Context**: Assist in locating the cause with rich context
//! - **Error Source**: Wrap underlying errors without leaking raw types
//!
//! ## Usage
//!
//! ```rust
//! use errauditor_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::ParseFailed, "unexpected token")
//!         .with_operation("go::parse")
//!         .with_context("file", "usecase.go")
//!         .with_context("line", "42"))
//! }
//! ```
//!
//! ## Principles
//!
//! - All fallible functions return `Result<T, errauditor_error::Error>`
//! - External errors are wrapped with `set_source(err)`
//! - Only fatal errors abort a run; everything else skips one target

mod error;
mod kind;
mod status;

pub use error::Error;
pub use kind::ErrorKind;
pub use status::ErrorStatus;

/// Result type alias using errauditor Error
pub type Result<T> = std::result::Result<T, Error>;
