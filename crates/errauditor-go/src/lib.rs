//! Go frontend for errauditor.
//!
//! Parses `.go` files with tree-sitter-go and lowers them into the
//! [`errauditor_core::syntax`] model.

pub mod lower;
pub mod token;

use errauditor_core::{Frontend, SourceFile, SyntaxTree};
use errauditor_error::{Error, Result};
use tracing::debug;

pub use lower::lower_file;

#[derive(Debug, Clone, Copy, Default)]
pub struct LangGo;

impl Frontend for LangGo {
    const NAME: &'static str = "go";

    fn supported_extensions() -> &'static [&'static str] {
        &["go"]
    }

    fn parse(file: &SourceFile) -> Result<SyntaxTree> {
        let text = file.text()?;

        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| Error::grammar(e.to_string()).with_operation("go::parse"))?;

        let tree = parser.parse(text, None).ok_or_else(|| {
            Error::parse_failed(format!("{}: parser produced no tree", file.display_path()))
                .with_operation("go::parse")
        })?;
        debug!(path = file.display_path(), bytes = text.len(), "parsed");

        lower_file(&tree, text, file.path())
    }
}

/// Parse in-memory source; `path` is only used for locations.
pub fn parse_source(source: &str, path: &str) -> Result<SyntaxTree> {
    LangGo::parse(&SourceFile::from_source(source).with_path(path))
}
