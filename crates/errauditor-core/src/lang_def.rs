use errauditor_error::Result;

use crate::file::SourceFile;
use crate::syntax::SyntaxTree;

/// A language frontend: turns source files into lowered syntax trees.
pub trait Frontend {
    /// Short language name used in logs.
    const NAME: &'static str;

    /// File extensions handled by this frontend, without the dot.
    fn supported_extensions() -> &'static [&'static str];

    /// Parse and lower one file.
    ///
    /// A file that does not parse cleanly is an error; callers skip it.
    fn parse(file: &SourceFile) -> Result<SyntaxTree>;

    fn handles(path: &std::path::Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| Self::supported_extensions().contains(&ext))
    }
}
