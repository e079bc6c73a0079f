//! Source file handling.
use std::fs::File as StdFile;
use std::io::Read;
use std::sync::Arc;

use errauditor_error::{Error, Result};

/// Raw bytes of one source file plus the path it was read from.
#[derive(Debug, Clone, Default)]
pub struct SourceFile {
    path: Option<Arc<str>>,
    content: Arc<[u8]>,
}

impl SourceFile {
    pub fn read(path: &str) -> Result<Self> {
        let mut file = StdFile::open(path)
            .map_err(|e| Error::from(e).with_context("path", path))?;
        let capacity = file.metadata().map(|meta| meta.len() as usize).unwrap_or(0);
        let mut content = Vec::with_capacity(capacity);
        file.read_to_end(&mut content)
            .map_err(|e| Error::from(e).with_context("path", path))?;

        Ok(SourceFile {
            path: Some(Arc::from(path)),
            content: Arc::from(content),
        })
    }

    pub fn from_source(source: impl Into<Vec<u8>>) -> Self {
        SourceFile {
            path: None,
            content: Arc::from(source.into()),
        }
    }

    /// In-memory content that still reports `path` in locations.
    pub fn with_path(mut self, path: &str) -> Self {
        self.path = Some(Arc::from(path));
        self
    }

    pub fn content(&self) -> &[u8] {
        self.content.as_ref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn display_path(&self) -> &str {
        self.path().unwrap_or("<memory>")
    }

    pub fn text(&self) -> Result<&str> {
        std::str::from_utf8(self.content()).map_err(|e| {
            Error::encoding(format!("{} is not valid UTF-8", self.display_path()))
                .with_context("valid_up_to", e.valid_up_to().to_string())
                .set_source(e)
        })
    }
}
