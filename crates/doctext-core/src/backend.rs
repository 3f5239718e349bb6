use std::path::Path;

use thiserror::Error;

use crate::Capability;

/// Errors raised by a [`TextBackend`].
///
/// The display text is the underlying library message, unadorned, since it is
/// reported to callers as-is.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("{0}")]
    Open(String),
    #[error("{0}")]
    Read(String),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Trait for document text extraction backends.
///
/// Implementors wrap one parsing library and turn a file into plain text;
/// dispatch by extension and the minimum-length check live in
/// [`crate::Extractor`].
pub trait TextBackend: Send + Sync {
    /// Short backend name, used in log output.
    fn name(&self) -> &'static str;

    /// The document format this backend provides.
    fn capability(&self) -> Capability;

    /// Lowercase extensions (with leading dot) this backend accepts.
    fn extensions(&self) -> &'static [&'static str] {
        self.capability().extensions()
    }

    /// Extract the full text content of a document.
    fn extract_text(&self, path: &Path) -> Result<String, BackendError>;
}
