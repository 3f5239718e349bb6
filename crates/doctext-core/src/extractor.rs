use std::path::Path;

use crate::{Capability, DEFAULT_MIN_TEXT_CHARS, ExtractError, ExtractionOutcome, TextBackend};

/// Dispatches documents to a [`TextBackend`] by file extension and rejects
/// results that are too short to be real text.
///
/// Formats whose backend was not compiled in are registered with
/// [`with_unavailable`](Extractor::with_unavailable) so that requests for them
/// fail with [`ExtractError::CapabilityUnavailable`] instead of looking like an
/// unsupported file type.
pub struct Extractor {
    backends: Vec<Box<dyn TextBackend>>,
    unavailable: Vec<Capability>,
    min_text_chars: usize,
}

impl Default for Extractor {
    fn default() -> Self {
        Self {
            backends: Vec::new(),
            unavailable: Vec::new(),
            min_text_chars: DEFAULT_MIN_TEXT_CHARS,
        }
    }
}

impl Extractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a backend. Earlier registrations win when extensions overlap.
    pub fn with_backend(mut self, backend: impl TextBackend + 'static) -> Self {
        self.backends.push(Box::new(backend));
        self
    }

    /// Mark a format as known but not available in this build.
    pub fn with_unavailable(mut self, capability: Capability) -> Self {
        if !self.unavailable.contains(&capability) {
            self.unavailable.push(capability);
        }
        self
    }

    /// Set the minimum trimmed text length. `0` accepts any text.
    pub fn with_min_text_chars(mut self, min_text_chars: usize) -> Self {
        self.min_text_chars = min_text_chars;
        self
    }

    pub fn min_text_chars(&self) -> usize {
        self.min_text_chars
    }

    /// Formats with a registered backend.
    pub fn available(&self) -> Vec<Capability> {
        let mut caps: Vec<Capability> = Vec::new();
        for backend in &self.backends {
            let cap = backend.capability();
            if !caps.contains(&cap) {
                caps.push(cap);
            }
        }
        caps
    }

    /// Formats known to this extractor but not compiled in.
    pub fn unavailable(&self) -> &[Capability] {
        &self.unavailable
    }

    /// Extract and validate the text of the document at `path`.
    ///
    /// Checks run in order: existence, extension dispatch, backend extraction,
    /// minimum length. The returned text is untrimmed.
    pub fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        if !path.exists() {
            return Err(ExtractError::FileNotFound(path.to_path_buf()));
        }

        let ext = file_extension(path);
        let backend = self.backend_for(&ext)?;
        tracing::debug!(path = %path.display(), backend = backend.name(), "extracting text");

        let text = backend.extract_text(path)?;
        tracing::debug!(chars = text.chars().count(), "extracted text");

        validate_text(&text, self.min_text_chars)?;
        Ok(text)
    }

    /// Like [`extract`](Extractor::extract), folded into the reported shape.
    pub fn extract_outcome(&self, path: &Path) -> ExtractionOutcome {
        self.extract(path).into()
    }

    fn backend_for(&self, ext: &str) -> Result<&dyn TextBackend, ExtractError> {
        if let Some(backend) = self
            .backends
            .iter()
            .find(|b| b.extensions().contains(&ext))
        {
            return Ok(backend.as_ref());
        }

        match self
            .unavailable
            .iter()
            .find(|c| c.extensions().contains(&ext))
        {
            Some(&cap) => Err(ExtractError::CapabilityUnavailable(cap)),
            None => Err(ExtractError::UnsupportedType(ext.to_string())),
        }
    }
}

/// Lowercase extension of `path` including the leading dot, or an empty
/// string when there is none. Dotfiles such as `.bashrc` have no extension.
pub fn file_extension(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Reject text whose whitespace-trimmed length is below `min_chars`.
pub fn validate_text(text: &str, min_chars: usize) -> Result<(), ExtractError> {
    let len = text.trim().chars().count();
    if len < min_chars {
        tracing::warn!(
            chars = len,
            min_chars,
            "extracted text too short, likely scanned or empty"
        );
        return Err(ExtractError::TooShort);
    }
    Ok(())
}
