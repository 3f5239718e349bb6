use std::io::Write;
use std::path::Path;

use thiserror::Error;

// Re-export domain types for convenience
pub use doctext_core::{
    Capability, DEFAULT_MIN_TEXT_CHARS, ExtractError, ExtractionOutcome, Extractor,
};

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to write temporary file: {0}")]
    TempFile(#[from] std::io::Error),
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

impl From<IngestError> for ExtractionOutcome {
    fn from(err: IngestError) -> Self {
        ExtractionOutcome::Failure {
            error: err.to_string(),
        }
    }
}

/// Whether the backend for `capability` was compiled into this build.
pub fn is_available(capability: Capability) -> bool {
    match capability {
        Capability::Pdf => cfg!(feature = "pdf"),
        Capability::Docx => cfg!(feature = "docx"),
    }
}

/// Build an extractor from the compiled-in backends.
///
/// Formats whose feature is disabled are registered as unavailable, so asking
/// for them reports [`ExtractError::CapabilityUnavailable`] rather than an
/// unsupported file type.
pub fn build_extractor(min_text_chars: usize) -> Extractor {
    let mut extractor = Extractor::new().with_min_text_chars(min_text_chars);

    #[cfg(feature = "pdf")]
    {
        extractor = extractor.with_backend(doctext_pdf_mupdf::MupdfBackend::new());
    }
    #[cfg(feature = "docx")]
    {
        extractor = extractor.with_backend(doctext_docx::DocxBackend::new());
    }

    for cap in Capability::ALL {
        if !is_available(cap) {
            tracing::debug!(capability = %cap, "backend not compiled in");
            extractor = extractor.with_unavailable(cap);
        }
    }
    extractor
}

/// [`build_extractor`] with the default minimum text length.
pub fn default_extractor() -> Extractor {
    build_extractor(DEFAULT_MIN_TEXT_CHARS)
}

/// Extract and validate text from a PDF or DOCX file with the default extractor.
pub fn extract_file(path: &Path) -> ExtractionOutcome {
    default_extractor().extract_outcome(path)
}

/// Temp-file extension for an uploaded document's MIME type: anything
/// mentioning `pdf` is a PDF, everything else is treated as DOCX.
pub fn extension_for_mime(mime_type: &str) -> &'static str {
    if mime_type.to_lowercase().contains("pdf") {
        ".pdf"
    } else {
        ".docx"
    }
}

/// Extract text from an in-memory document (e.g. an upload).
///
/// The bytes are written to a temporary file in the system temp directory,
/// named after the MIME type's extension, and removed again once extraction
/// finishes, whatever the outcome.
pub fn extract_bytes(
    extractor: &Extractor,
    data: &[u8],
    mime_type: &str,
) -> Result<String, IngestError> {
    extract_bytes_in(extractor, data, mime_type, &std::env::temp_dir())
}

/// Like [`extract_bytes`], placing the temporary file in `dir`.
pub fn extract_bytes_in(
    extractor: &Extractor,
    data: &[u8],
    mime_type: &str,
    dir: &Path,
) -> Result<String, IngestError> {
    let mut tmp = tempfile::Builder::new()
        .prefix("doctext_")
        .suffix(extension_for_mime(mime_type))
        .tempfile_in(dir)?;
    tmp.write_all(data)?;
    tmp.flush()?;

    tracing::debug!(path = %tmp.path().display(), bytes = data.len(), "staged upload");
    Ok(extractor.extract(tmp.path())?)
}
