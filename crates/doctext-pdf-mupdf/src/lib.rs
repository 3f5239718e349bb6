use std::path::Path;

use mupdf::{Document, TextPageFlags};

use doctext_core::{BackendError, Capability, TextBackend};

/// MuPDF-based implementation of [`TextBackend`] for PDF files.
///
/// This crate is the sole AGPL island: it isolates the mupdf dependency so
/// that builds without the `pdf` feature do not link it.
///
/// Text is emitted page by page. Every line of a page ends with `\n`, and each
/// page's text is followed by one more `\n`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MupdfBackend;

impl MupdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl TextBackend for MupdfBackend {
    fn name(&self) -> &'static str {
        "mupdf"
    }

    fn capability(&self) -> Capability {
        Capability::Pdf
    }

    fn extract_text(&self, path: &Path) -> Result<String, BackendError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| BackendError::Open("invalid path encoding".into()))?;

        let document = Document::open(path_str).map_err(|e| BackendError::Open(e.to_string()))?;

        let mut text = String::new();
        let mut page_count = 0usize;

        for page_result in document
            .pages()
            .map_err(|e| BackendError::Read(e.to_string()))?
        {
            let page = page_result.map_err(|e| BackendError::Read(e.to_string()))?;
            let text_page = page
                .to_text_page(TextPageFlags::empty())
                .map_err(|e| BackendError::Read(e.to_string()))?;

            // Block/line iteration mirrors MuPDF's plain-text output
            for block in text_page.blocks() {
                for line in block.lines() {
                    text.extend(line.chars().map(|c| c.char().unwrap_or('\u{FFFD}')));
                    text.push('\n');
                }
            }
            text.push('\n');
            page_count += 1;
        }

        tracing::debug!(pages = page_count, "read PDF");
        Ok(text)
    }
}
