use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use zip::ZipArchive;
use zip::result::ZipError;

use doctext_core::{BackendError, Capability, TextBackend};

pub mod paragraphs;

pub use paragraphs::parse_paragraphs;

/// Location of the main document part inside a DOCX package.
const DOCUMENT_PART: &str = "word/document.xml";

/// DOCX implementation of [`TextBackend`].
///
/// Reads `word/document.xml` straight out of the ZIP container and joins the
/// text of every body paragraph with `\n`. Legacy binary `.doc` files are
/// routed here as well and fail with the ZIP reader's error.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxBackend;

impl DocxBackend {
    pub fn new() -> Self {
        Self
    }
}

impl TextBackend for DocxBackend {
    fn name(&self) -> &'static str {
        "docx"
    }

    fn capability(&self) -> Capability {
        Capability::Docx
    }

    fn extract_text(&self, path: &Path) -> Result<String, BackendError> {
        let file = File::open(path)?;
        let paragraphs = read_paragraphs(file)?;
        tracing::debug!(paragraphs = paragraphs.len(), "read DOCX");
        Ok(paragraphs.join("\n"))
    }
}

/// Read the body paragraphs of a DOCX package from any seekable source.
pub fn read_paragraphs<R: Read + Seek>(source: R) -> Result<Vec<String>, BackendError> {
    let mut archive = ZipArchive::new(source).map_err(|e| BackendError::Open(e.to_string()))?;

    let part = archive.by_name(DOCUMENT_PART).map_err(|e| match e {
        ZipError::FileNotFound => {
            BackendError::Open(format!("not a Word document: missing {}", DOCUMENT_PART))
        }
        other => BackendError::Open(other.to_string()),
    })?;

    parse_paragraphs(BufReader::new(part)).map_err(|e| BackendError::Read(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use zip::write::{SimpleFileOptions, ZipWriter};

    use super::*;

    fn package(entries: &[(&str, &str)]) -> Cursor<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in entries {
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        }
        let mut cursor = zip.finish().unwrap();
        cursor.set_position(0);
        cursor
    }

    #[test]
    fn test_read_paragraphs_from_package() {
        let xml = r#"<w:document xmlns:w="urn:w"><w:body><w:p><w:r><w:t>Jane Smith</w:t></w:r></w:p><w:p><w:r><w:t>Software Engineer</w:t></w:r></w:p></w:body></w:document>"#;
        let paras = read_paragraphs(package(&[
            ("[Content_Types].xml", "<Types/>"),
            (DOCUMENT_PART, xml),
        ]))
        .unwrap();
        assert_eq!(paras, vec!["Jane Smith", "Software Engineer"]);
    }

    #[test]
    fn test_missing_document_part() {
        let err = read_paragraphs(package(&[("word/styles.xml", "<w:styles/>")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "not a Word document: missing word/document.xml"
        );
    }

    #[test]
    fn test_not_a_zip() {
        let err = read_paragraphs(Cursor::new(b"\xD0\xCF\x11\xE0 legacy doc".to_vec())).unwrap_err();
        assert!(matches!(err, BackendError::Open(_)));
    }

    #[test]
    fn test_extract_text_joins_with_newlines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.docx");
        let xml = r#"<w:document xmlns:w="urn:w"><w:body><w:p><w:r><w:t>one</w:t></w:r></w:p><w:p/><w:p><w:r><w:t>three</w:t></w:r></w:p></w:body></w:document>"#;
        std::fs::write(&path, package(&[(DOCUMENT_PART, xml)]).into_inner()).unwrap();

        let text = DocxBackend::new().extract_text(&path).unwrap();
        assert_eq!(text, "one\n\nthree");
    }
}
