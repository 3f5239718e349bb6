use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod backend;
pub mod config_file;
pub mod extractor;
pub mod json;

pub use backend::{BackendError, TextBackend};
pub use extractor::{Extractor, file_extension, validate_text};

/// Minimum length (in characters, after trimming whitespace) of accepted text.
/// Anything shorter is treated as a scanned image or an empty file.
pub const DEFAULT_MIN_TEXT_CHARS: usize = 50;

/// Message reported when extracted text falls below the minimum length.
pub const TOO_SHORT_MESSAGE: &str = "Extracted text is too short. The file might be a scanned image or empty. Please upload a text-based PDF or DOCX.";

/// A document format whose backend may or may not be compiled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Pdf,
    Docx,
}

impl Capability {
    pub const ALL: [Capability; 2] = [Capability::Pdf, Capability::Docx];

    /// Library name used in "not installed" messages.
    pub fn library(&self) -> &'static str {
        match self {
            Capability::Pdf => "MuPDF",
            Capability::Docx => "DOCX support",
        }
    }

    /// Lowercase file extensions (with leading dot) handled by this format.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Capability::Pdf => &[".pdf"],
            Capability::Docx => &[".docx", ".doc"],
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Pdf => write!(f, "pdf"),
            Capability::Docx => write!(f, "docx"),
        }
    }
}

/// Every way an extraction can fail. The `Display` text of each variant is
/// the message reported to callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("No file path provided")]
    MissingArgument,
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("{} is not installed.", .0.library())]
    CapabilityUnavailable(Capability),
    /// Message from the parsing library, passed through verbatim.
    #[error("{0}")]
    Parse(String),
    #[error("{}", TOO_SHORT_MESSAGE)]
    TooShort,
}

impl From<BackendError> for ExtractError {
    fn from(err: BackendError) -> Self {
        ExtractError::Parse(err.to_string())
    }
}

/// Result of a single extraction, in the shape reported on stdout:
/// `{"success": true, "text": ...}` or `{"success": false, "error": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "OutcomeWire", try_from = "OutcomeWire")]
pub enum ExtractionOutcome {
    Success { text: String },
    Failure { error: String },
}

impl ExtractionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExtractionOutcome::Success { .. })
    }

    /// Single-line JSON laid out like Python's `json.dumps`:
    /// `{"success": true, "text": "..."}`, non-ASCII escaped.
    pub fn to_json(&self) -> String {
        // Serializing a struct of strings and a bool cannot fail.
        json::to_string(self).unwrap_or_default()
    }

    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

impl From<Result<String, ExtractError>> for ExtractionOutcome {
    fn from(result: Result<String, ExtractError>) -> Self {
        match result {
            Ok(text) => ExtractionOutcome::Success { text },
            Err(e) => ExtractionOutcome::Failure {
                error: e.to_string(),
            },
        }
    }
}

impl From<ExtractError> for ExtractionOutcome {
    fn from(err: ExtractError) -> Self {
        ExtractionOutcome::Failure {
            error: err.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct OutcomeWire {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<ExtractionOutcome> for OutcomeWire {
    fn from(outcome: ExtractionOutcome) -> Self {
        match outcome {
            ExtractionOutcome::Success { text } => OutcomeWire {
                success: true,
                text: Some(text),
                error: None,
            },
            ExtractionOutcome::Failure { error } => OutcomeWire {
                success: false,
                text: None,
                error: Some(error),
            },
        }
    }
}

impl TryFrom<OutcomeWire> for ExtractionOutcome {
    type Error = String;

    fn try_from(wire: OutcomeWire) -> Result<Self, Self::Error> {
        match (wire.success, wire.text, wire.error) {
            (true, Some(text), _) => Ok(ExtractionOutcome::Success { text }),
            (true, None, _) => Err("successful outcome without `text`".to_string()),
            (false, _, error) => Ok(ExtractionOutcome::Failure {
                error: error.unwrap_or_else(|| "Unknown extraction error".to_string()),
            }),
        }
    }
}
