//! Error types
//!
//! Mỗi tầng có error riêng; `ScanError` là cái duy nhất ra tới caller.

use thiserror::Error;

pub type ScanResult<T> = Result<T, ScanError>;

/// Malformed or unsupported upload. Always the caller's input problem.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("File is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected JSON document: {0}")]
    UnexpectedShape(String),
}

/// Feature extraction / model invocation failure.
///
/// Never leaves the behavior classifier: it always resolves to the
/// rule-based path.
#[derive(Error, Debug)]
#[error("InferenceError: {0}")]
pub struct InferenceError(pub String);

#[derive(Error, Debug)]
pub enum AdvisoryError {
    #[error("Advisory service not configured")]
    NotConfigured,

    #[error("Advisory request failed: {0}")]
    Network(String),

    #[error("Advisory response invalid: {0}")]
    InvalidResponse(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Scan {0} not found")]
    NotFound(String),

    #[error("History IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("History serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Failed to parse file: {0}")]
    Parse(#[from] ParseError),

    #[error("Failed to record scan: {0}")]
    Store(#[from] StoreError),

    #[error("Failed to load reference data: {0}")]
    Setup(#[from] std::io::Error),

    #[error("Scan failed: {0}")]
    Failed(String),
}

impl ScanError {
    /// True when the caller should fix the upload rather than retry.
    pub fn is_input_error(&self) -> bool {
        matches!(self, ScanError::Parse(_))
    }
}
