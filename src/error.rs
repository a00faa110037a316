//! Error handling for the resume ranker

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RankerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("DOCX extraction error: {0}")]
    DocxExtraction(String),

    #[error("Text encoding error: {0}")]
    Encoding(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Model loading error: {0}")]
    ModelLoading(String),

    #[error("Embedding generation error: {0}")]
    Embedding(String),

    #[error("Scoring failed: {0}")]
    Scoring(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),
}

pub type Result<T> = std::result::Result<T, RankerError>;

/// Errors surfaced by the embedding library arrive as `anyhow` errors
impl From<anyhow::Error> for RankerError {
    fn from(err: anyhow::Error) -> Self {
        RankerError::ModelLoading(format!("{:#}", err))
    }
}

impl From<lopdf::Error> for RankerError {
    fn from(err: lopdf::Error) -> Self {
        RankerError::PdfExtraction(err.to_string())
    }
}

impl From<zip::result::ZipError> for RankerError {
    fn from(err: zip::result::ZipError) -> Self {
        RankerError::DocxExtraction(err.to_string())
    }
}

impl From<quick_xml::Error> for RankerError {
    fn from(err: quick_xml::Error) -> Self {
        RankerError::DocxExtraction(err.to_string())
    }
}
