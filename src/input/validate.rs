//! Checks applied to uploads before they reach the scoring core

use crate::config::Config;
use crate::error::{Result, RankerError};
use crate::input::{extract_text_from_file, FileType};
use std::path::Path;

pub const EXTRACTION_FAILED: &str =
    "Could not extract text from the file. It might be empty, corrupted, or an unsupported format.";

/// Reject files the extractors should never see.
///
/// An empty file is reported as empty here, not later as an extraction failure.
pub fn validate_upload(path: &Path, label: &str, config: &Config) -> Result<()> {
    if !FileType::from_path(path).is_supported() {
        return Err(RankerError::UnsupportedFormat(format!(
            "{} file {} (expected .pdf, .docx or .txt)",
            label,
            path.display()
        )));
    }

    let metadata = std::fs::metadata(path).map_err(|_| {
        RankerError::InvalidInput(format!("{} file does not exist: {}", label, path.display()))
    })?;

    if !metadata.is_file() {
        return Err(RankerError::InvalidInput(format!(
            "{} path is not a file: {}",
            label,
            path.display()
        )));
    }
    if metadata.len() == 0 {
        return Err(RankerError::InvalidInput(format!(
            "{} file is empty: {}",
            label,
            path.display()
        )));
    }
    if metadata.len() > config.max_file_size_bytes() {
        return Err(RankerError::InvalidInput(format!(
            "{} file exceeds the {} MB limit",
            label, config.input.max_file_size_mb
        )));
    }

    Ok(())
}

/// Validate and extract an upload; text that comes back blank is an extraction failure
pub async fn load_document(path: &Path, label: &str, config: &Config) -> Result<String> {
    validate_upload(path, label, config)?;

    let text = extract_text_from_file(path).await;
    if text.trim().is_empty() {
        return Err(RankerError::InvalidInput(EXTRACTION_FAILED.to_string()));
    }

    Ok(text)
}

/// The job description, from inline text or from a file
pub async fn load_description(job: Option<&Path>, job_text: Option<&str>, config: &Config) -> Result<String> {
    match (job, job_text) {
        (_, Some(text)) if !text.trim().is_empty() => Ok(text.to_string()),
        (None, Some(_)) | (None, None) => Err(RankerError::InvalidInput(
            "Job description cannot be empty".to_string(),
        )),
        (Some(path), _) => load_document(path, "Job description", config).await,
    }
}
