//! Extraction dispatcher: routes a file to its extractor and degrades failures

use crate::input::file_detector::FileType;
use crate::input::text_extractor::{DocxExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::{debug, error, warn};
use std::path::Path;

/// Extract plain text from `path` as the declared kind.
///
/// Never fails: unsupported kinds and extraction errors are logged and
/// returned as an empty string.
pub async fn extract(path: &Path, kind: FileType) -> String {
    let result = match kind {
        FileType::Pdf => {
            debug!("Extracting text from PDF: {}", path.display());
            PdfExtractor.extract(path).await
        }
        FileType::Docx => {
            debug!("Extracting text from DOCX: {}", path.display());
            DocxExtractor.extract(path).await
        }
        FileType::Text => {
            debug!("Reading plain text file: {}", path.display());
            PlainTextExtractor.extract(path).await
        }
        FileType::Unknown => {
            warn!("Unsupported file type: {}", path.display());
            return String::new();
        }
    };

    match result {
        Ok(text) => text,
        Err(e) => {
            error!("{:?} extraction failed for {}: {}", kind, path.display(), e);
            String::new()
        }
    }
}

/// Detect the kind from the file extension, then [`extract`]
pub async fn extract_text_from_file(path: &Path) -> String {
    extract(path, FileType::from_path(path)).await
}
