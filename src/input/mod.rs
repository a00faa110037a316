//! Input processing module
//! Handles file type detection and best-effort text extraction

pub mod file_detector;
pub mod text_extractor;
pub mod manager;
pub mod validate;

pub use file_detector::FileType;
pub use manager::{extract, extract_text_from_file};
