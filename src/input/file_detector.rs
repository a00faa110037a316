//! File type detection

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FileType {
    Pdf,
    Docx,
    Text,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "docx" => FileType::Docx,
            "txt" => FileType::Text,
            _ => FileType::Unknown,
        }
    }

    /// Files without an extension are `Unknown`
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(FileType::Unknown)
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, FileType::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_is_case_insensitive() {
        assert_eq!(FileType::from_path(Path::new("resume.PDF")), FileType::Pdf);
        assert_eq!(FileType::from_path(Path::new("resume.Docx")), FileType::Docx);
        assert_eq!(FileType::from_path(Path::new("resume.txt")), FileType::Text);
    }

    #[test]
    fn test_unrecognized_extensions() {
        assert_eq!(FileType::from_path(Path::new("resume.xyz")), FileType::Unknown);
        assert_eq!(FileType::from_path(Path::new("resume.doc")), FileType::Unknown);
        assert_eq!(FileType::from_path(Path::new("resume.md")), FileType::Unknown);
        assert_eq!(FileType::from_path(Path::new("resume")), FileType::Unknown);
        assert!(!FileType::Unknown.is_supported());
    }
}
