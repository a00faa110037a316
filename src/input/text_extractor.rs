//! Text extraction from the supported file formats
//!
//! Each extractor reports failure through `Result`; degrading a failure to
//! empty text is the dispatcher's job (see `input::manager`).

use crate::error::{Result, RankerError};
use log::warn;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use std::path::Path;
use tokio::fs;
use zip::ZipArchive;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        Self::extract_from_bytes(&bytes).map_err(|e| {
            RankerError::PdfExtraction(format!("'{}': {}", path.display(), e))
        })
    }
}

impl PdfExtractor {
    /// Extract every page in order. Only an unparseable container is an error.
    pub fn extract_from_bytes(bytes: &[u8]) -> Result<String> {
        let document = lopdf::Document::load_mem(bytes)?;

        let pages = document.get_pages().into_keys().map(|page_number| {
            document.extract_text(&[page_number]).map_err(|e| {
                RankerError::PdfExtraction(format!("page {}: {}", page_number, e))
            })
        });

        Ok(join_pages(pages))
    }
}

/// Join per-page results with newlines; a failed page contributes an empty string.
pub fn join_pages<I>(pages: I) -> String
where
    I: IntoIterator<Item = Result<String>>,
{
    pages
        .into_iter()
        .map(|page| match page {
            Ok(text) => text,
            Err(e) => {
                warn!("Skipping PDF page without extractable text: {}", e);
                String::new()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        Self::extract_from_bytes(&bytes).map_err(|e| {
            RankerError::DocxExtraction(format!("'{}': {}", path.display(), e))
        })
    }
}

impl DocxExtractor {
    const DOCUMENT_PART: &'static str = "word/document.xml";

    pub fn extract_from_bytes(bytes: &[u8]) -> Result<String> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;

        let mut xml = String::new();
        archive
            .by_name(Self::DOCUMENT_PART)?
            .read_to_string(&mut xml)?;

        Ok(Self::paragraphs(&xml)?.join("\n"))
    }

    /// Text of every `w:p` element in document order
    fn paragraphs(xml: &str) -> Result<Vec<String>> {
        let mut reader = Reader::from_str(xml);

        let mut paragraphs = Vec::new();
        // Text boxes can nest paragraphs inside paragraphs
        let mut open: Vec<String> = Vec::new();
        let mut in_text = false;

        loop {
            match reader.read_event()? {
                Event::Start(ref e) => match e.name().as_ref() {
                    b"w:p" => open.push(String::new()),
                    b"w:t" => in_text = true,
                    _ => {}
                },
                Event::Empty(ref e) => match e.name().as_ref() {
                    b"w:p" => paragraphs.push(String::new()),
                    b"w:tab" => {
                        if let Some(current) = open.last_mut() {
                            current.push('\t');
                        }
                    }
                    b"w:br" | b"w:cr" => {
                        if let Some(current) = open.last_mut() {
                            current.push('\n');
                        }
                    }
                    _ => {}
                },
                Event::Text(ref t) if in_text => {
                    if let Some(current) = open.last_mut() {
                        current.push_str(&t.unescape()?);
                    }
                }
                Event::End(ref e) => match e.name().as_ref() {
                    b"w:t" => in_text = false,
                    b"w:p" => {
                        if let Some(paragraph) = open.pop() {
                            paragraphs.push(paragraph);
                        }
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(paragraphs)
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        String::from_utf8(bytes).map_err(|e| {
            RankerError::Encoding(format!("'{}' is not valid UTF-8: {}", path.display(), e))
        })
    }
}
