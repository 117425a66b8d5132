//! Text extraction from the supported document formats

use crate::error::{MatcherError, Result};
use crate::input::file_detector::FileType;
use docx_rs::{DocumentChild, InsertChild, ParagraphChild, Run, RunChild};
use log::error;
use serde::{Deserialize, Serialize};

/// Outcome of extracting a document. Failures never escape as errors;
/// callers receive an explicit marker instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Extraction {
    Text(String),
    Failed { reason: String },
}

impl Extraction {
    pub fn from_result(result: Result<String>) -> Self {
        match result {
            Ok(text) => Extraction::Text(text),
            Err(e) => Extraction::Failed { reason: e.to_string() },
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Extraction::Failed { .. })
    }

    /// Collapse into plain text, logging a failure and yielding `""` for it.
    pub fn into_text(self, source: &str) -> String {
        match self {
            Extraction::Text(text) => text,
            Extraction::Failed { reason } => {
                error!("Extraction error for '{}': {}", source, reason);
                String::new()
            }
        }
    }
}

pub trait TextExtractor {
    fn extract_bytes(&self, bytes: &[u8]) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract_bytes(&self, bytes: &[u8]) -> Result<String> {
        let doc = lopdf::Document::load_mem(bytes)
            .map_err(|e| MatcherError::PdfExtraction(format!("Failed to load PDF: {}", e)))?;

        let mut pages = Vec::new();
        for page_num in doc.get_pages().keys() {
            let text = doc.extract_text(&[*page_num]).map_err(|e| {
                MatcherError::PdfExtraction(format!("Failed to extract page {}: {}", page_num, e))
            })?;
            let text = text.trim();
            if !text.is_empty() {
                pages.push(text.to_string());
            }
        }

        Ok(pages.join(" "))
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract_bytes(&self, bytes: &[u8]) -> Result<String> {
        let docx = docx_rs::read_docx(bytes)
            .map_err(|e| MatcherError::DocxExtraction(format!("Failed to read DOCX: {}", e)))?;

        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(p) => Some(paragraph_text(&p.children)),
                _ => None,
            })
            .filter(|text| !text.is_empty())
            .collect();

        Ok(paragraphs.join(" "))
    }
}

fn paragraph_text(children: &[ParagraphChild]) -> String {
    let mut text = String::new();
    push_paragraph_text(children, &mut text);
    text
}

// Hyperlinks and tracked insertions wrap their own runs.
fn push_paragraph_text(children: &[ParagraphChild], text: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run_text(run, text),
            ParagraphChild::Hyperlink(link) => push_paragraph_text(&link.children, text),
            ParagraphChild::Insert(insert) => {
                for insert_child in &insert.children {
                    if let InsertChild::Run(run) = insert_child {
                        push_run_text(run, text);
                    }
                }
            }
            _ => {}
        }
    }
}

fn push_run_text(run: &Run, text: &mut String) {
    for run_child in &run.children {
        match run_child {
            RunChild::Text(t) => text.push_str(&t.text),
            RunChild::Tab(_) => text.push('\t'),
            RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract_bytes(&self, bytes: &[u8]) -> Result<String> {
        String::from_utf8(bytes.to_vec()).map_err(|e| {
            MatcherError::TextProcessing(format!("Text file is not valid UTF-8: {}", e))
        })
    }
}

/// Extract text from in-memory document bytes of the given type.
pub fn extract_bytes(file_type: FileType, bytes: &[u8]) -> Extraction {
    let result = match file_type {
        FileType::Pdf => PdfExtractor.extract_bytes(bytes),
        FileType::Docx => DocxExtractor.extract_bytes(bytes),
        FileType::Text => PlainTextExtractor.extract_bytes(bytes),
        FileType::Unknown => Err(MatcherError::UnsupportedFormat(
            "no extractor for this file type".to_string(),
        )),
    };
    Extraction::from_result(result)
}
