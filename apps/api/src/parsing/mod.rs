//! Document text extraction pipeline.
//!
//! validate → format loader → (PDF) strategy fallback → aggregate.
//!
//! `AppState` holds an `Arc<DocumentParser>`; loaders are swappable through
//! [`DocumentParser::with_loaders`].

pub mod aggregate;
pub mod errors;
pub mod loaders;
pub mod models;
pub mod quality;
pub mod strategy;
pub mod temp_upload;
pub mod validation;

#[cfg(test)]
pub(crate) mod fixtures;

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::parsing::aggregate::aggregate;
use crate::parsing::errors::ParseError;
use crate::parsing::loaders::{
    load_legacy_doc, load_text, DocxLoader, DocxRsLoader, PdfExtractLoader, PdfLoader,
};
use crate::parsing::models::{FileType, ParsedDocument, UploadedFile};
use crate::parsing::strategy::{extract_with_fallback, DEFAULT_ATTEMPT_TIMEOUT};
use crate::parsing::validation::{validate_file, MAX_FILE_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserLimits {
    pub max_file_size: usize,
    /// Upper bound on a single PDF strategy attempt.
    pub pdf_attempt_timeout: Duration,
}

impl Default for ParserLimits {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
            pdf_attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
        }
    }
}

#[derive(Clone)]
pub struct DocumentParser {
    pdf: Arc<dyn PdfLoader>,
    docx: Arc<dyn DocxLoader>,
    limits: ParserLimits,
}

impl DocumentParser {
    /// Parser backed by `pdf-extract` and `docx-rs`.
    pub fn new(limits: ParserLimits) -> Self {
        Self::with_loaders(Arc::new(PdfExtractLoader), Arc::new(DocxRsLoader), limits)
    }

    pub fn with_loaders(
        pdf: Arc<dyn PdfLoader>,
        docx: Arc<dyn DocxLoader>,
        limits: ParserLimits,
    ) -> Self {
        Self { pdf, docx, limits }
    }

    pub fn limits(&self) -> ParserLimits {
        self.limits
    }

    /// Extracts the text of `file`. All-or-nothing: any failure returns an
    /// error naming the detected file type and no partial text.
    pub async fn parse_document(&self, file: &UploadedFile) -> Result<ParsedDocument, ParseError> {
        let file_type = validate_file(file, self.limits.max_file_size)?;
        debug!(file_type = %file_type, size = file.size(), "Upload validated");

        let (fragments, pages) = match file_type {
            FileType::Pdf => {
                let outcome =
                    extract_with_fallback(self.pdf.as_ref(), &file.bytes, self.limits.pdf_attempt_timeout)
                        .await?;
                debug!(strategy = ?outcome.strategy, "PDF strategy selected");
                (outcome.extraction.fragments, outcome.extraction.pages)
            }
            FileType::Docx => {
                let fragments = self
                    .docx
                    .load(file.bytes.clone())
                    .await
                    .map_err(|e| ParseError::format(file_type, e.to_string()))?;
                (fragments, None)
            }
            FileType::Doc => {
                let doc = load_legacy_doc(self.docx.as_ref(), file.bytes.clone())
                    .await
                    .map_err(|e| ParseError::format(file_type, e.to_string()))?;
                debug!(source = ?doc.source, "Legacy DOC decoded");
                (doc.fragments, None)
            }
            FileType::Txt => {
                let fragments =
                    load_text(&file.bytes).map_err(|e| ParseError::format(file_type, e.to_string()))?;
                (fragments, None)
            }
        };

        let document = aggregate(&fragments, pages, file_type, file);
        info!(
            file_type = %file_type,
            pages = ?document.metadata.pages,
            word_count = document.metadata.word_count,
            "Document parsed"
        );
        Ok(document)
    }
}
